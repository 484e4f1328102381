//! Worldbuilding generators for Loreforge.
//!
//! Institutions are assembled from sector- and era-keyed template tables.
//! The tables are plain constants gathered into [`InstitutionTables`] and
//! passed to the generator, so alternative tables can be swapped in.

/// Founding-era parsing and rename arithmetic.
pub mod era;
/// Profile and ecosystem generation.
pub mod institution;
/// The built-in template tables.
pub mod tables;

/// Re-export era helpers.
pub use era::{era_bucket, era_year};
/// Re-export generation types.
pub use institution::{
    Ecosystem, InstitutionProfile, InstitutionRequest, generate_ecosystem, generate_institution,
};
/// Re-export the tables.
pub use tables::InstitutionTables;
