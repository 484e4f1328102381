//! Character naming for Loreforge.
//!
//! Names are compared through a derived [`SoundProfile`] and plain edit
//! distance so that a cast does not end up with a Sarah, a Sara, and a Samira
//! who readers cannot tell apart. The [`CastFile`] records every name a
//! project has used; the generators draw fresh candidates from curated lists
//! or phoneme presets with a seeded [`lf_core::Lcg`].

/// Cast file model and persistence.
pub mod cast;
/// Collision detection between a candidate name and a cast.
pub mod collision;
/// Case-insensitive edit distance.
pub mod distance;
/// Name generation from lists, pools, and phoneme presets.
pub mod generate;
/// Lookup of name lists and presets in the data directory.
pub mod library;
/// Phonetic summary of a name.
pub mod sound;

/// Re-export cast types.
pub use cast::{
    CastFile, CastMeta, Character, CultureShare, NewCharacter, Suggestions, init_cast, load_cast,
    save_cast,
};
/// Re-export collision types.
pub use collision::{CollisionReport, Severity, check_collision};
/// Re-export the distance function.
pub use distance::levenshtein;
/// Re-export generation types.
pub use generate::{
    GeneratedName, Gender, NameRequest, NameSource, SyllableRange, generate_names, quick_collision,
};
/// Re-export the data library.
pub use library::{ListKind, NameLibrary, NameList, PhonemePreset};
/// Re-export the sound profile.
pub use sound::SoundProfile;
