use clap::Parser;

use lf_core::time;
use lf_world::era::DEFAULT_ERA;
use lf_world::institution::DEFAULT_CRISES;
use lf_world::tables::FALLBACK_SECTOR;
use lf_world::{InstitutionRequest, InstitutionTables, generate_ecosystem, generate_institution};

use super::{CommonArgs, print_json, seeded};

/// Arguments for `institution`.
#[derive(Debug, Parser)]
#[command(
    name = "institution",
    about = "Generate an institution with a founding story, renames, and crises",
    version
)]
pub struct Cli {
    /// Institution name (drawn from the sector's naming patterns when omitted)
    pub name: Option<String>,

    /// Sector, e.g. technology, banking, military
    #[arg(long, default_value = FALLBACK_SECTOR)]
    pub sector: String,

    /// Founding era, e.g. 1920s
    #[arg(long, default_value = DEFAULT_ERA)]
    pub era: String,

    /// Number of crises in its history
    #[arg(long, default_value_t = DEFAULT_CRISES)]
    pub crises: usize,

    /// Also generate a competitor and an older partner
    #[arg(long)]
    pub ecosystem: bool,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print JSON instead of Markdown
    #[arg(long)]
    pub json: bool,

    /// Shared flags
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run `institution`.
pub fn run(cli: Cli) -> Result<(), String> {
    let tables = InstitutionTables::default();
    if !tables.sectors().any(|s| s == cli.sector) {
        tracing::warn!(sector = %cli.sector, "unknown sector, using technology naming patterns");
    }

    let request = InstitutionRequest {
        name: cli.name,
        sector: cli.sector,
        era: cli.era,
        crises: cli.crises,
    };
    let (seed, mut rng) = seeded(cli.seed);
    let year = time::current_year();
    tracing::info!(seed, year, "generating institution");

    if cli.ecosystem {
        let ecosystem = generate_ecosystem(&tables, &request, year, &mut rng);
        if cli.json {
            return print_json(&ecosystem.profiles());
        }
        println!("{}", ecosystem.to_markdown());
    } else {
        let profile = generate_institution(&tables, &request, year, &mut rng);
        if cli.json {
            return print_json(&profile);
        }
        println!("{}", profile.to_markdown());
    }
    Ok(())
}
