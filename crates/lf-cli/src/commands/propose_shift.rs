use std::fs;
use std::path::PathBuf;

use clap::Parser;

use lf_core::time;
use lf_fates::proposal::{DEFAULT_PRESSURE, DEFAULT_TRIGGER};
use lf_fates::{ProposalRequest, ShiftCategory, ShiftSeverity, ShiftTypes};

use super::{CommonArgs, seeded, unit_interval};

const SHIFT_TYPES_FILE: &str = "fates/shift-types.json";

/// Arguments for `propose-shift`.
#[derive(Debug, Parser)]
#[command(
    name = "propose-shift",
    about = "Write a Markdown fate-shift proposal for human approval",
    version
)]
pub struct Cli {
    /// Entity name
    #[arg(long)]
    pub name: String,

    /// Shift type, e.g. death, fall, schism
    #[arg(long = "type", value_name = "TYPE")]
    pub shift_type: String,

    /// minor, moderate, major or catastrophic
    #[arg(long)]
    pub severity: ShiftSeverity,

    /// character, faction or location
    #[arg(long, default_value_t = ShiftCategory::Character)]
    pub category: ShiftCategory,

    /// Fate pressure at assessment, 0-1
    #[arg(long, value_parser = unit_interval, default_value_t = DEFAULT_PRESSURE)]
    pub pressure: f64,

    /// The fate roll that triggered the shift
    #[arg(long)]
    pub roll: Option<u32>,

    /// What prompted the assessment
    #[arg(long, default_value = DEFAULT_TRIGGER)]
    pub trigger: String,

    /// Contributing vulnerabilities, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub vulns: Vec<String>,

    /// Write the proposal here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Seed for the narrative hook
    #[arg(long)]
    pub seed: Option<u64>,

    /// Shared flags
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run `propose-shift`.
pub fn run(cli: Cli) -> Result<(), String> {
    let data = cli.common.data();
    let types = ShiftTypes::load(&data.join(SHIFT_TYPES_FILE)).map_err(|e| e.to_string())?;
    let template = ShiftTypes::template_or_generic(types.as_ref(), cli.category, &cli.shift_type);

    let mut request = ProposalRequest::new(cli.name, cli.shift_type, cli.severity, time::today());
    request.category = cli.category;
    request.pressure = cli.pressure;
    request.roll = cli.roll;
    request.trigger = cli.trigger;
    request.vulnerabilities = cli
        .vulns
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    let (seed, mut rng) = seeded(cli.seed);
    let proposal = request.render(&template, &mut rng);
    tracing::info!(seed, name = %request.name, "proposal rendered");

    match cli.output {
        Some(path) => {
            fs::write(&path, &proposal)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            println!("Proposal written to: {}", path.display());
        }
        None => println!("{proposal}"),
    }
    Ok(())
}
