/// `cast-tracker`: cast file management and collision checks.
pub mod cast_tracker;
/// `character-name`: name generation.
pub mod character_name;
/// `exposure-log`: exposure categorisation and logging.
pub mod exposure_log;
/// `fate-choice`: dramatic choices.
pub mod fate_choice;
/// `fate-pressure`: the pressure formula.
pub mod fate_pressure;
/// `fate-roll`: the percentile roll.
pub mod fate_roll;
/// `institution`: institution histories.
pub mod institution;
/// `propose-shift`: Markdown proposals.
pub mod propose_shift;
/// `taste-audit`: rubric scoring.
pub mod taste_audit;

use std::path::PathBuf;

use clap::{ArgAction, Args};
use serde::Serialize;

use lf_core::{DataDir, Lcg, random_seed};

/// Flags every tool accepts.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory holding the static data files (default: ./data, then the bundled data)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    /// The resolved data directory.
    pub fn data(&self) -> DataDir {
        DataDir::discover(self.data_dir.as_deref())
    }
}

/// Print `value` as pretty JSON on stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

/// The seed to use and a generator seeded with it.
fn seeded(seed: Option<u64>) -> (u64, Lcg) {
    let seed = seed.unwrap_or_else(random_seed);
    tracing::debug!(seed, "generator seeded");
    (seed, Lcg::new(seed))
}

/// Parse a probability in [0, 1].
fn unit_interval(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside 0.0 to 1.0"))
    }
}
