use clap::Parser;
use comfy_table::{ContentArrangement, Table};
use serde_json::json;

use lf_fates::FateChoiceData;
use lf_fates::choice::{FateChoice, builtin_pattern, select_pattern};

use super::{CommonArgs, print_json, seeded, unit_interval};

const CHOICES_FILE: &str = "fates/fate-choices.json";
const LOW_PRESSURE: f64 = 0.5;

/// Arguments for `fate-choice`.
#[derive(Debug, Parser)]
#[command(
    name = "fate-choice",
    about = "Offer a dramatic choice to an entity under high fate pressure",
    version
)]
pub struct Cli {
    /// Entity facing the choice
    #[arg(long, required_unless_present = "list")]
    pub name: Option<String>,

    /// Fate pressure, 0-1
    #[arg(long, value_parser = unit_interval, required_unless_present = "list")]
    pub pressure: Option<f64>,

    /// Fortune buffer, 0-5
    #[arg(long, default_value_t = 0.0)]
    pub fortune: f64,

    /// Name substituted for the antagonist in the situation
    #[arg(long)]
    pub antagonist: Option<String>,

    /// Choice pattern key (random when omitted or unknown)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// List the available patterns
    #[arg(long)]
    pub list: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Shared flags
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run `fate-choice`.
pub fn run(cli: Cli) -> Result<(), String> {
    let data = cli.common.data();
    let choices = FateChoiceData::load(&data.join(CHOICES_FILE)).map_err(|e| e.to_string())?;

    if cli.list {
        return list(choices.as_ref(), cli.json);
    }
    let (Some(name), Some(pressure)) = (cli.name, cli.pressure) else {
        return Err("--name and --pressure are required".into());
    };
    if pressure < LOW_PRESSURE {
        tracing::warn!(pressure, "fate choices are meant for pressure above 50%");
    }

    let (seed, mut rng) = seeded(cli.seed);
    let pattern = select_pattern(choices.as_ref(), cli.pattern.as_deref(), &mut rng);
    let choice = FateChoice::generate(
        &name,
        pressure,
        cli.fortune.max(0.0),
        pattern,
        cli.antagonist.as_deref(),
        &mut rng,
    );
    tracing::info!(seed, pattern = %choice.pattern, "choice generated");

    if cli.json {
        return print_json(&choice);
    }
    println!("{}", choice.render());
    Ok(())
}

fn list(choices: Option<&FateChoiceData>, json: bool) -> Result<(), String> {
    let patterns = match choices {
        Some(data) => data.choice_patterns.clone(),
        None => vec![builtin_pattern()],
    };
    if json {
        let rows: Vec<_> = patterns
            .iter()
            .map(|(key, p)| json!({ "pattern": key, "description": p.description, "paths": p.paths.len() }))
            .collect();
        return print_json(&rows);
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Pattern", "Paths", "Description"]);
    for (key, pattern) in &patterns {
        table.add_row(vec![
            key.clone(),
            pattern.paths.len().to_string(),
            pattern.description.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}
