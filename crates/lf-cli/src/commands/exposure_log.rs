use std::path::PathBuf;

use clap::Parser;
use comfy_table::{ContentArrangement, Table};
use serde_json::json;

use lf_core::time;
use lf_fates::ExposureEvent;
use lf_fates::exposure::{DEFAULT_CATEGORIES, append_exposure, risk_exposure};

use super::{CommonArgs, print_json};

/// Arguments for `exposure-log`.
#[derive(Debug, Parser)]
#[command(
    name = "exposure-log",
    about = "Categorise a risky event and the fate pressure it adds",
    version
)]
pub struct Cli {
    /// What happened
    #[arg(long, required_unless_present = "list")]
    pub event: Option<String>,

    /// Override the category's base increment (clamped to 0.01-0.30)
    #[arg(long)]
    pub pressure: Option<f64>,

    /// Entity the event happened to
    #[arg(long)]
    pub name: Option<String>,

    /// Append the entry to this JSON log, creating it when missing
    #[arg(long, value_name = "FILE")]
    pub append: Option<PathBuf>,

    /// List the exposure categories
    #[arg(long)]
    pub list: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Shared flags
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run `exposure-log`.
pub fn run(cli: Cli) -> Result<(), String> {
    if cli.list {
        return list(cli.json);
    }
    let Some(event) = cli.event else {
        return Err("--event is required".into());
    };

    let entry = ExposureEvent::new(
        DEFAULT_CATEGORIES,
        &event,
        cli.pressure,
        cli.name,
        &time::today(),
    );

    let total = match &cli.append {
        Some(path) => {
            let log = append_exposure(path, entry.to_entry()).map_err(|e| e.to_string())?;
            Some((path, log.len(), risk_exposure(&log)))
        }
        None => None,
    };

    if cli.json {
        return print_json(&entry);
    }

    let rule = "-".repeat(50);
    println!("EXPOSURE EVENT LOGGED");
    println!("{}", "=".repeat(50));
    println!();
    if let Some(entity) = &entry.entity {
        println!("Entity: {entity}");
    }
    println!("Date: {}", entry.date);
    println!("Event: {}", entry.event);
    println!("Category: {}", entry.category);
    println!("Pressure Increment: +{:.1}%", entry.pressure * 100.0);
    println!();
    println!("WORLD BIBLE ENTRY FORMAT");
    println!("{rule}");
    println!("Add to entity's Risk Exposure Log section:");
    println!();
    println!(
        "- {}: {} (+{:.0}% pressure)",
        entry.date,
        entry.event,
        entry.pressure * 100.0
    );
    println!();
    println!("CUMULATIVE EFFECT");
    println!("{rule}");
    match total {
        Some((path, entries, sum)) => {
            println!("Appended to {} ({entries} entries).", path.display());
            println!("Logged exposure now totals +{:.1}%.", sum * 100.0);
            println!(
                "Run fate-pressure --exposure-log {} to see the current total.",
                path.display()
            );
        }
        None => {
            println!("This event adds to the entity's total fate pressure.");
            println!("Run fate-pressure to see the current total.");
        }
    }
    Ok(())
}

fn list(json: bool) -> Result<(), String> {
    if json {
        let rows: Vec<_> = DEFAULT_CATEGORIES
            .iter()
            .map(|c| {
                json!({
                    "category": c.name,
                    "base": c.base,
                    "description": c.description,
                    "keywords": c.keywords,
                })
            })
            .collect();
        return print_json(&rows);
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Base", "Description", "Keywords"]);
    for c in DEFAULT_CATEGORIES {
        table.add_row(vec![
            c.name.to_uppercase(),
            format!("+{:.0}%", c.base * 100.0),
            c.description.to_string(),
            c.keywords.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}
