use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use lf_fates::pressure::MAX_FORTUNE;
use lf_fates::{FateRoll, roll_fate};

use super::{CommonArgs, print_json, seeded, unit_interval};

/// Arguments for `fate-roll`.
#[derive(Debug, Parser)]
#[command(name = "fate-roll", about = "Roll against an entity's fate pressure", version)]
pub struct Cli {
    /// Fate pressure, 0-1
    #[arg(long, value_parser = unit_interval)]
    pub pressure: f64,

    /// The entity is in physical danger
    #[arg(long)]
    pub danger: bool,

    /// Fortune buffer, 0-5
    #[arg(long, default_value_t = 3.0)]
    pub fortune: f64,

    /// Entity name for the heading
    #[arg(long)]
    pub name: Option<String>,

    /// Seed for a reproducible roll
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Shared flags
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RollOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    fate_pressure: f64,
    in_danger: bool,
    fortune_buffer: f64,
    seed: u64,
    #[serde(flatten)]
    result: &'a FateRoll,
}

/// Run `fate-roll`.
pub fn run(cli: Cli) -> Result<(), String> {
    let fortune = cli.fortune.clamp(0.0, MAX_FORTUNE);
    let (seed, mut rng) = seeded(cli.seed);
    let result = roll_fate(cli.pressure, cli.danger, fortune, &mut rng);

    if cli.json {
        return print_json(&RollOutput {
            name: cli.name.as_deref(),
            fate_pressure: cli.pressure,
            in_danger: cli.danger,
            fortune_buffer: fortune,
            seed,
            result: &result,
        });
    }
    println!("{}", render(&result, cli.name.as_deref()));
    Ok(())
}

fn render(result: &FateRoll, name: Option<&str>) -> String {
    let rule = "-".repeat(50);
    let mut lines = vec![
        match name {
            Some(name) => format!("FATE ROLL: {name}"),
            None => "FATE ROLL".to_string(),
        },
        "=".repeat(50),
        String::new(),
        format!(
            "Roll: {} vs Threshold {:.0}",
            result.roll, result.threshold
        ),
        String::new(),
    ];

    match result.severity {
        Some(severity) => {
            lines.push("THE WHEEL TURNS".red().bold().to_string());
            lines.push(rule.clone());
            lines.push(format!(
                "Fate-shift triggered. Severity: {}",
                severity.as_str().to_uppercase()
            ));
            lines.push(String::new());
            lines.extend(severity.guidance().map(str::to_string));

            if result.death_eligible {
                lines.push(String::new());
                lines.push("DEATH ROLL".to_string());
                lines.push(rule.clone());
                lines.push(
                    "Death eligibility: YES (in danger, pressure > 50%, fortune depleted)"
                        .to_string(),
                );
                if let (Some(draw), Some(limit)) = (result.death_roll, result.death_threshold) {
                    lines.push(format!(
                        "Death roll: {:.1}% vs threshold {:.1}%",
                        draw * 100.0,
                        limit * 100.0
                    ));
                }
                lines.push(String::new());
                if result.death_occurs == Some(true) {
                    lines.push("*** DEATH OCCURS ***".red().bold().to_string());
                    lines.push(
                        "The wheel of fate turns completely. The entity meets their end."
                            .to_string(),
                    );
                    lines.push(String::new());
                    lines.push("Next steps:".to_string());
                    lines.push("  1. Run propose-shift to generate a death proposal".to_string());
                    lines.push("  2. Determine narrative hook for the death".to_string());
                    lines.push("  3. Submit for human approval".to_string());
                } else {
                    lines.push("Death avoided. Fate grants a reprieve this time.".to_string());
                    if result.fortune_decrement == Some(true) {
                        lines.push(
                            "Fortune buffer should decrease by 1 (narrow escape).".to_string(),
                        );
                    }
                }
            }
        }
        None => {
            lines.push("THE WHEEL HOLDS".green().bold().to_string());
            lines.push(rule.clone());
            lines.push("No fate-shift triggered. The entity continues.".to_string());
            lines.push(String::new());
            lines.push("Pressure continues to accumulate unless addressed.".to_string());
            lines.push(
                "Re-roll at next trigger point (session end, arc completion, etc.).".to_string(),
            );
        }
    }

    lines.push(String::new());
    lines.push("NEXT STEPS".to_string());
    lines.push(rule);
    let steps: &[&str] = if result.shift_triggered {
        &[
            "1. Determine appropriate shift type based on severity",
            "2. Consider running fate-choice for a Tier 2 choice",
            "3. Run propose-shift to generate a formal proposal",
            "4. Submit for human approval before applying",
        ]
    } else {
        &[
            "1. Continue tracking exposure events",
            "2. Update vulnerability/protection if changed",
            "3. Re-roll at next trigger point",
        ]
    };
    lines.extend(steps.iter().map(|s| s.to_string()));
    lines.join("\n")
}
