use std::path::PathBuf;

use clap::Parser;
use colored::{ColoredString, Colorize};

use lf_core::time;
use lf_fates::exposure::load_exposure_log;
use lf_fates::pressure::{synthetic_protections, synthetic_vulnerabilities};
use lf_fates::{
    ExposureLogEntry, FatePressureInput, FatePressureReport, FateState, KeywordHeuristic,
    calculate_pressure,
};

use super::{CommonArgs, print_json};

/// Arguments for `fate-pressure`.
#[derive(Debug, Parser)]
#[command(
    name = "fate-pressure",
    about = "Calculate how due an entity is for a fate-shift",
    version
)]
pub struct Cli {
    /// Power level, 1-10
    #[arg(long, default_value_t = 5)]
    pub power: u32,

    /// Years in the current position
    #[arg(long, default_value_t = 5.0)]
    pub tenure: f64,

    /// Number of unnamed vulnerabilities (weight 1 each)
    #[arg(long, default_value_t = 0)]
    pub vulns: usize,

    /// Number of unnamed protections (weight 0.5 each)
    #[arg(long, default_value_t = 0)]
    pub prots: usize,

    /// A vulnerability described in words; repeatable
    #[arg(long = "vulnerability", value_name = "TEXT")]
    pub vulnerabilities: Vec<String>,

    /// A protection described in words; repeatable
    #[arg(long = "protection", value_name = "TEXT")]
    pub protections: Vec<String>,

    /// Fortune buffer, 0-5
    #[arg(long, default_value_t = 3.0)]
    pub fortune: f64,

    /// Accumulated exposure, 0-1
    #[arg(long, default_value_t = 0.0)]
    pub exposure: f64,

    /// JSON exposure log to add up
    #[arg(long, value_name = "FILE")]
    pub exposure_log: Option<PathBuf>,

    /// Entity name for the heading
    #[arg(long)]
    pub name: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Shared flags
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run `fate-pressure`.
pub fn run(cli: Cli) -> Result<(), String> {
    let mut exposure_log: Vec<ExposureLogEntry> = match &cli.exposure_log {
        Some(path) => load_exposure_log(path).map_err(|e| e.to_string())?,
        None => Vec::new(),
    };
    let exposure = cli.exposure.clamp(0.0, 1.0);
    if exposure > 0.0 {
        exposure_log.push(ExposureLogEntry {
            date: time::today(),
            event: "Accumulated exposure".to_string(),
            pressure: exposure,
        });
    }

    let mut vulnerabilities = cli.vulnerabilities;
    vulnerabilities.extend(synthetic_vulnerabilities(cli.vulns));
    let mut protections = cli.protections;
    protections.extend(synthetic_protections(cli.prots));

    let input = FatePressureInput {
        power_level: cli.power,
        tenure_years: cli.tenure,
        vulnerabilities,
        protections,
        fortune_buffer: cli.fortune,
        exposure_log,
    };
    let report = calculate_pressure(&input, &KeywordHeuristic::default());

    if cli.json {
        let mut value = serde_json::to_value(&report).map_err(|e| e.to_string())?;
        if let (Some(name), Some(map)) = (&cli.name, value.as_object_mut()) {
            map.insert("name".into(), name.clone().into());
        }
        return print_json(&value);
    }
    println!("{}", render(&report, cli.name.as_deref()));
    Ok(())
}

fn state_colour(state: FateState, text: String) -> ColoredString {
    match state {
        FateState::F1 | FateState::F2 => text.green(),
        FateState::F3 => text.yellow(),
        FateState::F4 | FateState::F5 => text.red().bold(),
    }
}

fn render(report: &FatePressureReport, name: Option<&str>) -> String {
    let c = &report.components;
    let rule = "-".repeat(50);
    let mut lines = vec![
        match name {
            Some(name) => format!("FATE PRESSURE: {name}"),
            None => "FATE PRESSURE".to_string(),
        },
        "=".repeat(50),
        String::new(),
        format!(
            "Current State: {}",
            state_colour(
                report.state,
                format!("{} - {}", report.state, report.state_description)
            )
        ),
        format!("Fate Pressure: {:.1}%", report.fate_pressure * 100.0),
        String::new(),
        "COMPONENT BREAKDOWN".to_string(),
        rule.clone(),
        format!("  Power Level:         {}/10", c.power_level),
        format!("  Tenure Modifier:     {}x", c.tenure_modifier),
        format!("  Vulnerability Score: {:.1}/10", c.vulnerability_score),
        format!("  Protection Factor:   {:.1}/10", c.protection_factor),
        format!("  Fortune Buffer:      {}/5", c.fortune_buffer),
        format!("  Risk Exposure:       +{:.1}%", c.risk_exposure * 100.0),
        String::new(),
        "INTERPRETATION".to_string(),
        rule.clone(),
        format!("  {}", report.interpretation),
        String::new(),
        "RECOMMENDATIONS".to_string(),
        rule,
    ];
    lines.extend(report.recommendations.iter().map(|r| format!("  - {r}")));
    lines.join("\n")
}
