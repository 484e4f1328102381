use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use lf_taste::audit::{MAX_SCORE, PASS_THRESHOLD};
use lf_taste::{AuditResult, FuzzyTermMatcher, Rubric, audit};

use super::{CommonArgs, print_json};

/// Arguments for `taste-audit`.
#[derive(Debug, Parser)]
#[command(
    name = "taste-audit",
    about = "Score prose against the taste dimensions rubric",
    version
)]
pub struct Cli {
    /// Text file to audit
    pub file: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Scores only, without matches or recommendations
    #[arg(long)]
    pub scores_only: bool,

    /// Rubric file (default: taste/dimensions.json in the data directory)
    #[arg(long, value_name = "FILE")]
    pub dimensions: Option<PathBuf>,

    /// Shared flags
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run `taste-audit`. Fails when the content scores below the pass mark.
pub fn run(cli: Cli) -> Result<(), String> {
    let rubric = match &cli.dimensions {
        Some(path) => Rubric::load(path),
        None => Rubric::from_data_dir(&cli.common.data()),
    }
    .map_err(|e| format!("could not load dimensions: {e}"))?;

    let text = fs::read_to_string(&cli.file)
        .map_err(|e| format!("failed to read {}: {e}", cli.file.display()))?;
    let result = audit(
        &text,
        Some(cli.file.display().to_string()),
        &rubric,
        &FuzzyTermMatcher,
    );

    if cli.json {
        print_json(&result)?;
    } else {
        println!("{}", render(&result, cli.scores_only));
    }

    if result.passed() {
        Ok(())
    } else {
        Err(format!(
            "overall score {:.1} is below {PASS_THRESHOLD:.1}",
            result.overall_score
        ))
    }
}

fn bar(filled: usize, full: char, empty: char) -> String {
    let filled = filled.min(usize::from(MAX_SCORE));
    let mut out: String = std::iter::repeat_n(full, filled).collect();
    out.extend(std::iter::repeat_n(empty, usize::from(MAX_SCORE) - filled));
    out
}

fn render(result: &AuditResult, scores_only: bool) -> String {
    let rule = "-".repeat(50);
    let mut lines = vec![
        match &result.file {
            Some(file) => format!("Taste Audit: {file}"),
            None => "Taste Audit".to_string(),
        },
        "=".repeat(50),
        String::new(),
    ];

    let rounded = result.overall_score.round().max(0.0) as usize;
    let overall = format!("{:.1}/5.0", result.overall_score);
    let overall = if result.passed() {
        overall.green().bold()
    } else {
        overall.red().bold()
    };
    lines.push(format!("Overall Score: {overall} [{}]", bar(rounded, '█', '░')));
    lines.push(format!("Interpretation: {}", result.interpretation));
    lines.push(String::new());
    lines.push("Dimension Scores:".to_string());
    lines.push(rule.clone());

    for dim in &result.dimensions {
        if !dim.is_present() {
            lines.push(format!("  {}: - (not present)", dim.name));
            continue;
        }
        lines.push(format!(
            "  {}: {}/5 [{}] {}",
            dim.name,
            dim.score,
            bar(usize::from(dim.score), '●', '○'),
            dim.confidence.marker()
        ));
        if scores_only {
            continue;
        }
        if !dim.positive_matches.is_empty() {
            let shown: Vec<&str> = dim.positive_matches.iter().take(2).map(String::as_str).collect();
            lines.push(format!("    + {}", shown.join(", ")));
        }
        if !dim.negative_matches.is_empty() {
            let shown: Vec<&str> = dim.negative_matches.iter().take(2).map(String::as_str).collect();
            lines.push(format!("    {} {}", "!".yellow(), shown.join(", ")));
        }
    }

    if !scores_only && !result.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("Recommendations:".to_string());
        lines.push(rule);
        lines.extend(result.recommendations.iter().cloned());
    }
    lines.join("\n")
}
