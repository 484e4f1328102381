use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde_json::json;

use lf_core::{LfError, time};
use lf_naming::cast::DEFAULT_CAST_FILE;
use lf_naming::{
    CastFile, CollisionReport, NewCharacter, Severity, check_collision, init_cast, load_cast,
    save_cast,
};

use super::{CommonArgs, print_json};

/// Arguments for `cast-tracker`.
#[derive(Debug, Parser)]
#[command(
    name = "cast-tracker",
    about = "Track a project's cast and flag character names readers could confuse",
    version
)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Cast file
    #[arg(short, long, global = true, default_value = DEFAULT_CAST_FILE)]
    pub file: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Shared flags
    #[command(flatten)]
    pub common: CommonArgs,
}

/// `cast-tracker` subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new cast file
    Init {
        /// Project name
        project: String,
    },

    /// Add a character after checking for collisions
    Add {
        /// Full character name
        name: String,

        /// Role in the story
        #[arg(long)]
        role: Option<String>,

        /// Cultural background
        #[arg(long)]
        culture: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Add even when the collision risk is high
        #[arg(long)]
        force: bool,
    },

    /// Check a name against the cast without adding it
    Check {
        /// Name to check
        name: String,
    },

    /// List the cast
    List,

    /// Show cultural and first-initial distribution
    Distribution,

    /// Suggest initials and cultures for the next character
    Suggest,
}

/// Run `cast-tracker`.
pub fn run(cli: Cli) -> Result<(), String> {
    let path = cli.file.as_path();
    match cli.command {
        Command::Init { project } => init(path, &project),
        Command::Add {
            name,
            role,
            culture,
            notes,
            force,
        } => {
            let mut new = NewCharacter::named(name);
            new.role = role;
            new.culture = culture;
            new.notes = notes;
            add(path, new, force, cli.json)
        }
        Command::Check { name } => check(path, &name, cli.json),
        Command::List => list(path, cli.json),
        Command::Distribution => distribution(path, cli.json),
        Command::Suggest => suggest(path, cli.json),
    }
}

fn open(path: &Path) -> Result<CastFile, String> {
    load_cast(path).map_err(|e| match e {
        LfError::NotFound(_) => format!("{e}; run `cast-tracker init \"Project Name\"` first"),
        other => other.to_string(),
    })
}

fn init(path: &Path, project: &str) -> Result<(), String> {
    init_cast(path, project, &time::today()).map_err(|e| match e {
        LfError::AlreadyExists(_) => {
            format!("{e}; delete it first or use a different path with --file")
        }
        other => other.to_string(),
    })?;
    println!("Created cast tracker for \"{project}\" at {}", path.display());
    Ok(())
}

fn print_issues(report: &CollisionReport, to_stderr: bool) {
    let mut lines: Vec<String> = report.issues.iter().map(|i| format!("  - {i}")).collect();
    lines.push(format!("  Similar to: {}", report.similar_to.join(", ")));
    for line in lines {
        if to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

fn add(path: &Path, new: NewCharacter, force: bool, json: bool) -> Result<(), String> {
    let mut cast = open(path)?;
    let report = check_collision(&new.name, &cast.characters);

    if let Err(refused) = report.admit(&new.name, force) {
        eprintln!(
            "{}",
            "High collision risk with existing characters:".red().bold()
        );
        print_issues(&report, true);
        return Err(refused.to_string());
    }

    match report.severity {
        Severity::None => {}
        severity => {
            if !json {
                let heading = if severity == Severity::High {
                    "High collision risk (forced):".red().bold()
                } else {
                    "Warning: Potential collision with existing characters:".yellow()
                };
                println!("{heading}");
                print_issues(&report, false);
                println!();
            }
            tracing::warn!(name = %new.name, %severity, "adding despite collision");
        }
    }

    let today = time::today();
    let added = cast.add(new, &today).clone();
    save_cast(path, &mut cast, &today).map_err(|e| e.to_string())?;

    if json {
        return print_json(&json!({ "character": added, "collision": report }));
    }
    println!("Added \"{}\" to cast", added.name.green());
    if let Some(role) = &added.role {
        println!("  Role: {role}");
    }
    if let Some(culture) = &added.culture {
        println!("  Culture: {culture}");
    }
    Ok(())
}

fn check(path: &Path, name: &str, json: bool) -> Result<(), String> {
    let cast = open(path)?;
    let report = check_collision(name, &cast.characters);
    if json {
        return print_json(&report);
    }
    match report.severity {
        Severity::None => println!("\"{name}\" has no collisions with existing cast."),
        Severity::Warning => {
            println!(
                "\"{name}\" has potential collisions ({}):",
                "warning".yellow()
            );
            print_issues(&report, false);
        }
        Severity::High => {
            println!("\"{name}\" has {} collision risk:", "HIGH".red().bold());
            print_issues(&report, false);
        }
    }
    Ok(())
}

fn list(path: &Path, json: bool) -> Result<(), String> {
    let cast = open(path)?;
    if json {
        return print_json(&cast.characters);
    }

    println!("Cast for \"{}\"", cast.meta.project.bold());
    println!();
    if cast.characters.is_empty() {
        println!("(no characters yet)");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Role", "Culture", "Added"]);
    for c in &cast.characters {
        table.add_row(vec![
            c.name.as_str(),
            c.role.as_deref().unwrap_or("-"),
            c.culture.as_deref().unwrap_or("-"),
            c.added_at.as_str(),
        ]);
    }
    println!("{table}");
    println!();
    println!("  {} characters", cast.characters.len());
    Ok(())
}

fn distribution(path: &Path, json: bool) -> Result<(), String> {
    let cast = open(path)?;
    let shares = cast.culture_shares();
    let initials = cast.initial_usage();

    if json {
        let initials: Vec<_> = initials
            .iter()
            .map(|(initial, count)| json!({ "initial": initial, "count": count }))
            .collect();
        return print_json(&json!({
            "project": cast.meta.project,
            "total": cast.characters.len(),
            "culturalDistribution": shares,
            "initialUsage": initials,
        }));
    }

    println!("Cast Distribution for \"{}\"", cast.meta.project);
    println!("Total characters: {}", cast.characters.len());
    println!();
    if shares.is_empty() {
        println!("Cultural distribution: (no cultures recorded)");
        println!("Use --culture when adding characters to track distribution.");
    } else {
        println!("Cultural distribution:");
        for share in &shares {
            println!("  {}: {} ({:.1}%)", share.culture, share.count, share.percent);
        }
    }

    println!();
    println!("First initial usage:");
    for (initial, count) in &initials {
        if *count > 1 {
            println!(
                "  {initial}: {count} characters {}",
                "(collision risk)".yellow()
            );
        } else {
            println!("  {initial}: {count} character");
        }
    }
    Ok(())
}

fn suggest(path: &Path, json: bool) -> Result<(), String> {
    let cast = open(path)?;
    let suggestions = cast.suggestions();
    if json {
        return print_json(&suggestions);
    }

    println!("Suggestions for avoiding collision:");
    println!();
    if !suggestions.avoid_initials.is_empty() {
        println!(
            "Avoid first initials: {}",
            suggestions.avoid_initials.join(", ")
        );
    }
    println!(
        "Available first initials: {}",
        suggestions.available_initials.join(", ")
    );
    if !suggestions.underrepresented_cultures.is_empty() {
        println!();
        println!(
            "Consider adding more: {}",
            suggestions.underrepresented_cultures.join(", ")
        );
    }
    Ok(())
}
