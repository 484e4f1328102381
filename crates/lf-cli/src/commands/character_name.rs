use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use lf_naming::generate::DEFAULT_COUNT;
use lf_naming::{
    Character, Gender, NameLibrary, NameRequest, NameSource, SyllableRange, generate_names,
    load_cast,
};

use super::{CommonArgs, print_json, seeded};

/// Arguments for `character-name`.
#[derive(Debug, Parser)]
#[command(
    name = "character-name",
    about = "Generate character names from culture lists, mixed pools, or phoneme presets",
    version,
    group(ArgGroup::new("source").args(["fantasy", "pool", "culture"]))
)]
pub struct Cli {
    /// Invent names from a phoneme preset
    #[arg(long, value_name = "PRESET")]
    pub fantasy: Option<String>,

    /// Draw from a mixed pool
    #[arg(long, value_name = "POOL")]
    pub pool: Option<String>,

    /// Draw from a culture's name lists
    #[arg(long, value_name = "CULTURE")]
    pub culture: Option<String>,

    /// Given names of a gender (f or m) instead of surnames
    #[arg(long, requires = "culture")]
    pub gender: Option<Gender>,

    /// Pair given names with surnames
    #[arg(long, requires = "culture")]
    pub full_name: bool,

    /// Syllables per fantasy name, as MIN-MAX
    #[arg(long, default_value_t = SyllableRange::default(), requires = "fantasy")]
    pub syllables: SyllableRange,

    /// Number of names
    #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Flag names that collide with this cast file
    #[arg(long, value_name = "FILE")]
    pub cast: Option<PathBuf>,

    /// List available cultures, pools, and presets
    #[arg(long)]
    pub list: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Shared flags
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run `character-name`.
pub fn run(cli: Cli) -> Result<(), String> {
    let library = NameLibrary::new(cli.common.data());
    if cli.list {
        return list(&library, cli.json);
    }

    let source = if let Some(preset) = cli.fantasy {
        NameSource::Fantasy {
            preset,
            syllables: cli.syllables,
        }
    } else if let Some(pool) = cli.pool {
        NameSource::Pool(pool)
    } else if let Some(culture) = cli.culture {
        NameSource::Culture {
            culture,
            gender: cli.gender,
            full_name: cli.full_name,
        }
    } else {
        return Err("specify --culture, --pool, or --fantasy (see --help)".into());
    };

    let cast: Option<Vec<Character>> = cli.cast.as_deref().and_then(|path| {
        load_cast(path)
            .map_err(|e| tracing::warn!(path = %path.display(), error = %e, "could not load cast file"))
            .ok()
            .map(|cast| cast.characters)
    });

    let (seed, mut rng) = seeded(cli.seed);
    let request = NameRequest::new(source).with_count(cli.count);
    let names = generate_names(&library, &request, cast.as_deref(), &mut rng)
        .map_err(|e| format!("{e}; use --list to see what is available"))?;
    tracing::info!(seed, count = names.len(), "names ready");

    if cli.json {
        return print_json(&names);
    }
    for item in &names {
        match &item.collision_with {
            Some(other) => println!(
                "- {} {}",
                item.name,
                format!("[COLLISION with {other}]").red()
            ),
            None => println!("- {}", item.name),
        }
    }
    Ok(())
}

fn list(library: &NameLibrary, json: bool) -> Result<(), String> {
    let cultures = library.cultures();
    let pools = library.pools();
    let presets = library.presets();
    if json {
        return print_json(&serde_json::json!({
            "cultures": cultures,
            "pools": pools,
            "presets": presets,
        }));
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Name", "Flag"]);
    let groups = [
        ("culture", "--culture", &cultures),
        ("pool", "--pool", &pools),
        ("preset", "--fantasy", &presets),
    ];
    for (kind, flag, names) in groups {
        if names.is_empty() {
            table.add_row(vec![kind, "(none yet)", flag]);
        }
        for name in names {
            table.add_row(vec![kind, name.as_str(), flag]);
        }
    }
    println!("{table}");
    Ok(())
}
