//! Generate character names from culture lists, mixed pools, or phoneme presets.

use clap::Parser;

use lf_cli::commands::character_name::{Cli, run};

fn main() {
    let cli = Cli::parse();
    lf_cli::init_logging(cli.common.verbose);
    lf_cli::finish(run(cli));
}
