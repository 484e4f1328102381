//! Track a project's cast and flag character names readers could confuse.

use clap::Parser;

use lf_cli::commands::cast_tracker::{Cli, run};

fn main() {
    let cli = Cli::parse();
    lf_cli::init_logging(cli.common.verbose);
    lf_cli::finish(run(cli));
}
