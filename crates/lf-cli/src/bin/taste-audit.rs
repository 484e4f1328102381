//! Score content against the taste rubric.

use clap::Parser;

use lf_cli::commands::taste_audit::{Cli, run};

fn main() {
    let cli = Cli::parse();
    lf_cli::init_logging(cli.common.verbose);
    lf_cli::finish(run(cli));
}
