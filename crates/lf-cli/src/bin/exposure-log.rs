//! Categorise and log risky events.

use clap::Parser;

use lf_cli::commands::exposure_log::{Cli, run};

fn main() {
    let cli = Cli::parse();
    lf_cli::init_logging(cli.common.verbose);
    lf_cli::finish(run(cli));
}
