//! Offer a dramatic fate choice to an entity under pressure.

use clap::Parser;

use lf_cli::commands::fate_choice::{Cli, run};

fn main() {
    let cli = Cli::parse();
    lf_cli::init_logging(cli.common.verbose);
    lf_cli::finish(run(cli));
}
