//! Calculate an entity's fate pressure.

use clap::Parser;

use lf_cli::commands::fate_pressure::{Cli, run};

fn main() {
    let cli = Cli::parse();
    lf_cli::init_logging(cli.common.verbose);
    lf_cli::finish(run(cli));
}
