//! Draft a fate-shift proposal for review.

use clap::Parser;

use lf_cli::commands::propose_shift::{Cli, run};

fn main() {
    let cli = Cli::parse();
    lf_cli::init_logging(cli.common.verbose);
    lf_cli::finish(run(cli));
}
