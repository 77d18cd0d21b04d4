use clap::Parser;
use core16::cli::{Cli, run};
use core16::logging::init_logging;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
