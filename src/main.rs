//! Tidysic CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use tidysic::cli::{Cli, run};
use tidysic::core::logging::{self, LOG_TARGET};
use tidysic::core::services::structure::DEFAULT_STRUCTURE;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.dump_config {
        print!("{}", DEFAULT_STRUCTURE);
        return ExitCode::SUCCESS;
    }

    logging::init_logging(cli.verbose);

    match run(&cli) {
        Ok(report) if report.failed == 0 => {
            info!(
                target: LOG_TARGET,
                "Done, {} files organized", report.planned
            );
            ExitCode::SUCCESS
        }
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            error!(target: LOG_TARGET, "{}", err.message());
            ExitCode::FAILURE
        }
    }
}
