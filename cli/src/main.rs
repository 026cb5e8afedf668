//! Training log CLI.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod logging;

use crate::cli::Cli;
use crate::commands::{report_error, run};
use crate::config::Config;
use crate::logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }

    let result = match Config::resolve(cli.data_dir) {
        Ok(config) => run(cli.command, &config).await,
        Err(error) => Err(error),
    };

    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}
