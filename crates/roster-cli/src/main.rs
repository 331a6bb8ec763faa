//! Roster export normalizer CLI.

use std::io::{self, IsTerminal};

use clap::Parser;

use roster_cli::cli::{Cli, Command};
use roster_cli::commands::{CommandOutput, run_inspect, run_read, run_schemas};
use roster_cli::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config(io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Read(args) => run_read(args),
        Command::Schemas => run_schemas(),
        Command::Inspect(args) => run_inspect(args),
    };
    let exit_code = match result {
        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code,
        }) => {
            if !stdout.is_empty() {
                println!("{stdout}");
            }
            if let Some(message) = stderr {
                eprintln!("{message}");
            }
            exit_code
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
