use apicase::{
    Result,
    cli::{Cli, Commands},
    commands::{self, CaseOptions, ExportOptions, HarOptions},
    telemetry,
};
use clap::Parser;
use colored::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Case {
            to,
            dir,
            name,
            ex,
            output,
        } => {
            commands::execute_case(&CaseOptions {
                target: to,
                dir,
                name,
                extension: ex,
                output,
            })?;
        }
        Commands::Har { to, file, output } => {
            commands::execute_har(&HarOptions {
                target: to,
                file,
                output,
            })?;
        }
        Commands::Export { to, file, output } => {
            commands::execute_export(&ExportOptions {
                target: to,
                file,
                output,
            })?;
        }
    }

    Ok(())
}
