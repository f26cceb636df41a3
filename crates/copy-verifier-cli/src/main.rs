mod commands;
mod logging;
mod report;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, VerifyArgs};
use copy_verifier_core::config::load_configuration;
use copy_verifier_core::AuditEngine;
use dotenv::dotenv;
use report::CliReporter;

fn main() -> ExitCode {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let outcome = match args.command {
        Some(Commands::Verify(verify)) => run_verify(args.config.as_deref(), &verify),
        Some(Commands::PrintConfig) => print_config(args.config.as_deref()),
        None => {
            let _ = Cli::command().print_long_help();
            Ok(ExitCode::SUCCESS)
        }
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(2)
        }
    }
}

fn run_verify(config_path: Option<&Path>, args: &VerifyArgs) -> anyhow::Result<ExitCode> {
    let mut config = load_configuration(config_path).context("Error loading configuration")?;
    args.apply_to(&mut config);

    if config.sources.is_empty() {
        bail!("at least one source directory is required (--source)");
    }
    if config.destinations.is_empty() {
        bail!("at least one destination directory is required (--dest)");
    }

    let options = config.index_options()?;
    let engine = AuditEngine::new(options).with_parallelism(config.parallel);
    let result = engine.audit(&config.sources, &config.destinations, &CliReporter);

    report::print_result(&result);
    Ok(ExitCode::from(report::exit_code(&result, args.strict)))
}

fn print_config(config_path: Option<&Path>) -> anyhow::Result<ExitCode> {
    let config = load_configuration(config_path).context("Error loading configuration")?;
    println!("Configuration: {:?}", config);
    Ok(ExitCode::SUCCESS)
}
