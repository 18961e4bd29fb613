use cgp_genomics::cli::{Cli, Commands};
use cgp_genomics::GenomicsError;
use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // CGP_LOG takes the usual EnvFilter syntax, e.g. CGP_LOG=cgp_genomics=debug
    let log_level = std::env::var("CGP_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<GenomicsError>() {
            Some(GenomicsError::Config(_)) => 2,
            Some(GenomicsError::Io(_)) | Some(GenomicsError::MissingInput(_)) => 3,
            Some(GenomicsError::Parse(_)) | Some(GenomicsError::MalformedRow { .. }) => 4,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Compare(args) => cgp_genomics::cli::commands::compare::run(args, &cli.global),
        Commands::Inspect(args) => cgp_genomics::cli::commands::inspect::run(args, &cli.global),
    }
}
