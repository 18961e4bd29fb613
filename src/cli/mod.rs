pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::{load_config, Config};

#[derive(Parser)]
#[command(
    name = "cgp-genomics",
    version,
    about = "Cross-genome correspondence tables from pairwise CompareGeneProfiles results",
    long_about = "Reads every Results_* directory written by pairwise CompareGeneProfiles runs, \
                  merges their mutual, singular and loner best hits and paralogs into one genome \
                  model, and reports core-genome and correspondence listings for the reference genome."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true, env = "CGP_GENOMICS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report progress through the run (also PHATE_PHATE_PROGRESS=true)
    #[arg(long, global = true)]
    pub progress: bool,

    /// Report informational messages (also PHATE_PHATE_MESSAGES=true)
    #[arg(long, global = true)]
    pub messages: bool,

    /// Report skipped rows and dropped records (also PHATE_PHATE_WARNINGS=true)
    #[arg(long, global = true)]
    pub warnings: bool,
}

impl GlobalArgs {
    /// Config file, then environment, then command-line flags
    pub fn resolve_config(&self) -> crate::Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };
        config.apply_env();
        config.verbosity = config
            .verbosity
            .with_overrides(self.progress, self.messages, self.warnings);
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare all result sets and write the correspondence listings
    Compare(commands::compare::CompareArgs),

    /// Load all result sets and print the full genome model
    Inspect(commands::inspect::InspectArgs),
}
