use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::core::paths;

pub const ENV_PROGRESS: &str = "PHATE_PHATE_PROGRESS";
pub const ENV_MESSAGES: &str = "PHATE_PHATE_MESSAGES";
pub const ENV_WARNINGS: &str = "PHATE_PHATE_WARNINGS";
pub const ENV_CGP_RESULTS_DIR: &str = "PHATE_CGP_RESULTS_DIR";
pub const ENV_GENOMICS_RESULTS_DIR: &str = "PHATE_GENOMICS_RESULTS_DIR";

/// Verbosity switches handed to every component at construction.
///
/// `progress` and `messages` go out as `info!` events, `warnings` as `warn!`.
/// A disabled switch drops the event before it reaches the subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verbosity {
    #[serde(default)]
    pub progress: bool,
    #[serde(default)]
    pub messages: bool,
    #[serde(default)]
    pub warnings: bool,
}

impl Verbosity {
    pub fn all() -> Self {
        Self {
            progress: true,
            messages: true,
            warnings: true,
        }
    }

    pub fn quiet() -> Self {
        Self::default()
    }

    /// Read the three PHATE flags; only a case-insensitive "true" turns one on
    pub fn from_env() -> Self {
        Self {
            progress: env_flag(ENV_PROGRESS),
            messages: env_flag(ENV_MESSAGES),
            warnings: env_flag(ENV_WARNINGS),
        }
    }

    /// Switch on any flag requested on the command line
    pub fn with_overrides(self, progress: bool, messages: bool, warnings: bool) -> Self {
        Self {
            progress: self.progress || progress,
            messages: self.messages || messages,
            warnings: self.warnings || warnings,
        }
    }

    pub fn progress(&self, msg: impl Display) {
        if self.progress {
            tracing::info!("{}", msg);
        }
    }

    pub fn message(&self, msg: impl Display) {
        if self.messages {
            tracing::info!("{}", msg);
        }
    }

    pub fn warning(&self, msg: impl Display) {
        if self.warnings {
            tracing::warn!("{}", msg);
        }
    }
}

pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub verbosity: Verbosity,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the `Results_*` directories of the pairwise runs
    #[serde(default = "default_cgp_results_dir")]
    pub cgp_results_dir: PathBuf,
    /// Where the correspondence reports are written
    #[serde(default = "default_genomics_results_dir")]
    pub genomics_results_dir: PathBuf,
    #[serde(default = "default_result_dir_marker")]
    pub result_dir_marker: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_report_file")]
    pub report_file: String,
    #[serde(default = "default_paralog_file")]
    pub paralog_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub write_text: bool,
    #[serde(default = "default_true")]
    pub write_json: bool,
}

fn default_cgp_results_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_genomics_results_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_GENOMICS_RESULTS_DIR)
}

fn default_result_dir_marker() -> String {
    paths::RESULT_DIR_MARKER.to_string()
}

fn default_log_file() -> String {
    paths::CGP_LOG_FILE.to_string()
}

fn default_report_file() -> String {
    paths::CGP_REPORT_FILE.to_string()
}

fn default_paralog_file() -> String {
    paths::CGP_PARALOG_FILE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            cgp_results_dir: default_cgp_results_dir(),
            genomics_results_dir: default_genomics_results_dir(),
            result_dir_marker: default_result_dir_marker(),
            log_file: default_log_file(),
            report_file: default_report_file(),
            paralog_file: default_paralog_file(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_text: true,
            write_json: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            paths: PathsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Defaults overlaid with whatever the hosting environment sets
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Environment wins over file values: directories replace, verbosity flags only switch on
    pub fn apply_env(&mut self) {
        let env = Verbosity::from_env();
        self.verbosity = self
            .verbosity
            .with_overrides(env.progress, env.messages, env.warnings);

        if let Ok(dir) = std::env::var(ENV_CGP_RESULTS_DIR) {
            if !dir.is_empty() {
                self.paths.cgp_results_dir = PathBuf::from(dir);
            }
        }
        if let Ok(dir) = std::env::var(ENV_GENOMICS_RESULTS_DIR) {
            if !dir.is_empty() {
                self.paths.genomics_results_dir = PathBuf::from(dir);
            }
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::GenomicsError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::GenomicsError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::GenomicsError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::GenomicsError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
