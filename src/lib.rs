pub mod cli;
pub mod comparison;
pub mod core;
pub mod model;
pub mod parser;
pub mod report;

pub use crate::comparison::{Comparison, ComparisonViews, RunSummary, Stage};
pub use crate::core::config::{Config, Verbosity};
pub use crate::model::{Entity, EntityKind, Genome, GenomeStore, ParalogSet};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenomicsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing input: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Unknown genome: {0}")]
    UnknownGenome(String),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GenomicsError {
    fn from(err: serde_json::Error) -> Self {
        GenomicsError::Serialization(err.to_string())
    }
}

impl From<std::fmt::Error> for GenomicsError {
    fn from(err: std::fmt::Error) -> Self {
        GenomicsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GenomicsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let io_error = GenomicsError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        assert!(format!("{}", io_error).contains("IO error"));

        let missing = GenomicsError::MissingInput(PathBuf::from("/tmp/Results_A_B/x.log"));
        assert_eq!(format!("{}", missing), "Missing input: /tmp/Results_A_B/x.log");

        let row = GenomicsError::MalformedRow { line: 7, reason: "bad tag".to_string() };
        assert_eq!(format!("{}", row), "Malformed row at line 7: bad tag");
    }
}
