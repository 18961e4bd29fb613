use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::PathsConfig;
use crate::Result;

/// Lists genome fasta and annotation files of one pairwise run
pub const CGP_LOG_FILE: &str = "compareGeneProfiles_main.log";
/// Tab-delimited gene-gene listing
pub const CGP_REPORT_FILE: &str = "compareGeneProfiles_main.report";
/// Paralogs detected within each genome, block-structured text
pub const CGP_PARALOG_FILE: &str = "compareGeneProfiles_main.paralogs";

pub const RESULT_DIR_MARKER: &str = "Results_";
pub const DEFAULT_GENOMICS_RESULTS_DIR: &str = "Genomics";

/// File locations inside one `Results_*` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSetPaths {
    pub dir: PathBuf,
    pub log: PathBuf,
    pub report: PathBuf,
    pub paralogs: PathBuf,
}

impl ResultSetPaths {
    pub fn new(dir: &Path, config: &PathsConfig) -> Self {
        Self {
            dir: dir.to_path_buf(),
            log: dir.join(&config.log_file),
            report: dir.join(&config.report_file),
            paralogs: dir.join(&config.paralog_file),
        }
    }

    /// Directory name, used to label the set in logs and summaries
    pub fn name(&self) -> String {
        self.dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.dir.display().to_string())
    }
}

/// Result-set directories under `root` whose name contains `marker`, sorted by name
pub fn list_result_dirs(root: &Path, marker: &str) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().contains(marker) {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_result_set_paths() {
        let paths = ResultSetPaths::new(Path::new("/cgp/Results_A_B"), &PathsConfig::default());
        assert_eq!(paths.log, PathBuf::from("/cgp/Results_A_B/compareGeneProfiles_main.log"));
        assert_eq!(paths.report, PathBuf::from("/cgp/Results_A_B/compareGeneProfiles_main.report"));
        assert_eq!(paths.name(), "Results_A_B");
    }

    #[test]
    fn test_list_result_dirs_filters_and_sorts() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("Results_A_C")).unwrap();
        fs::create_dir(root.path().join("Results_A_B")).unwrap();
        fs::create_dir(root.path().join("scratch")).unwrap();
        fs::write(root.path().join("Results_notes.txt"), "not a directory").unwrap();

        let dirs = list_result_dirs(root.path(), RESULT_DIR_MARKER).unwrap();
        let names: Vec<_> = dirs
            .iter()
            .map(|d| d.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Results_A_B", "Results_A_C"]);
    }
}
