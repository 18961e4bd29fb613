use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::comparison::{ComparisonViews, RunSummary};
use crate::core::config::OutputConfig;
use crate::model::GenomeStore;
use crate::Result;

pub mod json;
pub mod text;

pub const MUTUAL_BEST_HITS_FILE: &str = "mutual_best_hits.txt";
pub const SINGULAR_BEST_HITS_FILE: &str = "singular_best_hits.txt";
pub const LONERS_FILE: &str = "loners.txt";
pub const CORE_GENOME_FILE: &str = "core_genome.txt";
pub const CORRESPONDENCES_FILE: &str = "correspondences.txt";
pub const PARALOG_SETS_FILE: &str = "paralog_sets.txt";
pub const SUMMARY_FILE: &str = "comparison_summary.json";

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: Format,
    pub include_paralogs: bool,
    pub pretty: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: Format::Text,
            include_paralogs: true,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

pub struct ReportGenerator {
    options: ReportOptions,
}

impl ReportGenerator {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn generate(&self, store: &GenomeStore, views: &ComparisonViews, summary: &RunSummary) -> Result<String> {
        match self.options.format {
            Format::Text => text::generate_text_report(store, views, summary, &self.options),
            Format::Json => json::generate_json_report(store, views, summary, &self.options),
        }
    }
}

/// Write each listing to its own file under `dir`, creating it if missing.
///
/// Returns the paths written, listings first and the JSON summary last.
pub fn write_reports(
    dir: &Path,
    store: &GenomeStore,
    views: &ComparisonViews,
    summary: &RunSummary,
    output: &OutputConfig,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    if output.write_text {
        let listings: [(&str, &str); 6] = [
            (MUTUAL_BEST_HITS_FILE, "Mutual Best Hits"),
            (SINGULAR_BEST_HITS_FILE, "Singular Best Hits"),
            (LONERS_FILE, "Loners"),
            (CORE_GENOME_FILE, "Core Genome"),
            (CORRESPONDENCES_FILE, "Correspondences"),
            (PARALOG_SETS_FILE, "Paralog Sets"),
        ];
        for (file, title) in listings {
            let mut contents = String::new();
            text::write_header(&mut contents, title, store)?;
            match file {
                MUTUAL_BEST_HITS_FILE => text::write_mutual_best_hits(&mut contents, store)?,
                SINGULAR_BEST_HITS_FILE => text::write_singular_best_hits(&mut contents, store)?,
                LONERS_FILE => text::write_loners(&mut contents, store, views)?,
                CORE_GENOME_FILE => text::write_core_genome(&mut contents, views)?,
                CORRESPONDENCES_FILE => text::write_correspondences(&mut contents, views)?,
                _ => text::write_paralog_sets(&mut contents, views)?,
            }
            let path = dir.join(file);
            fs::write(&path, contents)?;
            written.push(path);
        }
    }

    if output.write_json {
        let options = ReportOptions {
            format: Format::Json,
            ..Default::default()
        };
        let path = dir.join(SUMMARY_FILE);
        fs::write(&path, json::generate_json_report(store, views, summary, &options)?)?;
        written.push(path);
    }

    tracing::debug!("{} report files written to {}", written.len(), dir.display());
    Ok(written)
}
