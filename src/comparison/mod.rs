//! Run-level aggregation over every pairwise result set.
//!
//! A [`Comparison`] walks `Start → DiscoverResultSets → ParseEachSet →
//! ComputeViews → Done`. A result set that cannot be read is skipped and
//! noted in the [`RunSummary`]; the rest of the run carries on.

pub mod views;

pub use views::{ComparisonViews, CoreSet, Correspondence, KindViews};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::config::{Config, PathsConfig, Verbosity};
use crate::core::paths::{list_result_dirs, ResultSetPaths};
use crate::model::GenomeStore;
use crate::parser::{parse_log, parse_paralogs, parse_report};
use crate::{GenomicsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Stage {
    Start,
    DiscoverResultSets,
    ParseEachSet,
    ComputeViews,
    Done,
}

impl Stage {
    pub fn next(self) -> Stage {
        match self {
            Stage::Start => Stage::DiscoverResultSets,
            Stage::DiscoverResultSets => Stage::ParseEachSet,
            Stage::ParseEachSet => Stage::ComputeViews,
            Stage::ComputeViews | Stage::Done => Stage::Done,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkippedSet {
    pub name: String,
    pub reason: String,
}

/// Counters and warnings gathered over one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub sets_discovered: usize,
    pub sets_processed: usize,
    pub sets_skipped: Vec<SkippedSet>,
    /// Report rows and paralog records the parsers could not read
    pub rows_skipped: usize,
    /// Parsed records the store refused
    pub records_dropped: usize,
    pub hits_applied: usize,
    pub paralog_edges: usize,
    /// Reference entities whose mutual-hit count is not `genome_count - 1`
    pub incomplete_mutual_hits: usize,
    pub warnings: Vec<String>,
}

impl RunSummary {
    fn warn(&mut self, verbosity: &Verbosity, warning: String) {
        verbosity.warning(&warning);
        self.warnings.push(warning);
    }
}

#[derive(Debug, Default)]
struct SetOutcome {
    rows_skipped: usize,
    records_dropped: usize,
    hits_applied: usize,
    paralog_edges: usize,
}

pub struct Comparison {
    name: String,
    paths: PathsConfig,
    verbosity: Verbosity,
    store: GenomeStore,
    stage: Stage,
    summary: RunSummary,
}

impl Comparison {
    pub fn new(config: &Config) -> Self {
        Self {
            name: "genome comparison".to_string(),
            paths: config.paths.clone(),
            verbosity: config.verbosity,
            store: GenomeStore::new(config.verbosity),
            stage: Stage::Start,
            summary: RunSummary::default(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn store(&self) -> &GenomeStore {
        &self.store
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    fn advance(&mut self) {
        self.stage = self.stage.next();
        tracing::debug!("{}: entering {:?}", self.name, self.stage);
    }

    /// Run every stage and return the cross-genome views.
    ///
    /// Only a missing or unreadable results directory fails the run.
    pub fn perform_comparison(&mut self) -> Result<ComparisonViews> {
        if self.stage != Stage::Start {
            return Err(GenomicsError::Invariant(format!(
                "{} has already been run (stage {:?})",
                self.name, self.stage
            )));
        }

        self.advance();
        let dirs = self.discover_result_sets()?;

        self.advance();
        self.load_result_sets(&dirs);

        self.advance();
        let views = self.compute_views();

        self.advance();
        self.verbosity.progress(format_args!(
            "{}: {} of {} result sets processed",
            self.name, self.summary.sets_processed, self.summary.sets_discovered
        ));
        Ok(views)
    }

    pub fn discover_result_sets(&mut self) -> Result<Vec<PathBuf>> {
        let root = &self.paths.cgp_results_dir;
        if !root.is_dir() {
            return Err(GenomicsError::MissingInput(root.clone()));
        }
        let dirs = list_result_dirs(root, &self.paths.result_dir_marker)?;
        self.summary.sets_discovered = dirs.len();
        self.verbosity.message(format_args!(
            "{} result sets found under {}",
            dirs.len(),
            root.display()
        ));
        if dirs.is_empty() {
            self.summary.warn(
                &self.verbosity,
                format!("no {}* directories under {}", self.paths.result_dir_marker, root.display()),
            );
        }
        Ok(dirs)
    }

    /// Parse each set in order; a failing set is skipped, never fatal
    pub fn load_result_sets(&mut self, dirs: &[PathBuf]) {
        let pb = if self.verbosity.progress {
            let pb = ProgressBar::new(dirs.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("=>-"));
            }
            pb
        } else {
            ProgressBar::hidden()
        };

        for dir in dirs {
            let paths = ResultSetPaths::new(dir, &self.paths);
            let name = paths.name();
            pb.set_message(name.clone());

            match self.process_result_set(&paths) {
                Ok(outcome) => {
                    self.summary.sets_processed += 1;
                    self.summary.rows_skipped += outcome.rows_skipped;
                    self.summary.records_dropped += outcome.records_dropped;
                    self.summary.hits_applied += outcome.hits_applied;
                    self.summary.paralog_edges += outcome.paralog_edges;
                }
                Err(e) => {
                    self.summary.warn(&self.verbosity, format!("{}: skipped: {}", name, e));
                    self.summary.sets_skipped.push(SkippedSet {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
    }

    fn process_result_set(&mut self, paths: &ResultSetPaths) -> Result<SetOutcome> {
        let name = paths.name();
        let mut outcome = SetOutcome::default();

        let pair = parse_log(&paths.log)?;
        self.store.get_or_create_genome(&pair.genome1, &pair.file1);
        self.store.get_or_create_genome(&pair.genome2, &pair.file2);

        let report = parse_report(&paths.report, &pair, &self.verbosity)?;
        outcome.rows_skipped += report.issues.len();
        for issue in &report.issues {
            self.summary.warnings.push(format!("{}: report {}", name, issue));
        }
        for hit in &report.hits {
            match self.store.add_hit(hit) {
                Ok(()) => outcome.hits_applied += 1,
                Err(e) => {
                    outcome.records_dropped += 1;
                    self.summary.warn(&self.verbosity, format!("{}: report line {}: {}", name, hit.line, e));
                }
            }
        }

        match parse_paralogs(&paths.paralogs, &pair, &self.verbosity) {
            Ok(paralogs) => {
                outcome.rows_skipped += paralogs.issues.len();
                for issue in &paralogs.issues {
                    self.summary.warnings.push(format!("{}: paralogs {}", name, issue));
                }
                for record in &paralogs.records {
                    for header in self.store.ambiguous_headers(record) {
                        self.summary.warn(
                            &self.verbosity,
                            format!(
                                "{}: paralog line {}: {} header {} is on more than one contig of {}; linking the first",
                                name, record.line, record.kind, header, record.genome
                            ),
                        );
                    }
                    match self.store.add_paralog_record(record) {
                        Ok(true) => outcome.paralog_edges += 1,
                        Ok(false) => {}
                        Err(e) => {
                            outcome.records_dropped += 1;
                            self.summary.warn(
                                &self.verbosity,
                                format!("{}: paralog line {}: {}", name, record.line, e),
                            );
                        }
                    }
                }
            }
            Err(e) => self.summary.warn(&self.verbosity, format!("{}: paralogs unreadable: {}", name, e)),
        }

        self.store.check_unique()?;
        self.verbosity.message(format_args!(
            "{}: {} hits applied, {} new paralog edges",
            name, outcome.hits_applied, outcome.paralog_edges
        ));
        Ok(outcome)
    }

    pub fn compute_views(&mut self) -> ComparisonViews {
        self.summary.incomplete_mutual_hits = self.store.check_mutual_best_hits().len();
        let views = ComparisonViews::compute(&self.store);
        self.verbosity.message(format_args!(
            "{} genomes; {} core genes, {} core proteins",
            views.genome_count,
            views.genes.core.len(),
            views.proteins.core.len()
        ));
        views
    }
}

/// Run a whole comparison over `cgp_results_dir`
pub fn compare_directory(root: &Path, verbosity: Verbosity) -> Result<(Comparison, ComparisonViews)> {
    let mut config = Config::default();
    config.paths.cgp_results_dir = root.to_path_buf();
    config.verbosity = verbosity;
    let mut comparison = Comparison::new(&config);
    let views = comparison.perform_comparison()?;
    Ok((comparison, views))
}
