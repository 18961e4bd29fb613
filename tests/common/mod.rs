//! Result-set fixtures for integration tests.
//!
//! Builds `Results_*` directories laid out the way pairwise
//! CompareGeneProfiles runs leave them.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use cgp_genomics::core::config::{Config, Verbosity};
use cgp_genomics::parser::schema::*;

/// Temporary CGP results root plus an output directory
pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub cgp_root: PathBuf,
    pub genomics_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cgp_root = temp_dir.path().join("CGP");
        fs::create_dir_all(&cgp_root).expect("Failed to create CGP root");
        let genomics_dir = temp_dir.path().join("Genomics");

        TestEnvironment {
            _temp_dir: temp_dir,
            cgp_root,
            genomics_dir,
        }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.paths.cgp_results_dir = self.cgp_root.clone();
        config.paths.genomics_results_dir = self.genomics_dir.clone();
        config.verbosity = Verbosity {
            progress: false,
            messages: false,
            warnings: true,
        };
        config
    }

    pub fn result_set(&self, genome1: &str, genome2: &str) -> ResultSetBuilder {
        ResultSetBuilder::new(&self.cgp_root, genome1, genome2)
    }
}

/// One report side: contig and cds header token
pub type Side<'a> = (&'a str, &'a str);

pub const NO_SIDE: Side<'static> = ("", "");

pub fn report_row(tag: &str, one: Side, two: Side) -> String {
    let mut fields = vec![String::new(); REPORT_COLUMN_COUNT];
    fields[SORT_POSITION] = "1".to_string();
    fields[GENOME_TYPE] = tag.to_string();
    fields[IDENTITY] = "97.5".to_string();
    fields[E_VALUE] = "1e-40".to_string();
    fields[G1_CONTIG] = one.0.to_string();
    fields[G1_HEADER] = one.1.to_string();
    fields[G2_CONTIG] = two.0.to_string();
    fields[G2_HEADER] = two.1.to_string();
    if !one.1.is_empty() {
        fields[G1_ANNOTATIONS] = "['phanotate', 'hypothetical protein']".to_string();
    }
    fields.join("\t")
}

pub struct ResultSetBuilder {
    dir: PathBuf,
    genome1: String,
    genome2: String,
    gene_rows: Vec<String>,
    protein_rows: Vec<String>,
    paralogs: String,
    write_log: bool,
    write_report: bool,
}

impl ResultSetBuilder {
    fn new(root: &Path, genome1: &str, genome2: &str) -> Self {
        Self {
            dir: root.join(format!("Results_{}_{}", genome1, genome2)),
            genome1: genome1.to_string(),
            genome2: genome2.to_string(),
            gene_rows: Vec::new(),
            protein_rows: Vec::new(),
            paralogs: String::new(),
            write_log: true,
            write_report: true,
        }
    }

    pub fn gene(mut self, tag: &str, one: Side, two: Side) -> Self {
        self.gene_rows.push(report_row(tag, one, two));
        self
    }

    pub fn protein(mut self, tag: &str, one: Side, two: Side) -> Self {
        self.protein_rows.push(report_row(tag, one, two));
        self
    }

    /// Raw report line, written among the gene rows
    pub fn raw_gene_line(mut self, line: &str) -> Self {
        self.gene_rows.push(line.to_string());
        self
    }

    /// A paralog block for one genome; `section` is "Gene" or "Protein"
    pub fn paralogs(mut self, genome: &str, section: &str, pairs: &[(&str, &str)]) -> Self {
        self.paralogs
            .push_str(&format!("##### PARALOGS for genome /data/genomes/{}.fasta\n", genome));
        self.paralogs.push_str(&format!("{} Paralogs\n", section));
        for (query, subject) in pairs {
            self.paralogs
                .push_str(&format!("query:{}\tsubject:{}\tparalog\t88.0\n", query, subject));
            self.paralogs.push_str(&format!("header: {}\n", query));
            self.paralogs.push_str("coverage: 0.91\n");
        }
        self
    }

    pub fn without_report(mut self) -> Self {
        self.write_report = false;
        self
    }

    pub fn without_log(mut self) -> Self {
        self.write_log = false;
        self
    }

    pub fn write(self) -> PathBuf {
        fs::create_dir_all(&self.dir).expect("Failed to create result set");

        if self.write_log {
            let log = format!(
                "compareGeneProfiles_main.py run log\n\
                 genome file #1: /data/genomes/{}.fasta\n\
                 genome file #2: /data/genomes/{}.fasta\n\
                 annotation file #1: /data/genomes/{}.gff\n",
                self.genome1, self.genome2, self.genome1
            );
            fs::write(self.dir.join("compareGeneProfiles_main.log"), log).expect("Failed to write log");
        }

        if self.write_report {
            let mut report = format!("# {} vs {}\n#GENE HITS\n", self.genome1, self.genome2);
            for row in &self.gene_rows {
                report.push_str(row);
                report.push('\n');
            }
            report.push_str("#PROTEIN HITS\n");
            for row in &self.protein_rows {
                report.push_str(row);
                report.push('\n');
            }
            fs::write(self.dir.join("compareGeneProfiles_main.report"), report).expect("Failed to write report");
        }

        if !self.paralogs.is_empty() {
            fs::write(self.dir.join("compareGeneProfiles_main.paralogs"), &self.paralogs)
                .expect("Failed to write paralogs");
        }
        self.dir
    }
}
