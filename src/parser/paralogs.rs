//! Paralog listing of a result set.
//!
//! The file is a sequence of blocks:
//! ```text
//! ##### PARALOGS for genome /data/genomes/Lambda.fasta
//! Gene Paralogs
//! query:cds3/+/500/900/	subject:cds9/+/4000/4400/	paralog	...
//! header:...
//! coverage: 0.93
//! ```
//! Every coverage line closes one record. The genome and section stay in
//! force until the next declaration or section header.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{genome_name_from_path, lossy_lines, GenomePair, ParalogRecord, ParsedParalogs, RowIssue};
use crate::core::config::Verbosity;
use crate::model::EntityKind;
use crate::Result;

const DECLARATION_MARKER: &str = "PARALOGS";
const GENE_SECTION: &str = "Gene Paralogs";
const PROTEIN_SECTION: &str = "Protein Paralogs";
const QUERY_PREFIX: &str = "query:";
const SUBJECT_PREFIX: &str = "subject:";
const COVERAGE_PREFIX: &str = "coverage:";

#[derive(Debug, Clone, PartialEq)]
enum LineKind<'a> {
    Blank,
    Declaration(Option<&'a str>),
    Section(EntityKind),
    QuerySubject { query: &'a str, subject: &'a str },
    Coverage(Option<f64>),
    Other,
}

fn classify(line: &str) -> std::result::Result<LineKind<'_>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(LineKind::Blank);
    }
    if trimmed.contains(GENE_SECTION) {
        return Ok(LineKind::Section(EntityKind::Gene));
    }
    if trimmed.contains(PROTEIN_SECTION) {
        return Ok(LineKind::Section(EntityKind::Protein));
    }
    if trimmed.contains(DECLARATION_MARKER) {
        let token = trimmed
            .split_whitespace()
            .last()
            .filter(|t| !t.contains(DECLARATION_MARKER));
        return Ok(LineKind::Declaration(token));
    }
    if trimmed.starts_with('#') {
        return Ok(LineKind::Blank);
    }
    if trimmed.contains(QUERY_PREFIX) {
        let mut fields = trimmed.split('\t');
        let query = fields
            .next()
            .and_then(|f| f.trim().strip_prefix(QUERY_PREFIX))
            .map(str::trim)
            .filter(|q| !q.is_empty());
        let subject = fields
            .next()
            .and_then(|f| f.trim().strip_prefix(SUBJECT_PREFIX))
            .map(str::trim)
            .filter(|s| !s.is_empty());
        return match (query, subject) {
            (Some(query), Some(subject)) => Ok(LineKind::QuerySubject { query, subject }),
            _ => Err(format!("unreadable query/subject line '{}'", trimmed)),
        };
    }
    if let Some(idx) = trimmed.find(COVERAGE_PREFIX) {
        let value = trimmed[idx + COVERAGE_PREFIX.len()..]
            .split_whitespace()
            .next()
            .and_then(|v| v.parse().ok());
        return Ok(LineKind::Coverage(value));
    }
    Ok(LineKind::Other)
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    AwaitingPair,
    AwaitingCoverage {
        line: usize,
        query: String,
        subject: String,
    },
}

/// Working state of the block being read
struct BlockReader<'p> {
    pair: &'p GenomePair,
    genome: Option<String>,
    kind: Option<EntityKind>,
    state: State,
    parsed: ParsedParalogs,
}

impl<'p> BlockReader<'p> {
    fn new(pair: &'p GenomePair) -> Self {
        Self {
            pair,
            genome: None,
            kind: None,
            state: State::AwaitingPair,
            parsed: ParsedParalogs::default(),
        }
    }

    fn issue(&mut self, line: usize, reason: String) {
        self.parsed.issues.push(RowIssue { line, reason });
    }

    fn close_pending(&mut self, reason: &str) {
        if let State::AwaitingCoverage { line, .. } = self.state {
            self.issue(line, format!("paralog record {}", reason));
        }
        self.state = State::AwaitingPair;
    }

    fn step(&mut self, line_number: usize, kind: LineKind<'_>) {
        match kind {
            LineKind::Blank | LineKind::Other => {}
            LineKind::Declaration(token) => {
                self.close_pending("ended without a coverage line");
                self.kind = None;
                let name = token.and_then(genome_name_from_path).map(|(name, _)| name);
                self.genome = match name {
                    Some(name) if self.pair.contains(&name) => Some(name),
                    Some(name) => {
                        self.issue(
                            line_number,
                            format!("paralog block declares genome '{}' outside this result set", name),
                        );
                        None
                    }
                    None => {
                        self.issue(line_number, "paralog block declares no genome path".to_string());
                        None
                    }
                };
            }
            LineKind::Section(section) => {
                self.close_pending("ended without a coverage line");
                self.kind = Some(section);
            }
            LineKind::QuerySubject { query, subject } => {
                self.close_pending("was followed by another query before its coverage line");
                self.state = State::AwaitingCoverage {
                    line: line_number,
                    query: query.to_string(),
                    subject: subject.to_string(),
                };
            }
            LineKind::Coverage(coverage) => {
                let state = std::mem::replace(&mut self.state, State::AwaitingPair);
                let State::AwaitingCoverage { line, query, subject } = state else {
                    self.issue(line_number, "coverage line without a query/subject line".to_string());
                    return;
                };
                let (Some(genome), Some(kind)) = (self.genome.clone(), self.kind) else {
                    self.issue(line, "paralog record has no genome or section header".to_string());
                    return;
                };
                self.parsed.records.push(ParalogRecord {
                    line,
                    genome,
                    kind,
                    query,
                    subject,
                    coverage,
                });
            }
        }
    }

    fn finish(mut self) -> ParsedParalogs {
        self.close_pending("is truncated at end of file");
        self.parsed
    }
}

/// Read a paralog listing. A result set without one simply has no paralogs.
pub fn parse_paralogs(path: &Path, pair: &GenomePair, verbosity: &Verbosity) -> Result<ParsedParalogs> {
    if !path.is_file() {
        verbosity.message(format_args!("{}: no paralog file", path.display()));
        return Ok(ParsedParalogs::default());
    }
    let reader = BufReader::new(File::open(path)?);

    let mut blocks = BlockReader::new(pair);
    for line in lossy_lines(reader) {
        let (line_number, line) = line?;
        match classify(&line) {
            Ok(kind) => blocks.step(line_number, kind),
            Err(reason) => blocks.issue(line_number, reason),
        }
    }

    let parsed = blocks.finish();
    for issue in &parsed.issues {
        verbosity.warning(format_args!("{}: skipping {}", path.display(), issue));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn pair() -> GenomePair {
        GenomePair {
            genome1: "Lambda".to_string(),
            genome2: "T7".to_string(),
            file1: "Lambda.fasta".to_string(),
            file2: "T7.fasta".to_string(),
        }
    }

    fn parse(contents: &str) -> ParsedParalogs {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        parse_paralogs(file.path(), &pair(), &Verbosity::quiet()).unwrap()
    }

    #[test]
    fn test_classify_line_kinds() {
        assert_eq!(classify("").unwrap(), LineKind::Blank);
        assert_eq!(classify("# note").unwrap(), LineKind::Blank);
        assert_eq!(classify("Gene Paralogs").unwrap(), LineKind::Section(EntityKind::Gene));
        assert_eq!(
            classify("##### PARALOGS for genome /x/T7.fasta").unwrap(),
            LineKind::Declaration(Some("/x/T7.fasta"))
        );
        assert_eq!(classify("PARALOGS").unwrap(), LineKind::Declaration(None));
        assert_eq!(
            classify("query:cds1/+/1/9/\tsubject:cds5/+/50/90/\tparalog").unwrap(),
            LineKind::QuerySubject {
                query: "cds1/+/1/9/",
                subject: "cds5/+/50/90/"
            }
        );
        assert_eq!(classify("coverage: 0.87").unwrap(), LineKind::Coverage(Some(0.87)));
        assert_eq!(classify("header: cds1 tail fiber").unwrap(), LineKind::Other);
        assert!(classify("query:\tsubject:cds5").is_err());
    }

    #[test]
    fn test_records_commit_on_coverage() {
        let parsed = parse(
            "##### PARALOGS for genome /data/Lambda.fasta\n\
             Gene Paralogs\n\
             query:cds1/+/1/90/\tsubject:cds4/+/400/490/\tparalog\t88.0\n\
             header: cds1\n\
             coverage: 0.95\n\
             query:cds2/+/100/190/\tsubject:cds6/-/600/690/\tparalog\t80.0\n\
             coverage: 0.90\n\
             Protein Paralogs\n\
             query:cds1/+/1/90/\tsubject:cds4/+/400/490/\tparalog\t91.0\n\
             coverage: 0.97\n",
        );
        assert!(parsed.issues.is_empty(), "{:?}", parsed.issues);
        assert_eq!(parsed.records.len(), 3);
        assert_eq!(parsed.records[0].genome, "Lambda");
        assert_eq!(parsed.records[0].subject, "cds4/+/400/490/");
        assert_eq!(parsed.records[1].kind, EntityKind::Gene);
        assert_eq!(parsed.records[2].kind, EntityKind::Protein);
        assert_eq!(parsed.records[2].coverage, Some(0.97));
    }

    #[test]
    fn test_headerless_records_are_skipped() {
        let parsed = parse("query:cds1\tsubject:cds2\ncoverage: 1.0\n");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.issues.len(), 1);
        assert_eq!(parsed.issues[0].line, 1);
    }

    #[test]
    fn test_foreign_genome_block_is_dropped() {
        let parsed = parse(
            "PARALOGS for genome /data/P22.fasta\n\
             Gene Paralogs\n\
             query:cds1\tsubject:cds2\n\
             coverage: 1.0\n\
             PARALOGS for genome /data/T7.fasta\n\
             Gene Paralogs\n\
             query:cds3\tsubject:cds8\n\
             coverage: 0.5\n",
        );
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].genome, "T7");
        assert_eq!(parsed.issues.len(), 2);
    }

    #[test]
    fn test_truncated_record_is_reported() {
        let parsed = parse("PARALOGS for genome /data/Lambda.fasta\nGene Paralogs\nquery:cds1\tsubject:cds2\n");
        assert!(parsed.records.is_empty());
        assert!(parsed.issues[0].reason.contains("truncated"));
    }

    #[test]
    fn test_invalid_utf8_header_line_is_tolerated() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"PARALOGS for genome /data/Lambda.fasta\nGene Paralogs\n\
              query:cds1\tsubject:cds2\nheader: cds1 prot\xe9ine\ncoverage: 0.8\n",
        )
        .unwrap();
        let parsed = parse_paralogs(file.path(), &pair(), &Verbosity::quiet()).unwrap();
        assert!(parsed.issues.is_empty(), "{:?}", parsed.issues);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].line, 3);
    }

    #[test]
    fn test_missing_file_has_no_paralogs() {
        let parsed = parse_paralogs(Path::new("/nonexistent/x.paralogs"), &pair(), &Verbosity::quiet()).unwrap();
        assert!(parsed.records.is_empty());
        assert!(parsed.issues.is_empty());
    }
}
