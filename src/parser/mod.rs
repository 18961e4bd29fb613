//! Readers for the three files of a pairwise comparison result set.
//!
//! * [`log`] finds the two genomes that were compared
//! * [`report`] turns the tab-delimited hit listing into [`HitRecord`]s
//! * [`paralogs`] turns the block-structured paralog listing into [`ParalogRecord`]s
//!
//! Rows that do not fit the expected shape are reported as [`RowIssue`]s and
//! skipped; only I/O failures and missing files abort a parse.

pub mod annotation;
pub mod log;
pub mod paralogs;
pub mod report;
pub mod schema;

pub use log::parse_log;
pub use paralogs::parse_paralogs;
pub use report::parse_report;

use serde::Serialize;
use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;
use std::str::FromStr;

use crate::model::EntityKind;
use crate::GenomicsError;

/// Which genome of the pair a column or tag refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    Mutual,
    Singular,
    Loner,
    Paralog,
}

impl FromStr for HitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mutual" => Ok(HitKind::Mutual),
            "singular" => Ok(HitKind::Singular),
            "loner" => Ok(HitKind::Loner),
            "paralog" => Ok(HitKind::Paralog),
            _ => Err(format!("unknown hit kind '{}'", s)),
        }
    }
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HitKind::Mutual => "mutual",
            HitKind::Singular => "singular",
            HitKind::Loner => "loner",
            HitKind::Paralog => "paralog",
        };
        f.write_str(s)
    }
}

/// Hit-type tag of a report row, e.g. `genome2_singular`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTag {
    pub side: Side,
    pub kind: HitKind,
}

impl FromStr for HitTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (genome, kind) = s
            .trim()
            .split_once('_')
            .ok_or_else(|| format!("hit-type tag '{}' has no '_' separator", s))?;
        let side = match genome {
            "genome1" => Side::One,
            "genome2" => Side::Two,
            _ => return Err(format!("hit-type tag '{}' names no genome 1 or 2", s)),
        };
        let kind = kind.parse()?;
        Ok(HitTag { side, kind })
    }
}

/// One side of a hit row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitSide {
    pub genome: String,
    pub contig: String,
    /// Empty when the row names no entity on this side (loner rows)
    pub header: String,
    pub annotation: String,
    pub gene_call: Option<String>,
}

impl HitSide {
    pub fn is_present(&self) -> bool {
        !self.header.is_empty()
    }
}

/// A classified hit between genome 1 and genome 2, as read from one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRecord {
    pub line: usize,
    pub flavor: EntityKind,
    pub kind: HitKind,
    /// The "self" genome of the row; the query for singular and loner hits
    pub query: Side,
    pub sides: [HitSide; 2],
}

impl HitRecord {
    pub fn side(&self, side: Side) -> &HitSide {
        &self.sides[side.index()]
    }
}

/// A within-genome paralog edge, committed at the end of a paralog block
#[derive(Debug, Clone, PartialEq)]
pub struct ParalogRecord {
    pub line: usize,
    pub genome: String,
    pub kind: EntityKind,
    pub query: String,
    pub subject: String,
    pub coverage: Option<f64>,
}

/// The two genomes of a result set, as named in its log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomePair {
    pub genome1: String,
    pub genome2: String,
    pub file1: String,
    pub file2: String,
}

impl GenomePair {
    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::One => &self.genome1,
            Side::Two => &self.genome2,
        }
    }

    pub fn contains(&self, genome: &str) -> bool {
        self.genome1 == genome || self.genome2 == genome
    }
}

/// A skipped row and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl From<RowIssue> for GenomicsError {
    fn from(issue: RowIssue) -> Self {
        GenomicsError::MalformedRow {
            line: issue.line,
            reason: issue.reason,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedReport {
    pub hits: Vec<HitRecord>,
    pub issues: Vec<RowIssue>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedParalogs {
    pub records: Vec<ParalogRecord>,
    pub issues: Vec<RowIssue>,
}

/// Numbered lines of a reader, with invalid UTF-8 replaced rather than fatal.
///
/// Annotation columns come from external tools and may carry Latin-1 bytes;
/// only a failed read ends the iteration with an error.
pub fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<(usize, String)>> {
    reader.split(b'\n').enumerate().map(|(i, bytes)| {
        let mut bytes = bytes?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Ok((i + 1, line))
    })
}

/// Genome name from a fasta path: base file name without its extension
pub fn genome_name_from_path(path: &str) -> Option<(String, String)> {
    let path = Path::new(path.trim());
    let file = path.file_name()?.to_string_lossy().into_owned();
    let stem = path.file_stem()?.to_string_lossy().into_owned();
    if stem.is_empty() {
        return None;
    }
    Some((stem, file))
}
