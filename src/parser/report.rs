use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::annotation::gene_call_label;
use super::schema::{tokenize_row, GenomeColumns, ReportRow, COMMENT_MARKER, PROTEIN_HITS_MARKER};
use super::{lossy_lines, GenomePair, HitKind, HitRecord, HitSide, HitTag, ParsedReport, RowIssue, Side};
use crate::core::config::Verbosity;
use crate::model::{parse_cds_index, EntityKind};
use crate::{GenomicsError, Result};

/// Read a comparison report into hit records.
///
/// Gene rows come first; the `#PROTEIN HITS` marker switches every later
/// row to protein hits. Rows that cannot be classified are collected as
/// issues and skipped.
pub fn parse_report(path: &Path, pair: &GenomePair, verbosity: &Verbosity) -> Result<ParsedReport> {
    if !path.is_file() {
        return Err(GenomicsError::MissingInput(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);

    let mut parsed = ParsedReport::default();
    let mut flavor = EntityKind::Gene;
    for line in lossy_lines(reader) {
        let (line_number, line) = line?;

        if line.starts_with(COMMENT_MARKER) {
            if line.starts_with(PROTEIN_HITS_MARKER) {
                flavor = EntityKind::Protein;
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(&line, line_number, flavor, pair) {
            Ok(hit) => parsed.hits.push(hit),
            Err(issue) => {
                verbosity.warning(format_args!("{}: skipping {}", path.display(), issue));
                parsed.issues.push(issue);
            }
        }
    }

    verbosity.message(format_args!(
        "{}: {} hits read, {} rows skipped",
        path.display(),
        parsed.hits.len(),
        parsed.issues.len()
    ));
    Ok(parsed)
}

/// Convert one data line into a hit record
pub fn parse_row(
    line: &str,
    line_number: usize,
    flavor: EntityKind,
    pair: &GenomePair,
) -> std::result::Result<HitRecord, RowIssue> {
    let issue = |reason: String| RowIssue {
        line: line_number,
        reason,
    };

    let row: ReportRow = tokenize_row(line).map_err(issue)?;
    let tag: HitTag = row.hit_tag.parse().map_err(issue)?;
    if tag.kind == HitKind::Paralog {
        return Err(issue(format!(
            "paralog tag '{}' in a cross-genome report",
            row.hit_tag
        )));
    }

    let sides = [
        hit_side(&row.genome1, pair.name(Side::One)),
        hit_side(&row.genome2, pair.name(Side::Two)),
    ];
    for side in sides.iter().filter(|s| s.is_present()) {
        if parse_cds_index(&side.header).is_none() {
            return Err(issue(format!("header token '{}' carries no cds index", side.header)));
        }
    }

    let query = &sides[tag.side.index()];
    let partner = &sides[tag.side.other().index()];
    let complete = match tag.kind {
        HitKind::Loner => query.is_present(),
        _ => query.is_present() && partner.is_present(),
    };
    if !complete {
        return Err(issue(format!("{} row is missing a header token", row.hit_tag)));
    }

    Ok(HitRecord {
        line: line_number,
        flavor,
        kind: tag.kind,
        query: tag.side,
        sides,
    })
}

fn hit_side(columns: &GenomeColumns, genome: &str) -> HitSide {
    HitSide {
        genome: genome.to_string(),
        contig: columns.contig.to_string(),
        header: columns.header.to_string(),
        annotation: columns.annotations.to_string(),
        gene_call: if columns.annotations.is_empty() {
            None
        } else {
            gene_call_label(columns.annotations)
        },
    }
}
