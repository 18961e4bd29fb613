//! Column layout of the pairwise comparison report.
//!
//! # Report columns (tab-separated)
//! ```text
//! Col  Field
//! 0    sort position
//! 1    hit-type tag, genomeN_kind
//! 2-5  query/subject alignment start and end
//! 6    identity %
//! 7    e-value
//! 8    genome 1 query/subject/loner marker
//! 9    genome 1 header token
//! 10   genome 1 contig
//! 11   genome 1 annotations (list literal)
//! 12   genome 1 gene start
//! 13   genome 1 gene end
//! 14   genome 1 strand
//! 15-21 the same seven fields for genome 2
//! 22   genome 1 coverage
//! 23   genome 2 coverage
//! 24   alignment length
//! 25   gap opens
//! 26   genome 1 span
//! 27   genome 1 length
//! 28   genome 2 span
//! 29   genome 2 length
//! ```

pub const SORT_POSITION: usize = 0;
pub const GENOME_TYPE: usize = 1;
pub const QUERY_START: usize = 2;
pub const QUERY_END: usize = 3;
pub const SUBJECT_START: usize = 4;
pub const SUBJECT_END: usize = 5;
pub const IDENTITY: usize = 6;
pub const E_VALUE: usize = 7;
pub const G1_Q_S_LONER: usize = 8;
pub const G1_HEADER: usize = 9;
pub const G1_CONTIG: usize = 10;
pub const G1_ANNOTATIONS: usize = 11;
pub const G1_GENE_START: usize = 12;
pub const G1_GENE_END: usize = 13;
pub const G1_STRAND: usize = 14;
pub const G2_Q_S_LONER: usize = 15;
pub const G2_HEADER: usize = 16;
pub const G2_CONTIG: usize = 17;
pub const G2_ANNOTATIONS: usize = 18;
pub const G2_GENE_START: usize = 19;
pub const G2_GENE_END: usize = 20;
pub const G2_STRAND: usize = 21;
pub const G1_COVERAGE: usize = 22;
pub const G2_COVERAGE: usize = 23;
pub const ALIGNMENT_LENGTH: usize = 24;
pub const GAP_OPENS: usize = 25;
pub const G1_SPAN: usize = 26;
pub const G1_LENGTH: usize = 27;
pub const G2_SPAN: usize = 28;
pub const G2_LENGTH: usize = 29;

pub const REPORT_COLUMN_COUNT: usize = 30;

/// Columns past the last one the hit model reads may be missing
pub const REQUIRED_COLUMNS: usize = G2_ANNOTATIONS + 1;

pub const COMMENT_MARKER: char = '#';
pub const PROTEIN_HITS_MARKER: &str = "#PROTEIN HITS";

/// Per-genome columns of a report row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenomeColumns<'a> {
    pub q_s_loner: &'a str,
    pub header: &'a str,
    pub contig: &'a str,
    pub annotations: &'a str,
    pub gene_start: &'a str,
    pub gene_end: &'a str,
    pub strand: &'a str,
    pub coverage: &'a str,
    pub span: &'a str,
    pub length: &'a str,
}

/// One report data row, every column addressed by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportRow<'a> {
    pub sort_position: &'a str,
    pub hit_tag: &'a str,
    pub query_start: &'a str,
    pub query_end: &'a str,
    pub subject_start: &'a str,
    pub subject_end: &'a str,
    pub identity: &'a str,
    pub e_value: &'a str,
    pub genome1: GenomeColumns<'a>,
    pub genome2: GenomeColumns<'a>,
    pub alignment_length: &'a str,
    pub gap_opens: &'a str,
}

impl<'a> ReportRow<'a> {
    pub fn identity_percent(&self) -> Option<f64> {
        self.identity.trim().parse().ok()
    }

    pub fn evalue(&self) -> Option<f64> {
        self.e_value.trim().parse().ok()
    }
}

/// Split a data line on tabs and map the fields onto [`ReportRow`].
///
/// Fails with the column count when the row is too short to carry both
/// genomes' header, contig and annotation columns.
pub fn tokenize_row(line: &str) -> Result<ReportRow<'_>, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < REQUIRED_COLUMNS {
        return Err(format!(
            "expected {} columns, found {}",
            REPORT_COLUMN_COUNT,
            fields.len()
        ));
    }
    let col = |i: usize| fields.get(i).copied().map(str::trim).unwrap_or("");

    Ok(ReportRow {
        sort_position: col(SORT_POSITION),
        hit_tag: col(GENOME_TYPE),
        query_start: col(QUERY_START),
        query_end: col(QUERY_END),
        subject_start: col(SUBJECT_START),
        subject_end: col(SUBJECT_END),
        identity: col(IDENTITY),
        e_value: col(E_VALUE),
        genome1: GenomeColumns {
            q_s_loner: col(G1_Q_S_LONER),
            header: col(G1_HEADER),
            contig: col(G1_CONTIG),
            annotations: col(G1_ANNOTATIONS),
            gene_start: col(G1_GENE_START),
            gene_end: col(G1_GENE_END),
            strand: col(G1_STRAND),
            coverage: col(G1_COVERAGE),
            span: col(G1_SPAN),
            length: col(G1_LENGTH),
        },
        genome2: GenomeColumns {
            q_s_loner: col(G2_Q_S_LONER),
            header: col(G2_HEADER),
            contig: col(G2_CONTIG),
            annotations: col(G2_ANNOTATIONS),
            gene_start: col(G2_GENE_START),
            gene_end: col(G2_GENE_END),
            strand: col(G2_STRAND),
            coverage: col(G2_COVERAGE),
            span: col(G2_SPAN),
            length: col(G2_LENGTH),
        },
        alignment_length: col(ALIGNMENT_LENGTH),
        gap_opens: col(GAP_OPENS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with(values: &[(usize, &str)]) -> String {
        let mut fields = vec![""; REPORT_COLUMN_COUNT];
        for &(i, v) in values {
            fields[i] = v;
        }
        fields.join("\t")
    }

    #[test]
    fn test_tokenize_named_columns() {
        let line = row_with(&[
            (GENOME_TYPE, "genome1_mutual"),
            (IDENTITY, "98.5"),
            (E_VALUE, "1e-50"),
            (G1_HEADER, "cds1/+/1/90/"),
            (G1_CONTIG, "A_contig_1"),
            (G2_HEADER, "cds3/-/10/99/"),
            (G2_CONTIG, "B_contig_1"),
            (G2_LENGTH, "90"),
        ]);
        let row = tokenize_row(&line).unwrap();
        assert_eq!(row.hit_tag, "genome1_mutual");
        assert_eq!(row.genome1.header, "cds1/+/1/90/");
        assert_eq!(row.genome2.contig, "B_contig_1");
        assert_eq!(row.genome2.length, "90");
        assert_eq!(row.identity_percent(), Some(98.5));
        assert_eq!(row.evalue(), Some(1e-50));
    }

    #[test]
    fn test_short_row_is_rejected() {
        let err = tokenize_row("1\tgenome1_mutual\t3").unwrap_err();
        assert!(err.contains("found 3"));
    }

    #[test]
    fn test_trailing_columns_may_be_missing() {
        let fields = vec!["x"; REQUIRED_COLUMNS];
        let line = fields.join("\t");
        let row = tokenize_row(&line).unwrap();
        assert_eq!(row.genome2.annotations, "x");
        assert_eq!(row.genome2.length, "");
    }
}
