use regex::Regex;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

use super::{genome_name_from_path, lossy_lines, GenomePair};
use crate::{GenomicsError, Result};

/// Whitespace column holding the fasta path in `genome file #N: <path>` lines
pub const GENOME_PATH_COLUMN: usize = 3;

static GENOME_FILE_LINE: OnceLock<Regex> = OnceLock::new();

fn genome_file_line() -> &'static Regex {
    GENOME_FILE_LINE.get_or_init(|| {
        Regex::new(r"genome\s+file(?:\s+#([12]))?").expect("genome file pattern is valid")
    })
}

/// Path token of a genome declaration line
fn path_token(line: &str) -> Option<&str> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    match columns.get(GENOME_PATH_COLUMN) {
        Some(token) if !token.ends_with(':') => Some(token),
        _ => line.rsplit_once(": ").map(|(_, path)| path.trim()).filter(|p| !p.is_empty()),
    }
}

/// Find the two compared genomes in a comparison log.
///
/// Numbered declarations (`#1`, `#2`) fill their own slot; bare `genome file`
/// lines fill the first empty slot. A later declaration for a filled slot is
/// ignored.
pub fn parse_log(path: &Path) -> Result<GenomePair> {
    if !path.is_file() {
        return Err(GenomicsError::MissingInput(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);

    let mut slots: [Option<(String, String)>; 2] = [None, None];
    for line in lossy_lines(reader) {
        let (_, line) = line?;
        let Some(caps) = genome_file_line().captures(&line) else {
            continue;
        };
        let Some(genome) = path_token(&line).and_then(genome_name_from_path) else {
            continue;
        };

        let slot = match caps.get(1).map(|m| m.as_str()) {
            Some("1") => 0,
            Some(_) => 1,
            None => match slots.iter().position(Option::is_none) {
                Some(free) => free,
                None => continue,
            },
        };
        if slots[slot].is_none() {
            slots[slot] = Some(genome);
        }
    }

    match slots {
        [Some((genome1, file1)), Some((genome2, file2))] => Ok(GenomePair {
            genome1,
            genome2,
            file1,
            file2,
        }),
        _ => Err(GenomicsError::Parse(format!(
            "{} does not name two genome files",
            path.display()
        ))),
    }
}
