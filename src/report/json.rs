use chrono::{DateTime, Local};
use serde::Serialize;

use crate::comparison::{ComparisonViews, RunSummary};
use crate::model::GenomeStore;
use crate::report::ReportOptions;
use crate::Result;

#[derive(Debug, Serialize)]
pub struct GenomeSummary {
    pub name: String,
    pub file: String,
    pub is_reference: bool,
    pub contigs: Vec<String>,
    pub genes: usize,
    pub proteins: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated: DateTime<Local>,
    pub genomes: Vec<GenomeSummary>,
    pub summary: &'a RunSummary,
    pub views: &'a ComparisonViews,
}

impl<'a> JsonReport<'a> {
    pub fn new(store: &GenomeStore, views: &'a ComparisonViews, summary: &'a RunSummary) -> Self {
        let genomes = store
            .genomes()
            .map(|g| GenomeSummary {
                name: g.name.clone(),
                file: g.file.clone(),
                is_reference: g.is_reference,
                contigs: g.contigs.clone(),
                genes: g.genes().len(),
                proteins: g.proteins().len(),
            })
            .collect();
        Self {
            generated: Local::now(),
            genomes,
            summary,
            views,
        }
    }
}

pub fn generate_json_report(
    store: &GenomeStore,
    views: &ComparisonViews,
    summary: &RunSummary,
    options: &ReportOptions,
) -> Result<String> {
    let report = JsonReport::new(store, views, summary);
    let json = if options.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Verbosity;
    use crate::report::Format;

    #[test]
    fn test_json_report_fields() {
        let mut store = GenomeStore::new(Verbosity::quiet());
        store.get_or_create_genome("Lambda", "Lambda.fasta");
        let views = ComparisonViews::compute(&store);
        let summary = RunSummary {
            sets_discovered: 1,
            sets_processed: 1,
            ..Default::default()
        };
        let options = ReportOptions {
            format: Format::Json,
            include_paralogs: true,
            pretty: false,
        };

        let json = generate_json_report(&store, &views, &summary, &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["genomes"][0]["name"], "Lambda");
        assert_eq!(value["genomes"][0]["is_reference"], true);
        assert_eq!(value["summary"]["sets_processed"], 1);
        assert_eq!(value["views"]["reference"], "Lambda");
        assert!(value["views"]["genes"]["core"].as_array().unwrap().is_empty());
    }
}
