use clap::Args;
use colored::*;
use std::path::PathBuf;

use crate::cli::GlobalArgs;
use crate::comparison::Comparison;
use crate::report::{write_reports, Format, ReportGenerator, ReportOptions};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Directory holding the Results_* directories (overrides PHATE_CGP_RESULTS_DIR)
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Directory for the listings (overrides PHATE_GENOMICS_RESULTS_DIR)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Also print the full report to stdout (text, json)
    #[arg(long, value_name = "FORMAT")]
    pub print: Option<Format>,

    /// Skip the JSON summary file
    #[arg(long)]
    pub no_json: bool,

    /// Leave paralog sets out of the printed report
    #[arg(long)]
    pub no_paralogs: bool,
}

pub fn run(args: CompareArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let mut config = global.resolve_config()?;
    if let Some(dir) = args.input {
        config.paths.cgp_results_dir = dir;
    }
    if let Some(dir) = args.output {
        config.paths.genomics_results_dir = dir;
    }
    if args.no_json {
        config.output.write_json = false;
    }

    let mut comparison = Comparison::new(&config);
    let views = comparison.perform_comparison()?;
    let written = write_reports(
        &config.paths.genomics_results_dir,
        comparison.store(),
        &views,
        comparison.summary(),
        &config.output,
    )?;

    if let Some(format) = args.print {
        let generator = ReportGenerator::new(ReportOptions {
            format,
            include_paralogs: !args.no_paralogs,
            ..Default::default()
        });
        println!("{}", generator.generate(comparison.store(), &views, comparison.summary())?);
    }

    let summary = comparison.summary();
    eprintln!("{}", "Comparison complete".green().bold());
    eprintln!(
        "  Reference genome: {}",
        views.reference.as_deref().unwrap_or("none").cyan()
    );
    eprintln!(
        "  Result sets: {} processed, {} skipped",
        summary.sets_processed,
        summary.sets_skipped.len()
    );
    eprintln!(
        "  Core genome: {} genes, {} proteins",
        views.genes.core.len(),
        views.proteins.core.len()
    );
    if summary.rows_skipped + summary.records_dropped > 0 {
        eprintln!(
            "  {} {} rows skipped, {} records dropped",
            "Warning:".yellow().bold(),
            summary.rows_skipped,
            summary.records_dropped
        );
    }
    for skipped in &summary.sets_skipped {
        eprintln!("  {} {}: {}", "Skipped".yellow(), skipped.name, skipped.reason);
    }
    eprintln!(
        "  {} files written to {}",
        written.len(),
        config.paths.genomics_results_dir.display()
    );
    Ok(())
}
