use clap::Args;
use std::path::PathBuf;

use crate::cli::GlobalArgs;
use crate::comparison::Comparison;
use crate::model::GenomeStore;
use crate::report::text::{generate_model_dump, write_genome};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Directory holding the Results_* directories (overrides PHATE_CGP_RESULTS_DIR)
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Only print this genome
    #[arg(short, long)]
    pub genome: Option<String>,
}

pub fn run(args: InspectArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let mut config = global.resolve_config()?;
    if let Some(dir) = args.input {
        config.paths.cgp_results_dir = dir;
    }

    let mut comparison = Comparison::new(&config);
    comparison.perform_comparison()?;

    print!("{}", render(comparison.store(), args.genome.as_deref())?);
    Ok(())
}

/// The whole model, or only the named genome
fn render(store: &GenomeStore, genome: Option<&str>) -> anyhow::Result<String> {
    let Some(name) = genome else {
        return Ok(generate_model_dump(store)?);
    };
    let genome = store
        .genome(name)
        .ok_or_else(|| anyhow::anyhow!("genome '{}' is not part of this comparison", name))?;
    let mut output = String::new();
    write_genome(&mut output, genome)?;
    Ok(output)
}
