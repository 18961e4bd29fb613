use chrono::Local;
use std::fmt::Write;

use crate::comparison::{ComparisonViews, RunSummary};
use crate::model::{Entity, EntityKind, Genome, GenomeStore};
use crate::report::ReportOptions;
use crate::Result;

fn heading(output: &mut String, title: &str, underline: char) -> Result<()> {
    writeln!(output, "{}", title)?;
    writeln!(output, "{}", underline.to_string().repeat(title.chars().count()))?;
    Ok(())
}

fn kind_title(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Gene => "Genes",
        EntityKind::Protein => "Proteins",
    }
}

/// Title block shared by every listing file
pub fn write_header(output: &mut String, title: &str, store: &GenomeStore) -> Result<()> {
    heading(output, title, '=')?;
    writeln!(output, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    match store.reference() {
        Some(reference) => writeln!(output, "Reference genome: {}", reference.name)?,
        None => writeln!(output, "Reference genome: none")?,
    }
    writeln!(output, "Genomes compared: {}", store.genome_count())?;
    writeln!(output)?;
    Ok(())
}

fn write_partner_listing<'a, F>(output: &mut String, reference: &'a Genome, kind: EntityKind, partners: F) -> Result<()>
where
    F: Fn(&'a Entity) -> &'a [String],
{
    heading(output, kind_title(kind), '-')?;
    for entity in reference.entities(kind).iter() {
        writeln!(output, "{} {}", kind, entity.identifier)?;
        for partner in partners(entity) {
            writeln!(output, "    {}", partner)?;
        }
    }
    writeln!(output)?;
    Ok(())
}

/// Every reference entity with its mutual best hits
pub fn write_mutual_best_hits(output: &mut String, store: &GenomeStore) -> Result<()> {
    if let Some(reference) = store.reference() {
        for kind in EntityKind::ALL {
            write_partner_listing(output, reference, kind, |e| e.mutual_best_hits.as_slice())?;
        }
    }
    Ok(())
}

pub fn write_singular_best_hits(output: &mut String, store: &GenomeStore) -> Result<()> {
    if let Some(reference) = store.reference() {
        for kind in EntityKind::ALL {
            write_partner_listing(output, reference, kind, |e| e.singular_best_hits.as_slice())?;
        }
    }
    Ok(())
}

/// Reference entities with no best hit in any other genome, with the genomes they were compared against
pub fn write_loners(output: &mut String, store: &GenomeStore, views: &ComparisonViews) -> Result<()> {
    let Some(reference) = store.reference() else {
        return Ok(());
    };
    for kind in EntityKind::ALL {
        heading(output, kind_title(kind), '-')?;
        for identifier in &views.kind(kind).loners {
            match reference.entities(kind).get(identifier) {
                Some(entity) if !entity.loner_with.is_empty() => {
                    writeln!(output, "{}\t{}", identifier, entity.loner_with.join(","))?
                }
                _ => writeln!(output, "{}", identifier)?,
            }
        }
        writeln!(output)?;
    }
    Ok(())
}

pub fn write_core_genome(output: &mut String, views: &ComparisonViews) -> Result<()> {
    for kind in EntityKind::ALL {
        heading(output, kind_title(kind), '-')?;
        for set in &views.kind(kind).core {
            writeln!(output, "{} Set #{}:", if kind == EntityKind::Gene { "Gene" } else { "Protein" }, set.number)?;
            writeln!(output, "    {}", set.identifier)?;
            for partner in &set.partners {
                writeln!(output, "    {}", partner)?;
            }
        }
        writeln!(output)?;
    }
    Ok(())
}

pub fn write_correspondences(output: &mut String, views: &ComparisonViews) -> Result<()> {
    for kind in EntityKind::ALL {
        heading(output, kind_title(kind), '-')?;
        for correspondence in &views.kind(kind).correspondences {
            writeln!(output, "{}s corresponding to {}:", kind, correspondence.identifier)?;
            for partner in &correspondence.partners {
                writeln!(output, "    {}", partner)?;
            }
        }
        writeln!(output)?;
    }
    Ok(())
}

pub fn write_paralog_sets(output: &mut String, views: &ComparisonViews) -> Result<()> {
    for kind in EntityKind::ALL {
        heading(output, kind_title(kind), '-')?;
        for (i, set) in views.kind(kind).paralog_sets.iter().enumerate() {
            writeln!(output, "Paralog Set #{} ({} members):", i + 1, set.size())?;
            for member in &set.members {
                writeln!(output, "    {}", member)?;
            }
        }
        writeln!(output)?;
    }
    Ok(())
}

pub fn write_summary(output: &mut String, summary: &RunSummary) -> Result<()> {
    heading(output, "Summary", '-')?;
    writeln!(output, "- Result sets found:     {:6}", summary.sets_discovered)?;
    writeln!(output, "- Result sets processed: {:6}", summary.sets_processed)?;
    writeln!(output, "- Result sets skipped:   {:6}", summary.sets_skipped.len())?;
    writeln!(output, "- Hits applied:          {:6}", summary.hits_applied)?;
    writeln!(output, "- Paralog edges:         {:6}", summary.paralog_edges)?;
    writeln!(output, "- Rows skipped:          {:6}", summary.rows_skipped)?;
    writeln!(output, "- Records dropped:       {:6}", summary.records_dropped)?;
    for skipped in &summary.sets_skipped {
        writeln!(output, "  {}: {}", skipped.name, skipped.reason)?;
    }
    writeln!(output)?;
    Ok(())
}

/// All listings in one document, in the order the listing files are written
pub fn generate_text_report(
    store: &GenomeStore,
    views: &ComparisonViews,
    summary: &RunSummary,
    options: &ReportOptions,
) -> Result<String> {
    let mut output = String::new();
    write_header(&mut output, "Genome Comparison Report", store)?;
    write_summary(&mut output, summary)?;

    heading(&mut output, "Mutual Best Hits", '=')?;
    write_mutual_best_hits(&mut output, store)?;
    heading(&mut output, "Singular Best Hits", '=')?;
    write_singular_best_hits(&mut output, store)?;
    heading(&mut output, "Loners", '=')?;
    write_loners(&mut output, store, views)?;
    heading(&mut output, "Core Genome", '=')?;
    write_core_genome(&mut output, views)?;
    heading(&mut output, "Correspondences", '=')?;
    write_correspondences(&mut output, views)?;
    if options.include_paralogs {
        heading(&mut output, "Paralog Sets", '=')?;
        write_paralog_sets(&mut output, views)?;
    }
    Ok(output)
}

fn write_entity(output: &mut String, entity: &Entity) -> Result<()> {
    writeln!(output, "  {} {}", entity.kind, entity.identifier)?;
    writeln!(output, "    header: {}", entity.header)?;
    writeln!(output, "    number: {}", entity.number)?;
    if let Some(gene_call) = &entity.gene_call {
        writeln!(output, "    gene call: {}", gene_call)?;
    }
    if !entity.annotation.is_empty() {
        writeln!(output, "    annotation: {}", entity.annotation)?;
    }
    writeln!(output, "    loner: {}", entity.is_loner)?;
    for (label, list) in [
        ("mutual best hits", &entity.mutual_best_hits),
        ("singular best hits", &entity.singular_best_hits),
        ("loner with", &entity.loner_with),
        ("paralogs", &entity.paralogs),
    ] {
        if !list.is_empty() {
            writeln!(output, "    {}: {}", label, list.join(", "))?;
        }
    }
    Ok(())
}

/// One genome with all of its entities
pub fn write_genome(output: &mut String, genome: &Genome) -> Result<()> {
    let title = if genome.is_reference {
        format!("{} (reference)", genome.name)
    } else {
        genome.name.clone()
    };
    heading(output, &title, '-')?;
    writeln!(output, "file: {}", genome.file)?;
    writeln!(output, "contigs: {}", genome.contigs.join(", "))?;
    writeln!(output, "genes: {}  proteins: {}", genome.genes().len(), genome.proteins().len())?;
    for kind in EntityKind::ALL {
        for entity in genome.entities(kind).iter() {
            write_entity(output, entity)?;
        }
    }
    writeln!(output)?;
    Ok(())
}

/// Every genome and entity in the store
pub fn generate_model_dump(store: &GenomeStore) -> Result<String> {
    let mut output = String::new();
    write_header(&mut output, "Genome Set", store)?;
    for genome in store.genomes() {
        write_genome(&mut output, genome)?;
    }
    Ok(output)
}
