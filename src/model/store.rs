use indexmap::IndexMap;

use super::genome::Genome;
use super::identity::parse_cds_index;
use super::{Entity, EntityKind};
use crate::core::config::Verbosity;
use crate::parser::{HitKind, HitRecord, HitSide, ParalogRecord};
use crate::{GenomicsError, Result};

/// Registry of every genome seen in a run, in first-seen order.
///
/// The first genome ever registered is the reference genome.
#[derive(Debug, Clone, Default)]
pub struct GenomeStore {
    genomes: IndexMap<String, Genome>,
    verbosity: Verbosity,
}

impl GenomeStore {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            genomes: IndexMap::new(),
            verbosity,
        }
    }

    pub fn get_or_create_genome(&mut self, name: &str, file: &str) -> &mut Genome {
        let is_first = self.genomes.is_empty();
        let verbosity = self.verbosity;
        self.genomes.entry(name.to_string()).or_insert_with(|| {
            let mut genome = Genome::new(name, file);
            genome.is_reference = is_first;
            if is_first {
                verbosity.message(format_args!("{} is the reference genome", name));
            }
            genome
        })
    }

    pub fn genome(&self, name: &str) -> Option<&Genome> {
        self.genomes.get(name)
    }

    pub fn genomes(&self) -> impl Iterator<Item = &Genome> {
        self.genomes.values()
    }

    pub fn genome_count(&self) -> usize {
        self.genomes.len()
    }

    pub fn reference(&self) -> Option<&Genome> {
        self.genomes.values().find(|g| g.is_reference)
    }

    /// Record one classified hit against the entities it names.
    ///
    /// Fails without touching the store when a named genome is unknown or
    /// the record lacks the entities its classification needs.
    pub fn add_hit(&mut self, hit: &HitRecord) -> Result<()> {
        let query = hit.side(hit.query);
        let partner = hit.side(hit.query.other());

        for side in hit.sides.iter().filter(|s| s.is_present()) {
            if !self.genomes.contains_key(&side.genome) {
                return Err(GenomicsError::UnknownGenome(side.genome.clone()));
            }
            if parse_cds_index(&side.header).is_none() {
                return Err(GenomicsError::MalformedRow {
                    line: hit.line,
                    reason: format!("header token '{}' carries no cds index", side.header),
                });
            }
        }
        let needs_partner = !matches!(hit.kind, HitKind::Loner);
        if !query.is_present() || (needs_partner && !partner.is_present()) {
            return Err(GenomicsError::MalformedRow {
                line: hit.line,
                reason: format!("{} hit is missing a header token", hit.kind),
            });
        }

        let query_id = self.register(hit.flavor, query)?;
        let partner_id = if partner.is_present() {
            Some(self.register(hit.flavor, partner)?)
        } else {
            None
        };

        match (hit.kind, partner_id) {
            (HitKind::Mutual, Some(partner_id)) => {
                self.entity_mut(hit.flavor, query, &query_id)?.add_mutual_best_hit(&partner_id);
                self.entity_mut(hit.flavor, partner, &partner_id)?.add_mutual_best_hit(&query_id);
            }
            (HitKind::Singular, Some(partner_id)) => {
                self.entity_mut(hit.flavor, query, &query_id)?.add_singular_best_hit(&partner_id);
            }
            (HitKind::Loner, _) => {
                let other_genome = partner.genome.clone();
                self.entity_mut(hit.flavor, query, &query_id)?.add_loner_genome(&other_genome);
            }
            (kind, _) => {
                return Err(GenomicsError::MalformedRow {
                    line: hit.line,
                    reason: format!("{} hits are not cross-genome", kind),
                });
            }
        }
        Ok(())
    }

    /// Resolve the entity named by one side of a hit, creating it on first mention
    fn register(&mut self, kind: EntityKind, side: &HitSide) -> Result<String> {
        let genome = self
            .genomes
            .get_mut(&side.genome)
            .ok_or_else(|| GenomicsError::UnknownGenome(side.genome.clone()))?;
        genome.add_contig(&side.contig);

        let (entity, _) = genome
            .entities_mut(kind)
            .find_or_create(
                kind,
                &side.genome,
                &side.contig,
                &side.header,
                &side.annotation,
                side.gene_call.as_deref(),
            )?;
        Ok(entity.identifier.clone())
    }

    fn entity_mut(
        &mut self,
        kind: EntityKind,
        side: &HitSide,
        identifier: &str,
    ) -> Result<&mut Entity> {
        self.genomes
            .get_mut(&side.genome)
            .and_then(|g| g.entities_mut(kind).get_mut(identifier))
            .ok_or_else(|| GenomicsError::Invariant(format!("{} vanished after registration", identifier)))
    }

    /// Link two entities of one genome as paralogs, by header token.
    ///
    /// Returns whether the edge was new. An edge already recorded is a no-op.
    pub fn add_paralog(&mut self, genome: &str, kind: EntityKind, query: &str, subject: &str) -> Result<bool> {
        if query == subject {
            return Ok(false);
        }
        let genome = self
            .genomes
            .get_mut(genome)
            .ok_or_else(|| GenomicsError::UnknownGenome(genome.to_string()))?;
        genome.add_paralog(kind, query, subject)
    }

    /// Headers of a paralog record that several contigs of its genome share.
    /// Linking by header picks the first such entity.
    pub fn ambiguous_headers<'r>(&self, record: &'r ParalogRecord) -> Vec<&'r str> {
        let Some(genome) = self.genomes.get(&record.genome) else {
            return Vec::new();
        };
        let entities = genome.entities(record.kind);
        [record.query.as_str(), record.subject.as_str()]
            .into_iter()
            .filter(|header| entities.is_ambiguous_header(header))
            .collect()
    }

    pub fn add_paralog_record(&mut self, record: &ParalogRecord) -> Result<bool> {
        self.add_paralog(&record.genome, record.kind, &record.query, &record.subject)
    }

    /// Identifier uniqueness across all genomes; header clashes are only reported
    pub fn check_unique(&self) -> Result<()> {
        for genome in self.genomes.values() {
            genome.check_unique()?;
            for kind in EntityKind::ALL {
                for header in genome.entities(kind).duplicate_headers() {
                    self.verbosity.warning(format_args!(
                        "{} header {} is not unique in genome {}",
                        kind, header, genome.name
                    ));
                }
            }
        }
        Ok(())
    }

    /// Reference entities whose mutual-hit count differs from the number of other genomes
    pub fn check_mutual_best_hits(&self) -> Vec<String> {
        let expected = self.genome_count().saturating_sub(1);
        let mut incomplete = Vec::new();
        if let Some(reference) = self.reference() {
            for kind in EntityKind::ALL {
                for entity in reference.entities(kind).iter() {
                    if entity.mutual_best_hits.len() != expected {
                        self.verbosity.message(format_args!(
                            "{} {} has {} mutual best hits, expected {}",
                            kind,
                            entity.identifier,
                            entity.mutual_best_hits.len(),
                            expected
                        ));
                        incomplete.push(entity.identifier.clone());
                    }
                }
            }
        }
        incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Side;
    use pretty_assertions::assert_eq;

    fn side(genome: &str, contig: &str, header: &str) -> HitSide {
        HitSide {
            genome: genome.to_string(),
            contig: contig.to_string(),
            header: header.to_string(),
            ..Default::default()
        }
    }

    fn hit(kind: HitKind, query: Side, one: HitSide, two: HitSide) -> HitRecord {
        HitRecord {
            line: 1,
            flavor: EntityKind::Gene,
            kind,
            query,
            sides: [one, two],
        }
    }

    fn store_with(names: &[&str]) -> GenomeStore {
        let mut store = GenomeStore::new(Verbosity::quiet());
        for name in names {
            store.get_or_create_genome(name, &format!("{}.fasta", name));
        }
        store
    }

    #[test]
    fn test_first_genome_is_reference() {
        let mut store = store_with(&["B", "A"]);
        store.get_or_create_genome("B", "B.fasta");
        assert_eq!(store.genome_count(), 2);
        assert_eq!(store.reference().unwrap().name, "B");
        assert!(!store.genome("A").unwrap().is_reference);
    }

    #[test]
    fn test_mutual_hit_links_both_sides() {
        let mut store = store_with(&["A", "B"]);
        store
            .add_hit(&hit(HitKind::Mutual, Side::One, side("A", "c1", "cds1"), side("B", "c1", "cds2")))
            .unwrap();

        let a = store.genome("A").unwrap().genes().get("A:c1:cds1").unwrap();
        let b = store.genome("B").unwrap().genes().get("B:c1:cds2").unwrap();
        assert_eq!(a.mutual_best_hits, vec!["B:c1:cds2".to_string()]);
        assert_eq!(b.mutual_best_hits, vec!["A:c1:cds1".to_string()]);
        assert!(!a.is_loner && !b.is_loner);
        assert_eq!(store.genome("B").unwrap().contigs, vec!["c1"]);
    }

    #[test]
    fn test_singular_hit_only_updates_query() {
        let mut store = store_with(&["A", "B"]);
        store
            .add_hit(&hit(HitKind::Singular, Side::Two, side("A", "c1", "cds1"), side("B", "c1", "cds2")))
            .unwrap();

        let a = store.genome("A").unwrap().genes().get("A:c1:cds1").unwrap();
        let b = store.genome("B").unwrap().genes().get("B:c1:cds2").unwrap();
        assert!(a.is_loner);
        assert_eq!(b.singular_best_hits, vec!["A:c1:cds1".to_string()]);
        assert!(!b.is_loner);
    }

    #[test]
    fn test_loner_hit_records_other_genome() {
        let mut store = store_with(&["A", "B"]);
        store
            .add_hit(&hit(HitKind::Loner, Side::One, side("A", "C1", "cds7"), side("B", "", "")))
            .unwrap();

        let a = store.genome("A").unwrap().genes().get("A:C1:cds7").unwrap();
        assert!(a.is_loner);
        assert_eq!(a.loner_with, vec!["B".to_string()]);
        assert_eq!(store.genome("B").unwrap().genes().len(), 0);
    }

    #[test]
    fn test_unknown_genome_is_dropped() {
        let mut store = store_with(&["A"]);
        let err = store
            .add_hit(&hit(HitKind::Mutual, Side::One, side("A", "c1", "cds1"), side("Z", "c1", "cds1")))
            .unwrap_err();
        assert!(matches!(err, GenomicsError::UnknownGenome(ref name) if name == "Z"));
        assert_eq!(store.genome_count(), 1);
        assert!(store.genome("A").unwrap().genes().is_empty());
    }

    #[test]
    fn test_ambiguous_paralog_headers() {
        let mut store = store_with(&["A", "B"]);
        for contig in ["c1", "c2"] {
            store
                .add_hit(&hit(HitKind::Loner, Side::One, side("A", contig, "cds1"), side("B", "", "")))
                .unwrap();
        }
        store
            .add_hit(&hit(HitKind::Loner, Side::One, side("A", "c1", "cds2"), side("B", "", "")))
            .unwrap();

        let record = ParalogRecord {
            line: 4,
            genome: "A".to_string(),
            kind: EntityKind::Gene,
            query: "cds2".to_string(),
            subject: "cds1".to_string(),
            coverage: None,
        };
        assert_eq!(store.ambiguous_headers(&record), vec!["cds1"]);
        assert!(store.add_paralog_record(&record).unwrap());
        let cds2 = store.genome("A").unwrap().genes().get("A:c1:cds2").unwrap();
        assert_eq!(cds2.paralogs, vec!["A:c1:cds1".to_string()]);

        let elsewhere = ParalogRecord {
            genome: "Z".to_string(),
            ..record
        };
        assert!(store.ambiguous_headers(&elsewhere).is_empty());
    }

    #[test]
    fn test_paralog_edges_are_idempotent() {
        let mut store = store_with(&["A", "B"]);
        for header in ["cds1", "cds2"] {
            store
                .add_hit(&hit(HitKind::Loner, Side::One, side("A", "c1", header), side("B", "", "")))
                .unwrap();
        }

        assert!(store.add_paralog("A", EntityKind::Gene, "cds1", "cds2").unwrap());
        assert!(!store.add_paralog("A", EntityKind::Gene, "cds1", "cds2").unwrap());
        assert!(store.add_paralog("Q", EntityKind::Gene, "cds1", "cds2").is_err());

        let gene = store.genome("A").unwrap().genes().get("A:c1:cds1").unwrap();
        assert_eq!(gene.paralogs.len(), 1);
    }

    #[test]
    fn test_check_mutual_best_hits_lists_incomplete() {
        let mut store = store_with(&["A", "B", "C"]);
        store
            .add_hit(&hit(HitKind::Mutual, Side::One, side("A", "c1", "cds1"), side("B", "c1", "cds1")))
            .unwrap();
        assert_eq!(store.check_mutual_best_hits(), vec!["A:c1:cds1".to_string()]);
        assert!(store.check_unique().is_ok());
    }
}
