use serde::Serialize;

use super::identity::resolve;
use super::EntityKind;

/// A gene or protein of one genome, with its accumulated cross-genome hits.
///
/// Every entity starts out as a loner; the first mutual or singular best hit
/// clears the flag for good.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// `genome:contig:header`, unique within a run
    pub identifier: String,
    /// Header token assigned by the comparison tool, e.g. `cds5/+/72/485/`;
    /// it doubles as the entity's short name
    pub header: String,
    /// Index taken from the `cds<N>` prefix of the header
    pub number: u32,
    /// First element of the annotation list, when one was given
    pub gene_call: Option<String>,
    pub genome: String,
    pub contig: String,
    pub annotation: String,
    pub is_loner: bool,
    pub mutual_best_hits: Vec<String>,
    pub singular_best_hits: Vec<String>,
    /// Genomes against which this entity has no best hit
    pub loner_with: Vec<String>,
    /// Identifiers of paralogs within the same genome
    pub paralogs: Vec<String>,
}

impl Entity {
    pub fn gene(genome: &str, contig: &str, header: &str, number: u32) -> Self {
        Self::new(EntityKind::Gene, genome, contig, header, number)
    }

    pub fn protein(genome: &str, contig: &str, header: &str, number: u32) -> Self {
        Self::new(EntityKind::Protein, genome, contig, header, number)
    }

    pub fn new(kind: EntityKind, genome: &str, contig: &str, header: &str, number: u32) -> Self {
        Self {
            kind,
            identifier: resolve(genome, contig, header),
            header: header.to_string(),
            number,
            gene_call: None,
            genome: genome.to_string(),
            contig: contig.to_string(),
            annotation: String::new(),
            is_loner: true,
            mutual_best_hits: Vec::new(),
            singular_best_hits: Vec::new(),
            loner_with: Vec::new(),
            paralogs: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: &str, gene_call: Option<String>) -> Self {
        self.annotation = annotation.to_string();
        self.gene_call = gene_call;
        self
    }

    /// Returns false if the partner was already recorded
    pub fn add_mutual_best_hit(&mut self, partner: &str) -> bool {
        self.is_loner = false;
        push_unique(&mut self.mutual_best_hits, partner)
    }

    pub fn add_singular_best_hit(&mut self, partner: &str) -> bool {
        self.is_loner = false;
        push_unique(&mut self.singular_best_hits, partner)
    }

    pub fn add_loner_genome(&mut self, genome: &str) -> bool {
        push_unique(&mut self.loner_with, genome)
    }

    pub fn add_paralog(&mut self, identifier: &str) -> bool {
        if identifier == self.identifier {
            return false;
        }
        push_unique(&mut self.paralogs, identifier)
    }

    /// Mutual then singular partners, de-duplicated in first-seen order
    pub fn correspondences(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for hit in self.mutual_best_hits.iter().chain(&self.singular_best_hits) {
            if !seen.contains(&hit.as_str()) {
                seen.push(hit);
            }
        }
        seen
    }

    /// Loner status recomputed from the hit lists
    pub fn verify_loner(&self) -> bool {
        self.mutual_best_hits.is_empty() && self.singular_best_hits.is_empty()
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    if list.iter().any(|v| v == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_factories_set_kind_and_identifier() {
        let gene = Entity::gene("Lambda", "Lambda_contig_1", "cds5/+/72/485/", 5);
        assert_eq!(gene.kind, EntityKind::Gene);
        assert_eq!(gene.identifier, "Lambda:Lambda_contig_1:cds5/+/72/485/");
        assert!(gene.is_loner);

        let protein = Entity::protein("Lambda", "Lambda_contig_1", "cds5/+/72/485/", 5);
        assert_eq!(protein.kind, EntityKind::Protein);
        assert_eq!(protein.identifier, gene.identifier);
    }

    #[test]
    fn test_header_is_the_only_short_name() {
        let gene = Entity::gene("Lambda", "c1", "cds5/+/72/485/", 5);
        assert_eq!(gene.header, "cds5/+/72/485/");
        assert!(gene.identifier.ends_with(&gene.header));

        let value = serde_json::to_value(&gene).unwrap();
        assert_eq!(value["header"], "cds5/+/72/485/");
        assert!(value.get("name").is_none());
    }

    #[test]
    fn test_hits_clear_loner_flag() {
        let mut gene = Entity::gene("A", "c1", "cds1", 1);
        assert!(gene.verify_loner());

        gene.add_singular_best_hit("B:c1:cds3");
        assert!(!gene.is_loner);
        assert_eq!(gene.is_loner, gene.verify_loner());
    }

    #[test]
    fn test_loner_genome_does_not_clear_flag() {
        let mut gene = Entity::gene("A", "c1", "cds7", 7);
        gene.add_loner_genome("B");
        gene.add_loner_genome("B");
        assert!(gene.is_loner);
        assert_eq!(gene.loner_with, vec!["B".to_string()]);
    }

    #[test]
    fn test_correspondences_are_deduplicated_in_order() {
        let mut gene = Entity::gene("A", "c1", "cds1", 1);
        gene.add_mutual_best_hit("B:c1:cds1");
        gene.add_mutual_best_hit("C:c1:cds2");
        gene.add_singular_best_hit("C:c1:cds2");
        gene.add_singular_best_hit("D:c1:cds9");

        assert_eq!(gene.correspondences(), vec!["B:c1:cds1", "C:c1:cds2", "D:c1:cds9"]);
    }

    #[test]
    fn test_paralog_rejects_self_and_duplicates() {
        let mut gene = Entity::gene("A", "c1", "cds1", 1);
        assert!(!gene.add_paralog("A:c1:cds1"));
        assert!(gene.add_paralog("A:c1:cds4"));
        assert!(!gene.add_paralog("A:c1:cds4"));
        assert_eq!(gene.paralogs.len(), 1);
    }

    proptest::proptest! {
        #[test]
        fn prop_correspondences_unique_and_mutual_first(
            mutual in proptest::collection::vec(0u8..6, 0..12),
            singular in proptest::collection::vec(0u8..6, 0..12),
        ) {
            let mut gene = Entity::gene("A", "c1", "cds1", 1);
            for m in &mutual {
                gene.add_mutual_best_hit(&format!("B:c1:cds{}", m));
            }
            for s in &singular {
                gene.add_singular_best_hit(&format!("B:c1:cds{}", s));
            }

            let found = gene.correspondences();
            let mut unique = found.clone();
            unique.sort_unstable();
            unique.dedup();
            proptest::prop_assert_eq!(unique.len(), found.len());
            proptest::prop_assert_eq!(&found[..gene.mutual_best_hits.len()], &gene.mutual_best_hits[..]);
            proptest::prop_assert_eq!(gene.is_loner, mutual.is_empty() && singular.is_empty());
        }
    }
}
