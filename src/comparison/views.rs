use serde::Serialize;

use crate::model::{EntityKind, Genome, GenomeStore, ParalogSet};

/// One reference entity with a mutual best hit in every other genome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoreSet {
    /// 1-based, in reference entity order
    pub number: usize,
    pub identifier: String,
    pub partners: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correspondence {
    pub identifier: String,
    /// Mutual partners first, then singular partners not already listed
    pub partners: Vec<String>,
}

/// Derived listings for one entity kind of the reference genome
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KindViews {
    pub core: Vec<CoreSet>,
    pub correspondences: Vec<Correspondence>,
    pub loners: Vec<String>,
    pub paralog_sets: Vec<ParalogSet>,
}

impl KindViews {
    fn compute(reference: &Genome, kind: EntityKind, genome_count: usize) -> Self {
        let expected = genome_count.saturating_sub(1);
        let entities = reference.entities(kind);

        let mut views = KindViews::default();
        for entity in entities.iter() {
            if genome_count > 1 && entity.mutual_best_hits.len() == expected {
                views.core.push(CoreSet {
                    number: views.core.len() + 1,
                    identifier: entity.identifier.clone(),
                    partners: entity.mutual_best_hits.clone(),
                });
            }
            views.correspondences.push(Correspondence {
                identifier: entity.identifier.clone(),
                partners: entity.correspondences().into_iter().map(str::to_string).collect(),
            });
            if entity.is_loner {
                views.loners.push(entity.identifier.clone());
            }
        }
        views.paralog_sets = reference.paralog_sets(kind);
        views
    }

    pub fn get(&self, identifier: &str) -> Option<&Correspondence> {
        self.correspondences.iter().find(|c| c.identifier == identifier)
    }
}

/// Cross-genome views over the reference genome, genes and proteins apart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonViews {
    pub reference: Option<String>,
    pub genome_count: usize,
    pub genes: KindViews,
    pub proteins: KindViews,
}

impl ComparisonViews {
    pub fn compute(store: &GenomeStore) -> Self {
        let genome_count = store.genome_count();
        match store.reference() {
            Some(reference) => Self {
                reference: Some(reference.name.clone()),
                genome_count,
                genes: KindViews::compute(reference, EntityKind::Gene, genome_count),
                proteins: KindViews::compute(reference, EntityKind::Protein, genome_count),
            },
            None => Self {
                genome_count,
                ..Default::default()
            },
        }
    }

    pub fn kind(&self, kind: EntityKind) -> &KindViews {
        match kind {
            EntityKind::Gene => &self.genes,
            EntityKind::Protein => &self.proteins,
        }
    }
}
