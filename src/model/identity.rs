use std::collections::{HashMap, HashSet};

use super::entity::Entity;
use super::EntityKind;
use crate::{GenomicsError, Result};

/// Run-wide identifier of a gene or protein
pub fn resolve(genome: &str, contig: &str, name: &str) -> String {
    format!("{}:{}:{}", genome, contig, name)
}

/// Index embedded in a header token: `cds12/+/72/485/` gives 12
pub fn parse_cds_index(header: &str) -> Option<u32> {
    let first = header.split('/').next()?;
    let start = first.find("cds")? + "cds".len();
    first[start..].parse().ok()
}

/// Genes (or proteins) of one genome, at most one entity per identifier.
///
/// Entities keep insertion order; lookups go through the identifier and
/// header indexes.
#[derive(Debug, Clone, Default)]
pub struct EntityCollection {
    entities: Vec<Entity>,
    by_id: HashMap<String, usize>,
    by_header: HashMap<String, usize>,
}

impl EntityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn get(&self, identifier: &str) -> Option<&Entity> {
        self.by_id.get(identifier).map(|&i| &self.entities[i])
    }

    pub fn get_mut(&mut self, identifier: &str) -> Option<&mut Entity> {
        match self.by_id.get(identifier) {
            Some(&i) => Some(&mut self.entities[i]),
            None => None,
        }
    }

    /// First entity carrying this header token
    pub fn find_by_header(&self, header: &str) -> Option<&Entity> {
        self.by_header.get(header).map(|&i| &self.entities[i])
    }

    pub fn find(&self, genome: &str, contig: &str, name: &str) -> Option<&Entity> {
        self.get(&resolve(genome, contig, name))
    }

    /// Look the entity up by (contig, name); mint and register it if absent.
    ///
    /// The boolean is true when the entity was created by this call.
    pub fn find_or_create(
        &mut self,
        kind: EntityKind,
        genome: &str,
        contig: &str,
        header: &str,
        annotation: &str,
        gene_call: Option<&str>,
    ) -> Result<(&mut Entity, bool)> {
        let identifier = resolve(genome, contig, header);
        if let Some(&i) = self.by_id.get(&identifier) {
            return Ok((&mut self.entities[i], false));
        }

        let number = parse_cds_index(header).ok_or_else(|| GenomicsError::MalformedRow {
            line: 0,
            reason: format!("header token '{}' carries no cds index", header),
        })?;

        let entity = match kind {
            EntityKind::Gene => Entity::gene(genome, contig, header, number),
            EntityKind::Protein => Entity::protein(genome, contig, header, number),
        }
        .with_annotation(annotation, gene_call.map(str::to_string));

        let index = self.entities.len();
        self.by_id.insert(identifier, index);
        self.by_header.entry(header.to_string()).or_insert(index);
        self.entities.push(entity);
        Ok((&mut self.entities[index], true))
    }

    /// Whether more than one entity (on different contigs) carries this header
    pub fn is_ambiguous_header(&self, header: &str) -> bool {
        self.entities.iter().filter(|e| e.header == header).nth(1).is_some()
    }

    /// Header tokens shared by more than one entity (possible across contigs)
    pub fn duplicate_headers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for entity in &self.entities {
            if !seen.insert(entity.header.as_str()) && !duplicates.contains(&entity.header.as_str()) {
                duplicates.push(entity.header.as_str());
            }
        }
        duplicates
    }

    /// Every identifier maps to exactly one entity, and that entity carries it
    pub fn check_unique(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (i, entity) in self.entities.iter().enumerate() {
            if !seen.insert(entity.identifier.as_str()) {
                return Err(GenomicsError::Invariant(format!(
                    "identifier {} is held by more than one entity",
                    entity.identifier
                )));
            }
            if self.by_id.get(&entity.identifier) != Some(&i) {
                return Err(GenomicsError::Invariant(format!(
                    "identifier {} is not indexed to its entity",
                    entity.identifier
                )));
            }
        }
        if self.by_id.len() != self.entities.len() {
            return Err(GenomicsError::Invariant(format!(
                "{} identifiers indexed for {} entities",
                self.by_id.len(),
                self.entities.len()
            )));
        }
        Ok(())
    }
}
