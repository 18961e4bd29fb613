use super::identity::EntityCollection;
use super::paralog::{group_paralogs, ParalogSet};
use super::EntityKind;
use crate::Result;

#[derive(Debug, Clone)]
pub struct Genome {
    pub name: String,
    pub species: String,
    /// Fasta file the genome was read from, as named in the comparison log
    pub file: String,
    pub is_reference: bool,
    /// Contig names in first-seen order
    pub contigs: Vec<String>,
    genes: EntityCollection,
    proteins: EntityCollection,
}

impl Genome {
    pub fn new(name: &str, file: &str) -> Self {
        Self {
            name: name.to_string(),
            species: String::new(),
            file: file.to_string(),
            is_reference: false,
            contigs: Vec::new(),
            genes: EntityCollection::new(),
            proteins: EntityCollection::new(),
        }
    }

    pub fn genes(&self) -> &EntityCollection {
        &self.genes
    }

    pub fn proteins(&self) -> &EntityCollection {
        &self.proteins
    }

    pub fn entities(&self, kind: EntityKind) -> &EntityCollection {
        match kind {
            EntityKind::Gene => &self.genes,
            EntityKind::Protein => &self.proteins,
        }
    }

    pub fn entities_mut(&mut self, kind: EntityKind) -> &mut EntityCollection {
        match kind {
            EntityKind::Gene => &mut self.genes,
            EntityKind::Protein => &mut self.proteins,
        }
    }

    pub fn add_contig(&mut self, contig: &str) {
        if !contig.is_empty() && !self.contigs.iter().any(|c| c == contig) {
            self.contigs.push(contig.to_string());
        }
    }

    /// Link `subject` as a paralog of `query`, both named by header token.
    ///
    /// Returns `Ok(false)` when the edge was already present. Fails when
    /// either header names no entity of this genome.
    pub fn add_paralog(&mut self, kind: EntityKind, query: &str, subject: &str) -> Result<bool> {
        let entities = self.entities_mut(kind);
        let subject_id = entities
            .find_by_header(subject)
            .map(|e| e.identifier.clone())
            .ok_or_else(|| missing_header(kind, subject))?;
        let query_id = entities
            .find_by_header(query)
            .map(|e| e.identifier.clone())
            .ok_or_else(|| missing_header(kind, query))?;

        match entities.get_mut(&query_id) {
            Some(entity) => Ok(entity.add_paralog(&subject_id)),
            None => Err(missing_header(kind, query)),
        }
    }

    pub fn paralog_sets(&self, kind: EntityKind) -> Vec<ParalogSet> {
        group_paralogs(self.entities(kind), kind)
    }

    pub fn check_unique(&self) -> Result<()> {
        self.genes.check_unique()?;
        self.proteins.check_unique()
    }
}

fn missing_header(kind: EntityKind, header: &str) -> crate::GenomicsError {
    crate::GenomicsError::UnknownEntity(format!("{} with header '{}'", kind, header))
}
