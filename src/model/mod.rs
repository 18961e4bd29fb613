//! In-memory genome model built from pairwise comparison results.
//!
//! A [`GenomeStore`] owns every [`Genome`], and each genome owns its gene and
//! protein [`Entity`] values. Entities are addressed by their identifier
//! (`genome:contig:name`); partner lists hold identifiers, never references,
//! so the store is the single owner of all model data.

pub mod entity;
pub mod genome;
pub mod identity;
pub mod paralog;
pub mod store;

pub use entity::Entity;
pub use genome::Genome;
pub use identity::{parse_cds_index, resolve, EntityCollection};
pub use paralog::ParalogSet;
pub use store::GenomeStore;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Gene,
    Protein,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Gene, EntityKind::Protein];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Gene => "gene",
            EntityKind::Protein => "protein",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
