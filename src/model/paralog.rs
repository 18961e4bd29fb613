use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

use super::identity::EntityCollection;
use super::EntityKind;

/// Genes (or proteins) of one genome linked through paralog edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParalogSet {
    pub kind: EntityKind,
    pub members: Vec<String>,
}

impl ParalogSet {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Connected groups over the paralog edges of a collection.
///
/// Groups appear in the order of their first member in the collection, and
/// members in breadth-first order from there. Entities without paralogs do
/// not form a group.
pub fn group_paralogs(entities: &EntityCollection, kind: EntityKind) -> Vec<ParalogSet> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for entity in entities.iter() {
        for paralog in &entity.paralogs {
            adjacency.entry(entity.identifier.as_str()).or_default().push(paralog);
            adjacency.entry(paralog.as_str()).or_default().push(&entity.identifier);
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut sets = Vec::new();
    for entity in entities.iter() {
        let start = entity.identifier.as_str();
        if visited.contains(start) || !adjacency.contains_key(start) {
            continue;
        }

        let mut members = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited.insert(start);
        while let Some(id) = queue.pop_front() {
            members.push(id.to_string());
            for &next in adjacency.get(id).into_iter().flatten() {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        sets.push(ParalogSet { kind, members });
    }
    sets
}
