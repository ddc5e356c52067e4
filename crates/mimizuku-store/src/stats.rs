//! Ontology statistics

use mimizuku_core::{AxiomKind, EntityKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts read off the store indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyStatistics {
    pub axiom_count: usize,
    pub tbox_axiom_count: usize,
    pub abox_axiom_count: usize,
    pub class_count: usize,
    pub object_property_count: usize,
    pub data_property_count: usize,
    pub annotation_property_count: usize,
    pub datatype_count: usize,
    /// Named and anonymous individuals together.
    pub individual_count: usize,
    pub entities_by_kind: BTreeMap<EntityKind, usize>,
    pub axioms_by_kind: BTreeMap<AxiomKind, usize>,
}

impl OntologyStatistics {
    pub fn entity_count(&self, kind: EntityKind) -> usize {
        self.entities_by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn axiom_count_of(&self, kind: AxiomKind) -> usize {
        self.axioms_by_kind.get(&kind).copied().unwrap_or(0)
    }
}
