//! Batched ontology mutations

use mimizuku_core::Axiom;
use serde::{Deserialize, Serialize};

/// One step of a change batch passed to [`crate::Ontology::apply_changes`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OntologyChange {
    AddAxiom(Axiom),
    RemoveAxiom(Axiom),
}

impl OntologyChange {
    pub fn add(axiom: Axiom) -> Self {
        OntologyChange::AddAxiom(axiom)
    }

    pub fn remove(axiom: Axiom) -> Self {
        OntologyChange::RemoveAxiom(axiom)
    }

    pub fn axiom(&self) -> &Axiom {
        match self {
            OntologyChange::AddAxiom(a) | OntologyChange::RemoveAxiom(a) => a,
        }
    }

    pub fn is_addition(&self) -> bool {
        matches!(self, OntologyChange::AddAxiom(_))
    }
}
