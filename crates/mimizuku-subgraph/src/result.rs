//! Extraction results

use mimizuku_core::{Individual, Iri};
use mimizuku_store::{Edge, Ontology};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A projected ontology together with the counts describing it.
#[derive(Debug, Clone)]
pub struct FilterResult {
    pub ontology: Ontology,
    pub original_axiom_count: usize,
    pub filtered_axiom_count: usize,
    /// Individuals of the extracted closure.
    pub individual_count: usize,
    pub class_count: usize,
    /// Object property assertions kept.
    pub edge_count: usize,
    /// IRIs of every named entity in the projection.
    pub included_iris: BTreeSet<Iri>,
}

impl FilterResult {
    pub fn is_empty(&self) -> bool {
        self.ontology.is_empty()
    }

    pub fn contains_iri(&self, iri: &Iri) -> bool {
        self.included_iris.contains(iri)
    }

    pub fn summary(&self) -> FilterSummary {
        FilterSummary {
            original_axiom_count: self.original_axiom_count,
            filtered_axiom_count: self.filtered_axiom_count,
            individual_count: self.individual_count,
            class_count: self.class_count,
            edge_count: self.edge_count,
            included_iris: self.included_iris.iter().map(|i| i.full().to_string()).collect(),
        }
    }
}

/// Serializable counts of a [`FilterResult`], without the ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub original_axiom_count: usize,
    pub filtered_axiom_count: usize,
    pub individual_count: usize,
    pub class_count: usize,
    pub edge_count: usize,
    pub included_iris: Vec<String>,
}

/// Shortest path between two individuals. Empty when none exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPath {
    /// Nodes from source to target inclusive.
    pub individuals: Vec<Individual>,
    /// `edges[i]` connects `individuals[i]` and `individuals[i + 1]`.
    pub edges: Vec<Edge>,
}

impl ExtractedPath {
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn source(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    pub fn target(&self) -> Option<&Individual> {
        self.individuals.last()
    }
}
