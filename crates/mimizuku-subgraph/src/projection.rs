//! Projection of an individual/class closure onto a fresh ontology
//!
//! The closure decides which individuals and classes are in. Axioms follow:
//! assertions first, terminology over the vocabulary the assertions induce,
//! annotations over the resulting signature, and finally declarations.

use mimizuku_core::{
    AnnotationSubject, AnnotationValue, Axiom, AxiomCategory, AxiomKind, Class, Entity, EntityKind,
    Individual, Iri, Signature,
};
use mimizuku_store::Ontology;
use std::collections::BTreeSet;
use tracing::info;

use crate::config::ExtractionConfig;
use crate::result::FilterResult;

/// Individuals and classes selected by an extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Closure {
    pub individuals: BTreeSet<Individual>,
    pub classes: BTreeSet<Class>,
}

impl Closure {
    pub fn new(individuals: BTreeSet<Individual>, classes: BTreeSet<Class>) -> Self {
        Self {
            individuals,
            classes,
        }
    }

    fn contains_entity(&self, entity: &Entity) -> bool {
        match entity.as_individual() {
            Some(individual) => self.individuals.contains(&individual),
            None => false,
        }
    }
}

pub fn project(source: &Ontology, closure: &Closure, config: &ExtractionConfig) -> FilterResult {
    let axioms: Vec<&Axiom> = source.get_axioms().collect();
    let mut keep = vec![false; axioms.len()];

    // Assertions: every individual they mention must be in the closure, so
    // an edge is kept only when both endpoints are.
    let mut vocabulary: BTreeSet<Entity> = closure
        .classes
        .iter()
        .cloned()
        .map(Entity::Class)
        .collect();
    for (i, axiom) in axioms.iter().enumerate() {
        if axiom.category() != AxiomCategory::Assertion {
            continue;
        }
        let signature = axiom.signature();
        let individuals_in = signature
            .iter()
            .filter(|e| e.kind().is_individual())
            .all(|e| closure.contains_entity(e));
        if individuals_in {
            keep[i] = true;
            vocabulary.extend(signature);
        }
    }

    // Terminology over the induced vocabulary.
    for (i, axiom) in axioms.iter().enumerate() {
        if axiom.is_tbox() && within_vocabulary(axiom, &vocabulary) {
            keep[i] = true;
        }
    }

    let mut signature: BTreeSet<Entity> = BTreeSet::new();
    for (i, axiom) in axioms.iter().enumerate() {
        if keep[i] {
            axiom.collect_entities(&mut signature);
        }
    }
    signature.extend(closure.individuals.iter().map(|i| i.to_entity()));
    signature.extend(closure.classes.iter().cloned().map(Entity::Class));

    // Annotations whose subject is part of the signature. An anonymous
    // value is an individual in its own right and has to be in the closure.
    let subject_iris: BTreeSet<&Iri> = signature.iter().filter_map(|e| e.iri()).collect();
    let mut used_annotation_properties = BTreeSet::new();
    for (i, axiom) in axioms.iter().enumerate() {
        if let Some((subject, annotation)) = axiom.as_annotation_assertion() {
            let subject_in = match subject {
                AnnotationSubject::Iri(iri) => subject_iris.contains(iri),
                AnnotationSubject::Anonymous(a) => {
                    signature.contains(&Entity::AnonymousIndividual(a.clone()))
                }
            };
            let value_in = match &annotation.value {
                AnnotationValue::Anonymous(a) => {
                    closure.individuals.contains(&Individual::Anonymous(a.clone()))
                }
                AnnotationValue::Iri(_) | AnnotationValue::Literal(_) => true,
            };
            if subject_in && value_in {
                keep[i] = true;
                used_annotation_properties.insert(Entity::AnnotationProperty(annotation.property.clone()));
            }
        }
    }
    for (i, axiom) in axioms.iter().enumerate() {
        let is_property_axiom = axiom.category() == AxiomCategory::Annotation
            && axiom.kind() != AxiomKind::AnnotationAssertion;
        if is_property_axiom && axiom.signature().is_subset(&used_annotation_properties) {
            keep[i] = true;
        }
    }
    for (i, axiom) in axioms.iter().enumerate() {
        if keep[i] && axiom.category() == AxiomCategory::Annotation {
            axiom.collect_entities(&mut signature);
        }
    }

    // Declarations for every named, non-builtin entity of the signature.
    let declarable: BTreeSet<&Entity> = signature
        .iter()
        .filter(|e| e.kind() != EntityKind::AnonymousIndividual && !e.is_builtin())
        .collect();
    for (i, axiom) in axioms.iter().enumerate() {
        if let Some(entity) = axiom.as_declaration() {
            if declarable.contains(entity) {
                keep[i] = true;
            }
        }
    }

    let mut projected = Ontology::new();
    projected.copy_metadata_from(source);
    projected.extend(
        axioms
            .iter()
            .zip(&keep)
            .filter(|(_, keep)| **keep)
            .map(|(axiom, _)| (*axiom).clone()),
    );
    if config.synthesize_declarations {
        for entity in &declarable {
            projected.add_axiom(Axiom::Declaration((*entity).clone()));
        }
    }

    let included_iris: BTreeSet<Iri> = projected
        .get_entities()
        .filter_map(|e| e.iri())
        .cloned()
        .collect();
    let result = FilterResult {
        original_axiom_count: source.axiom_count(),
        filtered_axiom_count: projected.axiom_count(),
        individual_count: closure.individuals.len(),
        class_count: projected.get_classes().count(),
        edge_count: projected.edge_count(),
        included_iris,
        ontology: projected,
    };
    info!(
        original = result.original_axiom_count,
        filtered = result.filtered_axiom_count,
        individuals = result.individual_count,
        edges = result.edge_count,
        "subgraph projected"
    );
    result
}

/// Classes, properties and individuals of `axiom` all lie in `vocabulary`.
/// Built-in vocabulary and datatypes are always available.
fn within_vocabulary(axiom: &Axiom, vocabulary: &BTreeSet<Entity>) -> bool {
    axiom.signature().iter().all(|e| {
        e.is_builtin()
            || matches!(e.kind(), EntityKind::Datatype | EntityKind::AnnotationProperty)
            || vocabulary.contains(e)
    })
}
