//! Secondary indices over the axiom arena
//!
//! Every index holds axiom ids or entities, never axioms. Insert and remove
//! are exact mirrors of each other so that removing an axiom restores the
//! index to the state it had before the axiom was added.

use mimizuku_core::{
    Axiom, AxiomKind, Class, DataProperty, Entity, EntityKind, Individual, Literal,
    ObjectProperty, Signature,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Arena key of a stored axiom. Ids grow monotonically, so id order is
/// insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxiomId(pub(crate) u64);

impl AxiomId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A positive object property assertion seen as a directed graph edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub axiom: AxiomId,
    pub property: ObjectProperty,
    pub source: Individual,
    pub target: Individual,
}

impl Edge {
    /// The endpoint opposite to `from`.
    pub fn other(&self, from: &Individual) -> &Individual {
        if &self.source == from {
            &self.target
        } else {
            &self.source
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct AxiomIndex {
    pub by_kind: HashMap<AxiomKind, BTreeSet<AxiomId>>,
    pub entity_refs: BTreeMap<Entity, BTreeSet<AxiomId>>,
    pub entities_by_kind: HashMap<EntityKind, BTreeSet<Entity>>,

    pub class_instances: HashMap<Class, BTreeSet<Individual>>,
    pub individual_classes: HashMap<Individual, BTreeSet<Class>>,

    pub object_property_assertions: HashMap<ObjectProperty, BTreeSet<AxiomId>>,
    pub outgoing: HashMap<Individual, Vec<Edge>>,
    pub incoming: HashMap<Individual, Vec<Edge>>,
    pub object_value_subjects: HashMap<(ObjectProperty, Individual), BTreeSet<Individual>>,

    pub data_property_assertions: HashMap<DataProperty, BTreeSet<AxiomId>>,
    pub data_values: HashMap<(Individual, DataProperty), BTreeSet<AxiomId>>,
    pub data_value_subjects: HashMap<(DataProperty, Literal), BTreeSet<Individual>>,

    pub superclasses: HashMap<Class, BTreeSet<Class>>,
    pub subclasses: HashMap<Class, BTreeSet<Class>>,
}

impl AxiomIndex {
    pub fn insert(&mut self, id: AxiomId, axiom: &Axiom) {
        self.by_kind.entry(axiom.kind()).or_default().insert(id);

        for entity in axiom.signature() {
            let refs = self.entity_refs.entry(entity.clone()).or_default();
            if refs.is_empty() {
                self.entities_by_kind
                    .entry(entity.kind())
                    .or_default()
                    .insert(entity);
            }
            refs.insert(id);
        }

        match axiom {
            Axiom::ClassAssertion { class, individual } => {
                if let Some(class) = class.as_class() {
                    self.class_instances
                        .entry(class.clone())
                        .or_default()
                        .insert(individual.clone());
                    self.individual_classes
                        .entry(individual.clone())
                        .or_default()
                        .insert(class.clone());
                }
            }
            Axiom::ObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                self.object_property_assertions
                    .entry(property.clone())
                    .or_default()
                    .insert(id);
                let edge = Edge {
                    axiom: id,
                    property: property.clone(),
                    source: source.clone(),
                    target: target.clone(),
                };
                self.outgoing
                    .entry(source.clone())
                    .or_default()
                    .push(edge.clone());
                self.incoming.entry(target.clone()).or_default().push(edge);
                self.object_value_subjects
                    .entry((property.clone(), target.clone()))
                    .or_default()
                    .insert(source.clone());
            }
            Axiom::DataPropertyAssertion {
                property,
                source,
                target,
            } => {
                self.data_property_assertions
                    .entry(property.clone())
                    .or_default()
                    .insert(id);
                self.data_values
                    .entry((source.clone(), property.clone()))
                    .or_default()
                    .insert(id);
                self.data_value_subjects
                    .entry((property.clone(), target.clone()))
                    .or_default()
                    .insert(source.clone());
            }
            Axiom::SubClassOf { .. } => {
                if let Some((sub, sup)) = axiom.as_named_sub_class_of() {
                    self.superclasses
                        .entry(sub.clone())
                        .or_default()
                        .insert(sup.clone());
                    self.subclasses
                        .entry(sup.clone())
                        .or_default()
                        .insert(sub.clone());
                }
            }
            _ => {}
        }
    }

    pub fn remove(&mut self, id: AxiomId, axiom: &Axiom) {
        remove_from(&mut self.by_kind, &axiom.kind(), &id);

        for entity in axiom.signature() {
            let now_unreferenced = match self.entity_refs.get_mut(&entity) {
                Some(refs) => {
                    refs.remove(&id);
                    refs.is_empty()
                }
                None => false,
            };
            if now_unreferenced {
                self.entity_refs.remove(&entity);
                remove_from(&mut self.entities_by_kind, &entity.kind(), &entity);
            }
        }

        match axiom {
            Axiom::ClassAssertion { class, individual } => {
                if let Some(class) = class.as_class() {
                    remove_from(&mut self.class_instances, class, individual);
                    remove_from(&mut self.individual_classes, individual, class);
                }
            }
            Axiom::ObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                remove_from(&mut self.object_property_assertions, property, &id);
                remove_edge(&mut self.outgoing, source, id);
                remove_edge(&mut self.incoming, target, id);
                remove_from(
                    &mut self.object_value_subjects,
                    &(property.clone(), target.clone()),
                    source,
                );
            }
            Axiom::DataPropertyAssertion {
                property,
                source,
                target,
            } => {
                remove_from(&mut self.data_property_assertions, property, &id);
                remove_from(
                    &mut self.data_values,
                    &(source.clone(), property.clone()),
                    &id,
                );
                remove_from(
                    &mut self.data_value_subjects,
                    &(property.clone(), target.clone()),
                    source,
                );
            }
            Axiom::SubClassOf { .. } => {
                if let Some((sub, sup)) = axiom.as_named_sub_class_of() {
                    remove_from(&mut self.superclasses, sub, sup);
                    remove_from(&mut self.subclasses, sup, sub);
                }
            }
            _ => {}
        }
    }
}

fn remove_from<K, V>(map: &mut HashMap<K, BTreeSet<V>>, key: &K, value: &V)
where
    K: std::hash::Hash + Eq,
    V: Ord,
{
    if let Some(set) = map.get_mut(key) {
        set.remove(value);
        if set.is_empty() {
            map.remove(key);
        }
    }
}

fn remove_edge(map: &mut HashMap<Individual, Vec<Edge>>, node: &Individual, id: AxiomId) {
    if let Some(edges) = map.get_mut(node) {
        edges.retain(|e| e.axiom != id);
        if edges.is_empty() {
            map.remove(node);
        }
    }
}
