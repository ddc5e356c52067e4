//! The ontology axiom store

use mimizuku_core::{
    Annotation, AnnotationProperty, Axiom, AxiomKind, Class, DataProperty, Datatype, Entity,
    EntityKind, Individual, Iri, Literal, NamedIndividual, ObjectProperty,
    ObjectPropertyExpression, PrefixMapping,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::change::OntologyChange;
use crate::index::{AxiomId, AxiomIndex, Edge};
use crate::stats::OntologyStatistics;
use crate::OntologyError;

/// Ontology IRI and version IRI. Both may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OntologyId {
    pub iri: Option<Iri>,
    pub version_iri: Option<Iri>,
}

/// Set of axioms plus ontology metadata, with secondary indices kept
/// consistent on every mutation.
#[derive(Debug, Clone)]
pub struct Ontology {
    id: OntologyId,
    imports: Vec<Iri>,
    prefixes: PrefixMapping,
    annotations: Vec<Annotation>,
    next_id: u64,
    axioms: BTreeMap<AxiomId, Arc<Axiom>>,
    lookup: HashMap<Arc<Axiom>, AxiomId>,
    index: AxiomIndex,
}

impl Default for Ontology {
    fn default() -> Self {
        Self::new()
    }
}

impl Ontology {
    /// Empty ontology with the standard `owl`, `rdf`, `rdfs` and `xsd`
    /// prefixes registered.
    pub fn new() -> Self {
        Self {
            id: OntologyId::default(),
            imports: Vec::new(),
            prefixes: PrefixMapping::standard(),
            annotations: Vec::new(),
            next_id: 0,
            axioms: BTreeMap::new(),
            lookup: HashMap::new(),
            index: AxiomIndex::default(),
        }
    }

    /// Empty ontology identified by `iri`.
    pub fn with_iri<I: Into<Iri>>(iri: I) -> Self {
        let mut ontology = Self::new();
        ontology.set_iri(iri);
        ontology
    }

    // ---- metadata ----

    /// Ontology IRI and version IRI together.
    pub fn id(&self) -> &OntologyId {
        &self.id
    }

    /// The ontology IRI, if one was set.
    pub fn iri(&self) -> Option<&Iri> {
        self.id.iri.as_ref()
    }

    /// The version IRI, if one was set.
    pub fn version_iri(&self) -> Option<&Iri> {
        self.id.version_iri.as_ref()
    }

    /// Replace the ontology IRI.
    pub fn set_iri<I: Into<Iri>>(&mut self, iri: I) {
        self.id.iri = Some(iri.into());
    }

    /// Replace the version IRI.
    pub fn set_version_iri<I: Into<Iri>>(&mut self, iri: I) {
        self.id.version_iri = Some(iri.into());
    }

    /// Imported ontology IRIs in the order they were added.
    pub fn imports(&self) -> &[Iri] {
        &self.imports
    }

    /// Appends an import unless it is already listed.
    pub fn add_import<I: Into<Iri>>(&mut self, iri: I) -> bool {
        let iri = iri.into();
        if self.imports.contains(&iri) {
            return false;
        }
        self.imports.push(iri);
        true
    }

    /// Returns `false` when `iri` was not imported.
    pub fn remove_import(&mut self, iri: &Iri) -> bool {
        let before = self.imports.len();
        self.imports.retain(|i| i != iri);
        self.imports.len() != before
    }

    /// Prefixes used when the ontology is written out.
    pub fn prefixes(&self) -> &PrefixMapping {
        &self.prefixes
    }

    pub fn prefixes_mut(&mut self) -> &mut PrefixMapping {
        &mut self.prefixes
    }

    /// Annotations on the ontology itself, not on its entities.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Add an ontology annotation. Duplicates are ignored.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
    }

    /// Copy IRI, version IRI, imports, prefixes and annotations from `other`.
    pub fn copy_metadata_from(&mut self, other: &Ontology) {
        self.id = other.id.clone();
        self.imports = other.imports.clone();
        self.prefixes = other.prefixes.clone();
        self.annotations = other.annotations.clone();
    }

    // ---- mutation ----

    /// Insert an axiom. Returns `false` and leaves the store untouched when
    /// a structurally equal axiom is already present.
    pub fn add_axiom(&mut self, axiom: Axiom) -> bool {
        if self.lookup.contains_key(&axiom) {
            return false;
        }
        let id = AxiomId(self.next_id);
        self.next_id += 1;
        let axiom = Arc::new(axiom);
        self.index.insert(id, &axiom);
        debug!(axiom_id = id.value(), kind = %axiom.kind(), "axiom added");
        self.lookup.insert(axiom.clone(), id);
        self.axioms.insert(id, axiom);
        true
    }

    /// Remove a structurally equal axiom. Returns `false` when none is
    /// stored. Indices lose every entry the axiom contributed.
    pub fn remove_axiom(&mut self, axiom: &Axiom) -> bool {
        let Some(id) = self.lookup.remove(axiom) else {
            return false;
        };
        if let Some(stored) = self.axioms.remove(&id) {
            self.index.remove(id, &stored);
            debug!(axiom_id = id.value(), kind = %stored.kind(), "axiom removed");
        }
        true
    }

    /// Assert `iri` as a new named individual of `class`.
    pub fn create_individual<I: Into<Iri>>(&mut self, class: &Class, iri: I) -> NamedIndividual {
        let individual = NamedIndividual::new(iri);
        self.add_axiom(Axiom::class_assertion(class.clone(), individual.clone()));
        individual
    }

    /// Assert `DataPropertyAssertion(property, individual, value)`.
    pub fn add_data_property_assertion(
        &mut self,
        individual: &Individual,
        property: &DataProperty,
        value: Literal,
    ) -> bool {
        self.add_axiom(Axiom::data_property_assertion(
            property.clone(),
            individual.clone(),
            value,
        ))
    }

    /// Assert the edge `subject -property-> object`.
    pub fn add_object_property_assertion(
        &mut self,
        subject: &Individual,
        property: &ObjectProperty,
        object: &Individual,
    ) -> bool {
        self.add_axiom(Axiom::object_property_assertion(
            property.clone(),
            subject.clone(),
            object.clone(),
        ))
    }

    /// Apply a batch of additions and removals as one unit.
    ///
    /// The batch is checked against the store first: a removal of an axiom
    /// that is absent at that point of the batch rejects the whole batch and
    /// nothing is changed. Returns the number of changes that took effect.
    pub fn apply_changes(&mut self, changes: Vec<OntologyChange>) -> Result<usize, OntologyError> {
        let mut overlay: HashMap<&Axiom, bool> = HashMap::new();
        for change in &changes {
            let axiom = change.axiom();
            if !change.is_addition() {
                let present = overlay
                    .get(axiom)
                    .copied()
                    .unwrap_or_else(|| self.contains_axiom(axiom));
                if !present {
                    warn!(kind = %axiom.kind(), "change batch rejected: missing axiom");
                    return Err(OntologyError::MissingAxiom(format!("{:?}", axiom)));
                }
            }
            overlay.insert(axiom, change.is_addition());
        }

        let mut applied = 0;
        for change in changes {
            let effective = match change {
                OntologyChange::AddAxiom(axiom) => self.add_axiom(axiom),
                OntologyChange::RemoveAxiom(axiom) => self.remove_axiom(&axiom),
            };
            if effective {
                applied += 1;
            }
        }
        debug!(applied, "change batch applied");
        Ok(applied)
    }

    // ---- axiom queries ----

    /// All axioms in insertion order.
    pub fn get_axioms(&self) -> impl Iterator<Item = &Axiom> + '_ {
        self.axioms.values().map(|a| a.as_ref())
    }

    /// Axioms of one kind, in insertion order.
    pub fn axioms_of_kind(&self, kind: AxiomKind) -> impl Iterator<Item = &Axiom> + '_ {
        self.index
            .by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.axiom(*id))
    }

    /// Axiom stored under `id`, or `None` once it has been removed.
    pub fn axiom(&self, id: AxiomId) -> Option<&Axiom> {
        self.axioms.get(&id).map(|a| a.as_ref())
    }

    /// Arena id of a stored axiom.
    pub fn axiom_id(&self, axiom: &Axiom) -> Option<AxiomId> {
        self.lookup.get(axiom).copied()
    }

    /// Structural membership test.
    pub fn contains_axiom(&self, axiom: &Axiom) -> bool {
        self.lookup.contains_key(axiom)
    }

    /// Number of distinct axioms stored.
    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    /// No axioms. Metadata is not considered.
    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// Axioms whose signature contains `entity`, in insertion order.
    pub fn axioms_referencing(&self, entity: &Entity) -> Vec<&Axiom> {
        self.index
            .entity_refs
            .get(entity)
            .into_iter()
            .flatten()
            .filter_map(|id| self.axiom(*id))
            .collect()
    }

    // ---- entity queries ----

    /// Every entity referenced by at least one axiom, sorted.
    pub fn get_entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.index.entity_refs.keys()
    }

    /// Referenced entities of one kind, sorted.
    pub fn entities_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> + '_ {
        self.index.entities_by_kind.get(&kind).into_iter().flatten()
    }

    /// Whether any stored axiom references `entity`.
    pub fn contains_entity(&self, entity: &Entity) -> bool {
        self.index.entity_refs.contains_key(entity)
    }

    /// Classes referenced anywhere, including inside class expressions.
    pub fn get_classes(&self) -> impl Iterator<Item = &Class> + '_ {
        self.entities_of_kind(EntityKind::Class).filter_map(|e| match e {
            Entity::Class(c) => Some(c),
            _ => None,
        })
    }

    /// Named object properties, including those only used under `ObjectInverseOf`.
    pub fn get_object_properties(&self) -> impl Iterator<Item = &ObjectProperty> + '_ {
        self.entities_of_kind(EntityKind::ObjectProperty)
            .filter_map(|e| match e {
                Entity::ObjectProperty(p) => Some(p),
                _ => None,
            })
    }

    /// Referenced data properties, sorted.
    pub fn get_data_properties(&self) -> impl Iterator<Item = &DataProperty> + '_ {
        self.entities_of_kind(EntityKind::DataProperty)
            .filter_map(|e| match e {
                Entity::DataProperty(p) => Some(p),
                _ => None,
            })
    }

    /// Referenced annotation properties, sorted.
    pub fn get_annotation_properties(&self) -> impl Iterator<Item = &AnnotationProperty> + '_ {
        self.entities_of_kind(EntityKind::AnnotationProperty)
            .filter_map(|e| match e {
                Entity::AnnotationProperty(p) => Some(p),
                _ => None,
            })
    }

    /// Referenced datatypes, built-in ones included.
    pub fn get_datatypes(&self) -> impl Iterator<Item = &Datatype> + '_ {
        self.entities_of_kind(EntityKind::Datatype)
            .filter_map(|e| match e {
                Entity::Datatype(d) => Some(d),
                _ => None,
            })
    }

    /// Named individuals followed by anonymous ones, each group sorted.
    pub fn get_individuals(&self) -> Vec<Individual> {
        self.entities_of_kind(EntityKind::NamedIndividual)
            .chain(self.entities_of_kind(EntityKind::AnonymousIndividual))
            .filter_map(|e| e.as_individual())
            .collect()
    }

    /// Named plus anonymous individuals. Agrees with `get_individuals().len()`.
    pub fn individual_count(&self) -> usize {
        self.entity_count(EntityKind::NamedIndividual)
            + self.entity_count(EntityKind::AnonymousIndividual)
    }

    fn entity_count(&self, kind: EntityKind) -> usize {
        self.index
            .entities_by_kind
            .get(&kind)
            .map_or(0, |set| set.len())
    }

    /// Whether `Declaration(entity)` is stored. Use [`Self::contains_entity`]
    /// to test for mere use.
    pub fn is_declared(&self, entity: &Entity) -> bool {
        self.contains_axiom(&Axiom::Declaration(entity.clone()))
    }

    // ---- class membership ----

    /// Individuals with an asserted `ClassAssertion(class, _)`.
    pub fn get_individuals_of_class(&self, class: &Class) -> Vec<Individual> {
        self.index
            .class_instances
            .get(class)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Named classes asserted for `individual`. Complex class assertions
    /// are not included.
    pub fn get_classes_for_individual(&self, individual: &Individual) -> Vec<Class> {
        self.index
            .individual_classes
            .get(individual)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Asserted membership only; no subsumption is taken into account.
    pub fn is_instance_of(&self, individual: &Individual, class: &Class) -> bool {
        self.index
            .individual_classes
            .get(individual)
            .is_some_and(|set| set.contains(class))
    }

    // ---- property assertions ----

    /// Subjects `s` with `DataPropertyAssertion(property, s, value)`.
    pub fn search_by_data_property(&self, property: &DataProperty, value: &Literal) -> Vec<Individual> {
        self.index
            .data_value_subjects
            .get(&(property.clone(), value.clone()))
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Subjects `s` with `ObjectPropertyAssertion(property, s, target)`.
    pub fn search_by_object_property(&self, property: &ObjectProperty, target: &Individual) -> Vec<Individual> {
        self.index
            .object_value_subjects
            .get(&(property.clone(), target.clone()))
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// `ObjectPropertyAssertion` axioms using `property`, in insertion order.
    pub fn get_object_property_assertions_for_property(&self, property: &ObjectProperty) -> Vec<&Axiom> {
        self.index
            .object_property_assertions
            .get(property)
            .into_iter()
            .flatten()
            .filter_map(|id| self.axiom(*id))
            .collect()
    }

    /// `DataPropertyAssertion` axioms using `property`, in insertion order.
    pub fn get_data_property_assertions_for_property(&self, property: &DataProperty) -> Vec<&Axiom> {
        self.index
            .data_property_assertions
            .get(property)
            .into_iter()
            .flatten()
            .filter_map(|id| self.axiom(*id))
            .collect()
    }

    /// Values of `property` on `individual`, in insertion order.
    pub fn get_data_property_values(&self, individual: &Individual, property: &DataProperty) -> Vec<&Literal> {
        self.index
            .data_values
            .get(&(individual.clone(), property.clone()))
            .into_iter()
            .flatten()
            .filter_map(|id| self.axiom(*id))
            .filter_map(|a| a.as_data_property_assertion().map(|(_, _, v)| v))
            .collect()
    }

    /// Edges leaving `individual`, in assertion insertion order.
    pub fn outgoing_edges(&self, individual: &Individual) -> &[Edge] {
        self.index
            .outgoing
            .get(individual)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Edges arriving at `individual`, in assertion insertion order.
    pub fn incoming_edges(&self, individual: &Individual) -> &[Edge] {
        self.index
            .incoming
            .get(individual)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of positive object property assertions.
    pub fn edge_count(&self) -> usize {
        self.index
            .by_kind
            .get(&AxiomKind::ObjectPropertyAssertion)
            .map_or(0, |set| set.len())
    }

    // ---- class hierarchy ----

    /// Named classes `C` with `SubClassOf(class, C)` asserted. Anonymous
    /// superclass expressions are skipped.
    pub fn get_direct_superclasses(&self, class: &Class) -> Vec<Class> {
        self.index
            .superclasses
            .get(class)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Named classes `C` with `SubClassOf(C, class)` asserted.
    pub fn get_direct_subclasses(&self, class: &Class) -> Vec<Class> {
        self.index
            .subclasses
            .get(class)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    // ---- property characteristics ----

    /// `FunctionalObjectProperty(property)` is asserted.
    pub fn is_functional_object_property(&self, property: &ObjectProperty) -> bool {
        self.contains_axiom(&Axiom::FunctionalObjectProperty(
            ObjectPropertyExpression::from(property.clone()),
        ))
    }

    /// `FunctionalDataProperty(property)` is asserted.
    pub fn is_functional_data_property(&self, property: &DataProperty) -> bool {
        self.contains_axiom(&Axiom::FunctionalDataProperty(property.clone()))
    }

    /// `TransitiveObjectProperty(property)` is asserted.
    pub fn is_transitive_object_property(&self, property: &ObjectProperty) -> bool {
        self.contains_axiom(&Axiom::TransitiveObjectProperty(
            ObjectPropertyExpression::from(property.clone()),
        ))
    }

    /// `SymmetricObjectProperty(property)` is asserted.
    pub fn is_symmetric_object_property(&self, property: &ObjectProperty) -> bool {
        self.contains_axiom(&Axiom::SymmetricObjectProperty(
            ObjectPropertyExpression::from(property.clone()),
        ))
    }

    /// Entity and axiom counts computed from the current indices.
    pub fn statistics(&self) -> OntologyStatistics {
        let entities_by_kind: BTreeMap<EntityKind, usize> = EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, self.entity_count(kind)))
            .filter(|(_, n)| *n > 0)
            .collect();
        let axioms_by_kind: BTreeMap<AxiomKind, usize> = self
            .index
            .by_kind
            .iter()
            .map(|(kind, ids)| (*kind, ids.len()))
            .collect();
        let tbox_axiom_count = axioms_by_kind
            .iter()
            .filter(|(kind, _)| kind.is_tbox())
            .map(|(_, n)| n)
            .sum();
        let abox_axiom_count = axioms_by_kind
            .iter()
            .filter(|(kind, _)| kind.is_abox())
            .map(|(_, n)| n)
            .sum();

        OntologyStatistics {
            axiom_count: self.axiom_count(),
            tbox_axiom_count,
            abox_axiom_count,
            class_count: self.entity_count(EntityKind::Class),
            object_property_count: self.entity_count(EntityKind::ObjectProperty),
            data_property_count: self.entity_count(EntityKind::DataProperty),
            annotation_property_count: self.entity_count(EntityKind::AnnotationProperty),
            datatype_count: self.entity_count(EntityKind::Datatype),
            individual_count: self.individual_count(),
            entities_by_kind,
            axioms_by_kind,
        }
    }
}

/// Two ontologies are equal when they hold the same axiom set and the same
/// id, imports and ontology annotations. Prefixes are presentation only.
impl PartialEq for Ontology {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.imports == other.imports
            && self.annotations == other.annotations
            && self.axiom_count() == other.axiom_count()
            && self.get_axioms().all(|a| other.contains_axiom(a))
    }
}

impl Eq for Ontology {}

impl Extend<Axiom> for Ontology {
    fn extend<T: IntoIterator<Item = Axiom>>(&mut self, iter: T) {
        for axiom in iter {
            self.add_axiom(axiom);
        }
    }
}

impl FromIterator<Axiom> for Ontology {
    fn from_iter<T: IntoIterator<Item = Axiom>>(iter: T) -> Self {
        let mut ontology = Ontology::new();
        ontology.extend(iter);
        ontology
    }
}
