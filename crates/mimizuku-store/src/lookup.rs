//! Name- and value-based individual lookup

use itertools::Itertools;
use mimizuku_core::{
    AnnotationSubject, AnnotationValue, AxiomKind, Class, DataProperty, Entity, EntityKind,
    Individual, Literal, vocab,
};

use crate::ontology::Ontology;
use crate::OntologyError;

impl Ontology {
    /// The individual carrying `rdfs:label` equal to `label`, ignoring
    /// language tag and datatype. Several distinct matches are an error.
    pub fn find_individual_by_label(&self, label: &str) -> Result<Option<Individual>, OntologyError> {
        let matches: Vec<Individual> = self
            .axioms_of_kind(AxiomKind::AnnotationAssertion)
            .filter_map(|a| a.as_annotation_assertion())
            .filter(|(_, ann)| ann.property.iri().full() == vocab::RDFS_LABEL)
            .filter(|(_, ann)| matches!(&ann.value, AnnotationValue::Literal(l) if l.lexical() == label))
            .filter_map(|(subject, _)| match subject {
                AnnotationSubject::Iri(iri) => {
                    let individual = Individual::named(iri.clone());
                    self.contains_entity(&individual.to_entity()).then_some(individual)
                }
                AnnotationSubject::Anonymous(a) => Some(Individual::Anonymous(a.clone())),
            })
            .unique()
            .collect();
        unique_match(matches, || format!("individual labelled {:?}", label))
    }

    /// The entity of `kind` whose IRI local name is `name`.
    pub fn find_entity_by_local_name(&self, kind: EntityKind, name: &str) -> Result<Option<Entity>, OntologyError> {
        let matches: Vec<Entity> = self
            .entities_of_kind(kind)
            .filter(|e| e.iri().is_some_and(|iri| iri.local_name() == name))
            .cloned()
            .collect();
        unique_match(matches, || format!("{} named {:?}", kind.keyword(), name))
    }

    /// Start a criteria-based individual lookup.
    pub fn match_individuals(&self) -> IndividualMatcher<'_> {
        IndividualMatcher {
            ontology: self,
            class: None,
            values: Vec::new(),
        }
    }
}

/// Finds individuals by asserted class and data property values. All
/// criteria must hold.
#[derive(Debug, Clone)]
pub struct IndividualMatcher<'a> {
    ontology: &'a Ontology,
    class: Option<Class>,
    values: Vec<(DataProperty, Literal)>,
}

impl<'a> IndividualMatcher<'a> {
    pub fn with_class(mut self, class: Class) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_data_value(mut self, property: DataProperty, value: Literal) -> Self {
        self.values.push((property, value));
        self
    }

    /// All matching individuals, sorted.
    pub fn find_all(&self) -> Result<Vec<Individual>, OntologyError> {
        let mut candidates: Option<Vec<Individual>> = self
            .class
            .as_ref()
            .map(|c| self.ontology.get_individuals_of_class(c));

        for (property, value) in &self.values {
            let subjects = self.ontology.search_by_data_property(property, value);
            candidates = Some(match candidates {
                None => subjects,
                Some(current) => current.into_iter().filter(|i| subjects.contains(i)).collect(),
            });
        }

        candidates.ok_or_else(|| {
            OntologyError::InvalidRequest("individual matcher has no criteria".to_string())
        })
    }

    pub fn find_unique(&self) -> Result<Option<Individual>, OntologyError> {
        let matches = self.find_all()?;
        unique_match(matches, || "individual matching criteria".to_string())
    }
}

fn unique_match<T>(mut matches: Vec<T>, what: impl FnOnce() -> String) -> Result<Option<T>, OntologyError> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        count => Err(OntologyError::MultipleMatches { what: what(), count }),
    }
}
