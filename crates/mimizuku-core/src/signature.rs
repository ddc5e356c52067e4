//! Entity signature walk
//!
//! The signature of an expression or axiom is the set of entities it
//! references. The walk is a plain recursive descent dispatched on the kind,
//! so adding a variant anywhere forces this module to be updated.

use std::collections::BTreeSet;

use crate::axiom::{AnnotationSubject, AnnotationValue, Axiom, SubObjectPropertyExpression};
use crate::entity::{Entity, Individual};
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::literal::Literal;

/// Anything that references entities.
pub trait Signature {
    fn collect_entities(&self, out: &mut BTreeSet<Entity>);

    fn signature(&self) -> BTreeSet<Entity> {
        let mut out = BTreeSet::new();
        self.collect_entities(&mut out);
        out
    }
}

impl Signature for Individual {
    fn collect_entities(&self, out: &mut BTreeSet<Entity>) {
        out.insert(self.to_entity());
    }
}

impl Signature for ObjectPropertyExpression {
    fn collect_entities(&self, out: &mut BTreeSet<Entity>) {
        out.insert(Entity::ObjectProperty(self.named().clone()));
    }
}

// Literal datatypes are not part of the signature; they carry no declaration.
impl Signature for Literal {
    fn collect_entities(&self, _out: &mut BTreeSet<Entity>) {}
}

impl Signature for DataRange {
    fn collect_entities(&self, out: &mut BTreeSet<Entity>) {
        match self {
            DataRange::Datatype(d) => {
                out.insert(Entity::Datatype(d.clone()));
            }
            DataRange::DataIntersectionOf(ranges) | DataRange::DataUnionOf(ranges) => {
                for range in ranges {
                    range.collect_entities(out);
                }
            }
            DataRange::DataComplementOf(range) => range.collect_entities(out),
            DataRange::DataOneOf(_) => {}
            DataRange::DatatypeRestriction(d, _) => {
                out.insert(Entity::Datatype(d.clone()));
            }
        }
    }
}

impl Signature for ClassExpression {
    fn collect_entities(&self, out: &mut BTreeSet<Entity>) {
        match self {
            ClassExpression::Class(c) => {
                out.insert(Entity::Class(c.clone()));
            }
            ClassExpression::ObjectIntersectionOf(ops) | ClassExpression::ObjectUnionOf(ops) => {
                for op in ops {
                    op.collect_entities(out);
                }
            }
            ClassExpression::ObjectComplementOf(op) => op.collect_entities(out),
            ClassExpression::ObjectOneOf(individuals) => {
                for i in individuals {
                    i.collect_entities(out);
                }
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler }
            | ClassExpression::ObjectAllValuesFrom { property, filler } => {
                property.collect_entities(out);
                filler.collect_entities(out);
            }
            ClassExpression::ObjectHasValue { property, value } => {
                property.collect_entities(out);
                value.collect_entities(out);
            }
            ClassExpression::ObjectHasSelf(property) => property.collect_entities(out),
            ClassExpression::ObjectMinCardinality { property, filler, .. }
            | ClassExpression::ObjectMaxCardinality { property, filler, .. }
            | ClassExpression::ObjectExactCardinality { property, filler, .. } => {
                property.collect_entities(out);
                if let Some(filler) = filler {
                    filler.collect_entities(out);
                }
            }
            ClassExpression::DataSomeValuesFrom { property, range }
            | ClassExpression::DataAllValuesFrom { property, range } => {
                out.insert(Entity::DataProperty(property.clone()));
                range.collect_entities(out);
            }
            ClassExpression::DataHasValue { property, .. } => {
                out.insert(Entity::DataProperty(property.clone()));
            }
            ClassExpression::DataMinCardinality { property, range, .. }
            | ClassExpression::DataMaxCardinality { property, range, .. }
            | ClassExpression::DataExactCardinality { property, range, .. } => {
                out.insert(Entity::DataProperty(property.clone()));
                if let Some(range) = range {
                    range.collect_entities(out);
                }
            }
        }
    }
}

impl Signature for Axiom {
    fn collect_entities(&self, out: &mut BTreeSet<Entity>) {
        match self {
            Axiom::Declaration(e) => {
                out.insert(e.clone());
            }
            Axiom::SubClassOf { sub, sup } => {
                sub.collect_entities(out);
                sup.collect_entities(out);
            }
            Axiom::EquivalentClasses(ces) | Axiom::DisjointClasses(ces) => {
                for ce in ces {
                    ce.collect_entities(out);
                }
            }
            Axiom::DisjointUnion(class, ces) => {
                out.insert(Entity::Class(class.clone()));
                for ce in ces {
                    ce.collect_entities(out);
                }
            }
            Axiom::SubObjectPropertyOf { sub, sup } => {
                match sub {
                    SubObjectPropertyExpression::Property(p) => p.collect_entities(out),
                    SubObjectPropertyExpression::Chain(chain) => {
                        for p in chain {
                            p.collect_entities(out);
                        }
                    }
                }
                sup.collect_entities(out);
            }
            Axiom::EquivalentObjectProperties(ps) | Axiom::DisjointObjectProperties(ps) => {
                for p in ps {
                    p.collect_entities(out);
                }
            }
            Axiom::InverseObjectProperties(a, b) => {
                a.collect_entities(out);
                b.collect_entities(out);
            }
            Axiom::ObjectPropertyDomain { property, domain: ce }
            | Axiom::ObjectPropertyRange { property, range: ce } => {
                property.collect_entities(out);
                ce.collect_entities(out);
            }
            Axiom::FunctionalObjectProperty(p)
            | Axiom::InverseFunctionalObjectProperty(p)
            | Axiom::ReflexiveObjectProperty(p)
            | Axiom::IrreflexiveObjectProperty(p)
            | Axiom::SymmetricObjectProperty(p)
            | Axiom::AsymmetricObjectProperty(p)
            | Axiom::TransitiveObjectProperty(p) => p.collect_entities(out),
            Axiom::SubDataPropertyOf { sub, sup } => {
                out.insert(Entity::DataProperty(sub.clone()));
                out.insert(Entity::DataProperty(sup.clone()));
            }
            Axiom::EquivalentDataProperties(ps) | Axiom::DisjointDataProperties(ps) => {
                for p in ps {
                    out.insert(Entity::DataProperty(p.clone()));
                }
            }
            Axiom::DataPropertyDomain { property, domain } => {
                out.insert(Entity::DataProperty(property.clone()));
                domain.collect_entities(out);
            }
            Axiom::DataPropertyRange { property, range } => {
                out.insert(Entity::DataProperty(property.clone()));
                range.collect_entities(out);
            }
            Axiom::FunctionalDataProperty(p) => {
                out.insert(Entity::DataProperty(p.clone()));
            }
            Axiom::DatatypeDefinition { datatype, range } => {
                out.insert(Entity::Datatype(datatype.clone()));
                range.collect_entities(out);
            }
            Axiom::HasKey {
                class,
                object_properties,
                data_properties,
            } => {
                class.collect_entities(out);
                for p in object_properties {
                    p.collect_entities(out);
                }
                for p in data_properties {
                    out.insert(Entity::DataProperty(p.clone()));
                }
            }
            Axiom::SameIndividual(individuals) | Axiom::DifferentIndividuals(individuals) => {
                for i in individuals {
                    i.collect_entities(out);
                }
            }
            Axiom::ClassAssertion { class, individual } => {
                class.collect_entities(out);
                individual.collect_entities(out);
            }
            Axiom::ObjectPropertyAssertion {
                property,
                source,
                target,
            }
            | Axiom::NegativeObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                out.insert(Entity::ObjectProperty(property.clone()));
                source.collect_entities(out);
                target.collect_entities(out);
            }
            Axiom::DataPropertyAssertion {
                property, source, ..
            }
            | Axiom::NegativeDataPropertyAssertion {
                property, source, ..
            } => {
                out.insert(Entity::DataProperty(property.clone()));
                source.collect_entities(out);
            }
            Axiom::AnnotationAssertion {
                subject,
                annotation,
            } => {
                // An IRI subject is not typed, so it is not an entity here.
                if let AnnotationSubject::Anonymous(a) = subject {
                    out.insert(Entity::AnonymousIndividual(a.clone()));
                }
                out.insert(Entity::AnnotationProperty(annotation.property.clone()));
                if let AnnotationValue::Anonymous(a) = &annotation.value {
                    out.insert(Entity::AnonymousIndividual(a.clone()));
                }
            }
            Axiom::SubAnnotationPropertyOf { sub, sup } => {
                out.insert(Entity::AnnotationProperty(sub.clone()));
                out.insert(Entity::AnnotationProperty(sup.clone()));
            }
            Axiom::AnnotationPropertyDomain { property, .. }
            | Axiom::AnnotationPropertyRange { property, .. } => {
                out.insert(Entity::AnnotationProperty(property.clone()));
            }
        }
    }
}
