//! OWL2 axiom family
//!
//! Axioms are plain values: two axioms are equal exactly when they have the
//! same kind and structurally equal operands. The store relies on this for
//! set semantics.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::{
    AnnotationProperty, AnonymousIndividual, Class, DataProperty, Datatype, Entity, Individual,
    ObjectProperty,
};
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::iri::Iri;
use crate::literal::Literal;

/// Value of an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnnotationValue {
    Iri(Iri),
    Literal(Literal),
    Anonymous(AnonymousIndividual),
}

impl From<Literal> for AnnotationValue {
    fn from(l: Literal) -> Self {
        AnnotationValue::Literal(l)
    }
}

impl From<Iri> for AnnotationValue {
    fn from(i: Iri) -> Self {
        AnnotationValue::Iri(i)
    }
}

/// `property value` pair, used on ontologies and in annotation assertions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Annotation {
    pub property: AnnotationProperty,
    pub value: AnnotationValue,
}

impl Annotation {
    pub fn new<V: Into<AnnotationValue>>(property: AnnotationProperty, value: V) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

/// Subject of an annotation assertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnnotationSubject {
    Iri(Iri),
    Anonymous(AnonymousIndividual),
}

/// Left-hand side of `SubObjectPropertyOf`: a property or a property chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubObjectPropertyExpression {
    Property(ObjectPropertyExpression),
    Chain(Vec<ObjectPropertyExpression>),
}

impl SubObjectPropertyExpression {
    pub fn properties(&self) -> Vec<&ObjectPropertyExpression> {
        match self {
            SubObjectPropertyExpression::Property(p) => vec![p],
            SubObjectPropertyExpression::Chain(chain) => chain.iter().collect(),
        }
    }
}

/// Coarse grouping of axiom kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxiomCategory {
    Declaration,
    Class,
    ObjectProperty,
    DataProperty,
    Datatype,
    Assertion,
    Annotation,
}

/// Stable kind tag, used for indexed retrieval and per-format rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxiomKind {
    Declaration,
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
    DisjointUnion,
    SubObjectPropertyOf,
    EquivalentObjectProperties,
    DisjointObjectProperties,
    InverseObjectProperties,
    ObjectPropertyDomain,
    ObjectPropertyRange,
    FunctionalObjectProperty,
    InverseFunctionalObjectProperty,
    ReflexiveObjectProperty,
    IrreflexiveObjectProperty,
    SymmetricObjectProperty,
    AsymmetricObjectProperty,
    TransitiveObjectProperty,
    SubDataPropertyOf,
    EquivalentDataProperties,
    DisjointDataProperties,
    DataPropertyDomain,
    DataPropertyRange,
    FunctionalDataProperty,
    DatatypeDefinition,
    HasKey,
    SameIndividual,
    DifferentIndividuals,
    ClassAssertion,
    ObjectPropertyAssertion,
    NegativeObjectPropertyAssertion,
    DataPropertyAssertion,
    NegativeDataPropertyAssertion,
    AnnotationAssertion,
    SubAnnotationPropertyOf,
    AnnotationPropertyDomain,
    AnnotationPropertyRange,
}

impl AxiomKind {
    pub const ALL: [AxiomKind; 37] = [
        AxiomKind::Declaration,
        AxiomKind::SubClassOf,
        AxiomKind::EquivalentClasses,
        AxiomKind::DisjointClasses,
        AxiomKind::DisjointUnion,
        AxiomKind::SubObjectPropertyOf,
        AxiomKind::EquivalentObjectProperties,
        AxiomKind::DisjointObjectProperties,
        AxiomKind::InverseObjectProperties,
        AxiomKind::ObjectPropertyDomain,
        AxiomKind::ObjectPropertyRange,
        AxiomKind::FunctionalObjectProperty,
        AxiomKind::InverseFunctionalObjectProperty,
        AxiomKind::ReflexiveObjectProperty,
        AxiomKind::IrreflexiveObjectProperty,
        AxiomKind::SymmetricObjectProperty,
        AxiomKind::AsymmetricObjectProperty,
        AxiomKind::TransitiveObjectProperty,
        AxiomKind::SubDataPropertyOf,
        AxiomKind::EquivalentDataProperties,
        AxiomKind::DisjointDataProperties,
        AxiomKind::DataPropertyDomain,
        AxiomKind::DataPropertyRange,
        AxiomKind::FunctionalDataProperty,
        AxiomKind::DatatypeDefinition,
        AxiomKind::HasKey,
        AxiomKind::SameIndividual,
        AxiomKind::DifferentIndividuals,
        AxiomKind::ClassAssertion,
        AxiomKind::ObjectPropertyAssertion,
        AxiomKind::NegativeObjectPropertyAssertion,
        AxiomKind::DataPropertyAssertion,
        AxiomKind::NegativeDataPropertyAssertion,
        AxiomKind::AnnotationAssertion,
        AxiomKind::SubAnnotationPropertyOf,
        AxiomKind::AnnotationPropertyDomain,
        AxiomKind::AnnotationPropertyRange,
    ];

    /// The functional-style syntax keyword, which is also the variant name.
    pub fn name(&self) -> &'static str {
        match self {
            AxiomKind::Declaration => "Declaration",
            AxiomKind::SubClassOf => "SubClassOf",
            AxiomKind::EquivalentClasses => "EquivalentClasses",
            AxiomKind::DisjointClasses => "DisjointClasses",
            AxiomKind::DisjointUnion => "DisjointUnion",
            AxiomKind::SubObjectPropertyOf => "SubObjectPropertyOf",
            AxiomKind::EquivalentObjectProperties => "EquivalentObjectProperties",
            AxiomKind::DisjointObjectProperties => "DisjointObjectProperties",
            AxiomKind::InverseObjectProperties => "InverseObjectProperties",
            AxiomKind::ObjectPropertyDomain => "ObjectPropertyDomain",
            AxiomKind::ObjectPropertyRange => "ObjectPropertyRange",
            AxiomKind::FunctionalObjectProperty => "FunctionalObjectProperty",
            AxiomKind::InverseFunctionalObjectProperty => "InverseFunctionalObjectProperty",
            AxiomKind::ReflexiveObjectProperty => "ReflexiveObjectProperty",
            AxiomKind::IrreflexiveObjectProperty => "IrreflexiveObjectProperty",
            AxiomKind::SymmetricObjectProperty => "SymmetricObjectProperty",
            AxiomKind::AsymmetricObjectProperty => "AsymmetricObjectProperty",
            AxiomKind::TransitiveObjectProperty => "TransitiveObjectProperty",
            AxiomKind::SubDataPropertyOf => "SubDataPropertyOf",
            AxiomKind::EquivalentDataProperties => "EquivalentDataProperties",
            AxiomKind::DisjointDataProperties => "DisjointDataProperties",
            AxiomKind::DataPropertyDomain => "DataPropertyDomain",
            AxiomKind::DataPropertyRange => "DataPropertyRange",
            AxiomKind::FunctionalDataProperty => "FunctionalDataProperty",
            AxiomKind::DatatypeDefinition => "DatatypeDefinition",
            AxiomKind::HasKey => "HasKey",
            AxiomKind::SameIndividual => "SameIndividual",
            AxiomKind::DifferentIndividuals => "DifferentIndividuals",
            AxiomKind::ClassAssertion => "ClassAssertion",
            AxiomKind::ObjectPropertyAssertion => "ObjectPropertyAssertion",
            AxiomKind::NegativeObjectPropertyAssertion => "NegativeObjectPropertyAssertion",
            AxiomKind::DataPropertyAssertion => "DataPropertyAssertion",
            AxiomKind::NegativeDataPropertyAssertion => "NegativeDataPropertyAssertion",
            AxiomKind::AnnotationAssertion => "AnnotationAssertion",
            AxiomKind::SubAnnotationPropertyOf => "SubAnnotationPropertyOf",
            AxiomKind::AnnotationPropertyDomain => "AnnotationPropertyDomain",
            AxiomKind::AnnotationPropertyRange => "AnnotationPropertyRange",
        }
    }

    pub fn from_name(name: &str) -> Option<AxiomKind> {
        AxiomKind::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn category(&self) -> AxiomCategory {
        use AxiomKind::*;
        match self {
            Declaration => AxiomCategory::Declaration,
            SubClassOf | EquivalentClasses | DisjointClasses | DisjointUnion => AxiomCategory::Class,
            SubObjectPropertyOf
            | EquivalentObjectProperties
            | DisjointObjectProperties
            | InverseObjectProperties
            | ObjectPropertyDomain
            | ObjectPropertyRange
            | FunctionalObjectProperty
            | InverseFunctionalObjectProperty
            | ReflexiveObjectProperty
            | IrreflexiveObjectProperty
            | SymmetricObjectProperty
            | AsymmetricObjectProperty
            | TransitiveObjectProperty => AxiomCategory::ObjectProperty,
            SubDataPropertyOf
            | EquivalentDataProperties
            | DisjointDataProperties
            | DataPropertyDomain
            | DataPropertyRange
            | FunctionalDataProperty => AxiomCategory::DataProperty,
            DatatypeDefinition | HasKey => AxiomCategory::Datatype,
            SameIndividual
            | DifferentIndividuals
            | ClassAssertion
            | ObjectPropertyAssertion
            | NegativeObjectPropertyAssertion
            | DataPropertyAssertion
            | NegativeDataPropertyAssertion => AxiomCategory::Assertion,
            AnnotationAssertion
            | SubAnnotationPropertyOf
            | AnnotationPropertyDomain
            | AnnotationPropertyRange => AxiomCategory::Annotation,
        }
    }

    /// Terminology: class, property and datatype axioms.
    pub fn is_tbox(&self) -> bool {
        matches!(
            self.category(),
            AxiomCategory::Class
                | AxiomCategory::ObjectProperty
                | AxiomCategory::DataProperty
                | AxiomCategory::Datatype
        )
    }

    /// Assertions about individuals.
    pub fn is_abox(&self) -> bool {
        self.category() == AxiomCategory::Assertion
    }
}

impl fmt::Display for AxiomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// OWL2 axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axiom {
    /// Declaration(Entity)
    Declaration(Entity),

    /// SubClassOf(sub super)
    SubClassOf {
        sub: ClassExpression,
        sup: ClassExpression,
    },
    EquivalentClasses(Vec<ClassExpression>),
    DisjointClasses(Vec<ClassExpression>),
    /// DisjointUnion(C CE1 ... CEn)
    DisjointUnion(Class, Vec<ClassExpression>),

    SubObjectPropertyOf {
        sub: SubObjectPropertyExpression,
        sup: ObjectPropertyExpression,
    },
    EquivalentObjectProperties(Vec<ObjectPropertyExpression>),
    DisjointObjectProperties(Vec<ObjectPropertyExpression>),
    InverseObjectProperties(ObjectPropertyExpression, ObjectPropertyExpression),
    ObjectPropertyDomain {
        property: ObjectPropertyExpression,
        domain: ClassExpression,
    },
    ObjectPropertyRange {
        property: ObjectPropertyExpression,
        range: ClassExpression,
    },
    FunctionalObjectProperty(ObjectPropertyExpression),
    InverseFunctionalObjectProperty(ObjectPropertyExpression),
    ReflexiveObjectProperty(ObjectPropertyExpression),
    IrreflexiveObjectProperty(ObjectPropertyExpression),
    SymmetricObjectProperty(ObjectPropertyExpression),
    AsymmetricObjectProperty(ObjectPropertyExpression),
    TransitiveObjectProperty(ObjectPropertyExpression),

    SubDataPropertyOf {
        sub: DataProperty,
        sup: DataProperty,
    },
    EquivalentDataProperties(Vec<DataProperty>),
    DisjointDataProperties(Vec<DataProperty>),
    DataPropertyDomain {
        property: DataProperty,
        domain: ClassExpression,
    },
    DataPropertyRange {
        property: DataProperty,
        range: DataRange,
    },
    FunctionalDataProperty(DataProperty),

    DatatypeDefinition {
        datatype: Datatype,
        range: DataRange,
    },
    /// HasKey(CE (OPE1 ... OPEm) (DPE1 ... DPEn))
    HasKey {
        class: ClassExpression,
        object_properties: Vec<ObjectPropertyExpression>,
        data_properties: Vec<DataProperty>,
    },

    SameIndividual(Vec<Individual>),
    DifferentIndividuals(Vec<Individual>),
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },
    /// Directed edge `source -[property]-> target`.
    ObjectPropertyAssertion {
        property: ObjectProperty,
        source: Individual,
        target: Individual,
    },
    NegativeObjectPropertyAssertion {
        property: ObjectProperty,
        source: Individual,
        target: Individual,
    },
    DataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: Literal,
    },
    NegativeDataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: Literal,
    },

    AnnotationAssertion {
        subject: AnnotationSubject,
        annotation: Annotation,
    },
    SubAnnotationPropertyOf {
        sub: AnnotationProperty,
        sup: AnnotationProperty,
    },
    AnnotationPropertyDomain {
        property: AnnotationProperty,
        domain: Iri,
    },
    AnnotationPropertyRange {
        property: AnnotationProperty,
        range: Iri,
    },
}

impl Axiom {
    pub fn declaration<E: Into<Entity>>(entity: E) -> Self {
        Axiom::Declaration(entity.into())
    }

    pub fn sub_class_of<A: Into<ClassExpression>, B: Into<ClassExpression>>(sub: A, sup: B) -> Self {
        Axiom::SubClassOf {
            sub: sub.into(),
            sup: sup.into(),
        }
    }

    pub fn class_assertion<C: Into<ClassExpression>, I: Into<Individual>>(class: C, individual: I) -> Self {
        Axiom::ClassAssertion {
            class: class.into(),
            individual: individual.into(),
        }
    }

    pub fn object_property_assertion<S: Into<Individual>, T: Into<Individual>>(
        property: ObjectProperty,
        source: S,
        target: T,
    ) -> Self {
        Axiom::ObjectPropertyAssertion {
            property,
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn data_property_assertion<S: Into<Individual>>(
        property: DataProperty,
        source: S,
        target: Literal,
    ) -> Self {
        Axiom::DataPropertyAssertion {
            property,
            source: source.into(),
            target,
        }
    }

    pub fn kind(&self) -> AxiomKind {
        match self {
            Axiom::Declaration(_) => AxiomKind::Declaration,
            Axiom::SubClassOf { .. } => AxiomKind::SubClassOf,
            Axiom::EquivalentClasses(_) => AxiomKind::EquivalentClasses,
            Axiom::DisjointClasses(_) => AxiomKind::DisjointClasses,
            Axiom::DisjointUnion(..) => AxiomKind::DisjointUnion,
            Axiom::SubObjectPropertyOf { .. } => AxiomKind::SubObjectPropertyOf,
            Axiom::EquivalentObjectProperties(_) => AxiomKind::EquivalentObjectProperties,
            Axiom::DisjointObjectProperties(_) => AxiomKind::DisjointObjectProperties,
            Axiom::InverseObjectProperties(..) => AxiomKind::InverseObjectProperties,
            Axiom::ObjectPropertyDomain { .. } => AxiomKind::ObjectPropertyDomain,
            Axiom::ObjectPropertyRange { .. } => AxiomKind::ObjectPropertyRange,
            Axiom::FunctionalObjectProperty(_) => AxiomKind::FunctionalObjectProperty,
            Axiom::InverseFunctionalObjectProperty(_) => AxiomKind::InverseFunctionalObjectProperty,
            Axiom::ReflexiveObjectProperty(_) => AxiomKind::ReflexiveObjectProperty,
            Axiom::IrreflexiveObjectProperty(_) => AxiomKind::IrreflexiveObjectProperty,
            Axiom::SymmetricObjectProperty(_) => AxiomKind::SymmetricObjectProperty,
            Axiom::AsymmetricObjectProperty(_) => AxiomKind::AsymmetricObjectProperty,
            Axiom::TransitiveObjectProperty(_) => AxiomKind::TransitiveObjectProperty,
            Axiom::SubDataPropertyOf { .. } => AxiomKind::SubDataPropertyOf,
            Axiom::EquivalentDataProperties(_) => AxiomKind::EquivalentDataProperties,
            Axiom::DisjointDataProperties(_) => AxiomKind::DisjointDataProperties,
            Axiom::DataPropertyDomain { .. } => AxiomKind::DataPropertyDomain,
            Axiom::DataPropertyRange { .. } => AxiomKind::DataPropertyRange,
            Axiom::FunctionalDataProperty(_) => AxiomKind::FunctionalDataProperty,
            Axiom::DatatypeDefinition { .. } => AxiomKind::DatatypeDefinition,
            Axiom::HasKey { .. } => AxiomKind::HasKey,
            Axiom::SameIndividual(_) => AxiomKind::SameIndividual,
            Axiom::DifferentIndividuals(_) => AxiomKind::DifferentIndividuals,
            Axiom::ClassAssertion { .. } => AxiomKind::ClassAssertion,
            Axiom::ObjectPropertyAssertion { .. } => AxiomKind::ObjectPropertyAssertion,
            Axiom::NegativeObjectPropertyAssertion { .. } => AxiomKind::NegativeObjectPropertyAssertion,
            Axiom::DataPropertyAssertion { .. } => AxiomKind::DataPropertyAssertion,
            Axiom::NegativeDataPropertyAssertion { .. } => AxiomKind::NegativeDataPropertyAssertion,
            Axiom::AnnotationAssertion { .. } => AxiomKind::AnnotationAssertion,
            Axiom::SubAnnotationPropertyOf { .. } => AxiomKind::SubAnnotationPropertyOf,
            Axiom::AnnotationPropertyDomain { .. } => AxiomKind::AnnotationPropertyDomain,
            Axiom::AnnotationPropertyRange { .. } => AxiomKind::AnnotationPropertyRange,
        }
    }

    pub fn category(&self) -> AxiomCategory {
        self.kind().category()
    }

    pub fn is_tbox(&self) -> bool {
        self.kind().is_tbox()
    }

    pub fn is_abox(&self) -> bool {
        self.kind().is_abox()
    }

    pub fn as_declaration(&self) -> Option<&Entity> {
        match self {
            Axiom::Declaration(e) => Some(e),
            _ => None,
        }
    }

    /// `(class, individual)` of a ClassAssertion.
    pub fn as_class_assertion(&self) -> Option<(&ClassExpression, &Individual)> {
        match self {
            Axiom::ClassAssertion { class, individual } => Some((class, individual)),
            _ => None,
        }
    }

    /// `(property, source, target)` of a positive object property assertion.
    pub fn as_object_property_assertion(&self) -> Option<(&ObjectProperty, &Individual, &Individual)> {
        match self {
            Axiom::ObjectPropertyAssertion {
                property,
                source,
                target,
            } => Some((property, source, target)),
            _ => None,
        }
    }

    /// `(property, source, value)` of a positive data property assertion.
    pub fn as_data_property_assertion(&self) -> Option<(&DataProperty, &Individual, &Literal)> {
        match self {
            Axiom::DataPropertyAssertion {
                property,
                source,
                target,
            } => Some((property, source, target)),
            _ => None,
        }
    }

    /// `(sub, super)` when both sides of a SubClassOf are named classes.
    pub fn as_named_sub_class_of(&self) -> Option<(&Class, &Class)> {
        match self {
            Axiom::SubClassOf { sub, sup } => Some((sub.as_class()?, sup.as_class()?)),
            _ => None,
        }
    }

    pub fn as_annotation_assertion(&self) -> Option<(&AnnotationSubject, &Annotation)> {
        match self {
            Axiom::AnnotationAssertion {
                subject,
                annotation,
            } => Some((subject, annotation)),
            _ => None,
        }
    }
}

impl From<Entity> for Axiom {
    fn from(e: Entity) -> Self {
        Axiom::Declaration(e)
    }
}
