//! Class expressions, property expressions and data ranges
//!
//! Expressions are immutable trees. Children are held through `Arc` so a
//! sub-expression can be shared by any number of axioms; a node is never
//! mutated in place, a changed expression is a new tree.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entity::{Class, DataProperty, Datatype, Individual, ObjectProperty};
use crate::iri::Iri;
use crate::literal::Literal;
use crate::vocab;

/// Named object property or the inverse of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectPropertyExpression {
    ObjectProperty(ObjectProperty),
    InverseObjectProperty(ObjectProperty),
}

impl ObjectPropertyExpression {
    /// The named property underneath, inverse or not.
    pub fn named(&self) -> &ObjectProperty {
        match self {
            ObjectPropertyExpression::ObjectProperty(p)
            | ObjectPropertyExpression::InverseObjectProperty(p) => p,
        }
    }

    pub fn is_inverse(&self) -> bool {
        matches!(self, ObjectPropertyExpression::InverseObjectProperty(_))
    }
}

impl From<ObjectProperty> for ObjectPropertyExpression {
    fn from(p: ObjectProperty) -> Self {
        ObjectPropertyExpression::ObjectProperty(p)
    }
}

/// XSD constraining facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Facet {
    Length,
    MinLength,
    MaxLength,
    Pattern,
    MinInclusive,
    MinExclusive,
    MaxInclusive,
    MaxExclusive,
    TotalDigits,
    FractionDigits,
    LangRange,
}

impl Facet {
    pub const ALL: [Facet; 11] = [
        Facet::Length,
        Facet::MinLength,
        Facet::MaxLength,
        Facet::Pattern,
        Facet::MinInclusive,
        Facet::MinExclusive,
        Facet::MaxInclusive,
        Facet::MaxExclusive,
        Facet::TotalDigits,
        Facet::FractionDigits,
        Facet::LangRange,
    ];

    pub fn local_name(&self) -> &'static str {
        match self {
            Facet::Length => "length",
            Facet::MinLength => "minLength",
            Facet::MaxLength => "maxLength",
            Facet::Pattern => "pattern",
            Facet::MinInclusive => "minInclusive",
            Facet::MinExclusive => "minExclusive",
            Facet::MaxInclusive => "maxInclusive",
            Facet::MaxExclusive => "maxExclusive",
            Facet::TotalDigits => "totalDigits",
            Facet::FractionDigits => "fractionDigits",
            Facet::LangRange => "langRange",
        }
    }

    pub fn iri(&self) -> Iri {
        match self {
            Facet::LangRange => Iri::with_parts("rdf", vocab::RDF_NS, self.local_name()),
            _ => Iri::with_parts("xsd", vocab::XSD_NS, self.local_name()),
        }
    }

    pub fn from_iri(iri: &Iri) -> Option<Facet> {
        Facet::ALL.into_iter().find(|f| f.iri() == *iri)
    }
}

/// A facet bound to a value, e.g. `xsd:minInclusive 18`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacetRestriction {
    pub facet: Facet,
    pub value: Literal,
}

/// Kind tag of a [`DataRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataRangeKind {
    Datatype,
    DataIntersectionOf,
    DataUnionOf,
    DataComplementOf,
    DataOneOf,
    DatatypeRestriction,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataRange {
    Datatype(Datatype),
    DataIntersectionOf(Vec<Arc<DataRange>>),
    DataUnionOf(Vec<Arc<DataRange>>),
    DataComplementOf(Arc<DataRange>),
    DataOneOf(Vec<Literal>),
    DatatypeRestriction(Datatype, Vec<FacetRestriction>),
}

impl DataRange {
    pub fn datatype<I: Into<Iri>>(iri: I) -> Self {
        DataRange::Datatype(Datatype::new(iri))
    }

    pub fn kind(&self) -> DataRangeKind {
        match self {
            DataRange::Datatype(_) => DataRangeKind::Datatype,
            DataRange::DataIntersectionOf(_) => DataRangeKind::DataIntersectionOf,
            DataRange::DataUnionOf(_) => DataRangeKind::DataUnionOf,
            DataRange::DataComplementOf(_) => DataRangeKind::DataComplementOf,
            DataRange::DataOneOf(_) => DataRangeKind::DataOneOf,
            DataRange::DatatypeRestriction(..) => DataRangeKind::DatatypeRestriction,
        }
    }

    /// Child ranges of n-ary and complement nodes.
    pub fn operands(&self) -> Vec<&DataRange> {
        match self {
            DataRange::DataIntersectionOf(ranges) | DataRange::DataUnionOf(ranges) => {
                ranges.iter().map(|r| r.as_ref()).collect()
            }
            DataRange::DataComplementOf(range) => vec![range.as_ref()],
            _ => Vec::new(),
        }
    }

    pub fn facets(&self) -> &[FacetRestriction] {
        match self {
            DataRange::DatatypeRestriction(_, facets) => facets,
            _ => &[],
        }
    }

    pub fn as_datatype(&self) -> Option<&Datatype> {
        match self {
            DataRange::Datatype(d) | DataRange::DatatypeRestriction(d, _) => Some(d),
            _ => None,
        }
    }
}

impl From<Datatype> for DataRange {
    fn from(d: Datatype) -> Self {
        DataRange::Datatype(d)
    }
}

/// Kind tag of a [`ClassExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassExpressionKind {
    Class,
    ObjectIntersectionOf,
    ObjectUnionOf,
    ObjectComplementOf,
    ObjectOneOf,
    ObjectSomeValuesFrom,
    ObjectAllValuesFrom,
    ObjectHasValue,
    ObjectHasSelf,
    ObjectMinCardinality,
    ObjectMaxCardinality,
    ObjectExactCardinality,
    DataSomeValuesFrom,
    DataAllValuesFrom,
    DataHasValue,
    DataMinCardinality,
    DataMaxCardinality,
    DataExactCardinality,
}

/// OWL2 class expression tree.
///
/// Cardinality restrictions without a filler are unqualified (`owl:Thing` /
/// `rdfs:Literal`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassExpression {
    Class(Class),
    ObjectIntersectionOf(Vec<Arc<ClassExpression>>),
    ObjectUnionOf(Vec<Arc<ClassExpression>>),
    ObjectComplementOf(Arc<ClassExpression>),
    ObjectOneOf(Vec<Individual>),
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Arc<ClassExpression>,
    },
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Arc<ClassExpression>,
    },
    ObjectHasValue {
        property: ObjectPropertyExpression,
        value: Individual,
    },
    ObjectHasSelf(ObjectPropertyExpression),
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Arc<ClassExpression>>,
    },
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Arc<ClassExpression>>,
    },
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Arc<ClassExpression>>,
    },
    DataSomeValuesFrom {
        property: DataProperty,
        range: Arc<DataRange>,
    },
    DataAllValuesFrom {
        property: DataProperty,
        range: Arc<DataRange>,
    },
    DataHasValue {
        property: DataProperty,
        value: Literal,
    },
    DataMinCardinality {
        cardinality: u32,
        property: DataProperty,
        range: Option<Arc<DataRange>>,
    },
    DataMaxCardinality {
        cardinality: u32,
        property: DataProperty,
        range: Option<Arc<DataRange>>,
    },
    DataExactCardinality {
        cardinality: u32,
        property: DataProperty,
        range: Option<Arc<DataRange>>,
    },
}

impl ClassExpression {
    pub fn class<I: Into<Iri>>(iri: I) -> Self {
        ClassExpression::Class(Class::new(iri))
    }

    pub fn intersection_of<I: IntoIterator<Item = ClassExpression>>(operands: I) -> Self {
        ClassExpression::ObjectIntersectionOf(operands.into_iter().map(Arc::new).collect())
    }

    pub fn union_of<I: IntoIterator<Item = ClassExpression>>(operands: I) -> Self {
        ClassExpression::ObjectUnionOf(operands.into_iter().map(Arc::new).collect())
    }

    pub fn complement_of(operand: ClassExpression) -> Self {
        ClassExpression::ObjectComplementOf(Arc::new(operand))
    }

    pub fn some_values_from<P: Into<ObjectPropertyExpression>>(property: P, filler: ClassExpression) -> Self {
        ClassExpression::ObjectSomeValuesFrom {
            property: property.into(),
            filler: Arc::new(filler),
        }
    }

    pub fn all_values_from<P: Into<ObjectPropertyExpression>>(property: P, filler: ClassExpression) -> Self {
        ClassExpression::ObjectAllValuesFrom {
            property: property.into(),
            filler: Arc::new(filler),
        }
    }

    pub fn kind(&self) -> ClassExpressionKind {
        match self {
            ClassExpression::Class(_) => ClassExpressionKind::Class,
            ClassExpression::ObjectIntersectionOf(_) => ClassExpressionKind::ObjectIntersectionOf,
            ClassExpression::ObjectUnionOf(_) => ClassExpressionKind::ObjectUnionOf,
            ClassExpression::ObjectComplementOf(_) => ClassExpressionKind::ObjectComplementOf,
            ClassExpression::ObjectOneOf(_) => ClassExpressionKind::ObjectOneOf,
            ClassExpression::ObjectSomeValuesFrom { .. } => ClassExpressionKind::ObjectSomeValuesFrom,
            ClassExpression::ObjectAllValuesFrom { .. } => ClassExpressionKind::ObjectAllValuesFrom,
            ClassExpression::ObjectHasValue { .. } => ClassExpressionKind::ObjectHasValue,
            ClassExpression::ObjectHasSelf(_) => ClassExpressionKind::ObjectHasSelf,
            ClassExpression::ObjectMinCardinality { .. } => ClassExpressionKind::ObjectMinCardinality,
            ClassExpression::ObjectMaxCardinality { .. } => ClassExpressionKind::ObjectMaxCardinality,
            ClassExpression::ObjectExactCardinality { .. } => ClassExpressionKind::ObjectExactCardinality,
            ClassExpression::DataSomeValuesFrom { .. } => ClassExpressionKind::DataSomeValuesFrom,
            ClassExpression::DataAllValuesFrom { .. } => ClassExpressionKind::DataAllValuesFrom,
            ClassExpression::DataHasValue { .. } => ClassExpressionKind::DataHasValue,
            ClassExpression::DataMinCardinality { .. } => ClassExpressionKind::DataMinCardinality,
            ClassExpression::DataMaxCardinality { .. } => ClassExpressionKind::DataMaxCardinality,
            ClassExpression::DataExactCardinality { .. } => ClassExpressionKind::DataExactCardinality,
        }
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            ClassExpression::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, ClassExpression::Class(_))
    }

    /// Direct class-expression children (boolean operands and object fillers).
    pub fn operands(&self) -> Vec<&ClassExpression> {
        match self {
            ClassExpression::ObjectIntersectionOf(ops) | ClassExpression::ObjectUnionOf(ops) => {
                ops.iter().map(|c| c.as_ref()).collect()
            }
            ClassExpression::ObjectComplementOf(c) => vec![c.as_ref()],
            ClassExpression::ObjectSomeValuesFrom { filler, .. }
            | ClassExpression::ObjectAllValuesFrom { filler, .. } => vec![filler.as_ref()],
            ClassExpression::ObjectMinCardinality { filler, .. }
            | ClassExpression::ObjectMaxCardinality { filler, .. }
            | ClassExpression::ObjectExactCardinality { filler, .. } => {
                filler.iter().map(|c| c.as_ref()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn object_property(&self) -> Option<&ObjectPropertyExpression> {
        match self {
            ClassExpression::ObjectSomeValuesFrom { property, .. }
            | ClassExpression::ObjectAllValuesFrom { property, .. }
            | ClassExpression::ObjectHasValue { property, .. }
            | ClassExpression::ObjectHasSelf(property)
            | ClassExpression::ObjectMinCardinality { property, .. }
            | ClassExpression::ObjectMaxCardinality { property, .. }
            | ClassExpression::ObjectExactCardinality { property, .. } => Some(property),
            _ => None,
        }
    }

    pub fn data_property(&self) -> Option<&DataProperty> {
        match self {
            ClassExpression::DataSomeValuesFrom { property, .. }
            | ClassExpression::DataAllValuesFrom { property, .. }
            | ClassExpression::DataHasValue { property, .. }
            | ClassExpression::DataMinCardinality { property, .. }
            | ClassExpression::DataMaxCardinality { property, .. }
            | ClassExpression::DataExactCardinality { property, .. } => Some(property),
            _ => None,
        }
    }

    pub fn data_range(&self) -> Option<&DataRange> {
        match self {
            ClassExpression::DataSomeValuesFrom { range, .. }
            | ClassExpression::DataAllValuesFrom { range, .. } => Some(range.as_ref()),
            ClassExpression::DataMinCardinality { range, .. }
            | ClassExpression::DataMaxCardinality { range, .. }
            | ClassExpression::DataExactCardinality { range, .. } => range.as_deref(),
            _ => None,
        }
    }

    pub fn cardinality(&self) -> Option<u32> {
        match self {
            ClassExpression::ObjectMinCardinality { cardinality, .. }
            | ClassExpression::ObjectMaxCardinality { cardinality, .. }
            | ClassExpression::ObjectExactCardinality { cardinality, .. }
            | ClassExpression::DataMinCardinality { cardinality, .. }
            | ClassExpression::DataMaxCardinality { cardinality, .. }
            | ClassExpression::DataExactCardinality { cardinality, .. } => Some(*cardinality),
            _ => None,
        }
    }

    /// Individuals named directly by this node (`ObjectOneOf`, `ObjectHasValue`).
    pub fn individuals(&self) -> Vec<&Individual> {
        match self {
            ClassExpression::ObjectOneOf(individuals) => individuals.iter().collect(),
            ClassExpression::ObjectHasValue { value, .. } => vec![value],
            _ => Vec::new(),
        }
    }
}

impl From<Class> for ClassExpression {
    fn from(c: Class) -> Self {
        ClassExpression::Class(c)
    }
}
