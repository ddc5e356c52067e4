//! OWL entities

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::iri::Iri;
use crate::vocab;

macro_rules! named_entity {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Iri);

        impl $name {
            pub fn new<I: Into<Iri>>(iri: I) -> Self {
                Self(iri.into())
            }

            pub fn iri(&self) -> &Iri {
                &self.0
            }
        }

        impl From<$name> for Entity {
            fn from(e: $name) -> Entity {
                Entity::$kind(e)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

named_entity!(
    /// OWL class
    Class,
    Class
);
named_entity!(
    /// Datatype
    Datatype,
    Datatype
);
named_entity!(
    /// Object property (individual -> individual)
    ObjectProperty,
    ObjectProperty
);
named_entity!(
    /// Data property (individual -> literal)
    DataProperty,
    DataProperty
);
named_entity!(AnnotationProperty, AnnotationProperty);
named_entity!(NamedIndividual, NamedIndividual);

impl Class {
    pub fn thing() -> Self {
        Self::new(vocab::OWL_THING)
    }

    pub fn nothing() -> Self {
        Self::new(vocab::OWL_NOTHING)
    }

    /// `owl:Thing` or `owl:Nothing`.
    pub fn is_builtin(&self) -> bool {
        matches!(self.0.full(), vocab::OWL_THING | vocab::OWL_NOTHING)
    }
}

impl Datatype {
    pub fn is_builtin(&self) -> bool {
        vocab::is_builtin_datatype(self.0.full())
    }
}

impl AnnotationProperty {
    pub fn label() -> Self {
        Self::new(vocab::RDFS_LABEL)
    }
}

/// Blank-node individual, identified by a document-local id instead of an IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnonymousIndividual(pub String);

impl AnonymousIndividual {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl From<AnonymousIndividual> for Entity {
    fn from(e: AnonymousIndividual) -> Entity {
        Entity::AnonymousIndividual(e)
    }
}

impl fmt::Display for AnonymousIndividual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// Graph node of the individual layer: named or anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Individual {
    Named(NamedIndividual),
    Anonymous(AnonymousIndividual),
}

impl Individual {
    pub fn named<I: Into<Iri>>(iri: I) -> Self {
        Individual::Named(NamedIndividual::new(iri))
    }

    pub fn anonymous<S: Into<String>>(id: S) -> Self {
        Individual::Anonymous(AnonymousIndividual::new(id))
    }

    pub fn iri(&self) -> Option<&Iri> {
        match self {
            Individual::Named(n) => Some(n.iri()),
            Individual::Anonymous(_) => None,
        }
    }

    pub fn to_entity(&self) -> Entity {
        match self {
            Individual::Named(n) => Entity::NamedIndividual(n.clone()),
            Individual::Anonymous(a) => Entity::AnonymousIndividual(a.clone()),
        }
    }
}

impl From<NamedIndividual> for Individual {
    fn from(n: NamedIndividual) -> Self {
        Individual::Named(n)
    }
}

impl From<AnonymousIndividual> for Individual {
    fn from(a: AnonymousIndividual) -> Self {
        Individual::Anonymous(a)
    }
}

impl From<Individual> for Entity {
    fn from(i: Individual) -> Self {
        i.to_entity()
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Individual::Named(n) => write!(f, "{}", n),
            Individual::Anonymous(a) => write!(f, "{}", a),
        }
    }
}

/// Kind tag of an [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Class,
    Datatype,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
    AnonymousIndividual,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Class,
        EntityKind::Datatype,
        EntityKind::ObjectProperty,
        EntityKind::DataProperty,
        EntityKind::AnnotationProperty,
        EntityKind::NamedIndividual,
        EntityKind::AnonymousIndividual,
    ];

    /// Keyword used by the functional-style syntax.
    pub fn keyword(&self) -> &'static str {
        match self {
            EntityKind::Class => "Class",
            EntityKind::Datatype => "Datatype",
            EntityKind::ObjectProperty => "ObjectProperty",
            EntityKind::DataProperty => "DataProperty",
            EntityKind::AnnotationProperty => "AnnotationProperty",
            EntityKind::NamedIndividual => "NamedIndividual",
            EntityKind::AnonymousIndividual => "AnonymousIndividual",
        }
    }

    pub fn is_individual(&self) -> bool {
        matches!(self, EntityKind::NamedIndividual | EntityKind::AnonymousIndividual)
    }
}

/// A named (or blank-node) thing referenced by axioms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Entity {
    Class(Class),
    Datatype(Datatype),
    ObjectProperty(ObjectProperty),
    DataProperty(DataProperty),
    AnnotationProperty(AnnotationProperty),
    NamedIndividual(NamedIndividual),
    AnonymousIndividual(AnonymousIndividual),
}

impl Entity {
    /// Build a named entity of the given kind. Returns `None` for
    /// [`EntityKind::AnonymousIndividual`], which has no IRI.
    pub fn from_kind(kind: EntityKind, iri: Iri) -> Option<Self> {
        Some(match kind {
            EntityKind::Class => Entity::Class(Class(iri)),
            EntityKind::Datatype => Entity::Datatype(Datatype(iri)),
            EntityKind::ObjectProperty => Entity::ObjectProperty(ObjectProperty(iri)),
            EntityKind::DataProperty => Entity::DataProperty(DataProperty(iri)),
            EntityKind::AnnotationProperty => Entity::AnnotationProperty(AnnotationProperty(iri)),
            EntityKind::NamedIndividual => Entity::NamedIndividual(NamedIndividual(iri)),
            EntityKind::AnonymousIndividual => return None,
        })
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Class(_) => EntityKind::Class,
            Entity::Datatype(_) => EntityKind::Datatype,
            Entity::ObjectProperty(_) => EntityKind::ObjectProperty,
            Entity::DataProperty(_) => EntityKind::DataProperty,
            Entity::AnnotationProperty(_) => EntityKind::AnnotationProperty,
            Entity::NamedIndividual(_) => EntityKind::NamedIndividual,
            Entity::AnonymousIndividual(_) => EntityKind::AnonymousIndividual,
        }
    }

    /// `None` for anonymous individuals.
    pub fn iri(&self) -> Option<&Iri> {
        match self {
            Entity::Class(e) => Some(&e.0),
            Entity::Datatype(e) => Some(&e.0),
            Entity::ObjectProperty(e) => Some(&e.0),
            Entity::DataProperty(e) => Some(&e.0),
            Entity::AnnotationProperty(e) => Some(&e.0),
            Entity::NamedIndividual(e) => Some(&e.0),
            Entity::AnonymousIndividual(_) => None,
        }
    }

    pub fn as_individual(&self) -> Option<Individual> {
        match self {
            Entity::NamedIndividual(n) => Some(Individual::Named(n.clone())),
            Entity::AnonymousIndividual(a) => Some(Individual::Anonymous(a.clone())),
            _ => None,
        }
    }

    /// Built-in vocabulary never needs a declaration.
    pub fn is_builtin(&self) -> bool {
        match self {
            Entity::Class(c) => c.is_builtin(),
            Entity::Datatype(d) => d.is_builtin(),
            Entity::AnnotationProperty(a) => a.0.full().starts_with(vocab::RDFS_NS),
            _ => false,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.iri() {
            Some(iri) => write!(f, "{}({})", self.kind().keyword(), iri),
            None => write!(f, "{}", self.as_individual().map(|i| i.to_string()).unwrap_or_default()),
        }
    }
}
