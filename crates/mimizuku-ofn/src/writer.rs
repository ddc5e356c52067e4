//! Functional-style syntax writer

use itertools::Itertools;
use mimizuku_core::{
    Annotation, AnnotationSubject, AnnotationValue, AnonymousIndividual, Axiom, ClassExpression,
    DataRange, Entity, Individual, Iri, Literal, ObjectPropertyExpression, PrefixMapping,
    SubObjectPropertyExpression,
};
use mimizuku_store::Ontology;
use tracing::warn;

use crate::WriteError;

/// Render a whole ontology document: prefixes, header, imports, ontology
/// annotations and axioms in insertion order.
///
/// Fails without output when any IRI, language tag or blank node id could
/// not be read back by the parser.
pub fn to_functional_syntax(ontology: &Ontology) -> Result<String, WriteError> {
    let writer = FunctionalSyntaxWriter::new(ontology.prefixes());
    let mut out = String::new();

    for (prefix, namespace) in writer.prefixes.iter() {
        out.push_str(&format!("Prefix({}:=<{}>)\n", prefix, namespace));
    }
    out.push('\n');

    out.push_str("Ontology(");
    if let Some(iri) = ontology.iri() {
        out.push_str(&writer.iri(iri)?);
        if let Some(version) = ontology.version_iri() {
            out.push(' ');
            out.push_str(&writer.iri(version)?);
        }
    }
    out.push('\n');
    for import in ontology.imports() {
        out.push_str(&format!("Import({})\n", writer.iri(import)?));
    }
    for annotation in ontology.annotations() {
        out.push_str(&writer.annotation(annotation)?);
        out.push('\n');
    }
    if !ontology.imports().is_empty() || !ontology.annotations().is_empty() {
        out.push('\n');
    }
    for axiom in ontology.get_axioms() {
        let line = writer.axiom(axiom).map_err(|err| {
            warn!(kind = %axiom.kind(), error = %err, "axiom cannot be written");
            err
        })?;
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(")\n");
    Ok(out)
}

/// Renders individual constructs with a fixed prefix mapping.
#[derive(Debug, Clone)]
pub struct FunctionalSyntaxWriter {
    prefixes: PrefixMapping,
}

impl FunctionalSyntaxWriter {
    /// Prefix names the lexer cannot read back are dropped; IRIs under them
    /// are written in full.
    pub fn new(prefixes: &PrefixMapping) -> Self {
        let mut usable = PrefixMapping::new();
        for (prefix, namespace) in prefixes.iter() {
            if is_prefix_name(prefix) && is_writable_iri(namespace) {
                usable.insert(prefix, namespace);
            }
        }
        Self { prefixes: usable }
    }

    pub fn iri(&self, iri: &Iri) -> Result<String, WriteError> {
        if let Some(short) = self.prefixes.abbreviate(iri) {
            return Ok(short);
        }
        if !is_writable_iri(iri.full()) {
            return Err(WriteError::UnwritableIri(iri.full().to_string()));
        }
        Ok(format!("<{}>", iri.full()))
    }

    pub fn literal(&self, literal: &Literal) -> Result<String, WriteError> {
        let quoted = format!("\"{}\"", escape(literal.lexical()));
        match literal.lang() {
            Some(lang) if !is_language_tag(lang) => Err(WriteError::UnwritableLanguageTag(lang.to_string())),
            Some(lang) => Ok(format!("{}@{}", quoted, lang)),
            None if literal.is_plain() => Ok(quoted),
            None => Ok(format!("{}^^{}", quoted, self.iri(literal.datatype())?)),
        }
    }

    fn anonymous(&self, a: &AnonymousIndividual) -> Result<String, WriteError> {
        if !is_node_id(a.id()) {
            return Err(WriteError::UnwritableNodeId(a.id().to_string()));
        }
        Ok(format!("_:{}", a.id()))
    }

    pub fn individual(&self, individual: &Individual) -> Result<String, WriteError> {
        match individual {
            Individual::Named(n) => self.iri(n.iri()),
            Individual::Anonymous(a) => self.anonymous(a),
        }
    }

    pub fn entity(&self, entity: &Entity) -> Result<String, WriteError> {
        let inner = match entity {
            Entity::AnonymousIndividual(a) => self.anonymous(a)?,
            _ => match entity.iri() {
                Some(iri) => self.iri(iri)?,
                None => String::new(),
            },
        };
        Ok(format!("{}({})", entity.kind().keyword(), inner))
    }

    pub fn object_property(&self, property: &ObjectPropertyExpression) -> Result<String, WriteError> {
        match property {
            ObjectPropertyExpression::ObjectProperty(p) => self.iri(p.iri()),
            ObjectPropertyExpression::InverseObjectProperty(p) => Ok(format!("ObjectInverseOf({})", self.iri(p.iri())?)),
        }
    }

    pub fn data_range(&self, range: &DataRange) -> Result<String, WriteError> {
        Ok(match range {
            DataRange::Datatype(d) => self.iri(d.iri())?,
            DataRange::DataIntersectionOf(ranges) => {
                format!("DataIntersectionOf({})", self.join(ranges.iter().map(|r| self.data_range(r)))?)
            }
            DataRange::DataUnionOf(ranges) => {
                format!("DataUnionOf({})", self.join(ranges.iter().map(|r| self.data_range(r)))?)
            }
            DataRange::DataComplementOf(r) => format!("DataComplementOf({})", self.data_range(r)?),
            DataRange::DataOneOf(literals) => {
                format!("DataOneOf({})", self.join(literals.iter().map(|l| self.literal(l)))?)
            }
            DataRange::DatatypeRestriction(d, facets) => format!(
                "DatatypeRestriction({} {})",
                self.iri(d.iri())?,
                self.join(facets.iter().map(|f| {
                    Ok(format!("{} {}", self.iri(&f.facet.iri())?, self.literal(&f.value)?))
                }))?
            ),
        })
    }

    pub fn class_expression(&self, ce: &ClassExpression) -> Result<String, WriteError> {
        use ClassExpression as CE;
        Ok(match ce {
            CE::Class(c) => self.iri(c.iri())?,
            CE::ObjectIntersectionOf(ops) => {
                format!("ObjectIntersectionOf({})", self.join(ops.iter().map(|c| self.class_expression(c)))?)
            }
            CE::ObjectUnionOf(ops) => {
                format!("ObjectUnionOf({})", self.join(ops.iter().map(|c| self.class_expression(c)))?)
            }
            CE::ObjectComplementOf(op) => format!("ObjectComplementOf({})", self.class_expression(op)?),
            CE::ObjectOneOf(individuals) => {
                format!("ObjectOneOf({})", self.join(individuals.iter().map(|i| self.individual(i)))?)
            }
            CE::ObjectSomeValuesFrom { property, filler } => format!(
                "ObjectSomeValuesFrom({} {})",
                self.object_property(property)?,
                self.class_expression(filler)?
            ),
            CE::ObjectAllValuesFrom { property, filler } => format!(
                "ObjectAllValuesFrom({} {})",
                self.object_property(property)?,
                self.class_expression(filler)?
            ),
            CE::ObjectHasValue { property, value } => format!(
                "ObjectHasValue({} {})",
                self.object_property(property)?,
                self.individual(value)?
            ),
            CE::ObjectHasSelf(property) => format!("ObjectHasSelf({})", self.object_property(property)?),
            CE::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            }
            | CE::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            }
            | CE::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => {
                let mut parts = vec![cardinality.to_string(), self.object_property(property)?];
                if let Some(filler) = filler {
                    parts.push(self.class_expression(filler)?);
                }
                format!("{}({})", cardinality_keyword(ce), parts.join(" "))
            }
            CE::DataSomeValuesFrom { property, range } => format!(
                "DataSomeValuesFrom({} {})",
                self.iri(property.iri())?,
                self.data_range(range)?
            ),
            CE::DataAllValuesFrom { property, range } => format!(
                "DataAllValuesFrom({} {})",
                self.iri(property.iri())?,
                self.data_range(range)?
            ),
            CE::DataHasValue { property, value } => format!(
                "DataHasValue({} {})",
                self.iri(property.iri())?,
                self.literal(value)?
            ),
            CE::DataMinCardinality {
                cardinality,
                property,
                range,
            }
            | CE::DataMaxCardinality {
                cardinality,
                property,
                range,
            }
            | CE::DataExactCardinality {
                cardinality,
                property,
                range,
            } => {
                let mut parts = vec![cardinality.to_string(), self.iri(property.iri())?];
                if let Some(range) = range {
                    parts.push(self.data_range(range)?);
                }
                format!("{}({})", cardinality_keyword(ce), parts.join(" "))
            }
        })
    }

    fn annotation_value(&self, value: &AnnotationValue) -> Result<String, WriteError> {
        match value {
            AnnotationValue::Iri(iri) => self.iri(iri),
            AnnotationValue::Literal(l) => self.literal(l),
            AnnotationValue::Anonymous(a) => self.anonymous(a),
        }
    }

    pub fn annotation(&self, annotation: &Annotation) -> Result<String, WriteError> {
        Ok(format!(
            "Annotation({} {})",
            self.iri(annotation.property.iri())?,
            self.annotation_value(&annotation.value)?
        ))
    }

    pub fn axiom(&self, axiom: &Axiom) -> Result<String, WriteError> {
        let body = match axiom {
            Axiom::Declaration(e) => self.entity(e)?,
            Axiom::SubClassOf { sub, sup } => {
                format!("{} {}", self.class_expression(sub)?, self.class_expression(sup)?)
            }
            Axiom::EquivalentClasses(ces) | Axiom::DisjointClasses(ces) => {
                self.join(ces.iter().map(|c| self.class_expression(c)))?
            }
            Axiom::DisjointUnion(class, ces) => format!(
                "{} {}",
                self.iri(class.iri())?,
                self.join(ces.iter().map(|c| self.class_expression(c)))?
            ),
            Axiom::SubObjectPropertyOf { sub, sup } => {
                let sub = match sub {
                    SubObjectPropertyExpression::Property(p) => self.object_property(p)?,
                    SubObjectPropertyExpression::Chain(chain) => format!(
                        "ObjectPropertyChain({})",
                        self.join(chain.iter().map(|p| self.object_property(p)))?
                    ),
                };
                format!("{} {}", sub, self.object_property(sup)?)
            }
            Axiom::EquivalentObjectProperties(ps) | Axiom::DisjointObjectProperties(ps) => {
                self.join(ps.iter().map(|p| self.object_property(p)))?
            }
            Axiom::InverseObjectProperties(a, b) => {
                format!("{} {}", self.object_property(a)?, self.object_property(b)?)
            }
            Axiom::ObjectPropertyDomain { property, domain: ce }
            | Axiom::ObjectPropertyRange { property, range: ce } => {
                format!("{} {}", self.object_property(property)?, self.class_expression(ce)?)
            }
            Axiom::FunctionalObjectProperty(p)
            | Axiom::InverseFunctionalObjectProperty(p)
            | Axiom::ReflexiveObjectProperty(p)
            | Axiom::IrreflexiveObjectProperty(p)
            | Axiom::SymmetricObjectProperty(p)
            | Axiom::AsymmetricObjectProperty(p)
            | Axiom::TransitiveObjectProperty(p) => self.object_property(p)?,
            Axiom::SubDataPropertyOf { sub, sup } => {
                format!("{} {}", self.iri(sub.iri())?, self.iri(sup.iri())?)
            }
            Axiom::EquivalentDataProperties(ps) | Axiom::DisjointDataProperties(ps) => {
                self.join(ps.iter().map(|p| self.iri(p.iri())))?
            }
            Axiom::DataPropertyDomain { property, domain } => {
                format!("{} {}", self.iri(property.iri())?, self.class_expression(domain)?)
            }
            Axiom::DataPropertyRange { property, range } => {
                format!("{} {}", self.iri(property.iri())?, self.data_range(range)?)
            }
            Axiom::FunctionalDataProperty(p) => self.iri(p.iri())?,
            Axiom::DatatypeDefinition { datatype, range } => {
                format!("{} {}", self.iri(datatype.iri())?, self.data_range(range)?)
            }
            Axiom::HasKey {
                class,
                object_properties,
                data_properties,
            } => format!(
                "{} ({}) ({})",
                self.class_expression(class)?,
                self.join(object_properties.iter().map(|p| self.object_property(p)))?,
                self.join(data_properties.iter().map(|p| self.iri(p.iri())))?
            ),
            Axiom::SameIndividual(individuals) | Axiom::DifferentIndividuals(individuals) => {
                self.join(individuals.iter().map(|i| self.individual(i)))?
            }
            Axiom::ClassAssertion { class, individual } => {
                format!("{} {}", self.class_expression(class)?, self.individual(individual)?)
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
            } => format!(
                "{} {} {}",
                self.iri(property.iri())?,
                self.individual(source)?,
                self.individual(target)?
            ),
            Axiom::DataPropertyAssertion {
                property,
                source,
                target,
            }
            | Axiom::NegativeDataPropertyAssertion {
                property,
                source,
                target,
            } => format!(
                "{} {} {}",
                self.iri(property.iri())?,
                self.individual(source)?,
                self.literal(target)?
            ),
            Axiom::AnnotationAssertion {
                subject,
                annotation,
            } => {
                let subject = match subject {
                    AnnotationSubject::Iri(iri) => self.iri(iri)?,
                    AnnotationSubject::Anonymous(a) => self.anonymous(a)?,
                };
                format!(
                    "{} {} {}",
                    self.iri(annotation.property.iri())?,
                    subject,
                    self.annotation_value(&annotation.value)?
                )
            }
            Axiom::SubAnnotationPropertyOf { sub, sup } => {
                format!("{} {}", self.iri(sub.iri())?, self.iri(sup.iri())?)
            }
            Axiom::AnnotationPropertyDomain { property, domain: iri }
            | Axiom::AnnotationPropertyRange { property, range: iri } => {
                format!("{} {}", self.iri(property.iri())?, self.iri(iri)?)
            }
        };
        Ok(format!("{}({})", axiom.kind().name(), body))
    }

    fn join<I>(&self, parts: I) -> Result<String, WriteError>
    where
        I: Iterator<Item = Result<String, WriteError>>,
    {
        itertools::process_results(parts, |mut parts| parts.join(" "))
    }
}

fn cardinality_keyword(ce: &ClassExpression) -> &'static str {
    match ce {
        ClassExpression::ObjectMinCardinality { .. } => "ObjectMinCardinality",
        ClassExpression::ObjectMaxCardinality { .. } => "ObjectMaxCardinality",
        ClassExpression::ObjectExactCardinality { .. } => "ObjectExactCardinality",
        ClassExpression::DataMinCardinality { .. } => "DataMinCardinality",
        ClassExpression::DataMaxCardinality { .. } => "DataMaxCardinality",
        _ => "DataExactCardinality",
    }
}

fn is_prefix_name(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        None => true,
        Some(first) => {
            first.is_ascii_alphabetic()
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        }
    }
}

// A full IRI token is `<` up to the next `>` with no whitespace in between.
fn is_writable_iri(iri: &str) -> bool {
    !iri.chars().any(|c| c.is_whitespace() || matches!(c, '<' | '>'))
}

fn is_language_tag(lang: &str) -> bool {
    let mut subtags = lang.split('-');
    let primary = subtags.next().unwrap_or_default();
    !primary.is_empty()
        && primary.chars().all(|c| c.is_ascii_alphabetic())
        && subtags.all(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()))
}

fn is_node_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn escape(lexical: &str) -> String {
    lexical.replace('\\', "\\\\").replace('"', "\\\"")
}
