//! Functional-style syntax parser
//!
//! Recursive descent over the token stream. Positions in the grammar fix
//! what an IRI denotes (class, property, datatype, individual), so no
//! declarations are needed to read a document back.

use mimizuku_core::{
    Annotation, AnnotationProperty, AnnotationSubject, AnnotationValue, AnonymousIndividual,
    Axiom, Class, ClassExpression, DataProperty, DataRange, Datatype, Entity, EntityKind, Facet,
    FacetRestriction, Individual, Iri, Literal, ObjectProperty, ObjectPropertyExpression,
    PrefixMapping, SubObjectPropertyExpression,
};
use mimizuku_store::Ontology;
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

use crate::lexer::{position, tokenize, Token};
use crate::ParseError;

/// Deepest nesting of class expressions and data ranges accepted.
pub const MAX_NESTING: usize = 256;

/// Parse a complete ontology document. Either the whole document is read
/// or an error pointing at the offending token is returned.
pub fn parse_functional_syntax(input: &str) -> Result<Ontology, ParseError> {
    let mut parser = Parser::new(input)?;
    let ontology = parser.document()?;
    debug!(axioms = ontology.axiom_count(), "functional syntax document parsed");
    Ok(ontology)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<(Token<'a>, Range<usize>)>,
    pos: usize,
    depth: usize,
    prefixes: PrefixMapping,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, ParseError> {
        Ok(Self {
            input,
            tokens: tokenize(input)?,
            pos: 0,
            depth: 0,
            prefixes: PrefixMapping::standard(),
        })
    }

    // ---- token plumbing ----

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn peek_at(&self, offset: usize) -> Option<Token<'a>> {
        self.tokens.get(self.pos + offset).map(|(t, _)| *t)
    }

    fn next(&mut self) -> Result<Token<'a>, ParseError> {
        match self.tokens.get(self.pos) {
            Some((token, _)) => {
                self.pos += 1;
                Ok(*token)
            }
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let offset = match self.tokens.get(self.pos) {
            Some((_, span)) => span.start,
            None => self.input.len(),
        };
        let (line, column) = position(self.input, offset);
        ParseError::new(line, column, message)
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(format!("expression nested deeper than {} levels", MAX_NESTING)));
        }
        self.depth += 1;
        Ok(())
    }

    /// Error located at the token just consumed.
    fn error_before(&self, message: impl Into<String>) -> ParseError {
        let offset = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(self.input.len(), |(_, span)| span.start);
        let (line, column) = position(self.input, offset);
        ParseError::new(line, column, message)
    }

    fn expect(&mut self, expected: Token<'static>) -> Result<(), ParseError> {
        match self.peek() {
            Some(token) if token == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(self.error(format!(
                "expected {}, found {}",
                expected.describe(),
                token.describe()
            ))),
            None => Err(self.error(format!("expected {}, found end of input", expected.describe()))),
        }
    }

    fn at_rparen(&self) -> bool {
        self.peek() == Some(Token::RParen)
    }

    fn keyword(&mut self) -> Result<&'a str, ParseError> {
        match self.next()? {
            Token::Keyword(k) => Ok(k),
            other => Err(self.error_before(format!("expected a keyword, found {}", other.describe()))),
        }
    }

    fn expect_keyword(&mut self, expected: &str) -> Result<(), ParseError> {
        let found = self.keyword()?;
        if found == expected {
            Ok(())
        } else {
            Err(self.error_before(format!("expected {}, found {}", expected, found)))
        }
    }

    /// Keyword of an upcoming `Keyword(` construct.
    fn peek_construct(&self) -> Option<&'a str> {
        match (self.peek(), self.peek_at(1)) {
            (Some(Token::Keyword(k)), Some(Token::LParen)) => Some(k),
            _ => None,
        }
    }

    /// Parse items until the closing parenthesis, which is consumed.
    fn until_rparen<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        while !self.at_rparen() {
            if self.peek().is_none() {
                return Err(self.error("unexpected end of input, expected ')'"));
            }
            items.push(item(self)?);
        }
        self.expect(Token::RParen)?;
        Ok(items)
    }

    // ---- terminals ----

    fn iri(&mut self) -> Result<Iri, ParseError> {
        match self.next()? {
            Token::FullIri(iri) => Ok(Iri::new(iri)),
            Token::PrefixedName(name) => self
                .prefixes
                .expand(name)
                .ok_or_else(|| self.error_before(format!("unknown prefix in {}", name))),
            other => Err(self.error_before(format!("expected an IRI, found {}", other.describe()))),
        }
    }

    fn peek_is_iri(&self) -> bool {
        matches!(self.peek(), Some(Token::FullIri(_)) | Some(Token::PrefixedName(_)))
    }

    fn individual(&mut self) -> Result<Individual, ParseError> {
        match self.peek() {
            Some(Token::BlankNode(id)) => {
                self.pos += 1;
                Ok(Individual::anonymous(id))
            }
            _ => Ok(Individual::named(self.iri()?)),
        }
    }

    fn literal(&mut self) -> Result<Literal, ParseError> {
        let lexical = match self.next()? {
            Token::QuotedString(s) => unescape(s),
            other => return Err(self.error_before(format!("expected a literal, found {}", other.describe()))),
        };
        match self.peek() {
            Some(Token::LangTag(tag)) => {
                self.pos += 1;
                Ok(Literal::lang_tagged(lexical, tag))
            }
            Some(Token::DoubleCaret) => {
                self.pos += 1;
                Ok(Literal::typed(lexical, self.iri()?))
            }
            _ => Ok(Literal::simple(lexical)),
        }
    }

    fn cardinality(&mut self) -> Result<u32, ParseError> {
        match self.next()? {
            Token::Integer(n) => n
                .parse()
                .map_err(|_| self.error_before(format!("cardinality {} out of range", n))),
            other => Err(self.error_before(format!("expected a cardinality, found {}", other.describe()))),
        }
    }

    // ---- document ----

    fn document(&mut self) -> Result<Ontology, ParseError> {
        while self.peek() == Some(Token::Keyword("Prefix")) {
            self.prefix_declaration()?;
        }

        self.expect_keyword("Ontology")?;
        self.expect(Token::LParen)?;
        let mut ontology = Ontology::new();
        *ontology.prefixes_mut() = self.prefixes.clone();

        if self.peek_is_iri() {
            ontology.set_iri(self.iri()?);
            if self.peek_is_iri() {
                ontology.set_version_iri(self.iri()?);
            }
        }

        loop {
            match self.peek_construct() {
                Some("Import") => {
                    self.pos += 2;
                    ontology.add_import(self.iri()?);
                    self.expect(Token::RParen)?;
                }
                Some("Annotation") => {
                    let annotation = self.annotation()?;
                    ontology.add_annotation(annotation);
                }
                _ => break,
            }
        }

        while !self.at_rparen() {
            if self.peek().is_none() {
                return Err(self.error("unexpected end of input, expected ')' closing Ontology"));
            }
            let axiom = self.axiom()?;
            ontology.add_axiom(axiom);
        }
        self.expect(Token::RParen)?;

        if let Some(token) = self.peek() {
            return Err(self.error(format!("unexpected {} after ontology", token.describe())));
        }
        Ok(ontology)
    }

    fn prefix_declaration(&mut self) -> Result<(), ParseError> {
        self.expect_keyword("Prefix")?;
        self.expect(Token::LParen)?;
        let prefix = match self.next()? {
            Token::PrefixedName(name) if name.ends_with(':') && name.matches(':').count() == 1 => {
                &name[..name.len() - 1]
            }
            other => {
                return Err(self.error_before(format!("expected a prefix name, found {}", other.describe())))
            }
        };
        self.expect(Token::Equals)?;
        let namespace = match self.next()? {
            Token::FullIri(ns) => ns,
            other => return Err(self.error_before(format!("expected a full IRI, found {}", other.describe()))),
        };
        self.expect(Token::RParen)?;
        self.prefixes.insert(prefix, namespace);
        Ok(())
    }

    fn annotation(&mut self) -> Result<Annotation, ParseError> {
        self.expect_keyword("Annotation")?;
        self.expect(Token::LParen)?;
        let property = AnnotationProperty(self.iri()?);
        let value = self.annotation_value()?;
        self.expect(Token::RParen)?;
        Ok(Annotation { property, value })
    }

    fn annotation_value(&mut self) -> Result<AnnotationValue, ParseError> {
        match self.peek() {
            Some(Token::QuotedString(_)) => Ok(AnnotationValue::Literal(self.literal()?)),
            Some(Token::BlankNode(id)) => {
                self.pos += 1;
                Ok(AnnotationValue::Anonymous(AnonymousIndividual::new(id)))
            }
            _ => Ok(AnnotationValue::Iri(self.iri()?)),
        }
    }

    // ---- expressions ----

    fn object_property(&mut self) -> Result<ObjectPropertyExpression, ParseError> {
        if self.peek_construct() == Some("ObjectInverseOf") {
            self.pos += 2;
            let property = ObjectProperty(self.iri()?);
            self.expect(Token::RParen)?;
            return Ok(ObjectPropertyExpression::InverseObjectProperty(property));
        }
        Ok(ObjectPropertyExpression::ObjectProperty(ObjectProperty(self.iri()?)))
    }

    fn data_property(&mut self) -> Result<DataProperty, ParseError> {
        Ok(DataProperty(self.iri()?))
    }

    fn data_range(&mut self) -> Result<DataRange, ParseError> {
        let Some(keyword) = self.peek_construct() else {
            return Ok(DataRange::Datatype(Datatype(self.iri()?)));
        };
        self.descend()?;
        self.pos += 2;
        let range = match keyword {
            "DataIntersectionOf" => {
                DataRange::DataIntersectionOf(self.until_rparen(|p| p.data_range().map(Arc::new))?)
            }
            "DataUnionOf" => DataRange::DataUnionOf(self.until_rparen(|p| p.data_range().map(Arc::new))?),
            "DataComplementOf" => {
                let inner = self.data_range()?;
                self.expect(Token::RParen)?;
                DataRange::DataComplementOf(Arc::new(inner))
            }
            "DataOneOf" => DataRange::DataOneOf(self.until_rparen(|p| p.literal())?),
            "DatatypeRestriction" => {
                let datatype = Datatype(self.iri()?);
                let facets = self.until_rparen(|p| {
                    let iri = p.iri()?;
                    let facet = Facet::from_iri(&iri)
                        .ok_or_else(|| p.error_before(format!("unknown facet {}", iri)))?;
                    let value = p.literal()?;
                    Ok(FacetRestriction { facet, value })
                })?;
                DataRange::DatatypeRestriction(datatype, facets)
            }
            other => return Err(self.error_before(format!("unknown data range {}", other))),
        };
        self.depth -= 1;
        Ok(range)
    }

    fn class_expression(&mut self) -> Result<ClassExpression, ParseError> {
        let Some(keyword) = self.peek_construct() else {
            return Ok(ClassExpression::Class(Class(self.iri()?)));
        };
        self.descend()?;
        self.pos += 2;
        let ce = match keyword {
            "ObjectIntersectionOf" => {
                ClassExpression::ObjectIntersectionOf(self.until_rparen(|p| p.class_expression().map(Arc::new))?)
            }
            "ObjectUnionOf" => {
                ClassExpression::ObjectUnionOf(self.until_rparen(|p| p.class_expression().map(Arc::new))?)
            }
            "ObjectComplementOf" => {
                let inner = self.class_expression()?;
                self.expect(Token::RParen)?;
                ClassExpression::ObjectComplementOf(Arc::new(inner))
            }
            "ObjectOneOf" => ClassExpression::ObjectOneOf(self.until_rparen(|p| p.individual())?),
            "ObjectSomeValuesFrom" | "ObjectAllValuesFrom" => {
                let property = self.object_property()?;
                let filler = Arc::new(self.class_expression()?);
                self.expect(Token::RParen)?;
                if keyword == "ObjectSomeValuesFrom" {
                    ClassExpression::ObjectSomeValuesFrom { property, filler }
                } else {
                    ClassExpression::ObjectAllValuesFrom { property, filler }
                }
            }
            "ObjectHasValue" => {
                let property = self.object_property()?;
                let value = self.individual()?;
                self.expect(Token::RParen)?;
                ClassExpression::ObjectHasValue { property, value }
            }
            "ObjectHasSelf" => {
                let property = self.object_property()?;
                self.expect(Token::RParen)?;
                ClassExpression::ObjectHasSelf(property)
            }
            "ObjectMinCardinality" | "ObjectMaxCardinality" | "ObjectExactCardinality" => {
                let cardinality = self.cardinality()?;
                let property = self.object_property()?;
                let filler = if self.at_rparen() {
                    None
                } else {
                    Some(Arc::new(self.class_expression()?))
                };
                self.expect(Token::RParen)?;
                match keyword {
                    "ObjectMinCardinality" => ClassExpression::ObjectMinCardinality { cardinality, property, filler },
                    "ObjectMaxCardinality" => ClassExpression::ObjectMaxCardinality { cardinality, property, filler },
                    _ => ClassExpression::ObjectExactCardinality { cardinality, property, filler },
                }
            }
            "DataSomeValuesFrom" | "DataAllValuesFrom" => {
                let property = self.data_property()?;
                let range = Arc::new(self.data_range()?);
                self.expect(Token::RParen)?;
                if keyword == "DataSomeValuesFrom" {
                    ClassExpression::DataSomeValuesFrom { property, range }
                } else {
                    ClassExpression::DataAllValuesFrom { property, range }
                }
            }
            "DataHasValue" => {
                let property = self.data_property()?;
                let value = self.literal()?;
                self.expect(Token::RParen)?;
                ClassExpression::DataHasValue { property, value }
            }
            "DataMinCardinality" | "DataMaxCardinality" | "DataExactCardinality" => {
                let cardinality = self.cardinality()?;
                let property = self.data_property()?;
                let range = if self.at_rparen() {
                    None
                } else {
                    Some(Arc::new(self.data_range()?))
                };
                self.expect(Token::RParen)?;
                match keyword {
                    "DataMinCardinality" => ClassExpression::DataMinCardinality { cardinality, property, range },
                    "DataMaxCardinality" => ClassExpression::DataMaxCardinality { cardinality, property, range },
                    _ => ClassExpression::DataExactCardinality { cardinality, property, range },
                }
            }
            other => return Err(self.error_before(format!("unknown class expression {}", other))),
        };
        self.depth -= 1;
        Ok(ce)
    }

    // ---- axioms ----

    fn entity(&mut self) -> Result<Entity, ParseError> {
        let keyword = self.keyword()?;
        let kind = EntityKind::ALL
            .into_iter()
            .find(|k| k.keyword() == keyword)
            .ok_or_else(|| self.error_before(format!("unknown entity kind {}", keyword)))?;
        self.expect(Token::LParen)?;
        let entity = if kind == EntityKind::AnonymousIndividual {
            match self.next()? {
                Token::BlankNode(id) => Entity::AnonymousIndividual(AnonymousIndividual::new(id)),
                other => {
                    return Err(self.error_before(format!("expected a blank node, found {}", other.describe())))
                }
            }
        } else {
            let iri = self.iri()?;
            Entity::from_kind(kind, iri)
                .ok_or_else(|| self.error_before(format!("{} cannot be declared", keyword)))?
        };
        self.expect(Token::RParen)?;
        Ok(entity)
    }

    fn annotation_subject(&mut self) -> Result<AnnotationSubject, ParseError> {
        match self.peek() {
            Some(Token::BlankNode(id)) => {
                self.pos += 1;
                Ok(AnnotationSubject::Anonymous(AnonymousIndividual::new(id)))
            }
            _ => Ok(AnnotationSubject::Iri(self.iri()?)),
        }
    }

    fn sub_object_property(&mut self) -> Result<SubObjectPropertyExpression, ParseError> {
        if self.peek_construct() == Some("ObjectPropertyChain") {
            self.pos += 2;
            let chain = self.until_rparen(|p| p.object_property())?;
            return Ok(SubObjectPropertyExpression::Chain(chain));
        }
        Ok(SubObjectPropertyExpression::Property(self.object_property()?))
    }

    /// Parenthesized list without a keyword, as used by HasKey.
    fn bare_list<T>(
        &mut self,
        item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.expect(Token::LParen)?;
        self.until_rparen(item)
    }

    fn axiom(&mut self) -> Result<Axiom, ParseError> {
        let keyword = self.keyword()?;
        self.expect(Token::LParen)?;

        let axiom = match keyword {
            "Declaration" => Axiom::Declaration(self.entity()?),

            "SubClassOf" => Axiom::SubClassOf {
                sub: self.class_expression()?,
                sup: self.class_expression()?,
            },
            "EquivalentClasses" => return Ok(Axiom::EquivalentClasses(self.until_rparen(|p| p.class_expression())?)),
            "DisjointClasses" => return Ok(Axiom::DisjointClasses(self.until_rparen(|p| p.class_expression())?)),
            "DisjointUnion" => {
                let class = Class(self.iri()?);
                return Ok(Axiom::DisjointUnion(class, self.until_rparen(|p| p.class_expression())?));
            }

            "SubObjectPropertyOf" => Axiom::SubObjectPropertyOf {
                sub: self.sub_object_property()?,
                sup: self.object_property()?,
            },
            "EquivalentObjectProperties" => {
                return Ok(Axiom::EquivalentObjectProperties(self.until_rparen(|p| p.object_property())?))
            }
            "DisjointObjectProperties" => {
                return Ok(Axiom::DisjointObjectProperties(self.until_rparen(|p| p.object_property())?))
            }
            "InverseObjectProperties" => {
                Axiom::InverseObjectProperties(self.object_property()?, self.object_property()?)
            }
            "ObjectPropertyDomain" => Axiom::ObjectPropertyDomain {
                property: self.object_property()?,
                domain: self.class_expression()?,
            },
            "ObjectPropertyRange" => Axiom::ObjectPropertyRange {
                property: self.object_property()?,
                range: self.class_expression()?,
            },
            "FunctionalObjectProperty" => Axiom::FunctionalObjectProperty(self.object_property()?),
            "InverseFunctionalObjectProperty" => Axiom::InverseFunctionalObjectProperty(self.object_property()?),
            "ReflexiveObjectProperty" => Axiom::ReflexiveObjectProperty(self.object_property()?),
            "IrreflexiveObjectProperty" => Axiom::IrreflexiveObjectProperty(self.object_property()?),
            "SymmetricObjectProperty" => Axiom::SymmetricObjectProperty(self.object_property()?),
            "AsymmetricObjectProperty" => Axiom::AsymmetricObjectProperty(self.object_property()?),
            "TransitiveObjectProperty" => Axiom::TransitiveObjectProperty(self.object_property()?),

            "SubDataPropertyOf" => Axiom::SubDataPropertyOf {
                sub: self.data_property()?,
                sup: self.data_property()?,
            },
            "EquivalentDataProperties" => {
                return Ok(Axiom::EquivalentDataProperties(self.until_rparen(|p| p.data_property())?))
            }
            "DisjointDataProperties" => {
                return Ok(Axiom::DisjointDataProperties(self.until_rparen(|p| p.data_property())?))
            }
            "DataPropertyDomain" => Axiom::DataPropertyDomain {
                property: self.data_property()?,
                domain: self.class_expression()?,
            },
            "DataPropertyRange" => Axiom::DataPropertyRange {
                property: self.data_property()?,
                range: self.data_range()?,
            },
            "FunctionalDataProperty" => Axiom::FunctionalDataProperty(self.data_property()?),

            "DatatypeDefinition" => Axiom::DatatypeDefinition {
                datatype: Datatype(self.iri()?),
                range: self.data_range()?,
            },
            "HasKey" => Axiom::HasKey {
                class: self.class_expression()?,
                object_properties: self.bare_list(|p| p.object_property())?,
                data_properties: self.bare_list(|p| p.data_property())?,
            },

            "SameIndividual" => return Ok(Axiom::SameIndividual(self.until_rparen(|p| p.individual())?)),
            "DifferentIndividuals" => {
                return Ok(Axiom::DifferentIndividuals(self.until_rparen(|p| p.individual())?))
            }
            "ClassAssertion" => Axiom::ClassAssertion {
                class: self.class_expression()?,
                individual: self.individual()?,
            },
            "ObjectPropertyAssertion" | "NegativeObjectPropertyAssertion" => {
                let property = ObjectProperty(self.iri()?);
                let source = self.individual()?;
                let target = self.individual()?;
                if keyword == "ObjectPropertyAssertion" {
                    Axiom::ObjectPropertyAssertion { property, source, target }
                } else {
                    Axiom::NegativeObjectPropertyAssertion { property, source, target }
                }
            }
            "DataPropertyAssertion" | "NegativeDataPropertyAssertion" => {
                let property = self.data_property()?;
                let source = self.individual()?;
                let target = self.literal()?;
                if keyword == "DataPropertyAssertion" {
                    Axiom::DataPropertyAssertion { property, source, target }
                } else {
                    Axiom::NegativeDataPropertyAssertion { property, source, target }
                }
            }

            "AnnotationAssertion" => {
                let property = AnnotationProperty(self.iri()?);
                let subject = self.annotation_subject()?;
                let value = self.annotation_value()?;
                Axiom::AnnotationAssertion {
                    subject,
                    annotation: Annotation { property, value },
                }
            }
            "SubAnnotationPropertyOf" => Axiom::SubAnnotationPropertyOf {
                sub: AnnotationProperty(self.iri()?),
                sup: AnnotationProperty(self.iri()?),
            },
            "AnnotationPropertyDomain" => Axiom::AnnotationPropertyDomain {
                property: AnnotationProperty(self.iri()?),
                domain: self.iri()?,
            },
            "AnnotationPropertyRange" => Axiom::AnnotationPropertyRange {
                property: AnnotationProperty(self.iri()?),
                range: self.iri()?,
            },

            other => return Err(self.error_before(format!("unknown axiom {}", other))),
        };
        self.expect(Token::RParen)?;
        Ok(axiom)
    }
}

/// Undo the `\"` and `\\` escapes of a quoted string.
fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
