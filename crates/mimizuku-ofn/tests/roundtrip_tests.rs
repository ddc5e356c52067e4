use mimizuku_core::{
    vocab, Annotation, AnnotationProperty, AnnotationSubject, AnnotationValue, Axiom, AxiomKind,
    Class, ClassExpression, DataProperty, DataRange, Datatype, Entity, Facet, FacetRestriction,
    Individual, Iri, Literal, NamedIndividual, ObjectProperty, ObjectPropertyExpression,
    SubObjectPropertyExpression,
};
use mimizuku_ofn::{parse_functional_syntax, to_functional_syntax, WriteError};
use mimizuku_store::Ontology;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

const EX: &str = "http://example.org/bio#";

fn iri(local: &str) -> Iri {
    Iri::new(format!("{}{}", EX, local))
}

fn class(local: &str) -> Class {
    Class(iri(local))
}

fn op(local: &str) -> ObjectProperty {
    ObjectProperty(iri(local))
}

fn ope(local: &str) -> ObjectPropertyExpression {
    ObjectPropertyExpression::ObjectProperty(op(local))
}

fn dp(local: &str) -> DataProperty {
    DataProperty(iri(local))
}

fn ind(local: &str) -> Individual {
    Individual::named(iri(local))
}

fn ce(local: &str) -> ClassExpression {
    ClassExpression::Class(class(local))
}

fn integer(n: i64) -> Literal {
    Literal::typed(n.to_string(), Iri::new(vocab::XSD_INTEGER))
}

/// One axiom of every kind, with nested expressions where the kind allows.
fn every_kind() -> Vec<Axiom> {
    let gene = ce("Gene");
    let protein = ce("Protein");
    let positive = DataRange::DatatypeRestriction(
        Datatype(Iri::new(vocab::XSD_INTEGER)),
        vec![
            FacetRestriction { facet: Facet::MinInclusive, value: integer(0) },
            FacetRestriction { facet: Facet::MaxExclusive, value: integer(100) },
        ],
    );
    vec![
        Axiom::declaration(class("Gene")),
        Axiom::declaration(Entity::AnonymousIndividual(mimizuku_core::AnonymousIndividual::new("n0"))),
        Axiom::sub_class_of(
            gene.clone(),
            ClassExpression::some_values_from(
                ObjectPropertyExpression::InverseObjectProperty(op("encodedBy")),
                ClassExpression::intersection_of([protein.clone(), ClassExpression::complement_of(ce("Pseudo"))]),
            ),
        ),
        Axiom::EquivalentClasses(vec![
            ce("Enzyme"),
            ClassExpression::ObjectMinCardinality {
                cardinality: 1,
                property: ope("catalyzes"),
                filler: None,
            },
        ]),
        Axiom::DisjointClasses(vec![
            gene.clone(),
            ClassExpression::union_of([protein.clone(), ce("Disease")]),
        ]),
        Axiom::DisjointUnion(
            class("Variant"),
            vec![
                ClassExpression::ObjectOneOf(vec![ind("rs429358"), Individual::anonymous("v1")]),
                ClassExpression::ObjectExactCardinality {
                    cardinality: 2,
                    property: ope("allele"),
                    filler: Some(Arc::new(ce("Allele"))),
                },
            ],
        ),
        Axiom::SubObjectPropertyOf {
            sub: SubObjectPropertyExpression::Chain(vec![ope("encodes"), ope("participatesIn")]),
            sup: ope("involvedIn"),
        },
        Axiom::EquivalentObjectProperties(vec![ope("encodes"), ope("codesFor")]),
        Axiom::DisjointObjectProperties(vec![ope("encodes"), ope("inhibits")]),
        Axiom::InverseObjectProperties(ope("encodes"), ope("encodedBy")),
        Axiom::ObjectPropertyDomain {
            property: ope("encodes"),
            domain: ClassExpression::ObjectHasSelf(ope("regulates")),
        },
        Axiom::ObjectPropertyRange {
            property: ope("encodes"),
            range: ClassExpression::all_values_from(op("foldsInto"), ce("Structure")),
        },
        Axiom::FunctionalObjectProperty(ope("encodedBy")),
        Axiom::InverseFunctionalObjectProperty(ope("encodes")),
        Axiom::ReflexiveObjectProperty(ope("sameLocus")),
        Axiom::IrreflexiveObjectProperty(ope("inhibits")),
        Axiom::SymmetricObjectProperty(ope("interactsWith")),
        Axiom::AsymmetricObjectProperty(ope("encodes")),
        Axiom::TransitiveObjectProperty(ope("partOf")),
        Axiom::SubDataPropertyOf { sub: dp("hgncSymbol"), sup: dp("symbol") },
        Axiom::EquivalentDataProperties(vec![dp("symbol"), dp("name")]),
        Axiom::DisjointDataProperties(vec![dp("symbol"), dp("length")]),
        Axiom::DataPropertyDomain {
            property: dp("length"),
            domain: ClassExpression::DataSomeValuesFrom {
                property: dp("length"),
                range: Arc::new(positive.clone()),
            },
        },
        Axiom::DataPropertyRange {
            property: dp("strand"),
            range: DataRange::DataOneOf(vec![Literal::simple("+"), Literal::simple("-")]),
        },
        Axiom::FunctionalDataProperty(dp("length")),
        Axiom::DatatypeDefinition {
            datatype: Datatype(iri("percentage")),
            range: DataRange::DataIntersectionOf(vec![
                Arc::new(positive),
                Arc::new(DataRange::DataComplementOf(Arc::new(DataRange::DataUnionOf(vec![
                    Arc::new(DataRange::datatype(vocab::XSD_DOUBLE)),
                    Arc::new(DataRange::datatype(vocab::XSD_DECIMAL)),
                ])))),
            ]),
        },
        Axiom::HasKey {
            class: gene.clone(),
            object_properties: vec![ope("locatedOn")],
            data_properties: vec![dp("symbol")],
        },
        Axiom::SameIndividual(vec![ind("APOE"), ind("apolipoproteinE")]),
        Axiom::DifferentIndividuals(vec![ind("APOE"), ind("APP"), Individual::anonymous("g7")]),
        Axiom::class_assertion(
            ClassExpression::ObjectHasValue { property: ope("associatedWith"), value: ind("Alzheimer") },
            ind("APOE"),
        ),
        Axiom::object_property_assertion(op("encodes"), NamedIndividual(iri("APOE")), ind("ApoE_protein")),
        Axiom::NegativeObjectPropertyAssertion {
            property: op("encodes"),
            source: ind("APOE"),
            target: ind("APP_protein"),
        },
        Axiom::data_property_assertion(dp("symbol"), NamedIndividual(iri("APOE")), Literal::simple("APOE")),
        Axiom::NegativeDataPropertyAssertion {
            property: dp("length"),
            source: ind("APOE"),
            target: integer(-1),
        },
        Axiom::AnnotationAssertion {
            subject: AnnotationSubject::Iri(iri("APOE")),
            annotation: Annotation::new(AnnotationProperty::label(), Literal::lang_tagged("Apolipoprotein E", "en")),
        },
        Axiom::SubAnnotationPropertyOf {
            sub: AnnotationProperty(iri("synonym")),
            sup: AnnotationProperty(Iri::new(vocab::RDFS_LABEL)),
        },
        Axiom::AnnotationPropertyDomain {
            property: AnnotationProperty(iri("synonym")),
            domain: iri("Gene"),
        },
        Axiom::AnnotationPropertyRange {
            property: AnnotationProperty(iri("synonym")),
            range: Iri::new(vocab::XSD_STRING),
        },
        Axiom::sub_class_of(
            ClassExpression::ObjectMaxCardinality {
                cardinality: 3,
                property: ope("isoform"),
                filler: None,
            },
            ClassExpression::DataMaxCardinality {
                cardinality: 1,
                property: dp("symbol"),
                range: Some(Arc::new(DataRange::datatype(vocab::XSD_STRING))),
            },
        ),
        Axiom::sub_class_of(
            ClassExpression::DataMinCardinality { cardinality: 0, property: dp("alias"), range: None },
            ClassExpression::DataExactCardinality { cardinality: 1, property: dp("symbol"), range: None },
        ),
        Axiom::sub_class_of(
            ClassExpression::DataAllValuesFrom {
                property: dp("length"),
                range: Arc::new(DataRange::datatype(vocab::XSD_INTEGER)),
            },
            ClassExpression::DataHasValue { property: dp("reviewed"), value: Literal::typed("true", Iri::new(vocab::XSD_BOOLEAN)) },
        ),
        Axiom::sub_class_of(
            ClassExpression::ObjectMinCardinality {
                cardinality: 1,
                property: ope("encodes"),
                filler: Some(Arc::new(protein)),
            },
            ClassExpression::ObjectMaxCardinality {
                cardinality: 5,
                property: ope("isoform"),
                filler: Some(Arc::new(gene)),
            },
        ),
    ]
}

fn sample_ontology() -> Ontology {
    let mut onto = Ontology::with_iri(iri("onto"));
    onto.set_version_iri(iri("onto/2.1"));
    onto.prefixes_mut().insert("bio", EX);
    onto.add_import(Iri::new("http://purl.obolibrary.org/obo/go.owl"));
    onto.add_annotation(Annotation::new(
        AnnotationProperty(Iri::new(vocab::RDFS_COMMENT)),
        Literal::simple("Gene and protein graph"),
    ));
    onto.extend(every_kind());
    onto
}

#[test]
fn test_every_axiom_kind_is_covered() {
    let kinds: BTreeSet<AxiomKind> = every_kind().iter().map(Axiom::kind).collect();
    assert_eq!(kinds.len(), AxiomKind::ALL.len());
}

#[test]
fn test_roundtrip_preserves_ontology() {
    let onto = sample_ontology();
    let text = to_functional_syntax(&onto).unwrap();
    let parsed = parse_functional_syntax(&text).unwrap();

    assert_eq!(parsed, onto);
    assert_eq!(parsed.iri(), onto.iri());
    assert_eq!(parsed.version_iri(), onto.version_iri());
    assert_eq!(parsed.imports(), onto.imports());
    assert_eq!(parsed.annotations(), onto.annotations());
    assert_eq!(parsed.axiom_count(), onto.axiom_count());
    assert_eq!(parsed.statistics(), onto.statistics());
}

#[test]
fn test_roundtrip_preserves_axiom_order_and_text() {
    let onto = sample_ontology();
    let text = to_functional_syntax(&onto).unwrap();
    let parsed = parse_functional_syntax(&text).unwrap();

    let original: Vec<&Axiom> = onto.get_axioms().collect();
    let reread: Vec<&Axiom> = parsed.get_axioms().collect();
    assert_eq!(original, reread);
    assert_eq!(to_functional_syntax(&parsed).unwrap(), text);
}

#[test]
fn test_written_document_uses_declared_prefixes() {
    let text = to_functional_syntax(&sample_ontology()).unwrap();
    assert!(text.contains("Prefix(bio:=<http://example.org/bio#>)"));
    assert!(text.contains("Ontology(bio:onto <http://example.org/bio#onto/2.1>"));
    assert!(text.contains("ObjectPropertyAssertion(bio:encodes bio:APOE bio:ApoE_protein)"));
    assert!(text.contains("\"Apolipoprotein E\"@en"));
    assert!(text.trim_end().ends_with(')'));
}

#[test]
fn test_comments_and_whitespace_are_ignored() {
    let text = "# gene graph\n\
                Prefix(bio:=<http://example.org/bio#>)\n\
                Ontology(   # header IRI on the next line\n\
                  <http://example.org/bio#onto>\n\
                  ClassAssertion( bio:Gene\tbio:APOE )\n\
                )\n";
    let onto = parse_functional_syntax(text).unwrap();
    assert!(onto.is_instance_of(&ind("APOE"), &class("Gene")));
}

#[test]
fn test_hand_written_document() {
    let text = r#"
Prefix(:=<http://example.org/bio#>)
Ontology(<http://example.org/bio>
  Declaration(Class(:Gene))
  Declaration(NamedIndividual(:APOE))
  ClassAssertion(:Gene :APOE)
  ObjectPropertyAssertion(:associatedWith :APOE :Alzheimer)
  DataPropertyAssertion(:chromosome :APOE "19"^^xsd:string)
  AnnotationAssertion(rdfs:label :APOE "APOE")
)
"#;
    let onto = parse_functional_syntax(text).unwrap();
    assert_eq!(onto.axiom_count(), 6);
    assert_eq!(onto.get_individuals_of_class(&class("Gene")), vec![ind("APOE")]);
    assert_eq!(onto.outgoing_edges(&ind("APOE")).len(), 1);
    assert_eq!(
        onto.get_data_property_values(&ind("APOE"), &dp("chromosome")),
        vec![&Literal::simple("19")]
    );
    let (subject, annotation) = onto
        .get_axioms()
        .find_map(Axiom::as_annotation_assertion)
        .unwrap();
    assert_eq!(subject, &AnnotationSubject::Iri(iri("APOE")));
    assert_eq!(annotation.value, AnnotationValue::Literal(Literal::simple("APOE")));
}

#[test]
fn test_error_positions() {
    let cases = [
        ("Ontology(\n  ClassAssertion(<http://a/C>\n)", 3, 1),
        ("Ontology(\n  SubClassOf(<http://a/C> 42)\n)", 2, 27),
        ("Ontology(\n  ObjectPropertyAssertion(<http://a/p> <http://a/x> \"lit\")\n)", 2, 53),
        ("Prefix(ex=<http://a/>)\nOntology()", 1, 8),
        ("Ontology(\n  ClassAssertion(<http://a/C> <http://a/x>) $\n)", 2, 45),
    ];
    for (input, line, column) in cases {
        let err = parse_functional_syntax(input).unwrap_err();
        assert_eq!((err.line, err.column), (line, column), "{}: {}", input, err);
    }
}

#[test]
fn test_unknown_facet_is_rejected() {
    let err = parse_functional_syntax(
        "Ontology(DatatypeDefinition(<http://a/d> DatatypeRestriction(xsd:integer <http://a/big> \"1\")))",
    )
    .unwrap_err();
    assert!(err.message.contains("unknown facet"));
}

#[test]
fn test_anonymous_individual_cannot_take_an_iri() {
    let err = parse_functional_syntax("Ontology(Declaration(AnonymousIndividual(<http://a/x>)))").unwrap_err();
    assert!(err.message.contains("blank node"));
}

#[test]
fn test_iri_with_whitespace_is_not_written() {
    let mut onto = sample_ontology();
    onto.add_axiom(Axiom::class_assertion(
        class("Gene"),
        NamedIndividual(Iri::new("http://example.org/a b")),
    ));
    assert_eq!(
        to_functional_syntax(&onto),
        Err(WriteError::UnwritableIri("http://example.org/a b".to_string()))
    );

    // Under a prefix the same IRI is still rejected: the namespace itself is unreadable.
    let mut onto = Ontology::new();
    onto.prefixes_mut().insert("sp", "http://example.org/with space#");
    onto.add_axiom(Axiom::class_assertion(
        class("Gene"),
        NamedIndividual(Iri::new("http://example.org/with space#x")),
    ));
    assert!(matches!(to_functional_syntax(&onto), Err(WriteError::UnwritableIri(_))));

    let mut onto = Ontology::new();
    onto.set_iri(Iri::new("http://example.org/my onto"));
    assert!(to_functional_syntax(&onto).is_err());
}

proptest! {
    #[test]
    fn prop_literal_lexical_forms_survive(lexical in "\\PC*", lang in proptest::option::of("[a-z]{2}(-[A-Z]{2})?")) {
        let value = match lang {
            Some(lang) => Literal::lang_tagged(lexical, lang),
            None => Literal::simple(lexical),
        };
        let mut onto = Ontology::new();
        onto.add_axiom(Axiom::data_property_assertion(dp("note"), NamedIndividual(iri("x")), value.clone()));
        let parsed = parse_functional_syntax(&to_functional_syntax(&onto).unwrap()).unwrap();
        prop_assert_eq!(parsed.get_data_property_values(&ind("x"), &dp("note")), vec![&value]);
    }

    #[test]
    fn prop_local_names_survive(local in "[A-Za-z_][A-Za-z0-9_\\-]{0,12}") {
        let mut onto = Ontology::new();
        onto.prefixes_mut().insert("bio", EX);
        onto.add_axiom(Axiom::class_assertion(class(&local), ind(&local)));
        let parsed = parse_functional_syntax(&to_functional_syntax(&onto).unwrap()).unwrap();
        prop_assert_eq!(parsed, onto);
    }
}
