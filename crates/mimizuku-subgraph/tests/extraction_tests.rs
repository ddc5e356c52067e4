use mimizuku_core::{
    vocab, Annotation, AnnotationProperty, AnnotationSubject, AnnotationValue, AnonymousIndividual,
    Axiom, AxiomKind, Class, Individual, Iri, Literal, ObjectProperty,
};
use mimizuku_store::Ontology;
use mimizuku_subgraph::{
    ExtractionConfig, SubgraphError, SubgraphExtractor, TraversalDirection,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn ex(local: &str) -> Iri {
    Iri::new(format!("http://example.org/{}", local))
}

fn ind(local: &str) -> Individual {
    Individual::named(ex(local))
}

fn class(local: &str) -> Class {
    Class::new(ex(local))
}

fn link(onto: &mut Ontology, property: &str, source: &str, target: &str) {
    onto.add_object_property_assertion(&ind(source), &ObjectProperty::new(ex(property)), &ind(target));
}

fn gene_disease() -> Ontology {
    let mut onto = Ontology::with_iri(ex("genes"));
    let associates = ObjectProperty::new(ex("associatesWith"));
    onto.add_axiom(Axiom::declaration(class("Gene")));
    onto.add_axiom(Axiom::declaration(class("Disease")));
    onto.add_axiom(Axiom::declaration(associates.clone()));
    onto.add_axiom(Axiom::ObjectPropertyDomain {
        property: associates.clone().into(),
        domain: class("Gene").into(),
    });
    onto.add_axiom(Axiom::ObjectPropertyRange {
        property: associates.into(),
        range: class("Disease").into(),
    });
    onto.create_individual(&class("Gene"), ex("APOE"));
    onto.create_individual(&class("Disease"), ex("Alzheimers"));
    link(&mut onto, "associatesWith", "APOE", "Alzheimers");
    onto
}

/// Edges A->B->D and A->C->E->D, inserted in that order.
fn two_routes() -> Ontology {
    let mut onto = Ontology::new();
    for (s, t) in [("A", "B"), ("B", "D"), ("A", "C"), ("C", "E"), ("E", "D")] {
        link(&mut onto, "next", s, t);
    }
    onto
}

#[test]
fn test_neighborhood_reaches_asserting_individuals() {
    let onto = gene_disease();
    let result = SubgraphExtractor::new(&onto).extract_neighborhood(&ind("Alzheimers"), 1, false, false);
    assert_eq!(result.individual_count, 2);
    assert_eq!(result.edge_count, 1);
    assert!(result.contains_iri(&ex("APOE")));
    assert!(result.contains_iri(&ex("Alzheimers")));
    // Every source axiom describes one of the two individuals; the two
    // individual declarations are synthesized.
    assert!(onto.get_axioms().all(|a| result.ontology.contains_axiom(a)));
    assert_eq!(result.original_axiom_count, onto.axiom_count());
    assert_eq!(result.filtered_axiom_count, onto.axiom_count() + 2);
}

#[test]
fn test_zero_depth_is_seed_only() {
    let onto = gene_disease();
    let result = SubgraphExtractor::new(&onto).extract_neighborhood(&ind("Alzheimers"), 0, false, false);
    assert_eq!(result.individual_count, 1);
    assert_eq!(result.edge_count, 0);
    assert!(!result.contains_iri(&ex("APOE")));
    // The domain axiom mentions a property that no kept assertion uses.
    assert!(result
        .ontology
        .axioms_of_kind(mimizuku_core::AxiomKind::ObjectPropertyDomain)
        .next()
        .is_none());
    assert!(result.ontology.is_instance_of(&ind("Alzheimers"), &class("Disease")));
}

#[test]
fn test_unknown_seed_is_empty() {
    let onto = gene_disease();
    let result = SubgraphExtractor::new(&onto).extract_neighborhood(&ind("Nobody"), 3, false, false);
    assert_eq!(result.individual_count, 0);
    assert!(result.is_empty());
}

#[test]
fn test_outgoing_only_does_not_walk_backwards() {
    let onto = gene_disease();
    let config = ExtractionConfig::default().with_direction(TraversalDirection::Outgoing);
    let extractor = SubgraphExtractor::with_config(&onto, config);
    let result = extractor.extract_neighborhood(&ind("Alzheimers"), 3, false, false);
    assert_eq!(result.individual_count, 1);
}

#[test]
fn test_boundary_edges_need_both_endpoints() {
    let mut onto = gene_disease();
    link(&mut onto, "associatesWith", "TREM2", "Alzheimers");
    let config = ExtractionConfig::default().with_direction(TraversalDirection::Outgoing);
    let extractor = SubgraphExtractor::with_config(&onto, config);
    let result = extractor.extract_neighborhood(&ind("APOE"), 1, false, false);
    assert_eq!(result.individual_count, 2);
    assert_eq!(result.edge_count, 1);
    assert!(!result.contains_iri(&ex("TREM2")));
}

#[test]
fn test_class_filter_ignores_connectivity() {
    let mut onto = Ontology::new();
    onto.create_individual(&class("Disease"), ex("d0"));
    for i in 0..10 {
        let gene = onto.create_individual(&class("Gene"), ex(&format!("g{}", i)));
        if i < 3 {
            link(&mut onto, "associatesWith", gene.iri().local_name(), "d0");
        }
    }
    let result = SubgraphExtractor::new(&onto).filter_by_classes([class("Gene")]);
    assert_eq!(result.individual_count, 10);
    for i in 0..10 {
        assert!(result.contains_iri(&ex(&format!("g{}", i))));
    }
    assert!(!result.contains_iri(&ex("d0")));
    assert_eq!(result.edge_count, 0);
}

#[test]
fn test_filter_by_individuals() {
    let onto = gene_disease();
    let extractor = SubgraphExtractor::new(&onto);
    let result = extractor.filter_by_individuals([ind("APOE"), ind("Alzheimers"), ind("Unknown")]);
    assert_eq!(result.individual_count, 2);
    assert_eq!(result.edge_count, 1);
    let single = extractor.filter_by_individuals([ind("APOE")]);
    assert_eq!(single.individual_count, 1);
    assert_eq!(single.edge_count, 0);
}

#[test]
fn test_shortest_path_prefers_fewer_hops() {
    let onto = two_routes();
    let path = SubgraphExtractor::new(&onto).extract_path(&ind("A"), &ind("D"));
    assert_eq!(path.individuals, vec![ind("A"), ind("B"), ind("D")]);
    assert_eq!(path.len(), 2);
}

#[test]
fn test_path_tie_break_follows_insertion_order() {
    let mut first = Ontology::new();
    for (s, t) in [("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")] {
        link(&mut first, "next", s, t);
    }
    let path = SubgraphExtractor::new(&first).extract_path(&ind("A"), &ind("D"));
    assert_eq!(path.individuals, vec![ind("A"), ind("B"), ind("D")]);

    let mut second = Ontology::new();
    for (s, t) in [("A", "C"), ("A", "B"), ("B", "D"), ("C", "D")] {
        link(&mut second, "next", s, t);
    }
    let path = SubgraphExtractor::new(&second).extract_path(&ind("A"), &ind("D"));
    assert_eq!(path.individuals, vec![ind("A"), ind("C"), ind("D")]);
}

#[test]
fn test_path_edge_cases() {
    let onto = two_routes();
    let config = ExtractionConfig::default().with_direction(TraversalDirection::Outgoing);
    let extractor = SubgraphExtractor::with_config(&onto, config);
    assert!(extractor.extract_path(&ind("D"), &ind("A")).is_empty());
    assert!(extractor.extract_path(&ind("A"), &ind("Nowhere")).is_empty());

    let same = extractor.extract_path(&ind("B"), &ind("B"));
    assert_eq!(same.individuals, vec![ind("B")]);
    assert!(same.edges.is_empty());

    let both = SubgraphExtractor::new(&onto);
    assert_eq!(both.extract_path(&ind("D"), &ind("A")).len(), 2);
}

#[test]
fn test_path_subgraph() {
    let onto = two_routes();
    let extractor = SubgraphExtractor::new(&onto);
    let path = extractor.extract_path(&ind("A"), &ind("D"));
    let result = extractor.path_subgraph(&path);
    assert_eq!(result.individual_count, 3);
    assert_eq!(result.edge_count, 2);
}

#[test]
fn test_sampling_is_deterministic() {
    let mut onto = Ontology::new();
    for i in 0..50 {
        onto.create_individual(&class("Gene"), ex(&format!("g{}", i)));
    }
    let extractor = SubgraphExtractor::new(&onto);
    let a = extractor.random_sample(10, 42);
    let b = extractor.random_sample(10, 42);
    assert_eq!(a.individual_count, 10);
    assert_eq!(a.included_iris, b.included_iris);

    let rebuilt: Ontology = onto.get_axioms().cloned().collect();
    let c = SubgraphExtractor::new(&rebuilt).random_sample(10, 42);
    assert_eq!(a.included_iris, c.included_iris);

    assert_eq!(extractor.random_sample(500, 1).individual_count, 50);
}

#[test]
fn test_sample_ceiling() {
    let mut onto = Ontology::new();
    for i in 0..20 {
        onto.create_individual(&class("Gene"), ex(&format!("g{}", i)));
    }
    let config = ExtractionConfig {
        max_sample_size: Some(5),
        ..ExtractionConfig::default()
    };
    let result = SubgraphExtractor::with_config(&onto, config).random_sample(15, 7);
    assert_eq!(result.individual_count, 5);
}

#[test]
fn test_hierarchy_flags() {
    let mut onto = gene_disease();
    onto.add_axiom(Axiom::sub_class_of(class("Gene"), class("BioEntity")));
    onto.add_axiom(Axiom::sub_class_of(class("BioEntity"), class("Thing")));
    onto.add_axiom(Axiom::sub_class_of(class("ProteinCodingGene"), class("Gene")));
    let extractor = SubgraphExtractor::new(&onto);

    let plain = extractor.extract_neighborhood(&ind("APOE"), 0, false, false);
    assert!(!plain.contains_iri(&ex("BioEntity")));

    let up = extractor.extract_neighborhood(&ind("APOE"), 0, true, false);
    assert!(up.contains_iri(&ex("BioEntity")));
    assert!(up.contains_iri(&ex("Thing")));
    assert!(!up.contains_iri(&ex("ProteinCodingGene")));
    assert!(up
        .ontology
        .contains_axiom(&Axiom::sub_class_of(class("BioEntity"), class("Thing"))));

    let down = extractor.extract_neighborhood(&ind("APOE"), 0, false, true);
    assert!(down.contains_iri(&ex("ProteinCodingGene")));
    assert!(!down.contains_iri(&ex("BioEntity")));
}

#[test]
fn test_projection_declares_and_annotates() {
    let mut onto = gene_disease();
    for (subject, text) in [("APOE", "apolipoprotein E"), ("Alzheimers", "Alzheimer's disease")] {
        onto.add_axiom(Axiom::AnnotationAssertion {
            subject: AnnotationSubject::Iri(ex(subject)),
            annotation: Annotation::new(AnnotationProperty::label(), Literal::simple(text)),
        });
    }
    let extractor = SubgraphExtractor::new(&onto);
    let result = extractor.extract_neighborhood(&ind("APOE"), 0, false, false);
    let labels: Vec<_> = result
        .ontology
        .axioms_of_kind(AxiomKind::AnnotationAssertion)
        .collect();
    assert_eq!(labels.len(), 1);
    assert!(result.ontology.is_declared(&ind("APOE").to_entity()));
    assert!(result.ontology.is_declared(&class("Gene").into()));
    assert_eq!(result.ontology.iri(), Some(&ex("genes")));

    let no_synth = ExtractionConfig {
        synthesize_declarations: false,
        ..ExtractionConfig::default()
    };
    let result = SubgraphExtractor::with_config(&onto, no_synth).extract_neighborhood(&ind("APOE"), 0, false, false);
    assert!(!result.ontology.is_declared(&ind("APOE").to_entity()));
    assert!(result.ontology.is_declared(&class("Gene").into()));
}

#[test]
fn test_anonymous_annotation_value_must_be_selected() {
    let mut onto = gene_disease();
    let note = AnonymousIndividual::new("note");
    onto.add_axiom(Axiom::AnnotationAssertion {
        subject: AnnotationSubject::Iri(ex("APOE")),
        annotation: Annotation::new(
            AnnotationProperty::new(vocab::RDFS_COMMENT),
            AnnotationValue::Anonymous(note.clone()),
        ),
    });
    let extractor = SubgraphExtractor::new(&onto);

    let result = extractor.filter_by_individuals([ind("APOE")]);
    assert_eq!(result.ontology.axioms_of_kind(AxiomKind::AnnotationAssertion).count(), 0);
    assert_eq!(result.individual_count, 1);
    assert_eq!(result.ontology.get_individuals(), vec![ind("APOE")]);

    let result = extractor.filter_by_individuals([ind("APOE"), Individual::Anonymous(note)]);
    assert_eq!(result.ontology.axioms_of_kind(AxiomKind::AnnotationAssertion).count(), 1);
    assert_eq!(result.individual_count, 2);
    assert_eq!(result.ontology.get_individuals().len(), result.individual_count);
}

#[test]
fn test_source_is_untouched() {
    let onto = gene_disease();
    let before = onto.clone();
    let extractor = SubgraphExtractor::new(&onto);
    extractor.extract_neighborhood(&ind("APOE"), 2, true, true);
    extractor.random_sample(1, 3);
    assert_eq!(onto, before);
}

#[test]
fn test_request_intersects_criteria() {
    let mut onto = Ontology::new();
    onto.create_individual(&class("Disease"), ex("d0"));
    for i in 0..10 {
        onto.create_individual(&class("Gene"), ex(&format!("g{}", i)));
        if i < 3 {
            link(&mut onto, "associatesWith", &format!("g{}", i), "d0");
        }
    }
    let extractor = SubgraphExtractor::new(&onto);
    let result = extractor
        .request()
        .with_classes([class("Gene")])
        .with_seed(ind("d0"))
        .with_max_depth(1)
        .execute()
        .unwrap();
    assert_eq!(result.individual_count, 3);

    let sampled = extractor
        .request()
        .with_classes([class("Gene")])
        .with_sample(4, 9)
        .execute()
        .unwrap();
    assert_eq!(sampled.individual_count, 4);

    let seeded = extractor
        .request()
        .with_seed(ind("g0"))
        .with_direction(TraversalDirection::Incoming)
        .execute()
        .unwrap();
    assert_eq!(seeded.individual_count, 1);
}

#[test]
fn test_invalid_requests() {
    let onto = gene_disease();
    let extractor = SubgraphExtractor::new(&onto);
    assert!(matches!(
        extractor.request().execute(),
        Err(SubgraphError::InvalidRequest(_))
    ));
    assert!(matches!(
        extractor.request().with_classes([class("Gene")]).with_max_depth(2).execute(),
        Err(SubgraphError::InvalidRequest(_))
    ));
}

fn arb_graph() -> impl Strategy<Value = Ontology> {
    prop::collection::vec((0u8..8, 0u8..8), 0..24).prop_map(|edges| {
        let mut onto = Ontology::new();
        for (s, t) in edges {
            link(&mut onto, "next", &format!("n{}", s), &format!("n{}", t));
        }
        onto
    })
}

proptest! {
    #[test]
    fn prop_neighborhood_grows_with_depth(onto in arb_graph(), seed in 0u8..8) {
        let extractor = SubgraphExtractor::new(&onto);
        let seed = ind(&format!("n{}", seed));
        let mut previous: BTreeSet<Individual> = BTreeSet::new();
        for depth in 0..5 {
            let reached: BTreeSet<Individual> = extractor.graph().bfs(&seed, depth).into_iter().collect();
            prop_assert!(previous.is_subset(&reached));
            let result = extractor.extract_neighborhood(&seed, depth, false, false);
            prop_assert_eq!(result.individual_count, reached.len());
            previous = reached;
        }
    }

    #[test]
    fn prop_shortest_path_is_valid_and_minimal(onto in arb_graph(), s in 0u8..8, t in 0u8..8) {
        let config = ExtractionConfig::default().with_direction(TraversalDirection::Outgoing);
        let extractor = SubgraphExtractor::with_config(&onto, config);
        let (source, target) = (ind(&format!("n{}", s)), ind(&format!("n{}", t)));
        let path = extractor.extract_path(&source, &target);
        let distance = (0..8).find(|d| extractor.graph().bfs(&source, *d).contains(&target));
        match distance {
            None => prop_assert!(path.is_empty()),
            Some(d) => {
                prop_assert_eq!(path.len(), d);
                prop_assert_eq!(path.source(), Some(&source));
                prop_assert_eq!(path.target(), Some(&target));
                for (i, edge) in path.edges.iter().enumerate() {
                    prop_assert_eq!(&edge.source, &path.individuals[i]);
                    prop_assert_eq!(&edge.target, &path.individuals[i + 1]);
                    prop_assert!(onto.contains_axiom(&Axiom::object_property_assertion(
                        edge.property.clone(),
                        edge.source.clone(),
                        edge.target.clone(),
                    )));
                }
            }
        }
    }
}
