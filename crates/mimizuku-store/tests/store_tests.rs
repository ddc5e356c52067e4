use mimizuku_core::{Axiom, Class, DataProperty, Individual, Iri, Literal, ObjectProperty};
use mimizuku_store::{Ontology, OntologyChange};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn ex(local: &str) -> Iri {
    Iri::new(format!("http://example.org/{}", local))
}

fn ind(n: u8) -> Individual {
    Individual::named(ex(&format!("i{}", n)))
}

/// Small generated ABox/TBox fragments over a tiny vocabulary, so that
/// duplicates and shared entities are frequent.
fn arb_axiom() -> impl Strategy<Value = Axiom> {
    prop_oneof![
        (0u8..4).prop_map(|c| Axiom::declaration(Class::new(ex(&format!("C{}", c))))),
        (0u8..4, 0u8..4).prop_map(|(a, b)| Axiom::sub_class_of(
            Class::new(ex(&format!("C{}", a))),
            Class::new(ex(&format!("C{}", b)))
        )),
        (0u8..4, 0u8..8).prop_map(|(c, i)| Axiom::class_assertion(
            Class::new(ex(&format!("C{}", c))),
            ind(i)
        )),
        (0u8..2, 0u8..8, 0u8..8).prop_map(|(p, s, t)| Axiom::object_property_assertion(
            ObjectProperty::new(ex(&format!("p{}", p))),
            ind(s),
            ind(t)
        )),
        (0u8..2, 0u8..8, 0u8..3).prop_map(|(p, s, v)| Axiom::data_property_assertion(
            DataProperty::new(ex(&format!("d{}", p))),
            ind(s),
            Literal::simple(format!("v{}", v))
        )),
    ]
}

proptest! {
    #[test]
    fn prop_insertion_is_idempotent(axioms in prop::collection::vec(arb_axiom(), 0..40)) {
        let mut onto = Ontology::new();
        onto.extend(axioms.clone());
        let count = onto.axiom_count();
        let distinct: BTreeSet<&Axiom> = axioms.iter().collect();
        prop_assert_eq!(count, distinct.len());
        for axiom in &axioms {
            prop_assert!(!onto.add_axiom(axiom.clone()));
        }
        prop_assert_eq!(onto.axiom_count(), count);
    }

    #[test]
    fn prop_classification_matches_assertions(axioms in prop::collection::vec(arb_axiom(), 0..40)) {
        let onto: Ontology = axioms.into_iter().collect();
        for axiom in onto.get_axioms() {
            if let Some((class, individual)) = axiom.as_class_assertion() {
                let class = class.as_class().unwrap();
                prop_assert!(onto.get_individuals_of_class(class).contains(individual));
                prop_assert!(onto.get_classes_for_individual(individual).contains(class));
            }
        }
        for class in onto.get_classes() {
            for individual in onto.get_individuals_of_class(class) {
                prop_assert!(onto.contains_axiom(&Axiom::class_assertion(class.clone(), individual)));
            }
        }
    }

    #[test]
    fn prop_reverse_indices_are_exact(axioms in prop::collection::vec(arb_axiom(), 0..40)) {
        let onto: Ontology = axioms.into_iter().collect();
        for p in 0u8..2 {
            let property = DataProperty::new(ex(&format!("d{}", p)));
            for v in 0u8..3 {
                let value = Literal::simple(format!("v{}", v));
                let expected: BTreeSet<Individual> = onto
                    .get_axioms()
                    .filter_map(|a| a.as_data_property_assertion())
                    .filter(|(q, _, w)| **q == property && **w == value)
                    .map(|(_, s, _)| s.clone())
                    .collect();
                let found: BTreeSet<Individual> =
                    onto.search_by_data_property(&property, &value).into_iter().collect();
                prop_assert_eq!(found, expected);
            }
        }
    }

    #[test]
    fn prop_remove_all_empties_indices(axioms in prop::collection::vec(arb_axiom(), 0..40)) {
        let mut onto: Ontology = axioms.clone().into_iter().collect();
        for axiom in &axioms {
            onto.remove_axiom(axiom);
        }
        prop_assert!(onto.is_empty());
        prop_assert_eq!(onto.get_entities().count(), 0);
        prop_assert!(onto.get_individuals().is_empty());
        prop_assert_eq!(onto.statistics().axioms_by_kind.len(), 0);
    }
}

#[test]
fn test_duplicate_class_assertion_counts_once() {
    let mut onto = Ontology::new();
    let axiom = Axiom::class_assertion(Class::new(ex("Disease")), Individual::named(ex("Alzheimers")));
    onto.add_axiom(axiom.clone());
    onto.add_axiom(axiom);
    assert_eq!(onto.axiom_count(), 1);
}

#[test]
fn test_search_single_data_value() {
    let mut onto = Ontology::new();
    let has_name = DataProperty::new(ex("hasName"));
    let apoe = Individual::named(ex("APOE"));
    onto.add_data_property_assertion(&apoe, &has_name, Literal::simple("APOE Gene"));
    assert_eq!(
        onto.search_by_data_property(&has_name, &Literal::simple("APOE Gene")),
        vec![apoe]
    );
}

#[test]
fn test_edges_follow_insertion_order() {
    let mut onto = Ontology::new();
    let p = ObjectProperty::new(ex("p"));
    for target in [3u8, 1, 2] {
        onto.add_object_property_assertion(&ind(0), &p, &ind(target));
    }
    let targets: Vec<&Individual> = onto.outgoing_edges(&ind(0)).iter().map(|e| &e.target).collect();
    assert_eq!(targets, vec![&ind(3), &ind(1), &ind(2)]);
    assert_eq!(onto.incoming_edges(&ind(1))[0].source, ind(0));
    assert_eq!(onto.get_object_property_assertions_for_property(&p).len(), 3);
}

#[test]
fn test_batch_with_readd_of_removed_axiom() {
    let mut onto = Ontology::new();
    let axiom = Axiom::declaration(Class::new(ex("Gene")));
    onto.add_axiom(axiom.clone());
    let result = onto.apply_changes(vec![
        OntologyChange::remove(axiom.clone()),
        OntologyChange::remove(axiom.clone()),
    ]);
    assert!(result.is_err());
    assert!(onto.contains_axiom(&axiom));

    let applied = onto
        .apply_changes(vec![
            OntologyChange::remove(axiom.clone()),
            OntologyChange::add(axiom.clone()),
        ])
        .unwrap();
    assert_eq!(applied, 2);
    assert!(onto.contains_axiom(&axiom));
}

#[test]
fn test_statistics_serialize() {
    let mut onto = Ontology::new();
    onto.create_individual(&Class::new(ex("Gene")), ex("APOE"));
    let json = serde_json::to_value(onto.statistics()).unwrap();
    assert_eq!(json["individual_count"], 1);
    assert_eq!(json["class_count"], 1);
}
