//! Subgraph extractor

use mimizuku_core::{Class, Entity, Individual};
use mimizuku_store::Ontology;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::config::ExtractionConfig;
use crate::graph::{subclass_closure, superclass_closure, IndividualGraph};
use crate::projection::{project, Closure};
use crate::request::SubgraphRequest;
use crate::result::{ExtractedPath, FilterResult};

/// Read-only extraction over a borrowed ontology. The source is never
/// modified; every result owns a freshly built ontology.
#[derive(Debug, Clone)]
pub struct SubgraphExtractor<'a> {
    ontology: &'a Ontology,
    config: ExtractionConfig,
}

impl<'a> SubgraphExtractor<'a> {
    pub fn new(ontology: &'a Ontology) -> Self {
        Self::with_config(ontology, ExtractionConfig::default())
    }

    pub fn with_config(ontology: &'a Ontology, config: ExtractionConfig) -> Self {
        Self { ontology, config }
    }

    pub fn ontology(&self) -> &'a Ontology {
        self.ontology
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn graph(&self) -> IndividualGraph<'a> {
        IndividualGraph::new(self.ontology, self.config.direction)
    }

    /// Individuals within `depth` hops of `seed` and everything needed to
    /// describe them. With the hierarchy flags, superclasses and/or
    /// subclasses of their asserted classes join the projection.
    pub fn extract_neighborhood(
        &self,
        seed: &Individual,
        depth: usize,
        include_superclasses: bool,
        include_subclasses: bool,
    ) -> FilterResult {
        let individuals = self.neighborhood_individuals(seed, depth);
        info!(seed = %seed, depth, individuals = individuals.len(), "neighborhood extracted");
        let closure = self.close(individuals, BTreeSet::new(), include_superclasses, include_subclasses);
        self.project(&closure)
    }

    /// Shortest path from `source` to `target` following the configured
    /// direction. Empty when either end is unknown or no path exists.
    pub fn extract_path(&self, source: &Individual, target: &Individual) -> ExtractedPath {
        match self.graph().shortest_path(source, target) {
            Some((individuals, edges)) => {
                debug!(source = %source, target = %target, hops = edges.len(), "path found");
                ExtractedPath { individuals, edges }
            }
            None => {
                debug!(source = %source, target = %target, "no path");
                ExtractedPath::default()
            }
        }
    }

    /// Projection onto the nodes of `path`.
    pub fn path_subgraph(&self, path: &ExtractedPath) -> FilterResult {
        let closure = self.close(path.individuals.iter().cloned().collect(), BTreeSet::new(), false, false);
        self.project(&closure)
    }

    /// Projection onto the given individuals. Unknown individuals are ignored.
    pub fn filter_by_individuals<I>(&self, individuals: I) -> FilterResult
    where
        I: IntoIterator<Item = Individual>,
    {
        let selected = self.known_individuals(individuals);
        let closure = self.close(selected, BTreeSet::new(), false, false);
        self.project(&closure)
    }

    /// Projection onto every asserted instance of the given classes,
    /// connected or not.
    pub fn filter_by_classes<I>(&self, classes: I) -> FilterResult
    where
        I: IntoIterator<Item = Class>,
    {
        let classes = self.known_classes(classes);
        let individuals = self.instances_of(&classes);
        let closure = self.close(individuals, classes, false, false);
        self.project(&closure)
    }

    /// Projection onto `n` individuals chosen by a ChaCha8 generator seeded
    /// with `seed`. The same ontology, `n` and `seed` always choose the same
    /// individuals.
    pub fn random_sample(&self, n: usize, seed: u64) -> FilterResult {
        let candidates = self.ontology.get_individuals();
        let individuals = self.sample(&candidates, n, seed);
        let closure = self.close(individuals, BTreeSet::new(), false, false);
        self.project(&closure)
    }

    /// Start a combined request.
    pub fn request(&self) -> SubgraphRequest<'_, 'a> {
        SubgraphRequest::new(self)
    }

    pub(crate) fn neighborhood_individuals(&self, seed: &Individual, depth: usize) -> BTreeSet<Individual> {
        self.graph().bfs(seed, depth).into_iter().collect()
    }

    pub(crate) fn known_individuals<I>(&self, individuals: I) -> BTreeSet<Individual>
    where
        I: IntoIterator<Item = Individual>,
    {
        individuals
            .into_iter()
            .filter(|i| self.ontology.contains_entity(&i.to_entity()))
            .collect()
    }

    pub(crate) fn known_classes<I>(&self, classes: I) -> BTreeSet<Class>
    where
        I: IntoIterator<Item = Class>,
    {
        classes
            .into_iter()
            .filter(|c| self.ontology.contains_entity(&Entity::Class(c.clone())))
            .collect()
    }

    pub(crate) fn instances_of(&self, classes: &BTreeSet<Class>) -> BTreeSet<Individual> {
        classes
            .iter()
            .flat_map(|c| self.ontology.get_individuals_of_class(c))
            .collect()
    }

    /// Choose `n` of `candidates` (sorted), bounded by the configured ceiling.
    pub(crate) fn sample(&self, candidates: &[Individual], n: usize, seed: u64) -> BTreeSet<Individual> {
        let n = self.config.sample_size(n);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let chosen: BTreeSet<Individual> = candidates.choose_multiple(&mut rng, n).cloned().collect();
        debug!(requested = n, candidates = candidates.len(), chosen = chosen.len(), seed, "sampled individuals");
        chosen
    }

    /// Add the asserted classes of `individuals` to `classes`, then the
    /// hierarchy expansions that were asked for.
    pub(crate) fn close(
        &self,
        individuals: BTreeSet<Individual>,
        mut classes: BTreeSet<Class>,
        include_superclasses: bool,
        include_subclasses: bool,
    ) -> Closure {
        for individual in &individuals {
            classes.extend(self.ontology.get_classes_for_individual(individual));
        }
        let mut expanded = classes.clone();
        if include_superclasses {
            expanded.extend(superclass_closure(self.ontology, &classes));
        }
        if include_subclasses {
            expanded.extend(subclass_closure(self.ontology, &classes));
        }
        Closure::new(individuals, expanded)
    }

    pub(crate) fn project(&self, closure: &Closure) -> FilterResult {
        project(self.ontology, closure, &self.config)
    }
}
