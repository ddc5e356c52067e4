//! Combined extraction requests

use mimizuku_core::{Class, Individual};
use std::collections::BTreeSet;
use tracing::debug;

use crate::config::TraversalDirection;
use crate::extractor::SubgraphExtractor;
use crate::graph::{subclass_closure, IndividualGraph};
use crate::result::FilterResult;
use crate::SubgraphError;

/// Builder combining individual, class, neighborhood and sampling criteria.
///
/// Criteria are intersected: an individual is selected only when every
/// given criterion selects it. Sampling, if requested, runs last over the
/// selection (or over all individuals when it is the only criterion).
#[derive(Debug, Clone)]
pub struct SubgraphRequest<'e, 'a> {
    extractor: &'e SubgraphExtractor<'a>,
    individuals: Option<BTreeSet<Individual>>,
    classes: Option<BTreeSet<Class>>,
    seed: Option<Individual>,
    max_depth: Option<usize>,
    include_superclasses: bool,
    include_subclasses: bool,
    direction: Option<TraversalDirection>,
    sample: Option<(usize, u64)>,
}

impl<'e, 'a> SubgraphRequest<'e, 'a> {
    pub fn new(extractor: &'e SubgraphExtractor<'a>) -> Self {
        Self {
            extractor,
            individuals: None,
            classes: None,
            seed: None,
            max_depth: None,
            include_superclasses: false,
            include_subclasses: false,
            direction: None,
            sample: None,
        }
    }

    pub fn with_individuals<I: IntoIterator<Item = Individual>>(mut self, individuals: I) -> Self {
        self.individuals
            .get_or_insert_with(BTreeSet::new)
            .extend(individuals);
        self
    }

    pub fn with_classes<I: IntoIterator<Item = Class>>(mut self, classes: I) -> Self {
        self.classes.get_or_insert_with(BTreeSet::new).extend(classes);
        self
    }

    /// Neighborhood seed. Depth defaults to the configured default depth.
    pub fn with_seed(mut self, seed: Individual) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_superclasses(mut self, include: bool) -> Self {
        self.include_superclasses = include;
        self
    }

    /// Also expands class criteria to their asserted subclasses.
    pub fn with_subclasses(mut self, include: bool) -> Self {
        self.include_subclasses = include;
        self
    }

    pub fn with_direction(mut self, direction: TraversalDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_sample(mut self, n: usize, seed: u64) -> Self {
        self.sample = Some((n, seed));
        self
    }

    fn validate(&self) -> Result<(), SubgraphError> {
        if self.individuals.is_none()
            && self.classes.is_none()
            && self.seed.is_none()
            && self.sample.is_none()
        {
            return Err(SubgraphError::InvalidRequest(
                "no selection criteria given".to_string(),
            ));
        }
        if self.max_depth.is_some() && self.seed.is_none() {
            return Err(SubgraphError::InvalidRequest(
                "max depth given without a seed individual".to_string(),
            ));
        }
        Ok(())
    }

    /// Evaluate all criteria once and project the selection.
    pub fn execute(&self) -> Result<FilterResult, SubgraphError> {
        self.validate()?;
        let extractor = self.extractor;
        let ontology = extractor.ontology();

        let mut selected: Option<BTreeSet<Individual>> = None;
        let mut narrow = |set: BTreeSet<Individual>| {
            selected = Some(match selected.take() {
                None => set,
                Some(current) => current.intersection(&set).cloned().collect(),
            });
        };

        if let Some(individuals) = &self.individuals {
            narrow(extractor.known_individuals(individuals.iter().cloned()));
        }

        let mut requested_classes = BTreeSet::new();
        if let Some(classes) = &self.classes {
            requested_classes = extractor.known_classes(classes.iter().cloned());
            if self.include_subclasses {
                requested_classes = subclass_closure(ontology, &requested_classes);
            }
            narrow(extractor.instances_of(&requested_classes));
        }

        if let Some(seed) = &self.seed {
            let depth = self.max_depth.unwrap_or(extractor.config().default_depth);
            let direction = self.direction.unwrap_or(extractor.config().direction);
            let reached = IndividualGraph::new(ontology, direction).bfs(seed, depth);
            narrow(reached.into_iter().collect());
        }

        let mut individuals = match selected {
            Some(set) => set,
            None => ontology.get_individuals().into_iter().collect(),
        };
        if let Some((n, seed)) = self.sample {
            let pool: Vec<Individual> = individuals.into_iter().collect();
            individuals = extractor.sample(&pool, n, seed);
        }
        debug!(selected = individuals.len(), "request evaluated");

        let closure = extractor.close(
            individuals,
            requested_classes,
            self.include_superclasses,
            self.include_subclasses,
        );
        Ok(extractor.project(&closure))
    }
}
