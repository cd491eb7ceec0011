//! Individuals are candidate solutions: a fixed-length vector
//! of connection weights plus a cached error count.
mod config;

pub use config::GeneticConfig;

use crate::lessons::LessonSet;
use crate::networks::Predictor;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A candidate weight vector and its cached fitness.
///
/// Fitness is the number of lessons the individual predicts
/// incorrectly, so lower is better. It is `None` until the
/// individual has been evaluated, and every operation that
/// changes a gene resets it to `None`: a cached count may
/// never outlive the gene configuration it was computed for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    id: u64,
    genes: Vec<f32>,
    fitness: Option<usize>,
}

impl Individual {
    /// Returns a new unevaluated individual with genes drawn
    /// uniformly from [0, 1].
    pub(crate) fn new(id: u64, config: &GeneticConfig, rng: &mut impl Rng) -> Individual {
        Individual {
            id,
            genes: (0..config.gene_count.get())
                .map(|_| rng.gen_range(0.0..=1.0))
                .collect(),
            fitness: None,
        }
    }

    /// Returns a new unevaluated individual with the given genes.
    pub(crate) fn from_genes(id: u64, genes: Vec<f32>) -> Individual {
        Individual {
            id,
            genes,
            fitness: None,
        }
    }

    /// Returns the individual's unique id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the individual's genes.
    pub fn genes(&self) -> &[f32] {
        &self.genes
    }

    /// Returns the cached error count, or `None` if the individual
    /// has not been evaluated since its genes last changed.
    pub fn fitness(&self) -> Option<usize> {
        self.fitness
    }

    /// Adjusts the gene at `index` by `delta` and invalidates
    /// the cached fitness.
    pub(crate) fn nudge_gene(&mut self, index: usize, delta: f32) {
        self.genes[index] += delta;
        self.fitness = None;
    }

    /// Overwrites the gene at `index` and invalidates the
    /// cached fitness.
    pub(crate) fn set_gene(&mut self, index: usize, value: f32) {
        self.genes[index] = value;
        self.fitness = None;
    }

    /// Forgets the cached fitness without touching the genes.
    pub(crate) fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Counts the individual's prediction errors over `lessons`
    /// and caches the result.
    ///
    /// The count is computed once per gene configuration: if a
    /// cached fitness is present it is returned unchanged.
    ///
    /// # Examples
    /// ```
    /// use evogate::lessons::{LessonSet, LogicOp};
    /// use evogate::networks::ThresholdNetwork;
    /// use evogate::{GeneticConfig, PopulationConfig, Trainer};
    /// use std::num::NonZeroUsize;
    ///
    /// # let genetic_config = GeneticConfig {
    /// #     gene_count: NonZeroUsize::new(6).unwrap(),
    /// #     ..GeneticConfig::zero()
    /// # };
    /// # let population_config = PopulationConfig {
    /// #     size: NonZeroUsize::new(4).unwrap(),
    /// #     generations: 1,
    /// #     ..PopulationConfig::zero()
    /// # };
    /// # let mut trainer = Trainer::with_seed(
    /// #     ThresholdNetwork::new(1.5),
    /// #     LessonSet::new(LogicOp::And),
    /// #     population_config,
    /// #     genetic_config,
    /// #     7,
    /// # ).unwrap();
    /// # trainer.step();
    /// // After a completed generation every member is scored.
    /// for member in trainer.population().members() {
    ///     assert!(member.fitness().unwrap() <= 4);
    /// }
    /// ```
    pub fn score<P: Predictor>(&mut self, predictor: &P, lessons: &LessonSet) -> usize {
        if let Some(errors) = self.fitness {
            return errors;
        }
        let errors = lessons
            .iter()
            .filter(|lesson| predictor.predict(&self.genes, lesson) != lesson.expected)
            .count();
        self.fitness = Some(errors);
        errors
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id = {} | errors = ", self.id)?;
        match self.fitness {
            Some(errors) => write!(f, "{}", errors)?,
            None => write!(f, "-")?,
        }
        write!(f, " | genes = ")?;
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.2}", gene)?;
        }
        Ok(())
    }
}
