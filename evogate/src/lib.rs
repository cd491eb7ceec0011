//! A genetic-algorithm trainer for tiny feed-forward boolean
//! networks.
//!
//! A population of fixed-length weight vectors ("genes") is
//! evolved until a deterministic evaluation model reproduces a
//! 2-input truth table (logical AND or OR) given as four labeled
//! lessons. Selection pressure comes from the number of lessons
//! each candidate predicts incorrectly; there is no gradient
//! computation and no generalization beyond the lesson set.
//!
//! Each generation performs, in order: crossover of successive
//! parent pairs, an occasional single-gene mutation, a chance of
//! gene transfer from the current best candidate ("infection"),
//! evaluation of every unscored candidate, a stable sort by
//! error count, and pruning back to the target population size.
//!
//! Two evaluation models are provided behind the [`Predictor`]
//! trait: a fixed 2-2-1 threshold perceptron
//! ([`ThresholdNetwork`]) and a configurable layered sigmoid
//! network ([`SigmoidNetwork`]). Both read their connection
//! weights positionally from the candidate's genes.
//!
//! # Example usage: evolving weights for the AND gate
//! ```
//! use evogate::lessons::{LessonSet, LogicOp};
//! use evogate::networks::ThresholdNetwork;
//! use evogate::populations::logging::{EvolutionLogger, ReportingLevel};
//! use evogate::{GeneticConfig, PopulationConfig, Trainer};
//! use std::num::NonZeroUsize;
//!
//! let genetic_config = GeneticConfig {
//!     gene_count: NonZeroUsize::new(ThresholdNetwork::GENE_COUNT).unwrap(),
//!     mutation_step: 0.1,
//!     infection_chance: 0.2,
//! };
//! let population_config = PopulationConfig {
//!     size: NonZeroUsize::new(20).unwrap(),
//!     generations: 50,
//!     mutation_interval: NonZeroUsize::new(5).unwrap(),
//! };
//!
//! let mut trainer = Trainer::with_seed(
//!     ThresholdNetwork::new(1.5),
//!     LessonSet::new(LogicOp::And),
//!     population_config,
//!     genetic_config,
//!     42,
//! )
//! .unwrap();
//!
//! let mut logger = EvolutionLogger::new(ReportingLevel::Champion);
//! trainer.train(&mut logger);
//!
//! let champion = trainer.population().champion().unwrap();
//! println!(
//!     "best candidate missed {} of 4 lessons",
//!     champion.fitness().unwrap()
//! );
//! ```

pub mod genomics;
pub mod lessons;
pub mod networks;
pub mod populations;
pub mod training;

pub use genomics::{GeneticConfig, Individual};
pub use lessons::{Lesson, LessonSet, LogicOp};
pub use networks::{Predictor, SigmoidNetwork, ThresholdNetwork};
pub use populations::{ConfigError, Population, PopulationConfig};
pub use training::Trainer;
