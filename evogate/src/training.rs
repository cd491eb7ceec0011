//! The trainer drives the generational loop: crossover,
//! mutation, gene transfer, evaluation, sorting and pruning,
//! repeated for a fixed number of generations.

use crate::genomics::GeneticConfig;
use crate::lessons::LessonSet;
use crate::networks::Predictor;
use crate::populations::logging::EvolutionLogger;
use crate::populations::{ConfigError, Population, PopulationConfig};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Evolves a population against a lesson set.
///
/// The trainer owns the population, the lesson set, the
/// evaluation model and the run's single random source; nothing
/// outside it mutates evolution state. Construction validates
/// the configuration, so a running trainer never fails: it
/// executes exactly the configured number of generations, with
/// no early stop even once a zero-error individual exists.
pub struct Trainer<P> {
    population: Population,
    lessons: LessonSet,
    predictor: P,
    genetic_config: GeneticConfig,
    population_config: PopulationConfig,
    rng: StdRng,
    generation: usize,
}

impl<P: Predictor> Trainer<P> {
    /// Creates a trainer with a fresh random population,
    /// seeding the run's random source from system entropy.
    ///
    /// # Errors
    /// Returns an error if the gene count is odd, the population
    /// size cannot form a parent pair, or the gene count differs
    /// from the evaluation model's connection count.
    pub fn new(
        predictor: P,
        lessons: LessonSet,
        population_config: PopulationConfig,
        genetic_config: GeneticConfig,
    ) -> Result<Trainer<P>, ConfigError> {
        Self::with_rng(
            predictor,
            lessons,
            population_config,
            genetic_config,
            StdRng::from_entropy(),
        )
    }

    /// Creates a trainer whose random source is seeded with
    /// `seed`, for reproducible runs.
    ///
    /// # Errors
    /// As for [`Trainer::new`].
    pub fn with_seed(
        predictor: P,
        lessons: LessonSet,
        population_config: PopulationConfig,
        genetic_config: GeneticConfig,
        seed: u64,
    ) -> Result<Trainer<P>, ConfigError> {
        Self::with_rng(
            predictor,
            lessons,
            population_config,
            genetic_config,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        predictor: P,
        lessons: LessonSet,
        population_config: PopulationConfig,
        genetic_config: GeneticConfig,
        mut rng: StdRng,
    ) -> Result<Trainer<P>, ConfigError> {
        let gene_count = genetic_config.gene_count.get();
        if gene_count % 2 != 0 {
            return Err(ConfigError::OddGeneCount(gene_count));
        }
        if population_config.size.get() < 2 {
            return Err(ConfigError::PopulationTooSmall(population_config.size.get()));
        }
        if gene_count != predictor.gene_count() {
            return Err(ConfigError::GeneCountMismatch {
                configured: gene_count,
                predictor: predictor.gene_count(),
            });
        }
        let population = Population::new(&population_config, &genetic_config, &mut rng);
        Ok(Trainer {
            population,
            lessons,
            predictor,
            genetic_config,
            population_config,
            rng,
            generation: 0,
        })
    }

    /// Runs every remaining generation, handing a snapshot of
    /// the population to `logger` after each one.
    pub fn train(&mut self, logger: &mut EvolutionLogger) {
        while !self.is_done() {
            let generation = self.generation;
            self.step();
            logger.log(generation, &self.population);
        }
    }

    /// Executes one full generation: crossover, mutation on its
    /// configured interval, a chance of gene transfer, evaluation
    /// of every unscored member, the stable fitness sort, and
    /// pruning back to the target size.
    ///
    /// Does nothing once the configured generation count has
    /// been reached.
    pub fn step(&mut self) {
        if self.is_done() {
            return;
        }
        self.population.crossover(&self.genetic_config);
        if self.generation % self.population_config.mutation_interval.get() == 0 {
            self.population.mutate(&self.genetic_config, &mut self.rng);
        }
        if self.genetic_config.infection_chance > 0.0
            && self.rng.gen::<f32>() < self.genetic_config.infection_chance
        {
            self.population.infect(&self.genetic_config, &mut self.rng);
        }
        self.population
            .evaluate_fitness(&self.predictor, &self.lessons);
        self.population.sort_by_fitness();
        self.population.prune();
        self.generation += 1;
    }

    /// Returns whether the configured generation count has run.
    pub fn is_done(&self) -> bool {
        self.generation >= self.population_config.generations
    }

    /// Returns the number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the population in its current state.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Returns the lesson set the run trains against.
    pub fn lessons(&self) -> &LessonSet {
        &self.lessons
    }
}
