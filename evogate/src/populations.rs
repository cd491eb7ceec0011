//! A population is an ordered collection of individuals
//! with a fixed target size, evolved by crossover, mutation
//! and gene transfer, and pruned back to the target size
//! after each generation.
mod config;
mod errors;
pub mod logging;

pub use config::PopulationConfig;
pub use errors::ConfigError;

use crate::genomics::{GeneticConfig, Individual};
use crate::lessons::LessonSet;
use crate::networks::Predictor;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An ordered population of individuals.
///
/// Insertion order is meaningful until the first sort, after
/// which members are kept in ascending order of error count.
/// The population owns its members exclusively, along with the
/// id counter that keeps every id of the run unique.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Population {
    members: Vec<Individual>,
    target_size: usize,
    next_id: u64,
}

impl Population {
    /// Creates a population of `population_config.size` random
    /// individuals.
    pub fn new(
        population_config: &PopulationConfig,
        genetic_config: &GeneticConfig,
        rng: &mut impl Rng,
    ) -> Population {
        let target_size = population_config.size.get();
        let mut population = Population {
            members: Vec::with_capacity(target_size * 2),
            target_size,
            next_id: 0,
        };
        for _ in 0..target_size {
            let id = population.allocate_id();
            population
                .members
                .push(Individual::new(id, genetic_config, rng));
        }
        population
    }

    /// Ids increase monotonically for the life of the run and
    /// are never reused, even after pruning.
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Walks the population as successive parent pairs and
    /// appends two complementary children per pair.
    ///
    /// Each child takes the first half of one parent's genes and
    /// the second half of the other's, split at `gene_count / 2`.
    /// Children receive fresh ids and no fitness, and are
    /// appended at the tail, growing the population past its
    /// target size until the next pruning. Parents are left
    /// untouched, and tail-appended children become eligible
    /// parents themselves if the walk reaches them.
    ///
    /// The walk stops after `target_size / 2` pairs, or earlier
    /// if no complete pair remains.
    pub fn crossover(&mut self, genetic_config: &GeneticConfig) {
        let half = genetic_config.gene_count.get() / 2;
        let max_pairs = self.target_size / 2;
        let mut pairs = 0;
        let mut parent1 = 0;
        while pairs < max_pairs && parent1 + 1 < self.members.len() {
            let (genes_a, genes_b) = {
                let p1 = self.members[parent1].genes();
                let p2 = self.members[parent1 + 1].genes();
                let genes_a: Vec<f32> = p1[..half].iter().chain(&p2[half..]).copied().collect();
                let genes_b: Vec<f32> = p2[..half].iter().chain(&p1[half..]).copied().collect();
                (genes_a, genes_b)
            };
            let id = self.allocate_id();
            self.members.push(Individual::from_genes(id, genes_a));
            let id = self.allocate_id();
            self.members.push(Individual::from_genes(id, genes_b));
            parent1 += 2;
            pairs += 1;
        }
    }

    /// Adjusts exactly one gene of one uniformly chosen member
    /// by `±mutation_step`, invalidating its fitness.
    ///
    /// A no-op on an empty population.
    pub fn mutate(&mut self, genetic_config: &GeneticConfig, rng: &mut impl Rng) {
        if self.members.is_empty() {
            return;
        }
        let member = rng.gen_range(0..self.members.len());
        let gene = rng.gen_range(0..genetic_config.gene_count.get());
        let delta = if rng.gen_bool(0.5) {
            genetic_config.mutation_step
        } else {
            -genetic_config.mutation_step
        };
        self.members[member].nudge_gene(gene, delta);
    }

    /// Transfers genes from the best evaluated member into the
    /// rest of the population.
    ///
    /// The donor is the member with the lowest *defined* error
    /// count; members that have not been evaluated are never
    /// donors. Every other member is selected with probability
    /// `infection_chance`; a selected member copies each gene
    /// from the donor with probability 0.5 and forgets its
    /// cached fitness.
    ///
    /// A no-op when no member has been evaluated.
    pub fn infect(&mut self, genetic_config: &GeneticConfig, rng: &mut impl Rng) {
        let donor = match self.donor_index() {
            Some(index) => index,
            None => return,
        };
        let donor_id = self.members[donor].id();
        let donor_genes = self.members[donor].genes().to_vec();
        for member in &mut self.members {
            if member.id() == donor_id {
                continue;
            }
            if rng.gen::<f32>() < genetic_config.infection_chance {
                for (index, gene) in donor_genes.iter().enumerate() {
                    if rng.gen_bool(0.5) {
                        member.set_gene(index, *gene);
                    }
                }
                // Selection alone invalidates, even if every
                // per-gene flip declined.
                member.invalidate();
            }
        }
    }

    /// Index of the evaluated member with the lowest error count.
    fn donor_index(&self) -> Option<usize> {
        self.members
            .iter()
            .enumerate()
            .filter_map(|(index, member)| member.fitness().map(|errors| (index, errors)))
            .min_by_key(|&(_, errors)| errors)
            .map(|(index, _)| index)
    }

    /// Scores every member whose fitness is unset against the
    /// lesson set. Members with a cached count are skipped.
    pub fn evaluate_fitness<P: Predictor>(&mut self, predictor: &P, lessons: &LessonSet) {
        for member in &mut self.members {
            member.score(predictor, lessons);
        }
    }

    /// Stable ascending sort by error count. Tied members keep
    /// their prior relative order.
    ///
    /// # Panics
    /// Panics if any member has not been evaluated: comparing
    /// an unset fitness is a contract violation, and silently
    /// ordering on it would corrupt selection.
    pub fn sort_by_fitness(&mut self) {
        self.members.sort_by_key(|member| {
            member
                .fitness()
                .unwrap_or_else(|| panic!("unevaluated individual {} in sort", member.id()))
        });
    }

    /// Retains the first `target_size` members and discards the
    /// rest. After a sort, this keeps exactly the most fit.
    pub fn prune(&mut self) {
        self.members.truncate(self.target_size);
    }

    /// Returns the best evaluated member, or `None` if no member
    /// has been evaluated.
    pub fn champion(&self) -> Option<&Individual> {
        self.members
            .iter()
            .filter_map(|member| member.fitness().map(|errors| (errors, member)))
            .min_by_key(|&(errors, _)| errors)
            .map(|(_, member)| member)
    }

    /// Returns an iterator over the members in current order.
    pub fn members(&self) -> impl Iterator<Item = &Individual> {
        self.members.iter()
    }

    /// Returns the current number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the size the population is pruned back to.
    pub fn target_size(&self) -> usize {
        self.target_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessons::{LessonSet, LogicOp};
    use crate::networks::ThresholdNetwork;

    use std::num::NonZeroUsize;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn genetic_config() -> GeneticConfig {
        GeneticConfig {
            gene_count: NonZeroUsize::new(6).unwrap(),
            mutation_step: 0.1,
            infection_chance: 1.0,
        }
    }

    fn population_config(size: usize) -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(size).unwrap(),
            ..PopulationConfig::zero()
        }
    }

    fn population_of(genes: Vec<Vec<f32>>, target_size: usize) -> Population {
        let mut next_id = 0;
        let members = genes
            .into_iter()
            .map(|g| {
                next_id += 1;
                Individual::from_genes(next_id, g)
            })
            .collect();
        Population {
            members,
            target_size,
            next_id,
        }
    }

    #[test]
    fn crossover_children_are_complementary() {
        let p1 = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let p2 = vec![0.9, 0.8, 0.7, 0.6, 0.5, 0.4];
        let mut population = population_of(vec![p1.clone(), p2.clone()], 2);
        population.crossover(&genetic_config());

        assert_eq!(population.len(), 4);
        let members: Vec<_> = population.members().collect();
        let child_a = members[2];
        let child_b = members[3];
        assert_eq!(child_a.genes()[..3], p1[..3]);
        assert_eq!(child_a.genes()[3..], p2[3..]);
        assert_eq!(child_b.genes()[..3], p2[..3]);
        assert_eq!(child_b.genes()[3..], p1[3..]);
        assert_eq!(child_a.fitness(), None);
        assert_eq!(child_b.fitness(), None);
        assert_eq!((child_a.id(), child_b.id()), (3, 4));
        // Parents are untouched.
        assert_eq!(members[0].genes(), &p1[..]);
        assert_eq!(members[1].genes(), &p2[..]);
    }

    #[test]
    fn crossover_is_bounded_by_half_the_target_size() {
        let genes: Vec<Vec<f32>> = (0..6).map(|i| vec![i as f32; 6]).collect();
        let mut population = population_of(genes, 4);
        population.crossover(&genetic_config());
        // target_size / 2 = 2 pairs, so 4 children from members
        // 0-1 and 2-3; members 4-5 are never paired.
        assert_eq!(population.len(), 10);
        let ids: Vec<_> = population.members().map(|m| m.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn crossover_on_an_empty_population_is_a_noop() {
        let mut population = population_of(vec![], 4);
        population.crossover(&genetic_config());
        assert!(population.is_empty());
    }

    #[test]
    fn ids_are_never_reused_across_pruning() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut population = Population::new(&population_config(2), &genetic_config(), &mut rng);
        let lessons = LessonSet::new(LogicOp::And);
        let predictor = ThresholdNetwork::new(1.5);

        population.crossover(&genetic_config());
        population.evaluate_fitness(&predictor, &lessons);
        population.sort_by_fitness();
        population.prune();
        assert_eq!(population.len(), 2);

        population.crossover(&genetic_config());
        let ids: Vec<_> = population.members().map(|m| m.id()).collect();
        // The two children of the second crossover continue the
        // counter past the pruned ids 3 and 4.
        assert_eq!(ids[2..], [5, 6]);
    }

    #[test]
    fn mutation_changes_exactly_one_gene_by_the_step() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut population = population_of(vec![vec![0.0; 6]], 1);
        population.mutate(&genetic_config(), &mut rng);

        let member = population.members().next().unwrap();
        let changed: Vec<_> = member.genes().iter().filter(|g| **g != 0.0).collect();
        assert_eq!(changed.len(), 1);
        assert!((changed[0].abs() - 0.1).abs() < f32::EPSILON);
        assert_eq!(member.fitness(), None);
    }

    #[test]
    fn mutation_on_an_empty_population_is_a_noop() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut population = population_of(vec![], 4);
        population.mutate(&genetic_config(), &mut rng);
        assert!(population.is_empty());
    }

    #[test]
    fn infection_invalidates_every_selected_member() {
        let mut rng = StdRng::seed_from_u64(11);
        // Donor solves AND perfectly; the recipient misses one row.
        let mut population = population_of(vec![vec![1.0; 6], vec![0.0; 6]], 2);
        let lessons = LessonSet::new(LogicOp::And);
        population.evaluate_fitness(&ThresholdNetwork::new(1.5), &lessons);
        assert_eq!(population.members[0].fitness(), Some(0));
        assert_eq!(population.members[1].fitness(), Some(1));

        population.infect(&genetic_config(), &mut rng);

        // With infection_chance = 1.0 the recipient is always
        // selected, and therefore always invalidated.
        assert_eq!(population.members[1].fitness(), None);
        assert_eq!(population.members[0].fitness(), Some(0));
        assert!(population.members[1]
            .genes()
            .iter()
            .all(|g| *g == 0.0 || *g == 1.0));
    }

    #[test]
    fn infection_ignores_unevaluated_members_when_picking_a_donor() {
        let mut rng = StdRng::seed_from_u64(13);
        // Member 1 is unevaluated and must not be mistaken for
        // the fittest; member 2 is the true donor.
        let mut population = population_of(vec![vec![5.0; 6], vec![1.0; 6], vec![0.0; 6]], 3);
        let lessons = LessonSet::new(LogicOp::And);
        population.members[1].score(&ThresholdNetwork::new(1.5), &lessons);
        population.members[2].score(&ThresholdNetwork::new(1.5), &lessons);
        assert_eq!(population.members[1].fitness(), Some(0));

        population.infect(&genetic_config(), &mut rng);

        // Donor keeps its fitness; recipients only ever receive
        // the donor's gene value, never the unevaluated member's.
        assert_eq!(population.members[1].fitness(), Some(0));
        assert!(population.members[2]
            .genes()
            .iter()
            .all(|g| *g == 0.0 || *g == 1.0));
    }

    #[test]
    fn infection_without_any_evaluated_member_is_a_noop() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut population = population_of(vec![vec![0.5; 6], vec![0.7; 6]], 2);
        population.infect(&genetic_config(), &mut rng);
        assert!(population.members().all(|m| m.fitness().is_none()));
        assert_eq!(population.members[0].genes(), &[0.5; 6][..]);
        assert_eq!(population.members[1].genes(), &[0.7; 6][..]);
    }

    #[test]
    fn sort_is_stable_and_ascending() {
        // All-zero genes miss 3 OR rows; all-one genes miss 2.
        let zeros = vec![0.0; 6];
        let ones = vec![1.0; 6];
        let mut population = population_of(vec![zeros.clone(), zeros, ones], 3);
        let lessons = LessonSet::new(LogicOp::Or);
        population.evaluate_fitness(&ThresholdNetwork::new(1.5), &lessons);
        population.sort_by_fitness();

        let ordered: Vec<_> = population
            .members()
            .map(|m| (m.id(), m.fitness().unwrap()))
            .collect();
        // The tied members 1 and 2 keep their relative order.
        assert_eq!(ordered, vec![(3, 2), (1, 3), (2, 3)]);
    }

    #[test]
    #[should_panic(expected = "unevaluated individual")]
    fn sorting_an_unevaluated_member_panics() {
        let mut population = population_of(vec![vec![0.0; 6], vec![1.0; 6]], 2);
        population.members[0].score(
            &ThresholdNetwork::new(1.5),
            &LessonSet::new(LogicOp::And),
        );
        population.sort_by_fitness();
    }

    #[test]
    fn pruning_keeps_the_best_target_size_members() {
        let mut genes: Vec<Vec<f32>> = vec![vec![1.0; 6]; 2];
        genes.extend(vec![vec![0.0; 6]; 3]);
        let mut population = population_of(genes, 3);
        let lessons = LessonSet::new(LogicOp::Or);
        population.evaluate_fitness(&ThresholdNetwork::new(1.5), &lessons);
        population.sort_by_fitness();
        population.prune();

        assert_eq!(population.len(), 3);
        let fitnesses: Vec<_> = population.members().map(|m| m.fitness().unwrap()).collect();
        // The two 2-error members survive ahead of the 3-error ones.
        assert_eq!(fitnesses, vec![2, 2, 3]);
    }

    #[test]
    fn champion_requires_an_evaluated_member() {
        let mut population = population_of(vec![vec![1.0; 6], vec![0.0; 6]], 2);
        assert!(population.champion().is_none());

        population.evaluate_fitness(
            &ThresholdNetwork::new(1.5),
            &LessonSet::new(LogicOp::And),
        );
        assert_eq!(population.champion().unwrap().fitness(), Some(0));
    }

    #[test]
    fn serde_round_trip() {
        let mut rng = StdRng::seed_from_u64(19);
        let mut population = Population::new(&population_config(4), &genetic_config(), &mut rng);
        population.evaluate_fitness(
            &ThresholdNetwork::new(1.5),
            &LessonSet::new(LogicOp::And),
        );

        let serialized = serde_json::to_string(&population).unwrap();
        let deserialized: Population = serde_json::from_str(&serialized).unwrap();
        assert_eq!(
            population.members().collect::<Vec<_>>(),
            deserialized.members().collect::<Vec<_>>()
        );
        assert_eq!(population.target_size(), deserialized.target_size());
    }
}
