//! Generation snapshots for external reporting.
//!
//! The trainer hands a read-only view of the population to an
//! [`EvolutionLogger`] after each generation; nothing in this
//! module feeds back into the evolution itself.
use super::Population;

use crate::genomics::Individual;

use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug)]
pub enum ReportingLevel {
    /// Clones every member of the population.
    AllMembers,
    /// Clones only the best evaluated member.
    Champion,
    /// Clones no members.
    NoMembers,
}

/// A snapshot of a population at the end of a generation.
#[derive(Clone, Debug)]
pub struct Log {
    pub generation: usize,
    pub population_size: usize,
    pub members: MemberRecord,
    pub fitness_stats: Stats,
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "generation {} | {} individuals | errors: min {:.0}, max {:.0}, mean {:.2}, median {:.1}",
            self.generation,
            self.population_size,
            self.fitness_stats.minimum,
            self.fitness_stats.maximum,
            self.fitness_stats.mean,
            self.fitness_stats.median,
        )?;
        match &self.members {
            MemberRecord::All(members) => {
                for (position, member) in members.iter().enumerate() {
                    writeln!(f, "| ({}) \t| {}", position + 1, member)?;
                }
            }
            MemberRecord::Champion(champion) => writeln!(f, "champion: {}", champion)?,
            MemberRecord::None => {}
        }
        Ok(())
    }
}

/// A reporting-level dependant store
/// of members from a population.
#[derive(Clone, Debug)]
pub enum MemberRecord {
    /// Every member, in current (sorted) order.
    All(Vec<Individual>),
    /// Only the best evaluated member.
    Champion(Individual),
    /// Empty.
    None,
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f32,
    pub minimum: f32,
    pub mean: f32,
    pub median: f32,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    /// All fields are 0 for an empty sequence.
    ///
    /// # Examples
    /// ```
    /// use evogate::populations::logging::Stats;
    ///
    /// let stats = Stats::from([3.0, 1.0, 2.0, 2.0].iter().copied());
    /// assert_eq!(stats.maximum, 3.0);
    /// assert_eq!(stats.minimum, 1.0);
    /// assert_eq!(stats.mean, 2.0);
    /// assert_eq!(stats.median, 2.0);
    /// ```
    pub fn from(data: impl Iterator<Item = f32>) -> Stats {
        let mut data: Vec<f32> = data.collect();
        if data.is_empty() {
            return Stats {
                maximum: 0.0,
                minimum: 0.0,
                mean: 0.0,
                median: 0.0,
            };
        }
        let mid = data.len() / 2;
        let (mut max, mut min, mut sum) = (f32::MIN, f32::MAX, 0.0);
        for d in &data {
            max = d.max(max);
            min = d.min(min);
            sum += d;
        }
        let mean = sum / data.len() as f32;
        let mut median = *data
            .select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap())
            .1;
        if data.len() % 2 == 0 {
            median = (median
                + *data
                    .select_nth_unstable_by(mid - 1, |a, b| a.partial_cmp(b).unwrap())
                    .1)
                / 2.0;
        }
        Stats {
            maximum: max,
            minimum: min,
            mean,
            median,
        }
    }
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger {
    reporting_level: ReportingLevel,
    logs: Vec<Log>,
}

impl EvolutionLogger {
    /// Returns a logger with the appropiate reporting level.
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Stores a snapshot of a population at the end of
    /// `generation`.
    pub fn log(&mut self, generation: usize, population: &Population) {
        let fitness_stats = Stats::from(
            population
                .members()
                .filter_map(|m| m.fitness().map(|errors| errors as f32)),
        );
        self.logs.push(Log {
            generation,
            population_size: population.len(),
            members: match self.reporting_level {
                ReportingLevel::AllMembers => {
                    MemberRecord::All(population.members().cloned().collect())
                }
                ReportingLevel::Champion => population
                    .champion()
                    .cloned()
                    .map(MemberRecord::Champion)
                    .unwrap_or(MemberRecord::None),
                ReportingLevel::NoMembers => MemberRecord::None,
            },
            fitness_stats,
        })
    }

    /// Iterate over all logged snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &Log> {
        self.logs.iter()
    }

    /// Returns the number of logged snapshots.
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::GeneticConfig;
    use crate::lessons::{LessonSet, LogicOp};
    use crate::networks::ThresholdNetwork;
    use crate::populations::PopulationConfig;

    use std::num::NonZeroUsize;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn evaluated_population() -> Population {
        let mut rng = StdRng::seed_from_u64(23);
        let mut population = Population::new(
            &PopulationConfig {
                size: NonZeroUsize::new(5).unwrap(),
                ..PopulationConfig::zero()
            },
            &GeneticConfig {
                gene_count: NonZeroUsize::new(6).unwrap(),
                ..GeneticConfig::zero()
            },
            &mut rng,
        );
        population.evaluate_fitness(&ThresholdNetwork::new(1.5), &LessonSet::new(LogicOp::And));
        population
    }

    #[test]
    fn snapshot_records_every_member_in_order() {
        let mut population = evaluated_population();
        population.sort_by_fitness();
        let mut logger = EvolutionLogger::new(ReportingLevel::AllMembers);
        logger.log(7, &population);

        let log = logger.iter().next().unwrap();
        assert_eq!(log.generation, 7);
        assert_eq!(log.population_size, 5);
        match &log.members {
            MemberRecord::All(members) => {
                let snapshot: Vec<_> = members.iter().map(|m| m.id()).collect();
                let live: Vec<_> = population.members().map(|m| m.id()).collect();
                assert_eq!(snapshot, live);
            }
            record => panic!("expected all members, got {:?}", record),
        }
    }

    #[test]
    fn champion_level_stores_only_the_best_member() {
        let population = evaluated_population();
        let mut logger = EvolutionLogger::new(ReportingLevel::Champion);
        logger.log(0, &population);

        match &logger.iter().next().unwrap().members {
            MemberRecord::Champion(champion) => {
                assert_eq!(champion.fitness(), population.champion().unwrap().fitness());
            }
            record => panic!("expected champion, got {:?}", record),
        };
    }

    #[test]
    fn stats_summarize_error_counts() {
        let stats = Stats::from([4.0, 0.0, 2.0].iter().copied());
        assert_eq!(stats.minimum, 0.0);
        assert_eq!(stats.maximum, 4.0);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.median, 2.0);

        let empty = Stats::from(std::iter::empty());
        assert_eq!(empty.mean, 0.0);
    }
}
