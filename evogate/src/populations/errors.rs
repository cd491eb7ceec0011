use std::error::Error;
use std::fmt;

/// An error type indicating an invalid training configuration.
/// Surfaced at trainer construction, never mid-run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The gene count is odd, which breaks the crossover
    /// midpoint split.
    OddGeneCount(usize),
    /// The population cannot form a single parent pair.
    PopulationTooSmall(usize),
    /// The configured gene count differs from the evaluation
    /// model's connection count.
    GeneCountMismatch {
        configured: usize,
        predictor: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddGeneCount(count) => {
                write!(f, "gene count {} is odd and cannot be split for crossover", count)
            }
            Self::PopulationTooSmall(size) => {
                write!(f, "population size {} leaves no parent pair for crossover", size)
            }
            Self::GeneCountMismatch {
                configured,
                predictor,
            } => write!(
                f,
                "configured gene count {} does not match the evaluation model's {} connections",
                configured, predictor
            ),
        }
    }
}

impl Error for ConfigError {}
