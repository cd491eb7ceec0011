use std::num::NonZeroUsize;

/// Configuration data for individual generation and the
/// genetic operators.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Using
/// values that are not in this bound may result
/// in odd behaviours and/or incorrect programs.
#[derive(Clone, Debug)]
pub struct GeneticConfig {
    /// Number of genes (connection weights) per individual.
    /// Must equal the evaluation model's gene count, and must
    /// be even so crossover can split gene vectors at the
    /// midpoint.
    pub gene_count: NonZeroUsize,
    /// Magnitude of the single-gene adjustment applied by
    /// mutation. The sign is chosen at random per invocation.
    pub mutation_step: f32,
    /// Chance that a member receives genes from the current
    /// best evaluated member during an infection pass. Also
    /// the per-generation chance that a pass runs at all.
    pub infection_chance: f32,
}

impl GeneticConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to abbreviate configuration
    /// instantiation, or to fill in unused values.
    ///
    /// # Examples
    /// ```
    /// use evogate::GeneticConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     gene_count: NonZeroUsize::new(6).unwrap(),
    ///     mutation_step: 0.1,
    ///     ..GeneticConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> GeneticConfig {
        GeneticConfig {
            // SAFETY: 1 is a valid NonZeroUsize. Replace this with
            // NonZeroUsize::new(1).unwrap() once const Option::unwrap
            // becomes stable.
            gene_count: unsafe { NonZeroUsize::new_unchecked(1) },
            mutation_step: 0.0,
            infection_chance: 0.0,
        }
    }
}
