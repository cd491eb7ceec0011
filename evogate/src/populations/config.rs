use std::num::NonZeroUsize;

/// Configuration data for population generation
/// and the generational training loop.
#[derive(Clone, Debug)]
pub struct PopulationConfig {
    /// Target size of the population. Crossover grows the
    /// population past this size within a generation; pruning
    /// restores it before the generation completes.
    pub size: NonZeroUsize,
    /// Number of generations a run executes. The trainer always
    /// runs the full count, even if a perfect individual appears
    /// earlier.
    pub generations: usize,
    /// Generations between mutation events: mutation runs in
    /// every generation whose index is a multiple of this value.
    pub mutation_interval: NonZeroUsize,
}

impl PopulationConfig {
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
    /// use evogate::PopulationConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = PopulationConfig {
    ///     size: NonZeroUsize::new(100).unwrap(),
    ///     generations: 1000,
    ///     ..PopulationConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            // SAFETY: 1 is a valid NonZeroUsize. Replace this with
            // NonZeroUsize::new(1).unwrap() once const Option::unwrap
            // becomes stable.
            size: unsafe { NonZeroUsize::new_unchecked(1) },
            generations: 0,
            // SAFETY: as above.
            mutation_interval: unsafe { NonZeroUsize::new_unchecked(1) },
        }
    }
}
