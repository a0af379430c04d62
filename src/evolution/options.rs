//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the configuration of a run: how many
//! generations to evolve, how large the population is, how often notes
//! mutate, the shape of each melody, how chatty the logs are and when fitness
//! evaluation switches to parallel.
//!
//! ## Example
//!
//! ```rust
//! use genmelody::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(200, LogLevel::Minimal, 20, 0.05);
//! assert!(custom_options.validate().is_ok());
//!
//! // The canonical run: 100 generations of 10 melodies, 8 bars of 16 notes
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.get_population_size(), 10);
//!
//! // Odd populations cannot keep a stable size
//! let odd = EvolutionOptions::builder().population_size(9).build();
//! assert!(odd.validate().is_err());
//! ```

use crate::error::{MelodyError, Result};
use crate::genome::GenomeShape;

/// Number of top genomes copied unchanged into every new generation.
pub const ELITE_COUNT: usize = 2;

/// How much the engine logs per generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Best score per generation plus every individual at debug level.
    Verbose,
    /// Best score per generation.
    Minimal,
    /// Nothing per generation.
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_generations: usize,
    log_level: LogLevel,
    population_size: usize,
    mutation_rate: f64,
    shape: GenomeShape,
    /// Minimum population size scored in parallel
    parallel_threshold: usize,
}

impl EvolutionOptions {
    pub fn new(
        num_generations: usize,
        log_level: LogLevel,
        population_size: usize,
        mutation_rate: f64,
    ) -> Self {
        Self {
            num_generations,
            log_level,
            population_size,
            mutation_rate,
            shape: GenomeShape::default(),
            parallel_threshold: 1000,
        }
    }

    /// Checks that the options describe a run that can keep a stable population.
    ///
    /// # Errors
    ///
    /// Returns `MelodyError::Configuration` if:
    /// - The population is odd or smaller than the elites plus one bred pair
    /// - The number of generations is zero
    /// - The mutation rate is outside `[0, 1]`
    /// - The genome shape has no notes
    pub fn validate(&self) -> Result<()> {
        if self.population_size < ELITE_COUNT + 2 {
            return Err(MelodyError::Configuration(format!(
                "Population size must be at least {}, got {}",
                ELITE_COUNT + 2,
                self.population_size
            )));
        }

        if self.population_size % 2 != 0 {
            return Err(MelodyError::Configuration(format!(
                "Population size must be even, got {}",
                self.population_size
            )));
        }

        if self.num_generations == 0 {
            return Err(MelodyError::Configuration(
                "Number of generations cannot be zero".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(MelodyError::Configuration(format!(
                "Mutation rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }

        if self.shape.is_empty() {
            return Err(MelodyError::Configuration(
                "Genome shape must contain at least one note".to_string(),
            ));
        }

        Ok(())
    }

    /// Number of crossover pairs bred per generation.
    pub fn pairs_per_generation(&self) -> usize {
        (self.population_size / 2).saturating_sub(1)
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_shape(&self) -> GenomeShape {
        self.shape
    }

    /// Returns the minimum population size scored in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    pub fn set_shape(&mut self, shape: GenomeShape) {
        self.shape = shape;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use genmelody::evolution::options::{EvolutionOptions, LogLevel};
    /// use genmelody::genome::GenomeShape;
    ///
    /// let options = EvolutionOptions::builder()
    ///     .num_generations(50)
    ///     .log_level(LogLevel::Minimal)
    ///     .population_size(12)
    ///     .mutation_rate(0.2)
    ///     .shape(GenomeShape::new(4, 8))
    ///     .build();
    ///
    /// assert_eq!(options.get_shape().len(), 32);
    /// ```
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 100,
            log_level: LogLevel::None,
            population_size: 10,
            mutation_rate: 0.1,
            shape: GenomeShape::default(),
            parallel_threshold: 1000,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields take the values of `EvolutionOptions::default()`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    log_level: Option<LogLevel>,
    population_size: Option<usize>,
    mutation_rate: Option<f64>,
    shape: Option<GenomeShape>,
    parallel_threshold: Option<usize>,
}

impl EvolutionOptionsBuilder {
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn shape(mut self, value: GenomeShape) -> Self {
        self.shape = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(defaults.num_generations),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            shape: self.shape.unwrap_or(defaults.shape),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
        }
    }
}
