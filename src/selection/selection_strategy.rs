use std::fmt::Debug;

use crate::error::{MelodyError, Result};
use crate::genome::Genome;
use crate::rng::RandomNumberGenerator;

/// Trait for parent selection strategies.
///
/// A selection strategy picks the two parents of the next pair of children
/// from the current population, using the fitness score of each genome.
///
/// # Examples
///
/// ```
/// use genmelody::genome::Genome;
/// use genmelody::music::PitchValue;
/// use genmelody::rng::RandomNumberGenerator;
/// use genmelody::selection::{RouletteWheelSelection, SelectionStrategy};
/// use genmelody::error::Result;
///
/// fn main() -> Result<()> {
///     let population = vec![
///         Genome::from_bars(vec![vec![PitchValue::Note(45)]])?,
///         Genome::from_bars(vec![vec![PitchValue::Note(47)]])?,
///     ];
///     let fitness = vec![0.0, 4.0];
///     let mut rng = RandomNumberGenerator::from_seed(1);
///
///     let (a, b) = RouletteWheelSelection::new().select(&population, &fitness, &mut rng)?;
///
///     assert_eq!(a, &population[1]);
///     assert_eq!(b, &population[1]);
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Picks the indices of two parents. The same index may be returned twice.
    ///
    /// # Errors
    ///
    /// Implementations return an error if `fitness` is empty or no parent
    /// can be drawn from it.
    fn select_indices(
        &self,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<(usize, usize)>;

    /// Picks two parents from `population`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - The fitness vector length doesn't match the population length
    /// - The strategy cannot draw a parent
    fn select<'a>(
        &self,
        population: &'a [Genome],
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<(&'a Genome, &'a Genome)> {
        if population.is_empty() {
            return Err(MelodyError::EmptyPopulation);
        }

        if fitness.len() != population.len() {
            return Err(MelodyError::Configuration(format!(
                "Fitness vector length ({}) doesn't match population length ({})",
                fitness.len(),
                population.len()
            )));
        }

        let (a, b) = self.select_indices(fitness, rng)?;
        Ok((&population[a], &population[b]))
    }
}
