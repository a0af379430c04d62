use tracing::warn;

use crate::error::{MelodyError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// What to do when no genome has a positive fitness.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroWeightPolicy {
    /// Draw both parents uniformly instead.
    #[default]
    Uniform,
    /// Abort with `MelodyError::Sampling`.
    Fail,
}

/// A selection strategy that draws parents through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection)
/// picks each parent with probability proportional to its fitness, with
/// replacement, so both parents may be the same genome. Negative scores get
/// zero weight.
///
/// # Examples
///
/// ```
/// use genmelody::selection::roulette::{RouletteWheelSelection, ZeroWeightPolicy};
/// use genmelody::selection::SelectionStrategy;
/// use genmelody::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(3);
///
/// let strict = RouletteWheelSelection::with_policy(ZeroWeightPolicy::Fail);
/// assert!(strict.select_indices(&[0.0, -2.0], &mut rng).is_err());
///
/// let lenient = RouletteWheelSelection::new();
/// let (a, b) = lenient.select_indices(&[0.0, -2.0], &mut rng).unwrap();
/// assert!(a < 2 && b < 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelection {
    zero_weight_policy: ZeroWeightPolicy,
}

impl RouletteWheelSelection {
    /// Creates a strategy that falls back to uniform sampling when every
    /// weight is zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(zero_weight_policy: ZeroWeightPolicy) -> Self {
        Self { zero_weight_policy }
    }

    pub fn zero_weight_policy(&self) -> ZeroWeightPolicy {
        self.zero_weight_policy
    }

    /// Turns fitness scores into sampling weights.
    ///
    /// Returns `None` when no weight is positive.
    fn weights(fitness: &[f64]) -> Option<Vec<f64>> {
        let weights: Vec<f64> = fitness
            .iter()
            .map(|&f| if f.is_finite() && f > 0.0 { f } else { 0.0 })
            .collect();

        if weights.iter().any(|&w| w > 0.0) {
            Some(weights)
        } else {
            None
        }
    }
}

impl SelectionStrategy for RouletteWheelSelection {
    fn select_indices(
        &self,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<(usize, usize)> {
        if fitness.is_empty() {
            return Err(MelodyError::EmptyPopulation);
        }

        match Self::weights(fitness) {
            Some(weights) => {
                let a = rng.weighted_index(&weights)?;
                let b = rng.weighted_index(&weights)?;
                Ok((a, b))
            }
            None => match self.zero_weight_policy {
                ZeroWeightPolicy::Uniform => {
                    warn!(
                        candidates = fitness.len(),
                        "no positive fitness, selecting parents uniformly"
                    );
                    Ok((rng.index(fitness.len()), rng.index(fitness.len())))
                }
                ZeroWeightPolicy::Fail => Err(MelodyError::Sampling(format!(
                    "Roulette wheel selection requires at least one positive fitness among {} candidates",
                    fitness.len()
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::Genome;
    use crate::music::PitchValue;

    fn population(n: u8) -> Vec<Genome> {
        (0..n)
            .map(|i| Genome::from_bars(vec![vec![PitchValue::Note(45 + i)]]).unwrap())
            .collect()
    }

    #[test]
    fn test_roulette_wheel_selection() {
        let population = population(5);
        let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
        let mut rng = RandomNumberGenerator::from_seed(42);

        let selection = RouletteWheelSelection::new();
        let (a, b) = selection.select(&population, &fitness, &mut rng).unwrap();

        assert!(population.contains(a));
        assert!(population.contains(b));
    }

    #[test]
    fn test_only_positive_weights_are_drawn() {
        let fitness = vec![-5.0, 0.0, 3.0, f64::NAN];
        let mut rng = RandomNumberGenerator::from_seed(7);
        let selection = RouletteWheelSelection::with_policy(ZeroWeightPolicy::Fail);

        for _ in 0..50 {
            assert_eq!(selection.select_indices(&fitness, &mut rng).unwrap(), (2, 2));
        }
    }

    #[test]
    fn test_selection_favours_fitter_genomes() {
        let fitness = vec![1.0, 9.0];
        let mut rng = RandomNumberGenerator::from_seed(11);
        let selection = RouletteWheelSelection::new();

        let mut picks = [0usize; 2];
        for _ in 0..1000 {
            let (a, b) = selection.select_indices(&fitness, &mut rng).unwrap();
            picks[a] += 1;
            picks[b] += 1;
        }
        assert!(picks[1] > picks[0] * 4);
    }

    #[test]
    fn test_zero_fitness_fails_in_strict_mode() {
        let population = population(3);
        let fitness = vec![0.0, 0.0, 0.0];
        let mut rng = RandomNumberGenerator::new();

        let selection = RouletteWheelSelection::with_policy(ZeroWeightPolicy::Fail);
        let result = selection.select(&population, &fitness, &mut rng);

        assert!(matches!(result, Err(MelodyError::Sampling(_))));
    }

    #[test]
    fn test_zero_fitness_falls_back_to_uniform() {
        let fitness = vec![0.0, -1.0, 0.0];
        let mut rng = RandomNumberGenerator::from_seed(5);
        let selection = RouletteWheelSelection::new();

        let mut seen = [false; 3];
        for _ in 0..100 {
            let (a, b) = selection.select_indices(&fitness, &mut rng).unwrap();
            seen[a] = true;
            seen[b] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_roulette_wheel_selection_empty_population() {
        let population: Vec<Genome> = Vec::new();
        let fitness: Vec<f64> = Vec::new();
        let mut rng = RandomNumberGenerator::new();

        let result = RouletteWheelSelection::new().select(&population, &fitness, &mut rng);
        assert!(matches!(result, Err(MelodyError::EmptyPopulation)));
    }

    #[test]
    fn test_roulette_wheel_selection_mismatched_lengths() {
        let population = population(2);
        let fitness = vec![0.5];
        let mut rng = RandomNumberGenerator::new();

        let result = RouletteWheelSelection::new().select(&population, &fitness, &mut rng);
        assert!(matches!(result, Err(MelodyError::Configuration(_))));
    }
}
