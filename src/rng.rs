//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for a
//! run. Every component that draws random numbers takes it as an explicit
//! `&mut` argument, so a run seeded with [`RandomNumberGenerator::from_seed`]
//! is fully reproducible.
//!
//! ## Example
//!
//! ```rust
//! use genmelody::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let p = rng.unit();
//! assert!((0.0..1.0).contains(&p));
//!
//! let idx = rng.weighted_index(&[0.0, 3.0, 1.0]).unwrap();
//! assert!(idx == 1 || idx == 2);
//! ```

use rand::{
    distributions::{Distribution, WeightedError, WeightedIndex},
    rngs::StdRng,
    Rng, SeedableRng,
};

use crate::error::{MelodyError, Result};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws the
/// evolution engine needs: unit reals, integer ranges, uniform choice and
/// weighted sampling with replacement.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests, benchmarks and command-line runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a uniform real in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns a uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Returns a uniform integer in `lo..=hi`.
    pub fn range_inclusive(&mut self, lo: usize, hi: usize) -> usize {
        self.rng.gen_range(lo..=hi)
    }

    /// Picks one element uniformly, or `None` if the slice is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.index(items.len())])
        }
    }

    /// Samples one index with probability proportional to its weight.
    ///
    /// # Errors
    ///
    /// Returns `MelodyError::Sampling` if the weights are empty, contain a
    /// negative or non-finite value, or are all zero.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Result<usize> {
        let dist = WeightedIndex::new(weights).map_err(|e| {
            let reason = match e {
                WeightedError::NoItem => "no candidates to sample from".to_string(),
                WeightedError::InvalidWeight => {
                    "weights must be finite and non-negative".to_string()
                }
                WeightedError::AllWeightsZero => {
                    "at least one candidate needs a positive weight".to_string()
                }
                _ => e.to_string(),
            };
            MelodyError::Sampling(reason)
        })?;
        Ok(dist.sample(&mut self.rng))
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
