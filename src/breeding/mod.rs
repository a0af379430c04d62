//! # Breeding operators
//!
//! The `CrossoverOperator` and `MutationOperator` traits define how two parent
//! genomes are recombined into children and how those children are perturbed
//! before they join the next generation.
pub mod crossover;
pub mod mutation;

use std::fmt::Debug;

use crate::{error::Result, genome::Genome, music::Scale, rng::RandomNumberGenerator};

/// Recombines two parents into two children.
pub trait CrossoverOperator: Debug + Send + Sync {
    /// Produces two children from `parent_a` and `parent_b`.
    ///
    /// ## Errors
    ///
    /// Fails if the parents do not share a shape.
    fn crossover(
        &self,
        parent_a: &Genome,
        parent_b: &Genome,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Genome, Genome)>;
}

/// Perturbs a genome in place.
pub trait MutationOperator: Debug + Send + Sync {
    /// Mutates each note of `genome` independently with probability `rate`.
    /// Every note written must come from `scale`.
    fn mutate(
        &self,
        genome: &mut Genome,
        rate: f64,
        scale: &Scale,
        rng: &mut RandomNumberGenerator,
    );
}

pub use crossover::SinglePointCrossover;
pub use mutation::ToggleMutation;
