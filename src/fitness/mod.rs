//! # FitnessEvaluator
//!
//! The `FitnessEvaluator` trait scores a genome; higher is better and zero or
//! negative scores are valid. Evaluation must be pure so that populations can
//! be scored in parallel without touching the run's random source.
pub mod harmony;
pub mod heuristic;

use tracing::warn;

use crate::genome::{FlatSequence, Genome};

pub use heuristic::{FitnessBreakdown, FitnessWeights, MelodyFitness};

/// Whatever was handed to the evaluator.
///
/// Only a bar-structured [`Genome`] can be scored. A flat sequence or a
/// missing genome is a degenerate input and scores zero.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    Grid(&'a Genome),
    Flat(&'a FlatSequence),
    Missing,
}

impl<'a> From<&'a Genome> for Candidate<'a> {
    fn from(genome: &'a Genome) -> Self {
        Candidate::Grid(genome)
    }
}

impl<'a> From<&'a FlatSequence> for Candidate<'a> {
    fn from(flat: &'a FlatSequence) -> Self {
        Candidate::Flat(flat)
    }
}

impl<'a> From<Option<&'a Genome>> for Candidate<'a> {
    fn from(genome: Option<&'a Genome>) -> Self {
        genome.map_or(Candidate::Missing, Candidate::Grid)
    }
}

/// Scores genomes.
pub trait FitnessEvaluator: Send + Sync {
    /// Scores a well-formed genome.
    fn evaluate(&self, genome: &Genome) -> f64;

    /// Scores any candidate, treating degenerate inputs as zero fitness.
    fn evaluate_candidate(&self, candidate: Candidate<'_>) -> f64 {
        match candidate {
            Candidate::Grid(genome) => self.evaluate(genome),
            Candidate::Flat(flat) => {
                warn!(len = flat.len(), "flat sequence passed to fitness evaluation, scoring 0");
                0.0
            }
            Candidate::Missing => {
                warn!("missing genome passed to fitness evaluation, scoring 0");
                0.0
            }
        }
    }
}

impl<F: FitnessEvaluator + ?Sized> FitnessEvaluator for &F {
    fn evaluate(&self, genome: &Genome) -> f64 {
        (**self).evaluate(genome)
    }
}
