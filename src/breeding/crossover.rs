//! # SinglePointCrossover
//!
//! Flattens both parents, splices them at one random interior point and
//! re-chunks the two children into the parents' bar width.

use super::CrossoverOperator;
use crate::{
    error::{MelodyError, Result},
    genome::{FlatSequence, Genome},
    rng::RandomNumberGenerator,
};

#[derive(Debug, Clone, Default)]
pub struct SinglePointCrossover;

impl SinglePointCrossover {
    pub fn new() -> Self {
        Self
    }

    /// Splices the parents at `point`, which must lie in `1..len`.
    pub fn splice_at(
        &self,
        parent_a: &Genome,
        parent_b: &Genome,
        point: usize,
    ) -> Result<(Genome, Genome)> {
        check_shapes(parent_a, parent_b)?;

        let len = parent_a.len();
        if point == 0 || point >= len {
            return Err(MelodyError::Configuration(format!(
                "Crossover point {} outside 1..{}",
                point, len
            )));
        }

        let a = parent_a.notes();
        let b = parent_b.notes();

        let child_a: Vec<_> = a[..point].iter().chain(&b[point..]).copied().collect();
        let child_b: Vec<_> = b[..point].iter().chain(&a[point..]).copied().collect();

        let width = parent_a.shape().notes_per_bar;
        Ok((
            FlatSequence::new(child_a).into_genome(width)?,
            FlatSequence::new(child_b).into_genome(width)?,
        ))
    }
}

impl CrossoverOperator for SinglePointCrossover {
    /// Splices the parents at a uniformly random point in `1..=len-1`.
    ///
    /// Parents with fewer than two notes have no interior point and are
    /// returned unchanged.
    fn crossover(
        &self,
        parent_a: &Genome,
        parent_b: &Genome,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Genome, Genome)> {
        check_shapes(parent_a, parent_b)?;

        let len = parent_a.len();
        if len < 2 {
            return Ok((parent_a.clone(), parent_b.clone()));
        }

        let point = rng.range_inclusive(1, len - 1);
        self.splice_at(parent_a, parent_b, point)
    }
}

fn check_shapes(parent_a: &Genome, parent_b: &Genome) -> Result<()> {
    if parent_a.len() != parent_b.len() {
        return Err(MelodyError::ShapeMismatch {
            left: parent_a.len(),
            right: parent_b.len(),
        });
    }
    if parent_a.shape() != parent_b.shape() {
        return Err(MelodyError::Configuration(format!(
            "Parents have different bar layouts: {}x{} vs {}x{}",
            parent_a.shape().bars,
            parent_a.shape().notes_per_bar,
            parent_b.shape().bars,
            parent_b.shape().notes_per_bar
        )));
    }
    Ok(())
}
