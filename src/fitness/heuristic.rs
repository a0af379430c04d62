//! # MelodyFitness
//!
//! Scores a melody on three heuristics, scanning each bar left to right and
//! looking at every adjacent pair of notes inside the bar (pairs never wrap
//! across a bar line):
//!
//! - **Smoothness** rewards stepwise motion. Repeated notes divide the running
//!   total by 10 and a major seventh halves it, so the penalty depends on how
//!   much smoothness has been accumulated so far. Pairs a step apart across an
//!   octave earn an extra half point.
//! - **Harmony** sums an interval preference from [`super::harmony`].
//! - **Rhythm** gives a flat bonus when at most a tenth of the notes are rests
//!   and subtracts a penalty for every pair of consecutive rests.
//!
//! The final score is the weighted sum of the three.
//!
//! ## Example
//!
//! ```rust
//! use genmelody::fitness::{FitnessEvaluator, MelodyFitness};
//! use genmelody::genome::Genome;
//! use genmelody::music::PitchValue::{Note, Rest};
//!
//! let genome = Genome::from_bars(vec![vec![Note(45), Note(47), Note(49), Rest]]).unwrap();
//! let fitness = MelodyFitness::default();
//!
//! let breakdown = fitness.breakdown(&genome);
//! assert_eq!(breakdown.smoothness, 2.0);
//! assert_eq!(fitness.evaluate(&genome), breakdown.total);
//! ```

use tracing::warn;

use super::{harmony::interval_weight, FitnessEvaluator};
use crate::genome::Genome;
use crate::music::PitchValue;

/// Weights and constants of the melody heuristics.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessWeights {
    pub smoothness: f64,
    pub rhythm: f64,
    /// Multiplier on the harmony term. Zero keeps harmony out of the final score.
    pub harmony: f64,
    /// Rhythm bonus when `rests * 10 <= notes`.
    pub rest_bonus: f64,
    /// Rhythm penalty per pair of consecutive rests.
    pub consecutive_rest_penalty: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            smoothness: 15.0,
            rhythm: 15.0,
            harmony: 0.0,
            rest_bonus: 10.0,
            consecutive_rest_penalty: 10.0,
        }
    }
}

/// Raw heuristic scores for one genome, before and after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitnessBreakdown {
    pub smoothness: f64,
    pub harmony: f64,
    pub rhythm: f64,
    pub rest_count: usize,
    pub consecutive_rests: usize,
    pub total: f64,
}

/// The smoothness/harmony/rhythm evaluator.
#[derive(Debug, Clone, Default)]
pub struct MelodyFitness {
    weights: FitnessWeights,
}

impl MelodyFitness {
    pub fn new(weights: FitnessWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Computes every term for `genome`.
    ///
    /// A genome without notes is degenerate and scores zero on every term.
    pub fn breakdown(&self, genome: &Genome) -> FitnessBreakdown {
        if genome.is_empty() {
            warn!("empty genome passed to fitness evaluation, scoring 0");
            return FitnessBreakdown::default();
        }

        let mut smoothness = 0.0;
        let mut harmony = 0.0;
        let mut consecutive_rests = 0;

        for bar in genome.bars() {
            for pair in bar.windows(2) {
                let (prev, note) = (pair[0], pair[1]);
                match (prev, note) {
                    (PitchValue::Note(p), PitchValue::Note(n)) => {
                        let distance = p.abs_diff(n);
                        smoothness = step_smoothness(smoothness, distance);
                        if is_octave_step(p, n) {
                            smoothness += 0.5;
                        }
                        harmony += interval_weight(distance);
                    }
                    (PitchValue::Rest, PitchValue::Rest) => consecutive_rests += 1,
                    _ => {}
                }
            }
        }

        let rest_count = genome.rest_count();
        let mut rhythm = 0.0;
        if rest_count * 10 <= genome.len() {
            rhythm += self.weights.rest_bonus;
        }
        rhythm -= consecutive_rests as f64 * self.weights.consecutive_rest_penalty;

        let total = smoothness * self.weights.smoothness
            + rhythm * self.weights.rhythm
            + harmony * self.weights.harmony;

        FitnessBreakdown {
            smoothness,
            harmony,
            rhythm,
            rest_count,
            consecutive_rests,
            total,
        }
    }
}

impl FitnessEvaluator for MelodyFitness {
    fn evaluate(&self, genome: &Genome) -> f64 {
        self.breakdown(genome).total
    }
}

/// Applies one pair's contribution to the running smoothness total.
fn step_smoothness(running: f64, distance: u8) -> f64 {
    match distance {
        0 => running / 10.0,
        1 | 2 => running + 1.0,
        11 => running / 2.0,
        d => running + 1.0 / d as f64,
    }
}

/// True when the two notes are a whole or half step apart once one of them
/// is moved up an octave.
fn is_octave_step(prev: u8, note: u8) -> bool {
    let (prev, note) = (prev as i32, note as i32);
    let up = (note - (prev + 12)).abs();
    let down = ((note + 12) - prev).abs();
    matches!(up, 1 | 2) || matches!(down, 1 | 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::Candidate;
    use crate::genome::{FlatSequence, GenomeShape};
    use crate::music::{PitchValue::Note, PitchValue::Rest, Scale, ScalePattern};
    use crate::rng::RandomNumberGenerator;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_repeated_note_divides_running_total() {
        // +1 (step), /10 (repeat), +1/12 (octave leap)
        let genome = Genome::from_bars(vec![vec![Note(45), Note(47), Note(47), Note(59)]]).unwrap();
        let b = MelodyFitness::default().breakdown(&genome);

        assert!(approx(b.smoothness, 0.1 + 1.0 / 12.0));
        assert!(approx(b.harmony, 5.0 - 20.0 + 10.0));
        assert!(approx(b.rhythm, 10.0));
        assert!(approx(b.total, b.smoothness * 15.0 + 150.0));
    }

    #[test]
    fn test_penalty_order_matters() {
        // the repeat comes first, so there is nothing to divide yet
        let early = Genome::from_bars(vec![vec![Note(45), Note(45), Note(47)]]).unwrap();
        // the repeat comes last and wipes most of the step reward
        let late = Genome::from_bars(vec![vec![Note(45), Note(47), Note(47)]]).unwrap();

        let fitness = MelodyFitness::default();
        assert!(approx(fitness.breakdown(&early).smoothness, 1.0));
        assert!(approx(fitness.breakdown(&late).smoothness, 0.1));
    }

    #[test]
    fn test_major_seventh_halves_running_total() {
        let genome =
            Genome::from_bars(vec![vec![Note(45), Note(47), Note(49), Note(60)]]).unwrap();
        let b = MelodyFitness::default().breakdown(&genome);
        // 2.0 halved, plus the bonus: 49 + 12 is a half step above 60
        assert!(approx(b.smoothness, 1.5));
    }

    #[test]
    fn test_octave_step_bonus() {
        // 45 -> 58 is 13 semitones: 1/13 plus the cross-octave half step bonus
        let genome = Genome::from_bars(vec![vec![Note(45), Note(58)]]).unwrap();
        let b = MelodyFitness::default().breakdown(&genome);
        assert!(approx(b.smoothness, 1.0 / 13.0 + 0.5));

        // 57 -> 47 is 10 semitones down: (47 + 12) - 57 = 2
        let genome = Genome::from_bars(vec![vec![Note(57), Note(47)]]).unwrap();
        let b = MelodyFitness::default().breakdown(&genome);
        assert!(approx(b.smoothness, 0.1 + 0.5));
    }

    #[test]
    fn test_pairs_do_not_wrap_across_bars() {
        let genome = Genome::from_bars(vec![vec![Note(45), Rest], vec![Rest, Note(45)]]).unwrap();
        let b = MelodyFitness::default().breakdown(&genome);
        assert_eq!(b.consecutive_rests, 0);
        assert!(approx(b.smoothness, 0.0));
    }

    #[test]
    fn test_rhythm_goes_negative_with_long_silences() {
        let genome = Genome::from_bars(vec![vec![Rest, Rest, Rest, Note(45)]]).unwrap();
        let b = MelodyFitness::default().breakdown(&genome);

        assert_eq!(b.rest_count, 3);
        assert_eq!(b.consecutive_rests, 2);
        assert!(approx(b.rhythm, -20.0));
        assert!(approx(b.total, -300.0));
    }

    #[test]
    fn test_rest_bonus_threshold() {
        // 1 rest in 10 notes is allowed
        let mut bar = vec![Note(45), Note(47)].repeat(5);
        bar[9] = Rest;
        let genome = Genome::from_bars(vec![bar.clone()]).unwrap();
        assert!(approx(MelodyFitness::default().breakdown(&genome).rhythm, 10.0));

        // 2 rests in 10 notes is not
        bar[0] = Rest;
        let genome = Genome::from_bars(vec![bar]).unwrap();
        assert!(approx(MelodyFitness::default().breakdown(&genome).rhythm, 0.0));
    }

    #[test]
    fn test_harmony_weight_is_applied_when_set() {
        let genome = Genome::from_bars(vec![vec![Note(45), Note(52)]]).unwrap();
        let plain = MelodyFitness::default().evaluate(&genome);
        let weighted = MelodyFitness::new(FitnessWeights {
            harmony: 2.0,
            ..FitnessWeights::default()
        })
        .evaluate(&genome);

        assert!(approx(weighted - plain, 2.0 * 50.0));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let scale = Scale::from_pattern(45, ScalePattern::Major).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(21);
        let fitness = MelodyFitness::default();

        for _ in 0..10 {
            let genome = Genome::random(GenomeShape::default(), &scale, &mut rng);
            let first = fitness.evaluate(&genome);
            assert!(first.is_finite());
            assert_eq!(first, fitness.evaluate(&genome.clone()));
        }
    }

    #[test]
    fn test_flat_input_scores_exactly_zero() {
        let flat = FlatSequence::new(vec![Note(45), Note(47), Note(49), Note(50)]);
        assert_eq!(MelodyFitness::default().evaluate_candidate(Candidate::Flat(&flat)), 0.0);
    }

    #[test]
    fn test_empty_genome_scores_zero() {
        let empty = Genome::from_bars(vec![]).unwrap();
        let fitness = MelodyFitness::default();

        assert_eq!(fitness.evaluate(&empty), 0.0);
        assert_eq!(fitness.breakdown(&empty).rhythm, 0.0);
        assert_eq!(fitness.evaluate_candidate(Candidate::Grid(&empty)), 0.0);
    }
}
