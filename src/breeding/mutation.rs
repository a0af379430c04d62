use super::MutationOperator;
use crate::{genome::Genome, music::PitchValue, music::Scale, rng::RandomNumberGenerator};

/// Toggles notes between sounding and silent.
///
/// Each note is hit independently with probability `rate`. A hit pitch
/// becomes a rest; a hit rest becomes a uniformly drawn pitch of the scale.
#[derive(Debug, Clone, Default)]
pub struct ToggleMutation;

impl ToggleMutation {
    pub fn new() -> Self {
        Self
    }
}

impl MutationOperator for ToggleMutation {
    fn mutate(
        &self,
        genome: &mut Genome,
        rate: f64,
        scale: &Scale,
        rng: &mut RandomNumberGenerator,
    ) {
        for note in genome.notes_mut() {
            if rng.unit() < rate {
                *note = match *note {
                    PitchValue::Note(_) => PitchValue::Rest,
                    PitchValue::Rest => scale.random_pitch(rng),
                };
            }
        }
    }
}
