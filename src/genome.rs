//! # Genome
//!
//! A [`Genome`] is one candidate melody: a `bars` × `notes_per_bar` grid of
//! [`PitchValue`]s stored row-major. A [`FlatSequence`] is the same notes
//! without bar structure, which is what crossover splices and what the MIDI
//! renderer consumes.
//!
//! Keeping the two as separate types means a flat sequence can never be
//! mistaken for a grid: converting back requires an explicit
//! [`FlatSequence::into_genome`] with a bar width.
//!
//! ## Example
//!
//! ```rust
//! use genmelody::genome::{Genome, GenomeShape};
//! use genmelody::music::{Scale, ScalePattern};
//! use genmelody::rng::RandomNumberGenerator;
//!
//! let scale = Scale::from_pattern(45, ScalePattern::Major).unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let genome = Genome::random(GenomeShape::default(), &scale, &mut rng);
//!
//! assert_eq!(genome.bars().count(), 8);
//! assert_eq!(genome.flatten().len(), 128);
//! assert!(genome.is_within(&scale));
//! ```

use crate::error::{MelodyError, Result};
use crate::music::{PitchValue, Scale};
use crate::rng::RandomNumberGenerator;

/// Dimensions of a genome grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenomeShape {
    pub bars: usize,
    pub notes_per_bar: usize,
}

impl GenomeShape {
    pub fn new(bars: usize, notes_per_bar: usize) -> Self {
        Self {
            bars,
            notes_per_bar,
        }
    }

    /// Total number of notes in the grid.
    pub fn len(&self) -> usize {
        self.bars * self.notes_per_bar
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GenomeShape {
    /// Eight bars of sixteen notes.
    fn default() -> Self {
        Self::new(8, 16)
    }
}

/// A candidate melody laid out in bars.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    shape: GenomeShape,
    notes: Vec<PitchValue>,
}

impl Genome {
    /// Wraps row-major `notes` in a grid of the given shape.
    ///
    /// # Errors
    ///
    /// Returns `MelodyError::ShapeMismatch` if `notes` does not fill the grid exactly.
    pub fn new(shape: GenomeShape, notes: Vec<PitchValue>) -> Result<Self> {
        if notes.len() != shape.len() {
            return Err(MelodyError::ShapeMismatch {
                left: shape.len(),
                right: notes.len(),
            });
        }
        Ok(Self { shape, notes })
    }

    /// Builds a genome from explicit bars, which must all have the same width.
    pub fn from_bars(bars: Vec<Vec<PitchValue>>) -> Result<Self> {
        let width = bars.first().map_or(0, Vec::len);
        if let Some(ragged) = bars.iter().find(|bar| bar.len() != width) {
            return Err(MelodyError::ShapeMismatch {
                left: width,
                right: ragged.len(),
            });
        }
        let shape = GenomeShape::new(bars.len(), width);
        Ok(Self {
            shape,
            notes: bars.into_iter().flatten().collect(),
        })
    }

    /// Fills every cell independently and uniformly from the scale, rest included.
    pub fn random(shape: GenomeShape, scale: &Scale, rng: &mut RandomNumberGenerator) -> Self {
        let notes = (0..shape.len()).map(|_| scale.random_value(rng)).collect();
        Self { shape, notes }
    }

    pub fn shape(&self) -> GenomeShape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes in row-major order.
    pub fn notes(&self) -> &[PitchValue] {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut [PitchValue] {
        &mut self.notes
    }

    /// Iterates over the bars in order.
    pub fn bars(&self) -> impl Iterator<Item = &[PitchValue]> {
        // chunks(0) panics, and a zero-width grid has no bars anyway.
        let width = self.shape.notes_per_bar.max(1);
        self.notes.chunks(width).take(self.shape.bars)
    }

    pub fn get(&self, bar: usize, position: usize) -> Option<PitchValue> {
        if bar >= self.shape.bars || position >= self.shape.notes_per_bar {
            return None;
        }
        self.notes.get(bar * self.shape.notes_per_bar + position).copied()
    }

    pub fn rest_count(&self) -> usize {
        self.notes.iter().filter(|n| n.is_rest()).count()
    }

    /// True if every pitch in the grid belongs to `scale`.
    pub fn is_within(&self, scale: &Scale) -> bool {
        self.notes.iter().all(|n| scale.contains(n))
    }

    /// Copies the notes into a flat sequence.
    pub fn flatten(&self) -> FlatSequence {
        FlatSequence(self.notes.clone())
    }

    pub fn into_flat(self) -> FlatSequence {
        FlatSequence(self.notes)
    }
}

/// Notes in playing order with no bar structure.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlatSequence(Vec<PitchValue>);

impl FlatSequence {
    pub fn new(notes: Vec<PitchValue>) -> Self {
        Self(notes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[PitchValue] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<PitchValue> {
        self.0
    }

    /// Re-chunks the sequence into bars of `notes_per_bar`.
    ///
    /// # Errors
    ///
    /// Returns `MelodyError::Configuration` for a zero width and
    /// `MelodyError::ShapeMismatch` if the length is not a whole number of bars.
    pub fn into_genome(self, notes_per_bar: usize) -> Result<Genome> {
        if notes_per_bar == 0 {
            return Err(MelodyError::Configuration(
                "Bar width must be positive".to_string(),
            ));
        }
        if self.0.len() % notes_per_bar != 0 {
            return Err(MelodyError::ShapeMismatch {
                left: self.0.len(),
                right: (self.0.len() / notes_per_bar + 1) * notes_per_bar,
            });
        }
        let shape = GenomeShape::new(self.0.len() / notes_per_bar, notes_per_bar);
        Genome::new(shape, self.0)
    }
}

impl From<Vec<PitchValue>> for FlatSequence {
    fn from(notes: Vec<PitchValue>) -> Self {
        Self(notes)
    }
}

impl<'a> IntoIterator for &'a FlatSequence {
    type Item = &'a PitchValue;
    type IntoIter = std::slice::Iter<'a, PitchValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
