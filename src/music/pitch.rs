//! # PitchValue
//!
//! A single cell of a melody: either a semitone-coded MIDI pitch or a rest.

use std::fmt;

/// One position in a melody.
///
/// Pitches are MIDI key numbers (A3 = 45, middle C = 60). Arithmetic between
/// two values is only defined when both are pitches; see [`PitchValue::interval`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchValue {
    /// No note sounds at this position.
    Rest,
    /// A sounding note with the given MIDI key number.
    Note(u8),
}

impl PitchValue {
    pub fn is_rest(&self) -> bool {
        matches!(self, PitchValue::Rest)
    }

    /// Returns the MIDI key number, or `None` for a rest.
    pub fn pitch(&self) -> Option<u8> {
        match self {
            PitchValue::Note(p) => Some(*p),
            PitchValue::Rest => None,
        }
    }

    /// Absolute distance in semitones to `other`, or `None` if either side is a rest.
    ///
    /// ```rust
    /// use genmelody::music::PitchValue;
    ///
    /// assert_eq!(PitchValue::Note(60).interval(&PitchValue::Note(67)), Some(7));
    /// assert_eq!(PitchValue::Note(60).interval(&PitchValue::Rest), None);
    /// ```
    pub fn interval(&self, other: &PitchValue) -> Option<u8> {
        match (self, other) {
            (PitchValue::Note(a), PitchValue::Note(b)) => Some(a.abs_diff(*b)),
            _ => None,
        }
    }
}

impl From<u8> for PitchValue {
    fn from(pitch: u8) -> Self {
        PitchValue::Note(pitch)
    }
}

impl From<Option<u8>> for PitchValue {
    fn from(value: Option<u8>) -> Self {
        value.map_or(PitchValue::Rest, PitchValue::Note)
    }
}

impl fmt::Display for PitchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchValue::Rest => write!(f, "-"),
            PitchValue::Note(p) => write!(f, "{}", p),
        }
    }
}
