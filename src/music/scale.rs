//! # Scales
//!
//! A [`Scale`] is the ordered set of values a melody may use: the rest marker
//! followed by the root and every pitch reached by walking a
//! [`ScalePattern`]'s semitone steps upward across two octaves.
//!
//! The pattern table lives in a [`ScaleLibrary`], an immutable value built
//! once at start-up and passed to whoever needs to resolve a scale name.
//!
//! ## Example
//!
//! ```rust
//! use genmelody::music::{PitchValue, ScaleLibrary};
//!
//! let library = ScaleLibrary::standard();
//! let scale = library.build_scale(45, "major").unwrap();
//!
//! assert_eq!(scale.values()[0], PitchValue::Rest);
//! assert_eq!(scale.pitches().len(), 15);
//! assert_eq!(scale.pitches().last(), Some(&PitchValue::Note(69)));
//! ```

use std::fmt;
use std::str::FromStr;

use super::pitch::PitchValue;
use crate::error::{MelodyError, Result};
use crate::rng::RandomNumberGenerator;

const MIDI_MAX: u32 = 127;

/// The built-in interval patterns, each spanning two octaves.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalePattern {
    Major,
    Minor,
    MajorPentatonic,
    MinorPentatonic,
}

impl ScalePattern {
    pub const ALL: [ScalePattern; 4] = [
        ScalePattern::Major,
        ScalePattern::Minor,
        ScalePattern::MajorPentatonic,
        ScalePattern::MinorPentatonic,
    ];

    /// Semitone steps between consecutive scale degrees.
    pub fn steps(&self) -> &'static [u8] {
        match self {
            ScalePattern::Major => &[2, 2, 1, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 1],
            ScalePattern::Minor => &[2, 1, 2, 2, 1, 2, 2, 2, 1, 2, 2, 1, 2, 2],
            ScalePattern::MajorPentatonic => &[2, 2, 3, 2, 3, 2, 2, 3, 2, 3],
            ScalePattern::MinorPentatonic => &[3, 2, 2, 3, 2, 3, 2, 2, 3, 2],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScalePattern::Major => "major",
            ScalePattern::Minor => "minor",
            ScalePattern::MajorPentatonic => "major pentatonic",
            ScalePattern::MinorPentatonic => "minor pentatonic",
        }
    }
}

impl fmt::Display for ScalePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalePattern {
    type Err = MelodyError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_name(s);
        ScalePattern::ALL
            .iter()
            .copied()
            .find(|p| p.name() == key)
            .ok_or_else(|| MelodyError::UnknownScale(s.to_string()))
    }
}

/// Lower-cases a scale name and treats `_` and `-` as spaces.
fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Name → step-pattern table used to resolve user-facing scale names.
#[derive(Debug, Clone)]
pub struct ScaleLibrary {
    patterns: Vec<(String, Vec<u8>)>,
}

impl ScaleLibrary {
    /// The four canonical patterns.
    pub fn standard() -> Self {
        Self {
            patterns: ScalePattern::ALL
                .iter()
                .map(|p| (p.name().to_string(), p.steps().to_vec()))
                .collect(),
        }
    }

    /// Adds or replaces a pattern under `name`.
    pub fn with_pattern(mut self, name: &str, steps: Vec<u8>) -> Self {
        let key = normalize_name(name);
        match self.patterns.iter_mut().find(|(n, _)| *n == key) {
            Some(entry) => entry.1 = steps,
            None => self.patterns.push((key, steps)),
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(n, _)| n.as_str())
    }

    /// Looks up the step pattern registered under `name`.
    pub fn pattern(&self, name: &str) -> Result<&[u8]> {
        let key = normalize_name(name);
        self.patterns
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, steps)| steps.as_slice())
            .ok_or_else(|| MelodyError::UnknownScale(name.to_string()))
    }

    /// Builds the scale starting at `root` for the pattern registered under `name`.
    pub fn build_scale(&self, root: u8, name: &str) -> Result<Scale> {
        Scale::build(root, self.pattern(name)?)
    }
}

impl Default for ScaleLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

/// The rest marker followed by strictly increasing pitches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    values: Vec<PitchValue>,
}

impl Scale {
    /// Builds `[rest, root, root + s0, root + s0 + s1, ...]`.
    ///
    /// # Errors
    ///
    /// Returns `MelodyError::Configuration` if a step is zero (pitches must
    /// strictly increase) or the root or top of the scale would exceed MIDI key 127.
    pub fn build(root: u8, steps: &[u8]) -> Result<Self> {
        if root as u32 > MIDI_MAX {
            return Err(MelodyError::Configuration(format!(
                "Scale root {} exceeds the MIDI range",
                root
            )));
        }

        let mut values = Vec::with_capacity(steps.len() + 2);
        values.push(PitchValue::Rest);
        values.push(PitchValue::Note(root));

        let mut current = root as u32;
        for &step in steps {
            if step == 0 {
                return Err(MelodyError::Configuration(
                    "Scale steps must be positive".to_string(),
                ));
            }
            current += step as u32;
            if current > MIDI_MAX {
                return Err(MelodyError::Configuration(format!(
                    "Scale rooted at {} exceeds the MIDI range",
                    root
                )));
            }
            values.push(PitchValue::Note(current as u8));
        }

        Ok(Self { values })
    }

    /// Convenience for the built-in patterns.
    pub fn from_pattern(root: u8, pattern: ScalePattern) -> Result<Self> {
        Self::build(root, pattern.steps())
    }

    /// Every allowed value, rest first.
    pub fn values(&self) -> &[PitchValue] {
        &self.values
    }

    /// The allowed pitches without the leading rest.
    pub fn pitches(&self) -> &[PitchValue] {
        &self.values[1..]
    }

    pub fn root(&self) -> u8 {
        match self.values[1] {
            PitchValue::Note(p) => p,
            PitchValue::Rest => unreachable!("scale always holds a root pitch"),
        }
    }

    /// True for the rest marker and for any pitch of the scale.
    pub fn contains(&self, value: &PitchValue) -> bool {
        match value {
            PitchValue::Rest => true,
            PitchValue::Note(_) => self.pitches().binary_search(value).is_ok(),
        }
    }

    /// Uniform draw over rest and every pitch.
    pub fn random_value(&self, rng: &mut RandomNumberGenerator) -> PitchValue {
        self.values[rng.index(self.values.len())]
    }

    /// Uniform draw over the pitches only.
    pub fn random_pitch(&self, rng: &mut RandomNumberGenerator) -> PitchValue {
        let pitches = self.pitches();
        pitches[rng.index(pitches.len())]
    }
}
