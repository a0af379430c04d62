use std::fmt;
use std::str::FromStr;

use crate::error::{MelodyError, Result};

/// A validated tempo in beats per minute, 30..=300.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tempo(u32);

impl Tempo {
    pub const MIN_BPM: u32 = 30;
    pub const MAX_BPM: u32 = 300;

    pub fn new(bpm: u32) -> Result<Self> {
        if (Self::MIN_BPM..=Self::MAX_BPM).contains(&bpm) {
            Ok(Self(bpm))
        } else {
            Err(MelodyError::InvalidTempo(bpm))
        }
    }

    pub fn bpm(&self) -> u32 {
        self.0
    }

    /// Microseconds per quarter note, as stored in a MIDI tempo event.
    pub fn micros_per_quarter(&self) -> u32 {
        60_000_000 / self.0
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self(60)
    }
}

impl FromStr for Tempo {
    type Err = MelodyError;

    fn from_str(s: &str) -> Result<Self> {
        let bpm = s
            .trim()
            .parse::<u32>()
            .map_err(|e| MelodyError::Other(format!("Invalid tempo '{}': {}", s, e)))?;
        Self::new(bpm)
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bpm", self.0)
    }
}
