//! # Error Types
//!
//! This module defines the error type shared by every stage of melody
//! evolution: building scales, breeding genomes, running the engine and
//! rendering the winners to MIDI.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genmelody::error::{MelodyError, Result};
//!
//! fn check_population(size: usize) -> Result<()> {
//!     if size % 2 != 0 {
//!         return Err(MelodyError::Configuration(format!(
//!             "Population size must be even, got {}",
//!             size
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_population(10).is_ok());
//! assert!(check_population(9).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genmelody::error::{MelodyError, OptionExt};
//!
//! fn best_score(scores: &[f64]) -> genmelody::error::Result<f64> {
//!     scores
//!         .iter()
//!         .cloned()
//!         .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))))
//!         .ok_or_else_melody(|| MelodyError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_score(&[1.0, 3.0, 2.0]).unwrap(), 3.0);
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while evolving or rendering melodies.
#[derive(Error, Debug)]
pub enum MelodyError {
    /// An invalid configuration was supplied before the run started.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Two genomes or sequences do not have compatible shapes.
    #[error("Shape mismatch: {left} notes vs {right} notes")]
    ShapeMismatch { left: usize, right: usize },

    /// The requested scale pattern is not in the scale library.
    #[error("Unknown scale pattern: {0}")]
    UnknownScale(String),

    /// The requested note name is not in the note table.
    #[error("Unknown note name: {0}")]
    UnknownNote(String),

    /// The tempo lies outside the supported range.
    #[error("Invalid tempo: {0} bpm (expected 30..=300)")]
    InvalidTempo(u32),

    /// Weighted sampling was asked to pick from candidates with no positive weight.
    #[error("Sampling error: {0}")]
    Sampling(String),

    /// An operation was attempted on an empty population.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// The evolution loop could not continue.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// A fitness evaluation produced an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// A melody could not be turned into a MIDI file.
    #[error("Render error: {0}")]
    Render(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for melody evolution operations.
pub type Result<T> = std::result::Result<T, MelodyError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use genmelody::error::ResultExt;
///
/// fn parse_seed(raw: &str) -> genmelody::error::Result<u64> {
///     raw.parse::<u64>().context("Invalid seed")
/// }
///
/// assert!(parse_seed("42").is_ok());
/// assert!(parse_seed("forty-two").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `MelodyError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| MelodyError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, MelodyError>` using `err_fn`
    /// to build the error.
    fn ok_or_else_melody<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> MelodyError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_melody<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> MelodyError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message_names_both_lengths() {
        let err = MelodyError::ShapeMismatch {
            left: 128,
            right: 64,
        };
        let msg = err.to_string();
        assert!(msg.contains("128"));
        assert!(msg.contains("64"));
    }

    #[test]
    fn test_context_wraps_source_error() {
        let result: std::result::Result<u32, std::num::ParseIntError> = "x".parse::<u32>();
        match result.context("Invalid tempo text") {
            Err(MelodyError::Other(msg)) => assert!(msg.starts_with("Invalid tempo text: ")),
            other => panic!("Expected Other error, got {:?}", other),
        }
    }

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/here.mid")?)
        }
        assert!(matches!(open_missing(), Err(MelodyError::Io(_))));
    }

    #[test]
    fn test_option_ext() {
        let none: Option<u8> = None;
        assert!(matches!(
            none.ok_or_else_melody(|| MelodyError::EmptyPopulation),
            Err(MelodyError::EmptyPopulation)
        ));
        assert_eq!(Some(3).ok_or_else_melody(|| MelodyError::EmptyPopulation).unwrap(), 3);
    }
}
