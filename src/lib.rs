pub mod breeding;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod genome;
pub mod music;
pub mod render;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{MelodyError, OptionExt, Result, ResultExt};
