//! Musical building blocks: pitch values, scales, the note-name table and tempo.
pub mod note_table;
pub mod pitch;
pub mod scale;
pub mod tempo;

pub use note_table::NoteTable;
pub use pitch::PitchValue;
pub use scale::{Scale, ScaleLibrary, ScalePattern};
pub use tempo::Tempo;
