pub mod midi;

pub use midi::{MidiRenderer, RenderOptions};
