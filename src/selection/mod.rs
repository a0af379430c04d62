pub mod roulette;
pub mod selection_strategy;

pub use roulette::{RouletteWheelSelection, ZeroWeightPolicy};
pub use selection_strategy::SelectionStrategy;
