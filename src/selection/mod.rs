//! Tracking the cards the player has picked.

pub mod tracker;

pub use tracker::{SelectionState, SelectionTracker, Toggle};
