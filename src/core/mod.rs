//! Core engine types: cards, positions, phases, RNG, configuration, errors.
//!
//! These are the value types every other module builds on. None of them
//! hold game state.

pub mod card;
pub mod position;
pub mod rng;
pub mod config;
pub mod phase;
pub mod error;

pub use card::{Card, ATTRIBUTE_COUNT, DECK_SIZE, EMPTY_SLOT_ID};
pub use position::{Position, BASE_SLOTS, INITIAL_ROWS, ROW_WIDTH};
pub use rng::GameRng;
pub use config::{ContradictionPolicy, GameConfig};
pub use phase::GamePhase;
pub use error::{Result, SelectionFault, SetError};
