//! # set-engine
//!
//! Rules engine for the card-matching puzzle **Set**.
//!
//! The deck has 81 cards; each card carries four attributes with three
//! values each. A *set* is three cards that, for every attribute, are all
//! the same or all different. Players pick triples off a table of 12 cards,
//! ask for more cards when they believe no set is showing, and play until
//! the deck is exhausted and no set remains.
//!
//! ## Design Principles
//!
//! 1. **Identifiers Only**: Cards are `1..=81`; rendering, images and input
//!    capture live outside the engine.
//!
//! 2. **Single Owner**: One `GameController` per game owns deck, table and
//!    selection. A new game is a new controller.
//!
//! 3. **Validate, Then Mutate**: Every table mutation plans its changes
//!    first; rejected calls leave state untouched.
//!
//! ## Modules
//!
//! - `core`: Cards, positions, RNG, configuration, errors
//! - `deck`: The shuffled 81-card play order
//! - `rules`: Set validation and exhaustive set search
//! - `board`: Table slots and the card <-> slot mapping
//! - `selection`: The 0-3 card selection state machine
//! - `game`: The controller, its reports and the command interface

pub mod core;
pub mod deck;
pub mod rules;
pub mod board;
pub mod selection;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Card, Position, GameRng, GameConfig, ContradictionPolicy,
    SetError, SelectionFault, Result,
    DECK_SIZE, EMPTY_SLOT_ID, BASE_SLOTS, ROW_WIDTH,
};

pub use crate::deck::Deck;

pub use crate::rules::{is_set, is_set_by_sum, completing_card, find_set};

pub use crate::board::{Board, SlotChange};

pub use crate::selection::{SelectionTracker, SelectionState, Toggle};

pub use crate::game::{
    GameController, GamePhase, GameCommands,
    StartReport, PickReport, NoSetReport, NoSetOutcome, Resolution,
    GameEvent, GameStats,
};
