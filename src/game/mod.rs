//! Game orchestration: the controller state machine, its reports, and the
//! command interface front ends drive it through.
//!
//! ## Key Types
//!
//! - `GameController`: owns deck, table, selection and cursor for one game
//! - `GamePhase`: `NotStarted -> Running -> Finished`
//! - `PickReport`, `NoSetReport`, `StartReport`: results handed to the display
//! - `GameEvent`, `GameStats`: history and tallies
//! - `GameCommands`: input-layer interface

pub mod controller;
pub mod report;
pub mod commands;

pub use crate::core::GamePhase;
pub use controller::GameController;
pub use report::{
    GameEvent, GameStats, NoSetOutcome, NoSetReport, PickReport, Resolution, StartReport,
};
pub use commands::GameCommands;
