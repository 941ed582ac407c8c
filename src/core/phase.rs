//! Game lifecycle phases.

use serde::{Deserialize, Serialize};

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    Running,
    Finished,
}
