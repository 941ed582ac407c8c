//! Error type shared by every module of the engine.
//!
//! Normal gameplay outcomes ("not a set", a wrong "no set" call) are *not*
//! errors; they are reported through the game reports. Errors here are
//! caller-sequencing bugs or broken internal invariants.

use thiserror::Error;

use super::card::Card;
use super::phase::GamePhase;
use super::position::Position;

/// Why a selection request was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionFault {
    /// Three cards are already selected and awaiting resolution.
    Full,
    /// The card is not currently on the table.
    NotOnTable(Card),
    /// The identifier does not name a card.
    UnknownCard(u8),
}

impl std::fmt::Display for SelectionFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionFault::Full => write!(f, "selection already holds three cards"),
            SelectionFault::NotOnTable(card) => write!(f, "card {card} is not on the table"),
            SelectionFault::UnknownCard(id) => write!(f, "identifier {id} is not a card"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetError {
    #[error("out of cards: cannot draw {requested} from cursor {cursor}")]
    OutOfCards { cursor: usize, requested: usize },

    #[error("invalid selection: {0}")]
    InvalidSelectionState(SelectionFault),

    #[error("board mapping inconsistent: {detail}")]
    DuplicateCardInvariantViolation { detail: String },

    #[error("{operation} is not valid while the game is {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: GamePhase,
    },

    #[error("invalid card identifier {0}")]
    InvalidCard(u8),

    #[error("no slot at {0}")]
    InvalidPosition(Position),

    #[error("invalid deck: {reason}")]
    InvalidDeck { reason: String },

    #[error("invalid board operation: {reason}")]
    InvalidBoardOperation { reason: &'static str },
}

impl SetError {
    /// Check if this error indicates broken engine state rather than bad input.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            SetError::OutOfCards { .. } | SetError::DuplicateCardInvariantViolation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SetError>;
