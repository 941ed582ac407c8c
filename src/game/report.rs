//! What the controller reports back to the display layer.
//!
//! Reports are plain serializable values; the display layer never reads the
//! controller's internals to learn what changed.

use serde::{Deserialize, Serialize};

use crate::board::SlotChange;
use crate::core::{Card, GamePhase, Position};
use crate::selection::{SelectionState, Toggle};

/// Outcome of a card pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Fewer than three cards selected; nothing was checked.
    None,
    /// Three cards were checked and did not form a set.
    NotASet,
    /// Three cards formed a set and left the table.
    SetAccepted,
}

/// Result of starting a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartReport {
    /// Opening layout, row-major.
    pub placements: Vec<(Card, Position)>,
    pub cards_remaining: usize,
}

/// Result of picking a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickReport {
    /// `None` when the pick was ignored (empty slot).
    pub toggle: Option<Toggle>,

    /// Selection after the pick (and after any resolution).
    pub selection: SelectionState,

    /// Cards still selected after the pick.
    pub selected: Vec<Card>,

    /// The triple that was resolved by this pick, if any.
    pub resolved: Option<[Card; 3]>,

    pub resolution: Resolution,

    /// Slots whose content changed, in the order they changed.
    pub board_delta: Vec<SlotChange>,

    pub cards_remaining: usize,
}

/// Outcome of a "no set" declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoSetOutcome {
    /// The declaration was wrong: this set is on the table.
    Contradiction([Card; 3]),
    /// No set on the table; a row of fresh cards was dealt.
    ExtraCardsDealt(Vec<(Card, Position)>),
    /// No set on the table and the deck is exhausted.
    GameOver,
}

/// Result of a "no set" declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoSetReport {
    pub outcome: NoSetOutcome,
    pub cards_remaining: usize,
    /// Phase after the declaration.
    pub phase: GamePhase,
}

/// Entry in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Opening layout dealt from a deck with the given seed.
    Started { seed: Option<u64> },
    /// Game resumed from a known table.
    Resumed { cards_played: usize },
    SetAccepted([Card; 3]),
    NotASet([Card; 3]),
    /// Wrong "no set" declaration; the set that was on the table.
    Contradiction([Card; 3]),
    ExtraCardsDealt(Vec<Card>),
    GameOver,
}

/// Running tallies for one game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub sets_found: u32,
    /// Complete selections that were not sets.
    pub wrong_selections: u32,
    /// "No set" declarations with a set on the table.
    pub false_no_set_calls: u32,
    pub extra_rows_dealt: u32,
}
