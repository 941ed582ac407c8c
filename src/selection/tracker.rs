//! Selection state machine.
//!
//! `Empty -> OneSelected -> TwoSelected -> Complete`, where `Complete` is
//! left immediately by resolving the triple (see [`SelectionTracker::take_triple`]).
//! Toggling a selected card steps back down by one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Card, Result, SelectionFault, SetError};

/// Number of cards in a selection awaiting resolution.
pub const SELECTION_SIZE: usize = 3;

/// Size of the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionState {
    Empty,
    OneSelected,
    TwoSelected,
    /// Three cards chosen; must be resolved before the next toggle.
    Complete,
}

/// Result of toggling a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Toggle {
    Selected,
    Deselected,
}

/// Ordered selection of up to 3 distinct cards.
///
/// The tracker does not know about the table; the controller only forwards
/// cards that are currently live.
///
/// ```
/// use set_engine::core::Card;
/// use set_engine::selection::{SelectionState, SelectionTracker, Toggle};
///
/// let mut selection = SelectionTracker::new();
/// let card = Card::new(7).unwrap();
///
/// assert_eq!(selection.toggle(card).unwrap(), Toggle::Selected);
/// assert_eq!(selection.state(), SelectionState::OneSelected);
/// assert_eq!(selection.toggle(card).unwrap(), Toggle::Deselected);
/// assert_eq!(selection.state(), SelectionState::Empty);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionTracker {
    /// Selected cards, in pick order.
    /// SmallVec keeps the (at most 3) cards inline.
    cards: SmallVec<[Card; SELECTION_SIZE]>,

    /// Last triple handed out for resolution.
    previous: Option<[Card; SELECTION_SIZE]>,
}

impl SelectionTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `card`, or deselect it if already selected.
    ///
    /// Fails with `InvalidSelectionState` (and changes nothing) when three
    /// cards are already selected.
    pub fn toggle(&mut self, card: Card) -> Result<Toggle> {
        if let Some(i) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(i);
            return Ok(Toggle::Deselected);
        }
        if self.is_complete() {
            return Err(SetError::InvalidSelectionState(SelectionFault::Full));
        }
        self.cards.push(card);
        Ok(Toggle::Selected)
    }

    /// Current selection, in pick order.
    #[must_use]
    pub fn current(&self) -> &[Card] {
        &self.cards
    }

    /// Get the state for the current selection size.
    #[must_use]
    pub fn state(&self) -> SelectionState {
        match self.cards.len() {
            0 => SelectionState::Empty,
            1 => SelectionState::OneSelected,
            2 => SelectionState::TwoSelected,
            _ => SelectionState::Complete,
        }
    }

    /// Check if three cards are selected.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cards.len() == SELECTION_SIZE
    }

    /// Check if a card is selected.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// The complete selection, without removing it.
    #[must_use]
    pub fn triple(&self) -> Option<[Card; SELECTION_SIZE]> {
        match self.cards.as_slice() {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Remove a complete selection for resolution.
    ///
    /// Returns `None` (and changes nothing) unless three cards are selected.
    /// The triple is remembered as the previous selection.
    pub fn take_triple(&mut self) -> Option<[Card; SELECTION_SIZE]> {
        let triple = self.triple()?;
        self.cards.clear();
        self.previous = Some(triple);
        Some(triple)
    }

    /// Last triple resolved, if any.
    #[must_use]
    pub fn previous(&self) -> Option<[Card; SELECTION_SIZE]> {
        self.previous
    }

    /// Reset to empty. The previous selection is kept.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
