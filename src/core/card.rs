//! Card identifiers and their attribute encoding.
//!
//! Every card in the 81-card deck is identified by an integer in `1..=81`.
//! Shifted to `0..=80` the identifier is a 4-digit base-3 numeral; each digit
//! is one of the four attributes (count, color, shading, shape). The engine
//! never needs the attributes named, only whether their digits agree.
//!
//! ## Usage
//!
//! ```
//! use set_engine::core::Card;
//!
//! let card = Card::new(42).unwrap();
//! assert_eq!(card.index(), 41);
//! assert_eq!(card.digits(), [2, 1, 1, 1]);
//! assert_eq!(Card::from_digits(card.digits()), card);
//!
//! // 0 is the "empty slot" identifier, never a card
//! assert!(Card::new(0).is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::error::{Result, SetError};

/// Number of cards in a deck (3^4).
pub const DECK_SIZE: usize = 81;

/// Number of attributes per card.
pub const ATTRIBUTE_COUNT: usize = 4;

/// Identifier reserved for an empty table slot.
pub const EMPTY_SLOT_ID: u8 = 0;

/// A single card, identified by `1..=81`.
///
/// The identifier is fixed for the lifetime of a game. Construct with
/// [`Card::new`], which rejects identifiers outside the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Create a card from its identifier.
    ///
    /// Returns `InvalidCard` for 0 (the empty-slot id) and anything above 81.
    pub fn new(id: u8) -> Result<Self> {
        if id == EMPTY_SLOT_ID || usize::from(id) > DECK_SIZE {
            return Err(SetError::InvalidCard(id));
        }
        Ok(Self(id))
    }

    /// Create a card from its zero-based index (`0..=80`).
    pub fn from_index(index: usize) -> Result<Self> {
        match index.checked_add(1).and_then(|id| u8::try_from(id).ok()) {
            Some(id) => Self::new(id),
            None => Err(SetError::InvalidCard(u8::MAX)),
        }
    }

    /// Get the raw identifier (`1..=81`).
    #[must_use]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Get the zero-based index (`0..=80`).
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Decode the four base-3 attribute digits, least-significant first.
    #[must_use]
    pub const fn digits(self) -> [u8; ATTRIBUTE_COUNT] {
        let v = self.0 - 1;
        [v % 3, (v / 3) % 3, (v / 9) % 3, (v / 27) % 3]
    }

    /// Encode four base-3 digits (least-significant first) back into a card.
    ///
    /// Digits are reduced modulo 3, so the result is always a valid card.
    #[must_use]
    pub const fn from_digits(digits: [u8; ATTRIBUTE_COUNT]) -> Self {
        let v = digits[0] % 3 + 3 * (digits[1] % 3) + 9 * (digits[2] % 3) + 27 * (digits[3] % 3);
        Self(v + 1)
    }

    /// Iterate over all 81 cards in identifier order.
    pub fn all() -> impl Iterator<Item = Card> {
        (1..=DECK_SIZE as u8).map(Card)
    }
}

impl TryFrom<u8> for Card {
    type Error = SetError;

    fn try_from(id: u8) -> Result<Self> {
        Self::new(id)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
