//! Deck construction and batch drawing.

use serde::{Deserialize, Serialize};

use crate::core::{Card, GameRng, Result, SetError, DECK_SIZE};

/// A fixed permutation of all 81 cards.
///
/// ## Usage
///
/// ```
/// use set_engine::deck::Deck;
///
/// let deck = Deck::new(Some(42));
/// let opening = deck.draw_batch(0, 12).unwrap();
/// assert_eq!(opening.len(), 12);
///
/// // Same seed, same order
/// assert_eq!(Deck::new(Some(42)), deck);
///
/// // Drawing past the end fails
/// assert!(deck.draw_batch(80, 3).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    order: Vec<Card>,
    /// Seed the order was shuffled from; `None` for hand-built orders.
    seed: Option<u64>,
}

impl Deck {
    /// Shuffle a new deck.
    ///
    /// With `None` a seed is drawn from entropy and recorded, so the deal can
    /// still be replayed via [`Deck::seed`].
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self::from_seed(seed.unwrap_or_else(|| GameRng::from_entropy().seed()))
    }

    /// Shuffle a new deck from a fresh RNG seeded with `seed`.
    ///
    /// `Deck::from_seed(deck.seed().unwrap())` rebuilds the same order.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mut order: Vec<Card> = Card::all().collect();
        GameRng::new(seed).shuffle(&mut order);
        Self {
            order,
            seed: Some(seed),
        }
    }

    /// Build a deck with an explicit play order.
    ///
    /// The order must contain each of the 81 cards exactly once.
    pub fn from_order(order: Vec<Card>) -> Result<Self> {
        if order.len() != DECK_SIZE {
            return Err(SetError::InvalidDeck {
                reason: format!("expected {DECK_SIZE} cards, got {}", order.len()),
            });
        }

        let mut seen = [false; DECK_SIZE];
        for card in &order {
            if std::mem::replace(&mut seen[card.index()], true) {
                return Err(SetError::InvalidDeck {
                    reason: format!("card {card} appears more than once"),
                });
            }
        }

        Ok(Self { order, seed: None })
    }

    /// Get the next `n` cards starting at `cursor`.
    ///
    /// Returns `OutOfCards` if fewer than `n` cards remain.
    pub fn draw_batch(&self, cursor: usize, n: usize) -> Result<&[Card]> {
        match cursor.checked_add(n) {
            Some(end) if end <= self.order.len() => Ok(&self.order[cursor..end]),
            _ => Err(SetError::OutOfCards {
                cursor,
                requested: n,
            }),
        }
    }

    /// Get the full play order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.order
    }

    /// Get the seed this deck was shuffled from.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of cards in the deck (always 81).
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// A deck is never empty; drawing only moves the caller's cursor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
