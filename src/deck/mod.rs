//! The 81-card deck and its fixed play order.
//!
//! A `Deck` is shuffled once at game start and never reshuffled. Drawing does
//! not mutate the deck: the caller keeps its own cursor and asks for the next
//! batch starting there.

pub mod order;

pub use order::Deck;
