//! Table bookkeeping with a consistent bidirectional mapping.
//!
//! Every mutation validates its inputs before touching anything, so a
//! rejected call leaves the board exactly as it was.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Card, Position, Result, SetError, BASE_SLOTS, INITIAL_ROWS, ROW_WIDTH};

/// New content of one slot after a board mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotChange {
    pub position: Position,
    /// `None` when the slot was voided.
    pub card: Option<Card>,
}

impl SlotChange {
    /// A slot now holding `card`.
    #[must_use]
    pub const fn filled(position: Position, card: Card) -> Self {
        Self {
            position,
            card: Some(card),
        }
    }

    /// A slot now empty.
    #[must_use]
    pub const fn empty(position: Position) -> Self {
        Self {
            position,
            card: None,
        }
    }
}

/// The cards on the table.
///
/// Rows always have 3 slots; a slot is `None` once voided. The inverse map
/// holds exactly the live cards.
///
/// ## Usage
///
/// ```
/// use set_engine::board::Board;
/// use set_engine::core::{Card, Position};
///
/// let cards: Vec<Card> = (1..=15).map(|id| Card::new(id).unwrap()).collect();
///
/// let mut board = Board::new();
/// board.deal_initial(&cards[..12]).unwrap();
/// assert_eq!(board.position_of(cards[4]), Some(Position::new(1, 1)));
///
/// board.append_row(&cards[12..]).unwrap();
/// assert_eq!(board.slot_count(), 15);
///
/// board.clear_slot(Position::new(0, 0)).unwrap();
/// assert_eq!(board.live_count(), 14);
/// assert!(!board.contains(cards[0]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Forward mapping: rows of slots.
    rows: Vec<[Option<Card>; ROW_WIDTH]>,

    /// Inverse mapping: card -> slot, for live cards only.
    locations: FxHashMap<Card, Position>,
}

impl Board {
    /// Create an empty, undealt board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the opening layout has been dealt.
    #[must_use]
    pub fn is_dealt(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Lay out the opening 12 cards as a 4 x 3 grid, row-major.
    ///
    /// Valid once per board.
    pub fn deal_initial(&mut self, cards: &[Card]) -> Result<Vec<(Card, Position)>> {
        if self.is_dealt() {
            return Err(SetError::InvalidBoardOperation {
                reason: "opening layout already dealt",
            });
        }
        if cards.len() != BASE_SLOTS {
            return Err(SetError::InvalidBoardOperation {
                reason: "opening layout needs exactly 12 cards",
            });
        }
        self.check_placeable(cards)?;

        let placed: Vec<(Card, Position)> = cards
            .iter()
            .enumerate()
            .map(|(i, &card)| (card, Position::new(i / ROW_WIDTH, i % ROW_WIDTH)))
            .collect();

        self.rows = vec![[None; ROW_WIDTH]; INITIAL_ROWS];
        for &(card, position) in &placed {
            self.set_slot(position, Some(card));
        }

        debug!(cards = placed.len(), "dealt opening layout");
        Ok(placed)
    }

    /// Overwrite a slot with a new card, in place.
    ///
    /// Returns the card previously in the slot, if any.
    pub fn replace(&mut self, position: Position, card: Card) -> Result<Option<Card>> {
        self.slot(position)?;
        self.check_placeable(&[card])?;

        let old = self.set_slot(position, Some(card));
        debug!(%position, %card, old = ?old.map(Card::id), "replaced slot");
        Ok(old)
    }

    /// Append a new row holding up to 3 cards.
    ///
    /// Slots past the given cards stay empty.
    pub fn append_row(&mut self, cards: &[Card]) -> Result<Vec<(Card, Position)>> {
        if !self.is_dealt() {
            return Err(SetError::InvalidBoardOperation {
                reason: "cannot append a row before the opening deal",
            });
        }
        if cards.is_empty() || cards.len() > ROW_WIDTH {
            return Err(SetError::InvalidBoardOperation {
                reason: "a row holds between 1 and 3 cards",
            });
        }
        self.check_placeable(cards)?;

        let row = self.rows.len();
        self.rows.push([None; ROW_WIDTH]);

        let placed: Vec<(Card, Position)> = cards
            .iter()
            .enumerate()
            .map(|(column, &card)| (card, Position::new(row, column)))
            .collect();
        for &(card, position) in &placed {
            self.set_slot(position, Some(card));
        }

        debug!(row, cards = placed.len(), "appended row");
        Ok(placed)
    }

    /// Void a slot, leaving a permanent gap.
    ///
    /// Returns the card that was removed, if any.
    pub fn clear_slot(&mut self, position: Position) -> Result<Option<Card>> {
        self.slot(position)?;
        let old = self.set_slot(position, None);
        debug!(%position, old = ?old.map(Card::id), "cleared slot");
        Ok(old)
    }

    /// Fill the slots freed by a resolved set from the trailing row.
    ///
    /// Resolved slots that sit in the trailing row are simply voided. Every
    /// other resolved slot receives the next live card of the trailing row
    /// (in column order) that is not itself resolved; once the trailing row
    /// runs out, the remaining resolved slots stay empty. Trailing rows past
    /// the opening 4 that end up empty are dropped.
    ///
    /// Returns every slot change applied, in order.
    pub fn compact(&mut self, resolved: &[Position]) -> Result<Vec<SlotChange>> {
        if self.rows.len() <= INITIAL_ROWS {
            return Err(SetError::InvalidBoardOperation {
                reason: "compaction needs an extra row",
            });
        }
        for (i, &position) in resolved.iter().enumerate() {
            if self.slot(position)?.is_none() {
                return Err(SetError::InvalidPosition(position));
            }
            if resolved[..i].contains(&position) {
                return Err(SetError::InvalidBoardOperation {
                    reason: "resolved positions must be distinct",
                });
            }
        }

        // Plan every change before mutating anything.
        let last = self.rows.len() - 1;
        let mut donors = (0..ROW_WIDTH)
            .map(|column| Position::new(last, column))
            .filter(|p| !resolved.contains(p))
            .filter_map(|p| self.card_at(p).map(|card| (p, card)))
            .collect::<Vec<_>>()
            .into_iter();

        let mut changes = Vec::with_capacity(resolved.len() * 2);
        for &position in resolved.iter().filter(|p| p.row == last) {
            changes.push(SlotChange::empty(position));
        }
        for &position in resolved.iter().filter(|p| p.row != last) {
            match donors.next() {
                Some((from, card)) => {
                    changes.push(SlotChange::filled(position, card));
                    changes.push(SlotChange::empty(from));
                }
                None => changes.push(SlotChange::empty(position)),
            }
        }

        for change in &changes {
            self.set_slot(change.position, change.card);
        }

        let before = self.rows.len();
        while self.rows.len() > INITIAL_ROWS
            && self.rows.last().is_some_and(|row| row.iter().all(Option::is_none))
        {
            self.rows.pop();
        }

        debug!(
            changes = changes.len(),
            rows_dropped = before - self.rows.len(),
            "compacted table"
        );
        Ok(changes)
    }

    // === Queries ===

    /// Get the card in a slot, `None` for an empty or unknown slot.
    #[must_use]
    pub fn card_at(&self, position: Position) -> Option<Card> {
        self.slot(position).ok().flatten()
    }

    /// Get the slot a card occupies.
    #[must_use]
    pub fn position_of(&self, card: Card) -> Option<Position> {
        self.locations.get(&card).copied()
    }

    /// Check if a card is on the table.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.locations.contains_key(&card)
    }

    /// Live cards in row-major order (empty slots skipped).
    #[must_use]
    pub fn live_cards(&self) -> Vec<Card> {
        self.rows.iter().flatten().filter_map(|&slot| slot).collect()
    }

    /// Live cards with their slots, row-major.
    #[must_use]
    pub fn placements(&self) -> Vec<(Card, Position)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, slots)| {
                slots
                    .iter()
                    .enumerate()
                    .filter_map(move |(column, &slot)| slot.map(|card| (card, Position::new(row, column))))
            })
            .collect()
    }

    /// Number of live cards.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of slots, empty ones included.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.rows.len() * ROW_WIDTH
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if rows were appended beyond the opening layout.
    #[must_use]
    pub fn has_extra_rows(&self) -> bool {
        self.rows.len() > INITIAL_ROWS
    }

    /// Get the slots row by row.
    #[must_use]
    pub fn rows(&self) -> &[[Option<Card>; ROW_WIDTH]] {
        &self.rows
    }

    /// Verify that the forward and inverse mappings agree.
    pub fn check_consistency(&self) -> Result<()> {
        let mut live = 0;
        for (card, position) in self.placements() {
            live += 1;
            if self.locations.get(&card) != Some(&position) {
                return Err(SetError::DuplicateCardInvariantViolation {
                    detail: format!("card {card} at {position} is indexed at {:?}", self.locations.get(&card)),
                });
            }
        }
        if live != self.locations.len() {
            return Err(SetError::DuplicateCardInvariantViolation {
                detail: format!("{live} cards on the table but {} indexed", self.locations.len()),
            });
        }
        Ok(())
    }

    // === Internals ===

    fn slot(&self, position: Position) -> Result<Option<Card>> {
        if position.column >= ROW_WIDTH {
            return Err(SetError::InvalidPosition(position));
        }
        self.rows
            .get(position.row)
            .map(|row| row[position.column])
            .ok_or(SetError::InvalidPosition(position))
    }

    /// Reject cards that are repeated or already on the table.
    fn check_placeable(&self, cards: &[Card]) -> Result<()> {
        for (i, card) in cards.iter().enumerate() {
            if self.contains(*card) || cards[..i].contains(card) {
                return Err(SetError::DuplicateCardInvariantViolation {
                    detail: format!("card {card} would occupy two slots"),
                });
            }
        }
        Ok(())
    }

    /// Write a slot and keep the inverse map in step. Position must exist.
    fn set_slot(&mut self, position: Position, card: Option<Card>) -> Option<Card> {
        let old = std::mem::replace(&mut self.rows[position.row][position.column], card);
        if let Some(old) = old {
            // A card moved elsewhere earlier in a batch keeps its new entry.
            if self.locations.get(&old) == Some(&position) {
                self.locations.remove(&old);
            }
        }
        if let Some(card) = card {
            self.locations.insert(card, position);
        }
        old
    }
}
