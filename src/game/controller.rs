//! The game controller: deals, resolves selections, handles "no set".
//!
//! One `GameController` owns everything for one game: the deck, the table,
//! the selection and the cursor into the deck. It holds no reference to any
//! display object; every operation runs to completion and returns a report.

use im::Vector;
use tracing::{debug, error, info, warn};

use crate::board::{Board, SlotChange};
use crate::core::{
    Card, ContradictionPolicy, GameConfig, GamePhase, Position, Result, SelectionFault, SetError,
    BASE_SLOTS, DECK_SIZE, EMPTY_SLOT_ID, ROW_WIDTH,
};
use crate::deck::Deck;
use crate::rules::{find_set, is_set};
use crate::selection::SelectionTracker;

use super::report::{
    GameEvent, GameStats, NoSetOutcome, NoSetReport, PickReport, Resolution, StartReport,
};

/// Cards drawn per refill or extra row.
const BATCH: usize = 3;

/// Orchestrates one game of Set.
///
/// ## Usage
///
/// ```
/// use set_engine::core::GameConfig;
/// use set_engine::game::{GameController, GamePhase};
/// use set_engine::rules::find_set;
///
/// let mut game = GameController::new(GameConfig::new().with_seed(42));
/// let report = game.start_game().unwrap();
/// assert_eq!(report.cards_remaining, 69);
/// assert_eq!(game.phase(), GamePhase::Running);
///
/// // Pick a set if there is one, otherwise ask for more cards
/// match find_set(&game.board().live_cards()) {
///     Some(triple) => {
///         for card in triple {
///             game.pick_card(card.id()).unwrap();
///         }
///     }
///     None => {
///         game.declare_no_set().unwrap();
///     }
/// }
/// assert_eq!(game.cards_remaining(), 66);
/// ```
#[derive(Clone, Debug)]
pub struct GameController {
    config: GameConfig,
    deck: Deck,
    board: Board,
    selection: SelectionTracker,

    /// Cursor into the deck: cards dealt into play so far.
    cards_played: usize,

    phase: GamePhase,
    stats: GameStats,

    /// Event history. Persistent vector, cheap to clone for snapshots.
    history: Vector<GameEvent>,
}

impl GameController {
    /// Create a game with a deck shuffled per `config`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let deck = Deck::new(config.seed);
        Self::with_deck(config, deck)
    }

    /// Create a game with a given deck. The config seed is not used.
    #[must_use]
    pub fn with_deck(config: GameConfig, deck: Deck) -> Self {
        Self {
            config,
            deck,
            board: Board::new(),
            selection: SelectionTracker::new(),
            cards_played: 0,
            phase: GamePhase::NotStarted,
            stats: GameStats::default(),
            history: Vector::new(),
        }
    }

    /// Resume a running game from a known table.
    ///
    /// `cards_played` cards have left the deck; `table` lists the ones still
    /// face up. The first 12 form the opening grid, the rest are appended in
    /// rows of 3.
    pub fn from_table(
        config: GameConfig,
        deck: Deck,
        cards_played: usize,
        table: &[Card],
    ) -> Result<Self> {
        if cards_played > DECK_SIZE {
            return Err(SetError::InvalidDeck {
                reason: format!("cursor {cards_played} is past the end of the deck"),
            });
        }
        // Play only ever reaches 12, 15, ..., 81.
        if cards_played < BASE_SLOTS || (cards_played - BASE_SLOTS) % BATCH != 0 {
            return Err(SetError::InvalidDeck {
                reason: format!("cursor {cards_played} is not reachable in play"),
            });
        }
        if table.len() < BASE_SLOTS {
            return Err(SetError::InvalidBoardOperation {
                reason: "a table holds at least 12 cards",
            });
        }
        let drawn = &deck.cards()[..cards_played];
        if !table.iter().all(|card| drawn.contains(card)) {
            return Err(SetError::InvalidBoardOperation {
                reason: "table cards must already be drawn from the deck",
            });
        }

        let mut game = Self::with_deck(config, deck);
        game.board.deal_initial(&table[..BASE_SLOTS])?;
        for row in table[BASE_SLOTS..].chunks(ROW_WIDTH) {
            game.board.append_row(row)?;
        }
        game.cards_played = cards_played;
        game.phase = GamePhase::Running;
        game.history.push_back(GameEvent::Resumed { cards_played });

        info!(cards_played, table = table.len(), "resumed game");
        Ok(game)
    }

    // === Operations ===

    /// Deal the opening 12 cards.
    pub fn start_game(&mut self) -> Result<StartReport> {
        self.require_phase(GamePhase::NotStarted, "start_game")?;

        let opening = self.draw(BASE_SLOTS)?;
        let placements = self.board.deal_initial(&opening)?;
        self.cards_played = BASE_SLOTS;
        self.phase = GamePhase::Running;
        self.history.push_back(GameEvent::Started {
            seed: self.deck.seed(),
        });

        info!(seed = ?self.deck.seed(), "game started");
        Ok(StartReport {
            placements,
            cards_remaining: self.cards_remaining(),
        })
    }

    /// Toggle a card in the selection; resolve when three are selected.
    ///
    /// `card_id` 0 (an empty slot) is ignored. Any other id must name a card
    /// currently on the table, otherwise `InvalidSelectionState` is returned
    /// and nothing changes. If resolving the triple fails, the pick is undone.
    pub fn pick_card(&mut self, card_id: u8) -> Result<PickReport> {
        self.require_phase(GamePhase::Running, "pick_card")?;

        if card_id == EMPTY_SLOT_ID {
            debug!("ignored pick on empty slot");
            return Ok(self.pick_report(None, None, Resolution::None, Vec::new()));
        }

        let card = Card::new(card_id)
            .map_err(|_| SetError::InvalidSelectionState(SelectionFault::UnknownCard(card_id)))?;
        if !self.board.contains(card) {
            warn!(%card, "picked card is not on the table");
            return Err(SetError::InvalidSelectionState(SelectionFault::NotOnTable(card)));
        }

        let toggle = self.selection.toggle(card)?;
        debug!(%card, ?toggle, selected = self.selection.current().len(), "toggled card");

        let (resolved, resolution, delta) = match self.selection.triple() {
            Some(triple) => match self.resolve(triple) {
                Ok((resolution, delta)) => {
                    self.selection.take_triple();
                    (Some(triple), resolution, delta)
                }
                Err(err) => {
                    self.selection.toggle(card)?;
                    return Err(err);
                }
            },
            None => (None, Resolution::None, Vec::new()),
        };

        Ok(self.pick_report(Some(toggle), resolved, resolution, delta))
    }

    /// Check the player's claim that the table holds no set.
    ///
    /// A wrong claim is reported with the set that was missed. A correct
    /// claim deals an extra row, or ends the game once the deck is exhausted.
    pub fn declare_no_set(&mut self) -> Result<NoSetReport> {
        self.require_phase(GamePhase::Running, "declare_no_set")?;

        let outcome = if let Some(triple) = find_set(&self.board.live_cards()) {
            self.stats.false_no_set_calls += 1;
            self.history.push_back(GameEvent::Contradiction(triple));
            info!(set = ?triple.map(Card::id), "no-set declaration contradicted");

            if self.config.contradiction_policy == ContradictionPolicy::EndGame {
                self.finish();
            }
            NoSetOutcome::Contradiction(triple)
        } else if self.deck_exhausted() {
            self.finish();
            NoSetOutcome::GameOver
        } else {
            let extra = self.draw(BATCH)?;
            let placed = self.board.append_row(&extra)?;
            self.cards_played += BATCH;
            self.stats.extra_rows_dealt += 1;
            self.history.push_back(GameEvent::ExtraCardsDealt(extra));
            info!(
                slots = self.board.slot_count(),
                cards_remaining = self.cards_remaining(),
                "no set on table, dealt extra row"
            );
            NoSetOutcome::ExtraCardsDealt(placed)
        };

        Ok(NoSetReport {
            outcome,
            cards_remaining: self.cards_remaining(),
            phase: self.phase,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> GameStats {
        self.stats
    }

    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    /// Cards dealt into play so far (the deck cursor).
    #[must_use]
    pub fn cards_played(&self) -> usize {
        self.cards_played
    }

    /// Cards not yet dealt: `81 - cards_played`.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        DECK_SIZE - self.cards_played
    }

    #[must_use]
    pub fn deck_exhausted(&self) -> bool {
        self.cards_played >= DECK_SIZE
    }

    // === Internals ===

    fn require_phase(&self, expected: GamePhase, operation: &'static str) -> Result<()> {
        if self.phase != expected {
            warn!(operation, phase = ?self.phase, "operation rejected in this phase");
            return Err(SetError::InvalidPhase {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }

    /// Next `n` undrawn cards. Does not advance the cursor.
    fn draw(&self, n: usize) -> Result<Vec<Card>> {
        match self.deck.draw_batch(self.cards_played, n) {
            Ok(cards) => Ok(cards.to_vec()),
            Err(err) => {
                error!(%err, cards_played = self.cards_played, "drew past the end of the deck");
                Err(err)
            }
        }
    }

    /// Resolve a complete selection against the rules and update the table.
    fn resolve(&mut self, triple: [Card; 3]) -> Result<(Resolution, Vec<SlotChange>)> {
        if !is_set(triple[0], triple[1], triple[2]) {
            self.stats.wrong_selections += 1;
            self.history.push_back(GameEvent::NotASet(triple));
            info!(cards = ?triple.map(Card::id), "not a set");
            return Ok((Resolution::NotASet, Vec::new()));
        }

        // Collect every affected slot before mutating the table.
        let mut positions = [Position::new(0, 0); 3];
        for (slot, card) in positions.iter_mut().zip(triple) {
            *slot = self.board.position_of(card).ok_or_else(|| {
                error!(%card, "selected card missing from the table");
                SetError::DuplicateCardInvariantViolation {
                    detail: format!("selected card {card} has no slot"),
                }
            })?;
        }

        let delta = if self.deck_exhausted() {
            let mut delta = Vec::with_capacity(positions.len());
            for position in positions {
                self.board.clear_slot(position)?;
                delta.push(SlotChange::empty(position));
            }
            delta
        } else if self.board.has_extra_rows() {
            self.board.compact(&positions)?
        } else {
            let fresh = self.draw(BATCH)?;
            if let Some(card) = fresh.iter().find(|card| self.board.contains(**card)) {
                error!(%card, "undrawn card already on the table");
                return Err(SetError::DuplicateCardInvariantViolation {
                    detail: format!("undrawn card {card} is already on the table"),
                });
            }
            let mut delta = Vec::with_capacity(positions.len());
            for (position, card) in positions.into_iter().zip(fresh) {
                self.board.replace(position, card)?;
                delta.push(SlotChange::filled(position, card));
            }
            self.cards_played += BATCH;
            delta
        };

        self.stats.sets_found += 1;
        self.history.push_back(GameEvent::SetAccepted(triple));
        info!(
            cards = ?triple.map(Card::id),
            live = self.board.live_count(),
            cards_remaining = self.cards_remaining(),
            "set accepted"
        );
        Ok((Resolution::SetAccepted, delta))
    }

    fn finish(&mut self) {
        self.phase = GamePhase::Finished;
        self.history.push_back(GameEvent::GameOver);
        info!(sets_found = self.stats.sets_found, "game over");
    }

    fn pick_report(
        &self,
        toggle: Option<crate::selection::Toggle>,
        resolved: Option<[Card; 3]>,
        resolution: Resolution,
        board_delta: Vec<SlotChange>,
    ) -> PickReport {
        PickReport {
            toggle,
            selection: self.selection.state(),
            selected: self.selection.current().to_vec(),
            resolved,
            resolution,
            board_delta,
            cards_remaining: self.cards_remaining(),
        }
    }
}
