//! End-to-end game scenarios.
//!
//! These tests drive `GameController` through fixed decks and tables:
//! - Accepting a set on the opening table refills from the deck
//! - Rejected triples leave the table alone
//! - Sets found after the deck runs out leave gaps
//! - "No set" deals an extra row or ends the game
//! - Sets found with an extra row compact the table

use set_engine::core::{Card, GameConfig, Position, SetError};
use set_engine::board::SlotChange;
use set_engine::deck::Deck;
use set_engine::game::{GameController, GamePhase, NoSetOutcome, Resolution};
use set_engine::rules::{find_set, is_set};
use set_engine::selection::SelectionState;

/// Twelve cards with no set among them.
const NO_SET_TABLE: [u8; 12] = [1, 2, 4, 5, 10, 11, 13, 14, 28, 29, 31, 32];

fn card(id: u8) -> Card {
    Card::new(id).unwrap()
}

fn cards(ids: &[u8]) -> Vec<Card> {
    ids.iter().map(|&id| card(id)).collect()
}

/// Deck in identifier order: the opening table is 1..=12.
fn ascending_deck() -> Deck {
    Deck::from_order(Card::all().collect()).unwrap()
}

/// Deck whose opening 12 cards hold no set; the rest follow in id order
/// (so the first extra row is 3, 6, 7).
fn no_set_deck() -> Deck {
    let mut order = cards(&NO_SET_TABLE);
    order.extend(Card::all().filter(|c| !NO_SET_TABLE.contains(&c.id())));
    Deck::from_order(order).unwrap()
}

fn started(deck: Deck) -> GameController {
    let mut game = GameController::with_deck(GameConfig::default(), deck);
    game.start_game().unwrap();
    game
}

// =============================================================================
// Resolving selections
// =============================================================================

/// A set on the 12-card table is replaced by the next three deck cards.
#[test]
fn test_set_accepted_refills_from_deck() {
    let mut game = started(ascending_deck());
    assert_eq!(game.cards_remaining(), 69);

    game.pick_card(1).unwrap();
    game.pick_card(2).unwrap();
    let report = game.pick_card(3).unwrap();

    assert_eq!(report.resolution, Resolution::SetAccepted);
    assert_eq!(report.cards_remaining, 66);
    assert_eq!(
        report.board_delta,
        vec![
            SlotChange::filled(Position::new(0, 0), card(13)),
            SlotChange::filled(Position::new(0, 1), card(14)),
            SlotChange::filled(Position::new(0, 2), card(15)),
        ]
    );

    let board = game.board();
    assert_eq!(board.slot_count(), 12);
    assert_eq!(board.live_count(), 12);
    for id in 1..=3 {
        assert!(!board.contains(card(id)));
    }
    assert!(board.check_consistency().is_ok());
}

/// A triple that is not a set changes nothing but the selection.
#[test]
fn test_not_a_set_leaves_board_unchanged() {
    let mut game = started(ascending_deck());
    let before = game.board().clone();

    game.pick_card(1).unwrap();
    game.pick_card(2).unwrap();
    let report = game.pick_card(4).unwrap();

    assert_eq!(report.resolution, Resolution::NotASet);
    assert_eq!(report.selection, SelectionState::Empty);
    assert!(report.selected.is_empty());
    assert!(report.board_delta.is_empty());
    assert_eq!(report.cards_remaining, 69);
    assert_eq!(game.board(), &before);
}

/// After the deck is exhausted a set leaves three permanent gaps.
#[test]
fn test_set_with_exhausted_deck_voids_slots() {
    let table = cards(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    let mut game =
        GameController::from_table(GameConfig::default(), ascending_deck(), 81, &table).unwrap();
    assert_eq!(game.cards_remaining(), 0);

    game.pick_card(1).unwrap();
    game.pick_card(2).unwrap();
    let report = game.pick_card(3).unwrap();

    assert_eq!(report.resolution, Resolution::SetAccepted);
    assert_eq!(report.cards_remaining, 0);
    assert_eq!(
        report.board_delta,
        vec![
            SlotChange::empty(Position::new(0, 0)),
            SlotChange::empty(Position::new(0, 1)),
            SlotChange::empty(Position::new(0, 2)),
        ]
    );
    assert_eq!(game.board().slot_count(), 12);
    assert_eq!(game.board().live_count(), 9);
    assert!(game.board().check_consistency().is_ok());
}

// =============================================================================
// Declaring "no set"
// =============================================================================

/// A correct "no set" call deals three cards as a new row.
#[test]
fn test_no_set_deals_extra_row() {
    let mut game = started(no_set_deck());

    let report = game.declare_no_set().unwrap();

    assert_eq!(
        report.outcome,
        NoSetOutcome::ExtraCardsDealt(vec![
            (card(3), Position::new(4, 0)),
            (card(6), Position::new(4, 1)),
            (card(7), Position::new(4, 2)),
        ])
    );
    assert_eq!(report.cards_remaining, 66);
    assert_eq!(report.phase, GamePhase::Running);
    assert_eq!(game.board().slot_count(), 15);
    assert_eq!(game.stats().extra_rows_dealt, 1);
}

/// A correct "no set" call with the deck exhausted ends the game.
#[test]
fn test_no_set_with_exhausted_deck_finishes() {
    let mut game =
        GameController::from_table(GameConfig::default(), no_set_deck(), 81, &cards(&NO_SET_TABLE))
            .unwrap();

    let report = game.declare_no_set().unwrap();

    assert_eq!(report.outcome, NoSetOutcome::GameOver);
    assert_eq!(report.phase, GamePhase::Finished);
    assert!(game.is_finished());
    assert!(game.pick_card(1).is_err());
    assert!(game.declare_no_set().is_err());
}

/// A resumed game must sit on a cursor play can reach, so the last
/// "no set" call always ends the game instead of running out of cards.
#[test]
fn test_resume_rejects_cursor_short_of_a_full_batch() {
    for cursor in [79, 80] {
        let resumed =
            GameController::from_table(GameConfig::default(), no_set_deck(), cursor, &cards(&NO_SET_TABLE));
        assert!(matches!(resumed, Err(SetError::InvalidDeck { .. })));
    }

    let mut game =
        GameController::from_table(GameConfig::default(), no_set_deck(), 78, &cards(&NO_SET_TABLE))
            .unwrap();
    let report = game.declare_no_set().unwrap();
    assert!(matches!(report.outcome, NoSetOutcome::ExtraCardsDealt(_)));
    assert_eq!(report.cards_remaining, 0);
}

/// A wrong "no set" call reports the first set found and changes nothing.
#[test]
fn test_no_set_contradiction() {
    let mut game = started(ascending_deck());
    let before = game.board().clone();

    let report = game.declare_no_set().unwrap();

    assert_eq!(report.outcome, NoSetOutcome::Contradiction([card(1), card(2), card(3)]));
    assert_eq!(report.cards_remaining, 69);
    assert_eq!(game.board(), &before);
}

// =============================================================================
// Compaction
// =============================================================================

/// A set found with 15 slots pulls the trailing row into the gaps instead
/// of drawing new cards.
#[test]
fn test_set_with_extra_row_compacts() {
    let mut game = started(no_set_deck());
    game.declare_no_set().unwrap();
    assert_eq!(game.cards_remaining(), 66);

    // 1 at (0, 0), 2 at (0, 1), 3 in the extra row at (4, 0)
    assert!(is_set(card(1), card(2), card(3)));
    game.pick_card(1).unwrap();
    game.pick_card(2).unwrap();
    let report = game.pick_card(3).unwrap();

    assert_eq!(report.resolution, Resolution::SetAccepted);
    assert_eq!(report.cards_remaining, 66);

    let board = game.board();
    assert_eq!(board.slot_count(), 12);
    assert_eq!(board.row_count(), 4);
    assert_eq!(board.live_count(), 12);
    assert_eq!(board.card_at(Position::new(0, 0)), Some(card(6)));
    assert_eq!(board.card_at(Position::new(0, 1)), Some(card(7)));
    assert!(board.check_consistency().is_ok());

    // Only cards that were already on the table remain
    let mut live: Vec<u8> = board.live_cards().iter().map(|c| c.id()).collect();
    live.sort_unstable();
    assert_eq!(live, vec![4, 5, 6, 7, 10, 11, 13, 14, 28, 29, 31, 32]);
}

/// Compaction when none of the set sits in the trailing row: all three
/// trailing cards move up and the extra row disappears.
#[test]
fn test_compaction_moves_whole_trailing_row() {
    let table: Vec<Card> = (1..=15).map(card).collect();
    let mut game =
        GameController::from_table(GameConfig::default(), ascending_deck(), 15, &table).unwrap();
    assert_eq!(game.board().row_count(), 5);

    game.pick_card(1).unwrap();
    game.pick_card(2).unwrap();
    let report = game.pick_card(3).unwrap();
    assert_eq!(report.resolution, Resolution::SetAccepted);

    let board = game.board();
    assert_eq!(board.row_count(), 4);
    assert_eq!(board.slot_count(), 12);
    assert_eq!(board.live_count(), 12);
    assert_eq!(board.card_at(Position::new(0, 0)), Some(card(13)));
    assert_eq!(board.card_at(Position::new(0, 1)), Some(card(14)));
    assert_eq!(board.card_at(Position::new(0, 2)), Some(card(15)));
    assert_eq!(board.position_of(card(13)), Some(Position::new(0, 0)));
    assert!(board.check_consistency().is_ok());
    assert_eq!(game.cards_remaining(), 66);
}

// =============================================================================
// Whole games
// =============================================================================

/// Playing a seeded game to the end finishes with the deck exhausted.
#[test]
fn test_full_game_reaches_finished() {
    let mut game = GameController::new(GameConfig::new().with_seed(2024));
    game.start_game().unwrap();

    let mut steps = 0;
    while !game.is_finished() && steps < 500 {
        match find_set(&game.board().live_cards()) {
            Some(triple) => {
                for c in triple {
                    game.pick_card(c.id()).unwrap();
                }
            }
            None => {
                game.declare_no_set().unwrap();
            }
        }
        assert!(game.board().check_consistency().is_ok());
        steps += 1;
    }

    assert!(game.is_finished());
    assert_eq!(game.cards_remaining(), 0);
    assert!(find_set(&game.board().live_cards()).is_none());
    assert_eq!(game.stats().false_no_set_calls, 0);
}

/// The same seed replays the same game.
#[test]
fn test_seeded_games_replay() {
    let play = |seed: u64| {
        let mut game = GameController::new(GameConfig::new().with_seed(seed));
        game.start_game().unwrap();
        for _ in 0..10 {
            match find_set(&game.board().live_cards()) {
                Some(triple) => {
                    for c in triple {
                        game.pick_card(c.id()).unwrap();
                    }
                }
                None => {
                    game.declare_no_set().unwrap();
                }
            }
        }
        (game.board().clone(), game.cards_remaining())
    };

    assert_eq!(play(7), play(7));
}
