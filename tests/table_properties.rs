//! Property tests for table bookkeeping and the cards-remaining counter.
//!
//! Random operation sequences are applied to a `Board` directly and to a
//! running `GameController`; after every step the card <-> slot mapping must
//! stay consistent and the counter must never go up.

use proptest::prelude::*;

use set_engine::board::Board;
use set_engine::core::{Card, GameConfig, Position, DECK_SIZE};
use set_engine::deck::Deck;
use set_engine::game::{GameController, NoSetOutcome};
use set_engine::rules::find_set;

#[derive(Clone, Debug)]
enum BoardOp {
    Replace(usize),
    Clear(usize),
    AppendRow(usize),
    Compact(usize, usize, usize),
}

fn board_op() -> impl Strategy<Value = BoardOp> {
    prop_oneof![
        (0usize..30).prop_map(BoardOp::Replace),
        (0usize..30).prop_map(BoardOp::Clear),
        (1usize..=3).prop_map(BoardOp::AppendRow),
        (0usize..30, 0usize..30, 0usize..30).prop_map(|(a, b, c)| BoardOp::Compact(a, b, c)),
    ]
}

#[derive(Clone, Debug)]
enum GameOp {
    Pick(usize),
    PickEmpty,
    DeclareNoSet,
    PlaySet,
}

fn game_op() -> impl Strategy<Value = GameOp> {
    prop_oneof![
        6 => (0usize..21).prop_map(GameOp::Pick),
        1 => Just(GameOp::PickEmpty),
        2 => Just(GameOp::DeclareNoSet),
        3 => Just(GameOp::PlaySet),
    ]
}

fn assert_mapping_consistent(board: &Board) -> Result<(), TestCaseError> {
    prop_assert!(board.check_consistency().is_ok());

    let placements = board.placements();
    prop_assert_eq!(placements.len(), board.live_count());
    for (card, position) in placements {
        prop_assert_eq!(board.position_of(card), Some(position));
        prop_assert_eq!(board.card_at(position), Some(card));
    }

    let mut live = board.live_cards();
    let total = live.len();
    live.sort();
    live.dedup();
    prop_assert_eq!(live.len(), total);
    Ok(())
}

proptest! {
    #[test]
    fn prop_board_mapping_stays_consistent(
        seed in any::<u64>(),
        ops in proptest::collection::vec(board_op(), 0..40),
    ) {
        let deck = Deck::new(Some(seed));
        let mut cursor = 12;
        let mut board = Board::new();
        board.deal_initial(deck.draw_batch(0, 12).unwrap()).unwrap();

        for op in ops {
            let placements = board.placements();
            match op {
                BoardOp::Replace(i) if !placements.is_empty() && cursor < DECK_SIZE => {
                    let (_, position) = placements[i % placements.len()];
                    let card = deck.cards()[cursor];
                    cursor += 1;
                    prop_assert!(board.replace(position, card).is_ok());
                }
                BoardOp::Clear(i) if !placements.is_empty() => {
                    let (card, position) = placements[i % placements.len()];
                    prop_assert_eq!(board.clear_slot(position).unwrap(), Some(card));
                }
                BoardOp::AppendRow(n) if cursor + n <= DECK_SIZE => {
                    let cards = deck.draw_batch(cursor, n).unwrap();
                    cursor += n;
                    prop_assert!(board.append_row(cards).is_ok());
                }
                BoardOp::Compact(a, b, c) if board.has_extra_rows() && placements.len() >= 3 => {
                    let n = placements.len();
                    let mut picks = vec![a % n, b % n, c % n];
                    picks.sort_unstable();
                    picks.dedup();
                    let resolved: Vec<Position> = picks.iter().map(|&i| placements[i].1).collect();
                    let before = board.live_count();
                    let slots_before = board.slot_count();

                    prop_assert!(board.compact(&resolved).is_ok());
                    prop_assert_eq!(board.live_count() + resolved.len(), before);
                    prop_assert!(board.slot_count() <= slots_before);
                }
                _ => {}
            }
            assert_mapping_consistent(&board)?;
        }
    }

    #[test]
    fn prop_rejected_operations_change_nothing(seed in any::<u64>(), row in 0usize..10) {
        let deck = Deck::new(Some(seed));
        let mut board = Board::new();
        board.deal_initial(deck.draw_batch(0, 12).unwrap()).unwrap();
        let before = board.clone();

        let on_table = deck.cards()[0];
        prop_assert!(board.replace(Position::new(row % 4, 0), on_table).is_err());
        prop_assert!(board.replace(Position::new(4 + row, 0), deck.cards()[20]).is_err());
        prop_assert!(board.append_row(&[deck.cards()[20], on_table]).is_err());
        prop_assert!(board.compact(&[Position::new(0, 0)]).is_err());
        prop_assert_eq!(board, before);
    }

    #[test]
    fn prop_counter_is_monotonic(
        seed in any::<u64>(),
        ops in proptest::collection::vec(game_op(), 0..120),
    ) {
        let mut game = GameController::new(GameConfig::new().with_seed(seed));
        let mut remaining = game.start_game().unwrap().cards_remaining;

        for op in ops {
            if game.is_finished() {
                break;
            }
            match op {
                GameOp::Pick(i) => {
                    let live = game.board().live_cards();
                    if !live.is_empty() {
                        let report = game.pick_card(live[i % live.len()].id()).unwrap();
                        prop_assert!(report.selected.len() < 3);
                    }
                }
                GameOp::PickEmpty => {
                    let report = game.pick_card(0).unwrap();
                    prop_assert!(report.toggle.is_none());
                }
                GameOp::DeclareNoSet => {
                    let had_set = find_set(&game.board().live_cards()).is_some();
                    let report = game.declare_no_set().unwrap();
                    let contradicted = matches!(report.outcome, NoSetOutcome::Contradiction(_));
                    prop_assert_eq!(contradicted, had_set);
                }
                GameOp::PlaySet => {
                    // Finish any partial selection so the triple resolves cleanly
                    for card in game.selection().current().to_vec() {
                        game.pick_card(card.id()).unwrap();
                    }
                    if let Some(triple) = find_set(&game.board().live_cards()) {
                        for card in triple {
                            game.pick_card(card.id()).unwrap();
                        }
                    }
                }
            }

            let now = game.cards_remaining();
            prop_assert!(now <= remaining);
            prop_assert!(now <= DECK_SIZE);
            remaining = now;
            assert_mapping_consistent(game.board())?;
        }
    }
}

/// Every card ever shown on the table stays unique across a full game.
#[test]
fn test_no_card_dealt_twice() {
    let mut game = GameController::new(GameConfig::new().with_seed(99));
    game.start_game().unwrap();

    let mut seen: Vec<Card> = game.board().live_cards();
    while !game.is_finished() {
        match find_set(&game.board().live_cards()) {
            Some(triple) => {
                for card in triple {
                    game.pick_card(card.id()).unwrap();
                }
            }
            None => {
                game.declare_no_set().unwrap();
            }
        }
        for card in game.board().live_cards() {
            if !seen.contains(&card) {
                seen.push(card);
            }
        }
    }

    assert_eq!(seen.len(), DECK_SIZE);
}
