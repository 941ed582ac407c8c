//! The interface an input layer drives a game through.

use crate::core::Result;

use super::controller::GameController;
use super::report::{NoSetReport, PickReport, StartReport};

/// Commands an input layer sends to a game.
///
/// Front ends hold a `GameCommands` implementor and forward player input to
/// it; they never reach into game state to change it.
pub trait GameCommands {
    /// The player asked to start playing.
    fn on_start_game(&mut self) -> Result<StartReport>;

    /// The player clicked a card (0 for an empty slot).
    fn on_card_picked(&mut self, card_id: u8) -> Result<PickReport>;

    /// The player claims there is no set on the table.
    fn on_no_set_declared(&mut self) -> Result<NoSetReport>;

    /// The player asked for a new game; the current one is discarded.
    fn on_new_game(&mut self) -> Result<StartReport>;
}

impl GameCommands for GameController {
    fn on_start_game(&mut self) -> Result<StartReport> {
        self.start_game()
    }

    fn on_card_picked(&mut self, card_id: u8) -> Result<PickReport> {
        self.pick_card(card_id)
    }

    fn on_no_set_declared(&mut self) -> Result<NoSetReport> {
        self.declare_no_set()
    }

    /// Rebuild from the config: a fixed seed deals the same game again,
    /// no seed shuffles a fresh deck.
    fn on_new_game(&mut self) -> Result<StartReport> {
        *self = GameController::new(self.config().clone());
        self.start_game()
    }
}
