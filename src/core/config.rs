//! Game configuration.
//!
//! The rules of Set are fixed; what a game can configure is how the deck is
//! seeded and how strictly a wrong "no set" declaration is treated.

use serde::{Deserialize, Serialize};

/// What happens when a player declares "no set" but a set is on the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContradictionPolicy {
    /// Report the set that was missed; the game continues.
    #[default]
    Inform,
    /// Report the set that was missed and end the game.
    EndGame,
}

/// Configuration for one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Deck seed. `None` draws a fresh seed from entropy for every game.
    pub seed: Option<u64>,

    /// Rule applied to a wrong "no set" declaration.
    pub contradiction_policy: ContradictionPolicy,
}

impl GameConfig {
    /// Create a config with default settings (random deck, lenient policy).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed deck seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the policy for wrong "no set" declarations.
    #[must_use]
    pub fn with_contradiction_policy(mut self, policy: ContradictionPolicy) -> Self {
        self.contradiction_policy = policy;
        self
    }
}
