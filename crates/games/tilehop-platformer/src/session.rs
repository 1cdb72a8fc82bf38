use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use tilehop_core::controller_trait::CoinId;

use crate::scoring;

/// Scoring and win state for one play-through of the level. Rebuilt
/// wholesale on restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    /// Set once the goal is touched; only a restart clears it.
    pub game_over: bool,
    /// Set once the win text has been requested; only a restart clears it.
    pub win_message_shown: bool,
    /// Coins already collected this session.
    pub consumed_coins: BTreeSet<CoinId>,
    pub elapsed_secs: f32,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a coin. Returns false, changing nothing, if it was already taken.
    pub fn collect_coin(&mut self, coin: &CoinId, reward: u32) -> bool {
        if self.consumed_coins.contains(coin) {
            return false;
        }
        self.consumed_coins.insert(coin.clone());
        self.score = self.score.saturating_add(reward);
        true
    }

    /// Mark the goal as reached. Returns true only on the first call.
    pub fn reach_goal(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        true
    }

    /// The win text, the first time it is asked for after the goal is reached.
    pub fn take_win_message(&mut self) -> Option<String> {
        if !self.game_over || self.win_message_shown {
            return None;
        }
        self.win_message_shown = true;
        Some(scoring::win_message(self.score))
    }

    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed_secs += dt;
        }
    }
}
