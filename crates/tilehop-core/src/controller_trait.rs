use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::InputSnapshot;
use crate::intent::Intent;
use crate::physics::PhysicsReading;

/// Identifier of a collectible coin, as named in the level layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoinId(pub String);

impl From<&str> for CoinId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Core trait a level implements so a host engine can drive it.
///
/// The host owns rendering, audio, tile collision and overlap detection;
/// the controller only turns per-tick snapshots and contact callbacks into
/// intents.
pub trait LevelController: Send + Sync {
    /// Level metadata for the host's level picker.
    fn metadata(&self) -> LevelMetadata;

    /// Called once when the level starts. Returns world setup intents.
    fn init(&mut self) -> Vec<Intent>;

    /// Called once per simulation tick.
    fn update(&mut self, dt: f32, input: &InputSnapshot, physics: &PhysicsReading)
    -> Vec<Intent>;

    /// The host detected player overlap with a coin. Idempotent per id.
    fn on_coin_contact(&mut self, coin: &CoinId) -> Vec<Intent>;

    /// The host detected player overlap with the goal. Idempotent.
    fn on_goal_contact(&mut self);

    /// Serialize the session snapshot (player and scoring state).
    fn serialize_state(&self) -> Vec<u8>;

    /// Restore a snapshot produced by `serialize_state`. Malformed data is ignored.
    fn apply_state(&mut self, state: &[u8]);

    /// Simulation tick rate in Hz the controller's debounce counts are tuned for.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Freeze the controller: `update` becomes a no-op until `resume`.
    fn pause(&mut self);

    fn resume(&mut self);

    fn is_game_over(&self) -> bool;

    fn score(&self) -> u32;
}

/// Level metadata for the host's level picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelMetadata {
    pub name: String,
    pub description: String,
    pub coin_count: usize,
}

/// Generates the `LevelController` methods that are identical across levels:
/// `serialize_state`, `apply_state`, `pause`, `resume`, `is_game_over`, `score`.
///
/// Requires the implementing struct to have `state: $StateType` and `paused: bool`
/// fields, and `$StateType` to have a `session` with `game_over: bool` and
/// `score: u32`.
#[macro_export]
macro_rules! level_controller_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("level state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            match rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) => self.state = s,
                Err(e) => tracing::warn!(error = %e, "Ignoring malformed level snapshot"),
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_game_over(&self) -> bool {
            self.state.session.game_over
        }

        fn score(&self) -> u32 {
            self.state.session.score
        }
    };
}
