pub mod config;
pub mod level;
pub mod movement;
pub mod scoring;
pub mod session;

use serde::{Deserialize, Serialize};

use tilehop_core::controller_trait::{CoinId, LevelController, LevelMetadata};
use tilehop_core::input::{Buttons, InputSnapshot, PressTracker};
use tilehop_core::intent::{Intent, SoundCue};
use tilehop_core::level_controller_boilerplate;
use tilehop_core::physics::PhysicsReading;

use config::PlatformerConfig;
use level::{LevelError, LevelLayout};
use movement::{MovementTuning, PlayerState, TickInput, tick_player};
use session::SessionState;

/// Serializable session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    pub player: PlayerState,
    pub session: SessionState,
}

impl ControllerState {
    fn fresh(tuning: &MovementTuning) -> Self {
        Self {
            player: PlayerState::new(tuning.landing_debounce_ticks),
            session: SessionState::new(),
        }
    }
}

/// Drives the player through one level: movement, jumping, landing,
/// coins, the goal and restarts.
pub struct PlayerController {
    config: PlatformerConfig,
    tuning: MovementTuning,
    level: LevelLayout,
    state: ControllerState,
    /// Survives restarts so a held Restart key does not fire again.
    presses: PressTracker,
    paused: bool,
}

impl PlayerController {
    /// Controller for the built-in level with default tuning.
    pub fn new() -> Self {
        Self::with_level(PlatformerConfig::default(), LevelLayout::default())
    }

    pub fn with_level(config: PlatformerConfig, level: LevelLayout) -> Self {
        let tuning = MovementTuning::from_config(&config);
        Self {
            state: ControllerState::fresh(&tuning),
            config,
            tuning,
            level,
            presses: PressTracker::new(),
            paused: false,
        }
    }

    /// Controller for the layout named in `config.level_path`, or the
    /// built-in layout at the configured tile size when none is set.
    pub fn from_config(config: PlatformerConfig) -> Result<Self, LevelError> {
        let level = match &config.level_path {
            Some(path) => LevelLayout::load(path)?,
            None => LevelLayout::builtin(config.physics.tile_size),
        };
        if level.tile_size != config.physics.tile_size {
            tracing::warn!(
                level = %level.name,
                level_tile_size = level.tile_size,
                config_tile_size = config.physics.tile_size,
                "Level and movement tuning use different tile sizes"
            );
        }
        Ok(Self::with_level(config, level))
    }

    /// Controller built from `PlatformerConfig::load()`.
    pub fn load() -> Result<Self, LevelError> {
        Self::from_config(PlatformerConfig::load())
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn player(&self) -> &PlayerState {
        &self.state.player
    }

    pub fn session(&self) -> &SessionState {
        &self.state.session
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn level(&self) -> &LevelLayout {
        &self.level
    }

    pub fn config(&self) -> &PlatformerConfig {
        &self.config
    }

    fn spawn_intent(&self) -> Intent {
        Intent::SpawnPlayer {
            x: self.level.spawn.x,
            y: self.level.spawn.y,
        }
    }

    /// Throw away the session and start over from the spawn point.
    fn restart(&mut self) -> Vec<Intent> {
        tracing::info!(
            level = %self.level.name,
            score = self.state.session.score,
            game_over = self.state.session.game_over,
            "Restarting level"
        );
        self.state = ControllerState::fresh(&self.tuning);
        vec![Intent::ResetSession, self.spawn_intent()]
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelController for PlayerController {
    fn metadata(&self) -> LevelMetadata {
        let coins = self.level.coins.len();
        LevelMetadata {
            name: self.level.name.clone(),
            description: format!(
                "Collect up to {} points in coins and reach the flag",
                scoring::coin_total(coins, self.config.coin_reward)
            ),
            coin_count: coins,
        }
    }

    fn tick_rate(&self) -> f32 {
        self.config.tick_rate_hz
    }

    fn init(&mut self) -> Vec<Intent> {
        self.state = ControllerState::fresh(&self.tuning);
        self.paused = false;
        vec![
            Intent::ConfigureWorld {
                gravity_y: self.tuning.gravity_y,
                width: self.level.world_width(),
                height: self.level.world_height(),
            },
            self.spawn_intent(),
        ]
    }

    fn update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        physics: &PhysicsReading,
    ) -> Vec<Intent> {
        if self.paused {
            return Vec::new();
        }

        let fresh = self.presses.fresh(input);
        self.state.session.advance(dt);
        let mut intents = Vec::new();

        let tick = TickInput {
            input,
            fresh,
            physics,
            game_over: self.state.session.game_over,
        };
        tick_player(&mut self.state.player, &tick, &self.tuning, &mut intents);

        if let Some(text) = self.state.session.take_win_message() {
            let score = self.state.session.score;
            tracing::info!(
                score,
                elapsed_secs = self.state.session.elapsed_secs,
                "Showing win message"
            );
            intents.push(Intent::ShowText { text, score });
        }

        if fresh.contains(Buttons::RESTART) {
            intents.extend(self.restart());
        }

        if fresh.contains(Buttons::DEBUG) {
            intents.push(Intent::ToggleDebugDraw);
        }

        intents
    }

    fn on_coin_contact(&mut self, coin: &CoinId) -> Vec<Intent> {
        if !self.level.has_coin(coin) {
            tracing::warn!(
                coin = %coin,
                level = %self.level.name,
                "Contact with unknown coin"
            );
            return Vec::new();
        }
        if !self
            .state
            .session
            .collect_coin(coin, self.config.coin_reward)
        {
            return Vec::new();
        }
        tracing::debug!(coin = %coin, score = self.state.session.score, "Coin collected");
        vec![
            Intent::RemoveCoin(coin.clone()),
            Intent::PlaySound {
                cue: SoundCue::Pickup,
                volume: self.config.audio.pickup_volume,
            },
        ]
    }

    fn on_goal_contact(&mut self) {
        if self.state.session.reach_goal() {
            tracing::info!(
                level = %self.level.name,
                score = self.state.session.score,
                elapsed_secs = self.state.session.elapsed_secs,
                "Goal reached"
            );
        }
    }

    level_controller_boilerplate!(state_type: ControllerState);
}
