use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Size of one map tile in pixels. All movement values scale from it.
pub const TILE_SIZE: f32 = 18.0;
/// Horizontal acceleration while a direction is held, in tiles/s^2.
pub const ACCELERATION_TILES: f32 = 20.0;
/// Horizontal drag once input is released, in tiles/s^2. Lower than the
/// acceleration so the player slides a little before stopping.
pub const DRAG_TILES: f32 = 15.0;
/// Speed above which held input stops accelerating, in tiles/s.
pub const MAX_SPEED_TILES: f32 = 6.0;
/// Jump launch speed, in tiles/s (applied upward).
pub const JUMP_VELOCITY_TILES: f32 = 18.0;
/// Horizontal speed of walking dust particles (px/s).
pub const PARTICLE_SPEED: f32 = 50.0;
/// World gravity the host should configure (px/s^2, downward).
pub const GRAVITY_Y: f32 = 600.0;
/// Ungrounded ticks required before a landing plays the land sound.
pub const LANDING_DEBOUNCE_TICKS: u8 = 2;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "TILEHOP_PLATFORMER_CONFIG";
/// Config file read when `CONFIG_ENV` is unset, relative to the working dir.
pub const DEFAULT_CONFIG_PATH: &str = "config/platformer.toml";

/// Movement parameters, in tile units where noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub tile_size: f32,
    pub acceleration_tiles: f32,
    pub drag_tiles: f32,
    pub max_speed_tiles: f32,
    pub jump_velocity_tiles: f32,
    pub particle_speed: f32,
    pub gravity_y: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            acceleration_tiles: ACCELERATION_TILES,
            drag_tiles: DRAG_TILES,
            max_speed_tiles: MAX_SPEED_TILES,
            jump_velocity_tiles: JUMP_VELOCITY_TILES,
            particle_speed: PARTICLE_SPEED,
            gravity_y: GRAVITY_Y,
        }
    }
}

/// Volumes passed along with sound intents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub jump_volume: f32,
    pub land_volume: f32,
    pub pickup_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            jump_volume: 0.5,
            land_volume: 1.0,
            pickup_volume: 1.0,
        }
    }
}

/// Player sprite display size, used to place the dust emitter at the feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DustConfig {
    pub sprite_width: f32,
    pub sprite_height: f32,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            sprite_width: 24.0,
            sprite_height: 24.0,
        }
    }
}

impl DustConfig {
    /// Emitter offset relative to the player origin.
    pub fn offset(&self) -> (f32, f32) {
        (self.sprite_width / 2.0 - 10.0, self.sprite_height / 2.0 - 5.0)
    }
}

/// Top-level platformer level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    pub physics: PhysicsConfig,
    pub audio: AudioConfig,
    pub dust: DustConfig,
    pub coin_reward: u32,
    pub landing_debounce_ticks: u8,
    pub tick_rate_hz: f32,
    /// Level layout file. The built-in layout is used when unset.
    pub level_path: Option<String>,
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            audio: AudioConfig::default(),
            dust: DustConfig::default(),
            coin_reward: crate::scoring::COIN_REWARD,
            landing_debounce_ticks: LANDING_DEBOUNCE_TICKS,
            tick_rate_hz: 60.0,
            level_path: None,
        }
    }
}

impl PlatformerConfig {
    /// Config from `$TILEHOP_PLATFORMER_CONFIG`, else `config/platformer.toml`.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(path)
    }

    /// A missing file yields the defaults. So does an unparseable one, with a
    /// warning.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No platformer config");
                return Self::default();
            },
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Unparseable platformer config, using defaults"
            );
            Self::default()
        })
    }
}
