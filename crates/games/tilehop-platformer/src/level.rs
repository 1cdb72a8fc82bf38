use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tilehop_core::controller_trait::CoinId;

use crate::config::TILE_SIZE;

/// Built-in level width in tiles.
pub const LEVEL_WIDTH_TILES: u32 = 90;
/// Built-in level height in tiles, including the two rows of headroom
/// above the map.
pub const LEVEL_HEIGHT_TILES: u32 = 32;

#[derive(Debug)]
pub enum LevelError {
    Io(String),
    Parse(String),
    DuplicateCoin(CoinId),
    OutOfBounds { what: String, x: f32, y: f32 },
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read level: {e}"),
            Self::Parse(e) => write!(f, "failed to parse level: {e}"),
            Self::DuplicateCoin(id) => write!(f, "duplicate coin id: {id}"),
            Self::OutOfBounds { what, x, y } => {
                write!(f, "{what} at ({x}, {y}) lies outside the level")
            },
        }
    }
}

impl std::error::Error for LevelError {}

/// A point in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn at_tile(tx: u32, ty: u32, tile_size: f32) -> Self {
        Self {
            x: tx as f32 * tile_size + tile_size / 2.0,
            y: ty as f32 * tile_size + tile_size / 2.0,
        }
    }
}

/// A coin placed in the level's object layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSpawn {
    pub id: CoinId,
    pub x: f32,
    pub y: f32,
}

/// Object layer of a level: where the player starts, the coins, the goal flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    pub width_tiles: u32,
    pub height_tiles: u32,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    pub spawn: Point,
    pub goal: Point,
    #[serde(default)]
    pub coins: Vec<CoinSpawn>,
}

fn default_tile_size() -> f32 {
    TILE_SIZE
}

impl LevelLayout {
    /// Parse and validate a layout from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, LevelError> {
        let layout: LevelLayout =
            toml::from_str(content).map_err(|e| LevelError::Parse(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Read, parse and validate a layout file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| LevelError::Io(format!("{}: {e}", path.display())))?;
        let layout = Self::from_toml_str(&content)?;
        tracing::debug!(
            level = %layout.name,
            coins = layout.coins.len(),
            "Loaded level layout"
        );
        Ok(layout)
    }

    /// Coin ids must be unique and every object must lie inside the level.
    pub fn validate(&self) -> Result<(), LevelError> {
        let mut seen = HashSet::new();
        for coin in &self.coins {
            if !seen.insert(&coin.id) {
                return Err(LevelError::DuplicateCoin(coin.id.clone()));
            }
            self.check_bounds(&format!("coin {}", coin.id), coin.x, coin.y)?;
        }
        self.check_bounds("spawn", self.spawn.x, self.spawn.y)?;
        self.check_bounds("goal", self.goal.x, self.goal.y)?;
        Ok(())
    }

    fn check_bounds(&self, what: &str, x: f32, y: f32) -> Result<(), LevelError> {
        let inside = x.is_finite()
            && y.is_finite()
            && (0.0..=self.world_width()).contains(&x)
            && (0.0..=self.world_height()).contains(&y);
        if inside {
            Ok(())
        } else {
            Err(LevelError::OutOfBounds {
                what: what.to_string(),
                x,
                y,
            })
        }
    }

    pub fn world_width(&self) -> f32 {
        self.width_tiles as f32 * self.tile_size
    }

    pub fn world_height(&self) -> f32 {
        self.height_tiles as f32 * self.tile_size
    }

    pub fn has_coin(&self, id: &CoinId) -> bool {
        self.coins.iter().any(|c| &c.id == id)
    }
}

impl LevelLayout {
    /// The built-in level on a grid of `tile_size` pixels.
    pub fn builtin(tile_size: f32) -> Self {
        let coin = |id: &str, tx: u32, ty: u32| {
            let p = Point::at_tile(tx, ty, tile_size);
            CoinSpawn {
                id: CoinId::from(id),
                x: p.x,
                y: p.y,
            }
        };
        Self {
            name: "level-1".to_string(),
            width_tiles: LEVEL_WIDTH_TILES,
            height_tiles: LEVEL_HEIGHT_TILES,
            tile_size,
            spawn: Point::at_tile(2, 24, tile_size),
            goal: Point::at_tile(87, 22, tile_size),
            coins: vec![
                coin("coin-1", 9, 23),
                coin("coin-2", 16, 19),
                coin("coin-3", 27, 16),
                coin("coin-4", 41, 20),
                coin("coin-5", 55, 14),
                coin("coin-6", 68, 18),
                coin("coin-7", 79, 21),
            ],
        }
    }
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self::builtin(TILE_SIZE)
    }
}
