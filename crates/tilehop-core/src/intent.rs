use serde::{Deserialize, Serialize};

use crate::controller_trait::CoinId;

/// Direction the player sprite faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Sprite animations the host is asked to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    Walk,
    Idle,
    Jump,
}

impl Animation {
    /// Animation key as registered with the host's sprite system.
    pub fn key(self) -> &'static str {
        match self {
            Animation::Walk => "walk",
            Animation::Idle => "idle",
            Animation::Jump => "jump",
        }
    }
}

/// One-shot sounds the host is asked to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Jump,
    Land,
    Pickup,
}

impl SoundCue {
    pub fn key(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Land => "land",
            SoundCue::Pickup => "pickup",
        }
    }
}

/// Commands for the walking dust emitter attached to the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DustCommand {
    /// Attach the emitter to the player at the given offset and set the
    /// particle speed.
    Follow {
        offset_x: f32,
        offset_y: f32,
        speed_x: f32,
        speed_y: f32,
    },
    Start,
    Stop,
}

/// A side effect requested by a level controller. The host executes
/// intents in the order they are returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    SetAccelerationX(f32),
    SetDragX(f32),
    SetVelocityY(f32),
    SetFacing(Facing),
    PlayAnimation {
        animation: Animation,
        /// Keep the current cycle running if this animation is already playing.
        ignore_if_playing: bool,
    },
    PlaySound {
        cue: SoundCue,
        volume: f32,
    },
    Dust(DustCommand),
    RemoveCoin(CoinId),
    ShowText {
        text: String,
        score: u32,
    },
    ToggleDebugDraw,
    ConfigureWorld {
        gravity_y: f32,
        width: f32,
        height: f32,
    },
    SpawnPlayer {
        x: f32,
        y: f32,
    },
    ResetSession,
}

impl Intent {
    pub fn is_sound(&self, cue: SoundCue) -> bool {
        matches!(self, Intent::PlaySound { cue: c, .. } if *c == cue)
    }

    pub fn is_animation(&self, animation: Animation) -> bool {
        matches!(self, Intent::PlayAnimation { animation: a, .. } if *a == animation)
    }
}
