use serde::{Deserialize, Serialize};

use tilehop_core::input::{Button, Buttons, InputSnapshot};
use tilehop_core::intent::{Animation, DustCommand, Facing, Intent, SoundCue};
use tilehop_core::physics::PhysicsReading;

use crate::config::{LANDING_DEBOUNCE_TICKS, PlatformerConfig};

/// Movement feel, fixed for the lifetime of a controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementTuning {
    pub acceleration: f32,
    pub drag: f32,
    pub max_speed: f32,
    /// Negative: the host's y axis points down.
    pub jump_velocity: f32,
    pub particle_speed: f32,
    pub gravity_y: f32,
    pub dust_offset_x: f32,
    pub dust_offset_y: f32,
    pub jump_volume: f32,
    pub land_volume: f32,
    pub landing_debounce_ticks: u8,
}

impl MovementTuning {
    pub fn from_config(config: &PlatformerConfig) -> Self {
        let tile = config.physics.tile_size;
        let (dust_offset_x, dust_offset_y) = config.dust.offset();
        Self {
            acceleration: config.physics.acceleration_tiles * tile,
            drag: config.physics.drag_tiles * tile,
            max_speed: config.physics.max_speed_tiles * tile,
            jump_velocity: -config.physics.jump_velocity_tiles.abs() * tile,
            particle_speed: config.physics.particle_speed,
            gravity_y: config.physics.gravity_y,
            dust_offset_x,
            dust_offset_y,
            jump_volume: config.audio.jump_volume,
            land_volume: config.audio.land_volume,
            landing_debounce_ticks: config.landing_debounce_ticks,
        }
    }
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self::from_config(&PlatformerConfig::default())
    }
}

/// Per-session player state, refreshed from physics every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub grounded: bool,
    /// Mid-jump. Stays set after touching down until the landing debounce
    /// has run out.
    pub airborne: bool,
    /// Counts down while ungrounded; the land sound waits for it to reach 0.
    pub airborne_timer: u8,
    pub facing: Facing,
}

impl PlayerState {
    pub fn new(landing_debounce_ticks: u8) -> Self {
        Self {
            velocity_x: 0.0,
            velocity_y: 0.0,
            grounded: false,
            airborne: false,
            airborne_timer: landing_debounce_ticks,
            facing: Facing::Right,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(LANDING_DEBOUNCE_TICKS)
    }
}

/// Everything the movement step reads for one tick.
pub struct TickInput<'a> {
    pub input: &'a InputSnapshot,
    /// Buttons freshly pressed this tick.
    pub fresh: Buttons,
    pub physics: &'a PhysicsReading,
    /// Directional input and jumping are ignored once the level is won.
    pub game_over: bool,
}

/// Advance the player's movement state by one tick, appending the
/// resulting intents to `out`.
pub fn tick_player(
    player: &mut PlayerState,
    tick: &TickInput<'_>,
    tuning: &MovementTuning,
    out: &mut Vec<Intent>,
) {
    player.velocity_x = tick.physics.velocity_x();
    player.velocity_y = tick.physics.velocity_y();
    player.grounded = tick.physics.grounded;

    // Horizontal movement
    let steering = !tick.game_over;
    if steering && tick.input.is_held(Button::Left) {
        walk(player, Facing::Left, tuning, out);
    } else if steering && tick.input.is_held(Button::Right) {
        walk(player, Facing::Right, tuning, out);
    } else {
        // Drag only takes over once nothing is held.
        out.push(Intent::SetAccelerationX(0.0));
        out.push(Intent::SetDragX(tuning.drag));
        out.push(Intent::PlayAnimation {
            animation: Animation::Idle,
            ignore_if_playing: false,
        });
        out.push(Intent::Dust(DustCommand::Stop));
    }

    // Jump
    if !tick.game_over && player.grounded && tick.fresh.contains(Buttons::JUMP) {
        out.push(Intent::SetVelocityY(tuning.jump_velocity));
        out.push(Intent::PlaySound {
            cue: SoundCue::Jump,
            volume: tuning.jump_volume,
        });
        player.airborne = true;
    }

    // Airborne and landing
    if !player.grounded {
        out.push(Intent::PlayAnimation {
            animation: Animation::Jump,
            ignore_if_playing: false,
        });
        player.airborne = true;
        player.airborne_timer = player.airborne_timer.saturating_sub(1);
    } else if player.airborne && player.airborne_timer == 0 {
        out.push(Intent::PlaySound {
            cue: SoundCue::Land,
            volume: tuning.land_volume,
        });
        player.airborne = false;
        player.airborne_timer = tuning.landing_debounce_ticks;
        tracing::debug!(velocity_x = player.velocity_x, "Player landed");
    }
}

fn walk(
    player: &mut PlayerState,
    facing: Facing,
    tuning: &MovementTuning,
    out: &mut Vec<Intent>,
) {
    // Stop accelerating at max speed instead of clamping velocity, so the
    // host's physics stays in charge of the actual speed.
    let (acceleration, below_max, particle_dir) = match facing {
        Facing::Left => (
            -tuning.acceleration,
            player.velocity_x > -tuning.max_speed,
            1.0,
        ),
        Facing::Right => (
            tuning.acceleration,
            player.velocity_x < tuning.max_speed,
            -1.0,
        ),
    };
    out.push(Intent::SetAccelerationX(if below_max {
        acceleration
    } else {
        0.0
    }));
    player.facing = facing;
    out.push(Intent::SetFacing(facing));
    out.push(Intent::PlayAnimation {
        animation: Animation::Walk,
        ignore_if_playing: true,
    });
    out.push(Intent::Dust(DustCommand::Follow {
        offset_x: tuning.dust_offset_x,
        offset_y: tuning.dust_offset_y,
        speed_x: tuning.particle_speed,
        speed_y: particle_dir,
    }));
    // Dust only while touching the ground.
    out.push(Intent::Dust(if player.grounded {
        DustCommand::Start
    } else {
        DustCommand::Stop
    }));
}
