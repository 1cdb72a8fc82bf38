//! Host-loop smoke tests: key events -> InputState -> controller -> intent
//! queue -> shell, with a crude rigid body standing in for the engine.

use tilehop_core::controller_trait::{CoinId, LevelController};
use tilehop_core::input::InputState;
use tilehop_core::intent::{DustCommand, Facing, Intent, SoundCue};
use tilehop_core::physics::PhysicsReading;
use tilehop_core::shell::{HostShell, IntentQueue};
use tilehop_core::test_helpers::{RecordingShell, TEST_DT, count_sounds, count_win_texts};

use tilehop_platformer::PlayerController;
use tilehop_platformer::config::{CONFIG_ENV, PlatformerConfig};
use tilehop_platformer::level::LevelLayout;

/// Arcade-style body on a flat floor.
#[derive(Debug, Default)]
struct Body {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    ax: f32,
    drag: f32,
    gravity: f32,
    floor_y: f32,
    grounded: bool,
}

impl Body {
    fn step(&mut self, dt: f32) {
        if self.ax != 0.0 {
            self.vx += self.ax * dt;
        } else {
            let slow = self.drag * dt;
            self.vx = if self.vx.abs() <= slow {
                0.0
            } else {
                self.vx - slow * self.vx.signum()
            };
        }
        self.x += self.vx * dt;

        self.vy += self.gravity * dt;
        self.y += self.vy * dt;
        if self.y >= self.floor_y {
            self.y = self.floor_y;
            self.vy = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    fn reading(&self) -> PhysicsReading {
        PhysicsReading {
            velocity_x: self.vx,
            velocity_y: self.vy,
            grounded: self.grounded,
        }
    }
}

/// Shell that drives the body and keeps a log of everything it executed.
#[derive(Default)]
struct SimHost {
    body: Body,
    log: RecordingShell,
    facing: Option<Facing>,
    dust_on: bool,
    debug_draw: bool,
}

impl HostShell for SimHost {
    fn execute(&mut self, intent: &Intent) {
        match intent {
            Intent::ConfigureWorld { gravity_y, .. } => self.body.gravity = *gravity_y,
            Intent::SpawnPlayer { x, y } => {
                self.body.x = *x;
                self.body.y = *y;
                self.body.floor_y = *y;
                self.body.vx = 0.0;
                self.body.vy = 0.0;
                self.body.grounded = true;
            },
            Intent::SetAccelerationX(a) => self.body.ax = *a,
            Intent::SetDragX(d) => self.body.drag = *d,
            Intent::SetVelocityY(v) => self.body.vy = *v,
            Intent::SetFacing(f) => self.facing = Some(*f),
            Intent::Dust(DustCommand::Start) => self.dust_on = true,
            Intent::Dust(DustCommand::Stop) => self.dust_on = false,
            Intent::ToggleDebugDraw => self.debug_draw = !self.debug_draw,
            _ => {},
        }
        self.log.execute(intent);
    }
}

struct Harness {
    controller: PlayerController,
    input: InputState,
    queue: IntentQueue,
    host: SimHost,
}

impl Harness {
    fn new() -> Self {
        let mut harness = Self {
            controller: PlayerController::new(),
            input: InputState::new(),
            queue: IntentQueue::default(),
            host: SimHost::default(),
        };
        harness.queue.extend(harness.controller.init());
        harness.queue.flush(&mut harness.host);
        harness
    }

    /// One host frame: controller update, intents applied, physics stepped.
    fn frame(&mut self) {
        let snapshot = self.input.snapshot();
        let reading = self.host.body.reading();
        self.queue
            .extend(self.controller.update(TEST_DT, &snapshot, &reading));
        self.queue.flush(&mut self.host);
        self.host.body.step(TEST_DT);
        self.input.end_frame();
    }

    fn frames(&mut self, n: usize) {
        for _ in 0..n {
            self.frame();
        }
    }

    fn touch_coin(&mut self, id: &str) {
        self.queue
            .extend(self.controller.on_coin_contact(&CoinId::from(id)));
    }

    fn log(&self) -> &[Intent] {
        &self.host.log.executed
    }
}

#[test]
fn init_places_player_at_spawn() {
    let h = Harness::new();
    assert_eq!(h.host.body.gravity, 600.0);
    assert_eq!((h.host.body.x, h.host.body.y), (45.0, 441.0));
    assert!(h.host.body.grounded);
}

#[test]
fn walking_right_levels_off_near_max_speed() {
    let mut h = Harness::new();
    h.input.on_key_down("ArrowRight");
    h.frames(120);

    let max = h.controller.tuning().max_speed;
    let step = h.controller.tuning().acceleration * TEST_DT;
    assert!(h.host.body.vx > max - step, "vx {} should reach max", h.host.body.vx);
    assert!(h.host.body.vx < max + step, "vx {} overshot", h.host.body.vx);
    assert!(h.host.body.x > 45.0);
    assert_eq!(h.host.facing, Some(Facing::Right));
    assert!(h.host.dust_on);
}

#[test]
fn releasing_direction_lets_drag_stop_the_player() {
    let mut h = Harness::new();
    h.input.on_key_down("ArrowLeft");
    h.frames(30);
    assert!(h.host.body.vx < 0.0);
    assert_eq!(h.host.facing, Some(Facing::Left));

    h.input.on_key_up("ArrowLeft");
    h.frames(60);
    assert_eq!(h.host.body.vx, 0.0);
    assert!(!h.host.dust_on);
}

#[test]
fn held_jump_key_gives_one_jump_and_one_landing() {
    let mut h = Harness::new();
    h.input.on_key_down("ArrowUp");
    h.frames(150);

    assert_eq!(count_sounds(h.log(), SoundCue::Jump), 1);
    assert_eq!(count_sounds(h.log(), SoundCue::Land), 1);
    assert!(h.host.body.grounded);
    assert!(!h.controller.player().airborne);
}

#[test]
fn two_separate_presses_jump_twice() {
    let mut h = Harness::new();
    for _ in 0..2 {
        h.input.on_key_down("ArrowUp");
        h.frame();
        h.input.on_key_up("ArrowUp");
        h.frames(150);
    }
    assert_eq!(count_sounds(h.log(), SoundCue::Jump), 2);
    assert_eq!(count_sounds(h.log(), SoundCue::Land), 2);
}

#[test]
fn full_run_collects_coins_wins_and_restarts() {
    let mut h = Harness::new();
    let coins: Vec<String> = h
        .controller
        .level()
        .coins
        .iter()
        .map(|c| c.id.0.clone())
        .collect();

    h.input.on_key_down("ArrowRight");
    for id in &coins {
        h.frames(10);
        h.touch_coin(id);
        h.touch_coin(id);
    }
    h.frames(10);
    h.controller.on_goal_contact();
    h.frames(30);

    assert_eq!(count_sounds(h.log(), SoundCue::Pickup), coins.len());
    let removed = h
        .log()
        .iter()
        .filter(|i| matches!(i, Intent::RemoveCoin(_)))
        .count();
    assert_eq!(removed, coins.len());
    assert_eq!(count_win_texts(h.log()), 1);
    assert!(h.log().contains(&Intent::ShowText {
        text: "You win!\nScore: 700".to_string(),
        score: 700,
    }));
    // Still holding Right, but the body coasts to a stop.
    assert_eq!(h.host.body.vx, 0.0);

    h.input.on_key_up("ArrowRight");
    h.input.on_key_down("KeyR");
    h.frame();
    assert!(h.log().contains(&Intent::ResetSession));
    assert_eq!(h.controller.score(), 0);
    assert!(!h.controller.is_game_over());
    assert_eq!((h.host.body.x, h.host.body.y), (45.0, 441.0));

    // Holding R does not keep restarting.
    h.touch_coin("coin-1");
    h.frames(20);
    assert_eq!(h.controller.score(), 100);
}

#[test]
fn debug_key_toggles_overlay() {
    let mut h = Harness::new();
    h.input.on_key_down("KeyD");
    h.frames(5);
    assert!(h.host.debug_draw);
    h.input.on_key_up("KeyD");
    h.frame();
    h.input.on_key_down("KeyD");
    h.frame();
    assert!(!h.host.debug_draw);
}

#[test]
fn unmapped_keys_do_nothing() {
    let mut h = Harness::new();
    let before = h.log().len();
    h.input.on_key_down("KeyQ");
    h.frame();
    let new = &h.log()[before..];
    assert_eq!(count_sounds(new, SoundCue::Jump), 0);
    assert!(new.contains(&Intent::SetAccelerationX(0.0)));
}

#[test]
fn shipped_config_and_level_load() {
    let root = concat!(env!("CARGO_MANIFEST_DIR"), "/../../..");
    let config_text =
        std::fs::read_to_string(format!("{root}/config/platformer.toml")).unwrap();
    let mut config: PlatformerConfig = toml::from_str(&config_text).unwrap();
    config.level_path = Some(format!("{root}/config/levels/level-1.toml"));

    let controller = PlayerController::from_config(config).unwrap();
    assert_eq!(controller.level(), &LevelLayout::default());
    assert_eq!(controller.metadata().coin_count, 7);
}

#[test]
fn intent_log_is_json_encodable() {
    let mut h = Harness::new();
    h.input.on_key_down("ArrowUp");
    h.frames(3);
    let json = serde_json::to_string(h.log()).unwrap();
    let back: Vec<Intent> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, h.log());
}

#[test]
fn controller_load_follows_env_config() {
    let root = concat!(env!("CARGO_MANIFEST_DIR"), "/../../..");
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(
        file.path(),
        format!("coin_reward = 50\nlevel_path = \"{root}/config/levels/level-1.toml\"\n"),
    )
    .unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, file.path());
    }
    let controller = PlayerController::load();
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    let controller = controller.unwrap();
    assert_eq!(controller.config().coin_reward, 50);
    assert_eq!(controller.level(), &LevelLayout::default());
    assert!(controller.metadata().description.contains("350"));
}

#[test]
fn restart_pressed_twice_within_a_frame_restarts_twice() {
    let mut h = Harness::new();
    h.input.on_key_down("KeyR");
    h.frame();
    h.input.on_key_up("KeyR");
    h.input.on_key_down("KeyR");
    h.frame();
    let resets = h
        .log()
        .iter()
        .filter(|i| **i == Intent::ResetSession)
        .count();
    assert_eq!(resets, 2);
}
