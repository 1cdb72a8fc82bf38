use std::collections::HashSet;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of logical buttons, used for both held and just-pressed state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Buttons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const JUMP = 1 << 2;
        const RESTART = 1 << 3;
        const DEBUG = 1 << 4;
    }
}

/// Logical buttons a level reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Left,
    Right,
    Jump,
    Restart,
    Debug,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Left,
        Button::Right,
        Button::Jump,
        Button::Restart,
        Button::Debug,
    ];

    /// Map a DOM-style key code to a button: arrow keys move and jump,
    /// R restarts, D toggles the physics debug overlay.
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Button::Left),
            "ArrowRight" => Some(Button::Right),
            "ArrowUp" => Some(Button::Jump),
            "KeyR" => Some(Button::Restart),
            "KeyD" => Some(Button::Debug),
            _ => None,
        }
    }

    pub fn flag(self) -> Buttons {
        match self {
            Button::Left => Buttons::LEFT,
            Button::Right => Buttons::RIGHT,
            Button::Jump => Buttons::JUMP,
            Button::Restart => Buttons::RESTART,
            Button::Debug => Buttons::DEBUG,
        }
    }
}

/// Input for a single tick. A button absent from both sets is not pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub held: Buttons,
    pub just_pressed: Buttons,
}

impl InputSnapshot {
    /// Snapshot with `buttons` held and nothing newly pressed.
    pub fn holding(buttons: Buttons) -> Self {
        Self {
            held: buttons,
            just_pressed: Buttons::empty(),
        }
    }

    /// Snapshot where `buttons` went down this tick and are still held.
    pub fn pressing(buttons: Buttons) -> Self {
        Self {
            held: buttons,
            just_pressed: buttons,
        }
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held.contains(button.flag())
    }

    pub fn is_just_pressed(&self, button: Button) -> bool {
        self.just_pressed.contains(button.flag())
    }
}

/// Button state accumulated from host key events between ticks.
pub struct InputState {
    /// Buttons currently held.
    pub buttons_down: HashSet<Button>,
    /// Buttons pressed this frame (cleared each frame).
    pub buttons_just_pressed: HashSet<Button>,
    /// Buttons released this frame (cleared each frame).
    pub buttons_just_released: HashSet<Button>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            buttons_down: HashSet::new(),
            buttons_just_pressed: HashSet::new(),
            buttons_just_released: HashSet::new(),
        }
    }

    /// Register a button down event. Key repeat does not count as a new press.
    pub fn on_button_down(&mut self, button: Button) {
        if self.buttons_down.insert(button) {
            self.buttons_just_pressed.insert(button);
        }
    }

    pub fn on_button_up(&mut self, button: Button) {
        self.buttons_down.remove(&button);
        self.buttons_just_released.insert(button);
    }

    /// Register a raw key code; unmapped keys are ignored.
    pub fn on_key_down(&mut self, code: &str) {
        if let Some(button) = Button::from_key_code(code) {
            self.on_button_down(button);
        }
    }

    pub fn on_key_up(&mut self, code: &str) {
        if let Some(button) = Button::from_key_code(code) {
            self.on_button_up(button);
        }
    }

    pub fn is_button_down(&self, button: Button) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_just_pressed(&self, button: Button) -> bool {
        self.buttons_just_pressed.contains(&button)
    }

    pub fn is_button_just_released(&self, button: Button) -> bool {
        self.buttons_just_released.contains(&button)
    }

    /// Freeze the current state into a per-tick snapshot.
    pub fn snapshot(&self) -> InputSnapshot {
        let collect = |set: &HashSet<Button>| {
            set.iter()
                .fold(Buttons::empty(), |acc, button| acc | button.flag())
        };
        InputSnapshot {
            held: collect(&self.buttons_down),
            just_pressed: collect(&self.buttons_just_pressed),
        }
    }

    /// Clear per-frame state. Call at the end of each frame.
    pub fn end_frame(&mut self) {
        self.buttons_just_pressed.clear();
        self.buttons_just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns snapshots into fresh presses: a button fires on every tick it is
/// reported just-pressed, and on the first tick it is seen held for hosts
/// that only report held state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressTracker {
    last_held: Buttons,
}

impl PressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buttons freshly pressed this tick. Call exactly once per tick.
    pub fn fresh(&mut self, snapshot: &InputSnapshot) -> Buttons {
        let fresh = snapshot.just_pressed | (snapshot.held - self.last_held);
        self.last_held = snapshot.held;
        fresh
    }
}
