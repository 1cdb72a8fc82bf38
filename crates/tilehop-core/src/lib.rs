pub mod controller_trait;
pub mod input;
pub mod intent;
pub mod physics;
pub mod shell;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::controller_trait::{CoinId, LevelController};
    use crate::input::{Buttons, InputSnapshot};
    use crate::intent::{Intent, SoundCue};
    use crate::physics::PhysicsReading;
    use crate::shell::HostShell;

    /// Fixed timestep used by the contract tests.
    pub const TEST_DT: f32 = 1.0 / 60.0;

    /// Shell that records every intent it is asked to execute.
    #[derive(Debug, Default)]
    pub struct RecordingShell {
        pub executed: Vec<Intent>,
    }

    impl HostShell for RecordingShell {
        fn execute(&mut self, intent: &Intent) {
            self.executed.push(intent.clone());
        }
    }

    /// Run N ticks with the same input and physics, returning all intents.
    pub fn run_ticks(
        controller: &mut dyn LevelController,
        n: usize,
        input: &InputSnapshot,
        physics: &PhysicsReading,
    ) -> Vec<Intent> {
        let mut all = Vec::new();
        for _ in 0..n {
            all.extend(controller.update(TEST_DT, input, physics));
        }
        all
    }

    pub fn count_sounds(intents: &[Intent], cue: SoundCue) -> usize {
        intents.iter().filter(|i| i.is_sound(cue)).count()
    }

    pub fn count_win_texts(intents: &[Intent]) -> usize {
        intents
            .iter()
            .filter(|i| matches!(i, Intent::ShowText { .. }))
            .count()
    }

    pub fn count_jumps(intents: &[Intent]) -> usize {
        intents
            .iter()
            .filter(|i| matches!(i, Intent::SetVelocityY(_)))
            .count()
    }

    // ================================================================
    // Level Controller Contract Tests
    // ================================================================
    // Generic checks every LevelController implementation must pass. Level
    // crates call them from their own #[cfg(test)] modules with a freshly
    // constructed controller.

    /// init() must hand the host a world setup and a player spawn.
    pub fn contract_init_configures_world(controller: &mut dyn LevelController) {
        let intents = controller.init();
        assert!(
            intents
                .iter()
                .any(|i| matches!(i, Intent::ConfigureWorld { .. })),
            "init() must configure the host world"
        );
        assert!(
            intents
                .iter()
                .any(|i| matches!(i, Intent::SpawnPlayer { .. })),
            "init() must spawn the player"
        );
    }

    /// Holding Jump on the ground must jump exactly once.
    pub fn contract_held_jump_fires_once(controller: &mut dyn LevelController) {
        let ground = PhysicsReading::grounded(0.0);
        let mut intents =
            controller.update(TEST_DT, &InputSnapshot::pressing(Buttons::JUMP), &ground);
        intents.extend(run_ticks(
            controller,
            10,
            &InputSnapshot::holding(Buttons::JUMP),
            &ground,
        ));
        assert_eq!(count_jumps(&intents), 1, "Held jump must fire once");
    }

    /// Repeated coin contact must score once.
    pub fn contract_coin_contact_idempotent(
        controller: &mut dyn LevelController,
        coin: &CoinId,
        reward: u32,
    ) {
        let before = controller.score();
        let first = controller.on_coin_contact(coin);
        let second = controller.on_coin_contact(coin);
        assert_eq!(
            controller.score(),
            before + reward,
            "Coin must award its reward exactly once"
        );
        assert_eq!(count_sounds(&first, SoundCue::Pickup), 1);
        assert!(second.is_empty(), "Second contact must have no effect");
    }

    /// Any number of goal contacts must produce exactly one win text.
    pub fn contract_goal_shows_win_text_once(controller: &mut dyn LevelController) {
        let idle = InputSnapshot::default();
        let ground = PhysicsReading::grounded(0.0);
        let mut intents = Vec::new();
        for _ in 0..3 {
            controller.on_goal_contact();
            intents.extend(controller.update(TEST_DT, &idle, &ground));
        }
        assert!(controller.is_game_over());
        assert_eq!(count_win_texts(&intents), 1, "Win text must show once");
    }

    /// Restart must reset scoring and the game-over flag.
    pub fn contract_restart_resets_session(controller: &mut dyn LevelController) {
        let idle = InputSnapshot::default();
        let ground = PhysicsReading::grounded(0.0);
        controller.on_goal_contact();
        controller.update(TEST_DT, &idle, &ground);
        assert!(controller.is_game_over());

        let intents =
            controller.update(TEST_DT, &InputSnapshot::pressing(Buttons::RESTART), &ground);
        assert!(intents.contains(&Intent::ResetSession));
        assert!(!controller.is_game_over(), "Restart must clear game over");
        assert_eq!(controller.score(), 0, "Restart must clear the score");
    }

    /// serialize_state → apply_state must be stable.
    pub fn contract_state_roundtrip_preserves(controller: &mut dyn LevelController) {
        let state_a = controller.serialize_state();
        controller.apply_state(&state_a);
        let state_b = controller.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// pause() must freeze updates, resume() must unfreeze them.
    pub fn contract_pause_stops_updates(controller: &mut dyn LevelController) {
        let ground = PhysicsReading::grounded(0.0);
        controller.pause();
        let before = controller.serialize_state();
        let intents =
            controller.update(TEST_DT, &InputSnapshot::pressing(Buttons::JUMP), &ground);
        assert!(intents.is_empty(), "No intents while paused");
        assert_eq!(
            before,
            controller.serialize_state(),
            "State must not change while paused"
        );

        controller.resume();
        let intents = controller.update(TEST_DT, &InputSnapshot::default(), &ground);
        assert!(!intents.is_empty(), "Updates must resume after resume()");
    }
}
