/// Points awarded for each coin collected.
pub const COIN_REWARD: u32 = 100;

/// Text shown when the player reaches the goal.
pub fn win_message(score: u32) -> String {
    format!("You win!\nScore: {score}")
}

/// Score after collecting `coins` coins at `reward` each. Saturates rather
/// than wrapping on absurd coin counts.
pub fn coin_total(coins: usize, reward: u32) -> u32 {
    u32::try_from(coins)
        .unwrap_or(u32::MAX)
        .saturating_mul(reward)
}
