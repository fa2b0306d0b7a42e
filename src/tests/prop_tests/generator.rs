use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::demo;
use crate::game::Game;

/// Built-in games at a random size.
pub fn arb_game() -> impl Strategy<Value = Game> {
    prop_oneof![
        (4u16..=7).prop_map(|n| demo::breakthrough(n).unwrap()),
        (6u16..=20).prop_map(|n| demo::dice_race(n).unwrap()),
    ]
}

prop_compose! {
    /// Seeds for the trial RNG and for the move choices, and how many moves to play.
    pub fn arb_playout()(trial_seed in any::<u64>(), choice_seed in any::<u64>(), moves in 0usize..60) -> (u64, u64, usize) {
        (trial_seed, choice_seed, moves)
    }
}

pub fn choice_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
