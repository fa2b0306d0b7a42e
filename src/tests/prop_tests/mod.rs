mod generator;
use generator::*;

use proptest::prelude::*;
use rand::seq::SliceRandom;

use super::started;
use crate::state::State;

pub mod reversibility;

pub mod zobrist_hash;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn moves_are_generated_for_the_mover_only(game in arb_game(), (trial_seed, choice_seed, n) in arb_playout()) {
        let mut ctx = started(&game, trial_seed);
        let mut rng = choice_rng(choice_seed);
        for _ in 0..n {
            let moves = game.moves(&mut ctx);
            prop_assert!(moves.iter().all(|m| m.mover == ctx.state.mover()));
            let Some(m) = moves.choose(&mut rng) else {
                break;
            };
            let _ = game.apply(&mut ctx, m);
            let state: &State = &ctx.state;
            prop_assert!(state.is_player(state.mover() as i32));
        }
    }
}
