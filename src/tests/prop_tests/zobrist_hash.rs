use super::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 300,
        ..ProptestConfig::default()
    })]

    #[test]
    fn moves_should_preserve_incremental_hash(game in arb_game(), (trial_seed, choice_seed, n) in arb_playout()) {
        let mut ctx = started(&game, trial_seed);
        let mut rng = choice_rng(choice_seed);
        for _ in 0..n {
            let moves = game.moves(&mut ctx);
            let Some(m) = moves.choose(&mut rng) else {
                break;
            };
            let h0 = ctx.state.situational_hash();
            let _ = game.apply(&mut ctx, m);
            let h_incremental = (ctx.state.positional_hash(), ctx.state.situational_hash());
            let h_rehash = {
                let mut state = ctx.state.clone();
                state.rehash();
                (state.positional_hash(), state.situational_hash())
            };
            prop_assert_eq!(h_rehash, h_incremental, "Init = {:?}, move = {:?}", h0, m);
        }
    }
}
