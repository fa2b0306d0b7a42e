use super::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 300,
        ..ProptestConfig::default()
    })]

    #[test]
    fn apply_then_undo_restores_state_and_trial(game in arb_game(), (trial_seed, choice_seed, n) in arb_playout()) {
        let mut ctx = started(&game, trial_seed);
        let mut rng = choice_rng(choice_seed);
        let mut undo_stack = vec![];
        for _ in 0..n {
            let moves = game.moves(&mut ctx);
            let Some(m) = moves.choose(&mut rng) else {
                break;
            };
            let before = (ctx.state.clone(), ctx.trial.clone());
            let applied = game.apply(&mut ctx, m);
            undo_stack.push((before, applied));
        }
        for ((state, trial), applied) in undo_stack.into_iter().rev() {
            applied.undo(&mut ctx, true);
            prop_assert_eq!(&state, &ctx.state);
            prop_assert_eq!(&trial, &ctx.trial);
        }
    }

    #[test]
    fn every_legal_move_is_reversible(game in arb_game(), (trial_seed, choice_seed, n) in arb_playout()) {
        let mut ctx = started(&game, trial_seed);
        let mut rng = choice_rng(choice_seed);
        for _ in 0..n {
            let moves = game.moves(&mut ctx);
            for m in &moves {
                let state = ctx.state.clone();
                let applied = m.apply(&mut ctx, false);
                applied.undo(&mut ctx, false);
                prop_assert_eq!(&state, &ctx.state);
            }
            let Some(m) = moves.choose(&mut rng) else {
                break;
            };
            let _ = game.apply(&mut ctx, m);
        }
    }
}
