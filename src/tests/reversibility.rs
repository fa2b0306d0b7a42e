use super::*;
use crate::demo;
use crate::moves::Action;
use crate::state::TrialStatus;

fn undo_all(ctx: &mut Context<'_>, history: Vec<(State, AppliedMove)>) {
    for (before, applied) in history.into_iter().rev() {
        applied.undo(ctx, true);
        assert_eq!(before, ctx.state);
    }
}

#[test]
fn test_breakthrough_playout_undoes_to_start() {
    let game = demo::breakthrough(5).unwrap();
    for seed in 0..8 {
        let mut ctx = started(&game, seed);
        let start = ctx.state.clone();
        let history = random_playout(&mut ctx, seed, 60);
        assert!(!history.is_empty());
        undo_all(&mut ctx, history);
        assert_eq!(start, ctx.state);
        assert_eq!(1, ctx.trial.len());
        assert_eq!(TrialStatus::Ongoing, ctx.trial.status());
    }
}

#[test]
fn test_dice_race_playout_undoes_to_start() {
    let game = demo::dice_race(10).unwrap();
    for seed in 0..8 {
        let mut ctx = started(&game, seed);
        let start = ctx.state.clone();
        let history = random_playout(&mut ctx, seed, 40);
        undo_all(&mut ctx, history);
        assert_eq!(start, ctx.state);
        assert_eq!(0, ctx.trial.num_moves());
    }
}

#[test]
fn test_undo_restores_game_over() {
    let game = demo::breakthrough(4).unwrap();
    let mut ctx = started(&game, 3);
    let history = random_playout(&mut ctx, 3, 200);
    assert!(ctx.trial.is_over());
    assert!(game.moves(&mut ctx).is_empty());
    let (before, last) = history.into_iter().last().unwrap();
    last.undo(&mut ctx, true);
    assert_eq!(before, ctx.state);
    assert!(!ctx.trial.is_over());
    assert!(!game.moves(&mut ctx).is_empty());
}

#[test]
fn test_speculative_apply_leaves_trial_untouched() {
    let game = demo::breakthrough(5).unwrap();
    let mut ctx = started(&game, 0);
    let trial = ctx.trial.clone();
    let state = ctx.state.clone();
    for m in game.moves(&mut ctx) {
        let applied = m.apply(&mut ctx, false);
        assert_ne!(state.mover(), ctx.state.mover());
        applied.undo(&mut ctx, false);
        assert_eq!(state, ctx.state);
        assert_eq!(trial, ctx.trial);
    }
}

#[test]
fn test_capture_is_undone_with_its_piece() {
    let game = demo::breakthrough(4).unwrap();
    let mut ctx = started(&game, 0);
    let mut rng = SmallRng::seed_from_u64(11);
    loop {
        let moves = game.moves(&mut ctx);
        let captures: Vec<_> = moves.iter().filter(|m| m.num_captures() > 0).cloned().collect();
        if let Some(m) = captures.first() {
            let before = ctx.state.clone();
            let applied = game.apply(&mut ctx, m);
            assert_eq!(1, applied.num_captures());
            assert_eq!(1, applied.captured_value(&game));
            assert!(matches!(m.actions[0], Action::Remove { .. }));
            applied.undo(&mut ctx, true);
            assert_eq!(before, ctx.state);
            break;
        }
        let m = moves.choose(&mut rng).unwrap().clone();
        let _ = game.apply(&mut ctx, &m);
        assert!(!ctx.trial.is_over());
    }
}
