use super::*;
use crate::demo;
use crate::rng::RngState;
use crate::state::Trial;

#[test]
fn test_state_and_trial_serde_json() {
    let game = demo::breakthrough(5).unwrap();
    let mut ctx = started(&game, 0);
    let _ = random_playout(&mut ctx, 1, 10);
    let json = serde_json::to_string(&ctx.state).unwrap();
    let state: State = serde_json::from_str(&json).unwrap();
    assert_eq!(ctx.state, state);
    let json = serde_json::to_string(&ctx.trial).unwrap();
    let trial: Trial = serde_json::from_str(&json).unwrap();
    assert_eq!(ctx.trial, trial);
}

#[test]
fn test_checkpoint_replays_dice() {
    let game = demo::dice_race(30).unwrap();
    let mut ctx = started(&game, 7);
    let _ = random_playout(&mut ctx, 7, 6);
    let state = bincode::serialize(&ctx.state).unwrap();
    let trial = bincode::serialize(&ctx.trial).unwrap();
    let rng = bincode::serialize(&ctx.rng).unwrap();

    let mut restored = Context::new(&game);
    restored.state = bincode::deserialize(&state).unwrap();
    restored.trial = bincode::deserialize(&trial).unwrap();
    restored.rng = bincode::deserialize::<RngState>(&rng).unwrap();

    let _ = random_playout(&mut ctx, 99, 10);
    let _ = random_playout(&mut restored, 99, 10);
    assert_eq!(ctx.state, restored.state);
    assert_eq!(ctx.trial, restored.trial);
}

#[test]
fn test_move_without_consequences_serde_json() {
    let game = demo::breakthrough(5).unwrap();
    let mut ctx = started(&game, 0);
    let moves = game.moves(&mut ctx);
    let json = serde_json::to_string(&moves).unwrap();
    let decoded: MoveList = serde_json::from_str(&json).unwrap();
    assert_eq!(moves, decoded);
}
