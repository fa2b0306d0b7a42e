use super::*;
use crate::demo;
use crate::zobrist_hash::ZobristHasher;

fn assert_coherent(state: &State) {
    let mut rehashed = state.clone();
    rehashed.rehash();
    assert_eq!(rehashed.positional_hash(), state.positional_hash());
    assert_eq!(rehashed.situational_hash(), state.situational_hash());
}

#[test]
fn test_incremental_hash_matches_recompute_breakthrough() {
    let game = demo::breakthrough(6).unwrap();
    for seed in 0..5 {
        let mut ctx = started(&game, seed);
        assert_coherent(&ctx.state);
        for (before, _) in random_playout(&mut ctx, seed, 80) {
            assert_coherent(&before);
        }
        assert_coherent(&ctx.state);
    }
}

#[test]
fn test_incremental_hash_matches_recompute_dice_race() {
    let game = demo::dice_race(16).unwrap();
    for seed in 0..5 {
        let mut ctx = started(&game, seed);
        for (before, _) in random_playout(&mut ctx, seed, 80) {
            assert_coherent(&before);
        }
        assert_coherent(&ctx.state);
    }
}

#[test]
fn test_situational_hash_includes_turn() {
    let game = demo::breakthrough(5).unwrap();
    let ctx = started(&game, 0);
    let mut swapped = ctx.clone();
    {
        let scope = swapped.swap_turn(2);
        assert_eq!(ctx.state.positional_hash(), scope.state.positional_hash());
        assert_ne!(ctx.state.situational_hash(), scope.state.situational_hash());
    }
    assert_eq!(ctx.state.situational_hash(), swapped.state.situational_hash());
}

#[test]
fn test_full_recompute_combines_both_hashes() {
    let game = demo::breakthrough(5).unwrap();
    let ctx = started(&game, 0);
    let h = {
        let mut h = ZobristHasher::new();
        ctx.state.zobrist_hash_full_recompute(&mut h);
        h.finish()
    };
    assert_eq!(ctx.state.situational_hash(), h);
    assert_ne!(0, ctx.state.positional_hash());
}
