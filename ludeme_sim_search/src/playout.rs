use ludeme_sim::prelude::*;
use ludeme_sim::rand::seq::SliceRandom;
use ludeme_sim::rand::Rng;

/// Outcome of one random playout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutResult {
    pub moves_played: u64,
    /// `Ongoing` if the cutoff was reached first.
    pub status: TrialStatus,
}

/// Plays uniformly random legal moves until the trial ends or `cutoff` moves were made, then
/// undoes all of them. The context is left as it was found.
pub fn random_playout<R: Rng>(context: &mut Context<'_>, rng: &mut R, cutoff: u32) -> PlayoutResult {
    let game = context.game;
    let mut applied = Vec::with_capacity(cutoff.min(256) as usize);
    for _ in 0..cutoff {
        if context.trial.is_over() {
            break;
        }
        let moves = game.moves(context);
        let Some(m) = moves.choose(rng) else {
            break;
        };
        applied.push(game.apply(context, m));
    }
    let result = PlayoutResult {
        moves_played: applied.len() as u64,
        status: context.trial.status(),
    };
    for a in applied.into_iter().rev() {
        a.undo(context, true);
    }
    result
}

/// Same as `random_playout` but keeps the moves applied. Returns the number of moves made.
pub fn play_out<R: Rng>(context: &mut Context<'_>, rng: &mut R, cutoff: u32) -> u64 {
    let game = context.game;
    let mut n = 0;
    while n < cutoff as u64 && !context.trial.is_over() {
        let moves = game.moves(context);
        let Some(m) = moves.choose(rng) else {
            break;
        };
        let _ = game.apply(context, m);
        n += 1;
    }
    n
}
