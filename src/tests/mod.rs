use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::context::{Context, ContextBuilder};
use crate::game::Game;
use crate::ludeme::{Children, Ludeme, MovesGenerator};
use crate::moves::{AppliedMove, Move, MoveList};
use crate::state::State;
use crate::types::*;


pub mod analysis;

pub mod combinators;

pub mod end_rules;

pub mod repetition;

pub mod reversibility;

pub mod validation;

pub mod zobrist_hash;

#[cfg(feature = "serde")]
pub mod serialization;

pub mod prop_tests;

/// Context of `game` with the start rules applied.
pub fn started(game: &Game, seed: u64) -> Context<'_> {
    let mut ctx = ContextBuilder::new(game).with_seed(seed).build();
    game.start(&mut ctx);
    ctx
}

/// Plays up to `max_moves` uniformly random legal moves. Returns the undo records and the
/// states seen before each move.
pub fn random_playout(ctx: &mut Context<'_>, seed: u64, max_moves: usize) -> Vec<(State, AppliedMove)> {
    let game = ctx.game;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut history = vec![];
    for _ in 0..max_moves {
        let moves = game.moves(ctx);
        let Some(m) = moves.choose(&mut rng) else {
            break;
        };
        let before = ctx.state.clone();
        let applied = game.apply(ctx, m);
        history.push((before, applied));
    }
    history
}

/// Generator returning the same moves whatever the context.
#[derive(Debug)]
pub struct FixedMoves(pub MoveList);

impl Ludeme for FixedMoves {
    fn node_is_static(&self) -> bool {
        false
    }
}

impl MovesGenerator for FixedMoves {
    fn eval(&self, _: &mut Context<'_>) -> MoveList {
        self.0.clone()
    }
}

/// Generator producing one pass move whose `to` is the current value of a transient field.
#[derive(Debug)]
pub struct Probe(pub EvalContextData);

impl Ludeme for Probe {
    fn children(&self) -> Children<'_> {
        Default::default()
    }

    fn node_reads(&self) -> ContextFields {
        self.0.into()
    }
}

impl MovesGenerator for Probe {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let mut m = Move::pass(context.state.mover());
        m.to = context.get(self.0);
        vec![m]
    }
}
