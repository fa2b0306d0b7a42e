use crate::children;
use crate::context::Context;
use crate::game::Game;
use crate::moves::{MoveList, Then};
use crate::types::*;

use super::*;

impl_with_then!(FilterMoves MaxCaptures MinCaptures MaxDistance MinDistance);

/// Moves of the generator satisfying the condition, with `From` and `To` bound to each move.
#[derive(Debug)]
pub struct FilterMoves {
    pub moves: MovesFn,
    pub condition: BoolFn,
    pub then: Option<Then>,
}

impl Ludeme for FilterMoves {
    fn children(&self) -> Children<'_> {
        children![self.moves, self.condition, self.then]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::MoveFilter.into()
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::From | EvalContextData::To
    }
}

impl MovesGenerator for FilterMoves {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let mut moves = self.moves.eval(context);
        {
            let mut from = context.bind(EvalContextData::From, OFF);
            let mut scope = from.bind(EvalContextData::To, OFF);
            moves.retain(|m| {
                scope.rebind(EvalContextData::From, m.from);
                scope.set(m.to);
                self.condition.eval(&mut scope)
            });
        }
        with_consequence(moves, self.then.as_ref())
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Keeps the moves capturing the most pieces, consequences included. With `with_value`, ties
/// are broken by the total value of the captured pieces. Order is preserved.
#[derive(Debug)]
pub struct MaxCaptures {
    pub moves: MovesFn,
    pub with_value: bool,
    pub then: Option<Then>,
}

/// Keeps the moves capturing the fewest pieces. Ties are broken by the lowest captured value
/// when `with_value` is set.
#[derive(Debug)]
pub struct MinCaptures {
    pub moves: MovesFn,
    pub with_value: bool,
    pub then: Option<Then>,
}

/// Keeps the moves travelling the furthest between `from` and `to`. Order is preserved.
#[derive(Debug)]
pub struct MaxDistance {
    pub moves: MovesFn,
    pub relation: RelationType,
    pub then: Option<Then>,
}

#[derive(Debug)]
pub struct MinDistance {
    pub moves: MovesFn,
    pub relation: RelationType,
    pub then: Option<Then>,
}

macro_rules! impl_capture_filter {
    ($Type: ident, $concept: ident, $optimum: expr) => {
        impl Ludeme for $Type {
            fn children(&self) -> Children<'_> {
                children![self.moves, self.then]
            }

            fn node_flags(&self, _: &Game) -> GameFlags {
                if self.with_value {
                    GameFlag::PieceValue.into()
                } else {
                    GameFlags::empty()
                }
            }

            fn node_concepts(&self, _: &Game) -> Concepts {
                Concept::$concept.into()
            }

            fn node_is_static(&self) -> bool {
                false
            }
        }

        impl MovesGenerator for $Type {
            fn eval(&self, context: &mut Context<'_>) -> MoveList {
                let moves = self.moves.eval(context);
                let scores = capture_scores(context, &moves, self.with_value);
                with_consequence(keep_optimal(moves, &scores, $optimum), self.then.as_ref())
            }

            fn then(&self) -> Option<&Then> {
                self.then.as_ref()
            }
        }
    };
}

impl_capture_filter!(MaxCaptures, MaxCapture, Optimum::Max);
impl_capture_filter!(MinCaptures, MinCapture, Optimum::Min);

macro_rules! impl_distance_filter {
    ($Type: ident, $concept: ident, $optimum: expr) => {
        impl Ludeme for $Type {
            fn children(&self) -> Children<'_> {
                children![self.moves, self.then]
            }

            fn node_concepts(&self, _: &Game) -> Concepts {
                Concept::$concept.into()
            }
        }

        impl MovesGenerator for $Type {
            fn eval(&self, context: &mut Context<'_>) -> MoveList {
                let moves = self.moves.eval(context);
                let board = context.game.info.board;
                let scores: Vec<i32> = moves
                    .iter()
                    .map(|m| board.distance(m.from, m.to, self.relation).unwrap_or(OFF))
                    .collect();
                with_consequence(keep_optimal(moves, &scores, $optimum), self.then.as_ref())
            }

            fn then(&self) -> Option<&Then> {
                self.then.as_ref()
            }
        }
    };
}

impl_distance_filter!(MaxDistance, MaxDistance, Optimum::Max);
impl_distance_filter!(MinDistance, MinDistance, Optimum::Min);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Optimum {
    Max,
    Min,
}

/// `(captures, captured value)` of each move, found by applying and undoing it.
fn capture_scores(context: &mut Context<'_>, moves: &MoveList, with_value: bool) -> Vec<(i32, i32)> {
    let game = context.game;
    moves
        .iter()
        .map(|m| {
            let applied = m.apply(context, false);
            let count = applied.num_captures();
            let value = if with_value { applied.captured_value(game) } else { 0 };
            applied.undo(context, false);
            (count, value)
        })
        .collect()
}

fn keep_optimal<T: Ord + Copy>(moves: MoveList, scores: &[T], optimum: Optimum) -> MoveList {
    let best = match optimum {
        Optimum::Max => scores.iter().copied().max(),
        Optimum::Min => scores.iter().copied().min(),
    };
    let Some(best) = best else {
        return moves;
    };
    moves
        .into_iter()
        .zip(scores.iter())
        .filter(|(_, s)| **s == best)
        .map(|(m, _)| m)
        .collect()
}
