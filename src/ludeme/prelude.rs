//! Constructor functions for assembling rule trees in Rust.

use crate::moves::Then;
use crate::types::*;

pub use super::arrays::*;
pub use super::booleans::{And, BoolConstant, CanMove, Compare, Not, Or};
pub use super::combinators::*;
pub use super::effects::*;
pub use super::end::EndRule;
pub use super::filters::*;
pub use super::floats::*;
pub use super::ints::*;
pub use super::meta::NoRepeat;
pub use super::umbrella::*;
pub use super::{
    ArrayFn, BoolFn, BooleanFunction, FloatFn, FloatFunction, IntArrayFunction, IntFn, IntFunction, Ludeme, MovesFn,
    MovesGenerator, RegionFn, RegionFunction,
};

/// Boxes a concrete generator.
pub trait BoxedMoves {
    fn boxed(self) -> MovesFn;
}

impl<T: MovesGenerator + 'static> BoxedMoves for T {
    #[inline]
    fn boxed(self) -> MovesFn {
        Box::new(self)
    }
}

pub fn int(v: i32) -> IntFn {
    Box::new(IntConstant(v))
}

pub fn var(field: EvalContextData) -> IntFn {
    Box::new(ContextVar(field))
}

pub fn mover() -> IntFn {
    Box::new(Mover)
}

pub fn next_player() -> IntFn {
    Box::new(NextPlayer)
}

pub fn prev_player() -> IntFn {
    Box::new(PrevPlayer)
}

pub fn what(site: IntFn) -> IntFn {
    Box::new(What { site, level: None })
}

pub fn who(site: IntFn) -> IntFn {
    Box::new(Who { site, level: None })
}

pub fn stack_size(site: IntFn) -> IntFn {
    Box::new(StackSize(site))
}

pub fn count(region: RegionFn) -> IntFn {
    Box::new(Count(region))
}

pub fn count_pieces(role: RoleType) -> IntFn {
    Box::new(CountPieces(role))
}

pub fn arith(op: ArithOp, a: IntFn, b: IntFn) -> IntFn {
    Box::new(Arith::new(op, a, b))
}

pub fn random_int(bound: IntFn) -> IntFn {
    Box::new(RandomInt(bound))
}

pub fn dice_total() -> IntFn {
    Box::new(DiceTotal)
}

pub fn bool_const(v: bool) -> BoolFn {
    Box::new(BoolConstant(v))
}

pub fn not(a: BoolFn) -> BoolFn {
    Box::new(Not::new(a))
}

pub fn and(list: Vec<BoolFn>) -> BoolFn {
    Box::new(And::new(list))
}

pub fn or(list: Vec<BoolFn>) -> BoolFn {
    Box::new(Or::new(list))
}

pub fn compare(op: CompareOp, a: IntFn, b: IntFn) -> BoolFn {
    Box::new(Compare::new(op, a, b))
}

pub fn can_move(moves: MovesFn) -> BoolFn {
    Box::new(CanMove(moves))
}

pub fn float(v: f32) -> FloatFn {
    Box::new(FloatConstant(v))
}

pub fn to_float(a: IntFn) -> FloatFn {
    Box::new(ToFloat(a))
}

pub fn float_div(a: FloatFn, b: FloatFn) -> FloatFn {
    Box::new(FloatDiv::new(a, b))
}

pub fn int_range(min: IntFn, max: IntFn) -> ArrayFn {
    Box::new(IntRange::new(min, max))
}

pub fn step(from: RegionFn, directions: StepDirections, capture: bool) -> Step {
    Step {
        from,
        directions,
        capture,
        condition: None,
        then: None,
    }
}

pub fn hop(from: RegionFn, relation: RelationType) -> Hop {
    Hop {
        from,
        relation,
        between: None,
        then: None,
    }
}

pub fn slide(from: RegionFn, direction: Direction, distance: IntFn) -> Slide {
    Slide {
        from,
        direction,
        distance,
        then: None,
    }
}

pub fn pass() -> Pass {
    Pass::default()
}

pub fn roll() -> Roll {
    Roll::default()
}

pub fn set_next_player(player: IntFn) -> SetNextPlayer {
    SetNextPlayer { player, then: None }
}

pub fn set_score(player: IntFn, score: IntFn) -> SetScore {
    SetScore {
        player,
        score,
        then: None,
    }
}

pub fn for_each_site(region: RegionFn, generator: MovesFn) -> ForEachSite {
    ForEachSite {
        region,
        generator,
        otherwise: None,
        then: None,
    }
}

pub fn for_each_value(values: ArrayFn, generator: MovesFn) -> ForEachValue {
    ForEachValue {
        values,
        generator,
        otherwise: None,
        then: None,
    }
}

pub fn for_each_player(generator: MovesFn) -> ForEachPlayer {
    ForEachPlayer {
        generator,
        otherwise: None,
        then: None,
    }
}

pub fn for_each_level(site: IntFn, generator: MovesFn) -> ForEachLevel {
    ForEachLevel {
        site,
        generator,
        otherwise: None,
        then: None,
    }
}

pub fn for_each_die(generator: MovesFn) -> ForEachDie {
    ForEachDie { generator, then: None }
}

pub fn union(moves: Vec<MovesFn>) -> MovesUnion {
    MovesUnion { moves, then: None }
}

pub fn if_moves(condition: BoolFn, moves: MovesFn, otherwise: Option<MovesFn>) -> IfMoves {
    IfMoves {
        condition,
        moves,
        otherwise,
        then: None,
    }
}

pub fn filter_moves(moves: MovesFn, condition: BoolFn) -> FilterMoves {
    FilterMoves {
        moves,
        condition,
        then: None,
    }
}

pub fn max_captures(moves: MovesFn, with_value: bool) -> MaxCaptures {
    MaxCaptures {
        moves,
        with_value,
        then: None,
    }
}

pub fn min_captures(moves: MovesFn, with_value: bool) -> MinCaptures {
    MinCaptures {
        moves,
        with_value,
        then: None,
    }
}

pub fn max_distance(moves: MovesFn, relation: RelationType) -> MaxDistance {
    MaxDistance {
        moves,
        relation,
        then: None,
    }
}

pub fn min_distance(moves: MovesFn, relation: RelationType) -> MinDistance {
    MinDistance {
        moves,
        relation,
        then: None,
    }
}

pub fn then<T: MovesGenerator + 'static>(moves: T) -> Then {
    Then::new(moves)
}

pub fn end_rule(condition: BoolFn, result: ResultType, role: RoleType) -> EndRule {
    EndRule { condition, result, role }
}
