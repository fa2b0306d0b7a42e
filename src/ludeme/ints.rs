use enumset::enum_set;

use crate::children;
use crate::context::Context;
use crate::game::Game;
use crate::types::*;

use super::*;

#[derive(Debug, Clone, Copy)]
pub struct IntConstant(pub i32);

impl Ludeme for IntConstant {}

impl IntFunction for IntConstant {
    #[inline]
    fn eval(&self, _: &mut Context<'_>) -> i32 {
        self.0
    }
}

/// Value of a transient field.
#[derive(Debug, Clone, Copy)]
pub struct ContextVar(pub EvalContextData);

impl Ludeme for ContextVar {
    fn node_reads(&self) -> ContextFields {
        self.0.into()
    }
}

impl IntFunction for ContextVar {
    #[inline]
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        context.get(self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Mover;

impl Ludeme for Mover {
    fn node_is_static(&self) -> bool {
        false
    }
}

impl IntFunction for Mover {
    #[inline]
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        context.state.mover() as i32
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NextPlayer;

impl Ludeme for NextPlayer {
    fn node_is_static(&self) -> bool {
        false
    }
}

impl IntFunction for NextPlayer {
    #[inline]
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        context.state.next() as i32
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PrevPlayer;

impl Ludeme for PrevPlayer {
    fn node_is_static(&self) -> bool {
        false
    }
}

impl IntFunction for PrevPlayer {
    #[inline]
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        context.state.prev() as i32
    }
}

/// Component on a site, 0 if empty. Reads the top of the stack unless a level is given.
#[derive(Debug)]
pub struct What {
    pub site: IntFn,
    pub level: Option<IntFn>,
}

impl Ludeme for What {
    fn children(&self) -> Children<'_> {
        children![self.site, self.level]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        if self.level.is_some() {
            GameFlag::Stacking.into()
        } else {
            GameFlags::empty()
        }
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl IntFunction for What {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        let site = self.site.eval(context);
        let level = self.level.as_ref().map(|l| l.eval(context)).unwrap_or(OFF);
        context.state.what(site, level)
    }
}

/// Owner of the piece on a site, 0 if empty.
#[derive(Debug)]
pub struct Who {
    pub site: IntFn,
    pub level: Option<IntFn>,
}

impl Ludeme for Who {
    fn children(&self) -> Children<'_> {
        children![self.site, self.level]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        if self.level.is_some() {
            GameFlag::Stacking.into()
        } else {
            GameFlags::empty()
        }
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl IntFunction for Who {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        let site = self.site.eval(context);
        let level = self.level.as_ref().map(|l| l.eval(context)).unwrap_or(OFF);
        context.state.who(site, level)
    }
}

#[derive(Debug)]
pub struct StackSize(pub IntFn);

impl Ludeme for StackSize {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Stacking.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Stacking.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl IntFunction for StackSize {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        let site = self.0.eval(context);
        context.state.size_stack(site)
    }
}

/// Piece count of a site in counter games, `OFF` for an invalid site.
#[derive(Debug)]
pub struct SiteCount(pub IntFn);

impl Ludeme for SiteCount {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Count.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl IntFunction for SiteCount {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        let site = self.0.eval(context);
        context.state.count(site)
    }
}

/// Number of sites in a region.
#[derive(Debug)]
pub struct Count(pub RegionFn);

impl Ludeme for Count {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }
}

impl IntFunction for Count {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        self.0.eval(context).len() as i32
    }
}

/// Number of pieces on the board owned by a role.
#[derive(Debug, Clone, Copy)]
pub struct CountPieces(pub RoleType);

impl Ludeme for CountPieces {
    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::PieceCount.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        check_role(self.name(), self.0, game, report)
    }
}

impl IntFunction for CountPieces {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        let who = context.state.resolve_role(self.0);
        context
            .state
            .board()
            .stacks()
            .iter()
            .map(|s| s.iter().filter(|p| p.who == who).count() as i32)
            .sum()
    }
}

/// Score of a player, 0 for an unknown player.
#[derive(Debug)]
pub struct Score(pub IntFn);

impl Ludeme for Score {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Score.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Scoring.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl IntFunction for Score {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        let player = self.0.eval(context);
        context.state.score(player)
    }
}

/// First pending value, `OFF` if there is none.
#[derive(Debug, Clone, Copy)]
pub struct PendingValue;

impl Ludeme for PendingValue {
    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::PendingValues.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl IntFunction for PendingValue {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        context.state.pending().first().copied().unwrap_or(OFF)
    }
}

/// Component value of the top piece of a site, 0 if empty.
#[derive(Debug)]
pub struct PieceValue(pub IntFn);

impl Ludeme for PieceValue {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::PieceValue.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::PieceValue.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl IntFunction for PieceValue {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        let site = self.0.eval(context);
        let what = context.state.what(site, OFF);
        context.game.info.component_value(what)
    }
}

/// Binary arithmetic. Division or modulo by zero yields `OFF`.
#[derive(Debug)]
pub struct Arith {
    pub op: ArithOp,
    pub a: IntFn,
    pub b: IntFn,
    pub precomputed: Precomputed<i32>,
}

impl Arith {
    pub fn new(op: ArithOp, a: IntFn, b: IntFn) -> Self {
        Self {
            op,
            a,
            b,
            precomputed: Precomputed::new(),
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> i32 {
        let a = self.a.eval(context);
        let b = self.b.eval(context);
        match self.op {
            ArithOp::Add => a.wrapping_add(b),
            ArithOp::Sub => a.wrapping_sub(b),
            ArithOp::Mul => a.wrapping_mul(b),
            ArithOp::Div => a.checked_div(b).unwrap_or(OFF),
            ArithOp::Mod => a.checked_rem(b).unwrap_or(OFF),
            ArithOp::Max => a.max(b),
            ArithOp::Min => a.min(b),
        }
    }
}

impl Ludeme for Arith {
    fn children(&self) -> Children<'_> {
        children![self.a, self.b]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        match self.op {
            ArithOp::Add => enum_set!(Concept::Addition),
            ArithOp::Sub => enum_set!(Concept::Subtraction),
            ArithOp::Mul => enum_set!(Concept::Multiplication),
            ArithOp::Div => enum_set!(Concept::Division),
            ArithOp::Mod => enum_set!(Concept::Modulo),
            ArithOp::Max => enum_set!(Concept::Maximum),
            ArithOp::Min => enum_set!(Concept::Minimum),
        }
    }

    fn node_will_crash(&self, game: &Game, report: &mut Report) -> bool {
        if !self.op.divides() || !self.b.is_static() {
            return false;
        }
        let mut context = scratch_context(game);
        if self.b.eval(&mut context) == 0 {
            report.add_crash(self.name(), format!("{:?} by a constant zero", self.op));
            return true;
        }
        false
    }

    fn cache_static(&self, game: &Game) -> bool {
        let mut context = scratch_context(game);
        self.precomputed.set(self.compute(&mut context))
    }
}

impl IntFunction for Arith {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        if let Some(v) = self.precomputed.get() {
            return v;
        }
        self.compute(context)
    }
}

/// Uniform draw from `0..bound`.
#[derive(Debug)]
pub struct RandomInt(pub IntFn);

impl Ludeme for RandomInt {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Stochastic.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Random.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl IntFunction for RandomInt {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        let bound = self.0.eval(context);
        context.rng.draw(bound)
    }
}

/// Sum of the unused dice.
#[derive(Debug, Clone, Copy)]
pub struct DiceTotal;

impl Ludeme for DiceTotal {
    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Stochastic.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Dice.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        check_dice(self.name(), game, report)
    }
}

impl IntFunction for DiceTotal {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        context.state.dice_total()
    }
}

/// Reports a dice ludeme used in a game without dice.
pub(crate) fn check_dice(name: &str, game: &Game, report: &mut Report) -> bool {
    if game.info.num_dice() == 0 {
        report.add_requirement(name, "the game has no dice");
        return true;
    }
    false
}

/// Reports a player role beyond the number of players.
pub(crate) fn check_role(name: &str, role: RoleType, game: &Game, report: &mut Report) -> bool {
    if let RoleType::Player(p) = role {
        if p == 0 || p > game.info.num_players {
            report.add_requirement(name, format!("{role} is not a player of a {}-player game", game.info.num_players));
            return true;
        }
    }
    false
}
