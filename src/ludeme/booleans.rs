use std::sync::OnceLock;

use enumset::enum_set;

use crate::children;
use crate::context::Context;
use crate::game::{Game, GameInfo};
use crate::types::*;

use super::ints::{check_dice, check_role};
use super::*;

#[derive(Debug, Clone, Copy)]
pub struct BoolConstant(pub bool);

impl Ludeme for BoolConstant {}

impl BooleanFunction for BoolConstant {
    #[inline]
    fn eval(&self, _: &mut Context<'_>) -> bool {
        self.0
    }
}

#[derive(Debug)]
pub struct Not {
    pub a: BoolFn,
    pub precomputed: Precomputed<bool>,
}

impl Not {
    pub fn new(a: BoolFn) -> Self {
        Self {
            a,
            precomputed: Precomputed::new(),
        }
    }
}

impl Ludeme for Not {
    fn children(&self) -> Children<'_> {
        children![self.a]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Negation.into()
    }

    fn cache_static(&self, game: &Game) -> bool {
        let mut context = scratch_context(game);
        self.precomputed.set(!self.a.eval(&mut context))
    }
}

impl BooleanFunction for Not {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        if let Some(v) = self.precomputed.get() {
            return v;
        }
        !self.a.eval(context)
    }
}

/// True when every operand holds. Stops at the first false operand.
#[derive(Debug)]
pub struct And {
    pub list: Vec<BoolFn>,
    pub precomputed: Precomputed<bool>,
}

impl And {
    pub fn new(list: Vec<BoolFn>) -> Self {
        Self {
            list,
            precomputed: Precomputed::new(),
        }
    }
}

impl Ludeme for And {
    fn children(&self) -> Children<'_> {
        children![self.list]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Conjunction.into()
    }

    fn cache_static(&self, game: &Game) -> bool {
        let mut context = scratch_context(game);
        self.precomputed.set(self.list.iter().all(|c| c.eval(&mut context)))
    }
}

impl BooleanFunction for And {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        if let Some(v) = self.precomputed.get() {
            return v;
        }
        self.list.iter().all(|c| c.eval(context))
    }
}

/// True when some operand holds. Stops at the first true operand.
#[derive(Debug)]
pub struct Or {
    pub list: Vec<BoolFn>,
    pub precomputed: Precomputed<bool>,
}

impl Or {
    pub fn new(list: Vec<BoolFn>) -> Self {
        Self {
            list,
            precomputed: Precomputed::new(),
        }
    }
}

impl Ludeme for Or {
    fn children(&self) -> Children<'_> {
        children![self.list]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Disjunction.into()
    }

    fn cache_static(&self, game: &Game) -> bool {
        let mut context = scratch_context(game);
        self.precomputed.set(self.list.iter().any(|c| c.eval(&mut context)))
    }
}

impl BooleanFunction for Or {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        if let Some(v) = self.precomputed.get() {
            return v;
        }
        self.list.iter().any(|c| c.eval(context))
    }
}

#[derive(Debug)]
pub struct Compare {
    pub op: CompareOp,
    pub a: IntFn,
    pub b: IntFn,
    pub precomputed: Precomputed<bool>,
}

impl Compare {
    pub fn new(op: CompareOp, a: IntFn, b: IntFn) -> Self {
        Self {
            op,
            a,
            b,
            precomputed: Precomputed::new(),
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> bool {
        let a = self.a.eval(context);
        let b = self.b.eval(context);
        self.op.test(a, b)
    }
}

pub(crate) fn compare_concept(op: CompareOp) -> Concept {
    match op {
        CompareOp::Eq => Concept::Equal,
        CompareOp::Ne => Concept::NotEqual,
        CompareOp::Lt => Concept::LessThan,
        CompareOp::Le => Concept::LessThanOrEqual,
        CompareOp::Gt => Concept::GreaterThan,
        CompareOp::Ge => Concept::GreaterThanOrEqual,
    }
}

impl Ludeme for Compare {
    fn children(&self) -> Children<'_> {
        children![self.a, self.b]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        compare_concept(self.op).into()
    }

    fn cache_static(&self, game: &Game) -> bool {
        let mut context = scratch_context(game);
        self.precomputed.set(self.compute(&mut context))
    }
}

impl BooleanFunction for Compare {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        if let Some(v) = self.precomputed.get() {
            return v;
        }
        self.compute(context)
    }
}

#[derive(Debug)]
pub struct IsEmpty(pub IntFn);

impl Ludeme for IsEmpty {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::IsEmpty.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl BooleanFunction for IsEmpty {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let site = self.0.eval(context);
        context.state.is_empty(site)
    }
}

/// The top piece of the site belongs to the mover or a teammate.
#[derive(Debug)]
pub struct IsFriend(pub IntFn);

impl Ludeme for IsFriend {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::IsFriend.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl BooleanFunction for IsFriend {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let site = self.0.eval(context);
        let state = &context.state;
        state.is_friend(state.who(site, OFF), state.mover() as i32)
    }
}

/// The top piece of the site belongs to a player who is not a friend of the mover.
#[derive(Debug)]
pub struct IsEnemy(pub IntFn);

impl Ludeme for IsEnemy {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::IsEnemy.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl BooleanFunction for IsEnemy {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let site = self.0.eval(context);
        let state = &context.state;
        let who = state.who(site, OFF);
        who > 0 && !state.is_friend(who, state.mover() as i32)
    }
}

#[derive(Debug)]
pub struct IsIn {
    pub site: IntFn,
    pub region: RegionFn,
}

impl Ludeme for IsIn {
    fn children(&self) -> Children<'_> {
        children![self.site, self.region]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::IsIn.into()
    }
}

impl BooleanFunction for IsIn {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let site = self.site.eval(context);
        site != OFF && self.region.eval(context).contains(site)
    }
}

#[derive(Debug)]
pub struct IsMover(pub IntFn);

impl Ludeme for IsMover {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl BooleanFunction for IsMover {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        self.0.eval(context) == context.state.mover() as i32
    }
}

/// The current state repeats an earlier one of the trial. The repetition type defaults to the
/// game's metadata, or positional.
#[derive(Debug, Default)]
pub struct IsRepeat {
    pub repetition: Option<RepetitionType>,
    resolved: OnceLock<RepetitionType>,
}

impl IsRepeat {
    pub fn new(repetition: Option<RepetitionType>) -> Self {
        Self {
            repetition,
            resolved: OnceLock::new(),
        }
    }

    #[inline]
    pub fn repetition(&self) -> RepetitionType {
        self.resolved.get().copied().or(self.repetition).unwrap_or_default()
    }
}

pub(crate) fn repetition_concept(repetition: RepetitionType) -> Concept {
    match repetition {
        RepetitionType::Positional => Concept::PositionalSuperko,
        RepetitionType::Situational => Concept::SituationalSuperko,
        RepetitionType::PositionalInTurn => Concept::TurnKo,
        RepetitionType::SituationalInTurn => Concept::SituationalTurnKo,
    }
}

impl Ludeme for IsRepeat {
    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::RepetitionCheck.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        repetition_concept(self.repetition()).into()
    }

    fn node_is_static(&self) -> bool {
        false
    }

    fn resolve_defaults(&self, info: &GameInfo) {
        let _ = self
            .resolved
            .set(self.repetition.or(info.repetition).unwrap_or_default());
    }
}

impl BooleanFunction for IsRepeat {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let state = &context.state;
        context.trial.is_repeat(
            self.repetition(),
            state.mover(),
            state.positional_hash(),
            state.situational_hash(),
        )
    }
}

/// The generator produces at least one move.
#[derive(Debug)]
pub struct CanMove(pub MovesFn);

impl Ludeme for CanMove {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::CanMove.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl BooleanFunction for CanMove {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        !self.0.eval(context).is_empty()
    }
}

/// The player of `role` would have no legal move if it were their turn.
///
/// The check swaps the turn and evaluates the play rules. A check started while another one
/// is running returns false.
#[derive(Debug, Clone, Copy)]
pub struct NoMoves(pub RoleType);

impl Ludeme for NoMoves {
    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Stalemate.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::NoMoves.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        check_role(self.name(), self.0, game, report)
    }
}

impl BooleanFunction for NoMoves {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let Some(mut guard) = context.enter_stalemate_check() else {
            return false;
        };
        let player = guard.state.resolve_role(self.0);
        if !guard.state.is_player(player as i32) {
            return false;
        }
        let mut turn = guard.swap_turn(player);
        let game = turn.game;
        game.legal_moves(&mut turn).is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NoPieces(pub RoleType);

impl Ludeme for NoPieces {
    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::NoPiece.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        check_role(self.name(), self.0, game, report)
    }
}

impl BooleanFunction for NoPieces {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let who = context.state.resolve_role(self.0);
        context.state.board().sites_occupied_by(who).next().is_none()
    }
}

/// The condition holds for every site of the region, with `Site` bound to each in turn.
#[derive(Debug)]
pub struct AllSites {
    pub region: RegionFn,
    pub condition: BoolFn,
}

impl Ludeme for AllSites {
    fn children(&self) -> Children<'_> {
        children![self.region, self.condition]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::AllSites.into()
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::Site.into()
    }
}

impl BooleanFunction for AllSites {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let region = self.region.eval(context);
        let mut scope = context.bind(EvalContextData::Site, OFF);
        for site in region.iter() {
            scope.set(site);
            if !self.condition.eval(&mut scope) {
                return false;
            }
        }
        true
    }
}

/// The condition holds for every value of the array, with `Value` bound to each in turn.
#[derive(Debug)]
pub struct AllValues {
    pub values: ArrayFn,
    pub condition: BoolFn,
}

impl Ludeme for AllValues {
    fn children(&self) -> Children<'_> {
        children![self.values, self.condition]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::AllValues.into()
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::Value.into()
    }
}

impl BooleanFunction for AllValues {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let values = self.values.eval(context);
        let mut scope = context.bind(EvalContextData::Value, OFF);
        for value in values {
            scope.set(value);
            if !self.condition.eval(&mut scope) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AllDiceUsed;

impl Ludeme for AllDiceUsed {
    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Stochastic.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        enum_set!(Concept::AllDiceUsed | Concept::Dice)
    }

    fn node_is_static(&self) -> bool {
        false
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        check_dice(self.name(), game, report)
    }
}

impl BooleanFunction for AllDiceUsed {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        context.state.dice().iter().all(|d| d.used)
    }
}

/// Every player passed in the last round.
#[derive(Debug, Clone, Copy)]
pub struct AllPassed;

impl Ludeme for AllPassed {
    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Pass.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::AllPassed.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl BooleanFunction for AllPassed {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let n = context.state.num_players() as usize;
        context.trial.last_moves_passed(n)
    }
}
