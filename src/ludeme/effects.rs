//! Decisions and effects: generators producing one move per option.

use std::sync::OnceLock;

use enumset::enum_set;
use smallvec::SmallVec;

use crate::children;
use crate::context::Context;
use crate::game::equipment::Board;
use crate::game::{Game, GameInfo};
use crate::moves::{Action, Move, MoveList, Then};
use crate::state::Piece;
use crate::action_list;
use crate::types::*;

use super::ints::check_dice;
use super::*;

impl_with_then!(Add Remove Step Hop Slide Pass SetNextPlayer SetScore SetPending AddToTeam Roll Promote);

fn check_component(name: &str, piece: &str, game: &Game, report: &mut Report) -> bool {
    if game.info.component_index(piece).is_none() {
        report.add_requirement(name, format!("unknown piece \"{piece}\""));
        return true;
    }
    false
}

/// Places a new piece on each site of the region. Sites must be empty unless `stack` is set.
#[derive(Debug)]
pub struct Add {
    pub piece: String,
    pub region: RegionFn,
    pub stack: bool,
    pub then: Option<Then>,
    what: OnceLock<u16>,
}

impl Add {
    pub fn new<S: Into<String>>(piece: S, region: RegionFn) -> Self {
        Self {
            piece: piece.into(),
            region,
            stack: false,
            then: None,
            what: OnceLock::new(),
        }
    }

    pub fn with_stack(self, stack: bool) -> Self {
        Self { stack, ..self }
    }
}

impl Ludeme for Add {
    fn children(&self) -> Children<'_> {
        children![self.region, self.then]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        if self.stack {
            GameFlag::Stacking.into()
        } else {
            GameFlags::empty()
        }
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        if self.stack {
            enum_set!(Concept::AddDecision | Concept::Stacking)
        } else {
            enum_set!(Concept::AddDecision)
        }
    }

    fn node_is_static(&self) -> bool {
        false
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        check_component(self.name(), &self.piece, game, report)
    }

    fn resolve_defaults(&self, info: &GameInfo) {
        if let Some(what) = info.component_index(&self.piece) {
            let _ = self.what.set(what);
        }
    }
}

impl MovesGenerator for Add {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let Some(&what) = self.what.get() else {
            return MoveList::new();
        };
        let who = context.game.info.component_owner(what as i32);
        let mover = context.state.mover();
        let region = self.region.eval(context);
        region
            .iter()
            .filter(|site| self.stack || context.state.is_empty(*site))
            .map(|site| {
                let piece = Piece::new(what, who);
                Move::new(mover, OFF, site, action_list![Action::Add { site, piece }]).with_then(self.then.as_ref())
            })
            .collect()
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Removes the top piece of a site.
#[derive(Debug)]
pub struct Remove {
    pub site: IntFn,
    pub then: Option<Then>,
}

impl Ludeme for Remove {
    fn children(&self) -> Children<'_> {
        children![self.site, self.then]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::RemoveEffect.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl MovesGenerator for Remove {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let site = self.site.eval(context);
        if context.state.size_stack(site) == 0 {
            return MoveList::new();
        }
        let m = Move::new(context.state.mover(), OFF, site, action_list![Action::Remove { site }]);
        vec![m.with_then(self.then.as_ref())]
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Directions a step may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirections {
    Relation(RelationType),
    /// Straight ahead and the two forward diagonals, seen from the mover's side.
    Forwards,
}

impl StepDirections {
    pub fn resolve(self, board: &Board, mover: u8) -> SmallVec<[Direction; 8]> {
        match self {
            Self::Relation(r) => r.directions().into(),
            Self::Forwards => match board.forwards(mover) {
                Direction::N => smallvec::smallvec![Direction::N, Direction::NE, Direction::NW],
                _ => smallvec::smallvec![Direction::S, Direction::SE, Direction::SW],
            },
        }
    }
}

/// Moves a piece of the mover to an adjacent site. The target must be empty, or hold an enemy
/// piece when `capture` is set. An optional condition is checked with `From` and `To` bound.
#[derive(Debug)]
pub struct Step {
    pub from: RegionFn,
    pub directions: StepDirections,
    pub capture: bool,
    pub condition: Option<BoolFn>,
    pub then: Option<Then>,
}

impl Ludeme for Step {
    fn children(&self) -> Children<'_> {
        children![self.from, self.condition, self.then]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        if self.capture {
            enum_set!(Concept::StepDecision | Concept::ReplacementCapture)
        } else {
            enum_set!(Concept::StepDecision)
        }
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::From | EvalContextData::To
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl MovesGenerator for Step {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let mover = context.state.mover();
        let board = context.game.info.board;
        let directions = self.directions.resolve(&board, mover);
        let region = self.from.eval(context);
        let mut moves = MoveList::new();
        let mut from_scope = context.bind(EvalContextData::From, OFF);
        let mut scope = from_scope.bind(EvalContextData::To, OFF);
        for from in region.iter() {
            if scope.state.who(from, OFF) != mover as i32 {
                continue;
            }
            for dir in &directions {
                let Some(to) = board.step(from, *dir) else {
                    continue;
                };
                let occupant = scope.state.who(to, OFF);
                let actions = if occupant == 0 {
                    action_list![Action::MovePiece { from, to }]
                } else if self.capture && !scope.state.is_friend(occupant, mover as i32) {
                    action_list![Action::Remove { site: to }, Action::MovePiece { from, to }]
                } else {
                    continue;
                };
                if let Some(condition) = &self.condition {
                    scope.rebind(EvalContextData::From, from);
                    scope.set(to);
                    if !condition.eval(&mut scope) {
                        continue;
                    }
                }
                moves.push(Move::new(mover, from, to, actions).with_then(self.then.as_ref()));
            }
        }
        moves
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Jumps a piece of the mover over an adjacent site to the empty site behind it, capturing the
/// jumped piece. The jumped site must hold an enemy unless a condition on `Between` is given.
#[derive(Debug)]
pub struct Hop {
    pub from: RegionFn,
    pub relation: RelationType,
    pub between: Option<BoolFn>,
    pub then: Option<Then>,
}

impl Ludeme for Hop {
    fn children(&self) -> Children<'_> {
        children![self.from, self.between, self.then]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        enum_set!(Concept::HopDecision | Concept::HopCapture)
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::From | EvalContextData::Between | EvalContextData::To
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl MovesGenerator for Hop {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let mover = context.state.mover();
        let board = context.game.info.board;
        let region = self.from.eval(context);
        let mut moves = MoveList::new();
        let mut from_scope = context.bind(EvalContextData::From, OFF);
        let mut between_scope = from_scope.bind(EvalContextData::Between, OFF);
        let mut scope = between_scope.bind(EvalContextData::To, OFF);
        for from in region.iter() {
            if scope.state.who(from, OFF) != mover as i32 {
                continue;
            }
            for dir in self.relation.directions() {
                let Some(between) = board.step(from, *dir) else {
                    continue;
                };
                let Some(to) = board.step(between, *dir) else {
                    continue;
                };
                if !scope.state.is_empty(to) {
                    continue;
                }
                let jumpable = match &self.between {
                    Some(condition) => {
                        scope.rebind(EvalContextData::From, from);
                        scope.rebind(EvalContextData::Between, between);
                        scope.set(to);
                        condition.eval(&mut scope)
                    }
                    None => {
                        let who = scope.state.who(between, OFF);
                        who != 0 && !scope.state.is_friend(who, mover as i32)
                    }
                };
                if !jumpable {
                    continue;
                }
                let actions = action_list![Action::Remove { site: between }, Action::MovePiece { from, to }];
                moves.push(Move::new(mover, from, to, actions).with_then(self.then.as_ref()));
            }
        }
        moves
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Moves a piece of the mover up to `distance` sites in one direction, stopping at the edge of
/// the board. The distance is evaluated with `From` bound to the origin.
#[derive(Debug)]
pub struct Slide {
    pub from: RegionFn,
    pub direction: Direction,
    pub distance: IntFn,
    pub then: Option<Then>,
}

impl Ludeme for Slide {
    fn children(&self) -> Children<'_> {
        children![self.from, self.distance, self.then]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::StepDecision.into()
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::From.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl MovesGenerator for Slide {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let mover = context.state.mover();
        let board = context.game.info.board;
        let region = self.from.eval(context);
        let mut moves = MoveList::new();
        let mut scope = context.bind(EvalContextData::From, OFF);
        for from in region.iter() {
            if scope.state.who(from, OFF) != mover as i32 {
                continue;
            }
            scope.set(from);
            let distance = self.distance.eval(&mut scope);
            let mut to = from;
            for _ in 0..distance.max(0) {
                match board.step(to, self.direction) {
                    Some(next) => to = next,
                    None => break,
                }
            }
            if to == from || !scope.state.is_empty(to) {
                continue;
            }
            let m = Move::new(mover, from, to, action_list![Action::MovePiece { from, to }]);
            moves.push(m.with_then(self.then.as_ref()));
        }
        moves
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

#[derive(Debug, Default)]
pub struct Pass {
    pub then: Option<Then>,
}

impl Ludeme for Pass {
    fn children(&self) -> Children<'_> {
        children![self.then]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Pass.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::PassDecision.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl MovesGenerator for Pass {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        vec![Move::pass(context.state.mover()).with_then(self.then.as_ref())]
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Sets the player who moves after the current turn.
#[derive(Debug)]
pub struct SetNextPlayer {
    pub player: IntFn,
    pub then: Option<Then>,
}

impl Ludeme for SetNextPlayer {
    fn children(&self) -> Children<'_> {
        children![self.player, self.then]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::SetNextPlayer.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl MovesGenerator for SetNextPlayer {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let player = self.player.eval(context);
        if !context.state.is_player(player) {
            return MoveList::new();
        }
        let actions = action_list![Action::SetNextPlayer { player: player as u8 }];
        vec![Move::new(context.state.mover(), OFF, OFF, actions).with_then(self.then.as_ref())]
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

#[derive(Debug)]
pub struct SetScore {
    pub player: IntFn,
    pub score: IntFn,
    pub then: Option<Then>,
}

impl Ludeme for SetScore {
    fn children(&self) -> Children<'_> {
        children![self.player, self.score, self.then]
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

impl MovesGenerator for SetScore {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let player = self.player.eval(context);
        if !context.state.is_player(player) {
            return MoveList::new();
        }
        let score = self.score.eval(context);
        let actions = action_list![Action::SetScore {
            player: player as u8,
            score
        }];
        vec![Move::new(context.state.mover(), OFF, OFF, actions).with_then(self.then.as_ref())]
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

#[derive(Debug)]
pub struct SetPending {
    pub value: IntFn,
    pub then: Option<Then>,
}

impl Ludeme for SetPending {
    fn children(&self) -> Children<'_> {
        children![self.value, self.then]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::PendingValues.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::SetPending.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl MovesGenerator for SetPending {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let value = self.value.eval(context);
        let actions = action_list![Action::SetPending { value }];
        vec![Move::new(context.state.mover(), OFF, OFF, actions).with_then(self.then.as_ref())]
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Adds a player to a team. Teams are numbered from 1 up to the number of players.
#[derive(Debug)]
pub struct AddToTeam {
    pub team: u8,
    pub player: IntFn,
    pub then: Option<Then>,
}

impl Ludeme for AddToTeam {
    fn children(&self) -> Children<'_> {
        children![self.player, self.then]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Team.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Team.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        if self.team == 0 || self.team > game.info.num_players {
            report.add_requirement(self.name(), format!("team {} does not exist", self.team));
            return true;
        }
        false
    }
}

impl MovesGenerator for AddToTeam {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let player = self.player.eval(context);
        if !context.state.is_player(player) {
            return MoveList::new();
        }
        let actions = action_list![Action::AddToTeam {
            team: self.team,
            player: player as u8
        }];
        vec![Move::new(context.state.mover(), OFF, OFF, actions).with_then(self.then.as_ref())]
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Rolls all dice.
#[derive(Debug, Default)]
pub struct Roll {
    pub then: Option<Then>,
}

impl Ludeme for Roll {
    fn children(&self) -> Children<'_> {
        children![self.then]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Stochastic.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        enum_set!(Concept::Roll | Concept::Dice)
    }

    fn node_is_static(&self) -> bool {
        false
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        check_dice(self.name(), game, report)
    }
}

impl MovesGenerator for Roll {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let m = Move::new(context.state.mover(), OFF, OFF, action_list![Action::Roll]);
        vec![m.with_then(self.then.as_ref())]
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Turns the top piece of a site owned by the mover into another component.
#[derive(Debug)]
pub struct Promote {
    pub site: IntFn,
    pub piece: String,
    pub then: Option<Then>,
    what: OnceLock<u16>,
}

impl Promote {
    pub fn new<S: Into<String>>(site: IntFn, piece: S) -> Self {
        Self {
            site,
            piece: piece.into(),
            then: None,
            what: OnceLock::new(),
        }
    }
}

impl Ludeme for Promote {
    fn children(&self) -> Children<'_> {
        children![self.site, self.then]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::PromotionEffect.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        check_component(self.name(), &self.piece, game, report)
    }

    fn resolve_defaults(&self, info: &GameInfo) {
        if let Some(what) = info.component_index(&self.piece) {
            let _ = self.what.set(what);
        }
    }
}

impl MovesGenerator for Promote {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let Some(&what) = self.what.get() else {
            return MoveList::new();
        };
        let site = self.site.eval(context);
        let mover = context.state.mover();
        if context.state.who(site, OFF) != mover as i32 {
            return MoveList::new();
        }
        let m = Move::new(mover, site, site, action_list![Action::Promote { site, what }]);
        vec![m.with_then(self.then.as_ref())]
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}
