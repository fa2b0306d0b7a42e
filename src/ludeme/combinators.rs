//! Structural composition of move generators. Iterating combinators bind one transient field
//! per element and restore it when they return.

use enumset::enum_set;

use crate::children;
use crate::context::Context;
use crate::game::Game;
use crate::moves::{Action, MoveList, Then};
use crate::types::*;

use super::ints::check_dice;
use super::*;

impl_with_then!(ForEachSite ForEachValue ForEachPlayer ForEachLevel ForEachDie MovesUnion IfMoves);

/// Moves of `generator` for each site of the region, `Site` bound to the site.
/// `otherwise` is evaluated only when no site produced a move.
#[derive(Debug)]
pub struct ForEachSite {
    pub region: RegionFn,
    pub generator: MovesFn,
    pub otherwise: Option<MovesFn>,
    pub then: Option<Then>,
}

impl Ludeme for ForEachSite {
    fn children(&self) -> Children<'_> {
        children![self.region, self.generator, self.otherwise, self.then]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::ForEachSite.into()
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::Site.into()
    }
}

impl MovesGenerator for ForEachSite {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let region = self.region.eval(context);
        let mut moves = MoveList::new();
        {
            let mut scope = context.bind(EvalContextData::Site, OFF);
            for site in region.iter() {
                scope.set(site);
                moves.extend(self.generator.eval(&mut scope));
            }
        }
        if moves.is_empty() {
            if let Some(otherwise) = &self.otherwise {
                moves = otherwise.eval(context);
            }
        }
        with_consequence(moves, self.then.as_ref())
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Moves of `generator` for each value of the array, `Value` bound to the value.
#[derive(Debug)]
pub struct ForEachValue {
    pub values: ArrayFn,
    pub generator: MovesFn,
    pub otherwise: Option<MovesFn>,
    pub then: Option<Then>,
}

impl Ludeme for ForEachValue {
    fn children(&self) -> Children<'_> {
        children![self.values, self.generator, self.otherwise, self.then]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::ForEachValue.into()
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::Value.into()
    }
}

impl MovesGenerator for ForEachValue {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let values = self.values.eval(context);
        let mut moves = MoveList::new();
        {
            let mut scope = context.bind(EvalContextData::Value, OFF);
            for value in values {
                scope.set(value);
                moves.extend(self.generator.eval(&mut scope));
            }
        }
        if moves.is_empty() {
            if let Some(otherwise) = &self.otherwise {
                moves = otherwise.eval(context);
            }
        }
        with_consequence(moves, self.then.as_ref())
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Moves of `generator` for each player in seating order, `Player` bound to the player.
#[derive(Debug)]
pub struct ForEachPlayer {
    pub generator: MovesFn,
    pub otherwise: Option<MovesFn>,
    pub then: Option<Then>,
}

impl Ludeme for ForEachPlayer {
    fn children(&self) -> Children<'_> {
        children![self.generator, self.otherwise, self.then]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::ForEachPlayer.into()
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::Player.into()
    }
}

impl MovesGenerator for ForEachPlayer {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let n = context.state.num_players() as i32;
        let mut moves = MoveList::new();
        {
            let mut scope = context.bind(EvalContextData::Player, OFF);
            for player in 1..=n {
                scope.set(player);
                moves.extend(self.generator.eval(&mut scope));
            }
        }
        if moves.is_empty() {
            if let Some(otherwise) = &self.otherwise {
                moves = otherwise.eval(context);
            }
        }
        with_consequence(moves, self.then.as_ref())
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Moves of `generator` for each level of the stack on a site, bottom first, `Level` bound to
/// the level.
#[derive(Debug)]
pub struct ForEachLevel {
    pub site: IntFn,
    pub generator: MovesFn,
    pub otherwise: Option<MovesFn>,
    pub then: Option<Then>,
}

impl Ludeme for ForEachLevel {
    fn children(&self) -> Children<'_> {
        children![self.site, self.generator, self.otherwise, self.then]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Stacking.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        enum_set!(Concept::ForEachLevel | Concept::Stacking)
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::Level.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }
}

impl MovesGenerator for ForEachLevel {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let site = self.site.eval(context);
        let size = context.state.size_stack(site);
        let mut moves = MoveList::new();
        {
            let mut scope = context.bind(EvalContextData::Level, OFF);
            for level in 0..size {
                scope.set(level);
                moves.extend(self.generator.eval(&mut scope));
            }
        }
        if moves.is_empty() {
            if let Some(otherwise) = &self.otherwise {
                moves = otherwise.eval(context);
            }
        }
        with_consequence(moves, self.then.as_ref())
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Moves of `generator` for each unused die, `Pips` bound to its face. Each move also marks the
/// die as used. Dice showing the same face are only tried once.
#[derive(Debug)]
pub struct ForEachDie {
    pub generator: MovesFn,
    pub then: Option<Then>,
}

impl Ludeme for ForEachDie {
    fn children(&self) -> Children<'_> {
        children![self.generator, self.then]
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Stochastic.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        enum_set!(Concept::ForEachDie | Concept::Dice)
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::Pips.into()
    }

    fn node_is_static(&self) -> bool {
        false
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        check_dice(self.name(), game, report)
    }
}

impl MovesGenerator for ForEachDie {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let dice: crate::data_structures::Vector<_> = context.state.dice().iter().copied().enumerate().collect();
        let mut moves = MoveList::new();
        let mut seen: crate::data_structures::Vector<u8> = Default::default();
        let mut scope = context.bind(EvalContextData::Pips, OFF);
        for (index, die) in dice {
            if die.used || seen.contains(&die.face) {
                continue;
            }
            seen.push(die.face);
            scope.set(die.face as i32);
            for mut m in self.generator.eval(&mut scope) {
                m.actions.push(Action::UseDie { index: index as u8 });
                moves.push(m);
            }
        }
        with_consequence(moves, self.then.as_ref())
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Concatenation of the moves of all generators, in order.
#[derive(Debug)]
pub struct MovesUnion {
    pub moves: Vec<MovesFn>,
    pub then: Option<Then>,
}

impl Ludeme for MovesUnion {
    fn children(&self) -> Children<'_> {
        children![self.moves, self.then]
    }
}

impl MovesGenerator for MovesUnion {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let mut moves = MoveList::new();
        for g in &self.moves {
            moves.extend(g.eval(context));
        }
        with_consequence(moves, self.then.as_ref())
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Moves of `moves` if the condition holds, of `otherwise` if not.
#[derive(Debug)]
pub struct IfMoves {
    pub condition: BoolFn,
    pub moves: MovesFn,
    pub otherwise: Option<MovesFn>,
    pub then: Option<Then>,
}

impl Ludeme for IfMoves {
    fn children(&self) -> Children<'_> {
        children![self.condition, self.moves, self.otherwise, self.then]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Conditional.into()
    }
}

impl MovesGenerator for IfMoves {
    fn eval(&self, context: &mut Context<'_>) -> MoveList {
        let moves = if self.condition.eval(context) {
            self.moves.eval(context)
        } else {
            match &self.otherwise {
                Some(otherwise) => otherwise.eval(context),
                None => MoveList::new(),
            }
        };
        with_consequence(moves, self.then.as_ref())
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}
