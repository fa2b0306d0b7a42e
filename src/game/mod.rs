use thiserror::Error;

use crate::context::Context;
use crate::ludeme::end::EndRule;
use crate::ludeme::meta::NoRepeat;
use crate::ludeme::{Ludeme, MovesFn};
use crate::moves::{AppliedMove, Move, MoveList};
use crate::types::logging::{Event, EventLog};
use crate::types::*;

pub mod equipment;

pub use equipment::{Board, Component, Dice};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("game \"{name}\" rejected with {} diagnostic(s)", diagnostics.len())]
    Rejected { name: String, diagnostics: Vec<Diagnostic> },
    #[error("invalid equipment: {0}")]
    InvalidEquipment(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("the trial is over")]
    GameOver,
    #[error("the move is not legal in the current state")]
    IllegalMove,
}

/// Equipment and metadata of a compiled game.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameInfo {
    pub name: String,
    pub num_players: u8,
    pub board: Board,
    pub dice: Option<Dice>,
    /// Component `what` is at index `what - 1`.
    pub components: Vec<Component>,
    /// Default repetition type of repetition rules that do not name one.
    pub repetition: Option<RepetitionType>,
    /// Players of team `i + 1` at the start of a trial.
    pub teams: Vec<Vec<u8>>,
}

impl GameInfo {
    #[inline]
    pub fn num_dice(&self) -> usize {
        self.dice.map(|d| d.count as usize).unwrap_or(0)
    }

    pub fn component_index(&self, name: &str) -> Option<u16> {
        self.components
            .iter()
            .position(|c| c.name == name)
            .map(|i| i as u16 + 1)
    }

    #[inline]
    pub fn component(&self, what: i32) -> Option<&Component> {
        if what < 1 {
            return None;
        }
        self.components.get(what as usize - 1)
    }

    /// Value of component `what`, 0 for none.
    #[inline]
    pub fn component_value(&self, what: i32) -> i32 {
        self.component(what).map(|c| c.value).unwrap_or(0)
    }

    #[inline]
    pub fn component_owner(&self, what: i32) -> u8 {
        self.component(what).map(|c| c.owner).unwrap_or(0)
    }
}

#[derive(Debug, Default)]
pub struct Rules {
    /// Applied once by `Game::start`, without a turn change.
    pub start: Vec<MovesFn>,
    pub play: Option<MovesFn>,
    /// Checked in order after each committed move; the first that holds ends the trial.
    pub end: Vec<EndRule>,
    pub no_repeat: Option<NoRepeat>,
}

impl Rules {
    /// Roots of the rule tree.
    pub fn roots(&self) -> impl Iterator<Item = &dyn Ludeme> + '_ {
        let start = self.start.iter().map(|g| g.as_ludeme());
        let play = self.play.iter().map(|g| g.as_ludeme());
        let end = self.end.iter().map(|e| e as &dyn Ludeme);
        let meta = self.no_repeat.iter().map(|m| m as &dyn Ludeme);
        start.chain(play).chain(end).chain(meta)
    }
}

/// A compiled game. Immutable once built; shared by reference across contexts and threads.
#[derive(Debug)]
pub struct Game {
    pub info: GameInfo,
    pub rules: Rules,
    pub(crate) flags: GameFlags,
    pub(crate) concepts: Concepts,
    pub(crate) reads: ContextFields,
    pub(crate) writes: ContextFields,
    pub(crate) static_nodes: usize,
    pub(crate) report: Report,
    pub(crate) log: EventLog,
}

impl Game {
    #[inline]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    #[inline]
    pub fn game_flags(&self) -> GameFlags {
        self.flags
    }

    #[inline]
    pub fn concepts(&self) -> Concepts {
        self.concepts
    }

    #[inline]
    pub fn reads_eval_context(&self) -> ContextFields {
        self.reads
    }

    #[inline]
    pub fn writes_eval_context(&self) -> ContextFields {
        self.writes
    }

    /// Number of subtrees whose value was cached at load time.
    #[inline]
    pub fn static_nodes(&self) -> usize {
        self.static_nodes
    }

    /// Warnings gathered at load time. A built game has no errors.
    #[inline]
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Events of the load-time analysis, recorded when the builder enabled logging.
    #[inline]
    pub fn load_log(&self) -> &EventLog {
        &self.log
    }

    #[inline]
    pub fn uses_stochasticity(&self) -> bool {
        self.flags.contains(GameFlag::Stochastic)
    }

    /// Applies the start rules and records the initial state in the trial.
    pub fn start(&self, context: &mut Context<'_>) {
        for rule in &self.rules.start {
            let mover = context_mover(context);
            let moves = {
                let mut scope = context.bind(EvalContextData::Player, mover);
                rule.eval(&mut scope)
            };
            for m in moves {
                // Start moves are permanent, their undo records are not kept.
                let _applied = m.apply_effects(context, false);
            }
        }
        let state = &context.state;
        let (positional, situational) = (state.positional_hash(), state.situational_hash());
        context.trial.record_start(positional, situational);
    }

    /// Legal moves of the mover. Empty once the trial is over.
    pub fn moves(&self, context: &mut Context<'_>) -> MoveList {
        if context.trial.is_over() {
            return MoveList::new();
        }
        self.legal_moves(context)
    }

    /// Moves of the play rules for the mover, filtered by the meta rules. Values drawn while
    /// generating are part of the moves; the random generator is left as it was.
    pub(crate) fn legal_moves(&self, context: &mut Context<'_>) -> MoveList {
        let Some(play) = &self.rules.play else {
            return MoveList::new();
        };
        let rng = context.rng.clone();
        let mover = context_mover(context);
        let moves = {
            let mut scope = context.bind(EvalContextData::Player, mover);
            let mut moves = play.eval(&mut scope);
            if let Some(no_repeat) = &self.rules.no_repeat {
                moves.retain(|m| no_repeat.apply(&mut scope, m));
            }
            moves
        };
        context.rng = rng;
        moves
    }

    /// Commits `m`: applies it, checks the end rules for the mover, then changes the turn.
    pub fn apply(&self, context: &mut Context<'_>, m: &Move) -> AppliedMove {
        let mut applied = m.apply_effects(context, true);
        if !context.trial.is_over() {
            self.check_end(context, m.mover);
        }
        applied.finish(context);
        // Move generation leaves the generator untouched, so draws would repeat every turn.
        context.rng.advance();
        context.log.log_with(|| Event::MoveApplied {
            mover: m.mover,
            actions: m.actions.clone(),
        });
        applied
    }

    /// Like `apply`, for moves coming from outside the engine.
    pub fn apply_checked(&self, context: &mut Context<'_>, m: &Move) -> Result<AppliedMove, ApplyError> {
        if context.trial.is_over() {
            return Err(ApplyError::GameOver);
        }
        if !self.moves(context).contains(m) {
            return Err(ApplyError::IllegalMove);
        }
        Ok(self.apply(context, m))
    }

    fn check_end(&self, context: &mut Context<'_>, mover: u8) {
        let mut scope = context.bind(EvalContextData::Player, mover as i32);
        for rule in &self.rules.end {
            if let Some(status) = rule.check(&mut scope) {
                scope.trial.set_status(status);
                scope.log.log(Event::ResultDecided(status));
                return;
            }
        }
    }
}

#[inline]
fn context_mover(context: &Context<'_>) -> i32 {
    context.state.mover() as i32
}
