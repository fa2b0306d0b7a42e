use std::sync::Arc;

use smallvec::SmallVec;

use crate::context::Context;
use crate::data_structures::{ActionList, StepList};
use crate::game::Game;
use crate::ludeme::MovesGenerator;
use crate::rng::RngState;
use crate::state::TrialStatus;
use crate::types::logging::Event;
use crate::types::{EvalContextData, OFF};

pub mod action;

pub use action::{Action, AppliedAction};

pub type MoveList = Vec<Move>;

/// Consequences are not expanded past this depth.
const MAX_CONSEQUENCE_DEPTH: u8 = 8;

/// Continuation attached to generated moves and evaluated when the move is applied,
/// with `From` and `To` bound to the move.
#[derive(Debug, Clone)]
pub struct Then {
    pub moves: Arc<dyn MovesGenerator>,
}

impl Then {
    pub fn new<T: MovesGenerator + 'static>(moves: T) -> Self {
        Self { moves: Arc::new(moves) }
    }
}

impl PartialEq for Then {
    fn eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.moves) as *const () == Arc::as_ptr(&other.moves) as *const ()
    }
}

impl Eq for Then {}

/// A decision of the mover: an ordered list of actions plus lazily evaluated consequences.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub mover: u8,
    /// Origin site, `OFF` if the move has none.
    pub from: i32,
    /// Target site, `OFF` if the move has none.
    pub to: i32,
    pub actions: ActionList<Action>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub then: SmallVec<[Then; 1]>,
}

impl Move {
    pub fn new(mover: u8, from: i32, to: i32, actions: ActionList<Action>) -> Self {
        Self {
            mover,
            from,
            to,
            actions,
            then: Default::default(),
        }
    }

    pub fn pass(mover: u8) -> Self {
        Self::new(mover, OFF, OFF, crate::action_list![Action::Pass])
    }

    pub fn with_then(mut self, then: Option<&Then>) -> Self {
        if let Some(then) = then {
            self.then.push(then.clone());
        }
        self
    }

    #[inline]
    pub fn is_pass(&self) -> bool {
        self.actions.iter().all(|a| matches!(a, Action::Pass))
    }

    /// Captures made by the decision itself. Consequences are not expanded.
    #[inline]
    pub fn num_captures(&self) -> i32 {
        self.actions.iter().filter(|a| a.is_capture()).count() as i32
    }

    /// Sum of the component values of the pieces the decision captures, looked up in `context`.
    pub fn captured_value(&self, context: &Context<'_>) -> i32 {
        let game = context.game;
        self.actions
            .iter()
            .filter_map(|a| match a {
                Action::Remove { site } => Some(context.state.what(*site, OFF)),
                _ => None,
            })
            .map(|what| game.info.component_value(what))
            .sum()
    }

    /// Applies the move, its consequences and the turn change. When `store` is set, the move is
    /// recorded in the trial history.
    pub fn apply(&self, context: &mut Context<'_>, store: bool) -> AppliedMove {
        let mut applied = self.apply_effects(context, store);
        applied.finish(context);
        applied
    }

    /// Applies actions and consequences without changing the turn.
    pub(crate) fn apply_effects(&self, context: &mut Context<'_>, store: bool) -> AppliedMove {
        let status = context.trial.status();
        let rng = context.rng.clone();
        if store {
            context.trial.push(self.mover, self.actions.clone());
        }
        let mut steps = StepList::new();
        self.apply_into(context, &mut steps, 0);
        AppliedMove {
            mover: self.mover,
            actions: self.actions.clone(),
            steps,
            status,
            stored: store,
            rng,
        }
    }

    fn apply_into(&self, context: &mut Context<'_>, steps: &mut StepList<AppliedAction>, depth: u8) {
        for action in &self.actions {
            steps.push(action.apply(context));
        }
        if self.then.is_empty() || depth >= MAX_CONSEQUENCE_DEPTH {
            return;
        }
        let mut from = context.bind(EvalContextData::From, self.from);
        let mut scope = from.bind(EvalContextData::To, self.to);
        for then in &self.then {
            for consequence in then.moves.eval(&mut scope) {
                consequence.apply_into(&mut scope, steps, depth + 1);
            }
        }
    }
}

/// Undo record of an applied `Move`. Consumed by `undo`, so a move can only be undone once
/// and only after it was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct AppliedMove {
    pub mover: u8,
    pub actions: ActionList<Action>,
    steps: StepList<AppliedAction>,
    status: TrialStatus,
    stored: bool,
    /// Generator state before the move, so draws made by consequences are undone too.
    rng: RngState,
}

impl AppliedMove {
    #[inline]
    pub fn steps(&self) -> &[AppliedAction] {
        &self.steps
    }

    /// Number of pieces removed, consequences included.
    pub fn num_captures(&self) -> i32 {
        self.steps
            .iter()
            .filter(|s| matches!(s, AppliedAction::Remove { .. }))
            .count() as i32
    }

    /// Sum of the component values of all removed pieces, consequences included.
    pub fn captured_value(&self, game: &Game) -> i32 {
        self.steps
            .iter()
            .filter_map(|s| match s {
                AppliedAction::Remove { piece, .. } => Some(game.info.component_value(piece.what as i32)),
                _ => None,
            })
            .sum()
    }

    /// Advances the turn and completes the trial entry.
    pub(crate) fn finish(&mut self, context: &mut Context<'_>) {
        let previous = context.state.advance_turn();
        self.steps.push(AppliedAction::Turn { previous });
        if self.stored {
            let state = &context.state;
            context.trial.finalise(state.positional_hash(), state.situational_hash());
        }
    }

    /// Reverts the move in reverse order. With `discard`, the trial entry recorded by `apply` is
    /// removed as well.
    pub fn undo(self, context: &mut Context<'_>, discard: bool) {
        let Self {
            mover,
            actions,
            steps,
            status,
            stored,
            rng,
        } = self;
        for step in steps.into_iter().rev() {
            step.undo(context);
        }
        context.rng = rng;
        if stored && discard {
            context.trial.pop();
        }
        context.trial.set_status(status);
        if stored {
            context.log.log_with(|| Event::MoveUndone { mover, actions });
        }
    }
}
