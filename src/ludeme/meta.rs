use std::sync::OnceLock;

use crate::context::Context;
use crate::game::{Game, GameInfo};
use crate::moves::Move;
use crate::types::logging::Event;
use crate::types::*;

use super::booleans::repetition_concept;
use super::*;

/// Meta rule forbidding moves that lead back to a state already recorded in the trial.
/// The repetition type defaults to the game's metadata, or positional.
#[derive(Debug, Default)]
pub struct NoRepeat {
    pub repetition: Option<RepetitionType>,
    resolved: OnceLock<RepetitionType>,
}

impl NoRepeat {
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

    /// Whether `m` is allowed. The move is applied, the resulting hash looked up in the trial
    /// and the move undone, whatever the outcome.
    pub fn apply(&self, context: &mut Context<'_>, m: &Move) -> bool {
        let repetition = self.repetition();
        let applied = m.apply(context, false);
        let positional = context.state.positional_hash();
        let situational = context.state.situational_hash();
        let repeated = context.trial.contains(repetition, m.mover, positional, situational);
        applied.undo(context, false);
        if repeated {
            let hash = if repetition.is_situational() {
                situational
            } else {
                positional
            };
            context.log.log(Event::RepetitionRejected { mover: m.mover, hash });
        }
        !repeated
    }
}

impl Ludeme for NoRepeat {
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
