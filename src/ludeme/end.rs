use crate::children;
use crate::context::Context;
use crate::game::Game;
use crate::state::TrialStatus;
use crate::types::*;

use super::ints::check_role;
use super::*;

/// Ends the trial with `result` for the player of `role` once the condition holds.
#[derive(Debug)]
pub struct EndRule {
    pub condition: BoolFn,
    pub result: ResultType,
    pub role: RoleType,
}

impl EndRule {
    /// Status the trial ends with, if the condition holds.
    pub fn check(&self, context: &mut Context<'_>) -> Option<TrialStatus> {
        if !self.condition.eval(context) {
            return None;
        }
        let player = context.state.resolve_role(self.role);
        Some(match self.result {
            ResultType::Win => TrialStatus::Won(player),
            ResultType::Loss => TrialStatus::Lost(player),
            ResultType::Draw => TrialStatus::Draw,
        })
    }
}

impl Ludeme for EndRule {
    fn children(&self) -> Children<'_> {
        children![self.condition]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        match self.result {
            ResultType::Win => Concept::Win.into(),
            ResultType::Loss => Concept::Loss.into(),
            ResultType::Draw => Concept::Draw.into(),
        }
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        check_role(self.name(), self.role, game, report)
    }
}
