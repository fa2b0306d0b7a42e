use crate::game::Game;
use crate::moves::Then;
use crate::types::*;

use super::*;

impl Ludeme for Then {
    fn children(&self) -> Children<'_> {
        let mut children = Children::new();
        children.push(self.moves.as_ludeme());
        children
    }

    fn node_flags(&self, _: &Game) -> GameFlags {
        GameFlag::Consequences.into()
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Then.into()
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::From | EvalContextData::To
    }
}
