use crate::children;
use crate::context::Context;
use crate::game::Game;
use crate::types::*;

use super::booleans::compare_concept;
use super::*;

#[derive(Debug, Clone, Copy)]
pub struct FloatConstant(pub f32);

impl Ludeme for FloatConstant {}

impl FloatFunction for FloatConstant {
    #[inline]
    fn eval(&self, _: &mut Context<'_>) -> f32 {
        self.0
    }
}

#[derive(Debug)]
pub struct ToFloat(pub IntFn);

impl Ludeme for ToFloat {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }
}

impl FloatFunction for ToFloat {
    fn eval(&self, context: &mut Context<'_>) -> f32 {
        self.0.eval(context) as f32
    }
}

/// Quotient of two floats. A zero divisor yields `OFF`.
#[derive(Debug)]
pub struct FloatDiv {
    pub a: FloatFn,
    pub b: FloatFn,
    pub precomputed: Precomputed<f32>,
}

impl FloatDiv {
    pub fn new(a: FloatFn, b: FloatFn) -> Self {
        Self {
            a,
            b,
            precomputed: Precomputed::new(),
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> f32 {
        let a = self.a.eval(context);
        let b = self.b.eval(context);
        if b == 0.0 {
            return OFF as f32;
        }
        a / b
    }
}

impl Ludeme for FloatDiv {
    fn children(&self) -> Children<'_> {
        children![self.a, self.b]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Division.into()
    }

    fn node_will_crash(&self, game: &Game, report: &mut Report) -> bool {
        if !self.b.is_static() {
            return false;
        }
        let mut context = scratch_context(game);
        if self.b.eval(&mut context) == 0.0 {
            report.add_crash(self.name(), "division by a constant zero");
            return true;
        }
        false
    }

    fn cache_static(&self, game: &Game) -> bool {
        let mut context = scratch_context(game);
        self.precomputed.set(self.compute(&mut context))
    }
}

impl FloatFunction for FloatDiv {
    fn eval(&self, context: &mut Context<'_>) -> f32 {
        if let Some(v) = self.precomputed.get() {
            return v;
        }
        self.compute(context)
    }
}

#[derive(Debug)]
pub struct FloatCompare {
    pub op: CompareOp,
    pub a: FloatFn,
    pub b: FloatFn,
}

impl Ludeme for FloatCompare {
    fn children(&self) -> Children<'_> {
        children![self.a, self.b]
    }

    fn node_concepts(&self, _: &Game) -> Concepts {
        compare_concept(self.op).into()
    }
}

impl BooleanFunction for FloatCompare {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let a = self.a.eval(context);
        let b = self.b.eval(context);
        self.op.test(a, b)
    }
}
