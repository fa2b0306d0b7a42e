use crate::children;
use crate::context::Context;
use crate::game::Game;
use crate::types::*;

use super::*;

#[derive(Debug, Clone)]
pub struct IntArrayConstant(pub IntArray);

impl Ludeme for IntArrayConstant {}

impl IntArrayFunction for IntArrayConstant {
    #[inline]
    fn eval(&self, _: &mut Context<'_>) -> IntArray {
        self.0.clone()
    }
}

/// Integers from `min` to `max` inclusive, empty if `max < min`.
#[derive(Debug)]
pub struct IntRange {
    pub min: IntFn,
    pub max: IntFn,
    pub precomputed: Precomputed<IntArray>,
}

impl IntRange {
    pub fn new(min: IntFn, max: IntFn) -> Self {
        Self {
            min,
            max,
            precomputed: Precomputed::new(),
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> IntArray {
        let min = self.min.eval(context);
        let max = self.max.eval(context);
        (min..=max).collect()
    }
}

impl Ludeme for IntRange {
    fn children(&self) -> Children<'_> {
        children![self.min, self.max]
    }

    fn cache_static(&self, game: &Game) -> bool {
        let mut context = scratch_context(game);
        self.precomputed.set(self.compute(&mut context))
    }
}

impl IntArrayFunction for IntRange {
    fn eval(&self, context: &mut Context<'_>) -> IntArray {
        if let Some(v) = self.precomputed.get() {
            return v;
        }
        self.compute(context)
    }
}

/// Sites of a region, ascending.
#[derive(Debug)]
pub struct RegionSites(pub RegionFn);

impl Ludeme for RegionSites {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }
}

impl IntArrayFunction for RegionSites {
    fn eval(&self, context: &mut Context<'_>) -> IntArray {
        self.0.eval(context).sites().into()
    }
}
