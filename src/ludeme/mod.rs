//! The node contract shared by every rule and expression of a compiled game.
//!
//! A node exposes per-node hooks (`node_*`) and gets the recursive analysis passes for free.
//! Typed sub-traits add `eval` against a shared `Context`.

use std::fmt::Debug;
use std::sync::OnceLock;

use smallvec::SmallVec;

use crate::context::Context;
use crate::game::{Game, GameInfo};
use crate::moves::{MoveList, Then};
use crate::types::{Concepts, ContextFields, GameFlags, IntArray, Region, Report};

macro_rules! impl_with_then {
    ($($Type: ident)+) => {
        $(
            impl $Type {
                /// Attaches a continuation to every generated move.
                pub fn with_then(self, then: Then) -> Self {
                    Self {
                        then: Some(then),
                        ..self
                    }
                }
            }
        )+
    };
}

pub mod arrays;
pub mod booleans;
pub mod combinators;
pub mod effects;
pub mod end;
pub mod filters;
pub mod floats;
pub mod ints;
pub mod meta;
pub mod prelude;
pub mod regions;
pub mod then;
pub mod umbrella;

pub type Children<'a> = SmallVec<[&'a dyn Ludeme; 4]>;

/// Upcast to `&dyn Ludeme`, implemented for every sized node.
pub trait AsLudeme {
    fn as_ludeme(&self) -> &dyn Ludeme;
}

impl<T: Ludeme> AsLudeme for T {
    #[inline]
    fn as_ludeme(&self) -> &dyn Ludeme {
        self
    }
}

pub trait Ludeme: AsLudeme + Debug + Send + Sync {
    /// Short type name used in diagnostics.
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base)
    }

    fn children(&self) -> Children<'_> {
        SmallVec::new()
    }

    fn node_flags(&self, _game: &Game) -> GameFlags {
        GameFlags::empty()
    }

    fn node_concepts(&self, _game: &Game) -> Concepts {
        Concepts::empty()
    }

    /// Transient fields this node reads itself.
    fn node_reads(&self) -> ContextFields {
        ContextFields::empty()
    }

    /// Transient fields this node binds for its children.
    fn node_writes(&self) -> ContextFields {
        ContextFields::empty()
    }

    /// Whether this node's own computation is independent of the context.
    /// Nodes reading the state, the trial or the RNG return false.
    fn node_is_static(&self) -> bool {
        self.node_reads().is_empty()
    }

    fn node_missing_requirement(&self, _game: &Game, _report: &mut Report) -> bool {
        false
    }

    fn node_will_crash(&self, _game: &Game, _report: &mut Report) -> bool {
        false
    }

    /// Fills in parameters whose default depends on the finished game.
    fn resolve_defaults(&self, _info: &GameInfo) {}

    /// Evaluates a static node once and keeps the value. Returns true if a value was cached.
    fn cache_static(&self, _game: &Game) -> bool {
        false
    }

    fn game_flags(&self, game: &Game) -> GameFlags {
        self.children()
            .iter()
            .fold(self.node_flags(game), |acc, c| acc | c.game_flags(game))
    }

    fn concepts(&self, game: &Game) -> Concepts {
        self.children()
            .iter()
            .fold(self.node_concepts(game), |acc, c| acc | c.concepts(game))
    }

    fn reads_eval_context_recursive(&self) -> ContextFields {
        self.children()
            .iter()
            .fold(self.node_reads(), |acc, c| acc | c.reads_eval_context_recursive())
    }

    fn writes_eval_context_recursive(&self) -> ContextFields {
        self.children()
            .iter()
            .fold(self.node_writes(), |acc, c| acc | c.writes_eval_context_recursive())
    }

    fn is_static(&self) -> bool {
        self.node_is_static() && self.children().iter().all(|c| c.is_static())
    }

    /// Every child is checked so the report lists all problems.
    fn missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        let mut missing = self.node_missing_requirement(game, report);
        for c in self.children() {
            missing |= c.missing_requirement(game, report);
        }
        missing
    }

    fn will_crash(&self, game: &Game, report: &mut Report) -> bool {
        let mut crash = self.node_will_crash(game, report);
        for c in self.children() {
            crash |= c.will_crash(game, report);
        }
        crash
    }

    /// Load-time pass: defaults, then children, then the constant cache.
    /// Returns the number of nodes that cached a value.
    fn preprocess(&self, game: &Game) -> usize {
        self.resolve_defaults(&game.info);
        let mut cached = 0;
        for c in self.children() {
            cached += c.preprocess(game);
        }
        if self.is_static() && self.cache_static(game) {
            cached += 1;
        }
        cached
    }
}

pub trait BooleanFunction: Ludeme {
    fn eval(&self, context: &mut Context<'_>) -> bool;
}

pub trait IntFunction: Ludeme {
    fn eval(&self, context: &mut Context<'_>) -> i32;
}

pub trait FloatFunction: Ludeme {
    fn eval(&self, context: &mut Context<'_>) -> f32;
}

pub trait IntArrayFunction: Ludeme {
    fn eval(&self, context: &mut Context<'_>) -> IntArray;
}

pub trait RegionFunction: Ludeme {
    fn eval(&self, context: &mut Context<'_>) -> Region;
}

pub trait MovesGenerator: Ludeme {
    fn eval(&self, context: &mut Context<'_>) -> MoveList;

    /// Continuation attached to every generated move.
    fn then(&self) -> Option<&Then> {
        None
    }
}

/// Appends `then` to every move of the list.
pub(crate) fn with_consequence(moves: MoveList, then: Option<&Then>) -> MoveList {
    match then {
        Some(_) => moves.into_iter().map(|m| m.with_then(then)).collect(),
        None => moves,
    }
}

pub type BoolFn = Box<dyn BooleanFunction>;
pub type IntFn = Box<dyn IntFunction>;
pub type FloatFn = Box<dyn FloatFunction>;
pub type ArrayFn = Box<dyn IntArrayFunction>;
pub type RegionFn = Box<dyn RegionFunction>;
pub type MovesFn = Box<dyn MovesGenerator>;

/// Value of a static node, written once at load time.
#[derive(Debug, Default)]
pub struct Precomputed<T>(OnceLock<T>);

impl<T: Clone> Precomputed<T> {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get(&self) -> Option<T> {
        self.0.get().cloned()
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.get().is_some()
    }

    /// Returns false if a value was already cached.
    #[inline]
    pub fn set(&self, value: T) -> bool {
        self.0.set(value).is_ok()
    }
}

/// Scratch context used to evaluate static nodes at load time.
#[inline]
pub(crate) fn scratch_context(game: &Game) -> Context<'_> {
    Context::new(game)
}

/// Children list from nodes and optional nodes.
#[macro_export]
macro_rules! children {
    ($($e: expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut v: $crate::ludeme::Children<'_> = $crate::smallvec::SmallVec::new();
        $( $crate::ludeme::PushChild::push_child(&$e, &mut v); )*
        v
    }};
}

/// Something that contributes zero or more children to a `Children` list.
pub trait PushChild {
    fn push_child<'a>(&'a self, children: &mut Children<'a>);
}

impl<T: ?Sized + Ludeme> PushChild for Box<T> {
    #[inline]
    fn push_child<'a>(&'a self, children: &mut Children<'a>) {
        children.push((**self).as_ludeme());
    }
}

impl<T: PushChild> PushChild for Option<T> {
    #[inline]
    fn push_child<'a>(&'a self, children: &mut Children<'a>) {
        if let Some(c) = self {
            c.push_child(children);
        }
    }
}

impl<T: PushChild> PushChild for Vec<T> {
    #[inline]
    fn push_child<'a>(&'a self, children: &mut Children<'a>) {
        for c in self {
            c.push_child(children);
        }
    }
}

impl PushChild for Then {
    #[inline]
    fn push_child<'a>(&'a self, children: &mut Children<'a>) {
        children.push(self);
    }
}
