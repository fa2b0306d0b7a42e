#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![doc = include_str!("../README.md")]

/// Module containing collection datatypes used by this crate.
pub mod data_structures;

/// Enums, flag sets and diagnostics shared by every layer.
pub mod types;

/// Pseudorandom number generation
pub mod rng;

/// Board, trial history and the mutable game state.
pub mod state;

pub(crate) mod zobrist_hash;

/// Compiled games: equipment, rules and the load-time analysis results.
pub mod game;

/// Evaluation context and its scope guards.
pub mod context;

/// Moves, actions and their undo records.
pub mod moves;

/// The rule-tree node catalogue.
pub mod ludeme;

/// Builder for `Game`s
pub mod builder;

/// Built-in games.
pub mod demo;

/// Re-exports the `smallvec` crate
pub use smallvec;

/// Re-exports the `rand` create
pub use rand;

/// Re-exports the `enum_map` crate
pub use enum_map;

/// Re-exports the `thiserror` crate
pub use thiserror;

/// Re-exports the `enumset` crate
pub use enumset;

pub mod prelude {
    pub use crate::builder::GameBuilder;
    pub use crate::context::{Context, ContextBuilder, Scoped};
    pub use crate::game::{ApplyError, Board, Component, Dice, Game, GameInfo, LoadError, Rules};
    pub use crate::moves::{Action, AppliedAction, AppliedMove, Move, MoveList, Then};
    pub use crate::rng::RngState;
    pub use crate::state::{ContainerState, Piece, State, Trial, TrialEntry, TrialStatus, Turn};
    pub use crate::types::logging::{Event, EventLog};
    pub use crate::types::*;
    pub use crate::zobrist_hash::HashValue;

    // Modules
    pub use crate::demo;
    pub use crate::ludeme::prelude as rules;
}

#[cfg(test)]
mod tests;
