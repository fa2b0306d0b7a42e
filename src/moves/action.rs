use smallvec::SmallVec;

use crate::context::Context;
use crate::rng::RngState;
use crate::state::{Die, Piece, Turn};

/// Atomic reversible state edit.
///
/// Invalid sites or players turn an action into a no-op rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Pushes a piece on top of `site`.
    Add { site: i32, piece: Piece },
    /// Removes the top piece of `site`.
    Remove { site: i32 },
    /// Moves the top piece of `from` on top of `to`.
    MovePiece { from: i32, to: i32 },
    SetCount { site: i32, count: i32 },
    /// Sets the local state of the top piece of `site`.
    SetState { site: i32, state: u8 },
    /// Replaces the component of the top piece of `site`.
    Promote { site: i32, what: u16 },
    SetNextPlayer { player: u8 },
    SetScore { player: u8, score: i32 },
    SetPending { value: i32 },
    ClearPending,
    AddToTeam { team: u8, player: u8 },
    /// Rolls every die of the game. The undo record keeps the generator state, so undoing and
    /// applying again draws the same faces.
    Roll,
    UseDie { index: u8 },
    Pass,
}

/// Undo record of an applied `Action`. Holds what the action overwrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedAction {
    Add { site: i32 },
    Remove { site: i32, piece: Piece },
    MovePiece { from: i32, to: i32 },
    SetCount { site: i32, previous: i32 },
    ReplaceTop { site: i32, previous: Piece },
    SetNextPlayer { previous: u8 },
    SetScore { player: u8, previous: i32 },
    SetPending,
    ClearPending { previous: SmallVec<[i32; 4]> },
    AddToTeam { player: u8, previous: u8 },
    Roll { previous: SmallVec<[Die; 4]>, rng: RngState },
    SetDie { index: usize, previous: Die },
    Turn { previous: Turn },
    Noop,
}

impl Action {
    #[inline]
    pub fn is_capture(&self) -> bool {
        matches!(self, Self::Remove { .. })
    }

    pub fn apply(&self, context: &mut Context<'_>) -> AppliedAction {
        let state = &mut context.state;
        match *self {
            Action::Add { site, piece } => {
                if state.push_piece(site, piece) {
                    AppliedAction::Add { site }
                } else {
                    AppliedAction::Noop
                }
            }
            Action::Remove { site } => match state.pop_piece(site) {
                Some(piece) => AppliedAction::Remove { site, piece },
                None => AppliedAction::Noop,
            },
            Action::MovePiece { from, to } => {
                if !state.board().is_valid(to) {
                    return AppliedAction::Noop;
                }
                match state.pop_piece(from) {
                    Some(piece) => {
                        state.push_piece(to, piece);
                        AppliedAction::MovePiece { from, to }
                    }
                    None => AppliedAction::Noop,
                }
            }
            Action::SetCount { site, count } => match state.set_count(site, count) {
                Some(previous) => AppliedAction::SetCount { site, previous },
                None => AppliedAction::Noop,
            },
            Action::SetState { site, state: value } => match state.replace_top(site, |p| p.state = value) {
                Some(previous) => AppliedAction::ReplaceTop { site, previous },
                None => AppliedAction::Noop,
            },
            Action::Promote { site, what } => match state.replace_top(site, |p| p.what = what) {
                Some(previous) => AppliedAction::ReplaceTop { site, previous },
                None => AppliedAction::Noop,
            },
            Action::SetNextPlayer { player } => {
                if !state.is_player(player as i32) {
                    return AppliedAction::Noop;
                }
                AppliedAction::SetNextPlayer {
                    previous: state.set_next(player),
                }
            }
            Action::SetScore { player, score } => match state.set_score(player, score) {
                Some(previous) => AppliedAction::SetScore { player, previous },
                None => AppliedAction::Noop,
            },
            Action::SetPending { value } => {
                state.push_pending(value);
                AppliedAction::SetPending
            }
            Action::ClearPending => AppliedAction::ClearPending {
                previous: state.replace_pending(Default::default()),
            },
            Action::AddToTeam { team, player } => {
                if !state.is_player(player as i32) {
                    return AppliedAction::Noop;
                }
                match state.set_team(player, team) {
                    Some(previous) => AppliedAction::AddToTeam { player, previous },
                    None => AppliedAction::Noop,
                }
            }
            Action::Roll => {
                let faces = context.game.info.dice.map(|d| d.faces).unwrap_or(0);
                let previous: SmallVec<[Die; 4]> = context.state.dice().into();
                let rng = context.rng.clone();
                for index in 0..previous.len() {
                    let face = context.rng.roll(faces);
                    context.state.set_die(index, Die { face, used: false });
                }
                AppliedAction::Roll { previous, rng }
            }
            Action::UseDie { index } => {
                let index = index as usize;
                let Some(die) = state.dice().get(index).copied() else {
                    return AppliedAction::Noop;
                };
                match state.set_die(index, Die { used: true, ..die }) {
                    Some(previous) => AppliedAction::SetDie { index, previous },
                    None => AppliedAction::Noop,
                }
            }
            Action::Pass => AppliedAction::Noop,
        }
    }
}

impl AppliedAction {
    /// Restores what `Action::apply` overwrote, random generator included.
    pub fn undo(self, context: &mut Context<'_>) {
        let state = &mut context.state;
        match self {
            AppliedAction::Add { site } => {
                state.pop_piece(site);
            }
            AppliedAction::Remove { site, piece } => {
                state.push_piece(site, piece);
            }
            AppliedAction::MovePiece { from, to } => {
                if let Some(piece) = state.pop_piece(to) {
                    state.push_piece(from, piece);
                }
            }
            AppliedAction::SetCount { site, previous } => {
                state.set_count(site, previous);
            }
            AppliedAction::ReplaceTop { site, previous } => {
                state.replace_top(site, |p| *p = previous);
            }
            AppliedAction::SetNextPlayer { previous } => {
                state.set_next(previous);
            }
            AppliedAction::SetScore { player, previous } => {
                state.set_score(player, previous);
            }
            AppliedAction::SetPending => {
                state.pop_pending();
            }
            AppliedAction::ClearPending { previous } => {
                state.replace_pending(previous);
            }
            AppliedAction::AddToTeam { player, previous } => {
                state.set_team(player, previous);
            }
            AppliedAction::Roll { previous, rng } => {
                for (index, die) in previous.into_iter().enumerate() {
                    state.set_die(index, die);
                }
                context.rng = rng;
            }
            AppliedAction::SetDie { index, previous } => {
                state.set_die(index, previous);
            }
            AppliedAction::Turn { previous } => {
                state.set_turn(previous);
            }
            AppliedAction::Noop => {}
        }
    }
}
