use smallvec::SmallVec;

use crate::data_structures::PlayerVec;
use crate::types::{RoleType, OFF};
use crate::zobrist_hash::ZobristHasher;

pub mod container_state;
pub mod trial;

pub use container_state::{ContainerState, Piece, Stack};
pub use trial::{Trial, TrialEntry, TrialStatus};

/// Whose turn it is, and around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn {
    pub mover: u8,
    pub next: u8,
    pub prev: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Die {
    /// Face shown, 0 before the first roll.
    pub face: u8,
    pub used: bool,
}

/// Mutable game state of one trial.
///
/// Fields are only mutated through the setters in `zobrist_hash::state_mutation`, which
/// keep the positional and situational hashes up to date.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    pub(crate) num_players: u8,
    pub(crate) mover: u8,
    pub(crate) next: u8,
    pub(crate) prev: u8,
    pub(crate) board: ContainerState,
    /// Indexed by player, index 0 unused.
    pub(crate) scores: PlayerVec<i32>,
    /// Team of each player, 0 when the player has not joined one.
    pub(crate) teams: PlayerVec<u8>,
    pub(crate) pending: SmallVec<[i32; 4]>,
    pub(crate) dice: SmallVec<[Die; 4]>,
    pub(crate) _positional: ZobristHasher,
    pub(crate) _situation: ZobristHasher,
}

impl State {
    pub fn new(num_players: u8, num_sites: usize, num_dice: usize) -> Self {
        let mut state = Self {
            num_players,
            mover: 1,
            next: if num_players > 1 { 2 } else { 1 },
            prev: 0,
            board: ContainerState::new(num_sites),
            scores: smallvec::smallvec![0; num_players as usize + 1],
            teams: smallvec::smallvec![0; num_players as usize + 1],
            pending: Default::default(),
            dice: smallvec::smallvec![Die::default(); num_dice],
            _positional: Default::default(),
            _situation: Default::default(),
        };
        state.rehash();
        state
    }

    #[inline]
    pub fn num_players(&self) -> u8 {
        self.num_players
    }

    #[inline]
    pub fn mover(&self) -> u8 {
        self.mover
    }

    #[inline]
    pub fn next(&self) -> u8 {
        self.next
    }

    #[inline]
    pub fn prev(&self) -> u8 {
        self.prev
    }

    #[inline]
    pub fn turn(&self) -> Turn {
        Turn {
            mover: self.mover,
            next: self.next,
            prev: self.prev,
        }
    }

    /// Player after `player` in seating order.
    #[inline]
    pub fn successor(&self, player: u8) -> u8 {
        if self.num_players == 0 {
            return 0;
        }
        player % self.num_players + 1
    }

    #[inline]
    pub fn is_player(&self, player: i32) -> bool {
        player >= 1 && player <= self.num_players as i32
    }

    /// Resolves a role to a player index. `Shared` is 0.
    #[inline]
    pub fn resolve_role(&self, role: RoleType) -> u8 {
        match role {
            RoleType::Mover => self.mover,
            RoleType::Next => self.next,
            RoleType::Prev => self.prev,
            RoleType::Shared => 0,
            RoleType::Player(p) => p,
        }
    }

    #[inline]
    pub fn board(&self) -> &ContainerState {
        &self.board
    }

    /// Component at `level` of `site` (`OFF` for the top), 0 if empty or invalid.
    #[inline]
    pub fn what(&self, site: i32, level: i32) -> i32 {
        self.board.piece(site, level).map(|p| p.what as i32).unwrap_or(0)
    }

    /// Owner at `level` of `site` (`OFF` for the top), 0 if empty or invalid.
    #[inline]
    pub fn who(&self, site: i32, level: i32) -> i32 {
        self.board.piece(site, level).map(|p| p.who as i32).unwrap_or(0)
    }

    /// Local state at `level` of `site` (`OFF` for the top), `OFF` if empty or invalid.
    #[inline]
    pub fn site_state(&self, site: i32, level: i32) -> i32 {
        self.board.piece(site, level).map(|p| p.state as i32).unwrap_or(OFF)
    }

    #[inline]
    pub fn size_stack(&self, site: i32) -> i32 {
        self.board.size_stack(site)
    }

    #[inline]
    pub fn count(&self, site: i32) -> i32 {
        self.board.count(site)
    }

    #[inline]
    pub fn is_empty(&self, site: i32) -> bool {
        self.board.is_empty(site)
    }

    /// Score of `player`, 0 for an unknown player.
    #[inline]
    pub fn score(&self, player: i32) -> i32 {
        if player < 0 {
            return 0;
        }
        self.scores.get(player as usize).copied().unwrap_or(0)
    }

    #[inline]
    pub fn team_of(&self, player: i32) -> u8 {
        if player < 0 {
            return 0;
        }
        self.teams.get(player as usize).copied().unwrap_or(0)
    }

    /// Same player, or both in the same team.
    #[inline]
    pub fn is_friend(&self, a: i32, b: i32) -> bool {
        if a <= 0 || b <= 0 {
            return false;
        }
        if a == b {
            return true;
        }
        let team = self.team_of(a);
        team != 0 && team == self.team_of(b)
    }

    #[inline]
    pub fn pending(&self) -> &[i32] {
        &self.pending
    }

    #[inline]
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Sum of the faces of the dice not used yet.
    #[inline]
    pub fn dice_total(&self) -> i32 {
        self.dice.iter().filter(|d| !d.used).map(|d| d.face as i32).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successor_wraps_around() {
        let s = State::new(3, 4, 0);
        assert_eq!(2, s.successor(1));
        assert_eq!(1, s.successor(3));
        assert_eq!(Turn { mover: 1, next: 2, prev: 0 }, s.turn());
    }

    #[test]
    fn test_resolve_role() {
        let s = State::new(2, 4, 0);
        assert_eq!(1, s.resolve_role(RoleType::Mover));
        assert_eq!(2, s.resolve_role(RoleType::Next));
        assert_eq!(0, s.resolve_role(RoleType::Shared));
        assert_eq!(2, s.resolve_role(RoleType::Player(2)));
    }

    #[test]
    fn test_unknown_players_have_no_score_or_team() {
        let s = State::new(2, 4, 0);
        assert_eq!(0, s.score(7));
        assert_eq!(0, s.team_of(-1));
        assert!(!s.is_friend(0, 1));
        assert!(s.is_friend(2, 2));
        assert!(!s.is_friend(1, 2));
    }
}
