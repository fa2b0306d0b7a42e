use std::hash::{Hash, Hasher};

use lazy_static::lazy_static;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rustc_hash::FxHasher;

use crate::state::{Die, Piece};

use super::HashValue;

/// Random seed used to compute Zobrist hashes.
const SEED: u64 = 1200;

/// Sites covered by the pre-computed piece table.
pub const SITE_COUNT: usize = 128;
/// Components covered by the pre-computed piece table (index 0 unused).
pub const WHAT_COUNT: usize = 16;
/// Players covered by the pre-computed tables (index 0 is the shared player).
pub const PLAYER_COUNT: usize = 8;
/// Stack levels distinguished by rotation before falling back to `FxHash`.
pub const LEVEL_COUNT: usize = 32;

lazy_static! {
    /// The default instance for the `HashProvider`.
    pub static ref HASH_PROVIDER: HashProvider = HashProvider::new();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnRole {
    Mover = 0,
    Next = 1,
    Prev = 2,
}

/// Tags keeping the fallback hashes of different features apart.
#[derive(Hash)]
enum Tag {
    Piece,
    Count,
    Turn,
    Score,
    Team,
    Pending,
    Die,
}

/// Contains pre-computed Zobrist hashes of individual features of a `State`.
/// The random seed used to compute these hashes is `SEED`.
///
/// If there is an index overflow, a hash based on `FxHash` will be computed instead.
pub struct HashProvider {
    pub piece_hashes: Vec<[[HashValue; PLAYER_COUNT]; WHAT_COUNT]>,
    pub turn_hashes: [[HashValue; PLAYER_COUNT]; 3],
    pub team_hashes: [[HashValue; PLAYER_COUNT]; PLAYER_COUNT],
}

macro_rules! rand_array {
    ( [ $($rest: expr);+ ] ; $count: expr ) => {
        {
            let mut arr: [_; $count] = Default::default();
            for i in 0 .. $count {
                arr[i] = rand_array![$($rest);+];
            }
            arr
        }
    };
    ($expr: expr ; $count: expr $(;)?) => {
        {
            let mut arr: [_; $count] = Default::default();
            for i in 0 .. $count {
                arr[i] = $expr;
            }
            arr
        }
    };
}

impl HashProvider {
    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(SEED);
        #[cfg(feature = "hash128")]
        macro_rules! random {
            () => {
                ((rng.next_u64() as u128) << 64) | (rng.next_u64() as u128)
            };
        }

        #[cfg(not(feature = "hash128"))]
        macro_rules! random {
            () => {
                rng.next_u64()
            };
        }

        let piece_hashes = (0..SITE_COUNT)
            .map(|_| rand_array![[random!(); PLAYER_COUNT]; WHAT_COUNT])
            .collect();
        let turn_hashes = rand_array![[random!(); PLAYER_COUNT]; 3];
        let team_hashes = rand_array![[random!(); PLAYER_COUNT]; PLAYER_COUNT];
        Self {
            piece_hashes,
            turn_hashes,
            team_hashes,
        }
    }

    #[inline]
    fn fallback<T: Hash>(tag: Tag, value: T) -> HashValue {
        let mut h = FxHasher::default();
        SEED.hash(&mut h);
        tag.hash(&mut h);
        value.hash(&mut h);
        h.finish() as HashValue
    }

    #[inline]
    pub fn piece(&self, site: usize, level: usize, piece: Piece) -> HashValue {
        let Piece { what, who, state } = piece;
        if site < SITE_COUNT
            && (what as usize) < WHAT_COUNT
            && (who as usize) < PLAYER_COUNT
            && level < LEVEL_COUNT
            && state == 0
        {
            return Self::with_index(self.piece_hashes[site][what as usize][who as usize], level);
        }
        Self::fallback(Tag::Piece, (site, level, what, who, state))
    }

    #[inline]
    pub fn count(&self, site: usize, count: i32) -> HashValue {
        if count == 0 {
            return 0;
        }
        Self::fallback(Tag::Count, (site, count))
    }

    #[inline]
    pub fn turn(&self, role: TurnRole, player: u8) -> HashValue {
        if (player as usize) < PLAYER_COUNT {
            return self.turn_hashes[role as usize][player as usize];
        }
        Self::fallback(Tag::Turn, (role, player))
    }

    #[inline]
    pub fn score(&self, player: usize, score: i32) -> HashValue {
        if score == 0 {
            return 0;
        }
        Self::fallback(Tag::Score, (player, score))
    }

    #[inline]
    pub fn team(&self, player: usize, team: u8) -> HashValue {
        if team == 0 {
            return 0;
        }
        if player < PLAYER_COUNT && (team as usize) < PLAYER_COUNT {
            return self.team_hashes[player][team as usize];
        }
        Self::fallback(Tag::Team, (player, team))
    }

    #[inline]
    pub fn pending(&self, index: usize, value: i32) -> HashValue {
        Self::fallback(Tag::Pending, (index, value))
    }

    #[inline]
    pub fn die(&self, index: usize, die: Die) -> HashValue {
        Self::fallback(Tag::Die, (index, die.face, die.used))
    }

    /// Given a hash value, modify it based on an "index" value.
    /// This function exists to avoid pre-computing Zobrist hash elements based on index.
    #[inline]
    pub fn with_index(hv: HashValue, index: usize) -> HashValue {
        if index <= 31 {
            hv.rotate_right(index as u32)
        } else {
            let mut h = FxHasher::default();
            hv.hash(&mut h);
            index.hash(&mut h);
            h.finish() as HashValue
        }
    }
}

impl Default for HashProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HashProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashProvider").finish()
    }
}
