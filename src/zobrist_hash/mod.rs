/// Zobrist hashing of game states.
/// The Zobrist hash of a state is the XOR over all of its distinguishing features, such as:
/// - Site 12 holds, at level 0, a piece of component 2 owned by player 1
/// - Player 2 is the mover
///
/// The hash is updated for each incremental change of the state, so applying a move and
/// undoing it restores the original hash exactly.
///
/// Wikipedia: https://en.wikipedia.org/wiki/Zobrist_hashing
/// Chess Programming Wiki: https://www.chessprogramming.org/Zobrist_Hashing
///
/// # Positional and situational hashes
/// The positional hash only covers the contents of the board. The situational hash also
/// covers whose turn it is, scores, pending values, teams and dice. Repetition rules
/// pick one of the two.
///
/// ```text
/// situational(s) := positional(s) xor turn(s) xor scores(s) xor pending(s) xor ...
/// ```
///
/// ## Ordered lists
/// Stacks and pending values are ordered, their features are tupled with the index:
/// ```text
/// features(xs: List<F>): Set<(F, number)> := { (e, index) | (index, e) in enumerate(xs) }
/// ```
use crate::state::State;

#[cfg(feature = "hash128")]
pub type HashValue = u128;

#[cfg(not(feature = "hash128"))]
pub type HashValue = u64;

/// Mutation methods for `State` that maintain both hashes.
///
/// # Hash coherence
/// The `State` is hash coherent if and only if the incrementally-updated hashes are
/// identical to the recomputed ones.
///
/// ```text
/// let incremental = state.situational_hash();
/// let recomputed = { state.rehash(); state.situational_hash() };
/// assert_eq!(incremental, recomputed);
/// ```
pub(crate) mod state_mutation;

pub(crate) mod hash_provider;

pub(crate) use hash_provider::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZobristHasher(pub HashValue);

impl ZobristHasher {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn combine(&mut self, Self(v): Self) {
        self.0 ^= v
    }

    #[inline]
    pub fn hash(&mut self, v: HashValue) {
        self.0 ^= v
    }

    #[inline]
    pub fn finish(self) -> HashValue {
        self.0
    }
}

impl State {
    /// Hash of the board contents, maintained incrementally.
    #[inline]
    pub fn positional_hash(&self) -> HashValue {
        self._positional.finish()
    }

    /// Hash of the board contents and the situation (turn, scores, pending values, teams, dice).
    #[inline]
    pub fn situational_hash(&self) -> HashValue {
        self._positional.finish() ^ self._situation.finish()
    }

    /// Recompute the positional hash from scratch without updating `self`.
    pub fn positional_zobrist_hash(&self, h: &mut ZobristHasher) {
        for (site, stack) in self.board.stacks().iter().enumerate() {
            for (level, piece) in stack.iter().enumerate() {
                h.hash(HASH_PROVIDER.piece(site, level, *piece));
            }
        }
        for (site, count) in self.board.counts().iter().enumerate() {
            h.hash(HASH_PROVIDER.count(site, *count));
        }
    }

    /// Recompute the situation part of the hash from scratch without updating `self`.
    pub fn situation_zobrist_hash(&self, h: &mut ZobristHasher) {
        h.hash(HASH_PROVIDER.turn(TurnRole::Mover, self.mover));
        h.hash(HASH_PROVIDER.turn(TurnRole::Next, self.next));
        h.hash(HASH_PROVIDER.turn(TurnRole::Prev, self.prev));
        for (player, score) in self.scores.iter().enumerate() {
            h.hash(HASH_PROVIDER.score(player, *score));
        }
        for (player, team) in self.teams.iter().enumerate() {
            h.hash(HASH_PROVIDER.team(player, *team));
        }
        for (index, value) in self.pending.iter().enumerate() {
            h.hash(HASH_PROVIDER.pending(index, *value));
        }
        for (index, die) in self.dice.iter().enumerate() {
            h.hash(HASH_PROVIDER.die(index, *die));
        }
    }

    /// Recompute the situational hash from scratch without updating `self`.
    pub fn zobrist_hash_full_recompute(&self, h: &mut ZobristHasher) {
        self.positional_zobrist_hash(h);
        self.situation_zobrist_hash(h);
    }

    /// Re-compute both hashes.
    /// Call this function after mutating the state manually (i.e. without using the methods in `state_mutation`).
    pub fn rehash(&mut self) {
        let mut p = ZobristHasher::new();
        self.positional_zobrist_hash(&mut p);
        let mut s = ZobristHasher::new();
        self.situation_zobrist_hash(&mut s);
        self._positional = p;
        self._situation = s;
    }
}
