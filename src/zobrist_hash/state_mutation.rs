use smallvec::SmallVec;

use crate::state::{Die, Piece, Stack, State, Turn};

use super::*;

impl State {
    #[inline]
    fn hash_stack(h: &mut ZobristHasher, site: usize, stack: &Stack) {
        for (level, piece) in stack.iter().enumerate() {
            h.hash(HASH_PROVIDER.piece(site, level, *piece));
        }
    }

    /// Runs `f` on the stack of `site`, re-hashing the whole stack around it.
    /// Returns `None` for an invalid site.
    #[inline]
    fn update_stack<R>(&mut self, site: i32, f: impl FnOnce(&mut Stack) -> R) -> Option<R> {
        if !self.board.is_valid(site) {
            return None;
        }
        let site = site as usize;
        let stack = self.board.stack_mut(site);
        Self::hash_stack(&mut self._positional, site, stack);
        let r = f(stack);
        Self::hash_stack(&mut self._positional, site, stack);
        Some(r)
    }

    #[inline]
    pub(crate) fn push_piece(&mut self, site: i32, piece: Piece) -> bool {
        self.update_stack(site, |s| s.push(piece)).is_some()
    }

    #[inline]
    pub(crate) fn pop_piece(&mut self, site: i32) -> Option<Piece> {
        self.update_stack(site, |s| s.pop()).flatten()
    }

    /// Replaces the top piece of `site`, returning the previous one.
    #[inline]
    pub(crate) fn replace_top(&mut self, site: i32, f: impl FnOnce(&mut Piece)) -> Option<Piece> {
        self.update_stack(site, |s| {
            let top = s.last_mut()?;
            let previous = *top;
            f(top);
            Some(previous)
        })
        .flatten()
    }

    #[inline]
    pub(crate) fn set_count(&mut self, site: i32, count: i32) -> Option<i32> {
        if !self.board.is_valid(site) {
            return None;
        }
        let site = site as usize;
        let c = self.board.count_mut(site);
        let previous = *c;
        self._positional.hash(HASH_PROVIDER.count(site, previous));
        *c = count;
        self._positional.hash(HASH_PROVIDER.count(site, count));
        Some(previous)
    }

    #[inline]
    fn hash_turn(&mut self) {
        self._situation.hash(HASH_PROVIDER.turn(TurnRole::Mover, self.mover));
        self._situation.hash(HASH_PROVIDER.turn(TurnRole::Next, self.next));
        self._situation.hash(HASH_PROVIDER.turn(TurnRole::Prev, self.prev));
    }

    #[inline]
    pub(crate) fn set_turn(&mut self, turn: Turn) -> Turn {
        let previous = self.turn();
        self.hash_turn();
        self.mover = turn.mover;
        self.next = turn.next;
        self.prev = turn.prev;
        self.hash_turn();
        previous
    }

    #[inline]
    pub(crate) fn set_next(&mut self, next: u8) -> u8 {
        let previous = self.next;
        self._situation.hash(HASH_PROVIDER.turn(TurnRole::Next, self.next));
        self.next = next;
        self._situation.hash(HASH_PROVIDER.turn(TurnRole::Next, self.next));
        previous
    }

    /// Hands the turn to `next`. Returns the previous turn.
    #[inline]
    pub(crate) fn advance_turn(&mut self) -> Turn {
        let mover = self.next;
        let turn = Turn {
            mover,
            next: self.successor(mover),
            prev: self.mover,
        };
        self.set_turn(turn)
    }

    #[inline]
    pub(crate) fn set_score(&mut self, player: u8, score: i32) -> Option<i32> {
        let p = player as usize;
        let slot = self.scores.get_mut(p)?;
        let previous = *slot;
        self._situation.hash(HASH_PROVIDER.score(p, previous));
        *slot = score;
        self._situation.hash(HASH_PROVIDER.score(p, score));
        Some(previous)
    }

    #[inline]
    pub(crate) fn set_team(&mut self, player: u8, team: u8) -> Option<u8> {
        let p = player as usize;
        let slot = self.teams.get_mut(p)?;
        let previous = *slot;
        self._situation.hash(HASH_PROVIDER.team(p, previous));
        *slot = team;
        self._situation.hash(HASH_PROVIDER.team(p, team));
        Some(previous)
    }

    #[inline]
    pub(crate) fn push_pending(&mut self, value: i32) {
        self._situation.hash(HASH_PROVIDER.pending(self.pending.len(), value));
        self.pending.push(value);
    }

    #[inline]
    pub(crate) fn pop_pending(&mut self) -> Option<i32> {
        let value = self.pending.pop()?;
        self._situation.hash(HASH_PROVIDER.pending(self.pending.len(), value));
        Some(value)
    }

    /// Replaces all pending values, returning the previous ones.
    pub(crate) fn replace_pending(&mut self, pending: SmallVec<[i32; 4]>) -> SmallVec<[i32; 4]> {
        for (i, v) in self.pending.iter().enumerate() {
            self._situation.hash(HASH_PROVIDER.pending(i, *v));
        }
        let previous = std::mem::replace(&mut self.pending, pending);
        for (i, v) in self.pending.iter().enumerate() {
            self._situation.hash(HASH_PROVIDER.pending(i, *v));
        }
        previous
    }

    #[inline]
    pub(crate) fn set_die(&mut self, index: usize, die: Die) -> Option<Die> {
        let slot = self.dice.get_mut(index)?;
        let previous = *slot;
        self._situation.hash(HASH_PROVIDER.die(index, previous));
        *slot = die;
        self._situation.hash(HASH_PROVIDER.die(index, die));
        Some(previous)
    }
}
