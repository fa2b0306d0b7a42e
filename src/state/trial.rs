use rustc_hash::FxHashMap;

use crate::data_structures::ActionList;
use crate::moves::Action;
use crate::types::RepetitionType;
use crate::zobrist_hash::HashValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrialStatus {
    #[default]
    Ongoing,
    Won(u8),
    Lost(u8),
    Draw,
}

impl TrialStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    /// Score in `[0, 1]` of `player` for a finished trial (0.5 for a draw or an ongoing trial).
    pub fn score_for(self, player: u8, num_players: u8) -> f32 {
        match self {
            Self::Ongoing | Self::Draw => 0.5,
            Self::Won(p) => {
                if p == player {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Lost(p) => {
                if p == player {
                    0.0
                } else if num_players > 1 {
                    1.0 / (num_players - 1) as f32
                } else {
                    0.0
                }
            }
        }
    }
}

/// One committed move, or the start of the trial (mover 0, no actions).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialEntry {
    pub mover: u8,
    pub actions: ActionList<Action>,
    /// Hashes of the state after the move, valid once `finalised`.
    pub positional: HashValue,
    pub situational: HashValue,
    pub finalised: bool,
}

impl TrialEntry {
    #[inline]
    pub fn hash(&self, situational: bool) -> HashValue {
        if situational {
            self.situational
        } else {
            self.positional
        }
    }

    #[inline]
    pub fn is_pass(&self) -> bool {
        self.actions.iter().all(|a| matches!(a, Action::Pass))
    }
}

/// Move history of one playthrough with hash multisets for repetition lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trial {
    entries: Vec<TrialEntry>,
    positional: FxHashMap<HashValue, u32>,
    situational: FxHashMap<HashValue, u32>,
    status: TrialStatus,
}

impl Trial {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn entries(&self) -> &[TrialEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of committed moves, the start entry excluded.
    #[inline]
    pub fn num_moves(&self) -> usize {
        self.entries.iter().filter(|e| e.mover != 0).count()
    }

    #[inline]
    pub fn status(&self) -> TrialStatus {
        self.status
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    #[inline]
    pub(crate) fn set_status(&mut self, status: TrialStatus) {
        self.status = status;
    }

    pub(crate) fn record_start(&mut self, positional: HashValue, situational: HashValue) {
        self.push(0, Default::default());
        self.finalise(positional, situational);
    }

    pub(crate) fn push(&mut self, mover: u8, actions: ActionList<Action>) {
        self.entries.push(TrialEntry {
            mover,
            actions,
            positional: 0,
            situational: 0,
            finalised: false,
        });
    }

    /// Sets the hashes of the last entry and counts them.
    pub(crate) fn finalise(&mut self, positional: HashValue, situational: HashValue) {
        let Some(entry) = self.entries.last_mut() else {
            return;
        };
        if entry.finalised {
            return;
        }
        entry.positional = positional;
        entry.situational = situational;
        entry.finalised = true;
        *self.positional.entry(positional).or_default() += 1;
        *self.situational.entry(situational).or_default() += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<TrialEntry> {
        let entry = self.entries.pop()?;
        if entry.finalised {
            Self::uncount(&mut self.positional, entry.positional);
            Self::uncount(&mut self.situational, entry.situational);
        }
        Some(entry)
    }

    fn uncount(counts: &mut FxHashMap<HashValue, u32>, hash: HashValue) {
        if let Some(c) = counts.get_mut(&hash) {
            *c -= 1;
            if *c == 0 {
                counts.remove(&hash);
            }
        }
    }

    /// Times a state with `hash` was recorded over the whole trial.
    #[inline]
    pub fn occurrences(&self, situational: bool, hash: HashValue) -> u32 {
        let counts = if situational {
            &self.situational
        } else {
            &self.positional
        };
        counts.get(&hash).copied().unwrap_or(0)
    }

    /// Finalised entries of the current turn of `mover`, plus the entry the turn started from.
    pub fn turn_entries(&self, mover: u8) -> impl Iterator<Item = &TrialEntry> + '_ {
        let finalised = self.entries.iter().rposition(|e| e.finalised).map(|i| i + 1).unwrap_or(0);
        let entries = &self.entries[..finalised];
        let start = entries.iter().rposition(|e| e.mover != mover).unwrap_or(0);
        entries[start..].iter()
    }

    /// Whether a state with these hashes was already recorded, at the granularity of `repetition`.
    pub fn contains(&self, repetition: RepetitionType, mover: u8, positional: HashValue, situational: HashValue) -> bool {
        let situational_check = repetition.is_situational();
        let hash = if situational_check { situational } else { positional };
        if repetition.is_in_turn() {
            self.turn_entries(mover).any(|e| e.hash(situational_check) == hash)
        } else {
            self.occurrences(situational_check, hash) > 0
        }
    }

    /// Whether the latest recorded state repeats an earlier one.
    pub fn is_repeat(&self, repetition: RepetitionType, mover: u8, positional: HashValue, situational: HashValue) -> bool {
        let situational_check = repetition.is_situational();
        let hash = if situational_check { situational } else { positional };
        let current_recorded = self
            .entries
            .iter()
            .rev()
            .find(|e| e.finalised)
            .map(|e| e.hash(situational_check) == hash)
            .unwrap_or(false);
        if repetition.is_in_turn() {
            let seen = self.turn_entries(mover).filter(|e| e.hash(situational_check) == hash).count();
            return seen > usize::from(current_recorded);
        }
        self.occurrences(situational_check, hash) > u32::from(current_recorded)
    }

    /// The last `n` committed moves were all passes.
    pub fn last_moves_passed(&self, n: usize) -> bool {
        let moves = self.entries.iter().rev().filter(|e| e.mover != 0).take(n);
        let mut count = 0;
        for e in moves {
            if !e.is_pass() {
                return false;
            }
            count += 1;
        }
        count == n
    }
}
