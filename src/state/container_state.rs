use smallvec::SmallVec;

use crate::types::OFF;

/// One piece on a site. `what` is the 1-based component index, `who` the owner
/// (0 for the shared player) and `state` a small local value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub what: u16,
    pub who: u8,
    pub state: u8,
}

impl Piece {
    #[inline]
    pub const fn new(what: u16, who: u8) -> Self {
        Self { what, who, state: 0 }
    }
}

/// Pieces on a site, bottom first.
pub type Stack = SmallVec<[Piece; 1]>;

/// Per-site stacks and counts of one container.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerState {
    stacks: Vec<Stack>,
    counts: Vec<i32>,
}

impl ContainerState {
    pub fn new(num_sites: usize) -> Self {
        Self {
            stacks: vec![Stack::new(); num_sites],
            counts: vec![0; num_sites],
        }
    }

    #[inline]
    pub fn num_sites(&self) -> usize {
        self.stacks.len()
    }

    #[inline]
    pub fn is_valid(&self, site: i32) -> bool {
        site >= 0 && (site as usize) < self.stacks.len()
    }

    #[inline]
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    #[inline]
    pub fn counts(&self) -> &[i32] {
        &self.counts
    }

    /// Pieces on `site`, empty for an invalid site.
    #[inline]
    pub fn stack(&self, site: i32) -> &[Piece] {
        if !self.is_valid(site) {
            return &[];
        }
        &self.stacks[site as usize]
    }

    /// Piece at `level` of `site`. A level of `OFF` selects the top piece.
    #[inline]
    pub fn piece(&self, site: i32, level: i32) -> Option<Piece> {
        let stack = self.stack(site);
        if level == OFF {
            return stack.last().copied();
        }
        if level < 0 {
            return None;
        }
        stack.get(level as usize).copied()
    }

    #[inline]
    pub fn top(&self, site: i32) -> Option<Piece> {
        self.stack(site).last().copied()
    }

    #[inline]
    pub fn size_stack(&self, site: i32) -> i32 {
        self.stack(site).len() as i32
    }

    /// Count of `site`, `OFF` for an invalid site.
    #[inline]
    pub fn count(&self, site: i32) -> i32 {
        if !self.is_valid(site) {
            return OFF;
        }
        self.counts[site as usize]
    }

    /// Returns false for an invalid site.
    #[inline]
    pub fn is_empty(&self, site: i32) -> bool {
        self.is_valid(site) && self.stacks[site as usize].is_empty()
    }

    pub fn sites_occupied_by(&self, who: u8) -> impl Iterator<Item = i32> + '_ {
        self.stacks
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.last().map(|p| p.who == who).unwrap_or(false))
            .map(|(i, _)| i as i32)
    }

    pub fn sites_empty(&self) -> impl Iterator<Item = i32> + '_ {
        self.stacks
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_empty())
            .map(|(i, _)| i as i32)
    }

    #[inline]
    pub(crate) fn stack_mut(&mut self, site: usize) -> &mut Stack {
        &mut self.stacks[site]
    }

    #[inline]
    pub(crate) fn count_mut(&mut self, site: usize) -> &mut i32 {
        &mut self.counts[site]
    }
}
