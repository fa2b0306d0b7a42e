use smallvec::SmallVec;

use crate::types::{Direction, RelationType, SiteType};

/// Rectangular tiling of cells, indexed row-major from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    pub rows: u16,
    pub cols: u16,
    pub site_type: SiteType,
}

impl Board {
    pub const fn square(n: u16) -> Self {
        Self::rectangle(n, n)
    }

    pub const fn rectangle(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            site_type: SiteType::Cell,
        }
    }

    pub fn with_site_type(self, site_type: SiteType) -> Self {
        Self { site_type, ..self }
    }

    #[inline]
    pub fn num_sites(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    #[inline]
    pub fn contains(&self, site: i32) -> bool {
        site >= 0 && (site as usize) < self.num_sites()
    }

    #[inline]
    pub fn row(&self, site: i32) -> i32 {
        site / self.cols as i32
    }

    #[inline]
    pub fn col(&self, site: i32) -> i32 {
        site % self.cols as i32
    }

    #[inline]
    pub fn site_at(&self, row: i32, col: i32) -> Option<i32> {
        if row < 0 || col < 0 || row >= self.rows as i32 || col >= self.cols as i32 {
            return None;
        }
        Some(row * self.cols as i32 + col)
    }

    /// Adjacent site of `site` in direction `dir`.
    #[inline]
    pub fn step(&self, site: i32, dir: Direction) -> Option<i32> {
        if !self.contains(site) {
            return None;
        }
        let (dr, dc) = dir.delta();
        self.site_at(self.row(site) + dr, self.col(site) + dc)
    }

    pub fn neighbours(&self, site: i32, relation: RelationType) -> SmallVec<[i32; 8]> {
        relation.directions().iter().filter_map(|d| self.step(site, *d)).collect()
    }

    /// Number of steps between two sites under `relation`, `None` if either site is off the board
    /// or `b` cannot be reached.
    pub fn distance(&self, a: i32, b: i32, relation: RelationType) -> Option<i32> {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        let dr = (self.row(a) - self.row(b)).abs();
        let dc = (self.col(a) - self.col(b)).abs();
        match relation {
            RelationType::Orthogonal => Some(dr + dc),
            RelationType::All => Some(dr.max(dc)),
            RelationType::Diagonal => {
                if (dr + dc) % 2 != 0 {
                    None
                } else {
                    Some(dr.max(dc))
                }
            }
        }
    }

    /// Row index counted from the side of `player`. Player 1 starts at the bottom row,
    /// every other player at the top row.
    #[inline]
    pub fn row_for(&self, site: i32, player: u8) -> i32 {
        if player == 1 {
            self.row(site)
        } else {
            self.rows as i32 - 1 - self.row(site)
        }
    }

    /// Direction pointing away from the side of `player`.
    #[inline]
    pub fn forwards(&self, player: u8) -> Direction {
        if player == 1 {
            Direction::N
        } else {
            Direction::S
        }
    }
}

/// A piece type. Components are numbered from 1 in the order they are declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    pub name: String,
    /// Owning player, 0 for a shared piece.
    pub owner: u8,
    pub value: i32,
}

impl Component {
    pub fn new<S: Into<String>>(name: S, owner: u8) -> Self {
        Self {
            name: name.into(),
            owner,
            value: 0,
        }
    }

    pub fn with_value(self, value: i32) -> Self {
        Self { value, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dice {
    pub count: u8,
    pub faces: u8,
}
