//! Grammar-level umbrellas (`all`, `no`, `is`, `sites`, `value`).
//!
//! Each umbrella is a closed argument enum consumed by a constructor function that returns the
//! concrete node. No node of an umbrella type exists at runtime.

use crate::types::{RelationType, RepetitionType, RoleType, SiteType};

use super::booleans::*;
use super::ints::{PendingValue, PieceValue, Score};
use super::regions::*;
use super::*;

pub enum AllKind {
    Sites { region: RegionFn, condition: BoolFn },
    Values { values: ArrayFn, condition: BoolFn },
    DiceUsed,
    Passed,
}

pub fn all(kind: AllKind) -> BoolFn {
    match kind {
        AllKind::Sites { region, condition } => Box::new(AllSites { region, condition }),
        AllKind::Values { values, condition } => Box::new(AllValues { values, condition }),
        AllKind::DiceUsed => Box::new(AllDiceUsed),
        AllKind::Passed => Box::new(AllPassed),
    }
}

pub enum NoKind {
    Moves(RoleType),
    Pieces(RoleType),
}

pub fn no(kind: NoKind) -> BoolFn {
    match kind {
        NoKind::Moves(role) => Box::new(NoMoves(role)),
        NoKind::Pieces(role) => Box::new(NoPieces(role)),
    }
}

pub enum IsKind {
    Empty(IntFn),
    Friend(IntFn),
    Enemy(IntFn),
    In { site: IntFn, region: RegionFn },
    Repeat(Option<RepetitionType>),
    Mover(IntFn),
}

pub fn is(kind: IsKind) -> BoolFn {
    match kind {
        IsKind::Empty(site) => Box::new(IsEmpty(site)),
        IsKind::Friend(site) => Box::new(IsFriend(site)),
        IsKind::Enemy(site) => Box::new(IsEnemy(site)),
        IsKind::In { site, region } => Box::new(IsIn { site, region }),
        IsKind::Repeat(repetition) => Box::new(IsRepeat::new(repetition)),
        IsKind::Mover(player) => Box::new(IsMover(player)),
    }
}

pub enum SitesKind {
    /// Defaults to the board's site type.
    Board(Option<SiteType>),
    Explicit(Vec<i32>),
    Empty,
    Occupied(RoleType),
    Around { site: IntFn, relation: RelationType },
    Site(IntFn),
    Union(Vec<RegionFn>),
    Filter { region: RegionFn, condition: BoolFn },
}

pub fn sites(kind: SitesKind) -> RegionFn {
    match kind {
        SitesKind::Board(site_type) => Box::new(SitesBoard::new(site_type)),
        SitesKind::Explicit(list) => Box::new(SitesExplicit(list.into_iter().collect())),
        SitesKind::Empty => Box::new(SitesEmpty),
        SitesKind::Occupied(role) => Box::new(SitesOccupied(role)),
        SitesKind::Around { site, relation } => Box::new(SitesAround::new(site, relation)),
        SitesKind::Site(site) => Box::new(SitesSite(site)),
        SitesKind::Union(list) => Box::new(SitesUnion::new(list)),
        SitesKind::Filter { region, condition } => Box::new(SitesFilter { region, condition }),
    }
}

pub enum ValueKind {
    Pending,
    /// Component value of the top piece of a site.
    Piece(IntFn),
    Score(IntFn),
}

pub fn value(kind: ValueKind) -> IntFn {
    match kind {
        ValueKind::Pending => Box::new(PendingValue),
        ValueKind::Piece(site) => Box::new(PieceValue(site)),
        ValueKind::Score(player) => Box::new(Score(player)),
    }
}
