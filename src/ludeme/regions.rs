use std::sync::OnceLock;

use crate::children;
use crate::context::Context;
use crate::game::{Game, GameInfo};
use crate::types::*;

use super::ints::check_role;
use super::*;

/// All sites of the board of the given site type. The site type defaults to the board's own.
#[derive(Debug, Default)]
pub struct SitesBoard {
    pub site_type: Option<SiteType>,
    resolved: OnceLock<SiteType>,
    pub precomputed: Precomputed<Region>,
}

impl SitesBoard {
    pub fn new(site_type: Option<SiteType>) -> Self {
        Self {
            site_type,
            ..Default::default()
        }
    }

    #[inline]
    pub fn site_type(&self) -> SiteType {
        self.resolved.get().copied().or(self.site_type).unwrap_or_default()
    }
}

impl Ludeme for SitesBoard {
    fn node_concepts(&self, _: &Game) -> Concepts {
        Concept::Board.into()
    }

    fn resolve_defaults(&self, info: &GameInfo) {
        let _ = self.resolved.set(self.site_type.unwrap_or(info.board.site_type));
    }

    fn cache_static(&self, game: &Game) -> bool {
        let mut context = scratch_context(game);
        self.precomputed.set(RegionFunction::eval(self, &mut context))
    }
}

impl RegionFunction for SitesBoard {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        if let Some(v) = self.precomputed.get() {
            return v;
        }
        // Only cells carry pieces.
        if self.site_type() != SiteType::Cell {
            return Region::new();
        }
        let n = context.game.info.board.num_sites() as i32;
        (0..n).collect()
    }
}

#[derive(Debug, Clone)]
pub struct SitesExplicit(pub Region);

impl Ludeme for SitesExplicit {
    fn node_will_crash(&self, game: &Game, report: &mut Report) -> bool {
        let board = &game.info.board;
        let outside: Vec<i32> = self.0.iter().filter(|s| !board.contains(*s)).collect();
        if outside.is_empty() {
            return false;
        }
        report.add_crash(self.name(), format!("sites {outside:?} are off the board"));
        true
    }
}

impl RegionFunction for SitesExplicit {
    #[inline]
    fn eval(&self, _: &mut Context<'_>) -> Region {
        self.0.clone()
    }
}

/// Single-site region, empty for `OFF`.
#[derive(Debug)]
pub struct SitesSite(pub IntFn);

impl Ludeme for SitesSite {
    fn children(&self) -> Children<'_> {
        children![self.0]
    }
}

impl RegionFunction for SitesSite {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        let site = self.0.eval(context);
        if !context.game.info.board.contains(site) {
            return Region::new();
        }
        Region::from_sites([site])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SitesEmpty;

impl Ludeme for SitesEmpty {
    fn node_is_static(&self) -> bool {
        false
    }
}

impl RegionFunction for SitesEmpty {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        context.state.board().sites_empty().collect()
    }
}

/// Sites whose top piece belongs to a role.
#[derive(Debug, Clone, Copy)]
pub struct SitesOccupied(pub RoleType);

impl Ludeme for SitesOccupied {
    fn node_is_static(&self) -> bool {
        false
    }

    fn node_missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        check_role(self.name(), self.0, game, report)
    }
}

impl RegionFunction for SitesOccupied {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        let who = context.state.resolve_role(self.0);
        context.state.board().sites_occupied_by(who).collect()
    }
}

/// Neighbours of a site under a relation.
#[derive(Debug)]
pub struct SitesAround {
    pub site: IntFn,
    pub relation: RelationType,
    pub precomputed: Precomputed<Region>,
}

impl SitesAround {
    pub fn new(site: IntFn, relation: RelationType) -> Self {
        Self {
            site,
            relation,
            precomputed: Precomputed::new(),
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> Region {
        let site = self.site.eval(context);
        context.game.info.board.neighbours(site, self.relation).into_iter().collect()
    }
}

impl Ludeme for SitesAround {
    fn children(&self) -> Children<'_> {
        children![self.site]
    }

    fn cache_static(&self, game: &Game) -> bool {
        let mut context = scratch_context(game);
        self.precomputed.set(self.compute(&mut context))
    }
}

impl RegionFunction for SitesAround {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        if let Some(v) = self.precomputed.get() {
            return v;
        }
        self.compute(context)
    }
}

#[derive(Debug)]
pub struct SitesUnion {
    pub list: Vec<RegionFn>,
    pub precomputed: Precomputed<Region>,
}

impl SitesUnion {
    pub fn new(list: Vec<RegionFn>) -> Self {
        Self {
            list,
            precomputed: Precomputed::new(),
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> Region {
        let mut region = Region::new();
        for r in &self.list {
            region = region.union(&r.eval(context));
        }
        region
    }
}

impl Ludeme for SitesUnion {
    fn children(&self) -> Children<'_> {
        children![self.list]
    }

    fn cache_static(&self, game: &Game) -> bool {
        let mut context = scratch_context(game);
        self.precomputed.set(self.compute(&mut context))
    }
}

impl RegionFunction for SitesUnion {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        if let Some(v) = self.precomputed.get() {
            return v;
        }
        self.compute(context)
    }
}

/// Sites of the region satisfying the condition, with `Site` bound to each in turn.
#[derive(Debug)]
pub struct SitesFilter {
    pub region: RegionFn,
    pub condition: BoolFn,
}

impl Ludeme for SitesFilter {
    fn children(&self) -> Children<'_> {
        children![self.region, self.condition]
    }

    fn node_writes(&self) -> ContextFields {
        EvalContextData::Site.into()
    }
}

impl RegionFunction for SitesFilter {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        let region = self.region.eval(context);
        let mut scope = context.bind(EvalContextData::Site, OFF);
        let mut sites = Region::new();
        for site in region.iter() {
            scope.set(site);
            if self.condition.eval(&mut scope) {
                sites.insert(site);
            }
        }
        sites
    }
}
