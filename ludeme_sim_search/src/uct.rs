use atree::{Arena, Token};
use instant::Instant;
use ludeme_sim::prelude::*;
use ludeme_sim::rand::rngs::SmallRng;
use ludeme_sim::rand::SeedableRng;

#[cfg(not(feature = "no_parallel"))]
use rayon::prelude::*;

use crate::node::{NodeData, NodeRef};
use crate::playout::random_playout;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchLimits {
    pub max_time_ms: Option<u128>,
    pub max_iterations: Option<u64>,
}

impl SearchLimits {
    pub fn should_terminate(&self, start_time: Instant, iterations: u64) -> bool {
        if let Some(max_time_ms) = self.max_time_ms {
            if start_time.elapsed().as_millis() >= max_time_ms {
                return true;
            }
        }
        if let Some(max_iterations) = self.max_iterations {
            return iterations >= max_iterations;
        }
        false
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UctConfig {
    /// Exploration constant of UCB1.
    pub exploration: f32,
    /// Moves per random playout before it is scored as a draw.
    pub playout_cutoff: u32,
    /// Root-parallel search with one tree and one context per worker.
    pub parallel: bool,
    pub workers: usize,
    pub seed: u64,
    pub limits: SearchLimits,
}

impl UctConfig {
    pub const STANDARD: Self = Self {
        exploration: std::f32::consts::SQRT_2,
        playout_cutoff: 1000,
        parallel: false,
        workers: 4,
        seed: 0,
        limits: SearchLimits {
            max_time_ms: Some(1000),
            max_iterations: None,
        },
    };
}

impl Default for UctConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Most visited root move.
    pub best: Option<Move>,
    /// Root moves in legal-move order with their visit counts.
    pub visits: Vec<(Move, u32)>,
    pub iterations: u64,
    /// Moves applied while searching, playouts included.
    pub moves_applied: u64,
}

impl SearchResult {
    fn from_root(tree: &Arena<NodeData>, root: Token, iterations: u64, moves_applied: u64) -> Self {
        let visits: Vec<(Move, u32)> = NodeRef::new(tree, root)
            .children()
            .filter_map(|child| child.data())
            .filter_map(|data| data.m.clone().map(|m| (m, data.visits)))
            .collect();
        let mut result = Self {
            best: None,
            visits,
            iterations,
            moves_applied,
        };
        result.pick_best();
        result
    }

    fn pick_best(&mut self) {
        let mut best: Option<(&Move, u32)> = None;
        for (m, n) in &self.visits {
            if best.map(|(_, b)| *n > b).unwrap_or(true) {
                best = Some((m, *n));
            }
        }
        self.best = best.map(|(m, _)| m.clone());
    }

    /// Sums the visit counts of searches started from the same position.
    fn merge(mut self, other: Self) -> Self {
        if self.visits.is_empty() {
            return other;
        }
        for ((m, n), (m1, n1)) in self.visits.iter_mut().zip(other.visits) {
            if *m == m1 {
                *n += n1;
            }
        }
        self.iterations += other.iterations;
        self.moves_applied += other.moves_applied;
        self.pick_best();
        self
    }
}

/// Monte-Carlo tree search over a shared `Game`. Nodes do not store states: each iteration
/// replays the selected path on the caller's context and undoes it afterwards.
///
/// For stochastic games the tree is open-loop: a child is only selectable while its move is
/// legal in the state actually reached.
pub struct Uct {
    pub config: UctConfig,
    pub tree: Arena<NodeData>,
    pub root: Option<Token>,
    rng: SmallRng,
}

impl Uct {
    pub fn new(config: UctConfig) -> Self {
        Self {
            config,
            tree: Arena::new(),
            root: None,
            rng: SmallRng::seed_from_u64(config.seed),
        }
    }

    /// Root of the last search.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|token| NodeRef::new(&self.tree, token))
    }

    /// Searches from the mover's point of view in `context`. The context is restored before
    /// returning.
    pub fn search(&mut self, context: &mut Context<'_>) -> SearchResult {
        if context.trial.is_over() {
            return Default::default();
        }
        let no_parallel = cfg!(feature = "no_parallel");
        if !no_parallel && self.config.parallel && self.config.workers > 1 {
            #[cfg(feature = "no_parallel")]
            {
                unreachable!("#[cfg(feature = \"no_parallel\")]")
            }

            #[cfg(not(feature = "no_parallel"))]
            {
                self.search_parallel(context)
            }
        } else {
            self.search_serial(context)
        }
    }

    #[cfg(not(feature = "no_parallel"))]
    fn search_parallel(&mut self, context: &Context<'_>) -> SearchResult {
        let config = self.config;
        let shared: &Context<'_> = context;
        (0..config.workers)
            .into_par_iter()
            .map(|worker| {
                let mut context = shared.clone();
                let mut uct = Uct::new(UctConfig {
                    parallel: false,
                    seed: config.seed.wrapping_add(worker as u64),
                    ..config
                });
                uct.search_serial(&mut context)
            })
            .reduce(SearchResult::default, SearchResult::merge)
    }

    fn search_serial(&mut self, context: &mut Context<'_>) -> SearchResult {
        let t0 = Instant::now();
        let root = self.init(context);
        let (mut iterations, mut moves_applied) = (0, 0);
        while !self.config.limits.should_terminate(t0, iterations) {
            moves_applied += self.iteration(root, context);
            iterations += 1;
            if self.is_solved(root) {
                break;
            }
        }
        SearchResult::from_root(&self.tree, root, iterations, moves_applied)
    }

    fn init(&mut self, context: &Context<'_>) -> Token {
        let num_players = context.state.num_players();
        let (tree, root) = Arena::with_data(NodeData::new(None, num_players));
        self.tree = tree;
        self.root = Some(root);
        root
    }

    /// A single legal root move leaves nothing to search.
    fn is_solved(&self, root: Token) -> bool {
        self.tree
            .get(root)
            .map(|node| node.data.expanded && node.children_tokens(&self.tree).count() <= 1)
            .unwrap_or(true)
    }

    fn expand(&mut self, token: Token, moves: &MoveList, num_players: u8) {
        for m in moves {
            token.append(&mut self.tree, NodeData::new(Some(m.clone()), num_players));
        }
        if let Some(node) = self.tree.get_mut(token) {
            node.data.expanded = true;
        }
    }

    /// UCB1 over the children whose move is in `legal`. Unvisited children come first, in
    /// legal-move order.
    fn select_child(&self, token: Token, legal: &MoveList) -> Option<(Move, Token)> {
        let parent = self.tree.get(token)?;
        let ln_n = ((parent.data.visits.max(1)) as f32).ln();
        let mut best: Option<(f32, &atree::Node<NodeData>)> = None;
        for child in parent.children(&self.tree) {
            let Some(m) = &child.data.m else {
                continue;
            };
            if !legal.contains(m) {
                continue;
            }
            if child.data.visits == 0 {
                return Some((m.clone(), child.token()));
            }
            let n = child.data.visits as f32;
            let score = child.data.average_score(m.mover) + self.config.exploration * (ln_n / n).sqrt();
            if best.map(|(b, _)| score > b).unwrap_or(true) {
                best = Some((score, child));
            }
        }
        let (_, child) = best?;
        child.data.m.clone().map(|m| (m, child.token()))
    }

    /// Selection, expansion, playout and backpropagation. Returns the number of moves applied.
    fn iteration(&mut self, root: Token, context: &mut Context<'_>) -> u64 {
        let game = context.game;
        let num_players = context.state.num_players();
        let mut path = vec![root];
        let mut applied = Vec::with_capacity(16);
        let mut token = root;
        while !context.trial.is_over() {
            let legal = game.moves(context);
            let expanded = self.tree.get(token).map(|n| n.data.expanded).unwrap_or(false);
            if !expanded {
                self.expand(token, &legal, num_players);
            }
            let Some((m, child)) = self.select_child(token, &legal) else {
                break;
            };
            applied.push(game.apply(context, &m));
            path.push(child);
            token = child;
            if let Some(node) = self.tree.get_mut(child) {
                node.data.status = context.trial.status();
            }
            if !expanded {
                break;
            }
        }

        let playout = random_playout(context, &mut self.rng, self.config.playout_cutoff);
        for token in &path {
            if let Some(node) = self.tree.get_mut(*token) {
                node.data.record(playout.status, num_players);
            }
        }
        let moves_applied = applied.len() as u64 + playout.moves_played;
        for a in applied.into_iter().rev() {
            a.undo(context, true);
        }
        moves_applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SearchNode;
    use ludeme_sim::prelude::rules::*;

    fn started(game: &Game) -> Context<'_> {
        let mut ctx = ContextBuilder::new(game).with_seed(1).build();
        game.start(&mut ctx);
        ctx
    }

    fn limited(iterations: u64) -> UctConfig {
        UctConfig {
            limits: SearchLimits {
                max_time_ms: None,
                max_iterations: Some(iterations),
            },
            ..UctConfig::STANDARD
        }
    }

    /// 4x4 breakthrough where both players are one step away from their far row. Player 1
    /// moves first and only its pawn on site 8 can win at once.
    fn near_win() -> Game {
        let mut builder = GameBuilder::new("Near win")
            .with_board(Board::square(4))
            .with_component(Component::new("Pawn1", 1).with_value(1))
            .with_component(Component::new("Pawn2", 2).with_value(1))
            .with_start(Add::new("Pawn1", sites(SitesKind::Explicit(vec![0, 8]))).boxed())
            .with_start(Add::new("Pawn2", sites(SitesKind::Explicit(vec![7]))).boxed())
            .with_play(step(sites(SitesKind::Occupied(RoleType::Mover)), StepDirections::Forwards, true).boxed());
        for (player, row) in [(1, vec![12, 13, 14, 15]), (2, vec![0, 1, 2, 3])] {
            let reaches = not(all(AllKind::Sites {
                region: sites(SitesKind::Occupied(RoleType::Mover)),
                condition: not(is(IsKind::In {
                    site: var(EvalContextData::Site),
                    region: sites(SitesKind::Explicit(row)),
                })),
            }));
            let condition = and(vec![is(IsKind::Mover(int(player))), reaches]);
            builder = builder.with_end(end_rule(condition, ResultType::Win, RoleType::Mover));
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_search_restores_context() {
        let game = demo::breakthrough(5).unwrap();
        let mut ctx = started(&game);
        let state = ctx.state.clone();
        let trial = ctx.trial.clone();
        let mut uct = Uct::new(limited(200));
        let result = uct.search(&mut ctx);
        assert_eq!(state, ctx.state);
        assert_eq!(trial, ctx.trial);
        assert_eq!(200, result.iterations);
        assert!(result.best.is_some());
    }

    #[test]
    fn test_root_children_follow_legal_moves() {
        let game = demo::breakthrough(5).unwrap();
        let mut ctx = started(&game);
        let legal = game.moves(&mut ctx);
        let mut uct = Uct::new(limited(100));
        let result = uct.search(&mut ctx);
        let root = uct.root().unwrap();
        assert_eq!(100, root.num_visits());
        assert_eq!(legal.len(), root.num_legal_moves());
        for (i, m) in legal.iter().enumerate() {
            let child = root.child_for_nth_legal_move(i).unwrap();
            assert_eq!(Some(m), child.data().and_then(|d| d.m.as_ref()));
        }
        let child_visits: u32 = result.visits.iter().map(|(_, n)| n).sum();
        assert_eq!(100, child_visits);
    }

    #[test]
    fn test_search_prefers_immediate_win() {
        let game = near_win();
        let mut ctx = started(&game);
        let mut uct = Uct::new(limited(600));
        let best = uct.search(&mut ctx).best.unwrap();
        assert_eq!(8, best.from);
        let _ = game.apply(&mut ctx, &best);
        assert_eq!(TrialStatus::Won(1), ctx.trial.status());
    }

    #[test]
    fn test_stochastic_search_restores_context() {
        let game = demo::dice_race(10).unwrap();
        let mut ctx = started(&game);
        let state = ctx.state.clone();
        let trial = ctx.trial.clone();
        let mut uct = Uct::new(limited(150));
        let result = uct.search(&mut ctx);
        assert_eq!(state, ctx.state);
        assert_eq!(trial, ctx.trial);
        assert_eq!(150, result.iterations);
    }

    #[test]
    fn test_finished_trial_has_nothing_to_search() {
        let game = demo::breakthrough(4).unwrap();
        let mut ctx = started(&game);
        let mut rng = SmallRng::seed_from_u64(2);
        let _ = crate::playout::play_out(&mut ctx, &mut rng, 1000);
        let result = Uct::new(limited(10)).search(&mut ctx);
        assert!(result.best.is_none());
        assert_eq!(0, result.iterations);
    }

    #[cfg(not(feature = "no_parallel"))]
    #[test]
    fn test_root_parallel_merges_visits() {
        let game = demo::breakthrough(5).unwrap();
        let mut ctx = started(&game);
        let state = ctx.state.clone();
        let mut uct = Uct::new(UctConfig {
            parallel: true,
            workers: 3,
            ..limited(50)
        });
        let result = uct.search(&mut ctx);
        assert_eq!(state, ctx.state);
        assert_eq!(150, result.iterations);
        let total: u32 = result.visits.iter().map(|(_, n)| n).sum();
        assert_eq!(150, total);
    }
}
