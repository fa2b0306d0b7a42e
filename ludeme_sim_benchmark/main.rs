use std::str::FromStr;

use instant::Instant;
use ludeme_sim::prelude::*;
use ludeme_sim::rand::rngs::SmallRng;
use ludeme_sim::rand::SeedableRng;
use ludeme_sim_search::playout::random_playout;
use ludeme_sim_search::{SearchLimits, SearchNode, Uct, UctConfig};
use rayon::prelude::*;
use structopt::StructOpt;

mod match_round;
mod perft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameChoice {
    Breakthrough,
    DiceRace,
}

impl FromStr for GameChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakthrough" => Ok(Self::Breakthrough),
            "dice_race" | "dice-race" => Ok(Self::DiceRace),
            _ => Err(format!("unknown game: {s}")),
        }
    }
}

#[derive(Debug, StructOpt, Clone)]
pub struct GameOpts {
    #[structopt(long, default_value = "breakthrough", help = "breakthrough or dice_race")]
    pub game: GameChoice,
    #[structopt(long, help = "Board size for breakthrough, track length for dice_race")]
    pub size: Option<u16>,
    #[structopt(long, default_value = "0")]
    pub seed: u64,
}

impl GameOpts {
    pub fn load(&self) -> Result<Game, std::io::Error> {
        let game = match self.game {
            GameChoice::Breakthrough => demo::breakthrough(self.size.unwrap_or(8)),
            GameChoice::DiceRace => demo::dice_race(self.size.unwrap_or(24)),
        };
        game.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    }

    pub fn start<'g>(&self, game: &'g Game) -> Context<'g> {
        let mut context = ContextBuilder::new(game).with_seed(self.seed).build();
        game.start(&mut context);
        context
    }
}

#[derive(Debug, StructOpt, Clone)]
pub struct UctOpts {
    #[structopt(long = "--parallel", short = "-P")]
    pub parallel: bool,
    #[structopt(long)]
    pub workers: Option<usize>,
    #[structopt(long)]
    pub time_limit_ms: Option<u128>,
    #[structopt(long)]
    pub iterations: Option<u64>,
    #[structopt(long)]
    pub exploration: Option<f32>,
    #[structopt(long)]
    pub playout_cutoff: Option<u32>,
}

impl UctOpts {
    pub fn config(&self, seed: u64) -> UctConfig {
        let standard = UctConfig::STANDARD;
        let limits = if self.time_limit_ms.is_none() && self.iterations.is_none() {
            standard.limits
        } else {
            SearchLimits {
                max_time_ms: self.time_limit_ms,
                max_iterations: self.iterations,
            }
        };
        UctConfig {
            exploration: self.exploration.unwrap_or(standard.exploration),
            playout_cutoff: self.playout_cutoff.unwrap_or(standard.playout_cutoff),
            parallel: self.parallel,
            workers: self.workers.unwrap_or(standard.workers),
            seed,
            limits,
        }
    }
}

#[derive(Debug, StructOpt, Clone)]
#[structopt(about = "Ludeme simulator benchmarks")]
pub enum BenchmarkOpts {
    #[structopt(help = "Count the move sequences up to a depth.")]
    Perft {
        #[structopt(long = "--parallel", short = "-P")]
        parallel: bool,
        #[structopt(long, default_value = "4")]
        depth: u8,
        #[structopt(flatten)]
        game: GameOpts,
    },
    #[structopt(help = "Measure random playout throughput.")]
    Playout {
        #[structopt(long = "--parallel", short = "-P")]
        parallel: bool,
        #[structopt(long, default_value = "1000")]
        count: u32,
        #[structopt(flatten)]
        game: GameOpts,
    },
    #[structopt(help = "Search the start position and print the root statistics.")]
    Evaluate {
        #[structopt(flatten)]
        uct: UctOpts,
        #[structopt(flatten)]
        game: GameOpts,
    },
    #[structopt(help = "Measure the score of UCT against a random player.")]
    Match {
        #[structopt(long, default_value = "10")]
        rounds: u32,
        #[structopt(long, default_value = "500")]
        max_moves: u32,
        #[structopt(long)]
        json: bool,
        #[structopt(flatten)]
        uct: UctOpts,
        #[structopt(flatten)]
        game: GameOpts,
    },
}

const PLAYOUT_CUTOFF: u32 = 10_000;

fn run_playouts(opts: &GameOpts, parallel: bool, count: u32) -> Result<(), std::io::Error> {
    let game = opts.load()?;
    let context = opts.start(&game);
    let t0 = Instant::now();
    let playout = |i: u32| {
        let mut context = context.clone();
        let mut rng = SmallRng::seed_from_u64(opts.seed.wrapping_add(i as u64));
        random_playout(&mut context, &mut rng, PLAYOUT_CUTOFF).moves_played
    };
    let moves: u64 = if parallel {
        (0..count).into_par_iter().map(playout).sum()
    } else {
        (0..count).map(playout).sum()
    };
    let dt_ms = (t0.elapsed().as_nanos() as f64) * 1e-6;
    let rate = (count as f64) / dt_ms * 1e3;
    let move_rate = 1e-3f64 * (moves as f64) / dt_ms;
    println!("playouts = {count}, moves = {moves}, dt = {dt_ms:.3} ms, rate = {rate:.1} playouts/s, {move_rate:.3} Mmoves/s");
    Ok(())
}

fn run_evaluate(opts: &GameOpts, uct_opts: &UctOpts) -> Result<(), std::io::Error> {
    let game = opts.load()?;
    let mut context = opts.start(&game);
    let t0 = Instant::now();
    let mut uct = Uct::new(uct_opts.config(opts.seed));
    let result = uct.search(&mut context);
    let dt_ms = t0.elapsed().as_millis();
    if let Some(root) = uct.root() {
        let mover = context.state.mover();
        for i in 0..root.num_legal_moves() {
            let Some(child) = root.child_for_nth_legal_move(i) else {
                continue;
            };
            let Some(m) = child.data().and_then(|d| d.m.as_ref()) else {
                continue;
            };
            println!(
                "  {:3} -> {:3} | n={:6} | score={:.3}",
                m.from,
                m.to,
                child.num_visits(),
                child.average_score(mover)
            );
        }
    }
    println!(
        "best = {:?}, iterations = {}, moves = {}, dt = {dt_ms} ms",
        result.best.map(|m| (m.from, m.to)),
        result.iterations,
        result.moves_applied
    );
    Ok(())
}

fn main() -> Result<(), std::io::Error> {
    let opts = BenchmarkOpts::from_args();
    match &opts {
        BenchmarkOpts::Perft { parallel, depth, game } => perft::run_perft(game, *parallel, *depth),
        BenchmarkOpts::Playout { parallel, count, game } => run_playouts(game, *parallel, *count),
        BenchmarkOpts::Evaluate { uct, game } => run_evaluate(game, uct),
        BenchmarkOpts::Match {
            rounds,
            max_moves,
            json,
            uct,
            game,
        } => {
            let dt = match_round::run_match(game, uct.config(game.seed), *rounds, *max_moves, *json)?;
            println!("Total time: {:.2} s", dt.as_secs_f32());
            Ok(())
        }
    }
}
