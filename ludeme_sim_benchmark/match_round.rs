use instant::{Duration, Instant};
use ludeme_sim::prelude::*;
use ludeme_sim::rand::rngs::SmallRng;
use ludeme_sim::rand::seq::SliceRandom;
use ludeme_sim::rand::SeedableRng;
use ludeme_sim_search::{Uct, UctConfig};
use rayon::prelude::*;
use serde::Serialize;

use crate::GameOpts;

/// Outcome of one game between a searching player and a uniformly random one.
#[derive(Debug, Clone, Serialize)]
pub struct RoundResult {
    pub round: u32,
    pub searcher: u8,
    pub status: TrialStatus,
    pub score: f32,
    pub moves: usize,
    pub duration_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchSummary {
    pub rounds: Vec<RoundResult>,
    /// Mean score of the searching player.
    pub score: f32,
}

fn match_round(game: &Game, opts: &GameOpts, config: UctConfig, round: u32, max_moves: u32) -> RoundResult {
    let t0 = Instant::now();
    let seed = opts.seed.wrapping_add(round as u64);
    let mut context = ContextBuilder::new(game).with_seed(seed).build();
    game.start(&mut context);
    let num_players = context.state.num_players();
    let searcher = 1 + (round % num_players as u32) as u8;
    let mut uct = Uct::new(UctConfig { seed, ..config });
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..max_moves {
        if context.trial.is_over() {
            break;
        }
        let m = if context.state.mover() == searcher {
            uct.search(&mut context).best
        } else {
            game.moves(&mut context).choose(&mut rng).cloned()
        };
        let Some(m) = m else {
            println!("match_round: no move for player {}", context.state.mover());
            break;
        };
        let _ = game.apply(&mut context, &m);
    }
    let status = context.trial.status();
    RoundResult {
        round,
        searcher,
        status,
        score: status.score_for(searcher, num_players),
        moves: context.trial.num_moves(),
        duration_ms: t0.elapsed().as_millis(),
    }
}

pub fn run_match(
    opts: &GameOpts,
    config: UctConfig,
    rounds: u32,
    max_moves: u32,
    json: bool,
) -> Result<Duration, std::io::Error> {
    let game = opts.load()?;
    let t0 = Instant::now();
    let mut results: Vec<RoundResult> = (0..rounds)
        .into_par_iter()
        .map(|round| {
            let res = match_round(&game, opts, config, round, max_moves);
            println!(
                "+ Round {:3}: searcher={} status={:?} moves={} ({} ms)",
                round + 1,
                res.searcher,
                res.status,
                res.moves,
                res.duration_ms
            );
            res
        })
        .collect();
    results.sort_by_key(|r| r.round);
    let score = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.score).sum::<f32>() / results.len() as f32
    };
    let summary = MatchSummary { rounds: results, score };
    if json {
        let text = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
        println!("{text}");
    } else {
        println!("Score: {:.3} over {} rounds", summary.score, summary.rounds.len());
    }
    Ok(t0.elapsed())
}
