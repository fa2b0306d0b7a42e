use instant::Instant;
use ludeme_sim::prelude::*;

use crate::GameOpts;

fn perft_serial(context: &mut Context<'_>, depth: u8) -> u64 {
    if depth == 0 {
        return 0;
    }

    let game = context.game;
    let moves = game.moves(context);
    let mut n = moves.len() as u64;
    if depth == 1 {
        return n;
    }
    for m in &moves {
        let applied = game.apply(context, m);
        n += perft_serial(context, depth - 1);
        applied.undo(context, true);
    }
    n
}

fn perft_parallel(context: &mut Context<'_>, depth: u8, parallel_depth: u8) -> u64 {
    use rayon::prelude::*;
    if parallel_depth == 0 || depth <= 2 {
        return perft_serial(context, depth);
    }
    let game = context.game;
    let moves = game.moves(context);
    let shared: &Context<'_> = context;
    let n1: u64 = moves
        .par_iter()
        .map(|m| {
            let mut context = shared.clone();
            let _ = game.apply(&mut context, m);
            perft_parallel(&mut context, depth - 1, parallel_depth - 1)
        })
        .sum();
    moves.len() as u64 + n1
}

pub fn run_perft(opts: &GameOpts, parallel: bool, depth: u8) -> Result<(), std::io::Error> {
    let game = opts.load()?;
    let mut context = opts.start(&game);
    let start_time = Instant::now();
    let n = if parallel {
        perft_parallel(&mut context, depth, 4)
    } else {
        perft_serial(&mut context, depth)
    };
    let dt = start_time.elapsed();
    let dt_ms = (dt.as_nanos() as f64) * 1e-6;
    let rate = 1e-3f64 * (n as f64) / dt_ms;
    println!("depth = {depth}, n_pos = {n}, dt = {dt_ms:.3} ms, rate = {rate:.3} Mmoves/s");
    Ok(())
}
