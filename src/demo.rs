//! Built-in games used by the benchmark, the search crate and the tests.

use crate::builder::GameBuilder;
use crate::game::{Board, Component, Game, LoadError};
use crate::ludeme::prelude::*;
use crate::types::*;

fn row_sites(board: &Board, rows: impl Iterator<Item = u16>) -> Vec<i32> {
    let mut sites = vec![];
    for row in rows {
        for col in 0..board.cols {
            if let Some(site) = board.site_at(row as i32, col as i32) {
                sites.push(site);
            }
        }
    }
    sites
}

/// Some piece of the mover stands in the region.
fn mover_reaches(region: Vec<i32>) -> BoolFn {
    not(all(AllKind::Sites {
        region: sites(SitesKind::Occupied(RoleType::Mover)),
        condition: not(is(IsKind::In {
            site: var(EvalContextData::Site),
            region: sites(SitesKind::Explicit(region)),
        })),
    }))
}

/// Pawns step forwards, straight or diagonally, capturing enemies on the way. A player wins by
/// reaching the far row, capturing every enemy pawn, or leaving the opponent without moves.
pub fn breakthrough(size: u16) -> Result<Game, LoadError> {
    let board = Board::square(size);
    let home = |p: u8| -> Vec<i32> {
        if p == 1 {
            row_sites(&board, 0..2)
        } else {
            row_sites(&board, size.saturating_sub(2)..size)
        }
    };
    let far = |p: u8| -> Vec<i32> {
        if p == 1 {
            row_sites(&board, size.saturating_sub(1)..size)
        } else {
            row_sites(&board, 0..1)
        }
    };
    let play = step(
        sites(SitesKind::Occupied(RoleType::Mover)),
        StepDirections::Forwards,
        true,
    );
    let mut builder = GameBuilder::new("Breakthrough")
        .with_board(board)
        .with_component(Component::new("Pawn1", 1).with_value(1))
        .with_component(Component::new("Pawn2", 2).with_value(1))
        .with_start(Add::new("Pawn1", sites(SitesKind::Explicit(home(1)))).boxed())
        .with_start(Add::new("Pawn2", sites(SitesKind::Explicit(home(2)))).boxed())
        .with_play(play.boxed());
    for p in 1..=2u8 {
        let condition = and(vec![is(IsKind::Mover(int(p as i32))), mover_reaches(far(p))]);
        builder = builder.with_end(end_rule(condition, ResultType::Win, RoleType::Mover));
    }
    builder
        .with_end(end_rule(no(NoKind::Pieces(RoleType::Next)), ResultType::Win, RoleType::Mover))
        .with_end(end_rule(no(NoKind::Moves(RoleType::Next)), ResultType::Win, RoleType::Mover))
        .build()
}

/// Two runners race along their own row. Each die moves the runner by its face; the mover
/// keeps the turn until both dice are used, then the dice are rolled for the next player.
pub fn dice_race(length: u16) -> Result<Game, LoadError> {
    let board = Board::rectangle(2, length);
    let finish = vec![length as i32 - 1, 2 * length as i32 - 1];
    let after_move = if_moves(all(AllKind::DiceUsed), roll().boxed(), Some(set_next_player(mover()).boxed()));
    let runner = slide(
        sites(SitesKind::Occupied(RoleType::Mover)),
        Direction::E,
        var(EvalContextData::Pips),
    )
    .with_then(then(after_move));
    let play = for_each_die(runner.boxed());
    GameBuilder::new("Dice race")
        .with_board(board)
        .with_dice(2, 6)
        .with_component(Component::new("Runner1", 1))
        .with_component(Component::new("Runner2", 2))
        .with_start(Add::new("Runner1", sites(SitesKind::Explicit(vec![0]))).boxed())
        .with_start(Add::new("Runner2", sites(SitesKind::Explicit(vec![length as i32]))).boxed())
        .with_start(roll().boxed())
        .with_play(play.boxed())
        .with_end(end_rule(
            all(AllKind::Sites {
                region: sites(SitesKind::Occupied(RoleType::Mover)),
                condition: is(IsKind::In {
                    site: var(EvalContextData::Site),
                    region: sites(SitesKind::Explicit(finish)),
                }),
            }),
            ResultType::Win,
            RoleType::Mover,
        ))
        .build()
}
