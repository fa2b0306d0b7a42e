use super::*;
use crate::builder::GameBuilder;
use crate::demo;
use crate::game::{Board, Component};
use crate::ludeme::prelude::*;
use crate::state::TrialStatus;

fn line_game(play: MovesFn, end: EndRule) -> Game {
    GameBuilder::new("Line")
        .with_board(Board::rectangle(1, 3))
        .with_component(Component::new("Stone1", 1))
        .with_component(Component::new("Stone2", 2))
        .with_start(Add::new("Stone1", sites(SitesKind::Explicit(vec![0]))).boxed())
        .with_start(Add::new("Stone2", sites(SitesKind::Explicit(vec![2]))).boxed())
        .with_play(play)
        .with_end(end)
        .build()
        .unwrap()
}

#[test]
fn test_breakthrough_ends_with_a_win_for_the_last_mover() {
    let game = demo::breakthrough(5).unwrap();
    for seed in 0..10 {
        let mut ctx = started(&game, seed);
        let history = random_playout(&mut ctx, seed, 500);
        let (_, last) = history.last().unwrap();
        assert_eq!(TrialStatus::Won(last.mover), ctx.trial.status());
        assert_eq!(1.0, ctx.trial.status().score_for(last.mover, 2));
        assert_eq!(history.len(), ctx.trial.num_moves());
    }
}

#[test]
fn test_dice_race_ends_at_the_finish() {
    let game = demo::dice_race(10).unwrap();
    let mut ctx = started(&game, 4);
    let history = random_playout(&mut ctx, 4, 500);
    let (_, last) = history.last().unwrap();
    assert_eq!(TrialStatus::Won(last.mover), ctx.trial.status());
    let finish = if last.mover == 1 { 9 } else { 19 };
    assert_eq!(last.mover as i32, ctx.state.who(finish, OFF));
}

#[test]
fn test_stalemate_of_next_player() {
    let play = step(
        sites(SitesKind::Occupied(RoleType::Mover)),
        StepDirections::Relation(RelationType::Orthogonal),
        false,
    );
    let game = line_game(
        play.boxed(),
        end_rule(no(NoKind::Moves(RoleType::Next)), ResultType::Win, RoleType::Mover),
    );
    let mut ctx = started(&game, 0);
    let moves = game.moves(&mut ctx);
    assert_eq!(1, moves.len());
    let _ = game.apply(&mut ctx, &moves[0]);
    assert_eq!(TrialStatus::Won(1), ctx.trial.status());
    assert!(!ctx.is_computing_stalemate());
    assert_eq!(1, ctx.state.prev());
}

#[test]
fn test_stalemate_check_inside_play_does_not_recurse() {
    let orthogonal = || {
        step(
            sites(SitesKind::Occupied(RoleType::Mover)),
            StepDirections::Relation(RelationType::Orthogonal),
            false,
        )
        .boxed()
    };
    let play = if_moves(no(NoKind::Moves(RoleType::Next)), pass().boxed(), Some(orthogonal()));
    let game = line_game(
        play.boxed(),
        end_rule(no(NoKind::Pieces(RoleType::Next)), ResultType::Win, RoleType::Mover),
    );
    let mut ctx = started(&game, 0);
    let hashes = (ctx.state.positional_hash(), ctx.state.situational_hash());
    let moves = game.moves(&mut ctx);
    assert_eq!(1, moves.len());
    assert_eq!((0, 1), (moves[0].from, moves[0].to));
    assert_eq!(1, ctx.state.mover());
    assert_eq!(hashes, (ctx.state.positional_hash(), ctx.state.situational_hash()));
    assert!(!ctx.is_computing_stalemate());

    let nested = no(NoKind::Moves(RoleType::Next));
    {
        let mut guard = ctx.enter_stalemate_check().unwrap();
        assert!(!nested.eval(&mut guard));
        assert_eq!(1, guard.state.mover());
    }
    assert!(!ctx.is_computing_stalemate());
}

#[test]
fn test_no_pieces_after_hop_capture() {
    let game = line_game(
        hop(sites(SitesKind::Occupied(RoleType::Mover)), RelationType::Orthogonal).boxed(),
        end_rule(no(NoKind::Pieces(RoleType::Next)), ResultType::Loss, RoleType::Next),
    );
    let mut ctx = started(&game, 0);
    assert!(game.moves(&mut ctx).is_empty());

    let game = GameBuilder::new("Hop")
        .with_board(Board::rectangle(1, 3))
        .with_component(Component::new("Stone1", 1))
        .with_component(Component::new("Stone2", 2))
        .with_start(Add::new("Stone1", sites(SitesKind::Explicit(vec![0]))).boxed())
        .with_start(Add::new("Stone2", sites(SitesKind::Explicit(vec![1]))).boxed())
        .with_play(hop(sites(SitesKind::Occupied(RoleType::Mover)), RelationType::Orthogonal).boxed())
        .with_end(end_rule(no(NoKind::Pieces(RoleType::Next)), ResultType::Loss, RoleType::Next))
        .build()
        .unwrap();
    let mut ctx = started(&game, 0);
    let moves = game.moves(&mut ctx);
    assert_eq!(1, moves.len());
    assert_eq!((0, 2), (moves[0].from, moves[0].to));
    let applied = game.apply(&mut ctx, &moves[0]);
    assert_eq!(1, applied.num_captures());
    assert_eq!(TrialStatus::Lost(2), ctx.trial.status());
    assert_eq!(1.0, ctx.trial.status().score_for(1, 2));
    assert!(game.moves(&mut ctx).is_empty());
}

#[test]
fn test_first_end_rule_that_holds_decides() {
    let game = GameBuilder::new("Draw first")
        .with_component(Component::new("Disc", 1))
        .with_play(pass().boxed())
        .with_end(end_rule(all(AllKind::Passed), ResultType::Draw, RoleType::Mover))
        .with_end(end_rule(is(IsKind::Mover(int(2))), ResultType::Win, RoleType::Mover))
        .build()
        .unwrap();
    let mut ctx = started(&game, 0);
    let m = game.moves(&mut ctx)[0].clone();
    let _ = game.apply(&mut ctx, &m);
    assert!(!ctx.trial.is_over());
    let m = game.moves(&mut ctx)[0].clone();
    let _ = game.apply(&mut ctx, &m);
    assert_eq!(TrialStatus::Draw, ctx.trial.status());
    assert_eq!(0.5, ctx.trial.status().score_for(2, 2));
}

#[test]
fn test_score_for_loss_splits_between_others() {
    assert_eq!(0.5, TrialStatus::Lost(1).score_for(2, 3));
    assert_eq!(0.0, TrialStatus::Lost(1).score_for(1, 3));
    assert_eq!(0.0, TrialStatus::Won(3).score_for(1, 3));
}
