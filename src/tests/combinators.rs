use super::*;
use crate::action_list;
use crate::builder::GameBuilder;
use crate::demo;
use crate::game::{Board, Component};
use crate::ludeme::prelude::*;
use crate::moves::Action;
use crate::state::{Die, Piece};

fn targets(moves: &MoveList) -> Vec<i32> {
    moves.iter().map(|m| m.to).collect()
}

#[test]
fn test_for_each_site_binds_each_site_and_restores() {
    let game = demo::breakthrough(4).unwrap();
    let mut ctx = Context::new(&game);
    let g = for_each_site(
        sites(SitesKind::Explicit(vec![3, 5, 9])),
        Box::new(Probe(EvalContextData::Site)),
    );
    let moves = g.eval(&mut ctx);
    assert_eq!(vec![3, 5, 9], targets(&moves));
    assert_eq!(OFF, ctx.get(EvalContextData::Site));

    let mut outer = ctx.bind(EvalContextData::Site, 7);
    let moves = g.eval(&mut outer);
    assert_eq!(3, moves.len());
    assert_eq!(7, outer.get(EvalContextData::Site));
}

#[test]
fn test_for_each_value_and_otherwise() {
    let game = demo::breakthrough(4).unwrap();
    let mut ctx = Context::new(&game);
    let g = for_each_value(int_range(int(2), int(4)), Box::new(Probe(EvalContextData::Value)));
    assert_eq!(vec![2, 3, 4], targets(&g.eval(&mut ctx)));
    assert_eq!(OFF, ctx.get(EvalContextData::Value));

    let empty = ForEachValue {
        otherwise: Some(Box::new(Probe(EvalContextData::Value))),
        ..for_each_value(int_range(int(4), int(2)), Box::new(Probe(EvalContextData::Value)))
    };
    assert_eq!(vec![OFF], targets(&empty.eval(&mut ctx)));
}

#[test]
fn test_for_each_player_in_seating_order() {
    let game = GameBuilder::new("Three").with_players(3).build().unwrap();
    let mut ctx = Context::new(&game);
    let g = for_each_player(Box::new(Probe(EvalContextData::Player)));
    assert_eq!(vec![1, 2, 3], targets(&g.eval(&mut ctx)));
    assert_eq!(OFF, ctx.get(EvalContextData::Player));
}

#[test]
fn test_if_moves_and_union() {
    let game = demo::breakthrough(4).unwrap();
    let mut ctx = Context::new(&game);
    let union = union(vec![
        if_moves(bool_const(true), pass().boxed(), None).boxed(),
        if_moves(bool_const(false), pass().boxed(), Some(roll().boxed())).boxed(),
        if_moves(bool_const(false), pass().boxed(), None).boxed(),
    ]);
    let moves = union.eval(&mut ctx);
    assert_eq!(2, moves.len());
    assert!(moves[0].is_pass());
    assert_eq!(action_list![Action::Roll], moves[1].actions);
}

fn capture_game() -> Game {
    GameBuilder::new("Captures")
        .with_board(Board::rectangle(1, 8))
        .with_component(Component::new("Pawn", 2).with_value(1))
        .with_component(Component::new("Queen", 2).with_value(5))
        .build()
        .unwrap()
}

fn capture_context(game: &Game) -> Context<'_> {
    let mut ctx = Context::new(game);
    for site in [1, 2, 5] {
        ctx.state.push_piece(site, Piece::new(1, 2));
    }
    for site in [3, 4] {
        ctx.state.push_piece(site, Piece::new(2, 2));
    }
    ctx.state.push_piece(0, Piece::new(1, 2));
    ctx
}

fn removing(sites: &[i32]) -> Move {
    let mut actions = action_list![];
    for site in sites {
        actions.push(Action::Remove { site: *site });
    }
    Move::new(1, OFF, OFF, actions)
}

fn candidates() -> FixedMoves {
    FixedMoves(vec![removing(&[]), removing(&[1, 2]), removing(&[3, 4]), removing(&[5])])
}

#[test]
fn test_max_captures_keeps_ties_in_order() {
    let game = capture_game();
    let mut ctx = capture_context(&game);
    let before = ctx.state.clone();
    let g = max_captures(candidates().boxed(), false);
    let moves = g.eval(&mut ctx);
    assert_eq!(vec![removing(&[1, 2]), removing(&[3, 4])], moves);
    assert_eq!(before, ctx.state);
}

#[test]
fn test_max_captures_breaks_ties_by_value() {
    let game = capture_game();
    let mut ctx = capture_context(&game);
    let g = max_captures(candidates().boxed(), true);
    assert_eq!(vec![removing(&[3, 4])], g.eval(&mut ctx));
    assert!(g.game_flags(&game).contains(GameFlag::PieceValue));
}

#[test]
fn test_decision_captured_value_reads_the_board() {
    let game = capture_game();
    let ctx = capture_context(&game);
    assert_eq!(10, removing(&[3, 4]).captured_value(&ctx));
    assert_eq!(1, removing(&[1]).captured_value(&ctx));
    assert_eq!(0, removing(&[6]).captured_value(&ctx));
    assert_eq!(2, removing(&[3, 4]).num_captures());
}

#[test]
fn test_max_captures_counts_consequences() {
    let game = capture_game();
    let mut ctx = capture_context(&game);
    let chained = removing(&[5]).with_then(Some(&then(FixedMoves(vec![removing(&[0])]))));
    let g = max_captures(FixedMoves(vec![removing(&[1]), chained.clone()]).boxed(), false);
    assert_eq!(vec![chained], g.eval(&mut ctx));
}

#[test]
fn test_min_captures_keeps_ties_in_order() {
    let game = capture_game();
    let mut ctx = capture_context(&game);
    let before = ctx.state.clone();
    let options = || FixedMoves(vec![removing(&[1]), removing(&[3]), removing(&[5, 1])]).boxed();
    let g = min_captures(options(), false);
    assert_eq!(vec![removing(&[1]), removing(&[3])], g.eval(&mut ctx));
    assert_eq!(before, ctx.state);

    let g = min_captures(options(), true);
    assert_eq!(vec![removing(&[1])], g.eval(&mut ctx));
    assert!(g.concepts(&game).contains(Concept::MinCapture));
}

fn journeys() -> FixedMoves {
    FixedMoves(vec![
        Move::new(1, 0, 2, action_list![Action::MovePiece { from: 0, to: 2 }]),
        Move::new(1, 0, 5, action_list![Action::MovePiece { from: 0, to: 5 }]),
        Move::new(1, 7, 2, action_list![Action::MovePiece { from: 7, to: 2 }]),
    ])
}

#[test]
fn test_max_distance() {
    let game = capture_game();
    let mut ctx = Context::new(&game);
    let g = max_distance(journeys().boxed(), RelationType::Orthogonal);
    assert_eq!(vec![5, 2], targets(&g.eval(&mut ctx)));
}

#[test]
fn test_min_distance() {
    let game = capture_game();
    let mut ctx = Context::new(&game);
    let g = min_distance(journeys().boxed(), RelationType::Orthogonal);
    let moves = g.eval(&mut ctx);
    assert_eq!(1, moves.len());
    assert_eq!((0, 2), (moves[0].from, moves[0].to));
}

#[test]
fn test_combinators_attach_their_continuation() {
    let game = capture_game();
    let mut ctx = capture_context(&game);
    let g = for_each_site(
        sites(SitesKind::Explicit(vec![3, 5])),
        Box::new(Probe(EvalContextData::Site)),
    )
    .with_then(then(FixedMoves(vec![removing(&[0])])));
    let moves = g.eval(&mut ctx);
    assert_eq!(vec![3, 5], targets(&moves));
    assert!(moves.iter().all(|m| m.then.len() == 1));
    assert_eq!(g.then(), moves[1].then.first());

    let applied = moves[0].apply(&mut ctx, false);
    assert!(ctx.state.is_empty(0));
    assert_eq!(1, applied.num_captures());
    applied.undo(&mut ctx, false);
    assert!(!ctx.state.is_empty(0));

    let nested = union(vec![g.boxed(), pass().boxed()]).with_then(then(FixedMoves(vec![removing(&[1])])));
    let moves = nested.eval(&mut ctx);
    assert_eq!(vec![2, 2, 1], moves.iter().map(|m| m.then.len()).collect::<Vec<_>>());
}

#[test]
fn test_filter_moves_binds_from_and_to() {
    let game = demo::breakthrough(6).unwrap();
    let mut ctx = started(&game, 0);
    let g = filter_moves(
        step(
            sites(SitesKind::Occupied(RoleType::Mover)),
            StepDirections::Forwards,
            false,
        )
        .boxed(),
        compare(CompareOp::Eq, var(EvalContextData::From), int(7)),
    );
    let moves = g.eval(&mut ctx);
    assert_eq!(3, moves.len());
    assert!(moves.iter().all(|m| m.from == 7));
    assert_eq!(OFF, ctx.get(EvalContextData::From));
    assert_eq!(OFF, ctx.get(EvalContextData::To));
}

#[test]
fn test_for_each_die_uses_each_face_once() {
    let game = demo::dice_race(12).unwrap();
    let mut ctx = started(&game, 0);
    ctx.state.set_die(0, Die { face: 3, used: false });
    ctx.state.set_die(1, Die { face: 3, used: false });
    let g = for_each_die(Box::new(Probe(EvalContextData::Pips)));
    let moves = g.eval(&mut ctx);
    assert_eq!(vec![3], targets(&moves));
    assert_eq!(Some(&Action::UseDie { index: 0 }), moves[0].actions.last());

    ctx.state.set_die(1, Die { face: 5, used: false });
    ctx.state.set_die(0, Die { face: 3, used: true });
    let moves = g.eval(&mut ctx);
    assert_eq!(vec![5], targets(&moves));
    assert_eq!(Some(&Action::UseDie { index: 1 }), moves[0].actions.last());
    assert_eq!(OFF, ctx.get(EvalContextData::Pips));
}

#[test]
fn test_dice_race_keeps_turn_until_dice_are_used() {
    let game = demo::dice_race(40).unwrap();
    let mut ctx = started(&game, 5);
    assert!(ctx.state.dice().iter().all(|d| d.face >= 1 && !d.used));
    let m = game.moves(&mut ctx)[0].clone();
    let _ = game.apply(&mut ctx, &m);
    assert_eq!(1, ctx.state.mover());
    assert_eq!(1, ctx.state.dice().iter().filter(|d| d.used).count());
    let m = game.moves(&mut ctx)[0].clone();
    let _ = game.apply(&mut ctx, &m);
    assert_eq!(2, ctx.state.mover());
    assert!(ctx.state.dice().iter().all(|d| !d.used));
    assert_eq!(Some(40), ctx.state.board().sites_occupied_by(2).next());
}
