use super::*;
use crate::builder::GameBuilder;
use crate::game::{Board, Component};
use crate::ludeme::prelude::*;
use crate::types::logging::Event;

fn shuffle_game(no_repeat: Option<RepetitionType>) -> Game {
    let mut builder = GameBuilder::new("Shuffle")
        .with_board(Board::rectangle(1, 4))
        .with_component(Component::new("Rook1", 1))
        .with_component(Component::new("Rook2", 2))
        .with_start(Add::new("Rook1", sites(SitesKind::Explicit(vec![0]))).boxed())
        .with_start(Add::new("Rook2", sites(SitesKind::Explicit(vec![3]))).boxed())
        .with_play(
            step(
                sites(SitesKind::Occupied(RoleType::Mover)),
                StepDirections::Relation(RelationType::Orthogonal),
                false,
            )
            .boxed(),
        );
    if let Some(repetition) = no_repeat {
        builder = builder.with_no_repeat(NoRepeat::new(Some(repetition)));
    }
    builder.build().unwrap()
}

fn play(game: &Game, ctx: &mut Context<'_>, from: i32, to: i32) {
    let moves = game.moves(ctx);
    let m = moves.iter().find(|m| m.from == from && m.to == to).unwrap().clone();
    let _ = game.apply(ctx, &m);
}

fn targets(game: &Game, ctx: &mut Context<'_>) -> Vec<i32> {
    let mut targets: Vec<i32> = game.moves(ctx).iter().map(|m| m.to).collect();
    targets.sort();
    targets
}

#[test]
fn test_positional_no_repeat_rejects_return_to_start() {
    let game = shuffle_game(Some(RepetitionType::Positional));
    let mut ctx = ContextBuilder::new(&game).with_enable_log(true).build();
    game.start(&mut ctx);
    play(&game, &mut ctx, 0, 1);
    play(&game, &mut ctx, 3, 2);
    play(&game, &mut ctx, 1, 0);
    let before = ctx.state.clone();
    assert_eq!(vec![1], targets(&game, &mut ctx));
    assert_eq!(before, ctx.state);
    let rejected = ctx.log.filter(|e| match e {
        Event::RepetitionRejected { mover, .. } => Some(*mover),
        _ => None,
    });
    assert_eq!(vec![2], rejected);
}

#[test]
fn test_without_no_repeat_every_step_is_legal() {
    let game = shuffle_game(None);
    let mut ctx = started(&game, 0);
    play(&game, &mut ctx, 0, 1);
    play(&game, &mut ctx, 3, 2);
    play(&game, &mut ctx, 1, 0);
    assert_eq!(vec![1, 3], targets(&game, &mut ctx));
    let repeat = is(IsKind::Repeat(Some(RepetitionType::Positional)));
    assert!(!repeat.eval(&mut ctx));
    play(&game, &mut ctx, 2, 3);
    assert!(repeat.eval(&mut ctx));
}

#[test]
fn test_no_repeat_allows_fresh_positions() {
    let game = shuffle_game(Some(RepetitionType::Positional));
    let mut ctx = started(&game, 0);
    assert_eq!(vec![1], targets(&game, &mut ctx));
    play(&game, &mut ctx, 0, 1);
    assert_eq!(vec![2], targets(&game, &mut ctx));
    let no_repeat = NoRepeat::new(Some(RepetitionType::Positional));
    for m in game.moves(&mut ctx) {
        assert!(no_repeat.apply(&mut ctx, &m));
    }
}

#[test]
fn test_in_turn_repetition_only_checks_the_current_turn() {
    let game = shuffle_game(Some(RepetitionType::PositionalInTurn));
    let mut ctx = started(&game, 0);
    play(&game, &mut ctx, 0, 1);
    play(&game, &mut ctx, 3, 2);
    play(&game, &mut ctx, 1, 0);
    assert_eq!(vec![1, 3], targets(&game, &mut ctx));
    assert!(game.game_flags().contains(GameFlag::RepetitionCheck));
    assert!(game.concepts().contains(Concept::TurnKo));
}
