use super::*;
use crate::action_list;
use crate::builder::GameBuilder;
use crate::demo;
use crate::game::{ApplyError, Component, LoadError};
use crate::ludeme::prelude::*;
use crate::moves::Action;

fn rejected(result: Result<Game, LoadError>) -> Vec<Diagnostic> {
    match result {
        Err(LoadError::Rejected { diagnostics, .. }) => diagnostics,
        Err(e) => panic!("unexpected error {e}"),
        Ok(game) => panic!("{} was accepted", game.name()),
    }
}

fn with_play(play: MovesFn) -> Result<Game, LoadError> {
    GameBuilder::new("Invalid")
        .with_component(Component::new("Disc", 1))
        .with_play(play)
        .build()
}

#[test]
fn test_dice_functions_require_dice() {
    let diagnostics = rejected(with_play(set_score(mover(), dice_total()).boxed()));
    assert_eq!(1, diagnostics.len());
    assert_eq!(DiagnosticKind::MissingRequirement, diagnostics[0].kind);
    assert_eq!(Severity::Error, diagnostics[0].severity);
    assert_eq!("DiceTotal", diagnostics[0].ludeme);

    let diagnostics = rejected(with_play(roll().boxed()));
    assert_eq!("Roll", diagnostics[0].ludeme);

    let game = demo::breakthrough(4).unwrap();
    let mut report = Report::new();
    assert!(DiceTotal.missing_requirement(&game, &mut report));
    assert!(report.has_errors());

    let race = demo::dice_race(8).unwrap();
    let mut report = Report::new();
    assert!(!DiceTotal.missing_requirement(&race, &mut report));
    assert!(report.is_empty());
}

#[test]
fn test_unknown_piece_and_team_are_missing_requirements() {
    let diagnostics = rejected(with_play(Add::new("Ghost", sites(SitesKind::Board(None))).boxed()));
    assert_eq!(DiagnosticKind::MissingRequirement, diagnostics[0].kind);
    assert!(diagnostics[0].message.contains("Ghost"));

    let team = AddToTeam {
        team: 3,
        player: mover(),
        then: None,
    };
    let diagnostics = rejected(with_play(team.boxed()));
    assert_eq!("AddToTeam", diagnostics[0].ludeme);
}

#[test]
fn test_division_by_constant_zero_will_crash() {
    let diagnostics = rejected(with_play(
        set_score(mover(), arith(ArithOp::Div, int(1), arith(ArithOp::Sub, int(2), int(2)))).boxed(),
    ));
    assert_eq!(1, diagnostics.len());
    assert_eq!(DiagnosticKind::WillCrash, diagnostics[0].kind);

    let game = demo::breakthrough(4).unwrap();
    let mut report = Report::new();
    let node = float_div(float(1.0), float(0.0));
    assert!(node.will_crash(&game, &mut report));
    let node = arith(ArithOp::Mod, int(1), mover());
    assert!(!node.will_crash(&game, &mut report));
    assert_eq!(1, report.errors().count());
}

#[test]
fn test_division_by_zero_at_runtime_is_off() {
    let game = demo::breakthrough(4).unwrap();
    let mut ctx = Context::new(&game);
    let node = arith(ArithOp::Div, int(7), arith(ArithOp::Sub, mover(), int(1)));
    assert_eq!(OFF, node.eval(&mut ctx));
    let node = float_div(float(1.0), to_float(arith(ArithOp::Sub, mover(), int(1))));
    assert_eq!(OFF as f32, node.eval(&mut ctx));
}

#[test]
fn test_every_problem_is_reported() {
    let play = union(vec![
        set_score(mover(), dice_total()).boxed(),
        set_score(mover(), arith(ArithOp::Div, int(1), int(0))).boxed(),
        roll().boxed(),
    ]);
    let diagnostics = rejected(with_play(play.boxed()));
    assert_eq!(3, diagnostics.len());
    let crashes = diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::WillCrash)
        .count();
    assert_eq!(1, crashes);
}

#[test]
fn test_invalid_equipment() {
    let result = GameBuilder::new("Nobody").with_players(0).build();
    assert!(matches!(result, Err(LoadError::InvalidEquipment(_))));
    let result = GameBuilder::new("Blank dice").with_dice(2, 0).build();
    assert!(matches!(result, Err(LoadError::InvalidEquipment(_))));
}

#[test]
fn test_role_beyond_player_count() {
    let diagnostics = rejected(with_play(
        step(sites(SitesKind::Occupied(RoleType::Player(3))), StepDirections::Forwards, false).boxed(),
    ));
    assert_eq!(DiagnosticKind::MissingRequirement, diagnostics[0].kind);
}

#[test]
fn test_apply_checked() {
    let game = demo::breakthrough(4).unwrap();
    let mut ctx = started(&game, 0);
    let bogus = Move::new(1, 0, 15, action_list![Action::MovePiece { from: 0, to: 15 }]);
    assert_eq!(Err(ApplyError::IllegalMove), game.apply_checked(&mut ctx, &bogus).map(|_| ()));
    let m = game.moves(&mut ctx)[0].clone();
    assert!(game.apply_checked(&mut ctx, &m).is_ok());

    let _ = random_playout(&mut ctx, 0, 200);
    assert!(ctx.trial.is_over());
    let m = Move::pass(ctx.state.mover());
    assert_eq!(Err(ApplyError::GameOver), game.apply_checked(&mut ctx, &m).map(|_| ()));
}
