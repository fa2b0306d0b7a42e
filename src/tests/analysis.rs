use super::*;
use crate::builder::GameBuilder;
use crate::demo;
use crate::game::Component;
use crate::ludeme::prelude::*;
use crate::types::logging::Event;

fn assert_monotonic(node: &dyn Ludeme, game: &Game) {
    let flags = node.game_flags(game);
    let concepts = node.concepts(game);
    let reads = node.reads_eval_context_recursive();
    for c in node.children() {
        assert!(flags.is_superset(c.game_flags(game)), "{}", node.name());
        assert!(concepts.is_superset(c.concepts(game)), "{}", node.name());
        assert!(reads.is_superset(c.reads_eval_context_recursive()), "{}", node.name());
        if node.is_static() {
            assert!(c.is_static(), "{} is static but {} is not", node.name(), c.name());
        }
        assert_monotonic(c, game);
    }
}

#[test]
fn test_flags_and_concepts_are_monotonic() {
    for game in [demo::breakthrough(6).unwrap(), demo::dice_race(12).unwrap()] {
        for root in game.rules.roots() {
            assert!(game.game_flags().is_superset(root.game_flags(&game)));
            assert!(game.concepts().is_superset(root.concepts(&game)));
            assert_monotonic(root, &game);
        }
    }
}

#[test]
fn test_demo_games_flags() {
    let breakthrough = demo::breakthrough(6).unwrap();
    assert!(!breakthrough.uses_stochasticity());
    assert!(breakthrough.game_flags().contains(GameFlag::Stalemate));
    assert!(breakthrough.game_flags().contains(GameFlag::PieceValue));
    assert!(breakthrough.concepts().contains(Concept::SquareTiling));
    assert!(breakthrough.report().is_empty());

    let race = demo::dice_race(12).unwrap();
    assert!(race.uses_stochasticity());
    assert!(race.game_flags().contains(GameFlag::Consequences));
    assert!(race.concepts().contains(Concept::ForEachDie));
    assert!(race.concepts().contains(Concept::Dice));
    assert!(race.writes_eval_context().contains(EvalContextData::Pips));
    assert!(race.reads_eval_context().contains(EvalContextData::Pips));
}

#[test]
fn test_static_subtree_is_cached_at_load_time() {
    let game = demo::breakthrough(4).unwrap();
    let cached = Arith::new(ArithOp::Mul, int(6), arith(ArithOp::Add, int(3), int(4)));
    let fresh = Arith::new(ArithOp::Mul, int(6), arith(ArithOp::Add, int(3), int(4)));
    assert!(cached.is_static());
    assert_eq!(2, cached.preprocess(&game));
    assert!(cached.precomputed.is_set());
    assert!(!fresh.precomputed.is_set());
    let mut ctx = Context::new(&game);
    assert_eq!(42, cached.eval(&mut ctx));
    assert_eq!(fresh.eval(&mut ctx), cached.eval(&mut ctx));
}

#[test]
fn test_state_dependent_subtree_is_not_cached() {
    let game = demo::breakthrough(4).unwrap();
    let node = Arith::new(ArithOp::Add, mover(), int(10));
    assert!(!node.is_static());
    assert_eq!(0, node.preprocess(&game));
    let mut ctx = started(&game, 0);
    assert_eq!(11, node.eval(&mut ctx));
    let m = game.moves(&mut ctx)[0].clone();
    let _ = game.apply(&mut ctx, &m);
    assert_eq!(12, node.eval(&mut ctx));
}

#[test]
fn test_reading_a_transient_field_is_not_static() {
    let node = Compare::new(CompareOp::Eq, var(EvalContextData::Site), int(3));
    assert!(!node.is_static());
    assert!(node.reads_eval_context_recursive().contains(EvalContextData::Site));
    let region = sites(SitesKind::Board(None));
    let filter = for_each_site(region, Box::new(Probe(EvalContextData::Site)));
    assert!(filter.writes_eval_context_recursive().contains(EvalContextData::Site));
    assert!(filter.reads_eval_context_recursive().contains(EvalContextData::Site));
}

#[test]
fn test_load_log_records_preprocessing() {
    let game = GameBuilder::new("Logged")
        .with_component(Component::new("Disc", 1))
        .with_play(set_score(mover(), arith(ArithOp::Add, int(1), int(2))).boxed())
        .with_enable_log(true)
        .build()
        .unwrap();
    assert_eq!(1, game.static_nodes());
    let events = game.load_log().filter(|e| match e {
        Event::Preprocessed { static_nodes } => Some(*static_nodes),
        _ => None,
    });
    assert_eq!(vec![1], events);
    assert!(game.game_flags().contains(GameFlag::Score));
}
