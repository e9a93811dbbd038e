use std::time::Duration;

use versus_bot::{
    build_pool, step_versus, BotPlayer, EvaluationObserver, Player, ScriptedPlayer,
    TranslatorConfig,
};
use versus_core::{Board, GameAction, Piece};
use versus_engine::{Game, RulesConfig, Side, Versus};
use versus_eval::{EvalError, EvalInput, Evaluator, HeuristicEvaluator};
use versus_search::{BeamConfig, BeamSearch};

const WAIT: Duration = Duration::from_secs(30);

struct Offline;

impl Evaluator for Offline {
    fn evaluate_batch(&self, _inputs: &[EvalInput]) -> Result<Vec<f32>, EvalError> {
        Err(EvalError::Unavailable("model not loaded".into()))
    }
}

fn heuristic_search(depth: usize) -> BeamSearch<HeuristicEvaluator> {
    BeamSearch::new(
        BeamConfig {
            depth,
            ..BeamConfig::heuristic()
        },
        HeuristicEvaluator::default(),
    )
}

fn heuristic_bot(depth: usize) -> BotPlayer<HeuristicEvaluator> {
    let pool = build_pool(2).expect("thread pool");
    BotPlayer::new(
        heuristic_search(depth),
        TranslatorConfig::from_rules(&RulesConfig::versus(), 1),
        pool,
    )
}

#[test]
fn test_bot_places_pieces() {
    let mut game = Game::new(RulesConfig::versus(), 11).expect("valid config");
    let mut bot = heuristic_bot(2);
    let mut now = 0;

    while game.spawn_count() < 12 && now < 120_000 {
        let action = bot.next_action(&game);
        if bot.is_thinking() {
            assert!(bot.wait_for_plan(&game, WAIT));
        }
        game.apply_action(action, now);
        now += 16;
        game.tick(now);
    }
    assert!(game.spawn_count() >= 12);
    assert!(!game.is_game_over());
}

#[test]
fn test_first_call_requests_and_idles() {
    let game = Game::new(RulesConfig::versus(), 5).expect("valid config");
    let mut bot = heuristic_bot(1);
    assert_eq!(bot.next_action(&game), GameAction::None);
    assert!(bot.is_thinking());
    assert!(bot.wait_for_plan(&game, WAIT));
    assert!(!bot.is_thinking());
    assert!(bot.pending() > 0);
}

#[test]
fn test_clear_forgets_plan() {
    let game = Game::new(RulesConfig::versus(), 5).expect("valid config");
    let mut bot = heuristic_bot(1);
    bot.next_action(&game);
    assert!(bot.wait_for_plan(&game, WAIT));
    assert!(bot.pending() > 0);

    bot.clear();
    assert_eq!(bot.pending(), 0);
    assert!(!bot.is_thinking());
    // a new request starts right away
    assert_eq!(bot.next_action(&game), GameAction::None);
    assert!(bot.is_thinking());
}

#[test]
fn test_plan_for_old_piece_is_dropped() {
    let mut game = Game::new(RulesConfig::versus(), 5).expect("valid config");
    let mut bot = heuristic_bot(1);
    bot.next_action(&game);
    assert!(game.apply_action(GameAction::HardDrop, 0));
    game.tick(16);
    assert_eq!(game.spawn_count(), 2);

    assert!(bot.wait_for_plan(&game, WAIT));
    assert_eq!(bot.pending(), 0);
    assert!(!bot.is_thinking());
}

#[test]
fn test_oracle_failure_does_not_block() {
    let game = Game::new(RulesConfig::versus(), 5).expect("valid config");
    let pool = build_pool(1).expect("thread pool");
    let mut bot = BotPlayer::new(
        BeamSearch::new(BeamConfig::default(), Offline),
        TranslatorConfig::default(),
        pool,
    );
    assert_eq!(bot.next_action(&game), GameAction::None);
    assert!(bot.wait_for_plan(&game, WAIT));
    assert_eq!(bot.pending(), 0);
    assert!(!bot.is_thinking());
    // retried on the next tick
    assert_eq!(bot.next_action(&game), GameAction::None);
    assert!(bot.is_thinking());
}

#[test]
fn test_observer_publishes_on_spawn() {
    let mut game = Game::new(RulesConfig::versus(), 3).expect("valid config");
    let pool = build_pool(1).expect("thread pool");
    let mut observer = EvaluationObserver::new(heuristic_search(1), pool);

    observer.observe(&game);
    assert!(observer.is_thinking());
    let first = observer.wait(WAIT).expect("scored");
    assert!(first.is_finite());

    // same piece: nothing new to evaluate
    observer.observe(&game);
    assert!(!observer.is_thinking());

    game.apply_action(GameAction::HardDrop, 0);
    game.tick(16);
    observer.observe(&game);
    assert!(observer.is_thinking());
    assert!(observer.wait(WAIT).is_some());
}

#[test]
fn test_step_versus_routes_scripted_quad() {
    let config = RulesConfig::versus();
    let mut board = Board::new();
    for y in 0..6 {
        for x in 0..9 {
            board.set(x, y, true);
        }
    }
    let left = Game::from_position(config.clone(), 1, board, Some(Piece::I)).expect("valid config");
    let right = Game::new(config, 2).expect("valid config");
    let mut versus = Versus::from_games(left, right);

    let mut quad = ScriptedPlayer::new([
        GameAction::RotateRight,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
    ]);
    let mut idle = ScriptedPlayer::default();
    let mut now = 0;
    while quad.remaining() > 0 {
        now += 16;
        step_versus(&mut versus, &mut quad, &mut idle, now);
    }
    assert_eq!(versus.game(Side::Right).pending_garbage(), 4);
    assert_eq!(versus.game(Side::Left).last_clear().map(|c| c.lines), Some(4));
}
