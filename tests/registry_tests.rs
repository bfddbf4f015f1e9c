//! Registry facade with the built-in games wired through test stores.

use brick_arcade::score::HighScoreStore;
use brick_arcade::snake::SnakeGame;
use brick_arcade::tetris::TetrisGame;
use brick_arcade::types::{GameId, UserAction, SNAKE_HEAD_CELL};
use brick_arcade::{Game, Registry};

fn test_store(name: &str) -> HighScoreStore {
    let mut path = std::env::temp_dir();
    path.push(format!("registry-it-{name}-{}.score", std::process::id()));
    let _ = std::fs::remove_file(&path);
    HighScoreStore::at(path)
}

fn tetris_factory(seed: u32) -> Box<dyn Game> {
    Box::new(TetrisGame::with_store(seed, test_store("tetris")))
}

fn snake_factory(seed: u32) -> Box<dyn Game> {
    Box::new(SnakeGame::with_store(seed, test_store("snake")))
}

fn test_registry() -> Registry {
    let mut reg = Registry::new();
    assert!(reg.register(GameId::Tetris, tetris_factory));
    assert!(reg.register(GameId::Snake, snake_factory));
    reg
}

#[test]
fn available_lists_games_in_stable_order() {
    let reg = test_registry();
    let ids: Vec<GameId> = reg.available().collect();
    assert_eq!(ids, vec![GameId::Tetris, GameId::Snake]);
}

#[test]
fn no_active_game_until_first_switch() {
    let mut reg = test_registry();
    assert_eq!(reg.active_id(), None);
    assert!(reg.info().is_none());

    assert!(reg.switch(GameId::Snake, 1));
    assert_eq!(reg.active_id(), Some(GameId::Snake));
    assert!(reg.info().is_some());
}

#[test]
fn switching_games_swaps_the_snapshot_source() {
    let mut reg = test_registry();
    reg.switch(GameId::Snake, 1);
    reg.handle_input(UserAction::Start, false);
    let heads = reg
        .info()
        .unwrap()
        .field
        .iter()
        .flatten()
        .filter(|&&c| c == SNAKE_HEAD_CELL)
        .count();
    assert_eq!(heads, 1);

    reg.switch(GameId::Tetris, 1);
    let field = reg.info().unwrap().field;
    assert!(field.iter().flatten().all(|&c| c == 0));
}

#[test]
fn returning_to_a_game_starts_it_fresh() {
    let mut reg = test_registry();
    reg.switch(GameId::Snake, 1);
    reg.handle_input(UserAction::Start, false);
    reg.update();
    assert!(!reg.info().unwrap().field.iter().flatten().all(|&c| c == 0));

    reg.switch(GameId::Tetris, 1);
    reg.switch(GameId::Snake, 2);
    // The new snake instance has not been started yet.
    assert!(reg.info().unwrap().field.iter().flatten().all(|&c| c == 0));
}

#[test]
fn input_routes_to_the_active_game_only() {
    let mut reg = test_registry();
    reg.switch(GameId::Tetris, 3);
    reg.handle_input(UserAction::Start, false);
    reg.update();
    // A live piece appears once started and ticked.
    let filled = reg
        .info()
        .unwrap()
        .field
        .iter()
        .flatten()
        .filter(|&&c| c != 0)
        .count();
    assert_eq!(filled, 4);
}

#[test]
fn close_drops_the_active_game() {
    let mut reg = test_registry();
    reg.switch(GameId::Tetris, 4);
    reg.close();
    assert_eq!(reg.active_id(), None);
    assert!(reg.info().is_none());
}
