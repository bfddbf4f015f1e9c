//! Falling-block game seen purely through the public snapshot API.

use brick_arcade::score::HighScoreStore;
use brick_arcade::tetris::TetrisGame;
use brick_arcade::types::{UserAction, FIELD_WIDTH};
use brick_arcade::Game;

fn new_game(tag: &str, seed: u32) -> TetrisGame {
    let mut path = std::env::temp_dir();
    path.push(format!("tetris-it-{tag}-{}.score", std::process::id()));
    let _ = std::fs::remove_file(&path);
    TetrisGame::with_store(seed, HighScoreStore::at(path))
}

/// (x, y) of every non-empty field cell.
fn occupied_cells(game: &mut TetrisGame) -> Vec<(usize, usize)> {
    let field = game.info().field;
    let mut cells = Vec::new();
    for (y, row) in field.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell != 0 {
                cells.push((x, y));
            }
        }
    }
    cells
}

#[test]
fn fresh_game_shows_empty_playable_field() {
    let mut game = new_game("fresh", 1);
    let info = game.info();
    assert!(info.field.iter().flatten().all(|&c| c == 0));
    assert!(!info.game_over);
    assert!(!info.pause);
    assert_eq!(info.level, 1);
}

#[test]
fn started_game_exposes_piece_and_preview() {
    let mut game = new_game("started", 2);
    game.handle_input(UserAction::Start, false);
    game.update();

    assert_eq!(occupied_cells(&mut game).len(), 4);
    let filled = game.info().next.iter().flatten().filter(|&&c| c != 0).count();
    assert_eq!(filled, 4);
}

#[test]
fn piece_stops_at_the_left_wall() {
    let mut game = new_game("wall", 3);
    game.handle_input(UserAction::Start, false);
    game.update();

    for _ in 0..FIELD_WIDTH + 2 {
        game.handle_input(UserAction::Left, false);
    }
    let cells = occupied_cells(&mut game);
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap();
    assert_eq!(min_x, 0);
    assert_eq!(cells.len(), 4);
    assert!(!game.info().game_over);
}

#[test]
fn pause_is_a_toggle_and_freezes_the_field() {
    let mut game = new_game("pause", 4);
    game.handle_input(UserAction::Start, false);
    game.update();

    game.handle_input(UserAction::Pause, false);
    assert!(game.info().pause);

    let frozen = game.info().field;
    for _ in 0..5 {
        game.update();
    }
    assert_eq!(game.info().field, frozen);

    game.handle_input(UserAction::Pause, false);
    assert!(!game.info().pause);
}

#[test]
fn unattended_game_fills_up_and_ends() {
    let mut game = new_game("stack", 5);
    game.handle_input(UserAction::Start, false);

    let mut last_score = 0;
    let mut ended = false;
    for _ in 0..5000 {
        game.update();
        let info = game.info();
        assert!(info.score >= last_score);
        last_score = info.score;
        if info.game_over {
            ended = true;
            break;
        }
    }
    // Pieces spawn in the center column and stack without input.
    assert!(ended);
}

#[test]
fn restart_clears_the_board_and_score_but_keeps_best() {
    let mut game = new_game("restart", 6);
    game.handle_input(UserAction::Start, false);
    game.update();
    game.handle_input(UserAction::Terminate, false);
    assert!(game.info().game_over);

    game.handle_input(UserAction::Start, false);
    let info = game.info();
    assert!(!info.game_over);
    assert_eq!(info.score, 0);
}
