//! Full-game scenarios driven through the public API only.

use quarto_core::{AttrValue, Attribute, Game, GameResult, Move, Piece, Player};

/// Scripted turn: board coordinates plus the index of the pick in the
/// current free pool.
struct Turn {
    x: i32,
    y: i32,
    pick: Option<usize>,
}

fn t(x: i32, y: i32, pick: usize) -> Turn {
    Turn { x, y, pick: Some(pick) }
}

fn run_script(game: &mut Game, script: &[Turn]) {
    for turn in script {
        let pick = turn.pick.map(|i| game.frees()[i]);
        game.run_turn(turn.x, turn.y, pick);
    }
}

// Five big pieces: every placement in row 2 shares a value, so the fourth
// placement completes it.
#[test]
fn scripted_game_ends_in_a_row_win() {
    let mut game = Game::standard();
    let line: Vec<Piece> = game.find_pieces(&[AttrValue::Big]).into_iter().take(5).collect();

    game.run_turn(-1, -1, Some(line[0]));
    game.run_turn(0, 2, Some(line[1]));
    game.run_turn(1, 2, Some(line[2]));
    game.run_turn(2, 2, Some(line[3]));
    game.run_turn(3, 2, Some(line[4]));

    assert_eq!(game.winner(), GameResult::Won(Player::One));
    assert_eq!(game.history().len(), 5);
    assert_eq!(game.actives().len(), 4);
    // A decided game ignores further input.
    let remaining = game.frees().len();
    let free = game.frees()[0];
    game.run_turn(0, 0, Some(free));
    assert_eq!(game.frees().len(), remaining);
    assert_eq!(game.winner(), GameResult::Won(Player::One));
}

#[test]
fn scripted_game_on_custom_board() {
    let mut game = Game::with_attribute(Attribute::SLASH);
    assert_eq!(game.dim(), 5);
    let line: Vec<Piece> = game.find_pieces(&[AttrValue::Yellow]).into_iter().take(6).collect();

    game.run_turn(-1, -1, Some(line[0]));
    for (i, p) in line[1..].iter().enumerate() {
        game.run_turn(i as i32, i as i32, Some(*p));
    }

    // Six turns total: the diagonal completes on an even turn, so the win
    // falls to the second player.
    assert_eq!(game.winner(), GameResult::Won(Player::Two));
}

#[test]
fn mixed_line_without_shared_value_does_not_win() {
    let mut game = Game::standard();
    // Encodings 0 and 15 share nothing; alternating them along a row can
    // never complete it.
    let p0 = game.find_pieces(&[
        AttrValue::Big,
        AttrValue::Square,
        AttrValue::Brown,
        AttrValue::Hollow,
    ])[0];
    let p15 = game.find_pieces(&[
        AttrValue::Small,
        AttrValue::Circle,
        AttrValue::Yellow,
        AttrValue::Solid,
    ])[0];

    game.run_turn(-1, -1, Some(p0));
    game.run_turn(0, 0, Some(p15));
    // Neighbors off the line keep the scripted picks legal.
    let filler: Vec<Piece> = game.frees().iter().copied().take(3).collect();
    game.run_turn(1, 0, Some(filler[0]));
    game.run_turn(0, 2, Some(p15)); // p15 already placed, rejected
    assert_eq!(game.history().len(), 3);
    assert_eq!(game.winner(), GameResult::InProgress);
}

#[test]
fn full_game_is_reversible_move_by_move() {
    let mut game = Game::standard();
    let script = [
        Turn { x: -1, y: -1, pick: Some(0) },
        t(0, 0, 3),
        t(1, 1, 6),
        t(3, 0, 2),
        t(2, 3, 9),
        t(0, 2, 1),
    ];

    let mut keys = vec![game.board_key()];
    let mut turns = vec![game.turn()];
    run_script(&mut game, &script[..1]);
    keys.push(game.board_key());
    turns.push(game.turn());
    for s in &script[1..] {
        run_script(&mut game, std::slice::from_ref(s));
        keys.push(game.board_key());
        turns.push(game.turn());
    }

    // No line ever reaches three pieces in this script, so every turn is
    // accepted and recorded.
    while game.undo_turn(true).is_some() {
        keys.pop();
        turns.pop();
        assert_eq!(game.board_key(), *keys.last().unwrap());
        assert_eq!(game.turn(), *turns.last().unwrap());
    }
    assert_eq!(game.frees().len(), 16);
    assert!(game.actives().is_empty());
    assert_eq!(game.winner(), GameResult::InProgress);
}

#[test]
fn replaying_recorded_history_reproduces_the_position() {
    let mut game = Game::standard();
    let script = [
        Turn { x: -1, y: -1, pick: Some(0) },
        t(2, 1, 4),
        t(0, 3, 7),
        t(3, 3, 0),
    ];
    run_script(&mut game, &script);

    let key = game.board_key();
    let history: Vec<Move> = game.history().to_vec();

    let mut replay = Game::standard();
    for m in history {
        replay.apply(m, false);
    }
    assert_eq!(replay.board_key(), key);
    assert_eq!(replay.turn(), game.turn());
    assert_eq!(replay.history(), game.history());
}

#[test]
fn snapshot_serializes_a_midgame_position() {
    let mut game = Game::standard();
    let script = [Turn { x: -1, y: -1, pick: Some(0) }, t(1, 2, 5), t(3, 0, 8)];
    run_script(&mut game, &script);

    let snap = game.snapshot();
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["width"], 4);
    assert_eq!(json["cells"].as_array().unwrap().len(), 16);
    assert_eq!(json["moves"], 3);
    assert_eq!(json["result"], "InProgress");
    assert_eq!(json["key"], game.board_key());
    assert_eq!(
        json["frees"].as_array().unwrap().len() + json["actives"].as_array().unwrap().len(),
        15 // one piece is the designated pick, in neither pool
    );
}
