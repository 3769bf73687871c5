//! Game-level behavior of the four strategies.

use quarto_core::{AttrValue, Game, GameAi, GameResult, Piece, Player};
use quarto_ai::{FirstAi, HardAi, NormalAi, RandomAi};

fn by_enc(game: &Game, enc: i32) -> Piece {
    game.frees()
        .iter()
        .copied()
        .find(|p| p.encoding == enc)
        .unwrap()
}

/// Fills rows 0 to 2 with a hand-picked arrangement where every completed
/// row, every column, and both diagonals contain pieces with no common
/// attribute value. Twelve pieces go down without a win; `last_pick`
/// becomes the designated piece for the thirteenth turn (player two).
fn fill_three_rows(game: &mut Game, last_pick: i32) {
    let picks = [0, 1, 13, 3, 15, 11, 2, 12, 4, 14, 5, 10];
    let cells = [
        (0, 0), (1, 0), (2, 0), (3, 0),
        (0, 1), (1, 1), (2, 1), (3, 1),
        (0, 2), (1, 2), (2, 2), (3, 2),
    ];

    let p = by_enc(game, picks[0]);
    game.run_turn(-1, -1, Some(p));
    for i in 0..12 {
        let next = if i + 1 < 12 { picks[i + 1] } else { last_pick };
        let (x, y) = cells[i];
        let p = by_enc(game, next);
        game.run_turn(x, y, Some(p));
    }
    assert_eq!(game.history().len(), 13);
    assert_eq!(game.winner(), GameResult::InProgress);
}

#[test]
fn dual_first_ai_marches_across_the_top_row() {
    let mut game = Game::standard();
    let (p0, p1, p2, p3) = (
        game.frees()[0],
        game.frees()[1],
        game.frees()[2],
        game.frees()[3],
    );
    game.set_ai(Some(Box::new(FirstAi)), Player::One);
    game.set_ai(Some(Box::new(FirstAi)), Player::Two);

    game.run_turn(-1, -1, None);
    assert_eq!(game.next_pick(), Some(p0));

    game.run_turn(-1, -1, None);
    assert_eq!(game.piece_at(0, 0), Some(p0));
    assert_eq!(game.next_pick(), Some(p1));

    game.run_turn(-1, -1, None);
    assert_eq!(game.piece_at(1, 0), Some(p1));
    assert_eq!(game.next_pick(), Some(p2));

    game.run_turn(-1, -1, None);
    assert_eq!(game.piece_at(2, 0), Some(p2));
    assert_eq!(game.next_pick(), Some(p3));
}

#[test]
fn cpu_and_manual_turns_alternate() {
    let mut game = Game::standard();
    let (p0, p1, p2, p3) = (
        game.frees()[0],
        game.frees()[1],
        game.frees()[2],
        game.frees()[3],
    );
    game.set_ai(Some(Box::new(FirstAi)), Player::One);

    game.run_turn(-1, -1, None);
    assert_eq!(game.next_pick(), Some(p0));

    game.run_turn(3, 3, Some(p1));
    assert_eq!(game.piece_at(3, 3), Some(p0));
    assert_eq!(game.next_pick(), Some(p1));

    game.run_turn(-1, -1, None);
    assert_eq!(game.piece_at(0, 0), Some(p1));
    assert_eq!(game.next_pick(), Some(p2));

    game.run_turn(2, 2, Some(p3));
    assert_eq!(game.piece_at(2, 2), Some(p2));
    assert_eq!(game.next_pick(), Some(p3));
}

#[test]
fn normal_ai_completes_an_open_row() {
    let mut game = Game::standard();
    let big = game.find_pieces(&[AttrValue::Big]);
    game.run_turn(-1, -1, Some(big[0]));
    game.run_turn(0, 0, Some(big[1]));
    game.run_turn(1, 0, Some(big[2]));
    game.run_turn(2, 0, Some(big[3]));

    // Three big pieces in row 0 and a big piece in hand: the win is there
    // for the taking.
    let m = NormalAi.gen_move(&mut game);
    assert_eq!((m.x, m.y), (3, 0));
    game.run_turn(m.x, m.y, m.picked);
    assert_eq!(game.winner(), GameResult::Won(Player::One));
}

#[test]
fn hard_ai_takes_an_immediate_win() {
    let mut game = Game::standard();
    // Piece 6 is yellow; the anti-diagonal pieces all share yellow, so
    // (0, 3) completes it.
    fill_three_rows(&mut game, 6);

    let mut ai = HardAi::new();
    let m = ai.gen_move(&mut game);
    assert_eq!((m.x, m.y), (0, 3));
    game.run_turn(m.x, m.y, m.picked);
    assert_eq!(game.winner(), GameResult::Won(Player::Two));
}

#[test]
fn hard_ai_search_leaves_the_game_untouched() {
    let mut game = Game::standard();
    // Piece 9 completes nothing, so the shortcut misses and the position
    // gets searched.
    fill_three_rows(&mut game, 9);

    let key = game.board_key();
    let mut frees: Vec<i32> = game.frees().iter().map(|p| p.encoding).collect();
    frees.sort_unstable();
    let turn = game.turn();
    let history = game.history().len();

    let mut ai = HardAi::new();
    let m = ai.gen_move(&mut game);

    assert_eq!(game.board_key(), key);
    let mut frees_after: Vec<i32> = game.frees().iter().map(|p| p.encoding).collect();
    frees_after.sort_unstable();
    assert_eq!(frees_after, frees);
    assert_eq!(game.turn(), turn);
    assert_eq!(game.history().len(), history);

    // The produced move is legal for the position.
    assert_eq!(m.placed, game.next_pick());
    assert!(game.is_open(m.x, m.y));
    assert!(game.is_free(m.picked));

    // Four open squares times three free pieces at the root.
    let stats = ai.last_stats();
    assert_eq!(stats.root_moves, 12);
    assert_eq!(stats.depth, 5);
    assert!(stats.nodes > 0);
    assert!(stats.table_size > 0);

    game.run_turn(m.x, m.y, m.picked);
    assert_eq!(game.history().len(), history + 1);
    assert_eq!(game.winner(), GameResult::InProgress);
}

#[test]
fn full_game_between_strategies_terminates() {
    let mut game = Game::standard();
    let mut ais: [Box<dyn GameAi>; 2] = [Box::new(RandomAi), Box::new(NormalAi)];
    let mut turns = 0;
    while game.winner() == GameResult::InProgress {
        let idx = game.turn().index();
        let m = ais[idx].gen_move(&mut game);
        game.run_turn(m.x, m.y, m.picked);
        turns += 1;
        // One pick-only turn plus at most sixteen placements.
        assert!(turns <= 17);
    }
    assert_ne!(game.winner(), GameResult::InProgress);
}
