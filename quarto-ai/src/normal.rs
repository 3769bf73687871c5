//! Heuristic strategy built on attribute similarity.

use quarto_core::{Game, GameAi, Move, Piece};

use crate::{find_win, random_first_move};

/// Mid-strength opponent. Takes an immediate win when one exists; otherwise
/// places the designated piece on the square whose lines it resembles least,
/// and hands over the free piece least similar to everything in play.
#[derive(Default)]
pub struct NormalAi;

impl NormalAi {
    // Summed similarity between the designated piece and every occupant of
    // the lines through (x, y). Empty squares contribute -1, which pulls the
    // choice toward uncrowded lines.
    fn sim_score(game: &Game, pick: Piece, x: i32, y: i32) -> i32 {
        let n = game.dim();
        let mut score = 0;
        for i in 0..n {
            if i != y {
                score += pick.shared_count(game.piece_at(x, i));
            }
            if i != x {
                score += pick.shared_count(game.piece_at(i, y));
                if x == y {
                    score += pick.shared_count(game.piece_at(i, i));
                }
                if x + y == n - 1 {
                    score += pick.shared_count(game.piece_at(i, n - 1 - i));
                }
            }
        }
        score
    }

    /// Open square minimizing the similarity score, first in scan order on
    /// ties.
    fn counter_cell(game: &Game) -> (i32, i32) {
        let pick = match game.next_pick() {
            Some(p) => p,
            None => return (-1, -1),
        };
        let n = game.dim();
        let mut best = (-1, -1);
        let mut min = i32::MAX;
        for y in 0..n {
            for x in 0..n {
                if !game.is_open(x, y) {
                    continue;
                }
                let score = Self::sim_score(game, pick, x, y);
                if score < min {
                    min = score;
                    best = (x, y);
                }
            }
        }
        best
    }

    /// Free piece minimizing summed similarity against the pieces in play
    /// plus the one about to be placed. None on the board-filling move.
    fn counter_piece(game: &Game) -> Option<Piece> {
        let mut best = None;
        let mut min = i32::MAX;
        for &p in game.frees() {
            let mut score = p.shared_count(game.next_pick());
            for &a in game.actives() {
                score += p.shared_count(Some(a));
            }
            if score < min {
                min = score;
                best = Some(p);
            }
        }
        best
    }
}

impl GameAi for NormalAi {
    fn gen_move(&mut self, game: &mut Game) -> Move {
        if let Some(m) = random_first_move(game) {
            return m;
        }
        if let Some(m) = find_win(game) {
            return m;
        }
        let (x, y) = Self::counter_cell(game);
        let picked = Self::counter_piece(game);
        Move { placed: game.next_pick(), x, y, picked }
    }

    fn name(&self) -> &str {
        "normal"
    }
}
