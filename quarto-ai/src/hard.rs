//! Negamax search strategy with alpha-beta pruning and a transposition
//! table.

use std::time::Instant;

use quarto_core::{Game, GameAi, GameResult, Move, Piece};

use crate::stats::SearchStats;
use crate::table::{TranspositionTable, TtFlag};
use crate::{all_moves, find_win, random_first_move};

const MAX_SCORE: i32 = 10;
const MIN_SCORE: i32 = -10;

/// Strongest built-in opponent.
///
/// Searches the full placement-and-pick move list with negamax, scoring
/// leaves by the number of completed lines on the board. The depth budget
/// shrinks with board size and grows when the root move list is narrow.
/// Search replays moves in forced mode and undoes them, so the game state is
/// untouched by `gen_move`.
#[derive(Default)]
pub struct HardAi {
    table: TranspositionTable,
    stats: SearchStats,
    verbose: bool,
}

impl HardAi {
    pub fn new() -> HardAi {
        HardAi::default()
    }

    /// Like `new`, but prints a stats line after every search.
    pub fn verbose() -> HardAi {
        HardAi { verbose: true, ..HardAi::default() }
    }

    /// Counters from the most recent search.
    pub fn last_stats(&self) -> &SearchStats {
        &self.stats
    }

    fn best_move(&mut self, game: &mut Game, mut max_depth: i32) -> Move {
        let start = Instant::now();
        let moves = all_moves(game);
        debug_assert!(!moves.is_empty(), "searching a position with no legal moves");
        // Narrow roots afford deeper search.
        max_depth += 150 / (moves.len() as i32).max(75);
        self.table.clear();
        self.stats = SearchStats {
            root_moves: moves.len(),
            depth: max_depth,
            ..SearchStats::default()
        };

        let mut best: Option<Move> = None;
        let mut best_score = MIN_SCORE;
        for &m in &moves {
            game.apply(m, true);
            let score = self.negamax(game, max_depth, MIN_SCORE, MAX_SCORE, 1);
            game.undo_turn(true);
            if score >= best_score {
                best_score = score;
                best = Some(m);
            }
        }

        self.stats.table_size = self.table.len();
        self.stats.elapsed = start.elapsed();
        if self.verbose {
            self.stats.print_line();
        }
        best.unwrap_or(Move { placed: game.next_pick(), x: -1, y: -1, picked: None })
    }

    fn negamax(&mut self, game: &mut Game, depth: i32, mut alpha: i32, mut beta: i32, sign: i32) -> i32 {
        self.stats.nodes += 1;
        let key = game.board_key();
        let alpha_prior = alpha;

        if let Some(entry) = self.table.get(&key) {
            if entry.depth >= depth {
                self.stats.table_hits += 1;
                match entry.flag {
                    TtFlag::Exact => return entry.value,
                    TtFlag::Upper => alpha = alpha.max(entry.value),
                    TtFlag::Lower => beta = beta.min(entry.value),
                }
            }
        }

        if depth == 0 {
            return sign * self.count_lines(game);
        }
        if game.winner() != GameResult::InProgress {
            return 1;
        }

        let mut best = MIN_SCORE;
        for m in all_moves(game) {
            game.apply(m, true);
            let score = -self.negamax(game, depth - 1, -beta, -alpha, -sign);
            game.undo_turn(true);
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        self.table.insert(key, depth, alpha_prior, beta, best);
        best
    }

    /// Number of lines holding at least `dim - 1` pieces that all share an
    /// attribute value.
    fn count_lines(&self, game: &Game) -> i32 {
        let n = game.dim();
        let mut count = 0;
        for j in 0..n {
            let row: Vec<Piece> = (0..n).filter_map(|i| game.piece_at(i, j)).collect();
            if Self::check_line(game, &row) {
                count += 1;
            }
            let col: Vec<Piece> = (0..n).filter_map(|i| game.piece_at(j, i)).collect();
            if Self::check_line(game, &col) {
                count += 1;
            }
        }
        let diag: Vec<Piece> = (0..n).filter_map(|i| game.piece_at(i, i)).collect();
        if Self::check_line(game, &diag) {
            count += 1;
        }
        let anti: Vec<Piece> = (0..n).filter_map(|i| game.piece_at(i, n - 1 - i)).collect();
        if Self::check_line(game, &anti) {
            count += 1;
        }
        count
    }

    fn check_line(game: &Game, pieces: &[Piece]) -> bool {
        if (pieces.len() as i32) < game.dim() - 1 {
            return false;
        }
        match pieces.split_first() {
            Some((probe, rest)) => game.check_all_similar(rest, *probe),
            None => false,
        }
    }
}

impl GameAi for HardAi {
    fn gen_move(&mut self, game: &mut Game) -> Move {
        let max_depth = 7 - game.dim();
        if let Some(m) = random_first_move(game) {
            return m;
        }
        if let Some(m) = find_win(game) {
            return m;
        }
        self.best_move(game, max_depth)
    }

    fn name(&self) -> &str {
        "hard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarto_core::AttrValue::*;

    #[test]
    fn count_lines_sees_rows_columns_and_diagonals() {
        let mut game = Game::standard();
        let hollow = game.find_pieces(&[Hollow]);
        game.run_turn(-1, -1, Some(hollow[0]));
        game.run_turn(0, 1, Some(hollow[1]));
        game.run_turn(1, 1, Some(hollow[2]));
        game.run_turn(2, 1, Some(hollow[3]));

        // Three hollow pieces in row 1, nothing else near-complete.
        let ai = HardAi::new();
        assert_eq!(ai.count_lines(&game), 1);
    }

    #[test]
    fn check_line_needs_enough_pieces() {
        let game = Game::standard();
        let a = game.frees()[0];
        let b = game.frees()[1];
        assert!(!HardAi::check_line(&game, &[]));
        assert!(!HardAi::check_line(&game, &[a, b]));
        assert!(HardAi::check_line(&game, &[a, b, game.frees()[2]]));
    }
}
