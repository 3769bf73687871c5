//! Baseline strategy: first open square, first free piece.

use quarto_core::{Game, GameAi, Move};

/// Deterministic placeholder opponent. Useful as a fixed point in tests and
/// as the weakest rung of the arena ladder.
#[derive(Default)]
pub struct FirstAi;

impl GameAi for FirstAi {
    fn gen_move(&mut self, game: &mut Game) -> Move {
        let picked = game.frees().first().copied();
        if game.next_pick().is_none() {
            return Move { placed: None, x: -1, y: -1, picked };
        }
        let n = game.dim();
        for y in 0..n {
            for x in 0..n {
                if game.is_open(x, y) {
                    return Move { placed: game.next_pick(), x, y, picked };
                }
            }
        }
        // Board full; nothing to place.
        Move { placed: game.next_pick(), x: -1, y: -1, picked }
    }

    fn name(&self) -> &str {
        "first"
    }
}
