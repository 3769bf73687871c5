//! Uniform random strategy.

use quarto_core::{Game, GameAi, Move};
use rand::seq::IndexedRandom;

/// Picks an open square and a free piece uniformly and independently.
#[derive(Default)]
pub struct RandomAi;

impl GameAi for RandomAi {
    fn gen_move(&mut self, game: &mut Game) -> Move {
        let mut rng = rand::rng();
        let picked = game.frees().choose(&mut rng).copied();
        if game.next_pick().is_none() {
            return Move { placed: None, x: -1, y: -1, picked };
        }
        let n = game.dim();
        let mut open = Vec::new();
        for y in 0..n {
            for x in 0..n {
                if game.is_open(x, y) {
                    open.push((x, y));
                }
            }
        }
        let (x, y) = open.choose(&mut rng).copied().unwrap_or((-1, -1));
        Move { placed: game.next_pick(), x, y, picked }
    }

    fn name(&self) -> &str {
        "random"
    }
}
