//! Move generators for Quarto, from trivial to negamax search.
//!
//! Four strategies implement the core's [`GameAi`] seam:
//!
//! - [`FirstAi`]: first open square, first free piece. Deterministic.
//! - [`RandomAi`]: uniform square and piece.
//! - [`NormalAi`]: takes immediate wins, otherwise minimizes similarity
//!   along the lines through the chosen square and hands over the least
//!   similar piece.
//! - [`HardAi`]: alpha-beta negamax over the full move list with a
//!   transposition table keyed by the serialized board state.

mod first;
mod hard;
mod normal;
mod random;
pub mod stats;
pub mod table;

pub use first::FirstAi;
pub use hard::HardAi;
pub use normal::NormalAi;
pub use random::RandomAi;

use quarto_core::{Game, Move};
use rand::seq::IndexedRandom;

pub use quarto_core::GameAi;

/// Opening move: no piece has been designated yet, so the mover only picks.
/// None once the game is past its first turn.
pub fn random_first_move(game: &Game) -> Option<Move> {
    if game.next_pick().is_some() {
        return None;
    }
    let mut rng = rand::rng();
    let picked = game.frees().choose(&mut rng).copied();
    Some(Move { placed: None, x: -1, y: -1, picked })
}

/// First open square where the designated piece completes a line, with a
/// random follow-up pick. Scans rows top to bottom.
pub fn find_win(game: &Game) -> Option<Move> {
    let pick = game.next_pick()?;
    let mut rng = rand::rng();
    let picked = game.frees().choose(&mut rng).copied();
    let n = game.dim();
    for y in 0..n {
        for x in 0..n {
            if game.is_open(x, y) && game.check_win(Some(pick), x, y) {
                return Some(Move { placed: Some(pick), x, y, picked });
            }
        }
    }
    None
}

/// Every legal placement and pick combination from the current position.
/// When the free pool is empty (board-filling move) each open square yields
/// a single pick-less move.
pub fn all_moves(game: &Game) -> Vec<Move> {
    let placed = game.next_pick();
    let n = game.dim();
    let mut moves = Vec::new();
    for x in 0..n {
        for y in 0..n {
            if !game.is_open(x, y) {
                continue;
            }
            if game.frees().is_empty() {
                moves.push(Move { placed, x, y, picked: None });
            } else {
                for &p in game.frees() {
                    moves.push(Move { placed, x, y, picked: Some(p) });
                }
            }
        }
    }
    moves
}
