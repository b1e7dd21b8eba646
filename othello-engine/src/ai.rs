//! Simple computer players layered on top of [`Board`].
//!
//! None of these search: each picks among the current legal moves with a fixed
//! heuristic, breaking ties with an injected random source so that games are
//! reproducible from a seed.

use crate::board::Board;
use crate::game::Side;
use crate::location::Location;
use derive_more::{Display, Error};
use rand::seq::SliceRandom;
use rand::Rng;
use std::str::FromStr;

/// How a computer player picks its move.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Level {
    /// Any legal move, uniformly at random.
    #[display(fmt = "uniform")]
    Uniform,
    /// The move that flips the most discs right now.
    #[display(fmt = "greedy")]
    Greedy,
    /// The move leading to the best square-weighted position.
    #[display(fmt = "positional")]
    Positional,
}

#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "unknown level {:?}: expected uniform, greedy or positional", text)]
pub struct ParseLevelError {
    pub text: String,
}

/// Parse a level name. The older names easy/hard/expert are accepted too.
impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" | "random" | "easy" => Ok(Level::Uniform),
            "greedy" | "hard" => Ok(Level::Greedy),
            "positional" | "expert" => Ok(Level::Positional),
            _ => Err(ParseLevelError { text: s.to_string() }),
        }
    }
}

/// Square weights in reading order (a1, b1, ..., h8).
/// Corners are worth the most; the squares that give corners away cost the most.
#[rustfmt::skip]
pub const POSITION_WEIGHTS: [i32; 64] = [
    100, -20,  10,   5,   5,  10, -20, 100,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
     10,  -2,  -1,  -1,  -1,  -1,  -2,  10,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
     10,  -2,  -1,  -1,  -1,  -1,  -2,  10,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
    100, -20,  10,   5,   5,  10, -20, 100,
];

/// Score a board as: weighted black squares - weighted white squares,
/// negated for White so that higher is always better for `side`.
pub fn positional_score(board: Board, side: Side) -> i32 {
    let score: i32 = board
        .black()
        .into_iter()
        .zip(board.white())
        .zip(POSITION_WEIGHTS)
        .map(|((black, white), weight)| match (black, white) {
            (true, _) => weight,
            (_, true) => -weight,
            _ => 0,
        })
        .sum();

    match side {
        Side::Black => score,
        Side::White => -score,
    }
}

/// Pick a move for `side` at the given `level`, or None if `side` must pass.
pub fn choose_move<R: Rng + ?Sized>(
    board: Board,
    side: Side,
    level: Level,
    rng: &mut R,
) -> Option<Location> {
    let moves: Vec<Location> = board.legal_moves(side).collect();

    let candidates = match level {
        Level::Uniform => moves,
        Level::Greedy => best_by(moves, |mv| board.flips_for(mv, side).count_occupied() as i32),
        Level::Positional => best_by(moves, |mv| match board.apply_move(mv, side) {
            Ok(next) => positional_score(next, side),
            Err(_) => i32::MIN,
        }),
    };

    let choice = candidates.choose(rng).copied();
    tracing::trace!(%side, %level, ?candidates, ?choice, "chose move");
    choice
}

/// Keep only the moves attaining the maximum score.
fn best_by<F: Fn(Location) -> i32>(moves: Vec<Location>, score: F) -> Vec<Location> {
    let scored: Vec<(Location, i32)> = moves.into_iter().map(|mv| (mv, score(mv))).collect();
    let best = scored.iter().map(|&(_, s)| s).max();

    scored
        .into_iter()
        .filter(|&(_, s)| Some(s) == best)
        .map(|(mv, _)| mv)
        .collect()
}
