//! "Perft" performance test: count the number of leaves at a given depth.
//! Useful for checking move generation and for benchmarking it.
//! See: http://www.aartbik.com/MISC/reversi.html

use crate::{Action, Position};

/// Count the leaves `depth` plies below the starting position.
/// A forced pass counts as a ply; two passes in a row end the game.
pub fn run_perft(depth: u64) -> u64 {
    leaves_below(Position::default(), depth, false)
}

fn leaves_below(position: Position, depth: u64, passed: bool) -> u64 {
    // Leaf node for this depth
    if depth == 0 {
        return 1;
    }

    let all_moves = position.legal_moves();
    if all_moves.is_empty() {
        // Both players passed: game is over
        if passed {
            return 1;
        }

        return match position.apply(Action::Pass) {
            Ok(next) => leaves_below(next, depth - 1, true),
            Err(_) => 0,
        };
    }

    all_moves
        .filter_map(|mv| position.apply(Action::Place(mv)).ok())
        .map(|next| leaves_below(next, depth - 1, false))
        .sum()
}

#[test]
fn perft_01() {
    assert_eq!(run_perft(1), 4);
}

#[test]
fn perft_02() {
    assert_eq!(run_perft(2), 12);
}

#[test]
fn perft_03() {
    assert_eq!(run_perft(3), 56);
}

#[test]
fn perft_04() {
    assert_eq!(run_perft(4), 244);
}

#[test]
fn perft_05() {
    assert_eq!(run_perft(5), 1396);
}

#[test]
fn perft_06() {
    assert_eq!(run_perft(6), 8200);
}

#[test]
fn perft_07() {
    assert_eq!(run_perft(7), 55092);
}

#[test]
fn perft_08() {
    assert_eq!(run_perft(8), 390216);
}

// Passing moves begin here.
#[test]
#[ignore]
fn perft_09() {
    assert_eq!(run_perft(9), 3005288);
}
