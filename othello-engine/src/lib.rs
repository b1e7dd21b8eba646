//! `othello-engine` is a small, exact Othello rules engine for players and UIs.
//!
//! This package implements three levels of abstraction:
//!
//!  - [`bitboard`] contains the raw direction shifts, move generation and flip
//!    computation on packed [`bitboard::Bitboard`]s.
//!  - [`Board`] is an immutable pair of bitboards with checked move application
//!    and the ASCII diagram format.
//!  - [`Game`] tracks the side to move, passes and undo/redo history, and knows
//!    the plain-text save format.
//!
//! [`choose_move`] picks moves for computer players on top of [`Board`].

pub mod bitboard;
pub mod test_utils;

mod ai;
mod board;
mod game;
mod location;
mod utils;

pub use ai::*;
pub use board::*;
pub use game::*;
pub use location::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
