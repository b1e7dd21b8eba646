//! Low-level bitboard operations.
//!
//! Everything here works on raw [`Bitboard`]s and trusts its inputs: the
//! player and opponent sets passed in are assumed to be disjoint.
//!
//! By convention, the MSB is the upper-left of the board (a1), and bits
//! proceed in row-major order, so square `(row, col)` is bit `63 - (8 * row + col)`.

use crate::{utils, NUM_SPACES};
use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not,
};
use std::fmt::{self, Display, Formatter};

/// Holds a single bit per location on an Othello board.
/// Wraps [`u64`] for efficient bit-twiddling, but avoids mixing with numerics.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Default,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

/// Starting bitboard for Black: e4 and d5.
pub const BLACK_START: Bitboard = Bitboard(0x0000000810000000);

/// Starting bitboard for White: d4 and e5.
pub const WHITE_START: Bitboard = Bitboard(0x0000001008000000);

// Everything except column a / column h. A shift that moves discs east can
// only wrap into column a, and a westward shift only into column h.
const NOT_A_FILE: u64 = 0x7f7f7f7f7f7f7f7f;
const NOT_H_FILE: u64 = 0xfefefefefefefefe;
const FULL_MASK: u64 = 0xffffffffffffffff;

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        utils::format_grid(
            self.into_iter().map(|bit| match bit {
                false => '.',
                true => '#',
            }),
            f,
        )
    }
}

impl Bitboard {
    /// A bitboard with no bits set.
    pub const EMPTY: Self = Self(0);

    /// A bitboard with every bit set.
    pub const FULL: Self = Self(FULL_MASK);

    /// Count the number of occupied spaces in the bitboard.
    #[inline]
    pub fn count_occupied(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Return true if this bitboard is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return true if any bit is set in both bitboards.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

/// One of the eight compass directions on the board.
/// North points towards row 1, East towards column h.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Signed bit offset of one step: positive shifts left, negative shifts right.
    #[inline]
    pub const fn offset(self) -> i8 {
        match self {
            Direction::North => 8,
            Direction::South => -8,
            Direction::East => -1,
            Direction::West => 1,
            Direction::NorthEast => 7,
            Direction::NorthWest => 9,
            Direction::SouthEast => -9,
            Direction::SouthWest => -7,
        }
    }

    /// Mask applied after a step to drop bits that wrapped around a side edge.
    /// Wrapping off the top or bottom edge shifts bits out of the word entirely.
    #[inline]
    const fn edge_mask(self) -> u64 {
        match self {
            Direction::North | Direction::South => FULL_MASK,
            Direction::East | Direction::NorthEast | Direction::SouthEast => NOT_A_FILE,
            Direction::West | Direction::NorthWest | Direction::SouthWest => NOT_H_FILE,
        }
    }
}

/// Move every bit one step in `direction`, dropping bits that leave the board.
#[inline]
pub fn shift(bitboard: Bitboard, direction: Direction) -> Bitboard {
    let offset = direction.offset();
    let shifted = if offset > 0 {
        bitboard.0 << offset
    } else {
        bitboard.0 >> -offset
    };

    Bitboard(shifted & direction.edge_mask())
}

/// Compute a mask of the legal moves for the active player from
/// masks of the active player's pieces and the opponent's pieces.
/// Returns an empty mask when the active player has to pass.
pub fn legal_moves(active: Bitboard, opponent: Bitboard) -> Bitboard {
    let empties = !(active | opponent);
    let mut moves = Bitboard::EMPTY;

    for direction in Direction::ALL {
        // Opponent runs adjacent to our pieces, extended one step at a time.
        let mut run = shift(active, direction) & opponent;
        while !run.is_empty() {
            let next = shift(run, direction);
            moves |= next & empties;
            run = next & opponent;
        }
    }

    moves
}

/// Compute the opponent pieces flipped by placing a piece at `move_mask`.
/// `move_mask` must be one-hot. Does not check that the move is legal or that the
/// target square is empty; an empty result means the move captures nothing.
pub fn flips_for(move_mask: Bitboard, active: Bitboard, opponent: Bitboard) -> Bitboard {
    let mut flips = Bitboard::EMPTY;

    for direction in Direction::ALL {
        let mut run = Bitboard::EMPTY;
        let mut cursor = shift(move_mask, direction);
        while cursor.intersects(opponent) {
            run |= cursor;
            cursor = shift(cursor, direction);
        }

        // Only a run capped by one of our own pieces is captured.
        if cursor.intersects(active) {
            flips |= run;
        }
    }

    flips
}

/// Iterator for the bits in a [`Bitboard`].
#[derive(Clone, Copy, Debug)]
pub struct Bits {
    remaining: usize,
    bitboard: Bitboard,
}

impl Iterator for Bits {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let bitmask = Bitboard::from(1u64 << (self.remaining - 1));
        let bit = !(self.bitboard & bitmask).is_empty();
        self.remaining -= 1;

        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Bits {}

/// Iterate over the bits in row-major order, starting at a1.
impl IntoIterator for Bitboard {
    type Item = bool;
    type IntoIter = Bits;

    fn into_iter(self) -> Self::IntoIter {
        Bits {
            remaining: NUM_SPACES,
            bitboard: self,
        }
    }
}
