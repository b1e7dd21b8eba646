//! Code for working with [`Location`]s on the Othello board.

use crate::bitboard::Bitboard;
use crate::EDGE_LENGTH;
use derive_more::{Display, Error, From, Into};
use std::fmt::{self, Formatter, Write};

/// A location on the Othello board, stored as a one-hot [`Bitboard`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Into)]
pub struct Location(Bitboard);

/// A set of locations on the Othello board, which can be iterated to retrieve them.
/// Iteration runs in reading order: a1, b1, ..., h1, a2, ..., h8.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord, From, Into)]
pub struct LocationList(Bitboard);

impl Location {
    /// Convert from a one-hot [`Bitboard`]. Returns None unless exactly one bit is set.
    #[inline]
    pub fn from_onehot(bitboard: Bitboard) -> Option<Self> {
        match bitboard.count_occupied() {
            1 => Some(Self(bitboard)),
            _ => None,
        }
    }

    /// Convert from a bit index: 0 for h8, 63 for a1.
    /// Returns None if the index is off the board.
    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        1u64.checked_shl(index as u32).map(|bit| Self(Bitboard::from(bit)))
    }

    /// Convert into a bit index: 0 for h8, 63 for a1.
    #[inline]
    pub fn to_index(self) -> u8 {
        let bitboard: u64 = self.0.into();
        bitboard.trailing_zeros() as u8
    }

    /// Convert from zero-based row and column coordinates, row 0 being rank 1.
    /// Returns None if the coordinates are off the board.
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        if row >= EDGE_LENGTH || col >= EDGE_LENGTH {
            return None;
        }

        let index = (EDGE_LENGTH - 1 - col) + (EDGE_LENGTH - 1 - row) * EDGE_LENGTH;
        Self::from_index(index as u8)
    }

    /// Get the zero-based (row, column) coordinates.
    pub fn to_coords(self) -> (usize, usize) {
        let index = self.to_index() as usize;
        let row = EDGE_LENGTH - 1 - index / EDGE_LENGTH;
        let col = EDGE_LENGTH - 1 - index % EDGE_LENGTH;
        (row, col)
    }

    #[inline]
    pub fn bitboard(self) -> Bitboard {
        self.0
    }
}

/// Convert this [`Location`] into coordinate notation ("f4").
impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_coords();
        let col_str = "abcdefgh".chars().nth(col).ok_or(fmt::Error)?;
        let row_str = "12345678".chars().nth(row).ok_or(fmt::Error)?;
        f.write_char(col_str)?;
        f.write_char(row_str)
    }
}

/// Coordinate text outside the a-h / 1-8 notation.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "invalid coordinate {:?}: expected a column a-h followed by a row 1-8", text)]
pub struct ParseLocationError {
    pub text: String,
}

/// Build a [`Location`] from coordinate notation ("d3", "D3").
impl std::str::FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLocationError { text: s.to_string() };

        let mut chars = s.chars();
        let col_char = chars.next().ok_or_else(err)?.to_ascii_lowercase();
        let col = "abcdefgh".find(col_char).ok_or_else(err)?;
        let row = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(err)? as usize;

        if row == 0 || chars.next().is_some() {
            return Err(err());
        }

        Self::from_coords(row - 1, col).ok_or_else(err)
    }
}

impl LocationList {
    /// Returns whether `loc` is in this list.
    #[inline]
    pub fn contains(self, loc: Location) -> bool {
        self.0.intersects(loc.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn bitboard(self) -> Bitboard {
        self.0
    }
}

impl Iterator for LocationList {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        if self.0.is_empty() {
            return None;
        }

        let bitboard: u64 = self.0.into();
        let next_move = Bitboard::from(1u64 << (63 - bitboard.leading_zeros()));
        self.0 ^= next_move;

        Some(Location(next_move))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_occupied() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for LocationList {}

impl fmt::Display for LocationList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let string = self
            .into_iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        f.write_fmt(format_args!("[{}]", string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn location_from_index() {
        assert_eq!(Location::from_index(0), Some(Location(Bitboard::from(1))));
        assert_eq!(
            Location::from_index(63),
            Some(Location(Bitboard::from(1 << 63)))
        );
        assert_eq!(Location::from_index(64), None);
        assert_eq!(Location::from_index(u8::MAX), None);
    }

    #[test]
    fn location_to_index() {
        assert_eq!(Location(Bitboard::from(1)).to_index(), 0);
        assert_eq!(Location(Bitboard::from(1 << 63)).to_index(), 63);
    }

    #[test]
    fn location_from_coords() {
        assert_eq!(
            Location::from_coords(0, 0),
            Some(Location(Bitboard::from(1 << 63)))
        );
        assert_eq!(Location::from_coords(7, 7), Some(Location(Bitboard::from(1))));
        assert_eq!(Location::from_coords(0, 8), None);
        assert_eq!(Location::from_coords(8, 0), None);
    }

    #[test]
    fn location_to_coords() {
        assert_eq!(Location(Bitboard::from(1 << 63)).to_coords(), (0, 0));
        assert_eq!(Location(Bitboard::from(1)).to_coords(), (7, 7));
        assert_eq!(Location::from_coords(3, 5).unwrap().to_coords(), (3, 5));
    }

    #[test]
    fn location_from_onehot() {
        assert!(Location::from_onehot(Bitboard::from(1 << 20)).is_some());
        assert!(Location::from_onehot(Bitboard::from(0b11)).is_none());
        assert!(Location::from_onehot(Bitboard::EMPTY).is_none());
    }

    #[test]
    fn location_from_str_success() {
        assert_eq!(
            Location::from_str("a1"),
            Ok(Location(Bitboard::from(1 << 63)))
        );
        assert_eq!(Location::from_str("H8"), Ok(Location(Bitboard::from(1))));
        assert_eq!(Location::from_str("f4").ok(), Location::from_coords(3, 5));
        assert_eq!(
            Location::from_str("D3").ok(),
            Location::from_index(63 - (2 * 8 + 3))
        );
    }

    #[test]
    fn location_from_str_fail() {
        for text in ["", "a", "a12", "aa", "a9", "a0", "i5", "5a", "d 3"] {
            assert_eq!(
                Location::from_str(text),
                Err(ParseLocationError {
                    text: text.to_string()
                }),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn location_to_str() {
        assert_eq!(Location(Bitboard::from(1)).to_string(), "h8");
        assert_eq!(Location(Bitboard::from(1 << 63)).to_string(), "a1");
        assert_eq!(Location::from_str("E2").unwrap().to_string(), "e2");
        assert_eq!(Location::from_str("f6").unwrap().to_string(), "f6");
    }

    #[test]
    fn location_list_reading_order() {
        let bits = Location::from_str("h8").unwrap().bitboard()
            | Location::from_str("c4").unwrap().bitboard()
            | Location::from_str("d3").unwrap().bitboard();
        let list = LocationList::from(bits);

        assert_eq!(list.len(), 3);
        assert!(list.contains(Location::from_str("c4").unwrap()));
        assert!(!list.contains(Location::from_str("a1").unwrap()));
        assert_eq!(list.to_string(), "[d3, c4, h8]");
    }
}
