//! The immutable [`Board`] value and its ASCII diagram format.
//!
//! A board is a pair of disjoint colour bitboards. Every transform returns a new
//! board; nothing here mutates in place.

use crate::bitboard::{self, Bitboard, BLACK_START, WHITE_START};
use crate::game::{Action, Side};
use crate::location::{Location, LocationList};
use crate::{utils, EDGE_LENGTH};
use derive_more::{Display, Error};
use std::fmt;

/// The complete placement of discs on an Othello board.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

/// A move that does not flip any disc for the side making it.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "illegal move: {}", action)]
pub struct IllegalMoveError {
    pub action: Action,
}

/// A malformed board diagram.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum ParseBoardError {
    #[display(fmt = "board diagram must have 8 rows, found {}", found)]
    RowCount { found: usize },
    #[display(fmt = "row {} must have 8 squares, found {}", row, found)]
    RowLength { row: usize, found: usize },
    #[display(fmt = "invalid square {:?} at row {}, column {}", found, row, col)]
    InvalidSquare { row: usize, col: usize, found: char },
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position.
    pub const fn new() -> Self {
        Self {
            black: BLACK_START,
            white: WHITE_START,
        }
    }

    /// Build a board from colour bitboards, or None if any square holds both colours.
    pub fn from_bitboards(black: Bitboard, white: Bitboard) -> Option<Self> {
        if black.intersects(white) {
            return None;
        }

        Some(Self { black, white })
    }

    #[inline]
    pub fn black(self) -> Bitboard {
        self.black
    }

    #[inline]
    pub fn white(self) -> Bitboard {
        self.white
    }

    /// The discs belonging to `side`.
    #[inline]
    pub fn pieces(self, side: Side) -> Bitboard {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    /// The (player, opponent) bitboards as seen by `side`.
    #[inline]
    pub fn perspective(self, side: Side) -> (Bitboard, Bitboard) {
        match side {
            Side::Black => (self.black, self.white),
            Side::White => (self.white, self.black),
        }
    }

    /// Get a mask indicating where the occupied spaces are.
    #[inline]
    pub fn occupied_mask(self) -> Bitboard {
        self.black | self.white
    }

    /// Get a mask indicating where the empty spaces are.
    #[inline]
    pub fn empty_mask(self) -> Bitboard {
        !self.occupied_mask()
    }

    /// Count the discs belonging to `side`.
    #[inline]
    pub fn count(self, side: Side) -> u8 {
        self.pieces(side).count_occupied()
    }

    /// The legal moves for `side`. Empty when `side` must pass.
    #[inline]
    pub fn legal_moves(self, side: Side) -> LocationList {
        let (player, opponent) = self.perspective(side);
        bitboard::legal_moves(player, opponent).into()
    }

    /// The opponent discs that `side` would flip by playing at `loc`.
    #[inline]
    pub fn flips_for(self, loc: Location, side: Side) -> Bitboard {
        let (player, opponent) = self.perspective(side);
        bitboard::flips_for(loc.bitboard(), player, opponent)
    }

    /// Play `loc` for `side`, returning the resulting board.
    /// Fails if the move flips nothing or lands on an occupied square.
    pub fn apply_move(self, loc: Location, side: Side) -> Result<Self, IllegalMoveError> {
        let illegal = IllegalMoveError {
            action: Action::Place(loc),
        };

        let move_mask = loc.bitboard();
        if self.occupied_mask().intersects(move_mask) {
            return Err(illegal);
        }

        let flips = self.flips_for(loc, side);
        if flips.is_empty() {
            return Err(illegal);
        }

        let (player, opponent) = self.perspective(side);
        let player = player | move_mask | flips;
        let opponent = opponent & !flips;

        Ok(match side {
            Side::Black => Self {
                black: player,
                white: opponent,
            },
            Side::White => Self {
                black: opponent,
                white: player,
            },
        })
    }

    /// True when neither side has a legal move.
    pub fn is_finished(self) -> bool {
        self.legal_moves(Side::Black).is_empty() && self.legal_moves(Side::White).is_empty()
    }

    /// The side with more discs, or None for a draw.
    pub fn winner(self) -> Option<Side> {
        let black = self.count(Side::Black);
        let white = self.count(Side::White);

        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(Side::Black),
            std::cmp::Ordering::Less => Some(Side::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Characters for every square in reading order, a1 first.
    fn squares(self) -> impl Iterator<Item = char> {
        self.black
            .into_iter()
            .zip(self.white)
            .map(|square| match square {
                (true, _) => 'B',
                (_, true) => 'W',
                _ => '.',
            })
    }

    /// Render the board as an 8x8 diagram of `B`, `W` and `.`.
    pub fn to_diagram(self) -> String {
        self.to_string()
    }

    /// Render the board with row and column labels, for terminals.
    pub fn pretty(self) -> String {
        let mut grid = String::new();
        // Writing into a String only fails if the grid has the wrong size.
        if utils::format_grid(self.squares(), &mut grid).is_err() {
            return self.to_diagram();
        }

        grid
    }
}

/// One line per row, top row first, each line newline-terminated.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut squares = self.squares();

        for _ in 0..EDGE_LENGTH {
            for _ in 0..EDGE_LENGTH {
                let square = squares.next().ok_or(fmt::Error)?;
                fmt::Write::write_char(f, square)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Parse an 8x8 diagram of `B`, `W` and `.`. Surrounding whitespace on the
/// diagram and on each row is ignored.
impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(diagram: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = diagram.trim().lines().map(str::trim).collect();
        if rows.len() != EDGE_LENGTH {
            return Err(ParseBoardError::RowCount { found: rows.len() });
        }

        let mut black = Bitboard::EMPTY;
        let mut white = Bitboard::EMPTY;

        for (row, line) in rows.into_iter().enumerate() {
            let found = line.chars().count();
            if found != EDGE_LENGTH {
                return Err(ParseBoardError::RowLength { row, found });
            }

            for (col, square) in line.chars().enumerate() {
                let bit = Location::from_coords(row, col)
                    .map(Location::bitboard)
                    .unwrap_or_default();

                match square {
                    'B' => black |= bit,
                    'W' => white |= bit,
                    '.' => {}
                    found => return Err(ParseBoardError::InvalidSquare { row, col, found }),
                }
            }
        }

        Ok(Self { black, white })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const START_DIAGRAM: &str = "\
........
........
........
...WB...
...BW...
........
........
........
";

    fn loc(text: &str) -> Location {
        Location::from_str(text).unwrap()
    }

    #[test]
    fn start_diagram() {
        assert_eq!(Board::new().to_diagram(), START_DIAGRAM);
        assert_eq!(Board::from_str(START_DIAGRAM), Ok(Board::new()));
    }

    #[test]
    fn diagram_tolerates_indentation() {
        let indented = START_DIAGRAM
            .lines()
            .map(|line| format!("    {}  ", line))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(Board::from_str(&format!("\n{}\n\n", indented)), Ok(Board::new()));
    }

    #[test]
    fn diagram_errors() {
        let short = START_DIAGRAM.lines().take(7).collect::<Vec<_>>().join("\n");
        assert_eq!(
            Board::from_str(&short),
            Err(ParseBoardError::RowCount { found: 7 })
        );

        let long_row = START_DIAGRAM.replacen("...WB...", "...WB....", 1);
        assert_eq!(
            Board::from_str(&long_row),
            Err(ParseBoardError::RowLength { row: 3, found: 9 })
        );

        let bad_square = START_DIAGRAM.replacen("...WB...", "...QB...", 1);
        assert_eq!(
            Board::from_str(&bad_square),
            Err(ParseBoardError::InvalidSquare {
                row: 3,
                col: 3,
                found: 'Q'
            })
        );
    }

    #[test]
    fn start_moves_flip_one_disc_each() {
        let board = Board::new();
        let moves: Vec<String> = board
            .legal_moves(Side::Black)
            .map(|mv| mv.to_string())
            .collect();
        assert_eq!(moves, ["d3", "c4", "f5", "e6"]);

        for mv in board.legal_moves(Side::Black) {
            assert_eq!(board.flips_for(mv, Side::Black).count_occupied(), 1);
        }
    }

    #[test]
    fn flips_for_d3() {
        let board = Board::new();
        assert_eq!(board.flips_for(loc("d3"), Side::Black), loc("d4").bitboard());
    }

    #[test]
    fn apply_move_flips_and_places() {
        let board = Board::new().apply_move(loc("d3"), Side::Black).unwrap();
        let expected = Board::from_str(
            "
            ........
            ........
            ...B....
            ...BB...
            ...BW...
            ........
            ........
            ........
            ",
        )
        .unwrap();

        assert_eq!(board, expected);
        assert_eq!(board.count(Side::Black), 4);
        assert_eq!(board.count(Side::White), 1);
    }

    #[test]
    fn apply_move_for_white() {
        let board = Board::new()
            .apply_move(loc("d3"), Side::Black)
            .and_then(|b| b.apply_move(loc("c3"), Side::White))
            .unwrap();

        assert!(board.pieces(Side::White).intersects(loc("c3").bitboard()));
        assert!(board.pieces(Side::White).intersects(loc("d4").bitboard()));
        assert!(!board.black().intersects(board.white()));
    }

    #[test]
    fn illegal_corner_leaves_board_unchanged() {
        let board = Board::new();
        let before = board;

        assert_eq!(
            board.apply_move(loc("a1"), Side::Black),
            Err(IllegalMoveError {
                action: Action::Place(loc("a1"))
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn occupied_square_is_illegal() {
        assert!(Board::new().apply_move(loc("d4"), Side::Black).is_err());
    }

    #[test]
    fn full_board_has_no_moves() {
        let board = Board::from_bitboards(Bitboard::FULL, Bitboard::EMPTY).unwrap();
        assert!(board.legal_moves(Side::Black).is_empty());
        assert!(board.legal_moves(Side::White).is_empty());
        assert!(board.is_finished());
        assert_eq!(board.winner(), Some(Side::Black));
    }

    #[test]
    fn from_bitboards_rejects_overlap() {
        assert_eq!(Board::from_bitboards(BLACK_START, BLACK_START), None);
        assert_eq!(
            Board::from_bitboards(BLACK_START, WHITE_START),
            Some(Board::new())
        );
    }

    #[test]
    fn pretty_has_labels() {
        let pretty = Board::new().pretty();
        assert!(pretty.starts_with("   a b c d e f g h"));
        assert!(pretty.contains("\n 4 . . . W B . . . "));
    }
}
