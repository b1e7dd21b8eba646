//! Implements game-level Othello logic: turns, passes, history and the save format.
//!
//! [`Board`] only knows where discs are. [`Game`] adds whose turn it is and
//! remembers every position reached so moves can be undone and redone.

use crate::bitboard::Bitboard;
use crate::board::{Board, IllegalMoveError};
use crate::location::{Location, LocationList, ParseLocationError};
use derive_more::{Display, Error, From};
use std::fmt;
use std::str::FromStr;

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Side {
    Black,
    White,
}

impl Default for Side {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Side {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

/// An action in an Othello game: pass or place a disc at a location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Place(Location),
    Pass,
}

impl From<Location> for Action {
    fn from(loc: Location) -> Self {
        Self::Place(loc)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place(loc) => fmt::Display::fmt(loc, f),
            Action::Pass => f.write_str("pass"),
        }
    }
}

#[derive(Clone, Debug, Display, Error, PartialEq, Eq, From)]
#[display(fmt = "expected a coordinate or \"pass\": {}", _0)]
pub struct ParseActionError(ParseLocationError);

/// Parse "pass" (any case) or a coordinate such as "d3".
impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Action::Pass);
        }

        Ok(Action::Place(s.parse()?))
    }
}

/// A board together with the side to move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub to_move: Side,
}

/// A malformed save file.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum ParseSaveError {
    #[display(fmt = "save file must have 3 lines, found {}", found)]
    LineCount { found: usize },
    #[display(fmt = "line {} is not a 64-bit unsigned integer: {:?}", line, text)]
    BadBitboard { line: usize, text: String },
    #[display(fmt = "turn flag must be 1 (black) or 0 (white), found {:?}", text)]
    BadTurn { text: String },
    #[display(fmt = "black and white discs overlap")]
    Overlap,
}

impl Position {
    pub fn new(board: Board, to_move: Side) -> Self {
        Self { board, to_move }
    }

    #[inline]
    pub fn legal_moves(self) -> LocationList {
        self.board.legal_moves(self.to_move)
    }

    /// Apply `action` for the side to move. Passing is only legal without legal moves.
    pub fn apply(self, action: Action) -> Result<Self, IllegalMoveError> {
        let board = match action {
            Action::Place(loc) => self.board.apply_move(loc, self.to_move)?,
            Action::Pass if self.legal_moves().is_empty() => self.board,
            Action::Pass => return Err(IllegalMoveError { action }),
        };

        Ok(Self {
            board,
            to_move: !self.to_move,
        })
    }
}

/// The save format: black bitboard, white bitboard (both decimal), then
/// `1` if black is to move or `0` if white is.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let black: u64 = self.board.black().into();
        let white: u64 = self.board.white().into();
        let turn = match self.to_move {
            Side::Black => 1,
            Side::White => 0,
        };

        writeln!(f, "{}", black)?;
        writeln!(f, "{}", white)?;
        writeln!(f, "{}", turn)
    }
}

impl FromStr for Position {
    type Err = ParseSaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(str::trim).collect();
        if lines.len() != 3 {
            return Err(ParseSaveError::LineCount { found: lines.len() });
        }

        let bitboard = |line: usize| -> Result<Bitboard, ParseSaveError> {
            lines[line]
                .parse::<u64>()
                .map(Bitboard::from)
                .map_err(|_| ParseSaveError::BadBitboard {
                    line: line + 1,
                    text: lines[line].to_string(),
                })
        };

        let black = bitboard(0)?;
        let white = bitboard(1)?;
        let to_move = match lines[2] {
            "1" => Side::Black,
            "0" => Side::White,
            text => {
                return Err(ParseSaveError::BadTurn {
                    text: text.to_string(),
                })
            }
        };

        let board = Board::from_bitboards(black, white).ok_or(ParseSaveError::Overlap)?;
        Ok(Self { board, to_move })
    }
}

/// The complete state of an Othello game, including undo and redo history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    history: Vec<Position>,
    future: Vec<Position>,
}

impl Default for Game {
    /// A new game from the starting position, black to move.
    fn default() -> Self {
        Self::from_position(Position::default())
    }
}

impl Game {
    /// Start a game from an arbitrary position.
    pub fn from_position(position: Position) -> Self {
        Self {
            history: vec![position],
            future: Vec::new(),
        }
    }

    /// The current position.
    #[inline]
    pub fn position(&self) -> Position {
        // `history` always holds at least the starting position.
        self.history[self.history.len() - 1]
    }

    #[inline]
    pub fn board(&self) -> Board {
        self.position().board
    }

    #[inline]
    pub fn to_move(&self) -> Side {
        self.position().to_move
    }

    /// The legal moves for the side to move.
    #[inline]
    pub fn legal_moves(&self) -> LocationList {
        self.position().legal_moves()
    }

    /// Make an action as the side to move. Clears any redo history.
    pub fn play(&mut self, action: Action) -> Result<(), IllegalMoveError> {
        let next = self.position().apply(action)?;
        self.history.push(next);
        self.future.clear();
        Ok(())
    }

    /// Step back one ply. Returns false at the start of the game.
    pub fn undo(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }

        if let Some(position) = self.history.pop() {
            self.future.push(position);
        }
        true
    }

    /// Step forward one undone ply. Returns false if nothing was undone.
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(position) => {
                self.history.push(position);
                true
            }
            None => false,
        }
    }

    /// Number of plies played from the starting position, passes included.
    pub fn ply(&self) -> usize {
        self.history.len() - 1
    }

    /// Returns true if neither player can move.
    pub fn is_finished(&self) -> bool {
        self.board().is_finished()
    }

    /// The side with more discs once the game is over.
    pub fn winner(&self) -> Option<Side> {
        self.board().winner()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board();
        writeln!(f, "{}", board.pretty())?;
        write!(
            f,
            "Black: {}  White: {}  {} to move",
            board.count(Side::Black),
            board.count(Side::White),
            self.to_move()
        )
    }
}
