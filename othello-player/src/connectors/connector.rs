use super::{ComputerConnector, HumanConnector};
use crate::SessionError;
use async_trait::async_trait;
use othello_engine::{Action, Game, Level, ParseLevelError, Side};
use std::path::PathBuf;
use std::str::FromStr;

/// What a seat wants to do on its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Action),
    Undo,
    Redo,
    /// Save the current position, to the default path if none is given.
    Save(Option<PathBuf>),
    Quit,
}

/// A player-facing abstract interface to one seat at the board.
#[async_trait]
pub trait Connector: Send {
    /// Name used in prompts and logs.
    fn name(&self) -> &str;

    /// Ask for this seat's next command. Called whenever the seat is to move,
    /// including when its only legal action is to pass.
    async fn next_command(&mut self, game: &Game) -> Result<Command, SessionError>;

    /// Tell this seat about an action the opposing seat just made.
    async fn observe(&mut self, _side: Side, _action: Action) -> Result<(), SessionError> {
        Ok(())
    }

    /// Tell this seat the opposing seat has left the game.
    async fn quit(&mut self) -> Result<(), SessionError> {
        Ok(())
    }

    /// True if this seat is played on another machine, which rules out undo and redo.
    fn is_remote(&self) -> bool {
        false
    }
}

/// Who plays a local seat, as given on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seat {
    Human,
    Computer(Level),
}

/// Parse "human" or a computer level name.
impl FromStr for Seat {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("human") {
            return Ok(Seat::Human);
        }

        s.parse().map(Seat::Computer)
    }
}

impl Seat {
    /// Build the connector for this seat. `seed` makes computer players reproducible.
    pub fn connector(self, side: Side, seed: Option<u64>) -> Box<dyn Connector> {
        match self {
            Seat::Human => Box::new(HumanConnector::new(side.to_string())),
            Seat::Computer(level) => Box::new(ComputerConnector::new(side, level, seed)),
        }
    }
}
