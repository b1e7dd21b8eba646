//! The turn loop: asks each seat for its command and applies it to the game.

use crate::connectors::{Command, Connector, ParseRelayError};
use crate::save::{self, SaveError};
use derive_more::{Display, Error};
use othello_engine::{Game, IllegalMoveError, Side};
use std::io;
use std::path::PathBuf;

/// Default file used by a bare `save` command.
pub const DEFAULT_SAVE_PATH: &str = "othello.sav";

#[derive(Debug, Display, Error)]
pub enum SessionError {
    #[display(fmt = "i/o error: {}", _0)]
    Io(io::Error),
    #[display(fmt = "{}", _0)]
    Save(SaveError),
    #[display(fmt = "bad message from peer: {}", _0)]
    Relay(ParseRelayError),
    #[display(fmt = "{} attempted an {}", player, source)]
    Illegal {
        player: String,
        source: IllegalMoveError,
    },
    #[display(fmt = "connection closed by peer")]
    Disconnected,
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        SessionError::Io(err)
    }
}

impl From<SaveError> for SessionError {
    fn from(err: SaveError) -> Self {
        SessionError::Save(err)
    }
}

impl From<ParseRelayError> for SessionError {
    fn from(err: ParseRelayError) -> Self {
        SessionError::Relay(err)
    }
}

/// How a session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Neither side could move.
    Finished(Game),
    /// `side` left before the end of the game.
    Quit { side: Side, game: Game },
}

impl SessionOutcome {
    pub fn game(&self) -> &Game {
        match self {
            SessionOutcome::Finished(game) => game,
            SessionOutcome::Quit { game, .. } => game,
        }
    }
}

pub struct Session {
    game: Game,
    black: Box<dyn Connector>,
    white: Box<dyn Connector>,
    save_path: PathBuf,
}

impl Session {
    pub fn new(game: Game, black: Box<dyn Connector>, white: Box<dyn Connector>) -> Self {
        Self {
            game,
            black,
            white,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
        }
    }

    /// Where a `save` command without a path writes to.
    pub fn with_save_path(mut self, save_path: PathBuf) -> Self {
        self.save_path = save_path;
        self
    }

    /// Play until neither side can move or a seat quits.
    /// Illegal moves from any seat end the session with an error.
    pub async fn run(mut self) -> Result<SessionOutcome, SessionError> {
        let history_allowed = !self.black.is_remote() && !self.white.is_remote();
        tracing::info!(
            black = self.black.name(),
            white = self.white.name(),
            "starting game"
        );

        loop {
            if self.game.is_finished() {
                let board = self.game.board();
                tracing::info!(
                    black = board.count(Side::Black),
                    white = board.count(Side::White),
                    "game over"
                );
                return Ok(SessionOutcome::Finished(self.game));
            }

            let side = self.game.to_move();
            let (mover, other) = match side {
                Side::Black => (&mut self.black, &mut self.white),
                Side::White => (&mut self.white, &mut self.black),
            };

            match mover.next_command(&self.game).await? {
                Command::Play(action) => {
                    if let Err(source) = self.game.play(action) {
                        return Err(SessionError::Illegal {
                            player: mover.name().to_string(),
                            source,
                        });
                    }

                    tracing::info!(%side, %action, ply = self.game.ply(), "move");
                    other.observe(side, action).await?;
                }
                Command::Undo | Command::Redo if !history_allowed => {
                    tracing::warn!("undo and redo are not available in network games");
                }
                Command::Undo => {
                    if !step_back(&mut self.game, side) {
                        tracing::warn!("nothing to undo");
                    }
                }
                Command::Redo => {
                    if !step_forward(&mut self.game, side) {
                        tracing::warn!("nothing to redo");
                    }
                }
                Command::Save(path) => {
                    let path = path.unwrap_or_else(|| self.save_path.clone());
                    save::save_position(&path, self.game.position()).await?;
                    tracing::info!(path = %path.display(), "saved game");
                }
                Command::Quit => {
                    tracing::info!(%side, player = mover.name(), "quit");
                    other.quit().await?;
                    return Ok(SessionOutcome::Quit {
                        side,
                        game: self.game,
                    });
                }
            }
        }
    }
}

/// Undo plies until `side` is to move again, so that undoing against a
/// computer takes back the computer's reply as well.
fn step_back(game: &mut Game, side: Side) -> bool {
    let mut moved = false;
    while game.undo() {
        moved = true;
        if game.to_move() == side {
            break;
        }
    }
    moved
}

/// Redo plies until `side` is to move again.
fn step_forward(game: &mut Game, side: Side) -> bool {
    let mut moved = false;
    while game.redo() {
        moved = true;
        if game.to_move() == side {
            break;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_engine::Action;

    fn play(game: &mut Game, text: &str) {
        game.play(Action::Place(text.parse().unwrap())).unwrap();
    }

    #[test]
    fn step_back_returns_to_same_side() {
        let mut game = Game::default();
        play(&mut game, "d3");
        play(&mut game, "c3");

        assert!(step_back(&mut game, Side::Black));
        assert_eq!(game.ply(), 0);
        assert_eq!(game.to_move(), Side::Black);

        assert!(step_forward(&mut game, Side::Black));
        assert_eq!(game.ply(), 2);
        assert!(!step_forward(&mut game, Side::Black));
    }
}
