//! Saving and loading positions as small text files.
//!
//! The file holds three lines: Black's bitboard and White's bitboard as
//! decimal integers, then `1` if Black is to move or `0` if White is.

use async_std::fs;
use derive_more::{Display, Error};
use othello_engine::{ParseSaveError, Position};
use std::io;
use std::path::Path;

#[derive(Debug, Display, Error)]
pub enum SaveError {
    #[display(fmt = "cannot access save file: {}", _0)]
    Io(io::Error),
    #[display(fmt = "invalid save file: {}", _0)]
    Parse(ParseSaveError),
}

impl From<io::Error> for SaveError {
    fn from(err: io::Error) -> Self {
        SaveError::Io(err)
    }
}

impl From<ParseSaveError> for SaveError {
    fn from(err: ParseSaveError) -> Self {
        SaveError::Parse(err)
    }
}

/// Write `position` to `path`, replacing any existing file.
pub async fn save_position<P: AsRef<Path>>(path: P, position: Position) -> Result<(), SaveError> {
    fs::write(path.as_ref(), position.to_string()).await?;
    Ok(())
}

/// Read a position written by [`save_position`].
pub async fn load_position<P: AsRef<Path>>(path: P) -> Result<Position, SaveError> {
    let text = fs::read_to_string(path.as_ref()).await?;
    Ok(text.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_std::task;
    use othello_engine::{Action, Game, Side};

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.sav");

        let mut game = Game::default();
        game.play(Action::Place("d3".parse().unwrap())).unwrap();
        let position = game.position();

        task::block_on(async {
            save_position(&path, position).await.unwrap();
            let loaded = load_position(&path).await.unwrap();
            assert_eq!(loaded, position);
            assert_eq!(loaded.to_move, Side::White);
        });
    }

    #[test]
    fn load_rejects_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.sav");
        std::fs::write(&path, "12\nnot a number\n1\n").unwrap();

        let result = task::block_on(load_position(&path));
        assert!(matches!(result, Err(SaveError::Parse(ParseSaveError::BadBitboard { line: 2, .. }))));

        let missing = task::block_on(load_position(dir.path().join("missing.sav")));
        assert!(matches!(missing, Err(SaveError::Io(_))));
    }
}
