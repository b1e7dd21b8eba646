//! [`Connector`] for a computer player using one of the engine's move choosers.

use super::{Command, Connector};
use crate::SessionError;
use async_trait::async_trait;
use othello_engine::{choose_move, Action, Game, Level, Side};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct ComputerConnector {
    name: String,
    level: Level,
    rng: StdRng,
}

impl ComputerConnector {
    /// A computer player for `side`. Without a seed the random source is seeded from the OS.
    pub fn new(side: Side, level: Level, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            name: format!("{} ({})", side, level),
            level,
            rng,
        }
    }
}

#[async_trait]
impl Connector for ComputerConnector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_command(&mut self, game: &Game) -> Result<Command, SessionError> {
        let action = choose_move(game.board(), game.to_move(), self.level, &mut self.rng)
            .map_or(Action::Pass, Action::Place);

        tracing::debug!(player = %self.name, %action, "computer chose");
        Ok(Command::Play(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_std::task;
    use othello_engine::{Board, Position};

    #[test]
    fn plays_legal_moves() {
        let mut connector = ComputerConnector::new(Side::Black, Level::Greedy, Some(5));
        let game = Game::default();

        let command = task::block_on(connector.next_command(&game)).unwrap();
        match command {
            Command::Play(Action::Place(mv)) => assert!(game.legal_moves().contains(mv)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn passes_without_moves() {
        let board: Board = "
            BBBBBBBB
            BBBBBBBB
            BBBBBBBB
            BBBBBBBB
            BBBBBBBB
            BBBBBBBB
            BBBBBBBW
            BBBBBB..
        "
        .parse()
        .unwrap();
        let game = Game::from_position(Position::new(board, Side::White));
        let mut connector = ComputerConnector::new(Side::White, Level::Positional, Some(0));

        assert_eq!(
            task::block_on(connector.next_command(&game)).unwrap(),
            Command::Play(Action::Pass)
        );
    }
}
