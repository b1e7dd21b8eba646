//! [`Connector`] for a person at the terminal.

use super::{Command, Connector};
use crate::SessionError;
use async_std::io;
use async_trait::async_trait;
use itertools::Itertools;
use othello_engine::{Action, Game, ParseActionError};
use std::io::Write;
use std::path::PathBuf;

pub struct HumanConnector {
    name: String,
    stdin: io::Stdin,
}

impl HumanConnector {
    pub fn new(name: String) -> Self {
        Self {
            name,
            stdin: io::stdin(),
        }
    }
}

/// Parse one line of terminal input.
pub fn parse_command(input: &str) -> Result<Command, ParseActionError> {
    let mut words = input.split_whitespace();
    let first = words.next().unwrap_or_default();

    match first.to_ascii_lowercase().as_str() {
        "undo" => Ok(Command::Undo),
        "redo" => Ok(Command::Redo),
        "quit" | "q" => Ok(Command::Quit),
        "save" => Ok(Command::Save(words.next().map(PathBuf::from))),
        _ => input.trim().parse().map(Command::Play),
    }
}

#[async_trait]
impl Connector for HumanConnector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_command(&mut self, game: &Game) -> Result<Command, SessionError> {
        let moves = game.legal_moves();

        println!("\n{}\n", game);
        if moves.is_empty() {
            println!("{} has no legal moves and passes.", self.name);
            return Ok(Command::Play(Action::Pass));
        }

        loop {
            println!("Legal moves: {}", moves.map(|mv| mv.to_string()).join(" "));
            print!("{} move (e.g. d3), undo, redo, save [path] or quit: ", self.name);
            std::io::stdout().flush()?;

            let mut input_line = String::new();
            if self.stdin.read_line(&mut input_line).await? == 0 {
                // End of input: nobody is left to play this seat.
                return Ok(Command::Quit);
            }

            match parse_command(&input_line) {
                Ok(Command::Play(Action::Place(mv))) if !moves.contains(mv) => {
                    println!("{} is not a legal move.", mv);
                }
                Ok(Command::Play(Action::Pass)) => {
                    println!("You can only pass when you have no legal moves.");
                }
                Ok(command) => return Ok(command),
                Err(err) => println!("Cannot parse move: {}", err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(parse_command("undo\n"), Ok(Command::Undo));
        assert_eq!(parse_command("REDO"), Ok(Command::Redo));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("save"), Ok(Command::Save(None)));
        assert_eq!(
            parse_command("save games/one.sav"),
            Ok(Command::Save(Some(PathBuf::from("games/one.sav"))))
        );
        assert_eq!(
            parse_command(" d3 \n"),
            Ok(Command::Play(Action::Place("d3".parse().unwrap())))
        );
        assert_eq!(parse_command("pass"), Ok(Command::Play(Action::Pass)));
    }

    #[test]
    fn parse_command_rejects_garbage() {
        assert!(parse_command("").is_err());
        assert!(parse_command("j9").is_err());
        assert!(parse_command("d3 d4").is_err());
    }
}
