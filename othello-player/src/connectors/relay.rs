//! [`Connector`] for a peer on another machine, over a line-based TCP relay.
//!
//! Each message is one newline-terminated ASCII token: a coordinate such as
//! `d3`, `PASS`, or `QUIT`. Both ends run their own [`crate::Session`] and
//! check every received move against their own copy of the game.

use super::{Command, Connector};
use crate::SessionError;
use async_std::io::BufReader;
use async_std::net::{TcpListener, TcpStream, ToSocketAddrs};
use async_std::prelude::*;
use async_trait::async_trait;
use derive_more::{Display, Error};
use othello_engine::{Action, Game, Location, Side};
use std::fmt;
use std::str::FromStr;

/// One token on the relay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayMessage {
    Play(Action),
    Quit,
}

#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "unrecognised relay message {:?}", text)]
pub struct ParseRelayError {
    pub text: String,
}

impl FromStr for RelayMessage {
    type Err = ParseRelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PASS" => Ok(RelayMessage::Play(Action::Pass)),
            "QUIT" => Ok(RelayMessage::Quit),
            token => token
                .parse::<Location>()
                .map(|loc| RelayMessage::Play(Action::Place(loc)))
                .map_err(|_| ParseRelayError {
                    text: token.to_string(),
                }),
        }
    }
}

impl fmt::Display for RelayMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayMessage::Play(Action::Place(loc)) => write!(f, "{}", loc),
            RelayMessage::Play(Action::Pass) => f.write_str("PASS"),
            RelayMessage::Quit => f.write_str("QUIT"),
        }
    }
}

pub struct RelayConnector {
    name: String,
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl RelayConnector {
    /// Listen on `addr` and wait for a single peer.
    pub async fn host<A: ToSocketAddrs>(addr: A) -> Result<Self, SessionError> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "waiting for a peer");
        Self::accept(&listener).await
    }

    /// Accept the next peer on an already bound listener.
    pub async fn accept(listener: &TcpListener) -> Result<Self, SessionError> {
        let (stream, peer) = listener.accept().await?;
        tracing::info!(%peer, "peer connected");
        Ok(Self::new(stream, format!("peer {}", peer)))
    }

    /// Connect to a hosting peer.
    pub async fn join<A: ToSocketAddrs>(addr: A) -> Result<Self, SessionError> {
        let stream = TcpStream::connect(addr).await?;
        let peer = stream.peer_addr()?;
        tracing::info!(%peer, "connected to host");
        Ok(Self::new(stream, format!("peer {}", peer)))
    }

    fn new(stream: TcpStream, name: String) -> Self {
        Self {
            name,
            reader: BufReader::new(stream.clone()),
            writer: stream,
        }
    }

    pub async fn send(&mut self, message: RelayMessage) -> Result<(), SessionError> {
        tracing::debug!(peer = %self.name, %message, "send");
        self.writer
            .write_all(format!("{}\n", message).as_bytes())
            .await?;
        self.writer.flush().await?;
        Ok(())
    }

    pub async fn recv(&mut self) -> Result<RelayMessage, SessionError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Err(SessionError::Disconnected);
        }

        let message = line.parse()?;
        tracing::debug!(peer = %self.name, %message, "received");
        Ok(message)
    }
}

#[async_trait]
impl Connector for RelayConnector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_command(&mut self, _game: &Game) -> Result<Command, SessionError> {
        Ok(match self.recv().await? {
            RelayMessage::Play(action) => Command::Play(action),
            RelayMessage::Quit => Command::Quit,
        })
    }

    async fn observe(&mut self, _side: Side, action: Action) -> Result<(), SessionError> {
        self.send(RelayMessage::Play(action)).await
    }

    async fn quit(&mut self) -> Result<(), SessionError> {
        self.send(RelayMessage::Quit).await
    }

    fn is_remote(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_std::task;

    #[test]
    fn parse_messages() {
        assert_eq!(
            "d3\n".parse(),
            Ok(RelayMessage::Play(Action::Place("d3".parse().unwrap())))
        );
        assert_eq!("PASS".parse(), Ok(RelayMessage::Play(Action::Pass)));
        assert_eq!("QUIT\r\n".parse(), Ok(RelayMessage::Quit));
        assert_eq!(
            "hello".parse::<RelayMessage>(),
            Err(ParseRelayError {
                text: "hello".to_string()
            })
        );
    }

    #[test]
    fn format_messages() {
        let f4 = RelayMessage::Play(Action::Place("F4".parse().unwrap()));
        assert_eq!(f4.to_string(), "f4");
        assert_eq!(RelayMessage::Play(Action::Pass).to_string(), "PASS");
        assert_eq!(RelayMessage::Quit.to_string(), "QUIT");
    }

    #[test]
    fn loopback_exchange() {
        task::block_on(async {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let host = task::spawn(async move { RelayConnector::accept(&listener).await });

            let mut guest = RelayConnector::join(addr).await.unwrap();
            let mut host = host.await.unwrap();

            let d3 = RelayMessage::Play(Action::Place("d3".parse().unwrap()));
            host.send(d3).await.unwrap();
            assert_eq!(guest.recv().await.unwrap(), d3);

            guest.send(RelayMessage::Play(Action::Pass)).await.unwrap();
            guest.send(RelayMessage::Quit).await.unwrap();
            assert_eq!(host.recv().await.unwrap(), RelayMessage::Play(Action::Pass));
            assert_eq!(host.recv().await.unwrap(), RelayMessage::Quit);

            drop(guest);
            assert!(matches!(host.recv().await, Err(SessionError::Disconnected)));
        });
    }
}
