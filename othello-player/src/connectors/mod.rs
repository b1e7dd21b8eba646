//! Connectors let a [`crate::Session`] talk to whoever sits in each seat.

mod computer;
mod connector;
mod human;
mod relay;

pub use computer::ComputerConnector;
pub use connector::{Command, Connector, Seat};
pub use human::{parse_command, HumanConnector};
pub use relay::{ParseRelayError, RelayConnector, RelayMessage};
