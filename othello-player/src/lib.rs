//! Terminal and network front ends for `othello-engine`.
//!
//! A [`Session`] drives one game between two [`connectors::Connector`]s: people
//! at the terminal, computer players, or a peer on the other end of a TCP relay.

pub mod connectors;
pub mod save;

mod session;

pub use session::{Session, SessionError, SessionOutcome, DEFAULT_SAVE_PATH};
