//! Engine error taxonomy.

use thiserror::Error;

use super::player::{Party, PlayerId};
use crate::board::Position;
use crate::cards::DeckKind;

/// Capabilities the engine deliberately does not implement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unsupported {
    /// Leaving jail by playing a held "get out of jail free" card.
    CardJailExit,
    /// Trading properties or money between players.
    Trade,
    /// Auctioning a property.
    Auction,
}

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Unsupported::CardJailExit => "card-based jail exit",
            Unsupported::Trade => "trading between players",
            Unsupported::Auction => "property auctions",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid transfer of {amount} from {from} to {to}")]
    InvalidTransfer { from: Party, to: Party, amount: i64 },
    #[error("{player} needs {needed} but holds {available}")]
    InsufficientFunds {
        player: PlayerId,
        needed: i64,
        available: i64,
    },
    #[error("not implemented: {0}")]
    NotImplemented(Unsupported),
    #[error("board position {0} is out of range")]
    InvalidPosition(i64),
    #[error("{deck} has no card {id}")]
    InvalidCard { deck: DeckKind, id: u8 },
    #[error("square {0} cannot be owned")]
    NotOwnable(Position),
    #[error("unknown property `{0}`")]
    UnknownProperty(String),
    #[error("invalid deck order: {0}")]
    InvalidDeckOrder(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{0} is bankrupt")]
    BankruptPlayer(PlayerId),
    #[error("{0} is not in the game")]
    UnknownPlayer(PlayerId),
    #[error("cannot build on {0}")]
    CannotBuild(String),
    #[error("no trace column `{0}`")]
    UnknownColumn(String),
    #[error("trace serialization failed: {0}")]
    Serialization(String),
    #[error("trace export failed: {0}")]
    Export(String),
}

impl GameError {
    /// Whether this error is the "not implemented" signal a driver should
    /// catch to halt the run and still persist the trace.
    #[must_use]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, GameError::NotImplemented(_))
    }
}
