//! Board positions and what sits on them.
//!
//! The 40-square topology is fixed. Each position maps to exactly one
//! `Square`: the 28 deeds sit where [`PropertyId::position`] puts them and
//! the corner, tax and card squares fill the rest.

use serde::{Deserialize, Serialize};

use super::property::PropertyId;
use crate::core::GameError;

/// Number of squares on the board.
pub const BOARD_SIZE: u8 = 40;

/// A square index, 0..=39.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(u8);

impl Position {
    pub const GO: Position = Position(0);
    pub const JAIL: Position = Position(10);
    pub const FREE_PARKING: Position = Position(20);
    pub const GO_TO_JAIL: Position = Position(30);

    /// Validate a raw index.
    pub fn new(index: i64) -> Result<Self, GameError> {
        if (0..i64::from(BOARD_SIZE)).contains(&index) {
            Ok(Self(index as u8))
        } else {
            Err(GameError::InvalidPosition(index))
        }
    }

    /// Const constructor for table entries. Panics at compile time when
    /// used in a const context with an out-of-range index.
    #[must_use]
    pub const fn at(index: u8) -> Self {
        assert!(index < BOARD_SIZE, "position out of range");
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Move `steps` squares (negative moves backwards).
    ///
    /// Returns the new position and whether the move wrapped past Go going
    /// forwards.
    #[must_use]
    pub fn advance(self, steps: i64) -> (Position, bool) {
        let raw = i64::from(self.0) + steps;
        let next = raw.rem_euclid(i64::from(BOARD_SIZE)) as u8;
        (Position(next), steps > 0 && next < self.0)
    }

    /// Iterate over every square on the board.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).map(Position)
    }

    /// What sits on this square.
    #[must_use]
    pub fn square(self) -> Square {
        match PropertyId::on_square(self) {
            Some(id) => Square::Property(id),
            None => unowned_square(self.0),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which tax a tax square levies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tax {
    Income,
    Luxury,
}

/// The category of a board square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    Go,
    Tax(Tax),
    Jail,
    GoToJail,
    FreeParking,
    Chance,
    CommunityChest,
    Property(PropertyId),
}

/// A square that holds no property.
fn unowned_square(index: u8) -> Square {
    match index {
        0 => Square::Go,
        10 => Square::Jail,
        20 => Square::FreeParking,
        30 => Square::GoToJail,
        4 => Square::Tax(Tax::Income),
        38 => Square::Tax(Tax::Luxury),
        2 | 17 | 33 => Square::CommunityChest,
        // 7, 22 and 36: every other square holds a deed.
        _ => Square::Chance,
    }
}

/// Where a player's token is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Square(Position),
    Jail,
}

impl Location {
    /// Trace encoding: -1 for jail, the square index otherwise.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Location::Square(p) => p.0 as i64,
            Location::Jail => -1,
        }
    }

    /// Decode the trace encoding.
    pub fn from_code(code: i64) -> Result<Self, GameError> {
        if code == -1 {
            Ok(Location::Jail)
        } else {
            Position::new(code).map(Location::Square)
        }
    }

    #[must_use]
    pub const fn is_jail(self) -> bool {
        matches!(self, Location::Jail)
    }

    #[must_use]
    pub const fn position(self) -> Option<Position> {
        match self {
            Location::Square(p) => Some(p),
            Location::Jail => None,
        }
    }
}
