//! Board model: squares, property identities, ownership and economics.
//!
//! Everything here is pure data and pure functions. Mutable ownership
//! status lives in [`Deeds`], which the game state owns.

pub mod square;
pub mod property;
pub mod tables;

pub use square::{Location, Position, Square, Tax, BOARD_SIZE};
pub use property::{ColorGroup, Deeds, PropertyId, PropertyKind, PropertyState, PROPERTY_COUNT};
pub use tables::{building_price_of, cost_of, mortgage_value_of, street_rents};

use crate::core::GameError;

/// The property on `position`, or `NotOwnable` for any other square.
pub fn property_at(position: Position) -> Result<PropertyId, GameError> {
    match position.square() {
        Square::Property(id) => Ok(id),
        _ => Err(GameError::NotOwnable(position)),
    }
}

/// First square of `kind` strictly after `from`, wrapping past Go.
#[must_use]
pub fn nearest(from: Position, kind: fn(PropertyId) -> bool) -> Option<Position> {
    (1..i64::from(BOARD_SIZE))
        .map(|step| from.advance(step).0)
        .find(|p| matches!(p.square(), Square::Property(id) if kind(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_at() {
        assert_eq!(property_at(Position::at(5)), PropertyId::railroad(1));
        assert_eq!(
            property_at(Position::at(7)),
            Err(GameError::NotOwnable(Position::at(7)))
        );
    }

    #[test]
    fn test_nearest_from_chance_squares() {
        assert_eq!(nearest(Position::at(7), PropertyId::is_railroad), Some(Position::at(15)));
        assert_eq!(nearest(Position::at(22), PropertyId::is_railroad), Some(Position::at(25)));
        assert_eq!(nearest(Position::at(36), PropertyId::is_railroad), Some(Position::at(5)));

        assert_eq!(nearest(Position::at(7), PropertyId::is_utility), Some(Position::at(12)));
        assert_eq!(nearest(Position::at(22), PropertyId::is_utility), Some(Position::at(28)));
        assert_eq!(nearest(Position::at(36), PropertyId::is_utility), Some(Position::at(12)));
    }
}
