//! Chance and Community Chest decks.
//!
//! ## Components
//!
//! - `CardEffect`: what a card does, one variant per behavior
//! - `DeckKind::effect`: the identifier → effect dispatch table
//! - `Deck`: shuffled queue plus the held jail-free card slot
//!
//! Effects are interpreted by the turn engine; this module only stores
//! order and ownership of the decks.

mod deck;
mod effect;

pub use deck::{Deck, DECK_SIZE};
pub use effect::{CardEffect, CardId, DeckKind, Nearest};
