//! Card effects and the identifier → effect tables for both decks.
//!
//! Each deck holds cards 1-16. Card 1 is always "get out of jail free".
//! The engine interprets a `CardEffect` in one place; nothing else branches
//! on raw card numbers.

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::core::GameError;

/// Which of the two card decks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    Chance,
    CommunityChest,
}

impl DeckKind {
    pub const ALL: [DeckKind; 2] = [DeckKind::CommunityChest, DeckKind::Chance];

    /// Prefix used in turn notes (`ch.p1.`).
    #[must_use]
    pub const fn note_prefix(self) -> &'static str {
        match self {
            DeckKind::Chance => "ch",
            DeckKind::CommunityChest => "cc",
        }
    }

    /// The effect printed on `card`.
    pub fn effect(self, card: CardId) -> Result<CardEffect, GameError> {
        let table = match self {
            DeckKind::Chance => &CHANCE,
            DeckKind::CommunityChest => &COMMUNITY_CHEST,
        };
        card.0
            .checked_sub(1)
            .and_then(|i| table.get(i as usize))
            .copied()
            .ok_or(GameError::InvalidCard { deck: self, id: card.0 })
    }
}

impl std::fmt::Display for DeckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckKind::Chance => f.write_str("Chance"),
            DeckKind::CommunityChest => f.write_str("Community Chest"),
        }
    }
}

/// A card's identifier within its deck, 1-16.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    pub const JAIL_FREE: CardId = CardId(1);

    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

/// Target kind for "advance to the nearest ..." cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nearest {
    /// Pay the owner twice the normal rent.
    Railroad,
    /// Pay the owner ten times a fresh dice roll.
    Utility,
}

/// What a card does when drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardEffect {
    /// Held by the drawer until used.
    GetOutOfJailFree,
    /// Move forward to a square, collecting Go salary on wrap, then resolve it.
    AdvanceTo(Position),
    /// Move forward to the nearest railroad or utility and buy or pay rent.
    AdvanceToNearest(Nearest),
    /// Bank pays the drawer.
    Collect(i64),
    /// Drawer pays the bank.
    Pay(i64),
    /// Move backwards without Go salary, then resolve the square.
    MoveBack(u8),
    GoToJail,
    /// Drawer pays the bank per house and per hotel owned.
    StreetRepairs { per_house: i64, per_hotel: i64 },
    /// Drawer pays every other active player.
    PayEachPlayer(i64),
    /// Every other active player pays the drawer.
    CollectFromEachPlayer(i64),
}

impl CardEffect {
    /// Whether the card leaves circulation with the drawer.
    #[must_use]
    pub const fn is_held(self) -> bool {
        matches!(self, CardEffect::GetOutOfJailFree)
    }

    /// Short note tag for the turn transcript.
    #[must_use]
    pub fn tag(self) -> String {
        match self {
            CardEffect::GetOutOfJailFree => "gjf".to_string(),
            CardEffect::AdvanceTo(p) => format!("mv{}", p),
            CardEffect::AdvanceToNearest(Nearest::Railroad) => "nrr".to_string(),
            CardEffect::AdvanceToNearest(Nearest::Utility) => "nu".to_string(),
            CardEffect::Collect(amount) => format!("g{}", amount),
            CardEffect::Pay(amount) => format!("p{}", amount),
            CardEffect::MoveBack(steps) => format!("bk{}", steps),
            CardEffect::GoToJail => "gtj".to_string(),
            CardEffect::StreetRepairs { .. } => "rep".to_string(),
            CardEffect::PayEachPlayer(_) => "pep".to_string(),
            CardEffect::CollectFromEachPlayer(_) => "cep".to_string(),
        }
    }
}

const CHANCE: [CardEffect; 16] = [
    CardEffect::GetOutOfJailFree,
    CardEffect::AdvanceTo(Position::at(39)),
    CardEffect::AdvanceTo(Position::at(0)),
    CardEffect::AdvanceTo(Position::at(24)),
    CardEffect::AdvanceTo(Position::at(11)),
    CardEffect::AdvanceTo(Position::at(5)),
    CardEffect::AdvanceToNearest(Nearest::Railroad),
    CardEffect::AdvanceToNearest(Nearest::Railroad),
    CardEffect::AdvanceToNearest(Nearest::Utility),
    CardEffect::Collect(50),
    CardEffect::Collect(150),
    CardEffect::MoveBack(3),
    CardEffect::GoToJail,
    CardEffect::StreetRepairs { per_house: 25, per_hotel: 100 },
    CardEffect::Pay(15),
    CardEffect::PayEachPlayer(50),
];

const COMMUNITY_CHEST: [CardEffect; 16] = [
    CardEffect::GetOutOfJailFree,
    CardEffect::AdvanceTo(Position::at(0)),
    CardEffect::Collect(200),
    CardEffect::Collect(50),
    CardEffect::Collect(100),
    CardEffect::Collect(20),
    CardEffect::Collect(100),
    CardEffect::Collect(25),
    CardEffect::Collect(10),
    CardEffect::Collect(100),
    CardEffect::Pay(50),
    CardEffect::Pay(100),
    CardEffect::Pay(50),
    CardEffect::GoToJail,
    CardEffect::CollectFromEachPlayer(10),
    CardEffect::StreetRepairs { per_house: 40, per_hotel: 115 },
];
