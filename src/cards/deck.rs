//! A 16-card deck with a single held-card slot.
//!
//! Cards circulate front-to-back: `draw` pops the front, and after the
//! effect resolves the card is either `requeue`d at the back or, for the
//! jail-free card, `hold`-ed by the drawer. While held, 15 cards circulate.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::effect::{CardId, DeckKind};
use crate::core::{GameError, GameRng, PlayerId};

/// Cards per deck.
pub const DECK_SIZE: u8 = 16;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deck {
    kind: DeckKind,
    cards: VecDeque<CardId>,
    holder: Option<PlayerId>,
}

impl Deck {
    /// Cards 1-16 shuffled once with the game RNG.
    pub fn shuffled(kind: DeckKind, rng: &mut GameRng) -> Self {
        let mut cards: Vec<CardId> = (1..=DECK_SIZE).map(CardId).collect();
        rng.shuffle(&mut cards);
        Self {
            kind,
            cards: cards.into(),
            holder: None,
        }
    }

    /// A deck in an explicit order. `order` must be a permutation of 1-16.
    pub fn from_order(kind: DeckKind, order: &[u8]) -> Result<Self, GameError> {
        let mut seen = [false; DECK_SIZE as usize];
        for &id in order {
            let slot = id
                .checked_sub(1)
                .and_then(|i| seen.get_mut(i as usize))
                .ok_or_else(|| GameError::InvalidDeckOrder(format!("card {} out of range", id)))?;
            if *slot {
                return Err(GameError::InvalidDeckOrder(format!("card {} repeated", id)));
            }
            *slot = true;
        }
        if order.len() != DECK_SIZE as usize {
            return Err(GameError::InvalidDeckOrder(format!(
                "expected {} cards, got {}",
                DECK_SIZE,
                order.len()
            )));
        }
        Ok(Self {
            kind,
            cards: order.iter().copied().map(CardId).collect(),
            holder: None,
        })
    }

    #[must_use]
    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    /// Player holding this deck's jail-free card, if any.
    #[must_use]
    pub fn holder(&self) -> Option<PlayerId> {
        self.holder
    }

    /// Cards in circulation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card the next `draw` returns.
    #[must_use]
    pub fn peek(&self) -> Option<CardId> {
        self.cards.front().copied()
    }

    /// Cards in circulation, front first.
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }

    /// Take the front card.
    pub fn draw(&mut self) -> Result<CardId, GameError> {
        self.cards
            .pop_front()
            .ok_or_else(|| GameError::InvalidDeckOrder(format!("{} deck is empty", self.kind)))
    }

    /// Return a resolved card to the back.
    pub fn requeue(&mut self, card: CardId) {
        self.cards.push_back(card);
    }

    /// Give the jail-free card to `player`; it leaves circulation.
    pub fn hold(&mut self, card: CardId, player: PlayerId) -> Result<(), GameError> {
        if card != CardId::JAIL_FREE || self.holder.is_some() {
            return Err(GameError::InvalidCard { deck: self.kind, id: card.0 });
        }
        self.holder = Some(player);
        Ok(())
    }

    /// Put a held jail-free card back at the bottom of the deck.
    ///
    /// Returns the player who held it.
    pub fn return_held(&mut self) -> Option<PlayerId> {
        let holder = self.holder.take()?;
        self.cards.push_back(CardId::JAIL_FREE);
        Some(holder)
    }
}
