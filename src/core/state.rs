//! Game state: one complete, clonable value per step.
//!
//! `GameState` holds everything a trace row shows plus the deck order, so a
//! committed snapshot is self-contained. The turn engine owns the single
//! in-progress state and mutates it; the history recorder stores clones.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::GameConfig;
use super::player::{Party, PlayerId, PlayerMap};
use crate::board::{Deeds, Location, Position};
use crate::cards::{Deck, DeckKind};

/// Mutable per-player fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerState {
    /// Cash. Negative means bankrupt.
    pub money: i64,
    pub location: Location,
    /// Removed from the rotation. Permanent.
    pub bankrupt: bool,
    /// Consecutive failed attempts to roll out of jail.
    pub jail_turns: u8,
}

impl PlayerState {
    fn new(money: i64) -> Self {
        Self {
            money,
            location: Location::Square(Position::GO),
            bankrupt: false,
            jail_turns: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Round counter, starting at 1.
    pub round: u32,

    /// Player whose turn it is.
    pub active_player: PlayerId,

    /// Total of the most recent roll, 0 before the first roll.
    pub dice_total: u8,

    /// Bank cash.
    pub bank: i64,

    pub players: PlayerMap<PlayerState>,

    pub deeds: Deeds,

    pub chance: Deck,

    pub community_chest: Deck,
}

impl GameState {
    /// Initial state: bank funded with `bank_total` minus each player's
    /// starting money, everyone on Go, player 1 to move.
    #[must_use]
    pub fn new(config: &GameConfig, chance: Deck, community_chest: Deck) -> Self {
        Self {
            round: 1,
            active_player: PlayerId::new(1),
            dice_total: 0,
            bank: config.initial_bank_money(),
            players: PlayerMap::with_value(config.player_count, PlayerState::new(config.starting_money)),
            deeds: Deeds::new(),
            chance,
            community_chest,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// Cash held by a party.
    #[must_use]
    pub fn money(&self, party: Party) -> i64 {
        match party {
            Party::Bank => self.bank,
            Party::Player(p) => self.players[p].money,
        }
    }

    pub fn money_mut(&mut self, party: Party) -> &mut i64 {
        match party {
            Party::Bank => &mut self.bank,
            Party::Player(p) => &mut self.players[p].money,
        }
    }

    /// Bank plus every player's cash, bankrupt players included.
    #[must_use]
    pub fn total_money(&self) -> i64 {
        self.bank + self.players.iter().map(|(_, s)| s.money).sum::<i64>()
    }

    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.players.contains(player) && !self.players[player].bankrupt
    }

    /// Non-bankrupt players in rotation order.
    #[must_use]
    pub fn active_players(&self) -> SmallVec<[PlayerId; 8]> {
        self.players
            .iter()
            .filter(|(_, s)| !s.bankrupt)
            .map(|(p, _)| p)
            .collect()
    }

    /// The active player who moves after `player`, and whether the rotation
    /// wrapped back to a lower player number. `player` itself may be bankrupt.
    #[must_use]
    pub fn next_active_after(&self, player: PlayerId) -> Option<(PlayerId, bool)> {
        let active = self.active_players();
        if let Some(&next) = active.iter().find(|p| **p > player) {
            return Some((next, false));
        }
        active.first().map(|&first| (first, true))
    }

    #[must_use]
    pub fn location(&self, player: PlayerId) -> Location {
        self.players[player].location
    }

    #[must_use]
    pub fn deck(&self, kind: DeckKind) -> &Deck {
        match kind {
            DeckKind::Chance => &self.chance,
            DeckKind::CommunityChest => &self.community_chest,
        }
    }

    pub fn deck_mut(&mut self, kind: DeckKind) -> &mut Deck {
        match kind {
            DeckKind::Chance => &mut self.chance,
            DeckKind::CommunityChest => &mut self.community_chest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    fn state(players: usize) -> GameState {
        let config = GameConfig::new(players);
        let mut rng = GameRng::new(config.seed);
        let chance = Deck::shuffled(DeckKind::Chance, &mut rng);
        let community = Deck::shuffled(DeckKind::CommunityChest, &mut rng);
        GameState::new(&config, chance, community)
    }

    #[test]
    fn test_initial_allocation() {
        let s = state(2);
        assert_eq!(s.round, 1);
        assert_eq!(s.active_player, PlayerId::new(1));
        assert_eq!(s.bank, 17580);
        assert_eq!(s.money(Party::Player(PlayerId::new(2))), 1500);
        assert_eq!(s.total_money(), 20580);
        assert_eq!(s.location(PlayerId::new(1)), Location::Square(Position::GO));
    }

    #[test]
    fn test_rotation_skips_bankrupt() {
        let mut s = state(4);
        s.player_mut(PlayerId::new(3)).bankrupt = true;

        assert_eq!(s.next_active_after(PlayerId::new(1)), Some((PlayerId::new(2), false)));
        assert_eq!(s.next_active_after(PlayerId::new(2)), Some((PlayerId::new(4), false)));
        assert_eq!(s.next_active_after(PlayerId::new(4)), Some((PlayerId::new(1), true)));
        assert_eq!(s.next_active_after(PlayerId::new(3)), Some((PlayerId::new(4), false)));
    }

    #[test]
    fn test_rotation_after_last_player_goes_bankrupt() {
        let mut s = state(3);
        s.player_mut(PlayerId::new(3)).bankrupt = true;

        assert_eq!(s.next_active_after(PlayerId::new(3)), Some((PlayerId::new(1), true)));
        assert_eq!(s.active_players().as_slice(), &[PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn test_deck_accessors() {
        let mut s = state(2);
        assert_eq!(s.deck(DeckKind::Chance).kind(), DeckKind::Chance);
        s.deck_mut(DeckKind::CommunityChest).draw().unwrap();
        assert_eq!(s.deck(DeckKind::CommunityChest).len(), 15);
    }
}
