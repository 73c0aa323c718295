//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Players are numbered from 1; index 0 is
//! reserved for the bank in every external encoding (trace columns, notes).
//!
//! ## Party
//!
//! One endpoint of a money transfer: the bank or a player.
//!
//! ## PlayerMap
//!
//! Dense per-seat storage for anything kept per player.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier. The first player is `PlayerId(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the 0-based storage index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// The numeric code used in traces and notes (bank is 0).
    #[must_use]
    pub const fn code(self) -> i64 {
        self.0 as i64
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use monopoly_sim::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(1));
    /// assert_eq!(players[3], PlayerId::new(4));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A money-holding party: the bank or a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    Bank,
    Player(PlayerId),
}

impl Party {
    /// Trace code: 0 for the bank, the player number otherwise.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Party::Bank => 0,
            Party::Player(p) => p.code(),
        }
    }

    #[must_use]
    pub const fn player(self) -> Option<PlayerId> {
        match self {
            Party::Bank => None,
            Party::Player(p) => Some(p),
        }
    }
}

impl From<PlayerId> for Party {
    fn from(player: PlayerId) -> Self {
        Party::Player(player)
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.code())
    }
}

/// Per-player values indexed by [`PlayerId`], one slot per seat.
///
/// ```
/// use monopoly_sim::core::{PlayerId, PlayerMap};
///
/// let mut money: PlayerMap<i64> = PlayerMap::with_value(4, 1500);
/// money[PlayerId::new(2)] -= 60;
/// assert_eq!(money[PlayerId::new(2)], 1440);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// One entry per seat, built by `factory`.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            seats: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Whether `player` sits at this table.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.0 >= 1 && player.index() < self.seats.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }

    /// Seats in player order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all(self.seats.len()).zip(self.seats.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p1 = PlayerId::new(1);
        let p2 = PlayerId::new(2);

        assert_eq!(p1.index(), 0);
        assert_eq!(p2.index(), 1);
        assert_eq!(p2.code(), 2);
        assert_eq!(format!("{}", p1), "Player 1");
    }

    #[test]
    fn test_party_codes() {
        assert_eq!(Party::Bank.code(), 0);
        assert_eq!(Party::from(PlayerId::new(3)).code(), 3);
        assert_eq!(Party::Bank.player(), None);
        assert_eq!(format!("{}", Party::Player(PlayerId::new(2))), "p2");
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i64> = PlayerMap::new(4, |p| p.code() * 10);

        assert_eq!(map[PlayerId::new(1)], 10);
        assert_eq!(map[PlayerId::new(4)], 40);
    }

    #[test]
    fn test_player_map_contains() {
        let map: PlayerMap<i64> = PlayerMap::with_value(3, 0);

        assert!(map.contains(PlayerId::new(1)));
        assert!(map.contains(PlayerId::new(3)));
        assert!(!map.contains(PlayerId::new(0)));
        assert!(!map.contains(PlayerId::new(4)));
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i64> = PlayerMap::new(3, |p| p.code());

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], (PlayerId::new(1), &1));
        assert_eq!(pairs[2], (PlayerId::new(3), &3));
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i64> = PlayerMap::new(2, |p| p.code() + 1);
        assert_eq!(map.player_count(), 2);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
