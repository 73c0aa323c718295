//! Player decision points.
//!
//! The turn engine asks a `PlayerPolicy` whenever the rules leave a choice:
//! how to leave jail, whether to buy, and what to do outside one's own turn.
//! Everything else is forced by the dice and the board.

use crate::board::{tables, ColorGroup, PropertyId};
use crate::core::{GameConfig, GameState, JailExit, PlayerId};

/// Something a player does while another player is taking their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NonTurnAction {
    /// Buy one house (or the hotel) on a street.
    Build { street: PropertyId },
    /// Offer a property to another player. Not implemented.
    Trade { with: PlayerId, property: PropertyId },
    /// Put a property up for auction. Not implemented.
    Auction { property: PropertyId },
}

/// Decision-making for every player in a game.
///
/// ## Implementation Notes
///
/// - Methods receive the live in-progress state and must not assume it is
///   a committed snapshot.
/// - `wants_to_buy` is only asked when the player can afford the property.
/// - Returned non-turn actions are applied in order; an illegal one aborts
///   the run with an error.
pub trait PlayerPolicy {
    /// How `player`, who is in jail, tries to get out this turn.
    fn jail_exit(&mut self, state: &GameState, player: PlayerId) -> JailExit;

    /// Whether `player` buys the unowned `property` they landed on.
    fn wants_to_buy(&mut self, _state: &GameState, _player: PlayerId, _property: PropertyId) -> bool {
        true
    }

    /// Actions `player` takes before the active player's turn.
    fn non_turn_actions(&mut self, _state: &GameState, _player: PlayerId) -> Vec<NonTurnAction> {
        Vec::new()
    }
}

/// Policy driven by the game configuration: one fixed jail exit, buy
/// whatever is affordable, and optionally build on completed bands.
#[derive(Clone, Debug)]
pub struct DefaultPolicy {
    jail_exit: JailExit,
    auto_build: bool,
    build_reserve: i64,
}

impl DefaultPolicy {
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            jail_exit: config.jail_exit,
            auto_build: config.auto_build,
            build_reserve: config.build_reserve,
        }
    }

    /// The next house `player` can buy while keeping the reserve: the least
    /// developed street of the cheapest eligible band.
    fn next_build(&self, state: &GameState, player: PlayerId) -> Option<NonTurnAction> {
        let money = state.player(player).money;
        ColorGroup::ALL
            .into_iter()
            .filter(|&color| money - tables::building_price_of(color) >= self.build_reserve)
            .filter_map(|color| least_developed(state, player, color))
            .next()
            .map(|street| NonTurnAction::Build { street })
    }
}

impl PlayerPolicy for DefaultPolicy {
    fn jail_exit(&mut self, _state: &GameState, _player: PlayerId) -> JailExit {
        self.jail_exit
    }

    fn non_turn_actions(&mut self, state: &GameState, player: PlayerId) -> Vec<NonTurnAction> {
        if !self.auto_build {
            return Vec::new();
        }
        self.next_build(state, player).into_iter().collect()
    }
}

/// A street of `color` that `player` may legally build on next, if any.
fn least_developed(state: &GameState, player: PlayerId, color: ColorGroup) -> Option<PropertyId> {
    if !state.deeds.holds_band(player, color) {
        return None;
    }
    if color.streets().any(|s| state.deeds.get(s).mortgaged) {
        return None;
    }
    color
        .streets()
        .filter(|&s| !state.deeds.get(s).hotel)
        .min_by_key(|&s| state.deeds.get(s).building_units())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Deck, DeckKind};
    use crate::core::GameRng;

    fn state(config: &GameConfig) -> GameState {
        let mut rng = GameRng::new(config.seed);
        let chance = Deck::shuffled(DeckKind::Chance, &mut rng);
        let community = Deck::shuffled(DeckKind::CommunityChest, &mut rng);
        GameState::new(config, chance, community)
    }

    #[test]
    fn test_default_policy_follows_config() {
        let config = GameConfig::default().with_jail_exit(JailExit::RollDoubles);
        let s = state(&config);
        let mut policy = DefaultPolicy::from_config(&config);

        assert_eq!(policy.jail_exit(&s, PlayerId::new(1)), JailExit::RollDoubles);
        assert!(policy.wants_to_buy(&s, PlayerId::new(1), PropertyId::railroad(1).unwrap()));
        assert!(policy.non_turn_actions(&s, PlayerId::new(1)).is_empty());
    }

    #[test]
    fn test_auto_build_picks_least_developed_street() {
        let config = GameConfig::default().with_auto_build(true);
        let mut s = state(&config);
        let p1 = PlayerId::new(1);
        for street in ColorGroup::LightBlue.streets() {
            s.deeds.get_mut(street).owner = Some(p1);
        }
        s.deeds.get_mut("l1".parse().unwrap()).houses = 1;
        let mut policy = DefaultPolicy::from_config(&config);

        let actions = policy.non_turn_actions(&s, p1);

        assert_eq!(
            actions,
            vec![NonTurnAction::Build {
                street: "l2".parse().unwrap()
            }]
        );
    }

    #[test]
    fn test_auto_build_keeps_reserve() {
        let config = GameConfig::default().with_auto_build(true);
        let mut s = state(&config);
        let p1 = PlayerId::new(1);
        for street in ColorGroup::Brown.streets() {
            s.deeds.get_mut(street).owner = Some(p1);
        }
        s.player_mut(p1).money = 240;
        let mut policy = DefaultPolicy::from_config(&config);

        assert!(policy.non_turn_actions(&s, p1).is_empty());
    }

    #[test]
    fn test_auto_build_skips_mortgaged_band() {
        let config = GameConfig::default().with_auto_build(true);
        let mut s = state(&config);
        let p1 = PlayerId::new(1);
        for street in ColorGroup::Brown.streets() {
            s.deeds.get_mut(street).owner = Some(p1);
        }
        s.deeds.get_mut("b2".parse().unwrap()).mortgaged = true;
        let mut policy = DefaultPolicy::from_config(&config);

        assert!(policy.non_turn_actions(&s, p1).is_empty());
    }
}
