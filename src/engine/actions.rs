//! Actions taken outside one's own turn.

use tracing::debug;

use super::policy::NonTurnAction;
use super::Game;
use crate::board::{tables, PropertyId};
use crate::core::{GameError, GameState, Party, PlayerId, Unsupported};
use crate::ledger::Ledger;

impl Game {
    /// Give every other active player their non-turn actions, in rotation
    /// order, before `active` takes their turn.
    pub(super) fn run_non_turn_actions(&mut self, active: PlayerId) -> Result<(), GameError> {
        for player in self.state.active_players() {
            if player == active || !self.state.is_active(player) {
                continue;
            }
            let actions = self.policy.non_turn_actions(&self.state, player);
            for action in actions {
                self.apply_non_turn_action(player, action)?;
            }
        }
        Ok(())
    }

    pub(super) fn apply_non_turn_action(
        &mut self,
        player: PlayerId,
        action: NonTurnAction,
    ) -> Result<(), GameError> {
        debug!(target: "monopoly.engine", %player, ?action, "non-turn action");
        match action {
            NonTurnAction::Build { street } => self.build(player, street),
            NonTurnAction::Trade { .. } => Err(GameError::NotImplemented(Unsupported::Trade)),
            NonTurnAction::Auction { .. } => Err(GameError::NotImplemented(Unsupported::Auction)),
        }
    }

    /// Buy one house on `street`, or the hotel after four houses.
    fn build(&mut self, player: PlayerId, street: PropertyId) -> Result<(), GameError> {
        let price = check_build(&self.state, player, street)?;

        self.notes.push(format_args!("bld.p{}.{}", player.0, street));
        Ledger::try_transfer(
            &mut self.state,
            &mut self.notes,
            Party::Bank,
            Party::Player(player),
            price,
            Some("h"),
        )?;

        let deed = self.state.deeds.get_mut(street);
        if deed.houses == 4 {
            deed.houses = 0;
            deed.hotel = true;
        } else {
            deed.houses += 1;
        }
        Ok(())
    }
}

/// Validate a build and return its price.
///
/// The owner must hold the whole unmortgaged band, build evenly across it
/// and be able to pay in cash.
fn check_build(state: &GameState, player: PlayerId, street: PropertyId) -> Result<i64, GameError> {
    let refuse = |why: &str| GameError::CannotBuild(format!("{}: {}", street, why));

    let color = street.color().ok_or_else(|| refuse("not a street"))?;
    if !state.deeds.holds_band(player, color) {
        return Err(refuse("band not complete"));
    }
    if color.streets().any(|s| state.deeds.get(s).mortgaged) {
        return Err(refuse("band has a mortgage"));
    }
    let deed = state.deeds.get(street);
    if deed.hotel {
        return Err(refuse("already has a hotel"));
    }
    let fewest = color
        .streets()
        .map(|s| state.deeds.get(s).building_units())
        .min()
        .unwrap_or(0);
    if deed.building_units() > fewest {
        return Err(refuse("uneven building"));
    }

    let price = tables::building_price_of(color);
    if state.player(player).money < price {
        return Err(refuse("not enough cash"));
    }
    Ok(price)
}
