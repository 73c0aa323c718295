//! Raising cash for a payer who is short.
//!
//! Liquidation only runs when the payer's total assets cover the debt;
//! otherwise nothing is sold and the transfer leaves them bankrupt.
//! Buildings go back to the bank first at half their price (highest band
//! first, a hotel breaking down into four houses), then properties are
//! mortgaged until the cash suffices.

use tracing::debug;

use super::Ledger;
use crate::board::{tables, PropertyId};
use crate::core::{GameError, GameState, Party, PlayerId};
use crate::history::NoteBuffer;

/// Cash plus everything `player` could raise by selling buildings and
/// mortgaging.
#[must_use]
pub fn total_assets(state: &GameState, player: PlayerId) -> i64 {
    let mut total = state.player(player).money;
    for (property, deed) in state.deeds.iter() {
        if deed.owner != Some(player) {
            continue;
        }
        if !deed.mortgaged {
            total += tables::mortgage_value_of(property);
        }
        if let Some(color) = property.color() {
            total += deed.building_units() * tables::building_price_of(color) / 2;
        }
    }
    total
}

/// Sell and mortgage until `player` holds `needed`, if their assets allow.
/// Returns the cash raised.
pub fn liquidate(
    state: &mut GameState,
    notes: &mut NoteBuffer,
    player: PlayerId,
    needed: i64,
) -> Result<i64, GameError> {
    let start = state.player(player).money;
    if start >= needed || total_assets(state, player) < needed {
        return Ok(0);
    }

    while state.player(player).money < needed {
        let Some(street) = improved_street(state, player) else {
            break;
        };
        sell_building(state, notes, player, street)?;
    }

    while state.player(player).money < needed {
        let Some(property) = mortgageable(state, player) else {
            break;
        };
        mortgage(state, notes, player, property)?;
    }

    let raised = state.player(player).money - start;
    debug!(target: "monopoly.ledger", %player, raised, "liquidated");
    Ok(raised)
}

fn improved_street(state: &GameState, player: PlayerId) -> Option<PropertyId> {
    state
        .deeds
        .iter()
        .filter(|(_, d)| d.owner == Some(player) && d.is_improved())
        .map(|(id, _)| id)
        .last()
}

fn mortgageable(state: &GameState, player: PlayerId) -> Option<PropertyId> {
    let band_is_bare = |property: PropertyId| {
        property.color().map_or(true, |color| {
            color
                .streets()
                .all(|street| !state.deeds.get(street).is_improved())
        })
    };
    state
        .deeds
        .owned_by(player)
        .into_iter()
        .filter(|&id| !state.deeds.get(id).mortgaged && band_is_bare(id))
        .last()
}

/// Sell one house, or break a hotel down to four houses.
fn sell_building(
    state: &mut GameState,
    notes: &mut NoteBuffer,
    player: PlayerId,
    street: PropertyId,
) -> Result<(), GameError> {
    let Some(color) = street.color() else {
        return Err(GameError::CannotBuild(street.label()));
    };
    let deed = state.deeds.get_mut(street);
    if deed.hotel {
        deed.hotel = false;
        deed.houses = 4;
    } else {
        deed.houses = deed.houses.saturating_sub(1);
    }
    notes.push(format_args!("sell.p{}.{}", player.0, street));
    Ledger::try_transfer(
        state,
        notes,
        Party::Player(player),
        Party::Bank,
        tables::building_price_of(color) / 2,
        Some("s"),
    )
}

fn mortgage(
    state: &mut GameState,
    notes: &mut NoteBuffer,
    player: PlayerId,
    property: PropertyId,
) -> Result<(), GameError> {
    state.deeds.get_mut(property).mortgaged = true;
    notes.push(format_args!("mtg.p{}.{}", player.0, property));
    Ledger::try_transfer(
        state,
        notes,
        Party::Player(player),
        Party::Bank,
        tables::mortgage_value_of(property),
        Some("m"),
    )
}
