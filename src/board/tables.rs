//! Published Monopoly economics. These values are game-design constants.

use super::property::{ColorGroup, PropertyId, PropertyKind};

/// Street purchase prices by band and index within band.
const STREET_COSTS: [[i64; 3]; 8] = [
    [60, 60, 0],
    [100, 100, 120],
    [140, 140, 160],
    [180, 180, 200],
    [220, 220, 240],
    [260, 260, 280],
    [300, 300, 320],
    [350, 400, 0],
];

/// Street rent by tier: base, full band, 1-4 houses, hotel.
const STREET_RENTS: [[[i64; 7]; 3]; 8] = [
    [
        [2, 4, 10, 30, 90, 160, 250],
        [4, 8, 20, 60, 180, 320, 450],
        [0; 7],
    ],
    [
        [6, 12, 30, 90, 270, 400, 550],
        [6, 12, 30, 90, 270, 400, 550],
        [8, 16, 40, 100, 300, 450, 600],
    ],
    [
        [10, 20, 50, 150, 450, 625, 750],
        [10, 20, 50, 150, 450, 625, 750],
        [12, 24, 60, 180, 500, 700, 900],
    ],
    [
        [14, 28, 70, 200, 550, 750, 950],
        [14, 28, 70, 200, 550, 750, 950],
        [16, 32, 80, 220, 600, 800, 1000],
    ],
    [
        [18, 36, 90, 250, 700, 875, 1050],
        [18, 36, 90, 250, 700, 875, 1050],
        [20, 40, 100, 300, 750, 925, 1100],
    ],
    [
        [22, 44, 110, 330, 800, 975, 1150],
        [22, 44, 110, 330, 800, 975, 1150],
        [24, 48, 120, 360, 850, 1025, 1200],
    ],
    [
        [26, 52, 130, 390, 900, 1100, 1275],
        [26, 52, 130, 390, 900, 1100, 1275],
        [28, 56, 150, 450, 1000, 1200, 1400],
    ],
    [
        [35, 70, 175, 500, 1100, 1300, 1500],
        [50, 100, 200, 600, 1400, 1700, 2000],
        [0; 7],
    ],
];

/// Railroad rent by number of railroads held by the same owner.
pub const RAILROAD_RENTS: [i64; 4] = [25, 50, 100, 200];

pub const RAILROAD_COST: i64 = 200;
pub const UTILITY_COST: i64 = 150;
pub const RAILROAD_MORTGAGE: i64 = 100;
pub const UTILITY_MORTGAGE: i64 = 75;

/// Dice multiplier for utility rent with one or both utilities held.
pub const UTILITY_MULTIPLIERS: [i64; 2] = [4, 10];

/// Purchase price of a property.
#[must_use]
pub fn cost_of(property: PropertyId) -> i64 {
    match property.kind() {
        PropertyKind::Street { color, index } => STREET_COSTS[color.band()][index as usize - 1],
        PropertyKind::Railroad(_) => RAILROAD_COST,
        PropertyKind::Utility(_) => UTILITY_COST,
    }
}

/// The seven-tier rent schedule of a street. `None` for railroads and
/// utilities, whose rent depends on holdings and dice.
#[must_use]
pub fn street_rents(property: PropertyId) -> Option<&'static [i64; 7]> {
    match property.kind() {
        PropertyKind::Street { color, index } => Some(&STREET_RENTS[color.band()][index as usize - 1]),
        _ => None,
    }
}

/// Cash the bank lends against a property.
#[must_use]
pub fn mortgage_value_of(property: PropertyId) -> i64 {
    match property.kind() {
        PropertyKind::Street { .. } => cost_of(property) / 2,
        PropertyKind::Railroad(_) => RAILROAD_MORTGAGE,
        PropertyKind::Utility(_) => UTILITY_MORTGAGE,
    }
}

/// Price of one house (or the hotel upgrade) in a color band.
#[must_use]
pub const fn building_price_of(color: ColorGroup) -> i64 {
    50 * (color.band() as i64 / 2 + 1)
}
