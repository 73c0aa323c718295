//! Ownable properties: identities and ownership status.
//!
//! ## PropertyId
//!
//! Identity = kind + color band + index within band (`b1`, `l3`, `R2`, `u1`).
//! Only the 28 real deeds can be named; malformed identities are rejected
//! with `UnknownProperty` at construction.
//!
//! ## PropertyState
//!
//! Owner, mortgage flag, houses (0-4) and hotel are separate fields. The
//! single numeric "level" used by traces (-1 mortgaged, 0/1 no buildings,
//! 2-5 one to four houses, 6 hotel) is reconstructed by
//! [`Deeds::legacy_level`] and never stored.
//!
//! ## Deeds
//!
//! All 28 property states, indexed by `PropertyId::ordinal`. Rent is
//! computed here because it depends on the owner's other holdings.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::square::Position;
use super::tables::{self, RAILROAD_RENTS, UTILITY_MULTIPLIERS};
use crate::core::{GameError, PlayerId};

/// The eight street color bands, in board order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
}

impl ColorGroup {
    pub const ALL: [ColorGroup; 8] = [
        ColorGroup::Brown,
        ColorGroup::LightBlue,
        ColorGroup::Pink,
        ColorGroup::Orange,
        ColorGroup::Red,
        ColorGroup::Yellow,
        ColorGroup::Green,
        ColorGroup::DarkBlue,
    ];

    /// Band index 0-7, which is also `position / 5` of its streets.
    #[must_use]
    pub const fn band(self) -> usize {
        self as usize
    }

    /// Number of streets in the band.
    #[must_use]
    pub const fn size(self) -> u8 {
        match self {
            ColorGroup::Brown | ColorGroup::DarkBlue => 2,
            _ => 3,
        }
    }

    /// Single-letter code used in property labels.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            ColorGroup::Brown => 'b',
            ColorGroup::LightBlue => 'l',
            ColorGroup::Pink => 'p',
            ColorGroup::Orange => 'o',
            ColorGroup::Red => 'r',
            ColorGroup::Yellow => 'y',
            ColorGroup::Green => 'g',
            ColorGroup::DarkBlue => 'd',
        }
    }

    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Streets of this band in board order.
    pub fn streets(self) -> impl Iterator<Item = PropertyId> {
        let first = BAND_OFFSETS[self.band()] as u8;
        (0..self.size()).map(move |i| PropertyId(first + i))
    }
}

/// Board squares of each street by band and index (0 = no such street).
const STREET_POSITIONS: [[u8; 3]; 8] = [
    [1, 3, 0],
    [6, 8, 9],
    [11, 13, 14],
    [16, 18, 19],
    [21, 23, 24],
    [26, 27, 29],
    [31, 32, 34],
    [37, 39, 0],
];

/// First ordinal of each band.
const BAND_OFFSETS: [usize; 8] = [0, 2, 5, 8, 11, 14, 17, 20];

pub const STREET_COUNT: usize = 22;
pub const RAILROAD_COUNT: u8 = 4;
pub const UTILITY_COUNT: u8 = 2;
pub const PROPERTY_COUNT: usize = STREET_COUNT + RAILROAD_COUNT as usize + UTILITY_COUNT as usize;

/// What an identity names, for matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Street { color: ColorGroup, index: u8 },
    Railroad(u8),
    Utility(u8),
}

/// Identity of an ownable property.
///
/// Always names one of the 28 deeds. Build one with [`PropertyId::street`],
/// [`PropertyId::railroad`], [`PropertyId::utility`], by parsing a label or
/// from [`PropertyId::all`]; branch on [`PropertyId::kind`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PropertyId(u8);

impl PropertyId {
    /// Street `index` (1-based) of `color`.
    pub fn street(color: ColorGroup, index: u8) -> Result<Self, GameError> {
        if !(1..=color.size()).contains(&index) {
            return Err(GameError::UnknownProperty(format!("{}{}", color.code(), index)));
        }
        Ok(Self((BAND_OFFSETS[color.band()] + index as usize - 1) as u8))
    }

    /// Railroad `n`, 1-4 in board order.
    pub fn railroad(n: u8) -> Result<Self, GameError> {
        if !(1..=RAILROAD_COUNT).contains(&n) {
            return Err(GameError::UnknownProperty(format!("R{}", n)));
        }
        Ok(Self(STREET_COUNT as u8 + n - 1))
    }

    /// Utility `n`, 1-2 in board order.
    pub fn utility(n: u8) -> Result<Self, GameError> {
        if !(1..=UTILITY_COUNT).contains(&n) {
            return Err(GameError::UnknownProperty(format!("u{}", n)));
        }
        Ok(Self(STREET_COUNT as u8 + RAILROAD_COUNT + n - 1))
    }

    pub fn from_ordinal(ordinal: usize) -> Result<Self, GameError> {
        if ordinal < PROPERTY_COUNT {
            Ok(Self(ordinal as u8))
        } else {
            Err(GameError::UnknownProperty(format!("#{}", ordinal)))
        }
    }

    /// Every property: streets in board order, then railroads, then utilities.
    pub fn all() -> impl Iterator<Item = PropertyId> {
        (0..PROPERTY_COUNT as u8).map(PropertyId)
    }

    /// The property on `position`, if the square is ownable.
    #[must_use]
    pub fn on_square(position: Position) -> Option<PropertyId> {
        Self::all().find(|id| id.position() == position)
    }

    /// Dense index 0..28 for storage.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub fn kind(self) -> PropertyKind {
        let ordinal = self.ordinal();
        let railroads_end = STREET_COUNT + RAILROAD_COUNT as usize;
        if ordinal >= railroads_end {
            return PropertyKind::Utility((ordinal - railroads_end + 1) as u8);
        }
        if ordinal >= STREET_COUNT {
            return PropertyKind::Railroad((ordinal - STREET_COUNT + 1) as u8);
        }
        let band = BAND_OFFSETS
            .iter()
            .rposition(|&offset| offset <= ordinal)
            .unwrap_or(0);
        PropertyKind::Street {
            color: ColorGroup::ALL[band],
            index: (ordinal - BAND_OFFSETS[band] + 1) as u8,
        }
    }

    #[must_use]
    pub const fn is_street(self) -> bool {
        self.ordinal() < STREET_COUNT
    }

    #[must_use]
    pub const fn is_railroad(self) -> bool {
        self.ordinal() >= STREET_COUNT && self.ordinal() < STREET_COUNT + RAILROAD_COUNT as usize
    }

    #[must_use]
    pub const fn is_utility(self) -> bool {
        self.ordinal() >= STREET_COUNT + RAILROAD_COUNT as usize
    }

    #[must_use]
    pub fn color(self) -> Option<ColorGroup> {
        match self.kind() {
            PropertyKind::Street { color, .. } => Some(color),
            _ => None,
        }
    }

    /// Square this property occupies.
    #[must_use]
    pub fn position(self) -> Position {
        let index = match self.kind() {
            PropertyKind::Street { color, index } => STREET_POSITIONS[color.band()][index as usize - 1],
            PropertyKind::Railroad(n) => 10 * (n - 1) + 5,
            PropertyKind::Utility(1) => 12,
            PropertyKind::Utility(_) => 28,
        };
        Position::at(index)
    }

    /// Short label such as `b1`, `R3`, `u2`.
    #[must_use]
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl TryFrom<u8> for PropertyId {
    type Error = GameError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(usize::from(ordinal))
    }
}

impl From<PropertyId> for u8 {
    fn from(id: PropertyId) -> Self {
        id.0
    }
}

/// Railroads print as `R1`..`R4` so they never read like red streets.
impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            PropertyKind::Street { color, index } => write!(f, "{}{}", color.code(), index),
            PropertyKind::Railroad(n) => write!(f, "R{}", n),
            PropertyKind::Utility(n) => write!(f, "u{}", n),
        }
    }
}

impl std::fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PropertyId({})", self)
    }
}

impl std::str::FromStr for PropertyId {
    type Err = GameError;

    /// Parse a label. Railroads are `R1`..`R4` (or `rr1`..`rr4`) to avoid
    /// clashing with red streets (`r1`..`r3`); utilities are `u1`, `u2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || GameError::UnknownProperty(s.to_string());
        let (kind, number) = if let Some(rest) = s.strip_prefix("rr").or_else(|| s.strip_prefix('R')) {
            ('R', rest)
        } else {
            let mut chars = s.chars();
            let kind = chars.next().ok_or_else(unknown)?;
            (kind, chars.as_str())
        };
        let number: u8 = number.parse().map_err(|_| unknown())?;

        match kind {
            'R' => PropertyId::railroad(number),
            'u' => PropertyId::utility(number),
            c => {
                let color = ColorGroup::from_code(c).ok_or_else(unknown)?;
                PropertyId::street(color, number)
            }
        }
        .map_err(|_| unknown())
    }
}

/// Ownership status of one property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyState {
    pub owner: Option<PlayerId>,
    pub mortgaged: bool,
    /// Houses, 0-4. Always 0 when `hotel` is set.
    pub houses: u8,
    pub hotel: bool,
}

impl PropertyState {
    #[must_use]
    pub const fn is_improved(&self) -> bool {
        self.houses > 0 || self.hotel
    }

    /// Buildings counted as house-equivalents (a hotel is five).
    #[must_use]
    pub const fn building_units(&self) -> i64 {
        if self.hotel {
            5
        } else {
            self.houses as i64
        }
    }
}

/// Status of all 28 properties.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deeds {
    states: Vec<PropertyState>,
}

impl Default for Deeds {
    fn default() -> Self {
        Self::new()
    }
}

impl Deeds {
    /// All properties unowned.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: vec![PropertyState::default(); PROPERTY_COUNT],
        }
    }

    #[must_use]
    pub fn get(&self, property: PropertyId) -> &PropertyState {
        &self.states[property.ordinal()]
    }

    pub fn get_mut(&mut self, property: PropertyId) -> &mut PropertyState {
        &mut self.states[property.ordinal()]
    }

    #[must_use]
    pub fn owner(&self, property: PropertyId) -> Option<PlayerId> {
        self.get(property).owner
    }

    /// Iterate over (PropertyId, &PropertyState) in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &PropertyState)> {
        PropertyId::all().zip(self.states.iter())
    }

    /// Properties held by `player`, in ordinal order.
    #[must_use]
    pub fn owned_by(&self, player: PlayerId) -> SmallVec<[PropertyId; 8]> {
        self.iter()
            .filter(|(_, s)| s.owner == Some(player))
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether `player` holds every street of `color`.
    #[must_use]
    pub fn holds_band(&self, player: PlayerId, color: ColorGroup) -> bool {
        color.streets().all(|id| self.owner(id) == Some(player))
    }

    /// Railroads held by `player`.
    #[must_use]
    pub fn railroads_held(&self, player: PlayerId) -> usize {
        PropertyId::all()
            .filter(|id| id.is_railroad() && self.owner(*id) == Some(player))
            .count()
    }

    /// Utilities held by `player`.
    #[must_use]
    pub fn utilities_held(&self, player: PlayerId) -> usize {
        PropertyId::all()
            .filter(|id| id.is_utility() && self.owner(*id) == Some(player))
            .count()
    }

    /// Column of the street rent schedule that applies, or `None` when no
    /// rent is due (unowned, mortgaged, not a street).
    #[must_use]
    pub fn rent_tier(&self, property: PropertyId) -> Option<usize> {
        let state = self.get(property);
        let owner = state.owner?;
        let color = property.color()?;
        if state.mortgaged {
            return None;
        }
        let tier = if state.hotel {
            6
        } else if state.houses > 0 {
            state.houses as usize + 1
        } else if self.holds_band(owner, color) {
            1
        } else {
            0
        };
        Some(tier)
    }

    /// Rent due on landing. `dice_total` is only read for utilities.
    #[must_use]
    pub fn rent(&self, property: PropertyId, dice_total: u8) -> i64 {
        let state = self.get(property);
        let Some(owner) = state.owner else {
            return 0;
        };
        if state.mortgaged {
            return 0;
        }
        match property.kind() {
            PropertyKind::Street { .. } => match (tables::street_rents(property), self.rent_tier(property)) {
                (Some(rents), Some(tier)) => rents[tier],
                _ => 0,
            },
            PropertyKind::Railroad(_) => RAILROAD_RENTS[self.railroads_held(owner) - 1],
            PropertyKind::Utility(_) => {
                UTILITY_MULTIPLIERS[self.utilities_held(owner) - 1] * i64::from(dice_total)
            }
        }
    }

    /// The trace's numeric level: -1 mortgaged, 0 otherwise for railroads,
    /// utilities and unowned streets, else the rent tier.
    #[must_use]
    pub fn legacy_level(&self, property: PropertyId) -> i64 {
        if self.get(property).mortgaged {
            return -1;
        }
        self.rent_tier(property).map_or(0, |tier| tier as i64)
    }

    /// Houses and hotels held by `player` across all streets.
    #[must_use]
    pub fn buildings_of(&self, player: PlayerId) -> (i64, i64) {
        self.iter()
            .filter(|(_, s)| s.owner == Some(player))
            .fold((0, 0), |(houses, hotels), (_, s)| {
                (houses + i64::from(s.houses), hotels + i64::from(s.hotel))
            })
    }

    /// Return everything `player` holds to the bank, clearing mortgages
    /// and buildings. Returns the released properties.
    pub fn release(&mut self, player: PlayerId) -> SmallVec<[PropertyId; 8]> {
        let owned = self.owned_by(player);
        for &id in &owned {
            *self.get_mut(id) = PropertyState::default();
        }
        owned
    }
}
