//! The turn engine.
//!
//! A [`Game`] owns the single in-progress [`GameState`](crate::core::GameState)
//! and drives it through
//! `AwaitingTurn → JailCheck → {RollDice → Move → ResolveLanding}* → EndTurn`
//! until one player survives or the round cap is passed. Every completed
//! step is committed to the history, so a run that stops early (for
//! instance on a not-implemented action) still leaves a valid trace.
//!
//! ## Step boundaries
//!
//! - each intra-turn move that ends on a double with the player still free
//! - every turn end, including a turn spent staying in jail
//!
//! The state is never committed while a step is in progress.

mod actions;
mod builder;
mod game;
mod landing;
mod policy;

pub use builder::GameBuilder;
pub use game::Game;
pub use policy::{DefaultPolicy, NonTurnAction, PlayerPolicy};

use crate::core::PlayerId;

/// Why a run halted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Every other player went bankrupt.
    SingleSurvivor(PlayerId),
    /// The round counter passed the configured cap.
    RoundCap { rounds: u32 },
}

impl Termination {
    /// The surviving player, if the game was won outright.
    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            Termination::SingleSurvivor(p) => Some(p),
            Termination::RoundCap { .. } => None,
        }
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::SingleSurvivor(p) => write!(f, "{} is the last player standing", p),
            Termination::RoundCap { rounds } => write!(f, "round cap of {} reached", rounds),
        }
    }
}
