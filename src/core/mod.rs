//! Core engine types: players, state, RNG, dice, configuration, errors.

pub mod player;
pub mod rng;
pub mod dice;
pub mod config;
pub mod error;
pub mod state;

pub use player::{Party, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use dice::{DiceRoll, DiceSource, RandomDice, ScriptedDice};
pub use config::{GameConfig, JailExit};
pub use error::{GameError, Unsupported};
pub use state::{GameState, PlayerState};
