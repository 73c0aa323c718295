//! # monopoly-sim
//!
//! A deterministic Monopoly engine that plays a complete game from a single
//! seed and records an event-by-event trace of the game state.
//!
//! ## Design Principles
//!
//! 1. **One Seed, One Run**: Deck shuffles and dice all come from a single
//!    ChaCha RNG, so a seed and player count reproduce a run exactly.
//!
//! 2. **Table-Driven Economics**: Costs, rents, mortgages and card effects
//!    are constant tables interpreted in one place each.
//!
//! 3. **Immutable Snapshots**: Every completed step stores a clone of the
//!    whole state in an append-only `im::Vector`; the trace is derived
//!    from those snapshots, never edited in place.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, dice, configuration, errors, game state
//! - `board`: Squares, property identities, ownership, price tables
//! - `cards`: Chance and Community Chest decks and their effects
//! - `ledger`: Money transfers, liquidation and bankruptcy
//! - `history`: Note buffer, snapshot history and trace export
//! - `engine`: The turn state machine and player policies
//!
//! ## Example
//!
//! ```
//! use monopoly_sim::{GameBuilder, GameError};
//!
//! let mut game = GameBuilder::new().player_count(3).seed(7).build()?;
//! let termination = game.run()?;
//! let trace = game.trace();
//! assert!(!trace.is_empty());
//! println!("{}: {} steps", termination, trace.len());
//! # Ok::<(), GameError>(())
//! ```

pub mod core;
pub mod board;
pub mod cards;
pub mod ledger;
pub mod history;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Party, PlayerId, PlayerMap,
    GameRng,
    DiceRoll, DiceSource, RandomDice, ScriptedDice,
    GameConfig, JailExit,
    GameError, Unsupported,
    GameState, PlayerState,
};

pub use crate::board::{ColorGroup, Deeds, Location, Position, PropertyId, PropertyState, Square};

pub use crate::cards::{CardEffect, CardId, Deck, DeckKind};

pub use crate::ledger::{Ledger, Settlement};

pub use crate::history::{History, NoteBuffer, Trace};

pub use crate::engine::{
    DefaultPolicy, Game, GameBuilder, NonTurnAction, PlayerPolicy, Termination,
};
