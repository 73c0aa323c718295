//! Game configuration.
//!
//! `GameConfig` carries every economic constant and policy knob the turn
//! engine reads. Defaults reproduce the reference run: two players, seed 0,
//! a 30-round cap, a bank of 20580 and 1500 per player.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// How a jailed player tries to leave jail at the start of their turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JailExit {
    /// Stay in jail; the turn ends immediately.
    Stay,
    /// Pay the fine and take a normal turn.
    #[default]
    PayFine,
    /// Play a held "get out of jail free" card. Not implemented.
    UseCard,
    /// Roll once; a double frees the player.
    RollDoubles,
}

/// Complete configuration for one simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (2-8).
    pub player_count: usize,

    /// Seed for the single game RNG.
    pub seed: u64,

    /// The run halts once the round counter exceeds this value.
    pub round_cap: u32,

    /// Money in circulation at setup (bank plus all players).
    pub bank_total: i64,

    /// Money each player starts with.
    pub starting_money: i64,

    /// Salary for passing or landing on Go.
    pub go_salary: i64,

    /// Fine for leaving jail.
    pub jail_fine: i64,

    /// Tax on square 4.
    pub income_tax: i64,

    /// Tax on square 38.
    pub luxury_tax: i64,

    /// Failed double attempts before the fine is forced.
    pub max_jail_turns: u8,

    /// Jail exit strategy used by the default policy.
    pub jail_exit: JailExit,

    /// Whether the default policy buys buildings on complete color bands.
    pub auto_build: bool,

    /// Cash the default policy keeps in hand when buying buildings.
    pub build_reserve: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            seed: 0,
            round_cap: 30,
            bank_total: 20580,
            starting_money: 1500,
            go_salary: 200,
            jail_fine: 50,
            income_tax: 200,
            luxury_tax: 100,
            max_jail_turns: 3,
            jail_exit: JailExit::PayFine,
            auto_build: false,
            build_reserve: 200,
        }
    }
}

impl GameConfig {
    /// Create a config for `player_count` players with all other defaults.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_round_cap(mut self, rounds: u32) -> Self {
        self.round_cap = rounds;
        self
    }

    #[must_use]
    pub fn with_starting_money(mut self, money: i64) -> Self {
        self.starting_money = money;
        self
    }

    #[must_use]
    pub fn with_jail_exit(mut self, exit: JailExit) -> Self {
        self.jail_exit = exit;
        self
    }

    #[must_use]
    pub fn with_auto_build(mut self, enabled: bool) -> Self {
        self.auto_build = enabled;
        self
    }

    /// Money the bank holds after the initial allocation.
    #[must_use]
    pub fn initial_bank_money(&self) -> i64 {
        self.bank_total - self.starting_money * self.player_count as i64
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(2..=8).contains(&self.player_count) {
            return Err(GameError::InvalidConfig(format!(
                "player count must be 2-8, got {}",
                self.player_count
            )));
        }
        if self.starting_money < 0 {
            return Err(GameError::InvalidConfig("starting money is negative".into()));
        }
        if self.initial_bank_money() < 0 {
            return Err(GameError::InvalidConfig(format!(
                "bank total {} cannot fund {} players",
                self.bank_total, self.player_count
            )));
        }
        let fees = [
            self.go_salary,
            self.jail_fine,
            self.income_tax,
            self.luxury_tax,
            self.build_reserve,
        ];
        if fees.iter().any(|&fee| fee < 0) {
            return Err(GameError::InvalidConfig("fees must not be negative".into()));
        }
        if self.max_jail_turns == 0 {
            return Err(GameError::InvalidConfig("max jail turns must be at least 1".into()));
        }
        Ok(())
    }
}
