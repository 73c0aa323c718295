//! Dice rolls and the sources that produce them.
//!
//! The engine never calls the RNG for dice directly; it asks a `DiceSource`,
//! which receives the shared `GameRng`. `RandomDice` is the normal source.
//! `ScriptedDice` replays fixed rolls first, then falls back to the RNG,
//! which makes individual turns reproducible in tests and replays.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// The result of rolling two six-sided dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    pub first: u8,
    pub second: u8,
}

impl DiceRoll {
    #[must_use]
    pub const fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    #[must_use]
    pub const fn total(self) -> u8 {
        self.first + self.second
    }

    #[must_use]
    pub const fn is_double(self) -> bool {
        self.first == self.second
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.first, self.second)
    }
}

/// Source of dice rolls for the turn engine.
pub trait DiceSource {
    /// Produce the next roll.
    fn roll(&mut self, rng: &mut GameRng) -> DiceRoll;
}

/// Rolls two fair dice from the game RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomDice;

impl DiceSource for RandomDice {
    fn roll(&mut self, rng: &mut GameRng) -> DiceRoll {
        let first = rng.roll_die();
        let second = rng.roll_die();
        DiceRoll::new(first, second)
    }
}

/// Replays a fixed sequence of rolls, then rolls randomly.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    script: VecDeque<DiceRoll>,
}

impl ScriptedDice {
    /// Create a source that yields `rolls` in order before going random.
    pub fn new(rolls: impl IntoIterator<Item = (u8, u8)>) -> Self {
        Self {
            script: rolls
                .into_iter()
                .map(|(a, b)| DiceRoll::new(a, b))
                .collect(),
        }
    }

    /// Rolls still waiting to be replayed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, rng: &mut GameRng) -> DiceRoll {
        match self.script.pop_front() {
            Some(roll) => roll,
            None => RandomDice.roll(rng),
        }
    }
}
