//! Game construction.

use tracing::info;

use super::game::Game;
use super::policy::{DefaultPolicy, PlayerPolicy};
use crate::cards::{Deck, DeckKind};
use crate::core::{DiceSource, GameConfig, GameError, GameRng, GameState, RandomDice};
use crate::history::{History, NoteBuffer};

/// Builder for creating a [`Game`].
///
/// Defaults to the reference run: [`GameConfig::default`], the
/// [`DefaultPolicy`] for that config, fair dice and both decks shuffled
/// from the seed (Chance first, then Community Chest).
#[derive(Default)]
pub struct GameBuilder {
    config: GameConfig,
    dice: Option<Box<dyn DiceSource>>,
    policy: Option<Box<dyn PlayerPolicy>>,
    chance_order: Option<Vec<u8>>,
    community_order: Option<Vec<u8>>,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        self.config.player_count = count;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Replace the dice, e.g. with [`ScriptedDice`](crate::core::ScriptedDice).
    #[must_use]
    pub fn dice(mut self, dice: impl DiceSource + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: impl PlayerPolicy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Fix the Chance deck order instead of shuffling it.
    #[must_use]
    pub fn chance_order(mut self, order: &[u8]) -> Self {
        self.chance_order = Some(order.to_vec());
        self
    }

    /// Fix the Community Chest deck order instead of shuffling it.
    #[must_use]
    pub fn community_order(mut self, order: &[u8]) -> Self {
        self.community_order = Some(order.to_vec());
        self
    }

    /// Validate the configuration and set up the initial state.
    pub fn build(self) -> Result<Game, GameError> {
        self.config.validate()?;

        let mut rng = GameRng::new(self.config.seed);
        let chance = deck(DeckKind::Chance, self.chance_order.as_deref(), &mut rng)?;
        let community = deck(DeckKind::CommunityChest, self.community_order.as_deref(), &mut rng)?;
        let state = GameState::new(&self.config, chance, community);

        let policy = match self.policy {
            Some(policy) => policy,
            None => Box::new(DefaultPolicy::from_config(&self.config)),
        };
        let dice = self.dice.unwrap_or_else(|| Box::new(RandomDice));

        info!(
            target: "monopoly.engine",
            players = self.config.player_count,
            seed = self.config.seed,
            bank = state.bank,
            "new game"
        );

        Ok(Game {
            config: self.config,
            rng,
            dice,
            policy,
            state,
            history: History::new(),
            notes: NoteBuffer::new(),
            termination: None,
        })
    }
}

fn deck(kind: DeckKind, order: Option<&[u8]>, rng: &mut GameRng) -> Result<Deck, GameError> {
    match order {
        Some(order) => Deck::from_order(kind, order),
        None => Ok(Deck::shuffled(kind, rng)),
    }
}
