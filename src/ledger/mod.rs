//! Money movement between the bank and players.
//!
//! Every transfer moves `amount` from exactly one party to exactly one other
//! and records `p(<tag>).p<from>>p<to>.$<amount>` in the step's notes, so
//! `bank + Σ players` never changes after setup.
//!
//! ## Insufficient funds
//!
//! A player who cannot cover a debit first liquidates (see
//! [`liquidation`]); the transfer then completes regardless and a negative
//! balance makes the payer bankrupt. The bank may overdraw; that is logged
//! but keeps conservation exact.

pub mod liquidation;

use tracing::{info, trace, warn};

use crate::core::{GameError, GameState, Party, PlayerId};
use crate::history::NoteBuffer;

/// How a transfer ended for the payer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    Paid,
    /// The payer could not cover the debit even after liquidation.
    Bankrupt(PlayerId),
}

impl Settlement {
    #[must_use]
    pub fn is_bankrupt(self) -> bool {
        matches!(self, Settlement::Bankrupt(_))
    }
}

/// Transfer operations over a game state and its note buffer.
pub struct Ledger;

impl Ledger {
    /// Reject malformed transfers before anything is mutated.
    fn validate(state: &GameState, to: Party, from: Party, amount: i64) -> Result<(), GameError> {
        if amount < 0 || to == from {
            return Err(GameError::InvalidTransfer { from, to, amount });
        }
        for party in [to, from] {
            if let Party::Player(p) = party {
                if !state.players.contains(p) {
                    return Err(GameError::UnknownPlayer(p));
                }
                if state.player(p).bankrupt {
                    return Err(GameError::BankruptPlayer(p));
                }
            }
        }
        Ok(())
    }

    fn apply(
        state: &mut GameState,
        notes: &mut NoteBuffer,
        to: Party,
        from: Party,
        amount: i64,
        tag: Option<&str>,
    ) {
        *state.money_mut(to) += amount;
        *state.money_mut(from) -= amount;

        match tag {
            Some(tag) => notes.push(format_args!("p({}).{}>{}.${}", tag, from, to, amount)),
            None => notes.push(format_args!("p.{}>{}.${}", from, to, amount)),
        }
        trace!(target: "monopoly.ledger", %from, %to, amount, tag = tag.unwrap_or(""), "transfer");
    }

    /// Transfer only if the payer can cover it.
    ///
    /// Fails with `InsufficientFunds` for a short player; the bank is never
    /// short.
    pub fn try_transfer(
        state: &mut GameState,
        notes: &mut NoteBuffer,
        to: Party,
        from: Party,
        amount: i64,
        tag: Option<&str>,
    ) -> Result<(), GameError> {
        Self::validate(state, to, from, amount)?;
        if let Party::Player(player) = from {
            let available = state.player(player).money;
            if available < amount {
                return Err(GameError::InsufficientFunds {
                    player,
                    needed: amount,
                    available,
                });
            }
        }
        Self::apply(state, notes, to, from, amount, tag);
        Ok(())
    }

    /// Transfer, liquidating and then bankrupting a short payer as needed.
    pub fn transfer(
        state: &mut GameState,
        notes: &mut NoteBuffer,
        to: Party,
        from: Party,
        amount: i64,
        tag: Option<&str>,
    ) -> Result<Settlement, GameError> {
        match Self::try_transfer(state, notes, to, from, amount, tag) {
            Ok(()) => {
                if from == Party::Bank && state.bank < 0 {
                    warn!(target: "monopoly.ledger", bank = state.bank, "bank overdrawn");
                }
                Ok(Settlement::Paid)
            }
            Err(GameError::InsufficientFunds { player, needed, available }) => {
                info!(
                    target: "monopoly.ledger",
                    %player, needed, available, "insufficient funds"
                );
                liquidation::liquidate(state, notes, player, needed)?;
                Self::apply(state, notes, to, from, amount, tag);
                Ok(Self::settle(state, notes, player))
            }
            Err(e) => Err(e),
        }
    }

    /// Bankruptcy check after a debit: strictly negative money only.
    fn settle(state: &mut GameState, notes: &mut NoteBuffer, player: PlayerId) -> Settlement {
        if state.player(player).money < 0 {
            Self::declare_bankruptcy(state, notes, player);
            Settlement::Bankrupt(player)
        } else {
            Settlement::Paid
        }
    }

    /// Remove `player` from the rotation, return their properties to the
    /// bank and any held jail-free cards to their decks.
    pub fn declare_bankruptcy(state: &mut GameState, notes: &mut NoteBuffer, player: PlayerId) {
        let released = state.deeds.release(player);
        for kind in crate::cards::DeckKind::ALL {
            let deck = state.deck_mut(kind);
            if deck.holder() == Some(player) {
                deck.return_held();
            }
        }
        let ps = state.player_mut(player);
        ps.bankrupt = true;
        ps.jail_turns = 0;

        notes.push(format_args!("bk.p{}", player.0));
        info!(
            target: "monopoly.ledger",
            %player,
            money = state.player(player).money,
            released = released.len(),
            "bankrupt"
        );
    }
}
