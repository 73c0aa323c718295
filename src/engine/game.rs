//! The game loop: turns, dice, jail and rotation.

use tracing::{debug, info};

use super::policy::PlayerPolicy;
use super::Termination;
use crate::board::{Location, Position};
use crate::core::{
    DiceRoll, DiceSource, GameConfig, GameError, GameRng, GameState, JailExit, Party, PlayerId,
    Unsupported,
};
use crate::history::{History, NoteBuffer, Trace};
use crate::ledger::{Ledger, Settlement};

/// Rolls allowed in one turn; a double on the last one means jail.
const MAX_ROLLS: u8 = 3;

/// How a jailed player's turn continues after the jail check.
enum JailOutcome {
    /// Still in jail; the turn is over.
    Stayed,
    /// Left jail by paying; roll normally.
    Paid,
    /// Left jail with this roll, which is also the turn's only move.
    Rolled(DiceRoll),
}

/// One simulation run.
///
/// Owns the configuration, the single RNG, the in-progress state and the
/// committed history. Build one with [`GameBuilder`](super::GameBuilder).
pub struct Game {
    pub(super) config: GameConfig,
    pub(super) rng: GameRng,
    pub(super) dice: Box<dyn DiceSource>,
    pub(super) policy: Box<dyn PlayerPolicy>,
    pub(super) state: GameState,
    pub(super) history: History,
    pub(super) notes: NoteBuffer,
    pub(super) termination: Option<Termination>,
}

impl Game {
    /// A game with the default policy and random dice.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        super::GameBuilder::new().config(config).build()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The in-progress state. Between turns this equals the last committed
    /// snapshot apart from the rotation to the next player.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Why the run halted, once it has.
    #[must_use]
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Export every committed step.
    #[must_use]
    pub fn trace(&self) -> Trace {
        Trace::from_history(&self.history, self.config.player_count, self.config.seed)
    }

    /// Play turns until a halting condition holds.
    ///
    /// Errors leave the history at the last completed step; callers that
    /// catch `NotImplemented` can still export [`trace`](Self::trace).
    pub fn run(&mut self) -> Result<Termination, GameError> {
        loop {
            if let Some(termination) = self.check_termination() {
                if self.termination.is_none() {
                    info!(
                        target: "monopoly.engine",
                        round = self.state.round,
                        steps = self.history.len(),
                        reason = %termination,
                        "game over"
                    );
                }
                self.termination = Some(termination);
                return Ok(termination);
            }
            self.play_turn()?;
        }
    }

    /// The halting condition that currently holds, if any.
    #[must_use]
    pub fn check_termination(&self) -> Option<Termination> {
        if let [survivor] = self.state.active_players().as_slice() {
            return Some(Termination::SingleSurvivor(*survivor));
        }
        if self.state.round > self.config.round_cap {
            return Some(Termination::RoundCap {
                rounds: self.config.round_cap,
            });
        }
        None
    }

    /// Play the active player's whole turn and rotate to the next player.
    pub fn play_turn(&mut self) -> Result<(), GameError> {
        let player = self.state.active_player;
        info!(
            target: "monopoly.engine",
            round = self.state.round,
            %player,
            money = self.state.player(player).money,
            "turn"
        );

        self.run_non_turn_actions(player)?;

        if self.state.location(player).is_jail() {
            match self.leave_jail(player)? {
                JailOutcome::Stayed => return self.end_turn(),
                JailOutcome::Paid if !self.state.is_active(player) => return self.end_turn(),
                JailOutcome::Paid => {}
                JailOutcome::Rolled(roll) => {
                    self.advance(player, i64::from(roll.total()))?;
                    self.resolve_landing(player)?;
                    return self.end_turn();
                }
            }
        }

        self.roll_and_move(player)?;
        self.end_turn()
    }

    /// Up to three rolls; doubles roll again, a third double goes to jail.
    fn roll_and_move(&mut self, player: PlayerId) -> Result<(), GameError> {
        for attempt in 1..=MAX_ROLLS {
            let roll = self.roll();
            if roll.is_double() && attempt == MAX_ROLLS {
                debug!(target: "monopoly.engine", %player, "third double");
                self.go_to_jail(player);
                return Ok(());
            }

            self.advance(player, i64::from(roll.total()))?;
            self.resolve_landing(player)?;

            let free = self.state.is_active(player) && !self.state.location(player).is_jail();
            if !roll.is_double() || !free {
                return Ok(());
            }
            self.history.commit(&self.state, &mut self.notes);
        }
        Ok(())
    }

    fn end_turn(&mut self) -> Result<(), GameError> {
        self.history.commit(&self.state, &mut self.notes);

        let current = self.state.active_player;
        if let Some((next, wrapped)) = self.state.next_active_after(current) {
            self.state.active_player = next;
            if wrapped {
                self.state.round += 1;
            }
        }
        Ok(())
    }

    pub(super) fn roll(&mut self) -> DiceRoll {
        let roll = self.dice.roll(&mut self.rng);
        self.state.dice_total = roll.total();
        debug!(target: "monopoly.engine", %roll, "roll");
        roll
    }

    /// Apply the jail-exit policy for a jailed player.
    fn leave_jail(&mut self, player: PlayerId) -> Result<JailOutcome, GameError> {
        let method = self.policy.jail_exit(&self.state, player);
        debug!(target: "monopoly.engine", %player, ?method, "jail check");

        match method {
            JailExit::Stay => {
                self.stay_in_jail(player);
                Ok(JailOutcome::Stayed)
            }
            JailExit::PayFine => {
                self.pay_jail_fine(player)?;
                Ok(JailOutcome::Paid)
            }
            JailExit::UseCard => Err(GameError::NotImplemented(Unsupported::CardJailExit)),
            JailExit::RollDoubles => {
                let roll = self.roll();
                if roll.is_double() {
                    self.release_from_jail(player);
                    return Ok(JailOutcome::Rolled(roll));
                }
                let ps = self.state.player_mut(player);
                ps.jail_turns = ps.jail_turns.saturating_add(1);
                if ps.jail_turns < self.config.max_jail_turns {
                    self.notes.push(format_args!("stay.p{}", player.0));
                    return Ok(JailOutcome::Stayed);
                }
                self.pay_jail_fine(player)?;
                if self.state.is_active(player) {
                    Ok(JailOutcome::Rolled(roll))
                } else {
                    Ok(JailOutcome::Stayed)
                }
            }
        }
    }

    fn stay_in_jail(&mut self, player: PlayerId) {
        let ps = self.state.player_mut(player);
        ps.jail_turns = ps.jail_turns.saturating_add(1);
        self.notes.push(format_args!("stay.p{}", player.0));
    }

    fn release_from_jail(&mut self, player: PlayerId) {
        let ps = self.state.player_mut(player);
        ps.location = Location::Square(Position::JAIL);
        ps.jail_turns = 0;
    }

    fn pay_jail_fine(&mut self, player: PlayerId) -> Result<Settlement, GameError> {
        self.release_from_jail(player);
        let fine = self.config.jail_fine;
        self.pay(Party::Bank, Party::Player(player), fine, Some("j"))
    }

    /// Send `player` straight to jail. No Go salary, and the turn ends.
    pub(super) fn go_to_jail(&mut self, player: PlayerId) {
        let ps = self.state.player_mut(player);
        ps.location = Location::Jail;
        ps.jail_turns = 0;
        self.notes.push(format_args!("gtj.p{}", player.0));
        info!(target: "monopoly.engine", %player, round = self.state.round, "jailed");
    }

    fn position_of(&self, player: PlayerId) -> Position {
        self.state.location(player).position().unwrap_or(Position::JAIL)
    }

    /// Move by `steps` (negative moves back). Forward moves past Go pay
    /// the salary.
    pub(super) fn advance(&mut self, player: PlayerId, steps: i64) -> Result<(), GameError> {
        let from = self.position_of(player);
        let (to, wrapped) = from.advance(steps);
        self.place(player, from, to, wrapped)
    }

    /// Move forward to `target`, paying Go salary when the move wraps.
    pub(super) fn move_to(&mut self, player: PlayerId, target: Position) -> Result<(), GameError> {
        let from = self.position_of(player);
        self.place(player, from, target, target < from)
    }

    fn place(&mut self, player: PlayerId, from: Position, to: Position, passed_go: bool) -> Result<(), GameError> {
        self.state.player_mut(player).location = Location::Square(to);
        debug!(target: "monopoly.engine", %player, from = from.index(), to = to.index(), passed_go, "move");
        if passed_go {
            let salary = self.config.go_salary;
            self.pay(Party::Player(player), Party::Bank, salary, Some("g"))?;
        }
        Ok(())
    }

    pub(super) fn pay(
        &mut self,
        to: Party,
        from: Party,
        amount: i64,
        tag: Option<&str>,
    ) -> Result<Settlement, GameError> {
        Ledger::transfer(&mut self.state, &mut self.notes, to, from, amount, tag)
    }
}
