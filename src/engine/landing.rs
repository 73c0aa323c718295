//! Landing resolution and the card interpreter.

use tracing::debug;

use super::Game;
use crate::board::{self, tables, Location, PropertyId, Square, Tax};
use crate::cards::{CardEffect, DeckKind, Nearest};
use crate::core::{GameError, Party, PlayerId};

/// How rent is computed for a landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rent {
    /// The deed's own schedule, tagged `r`.
    Standard,
    /// Twice the railroad rent.
    DoubleRailroad,
    /// Ten times a fresh roll of the dice.
    TenTimesRoll,
}

impl From<Nearest> for Rent {
    fn from(nearest: Nearest) -> Self {
        match nearest {
            Nearest::Railroad => Rent::DoubleRailroad,
            Nearest::Utility => Rent::TenTimesRoll,
        }
    }
}

impl Game {
    /// Apply whatever the square under `player` does.
    pub(super) fn resolve_landing(&mut self, player: PlayerId) -> Result<(), GameError> {
        let Location::Square(position) = self.state.location(player) else {
            return Ok(());
        };

        match position.square() {
            Square::Go | Square::Jail | Square::FreeParking => {
                self.notes.push("pass");
                Ok(())
            }
            Square::GoToJail => {
                self.go_to_jail(player);
                Ok(())
            }
            Square::Tax(tax) => {
                let (amount, tag) = match tax {
                    Tax::Income => (self.config.income_tax, "it"),
                    Tax::Luxury => (self.config.luxury_tax, "lt"),
                };
                self.pay(Party::Bank, Party::Player(player), amount, Some(tag))?;
                Ok(())
            }
            Square::Chance => self.draw_card(player, DeckKind::Chance),
            Square::CommunityChest => self.draw_card(player, DeckKind::CommunityChest),
            Square::Property(property) => self.settle_property(player, property, Rent::Standard),
        }
    }

    /// Buy an unowned property or pay rent on someone else's.
    fn settle_property(&mut self, player: PlayerId, property: PropertyId, rent: Rent) -> Result<(), GameError> {
        let deed = *self.state.deeds.get(property);
        let owner = match deed.owner {
            None => return self.offer_purchase(player, property),
            Some(owner) if owner == player || deed.mortgaged => return Ok(()),
            Some(owner) => owner,
        };

        let (amount, tag) = match rent {
            Rent::Standard => (self.state.deeds.rent(property, self.state.dice_total), Some("r")),
            Rent::DoubleRailroad => (2 * self.state.deeds.rent(property, 0), None),
            Rent::TenTimesRoll => {
                let roll = self.dice.roll(&mut self.rng);
                (10 * i64::from(roll.total()), None)
            }
        };
        self.pay(Party::Player(owner), Party::Player(player), amount, tag)?;
        Ok(())
    }

    fn offer_purchase(&mut self, player: PlayerId, property: PropertyId) -> Result<(), GameError> {
        let cost = tables::cost_of(property);
        let position = property.position();
        let affordable = self.state.player(player).money >= cost;

        if affordable && self.policy.wants_to_buy(&self.state, player, property) {
            self.pay(Party::Bank, Party::Player(player), cost, None)?;
            self.state.deeds.get_mut(property).owner = Some(player);
            self.notes.push(format_args!("b.p{}.c{}({})", player.0, position, property));
        } else {
            self.notes.push(format_args!("nb.p{}.c{}({})", player.0, position, property));
        }
        Ok(())
    }

    /// Draw the top card of `kind`, apply it, then requeue or hold it.
    fn draw_card(&mut self, player: PlayerId, kind: DeckKind) -> Result<(), GameError> {
        self.notes.push_with(format_args!("{}.p{}", kind.note_prefix(), player.0), '.');
        let card = self.state.deck_mut(kind).draw()?;
        let effect = kind.effect(card)?;
        self.notes.push(effect.tag());
        debug!(target: "monopoly.cards", deck = %kind, card = card.0, %player, ?effect, "draw");

        let applied = self.apply_card(player, effect);

        if effect.is_held() && self.state.is_active(player) {
            self.state.deck_mut(kind).hold(card, player)?;
        } else {
            self.state.deck_mut(kind).requeue(card);
        }
        applied
    }

    fn apply_card(&mut self, player: PlayerId, effect: CardEffect) -> Result<(), GameError> {
        match effect {
            CardEffect::GetOutOfJailFree => {}
            CardEffect::AdvanceTo(target) => {
                self.move_to(player, target)?;
                self.resolve_landing(player)?;
            }
            CardEffect::AdvanceToNearest(nearest) => {
                let Location::Square(from) = self.state.location(player) else {
                    return Ok(());
                };
                let kind: fn(PropertyId) -> bool = match nearest {
                    Nearest::Railroad => PropertyId::is_railroad,
                    Nearest::Utility => PropertyId::is_utility,
                };
                let target = board::nearest(from, kind)
                    .ok_or(GameError::InvalidPosition(i64::from(from.index())))?;
                self.move_to(player, target)?;
                let property = board::property_at(target)?;
                self.settle_property(player, property, Rent::from(nearest))?;
            }
            CardEffect::Collect(amount) => {
                self.pay(Party::Player(player), Party::Bank, amount, None)?;
            }
            CardEffect::Pay(amount) => {
                self.pay(Party::Bank, Party::Player(player), amount, None)?;
            }
            CardEffect::MoveBack(steps) => {
                self.advance(player, -i64::from(steps))?;
                self.resolve_landing(player)?;
            }
            CardEffect::GoToJail => self.go_to_jail(player),
            CardEffect::StreetRepairs { per_house, per_hotel } => {
                let (houses, hotels) = self.state.deeds.buildings_of(player);
                let levy = houses * per_house + hotels * per_hotel;
                self.pay(Party::Bank, Party::Player(player), levy, None)?;
            }
            CardEffect::PayEachPlayer(amount) => {
                for other in self.state.active_players() {
                    if other == player {
                        continue;
                    }
                    let settlement = self.pay(Party::Player(other), Party::Player(player), amount, None)?;
                    if settlement.is_bankrupt() {
                        break;
                    }
                }
            }
            CardEffect::CollectFromEachPlayer(amount) => {
                for other in self.state.active_players() {
                    if other != player {
                        self.pay(Party::Player(player), Party::Player(other), amount, None)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Location, Position, PropertyId};
    use crate::cards::DeckKind;
    use crate::core::{GameConfig, PlayerId, ScriptedDice};
    use crate::engine::{Game, GameBuilder};

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    /// A game whose Chance deck starts with `top` and Community Chest with
    /// `cc_top`, the remaining cards following in numeric order.
    fn with_decks(top: u8, cc_top: u8, rolls: &[(u8, u8)], players: usize) -> Game {
        let order = |first: u8| -> Vec<u8> {
            std::iter::once(first)
                .chain((1..=16).filter(move |&c| c != first))
                .collect()
        };
        GameBuilder::new()
            .config(GameConfig::new(players))
            .chance_order(&order(top))
            .community_order(&order(cc_top))
            .dice(ScriptedDice::new(rolls.iter().copied()))
            .build()
            .unwrap()
    }

    fn last_note(game: &Game) -> &str {
        game.history().last().unwrap().1
    }

    #[test]
    fn test_chance_collect() {
        let mut game = with_decks(10, 2, &[(3, 4)], 2);
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "ch.p1.g50;p.p0>p1.$50;");
        assert_eq!(game.state().player(p(1)).money, 1550);
        assert_eq!(game.state().chance.len(), 16);
        assert_eq!(game.state().chance.cards().last().map(|c| c.0), Some(10));
    }

    #[test]
    fn test_chance_jail_free_is_held() {
        let mut game = with_decks(1, 2, &[(3, 4)], 2);
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "ch.p1.gjf;");
        assert_eq!(game.state().chance.holder(), Some(p(1)));
        assert_eq!(game.state().chance.len(), 15);
        assert_eq!(game.trace().value(0, "CH Jail Free Card Owner"), Some(1));
    }

    #[test]
    fn test_chance_advance_to_go_pays_salary() {
        let mut game = with_decks(3, 2, &[(3, 4)], 2);
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "ch.p1.mv0;p(g).p0>p1.$200;pass;");
        assert_eq!(game.state().location(p(1)), Location::Square(Position::GO));
        assert_eq!(game.state().player(p(1)).money, 1700);
    }

    #[test]
    fn test_chance_move_back_three() {
        // 7 - 3 = 4, Income Tax.
        let mut game = with_decks(12, 2, &[(3, 4)], 2);
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "ch.p1.bk3;p(it).p1>p0.$200;");
        assert_eq!(game.state().location(p(1)), Location::Square(Position::at(4)));
    }

    #[test]
    fn test_chance_go_to_jail_ends_turn() {
        let mut game = with_decks(13, 2, &[(3, 4)], 2);
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "ch.p1.gtj;gtj.p1;");
        assert_eq!(game.state().location(p(1)), Location::Jail);
    }

    #[test]
    fn test_nearest_railroad_double_rent() {
        let mut game = with_decks(7, 2, &[(3, 4)], 2);
        game.state.deeds.get_mut(PropertyId::railroad(2).unwrap()).owner = Some(p(2));
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "ch.p1.nrr;p.p1>p2.$50;");
        assert_eq!(game.state().location(p(1)), Location::Square(Position::at(15)));
    }

    #[test]
    fn test_nearest_utility_rolls_again() {
        let mut game = with_decks(9, 2, &[(3, 4), (2, 3)], 2);
        game.state.deeds.get_mut(PropertyId::utility(1).unwrap()).owner = Some(p(2));
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "ch.p1.nu;p.p1>p2.$50;");
        // The fresh roll does not replace the turn's dice total.
        assert_eq!(game.state().dice_total, 7);
    }

    #[test]
    fn test_nearest_unowned_is_bought() {
        let mut game = with_decks(8, 2, &[(3, 4)], 2);
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "ch.p1.nrr;p.p1>p0.$200;b.p1.c15(R2);");
        assert_eq!(game.state().deeds.owner(PropertyId::railroad(2).unwrap()), Some(p(1)));
    }

    #[test]
    fn test_pay_each_player() {
        let mut game = with_decks(16, 2, &[(3, 4)], 3);
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "ch.p1.pep;p.p1>p2.$50;p.p1>p3.$50;");
        assert_eq!(game.state().player(p(1)).money, 1400);
        assert_eq!(game.state().total_money(), 20580);
    }

    #[test]
    fn test_community_chest_collect_from_each() {
        // 1 + 1 lands on 2, then 2 + 3 on 7 draws from Chance.
        let mut game = with_decks(10, 15, &[(1, 1), (2, 3)], 3);
        game.play_turn().unwrap();

        let (_, first) = game.history().get(0).unwrap();
        assert_eq!(first, "cc.p1.cep;p.p2>p1.$10;p.p3>p1.$10;");
        assert_eq!(game.state().community_chest.len(), 16);
    }

    #[test]
    fn test_street_repairs_count_buildings() {
        let mut game = with_decks(14, 2, &[(3, 4)], 2);
        let l1: PropertyId = "l1".parse().unwrap();
        let l2: PropertyId = "l2".parse().unwrap();
        game.state.deeds.get_mut(l1).owner = Some(p(1));
        game.state.deeds.get_mut(l1).houses = 2;
        game.state.deeds.get_mut(l2).owner = Some(p(1));
        game.state.deeds.get_mut(l2).hotel = true;
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "ch.p1.rep;p.p1>p0.$150;");
    }

    #[test]
    fn test_rent_and_own_property() {
        let mut game = with_decks(10, 2, &[(1, 2), (1, 2)], 2);
        let b2: PropertyId = "b2".parse().unwrap();
        game.play_turn().unwrap();
        game.play_turn().unwrap();

        assert_eq!(game.state().deeds.owner(b2), Some(p(1)));
        assert_eq!(last_note(&game), "p(r).p2>p1.$4;");
    }

    #[test]
    fn test_mortgaged_property_charges_no_rent() {
        let mut game = with_decks(10, 2, &[(1, 2)], 2);
        let b2: PropertyId = "b2".parse().unwrap();
        game.state.deeds.get_mut(b2).owner = Some(p(2));
        game.state.deeds.get_mut(b2).mortgaged = true;
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "");
        assert_eq!(game.state().player(p(1)).money, 1500);
    }

    #[test]
    fn test_unaffordable_purchase_is_declined() {
        let mut game = with_decks(10, 2, &[(2, 3)], 2);
        game.state.player_mut(p(1)).money = 100;
        game.play_turn().unwrap();

        assert_eq!(last_note(&game), "nb.p1.c5(R1);");
        assert_eq!(game.state().deeds.owner(PropertyId::railroad(1).unwrap()), None);
    }

    #[test]
    fn test_deck_kind_used_for_square() {
        let mut game = with_decks(10, 3, &[(1, 1), (2, 3)], 2);
        game.play_turn().unwrap();

        let (_, first) = game.history().get(0).unwrap();
        assert_eq!(first, "cc.p1.g200;p.p0>p1.$200;");
        assert_eq!(game.state().deck(DeckKind::CommunityChest).len(), 16);
    }
}
