//! Continuous effect calculator.
//!
//! Pure functions over the current board. Every rule comes from a face-up
//! card's `ContinuousRule` metadata; nothing here knows individual cards.
//! Results are recomputed on each call and never cached, since any
//! character entering or leaving a mission changes which rules apply.

use crate::cards::{Card, CharacterInPlay, ContinuousRule};
use crate::core::{GameState, InstanceId, PlayerId};
use crate::triggers::{ConditionContext, ConditionEvaluator};

/// Rules of face-up characters a player controls in one mission.
fn friendly_rules<'a>(
    state: &'a GameState,
    player: PlayerId,
    mission: usize,
) -> impl Iterator<Item = (&'a CharacterInPlay, &'a ContinuousRule)> + 'a {
    state
        .missions
        .get(mission)
        .into_iter()
        .flat_map(move |m| m.visible(player))
        .flat_map(|c| c.card().continuous_rules().map(move |r| (c, r)))
}

/// Rules printed on a character, if it is face-up.
fn own_rules(character: &CharacterInPlay) -> impl Iterator<Item = &ContinuousRule> {
    character
        .is_visible()
        .then(|| character.card().continuous_rules())
        .into_iter()
        .flatten()
}

/// Extra chakra income for `player` from continuous rules.
#[must_use]
pub fn chakra_bonus(state: &GameState, player: PlayerId) -> u32 {
    let mut bonus = 0;
    for character in state.characters().filter(|c| c.controller == player) {
        for rule in own_rules(character) {
            match rule {
                ContinuousRule::ChakraBonus { condition, amount } => {
                    let ctx = ConditionContext::for_character(state, character);
                    if ConditionEvaluator::evaluate(condition, &ctx) {
                        bonus += amount;
                    }
                }
                ContinuousRule::ChakraPerMission { filter, amount } => {
                    let missions = state
                        .missions
                        .iter()
                        .filter(|m| m.visible(player).any(|c| filter.matches(c.card())))
                        .count() as u32;
                    bonus += amount * missions;
                }
                _ => {}
            }
        }
    }
    bonus
}

/// Effective power of a character: printed power, tokens and modifiers.
///
/// Hidden characters have 0 power. The result never goes below 0.
#[must_use]
pub fn effective_power(state: &GameState, character: &CharacterInPlay) -> u32 {
    if character.hidden || character.card().is_concealed() {
        return 0;
    }

    let mut power = i64::from(character.card().power) + i64::from(character.power_tokens);
    let ctx = ConditionContext::for_character(state, character);

    for rule in own_rules(character) {
        match rule {
            ContinuousRule::SelfPower { condition, amount } => {
                if ConditionEvaluator::evaluate(condition, &ctx) {
                    power += i64::from(*amount);
                }
            }
            ContinuousRule::SelfPowerPerOtherFriendly { amount } => {
                let others = friendly_visible_others(state, character);
                power += i64::from(*amount) * others as i64;
            }
            _ => {}
        }
    }

    for (source, rule) in friendly_rules(state, character.controller, character.mission) {
        if source.id == character.id {
            continue;
        }
        if let ContinuousRule::PowerAura { filter, amount } = rule {
            if filter.matches(character.card()) {
                power += i64::from(*amount);
            }
        }
    }

    power.max(0) as u32
}

fn friendly_visible_others(state: &GameState, character: &CharacterInPlay) -> usize {
    state
        .missions
        .get(character.mission)
        .map_or(0, |m| {
            m.visible(character.controller)
                .filter(|c| c.id != character.id)
                .count()
        })
}

/// Total effective power a player has on a mission. Hidden characters add 0.
#[must_use]
pub fn mission_power(state: &GameState, mission: usize, player: PlayerId) -> u32 {
    state.missions.get(mission).map_or(0, |m| {
        m.visible(player)
            .map(|c| effective_power(state, c))
            .sum()
    })
}

/// Who would win a mission if it were scored now.
///
/// Strictly greater power wins; a tie goes to the Edge holder only if its
/// total is greater than 0.
#[must_use]
pub fn mission_leader(state: &GameState, mission: usize) -> Option<PlayerId> {
    let one = mission_power(state, mission, PlayerId::ONE);
    let two = mission_power(state, mission, PlayerId::TWO);
    match one.cmp(&two) {
        std::cmp::Ordering::Greater => Some(PlayerId::ONE),
        std::cmp::Ordering::Less => Some(PlayerId::TWO),
        std::cmp::Ordering::Equal if one > 0 => Some(state.edge_holder),
        std::cmp::Ordering::Equal => None,
    }
}

/// Whether a character keeps its power tokens through the end phase.
#[must_use]
pub fn retains_tokens(character: &CharacterInPlay) -> bool {
    own_rules(character).any(|r| matches!(r, ContinuousRule::RetainTokens))
}

/// Whether a character goes back to its owner's hand at end of round.
#[must_use]
pub fn returns_at_end(state: &GameState, character: &CharacterInPlay) -> bool {
    let ctx = ConditionContext::for_character(state, character);
    own_rules(character).any(|r| match r {
        ContinuousRule::ReturnToHandAtEnd { condition } => {
            ConditionEvaluator::evaluate(condition, &ctx)
        }
        _ => false,
    })
}

/// Chakra cost for `player` to put `card` face-up on `mission`.
///
/// Applies the card's own conditional cost change and discounts from
/// friendly face-up characters in that mission. Each discount carries its
/// own floor; a discount never raises the printed cost.
#[must_use]
pub fn play_cost(state: &GameState, player: PlayerId, card: &Card, mission: usize) -> u32 {
    let printed = i64::from(card.chakra);
    let mut cost = printed;
    let mut floor: Option<i64> = None;

    let ctx = ConditionContext::for_play(state, player, mission);
    for rule in card.continuous_rules() {
        if let ContinuousRule::SelfCost { condition, amount, min } = rule {
            if ConditionEvaluator::evaluate(condition, &ctx) {
                cost += i64::from(*amount);
                floor = Some(floor.map_or(i64::from(*min), |f| f.max(i64::from(*min))));
            }
        }
    }

    for (_, rule) in friendly_rules(state, player, mission) {
        if let ContinuousRule::CostAura { filter, amount, min } = rule {
            if filter.matches(card) {
                cost -= i64::from(*amount);
                floor = Some(floor.map_or(i64::from(*min), |f| f.max(i64::from(*min))));
            }
        }
    }

    let floor = floor.map_or(0, |f| f.min(printed));
    cost.max(floor).max(0) as u32
}

/// Chakra cost to reveal a hidden character: its printed cost with
/// modifiers, as if played face-up where it stands.
#[must_use]
pub fn reveal_cost(state: &GameState, character: &CharacterInPlay) -> u32 {
    play_cost(state, character.controller, character.card(), character.mission)
}

/// Whether a printed restriction forbids playing `card` face-up on
/// `mission`.
#[must_use]
pub fn play_restricted(state: &GameState, player: PlayerId, card: &Card, mission: usize) -> bool {
    card.continuous_rules()
        .any(|r| matches!(r, ContinuousRule::OnlyWhereWinning))
        && mission_leader(state, mission) != Some(player)
}

/// Whether a defeat of this character turns into hiding it.
#[must_use]
pub fn hides_instead_of_defeat(character: &CharacterInPlay) -> bool {
    own_rules(character).any(|r| matches!(r, ContinuousRule::HideInsteadOfDefeat))
}

/// A distinct face-up ally in the same mission that is defeated in place of
/// this character, if any.
#[must_use]
pub fn sacrifice_for(state: &GameState, character: &CharacterInPlay) -> Option<InstanceId> {
    if character.hidden {
        return None;
    }
    friendly_rules(state, character.controller, character.mission)
        .find(|(ally, rule)| {
            ally.id != character.id
                && matches!(rule, ContinuousRule::SacrificeFor { filter } if filter.matches(character.card()))
        })
        .map(|(ally, _)| ally.id)
}

/// Chakra a character's controller gains when it is defeated.
#[must_use]
pub fn chakra_on_defeat(character: &CharacterInPlay) -> u32 {
    own_rules(character)
        .map(|r| match r {
            ContinuousRule::ChakraOnDefeat(amount) => *amount,
            _ => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CharacterFilter};
    use crate::core::{ActiveMission, MissionRank, RulesConfig};
    use crate::triggers::Condition;

    fn board() -> GameState {
        let mut state = GameState::new(RulesConfig::default(), 5);
        for id in [200, 201] {
            let card = Card::mission(CardId::new(id), "Mission", 2).shared();
            state.missions.push_back(ActiveMission::new(card, MissionRank::D, 1));
        }
        state
    }

    fn place(state: &mut GameState, card: Card, player: PlayerId, mission: usize, hidden: bool) -> InstanceId {
        let id = state.alloc_instance();
        state.place_character(CharacterInPlay::new(id, card.shared(), player, mission, hidden));
        id
    }

    fn power_of(state: &GameState, id: InstanceId) -> u32 {
        state.character(id).map_or(0, |c| effective_power(state, c))
    }

    #[test]
    fn test_chakra_bonus_companion() {
        let mut state = board();
        let kiba = Card::character(CardId::new(1), "Kiba Inuzuka", 2, 2).with_rule(
            "",
            ContinuousRule::ChakraBonus { condition: Condition::companion("Akamaru"), amount: 1 },
        );
        place(&mut state, kiba, PlayerId::ONE, 0, false);
        assert_eq!(chakra_bonus(&state, PlayerId::ONE), 0);

        place(&mut state, Card::character(CardId::new(2), "Akamaru", 1, 1), PlayerId::ONE, 0, false);
        assert_eq!(chakra_bonus(&state, PlayerId::ONE), 1);
        assert_eq!(chakra_bonus(&state, PlayerId::TWO), 0);
    }

    #[test]
    fn test_chakra_per_mission() {
        let mut state = board();
        let iruka = Card::character(CardId::new(1), "Iruka Umino", 2, 1).with_rule(
            "",
            ContinuousRule::ChakraPerMission { filter: CharacterFilter::keyword("Team 7"), amount: 1 },
        );
        place(&mut state, iruka, PlayerId::ONE, 0, false);
        for mission in [0, 1] {
            let naruto = Card::character(CardId::new(2), "Naruto Uzumaki", 2, 2).with_keyword("Team 7");
            place(&mut state, naruto, PlayerId::ONE, mission, false);
        }
        assert_eq!(chakra_bonus(&state, PlayerId::ONE), 2);
    }

    #[test]
    fn test_hidden_power_is_zero_and_tokens_count() {
        let mut state = board();
        let id = place(&mut state, Card::character(CardId::new(1), "Gaara", 4, 4), PlayerId::ONE, 0, true);
        state.update_character(id, |c| c.power_tokens = 2);
        assert_eq!(power_of(&state, id), 0);

        state.update_character(id, |c| c.hidden = false);
        assert_eq!(power_of(&state, id), 6);
    }

    #[test]
    fn test_aura_applies_to_others_only() {
        let mut state = board();
        let kakashi = Card::character(CardId::new(1), "Kakashi Hatake", 4, 4)
            .with_keyword("Team 7")
            .with_rule("", ContinuousRule::PowerAura { filter: CharacterFilter::keyword("Team 7"), amount: 1 });
        let k = place(&mut state, kakashi, PlayerId::ONE, 0, false);
        let naruto = Card::character(CardId::new(2), "Naruto Uzumaki", 2, 2).with_keyword("Team 7");
        let n = place(&mut state, naruto.clone(), PlayerId::ONE, 0, false);
        let far = place(&mut state, naruto, PlayerId::ONE, 1, false);

        assert_eq!(power_of(&state, k), 4);
        assert_eq!(power_of(&state, n), 3);
        assert_eq!(power_of(&state, far), 2);
    }

    #[test]
    fn test_self_power_per_other_floors_at_zero() {
        let mut state = board();
        let oro = Card::character(CardId::new(1), "Orochimaru", 5, 1)
            .with_rule("", ContinuousRule::SelfPowerPerOtherFriendly { amount: -1 });
        let o = place(&mut state, oro, PlayerId::ONE, 0, false);
        for i in 0..3 {
            place(&mut state, Card::character(CardId::new(10 + i), "Ally", 1, 1), PlayerId::ONE, 0, false);
        }
        place(&mut state, Card::character(CardId::new(20), "Hidden", 1, 1), PlayerId::ONE, 0, true);
        assert_eq!(power_of(&state, o), 0);
    }

    #[test]
    fn test_self_power_with_edge() {
        let mut state = board();
        let shika = Card::character(CardId::new(1), "Shikamaru Nara", 3, 2)
            .with_rule("", ContinuousRule::SelfPower { condition: Condition::HoldingEdge, amount: 2 });
        let s = place(&mut state, shika, PlayerId::TWO, 0, false);
        state.edge_holder = PlayerId::ONE;
        assert_eq!(power_of(&state, s), 2);
        state.edge_holder = PlayerId::TWO;
        assert_eq!(power_of(&state, s), 4);
    }

    #[test]
    fn test_mission_leader_tie_rules() {
        let mut state = board();
        state.edge_holder = PlayerId::TWO;
        assert_eq!(mission_leader(&state, 0), None);

        place(&mut state, Card::character(CardId::new(1), "A", 3, 3), PlayerId::ONE, 0, false);
        place(&mut state, Card::character(CardId::new(2), "B", 3, 3), PlayerId::TWO, 0, false);
        assert_eq!(mission_leader(&state, 0), Some(PlayerId::TWO));

        place(&mut state, Card::character(CardId::new(3), "C", 1, 1), PlayerId::ONE, 0, false);
        assert_eq!(mission_leader(&state, 0), Some(PlayerId::ONE));
    }

    #[test]
    fn test_cost_modifiers() {
        let mut state = board();
        let toad = Card::character(CardId::new(1), "Gamabunta", 6, 6)
            .with_keyword("Summon")
            .with_rule("", ContinuousRule::SelfCost { condition: Condition::companion("Jiraiya"), amount: -2, min: 1 });
        assert_eq!(play_cost(&state, PlayerId::ONE, &toad, 0), 6);

        let jiraiya = Card::character(CardId::new(2), "Jiraiya", 5, 4).with_rule(
            "",
            ContinuousRule::CostAura { filter: CharacterFilter::keyword("Summon"), amount: 1, min: 1 },
        );
        place(&mut state, jiraiya, PlayerId::ONE, 0, false);
        assert_eq!(play_cost(&state, PlayerId::ONE, &toad, 0), 3);
        assert_eq!(play_cost(&state, PlayerId::ONE, &toad, 1), 6);
        assert_eq!(play_cost(&state, PlayerId::TWO, &toad, 0), 6);

        let cheap = Card::character(CardId::new(3), "Frog", 1, 1).with_keyword("Summon");
        assert_eq!(play_cost(&state, PlayerId::ONE, &cheap, 0), 1);
    }

    #[test]
    fn test_retain_and_return_rules_need_visibility() {
        let mut state = board();
        let lee = Card::character(CardId::new(1), "Rock Lee", 3, 3).with_rule("", ContinuousRule::RetainTokens);
        let id = place(&mut state, lee, PlayerId::ONE, 0, true);
        let ch = state.character(id).cloned().unwrap();
        assert!(!retains_tokens(&ch));

        state.update_character(id, |c| c.hidden = false);
        let ch = state.character(id).cloned().unwrap();
        assert!(retains_tokens(&ch));

        let toad = Card::character(CardId::new(2), "Gamabunta", 6, 6)
            .with_rule("", ContinuousRule::ReturnToHandAtEnd { condition: Condition::Always });
        let t = place(&mut state, toad, PlayerId::ONE, 0, false);
        let ch = state.character(t).cloned().unwrap();
        assert!(returns_at_end(&state, &ch));
    }

    #[test]
    fn test_only_where_winning() {
        let mut state = board();
        let hokage = Card::character(CardId::new(1), "Hiruzen Sarutobi", 5, 5)
            .with_rule("", ContinuousRule::OnlyWhereWinning);
        assert!(play_restricted(&state, PlayerId::ONE, &hokage, 0));

        place(&mut state, Card::character(CardId::new(2), "A", 1, 1), PlayerId::ONE, 0, false);
        assert!(!play_restricted(&state, PlayerId::ONE, &hokage, 0));
        assert!(play_restricted(&state, PlayerId::TWO, &hokage, 0));
    }

    #[test]
    fn test_defeat_replacements() {
        let mut state = board();
        let zabuza = place(&mut state, Card::character(CardId::new(1), "Zabuza Momochi", 4, 5), PlayerId::TWO, 0, false);
        let haku_card = Card::character(CardId::new(2), "Haku", 2, 2)
            .with_rule("", ContinuousRule::SacrificeFor { filter: CharacterFilter::named("Zabuza Momochi") })
            .with_rule("", ContinuousRule::ChakraOnDefeat(1));
        let haku = place(&mut state, haku_card, PlayerId::TWO, 0, false);

        let z = state.character(zabuza).cloned().unwrap();
        assert_eq!(sacrifice_for(&state, &z), Some(haku));

        let h = state.character(haku).cloned().unwrap();
        assert_eq!(sacrifice_for(&state, &h), None);
        assert_eq!(chakra_on_defeat(&h), 1);
        assert!(!hides_instead_of_defeat(&h));
    }
}
