//! Built-in starter set.
//!
//! A small normalized catalog (characters 101-131, missions 201-206) and two
//! legal starter decks. Tests, benches and the expert AI's sampling pool use
//! it; real games supply their own catalog.

use std::sync::Arc;

use super::definition::{Card, CardId};
use super::effect::{CardEffect, CharacterFilter, ContinuousRule, EffectAction, Scope};
use super::registry::CardCatalog;
use crate::core::{DeckList, GameConfig};
use crate::triggers::{Condition, EffectTrigger};

const LEAF: &str = "Leaf Village";
const SAND: &str = "Sand Village";
const SOUND: &str = "Sound Village";
const MIST: &str = "Mist Village";

/// Character ids in the leaf starter deck (two copies each).
pub const LEAF_DECK: [u32; 15] = [
    101, 102, 103, 104, 105, 106, 107, 108, 109, 110, 111, 112, 113, 130, 131,
];

/// Mission pool of the leaf starter deck.
pub const LEAF_MISSIONS: [u32; 3] = [201, 202, 203];

/// Character ids in the rival starter deck (two copies each).
pub const RIVAL_DECK: [u32; 15] = [
    114, 115, 116, 117, 118, 119, 120, 121, 122, 123, 124, 126, 127, 128, 129,
];

/// Mission pool of the rival starter deck.
pub const RIVAL_MISSIONS: [u32; 3] = [204, 205, 206];

fn on(trigger: EffectTrigger, text: &str, action: EffectAction) -> CardEffect {
    CardEffect::new(trigger, text, action)
}

fn character(id: u32, name: &str, title: &str, chakra: u32, power: u32, group: &str) -> Card {
    Card::character(CardId::new(id), name, chakra, power)
        .with_title(title)
        .with_group(group)
}

/// The starter characters.
#[must_use]
pub fn characters() -> Vec<Card> {
    use EffectTrigger::{Ambush, Main, Score, Upgrade};

    vec![
        character(101, "Naruto Uzumaki", "Genin", 2, 2, LEAF)
            .with_keyword("Team 7")
            .with_effect(on(Ambush, "Put 2 power tokens on this character.", EffectAction::PowerUpSelf(2))),
        character(102, "Naruto Uzumaki", "Sage Mode", 5, 5, LEAF)
            .with_keyword("Team 7")
            .with_effect(on(
                Upgrade,
                "Defeat an enemy with 3 or less power in this mission.",
                EffectAction::DefeatEnemy { max_power: 3, scope: Scope::ThisMission },
            )),
        character(103, "Sakura Haruno", "Genin", 2, 1, LEAF)
            .with_keyword("Team 7")
            .with_effect(on(Main, "Draw a card.", EffectAction::Draw(1))),
        character(104, "Sasuke Uchiha", "Genin", 3, 3, LEAF)
            .with_keyword("Team 7")
            .with_effect(on(
                Ambush,
                "Defeat an enemy with 2 or less power in this mission.",
                EffectAction::DefeatEnemy { max_power: 2, scope: Scope::ThisMission },
            )),
        character(105, "Sasuke Uchiha", "Chidori", 5, 5, LEAF)
            .with_keyword("Team 7")
            .with_effect(on(
                Upgrade,
                "Defeat an enemy with 4 or less power.",
                EffectAction::DefeatEnemy { max_power: 4, scope: Scope::AnyMission },
            )),
        character(106, "Kakashi Hatake", "Copy Ninja", 4, 4, LEAF)
            .with_keyword("Jonin")
            .with_rule(
                "Other Team 7 characters in this mission have +1 power.",
                ContinuousRule::PowerAura { filter: CharacterFilter::keyword("Team 7"), amount: 1 },
            ),
        character(107, "Kiba Inuzuka", "Genin", 2, 2, LEAF)
            .with_keyword("Team 8")
            .with_rule(
                "+1 chakra if Akamaru is in this mission.",
                ContinuousRule::ChakraBonus { condition: Condition::companion("Akamaru"), amount: 1 },
            ),
        character(108, "Akamaru", "Ninja Dog", 1, 1, LEAF)
            .with_keyword("Team 8")
            .with_rule(
                "At the end of the round, return this to hand if Kiba Inuzuka is not in this mission.",
                ContinuousRule::ReturnToHandAtEnd {
                    condition: Condition::companion("Kiba Inuzuka").negate(),
                },
            ),
        character(109, "Hinata Hyuga", "Byakugan", 2, 2, LEAF)
            .with_keyword("Team 8")
            .with_effect(on(
                Main,
                "Look at the top 3 cards of your deck; put one in your hand.",
                EffectAction::Scout { look: 3 },
            )),
        character(110, "Shino Aburame", "Genin", 3, 2, LEAF)
            .with_keyword("Team 8")
            .with_rule(
                "+1 power if another Team 8 character is in this mission.",
                ContinuousRule::SelfPower { condition: Condition::keyword_ally("Team 8"), amount: 1 },
            )
            .with_effect(on(
                Main,
                "Remove all power tokens from an enemy in this mission.",
                EffectAction::StripTokens { scope: Scope::ThisMission },
            )),
        character(111, "Rock Lee", "Genin", 3, 3, LEAF)
            .with_keyword("Team Guy")
            .with_keyword("Taijutsu")
            .with_rule("Keeps its power tokens at the end of the round.", ContinuousRule::RetainTokens)
            .with_effect(on(Main, "Put 1 power token on this character.", EffectAction::PowerUpSelf(1))),
        character(112, "Neji Hyuga", "Genin", 3, 3, LEAF)
            .with_keyword("Team Guy")
            .with_effect(on(
                Ambush,
                "Defeat a hidden enemy in this mission.",
                EffectAction::DefeatHiddenEnemy { scope: Scope::ThisMission },
            )),
        character(113, "Might Guy", "Jonin", 5, 5, LEAF)
            .with_keyword("Team Guy")
            .with_keyword("Taijutsu")
            .with_rule(
                "Other Taijutsu characters in this mission have +1 power.",
                ContinuousRule::PowerAura { filter: CharacterFilter::keyword("Taijutsu"), amount: 1 },
            )
            .with_rule("Keeps its power tokens at the end of the round.", ContinuousRule::RetainTokens),
        character(114, "Shikamaru Nara", "Strategist", 3, 2, LEAF)
            .with_keyword("Team 10")
            .with_rule(
                "+2 power while you hold the Edge.",
                ContinuousRule::SelfPower { condition: Condition::HoldingEdge, amount: 2 },
            )
            .with_effect(on(
                Main,
                "Move an enemy with 3 or less power to another mission.",
                EffectAction::MoveEnemy { max_power: 3 },
            )),
        character(115, "Ino Yamanaka", "Mind Transfer", 2, 1, LEAF)
            .with_keyword("Team 10")
            .with_effect(on(
                Main,
                "Take control of an enemy with 2 or less power in this mission.",
                EffectAction::StealEnemy { max_power: 2 },
            )),
        character(116, "Choji Akimichi", "Genin", 3, 3, LEAF)
            .with_keyword("Team 10")
            .with_rule(
                "+2 power if Shikamaru Nara is in this mission.",
                ContinuousRule::SelfPower { condition: Condition::companion("Shikamaru Nara"), amount: 2 },
            ),
        character(117, "Gaara", "Jinchuriki", 4, 4, SAND)
            .with_keyword("Sand Siblings")
            .with_rule("If this would be defeated, hide it instead.", ContinuousRule::HideInsteadOfDefeat),
        character(118, "Kankuro", "Puppet Master", 3, 3, SAND)
            .with_keyword("Sand Siblings")
            .with_effect(on(Main, "Move one of your characters to another mission.", EffectAction::MoveFriendly)),
        character(119, "Temari", "Wind Fan", 3, 2, SAND)
            .with_keyword("Sand Siblings")
            .with_effect(on(
                Main,
                "Hide an enemy costing 3 or less in this mission.",
                EffectAction::HideEnemy { max_cost: 3, scope: Scope::ThisMission },
            )),
        character(120, "Orochimaru", "Sannin", 5, 6, SOUND)
            .with_keyword("Sannin")
            .with_rule(
                "-1 power for each other friendly character in this mission.",
                ContinuousRule::SelfPowerPerOtherFriendly { amount: -1 },
            )
            .with_effect(on(Main, "Your opponent discards a card.", EffectAction::OpponentDiscards)),
        character(121, "Kabuto Yakushi", "Spy", 3, 2, SOUND)
            .with_rule("When defeated, gain 2 chakra.", ContinuousRule::ChakraOnDefeat(2))
            .with_effect(on(
                Main,
                "You may discard a card. If you do, draw 2 cards.",
                EffectAction::DiscardToDraw { draw: 2 },
            )),
        character(122, "Jiraiya", "Sannin", 5, 4, LEAF)
            .with_keyword("Sannin")
            .with_rule(
                "Your Summon characters played here cost 1 less (minimum 1).",
                ContinuousRule::CostAura { filter: CharacterFilter::keyword("Summon"), amount: 1, min: 1 },
            )
            .with_effect(on(Main, "Draw a card.", EffectAction::Draw(1))),
        character(123, "Tsunade", "Sannin", 5, 4, LEAF)
            .with_keyword("Sannin")
            .with_effect(on(
                Main,
                "Put 2 power tokens on a friendly character.",
                EffectAction::PowerUpFriendly { amount: 2, scope: Scope::AnyMission, filter: CharacterFilter::any() },
            )),
        character(124, "Gamabunta", "Chief Toad", 6, 6, LEAF)
            .with_keyword("Summon")
            .with_rule(
                "Costs 2 less if Jiraiya is in this mission (minimum 1).",
                ContinuousRule::SelfCost { condition: Condition::companion("Jiraiya"), amount: -2, min: 1 },
            )
            .with_rule(
                "At the end of the round, return this to hand.",
                ContinuousRule::ReturnToHandAtEnd { condition: Condition::Always },
            ),
        character(125, "Iruka Umino", "Academy Instructor", 2, 1, LEAF)
            .with_keyword("Chunin")
            .with_rule(
                "+1 chakra for each mission with a friendly Team 7 character.",
                ContinuousRule::ChakraPerMission { filter: CharacterFilter::keyword("Team 7"), amount: 1 },
            ),
        character(126, "Zabuza Momochi", "Demon of the Mist", 4, 5, MIST)
            .with_keyword("Rogue")
            .with_effect(on(Ambush, "Take the Edge.", EffectAction::TakeEdge)),
        character(127, "Haku", "Ice Mirror", 2, 2, MIST)
            .with_keyword("Rogue")
            .with_rule(
                "If Zabuza Momochi in this mission would be defeated, defeat this instead.",
                ContinuousRule::SacrificeFor { filter: CharacterFilter::named("Zabuza Momochi") },
            ),
        character(128, "Kurenai Yuhi", "Genjutsu Master", 4, 3, LEAF)
            .with_keyword("Jonin")
            .with_rule(
                "Other Team 8 characters in this mission have +1 power.",
                ContinuousRule::PowerAura { filter: CharacterFilter::keyword("Team 8"), amount: 1 },
            )
            .with_effect(on(
                Main,
                "You may put a card from your hand on top of your deck. If you do, gain 2 chakra.",
                EffectAction::Recall { chakra: 2 },
            )),
        character(129, "Hiruzen Sarutobi", "Third Hokage", 5, 5, LEAF)
            .with_keyword("Hokage")
            .with_rule(
                "Can only be played on a mission you are winning.",
                ContinuousRule::OnlyWhereWinning,
            )
            .with_effect(on(Score, "Draw a card.", EffectAction::Draw(1))),
        character(130, "Sakura Haruno", "Medical Ninja", 4, 3, LEAF)
            .with_keyword("Team 7")
            .with_effect(on(
                Upgrade,
                "Put 2 power tokens on a friendly character in this mission.",
                EffectAction::PowerUpFriendly { amount: 2, scope: Scope::ThisMission, filter: CharacterFilter::any() },
            )),
        character(131, "Rock Lee", "Gate Opener", 5, 5, LEAF)
            .with_keyword("Team Guy")
            .with_keyword("Taijutsu")
            .with_rule("Keeps its power tokens at the end of the round.", ContinuousRule::RetainTokens)
            .with_effect(on(Upgrade, "Put 2 power tokens on this character.", EffectAction::PowerUpSelf(2))),
    ]
}

/// The starter missions.
#[must_use]
pub fn missions() -> Vec<Card> {
    use EffectTrigger::Score;

    vec![
        Card::mission(CardId::new(201), "Escort the Bridge Builder", 3)
            .with_effect(on(Score, "Draw a card.", EffectAction::Draw(1))),
        Card::mission(CardId::new(202), "Find the Lost Cat", 2)
            .with_effect(on(Score, "Take the Edge.", EffectAction::TakeEdge)),
        Card::mission(CardId::new(203), "Chunin Exam", 4),
        Card::mission(CardId::new(204), "Gather Intelligence", 2)
            .with_effect(on(
                Score,
                "Look at the top 2 cards of your deck; put one in your hand.",
                EffectAction::Scout { look: 2 },
            )),
        Card::mission(CardId::new(205), "Defend the Village", 3)
            .with_effect(on(
                Score,
                "Defeat a hidden enemy in this mission.",
                EffectAction::DefeatHiddenEnemy { scope: Scope::ThisMission },
            )),
        Card::mission(CardId::new(206), "Infiltrate the Hideout", 3)
            .with_effect(on(Score, "Your opponent discards a card.", EffectAction::OpponentDiscards)),
    ]
}

/// Catalog holding every starter card.
#[must_use]
pub fn catalog() -> CardCatalog {
    let mut catalog = CardCatalog::new();
    for card in characters().into_iter().chain(missions()) {
        catalog.insert(card);
    }
    catalog
}

/// Build a deck from catalog ids, two copies of each character.
///
/// Ids missing from the catalog are skipped.
#[must_use]
pub fn deck_from_ids(catalog: &CardCatalog, characters: &[u32], missions: &[u32]) -> DeckList {
    let lookup = |id: &u32| catalog.get(CardId::new(*id)).cloned();
    let characters: Vec<Arc<Card>> = characters
        .iter()
        .filter_map(lookup)
        .flat_map(|card| [card.clone(), card])
        .collect();
    let missions: Vec<Arc<Card>> = missions.iter().filter_map(lookup).collect();
    DeckList::new(characters, missions)
}

/// The leaf starter deck.
#[must_use]
pub fn leaf_deck(catalog: &CardCatalog) -> DeckList {
    deck_from_ids(catalog, &LEAF_DECK, &LEAF_MISSIONS)
}

/// The rival starter deck.
#[must_use]
pub fn rival_deck(catalog: &CardCatalog) -> DeckList {
    deck_from_ids(catalog, &RIVAL_DECK, &RIVAL_MISSIONS)
}

/// A game between the two starter decks.
#[must_use]
pub fn starter_config(seed: u64) -> GameConfig {
    let catalog = catalog();
    GameConfig::new(leaf_deck(&catalog), rival_deck(&catalog), seed)
}
