//! Typed effect metadata.
//!
//! The catalog layer resolves every printed effect once into an
//! `EffectAction` (what happens when it triggers) or a `ContinuousRule`
//! (what holds while the card is face-up in play). Free text is kept for
//! display only; no engine decision reads it.

use serde::{Deserialize, Serialize};

use super::definition::Card;
use crate::triggers::{Condition, EffectTrigger};

/// A printed effect on a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEffect {
    pub trigger: EffectTrigger,
    /// Display text.
    pub text: String,
    pub action: EffectAction,
}

impl CardEffect {
    #[must_use]
    pub fn new(trigger: EffectTrigger, text: impl Into<String>, action: EffectAction) -> Self {
        Self {
            trigger,
            text: text.into(),
            action,
        }
    }

    /// Whether resolving this effect may ask a player to choose.
    #[must_use]
    pub fn requires_selection(&self) -> bool {
        self.action.requires_selection()
    }
}

/// Which missions an effect may reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Only the mission the source is on.
    ThisMission,
    /// Any active mission.
    AnyMission,
}

/// Filter over printed card data.
///
/// Empty fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterFilter {
    pub name: Option<String>,
    pub keyword: Option<String>,
    pub group: Option<String>,
}

impl CharacterFilter {
    /// Matches every character.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn group(group: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        self.name.as_deref().map_or(true, |n| card.same_name_as(n))
            && self.keyword.as_deref().map_or(true, |k| card.has_keyword(k))
            && self.group.as_deref().map_or(true, |g| card.in_group(g))
    }
}

/// One-shot effect behaviour, dispatched to a handler when its trigger fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectAction {
    /// Controller gains chakra.
    GainChakra(u32),
    /// Controller draws cards.
    Draw(u32),
    /// Put power tokens on the source character.
    PowerUpSelf(u32),
    /// Put power tokens on a chosen friendly visible character.
    PowerUpFriendly {
        amount: u32,
        scope: Scope,
        filter: CharacterFilter,
    },
    /// Defeat a visible enemy whose effective power is at most `max_power`.
    DefeatEnemy { max_power: u32, scope: Scope },
    /// Defeat a hidden enemy character.
    DefeatHiddenEnemy { scope: Scope },
    /// Turn a visible enemy with printed cost at most `max_cost` face-down.
    HideEnemy { max_cost: u32, scope: Scope },
    /// Move a friendly character, then choose its destination mission.
    MoveFriendly,
    /// Move an enemy with effective power at most `max_power`, then choose
    /// its destination mission.
    MoveEnemy { max_power: u32 },
    /// Optionally discard a card from hand; if you do, draw `draw` cards.
    DiscardToDraw { draw: u32 },
    /// The opponent chooses and discards a card from their hand.
    OpponentDiscards,
    /// Look at the top `look` cards of your deck, put one into your hand and
    /// the rest on the bottom.
    Scout { look: u32 },
    /// Optionally put a card from hand on top of your deck; if you do, gain
    /// `chakra`.
    Recall { chakra: u32 },
    /// Take control of a visible enemy in this mission with effective power
    /// at most `max_power`.
    StealEnemy { max_power: u32 },
    /// Take the Edge token.
    TakeEdge,
    /// Remove every power token from a chosen enemy character.
    StripTokens { scope: Scope },
    /// No triggered behaviour: the effect is a continuous rule.
    Continuous(ContinuousRule),
}

impl EffectAction {
    /// Whether resolving may suspend for a choice.
    #[must_use]
    pub fn requires_selection(&self) -> bool {
        !matches!(
            self,
            EffectAction::GainChakra(_)
                | EffectAction::Draw(_)
                | EffectAction::PowerUpSelf(_)
                | EffectAction::TakeEdge
                | EffectAction::Continuous(_)
        )
    }
}

/// A rule that holds while its card is face-up in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContinuousRule {
    /// Extra chakra income while `condition` holds.
    ChakraBonus { condition: Condition, amount: u32 },
    /// Extra chakra income per mission holding a friendly visible character
    /// matching `filter`.
    ChakraPerMission { filter: CharacterFilter, amount: u32 },
    /// Other friendly visible characters matching `filter` in this mission
    /// get `amount` power.
    PowerAura { filter: CharacterFilter, amount: i32 },
    /// This character gets `amount` power while `condition` holds.
    SelfPower { condition: Condition, amount: i32 },
    /// This character gets `amount` power per other friendly visible
    /// character in this mission.
    SelfPowerPerOtherFriendly { amount: i32 },
    /// This character keeps its power tokens through the end phase.
    RetainTokens,
    /// At the end of the round, return this character to its owner's hand
    /// while `condition` holds.
    ReturnToHandAtEnd { condition: Condition },
    /// Friendly characters matching `filter` played face-up on this mission
    /// cost `amount` less, never below `min`.
    CostAura {
        filter: CharacterFilter,
        amount: u32,
        min: u32,
    },
    /// This card's own cost changes by `amount` while `condition` holds,
    /// never below `min`.
    SelfCost {
        condition: Condition,
        amount: i32,
        min: u32,
    },
    /// If this character would be defeated, hide it instead.
    HideInsteadOfDefeat,
    /// If another friendly character matching `filter` in this mission would
    /// be defeated, defeat this character instead.
    SacrificeFor { filter: CharacterFilter },
    /// When this character is defeated, its controller gains chakra.
    ChakraOnDefeat(u32),
    /// May only be played face-up on a mission its player is winning.
    OnlyWhereWinning,
}
