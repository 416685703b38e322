//! Card definitions - immutable catalog data.
//!
//! A `Card` is what the catalog layer hands the engine: identifier, printed
//! name and title, chakra cost, power, group, keywords and a typed effect
//! list. The engine never mutates a `Card`; instance state (tokens, hidden
//! flag, controller) lives on `CharacterInPlay`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::effect::{CardEffect, ContinuousRule, EffectAction};
use crate::triggers::EffectTrigger;

/// Stable catalog identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Identifier used for concealed placeholder cards.
    pub const CONCEALED: CardId = CardId(0);
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What kind of card this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Played onto missions.
    Character,
    /// Revealed from the mission deck at the start of each turn.
    Mission,
    /// Stand-in for card data the viewer may not see.
    Concealed,
}

/// Static card data.
///
/// ```
/// use mythos_engine::cards::{Card, CardId};
///
/// let kiba = Card::character(CardId::new(7), "Kiba Inuzuka", 2, 2)
///     .with_title("Genin")
///     .with_group("Leaf Village")
///     .with_keyword("Team 8");
///
/// assert!(kiba.same_name_as("KIBA INUZUKA"));
/// assert!(kiba.has_keyword("team 8"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub title: String,
    pub kind: CardKind,
    pub chakra: u32,
    pub power: u32,
    pub group: String,
    pub keywords: Vec<String>,
    pub effects: Vec<CardEffect>,
    /// Base point value, meaningful for missions only.
    pub base_points: u32,
}

impl Card {
    /// Create a character card with no title, group, keywords or effects.
    #[must_use]
    pub fn character(id: CardId, name: impl Into<String>, chakra: u32, power: u32) -> Self {
        Self {
            id,
            name: name.into(),
            title: String::new(),
            kind: CardKind::Character,
            chakra,
            power,
            group: String::new(),
            keywords: Vec::new(),
            effects: Vec::new(),
            base_points: 0,
        }
    }

    /// Create a mission card.
    #[must_use]
    pub fn mission(id: CardId, name: impl Into<String>, base_points: u32) -> Self {
        Self {
            kind: CardKind::Mission,
            base_points,
            ..Self::character(id, name, 0, 0)
        }
    }

    /// Placeholder for a card whose data the viewer may not see.
    #[must_use]
    pub fn concealed() -> Arc<Card> {
        Arc::new(Self {
            kind: CardKind::Concealed,
            ..Self::character(CardId::CONCEALED, "", 0, 0)
        })
    }

    /// Set the title (builder pattern).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the group (builder pattern).
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Add a keyword (builder pattern).
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add a continuous rule as a MAIN effect (builder pattern).
    #[must_use]
    pub fn with_rule(self, text: impl Into<String>, rule: ContinuousRule) -> Self {
        self.with_effect(CardEffect::new(
            EffectTrigger::Main,
            text,
            EffectAction::Continuous(rule),
        ))
    }

    /// Wrap in an `Arc` for sharing between states.
    #[must_use]
    pub fn shared(self) -> Arc<Card> {
        Arc::new(self)
    }

    #[must_use]
    pub fn is_character(&self) -> bool {
        self.kind == CardKind::Character
    }

    #[must_use]
    pub fn is_mission(&self) -> bool {
        self.kind == CardKind::Mission
    }

    #[must_use]
    pub fn is_concealed(&self) -> bool {
        self.kind == CardKind::Concealed
    }

    /// Case-insensitive printed-name comparison.
    #[must_use]
    pub fn same_name_as(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Case-insensitive keyword check.
    #[must_use]
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }

    /// Case-insensitive group check.
    #[must_use]
    pub fn in_group(&self, group: &str) -> bool {
        self.group.eq_ignore_ascii_case(group)
    }

    /// Effects with the given trigger, in printed order.
    pub fn effects_for(&self, trigger: EffectTrigger) -> impl Iterator<Item = &CardEffect> {
        self.effects.iter().filter(move |e| e.trigger == trigger)
    }

    /// Whether any effect fires on the given trigger.
    #[must_use]
    pub fn has_trigger(&self, trigger: EffectTrigger) -> bool {
        self.effects_for(trigger)
            .any(|e| !matches!(e.action, EffectAction::Continuous(_)))
    }

    /// Continuous rules printed on this card.
    pub fn continuous_rules(&self) -> impl Iterator<Item = &ContinuousRule> {
        self.effects.iter().filter_map(|e| match &e.action {
            EffectAction::Continuous(rule) => Some(rule),
            _ => None,
        })
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.title.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.title)
        }
    }
}
