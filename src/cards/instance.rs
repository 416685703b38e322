//! Characters in play.
//!
//! A `CharacterInPlay` wraps an append-only stack of cards: the bottom is the
//! card originally played, the top is the active face after any upgrades.
//! The stack is non-empty by construction (`base` is always present), and
//! the whole stack travels together when the character leaves play.

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::definition::Card;
use crate::core::{InstanceId, PlayerId};

/// A character on a mission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInPlay {
    /// Unique id for this instance.
    pub id: InstanceId,

    /// Card originally played.
    base: Arc<Card>,

    /// Upgrade cards, oldest first.
    upgrades: Vector<Arc<Card>>,

    /// Face-down?
    pub hidden: bool,

    /// Accumulated power tokens.
    pub power_tokens: u32,

    /// Index of the mission this character occupies.
    pub mission: usize,

    /// Who currently commands this character.
    pub controller: PlayerId,

    /// Who reclaims the cards when it leaves play.
    pub owner: PlayerId,
}

impl CharacterInPlay {
    /// Create a character from a freshly played card.
    #[must_use]
    pub fn new(
        id: InstanceId,
        card: Arc<Card>,
        owner: PlayerId,
        mission: usize,
        hidden: bool,
    ) -> Self {
        Self {
            id,
            base: card,
            upgrades: Vector::new(),
            hidden,
            power_tokens: 0,
            mission,
            controller: owner,
            owner,
        }
    }

    /// The effective card (top of stack).
    #[must_use]
    pub fn card(&self) -> &Arc<Card> {
        self.upgrades.last().unwrap_or(&self.base)
    }

    /// Printed name of the effective card.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.card().name
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// Number of cards in the stack.
    #[must_use]
    pub fn stack_len(&self) -> usize {
        1 + self.upgrades.len()
    }

    /// Cards bottom to top.
    pub fn stack(&self) -> impl Iterator<Item = &Arc<Card>> {
        std::iter::once(&self.base).chain(self.upgrades.iter())
    }

    /// Push an upgrade onto the stack. Tokens and mission are preserved.
    pub fn push_upgrade(&mut self, card: Arc<Card>) {
        self.upgrades.push_back(card);
    }

    /// Consume the character, yielding its cards bottom to top.
    #[must_use]
    pub fn into_cards(self) -> Vec<Arc<Card>> {
        let mut cards = Vec::with_capacity(self.stack_len());
        cards.push(self.base);
        cards.extend(self.upgrades);
        cards
    }

    /// Replace every card in the stack with the concealed placeholder.
    pub fn conceal(&mut self) {
        let placeholder = Card::concealed();
        self.upgrades = self.upgrades.iter().map(|_| placeholder.clone()).collect();
        self.base = placeholder;
    }

    /// Replace the effective card with `card`, keeping stack depth.
    ///
    /// Used when reconstructing a plausible hidden card for simulation.
    pub fn replace_top(&mut self, card: Arc<Card>) {
        match self.upgrades.back_mut() {
            Some(top) => *top = card,
            None => self.base = card,
        }
    }
}
