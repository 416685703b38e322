//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores the normalized cards a game may use. It provides
//! lookup by `CardId`, name queries for upgrade chains, and the pool the
//! expert AI samples concealed cards from.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId};

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use mythos_engine::cards::{Card, CardCatalog, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.insert(Card::character(CardId::new(1), "Rock Lee", 3, 3));
///
/// let found = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Rock Lee");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Arc<Card>>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from cards.
    pub fn from_cards(cards: impl IntoIterator<Item = Arc<Card>>) -> Self {
        Self {
            cards: cards.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Add a card, returning the shared handle stored.
    ///
    /// A card with the same id replaces the earlier entry.
    pub fn insert(&mut self, card: Card) -> Arc<Card> {
        let shared = card.shared();
        self.cards.insert(shared.id, shared.clone());
        shared
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Arc<Card>> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Card>> {
        let mut cards: Vec<&Arc<Card>> = self.cards.values().collect();
        cards.sort_by_key(|c| c.id);
        cards.into_iter()
    }

    /// Character cards in id order.
    pub fn characters(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.iter().filter(|c| c.is_character())
    }

    /// Mission cards in id order.
    pub fn missions(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.iter().filter(|c| c.is_mission())
    }

    /// Every version of a character by printed name, cheapest first.
    pub fn versions_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Arc<Card>> + 'a {
        let mut versions: Vec<&Arc<Card>> = self
            .cards
            .values()
            .filter(|c| c.is_character() && c.same_name_as(name))
            .collect();
        versions.sort_by_key(|c| (c.chakra, c.id));
        versions.into_iter()
    }

    /// Cards matching a predicate, in id order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Arc<Card>>
    where
        F: Fn(&Card) -> bool,
    {
        self.iter().filter(move |c| predicate(c))
    }
}
