//! Hidden-information sampling.
//!
//! A sanitized state knows how many cards the opponent holds and how many
//! of their characters are face-down, but not which. Expert fills those
//! gaps with cards drawn from the pool the opponent could still be holding,
//! producing one plausible full state per simulation.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::cards::{Card, CardId};
use crate::core::{GameRng, GameState, PlayerId};

/// Cards the opponent of `viewer` may still hold unseen.
///
/// Every character in `characters` appears `max_copies` times, minus the
/// opponent-owned copies `viewer` has already seen: their discard pile and
/// the face-up cards they own in play.
#[must_use]
pub fn unseen_pool(characters: &[Arc<Card>], state: &GameState, viewer: PlayerId) -> Vec<Arc<Card>> {
    let opponent = viewer.opponent();
    let mut seen: FxHashMap<CardId, usize> = FxHashMap::default();

    let discarded = state.players[opponent].discard.iter();
    let in_play = state
        .characters()
        .filter(|c| c.owner == opponent)
        .flat_map(|c| c.stack())
        .filter(|card| !card.is_concealed());
    for card in discarded.chain(in_play) {
        *seen.entry(card.id).or_default() += 1;
    }

    let copies = state.rules.max_copies;
    characters
        .iter()
        .filter(|card| card.is_character())
        .flat_map(|card| {
            let left = copies.saturating_sub(seen.get(&card.id).copied().unwrap_or(0));
            std::iter::repeat(card.clone()).take(left)
        })
        .collect()
}

/// Fill the concealed parts of `state` for `viewer`'s opponent from `pool`.
///
/// Face-down characters get a plausible top card first, then the hand,
/// then the deck. Whatever the pool cannot cover stays concealed.
pub fn determinize(state: &mut GameState, viewer: PlayerId, pool: &[Arc<Card>], rng: &mut GameRng) {
    let opponent = viewer.opponent();
    let mut bag = pool.to_vec();
    rng.shuffle(&mut bag);
    let mut bag = bag.into_iter();

    for mission in state.missions.iter_mut() {
        for character in mission.characters[opponent].iter_mut() {
            if !character.card().is_concealed() {
                continue;
            }
            match bag.next() {
                Some(card) => character.replace_top(card),
                None => return,
            }
        }
    }

    let seat = &mut state.players[opponent];
    while seat.concealed_hand > 0 {
        let Some(card) = bag.next() else { return };
        seat.hand.push_back(card);
        seat.concealed_hand -= 1;
    }
    while seat.concealed_deck > 0 {
        let Some(card) = bag.next() else { return };
        seat.deck.push_back(card);
        seat.concealed_deck -= 1;
    }
}
