//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! The game is strictly two-player. `PlayerId` is a type-safe index (0 or 1)
//! with an `opponent()` helper.
//!
//! ## PlayerMap
//!
//! Per-player data stored inline as a two-element array. Supports iteration
//! and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of players in a game.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier. Player indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// The first player.
    pub const ONE: PlayerId = PlayerId(0);
    /// The second player.
    pub const TWO: PlayerId = PlayerId(1);

    /// Create a player ID from a 0-based index.
    ///
    /// Indices other than 0 and 1 wrap onto the two seats.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id % PLAYER_COUNT as u8)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    ///
    /// ```
    /// use mythos_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::ONE.opponent(), PlayerId::TWO);
    /// assert_eq!(PlayerId::TWO.opponent(), PlayerId::ONE);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both player IDs.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [Self::ONE, Self::TWO].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use mythos_engine::core::{PlayerId, PlayerMap};
///
/// let mut chakra: PlayerMap<u32> = PlayerMap::new(|_| 5);
/// chakra[PlayerId::TWO] = 3;
///
/// assert_eq!(chakra[PlayerId::ONE], 5);
/// assert_eq!(chakra[PlayerId::TWO], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create a PlayerMap from explicit values for each seat.
    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId::new(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId::new(i as u8), v))
    }

    /// Transform every entry.
    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap::new(|p| f(p, &self[p]))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::ONE.index(), 0);
        assert_eq!(PlayerId::TWO.index(), 1);
        assert_eq!(format!("{}", PlayerId::ONE), "Player 1");
    }

    #[test]
    fn test_player_id_wraps() {
        assert_eq!(PlayerId::new(2), PlayerId::ONE);
        assert_eq!(PlayerId::new(3), PlayerId::TWO);
    }

    #[test]
    fn test_opponent_is_involution() {
        for p in PlayerId::all() {
            assert_ne!(p, p.opponent());
            assert_eq!(p, p.opponent().opponent());
        }
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::ONE], 0);
        assert_eq!(map[PlayerId::TWO], 10);
    }

    #[test]
    fn test_player_map_iter_and_map() {
        let map: PlayerMap<i32> = PlayerMap::from_pair(3, 7);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::ONE, &3), (PlayerId::TWO, &7)]);

        let doubled = map.map(|_, v| v * 2);
        assert_eq!(doubled[PlayerId::TWO], 14);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
