//! Target resolution.
//!
//! `TargetQuery` enumerates characters an effect may choose, from the point
//! of view of the player resolving it:
//! - Allegiance: friendly, enemy, or either side
//! - Visibility: face-up, face-down, or either
//! - Location: one mission or all
//! - Printed/effective limits: max power, max cost, card filter
//!
//! Queries are pure reads; they never touch the state.

use crate::cards::{CharacterFilter, CharacterInPlay, Scope};
use crate::core::{GameState, InstanceId, PlayerId, Target};

use super::continuous;

/// Which side a target must be on, relative to the querying player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Allegiance {
    Friendly,
    Enemy,
    Either,
}

/// Face-up / face-down requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    Either,
}

/// Builder for a character target query.
///
/// ## Example
///
/// ```
/// use mythos_engine::core::{GameState, PlayerId, RulesConfig};
/// use mythos_engine::effects::TargetQuery;
///
/// let state = GameState::new(RulesConfig::default(), 1);
/// let targets = TargetQuery::enemy(PlayerId::ONE)
///     .visible()
///     .max_power(3)
///     .collect(&state);
/// assert!(targets.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct TargetQuery {
    player: PlayerId,
    allegiance: Allegiance,
    visibility: Visibility,
    mission: Option<usize>,
    max_power: Option<u32>,
    max_cost: Option<u32>,
    filter: CharacterFilter,
    exclude: Option<InstanceId>,
    with_tokens: bool,
}

impl TargetQuery {
    fn new(player: PlayerId, allegiance: Allegiance) -> Self {
        Self {
            player,
            allegiance,
            visibility: Visibility::Either,
            mission: None,
            max_power: None,
            max_cost: None,
            filter: CharacterFilter::any(),
            exclude: None,
            with_tokens: false,
        }
    }

    /// Characters `player` controls.
    #[must_use]
    pub fn friendly(player: PlayerId) -> Self {
        Self::new(player, Allegiance::Friendly)
    }

    /// Characters the opponent of `player` controls.
    #[must_use]
    pub fn enemy(player: PlayerId) -> Self {
        Self::new(player, Allegiance::Enemy)
    }

    /// Characters on either side.
    #[must_use]
    pub fn either(player: PlayerId) -> Self {
        Self::new(player, Allegiance::Either)
    }

    #[must_use]
    pub fn visible(mut self) -> Self {
        self.visibility = Visibility::Visible;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visibility = Visibility::Hidden;
        self
    }

    /// Restrict to one mission.
    #[must_use]
    pub fn in_mission(mut self, mission: usize) -> Self {
        self.mission = Some(mission);
        self
    }

    /// Restrict by an effect scope relative to the source mission.
    #[must_use]
    pub fn within(self, scope: Scope, source_mission: usize) -> Self {
        match scope {
            Scope::ThisMission => self.in_mission(source_mission),
            Scope::AnyMission => self,
        }
    }

    /// Effective power at most `power`.
    #[must_use]
    pub fn max_power(mut self, power: u32) -> Self {
        self.max_power = Some(power);
        self
    }

    /// Printed cost of the top card at most `cost`.
    #[must_use]
    pub fn max_cost(mut self, cost: u32) -> Self {
        self.max_cost = Some(cost);
        self
    }

    /// Printed card data must match `filter`.
    #[must_use]
    pub fn matching(mut self, filter: CharacterFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn excluding(mut self, id: InstanceId) -> Self {
        self.exclude = Some(id);
        self
    }

    /// Only characters carrying power tokens.
    #[must_use]
    pub fn with_tokens(mut self) -> Self {
        self.with_tokens = true;
        self
    }

    /// Whether one character satisfies the query.
    #[must_use]
    pub fn matches(&self, state: &GameState, character: &CharacterInPlay) -> bool {
        let side_ok = match self.allegiance {
            Allegiance::Friendly => character.controller == self.player,
            Allegiance::Enemy => character.controller != self.player,
            Allegiance::Either => true,
        };
        let visibility_ok = match self.visibility {
            Visibility::Visible => character.is_visible(),
            Visibility::Hidden => character.hidden,
            Visibility::Either => true,
        };

        side_ok
            && visibility_ok
            && self.mission.map_or(true, |m| character.mission == m)
            && self.exclude != Some(character.id)
            && (!self.with_tokens || character.power_tokens > 0)
            && self.max_cost.map_or(true, |cost| character.card().chakra <= cost)
            && self.max_power.map_or(true, |power| {
                continuous::effective_power(state, character) <= power
            })
            && (self.filter == CharacterFilter::any() || self.filter.matches(character.card()))
    }

    /// Ids of every matching character, in board order.
    #[must_use]
    pub fn collect(&self, state: &GameState) -> Vec<InstanceId> {
        state
            .characters()
            .filter(|c| self.matches(state, c))
            .map(|c| c.id)
            .collect()
    }

    /// Matching characters as selection targets.
    #[must_use]
    pub fn targets(&self, state: &GameState) -> Vec<Target> {
        self.collect(state).into_iter().map(Target::Character).collect()
    }
}

/// Every active mission except `except`.
#[must_use]
pub fn other_missions(state: &GameState, except: usize) -> Vec<Target> {
    (0..state.missions.len())
        .filter(|&m| m != except)
        .map(Target::Mission)
        .collect()
}

/// Every card in a player's hand.
#[must_use]
pub fn hand_targets(state: &GameState, player: PlayerId) -> Vec<Target> {
    (0..state.players[player].hand.len())
        .map(Target::HandCard)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId};
    use crate::core::{ActiveMission, MissionRank, RulesConfig};

    fn board() -> (GameState, Vec<InstanceId>) {
        let mut state = GameState::new(RulesConfig::default(), 5);
        for (id, rank) in [(200, MissionRank::D), (201, MissionRank::C)] {
            let card = Card::mission(CardId::new(id), "Mission", 2).shared();
            state.missions.push_back(ActiveMission::new(card, rank, 1));
        }

        let specs = [
            ("Naruto Uzumaki", 2, 2, PlayerId::ONE, 0, false),
            ("Sasuke Uchiha", 3, 3, PlayerId::TWO, 0, false),
            ("Gaara", 4, 4, PlayerId::TWO, 0, true),
            ("Haku", 2, 2, PlayerId::TWO, 1, false),
        ];
        let mut ids = Vec::new();
        for (i, (name, chakra, power, player, mission, hidden)) in specs.into_iter().enumerate() {
            let id = state.alloc_instance();
            let card = Card::character(CardId::new(i as u32 + 1), name, chakra, power)
                .with_keyword("Test")
                .shared();
            state.place_character(CharacterInPlay::new(id, card, player, mission, hidden));
            ids.push(id);
        }
        (state, ids)
    }

    #[test]
    fn test_enemy_visible_in_mission() {
        let (state, ids) = board();
        let found = TargetQuery::enemy(PlayerId::ONE).visible().in_mission(0).collect(&state);
        assert_eq!(found, vec![ids[1]]);
    }

    #[test]
    fn test_hidden_enemies_any_mission() {
        let (state, ids) = board();
        let found = TargetQuery::enemy(PlayerId::ONE)
            .hidden()
            .within(Scope::AnyMission, 0)
            .collect(&state);
        assert_eq!(found, vec![ids[2]]);
    }

    #[test]
    fn test_power_and_cost_limits() {
        let (state, ids) = board();
        let weak = TargetQuery::enemy(PlayerId::ONE).visible().max_power(2).collect(&state);
        assert_eq!(weak, vec![ids[3]]);

        let cheap = TargetQuery::either(PlayerId::ONE).max_cost(2).collect(&state);
        assert_eq!(cheap, vec![ids[0], ids[3]]);
    }

    #[test]
    fn test_filter_and_exclusion() {
        let (state, ids) = board();
        let found = TargetQuery::friendly(PlayerId::TWO)
            .matching(CharacterFilter::named("haku"))
            .collect(&state);
        assert_eq!(found, vec![ids[3]]);

        let others = TargetQuery::friendly(PlayerId::TWO).excluding(ids[1]).collect(&state);
        assert_eq!(others, vec![ids[2], ids[3]]);
    }

    #[test]
    fn test_mission_and_hand_helpers() {
        let (state, _) = board();
        assert_eq!(other_missions(&state, 0), vec![Target::Mission(1)]);
        assert!(hand_targets(&state, PlayerId::ONE).is_empty());
    }
}
