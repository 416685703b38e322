//! Mission phase.
//!
//! Missions score in rank order D, C, B, A regardless of reveal order. A won
//! mission queues its SCORE sources: the mission card first, then the
//! winner's face-up characters in mission order. The queue lives in
//! `GameState::scoring`, so a SCORE effect that waits on a selection leaves
//! the rest of scoring parked until it is answered.

use im::Vector;
use tracing::info;

use crate::core::{GameState, MissionRank, ScoreSource, ScoringCursor};
use crate::effects::{continuous, EffectContext, EffectEngine};
use crate::triggers::EffectTrigger;

/// Score missions until done or suspended. Returns true on suspension.
pub(crate) fn run(effects: &EffectEngine, state: &mut GameState) -> bool {
    if state.scoring.is_none() {
        for mission in state.missions.iter_mut() {
            mission.won_by = None;
        }
        state.scoring = Some(ScoringCursor::default());
    }

    loop {
        let Some(mut cursor) = state.scoring.take() else {
            return false;
        };

        if let Some(source) = cursor.queue.pop_front() {
            state.scoring = Some(cursor);
            if fire_score(effects, state, source) {
                return true;
            }
            continue;
        }

        let Some(&rank) = MissionRank::SCORING_ORDER.get(cursor.next_rank) else {
            return false;
        };
        cursor.next_rank += 1;
        if let Some(index) = state.missions.iter().position(|m| m.rank == rank) {
            cursor.queue = score_mission(state, index);
        }
        state.scoring = Some(cursor);
    }
}

/// Decide one mission, award points and list its SCORE sources.
fn score_mission(state: &mut GameState, index: usize) -> Vector<ScoreSource> {
    let winner = continuous::mission_leader(state, index);
    let Some(mission) = state.missions.get_mut(index) else {
        return Vector::new();
    };
    mission.won_by = winner;

    let Some(winner) = winner else {
        let name = mission.card.name.clone();
        state.push_log(None, format!("mission {} has no winner", name));
        return Vector::new();
    };

    let points = mission.points();
    let mut queue = Vector::new();
    if mission.card.has_trigger(EffectTrigger::Score) {
        queue.push_back(ScoreSource::Mission(index));
    }
    for character in mission.visible(winner) {
        if character.card().has_trigger(EffectTrigger::Score) {
            queue.push_back(ScoreSource::Character(character.id));
        }
    }
    let name = mission.card.name.clone();
    let rank = mission.rank;

    state.players[winner].mission_points += points;
    state.push_log(Some(winner), format!("wins mission {} ({}) for {} points", name, rank, points));
    info!(mission = %name, %rank, %winner, points, "mission scored");
    queue
}

/// Fire one queued SCORE source. Characters that left play or turned
/// face-down in the meantime are skipped.
fn fire_score(effects: &EffectEngine, state: &mut GameState, source: ScoreSource) -> bool {
    let context = match source {
        ScoreSource::Mission(index) => {
            let Some(mission) = state.missions.get(index) else {
                return false;
            };
            let Some(winner) = mission.won_by else {
                return false;
            };
            EffectContext::mission(mission.card.clone(), index, winner)
        }
        ScoreSource::Character(id) => match state.character(id) {
            Some(ch) if ch.is_visible() => EffectContext::character(
                ch.card().clone(),
                id,
                ch.mission,
                ch.controller,
                EffectTrigger::Score,
            ),
            _ => return false,
        },
    };
    effects.fire(state, context, &[EffectTrigger::Score])
}
