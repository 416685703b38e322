//! Effect handlers.
//!
//! Each `EffectAction` has one handler type. A handler starts from
//! [`EffectHandler::begin`] and, when it asked for a choice, continues in
//! [`EffectHandler::resume`] (or [`EffectHandler::decline`] for optional
//! choices). Handlers never catch their own faults: any `Err` is turned into
//! a fizzle by the effect engine, which restores the state it had before the
//! call.
//!
//! ## Handler groups
//!
//! - `resources`: chakra and the Edge
//! - `hand`: draw, discard, recall
//! - `deck`: scout
//! - `power`: power tokens
//! - `removal`: defeat and hide
//! - `movement`: two-stage moves
//! - `control`: steal

mod control;
mod deck;
mod hand;
mod movement;
mod power;
mod removal;
mod resources;

use std::sync::Arc;

pub use control::StealEnemy;
pub use deck::Scout;
pub use hand::{Draw, DiscardToDraw, OpponentDiscards, Recall};
pub use movement::{MoveEnemy, MoveFriendly};
pub use power::{PowerUpFriendly, PowerUpSelf, StripTokens};
pub use removal::{DefeatEnemy, DefeatHiddenEnemy, HideEnemy};
pub use resources::{GainChakra, TakeEdge};

use crate::cards::{CharacterInPlay, EffectAction};
use crate::core::{GameState, InstanceId, PlayerId, Target};
use crate::error::EffectError;

use super::pending::{Continuation, EffectContext, EffectOutcome};

/// Behaviour behind one printed effect.
pub trait EffectHandler: Send + Sync + std::fmt::Debug {
    /// Start resolving.
    fn begin(
        &self,
        state: &mut GameState,
        ctx: &EffectContext,
    ) -> Result<EffectOutcome, EffectError>;

    /// Apply a choice made for a selection this handler requested.
    fn resume(
        &self,
        _state: &mut GameState,
        _ctx: &EffectContext,
        _step: &Continuation,
        choice: Target,
    ) -> Result<EffectOutcome, EffectError> {
        Err(EffectError::UnexpectedTarget(choice))
    }

    /// The chooser declined an optional selection.
    fn decline(
        &self,
        _state: &mut GameState,
        _ctx: &EffectContext,
        _step: &Continuation,
    ) -> Result<EffectOutcome, EffectError> {
        Ok(EffectOutcome::Done)
    }
}

/// The built-in handler for a typed effect. Continuous rules have none.
#[must_use]
pub fn builtin_handler(action: &EffectAction) -> Option<Arc<dyn EffectHandler>> {
    let handler: Arc<dyn EffectHandler> = match action {
        EffectAction::GainChakra(amount) => Arc::new(GainChakra(*amount)),
        EffectAction::Draw(count) => Arc::new(Draw(*count)),
        EffectAction::PowerUpSelf(amount) => Arc::new(PowerUpSelf(*amount)),
        EffectAction::PowerUpFriendly {
            amount,
            scope,
            filter,
        } => Arc::new(PowerUpFriendly {
            amount: *amount,
            scope: *scope,
            filter: filter.clone(),
        }),
        EffectAction::DefeatEnemy { max_power, scope } => Arc::new(DefeatEnemy {
            max_power: *max_power,
            scope: *scope,
        }),
        EffectAction::DefeatHiddenEnemy { scope } => Arc::new(DefeatHiddenEnemy { scope: *scope }),
        EffectAction::HideEnemy { max_cost, scope } => Arc::new(HideEnemy {
            max_cost: *max_cost,
            scope: *scope,
        }),
        EffectAction::MoveFriendly => Arc::new(MoveFriendly),
        EffectAction::MoveEnemy { max_power } => Arc::new(MoveEnemy {
            max_power: *max_power,
        }),
        EffectAction::DiscardToDraw { draw } => Arc::new(DiscardToDraw { draw: *draw }),
        EffectAction::OpponentDiscards => Arc::new(OpponentDiscards),
        EffectAction::Scout { look } => Arc::new(Scout { look: *look }),
        EffectAction::Recall { chakra } => Arc::new(Recall { chakra: *chakra }),
        EffectAction::StealEnemy { max_power } => Arc::new(StealEnemy {
            max_power: *max_power,
        }),
        EffectAction::TakeEdge => Arc::new(TakeEdge),
        EffectAction::StripTokens { scope } => Arc::new(StripTokens { scope: *scope }),
        EffectAction::Continuous(_) => return None,
    };
    Some(handler)
}

// === Shared helpers ===

/// The source character's id, for effects that only make sense on one.
fn source_instance(ctx: &EffectContext) -> Result<InstanceId, EffectError> {
    ctx.instance
        .ok_or_else(|| EffectError::Inconsistent(format!("{} has no character instance", ctx.card)))
}

fn chosen_character(choice: Target) -> Result<InstanceId, EffectError> {
    match choice {
        Target::Character(id) => Ok(id),
        other => Err(EffectError::UnexpectedTarget(other)),
    }
}

fn chosen_mission(choice: Target) -> Result<usize, EffectError> {
    match choice {
        Target::Mission(m) => Ok(m),
        other => Err(EffectError::UnexpectedTarget(other)),
    }
}

fn chosen_hand_card(choice: Target) -> Result<usize, EffectError> {
    match choice {
        Target::HandCard(i) => Ok(i),
        other => Err(EffectError::UnexpectedTarget(other)),
    }
}

/// Whether `character` may stand on `player`'s side of `mission` without
/// two visible characters sharing a name there.
pub(crate) fn can_enter(
    state: &GameState,
    character: &CharacterInPlay,
    player: PlayerId,
    mission: usize,
) -> bool {
    let Some(target) = state.missions.get(mission) else {
        return false;
    };
    character.hidden
        || !target
            .visible(player)
            .any(|c| c.id != character.id && c.card().same_name_as(character.name()))
}

/// Move a character to `mission` on `side`, keeping tokens and stack.
pub(crate) fn relocate(
    state: &mut GameState,
    id: InstanceId,
    mission: usize,
    side: PlayerId,
) -> Result<(), EffectError> {
    if mission >= state.missions.len() {
        return Err(EffectError::MissingMission(mission));
    }
    let mut character = state
        .remove_character(id)
        .ok_or(EffectError::MissingCharacter(id))?;
    character.mission = mission;
    character.controller = side;
    state.place_character(character);
    Ok(())
}

/// Turn a character face-down. Hidden characters carry no tokens.
pub(crate) fn hide(state: &mut GameState, id: InstanceId) -> Result<(), EffectError> {
    let hidden = state.update_character(id, |c| {
        c.hidden = true;
        c.power_tokens = 0;
    });
    if hidden {
        Ok(())
    } else {
        Err(EffectError::MissingCharacter(id))
    }
}
