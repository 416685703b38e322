//! Suspension records.
//!
//! A handler either finishes (`EffectOutcome::Done`) or asks a player to
//! choose (`EffectOutcome::Await`). On `Await` the engine freezes a
//! `PendingEffect` (what was resolving and how to continue) and a paired
//! `PendingAction` (who must choose, and from what). A multi-stage effect is
//! a chain of single-choice suspensions linked by `Continuation`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{GameState, InstanceId, PendingId, PlayerId, Target};
use crate::triggers::EffectTrigger;

/// The card an effect comes from and where it stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectContext {
    /// Card whose effect is resolving.
    pub card: Arc<Card>,
    /// Character instance, absent for mission SCORE effects.
    pub instance: Option<InstanceId>,
    /// Mission the source is on.
    pub mission: usize,
    /// Player resolving the effect.
    pub controller: PlayerId,
    pub trigger: EffectTrigger,
    /// Triggered by an upgrade.
    pub from_upgrade: bool,
}

impl EffectContext {
    /// Context for a character's effect.
    #[must_use]
    pub fn character(
        card: Arc<Card>,
        instance: InstanceId,
        mission: usize,
        controller: PlayerId,
        trigger: EffectTrigger,
    ) -> Self {
        Self {
            card,
            instance: Some(instance),
            mission,
            controller,
            trigger,
            from_upgrade: false,
        }
    }

    /// Context for a mission card's SCORE effect.
    #[must_use]
    pub fn mission(card: Arc<Card>, mission: usize, controller: PlayerId) -> Self {
        Self {
            card,
            instance: None,
            mission,
            controller,
            trigger: EffectTrigger::Score,
            from_upgrade: false,
        }
    }

    /// Mark as triggered by an upgrade (builder pattern).
    #[must_use]
    pub fn upgraded(mut self) -> Self {
        self.from_upgrade = true;
        self
    }

    /// Same source, different trigger.
    #[must_use]
    pub fn with_trigger(&self, trigger: EffectTrigger) -> Self {
        Self {
            trigger,
            ..self.clone()
        }
    }

    /// Move to the mission the source character stands on now. A source that
    /// left play keeps its last mission.
    pub fn follow(&mut self, state: &GameState) {
        if let Some(character) = self.instance.and_then(|id| state.character(id)) {
            self.mission = character.mission;
        }
    }
}

/// What kind of choice a pending action asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionKind {
    /// A character or mission.
    Target,
    /// A card from the chooser's hand to discard.
    DiscardFromHand,
    /// One card from a revealed list.
    ChooseFromList,
    /// A card from hand to put on top of the deck.
    PlaceOnDeck,
}

/// Where a handler picks up after a selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continuation {
    /// Handler-defined stage number.
    pub step: u8,
    /// Choice carried from an earlier stage.
    pub memo: Option<Target>,
}

impl Continuation {
    /// First (or only) stage.
    #[must_use]
    pub fn first() -> Self {
        Self::default()
    }

    /// A later stage remembering an earlier choice.
    #[must_use]
    pub fn then(step: u8, memo: Target) -> Self {
        Self {
            step,
            memo: Some(memo),
        }
    }
}

/// A request for a player's choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub kind: SelectionKind,
    pub candidates: Vec<Target>,
    pub optional: bool,
    pub description: String,
    /// Who decides; `None` means the effect's controller.
    pub chooser: Option<PlayerId>,
    /// Cards shown for `ChooseFromList`.
    pub cards: Vec<Arc<Card>>,
    pub continuation: Continuation,
}

impl Selection {
    /// Ask the controller to pick one of `candidates`.
    #[must_use]
    pub fn new(kind: SelectionKind, candidates: Vec<Target>, description: impl Into<String>) -> Self {
        Self {
            kind,
            candidates,
            optional: false,
            description: description.into(),
            chooser: None,
            cards: Vec::new(),
            continuation: Continuation::first(),
        }
    }

    /// Allow declining (builder pattern).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Someone other than the controller decides (builder pattern).
    #[must_use]
    pub fn chosen_by(mut self, player: PlayerId) -> Self {
        self.chooser = Some(player);
        self
    }

    /// Attach the revealed list (builder pattern).
    #[must_use]
    pub fn showing(mut self, cards: Vec<Arc<Card>>) -> Self {
        self.cards = cards;
        self
    }

    /// Set the continuation (builder pattern).
    #[must_use]
    pub fn at(mut self, continuation: Continuation) -> Self {
        self.continuation = continuation;
        self
    }
}

/// Result of running or resuming a handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectOutcome {
    /// Nothing more to do.
    Done,
    /// Suspend until a player chooses.
    Await(Selection),
}

/// A suspended effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEffect {
    pub id: PendingId,
    pub source: EffectContext,
    /// Position of the suspended handler in the `(card, trigger)` list.
    pub effect_index: usize,
    pub candidates: Vec<Target>,
    pub optional: bool,
    /// Trigger kinds still owed to this card after the current one.
    pub remaining: Vec<EffectTrigger>,
    pub continuation: Continuation,
}

/// The choice a suspended effect is waiting for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub id: PendingId,
    /// Player who must answer.
    pub player: PlayerId,
    pub kind: SelectionKind,
    pub description: String,
    pub optional: bool,
    /// Cards shown for `ChooseFromList`.
    pub cards: Vec<Arc<Card>>,
}
