use crate::{Ability, CardId, PatternId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    PatternSelected {
        pattern: PatternId,
        choices: usize,
    },
    SlotFilled {
        slot: usize,
        card: CardId,
        candidates: usize,
    },
    SlotUnfillable {
        pattern: PatternId,
        slot: usize,
    },
    AbilityAlreadyPresent {
        ability: Ability,
    },
    AbilitySubstituted {
        ability: Ability,
        slot: usize,
        replaced: CardId,
        card: CardId,
    },
    AbilityUnsatisfied {
        ability: Ability,
    },
    AttemptFailed {
        attempt: u32,
        reason: String,
    },
    NemesisTierShort {
        tier: u8,
        wanted: usize,
        drawn: usize,
    },
}

impl Event {
    /// Whether the caller should surface this even when not verbose.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::AbilityUnsatisfied { .. } | Event::NemesisTierShort { .. }
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::PatternSelected { pattern, choices } => {
                write!(f, "selected {pattern} of {choices}")
            }
            Event::SlotFilled {
                slot,
                card,
                candidates,
            } => write!(f, "slot {} <- {card} ({candidates} candidates)", slot + 1),
            Event::SlotUnfillable { pattern, slot } => {
                write!(f, "{pattern} slot {} has no candidates", slot + 1)
            }
            Event::AbilityAlreadyPresent { ability } => {
                write!(f, "{ability} already present")
            }
            Event::AbilitySubstituted {
                ability,
                slot,
                replaced,
                card,
            } => write!(f, "slot {}: {replaced} -> {card} for {ability}", slot + 1),
            Event::AbilityUnsatisfied { ability } => {
                write!(f, "no card with {ability} fits any slot")
            }
            Event::AttemptFailed { attempt, reason } => {
                write!(f, "attempt {attempt} failed: {reason}")
            }
            Event::NemesisTierShort {
                tier,
                wanted,
                drawn,
            } => write!(f, "tier {tier}: wanted {wanted} cards, only {drawn} available"),
        }
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn events(&self) -> &[Event] {
        &self.queue
    }
}
