use bevy::prelude::*;

use crate::components::InteractionState;
use crate::resources::CompletionState;

// Sent by the interaction source every time an object's state changes.
// Duplicates are allowed and handled idempotently.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionStateChanged {
    pub entity: Entity,
    pub state: InteractionState,
}

// Visualizer -> tracker: the item identified by its label entity was found
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemFound {
    pub label: Entity,
}

// Sent once when the tracker reaches a terminal state
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub state: CompletionState,
}
