// Adapts Bevy's pointer picking into the interaction-state signal the
// visualizers consume.
use crate::components::InteractionState;
use crate::events::InteractionStateChanged;
use bevy::picking::events::{Down, Out, Over, Pointer, Up};
use bevy::prelude::*;

// Updates the state source and announces the change. Disabled objects stay
// disabled until something re-enables them explicitly.
pub fn report_state(
    entity: Entity,
    state: InteractionState,
    sources: &mut Query<&mut InteractionState>,
    state_events: &mut EventWriter<InteractionStateChanged>,
) {
    let Ok(mut current) = sources.get_mut(entity) else {
        return;
    };
    if *current == InteractionState::Disabled && state != InteractionState::Disabled {
        return;
    }

    *current = state;
    state_events.send(InteractionStateChanged { entity, state });
}

pub fn on_pointer_over(
    trigger: Trigger<Pointer<Over>>,
    mut sources: Query<&mut InteractionState>,
    mut state_events: EventWriter<InteractionStateChanged>,
) {
    report_state(
        trigger.entity(),
        InteractionState::Hover,
        &mut sources,
        &mut state_events,
    );
}

pub fn on_pointer_out(
    trigger: Trigger<Pointer<Out>>,
    mut sources: Query<&mut InteractionState>,
    mut state_events: EventWriter<InteractionStateChanged>,
) {
    report_state(
        trigger.entity(),
        InteractionState::Normal,
        &mut sources,
        &mut state_events,
    );
}

pub fn on_pointer_down(
    trigger: Trigger<Pointer<Down>>,
    mut sources: Query<&mut InteractionState>,
    mut state_events: EventWriter<InteractionStateChanged>,
) {
    report_state(
        trigger.entity(),
        InteractionState::Select,
        &mut sources,
        &mut state_events,
    );
}

// Releasing while still pointed at the object goes back to hover
pub fn on_pointer_up(
    trigger: Trigger<Pointer<Up>>,
    mut sources: Query<&mut InteractionState>,
    mut state_events: EventWriter<InteractionStateChanged>,
) {
    report_state(
        trigger.entity(),
        InteractionState::Hover,
        &mut sources,
        &mut state_events,
    );
}
