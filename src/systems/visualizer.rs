use crate::components::{InteractableVisualizer, InteractionState, LabelText, Subscribed, Viewer};
use crate::config::GameConfig;
use crate::events::{InteractionStateChanged, ItemFound};
use crate::systems::placement::place_in_front;
use bevy::prelude::*;

pub fn paint_surface(
    materials: &mut Assets<StandardMaterial>,
    surface: &MeshMaterial3d<StandardMaterial>,
    color: Color,
) {
    match materials.get_mut(&surface.0) {
        Some(material) => material.base_color = color,
        None => warn!("Surface material {:?} is missing, cannot recolor", surface.0.id()),
    }
}

// Start consuming interaction events for `entity`
pub fn subscribe_visualizer(commands: &mut Commands, entity: Entity) {
    commands.entity(entity).insert(Subscribed);
}

// Stop consuming interaction events for `entity`. Events sent in the meantime
// are dropped; the current state is re-read on the next subscribe.
pub fn unsubscribe_visualizer(commands: &mut Commands, entity: Entity) {
    commands.entity(entity).remove::<Subscribed>();
}

// Newly subscribed visualizers pick up the source's current state
pub fn refresh_subscribed_visualizers(
    mut visualizers: Query<
        (
            &mut InteractableVisualizer,
            &InteractionState,
            &MeshMaterial3d<StandardMaterial>,
        ),
        Added<Subscribed>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (mut visualizer, state, surface) in visualizers.iter_mut() {
        let color = visualizer.refresh(*state);
        paint_surface(&mut materials, surface, color);
    }
}

pub fn apply_interaction_states(
    mut state_events: EventReader<InteractionStateChanged>,
    mut visualizers: Query<
        (
            &mut InteractableVisualizer,
            &MeshMaterial3d<StandardMaterial>,
        ),
        With<Subscribed>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut panels: Query<(&mut Transform, &mut Visibility, Option<&mut LabelText>), Without<Viewer>>,
    viewer_query: Query<&Transform, With<Viewer>>,
    config: Res<GameConfig>,
    mut found_events: EventWriter<ItemFound>,
) {
    for event in state_events.read() {
        // Unsubscribed or not a visualizer at all
        let Ok((mut visualizer, surface)) = visualizers.get_mut(event.entity) else {
            continue;
        };

        let reaction = visualizer.apply(event.state);
        paint_surface(&mut materials, surface, reaction.color);

        if !reaction.entered_select {
            continue;
        }

        // Show the notification in front of the viewer
        if let Ok((mut transform, mut visibility, text)) =
            panels.get_mut(visualizer.notification_panel())
        {
            *visibility = Visibility::Visible;
            match viewer_query.get_single() {
                Ok(viewer) => {
                    place_in_front(&mut transform, viewer, config.notification_distance, 0.0)
                }
                Err(_) => warn!("No viewer to place the notification against"),
            }
            if let Some(mut text) = text {
                text.0 = format!("{} has been found", visualizer.item_name());
            }
        }
        visualizer.arm_notification();

        info!("{} selected", visualizer.item_name());
        found_events.send(ItemFound {
            label: visualizer.item_label(),
        });
    }
}

// Runs before new selects are applied so a freshly armed timer is not charged
// for the frame time that passed before the select
pub fn hide_expired_notifications(
    time: Res<Time>,
    mut visualizers: Query<&mut InteractableVisualizer>,
    mut panels: Query<&mut Visibility>,
) {
    for mut visualizer in visualizers.iter_mut() {
        if visualizer.tick_notification(time.delta()) {
            if let Ok(mut visibility) = panels.get_mut(visualizer.notification_panel()) {
                *visibility = Visibility::Hidden;
            }
        }
    }
}
