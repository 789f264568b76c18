use crate::components::{InteractableVisualizer, InteractionState, Viewer};
use crate::config::GameConfig;
use crate::error::SetupError;
use crate::events::{GameOutcome, InteractionStateChanged, ItemFound};
use crate::resources::{ItemTracker, TrackerPanels};
use crate::systems::caption::sync_panel_captions;
use crate::systems::tracker::{handle_item_found, tick_countdown, update_countdown_label};
use crate::systems::visualizer::{
    apply_interaction_states, hide_expired_notifications, refresh_subscribed_visualizers,
};
use bevy::prelude::*;

/// Frame ordering: pending notification hides are ticked before new selects
/// arm them, state events are turned into found reports before the tracker
/// runs, and the tracker settles before anything is re-placed.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum FindItemsSet {
    Visualize,
    Track,
    Present,
}

/// Interactable visualizers plus the completion tracker.
///
/// The scene is expected to insert an [`ItemTracker`] and fill in
/// [`TrackerPanels`] during `Startup`; everything is validated in
/// `PostStartup` and the app exits with an error if a collaborator is missing.
pub struct FindItemsPlugin {
    config: GameConfig,
}

impl FindItemsPlugin {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl Plugin for FindItemsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<TrackerPanels>()
            .add_event::<InteractionStateChanged>()
            .add_event::<ItemFound>()
            .add_event::<GameOutcome>()
            .configure_sets(
                Update,
                (
                    FindItemsSet::Visualize,
                    FindItemsSet::Track,
                    FindItemsSet::Present,
                )
                    .chain(),
            )
            .add_systems(
                PostStartup,
                (validate_setup.pipe(abort_on_setup_error), prepare_panels).chain(),
            )
            .add_systems(
                Update,
                (
                    hide_expired_notifications,
                    refresh_subscribed_visualizers,
                    apply_interaction_states,
                )
                    .chain()
                    .in_set(FindItemsSet::Visualize),
            )
            .add_systems(
                Update,
                (handle_item_found, tick_countdown)
                    .chain()
                    .in_set(FindItemsSet::Track),
            )
            .add_systems(
                Update,
                (update_countdown_label, sync_panel_captions)
                    .chain()
                    .in_set(FindItemsSet::Present),
            );
    }
}

fn validate_setup(
    tracker: Option<Res<ItemTracker>>,
    panels: Res<TrackerPanels>,
    viewers: Query<(), (With<Viewer>, With<Transform>)>,
    visualizers: Query<(
        &InteractableVisualizer,
        Has<InteractionState>,
        Has<MeshMaterial3d<StandardMaterial>>,
    )>,
    placeable: Query<(), (With<Transform>, With<Visibility>)>,
    visible: Query<(), With<Visibility>>,
) -> Result<(), SetupError> {
    if viewers.is_empty() {
        return Err(SetupError::MissingViewer);
    }

    let tracker = tracker.ok_or(SetupError::MissingTracker)?;
    if tracker.remaining_items() == 0 {
        return Err(SetupError::NoTrackedItems);
    }
    for &label in tracker.outstanding() {
        if !visible.contains(label) {
            return Err(SetupError::DanglingReference {
                owner: "ItemTracker",
                field: "items",
                entity: label,
                requirement: "Visibility",
            });
        }
    }

    let mut required_panels = vec![("win_panel", panels.win_panel)];
    if tracker.has_countdown() {
        required_panels.push(("lose_panel", panels.lose_panel));
        required_panels.push(("countdown_label", panels.countdown_label));
    }
    for (field, panel) in required_panels {
        let panel = panel.ok_or(SetupError::MissingCollaborator {
            owner: "ItemTracker",
            field,
        })?;
        if !placeable.contains(panel) {
            return Err(SetupError::DanglingReference {
                owner: "ItemTracker",
                field,
                entity: panel,
                requirement: "Transform and Visibility",
            });
        }
    }

    for (visualizer, has_state_source, has_surface) in visualizers.iter() {
        if !has_state_source {
            return Err(SetupError::MissingCollaborator {
                owner: "InteractableVisualizer",
                field: "interaction state source",
            });
        }
        if !has_surface {
            return Err(SetupError::MissingCollaborator {
                owner: "InteractableVisualizer",
                field: "surface material",
            });
        }
        if !placeable.contains(visualizer.notification_panel()) {
            return Err(SetupError::DanglingReference {
                owner: "InteractableVisualizer",
                field: "notification_panel",
                entity: visualizer.notification_panel(),
                requirement: "Transform and Visibility",
            });
        }
        if !visible.contains(visualizer.item_label()) {
            return Err(SetupError::DanglingReference {
                owner: "InteractableVisualizer",
                field: "item_label",
                entity: visualizer.item_label(),
                requirement: "Visibility",
            });
        }
    }

    info!(
        "Find-items setup ok: {} items, {} interactables, countdown {:?}",
        tracker.remaining_items(),
        visualizers.iter().count(),
        tracker.remaining_secs()
    );
    Ok(())
}

/// Logs a setup failure and shuts the app down.
pub fn abort_on_setup_error(In(result): In<Result<(), SetupError>>, mut exit: EventWriter<AppExit>) {
    if let Err(err) = result {
        error!("Setup failed: {err}");
        exit.send(AppExit::error());
    }
}

// Popups start hidden
fn prepare_panels(
    panels: Res<TrackerPanels>,
    visualizers: Query<&InteractableVisualizer>,
    mut visibility_query: Query<&mut Visibility>,
) {
    let popups = [panels.win_panel, panels.lose_panel]
        .into_iter()
        .flatten()
        .chain(visualizers.iter().map(|visualizer| visualizer.notification_panel()));

    for panel in popups {
        if let Ok(mut visibility) = visibility_query.get_mut(panel) {
            *visibility = Visibility::Hidden;
        }
    }
}
