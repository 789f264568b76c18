use crate::components::{LabelText, Viewer};
use crate::config::GameConfig;
use crate::events::{GameOutcome, ItemFound};
use crate::resources::{CompletionState, FoundOutcome, ItemTracker, TrackerPanels};
use crate::systems::placement::{hide, place_in_front, reveal_panel, DisplayQuery};
use bevy::prelude::*;

pub fn handle_item_found(
    mut found_events: EventReader<ItemFound>,
    tracker: Option<ResMut<ItemTracker>>,
    panels: Res<TrackerPanels>,
    config: Res<GameConfig>,
    viewer_query: Query<&Transform, With<Viewer>>,
    mut displays: DisplayQuery,
    mut outcome_events: EventWriter<GameOutcome>,
) {
    let Some(mut tracker) = tracker else {
        return;
    };

    for event in found_events.read() {
        let outcome = tracker.item_found(event.label);
        if outcome == FoundOutcome::Ignored {
            debug!("Ignoring found report for {:?}", event.label);
            continue;
        }

        // Cross the item off the list
        hide(&mut displays, event.label);
        info!("Item found, {} left", tracker.remaining_items());

        if outcome == FoundOutcome::Completed {
            info!("All items found - you win!");
            reveal_panel(
                &mut displays,
                panels.win_panel,
                viewer_query.get_single().ok(),
                config.win_panel_distance,
                config.panel_vertical_offset,
            );
            outcome_events.send(GameOutcome {
                state: CompletionState::Won,
            });
        }
    }
}

pub fn tick_countdown(
    time: Res<Time>,
    tracker: Option<ResMut<ItemTracker>>,
    panels: Res<TrackerPanels>,
    config: Res<GameConfig>,
    viewer_query: Query<&Transform, With<Viewer>>,
    mut displays: DisplayQuery,
    mut outcome_events: EventWriter<GameOutcome>,
) {
    let Some(mut tracker) = tracker else {
        return;
    };

    if tracker.tick(time.delta()) == Some(CompletionState::Lost) {
        info!(
            "Time is up with {} items left - you lose!",
            tracker.remaining_items()
        );
        reveal_panel(
            &mut displays,
            panels.lose_panel,
            viewer_query.get_single().ok(),
            config.lose_panel_distance,
            config.panel_vertical_offset,
        );
        outcome_events.send(GameOutcome {
            state: CompletionState::Lost,
        });
    }
}

pub fn format_countdown(remaining_secs: f32) -> String {
    format!("Time left: {:.1}s", remaining_secs.max(0.0))
}

// Keeps the countdown label in front of the viewer and its text current
pub fn update_countdown_label(
    tracker: Option<Res<ItemTracker>>,
    panels: Res<TrackerPanels>,
    config: Res<GameConfig>,
    viewer_query: Query<&Transform, With<Viewer>>,
    mut labels: Query<(&mut Transform, &mut LabelText), Without<Viewer>>,
) {
    let (Some(tracker), Some(label)) = (tracker, panels.countdown_label) else {
        return;
    };
    let Some(remaining) = tracker.remaining_secs() else {
        return;
    };
    let Ok((mut transform, mut text)) = labels.get_mut(label) else {
        return;
    };

    text.0 = format_countdown(remaining);

    // Frozen once the game is decided
    if tracker.state() != CompletionState::InProgress {
        return;
    }
    if let Ok(viewer) = viewer_query.get_single() {
        place_in_front(
            &mut transform,
            viewer,
            config.countdown_distance,
            config.countdown_vertical_offset,
        );
    }
}
