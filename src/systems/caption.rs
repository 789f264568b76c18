use crate::components::{LabelText, PanelCaption, Viewer};
use bevy::prelude::*;

/// Top-left corner of a caption box centered on `screen`.
pub fn caption_origin(screen: Vec2, size: Vec2) -> Vec2 {
    screen - size / 2.0
}

// Mirrors each panel's LabelText into its caption and pins the caption over
// the panel's projected position. Hidden panels, or panels the viewer camera
// cannot project, keep their caption hidden.
pub fn sync_panel_captions(
    panels: Query<(&LabelText, &Transform, &Visibility), Without<PanelCaption>>,
    viewer_query: Query<(&Camera, &Transform), With<Viewer>>,
    mut captions: Query<(&PanelCaption, &mut Text, &mut Node, &mut Visibility)>,
) {
    let camera = viewer_query.get_single().ok();

    for (caption, mut text, mut node, mut visibility) in captions.iter_mut() {
        let Ok((label, panel_transform, panel_visibility)) = panels.get(caption.panel) else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };

        if text.0 != label.0 {
            text.0.clone_from(&label.0);
        }

        if *panel_visibility == Visibility::Hidden || label.0.is_empty() {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        }

        let screen = camera.and_then(|(camera, viewer)| {
            camera
                .world_to_viewport(&GlobalTransform::from(*viewer), panel_transform.translation)
                .ok()
        });
        match screen {
            Some(screen) => {
                let origin = caption_origin(screen, caption.size);
                node.left = Val::Px(origin.x);
                node.top = Val::Px(origin.y);
                visibility.set_if_neq(Visibility::Visible);
            }
            // Behind the viewer or no camera to project with
            None => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}
