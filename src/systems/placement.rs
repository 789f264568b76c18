use crate::components::Viewer;
use bevy::prelude::*;

/// Visibility and (optional) placement of panels and labels.
pub type DisplayQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Visibility, Option<&'static mut Transform>),
    Without<Viewer>,
>;

// Puts `target` `distance` units along the viewer's forward axis, raised by
// `vertical_offset`, facing the same way as the viewer.
pub fn place_in_front(target: &mut Transform, viewer: &Transform, distance: f32, vertical_offset: f32) {
    let mut translation = viewer.translation + viewer.forward() * distance;
    translation.y += vertical_offset;
    target.translation = translation;
    target.rotation = viewer.rotation;
}

// Makes a panel visible and moves it in front of the viewer. Without a viewer
// the panel is still shown where it was.
pub fn reveal_panel(
    displays: &mut DisplayQuery,
    panel: Option<Entity>,
    viewer: Option<&Transform>,
    distance: f32,
    vertical_offset: f32,
) {
    let Some(panel) = panel else {
        return;
    };
    let Ok((mut visibility, transform)) = displays.get_mut(panel) else {
        warn!("Panel {:?} has no visibility, cannot show it", panel);
        return;
    };

    *visibility = Visibility::Visible;
    match (transform, viewer) {
        (Some(mut transform), Some(viewer)) => {
            place_in_front(&mut transform, viewer, distance, vertical_offset);
        }
        (_, None) => warn!("No viewer to place panel {:?} against", panel),
        _ => {}
    }
}

pub fn hide(displays: &mut DisplayQuery, entity: Entity) {
    if let Ok((mut visibility, _)) = displays.get_mut(entity) {
        *visibility = Visibility::Hidden;
    }
}
