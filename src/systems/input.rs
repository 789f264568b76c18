use crate::components::{InteractableVisualizer, Viewer};
use crate::systems::visualizer::paint_surface;
use bevy::prelude::*;
use rand::Rng;

// Radians per second
const LOOK_SPEED: f32 = 1.5;

pub fn viewer_look_system(
    time: Res<Time>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut Transform, With<Viewer>>,
) {
    if let Ok(mut transform) = query.get_single_mut() {
        let mut yaw = 0.0;

        if keyboard_input.pressed(KeyCode::KeyA) || keyboard_input.pressed(KeyCode::ArrowLeft) {
            yaw += 1.0;
        }

        if keyboard_input.pressed(KeyCode::KeyD) || keyboard_input.pressed(KeyCode::ArrowRight) {
            yaw -= 1.0;
        }

        // Only rotate if there's input
        if yaw != 0.0 {
            transform.rotate_y(yaw * LOOK_SPEED * time.delta_secs());
        }
    }
}

// R gives every interactable a new random resting color
pub fn recolor_items_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut visualizers: Query<(
        &mut InteractableVisualizer,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !keyboard_input.just_pressed(KeyCode::KeyR) {
        return;
    }

    let mut rng = rand::rng();
    for (mut visualizer, surface) in visualizers.iter_mut() {
        let color = Color::hsl(rng.random_range(0.0..360.0), 0.8, 0.5);
        if let Some(color) = visualizer.set_normal_color(color) {
            paint_surface(&mut materials, surface, color);
        }
    }
}
