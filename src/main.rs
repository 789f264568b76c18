use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;
mod components;
mod config;
mod error;
mod events;
mod plugin;
mod resources;
mod systems;

use components::*;
use config::GameConfig;
use error::SetupError;
use plugin::{abort_on_setup_error, FindItemsPlugin};
use resources::{ItemTracker, TrackerPanels};
use systems::input::*;
use systems::interaction::*;
use systems::visualizer::{subscribe_visualizer, unsubscribe_visualizer};

const CONFIG_PATH: &str = "assets/find_items.ron";

fn main() -> AppExit {
    let config = match GameConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return AppExit::error();
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Find the Items".into(),
                resolution: (1024., 768.).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((MeshPickingPlugin, FindItemsPlugin::new(config)))
        .add_systems(Startup, setup_scene.pipe(abort_on_setup_error))
        .add_systems(
            Update,
            (
                viewer_look_system,
                recolor_items_system,
                toggle_interaction_system,
            ),
        )
        .run()
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<GameConfig>,
) -> Result<(), SetupError> {
    // Spawn the viewer at standing eye height
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.6, 0.0).looking_to(Vec3::NEG_Z, Vec3::Y),
        Viewer,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Floor
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(20.0, 20.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.3, 0.35))),
        Transform::default(),
    ));

    // Checklist of items to find, top-left of the screen
    let mut labels = Vec::with_capacity(config.items.len());
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            left: Val::Px(12.0),
            top: Val::Px(12.0),
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("Find:"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
            ));
            for name in &config.items {
                let label = parent
                    .spawn((
                        Text::new(name.clone()),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        Visibility::Inherited,
                    ))
                    .id();
                labels.push(label);
            }
        });

    let panel_mesh = meshes.add(Rectangle::new(0.8, 0.4));
    let win_panel = spawn_panel(
        &mut commands,
        panel_mesh.clone(),
        materials.add(Color::srgb(0.1, 0.7, 0.2)),
        "You found everything!",
    );
    let lose_panel = spawn_panel(
        &mut commands,
        panel_mesh.clone(),
        materials.add(Color::srgb(0.8, 0.1, 0.1)),
        "Time is up!",
    );
    spawn_caption(&mut commands, win_panel, Vec2::new(320.0, 36.0), 28.0);
    spawn_caption(&mut commands, lose_panel, Vec2::new(320.0, 36.0), 28.0);

    // The countdown label stays up for the whole round
    let mut countdown_label = None;
    if config.countdown().is_some() {
        let label = spawn_panel(
            &mut commands,
            meshes.add(Rectangle::new(0.4, 0.1)),
            materials.add(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            "",
        );
        commands.entity(label).insert(Visibility::Visible);
        spawn_caption(&mut commands, label, Vec2::new(200.0, 24.0), 18.0);
        countdown_label = Some(label);
    }

    // Scatter the items around the viewer
    let item_mesh = meshes.add(Cuboid::new(0.3, 0.3, 0.3));
    let notification_mesh = meshes.add(Rectangle::new(0.5, 0.15));
    let palette = config.palette();
    let mut rng = rand::rng();

    for (name, &label) in config.items.iter().zip(&labels) {
        let angle = rng.random_range(0.0..TAU);
        let radius = rng.random_range(2.5..5.0);
        let height = rng.random_range(0.3..2.0);

        let notification_panel = spawn_panel(
            &mut commands,
            notification_mesh.clone(),
            materials.add(Color::srgb(0.9, 0.8, 0.2)),
            "",
        );
        spawn_caption(&mut commands, notification_panel, Vec2::new(280.0, 26.0), 20.0);

        let visualizer = InteractableVisualizer::builder()
            .palette(palette)
            .item(label, name.clone())
            .notification_panel(notification_panel)
            .notification_duration(config.notification_duration())
            .build()?;

        // Each item gets its own material so recoloring stays local
        commands
            .spawn((
                Mesh3d(item_mesh.clone()),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: palette.normal,
                    ..default()
                })),
                Transform::from_xyz(angle.cos() * radius, height, angle.sin() * radius),
                InteractionState::default(),
                visualizer,
                Subscribed,
            ))
            .observe(on_pointer_over)
            .observe(on_pointer_out)
            .observe(on_pointer_down)
            .observe(on_pointer_up);
    }

    let mut tracker = ItemTracker::new(labels);
    if let Some(duration) = config.countdown() {
        tracker = tracker.with_countdown(duration);
    }
    commands.insert_resource(tracker);
    commands.insert_resource(TrackerPanels {
        win_panel: Some(win_panel),
        lose_panel: Some(lose_panel),
        countdown_label,
    });

    info!("Scene ready with {} items to find", config.items.len());
    Ok(())
}

fn spawn_panel(
    commands: &mut Commands,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    text: &str,
) -> Entity {
    commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::default(),
            Visibility::Hidden,
            LabelText(text.to_string()),
        ))
        .id()
}

// Screen-space text drawn over a world-space panel
fn spawn_caption(commands: &mut Commands, panel: Entity, size: Vec2, font_size: f32) {
    commands.spawn((
        Text::default(),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(size.x),
            height: Val::Px(size.y),
            ..default()
        },
        Visibility::Hidden,
        PanelCaption { panel, size },
    ));
}

// P pauses and resumes interaction handling for every item
fn toggle_interaction_system(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    visualizers: Query<(Entity, Has<Subscribed>), With<InteractableVisualizer>>,
) {
    if !keyboard_input.just_pressed(KeyCode::KeyP) {
        return;
    }

    for (entity, subscribed) in visualizers.iter() {
        if subscribed {
            unsubscribe_visualizer(&mut commands, entity);
        } else {
            subscribe_visualizer(&mut commands, entity);
        }
    }
}
