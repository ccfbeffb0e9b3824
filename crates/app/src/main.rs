use bevy::prelude::*;
use bevy::window::PresentMode;

use massing::config::{CELL_SIZE, GRID_DEPTH, GRID_WIDTH};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Massing Studio".to_string(),
                resolution: (1280.0, 720.0).into(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((
            massing::MassingPlugin,
            meshing::MeshingPlugin,
            save::SavePlugin,
        ))
        .add_systems(Startup, setup_scene)
        .run();
}

/// Camera, light, and ground plane. The camera frames the default
/// drawable window from the south-east at a sketch-table angle.
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let focus = Vec3::new(10.0 * CELL_SIZE, 0.0, 7.0 * CELL_SIZE);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(focus + Vec3::new(14.0, 18.0, 16.0))
            .looking_at(focus, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::YXZ,
            -0.6,
            -std::f32::consts::FRAC_PI_4,
            0.0,
        )),
    ));

    // Ground plane covering the full grid allocation.
    let ground = meshes.add(
        Plane3d::default()
            .mesh()
            .size(GRID_WIDTH as f32 * CELL_SIZE, GRID_DEPTH as f32 * CELL_SIZE),
    );
    let ground_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.22, 0.24, 0.22),
        perceptual_roughness: 1.0,
        ..default()
    });
    commands.spawn((
        Mesh3d(ground),
        MeshMaterial3d(ground_material),
        Transform::from_xyz(
            GRID_WIDTH as f32 * CELL_SIZE * 0.5,
            -0.001,
            GRID_DEPTH as f32 * CELL_SIZE * 0.5,
        ),
    ));
}
