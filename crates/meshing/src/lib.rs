use bevy::prelude::*;

pub mod drag_preview;
pub mod level_meshes;
pub mod mesh_data;
pub mod outline;
pub mod paint_input;
pub mod surface;

use level_meshes::BuildingMeshes;
use massing::MassingSet;
use paint_input::{CursorGroundPos, PaintDrag, StoryBrush};

pub struct MeshingPlugin;

impl Plugin for MeshingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorGroundPos>()
            .init_resource::<StoryBrush>()
            .init_resource::<PaintDrag>()
            .init_resource::<BuildingMeshes>()
            .add_systems(Startup, level_meshes::spawn_level_mesh_entities)
            .add_systems(
                Update,
                (
                    paint_input::update_cursor_ground_pos,
                    paint_input::select_story_keys,
                    paint_input::paint_drag_start,
                    paint_input::paint_drag_update,
                    paint_input::paint_drag_cancel,
                    paint_input::paint_drag_release,
                    paint_input::reset_key,
                    paint_input::resize_drawable_keys,
                )
                    .chain()
                    .before(MassingSet::Mutate),
            )
            .add_systems(
                Update,
                (
                    level_meshes::regenerate_on_change,
                    level_meshes::upload_level_meshes,
                )
                    .chain()
                    .in_set(MassingSet::Derive),
            )
            .add_systems(
                Update,
                (drag_preview::draw_drag_preview, drag_preview::draw_drawable_frame),
            );
    }
}
