//! Gizmo feedback while painting: the drag rectangle, its hatching, and
//! the drawable-area frame. Redrawn every frame from the transient drag
//! state; nothing here touches the grid or its meshes.

use bevy::prelude::*;

use massing::config::CELL_SIZE;
use massing::session::MassingSession;

use crate::paint_input::{PaintDrag, StoryBrush};

/// Height above the ground plane for preview lines.
const PREVIEW_Y: f32 = 0.02;

/// Outline color of the drag rectangle.
const DRAG_OUTLINE_COLOR: Color = Color::srgba(0.2, 0.8, 1.0, 0.9);

/// Fill hatching color.
const DRAG_FILL_COLOR: Color = Color::srgba(0.2, 0.7, 1.0, 0.25);

/// Erase-mode outline (brush value 0).
const ERASE_OUTLINE_COLOR: Color = Color::srgba(0.9, 0.3, 0.2, 0.9);

/// Drawable-area frame color.
const AREA_FRAME_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.35);

/// Draw the in-progress drag rectangle snapped to cell boundaries.
pub fn draw_drag_preview(
    drag: Res<PaintDrag>,
    brush: Res<StoryBrush>,
    session: Res<MassingSession>,
    mut gizmos: Gizmos,
) {
    if !drag.active {
        return;
    }
    let (min, max) = drag.bounds();

    // Snap outward to whole cells, clamped to the drawable window.
    let limit_x = session.drawable.width as f32 * CELL_SIZE;
    let limit_z = session.drawable.depth as f32 * CELL_SIZE;
    let x0 = (min.x / CELL_SIZE).floor().max(0.0) * CELL_SIZE;
    let z0 = (min.y / CELL_SIZE).floor().max(0.0) * CELL_SIZE;
    let x1 = ((max.x / CELL_SIZE).floor() + 1.0).min(limit_x / CELL_SIZE) * CELL_SIZE;
    let z1 = ((max.y / CELL_SIZE).floor() + 1.0).min(limit_z / CELL_SIZE) * CELL_SIZE;

    let outline = if brush.stories == 0 {
        ERASE_OUTLINE_COLOR
    } else {
        DRAG_OUTLINE_COLOR
    };
    let c0 = Vec3::new(x0, PREVIEW_Y, z0);
    let c1 = Vec3::new(x1, PREVIEW_Y, z0);
    let c2 = Vec3::new(x1, PREVIEW_Y, z1);
    let c3 = Vec3::new(x0, PREVIEW_Y, z1);
    gizmos.line(c0, c1, outline);
    gizmos.line(c1, c2, outline);
    gizmos.line(c2, c3, outline);
    gizmos.line(c3, c0, outline);

    // Hatch along cell rows for fill feedback.
    let mut z = z0 + CELL_SIZE;
    while z < z1 {
        gizmos.line(
            Vec3::new(x0, PREVIEW_Y, z),
            Vec3::new(x1, PREVIEW_Y, z),
            DRAG_FILL_COLOR,
        );
        z += CELL_SIZE;
    }
    let mut x = x0 + CELL_SIZE;
    while x < x1 {
        gizmos.line(
            Vec3::new(x, PREVIEW_Y, z0),
            Vec3::new(x, PREVIEW_Y, z1),
            DRAG_FILL_COLOR,
        );
        x += CELL_SIZE;
    }
}

/// Frame the drawable window so the paintable region is always visible.
pub fn draw_drawable_frame(session: Res<MassingSession>, mut gizmos: Gizmos) {
    let w = session.drawable.width as f32 * CELL_SIZE;
    let d = session.drawable.depth as f32 * CELL_SIZE;
    let c0 = Vec3::new(0.0, PREVIEW_Y, 0.0);
    let c1 = Vec3::new(w, PREVIEW_Y, 0.0);
    let c2 = Vec3::new(w, PREVIEW_Y, d);
    let c3 = Vec3::new(0.0, PREVIEW_Y, d);
    gizmos.line(c0, c1, AREA_FRAME_COLOR);
    gizmos.line(c1, c2, AREA_FRAME_COLOR);
    gizmos.line(c2, c3, AREA_FRAME_COLOR);
    gizmos.line(c3, c0, AREA_FRAME_COLOR);
}
