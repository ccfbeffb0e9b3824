//! Outline extraction: a decorative silhouette frame built from swept
//! tube segments ("runs") along exposed footprint edges and convex
//! vertical corners.
//!
//! This mesh is a wireframe highlight only. It must never be used as a
//! collision or occlusion surface.

use bevy::prelude::*;

use massing::config::{CELL_SIZE, FLOOR_HEIGHT};
use massing::grid::StoryGrid;
use massing::neighbors::{corner_profile, corner_strut, CornerStrut};
use massing::session::DrawableArea;

use crate::mesh_data::MeshData;
use crate::surface::TrimOverflow;

/// Cross-section of an outline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineStyle {
    /// Number of segments around the tube.
    pub resolution: u32,
    /// Tube radius.
    pub radius: f32,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            resolution: 6,
            radius: 0.02,
        }
    }
}

/// Sweep a tube of quads from `from` to `to`.
///
/// The ring basis is computed from the segment direction crossed with a
/// fixed reference axis (world Y, or world X for vertical runs), so
/// horizontal and vertical runs share one primitive.
pub fn add_run(mesh: &mut MeshData, from: Vec3, to: Vec3, style: &OutlineStyle) {
    let axis = to - from;
    if axis.length_squared() < 1e-12 || style.resolution < 3 {
        return;
    }
    let dir = axis.normalize();
    let reference = if dir.y.abs() > 0.9 { Vec3::X } else { Vec3::Y };
    let side = dir.cross(reference).normalize();
    let up = dir.cross(side);

    let base = mesh.positions.len() as u32;
    for step in 0..=style.resolution {
        let angle = step as f32 / style.resolution as f32 * std::f32::consts::TAU;
        let radial = side * angle.cos() + up * angle.sin();
        let offset = radial * style.radius;

        let a = from + offset;
        let b = to + offset;
        mesh.positions.push([a.x, a.y, a.z]);
        mesh.normals.push([radial.x, radial.y, radial.z]);
        mesh.uvs.push([0.0, 0.0]);
        mesh.positions.push([b.x, b.y, b.z]);
        mesh.normals.push([radial.x, radial.y, radial.z]);
        mesh.uvs.push([0.0, 0.0]);
    }
    for step in 0..style.resolution {
        let i0 = base + step * 2;
        let i1 = base + step * 2 + 1;
        let i2 = base + (step + 1) * 2;
        let i3 = base + (step + 1) * 2 + 1;
        mesh.indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
    }
}

/// Extract the outline frame for one story level.
///
/// Per exposed cardinal edge: a horizontal run at the level's top height,
/// plus one at ground level when the drop reaches all the way down. Per
/// corner: a vertical run where two adjacent edges both drop, or (with
/// all four edges flush) where a strictly lower diagonal neighbor
/// exposes the corner.
///
/// Same abort contract as the surface extractor: a missing cell inside
/// the iteration bounds returns `None` for the whole level.
pub fn extract_outline(
    grid: &StoryGrid,
    drawable: &DrawableArea,
    level: u8,
    trim: TrimOverflow,
    style: &OutlineStyle,
) -> Option<MeshData> {
    let (width, depth) = match trim {
        TrimOverflow::DrawableArea => (drawable.width, drawable.depth),
        TrimOverflow::FullGrid => (grid.width, grid.depth),
    };
    let mut mesh = MeshData::new();
    let top = level as f32 * FLOOR_HEIGHT;

    for y in 0..depth as i32 {
        for x in 0..width as i32 {
            let cell = grid.get(x, y)?;
            if cell.value != level {
                continue;
            }
            let profile = corner_profile(grid, x, y);

            let x0 = x as f32 * CELL_SIZE;
            let x1 = x0 + CELL_SIZE;
            let z0 = y as f32 * CELL_SIZE;
            let z1 = z0 + CELL_SIZE;

            // Edge endpoints in cardinal order: top, right, bottom, left.
            let edges = [
                (Vec3::new(x0, 0.0, z0), Vec3::new(x1, 0.0, z0)),
                (Vec3::new(x1, 0.0, z0), Vec3::new(x1, 0.0, z1)),
                (Vec3::new(x0, 0.0, z1), Vec3::new(x1, 0.0, z1)),
                (Vec3::new(x0, 0.0, z0), Vec3::new(x0, 0.0, z1)),
            ];
            for (dir, &(from, to)) in edges.iter().enumerate() {
                let drop = profile.drops[dir];
                if drop == 0 {
                    continue;
                }
                add_run(&mut mesh, from.with_y(top), to.with_y(top), style);
                if drop == level {
                    // Neighbor is empty ground: frame the footprint too.
                    add_run(&mut mesh, from, to, style);
                }
            }

            // Corner struts in corner order: top-left, top-right,
            // bottom-right, bottom-left.
            let corners = [
                Vec3::new(x0, 0.0, z0),
                Vec3::new(x1, 0.0, z0),
                Vec3::new(x1, 0.0, z1),
                Vec3::new(x0, 0.0, z1),
            ];
            for (corner, &at) in corners.iter().enumerate() {
                let lower = match corner_strut(&profile, corner, level) {
                    CornerStrut::None => continue,
                    CornerStrut::Convex { drop } => top - drop as f32 * FLOOR_HEIGHT,
                    CornerStrut::Diagonal { neighbor } => neighbor as f32 * FLOOR_HEIGHT,
                };
                add_run(&mut mesh, at.with_y(lower), at.with_y(top), style);
            }
        }
    }
    Some(mesh)
}
