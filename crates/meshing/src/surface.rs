//! Surface extraction: per story level, one top quad per matching cell
//! and one vertical wall quad per exposed cardinal drop.
//!
//! Adjacent coplanar quads are never merged. Downstream consumers rely on
//! one quad per exposed face for per-cell picking and highlighting, so a
//! minimal mesh here would be a contract break, not an optimization.

use massing::config::{CELL_SIZE, FLOOR_HEIGHT};
use massing::grid::StoryGrid;
use massing::neighbors::edge_drops;
use massing::session::DrawableArea;

use crate::mesh_data::MeshData;

/// Default margin each underside tile is inset by, so tiles read as
/// separated when viewed from below.
pub const DEFAULT_UNDERSIDE_INSET: f32 = 0.05 * CELL_SIZE;

/// Height offset of the underside above the ground plane.
pub const UNDERSIDE_LIFT: f32 = 0.01;

/// Whether mesh iteration covers the drawable window or the full grid
/// allocation. The two modes can disagree about walls at the drawable
/// boundary, so every extractor takes this explicitly; there is no
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimOverflow {
    /// Iterate only the user-visible drawable area.
    DrawableArea,
    /// Iterate the whole allocated grid.
    FullGrid,
}

fn iter_bounds(grid: &StoryGrid, drawable: &DrawableArea, trim: TrimOverflow) -> (usize, usize) {
    match trim {
        TrimOverflow::DrawableArea => (drawable.width, drawable.depth),
        TrimOverflow::FullGrid => (grid.width, grid.depth),
    }
}

/// Extract the top/side surface mesh for one story level.
///
/// Returns `None` if a cell inside the iteration bounds is missing:
/// partial geometry is worse than no geometry for a level, so the whole
/// level aborts and the caller records the failure.
pub fn extract_surface(
    grid: &StoryGrid,
    drawable: &DrawableArea,
    level: u8,
    trim: TrimOverflow,
) -> Option<MeshData> {
    let (width, depth) = iter_bounds(grid, drawable, trim);
    let mut mesh = MeshData::new();
    let top = level as f32 * FLOOR_HEIGHT;

    for y in 0..depth as i32 {
        for x in 0..width as i32 {
            let cell = grid.get(x, y)?;
            if cell.value != level {
                continue;
            }

            let x0 = x as f32 * CELL_SIZE;
            let x1 = x0 + CELL_SIZE;
            let z0 = y as f32 * CELL_SIZE;
            let z1 = z0 + CELL_SIZE;

            mesh.add_quad(
                [[x0, top, z0], [x0, top, z1], [x1, top, z1], [x1, top, z0]],
                [0.0, 1.0, 0.0],
            );

            // Walls: top (-z), right (+x), bottom (+z), left (-x).
            let drops = edge_drops(grid, x, y);
            for (dir, &drop) in drops.iter().enumerate() {
                if drop == 0 {
                    continue;
                }
                let bottom = top - drop as f32 * FLOOR_HEIGHT;
                match dir {
                    0 => mesh.add_quad(
                        [
                            [x1, bottom, z0],
                            [x0, bottom, z0],
                            [x0, top, z0],
                            [x1, top, z0],
                        ],
                        [0.0, 0.0, -1.0],
                    ),
                    1 => mesh.add_quad(
                        [
                            [x1, bottom, z1],
                            [x1, bottom, z0],
                            [x1, top, z0],
                            [x1, top, z1],
                        ],
                        [1.0, 0.0, 0.0],
                    ),
                    2 => mesh.add_quad(
                        [
                            [x0, bottom, z1],
                            [x1, bottom, z1],
                            [x1, top, z1],
                            [x0, top, z1],
                        ],
                        [0.0, 0.0, 1.0],
                    ),
                    _ => mesh.add_quad(
                        [
                            [x0, bottom, z0],
                            [x0, bottom, z1],
                            [x0, top, z1],
                            [x0, top, z0],
                        ],
                        [-1.0, 0.0, 0.0],
                    ),
                }
            }
        }
    }
    Some(mesh)
}

/// Extract the underside mesh for one story level: the same cell walk as
/// the surface, but every quad sits just above the ground, faces down,
/// and is inset by `inset` on all sides.
pub fn extract_underside(
    grid: &StoryGrid,
    drawable: &DrawableArea,
    level: u8,
    trim: TrimOverflow,
    inset: f32,
) -> Option<MeshData> {
    let (width, depth) = iter_bounds(grid, drawable, trim);
    let mut mesh = MeshData::new();
    let inset = inset.clamp(0.0, CELL_SIZE * 0.5);

    for y in 0..depth as i32 {
        for x in 0..width as i32 {
            let cell = grid.get(x, y)?;
            if cell.value != level {
                continue;
            }

            let x0 = x as f32 * CELL_SIZE + inset;
            let x1 = (x + 1) as f32 * CELL_SIZE - inset;
            let z0 = y as f32 * CELL_SIZE + inset;
            let z1 = (y + 1) as f32 * CELL_SIZE - inset;

            mesh.add_quad(
                [
                    [x0, UNDERSIDE_LIFT, z0],
                    [x1, UNDERSIDE_LIFT, z0],
                    [x1, UNDERSIDE_LIFT, z1],
                    [x0, UNDERSIDE_LIFT, z1],
                ],
                [0.0, -1.0, 0.0],
            );
        }
    }
    Some(mesh)
}
