use bevy::prelude::*;

use crate::config::{CELL_FLOOR_AREA_M2, CELL_SIZE, FLOOR_HEIGHT, STORY_HEIGHT_M};
use crate::grid::StoryGrid;

/// Extents derived from the occupied cells of a grid.
///
/// Always recomputed from the grid on demand: the grid can change between
/// queries, so caching a `BuildingBounds` would silently go stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingBounds {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
    /// Tallest story count anywhere in the footprint.
    pub stories: u8,
    /// World-space height of the tallest mass.
    pub height: f32,
    /// World-space center of the occupied footprint at half height.
    pub center: Vec3,
    /// Distance from the center to the furthest occupied corner.
    pub max_corner_distance: f32,
}

impl BuildingBounds {
    /// Scan the grid; `None` when no cell is occupied.
    pub fn from_grid(grid: &StoryGrid) -> Option<Self> {
        let mut min_x = usize::MAX;
        let mut min_y = usize::MAX;
        let mut max_x = 0usize;
        let mut max_y = 0usize;
        let mut stories = 0u8;

        for cell in grid.occupied() {
            min_x = min_x.min(cell.x);
            min_y = min_y.min(cell.y);
            max_x = max_x.max(cell.x);
            max_y = max_y.max(cell.y);
            stories = stories.max(cell.value);
        }
        if stories == 0 {
            return None;
        }

        let height = stories as f32 * FLOOR_HEIGHT;
        let x0 = min_x as f32 * CELL_SIZE;
        let z0 = min_y as f32 * CELL_SIZE;
        let x1 = (max_x + 1) as f32 * CELL_SIZE;
        let z1 = (max_y + 1) as f32 * CELL_SIZE;
        let center = Vec3::new((x0 + x1) * 0.5, height * 0.5, (z0 + z1) * 0.5);
        let corner = Vec3::new(x1, height, z1);

        Some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
            stories,
            height,
            center,
            max_corner_distance: center.distance(corner),
        })
    }

    /// Occupied footprint size in cells.
    pub fn footprint(&self) -> (usize, usize) {
        (self.max_x - self.min_x + 1, self.max_y - self.min_y + 1)
    }
}

/// Total floor area over all cells and stories (m^2).
pub fn floor_area_m2(grid: &StoryGrid) -> f32 {
    grid.occupied().map(|c| c.value as f32).sum::<f32>() * CELL_FLOOR_AREA_M2
}

/// Total enclosed volume (m^3).
pub fn volume_m3(grid: &StoryGrid) -> f32 {
    floor_area_m2(grid) * STORY_HEIGHT_M
}
