//! Building statistics and the energy-target template search.
//!
//! Statistics are recomputed from the grid after every committed change.
//! The template search is the inverse problem: given a target annual
//! energy figure, find a rectangular footprint and uniform story count
//! whose estimate lands closest to it.

use bevy::prelude::*;

use crate::bounds::{floor_area_m2, volume_m3, BuildingBounds};
use crate::config::{CELL_FLOOR_AREA_M2, ENERGY_INTENSITY_KWH_PER_M2, MAX_STORIES};
use crate::grid::StoryGrid;
use crate::paint::{paint_rect, PaintRect};
use crate::session::{ChangeReason, DrawableArea, GridChanged, MassingSession};

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Derived figures shown alongside the model; refreshed on `GridChanged`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildingStats {
    pub footprint_cells: usize,
    pub floor_area_m2: f32,
    pub volume_m3: f32,
    pub annual_energy_kwh: f32,
    /// Occupied extents; `None` while the grid is empty.
    pub bounds: Option<BuildingBounds>,
}

/// Annual energy estimate for a grid (kWh).
pub fn estimate_energy_kwh(grid: &StoryGrid) -> f32 {
    floor_area_m2(grid) * ENERGY_INTENSITY_KWH_PER_M2
}

pub fn compute_stats(grid: &StoryGrid) -> BuildingStats {
    BuildingStats {
        footprint_cells: grid.occupied().count(),
        floor_area_m2: floor_area_m2(grid),
        volume_m3: volume_m3(grid),
        annual_energy_kwh: estimate_energy_kwh(grid),
        bounds: BuildingBounds::from_grid(grid),
    }
}

pub fn refresh_stats(
    mut events: EventReader<GridChanged>,
    session: Res<MassingSession>,
    mut stats: ResMut<BuildingStats>,
) {
    if events.read().next().is_some() {
        *stats = compute_stats(&session.grid);
    }
}

// ---------------------------------------------------------------------------
// Template search
// ---------------------------------------------------------------------------

/// A rectangular massing template: footprint plus uniform story count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateRect {
    pub width: usize,
    pub depth: usize,
    pub stories: u8,
}

impl TemplateRect {
    pub fn annual_energy_kwh(&self) -> f32 {
        (self.width * self.depth) as f32
            * self.stories as f32
            * CELL_FLOOR_AREA_M2
            * ENERGY_INTENSITY_KWH_PER_M2
    }
}

/// Iteratively search footprints for the template whose energy estimate is
/// closest to `target_kwh`. For each story count the near-square footprint
/// matching the required floor area is tried, clamped to the drawable
/// area. `None` for non-positive targets.
pub fn rect_for_target(target_kwh: f32, drawable: &DrawableArea) -> Option<TemplateRect> {
    if target_kwh <= 0.0 {
        return None;
    }
    let cell_kwh = CELL_FLOOR_AREA_M2 * ENERGY_INTENSITY_KWH_PER_M2;
    let needed_cells = (target_kwh / cell_kwh).max(1.0);

    let mut best: Option<(f32, TemplateRect)> = None;
    for stories in 1..=MAX_STORIES {
        let per_floor = (needed_cells / stories as f32).round().max(1.0) as usize;
        let width = ((per_floor as f32).sqrt().ceil() as usize).clamp(1, drawable.width);
        let depth = (per_floor.div_ceil(width)).clamp(1, drawable.depth);
        let candidate = TemplateRect {
            width,
            depth,
            stories,
        };
        let error = (candidate.annual_energy_kwh() - target_kwh).abs();
        let better = match best {
            Some((best_error, _)) => error < best_error,
            None => true,
        };
        if better {
            best = Some((error, candidate));
        }
    }
    best.map(|(_, rect)| rect)
}

// ---------------------------------------------------------------------------
// Template apply
// ---------------------------------------------------------------------------

/// Request to replace the drawable contents with a template matching the
/// target annual energy.
#[derive(Event, Debug, Clone, Copy)]
pub struct TemplateApplyRequested {
    pub target_kwh: f32,
}

/// Clear the drawable window and stamp `rect` at the origin, as one
/// undoable edit.
pub fn stamp_template(session: &mut MassingSession, rect: TemplateRect) {
    let clear = PaintRect {
        min_x: 0,
        min_y: 0,
        max_x: session.drawable.width as i32 - 1,
        max_y: session.drawable.depth as i32 - 1,
    };
    paint_rect(&mut session.grid, clear, 0);
    let stamp = PaintRect {
        min_x: 0,
        min_y: 0,
        max_x: rect.width as i32 - 1,
        max_y: rect.depth as i32 - 1,
    };
    paint_rect(&mut session.grid, stamp, rect.stories);
    session.history.record(&session.grid);
}

pub fn apply_energy_template(
    mut events: EventReader<TemplateApplyRequested>,
    mut session: ResMut<MassingSession>,
    mut changed: EventWriter<GridChanged>,
) {
    for request in events.read() {
        let Some(rect) = rect_for_target(request.target_kwh, &session.drawable) else {
            warn!("no template for target {} kWh", request.target_kwh);
            continue;
        };
        stamp_template(&mut session, rect);
        info!(
            "applied {}x{}x{} template for target {} kWh (estimate {} kWh)",
            rect.width,
            rect.depth,
            rect.stories,
            request.target_kwh,
            rect.annual_energy_kwh()
        );
        changed.send(GridChanged {
            reason: ChangeReason::TemplateApplied,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_stats_are_zero() {
        let grid = StoryGrid::new(10, 10);
        assert_eq!(compute_stats(&grid), BuildingStats::default());
    }

    #[test]
    fn test_stats_track_painted_mass() {
        let mut grid = StoryGrid::new(10, 10);
        grid.set_value(0, 0, 3);
        grid.set_value(1, 0, 1);
        let stats = compute_stats(&grid);
        assert_eq!(stats.footprint_cells, 2);
        assert_eq!(stats.bounds.unwrap().stories, 3);
        assert!((stats.floor_area_m2 - 4.0 * CELL_FLOOR_AREA_M2).abs() < 1e-3);
        assert!(
            (stats.annual_energy_kwh
                - 4.0 * CELL_FLOOR_AREA_M2 * ENERGY_INTENSITY_KWH_PER_M2)
                .abs()
                < 1e-2
        );
    }

    #[test]
    fn test_rect_search_hits_exact_target() {
        let drawable = DrawableArea::new(20, 14);
        // 12 cells worth of floors fit exactly in several footprints.
        let target = 12.0 * CELL_FLOOR_AREA_M2 * ENERGY_INTENSITY_KWH_PER_M2;
        let rect = rect_for_target(target, &drawable).unwrap();
        assert!((rect.annual_energy_kwh() - target).abs() < 1e-2);
    }

    #[test]
    fn test_rect_search_clamps_to_drawable() {
        let drawable = DrawableArea::new(3, 3);
        // Far more energy than 3x3x9 can represent: best effort, in bounds.
        let rect = rect_for_target(1e9, &drawable).unwrap();
        assert!(rect.width <= 3 && rect.depth <= 3);
        assert_eq!(rect.stories, MAX_STORIES);
    }

    #[test]
    fn test_rect_search_rejects_nonpositive_target() {
        let drawable = DrawableArea::new(10, 10);
        assert!(rect_for_target(0.0, &drawable).is_none());
        assert!(rect_for_target(-5.0, &drawable).is_none());
    }

    #[test]
    fn test_small_target_yields_minimal_block() {
        let drawable = DrawableArea::new(20, 14);
        let rect = rect_for_target(1.0, &drawable).unwrap();
        assert_eq!((rect.width, rect.depth, rect.stories), (1, 1, 1));
    }
}
