//! Rectangle painting: converting a drag gesture into a uniform block of
//! story values.
//!
//! Per-frame drag motion only redraws a preview; the grid, the history and
//! the meshes are untouched until the gesture commits. An abandoned drag
//! commits nothing.

use bevy::prelude::*;

use crate::config::CELL_SIZE;
use crate::grid::StoryGrid;
use crate::session::{ChangeReason, DrawableArea, GridChanged, MassingSession};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A finished drag gesture, in the grid's local frame. Sent by the input
/// layer on pointer release; never during the drag.
#[derive(Event, Debug, Clone, Copy)]
pub struct PaintCommitted {
    pub start: Vec2,
    pub end: Vec2,
    pub stories: u8,
}

// ---------------------------------------------------------------------------
// Rect conversion and painting
// ---------------------------------------------------------------------------

/// An inclusive, normalized cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl PaintRect {
    pub fn cell_count(&self) -> usize {
        ((self.max_x - self.min_x + 1) * (self.max_y - self.min_y + 1)) as usize
    }
}

/// What a paint actually did; returned to the caller instead of the core
/// reaching out to listeners itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintedRegion {
    pub rect: PaintRect,
    /// Cells whose stored value actually changed.
    pub cells_changed: usize,
    /// Highest value written (the target, when any cell was in range).
    pub max_value: u8,
}

/// Clamp both drag endpoints to the drawable area, convert to cell
/// coordinates by floor division, and normalize to a min/max rect.
/// Painting can therefore never target cells outside the drawable window.
pub fn drag_to_rect(start: Vec2, end: Vec2, drawable: &DrawableArea) -> PaintRect {
    // Back off the far edge by a sliver of a cell so a point exactly on the
    // boundary still lands in the last cell instead of one past it.
    let margin = CELL_SIZE * 1e-3;
    let limit_x = drawable.width as f32 * CELL_SIZE - margin;
    let limit_y = drawable.depth as f32 * CELL_SIZE - margin;
    let clamp = |p: Vec2| Vec2::new(p.x.clamp(0.0, limit_x), p.y.clamp(0.0, limit_y));

    let (sx, sy) = StoryGrid::world_to_cell(clamp(start).x, clamp(start).y);
    let (ex, ey) = StoryGrid::world_to_cell(clamp(end).x, clamp(end).y);
    PaintRect {
        min_x: sx.min(ex),
        min_y: sy.min(ey),
        max_x: sx.max(ex),
        max_y: sy.max(ey),
    }
}

/// Full commit sequence for one finished gesture: clamp and convert the
/// drag, paint the rect, snapshot the grid.
pub fn commit_paint(
    session: &mut MassingSession,
    start: Vec2,
    end: Vec2,
    stories: u8,
) -> PaintedRegion {
    let rect = drag_to_rect(start, end, &session.drawable);
    let region = paint_rect(&mut session.grid, rect, stories);
    session.history.record(&session.grid);
    region
}

/// Write `stories` into every in-range cell of `rect`.
pub fn paint_rect(grid: &mut StoryGrid, rect: PaintRect, stories: u8) -> PaintedRegion {
    let mut cells_changed = 0;
    let mut max_value = 0;
    for y in rect.min_y..=rect.max_y {
        for x in rect.min_x..=rect.max_x {
            let Some(cell) = grid.get(x, y) else { continue };
            if cell.value != stories {
                cells_changed += 1;
            }
            grid.set_value(x, y, stories);
            max_value = max_value.max(grid.value_at(x, y));
        }
    }
    PaintedRegion {
        rect,
        cells_changed,
        max_value,
    }
}

// ---------------------------------------------------------------------------
// Commit system
// ---------------------------------------------------------------------------

/// Apply committed drags: mutate the grid, snapshot it, and fire the
/// change notification. One event per finished gesture.
pub fn apply_paint(
    mut events: EventReader<PaintCommitted>,
    mut session: ResMut<MassingSession>,
    mut changed: EventWriter<GridChanged>,
) {
    for commit in events.read() {
        let region = commit_paint(&mut session, commit.start, commit.end, commit.stories);
        debug!(
            "painted {} cells to {} ({} changed)",
            region.rect.cell_count(),
            commit.stories,
            region.cells_changed
        );
        changed.send(GridChanged {
            reason: ChangeReason::Painted,
        });
    }
}
