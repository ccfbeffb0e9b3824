//! The editor session: one explicit context owning the active grid, its
//! history, and the drawable area. Every mutation path (paint, undo, redo,
//! resize, load) goes through this resource; there is no ambient "current
//! building" singleton.

use bevy::prelude::*;

use crate::config::{
    DEFAULT_DRAWABLE_DEPTH, DEFAULT_DRAWABLE_WIDTH, GRID_DEPTH, GRID_WIDTH,
};
use crate::grid::StoryGrid;
use crate::history::GridHistory;

// ---------------------------------------------------------------------------
// Change notification
// ---------------------------------------------------------------------------

/// Why the grid changed. Consumers that only care *that* it changed can
/// ignore the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeReason {
    Painted,
    Undo,
    Redo,
    Resized,
    Loaded,
    Reset,
    TemplateApplied,
}

/// Fired exactly once per committed grid mutation. Mesh regeneration and
/// statistics refresh are driven from this, never called directly by the
/// mutation path.
#[derive(Event, Debug, Clone, Copy)]
pub struct GridChanged {
    pub reason: ChangeReason,
}

// ---------------------------------------------------------------------------
// Drawable area
// ---------------------------------------------------------------------------

/// The user-visible paintable window of the grid, anchored at the origin.
/// Always within the hard allocation bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawableArea {
    pub width: usize,
    pub depth: usize,
}

impl DrawableArea {
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            width: width.clamp(1, GRID_WIDTH),
            depth: depth.clamp(1, GRID_DEPTH),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Resource)]
pub struct MassingSession {
    pub grid: StoryGrid,
    pub history: GridHistory,
    pub drawable: DrawableArea,
    pub template_name: String,
}

impl Default for MassingSession {
    fn default() -> Self {
        Self::new(DEFAULT_DRAWABLE_WIDTH, DEFAULT_DRAWABLE_DEPTH)
    }
}

impl MassingSession {
    /// Fresh session: an empty full-allocation grid with the given
    /// drawable window, history seeded with the initial state.
    pub fn new(drawable_width: usize, drawable_depth: usize) -> Self {
        let grid = StoryGrid::new(GRID_WIDTH, GRID_DEPTH);
        let mut history = GridHistory::default();
        history.reset(&grid);
        Self {
            grid,
            history,
            drawable: DrawableArea::new(drawable_width, drawable_depth),
            template_name: String::from("untitled"),
        }
    }

    /// Replace the session state with a loaded template grid. The grid is
    /// expanded to the full allocation; the template's own dimensions
    /// become the drawable window. History restarts at the loaded state.
    pub fn load_template(&mut self, mut grid: StoryGrid, name: String) {
        let drawable = DrawableArea::new(grid.width, grid.depth);
        grid.resize(GRID_WIDTH, GRID_DEPTH);
        self.history.reset(&grid);
        self.grid = grid;
        self.drawable = drawable;
        self.template_name = name;
    }

    /// Move the drawable window. Cells outside the new window keep their
    /// values; whether they still produce geometry depends on the trim
    /// mode the mesh consumer asks for. The grid itself is unchanged, so
    /// no snapshot is recorded.
    pub fn resize_drawable(&mut self, width: usize, depth: usize) {
        self.drawable = DrawableArea::new(width, depth);
    }

    /// Clear the grid back to empty and restart history.
    pub fn reset(&mut self) {
        self.grid = StoryGrid::new(GRID_WIDTH, GRID_DEPTH);
        self.history.reset(&self.grid);
    }

    /// Restore the previous snapshot; `false` when there is none.
    /// The restored grid is an independent copy, so later edits cannot
    /// reach back into the history.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(grid) => {
                self.grid = grid;
                true
            }
            None => false,
        }
    }

    /// Restore the next snapshot; `false` when there is none.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(grid) => {
                self.grid = grid;
                true
            }
            None => false,
        }
    }
}
