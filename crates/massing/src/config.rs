//! Editor-wide constants.

/// Hard upper bound on grid width (cells along world X).
pub const GRID_WIDTH: usize = 100;
/// Hard upper bound on grid depth (cells along world Z).
pub const GRID_DEPTH: usize = 67;

/// Highest paintable story count per cell.
pub const MAX_STORIES: u8 = 9;

/// World-space edge length of one grid cell.
pub const CELL_SIZE: f32 = 1.0;
/// World-space height of one story.
pub const FLOOR_HEIGHT: f32 = 0.3;

/// Maximum number of grid snapshots kept for undo/redo.
pub const MAX_HISTORY: usize = 256;

/// Drawable area used for a fresh, empty session.
pub const DEFAULT_DRAWABLE_WIDTH: usize = 20;
pub const DEFAULT_DRAWABLE_DEPTH: usize = 14;

/// Real-world floor area represented by one cell, one story (m^2).
pub const CELL_FLOOR_AREA_M2: f32 = 25.0;
/// Real-world height of one story (m).
pub const STORY_HEIGHT_M: f32 = 3.0;
/// Annual energy use intensity assumed for massing estimates (kWh / m^2 / yr).
pub const ENERGY_INTENSITY_KWH_PER_M2: f32 = 120.0;
