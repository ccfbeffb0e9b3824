//! Bounded snapshot history with an undo/redo cursor.
//!
//! Every committed edit deep-copies the grid into a linear snapshot list.
//! Recording after one or more undos truncates the redone branch; at
//! capacity the oldest snapshot is evicted. Undo at the first snapshot and
//! redo at the last are defined no-ops, not errors.

use bevy::prelude::*;

use crate::config::MAX_HISTORY;
use crate::grid::StoryGrid;
use crate::keybindings::KeyBinding;
use crate::session::{ChangeReason, GridChanged, MassingSession};

// ---------------------------------------------------------------------------
// History stack
// ---------------------------------------------------------------------------

/// One recorded grid state plus a monotonically increasing sequence label.
/// Labels are never reused, even across branch truncation.
#[derive(Debug, Clone)]
pub struct GridSnapshot {
    pub grid: StoryGrid,
    pub label: u32,
}

#[derive(Debug, Clone)]
pub struct GridHistory {
    snapshots: Vec<GridSnapshot>,
    cursor: usize,
    capacity: usize,
    next_label: u32,
}

impl Default for GridHistory {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }
}

impl GridHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
            next_label: 0,
        }
    }

    /// Record a deep copy of `grid` as the new head.
    ///
    /// Anything after the cursor (a previously undone branch) is discarded
    /// first; the history is linear, not a tree. At capacity the oldest
    /// snapshot is dropped and the cursor shifts with it, preserving
    /// relative undo depth.
    pub fn record(&mut self, grid: &StoryGrid) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.remove(0);
        }
        self.snapshots.push(GridSnapshot {
            grid: grid.clone(),
            label: self.next_label,
        });
        self.next_label += 1;
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step the cursor back and return an owned copy of that grid.
    /// `None` when already at the oldest snapshot.
    pub fn undo(&mut self) -> Option<StoryGrid> {
        if self.snapshots.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.snapshots[self.cursor].grid.clone())
    }

    /// Step the cursor forward and return an owned copy of that grid.
    /// `None` when already at the newest snapshot.
    pub fn redo(&mut self) -> Option<StoryGrid> {
        if self.snapshots.is_empty() || self.cursor + 1 == self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.snapshots[self.cursor].grid.clone())
    }

    /// Drop everything and record `initial` as the sole snapshot.
    pub fn reset(&mut self, initial: &StoryGrid) {
        self.snapshots.clear();
        self.cursor = 0;
        self.record(initial);
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Sequence label of the snapshot under the cursor.
    pub fn current_label(&self) -> Option<u32> {
        self.snapshots.get(self.cursor).map(|s| s.label)
    }
}

// ---------------------------------------------------------------------------
// Events and systems
// ---------------------------------------------------------------------------

/// Marker event: the user wants to undo.
#[derive(Event)]
pub struct UndoRequested;

/// Marker event: the user wants to redo.
#[derive(Event)]
pub struct RedoRequested;

/// Keyboard listener: Ctrl+Z -> undo, Ctrl+Y / Ctrl+Shift+Z -> redo.
///
/// Uses `Option<Res<...>>` so the system is a no-op in headless tests
/// where Bevy's InputPlugin (and thus ButtonInput<KeyCode>) is not present.
pub fn keyboard_undo_redo(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut undo_events: EventWriter<UndoRequested>,
    mut redo_events: EventWriter<RedoRequested>,
) {
    let Some(keys) = keys else { return };
    let undo = KeyBinding::ctrl(KeyCode::KeyZ);
    let redo_y = KeyBinding::ctrl(KeyCode::KeyY);
    let redo_shift_z = KeyBinding {
        key: KeyCode::KeyZ,
        ctrl: true,
        shift: true,
    };

    // Check the shift variant before plain Ctrl+Z since it is more specific.
    if redo_shift_z.just_pressed(&keys) {
        redo_events.send(RedoRequested);
    } else if undo.just_pressed(&keys) {
        undo_events.send(UndoRequested);
    }

    if redo_y.just_pressed(&keys) {
        redo_events.send(RedoRequested);
    }
}

/// Restore the previous snapshot into the session grid.
pub fn process_undo(
    mut events: EventReader<UndoRequested>,
    mut session: ResMut<MassingSession>,
    mut changed: EventWriter<GridChanged>,
) {
    for _ in events.read() {
        if session.undo() {
            changed.send(GridChanged {
                reason: ChangeReason::Undo,
            });
        }
    }
}

/// Restore the next snapshot into the session grid.
pub fn process_redo(
    mut events: EventReader<RedoRequested>,
    mut session: ResMut<MassingSession>,
    mut changed: EventWriter<GridChanged>,
) {
    for _ in events.read() {
        if session.redo() {
            changed.send(GridChanged {
                reason: ChangeReason::Redo,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_value(v: u8) -> StoryGrid {
        let mut grid = StoryGrid::new(4, 4);
        grid.set_value(0, 0, v);
        grid
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut history = GridHistory::default();
        let before = grid_with_value(1);
        let after = grid_with_value(2);
        history.record(&before);
        history.record(&after);

        let undone = history.undo().unwrap();
        assert_eq!(undone, before);
        let redone = history.redo().unwrap();
        assert_eq!(redone, after);
    }

    #[test]
    fn test_undo_at_oldest_is_noop() {
        let mut history = GridHistory::default();
        history.record(&grid_with_value(1));
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_redo_at_newest_is_noop() {
        let mut history = GridHistory::default();
        history.record(&grid_with_value(1));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_empty_history_noops() {
        let mut history = GridHistory::default();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_after_undo_truncates_branch() {
        let mut history = GridHistory::default();
        history.record(&grid_with_value(1));
        history.record(&grid_with_value(2));
        history.record(&grid_with_value(3));
        history.undo();
        history.undo();
        assert!(history.can_redo());

        history.record(&grid_with_value(9));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        // The discarded branch is gone for good.
        assert_eq!(history.undo().unwrap(), grid_with_value(1));
        assert_eq!(history.redo().unwrap(), grid_with_value(9));
    }

    #[test]
    fn test_capacity_evicts_oldest_and_preserves_depth() {
        let mut history = GridHistory::with_capacity(3);
        // Initial state plus four paints, as the editor would record them.
        history.reset(&grid_with_value(0));
        for v in 1..=4 {
            history.record(&grid_with_value(v));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);

        // Three undos bottom out at the second paint, not the empty grid.
        assert_eq!(history.undo().unwrap(), grid_with_value(3));
        assert_eq!(history.undo().unwrap(), grid_with_value(2));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut history = GridHistory::with_capacity(5);
        for v in 0..50 {
            history.record(&grid_with_value(v % 10));
            assert!(history.len() <= 5);
            assert!(history.cursor() < history.len());
        }
    }

    #[test]
    fn test_reset_records_initial() {
        let mut history = GridHistory::default();
        history.record(&grid_with_value(1));
        history.record(&grid_with_value(2));
        let initial = grid_with_value(7);
        history.reset(&initial);
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_labels_increase_across_truncation() {
        let mut history = GridHistory::default();
        history.record(&grid_with_value(1));
        history.record(&grid_with_value(2));
        let before = history.current_label().unwrap();
        history.undo();
        history.record(&grid_with_value(3));
        assert!(history.current_label().unwrap() > before);
    }

    #[test]
    fn test_snapshots_are_value_copies() {
        let mut history = GridHistory::default();
        let mut grid = grid_with_value(1);
        history.record(&grid);
        grid.set_value(0, 0, 8);
        // Mutating the live grid must not corrupt the recorded snapshot.
        history.record(&grid);
        assert_eq!(history.undo().unwrap(), grid_with_value(1));
    }
}
