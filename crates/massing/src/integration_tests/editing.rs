use crate::session::ChangeReason;
use crate::test_harness::TestEditor;

// ====================================================================
// End-to-end edit loop: paint -> notify -> undo/redo
// ====================================================================

#[test]
fn test_paint_commits_and_notifies() {
    let mut editor = TestEditor::new();
    editor.drain_grid_changed();
    editor.paint((1, 1), (2, 3), 4);

    let session = editor.session();
    assert_eq!(session.grid.value_at(1, 1), 4);
    assert_eq!(session.grid.value_at(2, 3), 4);
    assert_eq!(session.grid.value_at(0, 0), 0);

    let changes = editor.drain_grid_changed();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].reason, ChangeReason::Painted);
}

#[test]
fn test_paint_undo_restores_empty_grid() {
    let mut editor = TestEditor::new();
    editor.paint((0, 0), (1, 0), 1);
    assert!(!editor.session().grid.is_empty());

    editor.undo();
    assert!(editor.session().grid.is_empty());

    editor.redo();
    let session = editor.session();
    assert_eq!(session.grid.value_at(0, 0), 1);
    assert_eq!(session.grid.value_at(1, 0), 1);
    assert_eq!(session.grid.occupied().count(), 2);
}

#[test]
fn test_undo_and_redo_fire_notifications() {
    let mut editor = TestEditor::new();
    editor.paint((0, 0), (0, 0), 2);
    editor.drain_grid_changed();

    editor.undo();
    let changes = editor.drain_grid_changed();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].reason, ChangeReason::Undo);

    editor.redo();
    let changes = editor.drain_grid_changed();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].reason, ChangeReason::Redo);
}

#[test]
fn test_undo_at_initial_state_is_silent() {
    let mut editor = TestEditor::new();
    editor.drain_grid_changed();
    editor.undo();
    assert!(editor.drain_grid_changed().is_empty());
    assert!(editor.session().grid.is_empty());
}

#[test]
fn test_new_paint_after_undo_discards_redo() {
    let mut editor = TestEditor::new();
    editor.paint((0, 0), (0, 0), 1);
    editor.paint((1, 0), (1, 0), 2);
    editor.undo();

    editor.paint((2, 0), (2, 0), 3);
    editor.drain_grid_changed();
    editor.redo();
    // Redo past the new edit must be unavailable.
    assert!(editor.drain_grid_changed().is_empty());
    let session = editor.session();
    assert_eq!(session.grid.value_at(2, 0), 3);
    assert_eq!(session.grid.value_at(1, 0), 0);
}

#[test]
fn test_drag_outside_drawable_is_clamped() {
    let mut editor = TestEditor::new();
    let (w, d) = {
        let session = editor.session();
        (session.drawable.width, session.drawable.depth)
    };
    // Aim well past the drawable window on both axes.
    editor.paint((-100, -100), (w as i32 + 100, d as i32 + 100), 1);

    let session = editor.session();
    assert_eq!(session.grid.occupied().count(), w * d);
    assert_eq!(session.grid.value_at(w as i32, 0), 0);
}

#[test]
fn test_stats_refresh_after_paint() {
    use crate::energy::BuildingStats;

    let mut editor = TestEditor::new();
    editor.paint((0, 0), (1, 1), 2);
    editor.tick();
    let stats = *editor.world_mut().resource::<BuildingStats>();
    assert_eq!(stats.footprint_cells, 4);
    assert!(stats.annual_energy_kwh > 0.0);
}

#[test]
fn test_template_apply_is_undoable() {
    use crate::energy::TemplateApplyRequested;

    let mut editor = TestEditor::new();
    editor.paint((5, 5), (6, 6), 9);
    editor
        .world_mut()
        .send_event(TemplateApplyRequested { target_kwh: 60_000.0 });
    editor.tick();

    let session = editor.session();
    assert!(session.grid.value_at(0, 0) > 0);
    // The previous mass was cleared by the template.
    assert_eq!(session.grid.value_at(6, 6), 0);

    editor.undo();
    assert_eq!(editor.session().grid.value_at(6, 6), 9);
}
