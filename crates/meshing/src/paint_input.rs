//! Pointer plumbing for the paint tool: cursor-to-ground projection, the
//! drag life cycle, and story selection.
//!
//! The drag state is transient. Only a pointer release commits anything;
//! Escape, right-click, or losing the cursor abandons the gesture and
//! leaves the grid and history untouched.

use bevy::prelude::*;

use massing::grid::StoryGrid;
use massing::keybindings::KeyBinding;
use massing::paint::PaintCommitted;
use massing::session::{ChangeReason, GridChanged, MassingSession};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Cursor position projected onto the ground plane, in the grid's local
/// frame (world XZ).
#[derive(Resource, Default)]
pub struct CursorGroundPos {
    pub world: Vec2,
    pub cell: (i32, i32),
    pub valid: bool,
}

/// The story value the next paint writes. 0 erases.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryBrush {
    pub stories: u8,
}

impl Default for StoryBrush {
    fn default() -> Self {
        Self { stories: 1 }
    }
}

/// Transient state of one drag gesture.
#[derive(Resource, Default)]
pub struct PaintDrag {
    pub active: bool,
    pub start_world: Vec2,
    pub current_world: Vec2,
}

impl PaintDrag {
    /// Normalized (min, max) world rectangle of the current drag.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (
            self.start_world.min(self.current_world),
            self.start_world.max(self.current_world),
        )
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Project the window cursor through the camera onto the ground plane.
pub fn update_cursor_ground_pos(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut cursor: ResMut<CursorGroundPos>,
) {
    cursor.valid = false;
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(screen_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_transform, screen_pos) else {
        return;
    };

    // Ray-plane intersection against the Y=0 ground plane.
    if ray.direction.y.abs() < 0.001 {
        return;
    }
    let t = -ray.origin.y / ray.direction.y;
    if t <= 0.0 {
        return;
    }
    let hit = ray.origin + ray.direction * t;
    cursor.world = Vec2::new(hit.x, hit.z);
    cursor.cell = StoryGrid::world_to_cell(hit.x, hit.z);
    cursor.valid = true;
}

/// Select the brush value with the digit keys; 0 switches to erasing.
pub fn select_story_keys(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut brush: ResMut<StoryBrush>,
) {
    let Some(keys) = keys else { return };
    const DIGITS: [(KeyCode, u8); 10] = [
        (KeyCode::Digit0, 0),
        (KeyCode::Digit1, 1),
        (KeyCode::Digit2, 2),
        (KeyCode::Digit3, 3),
        (KeyCode::Digit4, 4),
        (KeyCode::Digit5, 5),
        (KeyCode::Digit6, 6),
        (KeyCode::Digit7, 7),
        (KeyCode::Digit8, 8),
        (KeyCode::Digit9, 9),
    ];
    for (key, stories) in DIGITS {
        if keys.just_pressed(key) {
            brush.stories = stories;
        }
    }
}

/// Left press over the grid starts a drag.
pub fn paint_drag_start(
    buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorGroundPos>,
    mut drag: ResMut<PaintDrag>,
) {
    if !buttons.just_pressed(MouseButton::Left) || !cursor.valid {
        return;
    }
    drag.active = true;
    drag.start_world = cursor.world;
    drag.current_world = cursor.world;
}

/// Track the cursor while the button is held. Only the preview follows;
/// the grid stays untouched until release.
pub fn paint_drag_update(
    buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorGroundPos>,
    mut drag: ResMut<PaintDrag>,
) {
    if !drag.active || !buttons.pressed(MouseButton::Left) {
        return;
    }
    if cursor.valid {
        drag.current_world = cursor.world;
    }
}

/// Release commits the gesture as a single paint event.
pub fn paint_drag_release(
    buttons: Res<ButtonInput<MouseButton>>,
    brush: Res<StoryBrush>,
    mut drag: ResMut<PaintDrag>,
    mut commits: EventWriter<PaintCommitted>,
) {
    if !drag.active || !buttons.just_released(MouseButton::Left) {
        return;
    }
    drag.active = false;
    commits.send(PaintCommitted {
        start: drag.start_world,
        end: drag.current_world,
        stories: brush.stories,
    });
}

/// Escape or right-click abandons the gesture: no snapshot, no event.
pub fn paint_drag_cancel(
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut drag: ResMut<PaintDrag>,
) {
    if !drag.active {
        return;
    }
    let escape = keys
        .map(|keys| keys.just_pressed(KeyCode::Escape))
        .unwrap_or(false);
    if escape || buttons.just_pressed(MouseButton::Right) {
        drag.active = false;
    }
}

/// Ctrl+N: clear the grid and restart history.
pub fn reset_key(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut session: ResMut<MassingSession>,
    mut changed: EventWriter<GridChanged>,
) {
    let Some(keys) = keys else { return };
    if KeyBinding::ctrl(KeyCode::KeyN).just_pressed(&keys) {
        session.reset();
        changed.send(GridChanged {
            reason: ChangeReason::Reset,
        });
    }
}

/// Grow or shrink the drawable window with `]` and `[`.
pub fn resize_drawable_keys(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut session: ResMut<MassingSession>,
    mut changed: EventWriter<GridChanged>,
) {
    let Some(keys) = keys else { return };
    let step: i32 = if keys.just_pressed(KeyCode::BracketRight) {
        1
    } else if keys.just_pressed(KeyCode::BracketLeft) {
        -1
    } else {
        return;
    };
    let width = (session.drawable.width as i32 + step).max(1) as usize;
    let depth = (session.drawable.depth as i32 + step).max(1) as usize;
    session.resize_drawable(width, depth);
    changed.send(GridChanged {
        reason: ChangeReason::Resized,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_bounds_normalized() {
        let drag = PaintDrag {
            active: true,
            start_world: Vec2::new(5.0, 1.0),
            current_world: Vec2::new(2.0, 4.0),
        };
        let (min, max) = drag.bounds();
        assert_eq!(min, Vec2::new(2.0, 1.0));
        assert_eq!(max, Vec2::new(5.0, 4.0));
    }

    #[test]
    fn test_default_brush_paints_one_story() {
        assert_eq!(StoryBrush::default().stories, 1);
    }

    #[test]
    fn test_cursor_defaults_invalid() {
        let cursor = CursorGroundPos::default();
        assert!(!cursor.valid);
    }

    fn drag_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(massing::MassingPlugin);
        app.init_resource::<PaintDrag>();
        app.init_resource::<StoryBrush>();
        app.insert_resource(ButtonInput::<MouseButton>::default());
        app.insert_resource(ButtonInput::<KeyCode>::default());
        app.add_systems(Update, (paint_drag_cancel, paint_drag_release).chain());
        app
    }

    fn begin_drag(app: &mut App, start: Vec2, end: Vec2) {
        let mut drag = app.world_mut().resource_mut::<PaintDrag>();
        drag.active = true;
        drag.start_world = start;
        drag.current_world = end;
    }

    #[test]
    fn test_cancelled_drag_commits_nothing() {
        let mut app = drag_app();
        begin_drag(&mut app, Vec2::new(0.5, 0.5), Vec2::new(3.5, 3.5));
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        app.update();

        assert!(!app.world().resource::<PaintDrag>().active);
        let session = app.world().resource::<MassingSession>();
        assert!(session.grid.is_empty());
        assert!(!session.history.can_undo());
    }

    #[test]
    fn test_released_drag_commits_once() {
        let mut app = drag_app();
        begin_drag(&mut app, Vec2::new(0.5, 0.5), Vec2::new(1.5, 0.5));
        {
            let mut buttons = app
                .world_mut()
                .resource_mut::<ButtonInput<MouseButton>>();
            buttons.press(MouseButton::Left);
            buttons.release(MouseButton::Left);
        }
        app.update();
        app.update();

        let session = app.world().resource::<MassingSession>();
        assert_eq!(session.grid.value_at(0, 0), 1);
        assert_eq!(session.grid.value_at(1, 0), 1);
        assert!(session.history.can_undo());
    }
}
