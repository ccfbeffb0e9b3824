//! # TestEditor: headless integration test harness
//!
//! Wraps `bevy::app::App` + `MassingPlugin` for driving the edit loop
//! without a window or renderer: send the same events the input layer
//! would, tick, and assert on the resulting session state.

use bevy::app::App;
use bevy::prelude::*;

use crate::history::{RedoRequested, UndoRequested};
use crate::paint::PaintCommitted;
use crate::session::{GridChanged, MassingSession};
use crate::MassingPlugin;

pub struct TestEditor {
    app: App,
}

impl Default for TestEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEditor {
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(MassingPlugin);
        // One update so Startup systems and event registration settle.
        app.update();
        Self { app }
    }

    /// Paint a cell rectangle (inclusive corners) to `stories` by sending
    /// the same commit event a pointer release would.
    pub fn paint(&mut self, min: (i32, i32), max: (i32, i32), stories: u8) -> &mut Self {
        self.app.world_mut().send_event(PaintCommitted {
            start: Vec2::new(min.0 as f32 + 0.5, min.1 as f32 + 0.5),
            end: Vec2::new(max.0 as f32 + 0.5, max.1 as f32 + 0.5),
            stories,
        });
        self.app.update();
        self
    }

    pub fn undo(&mut self) -> &mut Self {
        self.app.world_mut().send_event(UndoRequested);
        self.app.update();
        self
    }

    pub fn redo(&mut self) -> &mut Self {
        self.app.world_mut().send_event(RedoRequested);
        self.app.update();
        self
    }

    pub fn tick(&mut self) -> &mut Self {
        self.app.update();
        self
    }

    pub fn session(&self) -> &MassingSession {
        self.app.world().resource::<MassingSession>()
    }

    pub fn session_mut(&mut self) -> Mut<'_, MassingSession> {
        self.app.world_mut().resource_mut::<MassingSession>()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Drain and count `GridChanged` events currently queued.
    pub fn drain_grid_changed(&mut self) -> Vec<GridChanged> {
        let events = self
            .app
            .world_mut()
            .resource_mut::<Events<GridChanged>>()
            .drain()
            .collect();
        events
    }
}
