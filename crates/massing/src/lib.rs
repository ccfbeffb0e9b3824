use bevy::prelude::*;

pub mod bounds;
pub mod config;
pub mod energy;
pub mod grid;
pub mod history;
pub mod keybindings;
pub mod neighbors;
pub mod paint;
pub mod session;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

use energy::BuildingStats;
use session::MassingSession;

/// System sets for ordering against downstream consumers: mutations first,
/// then everything derived from the change notification.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MassingSet {
    /// Paint commits, undo/redo, template application.
    Mutate,
    /// Statistics and other `GridChanged` readers.
    Derive,
}

pub struct MassingPlugin;

impl Plugin for MassingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MassingSession>()
            .init_resource::<BuildingStats>()
            .add_event::<session::GridChanged>()
            .add_event::<paint::PaintCommitted>()
            .add_event::<history::UndoRequested>()
            .add_event::<history::RedoRequested>()
            .add_event::<energy::TemplateApplyRequested>()
            .configure_sets(Update, (MassingSet::Mutate, MassingSet::Derive).chain())
            .add_systems(
                Update,
                (
                    history::keyboard_undo_redo,
                    paint::apply_paint,
                    history::process_undo.after(history::keyboard_undo_redo),
                    history::process_redo.after(history::keyboard_undo_redo),
                    energy::apply_energy_template,
                )
                    .in_set(MassingSet::Mutate),
            )
            .add_systems(Update, energy::refresh_stats.in_set(MassingSet::Derive));
    }
}
