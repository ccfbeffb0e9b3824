use std::path::PathBuf;

use bevy::prelude::*;

use massing::keybindings::KeyBinding;
use massing::session::{ChangeReason, GridChanged, MassingSession};
use massing::MassingSet;

pub mod atomic_write;
pub mod file_header;
pub mod save_error;
pub mod template;

use save_error::SaveError;
use template::{decode_template, encode_template, TemplateData};

/// Default quick-save location, relative to the working directory.
pub const QUICK_SAVE_PATH: &str = "templates/quick.mass";

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Event, Debug, Clone)]
pub struct SaveTemplateRequested {
    pub path: PathBuf,
}

#[derive(Event, Debug, Clone)]
pub struct LoadTemplateRequested {
    pub path: PathBuf,
}

// ---------------------------------------------------------------------------
// Save / load
// ---------------------------------------------------------------------------

/// Write the session's drawable window to disk.
pub fn save_template_to(path: &std::path::Path, session: &MassingSession) -> Result<(), SaveError> {
    let template = TemplateData::from_session(session);
    let bytes = encode_template(&template);
    atomic_write::atomic_write(path, &bytes)?;
    Ok(())
}

/// Read and validate a template from disk.
pub fn load_template_from(path: &std::path::Path) -> Result<TemplateData, SaveError> {
    let bytes = std::fs::read(path)?;
    decode_template(&bytes)
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Ctrl+S / Ctrl+L quick save and load.
///
/// Uses `Option<Res<...>>` so the system is a no-op in headless tests.
pub fn quick_save_load_keys(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut save_events: EventWriter<SaveTemplateRequested>,
    mut load_events: EventWriter<LoadTemplateRequested>,
) {
    let Some(keys) = keys else { return };
    if KeyBinding::ctrl(KeyCode::KeyS).just_pressed(&keys) {
        save_events.send(SaveTemplateRequested {
            path: PathBuf::from(QUICK_SAVE_PATH),
        });
    }
    if KeyBinding::ctrl(KeyCode::KeyL).just_pressed(&keys) {
        load_events.send(LoadTemplateRequested {
            path: PathBuf::from(QUICK_SAVE_PATH),
        });
    }
}

pub fn handle_save_requests(
    mut events: EventReader<SaveTemplateRequested>,
    session: Res<MassingSession>,
) {
    for request in events.read() {
        match save_template_to(&request.path, &session) {
            Ok(()) => info!("saved template to {}", request.path.display()),
            Err(e) => warn!("failed to save template to {}: {e}", request.path.display()),
        }
    }
}

/// Load requests replace the session wholesale. A failed load leaves the
/// session exactly as it was.
pub fn handle_load_requests(
    mut events: EventReader<LoadTemplateRequested>,
    mut session: ResMut<MassingSession>,
    mut changed: EventWriter<GridChanged>,
) {
    for request in events.read() {
        let template = match load_template_from(&request.path) {
            Ok(template) => template,
            Err(e) => {
                warn!("failed to load template from {}: {e}", request.path.display());
                continue;
            }
        };
        let grid = match template.to_grid() {
            Ok(grid) => grid,
            Err(e) => {
                warn!("failed to load template from {}: {e}", request.path.display());
                continue;
            }
        };
        session.load_template(grid, template.name.clone());
        info!("loaded template '{}' from {}", template.name, request.path.display());
        changed.send(GridChanged {
            reason: ChangeReason::Loaded,
        });
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveTemplateRequested>()
            .add_event::<LoadTemplateRequested>()
            .add_systems(
                Update,
                (
                    quick_save_load_keys,
                    handle_save_requests,
                    handle_load_requests,
                )
                    .chain()
                    .in_set(MassingSet::Mutate),
            );
    }
}
