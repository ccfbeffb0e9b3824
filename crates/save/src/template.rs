//! Template codec: one grid (dimensions + flat story values) plus a
//! display name per building template. The undo history is session-local
//! and never persisted.

use bitcode::{Decode, Encode};

use massing::config::{GRID_DEPTH, GRID_WIDTH, MAX_STORIES};
use massing::grid::StoryGrid;
use massing::session::MassingSession;

use crate::file_header::{unwrap_header, wrap_with_header, FLAG_COMPRESSED};
use crate::save_error::SaveError;

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct TemplateData {
    pub name: String,
    pub width: u32,
    pub depth: u32,
    pub values: Vec<u8>,
}

impl TemplateData {
    /// Capture the drawable window of a session as a template.
    pub fn from_session(session: &MassingSession) -> Self {
        let width = session.drawable.width;
        let depth = session.drawable.depth;
        Self {
            name: session.template_name.clone(),
            width: width as u32,
            depth: depth as u32,
            values: session.grid.values_in(width, depth),
        }
    }

    /// Validate and build the template grid.
    ///
    /// Dimension/length mismatches and out-of-range values are typed
    /// failures; nothing is truncated or wrapped to fit.
    pub fn to_grid(&self) -> Result<StoryGrid, SaveError> {
        let width = self.width as usize;
        let depth = self.depth as usize;
        if width == 0 || depth == 0 || width > GRID_WIDTH || depth > GRID_DEPTH {
            return Err(SaveError::Malformed(format!(
                "grid dimensions {width}x{depth} outside 1x1..{GRID_WIDTH}x{GRID_DEPTH}"
            )));
        }
        if let Some(&bad) = self.values.iter().find(|&&v| v > MAX_STORIES) {
            return Err(SaveError::Malformed(format!(
                "story value {bad} exceeds maximum {MAX_STORIES}"
            )));
        }
        Ok(StoryGrid::from_values(width, depth, &self.values)?)
    }
}

/// Encode a template to its on-disk representation:
/// bitcode -> lz4 -> header (magic, version, checksum).
pub fn encode_template(template: &TemplateData) -> Vec<u8> {
    let raw = bitcode::encode(template);
    let compressed = lz4_flex::compress_prepend_size(&raw);
    wrap_with_header(&compressed, raw.len() as u32, FLAG_COMPRESSED)
}

/// Decode and validate a template from on-disk bytes.
pub fn decode_template(bytes: &[u8]) -> Result<TemplateData, SaveError> {
    let (header, payload) = unwrap_header(bytes)?;
    let raw = if header.flags & FLAG_COMPRESSED != 0 {
        lz4_flex::decompress_size_prepended(payload)
            .map_err(|e| SaveError::Decode(e.to_string()))?
    } else {
        payload.to_vec()
    };
    let template: TemplateData = bitcode::decode(&raw)?;
    // Surface malformed grids at decode time, before a session touches it.
    template.to_grid()?;
    Ok(template)
}
