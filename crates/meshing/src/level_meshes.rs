//! Per-level mesh ownership and regeneration.
//!
//! Every committed grid change rebuilds all nine levels in full. A paint
//! can change neighbor drops on levels it never touched, so incremental
//! updates are not worth their complexity here. Each level owns three
//! independent buffers: surface, outline, underside.

use bevy::prelude::*;

use massing::config::MAX_STORIES;
use massing::grid::StoryGrid;
use massing::session::{DrawableArea, GridChanged, MassingSession};

use crate::mesh_data::MeshData;
use crate::outline::{extract_outline, OutlineStyle};
use crate::surface::{extract_surface, extract_underside, TrimOverflow, DEFAULT_UNDERSIDE_INSET};

// ---------------------------------------------------------------------------
// Mesh set types
// ---------------------------------------------------------------------------

/// The three buffers for one story level. Empty buffers on a failed level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelMeshes {
    pub surface: MeshData,
    pub outline: MeshData,
    pub underside: MeshData,
}

/// Which levels aborted during the last regeneration. A bad level yields
/// no mesh; the rest are unaffected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegenReport {
    pub failed_levels: Vec<u8>,
}

impl RegenReport {
    pub fn all_ok(&self) -> bool {
        self.failed_levels.is_empty()
    }
}

/// Latest derived meshes for all levels, plus the failure report.
#[derive(Resource, Debug, Default)]
pub struct BuildingMeshes {
    pub levels: Vec<LevelMeshes>,
    pub report: RegenReport,
}

impl BuildingMeshes {
    /// Meshes for `level` (1-based); `None` outside 1..=MAX_STORIES.
    pub fn level(&self, level: u8) -> Option<&LevelMeshes> {
        if level == 0 {
            return None;
        }
        self.levels.get(level as usize - 1)
    }
}

// ---------------------------------------------------------------------------
// Regeneration
// ---------------------------------------------------------------------------

/// Rebuild all level meshes from a grid. A level whose extraction aborts
/// contributes empty buffers and an entry in the report.
pub fn regenerate_all(
    grid: &StoryGrid,
    drawable: &DrawableArea,
    trim: TrimOverflow,
    style: &OutlineStyle,
) -> (Vec<LevelMeshes>, RegenReport) {
    let mut levels = Vec::with_capacity(MAX_STORIES as usize);
    let mut report = RegenReport::default();

    for level in 1..=MAX_STORIES {
        let surface = extract_surface(grid, drawable, level, trim);
        let outline = extract_outline(grid, drawable, level, trim, style);
        let underside = extract_underside(grid, drawable, level, trim, DEFAULT_UNDERSIDE_INSET);

        match (surface, outline, underside) {
            (Some(surface), Some(outline), Some(underside)) => levels.push(LevelMeshes {
                surface,
                outline,
                underside,
            }),
            _ => {
                report.failed_levels.push(level);
                levels.push(LevelMeshes::default());
            }
        }
    }
    (levels, report)
}

/// System: rebuild `BuildingMeshes` whenever the grid changed.
pub fn regenerate_on_change(
    mut events: EventReader<GridChanged>,
    session: Res<MassingSession>,
    mut meshes: ResMut<BuildingMeshes>,
) {
    if events.read().next().is_none() {
        return;
    }
    let (levels, report) = regenerate_all(
        &session.grid,
        &session.drawable,
        TrimOverflow::DrawableArea,
        &OutlineStyle::default(),
    );
    if !report.all_ok() {
        warn!("mesh regeneration failed for levels {:?}", report.failed_levels);
    }
    meshes.levels = levels;
    meshes.report = report;
}

// ---------------------------------------------------------------------------
// Renderer-facing entities
// ---------------------------------------------------------------------------

/// Which buffer of a level an entity displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Surface,
    Outline,
    Underside,
}

/// Marker for the persistent mesh entities (9 levels x 3 kinds).
#[derive(Component)]
pub struct LevelMeshTag {
    pub level: u8,
    pub kind: MeshKind,
}

/// Spawn one entity per level and kind, each owning its own mesh asset.
/// The assets start empty and are rewritten in place on regeneration.
pub fn spawn_level_mesh_entities(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let surface_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.92, 0.90, 0.85),
        perceptual_roughness: 0.9,
        ..default()
    });
    let outline_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.12, 0.12, 0.14),
        unlit: true,
        ..default()
    });
    let underside_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.35, 0.38),
        perceptual_roughness: 1.0,
        ..default()
    });

    for level in 1..=MAX_STORIES {
        for kind in [MeshKind::Surface, MeshKind::Outline, MeshKind::Underside] {
            let material = match kind {
                MeshKind::Surface => surface_material.clone(),
                MeshKind::Outline => outline_material.clone(),
                MeshKind::Underside => underside_material.clone(),
            };
            commands.spawn((
                LevelMeshTag { level, kind },
                Mesh3d(meshes.add(MeshData::new().into_mesh())),
                MeshMaterial3d(material),
                Transform::IDENTITY,
            ));
        }
    }
}

/// System: push freshly regenerated buffers into the mesh assets.
pub fn upload_level_meshes(
    building: Res<BuildingMeshes>,
    tagged: Query<(&LevelMeshTag, &Mesh3d)>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !building.is_changed() {
        return;
    }
    for (tag, mesh3d) in &tagged {
        let Some(level) = building.level(tag.level) else {
            continue;
        };
        let data = match tag.kind {
            MeshKind::Surface => level.surface.clone(),
            MeshKind::Outline => level.outline.clone(),
            MeshKind::Underside => level.underside.clone(),
        };
        meshes.insert(mesh3d.0.id(), data.into_mesh());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regenerate_empty_grid() {
        let grid = StoryGrid::new(10, 10);
        let (levels, report) = regenerate_all(
            &grid,
            &DrawableArea::new(10, 10),
            TrimOverflow::DrawableArea,
            &OutlineStyle::default(),
        );
        assert_eq!(levels.len(), MAX_STORIES as usize);
        assert!(report.all_ok());
        assert!(levels.iter().all(|l| l.surface.is_empty()
            && l.outline.is_empty()
            && l.underside.is_empty()));
    }

    #[test]
    fn test_regenerate_populates_only_matching_levels() {
        let mut grid = StoryGrid::new(10, 10);
        grid.set_value(2, 2, 3);
        let (levels, report) = regenerate_all(
            &grid,
            &DrawableArea::new(10, 10),
            TrimOverflow::DrawableArea,
            &OutlineStyle::default(),
        );
        assert!(report.all_ok());
        for (i, level) in levels.iter().enumerate() {
            let expect_mass = i + 1 == 3;
            assert_eq!(!level.surface.is_empty(), expect_mass, "level {}", i + 1);
            assert_eq!(!level.underside.is_empty(), expect_mass);
        }
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let mut grid = StoryGrid::new(10, 10);
        grid.set_value(1, 1, 2);
        grid.set_value(2, 1, 5);
        let drawable = DrawableArea::new(10, 10);
        let a = regenerate_all(
            &grid,
            &drawable,
            TrimOverflow::DrawableArea,
            &OutlineStyle::default(),
        );
        let b = regenerate_all(
            &grid,
            &drawable,
            TrimOverflow::DrawableArea,
            &OutlineStyle::default(),
        );
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
    }

    #[test]
    fn test_failed_level_reported_others_intact() {
        // Drawable larger than the allocation: trimmed iteration probes
        // missing cells, so every level aborts under DrawableArea but
        // regenerates fine under FullGrid.
        let mut grid = StoryGrid::new(4, 4);
        grid.set_value(0, 0, 2);
        let oversized = DrawableArea::new(8, 8);

        let (levels, report) = regenerate_all(
            &grid,
            &oversized,
            TrimOverflow::DrawableArea,
            &OutlineStyle::default(),
        );
        assert!(!report.all_ok());
        assert!(levels.iter().all(|l| l.surface.is_empty()));

        let (levels, report) = regenerate_all(
            &grid,
            &oversized,
            TrimOverflow::FullGrid,
            &OutlineStyle::default(),
        );
        assert!(report.all_ok());
        assert!(!levels[1].surface.is_empty());
    }

    #[test]
    fn test_level_accessor_bounds() {
        let building = BuildingMeshes {
            levels: vec![LevelMeshes::default(); MAX_STORIES as usize],
            report: RegenReport::default(),
        };
        assert!(building.level(0).is_none());
        assert!(building.level(1).is_some());
        assert!(building.level(MAX_STORIES).is_some());
        assert!(building.level(MAX_STORIES + 1).is_none());
    }
}
