use std::collections::HashSet;

use log::{info, warn};

use crate::assets::{AssetSlot, AssetTable};
use crate::camera::fit_camera;
use crate::components::Quadrant;
use crate::config::GeneratorConfig;
use crate::grid::Grid;
use crate::mirror::QuadrantMaps;
use crate::placer::{place_quadrant, Placement, Visual};
use crate::sink::LevelSink;

pub const LEVEL_ROWS: usize = 15;
pub const LEVEL_COLS: usize = 14;

/// Top-left quadrant of the maze. The other three are mirrored from it.
pub const LEVEL_MAP: [[i32; LEVEL_COLS]; LEVEL_ROWS] = [
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 7],
    [2, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 4],
    [2, 5, 3, 4, 4, 3, 5, 3, 4, 4, 4, 3, 5, 4],
    [2, 6, 4, 0, 0, 4, 5, 4, 0, 0, 0, 4, 5, 4],
    [2, 5, 3, 4, 4, 3, 5, 3, 4, 4, 4, 3, 5, 3],
    [2, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5],
    [2, 5, 3, 4, 4, 3, 5, 3, 3, 5, 3, 4, 4, 4],
    [2, 5, 3, 4, 4, 3, 5, 4, 4, 5, 3, 4, 4, 3],
    [2, 5, 5, 5, 5, 5, 5, 4, 4, 5, 5, 5, 5, 4],
    [1, 2, 2, 2, 2, 1, 5, 4, 3, 4, 4, 3, 0, 4],
    [0, 0, 0, 0, 0, 2, 5, 4, 3, 4, 4, 3, 0, 3],
    [0, 0, 0, 0, 0, 2, 5, 4, 4, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 2, 5, 4, 4, 0, 3, 4, 4, 8],
    [2, 2, 2, 2, 2, 1, 5, 3, 3, 0, 4, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 4, 0, 0, 0],
];

pub fn canonical_grid() -> Grid {
    Grid::from_codes(&LEVEL_MAP).expect("authored level map is rectangular")
}

/// Totals for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenerationReport {
    pub generation: u64,
    pub floors: usize,
    pub sprites: usize,
    pub collectibles: usize,
    pub skipped_assets: usize,
    pub fallback_rotations: usize,
    pub view_half_height: f32,
}

pub struct LevelGenerator {
    canonical: Grid,
    config: GeneratorConfig,
    assets: AssetTable,
    static_level_visible: bool,
    generation: u64,
}

impl LevelGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_grid(canonical_grid(), config)
    }

    pub fn with_grid(canonical: Grid, config: GeneratorConfig) -> Self {
        Self {
            canonical,
            config,
            assets: AssetTable::standard(),
            static_level_visible: true,
            generation: 0,
        }
    }

    pub fn with_assets(mut self, assets: AssetTable) -> Self {
        self.assets = assets;
        self
    }

    pub fn canonical(&self) -> &Grid {
        &self.canonical
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn static_level_visible(&self) -> bool {
        self.static_level_visible
    }

    /// Scene start: hide the authored fallback level, then build the generated one.
    pub fn start<S: LevelSink + ?Sized>(&mut self, sink: &mut S) -> GenerationReport {
        self.set_static_level_visible(sink, false);
        self.generate_level(sink)
    }

    /// Tears down the previous level and places a fresh one. Always completes.
    pub fn generate_level<S: LevelSink + ?Sized>(&mut self, sink: &mut S) -> GenerationReport {
        sink.destroy_generated_level();
        self.generation += 1;

        let maps = QuadrantMaps::from_canonical(&self.canonical);
        let mut report = GenerationReport {
            generation: self.generation,
            ..GenerationReport::default()
        };
        let mut warned = HashSet::new();

        for quadrant in Quadrant::ALL {
            let layout = place_quadrant(
                &self.canonical,
                maps.get(quadrant),
                quadrant,
                self.config.tile_size,
            );
            report.fallback_rotations += layout.fallback_rotations;
            for placement in &layout.placements {
                self.emit(sink, placement, &mut report, &mut warned);
            }
        }

        report.view_half_height = fit_camera(
            self.canonical.rows(),
            self.canonical.cols(),
            self.config.tile_size,
            sink.viewport_aspect_ratio(),
            self.config.camera_margin,
        );
        sink.set_camera_view_size(report.view_half_height);

        info!(
            "generated level #{}: {} floors, {} sprites, {} collectibles, {} skipped, {} default rotations, view {:.2}",
            report.generation,
            report.floors,
            report.sprites,
            report.collectibles,
            report.skipped_assets,
            report.fallback_rotations,
            report.view_half_height
        );
        report
    }

    fn emit<S: LevelSink + ?Sized>(
        &self,
        sink: &mut S,
        placement: &Placement,
        report: &mut GenerationReport,
        warned: &mut HashSet<AssetSlot>,
    ) {
        let slot = AssetSlot::from(placement.visual);
        if !self.assets.is_assigned(slot) {
            if warned.insert(slot) {
                warn!(
                    "no asset assigned for {slot:?}, skipping those placements ({} at {}, {})",
                    placement.quadrant.name(),
                    placement.row,
                    placement.col
                );
            }
            report.skipped_assets += 1;
            return;
        }

        match placement.visual {
            Visual::Floor => {
                sink.place_floor(placement.position, placement.layer);
                report.floors += 1;
            }
            Visual::Sprite(tile) => {
                sink.place_wall_sprite(
                    tile,
                    placement.position,
                    placement.orientation,
                    placement.layer,
                );
                report.sprites += 1;
            }
            Visual::Collectible(kind) => {
                sink.place_collectible(kind, placement.position, placement.layer);
                report.collectibles += 1;
            }
        }
    }

    pub fn set_static_level_visible<S: LevelSink + ?Sized>(&mut self, sink: &mut S, visible: bool) {
        self.static_level_visible = visible;
        sink.set_static_level_visible(visible);
    }

    pub fn toggle_static_level<S: LevelSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        let visible = !self.static_level_visible;
        self.set_static_level_visible(sink, visible);
        visible
    }
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
