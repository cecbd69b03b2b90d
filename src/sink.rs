use crate::components::{Orientation, PelletKind, TileCode};
use crate::placer::{Layer, WorldPos};

/// The renderer / scene graph that receives a generated level.
pub trait LevelSink {
    fn place_floor(&mut self, position: WorldPos, layer: Layer);
    fn place_wall_sprite(
        &mut self,
        tile: TileCode,
        position: WorldPos,
        orientation: Orientation,
        layer: Layer,
    );
    fn place_collectible(&mut self, kind: PelletKind, position: WorldPos, layer: Layer);
    /// Releases everything placed by the previous generation pass.
    fn destroy_generated_level(&mut self);
    fn set_camera_view_size(&mut self, half_height: f32);
    fn viewport_aspect_ratio(&self) -> f32;
    fn set_static_level_visible(&mut self, visible: bool);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placed {
    Floor {
        position: WorldPos,
        layer: Layer,
    },
    Sprite {
        tile: TileCode,
        position: WorldPos,
        orientation: Orientation,
        layer: Layer,
    },
    Collectible {
        kind: PelletKind,
        position: WorldPos,
        layer: Layer,
    },
}

/// Headless sink that keeps what it is given.
#[derive(Debug, Clone)]
pub struct PlacementRecorder {
    pub placed: Vec<Placed>,
    pub view_half_height: Option<f32>,
    pub aspect: f32,
    pub static_level_visible: bool,
    pub teardowns: usize,
}

impl PlacementRecorder {
    pub fn new(aspect: f32) -> Self {
        Self {
            placed: Vec::new(),
            view_half_height: None,
            aspect,
            static_level_visible: true,
            teardowns: 0,
        }
    }

    pub fn floors(&self) -> usize {
        self.placed
            .iter()
            .filter(|p| matches!(p, Placed::Floor { .. }))
            .count()
    }

    pub fn sprites(&self) -> usize {
        self.placed
            .iter()
            .filter(|p| matches!(p, Placed::Sprite { .. }))
            .count()
    }

    pub fn collectibles(&self, kind: PelletKind) -> usize {
        self.placed
            .iter()
            .filter(|p| matches!(p, Placed::Collectible { kind: k, .. } if *k == kind))
            .count()
    }
}

impl Default for PlacementRecorder {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl LevelSink for PlacementRecorder {
    fn place_floor(&mut self, position: WorldPos, layer: Layer) {
        self.placed.push(Placed::Floor { position, layer });
    }

    fn place_wall_sprite(
        &mut self,
        tile: TileCode,
        position: WorldPos,
        orientation: Orientation,
        layer: Layer,
    ) {
        self.placed.push(Placed::Sprite {
            tile,
            position,
            orientation,
            layer,
        });
    }

    fn place_collectible(&mut self, kind: PelletKind, position: WorldPos, layer: Layer) {
        self.placed.push(Placed::Collectible {
            kind,
            position,
            layer,
        });
    }

    fn destroy_generated_level(&mut self) {
        self.placed.clear();
        self.view_half_height = None;
        self.teardowns += 1;
    }

    fn set_camera_view_size(&mut self, half_height: f32) {
        self.view_half_height = Some(half_height);
    }

    fn viewport_aspect_ratio(&self) -> f32 {
        self.aspect
    }

    fn set_static_level_visible(&mut self, visible: bool) {
        self.static_level_visible = visible;
    }
}
