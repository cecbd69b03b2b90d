use std::cmp::Ordering;

use crate::components::{Orientation, PelletKind, Quadrant, TileCode};
use crate::grid::Grid;
use crate::orientation;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Draw ordering for one placement. A higher `sort_order` draws on top; within a
/// sort order the smaller `depth` is nearer the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub sort_order: i32,
    pub depth: f32,
}

impl Layer {
    pub const FLOOR: Layer = Layer {
        sort_order: 0,
        depth: 0.0,
    };
    pub const WALL: Layer = Layer {
        sort_order: 0,
        depth: 0.0,
    };
    pub const COLLECTIBLE: Layer = Layer {
        sort_order: 1,
        depth: -1.0,
    };

    /// `Greater` when `self` is drawn over `other`. Equal layers leave the choice to
    /// placement order.
    pub fn draw_order(&self, other: &Layer) -> Ordering {
        self.sort_order
            .cmp(&other.sort_order)
            .then_with(|| other.depth.total_cmp(&self.depth))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visual {
    Floor,
    Sprite(TileCode),
    Collectible(PelletKind),
}

/// One instruction for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub quadrant: Quadrant,
    pub row: usize,
    pub col: usize,
    pub position: WorldPos,
    pub visual: Visual,
    pub orientation: Orientation,
    pub layer: Layer,
}

#[derive(Debug, Clone, Default)]
pub struct QuadrantLayout {
    pub placements: Vec<Placement>,
    pub fallback_rotations: usize,
}

/// Cell-unit offset of a quadrant's (0, 0) cell so the four quadrants meet at the
/// world origin without gaps.
pub fn quadrant_offset(quadrant: Quadrant, rows: usize, cols: usize) -> (f32, f32) {
    let start_x = -(cols as f32) + 0.5;
    let start_y = -(rows as f32) + 0.5;
    let x = if quadrant.is_right() { start_x + cols as f32 } else { start_x };
    let y = if quadrant.is_bottom() { start_y + rows as f32 } else { start_y };
    (x, y)
}

pub fn world_position(row: usize, col: usize, offset: (f32, f32), tile_size: f32) -> WorldPos {
    WorldPos {
        x: (col as f32 + offset.0) * tile_size,
        y: -(row as f32 + offset.1) * tile_size,
    }
}

/// Walks `map` row-major: a floor for every cell, then one sprite or collectible
/// for every non-empty cell.
pub fn place_quadrant(
    canonical: &Grid,
    map: &Grid,
    quadrant: Quadrant,
    tile_size: f32,
) -> QuadrantLayout {
    let offset = quadrant_offset(quadrant, map.rows(), map.cols());
    let mut layout = QuadrantLayout {
        placements: Vec::with_capacity(map.rows() * map.cols() * 2),
        fallback_rotations: 0,
    };

    for (row, col, tile) in map.cells() {
        let position = world_position(row, col, offset, tile_size);
        let base = Placement {
            quadrant,
            row,
            col,
            position,
            visual: Visual::Floor,
            orientation: Orientation::upright(),
            layer: Layer::FLOOR,
        };
        layout.placements.push(base);

        if let Some(kind) = tile.pellet() {
            layout.placements.push(Placement {
                visual: Visual::Collectible(kind),
                layer: Layer::COLLECTIBLE,
                ..base
            });
        } else if tile.is_wall_like() {
            let resolution =
                orientation::resolve(canonical, row as isize, col as isize, tile, quadrant);
            if resolution.fallback {
                layout.fallback_rotations += 1;
            }
            layout.placements.push(Placement {
                visual: Visual::Sprite(tile),
                orientation: Orientation {
                    flip: quadrant.flip(),
                    rotation: resolution.rotation,
                },
                layer: Layer::WALL,
                ..base
            });
        }
    }
    layout
}
