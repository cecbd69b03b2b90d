//! Rotation inference for wall-like tiles.
//!
//! Every rotation is decided in canonical (top-left) space from the four-neighbour
//! wall mask. Mirrored quadrants look up their canonical twin and reuse its rotation
//! verbatim; the quadrant's parent flip does the visual mirroring.

use log::debug;

use crate::components::{Quadrant, Rotation, TileCode};
use crate::grid::{Grid, NeighborMask};

const R0: Option<Rotation> = Some(Rotation::Deg0);
const R90: Option<Rotation> = Some(Rotation::Deg90);
const R180: Option<Rotation> = Some(Rotation::Deg180);
const R270: Option<Rotation> = Some(Rotation::Deg270);
const NONE: Option<Rotation> = None;

// Index = mask bits: top 1, bottom 2, left 4, right 8.

/// Outer and inner corners. Dead ends and elbows point along the open side; a
/// three-way corner reuses the dead-end value of its missing side, except that a
/// missing right side maps to 270 rather than 180.
pub const CORNER_TABLE: [Option<Rotation>; 16] = [
    NONE, // none
    R90,  // T
    R270, // B
    NONE, // T B
    R0,   // L
    R180, // T L
    R270, // B L
    R270, // T B L  (missing R)
    R180, // R
    R90,  // T R
    R0,   // B R
    R0,   // T B R  (missing L)
    NONE, // L R
    R270, // T L R  (missing B)
    R90,  // B L R  (missing T)
    NONE, // all four, left to the junction override
];

/// Straight walls: 0 runs vertically, 90 runs horizontally.
pub const WALL_TABLE: [Option<Rotation>; 16] = [
    NONE, // none
    R0,   // T
    R0,   // B
    R0,   // T B
    R90,  // L
    R0,   // T L
    R90,  // B L
    R0,   // T B L
    R90,  // R
    R90,  // T R
    R0,   // B R
    R0,   // T B R
    R90,  // L R
    R90,  // T L R
    R90,  // B L R
    R0,   // all four
];

/// T-junctions only match exact three-way patterns.
pub const T_JUNCTION_TABLE: [Option<Rotation>; 16] = [
    NONE, // none
    NONE, // T
    NONE, // B
    NONE, // T B
    NONE, // L
    NONE, // T L
    NONE, // B L
    R270, // T B L
    NONE, // R
    NONE, // T R
    NONE, // B R
    R90,  // T B R
    NONE, // L R
    R0,   // T L R
    R180, // B L R
    NONE, // all four
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub rotation: Rotation,
    /// No rule matched and the 0° default was used.
    pub fallback: bool,
}

impl Resolution {
    fn matched(rotation: Rotation) -> Self {
        Self {
            rotation,
            fallback: false,
        }
    }

    fn from_rule(rule: Option<Rotation>) -> Self {
        match rule {
            Some(rotation) => Self::matched(rotation),
            None => Self {
                rotation: Rotation::Deg0,
                fallback: true,
            },
        }
    }
}

/// Maps a cell of a mirrored quadrant back to its canonical coordinate.
pub fn map_to_canonical(
    quadrant: Quadrant,
    row: isize,
    col: isize,
    rows: usize,
    cols: usize,
) -> (isize, isize) {
    let flip_row = |r: isize| rows as isize - 2 - r;
    let flip_col = |c: isize| cols as isize - 1 - c;
    match quadrant {
        Quadrant::TopLeft => (row, col),
        Quadrant::TopRight => (row, flip_col(col)),
        Quadrant::BottomLeft => (flip_row(row), col),
        Quadrant::BottomRight => (flip_row(row), flip_col(col)),
    }
}

pub fn corner_rotation(mask: NeighborMask) -> Option<Rotation> {
    CORNER_TABLE[mask.index()]
}

pub fn wall_rotation(mask: NeighborMask) -> Option<Rotation> {
    WALL_TABLE[mask.index()]
}

pub fn t_junction_rotation(mask: NeighborMask) -> Option<Rotation> {
    T_JUNCTION_TABLE[mask.index()]
}

/// Exit walls are drawn a quarter turn from ordinary walls when they touch a
/// single neighbour.
pub fn exit_wall_override(mask: NeighborMask) -> Option<Rotation> {
    if mask.count() != 1 {
        return None;
    }
    if mask.has_top() || mask.has_bottom() {
        Some(Rotation::Deg90)
    } else {
        Some(Rotation::Deg0)
    }
}

fn base_rotation(tile: TileCode, mask: NeighborMask) -> Option<Rotation> {
    match tile {
        TileCode::OuterCorner | TileCode::InnerCorner => corner_rotation(mask),
        TileCode::OuterWall | TileCode::InnerWall | TileCode::ExitWall => wall_rotation(mask),
        TileCode::TJunction => t_junction_rotation(mask),
        TileCode::Empty | TileCode::SmallPellet | TileCode::PowerPellet => R0,
    }
}

fn inner_wall_rotation(grid: &Grid, row: isize, col: isize) -> Option<Rotation> {
    if grid.tile_at(row, col) != TileCode::InnerWall {
        return None;
    }
    Some(wall_rotation(grid.neighbor_mask(row, col)).unwrap_or(Rotation::Deg0))
}

/// Breaks the tie for an inner corner walled on all four sides by looking at how
/// the neighbouring inner walls run. Pairs are tried in a fixed order; a pair only
/// counts when both of its tiles are inner walls.
pub fn four_way_corner_rotation(grid: &Grid, row: isize, col: isize) -> Option<Rotation> {
    use Rotation::{Deg0, Deg90};

    let top = inner_wall_rotation(grid, row - 1, col);
    let bottom = inner_wall_rotation(grid, row + 1, col);
    let left = inner_wall_rotation(grid, row, col - 1);
    let right = inner_wall_rotation(grid, row, col + 1);

    // (first, second, rotation when first=0/second=90, rotation when first=90/second=0)
    let pairs = [
        (top, right, Deg90, Deg0),
        (left, bottom, Deg0, Deg90),
        (bottom, right, Deg0, Deg90),
        (top, left, Deg90, Deg0),
    ];
    pairs.into_iter().find_map(|(a, b, vertical_first, horizontal_first)| match (a?, b?) {
        (Deg0, Deg90) => Some(vertical_first),
        (Deg90, Deg0) => Some(horizontal_first),
        _ => None,
    })
}

/// Resolves the rotation of `tile` at `(row, col)` of `quadrant`, consulting the
/// canonical grid only.
pub fn resolve(
    canonical: &Grid,
    row: isize,
    col: isize,
    tile: TileCode,
    quadrant: Quadrant,
) -> Resolution {
    let (row, col) = map_to_canonical(quadrant, row, col, canonical.rows(), canonical.cols());
    let mask = canonical.neighbor_mask(row, col);

    let rule = match tile {
        TileCode::InnerCorner if mask.is_full() => four_way_corner_rotation(canonical, row, col),
        TileCode::ExitWall if mask.count() == 1 => exit_wall_override(mask),
        _ => base_rotation(tile, mask),
    };

    let resolution = Resolution::from_rule(rule);
    if resolution.fallback {
        debug!(
            "no rotation rule for {tile:?} with neighbours {:04b} at canonical ({row}, {col}), using 0",
            mask.bits()
        );
    }
    resolution
}

pub fn resolve_rotation(
    canonical: &Grid,
    row: isize,
    col: isize,
    tile: TileCode,
    quadrant: Quadrant,
) -> Rotation {
    resolve(canonical, row, col, tile, quadrant).rotation
}
