use crate::components::{Quadrant, TileCode};
use crate::grid::Grid;

/// `out[r][c] = grid[r][cols - 1 - c]`.
pub fn mirror_horizontal(grid: &Grid) -> Grid {
    let cols = grid.cols();
    let mut mirrored = Grid::filled(grid.rows(), cols, TileCode::Empty);
    for (row, col, tile) in grid.cells() {
        mirrored.set(row, cols - 1 - col, tile);
    }
    mirrored
}

/// `out[r][c] = grid[rows - 2 - r][c]` for the first `rows - 1` rows. The last
/// source row is left out of the flip and the last output row is blank, so the
/// seam row is not drawn twice.
pub fn mirror_vertical(grid: &Grid) -> Grid {
    let rows = grid.rows();
    let mut mirrored = Grid::filled(rows, grid.cols(), TileCode::Empty);
    for row in 0..rows.saturating_sub(1) {
        for (col, &tile) in grid.row(rows - 2 - row).iter().enumerate() {
            mirrored.set(row, col, tile);
        }
    }
    mirrored
}

/// The four materialized quadrant maps of one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadrantMaps {
    pub top_left: Grid,
    pub top_right: Grid,
    pub bottom_left: Grid,
    pub bottom_right: Grid,
}

impl QuadrantMaps {
    pub fn from_canonical(canonical: &Grid) -> Self {
        let bottom_left = mirror_vertical(canonical);
        Self {
            top_left: canonical.clone(),
            top_right: mirror_horizontal(canonical),
            bottom_right: mirror_horizontal(&bottom_left),
            bottom_left,
        }
    }

    pub fn get(&self, quadrant: Quadrant) -> &Grid {
        match quadrant {
            Quadrant::TopLeft => &self.top_left,
            Quadrant::TopRight => &self.top_right,
            Quadrant::BottomLeft => &self.bottom_left,
            Quadrant::BottomRight => &self.bottom_right,
        }
    }
}
