use log::warn;

use crate::components::TileCode;
use crate::error::LevelError;

/// Rectangular tile map, indexed `[row][col]` with row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Vec<TileCode>>,
}

impl Grid {
    /// Builds a grid from authored integer codes. Unknown codes are stored as
    /// `Empty` so they produce floor only.
    pub fn from_codes<R: AsRef<[i32]>>(codes: &[R]) -> Result<Self, LevelError> {
        let mut tiles = Vec::with_capacity(codes.len());
        for (row, line) in codes.iter().enumerate() {
            let mut decoded = Vec::with_capacity(line.as_ref().len());
            for (col, &code) in line.as_ref().iter().enumerate() {
                let tile = TileCode::from_code(code).unwrap_or_else(|| {
                    warn!("unrecognized tile code {code} at ({row}, {col}), placing floor only");
                    TileCode::Empty
                });
                decoded.push(tile);
            }
            tiles.push(decoded);
        }
        Self::from_tiles(tiles)
    }

    pub fn from_tiles(tiles: Vec<Vec<TileCode>>) -> Result<Self, LevelError> {
        let rows = tiles.len();
        let cols = tiles.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(LevelError::EmptyGrid);
        }
        if let Some((row, line)) = tiles.iter().enumerate().find(|(_, l)| l.len() != cols) {
            return Err(LevelError::RaggedGrid {
                row,
                expected: cols,
                found: line.len(),
            });
        }
        Ok(Self { rows, cols, tiles })
    }

    pub fn filled(rows: usize, cols: usize, tile: TileCode) -> Self {
        Self {
            rows,
            cols,
            tiles: vec![vec![tile; cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, row: usize) -> &[TileCode] {
        &self.tiles[row]
    }

    pub fn set(&mut self, row: usize, col: usize, tile: TileCode) {
        self.tiles[row][col] = tile;
    }

    /// Tile at a signed coordinate; anything outside the grid reads as `Empty`.
    pub fn tile_at(&self, row: isize, col: isize) -> TileCode {
        if row < 0 || col < 0 {
            return TileCode::Empty;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.cols {
            return TileCode::Empty;
        }
        self.tiles[row][col]
    }

    /// The boundary is open space, never an implicit wall.
    pub fn is_wall_like(&self, row: isize, col: isize) -> bool {
        self.tile_at(row, col).is_wall_like()
    }

    pub fn neighbor_mask(&self, row: isize, col: isize) -> NeighborMask {
        NeighborMask::from_flags(
            self.is_wall_like(row - 1, col),
            self.is_wall_like(row + 1, col),
            self.is_wall_like(row, col - 1),
            self.is_wall_like(row, col + 1),
        )
    }

    /// Row-major iteration over `(row, col, tile)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, TileCode)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .flat_map(|(r, line)| line.iter().enumerate().map(move |(c, &t)| (r, c, t)))
    }

    pub fn count(&self, pred: impl Fn(TileCode) -> bool) -> usize {
        self.cells().filter(|&(_, _, t)| pred(t)).count()
    }
}

/// Four-neighbour wall adjacency packed into the low four bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NeighborMask(u8);

impl NeighborMask {
    pub const TOP: u8 = 0b0001;
    pub const BOTTOM: u8 = 0b0010;
    pub const LEFT: u8 = 0b0100;
    pub const RIGHT: u8 = 0b1000;

    pub fn from_flags(top: bool, bottom: bool, left: bool, right: bool) -> Self {
        let mut bits = 0;
        if top {
            bits |= Self::TOP;
        }
        if bottom {
            bits |= Self::BOTTOM;
        }
        if left {
            bits |= Self::LEFT;
        }
        if right {
            bits |= Self::RIGHT;
        }
        NeighborMask(bits)
    }

    pub fn from_bits(bits: u8) -> Self {
        NeighborMask(bits & 0b1111)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn has_top(self) -> bool {
        self.0 & Self::TOP != 0
    }

    pub fn has_bottom(self) -> bool {
        self.0 & Self::BOTTOM != 0
    }

    pub fn has_left(self) -> bool {
        self.0 & Self::LEFT != 0
    }

    pub fn has_right(self) -> bool {
        self.0 & Self::RIGHT != 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_full(self) -> bool {
        self.0 == 0b1111
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_as_open_floor() {
        let grid = Grid::from_codes(&[[2]]).unwrap();
        assert_eq!(grid.tile_at(-1, 0), TileCode::Empty);
        assert_eq!(grid.tile_at(0, 1), TileCode::Empty);
        assert!(!grid.is_wall_like(-1, 0));
        assert!(!grid.is_wall_like(1, 0));
        assert!(!grid.is_wall_like(0, -1));
        assert!(!grid.is_wall_like(0, 1));
        assert_eq!(grid.neighbor_mask(0, 0), NeighborMask::default());
    }

    #[test]
    fn mask_sees_only_wall_like_neighbours() {
        let grid = Grid::from_codes(&[[0, 4, 0], [5, 3, 2], [0, 6, 0]]).unwrap();
        let mask = grid.neighbor_mask(1, 1);
        assert!(mask.has_top());
        assert!(mask.has_right());
        assert!(!mask.has_left());
        assert!(!mask.has_bottom());
        assert_eq!(mask.count(), 2);
        assert_eq!(mask.bits(), NeighborMask::TOP | NeighborMask::RIGHT);
    }

    #[test]
    fn unknown_codes_become_empty() {
        let grid = Grid::from_codes(&[[1, 42], [-3, 4]]).unwrap();
        assert_eq!(grid.tile_at(0, 1), TileCode::Empty);
        assert_eq!(grid.tile_at(1, 0), TileCode::Empty);
        assert_eq!(grid.tile_at(1, 1), TileCode::InnerWall);
    }

    #[test]
    fn rejects_ragged_and_empty_maps() {
        let ragged: Vec<Vec<i32>> = vec![vec![1, 2, 2], vec![2, 5]];
        assert_eq!(
            Grid::from_codes(&ragged),
            Err(LevelError::RaggedGrid {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        let empty: Vec<Vec<i32>> = Vec::new();
        assert_eq!(Grid::from_codes(&empty), Err(LevelError::EmptyGrid));
        assert_eq!(Grid::from_codes(&[[0i32; 0]]), Err(LevelError::EmptyGrid));
    }

    #[test]
    fn cells_iterate_row_major() {
        let grid = Grid::from_codes(&[[1, 2], [3, 4]]).unwrap();
        let order: Vec<_> = grid.cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(grid.count(TileCode::is_wall_like), 4);
    }
}
