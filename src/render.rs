use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::{Orientation, PelletKind, Quadrant, Rotation, TileCode};
use crate::grid::Grid;
use crate::orientation::resolve_rotation;
use crate::placer::{Layer, WorldPos};
use crate::sink::LevelSink;

pub const CELL_W: usize = 2;
const HUD_ROWS: u16 = 2;

/// Which way a straight wall runs on screen.
#[derive(Clone, Copy, PartialEq, Debug)]
enum Run {
    Vertical,
    Horizontal,
}

impl From<Rotation> for Run {
    fn from(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Deg0 | Rotation::Deg180 => Run::Vertical,
            Rotation::Deg90 | Rotation::Deg270 => Run::Horizontal,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Glyph {
    Void,
    Floor,
    OuterCorner,
    InnerCorner,
    OuterWall(Run),
    InnerWall(Run),
    Junction,
    Exit(Run),
    Pellet,
    Power,
}

#[derive(Clone, Copy, PartialEq, Debug)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const VOID: Cell = Cell {
    glyph: Glyph::Void,
    color: Color::Reset,
};

/// The placement currently drawn on one tile.
#[derive(Clone, Copy, Default, Debug)]
struct Stack {
    top: Option<(Layer, Cell)>,
}

impl Stack {
    /// Later placements win ties.
    fn push(&mut self, layer: Layer, cell: Cell) {
        let covered = self
            .top
            .is_some_and(|(top, _)| layer.draw_order(&top) == Ordering::Less);
        if !covered {
            self.top = Some((layer, cell));
        }
    }

    fn cell(&self) -> Cell {
        self.top.map_or(VOID, |(_, cell)| cell)
    }
}

/// Draws a generated level to a terminal, two columns per tile.
pub struct TerminalRenderer<W: Write> {
    out: W,
    tile_size: f32,
    tiles: HashMap<(i64, i64), Stack>,
    static_level: Grid,
    static_visible: bool,
    view_half_height: Option<f32>,
    term_size: (u16, u16),
    last: Vec<Cell>,
    last_hud: String,
    last_shape: (usize, usize),
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, tile_size: f32, static_level: Grid, term_size: (u16, u16)) -> Self {
        Self {
            out,
            tile_size,
            tiles: HashMap::new(),
            static_level,
            static_visible: true,
            view_half_height: None,
            term_size,
            last: Vec::new(),
            last_hud: String::new(),
            last_shape: (0, 0),
            needs_full: true,
            origin_x: 0,
            origin_y: HUD_ROWS,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        if (cols, rows) != self.term_size {
            self.term_size = (cols, rows);
            self.needs_full = true;
        }
    }

    pub fn view_half_height(&self) -> Option<f32> {
        self.view_half_height
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn key(&self, position: WorldPos) -> (i64, i64) {
        (
            (position.x / self.tile_size).floor() as i64,
            (-position.y / self.tile_size).floor() as i64,
        )
    }

    fn place(&mut self, position: WorldPos, layer: Layer, cell: Cell) {
        let key = self.key(position);
        self.tiles.entry(key).or_default().push(layer, cell);
    }

    /// Rasterizes whatever is visible into row-major cells.
    fn frame(&self) -> (usize, usize, Vec<Cell>) {
        if self.static_visible {
            let level = &self.static_level;
            let cells = level
                .cells()
                .map(|(row, col, tile)| {
                    let (r, c) = (row as isize, col as isize);
                    cell_for(tile, resolve_rotation(level, r, c, tile, Quadrant::TopLeft))
                })
                .collect();
            return (self.static_level.cols(), self.static_level.rows(), cells);
        }
        if self.tiles.is_empty() {
            return (0, 0, Vec::new());
        }
        let (mut x0, mut y0, mut x1, mut y1) = (i64::MAX, i64::MAX, i64::MIN, i64::MIN);
        for &(x, y) in self.tiles.keys() {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }
        let width = (x1 - x0 + 1) as usize;
        let height = (y1 - y0 + 1) as usize;
        let mut cells = vec![VOID; width * height];
        for (&(x, y), stack) in &self.tiles {
            let idx = (y - y0) as usize * width + (x - x0) as usize;
            cells[idx] = stack.cell();
        }
        (width, height, cells)
    }

    pub fn draw(&mut self, hud: &str) -> io::Result<()> {
        let (width, height, cells) = self.frame();
        if (width, height) != self.last_shape {
            self.last_shape = (width, height);
            self.last = vec![VOID; width * height];
            self.needs_full = true;
        }

        // oversized maps saturate and fall through to the size message
        let needed_h = u16::try_from(height)
            .unwrap_or(u16::MAX)
            .saturating_add(HUD_ROWS);
        let needed_w = u16::try_from(width.saturating_mul(CELL_W)).unwrap_or(u16::MAX);
        let (term_w, term_h) = self.term_size;

        self.out.queue(MoveTo(0, 0))?;
        if term_w < needed_w || term_h < needed_h {
            self.out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            self.out.queue(Print(msg))?;
            self.out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + HUD_ROWS;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            self.out.queue(Clear(ClearType::All))?;
        }

        if self.needs_full || hud != self.last_hud {
            self.out.queue(MoveTo(self.origin_x, self.origin_y - HUD_ROWS))?;
            self.out.queue(SetForegroundColor(Color::White))?;
            self.out.queue(Clear(ClearType::CurrentLine))?;
            self.out.queue(Print(hud))?;
            self.out.queue(ResetColor)?;
            self.last_hud = hud.to_string();
        }

        for y in 0..height {
            for x in 0..width {
                let idx = y * width + x;
                let cell = cells[idx];
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(x, y, cell)?;
                }
            }
        }
        self.needs_full = false;

        self.out.flush()
    }

    fn draw_cell(&mut self, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Void => "  ",
            Glyph::Floor => "  ",
            Glyph::OuterCorner => "██",
            Glyph::InnerCorner => "▒▒",
            Glyph::OuterWall(Run::Vertical) => "║",
            Glyph::OuterWall(Run::Horizontal) => "══",
            Glyph::InnerWall(Run::Vertical) => "│",
            Glyph::InnerWall(Run::Horizontal) => "──",
            Glyph::Junction => "╬═",
            Glyph::Exit(Run::Vertical) => "┆",
            Glyph::Exit(Run::Horizontal) => "==",
            Glyph::Pellet => "·",
            Glyph::Power => "●",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        self.out.queue(MoveTo(x_pos, y_pos))?;
        self.out.queue(SetForegroundColor(cell.color))?;
        self.out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                self.out.queue(Print(' '))?;
            }
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }
}

/// Straight walls follow their rotation; every other tile has one glyph.
fn cell_for(tile: TileCode, rotation: Rotation) -> Cell {
    let run = Run::from(rotation);
    let (glyph, color) = match tile {
        TileCode::Empty => (Glyph::Floor, Color::Reset),
        TileCode::OuterCorner => (Glyph::OuterCorner, Color::Blue),
        TileCode::OuterWall => (Glyph::OuterWall(run), Color::Blue),
        TileCode::InnerCorner => (Glyph::InnerCorner, Color::Blue),
        TileCode::InnerWall => (Glyph::InnerWall(run), Color::Blue),
        TileCode::TJunction => (Glyph::Junction, Color::Blue),
        TileCode::ExitWall => (Glyph::Exit(run), Color::Cyan),
        TileCode::SmallPellet => (Glyph::Pellet, Color::White),
        TileCode::PowerPellet => (Glyph::Power, Color::Magenta),
    };
    Cell { glyph, color }
}

fn cell_for_pellet(kind: PelletKind) -> Cell {
    let tile = match kind {
        PelletKind::Normal => TileCode::SmallPellet,
        PelletKind::Power => TileCode::PowerPellet,
    };
    cell_for(tile, Rotation::Deg0)
}

impl<W: Write> LevelSink for TerminalRenderer<W> {
    fn place_floor(&mut self, position: WorldPos, layer: Layer) {
        self.place(position, layer, cell_for(TileCode::Empty, Rotation::Deg0));
    }

    /// The quadrant flip mirrors a sprite without changing the axis it runs along.
    fn place_wall_sprite(
        &mut self,
        tile: TileCode,
        position: WorldPos,
        orientation: Orientation,
        layer: Layer,
    ) {
        self.place(position, layer, cell_for(tile, orientation.rotation));
    }

    fn place_collectible(&mut self, kind: PelletKind, position: WorldPos, layer: Layer) {
        self.place(position, layer, cell_for_pellet(kind));
    }

    fn destroy_generated_level(&mut self) {
        self.tiles.clear();
        self.view_half_height = None;
        self.needs_full = true;
    }

    fn set_camera_view_size(&mut self, half_height: f32) {
        self.view_half_height = Some(half_height);
    }

    /// Tiles are two columns wide, so the aspect is measured in tiles.
    fn viewport_aspect_ratio(&self) -> f32 {
        let (cols, rows) = self.term_size;
        let rows = rows.saturating_sub(HUD_ROWS);
        if cols == 0 || rows == 0 {
            return 1.0;
        }
        (f32::from(cols) / CELL_W as f32) / f32::from(rows)
    }

    fn set_static_level_visible(&mut self, visible: bool) {
        if visible != self.static_visible {
            self.static_visible = visible;
            self.needs_full = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{canonical_grid, LevelGenerator};

    fn renderer(size: (u16, u16)) -> TerminalRenderer<Vec<u8>> {
        TerminalRenderer::new(Vec::new(), 1.0, canonical_grid(), size)
    }

    #[test]
    fn generated_frame_spans_all_four_quadrants() {
        let mut out = renderer((120, 40));
        let mut generator = LevelGenerator::default();
        generator.start(&mut out);
        let (width, height, cells) = out.frame();
        assert_eq!((width, height), (28, 30));
        // top-left outer corner and its mirror across the vertical seam
        assert_eq!(cells[0].glyph, Glyph::OuterCorner);
        assert_eq!(cells[27].glyph, Glyph::OuterCorner);
        // power pellet at canonical (3, 1)
        assert_eq!(cells[3 * 28 + 1].glyph, Glyph::Power);
        // the blank last row of the bottom quadrants is floor, not void
        assert_eq!(cells[29 * 28].glyph, Glyph::Floor);
    }

    #[test]
    fn walls_are_drawn_along_their_rotation() {
        let mut out = renderer((120, 40));
        let (_, _, static_cells) = out.frame();
        // canonical (0, 1) runs at 90 and (1, 0) at 0
        assert_eq!(static_cells[1].glyph, Glyph::OuterWall(Run::Horizontal));
        assert_eq!(static_cells[14].glyph, Glyph::OuterWall(Run::Vertical));

        let mut generator = LevelGenerator::default();
        generator.start(&mut out);
        let (width, _, cells) = out.frame();
        assert_eq!(cells[1].glyph, Glyph::OuterWall(Run::Horizontal));
        assert_eq!(cells[width].glyph, Glyph::OuterWall(Run::Vertical));
        // the top-right twin keeps the canonical rotation
        assert_eq!(cells[width - 2].glyph, Glyph::OuterWall(Run::Horizontal));
        assert_eq!(cells[2 * width - 1].glyph, Glyph::OuterWall(Run::Vertical));
    }

    #[test]
    fn higher_layers_stay_on_top_whatever_the_order() {
        let mut out = renderer((120, 40));
        out.set_static_level_visible(false);
        let at = WorldPos::new(0.5, -0.5);
        out.place_collectible(PelletKind::Power, at, Layer::COLLECTIBLE);
        out.place_floor(at, Layer::FLOOR);
        out.place_wall_sprite(
            TileCode::InnerWall,
            at,
            Orientation::upright(),
            Layer::WALL,
        );
        let (_, _, cells) = out.frame();
        assert_eq!(cells, vec![cell_for_pellet(PelletKind::Power)]);

        let beside = WorldPos::new(1.5, -0.5);
        out.place_floor(beside, Layer::FLOOR);
        out.place_wall_sprite(
            TileCode::InnerWall,
            beside,
            Orientation::upright(),
            Layer::WALL,
        );
        let (_, _, cells) = out.frame();
        assert_eq!(cells[1].glyph, Glyph::InnerWall(Run::Vertical));
    }

    #[test]
    fn oversized_maps_ask_for_a_bigger_terminal() {
        let wide = Grid::filled(1, 40_000, TileCode::Empty);
        let mut out = TerminalRenderer::new(Vec::new(), 1.0, wide, (200, 50));
        out.draw("hud").unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("Need at least 65535x3"));

        let tall = Grid::filled(70_000, 1, TileCode::Empty);
        let mut out = TerminalRenderer::new(Vec::new(), 1.0, tall, (200, 50));
        out.draw("hud").unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("Need at least 2x65535"));
    }

    #[test]
    fn static_level_replaces_the_generated_one() {
        let mut out = renderer((120, 40));
        let (width, height, _) = out.frame();
        assert_eq!((width, height), (14, 15));
        out.set_static_level_visible(false);
        assert_eq!(out.frame().0, 0);
    }

    #[test]
    fn small_terminal_gets_a_message() {
        let mut out = renderer((10, 5));
        let mut generator = LevelGenerator::default();
        generator.start(&mut out);
        out.draw("hud").unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("Terminal too small"));
    }

    #[test]
    fn draw_writes_hud_and_walls() {
        let mut out = renderer((120, 40));
        let mut generator = LevelGenerator::default();
        generator.start(&mut out);
        out.draw("Level 1").unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("Level 1"));
        assert!(text.contains("██"));
        assert!(text.contains('●'));
    }

    #[test]
    fn aspect_counts_tiles_not_columns() {
        let out = renderer((80, 42));
        assert_eq!(out.viewport_aspect_ratio(), 1.0);
        assert_eq!(renderer((0, 0)).viewport_aspect_ratio(), 1.0);
    }
}
