// Tile-level value types shared by every stage of generation.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileCode {
    Empty,
    OuterCorner,
    OuterWall,
    InnerCorner,
    InnerWall,
    SmallPellet,
    PowerPellet,
    TJunction,
    ExitWall,
}

impl TileCode {
    pub const ALL: [TileCode; 9] = [
        TileCode::Empty,
        TileCode::OuterCorner,
        TileCode::OuterWall,
        TileCode::InnerCorner,
        TileCode::InnerWall,
        TileCode::SmallPellet,
        TileCode::PowerPellet,
        TileCode::TJunction,
        TileCode::ExitWall,
    ];

    /// Decodes the integer form used by authored maps. Unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(TileCode::Empty),
            1 => Some(TileCode::OuterCorner),
            2 => Some(TileCode::OuterWall),
            3 => Some(TileCode::InnerCorner),
            4 => Some(TileCode::InnerWall),
            5 => Some(TileCode::SmallPellet),
            6 => Some(TileCode::PowerPellet),
            7 => Some(TileCode::TJunction),
            8 => Some(TileCode::ExitWall),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            TileCode::Empty => 0,
            TileCode::OuterCorner => 1,
            TileCode::OuterWall => 2,
            TileCode::InnerCorner => 3,
            TileCode::InnerWall => 4,
            TileCode::SmallPellet => 5,
            TileCode::PowerPellet => 6,
            TileCode::TJunction => 7,
            TileCode::ExitWall => 8,
        }
    }

    /// Corners, walls and junctions: the codes that take part in adjacency.
    pub fn is_wall_like(self) -> bool {
        matches!(
            self,
            TileCode::OuterCorner
                | TileCode::OuterWall
                | TileCode::InnerCorner
                | TileCode::InnerWall
                | TileCode::TJunction
                | TileCode::ExitWall
        )
    }

    pub fn pellet(self) -> Option<PelletKind> {
        match self {
            TileCode::SmallPellet => Some(PelletKind::Normal),
            TileCode::PowerPellet => Some(PelletKind::Power),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum PelletKind {
    Normal,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Generation order; also the row-major order of the assembled level.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn is_right(self) -> bool {
        matches!(self, Quadrant::TopRight | Quadrant::BottomRight)
    }

    pub fn is_bottom(self) -> bool {
        matches!(self, Quadrant::BottomLeft | Quadrant::BottomRight)
    }

    pub fn name(self) -> &'static str {
        match self {
            Quadrant::TopLeft => "TopLeft",
            Quadrant::TopRight => "TopRight",
            Quadrant::BottomLeft => "BottomLeft",
            Quadrant::BottomRight => "BottomRight",
        }
    }

    /// Parent-transform flip that turns the canonical art into this quadrant's art.
    pub fn flip(self) -> QuadrantFlip {
        QuadrantFlip {
            about_x: self.is_bottom(),
            about_y: self.is_right(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

/// 180° half-turns applied by a quadrant's parent transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuadrantFlip {
    pub about_x: bool,
    pub about_y: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Orientation {
    pub flip: QuadrantFlip,
    pub rotation: Rotation,
}

impl Orientation {
    pub fn upright() -> Self {
        Self::default()
    }

    /// Euler angles (x, y, z) in degrees, the form an engine transform expects.
    pub fn euler_degrees(self) -> [f32; 3] {
        let half = |on: bool| if on { 180.0 } else { 0.0 };
        [
            half(self.flip.about_x),
            half(self.flip.about_y),
            f32::from(self.rotation.degrees()),
        ]
    }
}
