//! Four-quadrant Pac-Man maze generation.
//!
//! One authored quadrant is mirrored into a full level, every wall-like tile gets a
//! rotation inferred from its neighbours, and the result is handed to a
//! [`LevelSink`] as floor, sprite and collectible placements.

pub mod assets;
pub mod camera;
pub mod components;
pub mod config;
pub mod error;
pub mod grid;
pub mod level;
pub mod mirror;
pub mod orientation;
pub mod placer;
pub mod render;
pub mod sink;

pub use assets::{AssetSlot, AssetTable};
pub use components::{Orientation, PelletKind, Quadrant, QuadrantFlip, Rotation, TileCode};
pub use config::{DisplaySettings, GeneratorConfig};
pub use error::LevelError;
pub use grid::{Grid, NeighborMask};
pub use level::{canonical_grid, GenerationReport, LevelGenerator, LEVEL_MAP};
pub use mirror::{mirror_horizontal, mirror_vertical, QuadrantMaps};
pub use orientation::resolve_rotation;
pub use placer::{Layer, Placement, Visual, WorldPos};
pub use render::TerminalRenderer;
pub use sink::{LevelSink, Placed, PlacementRecorder};
