use std::collections::HashMap;

use crate::components::{PelletKind, TileCode};
use crate::placer::Visual;

/// Something a placement needs to draw: the floor art, one sprite per wall-like
/// code, or a collectible prefab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    Floor,
    Sprite(TileCode),
    Prefab(PelletKind),
}

impl From<Visual> for AssetSlot {
    fn from(visual: Visual) -> Self {
        match visual {
            Visual::Floor => AssetSlot::Floor,
            Visual::Sprite(tile) => AssetSlot::Sprite(tile),
            Visual::Collectible(kind) => AssetSlot::Prefab(kind),
        }
    }
}

/// Names of the assets assigned to each slot. An unassigned slot is skipped at
/// placement time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetTable {
    names: HashMap<AssetSlot, String>,
}

impl AssetTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every slot assigned, using the sprite-sheet names of the maze art.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.assign(AssetSlot::Floor, "tiles_0");
        let sprites = [
            (TileCode::OuterCorner, "tiles_1"),
            (TileCode::OuterWall, "tiles_2"),
            (TileCode::InnerCorner, "tiles_3"),
            (TileCode::InnerWall, "tiles_4"),
            (TileCode::TJunction, "tiles_5"),
            (TileCode::ExitWall, "tiles_6"),
        ];
        for (tile, name) in sprites {
            table.assign(AssetSlot::Sprite(tile), name);
        }
        table.assign(AssetSlot::Prefab(PelletKind::Normal), "beanS");
        table.assign(AssetSlot::Prefab(PelletKind::Power), "beanM");
        table
    }

    pub fn assign(&mut self, slot: AssetSlot, name: impl Into<String>) {
        self.names.insert(slot, name.into());
    }

    pub fn unassign(&mut self, slot: AssetSlot) -> Option<String> {
        self.names.remove(&slot)
    }

    pub fn without(mut self, slot: AssetSlot) -> Self {
        self.unassign(slot);
        self
    }

    pub fn name(&self, slot: AssetSlot) -> Option<&str> {
        self.names.get(&slot).map(String::as_str)
    }

    pub fn is_assigned(&self, slot: AssetSlot) -> bool {
        self.names.contains_key(&slot)
    }
}
