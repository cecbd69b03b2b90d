use pacman_levelgen::{
    canonical_grid, AssetSlot, AssetTable, GeneratorConfig, Grid, Layer, LevelGenerator,
    PelletKind, Placed, PlacementRecorder, Quadrant, QuadrantMaps,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn pellet_cells(maps: &QuadrantMaps, kind: PelletKind) -> usize {
    Quadrant::ALL
        .iter()
        .map(|&q| maps.get(q).count(|t| t.pellet() == Some(kind)))
        .sum()
}

#[test]
fn canonical_level_places_every_floor_and_collectible() {
    let mut generator = LevelGenerator::default();
    let mut sink = PlacementRecorder::default();
    let report = generator.generate_level(&mut sink);

    let maps = QuadrantMaps::from_canonical(&canonical_grid());
    assert_eq!(sink.floors(), 4 * 15 * 14);
    assert_eq!(sink.collectibles(PelletKind::Normal), pellet_cells(&maps, PelletKind::Normal));
    assert_eq!(sink.collectibles(PelletKind::Power), pellet_cells(&maps, PelletKind::Power));
    // top quadrants keep the last canonical row, bottom quadrants blank it
    assert_eq!(sink.collectibles(PelletKind::Normal), 55 + 55 + 54 + 54);
    assert_eq!(sink.collectibles(PelletKind::Power), 4);
    assert_eq!(sink.sprites(), 110 + 110 + 109 + 109);

    assert_eq!(report.floors, sink.floors());
    assert_eq!(report.sprites, sink.sprites());
    assert_eq!(report.collectibles, 222);
    assert_eq!(report.skipped_assets, 0);
    assert_eq!(sink.placed.len(), 840 + 438 + 222);
}

#[test]
fn empty_cells_only_get_a_floor() {
    let mut generator = LevelGenerator::default();
    let mut sink = PlacementRecorder::default();
    generator.generate_level(&mut sink);

    // canonical (3, 3) is Empty; it sits at world (-10.5, 11.5)
    let at_cell: Vec<_> = sink
        .placed
        .iter()
        .filter(|p| match p {
            Placed::Floor { position, .. }
            | Placed::Sprite { position, .. }
            | Placed::Collectible { position, .. } => position.x == -10.5 && position.y == 11.5,
        })
        .collect();
    assert_eq!(at_cell.len(), 1);
    assert!(matches!(at_cell[0], Placed::Floor { .. }));
}

#[test]
fn regenerating_replaces_rather_than_accumulates() {
    let mut generator = LevelGenerator::default();
    let mut once = PlacementRecorder::default();
    generator.generate_level(&mut once);

    let mut twice = PlacementRecorder::default();
    let first = generator.generate_level(&mut twice);
    let second = generator.generate_level(&mut twice);

    assert_eq!(twice.teardowns, 2);
    assert_eq!(twice.placed, once.placed);
    assert_eq!(twice.view_half_height, once.view_half_height);
    assert_eq!(second.generation, first.generation + 1);
    assert_eq!(
        (second.floors, second.sprites, second.collectibles),
        (first.floors, first.sprites, first.collectibles)
    );
}

#[test]
fn mirrored_sprites_share_canonical_rotations() {
    let mut generator = LevelGenerator::default();
    let mut sink = PlacementRecorder::default();
    generator.generate_level(&mut sink);

    let sprites: Vec<_> = sink
        .placed
        .iter()
        .filter_map(|p| match p {
            Placed::Sprite {
                tile,
                position,
                orientation,
                ..
            } => Some((*tile, *position, *orientation)),
            _ => None,
        })
        .collect();

    for &(tile, position, orientation) in &sprites {
        if orientation.flip.about_x || orientation.flip.about_y {
            continue;
        }
        // the same tile mirrored across the vertical seam
        let twin = sprites
            .iter()
            .find(|(t, p, o)| {
                *t == tile && p.x == -position.x && p.y == position.y && o.flip.about_y
            })
            .expect("top-right twin");
        assert_eq!(twin.2.rotation, orientation.rotation);
        assert!(!twin.2.flip.about_x);
    }
}

#[test]
fn every_placement_carries_its_draw_layer() {
    let mut generator = LevelGenerator::default();
    let mut sink = PlacementRecorder::default();
    generator.generate_level(&mut sink);

    for placed in &sink.placed {
        let (layer, expected) = match placed {
            Placed::Floor { layer, .. } => (layer, Layer::FLOOR),
            Placed::Sprite { layer, .. } => (layer, Layer::WALL),
            Placed::Collectible { layer, .. } => (layer, Layer::COLLECTIBLE),
        };
        assert_eq!(*layer, expected);
    }
}

#[test]
fn missing_floor_art_still_completes() {
    let assets = AssetTable::standard().without(AssetSlot::Floor);
    let mut generator = LevelGenerator::default().with_assets(assets);
    let mut sink = PlacementRecorder::default();
    let report = generator.generate_level(&mut sink);
    assert_eq!(sink.floors(), 0);
    assert_eq!(report.skipped_assets, 840);
    assert_eq!(sink.sprites(), 438);
    assert!(sink.view_half_height.is_some());
}

#[test]
fn random_maps_always_generate_a_full_level() {
    let mut rng = StdRng::seed_from_u64(0x9ac3);
    for _ in 0..50 {
        let rows = rng.gen_range(1..12);
        let cols = rng.gen_range(1..12);
        let codes: Vec<Vec<i32>> = (0..rows)
            .map(|_| (0..cols).map(|_| rng.gen_range(-1..10)).collect())
            .collect();
        let grid = Grid::from_codes(&codes).unwrap();
        let pellets: usize = QuadrantMaps::from_canonical(&grid)
            .get(Quadrant::TopLeft)
            .count(|t| t.pellet().is_some());

        let mut generator = LevelGenerator::with_grid(grid, GeneratorConfig::default());
        let mut sink = PlacementRecorder::new(rng.gen_range(0.5..2.5));
        let report = generator.generate_level(&mut sink);

        assert_eq!(sink.floors(), 4 * rows * cols);
        assert!(report.collectibles >= pellets);
        assert!(sink.placed.iter().all(|p| match p {
            Placed::Sprite { tile, .. } => tile.is_wall_like(),
            _ => true,
        }));
    }
}
