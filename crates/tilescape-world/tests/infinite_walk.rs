use glam::IVec2;
use tilescape_core::config::WorldConfig;
use tilescape_core::types::{TileType, Viewport};
use tilescape_world::{classify_chunk, Map, WorldController};

fn walk(
    map: &mut Map,
    controller: &mut WorldController,
    start: IVec2,
    step: IVec2,
    ticks: usize,
) -> IVec2 {
    let mut pos = start;
    for _ in 0..ticks {
        pos += step;
        let viewport = Viewport::centered_on(pos, IVec2::new(800, 600));
        let report = controller.tick(map, &viewport);
        assert_eq!(map.chunk_count(), report.range.chunk_count());
    }
    pos
}

#[test]
fn test_two_maps_same_seed_agree() {
    let mut a = Map::new(2024);
    let mut b = Map::new(2024);
    let mut ca = WorldController::new();
    let mut cb = WorldController::new();

    walk(&mut a, &mut ca, IVec2::ZERO, IVec2::new(-211, 97), 25);
    walk(&mut b, &mut cb, IVec2::ZERO, IVec2::new(-211, 97), 25);

    assert_eq!(a.chunk_count(), b.chunk_count());
    for (coord, chunk) in a.chunks().iter() {
        assert_eq!(b.chunks().get(*coord), Some(chunk), "chunk {coord} differs");
    }
}

#[test]
fn test_revisited_chunks_regenerate_identically() {
    let mut map = Map::new(77);
    let mut controller = WorldController::new();
    let home = Viewport::new(0, 0, 800, 600);
    controller.tick(&mut map, &home);
    let original = map.get_chunk(0, 0).cloned().expect("resident after tick");

    // Walk far enough that the origin is evicted, then come back.
    let far = walk(&mut map, &mut controller, IVec2::ZERO, IVec2::new(1024, 0), 6);
    assert!(!map.is_chunk_generated(0, 0));
    walk(&mut map, &mut controller, far, IVec2::new(-1024, 0), 6);
    controller.tick(&mut map, &home);

    assert_eq!(map.get_chunk(0, 0), Some(&original));
}

#[test]
fn test_negative_quadrant_walk() {
    let mut map = Map::new(5);
    let mut controller = WorldController::new();
    let end = walk(&mut map, &mut controller, IVec2::new(-10, -10), IVec2::new(-333, -271), 40);

    let range = controller.last_range().expect("ticked");
    assert!(range.max_x < 0 && range.max_y < 0);
    for coord in range.coords() {
        let chunk = map.get_chunk(coord.x, coord.y).expect("range is resident");
        assert_eq!(chunk, &classify_chunk(coord.x, coord.y, 5, map.config()));
    }
    // The player's own tile is resident, so the lookup hits real data.
    let chunk_span = 32 * 32;
    let cx = end.x.div_euclid(chunk_span);
    let cy = end.y.div_euclid(chunk_span);
    assert!(map.is_chunk_generated(cx, cy));
}

#[test]
fn test_get_tile_at_agrees_with_placed_tiles() {
    let mut map = Map::new(12345);
    let mut controller = WorldController::new();
    let viewport = Viewport::new(-400, -300, 800, 600);
    controller.tick(&mut map, &viewport);

    let tile_size = map.config().tile_size;
    for chunk in map.visible_chunks(&viewport) {
        for placed in chunk.placed_tiles(tile_size) {
            // Any pixel inside the tile maps back to it.
            let inner = placed.position + IVec2::splat(tile_size as i32 / 2);
            assert_eq!(map.get_tile_at(placed.position.x, placed.position.y), placed.tile_type);
            assert_eq!(map.get_tile_at(inner.x, inner.y), placed.tile_type);
        }
    }
}

#[test]
fn test_generated_world_has_variety() {
    let mut map = Map::new(12345);
    let mut controller = WorldController::new();
    walk(&mut map, &mut controller, IVec2::ZERO, IVec2::new(3000, 1700), 12);

    let mut seen = [false; TileType::COUNT];
    for (_, chunk) in map.chunks().iter() {
        for &tile in chunk.tiles() {
            seen[tile.index()] = true;
        }
    }
    let kinds = seen.iter().filter(|&&s| s).count();
    assert!(kinds >= 2, "expected more than one tile kind, saw {kinds}");
}

#[test]
fn test_custom_config_from_ron() {
    let config =
        WorldConfig::from_ron_str("(chunk_size: 16, generation_workers: 3)").expect("valid RON");
    let mut map = Map::with_config(9, config.clone()).expect("valid config");
    let mut controller = WorldController::new();
    let report = controller.tick(&mut map, &Viewport::new(0, 0, 800, 600));

    // 512px chunks: 0..=799 touches chunks 0 and 1 horizontally, 0..=599 chunks 0 and 1 vertically.
    assert_eq!((report.range.min_x, report.range.max_x), (-1, 2));
    assert_eq!((report.range.min_y, report.range.max_y), (-1, 2));
    assert_eq!(map.get_chunk(1, 1), Some(&classify_chunk(1, 1, 9, &config)));
}
