use crate::types::{ChunkCoord, WorldPos};
use glam::{IVec2, Vec2};

/// Integer division rounding toward negative infinity.
///
/// `divisor` must be positive. Plain `/` truncates toward zero, which maps
/// `-1` and `1` into the same chunk.
pub fn floor_div(value: i32, divisor: i32) -> i32 {
    debug_assert!(divisor > 0, "floor_div divisor must be positive");
    value.div_euclid(divisor)
}

/// Width of one chunk in world pixels.
pub fn chunk_span(chunk_size: u32, tile_size: u32) -> i32 {
    (chunk_size * tile_size) as i32
}

/// World pixel position to the tile grid coordinate containing it.
pub fn world_to_tile(world: WorldPos, tile_size: u32) -> IVec2 {
    let ts = tile_size as i32;
    IVec2::new(floor_div(world.x, ts), floor_div(world.y, ts))
}

/// Tile grid coordinate to the chunk containing it.
pub fn tile_to_chunk(tile: IVec2, chunk_size: u32) -> ChunkCoord {
    let cs = chunk_size as i32;
    IVec2::new(floor_div(tile.x, cs), floor_div(tile.y, cs))
}

/// Tile grid coordinate to its local offset within its chunk.
pub fn tile_to_local(tile: IVec2, chunk_size: u32) -> IVec2 {
    let cs = chunk_size as i32;
    IVec2::new(tile.x.rem_euclid(cs), tile.y.rem_euclid(cs))
}

/// World pixel position to its containing chunk coordinate.
pub fn world_to_chunk(world: WorldPos, chunk_size: u32, tile_size: u32) -> ChunkCoord {
    let span = chunk_span(chunk_size, tile_size);
    IVec2::new(floor_div(world.x, span), floor_div(world.y, span))
}

/// Chunk coordinate and local tile offset to the tile grid coordinate.
///
/// Chunks far enough out have tiles past `i32::MAX`; those saturate.
pub fn chunk_local_to_tile(chunk: ChunkCoord, local: IVec2, chunk_size: u32) -> IVec2 {
    let cs = chunk_size as i32;
    IVec2::new(
        chunk.x.saturating_mul(cs).saturating_add(local.x),
        chunk.y.saturating_mul(cs).saturating_add(local.y),
    )
}

/// Noise sample position of a tile, in tile units.
///
/// Computed in `i64` so every chunk coordinate has a distinct position, even
/// where the tile grid itself no longer fits in `i32`.
pub fn chunk_local_to_sample(chunk: ChunkCoord, local: IVec2, chunk_size: u32) -> Vec2 {
    let cs = chunk_size as i64;
    let x = chunk.x as i64 * cs + local.x as i64;
    let y = chunk.y as i64 * cs + local.y as i64;
    Vec2::new(x as f32, y as f32)
}

/// World pixel position of a tile's top-left corner. Saturates at the edge
/// of the `i32` pixel plane.
pub fn tile_to_world(tile: IVec2, tile_size: u32) -> WorldPos {
    let ts = tile_size as i32;
    IVec2::new(tile.x.saturating_mul(ts), tile.y.saturating_mul(ts))
}
