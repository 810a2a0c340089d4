use glam::IVec2;
use tilescape_core::math::{chunk_local_to_tile, tile_to_world};
use tilescape_core::types::{ChunkCoord, TileType, WorldPos};

/// A fully generated square grid of tiles. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    coord: ChunkCoord,
    size: u32,
    /// Row-major, indexed as `y * size + x`.
    tiles: Vec<TileType>,
}

/// A tile together with its derived world-space pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedTile {
    pub tile_type: TileType,
    /// Top-left corner in world pixels.
    pub position: WorldPos,
}

impl Chunk {
    /// Grid produced by the classifier; length already matches `size * size`.
    pub(crate) fn from_generated(coord: ChunkCoord, size: u32, tiles: Vec<TileType>) -> Self {
        debug_assert_eq!(tiles.len(), (size as usize) * (size as usize));
        Self { coord, size, tiles }
    }

    /// A chunk where every tile has the same type.
    pub fn filled(coord: ChunkCoord, size: u32, tile: TileType) -> Self {
        let n = size as usize;
        Self {
            coord,
            size,
            tiles: vec![tile; n * n],
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Side length in tiles.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Tile at a local offset, or None outside the chunk.
    pub fn get(&self, local_x: i32, local_y: i32) -> Option<TileType> {
        let s = self.size as i32;
        if local_x < 0 || local_y < 0 || local_x >= s || local_y >= s {
            return None;
        }
        Some(self.tiles[(local_y * s + local_x) as usize])
    }

    /// Raw row-major tile slice.
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// Every tile with its world pixel position, row by row.
    ///
    /// Chunks beyond the `i32` pixel plane report positions clamped to its edge.
    pub fn placed_tiles(&self, tile_size: u32) -> impl Iterator<Item = PlacedTile> + '_ {
        let size = self.size as i32;
        self.tiles.iter().enumerate().map(move |(i, &tile_type)| {
            let local = IVec2::new(i as i32 % size, i as i32 / size);
            let tile = chunk_local_to_tile(self.coord, local, self.size);
            PlacedTile {
                tile_type,
                position: tile_to_world(tile, tile_size),
            }
        })
    }
}
