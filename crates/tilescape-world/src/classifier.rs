use glam::{IVec2, Vec2};
use tilescape_core::config::{Thresholds, WorldConfig};
use tilescape_core::math::chunk_local_to_sample;
use tilescape_core::types::{Biome, ChunkCoord, Seed, TileType};

use crate::chunk::Chunk;
use crate::noise::{NoiseChannel, NoiseChannels};

/// Turns noise samples into tiles, one whole chunk at a time.
///
/// Two passes:
/// 1. Base pass: each cell is classified from its own noise samples.
/// 2. Shoreline pass: grass touching water (8-neighborhood, same chunk only)
///    becomes sand. Reads the base-pass snapshot, so conversions never cascade.
#[derive(Debug, Clone)]
pub struct TileClassifier {
    thresholds: Thresholds,
    chunk_size: u32,
    frozen_variants: bool,
}

impl TileClassifier {
    pub fn new(thresholds: Thresholds, chunk_size: u32) -> Self {
        Self {
            thresholds,
            chunk_size,
            frozen_variants: false,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.thresholds, config.chunk_size).with_frozen_variants(config.frozen_variants)
    }

    /// Let the snow rule emit ice and snowy variants instead of plain snow.
    pub fn with_frozen_variants(mut self, enabled: bool) -> Self {
        self.frozen_variants = enabled;
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Biome selected by a biome-channel value.
    pub fn biome_for(&self, biome_value: f32) -> Biome {
        if biome_value > self.thresholds.grassland {
            Biome::Grassland
        } else {
            Biome::Tundra
        }
    }

    /// Base-pass type of a single cell sampled at a tile-space position.
    pub fn classify_cell(&self, channels: &NoiseChannels, sample: Vec2) -> TileType {
        let (x, y) = (sample.x, sample.y);
        match self.biome_for(channels.sample(NoiseChannel::Biome, x, y)) {
            Biome::Grassland => {
                let river = channels.sample(NoiseChannel::River, x, y).abs();
                self.grassland_tile(river)
            }
            Biome::Tundra => {
                if !self.frozen_variants {
                    return TileType::Snow;
                }
                let river = channels.sample(NoiseChannel::River, x, y).abs();
                let elevation = channels.sample(NoiseChannel::Elevation, x, y);
                self.frozen_tile(river, elevation)
            }
        }
    }

    fn grassland_tile(&self, river: f32) -> TileType {
        if river < self.thresholds.river {
            TileType::Water
        } else if river < self.thresholds.edge {
            TileType::Sand
        } else {
            TileType::Grass
        }
    }

    fn frozen_tile(&self, river: f32, elevation: f32) -> TileType {
        if river < self.thresholds.river {
            TileType::Ice
        } else if river < self.thresholds.edge {
            TileType::SnowySand
        } else if elevation < self.thresholds.snow {
            TileType::SnowyGrass
        } else {
            TileType::Snow
        }
    }

    /// Classify every cell of a chunk independently. Row-major.
    pub fn base_pass(&self, coord: ChunkCoord, channels: &NoiseChannels) -> Vec<TileType> {
        let size = self.chunk_size as i32;
        let mut tiles = Vec::with_capacity((size * size) as usize);
        for ly in 0..size {
            for lx in 0..size {
                let sample = chunk_local_to_sample(coord, IVec2::new(lx, ly), self.chunk_size);
                tiles.push(self.classify_cell(channels, sample));
            }
        }
        tiles
    }

    /// Build a complete chunk: base pass followed by the shoreline pass.
    pub fn classify_chunk(&self, coord: ChunkCoord, channels: &NoiseChannels) -> Chunk {
        let base = self.base_pass(coord, channels);
        let tiles = shoreline_pass(&base, self.chunk_size as usize);
        Chunk::from_generated(coord, self.chunk_size, tiles)
    }
}

/// Convert grass with a water neighbor (shallow or deep) into sand.
///
/// `base` is a row-major `size * size` grid and is never modified; neighbor
/// lookups are clamped to the grid, so cells on the edge see fewer neighbors.
pub fn shoreline_pass(base: &[TileType], size: usize) -> Vec<TileType> {
    debug_assert_eq!(base.len(), size * size);
    let mut out = base.to_vec();
    for y in 0..size {
        for x in 0..size {
            let idx = y * size + x;
            if base[idx] == TileType::Grass && adjacent_to_water(base, size, x, y) {
                out[idx] = TileType::Sand;
            }
        }
    }
    out
}

fn adjacent_to_water(grid: &[TileType], size: usize, x: usize, y: usize) -> bool {
    let y0 = y.saturating_sub(1);
    let y1 = (y + 1).min(size - 1);
    let x0 = x.saturating_sub(1);
    let x1 = (x + 1).min(size - 1);
    for ny in y0..=y1 {
        for nx in x0..=x1 {
            if (nx, ny) != (x, y) && grid[ny * size + nx].is_water() {
                return true;
            }
        }
    }
    false
}

/// Build the chunk at `(cx, cy)` for `seed` from scratch.
///
/// Pure function of its arguments: it derives fresh noise channels every call.
/// Use [`TileClassifier::classify_chunk`] with shared channels in hot paths.
pub fn classify_chunk(cx: i32, cy: i32, seed: u32, config: &WorldConfig) -> Chunk {
    let channels = NoiseChannels::new(Seed(seed), &config.noise);
    TileClassifier::from_config(config).classify_chunk(IVec2::new(cx, cy), &channels)
}
