pub mod biome;
pub mod chunk;
pub mod chunk_map;
pub mod classifier;
pub mod noise;
pub mod streaming;
pub mod visibility;

use glam::IVec2;
use tilescape_core::config::WorldConfig;
use tilescape_core::constants::UNRESIDENT_TILE;
use tilescape_core::error::ConfigError;
use tilescape_core::math::{tile_to_chunk, tile_to_local, world_to_chunk, world_to_tile};
use tilescape_core::types::{Biome, ChunkCoord, Seed, TileType, Viewport, WorldPos};

pub use biome::{BiomeChange, BiomeTracker};
pub use chunk::{Chunk, PlacedTile};
pub use chunk_map::ChunkStore;
pub use classifier::{classify_chunk, shoreline_pass, TileClassifier};
pub use noise::{NoiseChannel, NoiseChannels, NoiseField};
pub use streaming::{ControllerState, TickReport, WorldController};
pub use visibility::{intersecting_range, visible_range, VisibleRange};

/// Primary public struct for the tilescape-world crate.
/// Owns the seed, the noise channels, the classifier and the resident chunks.
///
/// Changing the seed replaces the whole map (see [`Map::reseed`]).
pub struct Map {
    seed: Seed,
    config: WorldConfig,
    channels: NoiseChannels,
    classifier: TileClassifier,
    chunks: ChunkStore,
}

impl Map {
    /// Create an empty world for `seed` with the default configuration.
    pub fn new(seed: u32) -> Self {
        Self::build(Seed(seed), WorldConfig::default())
    }

    /// Create an empty world with a custom configuration.
    pub fn with_config(seed: u32, config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(Seed(seed), config))
    }

    fn build(seed: Seed, config: WorldConfig) -> Self {
        log::info!(
            "Creating map: seed {}, {}x{} tile chunks, {}px tiles",
            seed,
            config.chunk_size,
            config.chunk_size,
            config.tile_size
        );
        Self {
            seed,
            channels: NoiseChannels::new(seed, &config.noise),
            classifier: TileClassifier::from_config(&config),
            chunks: ChunkStore::new(),
            config,
        }
    }

    /// Throw away every chunk and all noise state and start over with `seed`.
    pub fn reseed(&mut self, seed: u32) {
        log::info!("Reseeding map {} -> {}", self.seed, seed);
        *self = Self::build(Seed(seed), self.config.clone());
    }

    /// Materialize the chunk at `(cx, cy)` if it is not resident yet.
    ///
    /// The chunk is classified with `seed`. Passing anything other than the
    /// map's own seed is allowed but unusual and logged.
    pub fn generate_chunk(&mut self, cx: i32, cy: i32, seed: u32) {
        let coord = IVec2::new(cx, cy);
        if self.chunks.is_generated(coord) {
            return;
        }

        let classifier = &self.classifier;
        let built = if seed == self.seed.0 {
            let channels = &self.channels;
            self.chunks.generate(coord, |c| classifier.classify_chunk(c, channels))
        } else {
            log::warn!(
                "Generating chunk ({}, {}) with seed {} on a map seeded {}",
                cx,
                cy,
                seed,
                self.seed
            );
            let channels = NoiseChannels::new(Seed(seed), &self.config.noise);
            self.chunks.generate(coord, |c| classifier.classify_chunk(c, &channels))
        };
        if built {
            log::debug!("Generated chunk ({}, {})", cx, cy);
        }
    }

    /// Build every chunk in `range` that is not resident. Returns how many were built.
    pub fn generate_missing(&mut self, range: &VisibleRange) -> usize {
        let workers = self.config.generation_workers;
        let classifier = &self.classifier;
        let channels = &self.channels;
        let build = |c: ChunkCoord| classifier.classify_chunk(c, channels);

        if workers > 1 {
            return self.chunks.generate_batch(range.coords(), workers, build);
        }
        let mut built = 0;
        for coord in range.coords() {
            if self.chunks.generate(coord, build) {
                built += 1;
            }
        }
        built
    }

    /// Pre-generate the 3x3 chunks around the chunk containing a world pixel.
    pub fn prewarm(&mut self, world_pos: WorldPos) -> usize {
        let center = world_to_chunk(world_pos, self.config.chunk_size, self.config.tile_size);
        let range = VisibleRange::new(center.x, center.x, center.y, center.y).expanded(1);
        self.generate_missing(&range)
    }

    pub fn is_chunk_generated(&self, cx: i32, cy: i32) -> bool {
        self.chunks.is_generated(IVec2::new(cx, cy))
    }

    /// Drop every chunk outside the inclusive chunk bounds. Returns how many were dropped.
    pub fn remove_out_of_view_chunks(
        &mut self,
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    ) -> usize {
        self.evict_outside(&VisibleRange::new(min_x, max_x, min_y, max_y))
    }

    pub fn evict_outside(&mut self, range: &VisibleRange) -> usize {
        self.chunks.evict_outside(range)
    }

    /// Tile under a world pixel position.
    ///
    /// Returns [`UNRESIDENT_TILE`] (water) when the owning chunk is not resident.
    pub fn get_tile_at(&self, world_x: i32, world_y: i32) -> TileType {
        let tile = world_to_tile(IVec2::new(world_x, world_y), self.config.tile_size);
        let coord = tile_to_chunk(tile, self.config.chunk_size);
        let local = tile_to_local(tile, self.config.chunk_size);
        self.chunks
            .get(coord)
            .and_then(|chunk| chunk.get(local.x, local.y))
            .unwrap_or(UNRESIDENT_TILE)
    }

    /// Biome under a world pixel position. Reads the noise directly, so the
    /// chunk does not need to be resident.
    pub fn biome_at(&self, world_x: i32, world_y: i32) -> Biome {
        let tile = world_to_tile(IVec2::new(world_x, world_y), self.config.tile_size);
        let value = self
            .channels
            .sample(NoiseChannel::Biome, tile.x as f32, tile.y as f32);
        self.classifier.biome_for(value)
    }

    /// Padded chunk range that must be resident for `viewport`.
    pub fn visible_range(&self, viewport: &Viewport) -> VisibleRange {
        visible_range(viewport, self.config.chunk_size, self.config.tile_size)
    }

    /// Resident chunks that intersect `viewport`, row by row. For renderers.
    pub fn visible_chunks(&self, viewport: &Viewport) -> impl Iterator<Item = &Chunk> + '_ {
        let range = intersecting_range(viewport, self.config.chunk_size, self.config.tile_size);
        range.coords().filter_map(move |coord| self.chunks.get(coord))
    }

    pub fn get_chunk(&self, cx: i32, cy: i32) -> Option<&Chunk> {
        self.chunks.get(IVec2::new(cx, cy))
    }

    /// Number of resident chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> &ChunkStore {
        &self.chunks
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn classifier(&self) -> &TileClassifier {
        &self.classifier
    }

    pub fn channels(&self) -> &NoiseChannels {
        &self.channels
    }
}
