//! Single source of truth for shared constants.
//! Configurable values use these as their defaults.

use crate::types::TileType;

/// Side length of a chunk in tiles.
pub const CHUNK_SIZE: u32 = 32;

/// Side length of a tile in world pixels.
pub const TILE_SIZE: u32 = 32;

/// Chunks of margin kept resident around the visible area on every side.
pub const VISIBLE_MARGIN_CHUNKS: i32 = 1;

/// Seed offset of the elevation noise channel.
pub const ELEVATION_SEED_OFFSET: u32 = 0;

/// Seed offset of the biome noise channel.
pub const BIOME_SEED_OFFSET: u32 = 1;

/// Seed offset of the river noise channel.
pub const RIVER_SEED_OFFSET: u32 = 2;

/// Default sampling frequency of the elevation channel (per tile).
pub const ELEVATION_FREQUENCY: f32 = 0.015;

/// Default sampling frequency of the biome channel. Coarse, large regions.
pub const BIOME_FREQUENCY: f32 = 0.01;

/// Default sampling frequency of the river channel.
pub const RIVER_FREQUENCY: f32 = 0.02;

/// Biome values above this select the grassland rule.
pub const GRASSLAND_THRESHOLD: f32 = 0.0;

/// Elevation values below this turn snow into snowy grass (frozen variants only).
pub const SNOW_THRESHOLD: f32 = -0.2;

/// |river| below this is a water vein.
pub const RIVER_THRESHOLD: f32 = 0.1;

/// |river| below this (and above RIVER_THRESHOLD) is a sandy river bank.
pub const EDGE_THRESHOLD: f32 = 0.15;

/// Tile reported by `get_tile_at` when the owning chunk is not resident.
pub const UNRESIDENT_TILE: TileType = TileType::Water;

/// Minimum seconds between two biome change notifications.
pub const BIOME_CHANGE_COOLDOWN_SECS: f32 = 1.0;

/// Seed used when a session starts without player input.
pub const DEFAULT_SEED: u32 = 12345;
