pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod types;

pub use config::{NoiseKind, NoiseSettings, Thresholds, WorldConfig};
pub use error::ConfigError;
pub use types::{Biome, ChunkCoord, Seed, TileType, Viewport, WorldPos};
