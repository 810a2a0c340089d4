use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Coherent noise algorithm backing every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoiseKind {
    #[default]
    Perlin,
    OpenSimplex2,
}

/// Per-channel sampling frequencies (per tile) and the noise algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    pub kind: NoiseKind,
    pub elevation_frequency: f32,
    pub biome_frequency: f32,
    pub river_frequency: f32,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            kind: NoiseKind::Perlin,
            elevation_frequency: ELEVATION_FREQUENCY,
            biome_frequency: BIOME_FREQUENCY,
            river_frequency: RIVER_FREQUENCY,
        }
    }
}

/// Classification thresholds, all in noise units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Biome values strictly above this use the grassland rule.
    pub grassland: f32,
    /// Elevation below this turns snow into snowy grass (frozen variants only).
    pub snow: f32,
    /// |river| strictly below this is water.
    pub river: f32,
    /// |river| strictly below this (but not water) is a sandy bank.
    pub edge: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            grassland: GRASSLAND_THRESHOLD,
            snow: SNOW_THRESHOLD,
            river: RIVER_THRESHOLD,
            edge: EDGE_THRESHOLD,
        }
    }
}

/// Everything tunable about a world, loaded from RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunk side length in tiles.
    pub chunk_size: u32,
    /// Tile side length in world pixels.
    pub tile_size: u32,
    pub noise: NoiseSettings,
    pub thresholds: Thresholds,
    /// Snow rule produces ice and snowy variants instead of plain snow.
    pub frozen_variants: bool,
    /// Worker threads used to build missing chunks in one tick. 0 or 1 = sequential.
    pub generation_workers: usize,
    /// Minimum seconds between biome change notifications.
    pub biome_change_cooldown: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            tile_size: TILE_SIZE,
            noise: NoiseSettings::default(),
            thresholds: Thresholds::default(),
            frozen_variants: false,
            generation_workers: 1,
            biome_change_cooldown: BIOME_CHANGE_COOLDOWN_SECS,
        }
    }
}

impl WorldConfig {
    /// Parse a RON string and validate the result.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        let config: WorldConfig = options
            .from_str(ron_str)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a RON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Reject values the world cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(invalid("chunk_size", "must be at least 1"));
        }
        if self.tile_size == 0 {
            return Err(invalid("tile_size", "must be at least 1"));
        }
        if self.chunk_size.checked_mul(self.tile_size).map_or(true, |span| span > i32::MAX as u32) {
            return Err(invalid("chunk_size", "chunk_size * tile_size overflows i32"));
        }

        let noise = &self.noise;
        for (field, value) in [
            ("noise.elevation_frequency", noise.elevation_frequency),
            ("noise.biome_frequency", noise.biome_frequency),
            ("noise.river_frequency", noise.river_frequency),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be a positive number, got {value}")));
            }
        }

        let t = &self.thresholds;
        for (field, value) in [
            ("thresholds.grassland", t.grassland),
            ("thresholds.snow", t.snow),
            ("thresholds.river", t.river),
            ("thresholds.edge", t.edge),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, format!("must be finite, got {value}")));
            }
        }
        if t.river < 0.0 {
            return Err(invalid(
                "thresholds.river",
                format!("must not be negative, got {}", t.river),
            ));
        }
        if t.edge < t.river {
            return Err(invalid(
                "thresholds.edge",
                format!("must be >= river threshold ({} < {})", t.edge, t.river),
            ));
        }

        if !self.biome_change_cooldown.is_finite() || self.biome_change_cooldown < 0.0 {
            return Err(invalid(
                "biome_change_cooldown",
                format!("must be a non-negative number, got {}", self.biome_change_cooldown),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 32);
        assert_eq!(config.tile_size, 32);
        assert!(!config.frozen_variants);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let ron = include_str!("../../../data/world.ron");
        let config = WorldConfig::from_ron_str(ron).expect("shipped config should parse");
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let ron = r#"(
            chunk_size: 16,
            thresholds: (river: 0.05),
        )"#;
        let config = WorldConfig::from_ron_str(ron).expect("should parse");
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.tile_size, TILE_SIZE);
        assert_eq!(config.thresholds.river, 0.05);
        assert_eq!(config.thresholds.edge, EDGE_THRESHOLD);
        assert_eq!(config.noise.kind, NoiseKind::Perlin);
    }

    #[test]
    fn test_noise_kind_parse() {
        let ron = r#"(noise: (kind: OpenSimplex2))"#;
        let config = WorldConfig::from_ron_str(ron).expect("should parse");
        assert_eq!(config.noise.kind, NoiseKind::OpenSimplex2);
    }

    #[test]
    fn test_malformed_ron_rejected() {
        let result = WorldConfig::from_ron_str("(chunk_size: {");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let result = WorldConfig::from_ron_str("(chunk_size: 0)");
        match result {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "chunk_size"),
            other => panic!("expected Invalid chunk_size, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_below_river_rejected() {
        let mut config = WorldConfig::default();
        config.thresholds.edge = 0.05;
        config.thresholds.river = 0.1;
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "thresholds.edge"),
            other => panic!("expected Invalid thresholds.edge, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_frequency_rejected() {
        let mut config = WorldConfig::default();
        config.noise.river_frequency = f32::NAN;
        assert!(config.validate().is_err());
        config.noise.river_frequency = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ron_roundtrip() {
        let mut config = WorldConfig::default();
        config.frozen_variants = true;
        config.generation_workers = 4;
        let text = config.to_ron_string().expect("should serialize");
        let back = WorldConfig::from_ron_str(&text).expect("should parse");
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let result = WorldConfig::load(Path::new("/definitely/not/here/world.ron"));
        match result {
            Err(ConfigError::Io { path, .. }) => assert!(path.contains("world.ron")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
