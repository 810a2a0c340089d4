use std::time::Instant;

use tilescape_core::config::WorldConfig;
use tilescape_core::error::ConfigError;
use tilescape_core::types::Viewport;
use tilescape_render::{DrawList, TextureHandle, TilePalette, Tileset, TilesetError};
use tilescape_world::{BiomeTracker, Map, WorldController};

use crate::scenes::SceneConfig;

/// Frame time assumed when feeding the biome tracker.
const TICK_DT: f32 = 1.0 / 60.0;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub seed: u32,
    pub chunk_size: u32,
    pub tick_count: u32,
    /// Chunks built over the whole run.
    pub generated_chunks: usize,
    /// Chunks evicted over the whole run.
    pub evicted_chunks: usize,
    /// Resident chunks after the last tick.
    pub resident_chunks: usize,
    /// Quads in the last draw list.
    pub quads: usize,
    pub biome_changes: u32,
    pub timings: TimingSeries,
}

/// Walks a camera through fresh worlds and times each tick.
///
/// A timed tick covers the world controller tick plus building the draw list,
/// which is what a frame costs the host before it touches the GPU.
pub struct BenchmarkRunner {
    tick_count: u32,
    base_config: WorldConfig,
    seed_override: Option<u32>,
    tileset: Tileset,
    palette: TilePalette,
}

impl BenchmarkRunner {
    /// Set up a runner with a headless 4x4 atlas of 16px cells; no texture is ever uploaded.
    pub fn new(
        tick_count: u32,
        base_config: WorldConfig,
        seed_override: Option<u32>,
    ) -> Result<Self, TilesetError> {
        let tileset = Tileset::new(TextureHandle(0), 64, 64, 16)?;
        let palette = TilePalette::default();
        tileset.check_palette(&palette)?;
        Ok(Self {
            tick_count,
            base_config,
            seed_override,
            tileset,
            palette,
        })
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, scene: &SceneConfig) -> Result<BenchmarkResult, ConfigError> {
        let seed = self.seed_override.unwrap_or(scene.seed);
        let config = scene.world_config(&self.base_config);
        log::info!(
            "Running scene '{}' (seed {}, {}-tile chunks, {} workers)...",
            scene.name,
            seed,
            config.chunk_size,
            config.generation_workers.max(1)
        );

        let mut map = Map::with_config(seed, config)?;
        let mut controller = WorldController::new();
        let mut biomes = BiomeTracker::new(map.config().biome_change_cooldown);

        let mut frame_times = Vec::with_capacity(self.tick_count as usize);
        let mut generated_chunks = 0;
        let mut evicted_chunks = 0;
        let mut biome_changes = 0;
        let mut quads = 0;

        for tick in 0..self.tick_count {
            let player = scene.position_at(tick);
            let viewport = Viewport::centered_on(player, scene.viewport_size);

            let frame_start = Instant::now();
            let report = controller.tick(&mut map, &viewport);
            // Palette was checked against the atlas in `new`.
            let draw_list = match DrawList::build(&map, &viewport, &self.tileset, &self.palette) {
                Ok(list) => list,
                Err(e) => {
                    log::error!("Draw list failed: {e}");
                    break;
                }
            };
            let elapsed = frame_start.elapsed().as_secs_f64() * 1000.0;
            frame_times.push(elapsed);

            generated_chunks += report.generated;
            evicted_chunks += report.evicted;
            quads = draw_list.len();
            if biomes.update(map.biome_at(player.x, player.y), TICK_DT).is_some() {
                biome_changes += 1;
            }
        }

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.2}ms, p95={:.2}ms, p99={:.2}ms, {} chunks built",
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms,
            generated_chunks
        );

        Ok(BenchmarkResult {
            scene_name: scene.name.to_string(),
            seed,
            chunk_size: map.config().chunk_size,
            tick_count: frame_times.len() as u32,
            generated_chunks,
            evicted_chunks,
            resident_chunks: map.chunk_count(),
            quads,
            biome_changes,
            timings,
        })
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
