use tilescape_core::types::Viewport;

use crate::visibility::VisibleRange;
use crate::Map;

/// Where the controller is within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Resident chunks match the last computed range.
    Steady,
    /// Generation/eviction in progress for the current tick.
    Reconciling,
}

/// What one tick changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Padded range the map was reconciled against.
    pub range: VisibleRange,
    /// Chunks built this tick.
    pub generated: usize,
    /// Chunks dropped this tick.
    pub evicted: usize,
    /// Chunks resident after the tick.
    pub resident: usize,
}

/// Keeps a map's resident chunks in step with a moving viewport.
///
/// Each tick: compute the padded visible range, build every missing chunk in
/// it, then evict everything outside it. A tick always fully reconciles.
#[derive(Debug)]
pub struct WorldController {
    state: ControllerState,
    last_range: Option<VisibleRange>,
    ticks: u64,
}

impl Default for WorldController {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldController {
    pub fn new() -> Self {
        Self {
            state: ControllerState::Steady,
            last_range: None,
            ticks: 0,
        }
    }

    /// Reconcile `map` against `viewport`.
    pub fn tick(&mut self, map: &mut Map, viewport: &Viewport) -> TickReport {
        let range = map.visible_range(viewport);
        self.state = ControllerState::Reconciling;

        // Eviction strictly after every build for this range has landed.
        let generated = map.generate_missing(&range);
        let evicted = map.evict_outside(&range);

        let report = TickReport {
            range,
            generated,
            evicted,
            resident: map.chunk_count(),
        };
        debug_assert_eq!(report.resident, range.chunk_count());

        if generated > 0 || evicted > 0 {
            log::debug!(
                "Tick {}: range x {}..={} y {}..={}, generated {}, evicted {}, resident {}",
                self.ticks,
                range.min_x,
                range.max_x,
                range.min_y,
                range.max_y,
                generated,
                evicted,
                report.resident
            );
        }

        self.last_range = Some(range);
        self.ticks += 1;
        self.state = ControllerState::Steady;
        report
    }

    /// Replace the map with a fresh one for `seed`. Nothing from the old seed survives.
    pub fn reseed(&mut self, map: &mut Map, seed: u32) {
        map.reseed(seed);
        self.last_range = None;
        self.state = ControllerState::Steady;
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Range reconciled by the most recent tick, if any since creation or reseed.
    pub fn last_range(&self) -> Option<VisibleRange> {
        self.last_range
    }

    /// Ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use tilescape_core::config::WorldConfig;

    fn small_map(seed: u32) -> Map {
        let config = WorldConfig {
            chunk_size: 8,
            ..WorldConfig::default()
        };
        Map::with_config(seed, config).expect("valid config")
    }

    #[test]
    fn test_tick_materializes_visible_range() {
        let mut map = Map::new(12345);
        let mut controller = WorldController::new();
        let report = controller.tick(&mut map, &Viewport::new(0, 0, 800, 600));

        assert_eq!(report.range, VisibleRange::new(-1, 1, -1, 1));
        assert_eq!(report.generated, 9);
        assert_eq!(report.evicted, 0);
        assert_eq!(report.resident, 9);
        assert_eq!(controller.state(), ControllerState::Steady);
        assert_eq!(controller.last_range(), Some(report.range));
        for coord in report.range.coords() {
            assert!(map.is_chunk_generated(coord.x, coord.y));
        }
    }

    #[test]
    fn test_repeated_tick_is_steady() {
        let mut map = Map::new(1);
        let mut controller = WorldController::new();
        let viewport = Viewport::new(100, 100, 800, 600);
        controller.tick(&mut map, &viewport);
        let report = controller.tick(&mut map, &viewport);
        assert_eq!(report.generated, 0);
        assert_eq!(report.evicted, 0);
        assert_eq!(controller.ticks(), 2);
    }

    #[test]
    fn test_moving_viewport_evicts_behind() {
        let mut map = small_map(3);
        let mut controller = WorldController::new();
        // 8 tiles * 32 px = 256 px chunks.
        let mut viewport = Viewport::new(0, 0, 512, 256);
        controller.tick(&mut map, &viewport);
        assert!(map.is_chunk_generated(-1, 0));

        viewport.position.x += 256 * 5;
        let report = controller.tick(&mut map, &viewport);
        assert!(report.evicted > 0);
        assert!(!map.is_chunk_generated(-1, 0));
        assert_eq!(map.chunk_count(), report.range.chunk_count());
        for coord in map.chunks().coords() {
            assert!(report.range.contains(coord));
        }
    }

    #[test]
    fn test_resident_set_matches_range_during_walk() {
        let mut map = small_map(99);
        let mut controller = WorldController::new();
        let mut pos = IVec2::new(-300, 200);
        for step in 0..60 {
            let delta = match step % 4 {
                0 => IVec2::new(-97, 13),
                1 => IVec2::new(-97, -141),
                2 => IVec2::new(31, -200),
                _ => IVec2::new(-5, 7),
            };
            pos += delta;
            let viewport = Viewport::centered_on(pos, IVec2::new(640, 480));
            let report = controller.tick(&mut map, &viewport);
            assert_eq!(map.chunk_count(), report.range.chunk_count());
            for coord in report.range.coords() {
                assert!(map.is_chunk_generated(coord.x, coord.y));
            }
        }
    }

    #[test]
    fn test_parallel_tick_matches_sequential() {
        let sequential_config = WorldConfig {
            chunk_size: 8,
            ..WorldConfig::default()
        };
        let parallel_config = WorldConfig {
            generation_workers: 4,
            ..sequential_config.clone()
        };
        let mut seq = Map::with_config(5, sequential_config).expect("valid config");
        let mut par = Map::with_config(5, parallel_config).expect("valid config");
        let viewport = Viewport::new(-700, 300, 1280, 720);

        let a = WorldController::new().tick(&mut seq, &viewport);
        let b = WorldController::new().tick(&mut par, &viewport);
        assert_eq!(a, b);
        for (coord, chunk) in seq.chunks().iter() {
            assert_eq!(par.chunks().get(*coord), Some(chunk));
        }
    }

    #[test]
    fn test_tick_at_plane_edge() {
        let mut map = Map::new(1);
        let mut controller = WorldController::new();
        let report = controller.tick(&mut map, &Viewport::new(i32::MAX - 100, 0, 800, 600));
        assert_eq!((report.range.min_x, report.range.max_x), (2_097_150, 2_097_152));
        assert_eq!(report.generated, 9);
        assert_eq!(report.resident, 9);

        // One-pixel chunks push the margin onto the ends of i32.
        let config = WorldConfig {
            chunk_size: 1,
            tile_size: 1,
            ..WorldConfig::default()
        };
        let mut tiny = Map::with_config(1, config).expect("valid config");
        let report = controller.tick(&mut tiny, &Viewport::new(i32::MAX - 5, i32::MIN, 10, 10));
        assert_eq!(
            report.range,
            VisibleRange::new(i32::MAX - 6, i32::MAX, i32::MIN, i32::MIN + 11)
        );
        assert_eq!(report.resident, 7 * 12);
        assert!(tiny.is_chunk_generated(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_reseed_discards_chunks() {
        let mut map = Map::new(1);
        let mut controller = WorldController::new();
        controller.tick(&mut map, &Viewport::new(0, 0, 800, 600));
        assert!(map.chunk_count() > 0);

        controller.reseed(&mut map, 2);
        assert_eq!(map.chunk_count(), 0);
        assert_eq!(map.seed().0, 2);
        assert_eq!(controller.last_range(), None);

        let report = controller.tick(&mut map, &Viewport::new(0, 0, 800, 600));
        assert_eq!(report.generated, 9);
    }
}
