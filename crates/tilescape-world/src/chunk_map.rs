use std::collections::{HashMap, HashSet};

use tilescape_core::types::ChunkCoord;

use crate::chunk::Chunk;
use crate::visibility::VisibleRange;

/// Resident chunks keyed by coordinate. At most one entry per coordinate.
#[derive(Debug, Default)]
pub struct ChunkStore {
    chunks: HashMap<ChunkCoord, Chunk>,
    /// Coordinates currently being built by a batch. Never overlaps `chunks`.
    in_flight: HashSet<ChunkCoord>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a chunk is resident at `coord`.
    pub fn is_generated(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Build and insert the chunk at `coord` unless it is already resident.
    /// Returns true if a chunk was built.
    pub fn generate<F>(&mut self, coord: ChunkCoord, build: F) -> bool
    where
        F: FnOnce(ChunkCoord) -> Chunk,
    {
        if self.is_generated(coord) || self.in_flight.contains(&coord) {
            return false;
        }
        let chunk = build(coord);
        debug_assert_eq!(
            chunk.coord(),
            coord,
            "builder returned a chunk for the wrong coordinate"
        );
        self.chunks.insert(coord, chunk);
        true
    }

    /// Build every missing coordinate in `coords` on up to `workers` threads.
    ///
    /// Duplicates and resident coordinates are skipped, and each remaining
    /// coordinate is marked in-flight so exactly one build runs for it. Results
    /// are inserted only after every worker has finished, so a caller that
    /// evicts after this returns never races a build. Returns the number of
    /// chunks inserted.
    pub fn generate_batch<I, F>(&mut self, coords: I, workers: usize, build: F) -> usize
    where
        I: IntoIterator<Item = ChunkCoord>,
        F: Fn(ChunkCoord) -> Chunk + Sync,
    {
        let mut pending = Vec::new();
        for coord in coords {
            if self.is_generated(coord) || !self.in_flight.insert(coord) {
                continue;
            }
            pending.push(coord);
        }
        if pending.is_empty() {
            return 0;
        }

        // Unmarks `pending` on every exit, including a panicking build.
        let guard = InFlightGuard {
            in_flight: &mut self.in_flight,
            coords: &pending,
        };

        let workers = workers.clamp(1, pending.len());
        let built: Vec<Chunk> = if workers == 1 {
            pending.iter().map(|&coord| build(coord)).collect()
        } else {
            let per_worker = pending.len().div_ceil(workers);
            let build = &build;
            std::thread::scope(|scope| {
                let handles: Vec<_> = pending
                    .chunks(per_worker)
                    .map(|slice| {
                        scope.spawn(move || slice.iter().map(|&c| build(c)).collect::<Vec<_>>())
                    })
                    .collect();
                handles
                    .into_iter()
                    .flat_map(|handle| match handle.join() {
                        Ok(chunks) => chunks,
                        Err(payload) => std::panic::resume_unwind(payload),
                    })
                    .collect()
            })
        };
        drop(guard);

        let count = built.len();
        for chunk in built {
            self.chunks.insert(chunk.coord(), chunk);
        }
        count
    }

    /// Insert a chunk, replacing any previous entry at its coordinate.
    pub fn insert(&mut self, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(chunk.coord(), chunk)
    }

    /// Drop every chunk outside the inclusive range. Returns how many were removed.
    pub fn evict_outside(&mut self, range: &VisibleRange) -> usize {
        let before = self.chunks.len();
        self.chunks.retain(|coord, _| range.contains(*coord));
        before - self.chunks.len()
    }

    /// Get a chunk by coordinate.
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Iterator over all resident chunks, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &Chunk)> {
        self.chunks.iter()
    }

    /// Resident coordinates, in no particular order.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Number of resident chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Clears a batch's coordinates from the in-flight set when dropped.
struct InFlightGuard<'a> {
    in_flight: &'a mut HashSet<ChunkCoord>,
    coords: &'a [ChunkCoord],
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        for coord in self.coords {
            self.in_flight.remove(coord);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tilescape_core::types::TileType;

    fn filled(coord: ChunkCoord) -> Chunk {
        Chunk::filled(coord, 4, TileType::Grass)
    }

    #[test]
    fn test_generate_idempotent() {
        let mut store = ChunkStore::new();
        let coord = IVec2::new(2, -3);
        let builds = Cell::new(0);
        let build = |c| {
            builds.set(builds.get() + 1);
            filled(c)
        };
        assert!(store.generate(coord, build));
        let snapshot = store.get(coord).cloned();
        assert!(!store.generate(coord, |c| {
            builds.set(builds.get() + 1);
            Chunk::filled(c, 4, TileType::Water)
        }));
        assert_eq!(builds.get(), 1, "second generate must not rebuild");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(coord).cloned(), snapshot);
    }

    #[test]
    fn test_insert_replaces() {
        let mut store = ChunkStore::new();
        let coord = IVec2::new(0, 0);
        assert!(store.insert(filled(coord)).is_none());
        let old = store.insert(Chunk::filled(coord, 4, TileType::Snow));
        assert_eq!(old.map(|c| c.tiles()[0]), Some(TileType::Grass));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(coord).map(|c| c.tiles()[0]), Some(TileType::Snow));
    }

    #[test]
    fn test_evict_outside_completeness() {
        let mut store = ChunkStore::new();
        for x in -4..=4 {
            for y in -4..=4 {
                store.generate(IVec2::new(x, y), filled);
            }
        }
        let range = VisibleRange::new(-1, 2, 0, 3);
        let inside_before: Vec<ChunkCoord> =
            store.coords().filter(|c| range.contains(*c)).collect();

        let evicted = store.evict_outside(&range);

        assert_eq!(evicted, 81 - 4 * 4);
        for coord in store.coords() {
            assert!(range.contains(coord), "{coord} survived eviction");
        }
        for coord in inside_before {
            assert!(store.is_generated(coord), "{coord} inside bounds was evicted");
        }
    }

    #[test]
    fn test_evict_outside_empty_store() {
        let mut store = ChunkStore::new();
        assert_eq!(store.evict_outside(&VisibleRange::new(0, 0, 0, 0)), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_generate_batch_skips_resident_and_duplicates() {
        let mut store = ChunkStore::new();
        store.generate(IVec2::new(0, 0), filled);
        let builds = AtomicUsize::new(0);
        let coords = vec![
            IVec2::new(0, 0),
            IVec2::new(1, 0),
            IVec2::new(1, 0),
            IVec2::new(2, 0),
        ];
        let inserted = store.generate_batch(coords, 4, |c| {
            builds.fetch_add(1, Ordering::SeqCst);
            filled(c)
        });
        assert_eq!(inserted, 2);
        assert_eq!(builds.load(Ordering::SeqCst), 2);
        assert_eq!(store.len(), 3);
        assert!(store.in_flight.is_empty());
    }

    #[test]
    fn test_generate_batch_panic_releases_in_flight() {
        let poisoned = IVec2::new(1, 0);
        for workers in [1, 3] {
            let mut store = ChunkStore::new();
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                let coords = (0..6).map(|x| IVec2::new(x, 0));
                store.generate_batch(coords, workers, |c| {
                    if c == poisoned {
                        panic!("build failed for {c}");
                    }
                    filled(c)
                })
            }));
            assert!(result.is_err(), "panic must reach the caller ({workers} workers)");
            assert!(store.in_flight.is_empty(), "{workers} workers left coords in flight");
            assert!(store.is_empty());
            // The coordinate can be built again once the batch is gone.
            assert!(store.generate(poisoned, filled));
            assert_eq!(store.generate_batch([poisoned, IVec2::new(2, 0)], workers, filled), 1);
        }
    }

    #[test]
    fn test_generate_batch_matches_sequential() {
        let range = VisibleRange::new(-3, 3, -2, 2);
        let build = |c: ChunkCoord| {
            let tile = if (c.x + c.y).rem_euclid(2) == 0 {
                TileType::Grass
            } else {
                TileType::Water
            };
            Chunk::filled(c, 4, tile)
        };

        let mut sequential = ChunkStore::new();
        for coord in range.coords() {
            sequential.generate(coord, build);
        }
        let mut parallel = ChunkStore::new();
        let inserted = parallel.generate_batch(range.coords(), 3, build);

        assert_eq!(inserted, range.chunk_count());
        assert_eq!(parallel.len(), sequential.len());
        for (coord, chunk) in sequential.iter() {
            assert_eq!(parallel.get(*coord), Some(chunk));
        }
    }
}
