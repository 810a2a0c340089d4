use glam::IVec2;
use tilescape_core::constants::VISIBLE_MARGIN_CHUNKS;
use tilescape_core::math::{chunk_span, floor_div};
use tilescape_core::types::{ChunkCoord, Viewport};

/// Inclusive rectangle of chunk coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibleRange {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl VisibleRange {
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Whether a chunk coordinate lies inside the inclusive bounds.
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        coord.x >= self.min_x
            && coord.x <= self.max_x
            && coord.y >= self.min_y
            && coord.y <= self.max_y
    }

    /// True when `other` lies entirely inside `self`.
    pub fn covers(&self, other: &VisibleRange) -> bool {
        other.is_empty()
            || (other.min_x >= self.min_x
                && other.max_x <= self.max_x
                && other.min_y >= self.min_y
                && other.max_y <= self.max_y)
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Number of chunk coordinates inside the range.
    pub fn chunk_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let w = (self.max_x as i64 - self.min_x as i64 + 1) as usize;
        let h = (self.max_y as i64 - self.min_y as i64 + 1) as usize;
        w * h
    }

    /// Every coordinate in the range, row by row.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_y..=self.max_y).flat_map(move |y| (min_x..=max_x).map(move |x| IVec2::new(x, y)))
    }

    /// Grow the range by `chunks` on every side, stopping at the ends of `i32`.
    pub fn expanded(&self, chunks: i32) -> Self {
        Self::new(
            self.min_x.saturating_sub(chunks),
            self.max_x.saturating_add(chunks),
            self.min_y.saturating_sub(chunks),
            self.max_y.saturating_add(chunks),
        )
    }
}

/// Chunk range that must be resident for a viewport: every chunk the
/// rectangle touches plus a ring of `VISIBLE_MARGIN_CHUNKS` around it.
///
/// With a 32x32-tile chunk of 32px tiles, viewport `(0, 0, 800, 600)` gives
/// `-1..=1` on both axes.
pub fn visible_range(viewport: &Viewport, chunk_size: u32, tile_size: u32) -> VisibleRange {
    let span = chunk_span(chunk_size, tile_size);
    let start = viewport.position;
    let end = viewport.end();
    VisibleRange::new(
        floor_div(start.x, span),
        floor_div(end.x, span),
        floor_div(start.y, span),
        floor_div(end.y, span),
    )
    .expanded(VISIBLE_MARGIN_CHUNKS)
}

/// Chunks the viewport actually shows, without margin.
///
/// The upper bound comes from the last visible pixel, so a viewport that ends
/// exactly on a chunk border does not include the next chunk.
pub fn intersecting_range(viewport: &Viewport, chunk_size: u32, tile_size: u32) -> VisibleRange {
    let span = chunk_span(chunk_size, tile_size);
    let start = viewport.position;
    let end = viewport.end();
    if end.x <= start.x || end.y <= start.y {
        // Degenerate viewport: nothing is on screen.
        return VisibleRange::new(0, -1, 0, -1);
    }
    VisibleRange::new(
        floor_div(start.x, span),
        floor_div(end.x - 1, span),
        floor_div(start.y, span),
        floor_div(end.y - 1, span),
    )
}
