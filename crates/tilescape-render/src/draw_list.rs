use bytemuck::Zeroable;
use glam::IVec2;
use tilescape_core::types::{TileType, Viewport};
use tilescape_world::Map;

use crate::palette::TilePalette;
use crate::tileset::{TextureHandle, Tileset, TilesetError};

/// One instanced tile quad. Must match the tile instance layout in the host's shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileQuad {
    /// Top-left corner in pixels, relative to the viewport origin.
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub color: [f32; 4],
}

/// Quads for every tile that overlaps a viewport, ready for an instance buffer.
#[derive(Debug, Clone)]
pub struct DrawList {
    texture: TextureHandle,
    origin: IVec2,
    quads: Vec<TileQuad>,
}

impl DrawList {
    /// Collect the resident tiles under `viewport`.
    ///
    /// Chunks that are not resident are skipped rather than drawn as the
    /// fallback tile; tick the world controller first.
    pub fn build(
        map: &Map,
        viewport: &Viewport,
        tileset: &Tileset,
        palette: &TilePalette,
    ) -> Result<Self, TilesetError> {
        tileset.check_palette(palette)?;

        // One lookup per tile type instead of per tile.
        let mut templates = [TileQuad::zeroed(); TileType::COUNT];
        for (tile, appearance) in palette.iter() {
            let (uv_min, uv_max) = tileset
                .uv_rect(appearance.atlas_index)
                .ok_or(TilesetError::AtlasIndexOutOfRange {
                    tile: tile.name(),
                    index: appearance.atlas_index,
                    count: tileset.cell_count(),
                })?;
            let [r, g, b] = appearance.color;
            templates[tile.index()] = TileQuad {
                position: [0.0; 2],
                size: [0.0; 2],
                uv_min: uv_min.to_array(),
                uv_max: uv_max.to_array(),
                color: [r, g, b, 1.0],
            };
        }

        let tile_size = map.config().tile_size;
        let extent = tile_size as i32;
        let start = viewport.position;
        let end = viewport.end();
        let mut quads = Vec::new();

        for chunk in map.visible_chunks(viewport) {
            for placed in chunk.placed_tiles(tile_size) {
                let p = placed.position;
                if p.x >= end.x
                    || p.y >= end.y
                    || p.x.saturating_add(extent) <= start.x
                    || p.y.saturating_add(extent) <= start.y
                {
                    continue;
                }
                let mut quad = templates[placed.tile_type.index()];
                quad.position = (p - start).as_vec2().to_array();
                quad.size = [tile_size as f32; 2];
                quads.push(quad);
            }
        }

        log::debug!(
            "Draw list: {} quads for viewport at ({}, {})",
            quads.len(),
            start.x,
            start.y
        );
        Ok(Self {
            texture: tileset.texture(),
            origin: start,
            quads,
        })
    }

    /// Texture the quads sample from.
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// World pixel the quad positions are relative to.
    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    pub fn quads(&self) -> &[TileQuad] {
        &self.quads
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Raw bytes for uploading as an instance buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.quads)
    }
}
