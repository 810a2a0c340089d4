use glam::{UVec2, Vec2};
use tilescape_core::types::TileType;

use crate::palette::TilePalette;

/// Opaque id of a texture owned by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Debug, thiserror::Error)]
pub enum TilesetError {
    #[error("tile cell size must be non-zero")]
    ZeroCellSize,

    #[error("texture {width}x{height} is empty")]
    EmptyTexture { width: u32, height: u32 },

    #[error("texture {width}x{height} is not a whole number of {cell}px cells")]
    UnevenAtlas { width: u32, height: u32, cell: u32 },

    #[error("{tile} uses atlas cell {index}, atlas has {count}")]
    AtlasIndexOutOfRange {
        tile: &'static str,
        index: u32,
        count: u32,
    },
}

/// Tile atlas: a texture handle plus the grid of square cells cut from it.
///
/// The handle is owned here and lent to the draw-list builder; nothing in the
/// world crate refers to textures.
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
    texture: TextureHandle,
    texture_size: UVec2,
    cell: u32,
    grid: UVec2,
}

impl Tileset {
    /// Describe an atlas of `cell`-pixel cells laid out row by row.
    pub fn new(
        texture: TextureHandle,
        width: u32,
        height: u32,
        cell: u32,
    ) -> Result<Self, TilesetError> {
        if cell == 0 {
            return Err(TilesetError::ZeroCellSize);
        }
        if width == 0 || height == 0 {
            return Err(TilesetError::EmptyTexture { width, height });
        }
        if width % cell != 0 || height % cell != 0 {
            return Err(TilesetError::UnevenAtlas { width, height, cell });
        }

        let grid = UVec2::new(width / cell, height / cell);
        log::debug!(
            "Tileset {:?}: {}x{} px, {} cells of {}px",
            texture,
            width,
            height,
            grid.x * grid.y,
            cell
        );
        Ok(Self {
            texture,
            texture_size: UVec2::new(width, height),
            cell,
            grid,
        })
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Number of cells in the atlas.
    pub fn cell_count(&self) -> u32 {
        self.grid.x * self.grid.y
    }

    /// Normalized `(min, max)` texture coordinates of an atlas cell.
    pub fn uv_rect(&self, index: u32) -> Option<(Vec2, Vec2)> {
        if index >= self.cell_count() {
            return None;
        }
        let cell = UVec2::new(index % self.grid.x, index / self.grid.x);
        let size = self.texture_size.as_vec2();
        let min = (cell * self.cell).as_vec2() / size;
        let max = ((cell + UVec2::ONE) * self.cell).as_vec2() / size;
        Some((min, max))
    }

    /// Check that every palette entry points at a real cell.
    pub fn check_palette(&self, palette: &TilePalette) -> Result<(), TilesetError> {
        let count = self.cell_count();
        for tile in TileType::ALL {
            let index = palette.atlas_index(tile);
            if index >= count {
                return Err(TilesetError::AtlasIndexOutOfRange {
                    tile: tile.name(),
                    index,
                    count,
                });
            }
        }
        Ok(())
    }
}
