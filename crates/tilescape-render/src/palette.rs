use tilescape_core::types::TileType;

/// How one tile type is drawn: a tint and a cell in the tileset atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileAppearance {
    /// Linear RGB multiplier applied to the atlas cell.
    pub color: [f32; 3],
    pub atlas_index: u32,
}

/// Fixed `TileType` -> appearance table, indexed by `TileType::index()`.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePalette {
    entries: [TileAppearance; TileType::COUNT],
}

impl Default for TilePalette {
    fn default() -> Self {
        Self {
            entries: build_default_entries(),
        }
    }
}

impl TilePalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn appearance(&self, tile: TileType) -> TileAppearance {
        self.entries[tile.index()]
    }

    pub fn color(&self, tile: TileType) -> [f32; 3] {
        self.entries[tile.index()].color
    }

    pub fn atlas_index(&self, tile: TileType) -> u32 {
        self.entries[tile.index()].atlas_index
    }

    /// Override one entry. Used for alternate tilesets with a different atlas layout.
    pub fn with_appearance(mut self, tile: TileType, appearance: TileAppearance) -> Self {
        self.entries[tile.index()] = appearance;
        self
    }

    /// Every tile type with its appearance, in discriminant order.
    pub fn iter(&self) -> impl Iterator<Item = (TileType, TileAppearance)> + '_ {
        TileType::ALL.iter().map(move |&tile| (tile, self.entries[tile.index()]))
    }
}

fn build_default_entries() -> [TileAppearance; TileType::COUNT] {
    TileType::ALL.map(|tile| TileAppearance {
        color: default_color(tile),
        // Atlas cells are laid out in discriminant order.
        atlas_index: tile.index() as u32,
    })
}

fn default_color(tile: TileType) -> [f32; 3] {
    match tile {
        TileType::Grass => [0.34, 0.60, 0.24],
        TileType::Water => [0.20, 0.40, 0.64],
        TileType::Sand => [0.87, 0.78, 0.55],
        TileType::Snow => [0.94, 0.96, 0.98],
        TileType::DeepWater => [0.12, 0.24, 0.47],
        TileType::Mud => [0.43, 0.33, 0.23],
        TileType::Ice => [0.70, 0.86, 0.94],
        TileType::SnowyGrass => [0.78, 0.86, 0.78],
        TileType::SnowySand => [0.90, 0.89, 0.82],
        TileType::SnowyMud => [0.67, 0.63, 0.59],
    }
}
