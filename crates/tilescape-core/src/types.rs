use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Chunk coordinate in chunk-space (each unit = chunk_size tiles).
pub type ChunkCoord = IVec2;

/// World position in pixels.
pub type WorldPos = IVec2;

/// Root seed of a world. Every noise channel is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Seed(pub u32);

impl Seed {
    /// Seed from the text a player typed, ignoring surrounding whitespace.
    ///
    /// Text that parses as a `u32` is taken verbatim, so `"12345"` names the
    /// same world as `Seed(12345)` rather than the hash of its digits.
    /// Anything else goes through the `hash * 31 + byte` rolling hash with
    /// each byte read as a signed `char`, wrapping on overflow. Bytes at or
    /// above `0x80` therefore subtract from the hash.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if let Ok(value) = trimmed.parse::<u32>() {
            return Self(value);
        }
        let hash = trimmed.bytes().fold(0u32, |hash, b| {
            hash.wrapping_mul(31).wrapping_add(b as i8 as i32 as u32)
        });
        Self(hash)
    }

    /// Derived seed for one noise channel.
    pub fn offset(self, offset: u32) -> u32 {
        self.0.wrapping_add(offset)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terrain type of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileType {
    #[default]
    Grass = 0,
    Water = 1,
    Sand = 2,
    Snow = 3,
    DeepWater = 4,
    Mud = 5,
    Ice = 6,
    SnowyGrass = 7,
    SnowySand = 8,
    SnowyMud = 9,
}

impl TileType {
    /// Number of tile types.
    pub const COUNT: usize = 10;

    /// All tile types in discriminant order.
    pub const ALL: [TileType; Self::COUNT] = [
        TileType::Grass,
        TileType::Water,
        TileType::Sand,
        TileType::Snow,
        TileType::DeepWater,
        TileType::Mud,
        TileType::Ice,
        TileType::SnowyGrass,
        TileType::SnowySand,
        TileType::SnowyMud,
    ];

    /// Index into per-type tables.
    pub fn index(self) -> usize {
        self as u8 as usize
    }

    /// Human-readable name for debug display.
    pub fn name(self) -> &'static str {
        match self {
            TileType::Grass => "Grass",
            TileType::Water => "Water",
            TileType::Sand => "Sand",
            TileType::Snow => "Snow",
            TileType::DeepWater => "Deep Water",
            TileType::Mud => "Mud",
            TileType::Ice => "Ice",
            TileType::SnowyGrass => "Snowy Grass",
            TileType::SnowySand => "Snowy Sand",
            TileType::SnowyMud => "Snowy Mud",
        }
    }

    /// Liquid water of any depth. Ice does not count.
    pub fn is_water(self) -> bool {
        matches!(self, TileType::Water | TileType::DeepWater)
    }
}

/// Large-scale region a position belongs to, selected by the biome channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Grassland,
    Tundra,
}

impl Biome {
    pub fn name(self) -> &'static str {
        match self {
            Biome::Grassland => "Grassland",
            Biome::Tundra => "Tundra",
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Camera rectangle in world pixels. Owned by the caller; the world only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Top-left corner.
    pub position: IVec2,
    /// Width and height. Negative extents are treated as zero.
    pub size: IVec2,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    /// Camera of the given size centered on a world position (player follow).
    pub fn centered_on(center: WorldPos, size: IVec2) -> Self {
        Self {
            position: center - size / 2,
            size,
        }
    }

    /// Exclusive bottom-right corner, clamped to `i32::MAX`.
    pub fn end(&self) -> IVec2 {
        let size = self.size.max(IVec2::ZERO);
        IVec2::new(
            self.position.x.saturating_add(size.x),
            self.position.y.saturating_add(size.y),
        )
    }

    /// Whether a world pixel lies inside the rectangle.
    pub fn contains(&self, point: WorldPos) -> bool {
        let end = self.end();
        point.x >= self.position.x
            && point.x < end.x
            && point.y >= self.position.y
            && point.y < end.y
    }
}
