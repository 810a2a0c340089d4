use fastnoise_lite::{FastNoiseLite, NoiseType};
use tilescape_core::config::{NoiseKind, NoiseSettings};
use tilescape_core::constants::{BIOME_SEED_OFFSET, ELEVATION_SEED_OFFSET, RIVER_SEED_OFFSET};
use tilescape_core::types::Seed;

/// Logical noise channel. Each one gets its own derived seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseChannel {
    /// Fine relief inside a biome.
    Elevation,
    /// Coarse region selector (grassland vs tundra).
    Biome,
    /// Rivers run where the absolute value is close to zero.
    River,
}

impl NoiseChannel {
    pub const ALL: [NoiseChannel; 3] = [
        NoiseChannel::Elevation,
        NoiseChannel::Biome,
        NoiseChannel::River,
    ];

    /// Offset added to the root seed for this channel.
    pub fn seed_offset(self) -> u32 {
        match self {
            NoiseChannel::Elevation => ELEVATION_SEED_OFFSET,
            NoiseChannel::Biome => BIOME_SEED_OFFSET,
            NoiseChannel::River => RIVER_SEED_OFFSET,
        }
    }
}

/// Largest scaled coordinate (`position * frequency`) passed to the generator.
/// FastNoiseLite floors scaled coordinates into `i32`, so anything beyond this
/// is clamped. Only chunks past the `i32` pixel plane ever reach it.
const MAX_SCALED_COORD: f32 = (1 << 29) as f32;

/// One seeded coherent-noise function. Output is in [-1, 1].
pub struct NoiseField {
    seed: u32,
    /// Largest absolute sample coordinate, `MAX_SCALED_COORD / frequency`.
    limit: f32,
    noise: FastNoiseLite,
}

impl NoiseField {
    pub fn new(seed: u32, frequency: f32, kind: NoiseKind) -> Self {
        // FastNoiseLite takes an i32 seed; reinterpret the bits.
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(match kind {
            NoiseKind::Perlin => NoiseType::Perlin,
            NoiseKind::OpenSimplex2 => NoiseType::OpenSimplex2,
        }));
        noise.set_frequency(Some(frequency));
        Self {
            seed,
            limit: MAX_SCALED_COORD / frequency.abs(),
            noise,
        }
    }

    /// Sample at a position in tile units. Pure; never fails for finite input.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let x = x.clamp(-self.limit, self.limit);
        let y = y.clamp(-self.limit, self.limit);
        self.noise.get_noise_2d(x, y)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

/// The three channels of one world, all derived from the same root seed.
pub struct NoiseChannels {
    seed: Seed,
    elevation: NoiseField,
    biome: NoiseField,
    river: NoiseField,
}

impl NoiseChannels {
    pub fn new(seed: Seed, settings: &NoiseSettings) -> Self {
        let field = |channel: NoiseChannel, frequency: f32| {
            NoiseField::new(seed.offset(channel.seed_offset()), frequency, settings.kind)
        };
        Self {
            seed,
            elevation: field(NoiseChannel::Elevation, settings.elevation_frequency),
            biome: field(NoiseChannel::Biome, settings.biome_frequency),
            river: field(NoiseChannel::River, settings.river_frequency),
        }
    }

    /// Sample one channel at a tile-space position.
    pub fn sample(&self, channel: NoiseChannel, x: f32, y: f32) -> f32 {
        self.field(channel).sample(x, y)
    }

    pub fn field(&self, channel: NoiseChannel) -> &NoiseField {
        match channel {
            NoiseChannel::Elevation => &self.elevation,
            NoiseChannel::Biome => &self.biome,
            NoiseChannel::River => &self.river,
        }
    }

    /// Root seed these channels were derived from.
    pub fn seed(&self) -> Seed {
        self.seed
    }
}
