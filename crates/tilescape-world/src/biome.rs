use tilescape_core::constants::BIOME_CHANGE_COOLDOWN_SECS;
use tilescape_core::types::Biome;

/// Notification that the tracked position moved into another biome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiomeChange {
    /// None for the first observation.
    pub from: Option<Biome>,
    pub to: Biome,
}

/// Turns a per-tick biome reading into rate-limited change notifications.
///
/// Crossing a biome border back and forth faster than the cooldown yields
/// one notification; once the cooldown has elapsed the current reading wins.
#[derive(Debug, Clone)]
pub struct BiomeTracker {
    current: Option<Biome>,
    since_last_change: f32,
    cooldown: f32,
}

impl Default for BiomeTracker {
    fn default() -> Self {
        Self::new(BIOME_CHANGE_COOLDOWN_SECS)
    }
}

impl BiomeTracker {
    pub fn new(cooldown_secs: f32) -> Self {
        Self {
            current: None,
            since_last_change: 0.0,
            cooldown: cooldown_secs.max(0.0),
        }
    }

    /// Feed the biome under the player and the seconds since the last call.
    pub fn update(&mut self, biome: Biome, dt: f32) -> Option<BiomeChange> {
        self.since_last_change += dt.max(0.0);
        if self.current == Some(biome) {
            return None;
        }
        if self.current.is_some() && self.since_last_change < self.cooldown {
            return None;
        }

        let change = BiomeChange {
            from: self.current,
            to: biome,
        };
        self.current = Some(biome);
        self.since_last_change = 0.0;
        log::info!("Entered {}", biome);
        Some(change)
    }

    /// Last biome that was announced.
    pub fn current(&self) -> Option<Biome> {
        self.current
    }
}
