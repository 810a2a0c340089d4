use glam::IVec2;
use tilescape_core::config::WorldConfig;
use tilescape_core::constants::DEFAULT_SEED;

/// Configuration for a single benchmark scene: a camera walking in a straight line.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub name: &'static str,
    pub seed: u32,
    /// Camera center at tick 0, in world pixels.
    pub start: IVec2,
    /// Camera movement per tick, in world pixels.
    pub step: IVec2,
    pub viewport_size: IVec2,
    /// Overrides for the base config. None keeps the base value.
    pub chunk_size: Option<u32>,
    pub generation_workers: Option<usize>,
}

impl SceneConfig {
    fn walk(name: &'static str, step: IVec2) -> Self {
        Self {
            name,
            seed: DEFAULT_SEED,
            start: IVec2::ZERO,
            step,
            viewport_size: IVec2::new(800, 600),
            chunk_size: None,
            generation_workers: None,
        }
    }

    /// Camera center at `tick`.
    pub fn position_at(&self, tick: u32) -> IVec2 {
        self.start + self.step * tick as i32
    }

    /// Apply this scene's overrides on top of `base`.
    pub fn world_config(&self, base: &WorldConfig) -> WorldConfig {
        let mut config = base.clone();
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(workers) = self.generation_workers {
            config.generation_workers = workers;
        }
        config
    }
}

/// Return the standard suite of benchmark scenes, from a parked camera to a
/// sprint that crosses a chunk every tick.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig::walk("idle", IVec2::ZERO),
        SceneConfig::walk("walk-east", IVec2::new(4, 0)),
        SceneConfig {
            start: IVec2::new(-2000, -2000),
            ..SceneConfig::walk("walk-southwest", IVec2::new(-3, -3))
        },
        SceneConfig::walk("sprint", IVec2::new(1024, 256)),
        SceneConfig {
            generation_workers: Some(4),
            ..SceneConfig::walk("sprint-parallel", IVec2::new(1024, 256))
        },
        SceneConfig {
            chunk_size: Some(8),
            viewport_size: IVec2::new(1920, 1080),
            ..SceneConfig::walk("small-chunks-hd", IVec2::new(64, 32))
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_names_unique() {
        let scenes = standard_scenes();
        for (i, a) in scenes.iter().enumerate() {
            assert!(scenes[i + 1..].iter().all(|b| b.name != a.name), "duplicate scene {}", a.name);
        }
    }

    #[test]
    fn test_overrides_are_valid() {
        let base = WorldConfig::default();
        for scene in standard_scenes() {
            let config = scene.world_config(&base);
            assert!(config.validate().is_ok(), "scene {} has invalid config", scene.name);
        }
    }

    #[test]
    fn test_position_at() {
        let scene = SceneConfig::walk("t", IVec2::new(-3, 5));
        assert_eq!(scene.position_at(0), IVec2::ZERO);
        assert_eq!(scene.position_at(10), IVec2::new(-30, 50));
    }
}
