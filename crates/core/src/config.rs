use crate::rng::Randomizer;

/// Session parameters fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameConfig {
    /// Seed for the session RNG when the engine creates its own generator.
    pub seed: u64,
    /// Enable the boss encounter.
    pub boss_mode: bool,
    pub randomizer: Randomizer,
}

impl GameConfig {
    pub fn classic(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn boss(seed: u64) -> Self {
        Self {
            seed,
            boss_mode: true,
            ..Self::default()
        }
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }
}
