//! Driver configuration read from the environment.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{GameConfig, Randomizer};
use crate::types::TICK_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Fixed seed, or `None` to seed from the clock
    pub seed: Option<u64>,
    /// Skip the title screen and start in this mode
    pub boss_mode: Option<bool>,
    pub randomizer: Randomizer,
    pub tick_ms: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            boss_mode: None,
            randomizer: Randomizer::Uniform,
            tick_ms: TICK_MS,
        }
    }
}

impl RunConfig {
    /// Read `TETRIS_OVERLORD_*` variables; unset or malformed values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = lookup("TETRIS_OVERLORD_SEED").and_then(|s| s.trim().parse().ok());

        let boss_mode = lookup("TETRIS_OVERLORD_BOSS").map(|v| {
            let v = v.trim();
            v == "1" || v.eq_ignore_ascii_case("true")
        });

        let randomizer = lookup("TETRIS_OVERLORD_RANDOMIZER")
            .and_then(|s| Randomizer::from_str(s.trim()))
            .unwrap_or_default();

        let tick_ms = lookup("TETRIS_OVERLORD_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(TICK_MS);

        Self {
            seed,
            boss_mode,
            randomizer,
            tick_ms,
        }
    }

    /// Seed to use for the next session.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    pub fn game_config(&self, seed: u64, boss_mode: bool) -> GameConfig {
        GameConfig {
            seed,
            boss_mode,
            randomizer: self.randomizer,
        }
    }
}
