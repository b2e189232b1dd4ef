//! Replay scripts: a seed, a mode and a list of `(dt, actions)` steps.
//!
//! ```json
//! { "seed": 7, "boss_mode": true, "randomizer": "uniform",
//!   "steps": [ { "dt": 16, "actions": ["moveLeft", "rotate", "hardDrop"] } ] }
//! ```
//!
//! Action and randomizer names are case-insensitive. Each step's actions are
//! applied before its tick.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, Randomizer};
use crate::types::{GameAction, TICK_MS};
use crate::ReplayError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub boss_mode: bool,
    #[serde(default)]
    pub randomizer: RandomizerName,
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayStep {
    #[serde(default = "default_dt")]
    pub dt: u32,
    #[serde(default)]
    pub actions: Vec<String>,
}

fn default_dt() -> u32 {
    TICK_MS
}

/// Randomizer as named in a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomizerName(pub Randomizer);

impl Serialize for RandomizerName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for RandomizerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = RandomizerName;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "\"uniform\" or \"bag7\"")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Randomizer::from_str(v)
                    .map(RandomizerName)
                    .ok_or_else(|| E::invalid_value(serde::de::Unexpected::Str(v), &self))
            }
        }
        deserializer.deserialize_str(V)
    }
}

/// A step with its actions resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub dt: u32,
    pub actions: Vec<GameAction>,
}

impl ReplayScript {
    pub fn from_json(text: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig {
            seed: self.seed,
            boss_mode: self.boss_mode,
            randomizer: self.randomizer.0,
        }
    }

    /// Resolve every action name, failing on the first unknown one.
    pub fn plan(&self) -> Result<Vec<PlannedStep>, ReplayError> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let actions = step
                    .actions
                    .iter()
                    .map(|name| {
                        GameAction::from_str(name).ok_or_else(|| ReplayError::UnknownAction {
                            step: index,
                            name: name.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PlannedStep {
                    dt: step.dt,
                    actions,
                })
            })
            .collect()
    }
}
