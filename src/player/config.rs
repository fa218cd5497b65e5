use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::config::{finite_or_zero, load_toml, ConfigError};

const CONFIG_PATH: &str = "config/needs.toml";

const DEFAULT_HEALTH: NeedConfig = NeedConfig {
    max_value: 100.0,
    start_value: 100.0,
    regen_rate: 0.0,
    decay_rate: 0.0,
};
const DEFAULT_HUNGER: NeedConfig = NeedConfig {
    max_value: 100.0,
    start_value: 100.0,
    regen_rate: 0.0,
    decay_rate: 0.5,
};
const DEFAULT_THIRST: NeedConfig = NeedConfig {
    max_value: 100.0,
    start_value: 100.0,
    regen_rate: 0.0,
    decay_rate: 0.8,
};
const DEFAULT_SLEEP: NeedConfig = NeedConfig {
    max_value: 100.0,
    start_value: 100.0,
    regen_rate: 1.0,
    decay_rate: 0.0,
};
const DEFAULT_STARVATION_DECAY: f32 = 1.0;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawNeedsConfig {
    health: RawNeed,
    hunger: RawNeed,
    thirst: RawNeed,
    sleep: RawNeed,
    no_hunger_health_decay: Option<f32>,
    no_thirst_health_decay: Option<f32>,
    debug_keys: RawDebugKeys,
}

/// Per-need overrides; anything left out keeps that need's own default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawNeed {
    max_value: Option<f32>,
    start_value: Option<f32>,
    regen_rate: Option<f32>,
    decay_rate: Option<f32>,
}

impl RawNeed {
    fn over(self, base: NeedConfig) -> NeedConfig {
        // A non-positive maximum stays as-is; the need treats it as degenerate.
        NeedConfig {
            max_value: finite_or_zero(self.max_value.unwrap_or(base.max_value)),
            start_value: finite_or_zero(self.start_value.unwrap_or(base.start_value)),
            regen_rate: finite_or_zero(self.regen_rate.unwrap_or(base.regen_rate)).max(0.0),
            decay_rate: finite_or_zero(self.decay_rate.unwrap_or(base.decay_rate)).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDebugKeys {
    eat: f32,
    drink: f32,
    heal: f32,
    rest: f32,
    damage: i32,
}

impl Default for RawDebugKeys {
    fn default() -> Self {
        Self {
            eat: 25.0,
            drink: 25.0,
            heal: 20.0,
            rest: 30.0,
            damage: 10,
        }
    }
}

/// Limits and rates for a single need.
#[derive(Debug, Clone, PartialEq)]
pub struct NeedConfig {
    pub max_value: f32,
    pub start_value: f32,
    pub regen_rate: f32,
    pub decay_rate: f32,
}

/// Stimulus amounts bound to the debug hotkeys.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugKeyAmounts {
    pub eat: f32,
    pub drink: f32,
    pub heal: f32,
    pub rest: f32,
    pub damage: i32,
}

/// Runtime configuration derived from `config/needs.toml`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct NeedsConfig {
    pub health: NeedConfig,
    pub hunger: NeedConfig,
    pub thirst: NeedConfig,
    pub sleep: NeedConfig,
    pub no_hunger_health_decay: f32,
    pub no_thirst_health_decay: f32,
    pub debug_keys: DebugKeyAmounts,
}

impl NeedsConfig {
    pub fn load_or_default() -> Self {
        match Self::load_from_path(Path::new(CONFIG_PATH)) {
            Ok(config) => config,
            Err(err) => {
                warn!("{}. Falling back to default needs.", err);
                RawNeedsConfig::default().into()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        load_toml::<RawNeedsConfig>(path).map(Self::from)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_toml_str(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawNeedsConfig>(data).map(Self::from)
    }
}

impl Default for NeedsConfig {
    fn default() -> Self {
        RawNeedsConfig::default().into()
    }
}

impl From<RawNeedsConfig> for NeedsConfig {
    fn from(value: RawNeedsConfig) -> Self {
        let keys = value.debug_keys;
        Self {
            health: value.health.over(DEFAULT_HEALTH),
            hunger: value.hunger.over(DEFAULT_HUNGER),
            thirst: value.thirst.over(DEFAULT_THIRST),
            sleep: value.sleep.over(DEFAULT_SLEEP),
            no_hunger_health_decay: starvation_decay(value.no_hunger_health_decay),
            no_thirst_health_decay: starvation_decay(value.no_thirst_health_decay),
            debug_keys: DebugKeyAmounts {
                eat: finite_or_zero(keys.eat).max(0.0),
                drink: finite_or_zero(keys.drink).max(0.0),
                heal: finite_or_zero(keys.heal).max(0.0),
                rest: finite_or_zero(keys.rest).max(0.0),
                damage: keys.damage.max(0),
            },
        }
    }
}

fn starvation_decay(value: Option<f32>) -> f32 {
    finite_or_zero(value.unwrap_or(DEFAULT_STARVATION_DECAY)).max(0.0)
}
