//! Player survival needs: bounded resources, per-tick decay, and the death transition.
use std::fmt;

use bevy::prelude::*;

use super::config::{NeedConfig, NeedsConfig};
use crate::core::config::finite_or_zero;

/// Anything at or below this maximum is treated as a degenerate (always empty) need.
pub const NEED_EPSILON: f32 = 0.000_01;

/// A single bounded need such as hunger or thirst.
#[derive(Debug, Clone, PartialEq)]
pub struct Need {
    current: f32,
    pub max_value: f32,
    pub start_value: f32,
    pub regen_rate: f32,
    pub decay_rate: f32,
}

impl Need {
    pub fn new(config: &NeedConfig) -> Self {
        Self {
            current: 0.0,
            max_value: config.max_value,
            start_value: config.start_value,
            regen_rate: config.regen_rate,
            decay_rate: config.decay_rate,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn is_degenerate(&self) -> bool {
        self.max_value.is_nan() || self.max_value <= NEED_EPSILON
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn add(&mut self, amount: f32) {
        self.set(self.current + finite_or_zero(amount));
    }

    pub fn subtract(&mut self, amount: f32) {
        self.set(self.current - finite_or_zero(amount));
    }

    /// Returns the fill fraction in `[0, 1]`; degenerate needs always report 0.
    pub fn percentage(&self) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }
        (self.current.clamp(0.0, self.max_value) / self.max_value).clamp(0.0, 1.0)
    }

    fn reset_to_start(&mut self) {
        let start = if self.start_value > 0.0 {
            self.start_value
        } else {
            self.max_value
        };
        self.set(start);
    }

    fn refill(&mut self) {
        self.set(self.max_value);
    }

    fn set(&mut self, value: f32) {
        if self.is_degenerate() {
            self.current = 0.0;
            return;
        }
        self.current = finite_or_zero(value).clamp(0.0, self.max_value);
    }
}

/// Identifies one of the four tracked needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeedKind {
    Health,
    Hunger,
    Thirst,
    Sleep,
}

impl NeedKind {
    pub const ALL: [NeedKind; 4] = [Self::Health, Self::Hunger, Self::Thirst, Self::Sleep];

    pub fn label(self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Hunger => "Hunger",
            Self::Thirst => "Thirst",
            Self::Sleep => "Sleep",
        }
    }
}

/// Fill fractions for every need, ready for display.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NeedsPercentages {
    pub health: f32,
    pub hunger: f32,
    pub thirst: f32,
    pub sleep: f32,
}

impl NeedsPercentages {
    pub fn get(&self, kind: NeedKind) -> f32 {
        match kind {
            NeedKind::Health => self.health,
            NeedKind::Hunger => self.hunger,
            NeedKind::Thirst => self.thirst,
            NeedKind::Sleep => self.sleep,
        }
    }
}

/// Result of a mutation applied while the player was still alive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NeedsUpdate {
    pub percentages: NeedsPercentages,
    /// Set when physical damage was taken.
    pub damaged: bool,
    /// Set only on the call that moved the player from alive to dead.
    pub died: bool,
}

/// Anomalies corrected while initialising needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedsInitWarning {
    HealthReset,
}

impl fmt::Display for NeedsInitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HealthReset => write!(
                f,
                "Health start value resolved to zero or less; reset to its maximum"
            ),
        }
    }
}

/// Receives physical damage from the world (fire, enemies, falls).
pub trait Damageable {
    fn take_physical_damage(&mut self, amount: i32) -> Option<NeedsUpdate>;
}

/// Survival state attached to the player entity.
#[derive(Component, Debug, Clone)]
pub struct PlayerNeeds {
    health: Need,
    hunger: Need,
    thirst: Need,
    sleep: Need,
    no_hunger_health_decay: f32,
    no_thirst_health_decay: f32,
    is_dead: bool,
}

impl PlayerNeeds {
    /// Builds needs from config. Call [`PlayerNeeds::initialize`] before ticking.
    pub fn new(config: &NeedsConfig) -> Self {
        Self {
            health: Need::new(&config.health),
            hunger: Need::new(&config.hunger),
            thirst: Need::new(&config.thirst),
            sleep: Need::new(&config.sleep),
            no_hunger_health_decay: config.no_hunger_health_decay,
            no_thirst_health_decay: config.no_thirst_health_decay,
            is_dead: false,
        }
    }

    /// Applies start values and range clamps. Returns a warning when health had to be refilled.
    pub fn initialize(&mut self) -> Option<NeedsInitWarning> {
        self.is_dead = false;
        for kind in NeedKind::ALL {
            self.need_mut(kind).reset_to_start();
        }

        if self.health.current <= 0.0 {
            self.health.refill();
            return Some(NeedsInitWarning::HealthReset);
        }
        None
    }

    pub fn need(&self, kind: NeedKind) -> &Need {
        match kind {
            NeedKind::Health => &self.health,
            NeedKind::Hunger => &self.hunger,
            NeedKind::Thirst => &self.thirst,
            NeedKind::Sleep => &self.sleep,
        }
    }

    fn need_mut(&mut self, kind: NeedKind) -> &mut Need {
        match kind {
            NeedKind::Health => &mut self.health,
            NeedKind::Hunger => &mut self.hunger,
            NeedKind::Thirst => &mut self.thirst,
            NeedKind::Sleep => &mut self.sleep,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn percentages(&self) -> NeedsPercentages {
        NeedsPercentages {
            health: self.health.percentage(),
            hunger: self.hunger.percentage(),
            thirst: self.thirst.percentage(),
            sleep: self.sleep.percentage(),
        }
    }

    /// Advances decay and regeneration by `delta_seconds`.
    pub fn tick(&mut self, delta_seconds: f32) -> Option<NeedsUpdate> {
        if self.is_dead {
            return None;
        }
        let dt = finite_or_zero(delta_seconds).max(0.0);

        self.hunger.subtract(self.hunger.decay_rate * dt);
        self.thirst.subtract(self.thirst.decay_rate * dt);
        self.sleep.add(self.sleep.regen_rate * dt);

        if self.hunger.is_empty() {
            self.health.subtract(self.no_hunger_health_decay * dt);
        }
        if self.thirst.is_empty() {
            self.health.subtract(self.no_thirst_health_decay * dt);
        }

        Some(self.finish_update(false))
    }

    pub fn heal(&mut self, amount: f32) -> Option<NeedsUpdate> {
        self.stimulate(NeedKind::Health, amount)
    }

    pub fn eat(&mut self, amount: f32) -> Option<NeedsUpdate> {
        self.stimulate(NeedKind::Hunger, amount)
    }

    pub fn drink(&mut self, amount: f32) -> Option<NeedsUpdate> {
        self.stimulate(NeedKind::Thirst, amount)
    }

    /// Spends sleep; resting refills it through `regen_rate` on tick.
    pub fn sleep_for(&mut self, amount: f32) -> Option<NeedsUpdate> {
        self.stimulate(NeedKind::Sleep, -amount)
    }

    fn stimulate(&mut self, kind: NeedKind, amount: f32) -> Option<NeedsUpdate> {
        if self.is_dead {
            return None;
        }
        self.need_mut(kind).add(amount);
        Some(self.finish_update(false))
    }

    fn finish_update(&mut self, damaged: bool) -> NeedsUpdate {
        let died = self.check_death();
        NeedsUpdate {
            percentages: self.percentages(),
            damaged,
            died,
        }
    }

    /// Single alive-to-dead transition shared by every mutating path.
    fn check_death(&mut self) -> bool {
        if self.is_dead || self.health.current > 0.0 {
            return false;
        }
        self.is_dead = true;
        true
    }
}

impl Damageable for PlayerNeeds {
    fn take_physical_damage(&mut self, amount: i32) -> Option<NeedsUpdate> {
        if self.is_dead {
            return None;
        }
        self.health.subtract(amount as f32);
        Some(self.finish_update(true))
    }
}
