//! Messages exchanged between the needs simulation and its presentation.
use bevy::prelude::Message;

use super::needs::NeedsPercentages;

/// Fired after any change to the player's needs while alive.
#[derive(Message, Debug, Clone, Copy)]
pub struct NeedsChangedEvent {
    pub percentages: NeedsPercentages,
}

/// Fired when the player takes physical damage.
#[derive(Message, Debug, Clone, Copy)]
pub struct PlayerDamagedEvent {
    pub amount: i32,
    /// Health fraction left after the hit.
    pub health: f32,
}

/// Fired once, when health first reaches zero.
#[derive(Message, Debug, Clone, Copy)]
pub struct PlayerDiedEvent;

/// External stimuli applied to the player's needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stimulus {
    Heal(f32),
    Eat(f32),
    Drink(f32),
    Sleep(f32),
    Damage(i32),
}

/// Request to apply a stimulus to the player.
#[derive(Message, Debug, Clone, Copy)]
pub struct PlayerStimulusEvent {
    pub stimulus: Stimulus,
}

impl PlayerStimulusEvent {
    pub fn new(stimulus: Stimulus) -> Self {
        Self { stimulus }
    }
}
