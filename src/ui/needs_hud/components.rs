// src/ui/needs_hud/components.rs
//
// Components and resources for the needs HUD.

use bevy::prelude::*;

use crate::player::needs::NeedKind;

/// Fill node of a single need bar.
#[derive(Component, Debug)]
pub struct NeedBarFill {
    pub kind: NeedKind,
}

/// Full-screen overlay that flashes when the player is hurt.
#[derive(Component, Debug)]
pub struct DamageFlash {
    timer: Timer,
}

impl DamageFlash {
    pub fn new(duration_secs: f32) -> Self {
        let mut timer = Timer::from_seconds(duration_secs, TimerMode::Once);
        // start finished so nothing shows until the first hit
        timer.tick(timer.duration());
        Self { timer }
    }

    pub fn trigger(&mut self) {
        self.timer.reset();
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        self.timer.tick(delta);
    }

    /// Overlay opacity scale: 1.0 right after a hit, fading linearly to 0.0.
    pub fn alpha(&self) -> f32 {
        if self.timer.is_finished() {
            return 0.0;
        }
        let duration = self.timer.duration().as_secs_f32();
        if duration <= f32::EPSILON {
            return 0.0;
        }
        (self.timer.remaining_secs() / duration).clamp(0.0, 1.0)
    }
}

/// Banner shown once the player dies.
#[derive(Component, Debug)]
pub struct DeathBanner;

/// Text showing the current day and time.
#[derive(Component, Debug)]
pub struct ClockLabel;

/// Layout and colour settings for the needs HUD.
#[derive(Resource, Debug)]
pub struct NeedsHudSettings {
    /// Bar width (pixels).
    pub bar_width: f32,

    /// Bar height (pixels).
    pub bar_height: f32,

    /// Offset from the top-left corner (pixels).
    pub margin: f32,

    /// Label font size (points).
    pub label_font_size: f32,

    /// How long the damage flash takes to fade (seconds).
    pub flash_seconds: f32,

    /// Peak opacity of the damage flash.
    pub flash_max_alpha: f32,
}

impl Default for NeedsHudSettings {
    fn default() -> Self {
        Self {
            bar_width: 180.0,
            bar_height: 14.0,
            margin: 16.0,
            label_font_size: 14.0,
            flash_seconds: 0.6,
            flash_max_alpha: 0.35,
        }
    }
}

pub fn bar_color(kind: NeedKind) -> Color {
    match kind {
        NeedKind::Health => Color::srgb(0.8, 0.2, 0.2),
        NeedKind::Hunger => Color::srgb(0.85, 0.6, 0.2),
        NeedKind::Thirst => Color::srgb(0.25, 0.55, 0.9),
        NeedKind::Sleep => Color::srgb(0.55, 0.45, 0.85),
    }
}
