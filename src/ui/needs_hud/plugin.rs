// src/ui/needs_hud/plugin.rs
//
// Plugin registration for the needs HUD.

use bevy::prelude::*;

use crate::player::systems::{apply_player_stimuli, tick_player_needs};

use super::components::NeedsHudSettings;
use super::systems::{
    fade_damage_flash, show_death_banner, spawn_needs_hud, trigger_damage_flash,
    update_clock_label, update_need_bars,
};

/// Presentation side of the needs simulation.
///
/// # Dependencies
///
/// - `PlayerPlugin` must be registered (provides the needs messages)
/// - `WorldPlugin` must be registered (provides the day/night clock)
pub struct NeedsHudPlugin;

impl Plugin for NeedsHudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NeedsHudSettings>()
            .add_systems(Startup, spawn_needs_hud)
            .add_systems(
                Update,
                (
                    update_need_bars,
                    trigger_damage_flash,
                    fade_damage_flash.after(trigger_damage_flash),
                    show_death_banner,
                    update_clock_label,
                )
                    .after(apply_player_stimuli)
                    .after(tick_player_needs),
            );

        info!("NeedsHudPlugin registered");
    }
}
