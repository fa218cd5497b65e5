//! Player plugin wiring needs simulation systems.
use bevy::prelude::*;

use crate::{
    core::plugin::update_simulation_clock,
    player::{
        config::NeedsConfig,
        events::{NeedsChangedEvent, PlayerDamagedEvent, PlayerDiedEvent, PlayerStimulusEvent},
        systems::{
            apply_player_stimuli, handle_debug_stimulus_keys, spawn_player, tick_player_needs,
        },
    },
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        let config = NeedsConfig::load_or_default();
        info!(
            "Needs configured: hunger -{:.2}/s, thirst -{:.2}/s, sleep +{:.2}/s, starvation -{:.2}/s, dehydration -{:.2}/s",
            config.hunger.decay_rate,
            config.thirst.decay_rate,
            config.sleep.regen_rate,
            config.no_hunger_health_decay,
            config.no_thirst_health_decay
        );

        app.insert_resource(config)
            .add_message::<PlayerStimulusEvent>()
            .add_message::<NeedsChangedEvent>()
            .add_message::<PlayerDamagedEvent>()
            .add_message::<PlayerDiedEvent>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (
                    handle_debug_stimulus_keys,
                    apply_player_stimuli.after(handle_debug_stimulus_keys),
                    tick_player_needs
                        .after(apply_player_stimuli)
                        .after(update_simulation_clock),
                ),
            );
    }
}
