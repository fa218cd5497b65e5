//! WorldPlugin coordinates scene setup and time-of-day lighting.
use bevy::prelude::*;

use crate::{
    core::plugin::update_simulation_clock,
    world::{
        systems::{apply_reflection_intensity, spawn_world_environment},
        time::{
            advance_day_night_clock, apply_day_night_lighting, sample_lighting, DayNightClock,
            DayNightSettings,
        },
    },
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        let settings = DayNightSettings::load_or_default();
        info!(
            "Day/night configured: day length {:.1}s, starting at {:.2}",
            settings.full_day_length_seconds, settings.start_time
        );

        let clock = DayNightClock::new(&settings);
        let initial_lighting = sample_lighting(clock.time_of_day(), &settings);

        app.insert_resource(settings)
            .insert_resource(clock)
            .insert_resource(initial_lighting)
            .add_systems(Startup, spawn_world_environment)
            .add_systems(
                Update,
                (
                    advance_day_night_clock.after(update_simulation_clock),
                    apply_day_night_lighting.after(advance_day_night_clock),
                    apply_reflection_intensity.after(apply_day_night_lighting),
                ),
            );
    }
}
