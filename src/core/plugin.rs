//! CorePlugin owns the simulation clock every gameplay system reads its delta from.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

const DEFAULT_TIME_SCALE: f32 = 1.0;
const MIN_TIME_SCALE: f32 = 0.001;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Scaled game time fed to the needs and day/night systems once per frame.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    paused: bool,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SimulationClock {
    pub fn new(time_scale: f32) -> Self {
        Self {
            time_scale: sanitise_scale(time_scale),
            paused: false,
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Sets the time-scale multiplier (clamped to a small positive minimum).
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = sanitise_scale(scale);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Scaled delta of the most recent frame in seconds. Always finite and non-negative.
    pub fn delta_seconds(&self) -> f32 {
        self.last_scaled_delta.as_secs_f32()
    }

    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Applies a real frame delta. A paused clock reports a zero delta.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_scaled_delta = if self.paused {
            Duration::ZERO
        } else {
            real_delta.mul_f32(self.time_scale)
        };
        self.elapsed += self.last_scaled_delta;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

fn sanitise_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.max(MIN_TIME_SCALE)
    } else {
        DEFAULT_TIME_SCALE
    }
}

/// Registers the simulation clock and pause toggle.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    time_scale: f32,
}

impl CorePlugin {
    pub const fn with_time_scale(time_scale: f32) -> Self {
        Self { time_scale }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::with_time_scale(DEFAULT_TIME_SCALE)
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationClock::new(self.time_scale))
            .add_systems(Startup, log_startup_time_scale)
            .add_systems(
                Update,
                (
                    toggle_pause,
                    update_simulation_clock.after(toggle_pause),
                ),
            );

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_scaled_ticks.after(update_simulation_clock));
        }
    }
}

pub fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn toggle_pause(keyboard: Res<ButtonInput<KeyCode>>, mut clock: ResMut<SimulationClock>) {
    if keyboard.just_pressed(KeyCode::KeyP) {
        let paused = !clock.is_paused();
        clock.set_paused(paused);
        info!("Simulation {}", if paused { "paused" } else { "resumed" });
    }
}

fn log_startup_time_scale(clock: Res<SimulationClock>) {
    info!(
        "CorePlugin initialised with time scale: {:.3}",
        clock.time_scale()
    );
}

#[cfg(feature = "core_debug")]
fn log_scaled_ticks(mut timer: ResMut<DebugTickTimer>, clock: Res<SimulationClock>) {
    if timer
        .timer
        .tick(Duration::from_secs_f32(clock.delta_seconds()))
        .just_finished()
    {
        info!(
            target: "core_debug",
            "Sim elapsed: {:.2}s | scale: {:.3} | scaled dt: {:.4}s | paused: {}",
            clock.elapsed().as_secs_f32(),
            clock.time_scale(),
            clock.delta_seconds(),
            clock.is_paused(),
        );
    }
}
