//! Day/night configuration, the time-of-day clock, and the sun/moon lighting systems.
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{
    config::{finite_or_zero, load_toml, ConfigError},
    plugin::SimulationClock,
};
use crate::world::{
    components::{Moon, Sun},
    curve::{ColorGradient, ScalarCurve},
};

const CONFIG_PATH: &str = "config/day_night.toml";
const MIN_DAY_LENGTH_SECONDS: f32 = 1.0;
const SUNRISE: f32 = 0.25;
const MOONRISE: f32 = 0.75;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDayNightConfig {
    full_day_length_seconds: f32,
    start_time: f32,
    noon: [f32; 3],
    ambient_brightness: f32,
    lighting_intensity: ScalarCurve,
    reflections_intensity: ScalarCurve,
    sun: RawCelestialSection,
    moon: RawCelestialSection,
}

impl Default for RawDayNightConfig {
    fn default() -> Self {
        Self {
            full_day_length_seconds: 240.0,
            start_time: 0.4,
            noon: [90.0, 0.0, 0.0],
            ambient_brightness: 400.0,
            lighting_intensity: ScalarCurve::new([
                (0.0, 0.2),
                (0.25, 0.6),
                (0.5, 1.0),
                (0.75, 0.6),
                (1.0, 0.2),
            ]),
            reflections_intensity: ScalarCurve::new([
                (0.0, 0.1),
                (0.25, 0.5),
                (0.5, 1.0),
                (0.75, 0.5),
                (1.0, 0.1),
            ]),
            sun: RawCelestialSection::default(),
            moon: RawCelestialSection::default(),
        }
    }
}

/// Overrides for one light; anything left out keeps that light's own default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawCelestialSection {
    max_illuminance: Option<f32>,
    intensity: Option<ScalarCurve>,
    color: Option<ColorGradient>,
}

impl RawCelestialSection {
    fn over(self, base: CelestialSettings) -> CelestialSettings {
        CelestialSettings {
            max_illuminance: finite_or_zero(self.max_illuminance.unwrap_or(base.max_illuminance))
                .max(0.0),
            intensity: self.intensity.unwrap_or(base.intensity),
            color: self.color.unwrap_or(base.color),
        }
    }
}

/// Curve set for one directional light (the sun or the moon).
#[derive(Debug, Clone)]
pub struct CelestialSettings {
    pub max_illuminance: f32,
    pub intensity: ScalarCurve,
    pub color: ColorGradient,
}

impl CelestialSettings {
    fn sun() -> Self {
        Self {
            max_illuminance: 20_000.0,
            intensity: ScalarCurve::new([
                (0.0, 0.0),
                (0.2, 0.0),
                (0.25, 0.3),
                (0.5, 1.0),
                (0.75, 0.3),
                (0.8, 0.0),
                (1.0, 0.0),
            ]),
            color: ColorGradient::new([
                (0.0, Color::srgb(0.1, 0.1, 0.3)),
                (0.25, Color::srgb(1.0, 0.6, 0.35)),
                (0.5, Color::srgb(1.0, 0.97, 0.9)),
                (0.75, Color::srgb(1.0, 0.45, 0.3)),
                (1.0, Color::srgb(0.1, 0.1, 0.3)),
            ]),
        }
    }

    fn moon() -> Self {
        Self {
            max_illuminance: 400.0,
            intensity: ScalarCurve::new([
                (0.0, 1.0),
                (0.2, 1.0),
                (0.25, 0.0),
                (0.75, 0.0),
                (0.8, 1.0),
                (1.0, 1.0),
            ]),
            color: ColorGradient::constant(Color::srgb(0.6, 0.7, 1.0)),
        }
    }
}

/// Tunable parameters describing the day/night cycle.
#[derive(Resource, Debug, Clone)]
pub struct DayNightSettings {
    pub full_day_length_seconds: f32,
    pub start_time: f32,
    /// Euler rotation (degrees, pitch/yaw/roll) the sun reaches at noon.
    pub noon: Vec3,
    pub ambient_brightness: f32,
    pub lighting_intensity: ScalarCurve,
    pub reflections_intensity: ScalarCurve,
    pub sun: CelestialSettings,
    pub moon: CelestialSettings,
}

impl DayNightSettings {
    pub fn load_or_default() -> Self {
        match Self::load_from_path(Path::new(CONFIG_PATH)) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("{}. Falling back to defaults.", err);
                RawDayNightConfig::default().into()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        load_toml::<RawDayNightConfig>(path).map(Self::from)
    }

    /// Fraction of a day advanced per simulated second.
    pub fn time_rate(&self) -> f32 {
        1.0 / self.full_day_length_seconds
    }
}

impl Default for DayNightSettings {
    fn default() -> Self {
        RawDayNightConfig::default().into()
    }
}

impl From<RawDayNightConfig> for DayNightSettings {
    fn from(value: RawDayNightConfig) -> Self {
        let [pitch, yaw, roll] = value.noon.map(finite_or_zero);
        Self {
            full_day_length_seconds: finite_or_zero(value.full_day_length_seconds)
                .max(MIN_DAY_LENGTH_SECONDS),
            start_time: normalise_time(finite_or_zero(value.start_time).clamp(0.0, 1.0)),
            noon: Vec3::new(pitch, yaw, roll),
            ambient_brightness: finite_or_zero(value.ambient_brightness).max(0.0),
            lighting_intensity: value.lighting_intensity,
            reflections_intensity: value.reflections_intensity,
            sun: value.sun.over(CelestialSettings::sun()),
            moon: value.moon.over(CelestialSettings::moon()),
        }
    }
}

fn normalise_time(time: f32) -> f32 {
    if time >= 1.0 {
        0.0
    } else {
        time
    }
}

/// Runtime state for the day/night cycle.
#[derive(Resource, Debug)]
pub struct DayNightClock {
    time_of_day: f32,
    day_count: u64,
}

impl DayNightClock {
    pub fn new(settings: &DayNightSettings) -> Self {
        Self {
            time_of_day: settings.start_time,
            day_count: 0,
        }
    }

    /// Normalised day fraction in `[0, 1)`: 0.25 sunrise, 0.5 noon, 0.75 sunset.
    pub fn time_of_day(&self) -> f32 {
        self.time_of_day
    }

    pub fn day_count(&self) -> u64 {
        self.day_count
    }

    /// Advances the day. Crossing midnight snaps back to 0 and counts a new day.
    pub fn tick(&mut self, delta_seconds: f32, settings: &DayNightSettings) {
        let fraction = finite_or_zero(delta_seconds * settings.time_rate()).max(0.0);
        self.time_of_day += fraction;
        if self.time_of_day >= 1.0 {
            self.time_of_day = 0.0;
            self.day_count = self.day_count.saturating_add(1);
        }
    }
}

/// Lighting state derived from a time of day.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LightingSample {
    pub sun_rotation: Quat,
    pub sun_illuminance: f32,
    pub sun_color: Color,
    pub sun_enabled: bool,
    pub moon_rotation: Quat,
    pub moon_illuminance: f32,
    pub moon_color: Color,
    pub moon_enabled: bool,
    pub ambient_multiplier: f32,
    pub reflections_multiplier: f32,
}

impl Default for LightingSample {
    fn default() -> Self {
        sample_lighting(0.0, &DayNightSettings::default())
    }
}

/// Evaluates every lighting curve for `time_of_day`.
pub fn sample_lighting(time_of_day: f32, settings: &DayNightSettings) -> LightingSample {
    let sun_strength = settings.sun.intensity.evaluate(time_of_day).max(0.0);
    let moon_strength = settings.moon.intensity.evaluate(time_of_day).max(0.0);

    LightingSample {
        sun_rotation: celestial_rotation(time_of_day - SUNRISE, settings.noon),
        sun_illuminance: sun_strength * settings.sun.max_illuminance,
        sun_color: settings.sun.color.evaluate(time_of_day),
        sun_enabled: sun_strength > 0.0,
        moon_rotation: celestial_rotation(time_of_day - MOONRISE, settings.noon),
        moon_illuminance: moon_strength * settings.moon.max_illuminance,
        moon_color: settings.moon.color.evaluate(time_of_day),
        moon_enabled: moon_strength > 0.0,
        ambient_multiplier: settings.lighting_intensity.evaluate(time_of_day).max(0.0),
        reflections_multiplier: settings.reflections_intensity.evaluate(time_of_day).max(0.0),
    }
}

/// Quarter of a day from rise reaches the `noon` rotation. The angles are left-handed
/// (positive pitch tips the light downward, positive yaw turns it clockwise seen from above),
/// so mirroring into Bevy's frame flips pitch and yaw.
fn celestial_rotation(offset: f32, noon: Vec3) -> Quat {
    let euler = noon * offset * 4.0;
    Quat::from_euler(
        EulerRot::YXZ,
        -euler.y.to_radians(),
        -euler.x.to_radians(),
        euler.z.to_radians(),
    )
    .normalize()
}

/// Advances the day/night clock based on the SimulationClock delta.
pub fn advance_day_night_clock(
    mut clock: ResMut<DayNightClock>,
    settings: Res<DayNightSettings>,
    simulation_clock: Res<SimulationClock>,
) {
    let previous_day = clock.day_count();
    clock.tick(simulation_clock.delta_seconds(), &settings);
    if clock.day_count() != previous_day {
        info!("Day {} begins", clock.day_count() + 1);
    }
}

/// Applies the sampled lighting to the sun, the moon, and the ambient light.
#[allow(clippy::type_complexity)]
pub fn apply_day_night_lighting(
    clock: Res<DayNightClock>,
    settings: Res<DayNightSettings>,
    mut sample: ResMut<LightingSample>,
    mut ambient: ResMut<AmbientLight>,
    mut sun_query: Query<
        (&mut Transform, &mut DirectionalLight, &mut Visibility),
        (With<Sun>, Without<Moon>),
    >,
    mut moon_query: Query<
        (&mut Transform, &mut DirectionalLight, &mut Visibility),
        (With<Moon>, Without<Sun>),
    >,
) {
    *sample = sample_lighting(clock.time_of_day(), &settings);

    for (mut transform, mut light, mut visibility) in sun_query.iter_mut() {
        transform.rotation = sample.sun_rotation;
        light.illuminance = sample.sun_illuminance;
        light.color = sample.sun_color;
        set_enabled(&mut visibility, sample.sun_enabled);
    }

    for (mut transform, mut light, mut visibility) in moon_query.iter_mut() {
        transform.rotation = sample.moon_rotation;
        light.illuminance = sample.moon_illuminance;
        light.color = sample.moon_color;
        set_enabled(&mut visibility, sample.moon_enabled);
    }

    ambient.brightness = settings.ambient_brightness * sample.ambient_multiplier;
}

fn set_enabled(visibility: &mut Visibility, enabled: bool) {
    let target = if enabled {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    if *visibility != target {
        *visibility = target;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn direction(rotation: Quat) -> Vec3 {
        rotation * Vec3::NEG_Z
    }

    #[test]
    fn clock_starts_at_configured_time() {
        let settings = DayNightSettings::default();
        let clock = DayNightClock::new(&settings);
        assert_eq!(clock.time_of_day(), 0.4);
        assert_eq!(clock.day_count(), 0);
    }

    #[test]
    fn clock_resets_at_midnight() {
        let settings = DayNightSettings {
            full_day_length_seconds: 10.0,
            start_time: 0.0,
            ..DayNightSettings::default()
        };
        let mut clock = DayNightClock::new(&settings);
        clock.tick(5.0, &settings);
        assert!((clock.time_of_day() - 0.5).abs() < 1e-6);

        clock.tick(6.0, &settings);
        assert_eq!(clock.time_of_day(), 0.0);
        assert_eq!(clock.day_count(), 1);
    }

    #[test]
    fn clock_ignores_bad_deltas() {
        let settings = DayNightSettings::default();
        let mut clock = DayNightClock::new(&settings);
        clock.tick(-30.0, &settings);
        clock.tick(f32::NAN, &settings);
        assert_eq!(clock.time_of_day(), 0.4);
    }

    #[test]
    fn sun_points_down_at_noon_and_moon_is_off() {
        let sample = sample_lighting(0.5, &DayNightSettings::default());
        assert!(direction(sample.sun_rotation).distance(Vec3::NEG_Y) < 1e-4);
        assert!(direction(sample.moon_rotation).distance(Vec3::Y) < 1e-4);
        assert!(sample.sun_enabled);
        assert!(!sample.moon_enabled);
        assert!((sample.sun_illuminance - 20_000.0).abs() < 1e-2);
        assert_eq!(sample.moon_illuminance, 0.0);
    }

    #[test]
    fn sun_is_horizontal_at_sunrise() {
        let sample = sample_lighting(0.25, &DayNightSettings::default());
        assert!(direction(sample.sun_rotation).distance(Vec3::NEG_Z) < 1e-4);
    }

    #[test]
    fn moon_takes_over_at_midnight() {
        let sample = sample_lighting(0.0, &DayNightSettings::default());
        assert!(!sample.sun_enabled);
        assert!(sample.moon_enabled);
        assert!((sample.ambient_multiplier - 0.2).abs() < 1e-6);
    }

    #[test]
    fn settings_sanitise_raw_values() {
        let raw: RawDayNightConfig = toml::from_str(
            r#"
            full_day_length_seconds = -5.0
            start_time = 1.5

            [sun]
            max_illuminance = -100.0
            "#,
        )
        .expect("valid toml");
        let settings = DayNightSettings::from(raw);

        assert_eq!(settings.full_day_length_seconds, MIN_DAY_LENGTH_SECONDS);
        assert_eq!(settings.start_time, 0.0);
        assert_eq!(settings.sun.max_illuminance, 0.0);
        assert_eq!(settings.noon, Vec3::new(90.0, 0.0, 0.0));
    }

    #[test]
    fn partial_light_section_keeps_its_curves() {
        let raw: RawDayNightConfig = toml::from_str(
            r#"
            [sun]
            max_illuminance = 5000.0
            "#,
        )
        .expect("valid toml");
        let settings = DayNightSettings::from(raw);

        let noon = sample_lighting(0.5, &settings);
        assert!(noon.sun_enabled);
        assert!((noon.sun_illuminance - 5000.0).abs() < 1e-2);
        assert_eq!(settings.moon.max_illuminance, 400.0);
        let midnight = sample_lighting(0.0, &settings);
        assert!(midnight.moon_enabled);
        assert!((midnight.moon_illuminance - 400.0).abs() < 1e-2);
    }

    #[test]
    fn positive_yaw_turns_towards_positive_x() {
        let settings = DayNightSettings {
            noon: Vec3::new(0.0, 90.0, 0.0),
            ..DayNightSettings::default()
        };
        let sample = sample_lighting(0.5, &settings);
        assert!(direction(sample.sun_rotation).distance(Vec3::X) < 1e-4);
    }

    #[test]
    fn shipped_config_parses() {
        let settings = DayNightSettings::load_from_path(Path::new(CONFIG_PATH));
        assert!(settings.is_ok(), "{:?}", settings.err());
    }

    #[test]
    fn lighting_system_updates_lights() {
        let mut app = App::new();
        let settings = DayNightSettings::default();
        let mut clock = DayNightClock::new(&settings);
        clock.tick(0.1 * settings.full_day_length_seconds, &settings);

        app.insert_resource(clock)
            .insert_resource(settings)
            .init_resource::<LightingSample>()
            .init_resource::<AmbientLight>()
            .add_systems(Update, apply_day_night_lighting);

        let sun = app
            .world_mut()
            .spawn((Sun, DirectionalLight::default(), Transform::default()))
            .id();
        let moon = app
            .world_mut()
            .spawn((Moon, DirectionalLight::default(), Transform::default()))
            .id();
        app.update();

        let world = app.world();
        // at half past noon the sun shines and the moon is hidden
        assert_eq!(world.get::<Visibility>(sun), Some(&Visibility::Inherited));
        assert_eq!(world.get::<Visibility>(moon), Some(&Visibility::Hidden));
        let sample = world.resource::<LightingSample>();
        assert!(sample.sun_enabled);
        let ambient = world.resource::<AmbientLight>();
        assert!((ambient.brightness - 400.0).abs() < 1e-2);
    }

    #[test]
    fn advance_system_reads_simulation_clock() {
        let mut app = App::new();
        let settings = DayNightSettings::default();
        let mut simulation_clock = SimulationClock::default();
        simulation_clock.tick(Duration::from_secs_f32(24.0));

        app.insert_resource(DayNightClock::new(&settings))
            .insert_resource(settings)
            .insert_resource(simulation_clock)
            .add_systems(Update, advance_day_night_clock);
        app.update();

        let clock = app.world().resource::<DayNightClock>();
        assert!((clock.time_of_day() - 0.5).abs() < 1e-5);
    }
}
