//! Keyframed curves and colour gradients sampled by time of day.
use bevy::{
    math::curve::{Curve, UnevenSampleAutoCurve},
    prelude::*,
};
use serde::Deserialize;

use crate::core::config::finite_or_zero;

/// Keys backing a curve. Bevy's sampled curves need two distinct times, so a single key
/// is held as a constant.
#[derive(Debug, Clone)]
enum Keys<T> {
    Empty,
    Constant(T),
    Sampled(UnevenSampleAutoCurve<T>),
}

impl<T> Default for Keys<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T: StableInterpolate + Copy> Keys<T> {
    fn build(keys: Vec<(f32, T)>) -> Self {
        let first = keys.iter().find(|(time, _)| time.is_finite()).map(|key| key.1);
        match UnevenSampleAutoCurve::new(keys) {
            Ok(curve) => Self::Sampled(curve),
            Err(_) => first.map_or(Self::Empty, Self::Constant),
        }
    }

    /// Samples at `time`, held flat outside the first and last key.
    fn sample(&self, time: f32) -> Option<T> {
        match self {
            Self::Empty => None,
            Self::Constant(value) => Some(*value),
            Self::Sampled(curve) => Some(curve.sample_clamped(finite_or_zero(time))),
        }
    }
}

/// Piecewise-linear scalar curve. Values are held flat outside the first and last key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<[f32; 2]>")]
pub struct ScalarCurve {
    keys: Keys<f32>,
}

impl ScalarCurve {
    pub fn new(keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let keys = keys
            .into_iter()
            .filter(|(_, value)| value.is_finite())
            .collect();
        Self {
            keys: Keys::build(keys),
        }
    }

    pub fn constant(value: f32) -> Self {
        Self::new([(0.0, value)])
    }

    pub fn evaluate(&self, time: f32) -> f32 {
        self.keys.sample(time).unwrap_or(0.0)
    }
}

impl From<Vec<[f32; 2]>> for ScalarCurve {
    fn from(value: Vec<[f32; 2]>) -> Self {
        Self::new(value.into_iter().map(|[time, value]| (time, value)))
    }
}

/// One gradient key as written in TOML: `{ time = 0.5, color = [r, g, b] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawColorKey {
    pub time: f32,
    pub color: [f32; 3],
}

/// Colour gradient authored in sRGB and blended in linear space.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<RawColorKey>")]
pub struct ColorGradient {
    keys: Keys<Vec3>,
}

impl ColorGradient {
    pub fn new(keys: impl IntoIterator<Item = (f32, Color)>) -> Self {
        let keys = keys
            .into_iter()
            .map(|(time, color)| {
                let linear = LinearRgba::from(color);
                (time, Vec3::new(linear.red, linear.green, linear.blue))
            })
            .collect();
        Self {
            keys: Keys::build(keys),
        }
    }

    pub fn constant(color: Color) -> Self {
        Self::new([(0.0, color)])
    }

    pub fn evaluate(&self, time: f32) -> Color {
        let rgb = self.keys.sample(time).unwrap_or(Vec3::ZERO);
        Color::linear_rgb(rgb.x, rgb.y, rgb.z)
    }
}

impl From<Vec<RawColorKey>> for ColorGradient {
    fn from(value: Vec<RawColorKey>) -> Self {
        Self::new(value.into_iter().map(|key| {
            let [r, g, b] = key.color.map(|channel| finite_or_zero(channel).clamp(0.0, 1.0));
            (key.time, Color::srgb(r, g, b))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_interpolates_between_keys() {
        let curve = ScalarCurve::new([(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)]);
        assert_eq!(curve.evaluate(0.25), 0.5);
        assert_eq!(curve.evaluate(0.5), 1.0);
        assert!((curve.evaluate(0.875) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn curve_clamps_outside_keys() {
        let curve = ScalarCurve::new([(0.75, 3.0), (0.25, 1.0)]);
        assert_eq!(curve.evaluate(0.0), 1.0);
        assert_eq!(curve.evaluate(1.0), 3.0);
        assert_eq!(curve.evaluate(0.5), 2.0);
    }

    #[test]
    fn empty_curve_and_gradient_are_zero() {
        assert_eq!(ScalarCurve::default().evaluate(0.3), 0.0);
        let black = LinearRgba::from(ColorGradient::default().evaluate(0.3));
        assert_eq!((black.red, black.green, black.blue), (0.0, 0.0, 0.0));
    }

    #[test]
    fn single_key_holds_everywhere() {
        let curve = ScalarCurve::new([(0.3, 7.0), (0.3, 9.0), (f32::NAN, 1.0)]);
        assert_eq!(curve.evaluate(0.0), 7.0);
        assert_eq!(curve.evaluate(0.9), 7.0);
        assert_eq!(ScalarCurve::constant(2.5).evaluate(f32::NAN), 2.5);
    }

    #[test]
    fn gradient_blends_channels() {
        let gradient = ColorGradient::new([(0.0, Color::BLACK), (1.0, Color::WHITE)]);
        let mid = LinearRgba::from(gradient.evaluate(0.5));
        assert!((mid.red - 0.5).abs() < 1e-5);
        assert!((mid.green - 0.5).abs() < 1e-5);
        assert!((mid.blue - 0.5).abs() < 1e-5);
    }

    #[test]
    fn curve_and_gradient_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Sample {
            curve: ScalarCurve,
            gradient: ColorGradient,
        }

        let sample: Sample = toml::from_str(
            r#"
            curve = [[1.0, 4.0], [0.0, 2.0]]
            gradient = [{ time = 0.0, color = [1.0, 1.0, 1.0] }]
            "#,
        )
        .expect("valid toml");

        assert_eq!(sample.curve.evaluate(0.5), 3.0);
        let white = LinearRgba::from(sample.gradient.evaluate(0.9));
        assert!((white.red - 1.0).abs() < 1e-5);
    }
}
