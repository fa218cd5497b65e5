//! Components used by the world module.
use bevy::prelude::*;

/// Marker component for the directional light driven as the sun.
#[derive(Component, Debug, Default)]
pub struct Sun;

/// Marker component for the directional light driven as the moon.
#[derive(Component, Debug, Default)]
pub struct Moon;

/// Marker component for the scene camera.
#[derive(Component, Debug, Default)]
pub struct WorldCamera;

/// Material whose specular reflectance follows the day/night reflections curve.
#[derive(Component, Debug)]
pub struct Reflective {
    pub base_reflectance: f32,
}
