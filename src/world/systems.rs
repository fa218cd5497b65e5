//! Scene setup for the world module.
use bevy::{math::primitives::Plane3d, prelude::*};

use crate::world::{
    components::{Moon, Reflective, Sun, WorldCamera},
    time::LightingSample,
};

const GROUND_SCALE: f32 = 100.0;
const CAMERA_START_POS: Vec3 = Vec3::new(-12.0, 8.0, 16.0);
const GROUND_REFLECTANCE: f32 = 0.5;

/// Spawns the initial scene: ground plane, sun and moon lights, and a camera.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    lighting: Res<LightingSample>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(90, 140, 90),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            reflectance: GROUND_REFLECTANCE * lighting.reflections_multiplier,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
        Reflective {
            base_reflectance: GROUND_REFLECTANCE,
        },
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: lighting.sun_illuminance,
            color: lighting.sun_color,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(lighting.sun_rotation),
        Sun,
        Name::new("Sun"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: lighting.moon_illuminance,
            color: lighting.moon_color,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(lighting.moon_rotation),
        Moon,
        Name::new("Moon"),
    ));

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_START_POS).looking_at(Vec3::ZERO, Vec3::Y),
        WorldCamera,
    ));
}

/// Scales the reflectance of tagged materials by the current reflections multiplier.
pub fn apply_reflection_intensity(
    lighting: Res<LightingSample>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    query: Query<(&MeshMaterial3d<StandardMaterial>, &Reflective)>,
) {
    if !lighting.is_changed() {
        return;
    }

    for (handle, reflective) in query.iter() {
        let target =
            (reflective.base_reflectance * lighting.reflections_multiplier).clamp(0.0, 1.0);
        // Only touch changed materials so unchanged ones are not re-uploaded.
        let stale = materials
            .get(&handle.0)
            .is_some_and(|material| material.reflectance != target);
        if !stale {
            continue;
        }
        if let Some(material) = materials.get_mut(&handle.0) {
            material.reflectance = target;
        }
    }
}
