//! World module housing scene setup and the day/night cycle.
pub mod components;
pub mod curve;
pub mod plugin;
pub mod systems;
pub mod time;

pub use plugin::WorldPlugin;
