// src/ui/needs_hud/mod.rs
//
// Needs HUD: four progress bars, a damage flash, a death banner, and the time of day.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::NeedsHudPlugin;
