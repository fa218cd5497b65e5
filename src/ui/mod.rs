// src/ui/mod.rs
//
// UI module providing screen-space HUD elements.
//
// Current features:
// - Needs HUD (health/hunger/thirst/sleep bars, damage flash, death banner)
// - Time-of-day readout

pub mod needs_hud;

pub use needs_hud::NeedsHudPlugin as UiPlugin;
