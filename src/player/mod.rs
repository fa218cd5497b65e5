//! Player module - survival needs, their config, and the messages the HUD listens to.

pub mod components;
pub mod config;
pub mod events;
pub mod needs;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
