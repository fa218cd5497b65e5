//! Core timing, config loading, and logging shared by every gameplay module.
pub mod config;
pub mod plugin;

pub use plugin::CorePlugin;
