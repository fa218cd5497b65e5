use bevy::prelude::*;

mod core;
mod player;
mod ui;
mod world;

use crate::{core::CorePlugin, player::PlayerPlugin, ui::UiPlugin, world::WorldPlugin};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            CorePlugin::default(),
            WorldPlugin,
            PlayerPlugin,
            UiPlugin, // After PlayerPlugin so the needs messages are registered
        ))
        .run();
}
