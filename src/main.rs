mod config;
mod game;
mod plugins;

use bevy::prelude::*;

use config::tuning::Tuning;
use plugins::{game_plugin::GamePlugin, ui_plugin::UiPlugin};

fn main() {
    let tuning = Tuning::load_or_default();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Burst Step".into(),
                        resolution: (tuning.window_width, tuning.window_height).into(),
                        ..default()
                    }),
                    ..default()
                })
                // crisp pixel rendering
                .set(ImagePlugin::default_nearest()),
        )
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Time::<Fixed>::from_seconds(tuning.dt as f64))
        .insert_resource(tuning)
        .add_plugins(GamePlugin)
        .add_plugins(UiPlugin)
        .run();
}
