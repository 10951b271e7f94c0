use std::process::ExitCode;

use bevy::{prelude::*, window::WindowResolution};


mod config;
mod controller;
mod domain;
mod export;
mod resource;
mod visualizer;

use crate::{
    config::{PlannerConfig, USAGE},
    domain::Room,
    resource::{ConfigRes, RoomRes},
    visualizer::{to_bevy_color, PANEL_WIDTH},
};

fn main() -> ExitCode {
    let config = match PlannerConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let room = Room::new(config.bounds()).with_search_budget(config.search_budget);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Space Planner".to_string(),
                resolution: WindowResolution::new(
                    config.room_width as f32 + PANEL_WIDTH,
                    config.room_height as f32,
                ),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(to_bevy_color(config.background)))
        .insert_resource(RoomRes::from(room))
        .insert_resource(ConfigRes::from(config))
        .add_plugins(controller::Controller)
        .add_plugins(visualizer::Visualizer)
        .run();

    ExitCode::SUCCESS
}
