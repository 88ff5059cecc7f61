use bevy::{prelude::*, window::WindowResolution};

use line_sim::domain::{
    Background, BeaconKind, Position, Simulation, SimulationError, UpdateOptions,
};

mod controller;
mod resource;
mod simulator;
mod visualizer;

const FALLBACK_START: Position = Position::new(30.0, 30.0);

fn main() -> Result<(), SimulationError> {
    let background = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .unwrap_or_else(|_| Background::Custom(arg.into())),
        None => Background::Lines,
    };
    let start = background.default_start().unwrap_or(FALLBACK_START);

    let mut simulation = Simulation::new(start, background)?;
    let autopilot = controller::Autopilot::install(&mut simulation)?;
    simulation.add_beacon(Position::new(250.0, 450.0), BeaconKind::Magnetic);
    simulation.add_beacon(Position::new(450.0, 250.0), BeaconKind::Infrared);

    let (width, height) = simulation.raster().dimensions();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "LineSim".to_string(),
                resolution: WindowResolution::new(width as f32, height as f32),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(resource::SimulationRes::from(simulation))
        .insert_resource(autopilot)
        .add_plugins(simulator::Simulator::new(UpdateOptions::default()))
        .add_plugins(controller::Controller)
        .add_plugins(visualizer::Visualizer::new(start))
        .run();

    Ok(())
}
