//! Stepping of the simulation at a fixed rate.
//!
//! Every fixed step the control program moves the robot first, then the simulation checks for
//! collisions, boundary violations and quit requests. The app exits once the simulation stops.

use bevy::{app::AppExit, prelude::*};

use line_sim::domain::{QuitSignal, SimState, UpdateOptions};

use crate::resource::{SimulationRes, UpdateOptionsRes};

/// Systems driving the robot must run before this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationStep;

pub struct Simulator {
    options: UpdateOptions,
}

impl Simulator {
    pub fn new(options: UpdateOptions) -> Self {
        Self { options }
    }
}

impl Plugin for Simulator {
    fn build(&self, app: &mut App) {
        let frame_period = self.options.frame_period();
        if !frame_period.is_zero() {
            app.insert_resource(Time::<Fixed>::from_duration(frame_period));
        }

        app.insert_resource(UpdateOptionsRes::from(self.options))
            .add_systems(FixedUpdate, simulate.in_set(SimulationStep));
    }
}

fn simulate(
    keys: Res<ButtonInput<KeyCode>>,
    options: Res<UpdateOptionsRes>,
    mut simulation: ResMut<SimulationRes>,
    mut exit: EventWriter<AppExit>,
) {
    let mut quit = QuitSignal(keys.pressed(KeyCode::Escape));

    if let SimState::Stopped(reason) = simulation.update(**options, &mut quit) {
        info!("Simulation stopped: {reason:?}");
        exit.send(AppExit);
    }
}
