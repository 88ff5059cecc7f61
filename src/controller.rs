//! Controller steering the robot.
//!
//! The robot is steered by a line-following control program using only its sensor readings, or by
//! the keyboard. The control program is used by default and takes control again if no arrow key
//! is pressed for a few seconds.

use bevy::prelude::*;

use line_sim::domain::{Position, SensorHandle, SensorKind, Simulation, SimulationError};

use crate::{resource::SimulationRes, simulator::SimulationStep};

const MANUAL_CONTROL_TIMEOUT: f32 = 3.0;
const STEP_DISTANCE: f64 = 4.0;
const STEP_ROTATION: f64 = 4.0;
const WALL_CLEARANCE: u32 = 20;

pub struct Controller;

impl Plugin for Controller {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, control.before(SimulationStep));
    }
}

/// Sensors read by the control program.
#[derive(Resource)]
pub struct Autopilot {
    left: SensorHandle,
    right: SensorHandle,
    sonar: SensorHandle,
    manual_until: f32,
}

impl Autopilot {
    /// Mounts the sensors the control program needs.
    pub fn install(simulation: &mut Simulation) -> Result<Self, SimulationError> {
        let left = simulation.add_sensor(Position::new(20.0, 10.0), SensorKind::Line, None)?;
        let right = simulation.add_sensor(Position::new(20.0, -10.0), SensorKind::Line, None)?;
        simulation.add_sensor(Position::new(0.0, 0.0), SensorKind::Line, None)?;
        let sonar =
            simulation.add_sensor(Position::new(20.0, 0.0), SensorKind::Ultrasonic, Some(0.0))?;
        simulation.add_sensor(Position::new(-10.0, 0.0), SensorKind::Hall, None)?;
        simulation.add_sensor(Position::new(-10.0, 0.0), SensorKind::Infrared, None)?;

        Ok(Self {
            left,
            right,
            sonar,
            manual_until: 0.0,
        })
    }

    fn steer(&self, simulation: &mut Simulation) -> Result<(), SimulationError> {
        let on_left = simulation.sensor(self.left)?.read_line()?;
        let on_right = simulation.sensor(self.right)?.read_line()?;
        let wall_ahead = simulation.sensor(self.sonar)?.get_distance()? < WALL_CLEARANCE;

        let robot = simulation.robot_mut();
        if on_left {
            robot.rotate(STEP_ROTATION);
        } else if on_right {
            robot.rotate(-STEP_ROTATION);
        } else if wall_ahead {
            robot.rotate(STEP_ROTATION);
        } else {
            robot.move_forward(STEP_DISTANCE);
        }

        Ok(())
    }
}

fn control(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut autopilot: ResMut<Autopilot>,
    mut simulation: ResMut<SimulationRes>,
) {
    if !simulation.running() {
        return;
    }

    let now = time.elapsed_seconds();
    let mut distance = 0.0;
    let mut rotation = 0.0;

    if keys.pressed(KeyCode::ArrowUp) {
        distance += STEP_DISTANCE;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        distance -= STEP_DISTANCE;
    }
    if keys.pressed(KeyCode::ArrowLeft) {
        rotation -= STEP_ROTATION;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        rotation += STEP_ROTATION;
    }

    let arrow_pressed = keys.any_pressed([
        KeyCode::ArrowUp,
        KeyCode::ArrowDown,
        KeyCode::ArrowLeft,
        KeyCode::ArrowRight,
    ]);
    if arrow_pressed {
        autopilot.manual_until = now + MANUAL_CONTROL_TIMEOUT;
    }

    if now < autopilot.manual_until {
        let robot = simulation.robot_mut();
        robot.rotate(rotation);
        robot.move_forward(distance);
    } else if let Err(error) = autopilot.steer(&mut simulation) {
        warn!("Control program failed: {error}");
    }
}
