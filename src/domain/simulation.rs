//! Simulation controller owning the robot, its sensors, the beacons and the background.
//!
//! The controller is driven by its caller: every call to [`Simulation::update`] evaluates one
//! step and returns. Once stopped, the simulation stays stopped.

use std::{path::PathBuf, time::Duration};

use log::{debug, info};
use thiserror::Error;

use super::{
    Angle, Background, Beacon, BeaconKind, Channel, ColorKey, Position, Raster, Robot, Sensor,
    SensorKind, SensorView, World,
};

pub struct Simulation {
    robot: Robot,
    sensors: Vec<Sensor>,
    beacons: Vec<Beacon>,
    raster: Box<dyn Raster>,
    config: SimulationConfig,
    state: SimState,
}

impl Simulation {
    /// Loads the background and places the robot at `start`, heading along the positive x-axis.
    pub fn new(start: Position, background: Background) -> Result<Self, SimulationError> {
        let raster = background.load()?;
        info!(
            "Loaded background {background} ({}x{})",
            raster.width(),
            raster.height()
        );
        Ok(Self::with_raster(start, raster, SimulationConfig::default()))
    }

    pub fn with_raster(
        start: Position,
        raster: impl Raster + 'static,
        config: SimulationConfig,
    ) -> Self {
        Self {
            robot: Robot::new(start, Angle::from_deg(0.0)),
            sensors: vec![],
            beacons: vec![],
            raster: Box::new(raster),
            config,
            state: SimState::Running,
        }
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn robot_mut(&mut self) -> &mut Robot {
        &mut self.robot
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn raster(&self) -> &dyn Raster {
        self.raster.as_ref()
    }

    pub fn beacons(&self) -> &[Beacon] {
        &self.beacons
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn running(&self) -> bool {
        self.state == SimState::Running
    }

    pub fn world(&self) -> World<'_> {
        World {
            robot: &self.robot,
            raster: self.raster.as_ref(),
            beacons: &self.beacons,
            config: &self.config,
        }
    }

    /// Creates a sensor of `kind` with the configured defaults. Ultrasonic sensors need `angle`
    /// (degrees, relative to the robot's heading); other kinds ignore it.
    pub fn add_sensor(
        &mut self,
        offset: Position,
        kind: SensorKind,
        angle: Option<f64>,
    ) -> Result<SensorHandle, SimulationError> {
        let sensor = match kind {
            SensorKind::Line => Sensor::line(offset, self.config.line_threshold),
            SensorKind::Ultrasonic => Sensor::ultrasonic(
                offset,
                Angle::from_deg(angle.ok_or(SimulationError::MissingParameter("angle"))?),
                self.config.ultrasonic_max_range,
            ),
            SensorKind::Hall => Sensor::hall(offset),
            SensorKind::Infrared => Sensor::infrared(offset),
        };
        Ok(self.attach(sensor))
    }

    pub fn attach(&mut self, sensor: Sensor) -> SensorHandle {
        debug!(
            "Attaching {} sensor at offset {:?}",
            sensor.kind(),
            sensor.offset()
        );
        self.sensors.push(sensor);
        SensorHandle(self.sensors.len() - 1)
    }

    pub fn sensor(&self, handle: SensorHandle) -> Result<SensorView<'_>, SimulationError> {
        self.sensors
            .get(handle.0)
            .map(|sensor| SensorView::new(sensor, self.world()))
            .ok_or(SimulationError::UnknownSensor(handle.0))
    }

    /// Sensors in insertion order.
    pub fn sensors(&self) -> impl Iterator<Item = SensorView<'_>> {
        let world = self.world();
        self.sensors
            .iter()
            .map(move |sensor| SensorView::new(sensor, world))
    }

    /// Places a beacon of `kind` with the configured radius for that kind.
    pub fn add_beacon(&mut self, position: Position, kind: BeaconKind) -> BeaconHandle {
        let radius = match kind {
            BeaconKind::Magnetic => self.config.magnetic_radius,
            BeaconKind::Infrared => self.config.infrared_radius,
        };
        self.place_beacon(Beacon::new(position, radius, kind))
    }

    pub fn place_beacon(&mut self, beacon: Beacon) -> BeaconHandle {
        debug!(
            "Placing {} beacon at {:?} with radius {}",
            beacon.kind(),
            beacon.position(),
            beacon.radius()
        );
        self.beacons.push(beacon);
        BeaconHandle(self.beacons.len() - 1)
    }

    /// Evaluates one step. The simulation stops if the robot touches an obstacle, leaves the
    /// raster (with `check_bounds`), or if a quit was requested, checked in this order. The event
    /// source is only polled when the robot is still fine.
    pub fn update(&mut self, options: UpdateOptions, events: &mut dyn EventSource) -> SimState {
        if let SimState::Stopped(reason) = self.state {
            debug!("Ignoring update of simulation stopped by {reason:?}");
            return self.state;
        }

        let reason = if self.touches_obstacle() {
            Some(StopReason::Collision)
        } else if options.check_bounds && self.out_of_bounds() {
            Some(StopReason::OutOfBounds)
        } else if events.poll_quit_requested() {
            Some(StopReason::QuitRequested)
        } else {
            None
        };

        if let Some(reason) = reason {
            info!(
                "Simulation stopped by {reason:?} at {:?} heading {:.1} deg",
                self.robot.position(),
                self.robot.heading().deg()
            );
            self.state = SimState::Stopped(reason);
        }

        self.state
    }

    /// Draws one marker per entity: the robot, then the sensors and the beacons in insertion
    /// order.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.draw(&Marker {
            position: self.robot.position(),
            kind: MarkerKind::Robot {
                heading: self.robot.heading(),
            },
        });

        for sensor in self.sensors() {
            let kind = match sensor.kind() {
                SensorKind::Line => MarkerKind::LineSensor {
                    on_line: sensor.read_line().unwrap_or_default(),
                },
                SensorKind::Ultrasonic => MarkerKind::UltrasonicSensor {
                    heading: sensor.heading().unwrap_or_default(),
                },
                SensorKind::Hall => MarkerKind::HallSensor,
                SensorKind::Infrared => MarkerKind::InfraredSensor,
            };
            sink.draw(&Marker {
                position: sensor.position().into(),
                kind,
            });
        }

        for beacon in &self.beacons {
            sink.draw(&Marker {
                position: beacon.position(),
                kind: MarkerKind::Beacon {
                    kind: beacon.kind(),
                    radius: beacon.radius(),
                },
            });
        }

        sink.present();
    }

    fn touches_obstacle(&self) -> bool {
        self.raster
            .pixel_at(self.robot.position().to_pixel())
            .is_ok_and(|color| self.config.obstacle_color.matches(color))
    }

    fn out_of_bounds(&self) -> bool {
        let (width, height) = self.raster.dimensions();
        let margin = self.config.boundary_margin;
        let position = self.robot.position();
        position.x() - margin < 0.0
            || position.y() - margin < 0.0
            || position.x() + margin > width as f64
            || position.y() + margin > height as f64
    }
}

/// Tunable constants of the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Half of the robot's body: how close the robot may get to the raster edge.
    pub boundary_margin: f64,
    /// Pixels stopping the robot on contact.
    pub obstacle_color: ColorKey,
    /// Pixels reflecting ultrasonic pulses.
    pub wall_color: ColorKey,
    pub line_threshold: u32,
    pub ultrasonic_max_range: u32,
    pub magnetic_radius: f64,
    pub infrared_radius: f64,
}

impl SimulationConfig {
    pub const fn new(
        boundary_margin: f64,
        obstacle_color: ColorKey,
        wall_color: ColorKey,
        line_threshold: u32,
        ultrasonic_max_range: u32,
        magnetic_radius: f64,
        infrared_radius: f64,
    ) -> Self {
        Self {
            boundary_margin,
            obstacle_color,
            wall_color,
            line_threshold,
            ultrasonic_max_range,
            magnetic_radius,
            infrared_radius,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(
            30.0,
            ColorKey::new(Channel::Red, 230, 50),
            ColorKey::new(Channel::Blue, 220, 50),
            50,
            100,
            20.0,
            80.0,
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UpdateOptions {
    pub check_bounds: bool,
    /// Frame rate the frontend paces steps to.
    pub target_fps: u32,
}

impl UpdateOptions {
    pub fn frame_period(&self) -> Duration {
        if self.target_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / self.target_fps as f64)
        }
    }
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            check_bounds: true,
            target_fps: 30,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SimState {
    Running,
    Stopped(StopReason),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StopReason {
    Collision,
    OutOfBounds,
    QuitRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SensorHandle(usize);

impl SensorHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct BeaconHandle(usize);

impl BeaconHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub position: Position,
    pub kind: MarkerKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerKind {
    Robot { heading: Angle },
    LineSensor { on_line: bool },
    UltrasonicSensor { heading: Angle },
    HallSensor,
    InfraredSensor,
    Beacon { kind: BeaconKind, radius: f64 },
}

pub trait RenderSink {
    fn draw(&mut self, marker: &Marker);

    fn present(&mut self) {}
}

impl RenderSink for Vec<Marker> {
    fn draw(&mut self, marker: &Marker) {
        self.push(marker.clone());
    }
}

pub trait EventSource {
    fn poll_quit_requested(&mut self) -> bool;
}

/// Event source reporting a fixed quit request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct QuitSignal(pub bool);

impl EventSource for QuitSignal {
    fn poll_quit_requested(&mut self) -> bool {
        self.0
    }
}

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("no such kind: {0}")]
    InvalidKind(String),
    #[error("{0} is a required parameter")]
    MissingParameter(&'static str),
    #[error("expected a {expected} sensor, found a {found} sensor")]
    KindMismatch {
        expected: &'static str,
        found: SensorKind,
    },
    #[error("unknown sensor handle {0}")]
    UnknownSensor(usize),
    #[error("failed to load background {path:?}")]
    Background {
        path: PathBuf,
        source: image::ImageError,
    },
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::Pixel;
    use crate::tests::{uniform_raster, BLACK, BLUE, RED, WHITE};

    fn simulation(raster: RgbImage, start: Position) -> Simulation {
        Simulation::with_raster(start, raster, SimulationConfig::default())
    }

    fn step(simulation: &mut Simulation, check_bounds: bool) -> SimState {
        simulation.update(
            UpdateOptions {
                check_bounds,
                ..Default::default()
            },
            &mut QuitSignal(false),
        )
    }

    #[test]
    fn test_simulation_starts_running() {
        let simulation = simulation(uniform_raster(500, 500, WHITE), Position::new(250.0, 250.0));
        assert!(simulation.running());
        assert_eq!(simulation.state(), SimState::Running);
        assert_abs_diff_eq!(simulation.robot().heading().deg(), 0.0);
    }

    #[test]
    fn test_simulation_keeps_running_inside_bounds() {
        let mut simulation =
            simulation(uniform_raster(500, 500, WHITE), Position::new(250.0, 250.0));
        for _ in 0..10 {
            assert_eq!(step(&mut simulation, true), SimState::Running);
            simulation.robot_mut().move_forward(4.0);
        }
        assert!(simulation.running());
    }

    #[rstest]
    #[case::left(29.0, 250.0, true)]
    #[case::left_margin(30.0, 250.0, false)]
    #[case::top(250.0, 29.0, true)]
    #[case::right(471.0, 250.0, true)]
    #[case::right_margin(470.0, 250.0, false)]
    #[case::bottom(250.0, 470.5, true)]
    #[case::outside(-100.0, 900.0, true)]
    fn test_simulation_boundary(#[case] x: f64, #[case] y: f64, #[case] stops: bool) {
        let mut simulation = simulation(uniform_raster(500, 500, WHITE), Position::new(x, y));
        let expected = if stops {
            SimState::Stopped(StopReason::OutOfBounds)
        } else {
            SimState::Running
        };
        assert_eq!(step(&mut simulation, true), expected);
    }

    #[test]
    fn test_simulation_boundary_check_disabled() {
        let mut simulation =
            simulation(uniform_raster(500, 500, WHITE), Position::new(29.0, 250.0));
        assert_eq!(step(&mut simulation, false), SimState::Running);
        simulation.robot_mut().set_position(Position::new(-50.0, -50.0));
        assert_eq!(step(&mut simulation, false), SimState::Running);
    }

    #[test]
    fn test_simulation_stops_on_red() {
        let mut raster = uniform_raster(500, 500, WHITE);
        raster.put_pixel(100, 100, RED);
        let mut simulation = simulation(raster, Position::new(100.7, 100.2));
        assert_eq!(
            step(&mut simulation, false),
            SimState::Stopped(StopReason::Collision)
        );
    }

    #[test]
    fn test_simulation_collision_takes_priority() {
        let mut raster = uniform_raster(500, 500, WHITE);
        raster.put_pixel(10, 10, RED);
        let mut simulation = simulation(raster, Position::new(10.0, 10.0));
        assert_eq!(
            simulation.update(UpdateOptions::default(), &mut QuitSignal(true)),
            SimState::Stopped(StopReason::Collision)
        );
    }

    #[test]
    fn test_simulation_ignores_dark_and_blue_pixels() {
        let mut raster = uniform_raster(500, 500, WHITE);
        raster.put_pixel(100, 100, BLACK);
        raster.put_pixel(101, 100, BLUE);
        raster.put_pixel(102, 100, Rgb([230, 0, 0]));
        let mut simulation = simulation(raster, Position::new(100.0, 100.0));
        for _ in 0..3 {
            assert_eq!(step(&mut simulation, true), SimState::Running);
            simulation.robot_mut().move_forward(1.0);
        }
    }

    #[test]
    fn test_simulation_quit_request() {
        let mut simulation =
            simulation(uniform_raster(500, 500, WHITE), Position::new(250.0, 250.0));
        assert_eq!(
            simulation.update(UpdateOptions::default(), &mut QuitSignal(true)),
            SimState::Stopped(StopReason::QuitRequested)
        );
        assert!(!simulation.running());
    }

    #[test]
    fn test_simulation_events_not_polled_after_stop_condition() {
        struct Counter(u32);

        impl EventSource for Counter {
            fn poll_quit_requested(&mut self) -> bool {
                self.0 += 1;
                false
            }
        }

        let mut simulation =
            simulation(uniform_raster(500, 500, WHITE), Position::new(250.0, 250.0));
        let mut counter = Counter(0);
        simulation.update(UpdateOptions::default(), &mut counter);
        assert_eq!(counter.0, 1);

        simulation.robot_mut().set_position(Position::new(0.0, 0.0));
        simulation.update(UpdateOptions::default(), &mut counter);
        assert_eq!(counter.0, 1);
        simulation.update(UpdateOptions::default(), &mut counter);
        assert_eq!(counter.0, 1);
    }

    #[test]
    fn test_simulation_stopped_is_terminal() {
        let mut simulation = simulation(uniform_raster(500, 500, WHITE), Position::new(0.0, 0.0));
        assert_eq!(
            step(&mut simulation, true),
            SimState::Stopped(StopReason::OutOfBounds)
        );
        simulation.robot_mut().set_position(Position::new(250.0, 250.0));
        assert_eq!(
            step(&mut simulation, true),
            SimState::Stopped(StopReason::OutOfBounds)
        );

        // still purely additive
        let handle = simulation
            .add_sensor(Position::default(), SensorKind::Line, None)
            .unwrap();
        assert!(!simulation.sensor(handle).unwrap().read_line().unwrap());
        assert!(!simulation.running());
    }

    #[test]
    fn test_simulation_drives_into_red_pixel() {
        let mut raster = uniform_raster(500, 500, WHITE);
        raster.put_pixel(400, 400, RED);
        let mut simulation = simulation(raster, Position::new(0.0, 400.0));
        let sensor = simulation
            .add_sensor(Position::new(0.0, 0.0), SensorKind::Line, None)
            .unwrap();

        let mut steps = 0;
        while simulation.running() && steps < 1000 {
            assert!(!simulation.sensor(sensor).unwrap().read_line().unwrap());
            simulation.robot_mut().move_forward(4.0);
            step(&mut simulation, false);
            steps += 1;
        }

        assert_eq!(steps, 100);
        assert_eq!(simulation.robot().position().to_pixel(), Pixel::new(400, 400));
        assert_eq!(
            simulation.state(),
            SimState::Stopped(StopReason::Collision)
        );
    }

    #[test]
    fn test_simulation_drives_diagonally_into_obstacle() {
        let mut raster = uniform_raster(500, 500, WHITE);
        for x in 399..=402 {
            for y in 399..=402 {
                raster.put_pixel(x, y, RED);
            }
        }
        let mut simulation = simulation(raster, Position::new(0.0, 0.0));
        simulation.robot_mut().rotate(45.0);

        while simulation.running() {
            simulation.robot_mut().move_forward(4.0);
            step(&mut simulation, false);
            assert!(simulation.robot().position().x() < 410.0);
        }
        assert_eq!(
            simulation.state(),
            SimState::Stopped(StopReason::Collision)
        );
    }

    #[rstest]
    #[case("line", None, SensorKind::Line)]
    #[case("ultrasonic", Some(30.0), SensorKind::Ultrasonic)]
    #[case("hall", None, SensorKind::Hall)]
    #[case("IR", None, SensorKind::Infrared)]
    fn test_add_sensor(
        #[case] kind: &str,
        #[case] angle: Option<f64>,
        #[case] expected: SensorKind,
    ) {
        let mut simulation =
            simulation(uniform_raster(500, 500, WHITE), Position::new(250.0, 250.0));
        let handle = simulation
            .add_sensor(Position::new(5.0, 0.0), kind.parse().unwrap(), angle)
            .unwrap();
        let sensor = simulation.sensor(handle).unwrap();
        assert_eq!(sensor.kind(), expected);
        assert_eq!(sensor.position(), Pixel::new(255, 250));
    }

    #[test]
    fn test_add_sensor_uses_configured_defaults() {
        let mut simulation =
            simulation(uniform_raster(500, 500, WHITE), Position::new(250.0, 250.0));
        let line = simulation
            .add_sensor(Position::default(), SensorKind::Line, None)
            .unwrap();
        let ultrasonic = simulation
            .add_sensor(Position::default(), SensorKind::Ultrasonic, Some(-90.0))
            .unwrap();
        assert_eq!(
            simulation.sensor(line).unwrap().sensor().model(),
            crate::domain::SensorModel::Line { threshold: 50 }
        );
        assert_eq!(
            simulation.sensor(ultrasonic).unwrap().sensor().model(),
            crate::domain::SensorModel::Ultrasonic {
                angle: Angle::from_deg(-90.0),
                max_range: 100
            }
        );
        assert_eq!(simulation.sensor(ultrasonic).unwrap().get_distance().unwrap(), 100);
    }

    #[test]
    fn test_add_ultrasonic_sensor_without_angle() {
        let mut simulation =
            simulation(uniform_raster(500, 500, WHITE), Position::new(250.0, 250.0));
        assert!(matches!(
            simulation.add_sensor(Position::default(), SensorKind::Ultrasonic, None),
            Err(SimulationError::MissingParameter("angle"))
        ));
        assert_eq!(simulation.sensors().count(), 0);
    }

    #[test]
    fn test_unknown_sensor_handle() {
        let mut other = simulation(uniform_raster(10, 10, WHITE), Position::default());
        let handle = other
            .add_sensor(Position::default(), SensorKind::Hall, None)
            .unwrap();
        let simulation = simulation(uniform_raster(10, 10, WHITE), Position::default());
        assert!(matches!(
            simulation.sensor(handle),
            Err(SimulationError::UnknownSensor(0))
        ));
    }

    #[test]
    fn test_add_beacon_uses_kind_radius() {
        let mut simulation =
            simulation(uniform_raster(500, 500, WHITE), Position::new(250.0, 250.0));
        let magnet = simulation.add_beacon(Position::new(10.0, 10.0), BeaconKind::Magnetic);
        let infrared = simulation.add_beacon(Position::new(20.0, 20.0), BeaconKind::Infrared);
        assert_eq!(magnet.index(), 0);
        assert_eq!(infrared.index(), 1);
        assert_abs_diff_eq!(simulation.beacons()[0].radius(), 20.0);
        assert_abs_diff_eq!(simulation.beacons()[1].radius(), 80.0);
    }

    #[test]
    fn test_field_readings_follow_the_robot() {
        let mut simulation =
            simulation(uniform_raster(500, 500, WHITE), Position::new(100.0, 100.0));
        let hall = simulation
            .add_sensor(Position::default(), SensorKind::Hall, None)
            .unwrap();
        let infrared = simulation
            .add_sensor(Position::default(), SensorKind::Infrared, None)
            .unwrap();
        simulation.add_beacon(Position::new(140.0, 100.0), BeaconKind::Magnetic);
        simulation.add_beacon(Position::new(140.0, 100.0), BeaconKind::Infrared);

        assert_abs_diff_eq!(simulation.sensor(hall).unwrap().get_reading().unwrap(), 0.0);
        assert_abs_diff_eq!(
            simulation.sensor(infrared).unwrap().get_reading().unwrap(),
            2.0
        );

        simulation.robot_mut().move_forward(30.0);
        assert_abs_diff_eq!(simulation.sensor(hall).unwrap().get_reading().unwrap(), 2.0);
        assert_abs_diff_eq!(
            simulation.sensor(infrared).unwrap().get_reading().unwrap(),
            8.0
        );
        assert!(simulation.sensor(infrared).unwrap() > simulation.sensor(hall).unwrap());
    }

    #[test]
    fn test_render_order() {
        let mut raster = uniform_raster(500, 500, WHITE);
        raster.put_pixel(120, 110, BLACK);
        let mut simulation = simulation(raster, Position::new(100.0, 100.0));
        simulation.add_beacon(Position::new(300.0, 300.0), BeaconKind::Infrared);
        simulation
            .add_sensor(Position::new(20.0, 10.0), SensorKind::Line, None)
            .unwrap();
        simulation
            .add_sensor(Position::new(0.0, 0.0), SensorKind::Ultrasonic, Some(90.0))
            .unwrap();
        simulation
            .add_sensor(Position::new(0.0, 0.0), SensorKind::Hall, None)
            .unwrap();

        let mut markers = vec![];
        simulation.render(&mut markers);

        assert_eq!(
            markers,
            vec![
                Marker {
                    position: Position::new(100.0, 100.0),
                    kind: MarkerKind::Robot {
                        heading: Angle::from_deg(0.0)
                    },
                },
                Marker {
                    position: Position::new(120.0, 110.0),
                    kind: MarkerKind::LineSensor { on_line: true },
                },
                Marker {
                    position: Position::new(100.0, 100.0),
                    kind: MarkerKind::UltrasonicSensor {
                        heading: Angle::from_deg(90.0)
                    },
                },
                Marker {
                    position: Position::new(100.0, 100.0),
                    kind: MarkerKind::HallSensor,
                },
                Marker {
                    position: Position::new(300.0, 300.0),
                    kind: MarkerKind::Beacon {
                        kind: BeaconKind::Infrared,
                        radius: 80.0
                    },
                },
            ]
        );
    }

    #[test]
    fn test_new_with_builtin_background() {
        let simulation = Simulation::new(Position::new(50.0, 450.0), Background::Lines).unwrap();
        assert_eq!(simulation.raster().dimensions(), (500, 500));
        assert!(simulation.running());
    }

    #[test]
    fn test_new_with_missing_background_fails() {
        let result = Simulation::new(
            Position::default(),
            Background::Custom(PathBuf::from("missing.png")),
        );
        assert!(matches!(result, Err(SimulationError::Background { .. })));
    }

    #[rstest]
    #[case(30, Duration::from_secs_f64(1.0 / 30.0))]
    #[case(1, Duration::from_secs(1))]
    #[case(0, Duration::ZERO)]
    fn test_update_options_frame_period(#[case] target_fps: u32, #[case] expected: Duration) {
        let options = UpdateOptions {
            target_fps,
            ..Default::default()
        };
        assert_eq!(options.frame_period(), expected);
    }
}
