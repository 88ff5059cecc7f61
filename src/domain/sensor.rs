//! Sensors mounted on the robot. A sensor stores only its mounting; every reading is computed on
//! demand from the world state at call time.

use std::{cmp::Ordering, fmt, str::FromStr};

use super::{
    raster, sensor_position, Angle, Beacon, BeaconKind, Pixel, Position, Raster, Robot,
    SimulationConfig, SimulationError,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SensorKind {
    Line,
    Ultrasonic,
    Hall,
    Infrared,
}

impl FromStr for SensorKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(SensorKind::Line),
            "ultrasonic" => Ok(SensorKind::Ultrasonic),
            "hall" => Ok(SensorKind::Hall),
            "ir" | "infrared" => Ok(SensorKind::Infrared),
            _ => Err(SimulationError::InvalidKind(s.to_string())),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Line => write!(f, "line"),
            SensorKind::Ultrasonic => write!(f, "ultrasonic"),
            SensorKind::Hall => write!(f, "hall"),
            SensorKind::Infrared => write!(f, "infrared"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SensorModel {
    Line { threshold: u32 },
    /// `angle` is relative to the robot's heading.
    Ultrasonic { angle: Angle, max_range: u32 },
    Hall,
    Infrared,
}

/// Read-only state a sensor samples.
#[derive(Clone, Copy)]
pub struct World<'a> {
    pub robot: &'a Robot,
    pub raster: &'a dyn Raster,
    pub beacons: &'a [Beacon],
    pub config: &'a SimulationConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sensor {
    offset: Position,
    model: SensorModel,
}

impl Sensor {
    pub fn new(offset: Position, model: SensorModel) -> Self {
        Self { offset, model }
    }

    pub fn line(offset: Position, threshold: u32) -> Self {
        Self::new(offset, SensorModel::Line { threshold })
    }

    pub fn ultrasonic(offset: Position, angle: Angle, max_range: u32) -> Self {
        Self::new(offset, SensorModel::Ultrasonic { angle, max_range })
    }

    pub fn hall(offset: Position) -> Self {
        Self::new(offset, SensorModel::Hall)
    }

    pub fn infrared(offset: Position) -> Self {
        Self::new(offset, SensorModel::Infrared)
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    pub fn model(&self) -> SensorModel {
        self.model
    }

    pub fn kind(&self) -> SensorKind {
        match self.model {
            SensorModel::Line { .. } => SensorKind::Line,
            SensorModel::Ultrasonic { .. } => SensorKind::Ultrasonic,
            SensorModel::Hall => SensorKind::Hall,
            SensorModel::Infrared => SensorKind::Infrared,
        }
    }

    pub fn position(&self, robot: &Robot) -> Pixel {
        sensor_position(robot.position(), robot.heading(), self.offset)
    }

    /// Absolute direction of an ultrasonic sensor.
    pub fn heading(&self, robot: &Robot) -> Option<Angle> {
        match self.model {
            SensorModel::Ultrasonic { angle, .. } => Some((robot.heading() + angle).normalized()),
            _ => None,
        }
    }

    /// Whether the sensor is above a dark line. Off-raster positions read `false`.
    pub fn read_line(&self, world: &World) -> Result<bool, SimulationError> {
        match self.model {
            SensorModel::Line { threshold } => Ok(self.line_state(threshold, world)),
            _ => Err(self.mismatch("line")),
        }
    }

    /// Distance in pixels to the next wall or raster edge, `max_range` if there is none.
    pub fn get_distance(&self, world: &World) -> Result<u32, SimulationError> {
        self.debug_trace(world).map(|scan| scan.distance)
    }

    /// Runs the ultrasonic scan and keeps every probed pixel.
    pub fn debug_trace(&self, world: &World) -> Result<Scan, SimulationError> {
        match self.model {
            SensorModel::Ultrasonic { angle, max_range } => {
                Ok(self.scan(world.robot.heading() + angle, max_range, world))
            }
            _ => Err(self.mismatch("ultrasonic")),
        }
    }

    /// Field strength summed over all beacons the sensor responds to.
    pub fn get_reading(&self, world: &World) -> Result<f64, SimulationError> {
        match self.model {
            SensorModel::Hall => Ok(self.field(BeaconKind::Magnetic, world)),
            SensorModel::Infrared => Ok(self.field(BeaconKind::Infrared, world)),
            _ => Err(self.mismatch("hall or infrared")),
        }
    }

    /// Reading of any kind as a number. Line sensors read `1.0` on a line and `0.0` otherwise.
    pub fn compute_reading(&self, world: &World) -> f64 {
        match self.model {
            SensorModel::Line { threshold } => {
                if self.line_state(threshold, world) {
                    1.0
                } else {
                    0.0
                }
            }
            SensorModel::Ultrasonic { angle, max_range } => {
                self.scan(world.robot.heading() + angle, max_range, world)
                    .distance as f64
            }
            SensorModel::Hall => self.field(BeaconKind::Magnetic, world),
            SensorModel::Infrared => self.field(BeaconKind::Infrared, world),
        }
    }

    fn line_state(&self, threshold: u32, world: &World) -> bool {
        world
            .raster
            .pixel_at(self.position(world.robot))
            .is_ok_and(|color| raster::is_line(color, threshold))
    }

    fn scan(&self, heading: Angle, max_range: u32, world: &World) -> Scan {
        let origin = self.position(world.robot);
        let direction = heading.direction();
        let mut probes = Vec::new();

        for distance in 0..max_range {
            let probe = Position::new(
                origin.x as f64 + distance as f64 * direction.x(),
                origin.y as f64 + distance as f64 * direction.y(),
            )
            .to_pixel();

            let cause = match world.raster.pixel_at(probe) {
                Err(_) => Some(HitCause::Edge),
                Ok(color) if world.config.wall_color.matches(color) => Some(HitCause::Wall),
                Ok(_) => None,
            };

            if let Some(cause) = cause {
                return Scan {
                    origin,
                    probes,
                    hit: Some(ScanHit {
                        pixel: probe,
                        cause,
                    }),
                    distance,
                };
            }
            probes.push(probe);
        }

        Scan {
            origin,
            probes,
            hit: None,
            distance: max_range,
        }
    }

    fn field(&self, kind: BeaconKind, world: &World) -> f64 {
        let position: Position = self.position(world.robot).into();
        world
            .beacons
            .iter()
            .filter(|b| b.kind() == kind)
            .map(|b| b.field_strength(position))
            .sum()
    }

    fn mismatch(&self, expected: &'static str) -> SimulationError {
        SimulationError::KindMismatch {
            expected,
            found: self.kind(),
        }
    }
}

/// Trace of one ultrasonic scan.
#[derive(Clone, Debug, PartialEq)]
pub struct Scan {
    pub origin: Pixel,
    /// Pixels passed without a hit, nearest first.
    pub probes: Vec<Pixel>,
    pub hit: Option<ScanHit>,
    pub distance: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScanHit {
    pub pixel: Pixel,
    pub cause: HitCause,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HitCause {
    Wall,
    /// The probe left the raster.
    Edge,
}

/// A sensor bound to the world it samples. Comparisons re-read the sensor every time, so two
/// comparisons can disagree if the world changed in between.
#[derive(Clone, Copy)]
pub struct SensorView<'a> {
    sensor: &'a Sensor,
    world: World<'a>,
}

impl<'a> SensorView<'a> {
    pub fn new(sensor: &'a Sensor, world: World<'a>) -> Self {
        Self { sensor, world }
    }

    pub fn sensor(&self) -> &'a Sensor {
        self.sensor
    }

    pub fn kind(&self) -> SensorKind {
        self.sensor.kind()
    }

    pub fn position(&self) -> Pixel {
        self.sensor.position(self.world.robot)
    }

    pub fn heading(&self) -> Option<Angle> {
        self.sensor.heading(self.world.robot)
    }

    pub fn read_line(&self) -> Result<bool, SimulationError> {
        self.sensor.read_line(&self.world)
    }

    pub fn get_distance(&self) -> Result<u32, SimulationError> {
        self.sensor.get_distance(&self.world)
    }

    pub fn debug_trace(&self) -> Result<Scan, SimulationError> {
        self.sensor.debug_trace(&self.world)
    }

    pub fn get_reading(&self) -> Result<f64, SimulationError> {
        self.sensor.get_reading(&self.world)
    }

    pub fn compute_reading(&self) -> f64 {
        self.sensor.compute_reading(&self.world)
    }
}

impl fmt::Debug for SensorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorView")
            .field("sensor", self.sensor)
            .field("position", &self.position())
            .finish()
    }
}

impl PartialEq<f64> for SensorView<'_> {
    fn eq(&self, other: &f64) -> bool {
        self.compute_reading() == *other
    }
}

impl PartialOrd<f64> for SensorView<'_> {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.compute_reading().partial_cmp(other)
    }
}

impl<'b> PartialEq<SensorView<'b>> for SensorView<'_> {
    fn eq(&self, other: &SensorView<'b>) -> bool {
        self.compute_reading() == other.compute_reading()
    }
}

impl<'b> PartialOrd<SensorView<'b>> for SensorView<'_> {
    fn partial_cmp(&self, other: &SensorView<'b>) -> Option<Ordering> {
        self.compute_reading().partial_cmp(&other.compute_reading())
    }
}
