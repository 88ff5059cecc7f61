//! The domain module encapsulates the core simulation logic. It defines the `Robot`, its
//! `Sensor`s, the `Beacon`s and the background `Raster`, along with the `Simulation` controller
//! governing their interactions.
//!
//! The module has no dependency on the rendering or windowing stack. Those collaborators plug in
//! through the `Raster`, `RenderSink` and `EventSource` traits.

mod background;
mod basis;
mod beacon;
mod raster;
mod robot;
mod sensor;
mod simulation;

pub use background::{Background, BUILTIN_SIZE};
pub use basis::{sensor_position, Angle, Pixel, Position};
pub use beacon::{Beacon, BeaconKind};
pub use raster::{is_line, Channel, ColorKey, Raster, RasterError};
pub use robot::Robot;
pub use sensor::{HitCause, Scan, ScanHit, Sensor, SensorKind, SensorModel, SensorView, World};
pub use simulation::{
    BeaconHandle, EventSource, Marker, MarkerKind, QuitSignal, RenderSink, SensorHandle,
    SimState, Simulation, SimulationConfig, SimulationError, StopReason, UpdateOptions,
};
