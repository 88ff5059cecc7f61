//! Static point sources detected by hall and infrared sensors.

use std::{fmt, str::FromStr};

use super::{Position, SimulationError};

/// Distances below one pixel are below the sampling resolution of the sensors and are clamped.
const MIN_FIELD_DISTANCE: f64 = 1.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BeaconKind {
    Magnetic,
    Infrared,
}

impl FromStr for BeaconKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "magnetic" => Ok(BeaconKind::Magnetic),
            "infrared" => Ok(BeaconKind::Infrared),
            _ => Err(SimulationError::InvalidKind(s.to_string())),
        }
    }
}

impl fmt::Display for BeaconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeaconKind::Magnetic => write!(f, "magnetic"),
            BeaconKind::Infrared => write!(f, "infrared"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beacon {
    position: Position,
    radius: f64,
    kind: BeaconKind,
}

impl Beacon {
    pub const fn new(position: Position, radius: f64, kind: BeaconKind) -> Self {
        Self {
            position,
            radius,
            kind,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn kind(&self) -> BeaconKind {
        self.kind
    }

    /// `radius / distance` inside the radius and zero beyond it. The value is not normalized.
    /// Distances below one pixel count as one pixel, so for `0 < distance < 1` the reading is
    /// `radius` rather than `radius / distance`.
    pub fn field_strength(&self, point: Position) -> f64 {
        let distance = self.position.distance(point);
        if distance <= self.radius {
            self.radius / distance.max(MIN_FIELD_DISTANCE)
        } else {
            0.0
        }
    }
}
