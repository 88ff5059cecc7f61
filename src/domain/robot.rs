//! Robot moving over the background. Only its pose is modelled: it translates along its heading
//! and turns in place.

use super::{Angle, Position};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Robot {
    position: Position,
    heading: Angle,
}

impl Robot {
    pub fn new(position: Position, heading: Angle) -> Self {
        Self {
            position,
            heading: heading.normalized(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Heading in `[0, 360)` degrees.
    pub fn heading(&self) -> Angle {
        self.heading
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn set_heading(&mut self, heading: Angle) {
        self.heading = heading.normalized();
    }

    /// Moves `distance` pixels along the current heading. Negative distances back up.
    pub fn move_forward(&mut self, distance: f64) {
        let direction = self.heading.direction();
        self.position = Position::new(
            self.position.x() + distance * direction.x(),
            self.position.y() + distance * direction.y(),
        );
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.heading = (self.heading + Angle::from_deg(degrees)).normalized();
    }
}
