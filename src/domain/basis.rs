//! Basic building blocks.

use std::ops::{Add, Neg};

use nalgebra::{Rotation2, Vector2};

/// Point or offset in raster space. The y-axis points down, as in the background image.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn distance(&self, position: Self) -> f64 {
        ((self.x - position.x).powi(2) + (self.y - position.y).powi(2)).sqrt()
    }

    pub fn rotate_vector(&self, angle: Angle) -> Position {
        let rotated = Rotation2::new(angle.radians()) * Vector2::new(self.x, self.y);
        Position::new(rotated.x, rotated.y)
    }

    /// Truncates toward zero, like an integer cast.
    pub fn to_pixel(self) -> Pixel {
        Pixel::new(self.x as i64, self.y as i64)
    }
}

impl From<Pixel> for Position {
    fn from(value: Pixel) -> Self {
        Self::new(value.x as f64, value.y as f64)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// Integer raster coordinate. May lie outside of the raster.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Pixel {
    pub x: i64,
    pub y: i64,
}

impl Pixel {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Angle in degrees. Positive angles turn clockwise on screen, because the y-axis points down.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub const fn from_deg(degree: f64) -> Self {
        Self(degree)
    }

    pub fn deg(self) -> f64 {
        self.0
    }

    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Equivalent angle in `[0, 360)`.
    pub fn normalized(self) -> Self {
        let degree = self.0.rem_euclid(360.0);
        // rem_euclid may round up to the modulus for tiny negative inputs
        Self(if degree >= 360.0 { 0.0 } else { degree })
    }

    /// Unit vector pointing along the angle.
    pub fn direction(self) -> Position {
        let radians = self.radians();
        Position::new(radians.cos(), radians.sin())
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Angle(-self.0)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

/// Raster pixel of a point mounted at `offset` (body frame) on a robot at `position` with
/// `heading`.
pub fn sensor_position(position: Position, heading: Angle, offset: Position) -> Pixel {
    (position + offset.rotate_vector(heading)).to_pixel()
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, AbsDiffEq};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_position() {
        let position = Position::new(1.0, 2.0);
        assert_abs_diff_eq!(position.x(), 1.0);
        assert_abs_diff_eq!(position.y(), 2.0);
    }

    #[rstest]
    #[case(Position::new(0.0, 0.0), Position::new(3.0, 4.0), 5.0)]
    #[case(Position::new(-1.0, -1.0), Position::new(-1.0, -1.0), 0.0)]
    #[case(Position::new(2.0, 0.0), Position::new(-2.0, 0.0), 4.0)]
    fn test_position_distance(#[case] a: Position, #[case] b: Position, #[case] expected: f64) {
        assert_abs_diff_eq!(a.distance(b), expected);
        assert_abs_diff_eq!(b.distance(a), expected);
    }

    #[rstest]
    #[case::zero(0.0, Position::new(20.0, 10.0))]
    #[case::quarter(90.0, Position::new(-10.0, 20.0))]
    #[case::half(180.0, Position::new(-20.0, -10.0))]
    #[case::three_quarter(270.0, Position::new(10.0, -20.0))]
    fn test_position_rotate_vector(#[case] degree: f64, #[case] expected: Position) {
        let rotated = Position::new(20.0, 10.0).rotate_vector(Angle::from_deg(degree));
        assert_abs_diff_eq!(rotated, expected, epsilon = EPSILON);
    }

    #[rstest]
    #[case(Position::new(1.9, 2.9), Pixel::new(1, 2))]
    #[case(Position::new(-0.5, 0.5), Pixel::new(0, 0))]
    #[case(Position::new(-1.5, -2.7), Pixel::new(-1, -2))]
    fn test_position_to_pixel_truncates(#[case] position: Position, #[case] expected: Pixel) {
        assert_eq!(position.to_pixel(), expected);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(360.0, 0.0)]
    #[case(370.0, 10.0)]
    #[case(-4.0, 356.0)]
    #[case(-725.0, 355.0)]
    fn test_angle_normalized(#[case] degree: f64, #[case] expected: f64) {
        assert_abs_diff_eq!(Angle::from_deg(degree).normalized().deg(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_angle_radians() {
        assert_abs_diff_eq!(Angle::from_deg(180.0).radians(), std::f64::consts::PI);
    }

    #[rstest]
    #[case(90.0, 270.0)]
    #[case(0.0, 0.0)]
    #[case(-30.0, 30.0)]
    fn test_angle_neg(#[case] degree: f64, #[case] expected: f64) {
        assert_abs_diff_eq!(
            (-Angle::from_deg(degree)).normalized().deg(),
            expected,
            epsilon = EPSILON
        );
    }

    #[rstest]
    #[case::ahead(0.0, Position::new(20.0, 0.0), Pixel::new(120, 200))]
    #[case::right_side(0.0, Position::new(20.0, 10.0), Pixel::new(120, 210))]
    #[case::facing_down(90.0, Position::new(20.0, 10.0), Pixel::new(90, 220))]
    #[case::facing_left(180.0, Position::new(20.0, 10.0), Pixel::new(80, 190))]
    #[case::facing_up(270.0, Position::new(20.0, 10.0), Pixel::new(110, 180))]
    fn test_sensor_position(
        #[case] heading: f64,
        #[case] offset: Position,
        #[case] expected: Pixel,
    ) {
        let position = Position::new(100.3, 200.3);
        assert_eq!(
            sensor_position(position, Angle::from_deg(heading), offset),
            expected
        );
    }

    #[rstest]
    fn test_sensor_position_full_turn_invariant(
        #[values(0.0, 30.0, 45.0, 135.0, 200.0, 300.0)] heading: f64,
        #[values(Position::new(0.0, 0.0), Position::new(20.0, 10.0), Position::new(-15.0, 7.0))]
        offset: Position,
    ) {
        let position = Position::new(250.3, 250.3);
        assert_eq!(
            sensor_position(position, Angle::from_deg(heading), offset),
            sensor_position(position, Angle::from_deg(heading + 360.0), offset)
        );
    }

    impl AbsDiffEq for Position {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            f64::EPSILON
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            f64::abs_diff_eq(&self.x, &other.x, epsilon)
                && f64::abs_diff_eq(&self.y, &other.y, epsilon)
        }
    }
}
