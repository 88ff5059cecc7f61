//! Deterministic 2D simulation of a robot with line, ultrasonic, hall and infrared sensors
//! moving over a raster track.


pub mod domain;

pub use domain::*;
