//! Background raster access and color classification.

use image::{Rgb, RgbImage};
use thiserror::Error;

use super::Pixel;

/// Read-only view of the background image.
pub trait Raster: Send + Sync {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    fn pixel(&self, x: i64, y: i64) -> Result<Rgb<u8>, RasterError>;

    fn pixel_at(&self, pixel: Pixel) -> Result<Rgb<u8>, RasterError> {
        self.pixel(pixel.x, pixel.y)
    }
}

impl Raster for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn pixel(&self, x: i64, y: i64) -> Result<Rgb<u8>, RasterError> {
        let out_of_bounds = || RasterError::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        };
        let column = u32::try_from(x).map_err(|_| out_of_bounds())?;
        let row = u32::try_from(y).map_err(|_| out_of_bounds())?;
        self.get_pixel_checked(column, row)
            .copied()
            .ok_or_else(out_of_bounds)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterError {
    #[error("pixel ({x}, {y}) is outside of the {width}x{height} raster")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// A color that is dominated by a single channel: the channel is strictly above `above` while
/// both other channels are strictly below `others_below`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ColorKey {
    pub channel: Channel,
    pub above: u8,
    pub others_below: u8,
}

impl ColorKey {
    pub const fn new(channel: Channel, above: u8, others_below: u8) -> Self {
        Self {
            channel,
            above,
            others_below,
        }
    }

    pub fn matches(&self, color: Rgb<u8>) -> bool {
        let dominant = self.channel.index();
        color.0.iter().enumerate().all(|(i, value)| {
            if i == dominant {
                *value > self.above
            } else {
                *value < self.others_below
            }
        })
    }
}

/// Dark enough to count as track line: the channel sum is strictly below `3 * threshold`.
pub fn is_line(color: Rgb<u8>, threshold: u32) -> bool {
    color.0.iter().map(|c| u64::from(*c)).sum::<u64>() < 3 * u64::from(threshold)
}
