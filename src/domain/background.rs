//! Background selection: the built-in tracks and custom images loaded from disk.

use std::{fmt, path::PathBuf, str::FromStr};

use image::{Rgb, RgbImage};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{Position, SimulationError};

pub const BUILTIN_SIZE: u32 = 500;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

const TRACK_MIN: u32 = 50;
const TRACK_MAX: u32 = 450;
const TRACK_HALF_WIDTH: u32 = 3;

const MAZE_SEED: u64 = 19878367467712;
const MAZE_CELL: u32 = 50;
const MAZE_WALL_HALF_WIDTH: u32 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Background {
    /// Plain white.
    Blank,
    /// Black square loop track.
    Lines,
    /// Blue-walled maze.
    Maze,
    /// Image file decoded by the `image` crate.
    Custom(PathBuf),
}

impl Background {
    /// Suggested robot start for the built-in backgrounds.
    pub fn default_start(&self) -> Option<Position> {
        match self {
            Background::Blank => Some(Position::new(250.0, 250.0)),
            Background::Lines => Some(Position::new(50.0, 450.0)),
            Background::Maze => Some(Position::new(30.0, 280.0)),
            Background::Custom(_) => None,
        }
    }

    pub fn load(&self) -> Result<RgbImage, SimulationError> {
        match self {
            Background::Blank => Ok(RgbImage::from_pixel(BUILTIN_SIZE, BUILTIN_SIZE, WHITE)),
            Background::Lines => Ok(lines()),
            Background::Maze => Ok(maze(MAZE_SEED)),
            Background::Custom(path) => image::open(path)
                .map(|image| image.into_rgb8())
                .map_err(|source| SimulationError::Background {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

impl FromStr for Background {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blank" => Ok(Background::Blank),
            "lines" => Ok(Background::Lines),
            "maze" => Ok(Background::Maze),
            _ => Err(SimulationError::InvalidKind(s.to_string())),
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Blank => write!(f, "blank"),
            Background::Lines => write!(f, "lines"),
            Background::Maze => write!(f, "maze"),
            Background::Custom(path) => write!(f, "{}", path.display()),
        }
    }
}

fn lines() -> RgbImage {
    let near = |v: u32, line: u32| v.abs_diff(line) <= TRACK_HALF_WIDTH;
    let within = |v: u32| v + TRACK_HALF_WIDTH >= TRACK_MIN && v <= TRACK_MAX + TRACK_HALF_WIDTH;

    RgbImage::from_fn(BUILTIN_SIZE, BUILTIN_SIZE, |x, y| {
        let on_vertical = (near(x, TRACK_MIN) || near(x, TRACK_MAX)) && within(y);
        let on_horizontal = (near(y, TRACK_MIN) || near(y, TRACK_MAX)) && within(x);
        if on_vertical || on_horizontal {
            BLACK
        } else {
            WHITE
        }
    })
}

/// Perfect maze carved by a randomized depth-first search over square cells.
fn maze(seed: u64) -> RgbImage {
    let cells = BUILTIN_SIZE / MAZE_CELL;
    let index = |column: u32, row: u32| (row * cells + column) as usize;

    // Every cell starts boxed in; carving removes its east or south wall.
    let mut east_wall = vec![true; (cells * cells) as usize];
    let mut south_wall = vec![true; (cells * cells) as usize];
    let mut visited = vec![false; (cells * cells) as usize];

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut stack = vec![(0, 0)];
    visited[index(0, 0)] = true;

    while let Some(&(column, row)) = stack.last() {
        let mut neighbours = Vec::with_capacity(4);
        if column > 0 {
            neighbours.push((column - 1, row));
        }
        if column + 1 < cells {
            neighbours.push((column + 1, row));
        }
        if row > 0 {
            neighbours.push((column, row - 1));
        }
        if row + 1 < cells {
            neighbours.push((column, row + 1));
        }
        neighbours.retain(|&(c, r)| !visited[index(c, r)]);
        neighbours.shuffle(&mut rng);

        let Some(&(next_column, next_row)) = neighbours.first() else {
            stack.pop();
            continue;
        };

        if next_column != column {
            east_wall[index(column.min(next_column), row)] = false;
        } else {
            south_wall[index(column, row.min(next_row))] = false;
        }
        visited[index(next_column, next_row)] = true;
        stack.push((next_column, next_row));
    }

    let mut image = RgbImage::from_pixel(BUILTIN_SIZE, BUILTIN_SIZE, WHITE);
    let near = |v: u32, line: u32| v.abs_diff(line) < MAZE_WALL_HALF_WIDTH;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let (column, row) = ((x / MAZE_CELL).min(cells - 1), (y / MAZE_CELL).min(cells - 1));
        let left = column * MAZE_CELL;
        let top = row * MAZE_CELL;
        let right = left + MAZE_CELL;
        let bottom = top + MAZE_CELL;

        let border = x < MAZE_WALL_HALF_WIDTH
            || y < MAZE_WALL_HALF_WIDTH
            || x + MAZE_WALL_HALF_WIDTH >= BUILTIN_SIZE
            || y + MAZE_WALL_HALF_WIDTH >= BUILTIN_SIZE;
        let east = east_wall[index(column, row)] && near(x, right);
        let south = south_wall[index(column, row)] && near(y, bottom);
        let west = column > 0 && east_wall[index(column - 1, row)] && near(x, left);
        let north = row > 0 && south_wall[index(column, row - 1)] && near(y, top);
        // Corner posts keep walls joined where passages meet.
        let post = near(x, left) && near(y, top);

        if border || east || south || west || north || post {
            *pixel = BLUE;
        }
    }

    image
}
