use crate::region::Region;

use thiserror::Error;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    #[error("{len} tiles cannot be laid out in rows of width {width}")]
    Misaligned { len: usize, width: usize },

    #[error("grid dimensions must be positive, got {width}x{height}")]
    Degenerate { width: usize, height: usize },

    #[error("region {region:?} exceeds the bounds of a {width}x{height} grid")]
    OutOfBounds {
        region: Region,
        width: usize,
        height: usize,
    },

    #[error("({x}, {y}) is outside of a {width}x{height} grid")]
    PointOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerationError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("could not place room {room} after {attempts} attempts")]
    PlacementFailed { room: usize, attempts: usize },

    #[error("a {width}x{height} map cannot fit a room of at least {min_width}x{min_height}")]
    MapTooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },

    #[error("failed to generate a level after {tries} tries")]
    Exhausted { tries: usize },

    #[error("invalid level spec: {0}")]
    InvalidSpec(String),
}
