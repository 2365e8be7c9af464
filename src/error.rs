//! Error types for grid construction, configuration and path requests.

use grid_util::point::Point;
use thiserror::Error;

/// Everything that can go wrong while building a grid or asking it for a path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathfindingError {
    /// Non-positive width, height or cell size. Construction is aborted.
    #[error("Invalid grid dimension: {0}")]
    InvalidDimension(String),

    /// Start or goal does not name a cell of the grid.
    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// A requested world position has a NaN or infinite coordinate.
    #[error("Position ({x}, {y}, {z}) is not finite")]
    NonFinitePosition { x: f32, y: f32, z: f32 },

    /// The open set ran dry before the goal was selected.
    #[error("No path from {start:?} to {goal:?}")]
    NoPathFound { start: Point, goal: Point },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for PathfindingError {
    fn from(e: toml::de::Error) -> Self {
        PathfindingError::Config(e.to_string())
    }
}

impl From<std::io::Error> for PathfindingError {
    fn from(e: std::io::Error) -> Self {
        PathfindingError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PathfindingError>;
