//! # grid_walker
//!
//! Shortest walkable paths on a world-anchored 2D grid, using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) over an 8-neighbourhood with
//! integer move costs and the octile distance as heuristic.
//!
//! The [PathingGrid] stores which cells are blocked. It learns this from a [WalkabilityOracle],
//! the crate's only view of the environment, and re-samples it before every request made through
//! a [Navigator]. The [Pathfinder] searches the grid, [build_corridor] turns the result into
//! world-space waypoints and a [PathFollower] walks an agent along them.
//!
//! ```
//! use grid_walker::{NavConfig, Navigator, OpenField};
//! use nalgebra::Vector3;
//!
//! let config = NavConfig::from_toml("[grid]\nwidth = 3\nheight = 3\n").unwrap();
//! let mut navigator = Navigator::new(&config, OpenField).unwrap();
//! let corridor = navigator
//!     .find_corridor(&Vector3::new(0.5, 0.0, 0.5), &Vector3::new(2.5, 0.0, 2.5))
//!     .unwrap();
//! assert_eq!(corridor.len(), 3);
//! ```
pub mod agent;
pub mod astar;
pub mod config;
pub mod corridor;
pub mod error;
mod open_set;
pub mod oracle;
pub mod pathing_grid;
pub mod search_node;

pub use agent::PathFollower;
pub use astar::{heuristic, move_cost, path_cost, PathNode, Pathfinder, SearchStats};
pub use config::{AgentConfig, CorridorConfig, GridConfig, NavConfig};
pub use corridor::{build_corridor, clamp_target, Navigator};
pub use error::{PathfindingError, Result};
pub use oracle::{Aabb, AabbObstacles, OpenField, WalkabilityOracle};
pub use pathing_grid::{Cell, PathingGrid};
pub use search_node::{SearchNode, INFINITE_COST};

/// Cost of a straight (cardinal) move.
pub const C: i32 = 10;
/// Cost of a diagonal move, 10 * sqrt(2) rounded down.
pub const D: i32 = 14;
/// Helper constant for the octile distance.
pub const E: i32 = 2 * C - D;

pub(crate) const N_SMALLVEC_SIZE: usize = 8;
