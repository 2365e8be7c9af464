//! Turns grid paths into world-space corridors and ties grid, search and oracle together.

use grid_util::point::Point;
use log::{debug, info};
use nalgebra::Vector3;

use crate::astar::{PathNode, Pathfinder};
use crate::config::NavConfig;
use crate::error::{PathfindingError, Result};
use crate::oracle::WalkabilityOracle;
use crate::pathing_grid::PathingGrid;

/// Pulls negative target coordinates onto the nearest edge row or column. Targets past the far
/// edges are left alone and will be rejected by the search.
pub fn clamp_target(target: Point) -> Point {
    Point::new(target.x.max(0), target.y.max(0))
}

/// Maps a path onto world space at the given vertical grid height, dropping points equal to the
/// one before them.
pub fn build_corridor(
    grid: &PathingGrid,
    path: &[PathNode],
    vertical_height: f32,
) -> Vec<Vector3<f32>> {
    let mut corridor: Vec<Vector3<f32>> = Vec::with_capacity(path.len());
    for node in path {
        let waypoint = grid.grid_to_world(node.point.x, node.point.y, vertical_height);
        if corridor.last() != Some(&waypoint) {
            corridor.push(waypoint);
        }
    }
    corridor
}

/// Owns a grid, the search state used on it and the oracle that keeps it current. Every
/// corridor request re-samples the whole grid first, so stale occupancy never leaks into a path.
#[derive(Clone, Debug)]
pub struct Navigator<O> {
    grid: PathingGrid,
    pathfinder: Pathfinder,
    oracle: O,
    vertical_height: f32,
}

impl<O: WalkabilityOracle> Navigator<O> {
    pub fn new(config: &NavConfig, oracle: O) -> Result<Navigator<O>> {
        let grid = PathingGrid::from_config(&config.grid, &oracle)?;
        let vertical_height = config.corridor.vertical_height(grid.cell_size());
        Ok(Navigator {
            grid,
            pathfinder: Pathfinder::new(),
            oracle,
            vertical_height,
        })
    }

    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Swaps the environment, e.g. after obstacles moved. Takes effect on the next refresh.
    pub fn set_oracle(&mut self, oracle: O) {
        self.oracle = oracle;
    }

    pub fn cell_size(&self) -> f32 {
        self.grid.cell_size()
    }

    pub fn vertical_height(&self) -> f32 {
        self.vertical_height
    }

    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    /// Re-samples the oracle into the grid, returning the number of changed cells.
    pub fn refresh(&mut self) -> usize {
        self.grid.refresh_walkability(&self.oracle)
    }

    /// Computes the grid path between two world positions. The target is clamped with
    /// [clamp_target]; the current position is not. Positions with NaN or infinite coordinates
    /// are refused before the grid is touched.
    pub fn find_path(
        &mut self,
        current: &Vector3<f32>,
        target: &Vector3<f32>,
    ) -> Result<Vec<PathNode>> {
        for position in [current, target] {
            if !position.iter().all(|c| c.is_finite()) {
                return Err(PathfindingError::NonFinitePosition {
                    x: position.x,
                    y: position.y,
                    z: position.z,
                });
            }
        }
        let start = self.grid.world_to_grid(current);
        let goal = clamp_target(self.grid.world_to_grid(target));
        let changed = self.refresh();
        if changed > 0 {
            info!("Grid refresh changed {} cells", changed);
        }
        self.pathfinder.find_path(&self.grid, start, goal)
    }

    /// Computes the waypoints leading from `current` to `target`.
    pub fn find_corridor(
        &mut self,
        current: &Vector3<f32>,
        target: &Vector3<f32>,
    ) -> Result<Vec<Vector3<f32>>> {
        let path = self.find_path(current, target)?;
        let corridor = build_corridor(&self.grid, &path, self.vertical_height);
        debug!(
            "Corridor of {} waypoints from {:?} to {:?}",
            corridor.len(),
            path.first().map(|n| n.point),
            path.last().map(|n| n.point)
        );
        Ok(corridor)
    }
}
