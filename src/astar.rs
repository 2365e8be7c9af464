//! A* over a [PathingGrid] with an 8-neighbourhood and integer move costs.
//!
//! Search state lives in a [SearchContext] arena owned by the [Pathfinder], so repeated requests
//! reuse their allocations. The open set is an indexed binary heap whose ties are broken by
//! insertion order, which makes results a pure function of the grid, the start and the goal.

use grid_util::point::Point;
use log::{debug, warn};

use crate::error::{PathfindingError, Result};
use crate::open_set::OpenSet;
use crate::pathing_grid::PathingGrid;
use crate::search_node::{NodeState, SearchContext, SearchNode, INFINITE_COST};
use crate::{C, D, E};

/// Cost of a single step between two adjacent cells.
pub fn move_cost(p1: &Point, p2: &Point) -> i32 {
    if p1.x != p2.x && p1.y != p2.y {
        D
    } else {
        C
    }
}

/// Octile distance, the exact cost of an unobstructed path under [move_cost]. Saturates at
/// [INFINITE_COST] for points too far apart to be represented.
pub fn heuristic(p1: &Point, p2: &Point) -> i32 {
    let delta_x = i64::from(p1.x.abs_diff(p2.x));
    let delta_y = i64::from(p1.y.abs_diff(p2.y));
    // Formula from https://github.com/riscy/a_star_on_grids
    // to efficiently compute the cost of a path taking the maximal amount
    // of diagonal steps before going straight
    let cost = (i64::from(E) * (delta_x - delta_y).abs() + i64::from(D) * (delta_x + delta_y)) / 2;
    i32::try_from(cost).unwrap_or(INFINITE_COST)
}

/// Sums the step costs along a path of adjacent points.
pub fn path_cost(path: &[Point]) -> i32 {
    path.windows(2).map(|w| move_cost(&w[0], &w[1])).sum()
}

/// One cell of a found path together with the costs it was settled with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathNode {
    pub point: Point,
    pub g_cost: i32,
    pub h_cost: i32,
    pub f_cost: i32,
}

/// Counters describing the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken from the open set and expanded.
    pub expanded: usize,
    /// Nodes that entered the open set.
    pub discovered: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    context: SearchContext,
    open: OpenSet,
    stats: SearchStats,
}

impl Pathfinder {
    pub fn new() -> Pathfinder {
        Pathfinder::default()
    }

    pub fn last_search(&self) -> SearchStats {
        self.stats
    }

    /// Search state of a cell as left by the most recent search.
    pub fn node(&self, grid: &PathingGrid, point: Point) -> Option<SearchNode> {
        let ix = grid.index_of(point)?;
        (ix < self.context.len()).then(|| self.context.node(ix))
    }

    /// Computes an optimal path from start to goal, both inclusive.
    ///
    /// Fails with [PathfindingError::OutOfBounds] if either end lies outside the grid and with
    /// [PathfindingError::NoPathFound] if the goal cannot be reached. The start cell itself is
    /// never checked for walkability.
    pub fn find_path(
        &mut self,
        grid: &PathingGrid,
        start: Point,
        goal: Point,
    ) -> Result<Vec<PathNode>> {
        let start_ix = grid.checked_index(start)?;
        let goal_ix = grid.checked_index(goal)?;

        self.context.reset(grid.len());
        self.open.clear(grid.len());
        self.stats = SearchStats::default();

        let start_node = self.context.node_mut(start_ix);
        start_node.set_costs(0, heuristic(&start, &goal));
        start_node.set_state(NodeState::Open);
        self.open.push(start_ix, start_node.f_cost());
        self.stats.discovered = 1;

        // Skip the flood fill when the components already prove the goal is cut off. A blocked
        // start sits in a component of its own but may still step onto its neighbours.
        let shortcut = start_ix != goal_ix
            && !grid.components_dirty
            && grid.is_walkable(start)
            && grid.unreachable(&start, &goal);
        if shortcut {
            debug!("{:?} and {:?} are on different components", start, goal);
            return Err(PathfindingError::NoPathFound { start, goal });
        }

        while let Some(current_ix) = self.open.pop() {
            if current_ix == goal_ix {
                debug!(
                    "Path from {:?} to {:?} found after expanding {} of {} discovered nodes",
                    start, goal, self.stats.expanded, self.stats.discovered
                );
                return Ok(self.reconstruct(grid, goal_ix));
            }
            self.stats.expanded += 1;
            let current_g = {
                let current = self.context.node_mut(current_ix);
                current.set_state(NodeState::Closed);
                current.g_cost()
            };
            let current = grid.point_of(current_ix);

            for neighbour in grid.neighborhood_points(current) {
                let Some(n_ix) = grid.index_of(neighbour) else {
                    continue;
                };
                let node = self.context.node_mut(n_ix);
                if node.state() == NodeState::Closed {
                    continue;
                }
                if !grid.is_walkable(neighbour) {
                    // Blocked cells are never expanded, only remembered as visited
                    node.set_state(NodeState::Closed);
                    continue;
                }
                let tentative_g = current_g + move_cost(&current, &neighbour);
                if tentative_g < node.g_cost() {
                    node.set_parent(Some(current_ix));
                    node.set_costs(tentative_g, heuristic(&neighbour, &goal));
                    if node.state() == NodeState::Open {
                        let f_cost = node.f_cost();
                        self.open.decrease(n_ix, f_cost);
                    }
                }
                let node = self.context.node_mut(n_ix);
                if node.state() == NodeState::Unvisited {
                    node.set_state(NodeState::Open);
                    let f_cost = node.f_cost();
                    self.open.push(n_ix, f_cost);
                    self.stats.discovered += 1;
                }
            }
        }

        if grid.reachable(&start, &goal) && !grid.components_dirty && grid.is_walkable(goal) {
            warn!(
                "Reachable goal {:?} could not be pathed to from {:?}, are the components correct?",
                goal, start
            );
        }
        Err(PathfindingError::NoPathFound { start, goal })
    }

    /// Like [find_path](Self::find_path) but only returns the visited points.
    pub fn find_points(
        &mut self,
        grid: &PathingGrid,
        start: Point,
        goal: Point,
    ) -> Result<Vec<Point>> {
        Ok(self
            .find_path(grid, start, goal)?
            .into_iter()
            .map(|n| n.point)
            .collect())
    }

    /// Follows parent links back from the goal and returns the chain in start to goal order.
    fn reconstruct(&self, grid: &PathingGrid, goal_ix: usize) -> Vec<PathNode> {
        let mut path: Vec<PathNode> =
            std::iter::successors(Some(goal_ix), |&ix| self.context.node(ix).parent())
                .map(|ix| {
                    let node = self.context.node(ix);
                    PathNode {
                        point: grid.point_of(ix),
                        g_cost: node.g_cost(),
                        h_cost: node.h_cost(),
                        f_cost: node.f_cost(),
                    }
                })
                .collect();
        path.reverse();
        path
    }
}
