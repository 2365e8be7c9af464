use crate::config::GridConfig;
use crate::error::{PathfindingError, Result};
use crate::oracle::WalkabilityOracle;
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use itertools::iproduct;
use log::{debug, info};
use nalgebra::{Vector2, Vector3};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// A snapshot of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub walkable: bool,
}

/// [PathingGrid] anchors a [BoolGrid] of blocked flags ([true] meaning blocked) in world space and
/// keeps the flags in sync with a [WalkabilityOracle]. It also maintains connected components
/// using a [UnionFind] structure so that unreachable goals can be rejected without flood-filling.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    cell_size: f32,
    offset: Vector2<f32>,
}

impl PathingGrid {
    /// Allocates a `width` by `height` grid and samples the oracle once per cell.
    pub fn new<O>(
        width: usize,
        height: usize,
        cell_size: f32,
        offset: Vector2<f32>,
        oracle: &O,
    ) -> Result<PathingGrid>
    where
        O: WalkabilityOracle + ?Sized,
    {
        GridConfig {
            width,
            height,
            cell_size,
            offset: [offset.x, offset.y],
        }
        .validate()?;
        let mut pathing_grid = PathingGrid {
            grid: BoolGrid::new(width, height, false),
            components: UnionFind::new(width * height),
            components_dirty: false,
            cell_size,
            offset,
        };
        let blocked = pathing_grid.sample(oracle);
        info!(
            "Created {}x{} grid ({} blocked cells, cell size {})",
            width, height, blocked, cell_size
        );
        pathing_grid.generate_components();
        Ok(pathing_grid)
    }

    pub fn from_config<O>(config: &GridConfig, oracle: &O) -> Result<PathingGrid>
    where
        O: WalkabilityOracle + ?Sized,
    {
        PathingGrid::new(
            config.width,
            config.height,
            config.cell_size,
            config.offset(),
            oracle,
        )
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn offset(&self) -> Vector2<f32> {
        self.offset
    }

    /// Maps a world position onto the horizontal grid plane. The vertical axis is ignored and the
    /// result is not bounds checked.
    pub fn world_to_grid(&self, world: &Vector3<f32>) -> Point {
        Point::new(
            ((world.x - self.offset.x) / self.cell_size).floor() as i32,
            ((world.z - self.offset.y) / self.cell_size).floor() as i32,
        )
    }

    /// Maps grid coordinates to world space. The offset is added before scaling and the vertical
    /// coordinate is scaled by the cell size as well, so `vertical_height` is in cell units.
    pub fn grid_to_world(&self, x: i32, y: i32, vertical_height: f32) -> Vector3<f32> {
        Vector3::new(
            x as f32 + self.offset.x,
            vertical_height,
            y as f32 + self.offset.y,
        ) * self.cell_size
    }

    /// Centre of the cube the oracle is asked about for a given cell.
    pub fn sample_centre(&self, x: i32, y: i32) -> Vector3<f32> {
        self.grid_to_world(x, y, (self.cell_size as i32 / 2) as f32)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    pub fn point_in_bounds(&self, point: Point) -> bool {
        self.in_bounds(point.x, point.y)
    }

    /// Returns [None] for coordinates outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.in_bounds(x, y).then(|| Cell {
            x,
            y,
            walkable: !self.grid.get(x, y),
        })
    }

    pub fn is_walkable(&self, point: Point) -> bool {
        self.point_in_bounds(point) && !self.grid.get(point.x, point.y)
    }

    /// Arena index of a point, or [PathfindingError::OutOfBounds].
    pub fn checked_index(&self, point: Point) -> Result<usize> {
        self.index_of(point)
            .ok_or_else(|| PathfindingError::OutOfBounds {
                x: point.x,
                y: point.y,
                width: self.width(),
                height: self.height(),
            })
    }

    /// Row-major arena index of an in-bounds point.
    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.point_in_bounds(point)
            .then(|| point.y as usize * self.width() + point.x as usize)
    }

    pub fn point_of(&self, ix: usize) -> Point {
        let w = self.width();
        Point::new((ix % w) as i32, (ix / w) as i32)
    }

    /// In-bounds cells around a point, ordered by x offset first and y offset second.
    pub fn neighborhood_points(&self, point: Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        let mut neighbours = SmallVec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let n = Point::new(point.x + dx, point.y + dy);
                if self.point_in_bounds(n) {
                    neighbours.push(n);
                }
            }
        }
        neighbours
    }

    /// Overrides a single cell until the next refresh. Joins newly connected components and flags
    /// the components as dirty if they are (potentially) broken apart.
    pub fn set_walkable(&mut self, x: i32, y: i32, walkable: bool) -> Result<()> {
        let p = Point::new(x, y);
        let p_ix = self.checked_index(p)?;
        let blocked = !walkable;
        if self.grid.get(x, y) == blocked {
            return Ok(());
        }
        self.grid.set(x, y, blocked);
        if blocked {
            self.components_dirty = true;
        } else {
            for n in self.neighborhood_points(p) {
                if let (true, Some(n_ix)) = (self.is_walkable(n), self.index_of(n)) {
                    self.components.union(p_ix, n_ix);
                }
            }
        }
        Ok(())
    }

    /// Re-samples every cell through the oracle and regenerates the components if any cell
    /// changed. Returns the number of changed cells.
    pub fn refresh_walkability<O>(&mut self, oracle: &O) -> usize
    where
        O: WalkabilityOracle + ?Sized,
    {
        let before = self.grid.clone();
        self.sample(oracle);
        let changed = self
            .cells()
            .filter(|&(x, y)| before.get(x, y) != self.grid.get(x, y))
            .count();
        if changed > 0 {
            debug!("Walkability refresh changed {} cells", changed);
            self.generate_components();
        } else {
            self.update();
        }
        changed
    }

    /// Writes the oracle's answer into every cell, returning the number of blocked cells.
    fn sample<O>(&mut self, oracle: &O) -> usize
    where
        O: WalkabilityOracle + ?Sized,
    {
        let half_extent = self.cell_size / 2.0;
        let mut blocked_count = 0;
        for (x, y) in self.cells() {
            let blocked = oracle.is_blocked(self.sample_centre(x, y), half_extent);
            self.grid.set(x, y, blocked);
            blocked_count += blocked as usize;
        }
        blocked_count
    }

    /// All cell coordinates, column by column.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        iproduct!(0..self.width() as i32, 0..self.height() as i32)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.index_of(*point).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.index_of(*start), self.index_of(*goal)) {
            (Some(start_ix), Some(goal_ix)) => !self.components.equiv(start_ix, goal_ix),
            _ => true,
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable grid neighbours to the same
    /// components. Diagonal neighbours are linked even when both orthogonal cells between them
    /// are blocked, matching the moves the search allows.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.len());
        self.components_dirty = false;
        for (x, y) in self.cells() {
            let point = Point::new(x, y);
            if !self.is_walkable(point) {
                continue;
            }
            let Some(parent_ix) = self.index_of(point) else {
                continue;
            };
            let linked = [
                Point::new(x, y + 1),
                Point::new(x + 1, y - 1),
                Point::new(x + 1, y),
                Point::new(x + 1, y + 1),
            ]
            .into_iter()
            .filter(|p| self.is_walkable(*p))
            .filter_map(|p| self.index_of(p))
            .collect::<SmallVec<[usize; 4]>>();
            for ix in linked {
                self.components.union(parent_ix, ix);
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in (0..self.height() as i32).rev() {
            let row = (0..self.width() as i32)
                .map(|x| if self.grid.get(x, y) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
