//! The seam through which the environment tells the grid which cells are blocked.
//!
//! The grid never inspects geometry itself. It asks a [WalkabilityOracle] about a cube centred
//! on each cell and stores the answer, so any collision backend can be plugged in.

use nalgebra::Vector3;

/// Answers whether an axis-aligned cube is obstructed.
pub trait WalkabilityOracle {
    /// Returns [true] if the cube with the given centre and half extent overlaps an obstacle.
    fn is_blocked(&self, centre: Vector3<f32>, half_extent: f32) -> bool;
}

impl<F> WalkabilityOracle for F
where
    F: Fn(Vector3<f32>, f32) -> bool,
{
    fn is_blocked(&self, centre: Vector3<f32>, half_extent: f32) -> bool {
        self(centre, half_extent)
    }
}

/// An environment without obstacles.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenField;

impl WalkabilityOracle for OpenField {
    fn is_blocked(&self, _: Vector3<f32>, _: f32) -> bool {
        false
    }
}

/// An axis-aligned box given by its two extreme corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Builds a box from two arbitrary opposite corners.
    pub fn new(a: Vector3<f32>, b: Vector3<f32>) -> Aabb {
        Aabb {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    pub fn from_centre(centre: Vector3<f32>, half_extents: Vector3<f32>) -> Aabb {
        Aabb::new(centre - half_extents, centre + half_extents)
    }

    /// Touching faces do not count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] < other.max[i] && other.min[i] < self.max[i])
    }
}

/// A static set of box obstacles, mirroring a physics box-overlap query against one layer.
#[derive(Clone, Debug, Default)]
pub struct AabbObstacles {
    pub boxes: Vec<Aabb>,
}

impl AabbObstacles {
    pub fn new(boxes: Vec<Aabb>) -> AabbObstacles {
        AabbObstacles { boxes }
    }

    pub fn push(&mut self, obstacle: Aabb) {
        self.boxes.push(obstacle);
    }
}

impl WalkabilityOracle for AabbObstacles {
    fn is_blocked(&self, centre: Vector3<f32>, half_extent: f32) -> bool {
        let probe = Aabb::from_centre(centre, Vector3::repeat(half_extent));
        self.boxes.iter().any(|b| b.overlaps(&probe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_oracles() {
        let oracle = |centre: Vector3<f32>, _: f32| centre.x > 1.0;
        assert!(oracle.is_blocked(Vector3::new(2.0, 0.0, 0.0), 0.5));
        assert!(!oracle.is_blocked(Vector3::new(0.0, 0.0, 0.0), 0.5));
    }

    #[test]
    fn box_overlap_ignores_touching_faces() {
        let obstacles = AabbObstacles::new(vec![Aabb::new(
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::new(2.0, 2.0, 2.0),
        )]);
        // Cube spanning [1.5, 2.5] on x and z overlaps
        assert!(obstacles.is_blocked(Vector3::new(2.0, 1.0, 2.0), 0.5));
        // Cube spanning [2.0, 3.0] only touches the face
        assert!(!obstacles.is_blocked(Vector3::new(2.5, 1.0, 2.5), 0.5));
        assert!(!OpenField.is_blocked(Vector3::new(1.5, 1.0, 1.5), 0.5));
    }
}
