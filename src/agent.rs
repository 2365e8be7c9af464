//! Waypoint progression for an agent walking a corridor.
//!
//! The follower only decides *where* to head next. Moving and rotating the agent is up to the
//! host, which feeds the agent's position back in through [PathFollower::steer] every tick.

use log::{debug, warn};
use nalgebra::Vector3;

use crate::config::AgentConfig;
use crate::corridor::Navigator;
use crate::error::Result;
use crate::oracle::WalkabilityOracle;

#[derive(Clone, Debug)]
pub struct PathFollower {
    /// Distance under which the current waypoint counts as reached. Configured values must be
    /// positive; a waypoint the agent stands exactly on is reached regardless.
    pub minimal_distance: f32,
    path: Vec<Vector3<f32>>,
    current: usize,
    at_destination: bool,
}

impl Default for PathFollower {
    fn default() -> Self {
        PathFollower::new(&AgentConfig::default())
    }
}

impl PathFollower {
    pub fn new(config: &AgentConfig) -> PathFollower {
        PathFollower {
            minimal_distance: config.minimal_distance,
            path: Vec::new(),
            current: 0,
            at_destination: false,
        }
    }

    /// Requests a fresh corridor from `position` to `target` and starts following it. Returns the
    /// number of waypoints. On failure the follower is left without a destination.
    pub fn set_destination<O: WalkabilityOracle>(
        &mut self,
        navigator: &mut Navigator<O>,
        position: &Vector3<f32>,
        target: &Vector3<f32>,
    ) -> Result<usize> {
        match navigator.find_corridor(position, target) {
            Ok(corridor) => {
                self.follow(corridor);
                Ok(self.path.len())
            }
            Err(e) => {
                warn!("No corridor from {:?} to {:?}: {}", position, target, e);
                self.follow(Vec::new());
                Err(e)
            }
        }
    }

    /// Starts following an already built corridor.
    pub fn follow(&mut self, path: Vec<Vector3<f32>>) {
        self.path = path;
        self.current = 0;
        self.at_destination = false;
    }

    pub fn has_destination(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn is_at_destination(&self) -> bool {
        self.at_destination
    }

    pub fn path(&self) -> &[Vector3<f32>] {
        &self.path
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Returns the point the agent should head for, with its height replaced by the agent's own.
    /// Reaching the current waypoint advances to the next; reaching the last one finishes the
    /// path and returns [None].
    ///
    /// All waypoints already within reach are skipped in a single call, where a per-tick agent
    /// would advance one index per tick and stand still meanwhile. The waypoint sequence visited
    /// and the final state are the same.
    pub fn steer(&mut self, position: &Vector3<f32>) -> Option<Vector3<f32>> {
        loop {
            let mut waypoint = *self.path.get(self.current)?;
            waypoint.y = position.y;
            let distance = (waypoint - position).norm();
            if distance >= self.minimal_distance && distance > 0.0 {
                return Some(waypoint);
            }
            if self.current + 1 >= self.path.len() {
                debug!("Destination {:?} reached", waypoint);
                self.path.clear();
                self.current = 0;
                self.at_destination = true;
                return None;
            }
            self.current += 1;
        }
    }
}
