//! Sectioned navigation configuration, loadable from TOML.
//!
//! ```toml
//! [grid]
//! width = 20
//! height = 10
//! cell_size = 1.0
//! offset = [0.0, 0.0]
//!
//! [corridor]
//! vertical_height = 1.0
//!
//! [agent]
//! minimal_distance = 0.25
//! ```

use std::path::Path;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{PathfindingError, Result};

mod defaults {
    pub fn width() -> usize {
        10
    }

    pub fn height() -> usize {
        10
    }

    pub fn cell_size() -> f32 {
        1.0
    }

    pub fn minimal_distance() -> f32 {
        0.25
    }
}

/// Grid construction parameters, fixed for the lifetime of a grid.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    #[serde(default = "defaults::width")]
    pub width: usize,

    #[serde(default = "defaults::height")]
    pub height: usize,

    /// Edge length of a cell in world units.
    #[serde(default = "defaults::cell_size")]
    pub cell_size: f32,

    /// World-space (x, z) offset of the grid.
    #[serde(default)]
    pub offset: [f32; 2],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: defaults::width(),
            height: defaults::height(),
            cell_size: defaults::cell_size(),
            offset: [0.0, 0.0],
        }
    }
}

impl GridConfig {
    pub fn new(width: usize, height: usize, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
            offset: [0.0, 0.0],
        }
    }

    /// Builder-style setter for the world offset.
    pub fn with_offset(mut self, x: f32, z: f32) -> Self {
        self.offset = [x, z];
        self
    }

    pub fn offset(&self) -> Vector2<f32> {
        Vector2::new(self.offset[0], self.offset[1])
    }

    /// Rejects empty grids, grids that cannot be addressed with `i32` coordinates and cell
    /// sizes that are not strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PathfindingError::InvalidDimension(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(PathfindingError::InvalidDimension(format!(
                "{}x{} exceeds the addressable coordinate range",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(PathfindingError::InvalidDimension(format!(
                "{}x{} cells do not fit in memory",
                self.width, self.height
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(PathfindingError::InvalidDimension(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }
        Ok(())
    }
}

/// How corridor waypoints are placed vertically.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CorridorConfig {
    /// Vertical grid coordinate handed to the grid-to-world conversion. It is scaled by the
    /// cell size like the horizontal ones. Defaults to the truncated cell size.
    #[serde(default)]
    pub vertical_height: Option<f32>,
}

impl CorridorConfig {
    pub fn vertical_height(&self, cell_size: f32) -> f32 {
        self.vertical_height.unwrap_or_else(|| cell_size.trunc())
    }
}

/// Waypoint following settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    /// Distance under which the current waypoint counts as reached.
    #[serde(default = "defaults::minimal_distance")]
    pub minimal_distance: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            minimal_distance: defaults::minimal_distance(),
        }
    }
}

/// Full navigation configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NavConfig {
    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub corridor: CorridorConfig,

    #[serde(default)]
    pub agent: AgentConfig,
}

impl NavConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: NavConfig = toml::from_str(source)?;
        config.grid.validate()?;
        if !(config.agent.minimal_distance.is_finite() && config.agent.minimal_distance > 0.0) {
            return Err(PathfindingError::Config(format!(
                "minimal_distance must be positive, got {}",
                config.agent.minimal_distance
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_with_defaults() {
        let config = NavConfig::from_toml(
            r#"
            [grid]
            width = 20
            height = 5
            cell_size = 2.0
            offset = [1.0, -3.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.width, 20);
        assert_eq!(config.grid.offset(), Vector2::new(1.0, -3.0));
        assert_eq!(config.corridor.vertical_height(config.grid.cell_size), 2.0);
        assert_eq!(config.agent.minimal_distance, 0.25);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(NavConfig::from_toml("").unwrap(), NavConfig::default());
    }

    #[test]
    fn rejects_bad_dimensions() {
        for grid in [
            GridConfig::new(0, 4, 1.0),
            GridConfig::new(4, 0, 1.0),
            GridConfig::new(4, 4, 0.0),
            GridConfig::new(4, 4, -1.0),
            GridConfig::new(4, 4, f32::NAN),
        ] {
            assert!(matches!(
                grid.validate(),
                Err(PathfindingError::InvalidDimension(_))
            ));
        }
        let err = NavConfig::from_toml("[grid]\ncell_size = -0.5\n").unwrap_err();
        assert!(matches!(err, PathfindingError::InvalidDimension(_)));
    }

    #[test]
    fn rejects_non_positive_minimal_distance() {
        for value in ["0.0", "-0.25", "nan"] {
            let source = format!("[agent]\nminimal_distance = {}\n", value);
            let err = NavConfig::from_toml(&source).unwrap_err();
            assert!(matches!(err, PathfindingError::Config(_)), "{}", value);
        }
        let config = NavConfig::from_toml("[agent]\nminimal_distance = 0.01\n").unwrap();
        assert_eq!(config.agent.minimal_distance, 0.01);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = NavConfig::from_toml("[grid]\nwidth = \"wide\"\n").unwrap_err();
        assert!(matches!(err, PathfindingError::Config(_)));
    }

    #[test]
    fn vertical_height_truncates_cell_size() {
        let corridor = CorridorConfig::default();
        assert_eq!(corridor.vertical_height(2.5), 2.0);
        assert_eq!(corridor.vertical_height(0.5), 0.0);
        let fixed = CorridorConfig {
            vertical_height: Some(0.75),
        };
        assert_eq!(fixed.vertical_height(2.5), 0.75);
    }
}
