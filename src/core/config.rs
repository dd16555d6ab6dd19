//! Runtime configuration
//!
//! Every field has a default so a config file only needs to name what it
//! changes. CLI flags are applied on top by the binaries.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{HazardError, Result};
use crate::geometry::{Winding, DEFAULT_EPSILON};

/// How rule 12 ("hole touches exterior") is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryTouchCheck {
    /// Every exterior segment is tested against every hole segment for
    /// contact within epsilon (vertex-on-segment and crossings included).
    #[default]
    Segment,
    /// Legacy narrow check: an exterior vertex collinear with the supporting
    /// line of a hole segment counts as touching. Misses hole vertices that
    /// sit on an exterior edge away from any exterior vertex.
    Vertex,
}

/// Which hole-vs-hole overlap rules run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleOverlapCheck {
    /// Rule 10 (area overlap) and rule 13 (any contact, including touching
    /// at a point or along an edge).
    #[default]
    AreaThenAny,
    /// Rule 10 only; holes may touch.
    AreaOnly,
}

/// Tolerances and conventions for the topology validator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Tolerance for point equality, collinearity and zero-area tests
    pub epsilon: f64,

    /// Expected winding of exterior rings. Holes must wind the other way.
    ///
    /// Defaults to clockwise, the shapefile convention the source datasets
    /// use. GeoJSON (RFC 7946) datasets use counter-clockwise exteriors.
    pub exterior_winding: Winding,

    pub boundary_touch: BoundaryTouchCheck,

    pub hole_overlap: HoleOverlapCheck,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            exterior_winding: Winding::Clockwise,
            boundary_touch: BoundaryTouchCheck::Segment,
            hole_overlap: HoleOverlapCheck::AreaThenAny,
        }
    }
}

impl ValidatorConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            ));
        }
        Ok(())
    }

    pub fn hole_winding(&self) -> Winding {
        self.exterior_winding.opposite()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// The driver exits with failure when the invalid count exceeds this.
    /// 0 means any invalid polygon fails the run.
    pub max_invalid: usize,

    /// Validate polygons on the rayon pool
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_invalid: 0,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database holding validity flags and parcels. No path means
    /// results are not persisted.
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub validator: ValidatorConfig,
    pub batch: BatchConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.validator.validate().map_err(HazardError::Config)
    }
}
