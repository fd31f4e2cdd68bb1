//! Size constants driving the layout.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

pub const DEFAULT_NODE_WIDTH: f64 = 120.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 48.0;
pub const DEFAULT_LATERAL_SPACING: f64 = 8.0;
pub const DEFAULT_LEVEL_HEIGHT: f64 = 80.0;

/// Box and spacing sizes, all in one linear unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Width of one node box
    pub node_width: f64,
    /// Height of one node box
    pub node_height: f64,
    /// Half the minimum horizontal gap between adjacent boxes
    pub lateral_spacing: f64,
    /// Vertical stride per depth level
    pub level_height: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            lateral_spacing: DEFAULT_LATERAL_SPACING,
            level_height: DEFAULT_LEVEL_HEIGHT,
        }
    }
}

impl LayoutMetrics {
    /// Horizontal room taken by one leaf: the box plus spacing on both sides.
    pub fn node_total_width(&self) -> f64 {
        self.node_width + 2.0 * self.lateral_spacing
    }

    pub fn validate(&self) -> DomainResult<()> {
        let fields = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("lateral_spacing", self.lateral_spacing),
            ("level_height", self.level_height),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} must be finite")));
        }
        if self.node_width <= 0.0 || self.node_height <= 0.0 {
            return Err(invalid("node_width and node_height must be positive".into()));
        }
        if self.lateral_spacing < 0.0 {
            return Err(invalid("lateral_spacing must not be negative".into()));
        }
        if self.level_height < self.node_height {
            return Err(invalid(format!(
                "level_height {} is smaller than node_height {}",
                self.level_height, self.node_height
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> DomainError {
    DomainError::InvalidMetrics { message }
}
