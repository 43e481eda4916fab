//! Configuration values for board ordering and task views

use crate::error::ConfigError;
use crate::ConfigResult;
use serde::{Deserialize, Serialize};

/// Seed position handed to the first item of an empty list
pub const DEFAULT_SEED_POSITION: f64 = 65535.0;

/// Gap below which an allocated position is reported as degenerate
pub const DEFAULT_MIN_GAP: f64 = 1e-9;

/// Distance between neighbors after an explicit rebalance
pub const DEFAULT_REBALANCE_SPACING: f64 = 65535.0;

/// First day of the week used by week-relative due date filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

/// Tunables shared by the position allocator, the drop resolver and the task query.
///
/// Every field has a default matching the board's historical behavior, so an
/// empty configuration reproduces it exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Position assigned when both neighbors are missing
    pub seed_position: f64,
    /// Neighbor distance under which allocations are logged as degenerate
    pub min_gap: f64,
    /// Spacing used when planning a rebalance
    pub rebalance_spacing: f64,
    /// First day of the week
    pub week_start: WeekStart,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed_position: DEFAULT_SEED_POSITION,
            min_gap: DEFAULT_MIN_GAP,
            rebalance_spacing: DEFAULT_REBALANCE_SPACING,
            week_start: WeekStart::default(),
        }
    }
}

impl BoardConfig {
    /// Check the extracted values for ranges figment cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.seed_position.is_finite() || self.seed_position <= 0.0 {
            return Err(ConfigError::invalid_value(
                "seed_position",
                format!("must be a positive finite number, got {}", self.seed_position),
            ));
        }

        if !self.min_gap.is_finite() || self.min_gap < 0.0 {
            return Err(ConfigError::invalid_value(
                "min_gap",
                format!("must be a non-negative finite number, got {}", self.min_gap),
            ));
        }

        if !self.rebalance_spacing.is_finite() || self.rebalance_spacing <= 0.0 {
            return Err(ConfigError::invalid_value(
                "rebalance_spacing",
                format!(
                    "must be a positive finite number, got {}",
                    self.rebalance_spacing
                ),
            ));
        }

        Ok(())
    }
}
