use crate::error::ConfigError;
use crate::measure::TextMetrics;
use crate::placement::{GridConfig, PlacementStrategy};
use serde::{Deserialize, Serialize};

/// Tunables for a canvas. Every field may be omitted when read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    /// How long a node stays highlighted after a duplicate drop.
    pub highlight_ms: u64,
    /// How long a toast stays up before it auto-dismisses.
    pub toast_ms: u64,
    pub placement: PlacementStrategy,
    /// Horizontal clearance left by the shift strategy.
    pub gap: f64,
    pub grid: GridConfig,
    pub metrics: TextMetrics,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            highlight_ms: 3_000,
            toast_ms: 3_000,
            placement: PlacementStrategy::Shift,
            gap: 20.0,
            grid: GridConfig::default(),
            metrics: TextMetrics::default(),
        }
    }
}

impl DesignerConfig {
    /// Parse host overrides. Grids with non-positive cells are rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.grid.validate()?;
        Ok(config)
    }
}
