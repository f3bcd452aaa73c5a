use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Tunables for drag activation and swap decisions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortableConfig {
    /// How long a touch must be held before it turns into a drag.
    pub touch_activation_delay_ms: u64,
    /// Extra distance (px) the ghost's left edge must travel past a preceding
    /// item's horizontal center before a backward swap in a row.
    pub horizontal_hysteresis: f32,
    /// Two rects whose tops differ by at most this many px are treated as one row.
    /// `0.0` means the tops must be exactly equal.
    pub row_tolerance: f32,
    /// Stacking order given to the drag ghost.
    pub ghost_z_index: u32,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            touch_activation_delay_ms: 200,
            horizontal_hysteresis: 20.,
            row_tolerance: 0.,
            ghost_z_index: 1000,
        }
    }
}

impl SortableConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("parse sortable config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read sortable config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("load {}", path.display()))
    }

    pub fn touch_activation_delay(&self) -> Duration {
        Duration::from_millis(self.touch_activation_delay_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.horizontal_hysteresis.is_nan() || self.horizontal_hysteresis < 0. {
            return Err(anyhow!(
                "horizontal_hysteresis must be >= 0, got {}",
                self.horizontal_hysteresis
            ));
        }
        if self.row_tolerance.is_nan() || self.row_tolerance < 0. {
            return Err(anyhow!(
                "row_tolerance must be >= 0, got {}",
                self.row_tolerance
            ));
        }
        Ok(())
    }
}
