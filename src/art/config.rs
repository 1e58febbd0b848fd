//! Density override file parsing.
//!
//! A small YAML file can reclassify individual ASCII characters, e.g. to
//! treat light box-drawing dots as background:
//!
//! ```yaml
//! chars:
//!   ".": 0.25
//!   "#": 1.0
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WeaveError};

use super::DensityMap;

/// Per-character density overrides loaded from YAML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityOverrides {
    /// Character to density, each in `[0, 1]`.
    pub chars: BTreeMap<char, f64>,
}

impl DensityOverrides {
    /// Load overrides from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| WeaveError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read density overrides: {}", e),
        })?;
        Self::parse(&content)
    }

    /// Parse overrides from a YAML string and validate the entries.
    pub fn parse(content: &str) -> Result<Self> {
        let overrides: Self = serde_yaml::from_str(content).map_err(|e| WeaveError::Parse {
            message: format!("Invalid density overrides: {}", e),
            help: Some("Expected a `chars` map of single characters to densities".to_string()),
        })?;

        for (&ch, &density) in &overrides.chars {
            if !ch.is_ascii() {
                return Err(WeaveError::Parse {
                    message: format!("Density override for non-ASCII character {:?}", ch),
                    help: Some("Only ASCII characters have density entries".to_string()),
                });
            }
            if !(0.0..=1.0).contains(&density) {
                return Err(WeaveError::Parse {
                    message: format!("Density {} for {:?} is outside [0, 1]", density, ch),
                    help: None,
                });
            }
        }
        Ok(overrides)
    }

    /// Apply the overrides on top of a density map.
    pub fn apply(&self, map: &mut DensityMap) {
        for (&ch, &density) in &self.chars {
            map.set(ch, density);
        }
    }
}
