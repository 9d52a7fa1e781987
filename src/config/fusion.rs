//! Fusion configuration section.

use serde::{Deserialize, Serialize};

use crate::camera::ClassifierConfig;
use crate::grid::{FusionConfig, FusionMode};

use super::defaults;

/// Fusion configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FusionSection {
    /// "first_writer" or "refresh"
    #[serde(default)]
    pub mode: FusionMode,

    /// Grey values above this are obstacles
    #[serde(default = "defaults::occupied_threshold")]
    pub occupied_threshold: u8,

    /// Lookup window half-width in pixels (0 = single pixel)
    #[serde(default)]
    pub neighborhood_radius: u32,
}

impl Default for FusionSection {
    fn default() -> Self {
        Self {
            mode: FusionMode::FirstWriter,
            occupied_threshold: 128,
            neighborhood_radius: 0,
        }
    }
}

impl FusionSection {
    /// Convert to FusionConfig
    pub fn to_fusion_config(&self) -> FusionConfig {
        FusionConfig { mode: self.mode }
    }

    /// Convert to ClassifierConfig
    pub fn to_classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            occupied_threshold: self.occupied_threshold,
            neighborhood_radius: self.neighborhood_radius,
        }
    }
}
