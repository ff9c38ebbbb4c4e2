// ─────────────────────────────────────────────────────────────────────
// MLQ Coil Core — Study Configuration
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

//! JSON study configuration: design point, search settings and optional
//! predictor artifact paths, loadable from a single file.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TOP_K_PERCENT;
use crate::design::DesignParameters;
use crate::error::CoilResult;

/// Top-level configuration of one coil optimization study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Human-readable study label.
    pub study_name: String,
    /// Fixed design point swept over trace width.
    #[serde(default)]
    pub design: DesignParameters,
    /// Search settings.
    #[serde(default)]
    pub search: SearchSettings,
    /// Serialized predictor artifacts. Absent paths select the analytic model.
    #[serde(default)]
    pub artifacts: ArtifactPaths,
}

/// Settings of the candidate-band search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Band width around the peak Q, in percent of the peak.
    #[serde(default = "default_top_k_percent")]
    pub top_k_percent: f64,
}

fn default_top_k_percent() -> f64 {
    DEFAULT_TOP_K_PERCENT
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            top_k_percent: DEFAULT_TOP_K_PERCENT,
        }
    }
}

/// Filesystem locations of the learned predictor artifacts. Every path is
/// optional; the predictor degrades to its analytic form without them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// MLP weight archive (.npz).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Input standardization scaler (.npz with mean/scale).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler_x: Option<String>,
    /// Output standardization scaler (.npz with mean/scale).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler_y: Option<String>,
}

impl StudyConfig {
    /// Load a study configuration from a JSON file.
    pub fn from_file(path: &str) -> CoilResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: StudyConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        StudyConfig {
            study_name: "LPWPT-Tx-Coil".to_string(),
            design: DesignParameters::default(),
            search: SearchSettings::default(),
            artifacts: ArtifactPaths::default(),
        }
    }
}
