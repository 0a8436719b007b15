use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{ReportError, Result};

/// Report-level settings, loaded from `report.toml` when present.
///
/// Every field has a default so the tool runs without a config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Include the mental-health enrichment columns (relevance, specialty
    /// category, org type, global footprint, pitch angle) in every sheet.
    pub include_mh_columns: bool,
    /// Expected record count from the scrape, if known. The boundary
    /// reconstruction heuristic can mis-split when a trailing field happens
    /// to contain a space; a mismatch against this count is logged as a
    /// warning so the caller can detect reconstruction drift.
    pub expected_records: Option<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_mh_columns: true,
            expected_records: None,
        }
    }
}

impl ReportConfig {
    pub fn load() -> Result<Self> {
        Self::load_from("report.toml")
    }

    /// Load settings from the given path, falling back to defaults if the
    /// file does not exist. A file that exists but fails to parse is a
    /// configuration error, not a silent fallback.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
