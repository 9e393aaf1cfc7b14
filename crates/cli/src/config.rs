use std::path::Path;

use anyhow::{Context, Result};
use exitrank_survey::SurveyLayout;
use exitrank_viz::ChartOptions;
use serde::{Deserialize, Serialize};

/// Optional JSON configuration file.
///
/// Both sections and every field inside them may be left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitrankConfig {
    pub layout: SurveyLayout,
    pub chart: ChartOptions,
}

impl ExitrankConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}
