//! Dashboard configuration.
//! Read from `dashboard.json` in the working directory when present.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Listings CSV.
    pub data_path: PathBuf,
    pub price_bins: usize,
    pub model_year_bins: usize,
    pub days_listed_bins: usize,
    /// Brands shown in the mean price chart.
    pub top_brands: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("vehicles_clean.csv"),
            price_bins: 50,
            model_year_bins: 30,
            days_listed_bins: 50,
            top_brands: 20,
        }
    }
}

impl DashboardConfig {
    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No {} found, using default settings", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;

        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("price_bins", self.price_bins),
            ("model_year_bins", self.model_year_bins),
            ("days_listed_bins", self.days_listed_bins),
            ("top_brands", self.top_brands),
        ] {
            if value == 0 {
                bail!("{name} must be at least 1");
            }
        }
        Ok(())
    }
}
