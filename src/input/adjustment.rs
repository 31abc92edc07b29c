//! Code for reading per-site adjustments from `site_adjustments.csv`.
use super::read_csv;
use crate::site::SiteID;
use crate::units::Minutes;
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

const SITE_ADJUSTMENTS_FILE_NAME: &str = "site_adjustments.csv";

/// A user override for a competing charging site.
///
/// Empty fields leave the corresponding value of the site unchanged.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SiteAdjustment {
    /// The site to adjust
    pub site_id: SiteID,
    /// Whether the site takes part in the simulation
    pub enabled: Option<bool>,
    /// Time deducted from the charging time at this site
    pub time_bonus: Option<Minutes>,
}

/// Read site adjustments from the simulation directory, if the file exists.
///
/// # Arguments
///
/// * `sim_dir` - Folder containing the simulation input files
pub fn read_site_adjustments(sim_dir: &Path) -> Result<Option<Vec<SiteAdjustment>>> {
    let file_path = sim_dir.join(SITE_ADJUSTMENTS_FILE_NAME);
    if !file_path.is_file() {
        return Ok(None);
    }

    read_csv(&file_path).map(Some)
}
