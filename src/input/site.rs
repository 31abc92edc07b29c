//! Code for reading charging site records and the candidate site description.
use super::{Feature, check_non_negative};
use crate::city::CityID;
use crate::id::deserialise_id;
use crate::site::{ChargingSite, DeviationMap, SiteID};
use crate::units::{Minutes, Power};
use anyhow::{Result, ensure};
use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

/// The power given to the candidate site if none is specified
pub const DEFAULT_CANDIDATE_POWER: Power = Power(22.0);

/// Placeholder name for sites without one
fn default_site_name() -> String {
    "Unknown".into()
}

/// The properties of a charging site feature
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SiteProperties {
    /// Identifier of the site, either an integer or a string
    #[serde(deserialize_with = "deserialise_id")]
    pub id: SiteID,
    /// Name of the site
    #[serde(default = "default_site_name")]
    pub name: String,
    /// The power of the fastest charging point of the site, if known
    #[serde(default)]
    pub max_power: Option<Power>,
    /// Deviation times from the flows the site can serve
    #[serde(default)]
    pub deviations: DeviationMap,
}

/// The contents of `simulation_site.json`: the candidate site and the driving times towards it
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimulationSiteRaw {
    /// The candidate site as a GeoJSON feature
    pub geojson: Feature<SiteProperties>,
    /// Driving time from each city to the candidate site
    pub cities_duration: IndexMap<CityID, Minutes>,
    /// Driving time from each competing site to the candidate site
    pub sites_duration: IndexMap<SiteID, Minutes>,
}

/// Check the deviation times of a site
fn check_deviations(id: &SiteID, deviations: &DeviationMap) -> Result<()> {
    for (flow_id, deviation) in deviations {
        check_non_negative(
            deviation.value(),
            &format!("deviation from flow {flow_id}"),
            id,
        )?;
    }

    Ok(())
}

/// Convert the properties of a competing site into a [`ChargingSite`].
///
/// Sites without a strictly positive power cannot charge anything, so they are disabled.
pub fn competitor_from_properties(raw: SiteProperties) -> Result<ChargingSite> {
    check_deviations(&raw.id, &raw.deviations)?;

    let max_power = raw.max_power.unwrap_or(Power(0.0));
    ensure!(max_power.is_finite(), "Invalid max_power for site {}", raw.id);

    let mut site = ChargingSite::new(raw.id, raw.name, max_power, raw.deviations);
    if max_power <= Power(0.0) {
        warn!(
            "Charging site {} has no usable charging power and will be disabled",
            site.id
        );
        site.enabled = false;
    }

    Ok(site)
}

/// Convert the properties of the candidate site into a [`ChargingSite`].
///
/// The candidate must be able to charge, so its power must be strictly positive.
pub fn candidate_from_properties(raw: SiteProperties) -> Result<ChargingSite> {
    check_deviations(&raw.id, &raw.deviations)?;

    let max_power = raw.max_power.unwrap_or(DEFAULT_CANDIDATE_POWER);
    ensure!(
        max_power.is_finite() && max_power > Power(0.0),
        "The candidate site must have a finite max_power greater than zero"
    );

    Ok(ChargingSite::new(
        raw.id,
        raw.name,
        max_power,
        raw.deviations,
    ))
}

/// Check the driving times towards the candidate site
pub fn check_durations<'a, ID, I>(durations: I) -> Result<()>
where
    ID: std::fmt::Display + 'a,
    I: IntoIterator<Item = (&'a ID, &'a Minutes)>,
{
    for (id, duration) in durations {
        check_non_negative(duration.value(), "duration to the candidate site", id)?;
    }

    Ok(())
}
