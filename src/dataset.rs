//! The simulation dataset: every entity of the simulation area plus the simulation outputs.
use crate::allocation;
use crate::city::{City, CityID, CityMap};
use crate::id::HasID;
use crate::input::adjustment::SiteAdjustment;
use crate::input::site::{candidate_from_properties, check_durations, competitor_from_properties};
use crate::input::{
    CityProperties, FeatureCollection, FlowProperties, SimulationSiteRaw, SiteProperties,
};
use crate::parameters::SimulationParameters;
use crate::simulation::{self, SimulationResults, SimulationStats};
use crate::site::{ChargingSite, SiteID, SiteMap};
use crate::traffic::{FlowCategory, TrafficFlow, TrafficFlowMap};
use crate::units::{Energy, Minutes};
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use log::debug;
use std::hash::Hash;

/// Driving times towards the candidate site, keyed by entity ID
pub type DurationMap<ID> = IndexMap<ID, Minutes>;

/// All the data of a simulation area along with the outputs of the last simulation.
///
/// The dataset is populated by the `load_*` methods, each of which replaces the previous contents
/// of the relevant collection. [`SimulationDataset::simulate`] then overwrites `stats` and
/// `results`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationDataset {
    /// The cities of the area
    pub cities: CityMap,
    /// Commuter flows between the cities of the area
    pub workfluxes: TrafficFlowMap,
    /// National road traffic flows crossing the area
    pub tmja: TrafficFlowMap,
    /// The charging sites competing with the candidate site
    pub sites: SiteMap,
    /// The site whose captured demand is estimated
    pub candidate: Option<ChargingSite>,
    /// Driving time from each city to the candidate site
    pub cities_duration: DurationMap<CityID>,
    /// Driving time from each competing site to the candidate site
    pub sites_duration: DurationMap<SiteID>,
    /// Intermediate figures of the last simulation
    pub stats: SimulationStats,
    /// Energy demand estimates of the last simulation
    pub results: SimulationResults,
}

/// Convert raw records into a map keyed by ID, rejecting duplicate IDs
fn build_id_map<I, T, ID, R>(iter: I, what: &str) -> Result<IndexMap<ID, T>>
where
    I: IntoIterator<Item = R>,
    R: TryInto<T, Error = anyhow::Error>,
    T: HasID<ID>,
    ID: Clone + Eq + Hash + std::fmt::Display,
{
    let mut map = IndexMap::new();
    for raw in iter {
        let item: T = raw.try_into()?;
        let id = item.get_id().clone();
        ensure!(
            map.insert(id.clone(), item).is_none(),
            "Duplicate {what} ID found: {id}"
        );
    }

    Ok(map)
}

impl SimulationDataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cities of the dataset
    pub fn load_cities(&mut self, collection: FeatureCollection<CityProperties>) -> Result<()> {
        self.cities = build_id_map::<_, City, _, _>(collection.into_properties(), "city")?;
        debug!("Loaded {} cities", self.cities.len());

        Ok(())
    }

    /// Replace the commuter flows of the dataset
    pub fn load_workfluxes(&mut self, collection: FeatureCollection<FlowProperties>) -> Result<()> {
        self.workfluxes = load_flows(collection, FlowCategory::Workflux)?;

        Ok(())
    }

    /// Replace the national road traffic flows of the dataset
    pub fn load_tmja(&mut self, collection: FeatureCollection<FlowProperties>) -> Result<()> {
        self.tmja = load_flows(collection, FlowCategory::Tmja)?;

        Ok(())
    }

    /// Replace the competing charging sites of the dataset
    pub fn load_sites(&mut self, collection: FeatureCollection<SiteProperties>) -> Result<()> {
        let mut sites = SiteMap::new();
        for raw in collection.into_properties() {
            let site = competitor_from_properties(raw)?;
            let id = site.id.clone();
            ensure!(
                sites.insert(id.clone(), site).is_none(),
                "Duplicate charging site ID found: {id}"
            );
        }
        self.sites = sites;
        debug!("Loaded {} charging sites", self.sites.len());

        Ok(())
    }

    /// Replace the candidate site and the driving times towards it
    pub fn load_simulation_site(&mut self, raw: SimulationSiteRaw) -> Result<()> {
        check_durations(&raw.cities_duration)?;
        check_durations(&raw.sites_duration)?;
        let candidate = candidate_from_properties(raw.geojson.properties)
            .context("Invalid candidate site")?;

        debug!(
            "Loaded candidate site \"{}\" ({} kW)",
            candidate.name,
            candidate.max_power.value()
        );
        self.candidate = Some(candidate);
        self.cities_duration = raw.cities_duration;
        self.sites_duration = raw.sites_duration;

        Ok(())
    }

    /// Override the enabled flag and time bonus of competing sites
    pub fn apply_site_adjustments<I>(&mut self, adjustments: I) -> Result<()>
    where
        I: IntoIterator<Item = SiteAdjustment>,
    {
        for adjustment in adjustments {
            let site = self
                .sites
                .get_mut(&adjustment.site_id)
                .with_context(|| format!("Unknown charging site ID {}", adjustment.site_id))?;

            if let Some(enabled) = adjustment.enabled {
                site.enabled = enabled;
            }
            if let Some(time_bonus) = adjustment.time_bonus {
                ensure!(
                    time_bonus.is_finite(),
                    "Invalid time bonus for charging site {}",
                    site.id
                );
                site.time_bonus = time_bonus;
            }
        }

        Ok(())
    }

    /// The traffic of `flow` captured by the candidate site.
    ///
    /// Zero if no candidate site has been loaded.
    pub fn captured_traffic(&self, flow: &TrafficFlow, energy: Energy) -> f64 {
        self.candidate.as_ref().map_or(0.0, |candidate| {
            allocation::captured_traffic(candidate, self.sites.values(), flow, energy)
        })
    }

    /// Run the demand model, overwriting `stats` and `results`.
    ///
    /// Running it again with the same parameters gives the same outputs.
    pub fn simulate(&mut self, parameters: &SimulationParameters) {
        let (stats, results) = simulation::simulate(self, parameters);
        self.stats = stats;
        self.results = results;
    }
}

/// Build a map of traffic flows from raw records
fn load_flows(
    collection: FeatureCollection<FlowProperties>,
    category: FlowCategory,
) -> Result<TrafficFlowMap> {
    let flows = build_id_map::<_, TrafficFlow, _, _>(collection.into_properties(), "flow")?;
    debug!("Loaded {} {category} flows", flows.len());

    Ok(flows)
}
