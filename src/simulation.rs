//! Functionality for running the demand model.
//!
//! Demand captured by the candidate site is estimated in three independent passes:
//!
//! * `local`: overnight charging on the street by people living near the site
//! * `workflux`: charging by commuters driving between the cities of the area
//! * `tmja`: charging by long-distance traffic on national roads which is not already explained by
//!   commuting
//!
//! Each pass produces a set of intermediate statistics and a net energy demand.
use crate::dataset::SimulationDataset;
use crate::parameters::SimulationParameters;
use log::{debug, info};
use serde::Serialize;

pub mod local;
pub use local::LocalStats;
use local::simulate_local;
pub mod tmja;
pub use tmja::TmjaStats;
use tmja::simulate_tmja;
pub mod workflux;
pub use workflux::WorkfluxStats;
use workflux::simulate_workflux;

/// Intermediate figures computed by each pass of the simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationStats {
    /// Statistics for local demand
    pub local: LocalStats,
    /// Statistics for commuter demand
    pub workflux: WorkfluxStats,
    /// Statistics for roaming demand
    pub tmja: TmjaStats,
}

/// Net energy demand captured by the candidate site, in kWh per year, for each kind of demand
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SimulationResults {
    /// Demand from people living near the site
    pub local: f64,
    /// Demand from commuters
    pub workflux: f64,
    /// Demand from national road traffic
    pub tmja: f64,
}

impl SimulationResults {
    /// The demand of all categories together
    pub fn total(&self) -> f64 {
        self.local + self.workflux + self.tmja
    }
}

/// Convert a distance driven into energy charged away from home.
///
/// `avg_conso` is expressed in kWh per 100 km.
fn away_from_home_energy(parameters: &SimulationParameters, avg_conso: f64, distance: f64) -> f64 {
    (1.0 - parameters.general.ratio_home_charge) * avg_conso * distance / 100.0
}

/// Run all three passes of the demand model over `dataset`.
///
/// Never fails: missing or empty data leads to zero contributions.
///
/// # Arguments
///
/// * `dataset` - The entities of the simulation area
/// * `parameters` - The parameters of the model
///
/// # Returns
///
/// The statistics and results of the simulation.
pub fn simulate(
    dataset: &SimulationDataset,
    parameters: &SimulationParameters,
) -> (SimulationStats, SimulationResults) {
    let avg_conso = parameters.average_consumption();
    debug!("Average consumption: {avg_conso} kWh/100km");

    let (local_stats, local) = simulate_local(dataset, parameters, avg_conso);
    let (workflux_stats, workflux) = simulate_workflux(dataset, parameters, avg_conso);
    let (tmja_stats, tmja) = simulate_tmja(
        dataset,
        parameters,
        avg_conso,
        workflux_stats.total_ev_traffic,
    );

    let results = SimulationResults {
        local,
        workflux,
        tmja,
    };
    info!(
        "Simulated demand: local {:.1}, workflux {:.1}, TMJA {:.1} (total {:.1})",
        results.local,
        results.workflux,
        results.tmja,
        results.total()
    );

    let stats = SimulationStats {
        local: local_stats,
        workflux: workflux_stats,
        tmja: tmja_stats,
    };

    (stats, results)
}
