//! Commuter demand: charging by people driving to work between the cities of the area.
use crate::dataset::SimulationDataset;
use crate::parameters::SimulationParameters;
use serde::Serialize;

/// Number of working weeks in a year
const WORKING_WEEKS_PER_YEAR: f64 = 47.0;

/// Number of working days in a week
const WORKING_DAYS_PER_WEEK: f64 = 5.0;

/// Number of commuting days in a year
const WORKING_DAYS_PER_YEAR: f64 = WORKING_WEEKS_PER_YEAR * WORKING_DAYS_PER_WEEK;

/// Intermediate figures of the workflux pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkfluxStats {
    /// Number of commuting trips by electric vehicle in a year
    pub total_ev_traffic: f64,
    /// Number of those trips captured by the candidate site
    pub captured_traffic: f64,
    /// Distance driven every year by the captured commuters, there and back, in km
    pub distance: f64,
}

/// Run the workflux pass.
///
/// # Returns
///
/// The statistics of the pass and the commuter demand captured by the candidate site.
pub fn simulate_workflux(
    dataset: &SimulationDataset,
    parameters: &SimulationParameters,
    avg_conso: f64,
) -> (WorkfluxStats, f64) {
    let energy = parameters.general.charge_energy;
    let mut stats = WorkfluxStats::default();

    for flow in dataset.workfluxes.values() {
        stats.total_ev_traffic += WORKING_DAYS_PER_YEAR * flow.traffic;

        let captured = WORKING_DAYS_PER_YEAR * dataset.captured_traffic(flow, energy);
        stats.captured_traffic += captured;
        stats.distance += captured * 2.0 * flow.dist;
    }

    let result = super::away_from_home_energy(parameters, avg_conso, stats.distance);

    (stats, result)
}
