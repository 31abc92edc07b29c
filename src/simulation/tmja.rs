//! Roaming demand: charging by long-distance electric traffic on national roads.
//!
//! Only the part of national electric traffic which is not already explained by commuting is
//! counted, so this pass depends on the total electric traffic of the workflux pass.
use crate::dataset::SimulationDataset;
use crate::parameters::SimulationParameters;
use log::debug;
use serde::Serialize;

const DAYS_PER_YEAR: f64 = 365.0;

/// Intermediate figures of the TMJA pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TmjaStats {
    /// Number of vehicles driving on national roads in a year
    pub total_traffic: f64,
    /// Number of roaming electric vehicles captured by the candidate site in a year
    pub captured_traffic: f64,
    /// Distance driven every year by the captured vehicles, in km
    pub distance: f64,
    /// Number of electric vehicles driving on national roads in a year
    pub total_ev_traffic: f64,
    /// Electric traffic which is not commuting
    pub roaming_ev_traffic: f64,
}

/// Run the TMJA pass.
///
/// # Arguments
///
/// * `dataset` - The entities of the simulation area
/// * `parameters` - The parameters of the model
/// * `avg_conso` - Average consumption in kWh per 100 km
/// * `workflux_ev_traffic` - Yearly electric commuter traffic from the workflux pass
///
/// # Returns
///
/// The statistics of the pass and the roaming demand captured by the candidate site.
pub fn simulate_tmja(
    dataset: &SimulationDataset,
    parameters: &SimulationParameters,
    avg_conso: f64,
    workflux_ev_traffic: f64,
) -> (TmjaStats, f64) {
    let energy = parameters.general.charge_energy;
    let ratio_ve = parameters.tmja.ratio_ve;
    let mut stats = TmjaStats::default();

    for flow in dataset.tmja.values() {
        stats.total_traffic += flow.traffic;

        let captured = dataset.captured_traffic(flow, energy);
        stats.captured_traffic += captured;
        stats.distance += captured * flow.dist;
    }

    stats.total_traffic *= DAYS_PER_YEAR;
    stats.total_ev_traffic = ratio_ve * stats.total_traffic;
    stats.roaming_ev_traffic = (stats.total_ev_traffic - workflux_ev_traffic).max(0.0);

    if stats.total_ev_traffic > 0.0 {
        let scale =
            DAYS_PER_YEAR * ratio_ve * (stats.roaming_ev_traffic / stats.total_ev_traffic);
        stats.captured_traffic *= scale;
        stats.distance *= scale;
    } else {
        debug!("No electric traffic on national roads");
        stats.captured_traffic = 0.0;
        stats.distance = 0.0;
    }

    let result = super::away_from_home_energy(parameters, avg_conso, stats.distance);

    (stats, result)
}
