//! Local demand: street charging by electric car owners living close to the candidate site.
use crate::dataset::SimulationDataset;
use crate::parameters::SimulationParameters;
use log::debug;
use serde::Serialize;

/// Intermediate figures of the local pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocalStats {
    /// Number of cities in the area
    pub nb_cities: u32,
    /// Number of cars in the area
    pub total_cars: f64,
    /// Number of electric cars in the area
    pub total_ev_cars: f64,
    /// Number of electric cars registered in cities within range of the candidate site
    pub in_range_ev_cars: f64,
    /// Number of charging sites within range of the candidate site
    pub in_range_sites: u32,
    /// Distance driven every year by the in-range electric cars, in km
    pub total_distance: f64,
    /// Energy consumed every year by the in-range electric cars
    pub total_energy: f64,
    /// Share of that energy charged at home on the street
    pub street_energy: f64,
}

/// Run the local pass.
///
/// A city is in range if its driving time to the candidate site is known and at most
/// `time_from_home`. The street energy of in-range cities is shared between the candidate site and
/// every charging site within the same driving time.
///
/// # Returns
///
/// The statistics of the pass and the local demand captured by the candidate site.
pub fn simulate_local(
    dataset: &SimulationDataset,
    parameters: &SimulationParameters,
    avg_conso: f64,
) -> (LocalStats, f64) {
    let time_from_home = parameters.local.time_from_home;
    let mut stats = LocalStats::default();

    for city in dataset.cities.values() {
        stats.nb_cities += 1;
        stats.total_cars += f64::from(city.nb_cars);
        stats.total_ev_cars += f64::from(city.nb_elec_cars);

        match dataset.cities_duration.get(&city.id) {
            Some(&duration) if duration <= time_from_home => {
                stats.in_range_ev_cars += f64::from(city.nb_elec_cars);
            }
            Some(_) => {}
            None => debug!("No driving time known for city {}", city.id),
        }
    }

    stats.in_range_sites = dataset
        .sites_duration
        .values()
        .filter(|&&duration| duration <= time_from_home)
        .fold(0, |count, _| count + 1);

    stats.total_distance = stats.in_range_ev_cars * parameters.local.dist_per_year;
    stats.total_energy = stats.total_distance * avg_conso;
    stats.street_energy = stats.total_energy
        * parameters.general.ratio_home_charge
        * parameters.local.ratio_home_street;

    // The candidate site always counts as one of the sites sharing the demand
    let result = stats.street_energy / f64::from(stats.in_range_sites + 1);

    (stats, result)
}
