//! Fixtures for tests

use crate::city::City;
use crate::dataset::SimulationDataset;
use crate::input::{CityProperties, Feature, FlowProperties, SimulationSiteRaw, SiteProperties};
use crate::site::ChargingSite;
use crate::traffic::TrafficFlow;
use crate::units::{Minutes, Power};
use indexmap::indexmap;
use rstest::fixture;
use std::fs;
use std::path::Path;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn flow() -> TrafficFlow {
    TrafficFlow {
        id: "flow1".into(),
        name: "Rennes - Cesson".into(),
        traffic: 10.0,
        dist: 5.0,
    }
}

/// A 70 kW site, 10 minutes away from `flow`
#[fixture]
pub fn competitor() -> ChargingSite {
    ChargingSite::new(
        "site1".into(),
        "Fast charger".into(),
        Power(70.0),
        indexmap! {"flow1".into() => Minutes(10.0)},
    )
}

/// A 22 kW site, 5 minutes away from `flow`
#[fixture]
pub fn candidate() -> ChargingSite {
    ChargingSite::new(
        "candidate".into(),
        "Candidate".into(),
        Power(22.0),
        indexmap! {"flow1".into() => Minutes(5.0)},
    )
}

#[fixture]
pub fn city() -> City {
    City {
        id: "35238".into(),
        name: "Rennes".into(),
        nb_elec_cars: 100,
        nb_cars: 200,
        time_to_center: Minutes(4.0),
    }
}

#[fixture]
pub fn city_properties() -> CityProperties {
    CityProperties {
        insee: "35238".into(),
        name: "Rennes".into(),
        nb_elec_cars: 100,
        nb_cars: 200,
        time_to_center: Minutes(4.0),
    }
}

#[fixture]
pub fn flow_properties() -> FlowProperties {
    FlowProperties {
        id: "flow1".into(),
        name: "Rennes - Cesson".into(),
        traffic: 10.0,
        length: 5.0,
    }
}

#[fixture]
pub fn simulation_site() -> SimulationSiteRaw {
    SimulationSiteRaw {
        geojson: Feature {
            properties: SiteProperties {
                id: "candidate".into(),
                name: "Candidate".into(),
                max_power: Some(Power(22.0)),
                deviations: indexmap! {"flow1".into() => Minutes(5.0)},
            },
        },
        cities_duration: indexmap! {"35238".into() => Minutes(3.0)},
        sites_duration: indexmap! {"site1".into() => Minutes(2.0)},
    }
}

/// One city close to the candidate site and one commuter flow served only by the candidate
#[fixture]
pub fn scenario_dataset(city: City, candidate: ChargingSite, flow: TrafficFlow) -> SimulationDataset {
    let mut dataset = SimulationDataset::new();
    dataset.cities_duration = indexmap! {city.id.clone() => Minutes(3.0)};
    dataset.cities = indexmap! {city.id.clone() => city};
    dataset.workfluxes = indexmap! {flow.id.clone() => flow};
    dataset.candidate = Some(candidate);
    dataset
}

/// Write a small but complete simulation directory to `path`
pub fn write_simulation_dir(path: &Path) {
    let files = [
        (
            "cities.geojson",
            r#"{"type": "FeatureCollection", "features": [
  {"type": "Feature", "properties": {"insee": "35238", "name": "Rennes", "nb_elec_cars": 100, "nb_cars": 200, "time_to_center": 4.0}, "geometry": null},
  {"type": "Feature", "properties": {"insee": "35051", "name": "Cesson-Sévigné", "nb_elec_cars": 20, "nb_cars": 80, "time_to_center": 12.0}, "geometry": null}
]}"#,
        ),
        (
            "workfluxes.geojson",
            r#"{"type": "FeatureCollection", "features": [
  {"type": "Feature", "properties": {"id": "35238-35051", "name": "Rennes - Cesson-Sévigné", "traffic": 10, "length": 5.0}, "geometry": null}
]}"#,
        ),
        (
            "tmja.geojson",
            r#"{"type": "FeatureCollection", "features": [
  {"type": "Feature", "properties": {"id": "N0136", "name": "Rocade de Rennes", "traffic": 1000, "length": 10.0}, "geometry": null}
]}"#,
        ),
        (
            "charging_sites.geojson",
            r#"{"type": "FeatureCollection", "features": [
  {"type": "Feature", "properties": {"id": 1, "name": "Supermarket", "max_power": 50, "deviations": {"35238-35051": 8.0, "N0136": 3.0}}, "geometry": null},
  {"type": "Feature", "properties": {"id": "abc", "name": "Car park", "max_power": null, "deviations": {}}, "geometry": null}
]}"#,
        ),
        (
            "simulation_site.json",
            r#"{
  "geojson": {"type": "Feature", "properties": {"id": "", "name": "Candidate", "max_power": 22, "deviations": {"35238-35051": 5.0, "N0136": 2.0}}, "geometry": null},
  "cities_duration": {"35238": 3.0, "35051": 12.0},
  "sites_duration": {"1": 4.0, "abc": 2.0}
}"#,
        ),
    ];

    for (file_name, contents) in files {
        fs::write(path.join(file_name), contents).unwrap();
    }
}
