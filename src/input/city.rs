//! Code for reading city records from GeoJSON features.
use super::check_non_negative;
use crate::city::{City, CityID};
use crate::units::Minutes;
use anyhow::{Result, ensure};
use serde::Deserialize;

/// The properties of a city feature
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CityProperties {
    /// INSEE code of the city
    pub insee: CityID,
    /// Name of the city
    pub name: String,
    /// Number of electric cars registered in the city
    pub nb_elec_cars: u32,
    /// Total number of cars registered in the city
    pub nb_cars: u32,
    /// Driving time from the city hall to the centre of the simulation area
    pub time_to_center: Minutes,
}

impl TryFrom<CityProperties> for City {
    type Error = anyhow::Error;

    fn try_from(raw: CityProperties) -> Result<Self> {
        ensure!(!raw.insee.0.is_empty(), "City \"{}\" has an empty INSEE code", raw.name);
        ensure!(
            raw.nb_elec_cars <= raw.nb_cars,
            "City {} has more electric cars ({}) than cars ({})",
            raw.insee,
            raw.nb_elec_cars,
            raw.nb_cars
        );
        check_non_negative(raw.time_to_center.value(), "time_to_center", &raw.insee)?;

        Ok(City {
            id: raw.insee,
            name: raw.name,
            nb_elec_cars: raw.nb_elec_cars,
            nb_cars: raw.nb_cars,
            time_to_center: raw.time_to_center,
        })
    }
}
