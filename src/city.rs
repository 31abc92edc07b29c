//! Cities are the administrative areas whose car fleets drive the local charging demand.
use crate::id::{define_id_getter, define_id_type};
use crate::units::Minutes;
use indexmap::IndexMap;

define_id_type! {CityID}

/// A map of [`City`]s, keyed by INSEE code
pub type CityMap = IndexMap<CityID, City>;

/// A city within the simulation area
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    /// The INSEE code of the city (e.g. "35238")
    pub id: CityID,
    /// The name of the city (e.g. "Rennes")
    pub name: String,
    /// Number of electric cars registered in the city
    pub nb_elec_cars: u32,
    /// Total number of cars registered in the city
    pub nb_cars: u32,
    /// Driving time from the city hall to the centre of the simulation area
    pub time_to_center: Minutes,
}
define_id_getter! {City, CityID}
