//! Code for reading traffic flow records (workfluxes and TMJA) from GeoJSON features.
use super::check_non_negative;
use crate::traffic::{FlowID, TrafficFlow};
use anyhow::{Result, ensure};
use serde::Deserialize;

/// The properties of a traffic flow feature
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FlowProperties {
    /// Identifier of the flow
    pub id: FlowID,
    /// Name of the flow
    pub name: String,
    /// Traffic volume carried by the flow
    pub traffic: f64,
    /// Length of the itinerary in km
    pub length: f64,
}

impl TryFrom<FlowProperties> for TrafficFlow {
    type Error = anyhow::Error;

    fn try_from(raw: FlowProperties) -> Result<Self> {
        ensure!(!raw.id.0.is_empty(), "Flow \"{}\" has an empty ID", raw.name);
        check_non_negative(raw.traffic, "traffic", &raw.id)?;
        check_non_negative(raw.length, "length", &raw.id)?;

        Ok(TrafficFlow {
            id: raw.id,
            name: raw.name,
            traffic: raw.traffic,
            dist: raw.length,
        })
    }
}
