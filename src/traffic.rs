//! Traffic flows: commuter flows between cities and national road traffic.
use crate::id::{define_id_getter, define_id_type};
use indexmap::IndexMap;
use std::fmt;

define_id_type! {FlowID}

/// A map of [`TrafficFlow`]s, keyed by flow ID
pub type TrafficFlowMap = IndexMap<FlowID, TrafficFlow>;

/// The kind of traffic a [`TrafficFlow`] represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowCategory {
    /// Home-to-work commuting between two cities of the area (electric vehicles per workday)
    Workflux,
    /// Average daily traffic on a national road (all vehicles per day)
    Tmja,
}

impl fmt::Display for FlowCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workflux => write!(f, "workflux"),
            Self::Tmja => write!(f, "TMJA"),
        }
    }
}

/// A flow of vehicles along an itinerary.
///
/// Commuter flows and national road flows share this shape; the meaning of `traffic` depends on
/// the [`FlowCategory`] of the collection the flow belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficFlow {
    /// A unique identifier for the flow (e.g. "35238-35047" or "N0137")
    pub id: FlowID,
    /// A human-readable name for the flow
    pub name: String,
    /// Traffic volume carried by the flow
    pub traffic: f64,
    /// Length of the itinerary in km
    pub dist: f64,
}
define_id_getter! {TrafficFlow, FlowID}
