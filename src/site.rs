//! Charging sites and the attractiveness model used to compare them.
//!
//! A site's attractiveness for a given traffic flow is derived from its *charge delay*: the time a
//! driver on that flow loses by deviating to the site and charging there. The delay is turned into
//! a *visible power* (the energy charged divided by the time lost) and the score of the site is
//! the square of its visible power. Squaring favours low-delay sites superlinearly.
use crate::id::{define_id_getter, define_id_type};
use crate::traffic::{FlowID, TrafficFlow};
use crate::units::{Energy, Hours, Minutes, Power};
use indexmap::IndexMap;

define_id_type! {SiteID}

/// A map of [`ChargingSite`]s, keyed by site ID
pub type SiteMap = IndexMap<SiteID, ChargingSite>;

/// Deviation times from each flow a site can serve, keyed by flow ID
pub type DeviationMap = IndexMap<FlowID, Minutes>;

/// A charging site with one or more charging points
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingSite {
    /// A unique identifier for the site
    pub id: SiteID,
    /// The name of the site
    pub name: String,
    /// The maximum power delivered by the fastest charging point of the site
    pub max_power: Power,
    /// Time lost by a driver on a flow to reach the site and come back to the itinerary.
    ///
    /// Only flows the site can realistically serve have an entry.
    pub deviations: DeviationMap,
    /// Whether the site takes part in the simulation
    pub enabled: bool,
    /// Time deducted from the charging time to reflect how attractive the site is
    pub time_bonus: Minutes,
}
define_id_getter! {ChargingSite, SiteID}

/// Whether a site can serve a given traffic flow
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Availability {
    /// The site is enabled and reachable from the flow with the given deviation time
    Served {
        /// Time lost to reach the site from the flow
        deviation: Minutes,
    },
    /// The site is disabled or out of reach of the flow
    NotServed,
}

impl ChargingSite {
    /// Create a new enabled site with no time bonus
    pub fn new(id: SiteID, name: String, max_power: Power, deviations: DeviationMap) -> Self {
        Self {
            id,
            name,
            max_power,
            deviations,
            enabled: true,
            time_bonus: Minutes(0.0),
        }
    }

    /// Whether and how the site can serve `flow`
    pub fn availability(&self, flow: &TrafficFlow) -> Availability {
        if !self.enabled {
            return Availability::NotServed;
        }

        match self.deviations.get(&flow.id) {
            Some(&deviation) => Availability::Served { deviation },
            None => Availability::NotServed,
        }
    }

    /// Whether a charge delay can be computed for this site and `flow`
    pub fn charge_delay_available(&self, flow: &TrafficFlow) -> bool {
        matches!(self.availability(flow), Availability::Served { .. })
    }

    /// Time spent charging `energy` at the site, after the time bonus is applied.
    ///
    /// Never negative.
    pub fn charging_time(&self, energy: Energy) -> Minutes {
        (Minutes::from(energy / self.max_power) - self.time_bonus).max(Minutes(0.0))
    }

    /// The total time lost by a driver on `flow` to charge `energy` at this site.
    ///
    /// # Panics
    ///
    /// Panics if the site cannot serve `flow`. Callers must check [`Self::availability`] or
    /// [`Self::charge_delay_available`] first.
    pub fn charge_delay(&self, flow: &TrafficFlow, energy: Energy) -> Minutes {
        let Availability::Served { deviation } = self.availability(flow) else {
            panic!(
                "Charge delay requested for site {} which cannot serve flow {}",
                self.id, flow.id
            );
        };

        deviation + self.charging_time(energy)
    }

    /// The attractiveness score of the site for `flow`, or `None` if the site cannot serve it
    pub fn score(&self, flow: &TrafficFlow, energy: Energy) -> Option<f64> {
        match self.availability(flow) {
            Availability::Served { deviation } => {
                let delay = deviation + self.charging_time(energy);
                Some(score(visible_power(energy, delay)))
            }
            Availability::NotServed => None,
        }
    }
}

/// The effective charging power perceived by a driver who loses `delay` to charge `energy`
pub fn visible_power(energy: Energy, delay: Minutes) -> Power {
    energy / Hours::from(delay)
}

/// The attractiveness score corresponding to a visible power
pub fn score(visible_power: Power) -> f64 {
    visible_power.value().powi(2)
}
