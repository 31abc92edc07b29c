//! Allocation of a traffic flow between the candidate site and competing sites.
//!
//! Traffic is shared out market-share style: each site able to serve the flow receives a share
//! proportional to its attractiveness score.
use crate::site::ChargingSite;
use crate::traffic::TrafficFlow;
use crate::units::Energy;

/// The part of `flow`'s traffic captured by `candidate` when competing with `competitors`.
///
/// Returns zero if the candidate cannot serve the flow, whatever the competitors look like.
/// Competitors which cannot serve the flow contribute nothing to the total score.
///
/// A site reachable without any delay has an infinite score. In that case the flow is shared
/// equally between all such sites, so the result always lies within `[0, flow.traffic]`.
///
/// # Arguments
///
/// * `candidate` - The site whose captured traffic is computed
/// * `competitors` - The other charging sites of the area
/// * `flow` - The traffic flow to allocate
/// * `energy` - The energy charged by each vehicle
pub fn captured_traffic<'a, I>(
    candidate: &ChargingSite,
    competitors: I,
    flow: &TrafficFlow,
    energy: Energy,
) -> f64
where
    I: IntoIterator<Item = &'a ChargingSite>,
{
    let Some(candidate_score) = candidate.score(flow, energy) else {
        return 0.0;
    };
    if candidate_score.is_nan() || candidate_score <= 0.0 {
        return 0.0;
    }

    let competitor_scores = competitors
        .into_iter()
        .filter_map(|site| site.score(flow, energy));

    if candidate_score.is_infinite() {
        let ties = competitor_scores
            .filter(|score| score.is_infinite())
            .fold(1u32, |count, _| count + 1);
        return flow.traffic / f64::from(ties);
    }

    let total_score = candidate_score + competitor_scores.sum::<f64>();
    flow.traffic * candidate_score / total_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{candidate, competitor, flow};
    use crate::site::{score, visible_power};
    use crate::units::{Minutes, Power};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;
    use std::iter;

    const ENERGY: Energy = Energy(35.0);

    #[rstest]
    fn test_captured_traffic_candidate_alone(candidate: ChargingSite, flow: TrafficFlow) {
        let captured = captured_traffic(&candidate, iter::empty(), &flow, ENERGY);
        assert_approx_eq!(f64, captured, flow.traffic);
    }

    #[rstest]
    fn test_captured_traffic_candidate_disabled(
        mut candidate: ChargingSite,
        competitor: ChargingSite,
        flow: TrafficFlow,
    ) {
        candidate.enabled = false;
        let captured = captured_traffic(&candidate, [&competitor], &flow, ENERGY);
        assert_eq!(captured, 0.0);
    }

    #[rstest]
    fn test_captured_traffic_candidate_out_of_reach(
        mut candidate: ChargingSite,
        competitor: ChargingSite,
        flow: TrafficFlow,
    ) {
        candidate.deviations.clear();
        let captured = captured_traffic(&candidate, [&competitor], &flow, ENERGY);
        assert_eq!(captured, 0.0);
    }

    #[rstest]
    fn test_captured_traffic_shared(
        candidate: ChargingSite,
        competitor: ChargingSite,
        flow: TrafficFlow,
    ) {
        // Candidate: 5 min deviation + 60 * 35 / 22 min charging
        let candidate_delay = Minutes(5.0 + 60.0 * 35.0 / 22.0);
        let candidate_score = score(visible_power(ENERGY, candidate_delay));
        // Competitor: 10 min deviation + 30 min charging
        let competitor_score = score(visible_power(ENERGY, Minutes(40.0)));

        let captured = captured_traffic(&candidate, [&competitor], &flow, ENERGY);
        assert_approx_eq!(
            f64,
            captured,
            flow.traffic * candidate_score / (candidate_score + competitor_score),
            epsilon = 1e-10
        );
        assert!(captured > 0.0 && captured < flow.traffic);
    }

    #[rstest]
    fn test_captured_traffic_ignores_unavailable_competitors(
        candidate: ChargingSite,
        mut competitor: ChargingSite,
        flow: TrafficFlow,
    ) {
        competitor.enabled = false;
        let mut out_of_reach = competitor.clone();
        out_of_reach.enabled = true;
        out_of_reach.deviations.clear();

        let captured = captured_traffic(&candidate, [&competitor, &out_of_reach], &flow, ENERGY);
        assert_approx_eq!(f64, captured, flow.traffic);
    }

    #[rstest]
    fn test_captured_traffic_increases_with_power(
        candidate: ChargingSite,
        competitor: ChargingSite,
        flow: TrafficFlow,
    ) {
        let mut faster = candidate.clone();
        faster.max_power = Power(candidate.max_power.value() * 2.0);

        let before = captured_traffic(&candidate, [&competitor], &flow, ENERGY);
        let after = captured_traffic(&faster, [&competitor], &flow, ENERGY);
        assert!(after > before);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(10.0)]
    #[case(60.0)]
    fn test_captured_traffic_bounded(
        candidate: ChargingSite,
        mut competitor: ChargingSite,
        flow: TrafficFlow,
        #[case] time_bonus: f64,
    ) {
        competitor.time_bonus = Minutes(time_bonus);
        let captured = captured_traffic(&candidate, [&competitor, &competitor], &flow, ENERGY);
        assert!((0.0..=flow.traffic).contains(&captured));
    }

    #[rstest]
    fn test_captured_traffic_zero_delay_candidate(
        mut candidate: ChargingSite,
        mut competitor: ChargingSite,
        flow: TrafficFlow,
    ) {
        // No deviation and a bonus covering the whole charging time
        candidate.deviations.insert(flow.id.clone(), Minutes(0.0));
        candidate.time_bonus = Minutes(1000.0);
        let captured = captured_traffic(&candidate, [&competitor], &flow, ENERGY);
        assert_approx_eq!(f64, captured, flow.traffic);

        // Tied with an equally perfect competitor
        competitor.deviations.insert(flow.id.clone(), Minutes(0.0));
        competitor.time_bonus = Minutes(1000.0);
        let captured = captured_traffic(&candidate, [&competitor], &flow, ENERGY);
        assert_approx_eq!(f64, captured, flow.traffic / 2.0);
    }

    #[rstest]
    fn test_captured_traffic_zero_delay_competitor(
        candidate: ChargingSite,
        mut competitor: ChargingSite,
        flow: TrafficFlow,
    ) {
        competitor.deviations.insert(flow.id.clone(), Minutes(0.0));
        competitor.time_bonus = Minutes(1000.0);
        let captured = captured_traffic(&candidate, [&competitor], &flow, ENERGY);
        assert_eq!(captured, 0.0);
    }
}
