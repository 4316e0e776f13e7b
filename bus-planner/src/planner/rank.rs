//! Itinerary ordering for search results.

use crate::domain::{Itinerary, Leg};

/// Rank itineraries by preference.
///
/// Itineraries are ranked by:
/// 1. Duration (shorter is better)
/// 2. Route number of the final leg (lower is better)
///
/// The sort is stable: itineraries equal on both keys keep their input
/// order.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by_key(|it| (it.duration_mins(), it.last_route()));
    itineraries
}

/// Order itineraries of one shape by their departure times, leg by leg.
pub fn sort_by_departures(itineraries: &mut [Itinerary]) {
    itineraries.sort_by(|a, b| {
        let key = |it: &Itinerary| {
            it.legs()
                .iter()
                .map(|leg: &Leg| (leg.leaves(), leg.route_num()))
                .collect::<Vec<_>>()
        };
        key(a).cmp(&key(b))
    });
}
