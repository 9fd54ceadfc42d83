// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle route length over an itinerary's stops.

use geo::{Distance, Haversine, Point};

use crate::models::Stop;

/// Stops that carry usable coordinates, as `geo` points (x = lng, y = lat).
pub fn located_points(stops: &[Stop]) -> Vec<Point<f64>> {
    stops
        .iter()
        .filter_map(Stop::coordinates)
        .map(|(lat, lng)| Point::new(lng, lat))
        .collect()
}

/// Sum of Haversine distances between consecutive located stops, in meters.
///
/// Stops without valid coordinates are skipped rather than breaking the route.
pub fn route_length_meters(stops: &[Stop]) -> f64 {
    located_points(stops)
        .windows(2)
        .map(|pair| Haversine.distance(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fewer_than_two_located_stops_is_zero() {
        assert_eq!(route_length_meters(&[]), 0.0);
        let stops = vec![
            Stop::new("Louvre", "").with_coordinates(48.8606, 2.3376),
            Stop::new("Unknown", ""),
        ];
        assert_eq!(route_length_meters(&stops), 0.0);
    }

    #[test]
    fn test_paris_to_london_is_about_340km() {
        let stops = vec![
            Stop::new("Eiffel Tower, Paris, France", "").with_coordinates(48.8584, 2.2945),
            Stop::new("Big Ben, London, UK", "").with_coordinates(51.5007, -0.1246),
        ];
        let km = route_length_meters(&stops) / 1000.0;
        assert!((330.0..350.0).contains(&km), "unexpected distance {km} km");
    }

    #[test]
    fn test_unlocated_stop_in_the_middle_is_skipped() {
        let paris = Stop::new("Paris", "").with_coordinates(48.8584, 2.2945);
        let london = Stop::new("London", "").with_coordinates(51.5007, -0.1246);
        let direct = route_length_meters(&[paris.clone(), london.clone()]);
        let with_gap = route_length_meters(&[paris, Stop::new("Ferry", ""), london]);
        assert_eq!(direct, with_gap);
    }
}
