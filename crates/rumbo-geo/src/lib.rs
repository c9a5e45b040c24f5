//! Great-circle geometry and straight-line route estimation.
//!
//! Pure functions only; no state, no I/O. Distances use the haversine
//! formula on a spherical Earth. Route estimation is deliberately naive:
//! a straight line between two points split into equal segments, with a
//! duration derived from an assumed average city speed. Real road-graph
//! routing is out of scope.

use rumbo_types::{Position, Route};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Number of segments a route's straight line is split into. The returned
/// point list therefore has one more entry than this.
const ROUTE_SEGMENTS: usize = 10;

/// Assumed average city driving speed, in km/h, for duration estimates.
const AVERAGE_CITY_SPEED_KMH: f64 = 50.0;

/// Great-circle distance between two positions in kilometres (haversine).
pub fn haversine_km(from: Position, to: Position) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial bearing from `from` to `to` in degrees, normalized to [0, 360).
pub fn bearing_degrees(from: Position, to: Position) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();

    let bearing = y.atan2(x).to_degrees();
    if bearing < 0.0 { bearing + 360.0 } else { bearing }
}

/// Geographic midpoint of the great-circle arc between two positions.
pub fn midpoint(from: Position, to: Position) -> Position {
    let lat1 = from.lat.to_radians();
    let lng1 = from.lng.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let bx = lat2.cos() * d_lng.cos();
    let by = lat2.cos() * d_lng.sin();

    let mid_lat = (lat1.sin() + lat2.sin())
        .atan2(((lat1.cos() + bx).powi(2) + by.powi(2)).sqrt());
    let mid_lng = lng1 + by.atan2(lat1.cos() + bx);

    Position::new(mid_lat.to_degrees(), mid_lng.to_degrees())
}

/// Eight-point compass direction for a bearing in degrees.
pub fn cardinal_direction(bearing: f64) -> &'static str {
    const DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let normalized = bearing.rem_euclid(360.0);
    let index = ((normalized + 22.5) / 45.0) as usize % 8;
    DIRECTIONS[index]
}

/// Format a distance in kilometres for display, switching to metres below
/// one kilometre.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{km:.2} km")
    }
}

/// Format a duration in minutes for display, switching to hours at 60.
pub fn format_duration(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins == 0 {
        format!("{hours} h")
    } else {
        format!("{hours} h {mins} min")
    }
}

/// Build a straight-line route estimate between two positions.
///
/// The point list is a linear interpolation in coordinate space (not along
/// the great circle) with [`ROUTE_SEGMENTS`] segments; the distance is the
/// haversine distance; the duration assumes [`AVERAGE_CITY_SPEED_KMH`],
/// truncated to whole minutes.
pub fn plan_route(from: Position, to: Position) -> Route {
    let distance = haversine_km(from, to);
    let duration = (distance / AVERAGE_CITY_SPEED_KMH * 60.0) as u64;

    let mut points = Vec::with_capacity(ROUTE_SEGMENTS + 1);
    for i in 0..=ROUTE_SEGMENTS {
        let ratio = i as f64 / ROUTE_SEGMENTS as f64;
        points.push(Position::new(
            from.lat + (to.lat - from.lat) * ratio,
            from.lng + (to.lng - from.lng) * ratio,
        ));
    }

    Route {
        from,
        to,
        points,
        distance,
        duration,
    }
}
