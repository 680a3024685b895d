//! Inter-point kinematics along an ordered trajectory

use crate::types::Track;

/// Mean Earth radius in meters, spherical model
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle surface distance between two decimal-degree coordinates.
///
/// Haversine form: numerically stable for the short hops between successive
/// fixes, where the plain spherical law of cosines loses precision.
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let half_dphi = (lat2 - lat1).to_radians() / 2.0;
    let half_dlambda = (lon2 - lon1).to_radians() / 2.0;
    let a = half_dphi.sin().powi(2) + phi1.cos() * phi2.cos() * half_dlambda.sin().powi(2);
    EARTH_RADIUS_M * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Annotate every track point with instantaneous speed from its predecessor.
///
/// The first point has no predecessor and gets speed 0. Duplicate or
/// non-monotonic timestamps yield speed 0 rather than a division fault or a
/// negative value. No outlier rejection happens here; the raw signal is
/// preserved for the event detectors to smooth over a window.
pub fn annotate_speeds(track: &mut Track) {
    if let Some(first) = track.points.first_mut() {
        first.speed_ms = 0.0;
    }
    for i in 1..track.points.len() {
        let (head, tail) = track.points.split_at_mut(i);
        let prev = &head[i - 1];
        let current = &mut tail[0];
        let distance = haversine_distance_m(
            prev.latitude,
            prev.longitude,
            current.latitude,
            current.longitude,
        );
        let elapsed = current.time.signed_duration_since(prev.time).num_milliseconds() as f64
            / 1000.0;
        current.speed_ms = if elapsed > 0.0 { distance / elapsed } else { 0.0 };
    }
}
