//! Trajectory assembly from aligned fixes
//!
//! Decodes each aligned fix into a timestamped decimal-degree point, drops
//! anything undecodable, restores temporal order, and applies the cleanup
//! passes (duplicate collapse, outlier rejection, point cap) before the
//! kinematics stage sees the sequence. Invalid fixes are excluded entirely;
//! they never become zero/default coordinates that would corrupt downstream
//! distance math.

use chrono::NaiveDateTime;

use crate::config::TrackConfig;
use crate::conversion::{fuse_timestamp, parse_coordinate, parse_date_ddmmyy};
use crate::kinematics::haversine_distance_m;
use crate::types::{AlignedFix, Track, TrackPoint, TrackStats};

/// Build a cleaned, time-ordered track from aligned fixes.
///
/// Output invariants: timestamps are non-decreasing, consecutive points are
/// at least `duplicate_distance_m` apart, no jump exceeds
/// `max_jump_distance_m` or implies more than `max_speed_ms`, and the track
/// holds at most `max_track_points` points. Speeds are left at 0 for the
/// kinematics stage to fill in.
pub fn build_track(
    name: &str,
    fixes: Vec<AlignedFix>,
    config: &TrackConfig,
    stats: &mut TrackStats,
) -> Track {
    let mut normalized: Vec<(NaiveDateTime, f64, f64, f64)> = Vec::with_capacity(fixes.len());
    for fix in &fixes {
        match normalize_fix(fix) {
            Some(tuple) => normalized.push(tuple),
            None => stats.invalid_fixes += 1,
        }
    }

    // parse/filter order does not guarantee temporal order; stable sort keeps
    // duplicate timestamps in arrival order
    normalized.sort_by(|a, b| a.0.cmp(&b.0));

    let mut points: Vec<TrackPoint> = Vec::with_capacity(normalized.len());
    for (time, latitude, longitude, track_deg) in normalized {
        if points.len() >= config.max_track_points {
            stats.capped_points += 1;
            continue;
        }
        if let Some(prev) = points.last() {
            let distance = haversine_distance_m(prev.latitude, prev.longitude, latitude, longitude);
            let elapsed = time.signed_duration_since(prev.time).num_milliseconds() as f64 / 1000.0;
            // receivers double sentences mid-stream; a re-reported fix shares
            // its timestamp with the previous point. A stationary receiver
            // with advancing time is not a duplicate.
            if elapsed <= 0.0 && distance < config.duplicate_distance_m {
                stats.duplicate_points += 1;
                continue;
            }
            let implied_speed = if elapsed > 0.0 { distance / elapsed } else { 0.0 };
            if distance > config.max_jump_distance_m || implied_speed > config.max_speed_ms {
                stats.outlier_points += 1;
                continue;
            }
        }
        points.push(TrackPoint {
            time,
            latitude,
            longitude,
            track_deg,
            speed_ms: 0.0,
            index: points.len(),
        });
    }

    Track {
        name: name.to_string(),
        points,
    }
}

/// Decode one fix into (timestamp, latitude, longitude, course).
///
/// A missing course field is common while the receiver is stationary and
/// defaults to 0; heading consumers gate on speed before trusting it.
fn normalize_fix(fix: &AlignedFix) -> Option<(NaiveDateTime, f64, f64, f64)> {
    let latitude = parse_coordinate(&fix.lat_raw, &fix.lat_hemisphere, 2)?;
    let longitude = parse_coordinate(&fix.lon_raw, &fix.lon_hemisphere, 3)?;
    if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
        return None;
    }
    let date = parse_date_ddmmyy(&fix.date_raw)?;
    let time = fuse_timestamp(date, fix.seconds_of_day)?;
    let track_deg = fix.track_raw.parse().unwrap_or(0.0);
    Some((time, latitude, longitude, track_deg))
}
