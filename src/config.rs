//! Tunable thresholds for trajectory cleanup and event detection
//!
//! All detection heuristics operate on noisy receiver output, so every
//! threshold is carried in a config value passed through the pipeline rather
//! than a process-wide constant. Callers can retune per receiver: a cheap
//! automotive puck needs looser bounds than a survey-grade unit.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for one processing run.
///
/// `Default` values are calibrated for ~1 Hz automotive logs. Tracks with
/// different noise profiles can be processed concurrently with different
/// configs since the pipeline never mutates shared state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackConfig {
    /// Maximum time-of-day gap when pairing RMC and GGA streams (seconds)
    pub align_tolerance_s: f64,
    /// Speed at or below which a point counts as stationary (m/s)
    pub stop_speed_ms: f64,
    /// Shortest slow interval reported as a stop (seconds)
    pub stop_min_duration_s: f64,
    /// Longest slow interval reported as a stop; anything longer is
    /// park-and-leave, not an in-transit stop (seconds)
    pub stop_max_duration_s: f64,
    /// Speed below which reported heading is not trusted (m/s)
    pub min_moving_speed_ms: f64,
    /// Minimum windowed curvature magnitude for a left-turn candidate (degrees)
    pub turn_min_deg: f64,
    /// Maximum windowed curvature magnitude; sharper readings are treated as
    /// heading glitches (degrees)
    pub turn_max_deg: f64,
    /// Width of the median/sum/dilation windows, in points
    pub turn_window: usize,
    /// Minimum run length for a turn candidate run to become an event
    pub turn_min_points: usize,
    /// A point sharing its timestamp with its predecessor and lying closer
    /// than this collapses into it; catches doubled sentences (meters)
    pub duplicate_distance_m: f64,
    /// A jump longer than this from the previous kept point is an outlier (meters)
    pub max_jump_distance_m: f64,
    /// Implied inter-point speed above this marks an outlier (m/s)
    pub max_speed_ms: f64,
    /// Hard cap on points kept per track
    pub max_track_points: usize,
    /// Fixed altitude written into overlay geometry; real altitude is not
    /// tracked (meters)
    pub display_altitude_m: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            align_tolerance_s: 0.5,
            stop_speed_ms: 0.5,
            stop_min_duration_s: 5.0,
            stop_max_duration_s: 300.0,
            min_moving_speed_ms: 1.0,
            turn_min_deg: 45.0,
            turn_max_deg: 180.0,
            turn_window: 5,
            turn_min_points: 3,
            duplicate_distance_m: 0.3,
            max_jump_distance_m: 2000.0,
            max_speed_ms: 70.0,
            max_track_points: 100_000,
            display_altitude_m: 1.0,
        }
    }
}
