use chrono::NaiveDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A sustained stationary interval inside a trajectory.
///
/// Duration is bounded on both sides by configuration: too short is signal
/// noise, too long is park-and-leave rather than an in-transit stop.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StopEvent {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Location of the first point of the stationary run
    pub latitude: f64,
    pub longitude: f64,
    /// Number of trajectory points in the run
    pub point_count: usize,
}

impl StopEvent {
    pub fn duration_seconds(&self) -> f64 {
        self.end_time
            .signed_duration_since(self.start_time)
            .num_milliseconds() as f64
            / 1000.0
    }
}

/// A sustained left-turn maneuver detected from windowed heading curvature.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurnEvent {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Location of the first point of the turn run
    pub latitude: f64,
    pub longitude: f64,
    /// Number of trajectory points in the run
    pub point_count: usize,
}

impl TurnEvent {
    pub fn duration_seconds(&self) -> f64 {
        self.end_time
            .signed_duration_since(self.start_time)
            .num_milliseconds() as f64
            / 1000.0
    }
}
