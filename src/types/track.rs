use chrono::NaiveDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One point of a reconstructed trajectory
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackPoint {
    pub time: NaiveDateTime,
    /// Decimal degrees, south negative
    pub latitude: f64,
    /// Decimal degrees, west negative
    pub longitude: f64,
    /// Course over ground in degrees, as reported by the receiver
    pub track_deg: f64,
    /// Instantaneous speed from the previous point; 0 for the first point
    pub speed_ms: f64,
    /// Position in the ordered trajectory
    pub index: usize,
}

/// A cleaned, time-ordered trajectory for one input file.
///
/// Points are strictly non-decreasing in time and every speed is >= 0.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    /// Identifier of the originating log file
    pub name: String,
    pub points: Vec<TrackPoint>,
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Elapsed time from first to last point, 0 for tracks shorter than two points
    pub fn duration_seconds(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => {
                last.time.signed_duration_since(first.time).num_milliseconds() as f64 / 1000.0
            }
            _ => 0.0,
        }
    }
}

/// Counters for records and points excluded along the pipeline.
///
/// Exclusion is the steady-state path for corrupt receiver output, so these
/// are diagnostics, not errors. One instance accumulates across all stages
/// for a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackStats {
    /// Chunks with an RMC identifier but the wrong field count
    pub discarded_rmc: usize,
    /// Chunks with a GGA identifier but the wrong field count
    pub discarded_gga: usize,
    /// Non-empty chunks of any other sentence type
    pub other_chunks: usize,
    /// Records dropped because their time-of-day field failed to parse
    pub bad_time_records: usize,
    /// RMC records with no GGA match inside the alignment tolerance
    pub unmatched_rmc: usize,
    /// Aligned fixes dropped for an undecodable coordinate or timestamp
    pub invalid_fixes: usize,
    /// Points collapsed as near-duplicates of their predecessor
    pub duplicate_points: usize,
    /// Points dropped for an implausible jump or implied speed
    pub outlier_points: usize,
    /// Points cut by the per-track point cap
    pub capped_points: usize,
}

impl TrackStats {
    /// Total records/points excluded across all stages
    pub fn total_dropped(&self) -> usize {
        self.discarded_rmc
            + self.discarded_gga
            + self.bad_time_records
            + self.unmatched_rmc
            + self.invalid_fixes
            + self.duplicate_points
            + self.outlier_points
            + self.capped_points
    }
}
