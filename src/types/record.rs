//! Typed sentence records and the aligned fix they merge into
//!
//! Raw field values stay as strings here. Decoding to numbers happens later
//! so a single malformed field drops one point instead of one record class,
//! and so the raw tables can be dumped to CSV unmodified.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One `$GPRMC` sentence: time of fix, position, speed and course over ground.
///
/// RMC sentences are the backbone of a track because they carry the date and
/// course fields the fix sentences lack.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RmcRecord {
    /// Raw HHMMSS[.sss] time of fix
    pub time_raw: String,
    /// Receiver status flag (A = active, V = void)
    pub status: String,
    pub lat_raw: String,
    pub lat_hemisphere: String,
    pub lon_raw: String,
    pub lon_hemisphere: String,
    /// Speed over ground in knots, as reported
    pub speed_knots_raw: String,
    /// Course over ground in degrees true, as reported
    pub track_raw: String,
    /// Raw DDMMYY date of fix
    pub date_raw: String,
    /// Name of the log file this record came from
    pub source_file: String,
}

/// One `$GPGGA` sentence: position, fix quality and altitude.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GgaRecord {
    /// Raw HHMMSS[.sss] time of fix
    pub time_raw: String,
    pub lat_raw: String,
    pub lat_hemisphere: String,
    pub lon_raw: String,
    pub lon_hemisphere: String,
    pub fix_quality_raw: String,
    pub satellites_raw: String,
    pub hdop_raw: String,
    pub altitude_raw: String,
    /// Name of the log file this record came from
    pub source_file: String,
}

/// An RMC record paired with its nearest-in-time GGA record.
///
/// The RMC side supplies position, course and date; the GGA side contributes
/// optional enrichment. Enrichment fields that fail to parse are `None`,
/// never a reason to drop the fix.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignedFix {
    /// RMC time of fix as seconds since midnight
    pub seconds_of_day: f64,
    pub lat_raw: String,
    pub lat_hemisphere: String,
    pub lon_raw: String,
    pub lon_hemisphere: String,
    pub track_raw: String,
    pub date_raw: String,
    /// Time-of-day of the matched GGA record
    pub gga_seconds_of_day: f64,
    pub fix_quality: Option<u8>,
    pub satellites: Option<u32>,
    pub hdop: Option<f64>,
    pub altitude_m: Option<f64>,
}

impl AlignedFix {
    /// Absolute gap between the two paired sentence timestamps, in seconds
    pub fn alignment_gap_s(&self) -> f64 {
        (self.seconds_of_day - self.gga_seconds_of_day).abs()
    }
}
