//! Temporal alignment of the RMC and GGA record streams
//!
//! The two sentence types arrive interleaved at irregular rates and neither
//! stream is guaranteed ordered. Each stream is sorted by time-of-day, then a
//! two-pointer nearest-neighbor merge pairs every RMC record with the closest
//! GGA record inside a fixed tolerance window. RMC records without a partner
//! are dropped; ties go to the earliest GGA index so the merge is
//! deterministic and testable.

use crate::conversion::parse_time_of_day;
use crate::types::{AlignedFix, GgaRecord, RmcRecord, TrackStats};

/// Pair each RMC record with its nearest-in-time GGA record.
///
/// Records whose time-of-day field fails to parse are dropped up front and
/// counted. The output is one `AlignedFix` per RMC record that found a GGA
/// partner within `tolerance_s` seconds.
pub fn align_streams(
    rmc_records: Vec<RmcRecord>,
    gga_records: Vec<GgaRecord>,
    tolerance_s: f64,
    stats: &mut TrackStats,
) -> Vec<AlignedFix> {
    let mut timed_rmc: Vec<(f64, RmcRecord)> = Vec::with_capacity(rmc_records.len());
    for record in rmc_records {
        match parse_time_of_day(&record.time_raw) {
            Some(t) => timed_rmc.push((t, record)),
            None => stats.bad_time_records += 1,
        }
    }
    let mut timed_gga: Vec<(f64, GgaRecord)> = Vec::with_capacity(gga_records.len());
    for record in gga_records {
        match parse_time_of_day(&record.time_raw) {
            Some(t) => timed_gga.push((t, record)),
            None => stats.bad_time_records += 1,
        }
    }

    // stable sorts keep equal-time records in arrival order, which is what
    // makes the earliest-index tie-break below reproducible
    timed_rmc.sort_by(|a, b| a.0.total_cmp(&b.0));
    timed_gga.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut fixes = Vec::with_capacity(timed_rmc.len());
    let mut cursor = 0usize;
    for (rmc_time, rmc) in timed_rmc {
        if timed_gga.is_empty() {
            stats.unmatched_rmc += 1;
            continue;
        }
        // advance only while the next candidate is strictly closer; on a tie
        // the earlier index wins
        while cursor + 1 < timed_gga.len()
            && (timed_gga[cursor + 1].0 - rmc_time).abs() < (timed_gga[cursor].0 - rmc_time).abs()
        {
            cursor += 1;
        }
        let (gga_time, gga) = &timed_gga[cursor];
        if (gga_time - rmc_time).abs() <= tolerance_s {
            fixes.push(merge_fix(rmc_time, rmc, *gga_time, gga));
        } else {
            stats.unmatched_rmc += 1;
        }
    }

    fixes
}

fn merge_fix(rmc_time: f64, rmc: RmcRecord, gga_time: f64, gga: &GgaRecord) -> AlignedFix {
    AlignedFix {
        seconds_of_day: rmc_time,
        lat_raw: rmc.lat_raw,
        lat_hemisphere: rmc.lat_hemisphere,
        lon_raw: rmc.lon_raw,
        lon_hemisphere: rmc.lon_hemisphere,
        track_raw: rmc.track_raw,
        date_raw: rmc.date_raw,
        gga_seconds_of_day: gga_time,
        fix_quality: gga.fix_quality_raw.parse().ok(),
        satellites: gga.satellites_raw.parse().ok(),
        hdop: gga.hdop_raw.parse().ok(),
        altitude_m: gga.altitude_raw.parse().ok(),
    }
}
