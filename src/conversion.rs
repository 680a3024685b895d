//! Field decoding utilities for NMEA sentence data
//!
//! Contains the pure conversions from raw sentence fields to typed values:
//! degrees-minutes coordinates, time-of-day, and the DDMMYY date field.
//! Every function returns `Option` because malformed fields are expected
//! steady-state input, not errors.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Decode a degrees-minutes coordinate field into signed decimal degrees.
///
/// NMEA coordinates are fixed-width: the leading `degree_digits` characters
/// (2 for latitude, 3 for longitude) are whole degrees, the remainder is
/// decimal minutes. `"4807.038"` with hemisphere `"N"` decodes to ~48.1173.
/// Southern and western hemispheres negate the result.
pub fn parse_coordinate(raw: &str, hemisphere: &str, degree_digits: usize) -> Option<f64> {
    let raw = raw.trim();
    if raw.len() <= degree_digits || !raw.is_ascii() {
        return None;
    }
    let (deg_part, min_part) = raw.split_at(degree_digits);
    if !deg_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let degrees: f64 = deg_part.parse().ok()?;
    let minutes: f64 = min_part.parse().ok()?;
    if !(0.0..60.0).contains(&minutes) {
        return None;
    }
    let decimal = degrees + minutes / 60.0;
    match hemisphere.trim() {
        "N" | "E" => Some(decimal),
        "S" | "W" => Some(-decimal),
        _ => None,
    }
}

/// Parse an HHMMSS[.sss] time-of-day field into seconds since midnight.
pub fn parse_time_of_day(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.len() < 6 || !raw.as_bytes()[..6].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let hours: u32 = raw[0..2].parse().ok()?;
    let minutes: u32 = raw[2..4].parse().ok()?;
    let seconds: u32 = raw[4..6].parse().ok()?;
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    let fraction = match &raw[6..] {
        "" => 0.0,
        frac if frac.starts_with('.') => frac
            .parse::<f64>()
            .ok()
            .filter(|f| (0.0..1.0).contains(f))?,
        _ => return None,
    };
    Some(f64::from(hours * 3600 + minutes * 60 + seconds) + fraction)
}

/// Parse a DDMMYY date field. The two-digit year is anchored at 2000.
pub fn parse_date_ddmmyy(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day: u32 = raw[0..2].parse().ok()?;
    let month: u32 = raw[2..4].parse().ok()?;
    let year: i32 = raw[4..6].parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

/// Combine a calendar date with a seconds-since-midnight value into an
/// absolute timestamp, keeping sub-second precision.
pub fn fuse_timestamp(date: NaiveDate, seconds_of_day: f64) -> Option<NaiveDateTime> {
    if !(0.0..86_400.0).contains(&seconds_of_day) {
        return None;
    }
    let whole = seconds_of_day as u32;
    let nanos = ((seconds_of_day - whole as f64) * 1e9) as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(whole, nanos.min(999_999_999))?;
    Some(date.and_time(time))
}

/// Format a duration in seconds for marker labels (one decimal place)
pub fn format_duration_s(seconds: f64) -> String {
    format!("{:.1} s", seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_north_east() {
        let lat = parse_coordinate("4807.038", "N", 2).unwrap();
        assert!((lat - (48.0 + 7.038 / 60.0)).abs() < 1e-9);

        let lon = parse_coordinate("01131.000", "E", 3).unwrap();
        assert!((lon - (11.0 + 31.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_parse_coordinate_south_west_negative() {
        let lat = parse_coordinate("3351.490", "S", 2).unwrap();
        assert!(lat < 0.0);
        assert!((lat + (33.0 + 51.49 / 60.0)).abs() < 1e-9);

        let lon = parse_coordinate("15112.660", "W", 3).unwrap();
        assert!(lon < 0.0);
    }

    #[test]
    fn test_parse_coordinate_rejects_malformed() {
        assert_eq!(parse_coordinate("", "N", 2), None);
        assert_eq!(parse_coordinate("48", "N", 2), None);
        assert_eq!(parse_coordinate("4a07.038", "N", 2), None);
        assert_eq!(parse_coordinate("4807.038", "Q", 2), None);
        assert_eq!(parse_coordinate("4807.038", "", 2), None);
        // minutes must stay below 60
        assert_eq!(parse_coordinate("4869.000", "N", 2), None);
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("123519"), Some(45319.0));
        let t = parse_time_of_day("123519.50").unwrap();
        assert!((t - 45319.5).abs() < 1e-9);
        assert_eq!(parse_time_of_day("253519"), None);
        assert_eq!(parse_time_of_day("1235"), None);
        assert_eq!(parse_time_of_day("123x19"), None);
        assert_eq!(parse_time_of_day(""), None);
    }

    #[test]
    fn test_parse_date_ddmmyy() {
        let d = parse_date_ddmmyy("230394").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2094, 3, 23).unwrap());
        assert_eq!(parse_date_ddmmyy("320194"), None);
        assert_eq!(parse_date_ddmmyy("2301"), None);
        assert_eq!(parse_date_ddmmyy("23a194"), None);
    }

    #[test]
    fn test_fuse_timestamp() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let ts = fuse_timestamp(date, 45319.5).unwrap();
        assert_eq!(ts.date(), date);
        assert_eq!(ts.time().format("%H:%M:%S%.1f").to_string(), "12:35:19.5");
        assert_eq!(fuse_timestamp(date, -1.0), None);
        assert_eq!(fuse_timestamp(date, 86_400.0), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_s(10.0), "10.0 s");
        assert_eq!(format_duration_s(7.25), "7.2 s");
    }
}
