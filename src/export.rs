//! Export functionality for reconstructed tracks
//!
//! Contains the KML overlay writer plus the secondary artifacts: the raw
//! record tables as CSV and detected events as JSON lines. All writers take
//! the trajectory exactly as given; geometry is never re-sorted,
//! de-duplicated or otherwise mutated on the way out.

use crate::conversion::format_duration_s;
use crate::error::Result;
#[cfg(feature = "csv")]
use crate::types::{GgaRecord, RmcRecord};
use crate::types::{StopEvent, Track, TurnEvent};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Export options for controlling output artifacts
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub kml: bool,
    pub csv: bool,
    pub event: bool,
    pub output_dir: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            kml: true,
            csv: false,
            event: false,
            output_dir: None,
        }
    }
}

/// Compute an output path next to the input file (or in `output_dir`),
/// replacing the extension with `suffix`.
pub fn export_path(input_path: &Path, options: &ExportOptions, suffix: &str) -> PathBuf {
    let base_name = input_path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let dir = match options.output_dir.as_deref() {
        Some(dir) => Path::new(dir),
        None => input_path.parent().unwrap_or_else(|| Path::new(".")),
    };
    dir.join(format!("{base_name}{suffix}"))
}

/// Export a track and its events to a KML overlay file.
///
/// Writes exactly one artifact; a write failure propagates to the caller,
/// which is the expected terminal failure mode for this stage.
pub fn export_to_kml(
    track: &Track,
    stops: &[StopEvent],
    turns: &[TurnEvent],
    input_path: &Path,
    options: &ExportOptions,
    display_altitude_m: f64,
) -> Result<PathBuf> {
    let kml_path = export_path(input_path, options, ".track.kml");
    let mut file = File::create(&kml_path)?;
    write_kml(&mut file, track, stops, turns, display_altitude_m)?;
    Ok(kml_path)
}

/// Write the KML document to any writer (used directly by tests).
///
/// KML coordinate order is longitude,latitude,altitude — reversed from the
/// latitude-first input convention. The altitude is a fixed display value;
/// real altitude is not tracked by the trajectory.
pub fn write_kml<W: Write>(
    out: &mut W,
    track: &Track,
    stops: &[StopEvent],
    turns: &[TurnEvent],
    display_altitude_m: f64,
) -> Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
    writeln!(out, "<Document>")?;
    writeln!(out, "<name>{}</name>", xml_escape(&track.name))?;

    writeln!(
        out,
        "<Placemark><name>Track</name><LineString><tessellate>1</tessellate><coordinates>"
    )?;
    for point in &track.points {
        writeln!(
            out,
            "{:.6},{:.6},{:.1}",
            point.longitude, point.latitude, display_altitude_m
        )?;
    }
    writeln!(out, "</coordinates></LineString></Placemark>")?;

    for stop in stops {
        writeln!(
            out,
            r#"<Placemark><name>Stop {}</name><TimeStamp><when>{}</when></TimeStamp><Point><coordinates>{:.6},{:.6},{:.1}</coordinates></Point></Placemark>"#,
            format_duration_s(stop.duration_seconds()),
            stop.start_time.format("%Y-%m-%dT%H:%M:%SZ"),
            stop.longitude,
            stop.latitude,
            display_altitude_m
        )?;
    }
    for turn in turns {
        writeln!(
            out,
            r#"<Placemark><name>Left turn</name><TimeStamp><when>{}</when></TimeStamp><Point><coordinates>{:.6},{:.6},{:.1}</coordinates></Point></Placemark>"#,
            turn.start_time.format("%Y-%m-%dT%H:%M:%SZ"),
            turn.longitude,
            turn.latitude,
            display_altitude_m
        )?;
    }

    writeln!(out, "</Document>")?;
    writeln!(out, "</kml>")?;
    Ok(())
}

/// Export detected events as JSON lines, one object per event.
pub fn export_to_event(
    stops: &[StopEvent],
    turns: &[TurnEvent],
    input_path: &Path,
    options: &ExportOptions,
) -> Result<PathBuf> {
    let event_path = export_path(input_path, options, ".events");
    let mut file = File::create(&event_path)?;

    for stop in stops {
        writeln!(
            file,
            r#"{{"name":"stop", "time":"{}", "duration_s":{:.1}, "lat":{:.6}, "lon":{:.6}, "points":{}}}"#,
            stop.start_time.format("%Y-%m-%dT%H:%M:%SZ"),
            stop.duration_seconds(),
            stop.latitude,
            stop.longitude,
            stop.point_count
        )?;
    }
    for turn in turns {
        writeln!(
            file,
            r#"{{"name":"left_turn", "time":"{}", "duration_s":{:.1}, "lat":{:.6}, "lon":{:.6}, "points":{}}}"#,
            turn.start_time.format("%Y-%m-%dT%H:%M:%SZ"),
            turn.duration_seconds(),
            turn.latitude,
            turn.longitude,
            turn.point_count
        )?;
    }
    Ok(event_path)
}

/// Export the raw classified record tables to CSV, one file per sentence type.
#[cfg(feature = "csv")]
pub fn export_records_csv(
    rmc_records: &[RmcRecord],
    gga_records: &[GgaRecord],
    input_path: &Path,
    options: &ExportOptions,
) -> Result<(PathBuf, PathBuf)> {
    let rmc_path = export_path(input_path, options, ".rmc.csv");
    let mut writer = csv::Writer::from_path(&rmc_path)?;
    writer.write_record([
        "time",
        "status",
        "lat",
        "lat_hemisphere",
        "lon",
        "lon_hemisphere",
        "speed_knots",
        "track_deg",
        "date",
        "source_file",
    ])?;
    for record in rmc_records {
        writer.write_record([
            &record.time_raw,
            &record.status,
            &record.lat_raw,
            &record.lat_hemisphere,
            &record.lon_raw,
            &record.lon_hemisphere,
            &record.speed_knots_raw,
            &record.track_raw,
            &record.date_raw,
            &record.source_file,
        ])?;
    }
    writer.flush()?;

    let gga_path = export_path(input_path, options, ".gga.csv");
    let mut writer = csv::Writer::from_path(&gga_path)?;
    writer.write_record([
        "time",
        "lat",
        "lat_hemisphere",
        "lon",
        "lon_hemisphere",
        "fix_quality",
        "satellites",
        "hdop",
        "altitude",
        "source_file",
    ])?;
    for record in gga_records {
        writer.write_record([
            &record.time_raw,
            &record.lat_raw,
            &record.lat_hemisphere,
            &record.lon_raw,
            &record.lon_hemisphere,
            &record.fix_quality_raw,
            &record.satellites_raw,
            &record.hdop_raw,
            &record.altitude_raw,
            &record.source_file,
        ])?;
    }
    writer.flush()?;

    Ok((rmc_path, gga_path))
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
