//! Integration tests for the exported artifacts

use nmea_track::{
    align_streams, annotate_speeds, build_track, detect_left_turns, detect_stops,
    export_to_event, export_to_kml, parse_nmea_bytes, ExportOptions, Track, TrackConfig,
    TrackStats,
};
use std::fs;
use std::path::Path;

fn sample_content() -> String {
    let mut content = String::new();
    for i in 0..20u32 {
        let time = format!("1235{i:02}");
        let lat = format!("48{:06.3}", 7.0 + f64::from(i) * 0.011);
        content.push_str(&format!(
            "$GPRMC,{time},A,{lat},N,01131.000,E,022.4,084.4,230394,003.1,W,A*6A\r\n"
        ));
        content.push_str(&format!(
            "$GPGGA,{time},{lat},N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n"
        ));
    }
    content
}

fn pipeline(content: &str, config: &TrackConfig) -> Track {
    let mut stats = TrackStats::default();
    let (rmc, gga) = parse_nmea_bytes(content.as_bytes(), "drive.txt", &mut stats, false);
    let fixes = align_streams(rmc, gga, config.align_tolerance_s, &mut stats);
    let mut track = build_track("drive.txt", fixes, config, &mut stats);
    annotate_speeds(&mut track);
    track
}

#[test]
fn test_kml_written_next_to_input_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = TrackConfig::default();
    let track = pipeline(&sample_content(), &config);
    let stops = detect_stops(&track, &config);
    let turns = detect_left_turns(&track, &config);

    let options = ExportOptions {
        output_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..ExportOptions::default()
    };
    let input = Path::new("drive.txt");
    let written = export_to_kml(&track, &stops, &turns, input, &options, 1.0).expect("export");

    assert_eq!(written, dir.path().join("drive.track.kml"));
    let kml = fs::read_to_string(&written).expect("read kml");
    assert!(kml.starts_with("<?xml"));
    assert!(kml.contains("<LineString>"));
    // KML wants longitude first
    assert!(kml.contains("11.516700,48.116"));
}

#[test]
fn test_kml_output_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = TrackConfig::default();
    let content = sample_content();
    let options = ExportOptions {
        output_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..ExportOptions::default()
    };

    let mut outputs = Vec::new();
    for name in ["first.txt", "second.txt"] {
        let track = pipeline(&content, &config);
        let stops = detect_stops(&track, &config);
        let turns = detect_left_turns(&track, &config);
        let written =
            export_to_kml(&track, &stops, &turns, Path::new(name), &options, 1.0).expect("export");
        outputs.push(fs::read(&written).expect("read kml"));
    }

    // same input bytes, same overlay bytes apart from the embedded name
    let normalize = |bytes: &[u8]| {
        String::from_utf8(bytes.to_vec())
            .unwrap()
            .replace("first.txt", "X")
            .replace("second.txt", "X")
    };
    assert_eq!(normalize(&outputs[0]), normalize(&outputs[1]));
}

#[test]
fn test_empty_track_exports_empty_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let track = Track::new("empty.txt");
    let options = ExportOptions {
        output_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..ExportOptions::default()
    };
    let written =
        export_to_kml(&track, &[], &[], Path::new("empty.txt"), &options, 1.0).expect("export");
    let kml = fs::read_to_string(&written).expect("read kml");
    assert!(kml.contains("<coordinates>"));
    assert!(kml.contains("</kml>"));
}

#[test]
fn test_event_file_lines_are_json_objects() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = TrackConfig::default();

    // stationary log long enough to produce one stop
    let mut content = String::new();
    for i in 0..10u32 {
        let time = format!("1235{i:02}");
        content.push_str(&format!(
            "$GPRMC,{time},A,4807.038,N,01131.000,E,000.0,084.4,230394,003.1,W,A*6A\r\n"
        ));
        content.push_str(&format!(
            "$GPGGA,{time},4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n"
        ));
    }
    let track = pipeline(&content, &config);
    let stops = detect_stops(&track, &config);
    assert_eq!(stops.len(), 1);
    let turns = detect_left_turns(&track, &config);

    let options = ExportOptions {
        output_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..ExportOptions::default()
    };
    let written =
        export_to_event(&stops, &turns, Path::new("drive.txt"), &options).expect("export");
    assert_eq!(written, dir.path().join("drive.events"));

    let body = fs::read_to_string(&written).expect("read events");
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(r#"{"name":"stop""#));
    assert!(lines[0].contains(r#""duration_s":9.0"#));
}

#[cfg(feature = "csv")]
#[test]
fn test_record_tables_dumped_to_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut stats = TrackStats::default();
    let content = sample_content();
    let (rmc, gga) = parse_nmea_bytes(content.as_bytes(), "drive.txt", &mut stats, false);

    let options = ExportOptions {
        output_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..ExportOptions::default()
    };
    let (rmc_path, gga_path) =
        nmea_track::export_records_csv(&rmc, &gga, Path::new("drive.txt"), &options)
            .expect("export");

    let rmc_csv = fs::read_to_string(&rmc_path).expect("read rmc csv");
    let gga_csv = fs::read_to_string(&gga_path).expect("read gga csv");
    // one header row plus one row per parsed record
    assert_eq!(rmc_csv.lines().count(), rmc.len() + 1);
    assert_eq!(gga_csv.lines().count(), gga.len() + 1);
    assert!(rmc_csv.lines().next().unwrap().starts_with("time,status,lat"));
    assert!(rmc_csv.contains("4807.000"));
}
