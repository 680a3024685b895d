use anyhow::{Context, Result};
use clap::{Arg, Command};
use glob::glob;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "csv")]
use nmea_track::export_records_csv;
use nmea_track::{
    align_streams, annotate_speeds, build_track, detect_left_turns, detect_stops,
    export_to_event, export_to_kml, parse_nmea_file, ExportOptions, TrackConfig, TrackStats,
};

/// Maximum directory recursion depth to prevent runaway traversal
const MAX_RECURSION_DEPTH: usize = 32;

fn build_command() -> Command {
    Command::new("NMEA Track")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse NMEA GPS log files, detect stops and left turns, and export KML overlays.")
        .arg(
            Arg::new("files")
                .help("Log files or directories to parse. Direct file paths and directories: .txt, .log, .nmea extensions supported (case-insensitive). Supports globbing.")
                .required(false)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and per-stage drop counters")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Also dump the raw classified RMC/GGA record tables to CSV")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("event")
                .long("event")
                .help("Also export detected events to a JSON-lines file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stop-speed")
                .long("stop-speed")
                .help("Speed at or below which a point counts as stationary (m/s)")
                .value_name("M_S")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("stop-min-duration")
                .long("stop-min-duration")
                .help("Shortest slow interval reported as a stop (seconds)")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("stop-max-duration")
                .long("stop-max-duration")
                .help("Longest slow interval reported as a stop (seconds)")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("turn-min-deg")
                .long("turn-min-deg")
                .help("Minimum windowed curvature for a left-turn candidate (degrees)")
                .value_name("DEGREES")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("turn-max-deg")
                .long("turn-max-deg")
                .help("Maximum windowed curvature before a reading counts as a glitch (degrees)")
                .value_name("DEGREES")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("turn-window")
                .long("turn-window")
                .help("Width of the smoothing/dilation windows, in points")
                .value_name("POINTS")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("min-turn-points")
                .long("min-turn-points")
                .help("Minimum sustained run length for a turn event, in points")
                .value_name("POINTS")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("display-altitude")
                .long("display-altitude")
                .help("Fixed altitude written into overlay geometry (meters)")
                .value_name("METERS")
                .value_parser(clap::value_parser!(f64)),
        )
}

fn apply_overrides(matches: &clap::ArgMatches, config: &mut TrackConfig) {
    if let Some(&v) = matches.get_one::<f64>("stop-speed") {
        config.stop_speed_ms = v;
    }
    if let Some(&v) = matches.get_one::<f64>("stop-min-duration") {
        config.stop_min_duration_s = v;
    }
    if let Some(&v) = matches.get_one::<f64>("stop-max-duration") {
        config.stop_max_duration_s = v;
    }
    if let Some(&v) = matches.get_one::<f64>("turn-min-deg") {
        config.turn_min_deg = v;
    }
    if let Some(&v) = matches.get_one::<f64>("turn-max-deg") {
        config.turn_max_deg = v;
    }
    if let Some(&v) = matches.get_one::<usize>("turn-window") {
        config.turn_window = v;
    }
    if let Some(&v) = matches.get_one::<usize>("min-turn-points") {
        config.turn_min_points = v;
    }
    if let Some(&v) = matches.get_one::<f64>("display-altitude") {
        config.display_altitude_m = v;
    }
}

/// Expand input patterns to a list of log files.
/// Glob patterns are expanded first; directories are walked recursively with
/// a visited set guarding against symlink cycles.
fn expand_input_paths(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut visited = HashSet::new();
    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') {
            let entries =
                glob(pattern).with_context(|| format!("Invalid glob pattern '{pattern}'"))?;
            for entry in entries {
                let path =
                    entry.with_context(|| format!("Error expanding glob pattern '{pattern}'"))?;
                collect_path(&path, &mut files, &mut visited, 0);
            }
        } else {
            collect_path(Path::new(pattern), &mut files, &mut visited, 0);
        }
    }
    Ok(files)
}

fn collect_path(
    path: &Path,
    files: &mut Vec<PathBuf>,
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) {
    if depth > MAX_RECURSION_DEPTH {
        eprintln!("Warning: Maximum directory depth exceeded at {:?}", path);
        return;
    }
    let canonical = match path.canonicalize() {
        Ok(canonical) => canonical,
        Err(e) => {
            eprintln!("Warning: Cannot access {:?}: {}", path, e);
            return;
        }
    };
    if !visited.insert(canonical.clone()) {
        return;
    }
    if canonical.is_file() {
        if has_log_extension(&canonical) {
            files.push(canonical);
        } else if depth == 0 {
            // only warn about files the user named directly
            eprintln!(
                "Warning: Skipping file with unsupported extension: {:?}",
                canonical
            );
        }
    } else if canonical.is_dir() {
        let entries = match fs::read_dir(&canonical) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("Warning: Cannot read directory {:?}: {}", canonical, e);
                return;
            }
        };
        let mut children: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
        children.sort();
        for child in children {
            collect_path(&child, files, visited, depth + 1);
        }
    }
}

fn has_log_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "txt" | "log" | "nmea"))
        .unwrap_or(false)
}

struct FileReport {
    points: usize,
    stops: usize,
    turns: usize,
    kml_path: Option<PathBuf>,
}

/// Run the full pipeline for one log file.
/// Data-quality problems only shrink the output; an actual I/O failure is
/// fatal for this file and surfaced to the batch loop.
fn process_file(
    path: &Path,
    config: &TrackConfig,
    options: &ExportOptions,
    debug: bool,
) -> Result<FileReport> {
    let mut stats = TrackStats::default();
    let (rmc_records, gga_records) = parse_nmea_file(path, &mut stats, debug)?;

    #[cfg(feature = "csv")]
    {
        if options.csv {
            let (rmc_path, gga_path) = export_records_csv(&rmc_records, &gga_records, path, options)
                .with_context(|| format!("Failed to write record CSVs for {:?}", path))?;
            println!(
                "Exported record tables to: {} and {}",
                rmc_path.display(),
                gga_path.display()
            );
        }
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();
    let fixes = align_streams(rmc_records, gga_records, config.align_tolerance_s, &mut stats);
    let mut track = build_track(&name, fixes, config, &mut stats);
    annotate_speeds(&mut track);

    let stops = detect_stops(&track, config);
    let turns = detect_left_turns(&track, config);

    let mut kml_path = None;
    if track.is_empty() {
        eprintln!(
            "Warning: {:?} yielded no valid trajectory points, skipping overlay export",
            path
        );
    } else if options.kml {
        let written = export_to_kml(&track, &stops, &turns, path, options, config.display_altitude_m)
            .with_context(|| format!("Failed to write KML overlay for {:?}", path))?;
        kml_path = Some(written);
    }

    if options.event && !(stops.is_empty() && turns.is_empty()) {
        let event_path = export_to_event(&stops, &turns, path, options)
            .with_context(|| format!("Failed to write event file for {:?}", path))?;
        println!("Exported events to: {}", event_path.display());
    }

    if debug {
        println!("Drop counters for {:?}: {:?}", path, stats);
    }

    Ok(FileReport {
        points: track.len(),
        stops: stops.len(),
        turns: turns.len(),
        kml_path,
    })
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");

    let file_patterns: Vec<String> = match matches.get_many::<String>("files") {
        Some(files) => files.cloned().collect(),
        None => {
            build_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let mut config = TrackConfig::default();
    apply_overrides(&matches, &mut config);

    let options = ExportOptions {
        kml: true, // the overlay is the primary artifact for the CLI binary
        csv: matches.get_flag("csv"),
        event: matches.get_flag("event"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
    };

    #[cfg(not(feature = "csv"))]
    {
        if options.csv {
            eprintln!("Warning: built without the csv feature; --csv is ignored");
        }
    }

    if debug {
        println!("Input patterns: {file_patterns:?}");
    }

    let input_files = expand_input_paths(&file_patterns)?;
    if input_files.is_empty() {
        eprintln!("Error: No .txt/.log/.nmea files found in the specified input paths.");
        std::process::exit(1);
    }

    if debug {
        println!("Found {} file(s) to process", input_files.len());
    }

    let mut processed = 0usize;
    let mut failed = 0usize;
    for path in &input_files {
        match process_file(path, &config, &options, debug) {
            Ok(report) => {
                processed += 1;
                let target = report
                    .kml_path
                    .map(|p| format!(" -> {}", p.display()))
                    .unwrap_or_default();
                println!(
                    "{}: {} points, {} stops, {} left turns{}",
                    path.display(),
                    report.points,
                    report.stops,
                    report.turns,
                    target
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("Error processing {}: {:#}", path.display(), e);
            }
        }
    }

    println!("Processed {processed} file(s), {failed} failed");
    if processed == 0 {
        std::process::exit(1);
    }
    Ok(())
}
