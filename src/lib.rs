//! NMEA Track Library
//!
//! A Rust library for parsing NMEA-0183 GPS log files, reconstructing
//! cleaned, time-ordered trajectories, detecting stop and left-turn events,
//! and exporting KML overlays.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export of the raw record tables
//! - **`cli`** (default): Build the command-line interface binary
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Run the full pipeline for one log file:
//! ```rust,no_run
//! use nmea_track::{
//!     align_streams, annotate_speeds, build_track, detect_left_turns, detect_stops,
//!     parse_nmea_file, TrackConfig, TrackStats,
//! };
//! use std::path::Path;
//!
//! let config = TrackConfig::default();
//! let mut stats = TrackStats::default();
//! let (rmc, gga) = parse_nmea_file(Path::new("drive.txt"), &mut stats, false).unwrap();
//! let fixes = align_streams(rmc, gga, config.align_tolerance_s, &mut stats);
//! let mut track = build_track("drive.txt", fixes, &config, &mut stats);
//! annotate_speeds(&mut track);
//! let stops = detect_stops(&track, &config);
//! let turns = detect_left_turns(&track, &config);
//! println!(
//!     "{} points, {} stops, {} left turns ({} records dropped)",
//!     track.len(),
//!     stops.len(),
//!     turns.len(),
//!     stats.total_dropped()
//! );
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_nmea_file`] - Parse a log file into RMC and GGA record streams
//! - [`parse_nmea_bytes`] - Parse log data from memory
//! - [`align_streams`] - Pair the two record streams into aligned fixes
//!
//! ## Pipeline Functions
//! - [`build_track`] - Normalize aligned fixes into a cleaned trajectory
//! - [`annotate_speeds`] - Compute per-point instantaneous speed
//! - [`detect_stops`] - Detect sustained stationary intervals
//! - [`detect_left_turns`] - Detect sustained left-turn maneuvers
//!
//! ## Data Types
//! - [`TrackConfig`] - Tunable thresholds for cleanup and detection
//! - [`Track`] / [`TrackPoint`] - The reconstructed trajectory
//! - [`StopEvent`] / [`TurnEvent`] - Detected events
//! - [`TrackStats`] - Per-file exclusion counters for observability
//!
//! ## Export Functions
//! - [`export_to_kml`] - Write the trajectory and events as a KML overlay
//! - [`export_to_event`] - Write detected events as JSON lines
//! - [`export_records_csv`] - Dump the raw record tables to CSV (`csv` feature)

// Module declarations
pub mod config;
pub mod conversion;
pub mod detect;
pub mod error;
pub mod export;
pub mod kinematics;
pub mod parser;
pub mod track;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use config::*;
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use detect::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use kinematics::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use track::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;
