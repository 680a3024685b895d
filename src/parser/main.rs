use crate::parser::sentence::parse_content;
use crate::types::{GgaRecord, RmcRecord, TrackStats};
use crate::Result;
use anyhow::Context;
use std::path::Path;

/// Parse an NMEA log file into its RMC and GGA record streams.
///
/// The file handle is scoped to the read and released on every exit path.
/// Reading is the only fallible step: an unreadable file is an error, while
/// undecodable or corrupt content only shrinks the output.
pub fn parse_nmea_file(
    path: &Path,
    stats: &mut TrackStats,
    debug: bool,
) -> Result<(Vec<RmcRecord>, Vec<GgaRecord>)> {
    if debug {
        println!("=== PARSING NMEA FILE ===");
        let metadata = std::fs::metadata(path)?;
        println!("File: {:?} ({} bytes)", path, metadata.len());
    }

    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read NMEA log file: {:?}", path))?;

    let source_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    Ok(parse_nmea_bytes(&data, source_name, stats, debug))
}

/// Parse NMEA log data from memory.
///
/// Logger output has mixed, unreliable encoding, so bytes are decoded
/// permissively: undecodable sequences are replaced rather than failing the
/// file. An empty or header-only input yields two empty streams.
pub fn parse_nmea_bytes(
    data: &[u8],
    source_name: &str,
    stats: &mut TrackStats,
    debug: bool,
) -> (Vec<RmcRecord>, Vec<GgaRecord>) {
    let content = String::from_utf8_lossy(data);
    let (rmc_records, gga_records) = parse_content(&content, source_name, stats);

    if debug {
        println!(
            "Parsed {} RMC and {} GGA records ({} RMC / {} GGA discarded, {} other sentences)",
            rmc_records.len(),
            gga_records.len(),
            stats.discarded_rmc,
            stats.discarded_gga,
            stats.other_chunks
        );
    }

    (rmc_records, gga_records)
}
