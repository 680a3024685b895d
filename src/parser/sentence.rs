//! Sentence splitting and classification
//!
//! Raw log content is split on the `$` sentence-start delimiter rather than
//! on line breaks: receivers under transmission noise emit physical lines
//! holding several concatenated sentences, or sentences cut off mid-stream.
//! Each chunk is then split on `,` and classified by its identifier field and
//! exact field count. Chunks that carry a known identifier with the wrong
//! arity are truncated or corrupted transmissions and are dropped silently
//! (counted for diagnostics).

use crate::types::{GgaRecord, RmcRecord, TrackStats};

/// Field count of an intact `$GPRMC` sentence after splitting on `,`
pub const RMC_FIELD_COUNT: usize = 13;
/// Field count of an intact `$GPGGA` sentence after splitting on `,`
pub const GGA_FIELD_COUNT: usize = 15;

/// Split decoded log content into classified RMC and GGA records.
///
/// Returns the two record streams in file order, tagged with `source_file`
/// for provenance. An empty or header-only input yields two empty vectors.
pub fn parse_content(
    content: &str,
    source_file: &str,
    stats: &mut TrackStats,
) -> (Vec<RmcRecord>, Vec<GgaRecord>) {
    let mut rmc_records = Vec::new();
    let mut gga_records = Vec::new();

    for chunk in content.split('$') {
        if chunk.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = chunk.split(',').collect();
        match fields[0].trim() {
            "GPRMC" => {
                if fields.len() == RMC_FIELD_COUNT {
                    rmc_records.push(rmc_from_fields(&fields, source_file));
                } else {
                    stats.discarded_rmc += 1;
                }
            }
            "GPGGA" => {
                if fields.len() == GGA_FIELD_COUNT {
                    gga_records.push(gga_from_fields(&fields, source_file));
                } else {
                    stats.discarded_gga += 1;
                }
            }
            _ => stats.other_chunks += 1,
        }
    }

    (rmc_records, gga_records)
}

fn rmc_from_fields(fields: &[&str], source_file: &str) -> RmcRecord {
    RmcRecord {
        time_raw: fields[1].trim().to_string(),
        status: fields[2].trim().to_string(),
        lat_raw: fields[3].trim().to_string(),
        lat_hemisphere: fields[4].trim().to_string(),
        lon_raw: fields[5].trim().to_string(),
        lon_hemisphere: fields[6].trim().to_string(),
        speed_knots_raw: fields[7].trim().to_string(),
        track_raw: fields[8].trim().to_string(),
        date_raw: fields[9].trim().to_string(),
        source_file: source_file.to_string(),
    }
}

fn gga_from_fields(fields: &[&str], source_file: &str) -> GgaRecord {
    GgaRecord {
        time_raw: fields[1].trim().to_string(),
        lat_raw: fields[2].trim().to_string(),
        lat_hemisphere: fields[3].trim().to_string(),
        lon_raw: fields[4].trim().to_string(),
        lon_hemisphere: fields[5].trim().to_string(),
        fix_quality_raw: fields[6].trim().to_string(),
        satellites_raw: fields[7].trim().to_string(),
        hdop_raw: fields[8].trim().to_string(),
        altitude_raw: fields[9].trim().to_string(),
        source_file: source_file.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RMC: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W,A*6A\r\n";
    const GGA: &str =
        "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

    #[test]
    fn test_parse_intact_sentences() {
        let mut stats = TrackStats::default();
        let content = format!("{RMC}{GGA}");
        let (rmc, gga) = parse_content(&content, "log.txt", &mut stats);
        assert_eq!(rmc.len(), 1);
        assert_eq!(gga.len(), 1);
        assert_eq!(rmc[0].time_raw, "123519");
        assert_eq!(rmc[0].lat_raw, "4807.038");
        assert_eq!(rmc[0].date_raw, "230394");
        assert_eq!(rmc[0].source_file, "log.txt");
        assert_eq!(gga[0].altitude_raw, "545.4");
        assert_eq!(stats.discarded_rmc, 0);
        assert_eq!(stats.discarded_gga, 0);
    }

    #[test]
    fn test_concatenated_sentences_on_one_line() {
        // no line break between sentences; the '$' delimiter still separates them
        let mut stats = TrackStats::default();
        let content = format!("{}{}", RMC.trim_end(), GGA);
        let (rmc, gga) = parse_content(&content, "log.txt", &mut stats);
        assert_eq!(rmc.len(), 1);
        assert_eq!(gga.len(), 1);
    }

    #[test]
    fn test_truncated_sentence_discarded_and_counted() {
        let mut stats = TrackStats::default();
        let content = "$GPRMC,123519,A,4807.038,N\r\n$GPGGA,123519,4807.038\r\n";
        let (rmc, gga) = parse_content(content, "log.txt", &mut stats);
        assert!(rmc.is_empty());
        assert!(gga.is_empty());
        assert_eq!(stats.discarded_rmc, 1);
        assert_eq!(stats.discarded_gga, 1);
    }

    #[test]
    fn test_unknown_sentences_ignored() {
        let mut stats = TrackStats::default();
        let content = "$GPGSV,3,1,11,03,03,111,00*74\r\n$GPGSA,A,3,04,05,,*39\r\n";
        let (rmc, gga) = parse_content(content, "log.txt", &mut stats);
        assert!(rmc.is_empty());
        assert!(gga.is_empty());
        assert_eq!(stats.other_chunks, 2);
    }

    #[test]
    fn test_empty_content() {
        let mut stats = TrackStats::default();
        let (rmc, gga) = parse_content("", "log.txt", &mut stats);
        assert!(rmc.is_empty());
        assert!(gga.is_empty());
        assert_eq!(stats, TrackStats::default());
    }
}
