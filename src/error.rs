use std::fmt;

/// Custom error types for NMEA track processing
#[derive(Debug)]
pub enum TrackError {
    /// I/O errors
    Io(std::io::Error),
    /// Parse errors with context
    Parse(String),
    /// Export format error
    Export(String),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::Io(err) => write!(f, "I/O error: {}", err),
            TrackError::Parse(msg) => write!(f, "Parse error: {}", msg),
            TrackError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for TrackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrackError {
    fn from(err: std::io::Error) -> Self {
        TrackError::Io(err)
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for TrackError {
    fn from(err: csv::Error) -> Self {
        TrackError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackError>;
