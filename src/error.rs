//! Error types for readings log decoding, encoding and conversion.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error returned when a readings log cannot be decoded
///
/// Decoding is all-or-nothing: when any of these is returned, no samples
/// are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The format descriptor is not the supported readings grammar
    FormatMismatch { found: Vec<String> },
    /// A time-offset token is negative
    NegativeTimeOffset { index: usize, offset: i128 },
    /// Accumulated time no longer fits in a `u64`
    TimeOverflow { index: usize },
    /// Accumulated value no longer fits in an `i64`
    ValueOverflow { index: usize },
    /// A readings entry is neither text nor an integer
    InvalidToken { index: usize, kind: &'static str },
    /// The top-level document is not a map
    NotAMap,
    /// A required top-level key is absent
    MissingField(&'static str),
    /// The `readings` entry is not an array
    InvalidReadings,
    /// The input is not well-formed CBOR
    Cbor(String),
}

/// Error returned when encoding samples or tokens fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Sample time is earlier than the previous sample's time
    TimeBeforePrevious { time_us: u64, prev_time_us: u64 },
    /// Number token outside the CBOR integer range
    IntegerOutOfRange { value: i128 },
}

/// Error returned when converting a log file to CSV fails
#[derive(Debug)]
pub enum ConvertError {
    /// Reading the input or writing the output failed
    Io { path: PathBuf, source: io::Error },
    /// The input is not a valid readings log
    Decode { path: PathBuf, source: DecodeError },
    /// Writing a CSV record failed
    Csv { path: PathBuf, source: csv::Error },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FormatMismatch { found } => {
                write!(f, "unsupported readings format {found:?}")
            }
            Self::NegativeTimeOffset { index, offset } => {
                write!(f, "negative time offset {offset} at readings[{index}]")
            }
            Self::TimeOverflow { index } => {
                write!(f, "time overflows at readings[{index}]")
            }
            Self::ValueOverflow { index } => {
                write!(f, "value overflows at readings[{index}]")
            }
            Self::InvalidToken { index, kind } => {
                write!(
                    f,
                    "unexpected {kind} at readings[{index}], expected text or integer"
                )
            }
            Self::NotAMap => write!(f, "document is not a map"),
            Self::MissingField(key) => write!(f, "document has no \"{key}\" entry"),
            Self::InvalidReadings => write!(f, "\"readings\" is not an array"),
            Self::Cbor(msg) => write!(f, "invalid CBOR: {msg}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeBeforePrevious {
                time_us,
                prev_time_us,
            } => {
                write!(
                    f,
                    "time {time_us}us is before previous sample at {prev_time_us}us"
                )
            }
            Self::IntegerOutOfRange { value } => {
                write!(f, "integer {value} is outside the CBOR integer range")
            }
        }
    }
}

impl std::error::Error for EncodeError {}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Decode { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Csv { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
        }
    }
}
