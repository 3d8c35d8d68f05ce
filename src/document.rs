//! Loading of CBOR readings log documents.
//!
//! A log is a CBOR map with at least two entries:
//!
//! | Key | Value |
//! |-----|-------|
//! | `readings_format` | Array of text, must equal `READINGS_FORMAT` |
//! | `readings` | Array of text (flags) and integers (offsets) |
//!
//! Any other top-level entries (device name, start time, ...) are kept
//! untouched in `ReadingsLog::extra`.

use std::io::Read;

use ciborium::value::Value as CborValue;

use crate::constants::{FORMAT_KEY, READINGS_KEY};
use crate::error::DecodeError;
use crate::reconstruct::reconstruct;
use crate::sample::Sample;
use crate::token::{cbor_kind, Token};

/// A decoded readings log
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingsLog {
    /// Reconstructed samples in log order
    pub readings: Vec<Sample>,
    /// Top-level entries other than the format and readings, in document order
    pub extra: Vec<(CborValue, CborValue)>,
}

impl ReadingsLog {
    /// Look up a pass-through entry by text key
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&CborValue> {
        self.extra
            .iter()
            .find(|(k, _)| k.as_text() == Some(key))
            .map(|(_, v)| v)
    }

    /// Number of samples flagged as tare
    #[must_use]
    pub fn tare_count(&self) -> usize {
        self.readings.iter().filter(|s| s.is_tare()).count()
    }

    /// Time of the last sample, or 0 for an empty log
    #[must_use]
    pub fn duration_us(&self) -> u64 {
        self.readings.last().map_or(0, |s| s.time_us)
    }
}

/// Decode a readings log from a CBOR byte stream
///
/// # Errors
/// Returns `DecodeError::Cbor` if the stream is not valid CBOR, or any
/// error from `parse_document`.
pub fn decode<R: Read>(reader: R) -> Result<ReadingsLog, DecodeError> {
    let value: CborValue =
        ciborium::de::from_reader(reader).map_err(|e| DecodeError::Cbor(e.to_string()))?;
    parse_document(value)
}

/// Decode a readings log from an in-memory CBOR buffer
///
/// # Errors
/// Same as `decode`.
pub fn decode_bytes(buf: &[u8]) -> Result<ReadingsLog, DecodeError> {
    decode(buf)
}

/// Interpret an already-parsed CBOR document as a readings log
///
/// # Errors
/// * `DecodeError::NotAMap` - the document is not a map
/// * `DecodeError::MissingField` - `readings_format` or `readings` is absent
/// * `DecodeError::FormatMismatch` - the descriptor is not the supported grammar
/// * `DecodeError::InvalidReadings` - `readings` is not an array
/// * any token or reconstruction error
pub fn parse_document(value: CborValue) -> Result<ReadingsLog, DecodeError> {
    let CborValue::Map(entries) = value else {
        return Err(DecodeError::NotAMap);
    };

    let mut format = None;
    let mut readings = None;
    let mut extra = Vec::new();

    for (key, value) in entries {
        match key.as_text() {
            Some(FORMAT_KEY) => format = Some(value),
            Some(READINGS_KEY) => readings = Some(value),
            _ => extra.push((key, value)),
        }
    }

    let format = format.ok_or(DecodeError::MissingField(FORMAT_KEY))?;
    let readings = readings.ok_or(DecodeError::MissingField(READINGS_KEY))?;

    let descriptor = descriptor_strings(format)?;
    let CborValue::Array(items) = readings else {
        return Err(DecodeError::InvalidReadings);
    };

    let tokens = items
        .iter()
        .enumerate()
        .map(|(index, item)| Token::from_cbor(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let readings = reconstruct(&descriptor, tokens)?;
    log::debug!(
        "decoded {} readings, {} extra entries",
        readings.len(),
        extra.len()
    );

    Ok(ReadingsLog { readings, extra })
}

/// Flatten a descriptor to strings so it can be compared and reported
///
/// A descriptor that is not an array of text can never match, so it is
/// reported as a mismatch with non-text parts rendered for display.
fn descriptor_strings(format: CborValue) -> Result<Vec<String>, DecodeError> {
    let CborValue::Array(items) = format else {
        return Err(DecodeError::FormatMismatch { found: vec![render(&format)] });
    };

    let mut descriptor = Vec::with_capacity(items.len());
    let mut all_text = true;
    for item in items {
        match item {
            CborValue::Text(text) => descriptor.push(text),
            other => {
                all_text = false;
                descriptor.push(render(&other));
            }
        }
    }

    if all_text {
        Ok(descriptor)
    } else {
        Err(DecodeError::FormatMismatch { found: descriptor })
    }
}

fn render(value: &CborValue) -> String {
    match value {
        CborValue::Text(text) => text.clone(),
        CborValue::Integer(n) => i128::from(*n).to_string(),
        other => format!("<{}>", cbor_kind(other)),
    }
}
