//! `hx711-readings` - Decoder for delta-encoded HX711 load-cell logs
//!
//! The logger stores each capture as a CBOR document whose readings are
//! delta-encoded: every sample is written as a time offset and a value
//! offset from the previous sample, preceded by any flags (such as `tare`)
//! that apply to it. This crate expands such a log back into absolute
//! samples and writes them out as CSV for analysis tools.
//!
//! # Example
//! ```
//! use hx711_readings::{decode_bytes, Encoder};
//!
//! let mut encoder = Encoder::new();
//! encoder.append_with_flags(11_300, -8_402, ["tare"]).unwrap();
//! encoder.append(22_600, -8_399).unwrap();
//! encoder.append(33_900, 51_220).unwrap();
//!
//! let bytes = encoder.to_bytes().unwrap();
//! let log = decode_bytes(&bytes).unwrap();
//!
//! assert_eq!(log.readings.len(), 3);
//! assert!(log.readings[0].is_tare());
//! assert_eq!(log.readings[2].value, 51_220);
//! ```
//!
//! # Log Format
//!
//! ## Document
//!
//! | Key | Type | Description |
//! |-----|------|-------------|
//! | `readings_format` | array of text | Format descriptor, see below |
//! | `readings` | array | Token stream, see below |
//! | anything else | any | Passed through untouched |
//!
//! The descriptor is always
//!
//! ```text
//! ["[flags:text]", "<offset_time_us:uint>", "<offset_value:int>"]
//! ```
//!
//! Logs with any other `readings_format` are rejected outright; there is
//! no lenient parsing of future revisions.
//!
//! ## Token Stream
//!
//! | Token | CBOR type | Meaning |
//! |-------|-----------|---------|
//! | flag | text | Applies to the next sample; may repeat |
//! | time offset | unsigned int | Microseconds since the previous sample |
//! | value offset | int | Change from the previous sample's value |
//!
//! Integers alternate between time offset and value offset; a pair closes
//! one sample and consumes the flags seen since the previous one. Time and
//! value both start at 0. A trailing flag or time offset with no following
//! value offset produces no sample.
//!
//! ## CSV Output
//!
//! ```text
//! Time (us),Value,Tare
//! 11300,-8402,1
//! 22600,-8399,0
//! ```

mod constants;
mod convert;
mod document;
mod encoder;
mod error;
mod output;
mod reconstruct;
mod sample;
mod token;


// Re-export public API
pub use constants::{FORMAT_KEY, INPUT_EXT, OUTPUT_EXT, READINGS_FORMAT, READINGS_KEY, TARE_FLAG};
pub use convert::{convert_all, convert_file, output_path, read_log};
pub use document::{decode, decode_bytes, parse_document, ReadingsLog};
pub use encoder::Encoder;
pub use error::{ConvertError, DecodeError, EncodeError};
pub use output::write_csv;
pub use reconstruct::{check_format, reconstruct, Reconstructor, Trailing};
pub use sample::Sample;
pub use token::Token;

/// CBOR value type used for pass-through document entries
pub use ciborium::value::Value as CborValue;
