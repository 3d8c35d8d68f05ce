//! Format constants shared by the decoder, encoder and file plumbing.

/// The only readings grammar this crate understands.
///
/// Element order matters: the descriptor found in a log must equal this
/// sequence exactly.
pub const READINGS_FORMAT: [&str; 3] =
    ["[flags:text]", "<offset_time_us:uint>", "<offset_value:int>"];

/// Flag marking the sample at which the scale was zeroed
pub const TARE_FLAG: &str = "tare";

/// Top-level document key holding the format descriptor
pub const FORMAT_KEY: &str = "readings_format";

/// Top-level document key holding the token stream
pub const READINGS_KEY: &str = "readings";

/// Suffix of readings logs downloaded from the logger
pub const INPUT_EXT: &str = ".cbor";

/// Suffix of the converted tabular output
pub const OUTPUT_EXT: &str = ".csv";

/// Column names of the tabular output
pub(crate) const CSV_HEADER: [&str; 3] = ["Time (us)", "Value", "Tare"];
