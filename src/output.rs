//! CSV output of reconstructed samples.

use std::io::Write;

use crate::constants::CSV_HEADER;
use crate::sample::Sample;

/// Write samples as CSV: `Time (us),Value,Tare`, one row per sample
///
/// Rows end in `\n` and fields are quoted only when needed. The tare
/// column is `1` for samples flagged `tare` and `0` otherwise.
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn write_csv<'a, W, I>(samples: I, writer: W) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a Sample>,
{
    let mut out = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    out.write_record(CSV_HEADER)?;
    for sample in samples {
        out.write_record([
            sample.time_us.to_string(),
            sample.value.to_string(),
            u8::from(sample.is_tare()).to_string(),
        ])?;
    }
    out.flush()?;
    Ok(())
}
