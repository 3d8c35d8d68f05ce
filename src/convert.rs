//! Conversion of readings log files to sibling CSV files.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::constants::{INPUT_EXT, OUTPUT_EXT};
use crate::document::{decode, ReadingsLog};
use crate::error::ConvertError;
use crate::output::write_csv;

/// Output path for a readings log: same name with the CSV suffix
///
/// The suffix is matched on the raw file name, so names that are not
/// valid UTF-8 are still recognised. Returns `None` when `input` does not
/// end in the log suffix.
#[must_use]
pub fn output_path(input: &Path) -> Option<PathBuf> {
    let name = input.file_name()?;
    if !name.as_encoded_bytes().ends_with(INPUT_EXT.as_bytes()) {
        return None;
    }

    if input.extension().is_some() {
        Some(input.with_extension(OUTPUT_EXT.trim_start_matches('.')))
    } else {
        // A bare ".cbor" is all stem and no extension
        Some(input.with_file_name(OUTPUT_EXT))
    }
}

/// Decode a readings log file
///
/// # Errors
/// Returns `ConvertError::Io` if the file cannot be opened and
/// `ConvertError::Decode` if it is not a valid readings log.
pub fn read_log(input: &Path) -> Result<ReadingsLog, ConvertError> {
    let file = File::open(input).map_err(|source| ConvertError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    decode(BufReader::new(file)).map_err(|source| ConvertError::Decode {
        path: input.to_path_buf(),
        source,
    })
}

/// Convert one readings log to CSV next to it
///
/// Paths without the log suffix are skipped and `Ok(None)` is returned.
/// The log is fully decoded before the output file is created, so a
/// failed decode leaves no output behind.
///
/// # Errors
/// Returns an error if the input cannot be read or decoded, or the output
/// cannot be written.
pub fn convert_file(input: &Path) -> Result<Option<(PathBuf, ReadingsLog)>, ConvertError> {
    let Some(output) = output_path(input) else {
        log::info!("skipping {} (not a {INPUT_EXT} file)", input.display());
        return Ok(None);
    };

    let readings_log = read_log(input)?;

    let file = File::create(&output).map_err(|source| ConvertError::Io {
        path: output.clone(),
        source,
    })?;
    write_csv(&readings_log.readings, BufWriter::new(file)).map_err(|source| {
        ConvertError::Csv {
            path: output.clone(),
            source,
        }
    })?;

    log::info!(
        "{} -> {} ({} readings)",
        input.display(),
        output.display(),
        readings_log.readings.len()
    );
    Ok(Some((output, readings_log)))
}

/// Convert a batch of files in order, stopping at the first failure
///
/// `on_converted` is called with the output path and decoded log of each
/// file written. Files after a failing one are not touched. Returns the
/// number of files converted.
///
/// # Errors
/// Returns the first error from `convert_file`.
pub fn convert_all<P, F>(inputs: &[P], mut on_converted: F) -> Result<usize, ConvertError>
where
    P: AsRef<Path>,
    F: FnMut(&Path, &ReadingsLog),
{
    let mut converted = 0;
    for input in inputs {
        if let Some((output, readings_log)) = convert_file(input.as_ref())? {
            on_converted(&output, &readings_log);
            converted += 1;
        }
    }
    Ok(converted)
}
