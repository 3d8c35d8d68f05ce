//! Encoder producing delta-encoded readings logs.

use std::collections::BTreeSet;
use std::io::{self, Write};

use ciborium::value::Value as CborValue;

use crate::constants::{FORMAT_KEY, READINGS_FORMAT, READINGS_KEY};
use crate::error::EncodeError;
use crate::sample::Sample;
use crate::token::Token;

/// Encoder for readings logs
///
/// Accumulates samples as the token stream the logger writes: each
/// sample's flags, then its time offset from the previous sample, then its
/// value offset from the previous value. The first sample is offset from
/// time 0, value 0.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    tokens: Vec<Token>,
    prev_time_us: u64,
    prev_value: i64,
    count: usize,
    extra: Vec<(CborValue, CborValue)>,
}

impl Encoder {
    /// Create an empty encoder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unflagged sample
    ///
    /// # Errors
    /// See `append_with_flags`.
    #[inline]
    pub fn append(&mut self, time_us: u64, value: i64) -> Result<(), EncodeError> {
        self.append_with_flags(time_us, value, std::iter::empty::<&str>())
    }

    /// Append a sample carrying the given flags
    ///
    /// Flags are written in sorted order, each once. Any `u64` time offset
    /// and any `i64` value delta are representable.
    ///
    /// # Errors
    /// Returns `EncodeError::TimeBeforePrevious` if `time_us` is before the
    /// previous sample's time. The encoder is unchanged when an error is
    /// returned.
    pub fn append_with_flags<I, S>(
        &mut self,
        time_us: u64,
        value: i64,
        flags: I,
    ) -> Result<(), EncodeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let offset = time_us
            .checked_sub(self.prev_time_us)
            .ok_or(EncodeError::TimeBeforePrevious {
                time_us,
                prev_time_us: self.prev_time_us,
            })?;
        let delta = i128::from(value) - i128::from(self.prev_value);

        let flags: BTreeSet<String> = flags.into_iter().map(Into::into).collect();
        self.tokens.extend(flags.into_iter().map(Token::Flag));
        self.tokens.push(Token::from(offset));
        self.tokens.push(Token::Number(delta));

        self.prev_time_us = time_us;
        self.prev_value = value;
        self.count += 1;
        Ok(())
    }

    /// Append a reconstructed sample
    ///
    /// # Errors
    /// See `append_with_flags`.
    pub fn append_sample(&mut self, sample: &Sample) -> Result<(), EncodeError> {
        self.append_with_flags(sample.time_us, sample.value, sample.flags.iter().cloned())
    }

    /// Add a top-level document entry written alongside the readings
    pub fn insert_extra(&mut self, key: impl Into<String>, value: CborValue) {
        self.extra.push((CborValue::Text(key.into()), value));
    }

    /// Number of samples appended
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The token stream encoded so far
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Build the CBOR document: format, readings, then extra entries
    ///
    /// # Errors
    /// Returns `EncodeError::IntegerOutOfRange` if a token cannot be
    /// written as a CBOR integer. Tokens produced by `append` always can.
    pub fn to_value(&self) -> Result<CborValue, EncodeError> {
        let format = READINGS_FORMAT
            .iter()
            .map(|s| CborValue::Text((*s).to_owned()))
            .collect();
        let readings = self
            .tokens
            .iter()
            .map(Token::to_cbor)
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = Vec::with_capacity(2 + self.extra.len());
        entries.push((
            CborValue::Text(FORMAT_KEY.to_owned()),
            CborValue::Array(format),
        ));
        entries.push((
            CborValue::Text(READINGS_KEY.to_owned()),
            CborValue::Array(readings),
        ));
        entries.extend(self.extra.iter().cloned());
        Ok(CborValue::Map(entries))
    }

    /// Serialize the document as CBOR to `writer`
    ///
    /// # Errors
    /// Returns any error from the underlying writer, or `InvalidData` if
    /// the document cannot be built.
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        let value = self
            .to_value()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        ciborium::ser::into_writer(&value, writer).map_err(|e| match e {
            ciborium::ser::Error::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        })
    }

    /// Serialize the document as CBOR bytes
    ///
    /// # Errors
    /// Same as `write_to`.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }
}
