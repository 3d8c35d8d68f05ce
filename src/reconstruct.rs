//! Reconstruction of absolute samples from a delta-encoded token stream.

use std::collections::BTreeSet;

use crate::constants::READINGS_FORMAT;
use crate::error::DecodeError;
use crate::sample::Sample;
use crate::token::Token;

/// Check a format descriptor against the supported readings grammar
///
/// # Errors
/// Returns `DecodeError::FormatMismatch` carrying the descriptor unless it
/// equals `READINGS_FORMAT` element for element.
pub fn check_format<S: AsRef<str>>(descriptor: &[S]) -> Result<(), DecodeError> {
    let matches = descriptor.len() == READINGS_FORMAT.len()
        && descriptor
            .iter()
            .zip(READINGS_FORMAT)
            .all(|(d, expected)| d.as_ref() == expected);

    if matches {
        Ok(())
    } else {
        Err(DecodeError::FormatMismatch {
            found: descriptor.iter().map(|d| d.as_ref().to_owned()).collect(),
        })
    }
}

/// Reconstruct samples from a format descriptor and its token stream
///
/// The descriptor is validated before any token is read. On success the
/// samples are returned in stream order; on failure nothing is returned.
/// Flags or a time offset left unpaired at the end of the stream produce
/// no sample.
///
/// # Errors
/// * `DecodeError::FormatMismatch` - descriptor is not `READINGS_FORMAT`
/// * `DecodeError::NegativeTimeOffset` - a time offset is below zero
/// * `DecodeError::TimeOverflow` / `DecodeError::ValueOverflow` - an accumulator overflowed
///
/// # Example
/// ```
/// use hx711_readings::{reconstruct, Token, READINGS_FORMAT};
///
/// let tokens = vec![
///     Token::from("tare"),
///     Token::Number(100),
///     Token::Number(5),
///     Token::Number(50),
///     Token::Number(-2),
/// ];
/// let samples = reconstruct(&READINGS_FORMAT, tokens).unwrap();
///
/// assert_eq!(samples.len(), 2);
/// assert_eq!((samples[1].time_us, samples[1].value), (150, 3));
/// assert!(samples[0].is_tare());
/// assert!(!samples[1].is_tare());
/// ```
#[must_use = "reconstruction returns samples that should be used"]
pub fn reconstruct<S, I>(descriptor: &[S], tokens: I) -> Result<Vec<Sample>, DecodeError>
where
    S: AsRef<str>,
    I: IntoIterator<Item = Token>,
{
    check_format(descriptor)?;

    let tokens = tokens.into_iter();
    let mut samples = Vec::with_capacity(tokens.size_hint().0 / 2);
    let mut state = Reconstructor::new();

    for token in tokens {
        if let Some(sample) = state.push(token)? {
            samples.push(sample);
        }
    }

    let trailing = state.finish();
    if !trailing.is_empty() {
        log::warn!(
            "dropping unpaired trailing readings: flags {:?}, time offset {:?}",
            trailing.flags,
            trailing.time_offset
        );
    }

    Ok(samples)
}

/// Running state of a reconstruction
///
/// Each instance is independent, so separate logs can be reconstructed
/// concurrently with one `Reconstructor` each.
#[derive(Debug, Clone, Default)]
pub struct Reconstructor {
    now_us: u64,
    value: i64,
    pending_flags: BTreeSet<String>,
    pending_time_offset: Option<u64>,
    /// Position of the next token, for error reporting
    index: usize,
}

/// Unpaired state left over when a stream ends mid-sample
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trailing {
    /// Flags with no following sample
    pub flags: BTreeSet<String>,
    /// Time offset with no following value offset
    pub time_offset: Option<u64>,
}

impl Trailing {
    /// True when the stream ended on a sample boundary
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.time_offset.is_none()
    }
}

impl Reconstructor {
    /// Create a reconstructor at time 0, value 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next token of the stream
    ///
    /// Returns the completed sample when `token` is the value offset that
    /// closes a sample boundary.
    ///
    /// # Errors
    /// Returns an error if a time offset is negative or an accumulator
    /// overflows (including a time offset above `u64::MAX`). The
    /// reconstructor should not be used after an error.
    pub fn push(&mut self, token: Token) -> Result<Option<Sample>, DecodeError> {
        let index = self.index;
        self.index += 1;

        let n = match token {
            Token::Flag(flag) => {
                self.pending_flags.insert(flag);
                return Ok(None);
            }
            Token::Number(n) => n,
        };

        let Some(offset_time_us) = self.pending_time_offset else {
            if n < 0 {
                return Err(DecodeError::NegativeTimeOffset { index, offset: n });
            }
            let offset = u64::try_from(n).ok();
            self.pending_time_offset = Some(offset.ok_or(DecodeError::TimeOverflow { index })?);
            return Ok(None);
        };

        let now_us = self.now_us.checked_add(offset_time_us);
        self.now_us = now_us.ok_or(DecodeError::TimeOverflow { index })?;
        let value = i128::from(self.value)
            .checked_add(n)
            .and_then(|v| i64::try_from(v).ok());
        self.value = value.ok_or(DecodeError::ValueOverflow { index })?;
        self.pending_time_offset = None;

        Ok(Some(Sample {
            time_us: self.now_us,
            value: self.value,
            flags: std::mem::take(&mut self.pending_flags),
        }))
    }

    /// Absolute time of the last emitted sample
    #[must_use]
    pub fn now_us(&self) -> u64 {
        self.now_us
    }

    /// Absolute value of the last emitted sample
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// End the stream, returning any unpaired state
    #[must_use]
    pub fn finish(self) -> Trailing {
        Trailing {
            flags: self.pending_flags,
            time_offset: self.pending_time_offset,
        }
    }
}
