//! Tokens of the readings stream.

use ciborium::value::{Integer, Value as CborValue};

use crate::error::{DecodeError, EncodeError};

/// One entry of a readings stream
///
/// The kind is fixed when the token is read from the log; whether a
/// `Number` is a time offset or a value offset depends only on its
/// position in the stream. `i128` holds every CBOR integer, from the
/// full unsigned range of time offsets to the full negative range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Flag that applies to the next sample
    Flag(String),
    /// Time offset (us) or value offset, depending on pairing position
    Number(i128),
}

impl Token {
    /// Read a token from a CBOR readings entry
    ///
    /// `index` is the entry's position in the readings array, used for
    /// error reporting only.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidToken` for anything other than text or
    /// an integer.
    pub fn from_cbor(index: usize, value: &CborValue) -> Result<Self, DecodeError> {
        match value {
            CborValue::Text(text) => Ok(Self::Flag(text.clone())),
            CborValue::Integer(n) => Ok(Self::Number(i128::from(*n))),
            other => Err(DecodeError::InvalidToken {
                index,
                kind: cbor_kind(other),
            }),
        }
    }

    /// Convert back to the CBOR representation used in logs
    ///
    /// # Errors
    /// Returns `EncodeError::IntegerOutOfRange` for numbers CBOR cannot
    /// represent (below -2^64 or above 2^64 - 1).
    pub fn to_cbor(&self) -> Result<CborValue, EncodeError> {
        match self {
            Self::Flag(text) => Ok(CborValue::Text(text.clone())),
            Self::Number(n) => Integer::try_from(*n)
                .map(CborValue::Integer)
                .map_err(|_| EncodeError::IntegerOutOfRange { value: *n }),
        }
    }
}

impl From<&str> for Token {
    fn from(flag: &str) -> Self {
        Self::Flag(flag.to_owned())
    }
}

impl From<String> for Token {
    fn from(flag: String) -> Self {
        Self::Flag(flag)
    }
}

impl From<i64> for Token {
    fn from(n: i64) -> Self {
        Self::Number(i128::from(n))
    }
}

impl From<u64> for Token {
    fn from(n: u64) -> Self {
        Self::Number(i128::from(n))
    }
}

/// Human-readable name of a CBOR value's major type
pub(crate) fn cbor_kind(value: &CborValue) -> &'static str {
    match value {
        CborValue::Integer(_) => "integer",
        CborValue::Bytes(_) => "byte string",
        CborValue::Float(_) => "float",
        CborValue::Text(_) => "text",
        CborValue::Bool(_) => "bool",
        CborValue::Null => "null",
        CborValue::Tag(..) => "tagged value",
        CborValue::Array(_) => "array",
        CborValue::Map(_) => "map",
        _ => "unknown value",
    }
}
