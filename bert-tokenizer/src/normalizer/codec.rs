use std::str;

use displaydoc::Display;
use thiserror::Error;

/// The potential errors of the text codec.
#[derive(Debug, Display, Error, PartialEq)]
pub enum CodecError {
    /// Invalid utf-8 sequence of {len} bytes at byte {offset}
    Utf8 { offset: usize, len: usize },
    /// Incomplete utf-8 sequence at the end of the input from byte {offset}
    Incomplete { offset: usize },
}

/// Decodes utf-8 bytes into unicode scalar values.
///
/// # Errors
/// Fails on malformed utf-8 instead of replacing the offending bytes.
pub fn decode(bytes: &[u8]) -> Result<Vec<char>, CodecError> {
    str::from_utf8(bytes)
        .map(|text| text.chars().collect())
        .map_err(|error| {
            let offset = error.valid_up_to();
            match error.error_len() {
                Some(len) => CodecError::Utf8 { offset, len },
                None => CodecError::Incomplete { offset },
            }
        })
}

/// Encodes unicode scalar values into an utf-8 string.
///
/// This can't fail, scalar values are valid by construction.
pub fn encode(scalars: &[char]) -> String {
    scalars.iter().collect()
}
