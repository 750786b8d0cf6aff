use std::{
    fs::File,
    io::{BufReader, Error, ErrorKind, Result},
    path::PathBuf,
};

use serde::Deserialize;
use serde_json::from_reader;

use crate::asset::resolve_asset;

/// Resolves the path to the Bert test vocabulary.
pub fn vocab() -> Result<PathBuf> {
    resolve_asset("bertVocab")
}

/// Resolves the path to the expected Bert test encodings.
pub fn encodings() -> Result<PathBuf> {
    resolve_asset("bertEncodings")
}

/// An expected encoding of a sequence and an optional paired sequence.
#[derive(Debug, Deserialize)]
pub struct EncodingCase {
    pub sequence: String,
    #[serde(default)]
    pub pair: Option<String>,
    pub tokens: Vec<String>,
    pub input_ids: Vec<i64>,
    pub token_type_ids: Vec<i64>,
}

/// Reads the expected Bert test encodings.
pub fn encoding_cases() -> Result<Vec<EncodingCase>> {
    from_reader(BufReader::new(File::open(encodings()?)?))
        .map_err(|error| Error::new(ErrorKind::InvalidData, error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocab() {
        assert!(vocab().is_ok());
    }

    #[test]
    fn test_encoding_cases() {
        assert!(!encoding_cases().unwrap().is_empty());
    }
}
