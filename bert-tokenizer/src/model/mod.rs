pub mod vocab;

use std::sync::Arc;

use displaydoc::Display;
use log::debug;
use thiserror::Error;

use crate::{
    model::vocab::Vocab,
    normalizer::{codec, is_strip_char},
};

/// A Bert word piece model.
#[derive(Debug)]
pub struct Model<N> {
    pub(crate) vocab: Arc<Vocab<N>>,
    pub(crate) unk_token: String,
    pub(crate) prefix: String,
    pub(crate) max_chars: usize,
}

/// The potential errors of the word piece model.
#[derive(Debug, Display, Error)]
pub enum ModelError {
    /// Missing the unknown token {0:?} in the vocabulary
    UnkToken(String),
    /// The maximum number of characters per word must be greater than zero
    MaxChars,
}

impl<N> Model<N> {
    /// Creates a word piece model.
    ///
    /// # Errors
    /// Fails if the unknown token isn't part of the vocabulary or if the maximum number of
    /// characters is zero.
    pub(crate) fn new(
        vocab: Arc<Vocab<N>>,
        unk: impl Into<String>,
        prefix: impl Into<String>,
        max_chars: usize,
    ) -> Result<Self, ModelError> {
        let unk_token = unk.into();
        let prefix = prefix.into();
        if !vocab.contains(unk_token.as_str()) {
            return Err(ModelError::UnkToken(unk_token));
        }
        if !vocab.tokens().any(|word| word.starts_with(prefix.as_str())) {
            debug!("no token of the vocabulary starts with the subword prefix {:?}", prefix);
        }
        if max_chars == 0 {
            return Err(ModelError::MaxChars);
        }

        Ok(Self {
            vocab,
            unk_token,
            prefix,
            max_chars,
        })
    }

    /// Tokenizes a word into word pieces.
    ///
    /// Each whitespace separated part of the word is split greedily into the longest pieces
    /// present in the vocabulary, where pieces after the first one are marked by the continuing
    /// subword prefix. A part without a complete decomposition becomes the unknown token. A part
    /// with more than the maximum number of characters is announced by an unknown token but is
    /// still decomposed.
    pub fn tokenize(&self, word: &[char]) -> Vec<String> {
        let mut pieces = Vec::new();
        for part in word.split(|&c| is_strip_char(c)).filter(|part| !part.is_empty()) {
            if part.len() > self.max_chars {
                pieces.push(self.unk_token.clone());
            }
            match self.decompose(part) {
                Some(sub_pieces) => pieces.extend(sub_pieces),
                None => pieces.push(self.unk_token.clone()),
            }
        }

        pieces
    }

    /// Decomposes the part greedily into the longest known pieces, if possible.
    fn decompose(&self, part: &[char]) -> Option<Vec<String>> {
        let mut pieces = Vec::new();
        let mut start = 0;
        while start < part.len() {
            let mut end = part.len();
            let mut piece = None;
            while start < end {
                let candidate = if start > 0 {
                    format!("{}{}", self.prefix, codec::encode(&part[start..end]))
                } else {
                    codec::encode(&part[start..end])
                };
                if self.vocab.contains(candidate.as_str()) {
                    piece = Some(candidate);
                    break;
                }
                end -= 1;
            }
            pieces.push(piece?);
            start = end;
        }

        Some(pieces)
    }
}
