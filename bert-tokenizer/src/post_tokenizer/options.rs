use serde::{Deserialize, Serialize};

use crate::post_tokenizer::truncation::TruncationStrategy;

/// The per call options of the encoding.
///
/// The defaults are:
/// - No maximum sequence length, hence neither truncation nor padding.
/// - The [longest first](TruncationStrategy::LongestFirst) truncation strategy without stride.
/// - Only the token type ids are returned besides the input ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub(crate) max_seq_len: usize,
    pub(crate) pad_to_max_seq_len: bool,
    pub(crate) truncation_strategy: TruncationStrategy,
    pub(crate) stride: usize,
    pub(crate) return_token_type_ids: bool,
    pub(crate) return_attention_mask: bool,
    pub(crate) return_special_tokens_mask: bool,
    pub(crate) return_position_ids: bool,
    pub(crate) return_length: bool,
    pub(crate) return_overflowing_tokens: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            max_seq_len: 0,
            pad_to_max_seq_len: false,
            truncation_strategy: TruncationStrategy::default(),
            stride: 0,
            return_token_type_ids: true,
            return_attention_mask: false,
            return_special_tokens_mask: false,
            return_position_ids: false,
            return_length: false,
            return_overflowing_tokens: false,
        }
    }
}

impl EncodeOptions {
    /// Sets the maximum sequence length including the special tokens.
    ///
    /// A length of zero disables truncation and padding.
    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    /// Enables padding up to the maximum sequence length.
    pub fn with_padding(mut self, pad_to_max_seq_len: bool) -> Self {
        self.pad_to_max_seq_len = pad_to_max_seq_len;
        self
    }

    /// Sets the truncation strategy and the stride of the overflowing tokens.
    pub fn with_truncation(mut self, strategy: TruncationStrategy, stride: usize) -> Self {
        self.truncation_strategy = strategy;
        self.stride = stride;
        self
    }

    pub fn with_token_type_ids(mut self, enable: bool) -> Self {
        self.return_token_type_ids = enable;
        self
    }

    pub fn with_attention_mask(mut self, enable: bool) -> Self {
        self.return_attention_mask = enable;
        self
    }

    pub fn with_special_tokens_mask(mut self, enable: bool) -> Self {
        self.return_special_tokens_mask = enable;
        self
    }

    pub fn with_position_ids(mut self, enable: bool) -> Self {
        self.return_position_ids = enable;
        self
    }

    pub fn with_length(mut self, enable: bool) -> Self {
        self.return_length = enable;
        self
    }

    /// Returns the overflowing tokens and their count whenever a truncation happens.
    pub fn with_overflowing_tokens(mut self, enable: bool) -> Self {
        self.return_overflowing_tokens = enable;
        self
    }

    /// Gets the maximum sequence length.
    pub fn max_seq_len(&self) -> usize {
        self.max_seq_len
    }

    /// Gets the stride.
    pub fn stride(&self) -> usize {
        self.stride
    }
}
