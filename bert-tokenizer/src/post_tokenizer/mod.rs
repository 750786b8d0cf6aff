pub mod encoding;
pub mod options;
pub mod padding;
pub mod special;
pub mod truncation;

use displaydoc::Display;
use log::warn;
use num_traits::{FromPrimitive, Num};
use thiserror::Error;

use crate::{
    normalizer::codec::CodecError,
    post_tokenizer::{
        encoding::Encoding,
        options::EncodeOptions,
        padding::PaddingSite,
        special::{SpecialToken, SpecialTokens, SpecialTokensError},
        truncation::{truncate_sequence, TruncationError},
    },
};

/// A Bert post-tokenizer.
///
/// Assembles the encodings from the ids of one or two sequences by truncation, wrapping with the
/// special tokens and padding.
#[derive(Debug)]
pub struct PostTokenizer<N> {
    pub(crate) special_tokens: SpecialTokens<N>,
    pub(crate) padding_site: PaddingSite,
}

/// The potential errors of the encoding.
#[derive(Debug, Display, Error)]
pub enum EncodeError {
    /// Invalid argument: {0}
    InvalidArgument(#[from] SpecialTokensError),
    /// Failed to truncate the sequences: {0}
    Truncation(#[from] TruncationError),
    /// The encoded sequence of length {len} exceeds the maximum sequence length {max}
    SequenceTooLong { len: usize, max: usize },
    /// A non-zero stride for pairs of sequences is not supported
    UnsupportedStride,
    /// The batch of {sequences} sequences doesn't match the batch of {pairs} paired sequences
    BatchSize { sequences: usize, pairs: usize },
    /// The value {0} doesn't fit into the numeric id type
    IdOverflow(usize),
    /// Invalid sequence: {0}
    Codec(#[from] CodecError),
}

/// Converts the value into the numeric id type.
pub(crate) fn cast<N>(value: usize) -> Result<N, EncodeError>
where
    N: FromPrimitive,
{
    N::from_usize(value).ok_or(EncodeError::IdOverflow(value))
}

impl<N> PostTokenizer<N>
where
    N: Num + FromPrimitive + Copy,
{
    /// Post-tokenizes the ids of a sequence and an optional paired sequence.
    ///
    /// An empty paired sequence is treated as no paired sequence at all.
    pub(crate) fn post_tokenize(
        &self,
        mut ids: Vec<N>,
        pair_ids: Option<Vec<N>>,
        options: &EncodeOptions,
    ) -> Result<Encoding<N>, EncodeError> {
        let mut pair_ids = pair_ids.filter(|pair_ids| !pair_ids.is_empty());
        let total_len = ids.len()
            + pair_ids.as_ref().map_or(0, Vec::len)
            + SpecialTokens::<N>::num_special_tokens_to_add(pair_ids.is_some());

        let max_seq_len = options.max_seq_len();
        let mut overflow = None;
        if max_seq_len > 0 && total_len > max_seq_len {
            let remove = total_len - max_seq_len;
            let overflowing_ids = truncate_sequence(
                &mut ids,
                pair_ids.as_mut(),
                remove,
                options.truncation_strategy,
                options.stride(),
            )
            .map_err(|error| {
                warn!("{}", error);
                error
            })?;
            if options.return_overflowing_tokens {
                overflow = Some((overflowing_ids, vec![cast(remove)?]));
            }
        }

        let pair_ids = pair_ids.as_deref();
        let mut encoding = Encoding::new(
            self.special_tokens
                .build_inputs_with_special_tokens(&ids, pair_ids),
        );
        let seq_len = encoding.len();
        if max_seq_len > 0 && seq_len > max_seq_len {
            warn!(
                "encoded sequence of length {} exceeds the maximum {}",
                seq_len, max_seq_len,
            );
            return Err(EncodeError::SequenceTooLong {
                len: seq_len,
                max: max_seq_len,
            });
        }

        if options.return_token_type_ids {
            encoding.token_type_ids = Some(SpecialTokens::create_token_type_ids(&ids, pair_ids));
        }
        if options.return_special_tokens_mask {
            encoding.special_tokens_mask = Some(
                self.special_tokens
                    .special_tokens_mask(&ids, pair_ids, false)?,
            );
        }
        if options.return_length {
            encoding.seq_len = Some(vec![cast(seq_len)?]);
        }
        if options.return_attention_mask {
            encoding.attention_mask = Some(vec![N::one(); seq_len]);
        }

        if options.pad_to_max_seq_len && max_seq_len > 0 && seq_len < max_seq_len {
            self.pad(&mut encoding, max_seq_len);
        }

        if options.return_position_ids {
            let position_ids = (0..encoding.len())
                .map(cast)
                .collect::<Result<Vec<N>, _>>()?;
            encoding.position_ids = Some(position_ids);
        }
        if let Some((overflowing_ids, num_truncated)) = overflow {
            encoding.overflowing_token_ids = Some(overflowing_ids);
            encoding.num_truncated_tokens = Some(num_truncated);
        }

        Ok(encoding)
    }

    /// Pads the sequence dependent fields of the encoding up to the length.
    fn pad(&self, encoding: &mut Encoding<N>, len: usize) {
        let site = self.padding_site;
        let pad_id = self.special_tokens.id(SpecialToken::Pad);
        site.pad(&mut encoding.input_ids, len, pad_id);
        if let Some(ref mut token_type_ids) = encoding.token_type_ids {
            site.pad(token_type_ids, len, N::zero());
        }
        if let Some(ref mut attention_mask) = encoding.attention_mask {
            site.pad(attention_mask, len, N::zero());
        }
        if let Some(ref mut special_tokens_mask) = encoding.special_tokens_mask {
            site.pad(special_tokens_mask, len, N::one());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{model::vocab::Vocab, post_tokenizer::truncation::TruncationStrategy};

    use super::*;

    fn post_tokenizer<N>(padding_site: PaddingSite) -> PostTokenizer<N>
    where
        N: FromPrimitive + Copy,
    {
        let vocab = ["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]"]
            .iter()
            .enumerate()
            .map(|(idx, token)| (*token, N::from_usize(idx).unwrap()))
            .collect::<Vocab<N>>();
        PostTokenizer {
            special_tokens: SpecialTokens::new(
                &vocab, "[UNK]", "[PAD]", "[CLS]", "[MASK]", "[SEP]",
            )
            .unwrap(),
            padding_site,
        }
    }

    #[test]
    fn test_single() {
        let encoding = post_tokenizer::<i64>(PaddingSite::Right)
            .post_tokenize(vec![7, 8], None, &EncodeOptions::default())
            .unwrap();
        assert_eq!(encoding.input_ids(), [2, 7, 8, 3]);
        assert_eq!(encoding.token_type_ids().unwrap(), [0, 0, 0, 0]);
        assert!(encoding.attention_mask().is_none());
        assert!(encoding.position_ids().is_none());
    }

    #[test]
    fn test_pair() {
        let options = EncodeOptions::default()
            .with_special_tokens_mask(true)
            .with_length(true);
        let encoding = post_tokenizer::<i64>(PaddingSite::Right)
            .post_tokenize(vec![7], Some(vec![8, 9]), &options)
            .unwrap();
        assert_eq!(encoding.input_ids(), [2, 7, 3, 8, 9, 3]);
        assert_eq!(encoding.token_type_ids().unwrap(), [0, 0, 0, 1, 1, 1]);
        assert_eq!(encoding.special_tokens_mask().unwrap(), [1, 0, 1, 0, 0, 1]);
        assert_eq!(encoding.seq_len().unwrap(), [6]);
    }

    #[test]
    fn test_empty_pair() {
        let encoding = post_tokenizer::<i64>(PaddingSite::Right)
            .post_tokenize(vec![7], Some(vec![]), &EncodeOptions::default())
            .unwrap();
        assert_eq!(encoding.input_ids(), [2, 7, 3]);
    }

    #[test]
    fn test_pad_right() {
        let options = EncodeOptions::default()
            .with_max_seq_len(6)
            .with_padding(true)
            .with_attention_mask(true)
            .with_special_tokens_mask(true)
            .with_position_ids(true)
            .with_length(true);
        let encoding = post_tokenizer::<i64>(PaddingSite::Right)
            .post_tokenize(vec![7, 8], None, &options)
            .unwrap();
        assert_eq!(encoding.input_ids(), [2, 7, 8, 3, 0, 0]);
        assert_eq!(encoding.token_type_ids().unwrap(), [0, 0, 0, 0, 0, 0]);
        assert_eq!(encoding.attention_mask().unwrap(), [1, 1, 1, 1, 0, 0]);
        assert_eq!(encoding.special_tokens_mask().unwrap(), [1, 0, 0, 1, 1, 1]);
        assert_eq!(encoding.position_ids().unwrap(), [0, 1, 2, 3, 4, 5]);
        assert_eq!(encoding.seq_len().unwrap(), [4]);
    }

    #[test]
    fn test_pad_left() {
        let options = EncodeOptions::default()
            .with_max_seq_len(6)
            .with_padding(true)
            .with_attention_mask(true)
            .with_special_tokens_mask(true);
        let encoding = post_tokenizer::<i64>(PaddingSite::Left)
            .post_tokenize(vec![7], Some(vec![8]), &options)
            .unwrap();
        assert_eq!(encoding.input_ids(), [0, 2, 7, 3, 8, 3]);
        assert_eq!(encoding.token_type_ids().unwrap(), [0, 0, 0, 0, 1, 1]);
        assert_eq!(encoding.attention_mask().unwrap(), [0, 1, 1, 1, 1, 1]);
        assert_eq!(encoding.special_tokens_mask().unwrap(), [1, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_no_padding_without_max_seq_len() {
        let options = EncodeOptions::default()
            .with_padding(true)
            .with_attention_mask(true);
        let encoding = post_tokenizer::<i64>(PaddingSite::Right)
            .post_tokenize(vec![7, 8], None, &options)
            .unwrap();
        assert_eq!(encoding.input_ids(), [2, 7, 8, 3]);
        assert_eq!(encoding.attention_mask().unwrap(), [1, 1, 1, 1]);
    }

    #[test]
    fn test_truncate() {
        let options = EncodeOptions::default()
            .with_max_seq_len(5)
            .with_overflowing_tokens(true);
        let encoding = post_tokenizer::<i64>(PaddingSite::Right)
            .post_tokenize(vec![5, 6, 7, 8, 9], None, &options)
            .unwrap();
        assert_eq!(encoding.input_ids(), [2, 5, 6, 7, 3]);
        assert_eq!(encoding.overflowing_token_ids().unwrap(), [8, 9]);
        assert_eq!(encoding.num_truncated_tokens().unwrap(), [2]);
    }

    #[test]
    fn test_truncate_pair_with_stride() {
        let options = EncodeOptions::default()
            .with_max_seq_len(7)
            .with_truncation(TruncationStrategy::OnlySecond, 1)
            .with_overflowing_tokens(true);
        let encoding = post_tokenizer::<i64>(PaddingSite::Right)
            .post_tokenize(vec![5], Some(vec![6, 7, 8, 9, 10]), &options)
            .unwrap();
        assert_eq!(encoding.input_ids(), [2, 5, 3, 6, 7, 8, 3]);
        assert_eq!(encoding.token_type_ids().unwrap(), [0, 0, 0, 1, 1, 1, 1]);
        assert_eq!(encoding.overflowing_token_ids().unwrap(), [8, 9, 10]);
        assert_eq!(encoding.num_truncated_tokens().unwrap(), [2]);
    }

    #[test]
    fn test_truncate_without_overflow_fields() {
        let options = EncodeOptions::default().with_max_seq_len(3);
        let encoding = post_tokenizer::<i64>(PaddingSite::Right)
            .post_tokenize(vec![5, 6], None, &options)
            .unwrap();
        assert_eq!(encoding.input_ids(), [2, 5, 3]);
        assert!(encoding.overflowing_token_ids().is_none());
        assert!(encoding.num_truncated_tokens().is_none());
    }

    #[test]
    fn test_truncate_infeasible() {
        let options = EncodeOptions::default()
            .with_max_seq_len(4)
            .with_truncation(TruncationStrategy::OnlyFirst, 0);
        assert!(matches!(
            post_tokenizer::<i64>(PaddingSite::Right)
                .post_tokenize(vec![5], Some(vec![6, 7, 8]), &options)
                .unwrap_err(),
            EncodeError::Truncation(TruncationError::Infeasible { remove: 3, .. }),
        ));
    }

    #[test]
    fn test_truncate_longest_first_only_second() {
        let options = EncodeOptions::default()
            .with_max_seq_len(7)
            .with_overflowing_tokens(true);
        let encoding = post_tokenizer::<i64>(PaddingSite::Right)
            .post_tokenize(vec![5], Some(vec![6, 7, 8, 9, 10]), &options)
            .unwrap();
        assert_eq!(encoding.input_ids(), [2, 5, 3, 6, 7, 8, 3]);
        assert!(encoding.overflowing_token_ids().unwrap().is_empty());
        assert_eq!(encoding.num_truncated_tokens().unwrap(), [2]);
    }

    #[test]
    fn test_id_overflow() {
        let options = EncodeOptions::default().with_position_ids(true);
        let post_tokenizer = post_tokenizer::<u8>(PaddingSite::Right);
        assert!(post_tokenizer
            .post_tokenize(vec![5; 254], None, &options)
            .is_ok());
        assert!(matches!(
            post_tokenizer
                .post_tokenize(vec![5; 255], None, &options)
                .unwrap_err(),
            EncodeError::IdOverflow(256),
        ));
        assert!(matches!(
            post_tokenizer
                .post_tokenize(vec![5; 300], None, &EncodeOptions::default().with_length(true))
                .unwrap_err(),
            EncodeError::IdOverflow(302),
        ));
    }
}
