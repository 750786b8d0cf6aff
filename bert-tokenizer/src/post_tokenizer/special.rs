use std::iter::once;

use displaydoc::Display;
use num_traits::Num;
use thiserror::Error;

use crate::{model::vocab::Vocab, SmallString};

/// The kinds of special tokens.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum SpecialToken {
    /// unknown
    Unk,
    /// padding
    Pad,
    /// class
    Cls,
    /// mask
    Mask,
    /// separation
    Sep,
}

/// The potential errors of the special tokens.
#[derive(Debug, Display, Error, PartialEq)]
pub enum SpecialTokensError {
    /// Missing the {kind} token {token:?} in the vocabulary
    Missing { kind: SpecialToken, token: String },
    /// A second sequence can't be given if the first sequence already contains the special tokens
    AlreadySpecial,
}

/// The special tokens and their ids.
#[derive(Clone, Debug)]
pub struct SpecialTokens<N> {
    unk: (SmallString, N),
    pad: (SmallString, N),
    cls: (SmallString, N),
    mask: (SmallString, N),
    sep: (SmallString, N),
}

impl<N> SpecialTokens<N>
where
    N: Copy,
{
    /// Resolves the ids of the special tokens.
    ///
    /// # Errors
    /// Fails if any of the tokens isn't part of the vocabulary.
    pub(crate) fn new(
        vocab: &Vocab<N>,
        unk: &str,
        pad: &str,
        cls: &str,
        mask: &str,
        sep: &str,
    ) -> Result<Self, SpecialTokensError> {
        let resolve = |kind, token: &str| {
            vocab
                .get(token)
                .map(|id| (SmallString::from(token), *id))
                .ok_or_else(|| SpecialTokensError::Missing {
                    kind,
                    token: token.into(),
                })
        };

        Ok(Self {
            unk: resolve(SpecialToken::Unk, unk)?,
            pad: resolve(SpecialToken::Pad, pad)?,
            cls: resolve(SpecialToken::Cls, cls)?,
            mask: resolve(SpecialToken::Mask, mask)?,
            sep: resolve(SpecialToken::Sep, sep)?,
        })
    }

    /// Gets the token of the kind.
    pub fn token(&self, kind: SpecialToken) -> &str {
        self.entry(kind).0.as_str()
    }

    /// Gets the id of the kind.
    pub fn id(&self, kind: SpecialToken) -> N {
        self.entry(kind).1
    }

    fn entry(&self, kind: SpecialToken) -> &(SmallString, N) {
        match kind {
            SpecialToken::Unk => &self.unk,
            SpecialToken::Pad => &self.pad,
            SpecialToken::Cls => &self.cls,
            SpecialToken::Mask => &self.mask,
            SpecialToken::Sep => &self.sep,
        }
    }

    /// Gets the number of special tokens which wrap a single sequence or a pair of sequences.
    pub fn num_special_tokens_to_add(pair: bool) -> usize {
        if pair {
            3
        } else {
            2
        }
    }

    /// Wraps the sequences as `[CLS] ids [SEP]` or `[CLS] ids [SEP] pair_ids [SEP]`.
    ///
    /// An empty second sequence is treated as no second sequence.
    pub fn build_inputs_with_special_tokens(&self, ids: &[N], pair_ids: Option<&[N]>) -> Vec<N> {
        let pair_ids = non_empty(pair_ids);
        let (cls, sep) = (self.cls.1, self.sep.1);
        let mut inputs = Vec::with_capacity(
            ids.len()
                + pair_ids.map_or(0, <[N]>::len)
                + Self::num_special_tokens_to_add(pair_ids.is_some()),
        );
        inputs.push(cls);
        inputs.extend_from_slice(ids);
        inputs.push(sep);
        if let Some(pair_ids) = pair_ids {
            inputs.extend_from_slice(pair_ids);
            inputs.push(sep);
        }

        inputs
    }

    /// Creates the token type ids, zeros for `[CLS] ids [SEP]` and ones for `pair_ids [SEP]`.
    pub fn create_token_type_ids(ids: &[N], pair_ids: Option<&[N]>) -> Vec<N>
    where
        N: Num,
    {
        let mut type_ids = vec![N::zero(); ids.len() + 2];
        if let Some(pair_ids) = non_empty(pair_ids) {
            type_ids.extend((0..=pair_ids.len()).map(|_| N::one()));
        }

        type_ids
    }

    /// Creates the mask of the special tokens with ones at the special token positions.
    ///
    /// If the sequence already contains special tokens, then each id is checked against the ids
    /// of all special tokens. Otherwise the positions are the ones where special tokens would be
    /// added by [`build_inputs_with_special_tokens()`].
    ///
    /// # Errors
    /// Fails if the sequence already contains special tokens and a non-empty second sequence is
    /// given.
    ///
    /// [`build_inputs_with_special_tokens()`]: Self::build_inputs_with_special_tokens
    pub fn special_tokens_mask(
        &self,
        ids: &[N],
        pair_ids: Option<&[N]>,
        already_has_special_tokens: bool,
    ) -> Result<Vec<N>, SpecialTokensError>
    where
        N: Num,
    {
        if already_has_special_tokens {
            if pair_ids.map_or(false, |pair_ids| !pair_ids.is_empty()) {
                return Err(SpecialTokensError::AlreadySpecial);
            }
            let special_ids = [self.unk.1, self.pad.1, self.cls.1, self.mask.1, self.sep.1];
            return Ok(ids
                .iter()
                .map(|id| {
                    if special_ids.contains(id) {
                        N::one()
                    } else {
                        N::zero()
                    }
                })
                .collect());
        }

        let mut mask = vec![N::zero(); ids.len() + 2];
        mask[0] = N::one();
        mask[ids.len() + 1] = N::one();
        if let Some(pair_ids) = non_empty(pair_ids) {
            mask.extend(pair_ids.iter().map(|_| N::zero()).chain(once(N::one())));
        }

        Ok(mask)
    }
}

fn non_empty<N>(pair_ids: Option<&[N]>) -> Option<&[N]> {
    pair_ids.filter(|pair_ids| !pair_ids.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn special_tokens() -> SpecialTokens<i64> {
        let vocab = ["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "a", "b"]
            .iter()
            .enumerate()
            .map(|(idx, token)| (*token, idx as i64))
            .collect::<Vocab<i64>>();
        SpecialTokens::new(&vocab, "[UNK]", "[PAD]", "[CLS]", "[MASK]", "[SEP]").unwrap()
    }

    #[test]
    fn test_new() {
        let special_tokens = special_tokens();
        assert_eq!(special_tokens.id(SpecialToken::Pad), 0);
        assert_eq!(special_tokens.id(SpecialToken::Unk), 1);
        assert_eq!(special_tokens.id(SpecialToken::Cls), 2);
        assert_eq!(special_tokens.id(SpecialToken::Sep), 3);
        assert_eq!(special_tokens.id(SpecialToken::Mask), 4);
        assert_eq!(special_tokens.token(SpecialToken::Mask), "[MASK]");
    }

    #[test]
    fn test_new_missing() {
        let vocab = vec![("[UNK]", 0), ("[CLS]", 1), ("[SEP]", 2), ("[MASK]", 3)]
            .into_iter()
            .collect::<Vocab<u32>>();
        assert_eq!(
            SpecialTokens::new(&vocab, "[UNK]", "[PAD]", "[CLS]", "[MASK]", "[SEP]").unwrap_err(),
            SpecialTokensError::Missing {
                kind: SpecialToken::Pad,
                token: "[PAD]".into(),
            },
        );
    }

    #[test]
    fn test_build_inputs() {
        let special_tokens = special_tokens();
        assert_eq!(
            special_tokens.build_inputs_with_special_tokens(&[5, 6], None),
            [2, 5, 6, 3],
        );
        assert_eq!(
            special_tokens.build_inputs_with_special_tokens(&[5], Some(&[6, 6])),
            [2, 5, 3, 6, 6, 3],
        );
        assert_eq!(
            special_tokens.build_inputs_with_special_tokens(&[], None),
            [2, 3],
        );
    }

    #[test]
    fn test_empty_pair() {
        let special_tokens = special_tokens();
        assert_eq!(
            special_tokens.build_inputs_with_special_tokens(&[5], Some(&[])),
            [2, 5, 3],
        );
        assert_eq!(
            SpecialTokens::<i64>::create_token_type_ids(&[5], Some(&[])),
            [0, 0, 0],
        );
        assert_eq!(
            special_tokens
                .special_tokens_mask(&[5], Some(&[]), false)
                .unwrap(),
            [1, 0, 1],
        );
    }

    #[test]
    fn test_num_special_tokens() {
        assert_eq!(SpecialTokens::<i64>::num_special_tokens_to_add(false), 2);
        assert_eq!(SpecialTokens::<i64>::num_special_tokens_to_add(true), 3);
    }

    #[test]
    fn test_token_type_ids() {
        assert_eq!(
            SpecialTokens::<i64>::create_token_type_ids(&[5, 6], None),
            [0, 0, 0, 0],
        );
        assert_eq!(
            SpecialTokens::<i64>::create_token_type_ids(&[5], Some(&[6, 6])),
            [0, 0, 0, 1, 1, 1],
        );
    }

    #[test]
    fn test_special_tokens_mask() {
        let special_tokens = special_tokens();
        assert_eq!(
            special_tokens
                .special_tokens_mask(&[5, 6], None, false)
                .unwrap(),
            [1, 0, 0, 1],
        );
        assert_eq!(
            special_tokens
                .special_tokens_mask(&[5], Some(&[6, 6]), false)
                .unwrap(),
            [1, 0, 1, 0, 0, 1],
        );
    }

    #[test]
    fn test_special_tokens_mask_already_special() {
        let special_tokens = special_tokens();
        assert_eq!(
            special_tokens
                .special_tokens_mask(&[2, 5, 1, 3, 0], None, true)
                .unwrap(),
            [1, 0, 1, 1, 1],
        );
        assert_eq!(
            special_tokens
                .special_tokens_mask(&[2, 5, 3], Some(&[]), true)
                .unwrap(),
            [1, 0, 1],
        );
        assert_eq!(
            special_tokens
                .special_tokens_mask(&[2, 5, 3], Some(&[6]), true)
                .unwrap_err(),
            SpecialTokensError::AlreadySpecial,
        );
    }
}
