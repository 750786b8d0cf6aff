use std::{collections::BTreeMap, str::FromStr};

use displaydoc::Display;
use serde::Serialize;
use thiserror::Error;

/// The fields of an encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    InputIds,
    TokenTypeIds,
    AttentionMask,
    SpecialTokensMask,
    PositionIds,
    SeqLen,
    OverflowingTokenIds,
    NumTruncatedTokens,
}

/// Unknown encoding field {0:?}
#[derive(Debug, Display, Error, PartialEq)]
pub struct UnknownField(pub String);

impl Field {
    /// All fields in the order of their appearance in an encoding.
    pub const ALL: [Field; 8] = [
        Field::InputIds,
        Field::TokenTypeIds,
        Field::AttentionMask,
        Field::SpecialTokensMask,
        Field::PositionIds,
        Field::SeqLen,
        Field::OverflowingTokenIds,
        Field::NumTruncatedTokens,
    ];

    /// Gets the name of the field as expected by the model inputs.
    pub fn name(self) -> &'static str {
        match self {
            Self::InputIds => "input_ids",
            Self::TokenTypeIds => "token_type_ids",
            Self::AttentionMask => "attention_mask",
            Self::SpecialTokensMask => "special_tokens_mask",
            Self::PositionIds => "position_ids",
            Self::SeqLen => "seq_len",
            Self::OverflowingTokenIds => "overflowing_token_ids",
            Self::NumTruncatedTokens => "num_truncated_tokens",
        }
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.name() == name)
            .ok_or_else(|| UnknownField(name.into()))
    }
}

/// An encoded sequence or pair of sequences.
///
/// The input ids are always present, the other fields depend on the [`EncodeOptions`]. All
/// present fields except for the length and the overflow bookkeeping have the same length as the
/// input ids.
///
/// [`EncodeOptions`]: crate::EncodeOptions
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Encoding<N> {
    pub(crate) input_ids: Vec<N>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) token_type_ids: Option<Vec<N>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) attention_mask: Option<Vec<N>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) special_tokens_mask: Option<Vec<N>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) position_ids: Option<Vec<N>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) seq_len: Option<Vec<N>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) overflowing_token_ids: Option<Vec<N>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) num_truncated_tokens: Option<Vec<N>>,
}

impl<N> Encoding<N> {
    /// Creates an encoding with only the input ids.
    pub(crate) fn new(input_ids: Vec<N>) -> Self {
        Self {
            input_ids,
            token_type_ids: None,
            attention_mask: None,
            special_tokens_mask: None,
            position_ids: None,
            seq_len: None,
            overflowing_token_ids: None,
            num_truncated_tokens: None,
        }
    }

    /// Gets the number of input ids.
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    /// Checks whether this is empty.
    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// Gets the field if it is present.
    pub fn get(&self, field: Field) -> Option<&[N]> {
        match field {
            Field::InputIds => Some(self.input_ids.as_slice()),
            Field::TokenTypeIds => self.token_type_ids.as_deref(),
            Field::AttentionMask => self.attention_mask.as_deref(),
            Field::SpecialTokensMask => self.special_tokens_mask.as_deref(),
            Field::PositionIds => self.position_ids.as_deref(),
            Field::SeqLen => self.seq_len.as_deref(),
            Field::OverflowingTokenIds => self.overflowing_token_ids.as_deref(),
            Field::NumTruncatedTokens => self.num_truncated_tokens.as_deref(),
        }
    }

    /// Gets the field by its name if it is present.
    pub fn get_by_name(&self, name: &str) -> Option<&[N]> {
        name.parse().ok().and_then(|field| self.get(field))
    }

    /// Iterates over the present fields in their fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &[N])> {
        Field::ALL
            .iter()
            .filter_map(move |&field| self.get(field).map(|values| (field, values)))
    }

    /// Converts the present fields into a map keyed by their names.
    pub fn into_map(self) -> BTreeMap<&'static str, Vec<N>> {
        let fields = vec![
            (Field::InputIds, Some(self.input_ids)),
            (Field::TokenTypeIds, self.token_type_ids),
            (Field::AttentionMask, self.attention_mask),
            (Field::SpecialTokensMask, self.special_tokens_mask),
            (Field::PositionIds, self.position_ids),
            (Field::SeqLen, self.seq_len),
            (Field::OverflowingTokenIds, self.overflowing_token_ids),
            (Field::NumTruncatedTokens, self.num_truncated_tokens),
        ];
        fields
            .into_iter()
            .filter_map(|(field, values)| values.map(|values| (field.name(), values)))
            .collect()
    }

    pub fn input_ids(&self) -> &[N] {
        self.input_ids.as_slice()
    }

    pub fn token_type_ids(&self) -> Option<&[N]> {
        self.token_type_ids.as_deref()
    }

    pub fn attention_mask(&self) -> Option<&[N]> {
        self.attention_mask.as_deref()
    }

    pub fn special_tokens_mask(&self) -> Option<&[N]> {
        self.special_tokens_mask.as_deref()
    }

    pub fn position_ids(&self) -> Option<&[N]> {
        self.position_ids.as_deref()
    }

    pub fn seq_len(&self) -> Option<&[N]> {
        self.seq_len.as_deref()
    }

    pub fn overflowing_token_ids(&self) -> Option<&[N]> {
        self.overflowing_token_ids.as_deref()
    }

    pub fn num_truncated_tokens(&self) -> Option<&[N]> {
        self.num_truncated_tokens.as_deref()
    }
}
