use log::trace;
use num_traits::{FromPrimitive, Num};

#[cfg(feature = "multithreaded")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    model::Model,
    normalizer::codec::CodecError,
    post_tokenizer::{
        encoding::Encoding,
        options::EncodeOptions,
        special::{SpecialToken, SpecialTokens, SpecialTokensError},
        truncation::{truncate_sequence, TruncationError, TruncationStrategy},
        EncodeError,
        PostTokenizer,
    },
    pre_tokenizer::PreTokenizer,
};

/// A Bert tokenizer.
///
/// Can be created via the [`Builder`] and consists of a Bert pre-tokenizer, a Bert word piece
/// model and a Bert post-tokenizer including truncation and padding.
///
/// [`Builder`]: crate::Builder
#[derive(Debug)]
pub struct Tokenizer<N> {
    pub(crate) pre_tokenizer: PreTokenizer,
    pub(crate) model: Model<N>,
    pub(crate) post_tokenizer: PostTokenizer<N>,
}

impl<N> Tokenizer<N>
where
    N: Num + FromPrimitive + Copy,
{
    /// Tokenizes the sequence into word pieces.
    pub fn tokenize(&self, sequence: impl AsRef<str>) -> Vec<String> {
        self.pre_tokenizer
            .pre_tokenize(sequence)
            .iter()
            .flat_map(|word| self.model.tokenize(word))
            .collect()
    }

    /// Tokenizes the utf-8 encoded sequence into word pieces.
    ///
    /// # Errors
    /// Fails if the sequence isn't valid utf-8.
    pub fn tokenize_bytes(&self, sequence: &[u8]) -> Result<Vec<String>, CodecError> {
        Ok(self
            .pre_tokenizer
            .pre_tokenize_bytes(sequence)?
            .iter()
            .flat_map(|word| self.model.tokenize(word))
            .collect())
    }

    /// Converts the tokens into their ids.
    ///
    /// Tokens which aren't part of the vocabulary are mapped to the id of the unknown token.
    pub fn convert_tokens_to_ids(&self, tokens: &[impl AsRef<str>]) -> Vec<N> {
        let unk_id = self.unk_id();
        tokens
            .iter()
            .map(|token| {
                self.model
                    .vocab
                    .get(token.as_ref())
                    .copied()
                    .unwrap_or(unk_id)
            })
            .collect()
    }

    /// Joins the tokens by a single space.
    pub fn convert_tokens_to_string(&self, tokens: &[impl AsRef<str>]) -> String {
        tokens
            .iter()
            .map(|token| token.as_ref())
            .collect::<Vec<&str>>()
            .join(" ")
    }

    /// Wraps the ids as `[CLS] ids [SEP]` or `[CLS] ids [SEP] pair_ids [SEP]`.
    pub fn build_inputs_with_special_tokens(&self, ids: &[N], pair_ids: Option<&[N]>) -> Vec<N> {
        self.special_tokens()
            .build_inputs_with_special_tokens(ids, pair_ids)
    }

    /// Gets the number of special tokens which wrap a single sequence or a pair of sequences.
    pub fn num_special_tokens_to_add(&self, pair: bool) -> usize {
        SpecialTokens::<N>::num_special_tokens_to_add(pair)
    }

    /// Creates the token type ids for the wrapped ids.
    pub fn create_token_type_ids(&self, ids: &[N], pair_ids: Option<&[N]>) -> Vec<N> {
        SpecialTokens::create_token_type_ids(ids, pair_ids)
    }

    /// Creates the mask of the special tokens for the wrapped ids.
    ///
    /// # Errors
    /// Fails if the ids already contain special tokens and a non-empty pair is given.
    pub fn special_tokens_mask(
        &self,
        ids: &[N],
        pair_ids: Option<&[N]>,
        already_has_special_tokens: bool,
    ) -> Result<Vec<N>, SpecialTokensError> {
        self.special_tokens()
            .special_tokens_mask(ids, pair_ids, already_has_special_tokens)
    }

    /// Truncates the ids by removing a number of tokens according to the strategy.
    ///
    /// Returns the overflowing tokens, see [`truncate_sequence()`] for details.
    ///
    /// [`truncate_sequence()`]: crate::truncate_sequence
    pub fn truncate_sequence(
        &self,
        ids: &mut Vec<N>,
        pair_ids: Option<&mut Vec<N>>,
        remove: usize,
        strategy: TruncationStrategy,
        stride: usize,
    ) -> Result<Vec<N>, TruncationError> {
        truncate_sequence(ids, pair_ids, remove, strategy, stride)
    }

    /// Encodes the sequence and the optional paired sequence.
    pub fn encode(
        &self,
        sequence: impl AsRef<str>,
        pair: Option<&str>,
        options: &EncodeOptions,
    ) -> Result<Encoding<N>, EncodeError> {
        let ids = self.convert_tokens_to_ids(&self.tokenize(sequence));
        let pair_ids = pair.map(|pair| self.convert_tokens_to_ids(&self.tokenize(pair)));
        self.post_tokenizer.post_tokenize(ids, pair_ids, options)
    }

    /// Encodes the utf-8 encoded sequence and the optional paired sequence.
    ///
    /// # Errors
    /// Fails if any of the sequences isn't valid utf-8 or if the encoding fails.
    pub fn encode_bytes(
        &self,
        sequence: &[u8],
        pair: Option<&[u8]>,
        options: &EncodeOptions,
    ) -> Result<Encoding<N>, EncodeError> {
        let ids = self.convert_tokens_to_ids(&self.tokenize_bytes(sequence)?);
        let pair_ids = pair
            .map(|pair| {
                self.tokenize_bytes(pair)
                    .map(|tokens| self.convert_tokens_to_ids(&tokens))
            })
            .transpose()?;
        self.post_tokenizer.post_tokenize(ids, pair_ids, options)
    }

    /// Encodes the batch of sequences and the optional batch of paired sequences.
    ///
    /// The encodings are in the same order as the sequences. An empty batch of paired sequences
    /// is treated as no pairs at all.
    ///
    /// # Errors
    /// Fails if any of the sequences fails to encode, if the batches have different sizes or if a
    /// non-zero stride is combined with pairs.
    pub fn encode_batch<S>(
        &self,
        sequences: &[S],
        pairs: Option<&[S]>,
        options: &EncodeOptions,
    ) -> Result<Vec<Encoding<N>>, EncodeError>
    where
        S: AsRef<str> + Sync,
        N: Send + Sync,
    {
        let pairs = pairs.filter(|pairs| !pairs.is_empty());
        if let Some(pairs) = pairs {
            if options.stride() > 0 {
                return Err(EncodeError::UnsupportedStride);
            }
            if pairs.len() != sequences.len() {
                return Err(EncodeError::BatchSize {
                    sequences: sequences.len(),
                    pairs: pairs.len(),
                });
            }
        }

        #[cfg(not(feature = "multithreaded"))]
        let indices = 0..sequences.len();
        #[cfg(feature = "multithreaded")]
        let indices = (0..sequences.len()).into_par_iter();

        indices
            .map(|idx| {
                let pair = pairs.map(|pairs| pairs[idx].as_ref());
                self.encode(&sequences[idx], pair, options)
                    .map_err(|error| {
                        trace!("failed to encode sequence {} of the batch: {}", idx, error);
                        error
                    })
            })
            .collect()
    }

    fn special_tokens(&self) -> &SpecialTokens<N> {
        &self.post_tokenizer.special_tokens
    }

    /// Gets the configured special token of the kind.
    pub fn special_token(&self, kind: SpecialToken) -> &str {
        self.special_tokens().token(kind)
    }

    /// Gets the id of the class token.
    pub fn cls_id(&self) -> N {
        self.special_tokens().id(SpecialToken::Cls)
    }

    /// Gets the id of the separation token.
    pub fn sep_id(&self) -> N {
        self.special_tokens().id(SpecialToken::Sep)
    }

    /// Gets the id of the padding token.
    pub fn pad_id(&self) -> N {
        self.special_tokens().id(SpecialToken::Pad)
    }

    /// Gets the id of the unknown token.
    pub fn unk_id(&self) -> N {
        self.special_tokens().id(SpecialToken::Unk)
    }

    /// Gets the id of the mask token.
    pub fn mask_id(&self) -> N {
        self.special_tokens().id(SpecialToken::Mask)
    }

    /// Gets the size of the vocabulary.
    pub fn vocab_size(&self) -> usize {
        self.model.vocab.len()
    }
}
