use std::{
    fs::File,
    io::{BufRead, BufReader, Error as IoError},
    path::Path,
    sync::Arc,
};

use displaydoc::Display;
use log::debug;
use num_traits::FromPrimitive;
use thiserror::Error;

use crate::{
    model::{
        vocab::{Vocab, VocabError},
        Model,
        ModelError,
    },
    post_tokenizer::{
        padding::PaddingSite,
        special::{SpecialTokens, SpecialTokensError},
        PostTokenizer,
    },
    pre_tokenizer::PreTokenizer,
    tokenizer::Tokenizer,
};

/// A builder to create a [`Tokenizer`].
pub struct Builder<N> {
    vocab: Arc<Vocab<N>>,
    // pre-tokenizer
    lowercase: bool,
    accents: Option<bool>,
    // special tokens
    unk: String,
    pad: String,
    cls: String,
    mask: String,
    sep: String,
    // model
    prefix: String,
    max_chars: usize,
    // post-tokenizer
    padding_site: PaddingSite,
}

/// The potential errors of the builder.
#[derive(Debug, Display, Error)]
pub enum BuilderError {
    /// Failed to build the vocabulary: {0}
    Vocab(#[from] VocabError),
    /// Failed to build the model: {0}
    Model(#[from] ModelError),
    /// Failed to build the special tokens: {0}
    SpecialToken(#[from] SpecialTokensError),
}

impl From<IoError> for BuilderError {
    fn from(error: IoError) -> Self {
        Self::Vocab(error.into())
    }
}

impl<N> Builder<N> {
    /// Creates a [`Tokenizer`] builder from a vocabulary file.
    ///
    /// The default settings are the same as for [`from_vocab()`].
    ///
    /// [`from_vocab()`]: Self::from_vocab
    pub fn from_file(vocab: impl AsRef<Path>) -> Result<Self, BuilderError>
    where
        N: FromPrimitive,
    {
        Self::new(BufReader::new(File::open(vocab)?))
    }

    /// Creates a [`Tokenizer`] builder from a readable vocabulary.
    ///
    /// The default settings are the same as for [`from_vocab()`].
    ///
    /// [`from_vocab()`]: Self::from_vocab
    pub fn new(vocab: impl BufRead) -> Result<Self, BuilderError>
    where
        N: FromPrimitive,
    {
        Ok(Self::from_vocab(Arc::new(Vocab::parse(vocab)?)))
    }

    /// Creates a [`Tokenizer`] builder from a shared vocabulary.
    ///
    /// The default settings are:
    /// - Lowercasing and stripping of accents.
    /// - The special tokens `"[UNK]"`, `"[PAD]"`, `"[CLS]"`, `"[MASK]"` and `"[SEP]"`.
    /// - A word piece model with `"##"` continuing subword prefix and `100` maximum characters
    /// per word.
    /// - Padding on the right.
    pub fn from_vocab(vocab: Arc<Vocab<N>>) -> Self {
        Self {
            vocab,
            lowercase: true,
            accents: None,
            unk: "[UNK]".into(),
            pad: "[PAD]".into(),
            cls: "[CLS]".into(),
            mask: "[MASK]".into(),
            sep: "[SEP]".into(),
            prefix: "##".into(),
            max_chars: 100,
            padding_site: PaddingSite::default(),
        }
    }

    /// Toggles lowercasing of the words.
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Toggles stripping of accents, which otherwise follows the lowercasing.
    pub fn with_accents(mut self, strip_accents: Option<bool>) -> Self {
        self.accents = strip_accents;
        self
    }

    /// Configures the special tokens.
    pub fn with_special_tokens(
        mut self,
        unk: impl Into<String>,
        pad: impl Into<String>,
        cls: impl Into<String>,
        mask: impl Into<String>,
        sep: impl Into<String>,
    ) -> Self {
        self.unk = unk.into();
        self.pad = pad.into();
        self.cls = cls.into();
        self.mask = mask.into();
        self.sep = sep.into();
        self
    }

    /// Configures the word piece model.
    pub fn with_model(mut self, prefix: impl Into<String>, max_chars: usize) -> Self {
        self.prefix = prefix.into();
        self.max_chars = max_chars;
        self
    }

    /// Configures the padding site.
    pub fn with_padding_site(mut self, padding_site: PaddingSite) -> Self {
        self.padding_site = padding_site;
        self
    }

    /// Builds the tokenizer.
    ///
    /// # Errors
    /// Fails if any of the special tokens isn't part of the vocabulary or on invalid word piece
    /// model settings.
    pub fn build(self) -> Result<Tokenizer<N>, BuilderError>
    where
        N: Copy,
    {
        let strip_accents = self.accents.unwrap_or(self.lowercase);
        let pre_tokenizer = PreTokenizer::new(self.lowercase, strip_accents);
        let special_tokens = SpecialTokens::new(
            &self.vocab,
            &self.unk,
            &self.pad,
            &self.cls,
            &self.mask,
            &self.sep,
        )?;
        let model = Model::new(self.vocab, self.unk, self.prefix, self.max_chars)?;
        debug!(
            "built tokenizer with a vocabulary of {} tokens, lowercase {}, strip accents {}",
            model.vocab.len(),
            self.lowercase,
            strip_accents,
        );

        Ok(Tokenizer {
            pre_tokenizer,
            model,
            post_tokenizer: PostTokenizer {
                special_tokens,
                padding_site: self.padding_site,
            },
        })
    }
}
