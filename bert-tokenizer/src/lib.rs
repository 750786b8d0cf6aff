#![cfg_attr(doc, forbid(broken_intra_doc_links, private_intra_doc_links))]
//! A Bert tokenizer which converts sequences into the inputs of a Bert model.
//!
//! The tokenizer is based on a word piece vocabulary and consists of a Bert pre-tokenizer, a Bert
//! word piece model and a Bert post-tokenizer including truncation and padding. The encodings can
//! be of any numerical data type which implements [`Num`]` + `[`FromPrimitive`]` + `[`Copy`].
//!
//! The pre-tokenizer is configurable by:
//! - Lowercasing of words.
//! - Stripping of accents, which defaults to the lowercasing.
//!
//! The word piece model is configurable by:
//! - The unknown token.
//! - The continuing subword prefix.
//! - The maximum number of characters per word.
//!
//! The post-tokenizer is configurable by:
//! - The class, separation, padding and mask tokens.
//! - The padding site.
//!
//! Truncation, padding and the returned fields are chosen per call by the [`EncodeOptions`].
//!
//! ```no_run
//! use bert_tokenizer::{Builder, EncodeOptions, PaddingSite, TruncationStrategy};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tokenizer = Builder::<i64>::from_file("vocab.txt")?
//!         .with_lowercase(true)
//!         .with_special_tokens("[UNK]", "[PAD]", "[CLS]", "[MASK]", "[SEP]")
//!         .with_model("##", 100)
//!         .with_padding_site(PaddingSite::Right)
//!         .build()?;
//!
//!     let options = EncodeOptions::default()
//!         .with_max_seq_len(128)
//!         .with_padding(true)
//!         .with_truncation(TruncationStrategy::LongestFirst, 0)
//!         .with_attention_mask(true);
//!     let encoding = tokenizer.encode("This is a sequence.", None, &options)?;
//!     let encodings = tokenizer.encode_batch(&["This is a sequence.", "And another one!"], None, &options)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! [`Num`]: num_traits::Num
//! [`FromPrimitive`]: num_traits::FromPrimitive

mod builder;
mod model;
pub mod normalizer;
mod post_tokenizer;
mod pre_tokenizer;
mod tokenizer;

pub use crate::{
    builder::{Builder, BuilderError},
    model::{
        vocab::{Vocab, VocabError},
        ModelError,
    },
    normalizer::codec::CodecError,
    post_tokenizer::{
        encoding::{Encoding, Field, UnknownField},
        options::EncodeOptions,
        padding::{PaddingError, PaddingSite},
        special::{SpecialToken, SpecialTokensError},
        truncation::{truncate_sequence, TruncationError, TruncationStrategy},
        EncodeError,
    },
    tokenizer::Tokenizer,
};

/// A stack allocated string with a maximum length of eight bytes.
type SmallString = smallstr::SmallString<[u8; 8]>;
