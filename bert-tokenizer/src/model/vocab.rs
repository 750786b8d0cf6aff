use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader, Error as IoError},
    path::Path,
};

use displaydoc::Display;
use log::debug;
use num_traits::FromPrimitive;
use thiserror::Error;

/// A word piece vocabulary.
///
/// Maps each token to its id, which is the zero-based line index of the token in the vocabulary
/// file. The vocabulary is immutable once it has been parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct Vocab<N>(HashMap<String, N>);

/// The potential errors of the vocabulary.
#[derive(Debug, Display, Error)]
pub enum VocabError {
    /// Failed to read the vocabulary: {0}
    Io(#[from] IoError),
    /// Duplicate token {token:?} in line {line} of the vocabulary
    DuplicateToken { token: String, line: usize },
    /// The token id {0} doesn't fit into the numeric id type
    IdOverflow(usize),
}

impl<N> Vocab<N> {
    /// Reads the vocabulary from a file.
    pub fn from_file(vocab: impl AsRef<Path>) -> Result<Self, VocabError>
    where
        N: FromPrimitive,
    {
        Self::parse(BufReader::new(File::open(vocab)?))
    }

    /// Parses the vocabulary with one token per line.
    ///
    /// The first empty line terminates the vocabulary, everything after it is ignored. Lines end
    /// with `\n` or `\r\n`, any other carriage return is part of the token.
    ///
    /// # Errors
    /// Fails if a token occurs more than once or if the number of tokens overflows `N`.
    pub fn parse(vocab: impl BufRead) -> Result<Self, VocabError>
    where
        N: FromPrimitive,
    {
        let mut tokens = HashMap::new();
        for (idx, line) in vocab.lines().enumerate() {
            let token = line?;
            if token.is_empty() {
                debug!("vocabulary terminated by an empty line {}", idx + 1);
                break;
            }
            if tokens.contains_key(&token) {
                return Err(VocabError::DuplicateToken {
                    token,
                    line: idx + 1,
                });
            }
            let id = N::from_usize(idx).ok_or(VocabError::IdOverflow(idx))?;
            tokens.insert(token, id);
        }
        debug!("parsed vocabulary of {} tokens", tokens.len());

        Ok(Self(tokens))
    }

    /// Gets the id of the token.
    pub fn get(&self, token: &str) -> Option<&N> {
        self.0.get(token)
    }

    /// Checks whether the token is part of the vocabulary.
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains_key(token)
    }

    /// Iterates over the tokens in arbitrary order.
    pub(crate) fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Gets the number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks whether this is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S, N> std::iter::FromIterator<(S, N)> for Vocab<N>
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, N)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(token, id)| (token.into(), id))
                .collect(),
        )
    }
}
