use crate::normalizer::{
    clean_text,
    codec::{self, CodecError},
    is_punctuation,
    is_strip_char,
    pad_chinese_chars,
    strip_accents,
    strip_whitespace,
    to_lower,
};

/// A Bert pre-tokenizer.
///
/// Splits a sequence into words and punctuation after cleaning it from control characters and
/// isolating chinese characters. The words can be lowercased and stripped of their accents.
#[derive(Clone, Copy, Debug)]
pub struct PreTokenizer {
    lowercase: bool,
    strip_accents: bool,
}

impl Default for PreTokenizer {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl PreTokenizer {
    /// Creates a pre-tokenizer.
    pub(crate) fn new(lowercase: bool, strip_accents: bool) -> Self {
        Self {
            lowercase,
            strip_accents,
        }
    }

    /// Pre-tokenizes the utf-8 encoded sequence.
    ///
    /// # Errors
    /// Fails if the sequence isn't valid utf-8.
    pub fn pre_tokenize_bytes(&self, sequence: &[u8]) -> Result<Vec<Vec<char>>, CodecError> {
        codec::decode(sequence).map(|sequence| self.pre_tokenize_chars(&sequence))
    }

    /// Pre-tokenizes the sequence.
    pub fn pre_tokenize(&self, sequence: impl AsRef<str>) -> Vec<Vec<char>> {
        let sequence = sequence.as_ref().chars().collect::<Vec<_>>();
        self.pre_tokenize_chars(&sequence)
    }

    fn pre_tokenize_chars(&self, sequence: &[char]) -> Vec<Vec<char>> {
        let sequence = pad_chinese_chars(&clean_text(sequence));
        split_whitespace(&sequence)
            .flat_map(|word| split_punctuation(&self.normalize_word(word)))
            .collect()
    }

    /// Lowercases the word and strips its accents if configured.
    fn normalize_word(&self, word: &[char]) -> Vec<char> {
        let word = if self.lowercase {
            to_lower(word)
        } else {
            word.to_vec()
        };
        if self.strip_accents {
            strip_accents(&word)
        } else {
            word
        }
    }
}

/// Splits the sequence into non-empty words separated by the strip set.
fn split_whitespace(sequence: &[char]) -> impl Iterator<Item = &[char]> {
    strip_whitespace(sequence)
        .split(|&c| is_strip_char(c))
        .filter(|word| !word.is_empty())
}

/// Splits the word into runs of non-punctuation characters and single punctuation characters.
fn split_punctuation(word: &[char]) -> Vec<Vec<char>> {
    let mut splits = Vec::<Vec<char>>::new();
    let mut start_new_word = true;
    for &c in word {
        if is_punctuation(c) {
            splits.push(vec![c]);
            start_new_word = true;
        } else {
            match splits.last_mut() {
                Some(split) if !start_new_word => split.push(c),
                _ => splits.push(vec![c]),
            }
            start_new_word = false;
        }
    }

    splits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_eq(actual: Vec<Vec<char>>, expected: &[&str]) {
        let actual = actual.iter().map(|word| codec::encode(word)).collect::<Vec<_>>();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_basic() {
        assert_eq(
            PreTokenizer::new(false, false).pre_tokenize("Hey friend!     How are you?!?"),
            &["Hey", "friend", "!", "How", "are", "you", "?", "!", "?"],
        );
    }

    #[test]
    fn test_lowercase() {
        assert_eq(
            PreTokenizer::new(true, false).pre_tokenize(" \tHeLLo!how  \n Are yoU?  "),
            &["hello", "!", "how", "are", "you", "?"],
        );
    }

    #[test]
    fn test_accents() {
        assert_eq(
            PreTokenizer::new(true, true).pre_tokenize("Héllo Ñandú"),
            &["hello", "nandu"],
        );
        assert_eq(
            PreTokenizer::new(true, false).pre_tokenize("Héllo Ñandú"),
            &["héllo", "ñandú"],
        );
        assert_eq(
            PreTokenizer::new(false, true).pre_tokenize("Héllo Ñandú"),
            &["Hello", "Nandu"],
        );
    }

    #[test]
    fn test_chinese() {
        assert_eq(
            PreTokenizer::new(true, true).pre_tokenize("我爱NLP"),
            &["我", "爱", "nlp"],
        );
        assert_eq(
            PreTokenizer::new(false, false).pre_tokenize("野口里佳 Noguchi Rika"),
            &["野", "口", "里", "佳", "Noguchi", "Rika"],
        );
    }

    #[test]
    fn test_clean() {
        assert_eq(
            PreTokenizer::new(false, false).pre_tokenize("a\u{0}b\u{fffd}\u{200b}c\u{a0}d\u{3000}e"),
            &["abc", "d", "e"],
        );
    }

    #[test]
    fn test_punctuation() {
        assert_eq(
            PreTokenizer::new(false, false).pre_tokenize("for “life-threatening storm surge”"),
            &["for", "“", "life", "-", "threatening", "storm", "surge", "”"],
        );
        assert_eq(
            PreTokenizer::new(false, false).pre_tokenize("$5.00^2"),
            &["$", "5", ".", "00", "^", "2"],
        );
    }

    #[test]
    fn test_empty() {
        assert!(PreTokenizer::default().pre_tokenize("").is_empty());
        assert!(PreTokenizer::default().pre_tokenize(" \t\n\r ").is_empty());
        assert!(PreTokenizer::default().pre_tokenize("\u{0}\u{200b}").is_empty());
    }

    #[test]
    fn test_bytes() {
        assert_eq(
            PreTokenizer::default()
                .pre_tokenize_bytes("Hello, World".as_bytes())
                .unwrap(),
            &["hello", ",", "world"],
        );
        assert!(PreTokenizer::default()
            .pre_tokenize_bytes(&[b'a', 0xc3])
            .is_err());
    }
}
