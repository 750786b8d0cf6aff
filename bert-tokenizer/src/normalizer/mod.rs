//! Unicode character classification and normalization.
//!
//! Everything in here works on unicode scalar values, the conversion from and to utf-8 happens in
//! the [`codec`] at the edges of the tokenizer.

pub mod codec;

use unicode_categories::UnicodeCategories;
use unicode_normalization_alignments::UnicodeNormalization;

/// The characters which are stripped from the edges of a text and which separate words.
pub(crate) const STRIP_CHARS: [char; 6] = [' ', '\t', '\n', '\r', '\u{b}', '\u{c}'];

/// Checks whether the character is a control character.
///
/// Tab, newline and carriage return are technically control characters but they are counted as
/// whitespace instead.
pub fn is_control(c: char) -> bool {
    if c == '\t' || c == '\n' || c == '\r' {
        false
    } else {
        c.is_other_control() || c.is_other_format()
    }
}

/// Checks whether the character is a whitespace character.
pub fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r' || c.is_separator_space()
}

/// Checks whether the character is a punctuation character.
///
/// All non-alphanumeric ascii characters are treated as punctuation, even those which aren't in
/// the unicode punctuation categories like `$` or `^`.
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || c.is_punctuation()
}

/// Checks whether the character is chinese.
///
/// This defines a "chinese character" as anything in the CJK Unicode block:
/// <https://en.wikipedia.org/wiki/CJK_Unified_Ideographs_(Unicode_block)>
///
/// Note that the CJK Unicode block is NOT all Japanese and Korean characters, despite its name.
/// The modern Korean Hangul alphabet is a different block, as is Japanese Hiragana and Katakana.
/// Those alphabets are used to write space-separated words, so they are not treated specially and
/// handled like for all of the other languages.
pub fn is_chinese(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{20000}'..='\u{2A6DF}'
            | '\u{2A700}'..='\u{2B73F}'
            | '\u{2B740}'..='\u{2B81F}'
            | '\u{2B820}'..='\u{2CEAF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{2F800}'..='\u{2FA1F}'
    )
}

/// Checks whether the character belongs to the strip set.
pub(crate) fn is_strip_char(c: char) -> bool {
    STRIP_CHARS.contains(&c)
}

/// Removes leading and trailing characters of the strip set.
pub fn strip_whitespace(text: &[char]) -> &[char] {
    let start = text
        .iter()
        .position(|&c| !is_strip_char(c))
        .unwrap_or(text.len());
    let end = text
        .iter()
        .rposition(|&c| !is_strip_char(c))
        .map_or(start, |idx| idx + 1);
    &text[start..end]
}

/// Lowercases each character.
///
/// The mapping is one-to-one, characters with a multi-character lowercase form are mapped to the
/// first character of that form.
pub fn to_lower(text: &[char]) -> Vec<char> {
    text.iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect()
}

/// Decomposes the characters canonically (unicode normalization form D).
pub fn decompose_nfd(text: &[char]) -> Vec<char> {
    let text = text.iter().collect::<String>();
    text.as_str().nfd().map(|(c, _)| c).collect()
}

/// Removes the accents from the characters.
///
/// The characters are decomposed first and all the non-spacing marks are dropped afterwards.
pub fn strip_accents(text: &[char]) -> Vec<char> {
    decompose_nfd(text)
        .into_iter()
        .filter(|c| !c.is_mark_nonspacing())
        .collect()
}

/// Removes invalid and control characters and replaces all sorts of whitespace by ` `.
pub(crate) fn clean_text(text: &[char]) -> Vec<char> {
    text.iter()
        .filter(|&&c| c != '\0' && c != '\u{fffd}' && !is_control(c))
        .map(|&c| if is_whitespace(c) { ' ' } else { c })
        .collect()
}

/// Puts spaces around chinese characters so they get split.
pub(crate) fn pad_chinese_chars(text: &[char]) -> Vec<char> {
    let mut padded = Vec::with_capacity(text.len());
    for &c in text {
        if is_chinese(c) {
            padded.extend_from_slice(&[' ', c, ' ']);
        } else {
            padded.push(c);
        }
    }
    padded
}
