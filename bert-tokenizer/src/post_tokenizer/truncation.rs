use std::str::FromStr;

use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A truncation strategy.
///
/// Defaults to [`TruncationStrategy::LongestFirst`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationStrategy {
    /// Removes tokens one by one from the end of the currently longer sequence.
    LongestFirst,
    /// Removes tokens from the end of the first sequence.
    OnlyFirst,
    /// Removes tokens from the end of the second sequence.
    OnlySecond,
}

/// The potential errors of the truncation.
#[derive(Debug, Display, Error, PartialEq)]
pub enum TruncationError {
    /// Unknown truncation strategy {0:?}
    Strategy(String),
    /// Can't remove {remove} tokens from the {sequence} sequence of length {len}
    Infeasible {
        remove: usize,
        len: usize,
        sequence: &'static str,
    },
}

impl Default for TruncationStrategy {
    fn default() -> Self {
        Self::LongestFirst
    }
}

impl FromStr for TruncationStrategy {
    type Err = TruncationError;

    fn from_str(strategy: &str) -> Result<Self, Self::Err> {
        match strategy {
            "longest_first" => Ok(Self::LongestFirst),
            "only_first" => Ok(Self::OnlyFirst),
            "only_second" => Ok(Self::OnlySecond),
            _ => Err(TruncationError::Strategy(strategy.into())),
        }
    }
}

/// Truncates the sequences by removing a number of tokens from their ends.
///
/// Returns the overflowing tokens of the truncated sequence in order, preceded by
/// up to `stride` tokens from the end of the kept part of that sequence. For the longest first
/// strategy this is the first sequence, so the overflow is empty if only the second sequence was
/// truncated.
///
/// # Errors
/// Fails without modifying the sequences if the strategy can't remove enough tokens. The only
/// first and only second strategies fail unless the respective sequence is longer than the number
/// of tokens to remove.
pub fn truncate_sequence<N>(
    ids: &mut Vec<N>,
    pair_ids: Option<&mut Vec<N>>,
    remove: usize,
    strategy: TruncationStrategy,
    stride: usize,
) -> Result<Vec<N>, TruncationError>
where
    N: Copy,
{
    if remove == 0 {
        return Ok(Vec::new());
    }

    match strategy {
        TruncationStrategy::LongestFirst => {
            let pair_len = pair_ids.as_ref().map_or(0, |pair_ids| pair_ids.len());
            if remove > ids.len() + pair_len {
                return Err(TruncationError::Infeasible {
                    remove,
                    len: ids.len() + pair_len,
                    sequence: "combined",
                });
            }

            let (mut len, mut pair_len) = (ids.len(), pair_len);
            for _ in 0..remove {
                if len >= pair_len {
                    len -= 1;
                } else {
                    pair_len -= 1;
                }
            }
            if let Some(pair_ids) = pair_ids {
                pair_ids.truncate(pair_len);
            }
            let removed = ids.len() - len;
            Ok(split_overflow(ids, removed, stride))
        }
        TruncationStrategy::OnlyFirst => {
            if ids.len() <= remove {
                return Err(TruncationError::Infeasible {
                    remove,
                    len: ids.len(),
                    sequence: "first",
                });
            }
            Ok(split_overflow(ids, remove, stride))
        }
        TruncationStrategy::OnlySecond => match pair_ids {
            Some(pair_ids) if pair_ids.len() > remove => {
                Ok(split_overflow(pair_ids, remove, stride))
            }
            pair_ids => Err(TruncationError::Infeasible {
                remove,
                len: pair_ids.map_or(0, |pair_ids| pair_ids.len()),
                sequence: "second",
            }),
        },
    }
}

/// Splits off the last `remove` tokens together with a window of `stride` preceding tokens.
fn split_overflow<N>(ids: &mut Vec<N>, remove: usize, stride: usize) -> Vec<N>
where
    N: Copy,
{
    if remove == 0 {
        return Vec::new();
    }
    let at = ids.len() - remove;
    let window = stride.min(at);
    let mut overflow = Vec::with_capacity(window + remove);
    overflow.extend_from_slice(&ids[at - window..at]);
    overflow.extend(ids.drain(at..));

    overflow
}
