use std::str::FromStr;

use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The site where the padding is applied.
///
/// Defaults to [`PaddingSite::Right`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingSite {
    /// Prepends the padding in front of the values.
    Left,
    /// Appends the padding after the values.
    Right,
}

/// The potential errors of the padding.
#[derive(Debug, Display, Error, PartialEq)]
pub enum PaddingError {
    /// Unknown padding site {0:?}
    Site(String),
}

impl Default for PaddingSite {
    fn default() -> Self {
        Self::Right
    }
}

impl FromStr for PaddingSite {
    type Err = PaddingError;

    fn from_str(site: &str) -> Result<Self, Self::Err> {
        match site {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(PaddingError::Site(site.into())),
        }
    }
}

impl PaddingSite {
    /// Pads the values with the filler up to the length.
    ///
    /// Values which are already at least as long as the length are left as they are.
    pub(crate) fn pad<N>(self, values: &mut Vec<N>, len: usize, filler: N)
    where
        N: Copy,
    {
        if values.len() >= len {
            return;
        }
        let pad = len - values.len();
        match self {
            Self::Left => {
                values.splice(0..0, std::iter::repeat(filler).take(pad));
            }
            Self::Right => values.resize(len, filler),
        }
    }
}
