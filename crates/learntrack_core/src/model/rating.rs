//! Indicator rating value.
//!
//! # Responsibility
//! - Separate "not evaluated yet" from an actual 1..=5 rating.
//! - Keep the `0 = unrated` wire encoding at the serialization edge only.
//!
//! # Invariants
//! - A `Stars` value is always within `1..=5`.
//! - Only `Rated` values ever take part in averaging.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

/// Rejected rating input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingError {
    /// Value outside `0..=5` (where `0` means unrated).
    InvalidRating(i64),
}

impl Display for RatingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRating(value) => {
                write!(f, "invalid rating {value}; expected 0 (unrated) or 1..=5")
            }
        }
    }
}

impl Error for RatingError {}

/// A validated 1..=5 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stars(u8);

impl Stars {
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (MIN_STARS..=MAX_STARS).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::InvalidRating(i64::from(value)))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Rating of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum Rating {
    /// Not evaluated yet. Serialized as `0`.
    #[default]
    Unrated,
    Rated(Stars),
}

impl Rating {
    /// Parses the external integer encoding (`0` = unrated).
    ///
    /// # Errors
    /// - `InvalidRating` for anything outside `0..=5`.
    pub fn from_value(value: i64) -> Result<Self, RatingError> {
        match value {
            0 => Ok(Self::Unrated),
            1..=5 => Ok(Self::Rated(Stars(value as u8))),
            other => Err(RatingError::InvalidRating(other)),
        }
    }

    /// External integer encoding.
    pub fn value(self) -> u8 {
        match self {
            Self::Unrated => 0,
            Self::Rated(stars) => stars.get(),
        }
    }

    pub fn stars(self) -> Option<Stars> {
        match self {
            Self::Unrated => None,
            Self::Rated(stars) => Some(stars),
        }
    }

    pub fn is_rated(self) -> bool {
        matches!(self, Self::Rated(_))
    }

    /// Applies a rating click: choosing the value already held clears it.
    pub fn toggled(self, stars: Stars) -> Self {
        match self {
            Self::Rated(current) if current == stars => Self::Unrated,
            _ => Self::Rated(stars),
        }
    }
}

impl From<Stars> for Rating {
    fn from(value: Stars) -> Self {
        Self::Rated(value)
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.value()
    }
}
