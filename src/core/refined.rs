//! Refined types for domain invariants
//!
//! Ratings are validated once at the boundary and carried as types from
//! then on, so an out-of-range impact or probability cannot reach the
//! aggregators.
//!
//! # Available Types
//!
//! - [`Rating`]: impact or probability rating (1-5)
//! - [`Progress`]: mitigation completion percentage (0-100)
//! - [`CostTier`]: mitigation cost tier (1-3)
//!
//! # Example
//!
//! ```rust
//! use riskboard::core::refined::Rating;
//!
//! let impact = Rating::new(4).unwrap();
//! assert_eq!(impact.get(), 4);
//! assert!(Rating::new(6).is_err());
//! ```

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Impact or probability rating in `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw rating, naming the failing field as "rating".
    pub fn new(value: i64) -> Result<Self> {
        Self::for_field("rating", value)
    }

    /// Validate a raw rating, naming the field in the error.
    pub fn for_field(field: &'static str, value: i64) -> Result<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::invalid_rating(field, value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every rating from 1 to 5, ascending.
    pub fn all() -> impl DoubleEndedIterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }
}

impl TryFrom<i64> for Rating {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mitigation completion in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Progress(u8);

impl Progress {
    pub fn new(value: i64) -> Result<Self> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::out_of_range("progress", value, "0..=100"))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_complete(self) -> bool {
        self.0 == 100
    }
}

impl TryFrom<i64> for Progress {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

/// Mitigation cost tier in `[1, 3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct CostTier(u8);

impl CostTier {
    pub fn new(value: i64) -> Result<Self> {
        if (1..=3).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::out_of_range("cost", value, "1..=3"))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for CostTier {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<i64> for CostTier {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CostTier> for u8 {
    fn from(cost: CostTier) -> Self {
        cost.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert!(Rating::new(6).is_err());
        assert!(Rating::new(-3).is_err());
    }

    #[test]
    fn test_rating_error_names_field() {
        let err = Rating::for_field("impact", 9).unwrap_err();
        assert!(err.to_string().contains("impact"));
    }

    #[test]
    fn test_rating_all_covers_domain() {
        let all: Vec<u8> = Rating::all().map(Rating::get).collect();
        assert_eq!(all, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rating_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("3").is_ok());
        assert!(serde_json::from_str::<Rating>("8").is_err());
    }

    #[test]
    fn test_progress_bounds() {
        assert!(Progress::new(0).is_ok());
        assert!(Progress::new(100).unwrap().is_complete());
        assert!(Progress::new(101).is_err());
    }

    #[test]
    fn test_cost_tier_bounds() {
        assert!(CostTier::new(0).is_err());
        assert_eq!(CostTier::new(3).unwrap().get(), 3);
        assert!(CostTier::new(4).is_err());
    }
}
