//! A single-level score.

use std::fmt;
use std::str::FromStr;

use super::traits::{Score, ScoreParseError};

/// A score with one integer level and no hard component.
///
/// The scoring engine's own tests use it where only one level matters.
///
/// ```
/// use rosterforge_core::{Score, SimpleScore};
///
/// assert!(SimpleScore::of(-3) > SimpleScore::of(-5));
/// assert_eq!(SimpleScore::of(-5).scale(4), SimpleScore::of(-20));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct SimpleScore {
    score: i64,
}

impl SimpleScore {
    pub const ZERO: SimpleScore = SimpleScore { score: 0 };
    pub const ONE: SimpleScore = SimpleScore { score: 1 };

    #[inline]
    pub const fn of(score: i64) -> Self {
        SimpleScore { score }
    }

    #[inline]
    pub const fn score(&self) -> i64 {
        self.score
    }
}

impl Score for SimpleScore {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn scale(&self, magnitude: i64) -> Self {
        Self::of(self.score * magnitude)
    }

    fn has_hard_component(&self) -> bool {
        false
    }

    fn is_feasible(&self) -> bool {
        self.score >= 0
    }
}

impl std::ops::Add for SimpleScore {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::of(self.score + rhs.score)
    }
}

impl std::ops::Sub for SimpleScore {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::of(self.score - rhs.score)
    }
}

impl std::ops::Neg for SimpleScore {
    type Output = Self;

    fn neg(self) -> Self {
        Self::of(-self.score)
    }
}

impl std::iter::Sum for SimpleScore {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self::of(iter.map(|s| s.score).sum())
    }
}

impl fmt::Debug for SimpleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SimpleScore({})", self.score)
    }
}

impl fmt::Display for SimpleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.score)
    }
}

impl FromStr for SimpleScore {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self::of)
            .map_err(|e| ScoreParseError::new(format!("'{}' is not a SimpleScore: {e}", s.trim())))
    }
}

impl_score_serde!(SimpleScore);

impl From<i64> for SimpleScore {
    fn from(score: i64) -> Self {
        Self::of(score)
    }
}
