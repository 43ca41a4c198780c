//! The three-level roster score.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::traits::{parse_level, Score, ScoreParseError};

/// A score with hard, medium and soft levels.
///
/// Hard levels carry labour-law and availability violations, the medium
/// level carries unassigned shifts and the soft level carries preferences.
/// Any one hard point outweighs every medium point, and any one medium
/// point outweighs every soft point.
///
/// # Examples
///
/// ```
/// use rosterforge_core::HardMediumSoftScore;
///
/// let fewer_unassigned = HardMediumSoftScore::of(0, -5, -200);
/// let better_preferences = HardMediumSoftScore::of(0, -10, -100);
/// assert!(fewer_unassigned > better_preferences);
///
/// let parsed: HardMediumSoftScore = "-1hard/0medium/30soft".parse().unwrap();
/// assert_eq!(parsed, HardMediumSoftScore::of(-1, 0, 30));
/// assert_eq!(parsed.to_string(), "-1hard/0medium/30soft");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HardMediumSoftScore {
    hard: i64,
    medium: i64,
    soft: i64,
}

impl HardMediumSoftScore {
    pub const ZERO: HardMediumSoftScore = HardMediumSoftScore::of(0, 0, 0);
    pub const ONE_HARD: HardMediumSoftScore = HardMediumSoftScore::of_hard(1);
    pub const ONE_MEDIUM: HardMediumSoftScore = HardMediumSoftScore::of_medium(1);
    pub const ONE_SOFT: HardMediumSoftScore = HardMediumSoftScore::of_soft(1);

    #[inline]
    pub const fn of(hard: i64, medium: i64, soft: i64) -> Self {
        HardMediumSoftScore { hard, medium, soft }
    }

    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        Self::of(hard, 0, 0)
    }

    #[inline]
    pub const fn of_medium(medium: i64) -> Self {
        Self::of(0, medium, 0)
    }

    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        Self::of(0, 0, soft)
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn medium(&self) -> i64 {
        self.medium
    }

    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }
}

impl Score for HardMediumSoftScore {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn scale(&self, magnitude: i64) -> Self {
        Self::of(
            self.hard * magnitude,
            self.medium * magnitude,
            self.soft * magnitude,
        )
    }

    #[inline]
    fn has_hard_component(&self) -> bool {
        self.hard != 0
    }

    #[inline]
    fn is_feasible(&self) -> bool {
        self.hard >= 0
    }
}

impl Ord for HardMediumSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.hard, self.medium, self.soft).cmp(&(other.hard, other.medium, other.soft))
    }
}

impl_score_ops!(HardMediumSoftScore { hard, medium, soft } => of);

impl fmt::Debug for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardMediumSoftScore({self})")
    }
}

impl fmt::Display for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}medium/{}soft", self.hard, self.medium, self.soft)
    }
}

impl FromStr for HardMediumSoftScore {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        let [hard, medium, soft] = parts[..] else {
            return Err(ScoreParseError::new(format!(
                "'{}' is not a HardMediumSoftScore: expected 3 parts separated by '/'",
                s.trim()
            )));
        };
        Ok(Self::of(
            parse_level(hard, "hard")?,
            parse_level(medium, "medium")?,
            parse_level(soft, "soft")?,
        ))
    }
}

impl_score_serde!(HardMediumSoftScore);
