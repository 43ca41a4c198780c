//! The `Score` trait.

use std::fmt::{self, Debug, Display};
use std::ops::{Add, Neg, Sub};

/// A totally ordered, exact score.
///
/// Higher is better. Levels are compared from the highest priority down,
/// and constraint contributions are always `weight.scale(magnitude)`.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    fn zero() -> Self;

    /// Multiplies every level by an integer match magnitude.
    fn scale(&self, magnitude: i64) -> Self;

    /// Whether the hard level is non-zero.
    ///
    /// A constraint is hard exactly when its configured weight has a hard
    /// component.
    fn has_hard_component(&self) -> bool;

    /// Whether no hard constraint is broken.
    fn is_feasible(&self) -> bool;

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// A score string that does not match `"{h}hard/{m}medium/{s}soft"` (or a
/// plain integer for [`SimpleScore`](super::SimpleScore)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreParseError {
    pub message: String,
}

impl ScoreParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ScoreParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score parse error: {}", self.message)
    }
}

impl std::error::Error for ScoreParseError {}

/// Parses one `"{value}{suffix}"` level, e.g. `"-20soft"`.
pub(crate) fn parse_level(part: &str, suffix: &str) -> Result<i64, ScoreParseError> {
    let part = part.trim();
    let value = part
        .strip_suffix(suffix)
        .ok_or_else(|| ScoreParseError::new(format!("level '{part}' must end with '{suffix}'")))?;
    value
        .parse()
        .map_err(|e| ScoreParseError::new(format!("invalid {suffix} level '{value}': {e}")))
}
