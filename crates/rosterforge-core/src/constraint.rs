//! Constraint identification types.
//!
//! Every contribution to a roster score is attributable to exactly one
//! constraint, identified by a [`ConstraintRef`].

use std::fmt;

/// Reference to a constraint for identification.
///
/// # Example
///
/// ```
/// use rosterforge_core::ConstraintRef;
///
/// let cr = ConstraintRef::new("employee-rostering", "No overlapping shifts");
/// assert_eq!(cr.full_name(), "employee-rostering/No overlapping shifts");
///
/// let simple = ConstraintRef::new("", "Assign every shift");
/// assert_eq!(simple.full_name(), "Assign every shift");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintRef {
    /// Package grouping related constraints.
    pub package: String,
    /// Name of the constraint.
    pub name: String,
}

impl ConstraintRef {
    /// Creates a new constraint reference.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Returns the fully qualified name.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

impl fmt::Display for ConstraintRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Whether a constraint subtracts from or adds to the score.
///
/// # Example
///
/// ```
/// use rosterforge_core::ImpactType;
///
/// assert_eq!(ImpactType::Penalty.sign(), -1);
/// assert_eq!(ImpactType::Reward.sign(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactType {
    /// Penalize (subtract from score).
    Penalty,
    /// Reward (add to score).
    Reward,
}

impl ImpactType {
    /// Returns -1 for penalties and 1 for rewards.
    #[inline]
    pub const fn sign(self) -> i64 {
        match self {
            ImpactType::Penalty => -1,
            ImpactType::Reward => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_ref_full_name() {
        let cr = ConstraintRef::new("employee-rostering", "Assign every shift");
        assert_eq!(cr.full_name(), "employee-rostering/Assign every shift");
        assert_eq!(cr.to_string(), cr.full_name());
    }

    #[test]
    fn test_constraint_ref_empty_package() {
        let cr = ConstraintRef::new("", "Simple");
        assert_eq!(cr.full_name(), "Simple");
    }

    #[test]
    fn test_impact_type() {
        assert_ne!(ImpactType::Penalty, ImpactType::Reward);
        assert_eq!(ImpactType::Penalty.sign() * ImpactType::Reward.sign(), -1);
    }
}
