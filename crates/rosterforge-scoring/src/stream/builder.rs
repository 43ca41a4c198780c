//! Terminal builder shared by every stream kind.
//!
//! `penalize`/`reward` on a stream produce a [`ConstraintBuilder`] that
//! remembers the impact, weight and magnitude; `as_constraint` then turns
//! it into the concrete incremental constraint for that stream kind.

use std::marker::PhantomData;

use rosterforge_core::score::Score;
use rosterforge_core::{ConstraintRef, ImpactType};

/// Finalizes a stream into a named constraint.
pub struct ConstraintBuilder<St, M, Sc>
where
    Sc: Score,
{
    pub(crate) stream: St,
    pub(crate) impact_type: ImpactType,
    pub(crate) weight: Sc,
    pub(crate) magnitude: M,
    pub(crate) package: String,
    _phantom: PhantomData<fn() -> Sc>,
}

impl<St, M, Sc: Score> ConstraintBuilder<St, M, Sc> {
    pub(crate) fn new(stream: St, impact_type: ImpactType, weight: Sc, magnitude: M) -> Self {
        Self {
            stream,
            impact_type,
            weight,
            magnitude,
            package: String::new(),
            _phantom: PhantomData,
        }
    }

    /// Sets the package of the resulting [`ConstraintRef`].
    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub(crate) fn constraint_ref(&self, name: &str) -> ConstraintRef {
        ConstraintRef::new(self.package.clone(), name)
    }

    /// Hardness follows the weight: a non-zero hard level makes it hard.
    pub(crate) fn is_hard(&self) -> bool {
        self.weight.has_hard_component()
    }

    /// Returns the impact type.
    pub fn impact_type(&self) -> ImpactType {
        self.impact_type
    }

    /// Returns the configured weight.
    pub fn weight(&self) -> Sc {
        self.weight
    }
}

impl<St, M, Sc: Score> std::fmt::Debug for ConstraintBuilder<St, M, Sc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintBuilder")
            .field("impact_type", &self.impact_type)
            .field("weight", &self.weight)
            .field("package", &self.package)
            .finish()
    }
}
