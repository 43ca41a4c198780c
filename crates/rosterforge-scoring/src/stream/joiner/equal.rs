//! Equality joiners. These are the only joiners the engine indexes on.

use std::marker::PhantomData;

use super::Joiner;

/// Joins facts of one collection on an equal key (self-joins).
///
/// ```
/// use rosterforge_scoring::stream::joiner::{equal, Joiner};
///
/// struct Shift { employee: Option<usize> }
///
/// let same_employee = equal(|s: &Shift| s.employee);
/// assert!(same_employee.matches(&Shift { employee: Some(2) }, &Shift { employee: Some(2) }));
/// assert!(!same_employee.matches(&Shift { employee: Some(2) }, &Shift { employee: None }));
/// ```
pub fn equal<A, K, F>(key: F) -> EqualJoiner<F, F, K>
where
    K: PartialEq,
    F: Fn(&A) -> K + Clone + Send + Sync,
{
    EqualJoiner {
        left: key.clone(),
        right: key,
        _phantom: PhantomData,
    }
}

/// Joins facts of two collections on an equal key (cross joins).
///
/// ```
/// use rosterforge_scoring::stream::joiner::{equal_bi, Joiner};
///
/// struct Availability { employee: usize }
/// struct Shift { employee: Option<usize> }
///
/// let same_employee = equal_bi(
///     |a: &Availability| Some(a.employee),
///     |s: &Shift| s.employee,
/// );
/// assert!(same_employee.matches(&Availability { employee: 0 }, &Shift { employee: Some(0) }));
/// assert!(!same_employee.matches(&Availability { employee: 0 }, &Shift { employee: None }));
/// ```
pub fn equal_bi<A, B, K, Fa, Fb>(left: Fa, right: Fb) -> EqualJoiner<Fa, Fb, K>
where
    K: PartialEq,
    Fa: Fn(&A) -> K + Send + Sync,
    Fb: Fn(&B) -> K + Send + Sync,
{
    EqualJoiner {
        left,
        right,
        _phantom: PhantomData,
    }
}

/// Matches when both sides extract the same key.
pub struct EqualJoiner<Fa, Fb, K> {
    left: Fa,
    right: Fb,
    _phantom: PhantomData<fn() -> K>,
}

impl<Fa, Fb, K> EqualJoiner<Fa, Fb, K> {
    /// Extracts the key from a left fact.
    #[inline]
    pub fn key_a<A>(&self, a: &A) -> K
    where
        Fa: Fn(&A) -> K,
    {
        (self.left)(a)
    }

    /// Extracts the key from a right fact.
    #[inline]
    pub fn key_b<B>(&self, b: &B) -> K
    where
        Fb: Fn(&B) -> K,
    {
        (self.right)(b)
    }

    /// Splits the joiner into its key extractors, so constraints can
    /// store them as concrete types for indexing.
    #[inline]
    pub fn into_keys(self) -> (Fa, Fb) {
        (self.left, self.right)
    }
}

impl<A, B, K, Fa, Fb> Joiner<A, B> for EqualJoiner<Fa, Fb, K>
where
    K: PartialEq,
    Fa: Fn(&A) -> K + Send + Sync,
    Fb: Fn(&B) -> K + Send + Sync,
{
    #[inline]
    fn matches(&self, a: &A, b: &B) -> bool {
        (self.left)(a) == (self.right)(b)
    }
}
