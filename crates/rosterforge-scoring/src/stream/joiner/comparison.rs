//! Strict and non-strict ordering joiners.

use std::marker::PhantomData;

use super::Joiner;

macro_rules! comparison_joiner {
    ($(#[$meta:meta])* $fn_name:ident, $name:ident, $op:tt) => {
        $(#[$meta])*
        pub fn $fn_name<A, B, T, Fa, Fb>(left: Fa, right: Fb) -> $name<Fa, Fb, T>
        where
            T: Ord,
            Fa: Fn(&A) -> T + Send + Sync,
            Fb: Fn(&B) -> T + Send + Sync,
        {
            $name {
                left,
                right,
                _phantom: PhantomData,
            }
        }

        #[doc = concat!("Matches when `left(a) ", stringify!($op), " right(b)`.")]
        pub struct $name<Fa, Fb, T> {
            left: Fa,
            right: Fb,
            _phantom: PhantomData<fn() -> T>,
        }

        impl<A, B, T, Fa, Fb> Joiner<A, B> for $name<Fa, Fb, T>
        where
            T: Ord,
            Fa: Fn(&A) -> T + Send + Sync,
            Fb: Fn(&B) -> T + Send + Sync,
        {
            #[inline]
            fn matches(&self, a: &A, b: &B) -> bool {
                (self.left)(a) $op (self.right)(b)
            }
        }
    };
}

comparison_joiner!(
    /// Joins when `left(a) < right(b)`.
    ///
    /// ```
    /// use rosterforge_scoring::stream::joiner::{less_than, Joiner};
    ///
    /// // first shift ends strictly before the second starts
    /// let gap = less_than(|s: &(i64, i64)| s.1, |s: &(i64, i64)| s.0);
    /// assert!(gap.matches(&(6, 14), &(15, 20)));
    /// assert!(!gap.matches(&(6, 14), &(14, 20)));
    /// ```
    less_than,
    LessThanJoiner,
    <
);

comparison_joiner!(
    /// Joins when `left(a) <= right(b)`.
    less_than_or_equal,
    LessThanOrEqualJoiner,
    <=
);

comparison_joiner!(
    /// Joins when `left(a) > right(b)`.
    ///
    /// ```
    /// use rosterforge_scoring::stream::joiner::{greater_than, Joiner};
    ///
    /// let ends_after = greater_than(|a: &i64| *a, |b: &i64| *b);
    /// assert!(ends_after.matches(&10, &5));
    /// assert!(!ends_after.matches(&5, &5));
    /// ```
    greater_than,
    GreaterThanJoiner,
    >
);

comparison_joiner!(
    /// Joins when `left(a) >= right(b)`.
    greater_than_or_equal,
    GreaterThanOrEqualJoiner,
    >=
);
