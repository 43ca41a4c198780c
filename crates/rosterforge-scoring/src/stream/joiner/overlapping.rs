//! Interval overlap joiner.

use std::marker::PhantomData;

use super::Joiner;

/// Joins when two half-open intervals intersect:
/// `start_a < end_b && start_b < end_a`.
///
/// Intervals that only touch at an endpoint do not overlap.
///
/// ```
/// use rosterforge_scoring::stream::joiner::{overlapping, Joiner};
///
/// struct Slot { start: i64, end: i64 }
///
/// let overlap = overlapping(
///     |a: &Slot| a.start,
///     |a: &Slot| a.end,
///     |b: &Slot| b.start,
///     |b: &Slot| b.end,
/// );
/// assert!(overlap.matches(&Slot { start: 8, end: 12 }, &Slot { start: 9, end: 17 }));
/// assert!(!overlap.matches(&Slot { start: 8, end: 12 }, &Slot { start: 12, end: 17 }));
/// ```
pub fn overlapping<A, B, T, Fsa, Fea, Fsb, Feb>(
    start_a: Fsa,
    end_a: Fea,
    start_b: Fsb,
    end_b: Feb,
) -> OverlappingJoiner<Fsa, Fea, Fsb, Feb, T>
where
    T: Ord,
    Fsa: Fn(&A) -> T + Send + Sync,
    Fea: Fn(&A) -> T + Send + Sync,
    Fsb: Fn(&B) -> T + Send + Sync,
    Feb: Fn(&B) -> T + Send + Sync,
{
    OverlappingJoiner {
        start_a,
        end_a,
        start_b,
        end_b,
        _phantom: PhantomData,
    }
}

/// Matches when two half-open intervals intersect.
pub struct OverlappingJoiner<Fsa, Fea, Fsb, Feb, T> {
    start_a: Fsa,
    end_a: Fea,
    start_b: Fsb,
    end_b: Feb,
    _phantom: PhantomData<fn() -> T>,
}

impl<A, B, T, Fsa, Fea, Fsb, Feb> Joiner<A, B> for OverlappingJoiner<Fsa, Fea, Fsb, Feb, T>
where
    T: Ord,
    Fsa: Fn(&A) -> T + Send + Sync,
    Fea: Fn(&A) -> T + Send + Sync,
    Fsb: Fn(&B) -> T + Send + Sync,
    Feb: Fn(&B) -> T + Send + Sync,
{
    #[inline]
    fn matches(&self, a: &A, b: &B) -> bool {
        (self.start_a)(a) < (self.end_b)(b) && (self.start_b)(b) < (self.end_a)(a)
    }
}
