//! Sum collector.

use std::marker::PhantomData;
use std::ops::{AddAssign, SubAssign};

use super::{Accumulator, UniCollector};

/// Sums a value extracted from every fact of a group.
///
/// ```
/// use rosterforge_scoring::stream::collector::{sum, Accumulator, UniCollector};
///
/// struct Shift { seconds: i64 }
///
/// let collector = sum(|s: &Shift| s.seconds);
/// let mut acc = collector.create_accumulator();
///
/// acc.accumulate(&collector.extract(&Shift { seconds: 18_000 }));
/// acc.accumulate(&collector.extract(&Shift { seconds: 14_400 }));
/// assert_eq!(acc.finish(), 32_400);
///
/// acc.retract(&14_400);
/// assert_eq!(acc.finish(), 18_000);
/// ```
pub fn sum<A, T, F>(mapper: F) -> SumCollector<A, T, F>
where
    T: Default + Copy + AddAssign + SubAssign + Send + Sync,
    F: Fn(&A) -> T + Send + Sync,
{
    SumCollector {
        mapper,
        _phantom: PhantomData,
    }
}

/// Collector created by [`sum()`].
pub struct SumCollector<A, T, F> {
    mapper: F,
    _phantom: PhantomData<fn(&A) -> T>,
}

impl<A, T, F> UniCollector<A> for SumCollector<A, T, F>
where
    T: Default + Copy + AddAssign + SubAssign + Send + Sync,
    F: Fn(&A) -> T + Send + Sync,
{
    type Value = T;
    type Result = T;
    type Accumulator = SumAccumulator<T>;

    #[inline]
    fn extract(&self, entity: &A) -> T {
        (self.mapper)(entity)
    }

    fn create_accumulator(&self) -> Self::Accumulator {
        SumAccumulator { sum: T::default() }
    }
}

/// Running sum.
pub struct SumAccumulator<T> {
    sum: T,
}

impl<T> Accumulator<T, T> for SumAccumulator<T>
where
    T: Default + Copy + AddAssign + SubAssign + Send + Sync,
{
    #[inline]
    fn accumulate(&mut self, value: &T) {
        self.sum += *value;
    }

    #[inline]
    fn retract(&mut self, value: &T) {
        self.sum -= *value;
    }

    #[inline]
    fn finish(&self) -> T {
        self.sum
    }

    #[inline]
    fn reset(&mut self) {
        self.sum = T::default();
    }
}
