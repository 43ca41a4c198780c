//! Count collector.

use std::marker::PhantomData;

use super::{Accumulator, UniCollector};

/// Counts the facts of a group.
///
/// ```
/// use rosterforge_scoring::stream::collector::{count, Accumulator, UniCollector};
///
/// let collector = count::<&str>();
/// let mut acc = collector.create_accumulator();
/// acc.accumulate(&collector.extract(&"early"));
/// acc.accumulate(&collector.extract(&"late"));
/// assert_eq!(acc.finish(), 2);
/// ```
pub fn count<A>() -> CountCollector<A> {
    CountCollector {
        _phantom: PhantomData,
    }
}

/// Collector created by [`count()`].
pub struct CountCollector<A> {
    _phantom: PhantomData<fn(&A)>,
}

impl<A> UniCollector<A> for CountCollector<A> {
    type Value = ();
    type Result = usize;
    type Accumulator = CountAccumulator;

    #[inline]
    fn extract(&self, _entity: &A) {}

    fn create_accumulator(&self) -> Self::Accumulator {
        CountAccumulator { count: 0 }
    }
}

/// Running count.
pub struct CountAccumulator {
    count: usize,
}

impl Accumulator<(), usize> for CountAccumulator {
    #[inline]
    fn accumulate(&mut self, _value: &()) {
        self.count += 1;
    }

    #[inline]
    fn retract(&mut self, _value: &()) {
        self.count = self.count.saturating_sub(1);
    }

    #[inline]
    fn finish(&self) -> usize {
        self.count
    }

    #[inline]
    fn reset(&mut self) {
        self.count = 0;
    }
}
