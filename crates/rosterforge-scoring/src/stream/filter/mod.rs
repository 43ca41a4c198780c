//! Zero-erasure filter composition for constraint streams.
//!
//! Filters are composed at compile time as nested generic types.

mod adapters;
mod composition;
mod traits;
mod wrappers;

pub use adapters::JoinerFilter;
pub use composition::{AndBiFilter, AndUniFilter};
pub use traits::{BiFilter, UniFilter};
pub use wrappers::{FnBiFilter, FnUniFilter, TrueFilter};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::joiner::less_than;

    struct Ctx {
        threshold: i32,
    }

    #[test]
    fn test_true_filter() {
        assert!(UniFilter::<(), i32>::test(&TrueFilter, &(), &42));
        assert!(BiFilter::<(), i32, &str>::test(&TrueFilter, &(), &1, &"x"));
    }

    #[test]
    fn test_fn_uni_filter_reads_solution() {
        let f = FnUniFilter::new(|c: &Ctx, x: &i32| *x > c.threshold);
        assert!(f.test(&Ctx { threshold: 10 }, &15));
        assert!(!f.test(&Ctx { threshold: 20 }, &15));
    }

    #[test]
    fn test_and_bi_filter() {
        let f1 = FnBiFilter::new(|_: &(), a: &i32, _b: &i32| *a > 0);
        let f2 = FnBiFilter::new(|_: &(), _a: &i32, b: &i32| *b > 0);
        let combined = AndBiFilter::new(f1, f2);
        assert!(combined.test(&(), &1, &2));
        assert!(!combined.test(&(), &-1, &2));
        assert!(!combined.test(&(), &1, &-2));
    }

    #[test]
    fn test_joiner_filter() {
        let f = JoinerFilter::new(less_than(|a: &i32| *a, |b: &i32| *b));
        let chained = AndBiFilter::new(TrueFilter, f);
        assert!(chained.test(&(), &1, &2));
        assert!(!chained.test(&(), &2, &2));
    }
}
