use super::*;

#[derive(Debug)]
struct Interval {
    owner: Option<usize>,
    start: i64,
    end: i64,
}

fn iv(owner: Option<usize>, start: i64, end: i64) -> Interval {
    Interval { owner, start, end }
}

#[test]
fn test_equal_treats_none_as_a_key() {
    let joiner = equal(|i: &Interval| i.owner);
    assert!(joiner.matches(&iv(None, 0, 1), &iv(None, 2, 3)));
    assert!(!joiner.matches(&iv(Some(0), 0, 1), &iv(None, 2, 3)));
}

#[test]
fn test_equal_bi_keys() {
    let joiner = equal_bi(|a: &usize| Some(*a), |b: &Interval| b.owner);
    assert_eq!(joiner.key_a(&3usize), Some(3));
    assert_eq!(joiner.key_b(&iv(Some(4), 0, 1)), Some(4));
    let (ka, kb) = joiner.into_keys();
    assert_eq!(ka(&1usize), kb(&iv(Some(1), 0, 1)));
}

#[test]
fn test_comparison_joiners() {
    let lt = less_than(|a: &i64| *a, |b: &i64| *b);
    let le = less_than_or_equal(|a: &i64| *a, |b: &i64| *b);
    let gt = greater_than(|a: &i64| *a, |b: &i64| *b);
    let ge = greater_than_or_equal(|a: &i64| *a, |b: &i64| *b);

    assert!(lt.matches(&1, &2) && !lt.matches(&2, &2));
    assert!(le.matches(&2, &2) && !le.matches(&3, &2));
    assert!(gt.matches(&3, &2) && !gt.matches(&2, &2));
    assert!(ge.matches(&2, &2) && !ge.matches(&1, &2));
}

#[test]
fn test_overlapping_is_half_open() {
    let joiner = overlapping(
        |a: &Interval| a.start,
        |a: &Interval| a.end,
        |b: &Interval| b.start,
        |b: &Interval| b.end,
    );
    assert!(joiner.matches(&iv(None, 8, 12), &iv(None, 9, 17)));
    assert!(joiner.matches(&iv(None, 9, 17), &iv(None, 8, 12)));
    assert!(joiner.matches(&iv(None, 8, 17), &iv(None, 8, 17)));
    assert!(!joiner.matches(&iv(None, 8, 12), &iv(None, 12, 17)));
    assert!(!joiner.matches(&iv(None, 12, 17), &iv(None, 8, 12)));
}

#[test]
fn test_and_requires_both() {
    let joiner = equal(|i: &Interval| i.owner)
        .and(filtering(|a: &Interval, b: &Interval| a.end == b.start));
    assert!(joiner.matches(&iv(Some(1), 6, 14), &iv(Some(1), 14, 22)));
    assert!(!joiner.matches(&iv(Some(2), 6, 14), &iv(Some(1), 14, 22)));
    assert!(!joiner.matches(&iv(Some(1), 6, 14), &iv(Some(1), 15, 22)));
}
