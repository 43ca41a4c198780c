//! Tests for the fluent stream API.

use rosterforge_core::score::{HardMediumSoftScore, Score, SimpleScore};

use crate::api::constraint_set::{ConstraintSet, IncrementalConstraint};
use crate::constraint::PairMode;

use super::collector::{count, sum};
use super::joiner::{equal, equal_bi, less_than};
use super::ConstraintFactory;

#[derive(Clone, Debug)]
struct Shift {
    employee: Option<usize>,
    day: u32,
    start: i64,
    end: i64,
}

#[derive(Clone, Debug)]
struct Leave {
    employee: usize,
    day: u32,
}

struct Roster {
    shifts: Vec<Shift>,
    leaves: Vec<Leave>,
    daily_cap: i64,
}

fn shifts(r: &Roster) -> &[Shift] {
    r.shifts.as_slice()
}

fn leaves(r: &Roster) -> &[Leave] {
    r.leaves.as_slice()
}

fn shift(employee: Option<usize>, day: u32, start: i64, end: i64) -> Shift {
    Shift {
        employee,
        day,
        start,
        end,
    }
}

fn roster() -> Roster {
    Roster {
        shifts: vec![
            shift(Some(0), 1, 0, 300),
            shift(Some(0), 1, 300, 600),
            shift(Some(1), 1, 0, 480),
            shift(None, 2, 0, 480),
        ],
        leaves: vec![Leave { employee: 1, day: 1 }, Leave { employee: 0, day: 3 }],
        daily_cap: 480,
    }
}

#[test]
fn test_filters_accumulate() {
    let constraint = ConstraintFactory::<Roster, SimpleScore>::new()
        .for_each(0, shifts)
        .filter(|s: &Shift| s.employee.is_some())
        .filter(|s: &Shift| s.day == 1)
        .penalize(SimpleScore::of(1))
        .as_constraint("Day one shifts");

    assert_eq!(constraint.evaluate(&roster()), SimpleScore::of(-3));
}

#[test]
fn test_filter_with_solution_reads_roster() {
    let constraint = ConstraintFactory::<Roster, SimpleScore>::new()
        .for_each(0, shifts)
        .filter_with_solution(|r: &Roster, s: &Shift| s.end - s.start >= r.daily_cap)
        .penalize(SimpleScore::of(1))
        .as_constraint("Long shifts");

    assert_eq!(constraint.match_count(&roster()), 2);
}

#[test]
fn test_ordered_self_join_with_comparison() {
    let constraint = ConstraintFactory::<Roster, SimpleScore>::new()
        .for_each(0, shifts)
        .filter(|s: &Shift| s.employee.is_some())
        .join_self(equal(|s: &Shift| s.employee), PairMode::Ordered)
        .and_join(less_than(|a: &Shift| a.start, |b: &Shift| b.start))
        .penalize_with(SimpleScore::of(1), |_: &Shift, b: &Shift| b.end - b.start)
        .as_constraint("Later shift");

    // Only (first, second) of employee 0 satisfies start < start.
    assert_eq!(constraint.evaluate(&roster()), SimpleScore::of(-300));
}

#[test]
fn test_cross_join_both_sides_filtered() {
    let constraint = ConstraintFactory::<Roster, HardMediumSoftScore>::new()
        .for_each(1, leaves)
        .join(
            0,
            shifts,
            equal_bi(|l: &Leave| Some(l.employee), |s: &Shift| s.employee),
        )
        .filter(|l: &Leave, s: &Shift| l.day == s.day)
        .penalize_with(HardMediumSoftScore::ONE_HARD, |_: &Leave, s: &Shift| {
            s.end - s.start
        })
        .as_constraint("Working on leave");

    let roster = roster();
    assert!(constraint.is_hard());
    assert_eq!(constraint.evaluate(&roster), HardMediumSoftScore::of_hard(-480));
    assert_eq!(constraint.get_matches(&roster).len(), 1);
}

#[test]
fn test_group_by_sum_over_cap() {
    let constraint = ConstraintFactory::<Roster, HardMediumSoftScore>::new()
        .for_each(0, shifts)
        .filter(|s: &Shift| s.employee.is_some())
        .group_by(|s: &Shift| (s.employee, s.day), sum(|s: &Shift| s.end - s.start))
        .filter(|r: &Roster, _: &(Option<usize>, u32), total: &i64| *total > r.daily_cap)
        .penalize_with(
            HardMediumSoftScore::ONE_HARD,
            |r: &Roster, _: &(Option<usize>, u32), total: &i64| total - r.daily_cap,
        )
        .as_constraint("Daily minutes");

    assert_eq!(constraint.evaluate(&roster()), HardMediumSoftScore::of_hard(-120));
}

#[test]
fn test_grouped_reward_and_package() {
    let constraint = ConstraintFactory::<Roster, SimpleScore>::new()
        .for_each(0, shifts)
        .group_by(|s: &Shift| s.day, count())
        .reward(SimpleScore::of(2))
        .in_package("roster")
        .as_constraint("Busy days");

    assert_eq!(constraint.evaluate(&roster()), SimpleScore::of(4));
    assert_eq!(constraint.constraint_ref().full_name(), "roster/Busy days");
}

#[test]
fn test_soft_weight_is_not_hard() {
    let builder = ConstraintFactory::<Roster, HardMediumSoftScore>::new()
        .for_each(0, shifts)
        .reward(HardMediumSoftScore::ONE_SOFT);
    assert!(!builder.weight().is_zero());
    let constraint = builder.as_constraint("Any shift");
    assert!(!constraint.is_hard());
}

#[test]
fn test_tuple_of_stream_constraints() {
    let factory = ConstraintFactory::<Roster, SimpleScore>::new();
    let mut constraints = (
        factory
            .for_each(0, shifts)
            .filter(|s: &Shift| s.employee.is_none())
            .penalize(SimpleScore::of(10))
            .as_constraint("Unassigned"),
        factory
            .for_each(1, leaves)
            .penalize(SimpleScore::of(1))
            .as_constraint("Leaves"),
    );

    let roster = roster();
    assert_eq!(constraints.constraint_count(), 2);
    assert_eq!(constraints.initialize_all(&roster), SimpleScore::of(-12));
    assert_eq!(constraints.evaluate_all(&roster), SimpleScore::of(-12));
}
