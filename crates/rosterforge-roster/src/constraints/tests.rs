//! Tests for the rostering constraint catalogue.

use chrono::{DateTime, FixedOffset, Weekday};
use rosterforge_config::{ConstraintKey, RosterConstraintConfiguration, YearlyOverage};
use rosterforge_core::HardMediumSoftScore;
use rosterforge_scoring::ConstraintSet;

use crate::domain::{AvailabilityState, Contract, Employee, EmployeeAvailability, Roster, Shift};
use crate::scorer::{explain_roster, RosterExplanation};

use super::{define_constraints, PACKAGE};

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn shift(id: i64, start: &str, end: &str) -> Shift {
    Shift::new(id, at(start), at(end))
}

fn availability(id: i64, employee: usize, start: &str, end: &str, state: AvailabilityState) -> EmployeeAvailability {
    EmployeeAvailability::new(id, employee, at(start), at(end), state)
}

fn amy() -> Employee {
    Employee::new(1, "Amy")
}

fn with_contract(contract: Contract) -> Roster {
    Roster::default().with_employee(amy().with_contract(contract))
}

fn explain(roster: &Roster) -> RosterExplanation {
    explain_roster(roster).unwrap()
}

#[test]
fn test_catalogue_order_and_package() {
    let constraints = define_constraints(&RosterConstraintConfiguration::default());
    let analyses = constraints.evaluate_detailed(&Roster::default());

    let names: Vec<&str> = analyses.iter().map(|a| a.name()).collect();
    let expected: Vec<&str> = ConstraintKey::ALL.iter().map(|k| k.display_name()).collect();
    assert_eq!(names, expected);
    assert!(analyses.iter().all(|a| a.constraint_ref.package == PACKAGE));
}

#[test]
fn test_hardness_follows_weight() {
    let constraints = define_constraints(&RosterConstraintConfiguration::default());
    let results = constraints.evaluate_each(&Roster::default());
    let hard: Vec<&str> = results
        .iter()
        .filter(|r| r.is_hard)
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(hard.len(), 9);
    assert!(!hard.contains(&"Assign every shift"));
}

#[test]
fn test_required_skill_missing() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_shift(
            shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z")
                .with_employee(0)
                .with_required_skill("nurse"),
        );
    let e = explain(&roster);
    assert_eq!(
        e.total(ConstraintKey::RequiredSkillForShift),
        HardMediumSoftScore::of_hard(-100 * 480)
    );
}

#[test]
fn test_no_required_skills_always_satisfied() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_employee(0));
    assert_eq!(explain(&roster).match_count(ConstraintKey::RequiredSkillForShift), 0);
}

#[test]
fn test_unassigned_shift_only_counts_as_unassigned() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_required_skill("nurse"))
        .with_shift(shift(2, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z"))
        .with_availability(availability(
            1,
            0,
            "2024-03-04T08:00:00Z",
            "2024-03-04T12:00:00Z",
            AvailabilityState::Unavailable,
        ));

    let e = explain(&roster);
    assert_eq!(e.score(), HardMediumSoftScore::of_medium(-2));
    assert_eq!(e.match_count(ConstraintKey::AssignEveryShift), 2);
    assert_eq!(e.explanation.total_match_count(), 2);
}

#[test]
fn test_unavailable_overlap() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_employee(0))
        .with_availability(availability(
            1,
            0,
            "2024-03-04T08:00:00Z",
            "2024-03-04T12:00:00Z",
            AvailabilityState::Unavailable,
        ));
    assert_eq!(
        explain(&roster).total(ConstraintKey::UnavailableEmployeeTimeSlot),
        HardMediumSoftScore::of_hard(-50 * 480)
    );
}

#[test]
fn test_unavailable_touching_does_not_overlap() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_employee(Employee::new(2, "Beth"))
        .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_employee(0))
        .with_availability(availability(
            1,
            0,
            "2024-03-04T17:00:00Z",
            "2024-03-04T20:00:00Z",
            AvailabilityState::Unavailable,
        ))
        // overlaps, but for someone else
        .with_availability(availability(
            2,
            1,
            "2024-03-04T08:00:00Z",
            "2024-03-04T12:00:00Z",
            AvailabilityState::Unavailable,
        ));
    assert_eq!(explain(&roster).match_count(ConstraintKey::UnavailableEmployeeTimeSlot), 0);
}

#[test]
fn test_overlap_counted_once_with_larger_id_second() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_shift(shift(7, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_employee(0))
        .with_shift(shift(3, "2024-03-04T09:00:00Z", "2024-03-04T12:00:00Z").with_employee(0));

    let e = explain(&roster);
    assert_eq!(e.match_count(ConstraintKey::NoOverlappingShifts), 1);
    assert_eq!(
        e.total(ConstraintKey::NoOverlappingShifts),
        HardMediumSoftScore::of_hard(-20 * 480)
    );
}

#[test]
fn test_overlap_needs_same_employee() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_employee(Employee::new(2, "Beth"))
        .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_employee(1));
    assert_eq!(explain(&roster).match_count(ConstraintKey::NoOverlappingShifts), 0);
}

#[test]
fn test_back_to_back_shifts() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T13:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-04T13:00:00Z", "2024-03-04T17:00:00Z").with_employee(0));

    let e = explain(&roster);
    assert_eq!(e.match_count(ConstraintKey::NoMoreThanTwoConsecutiveShifts), 1);
    assert_eq!(
        e.total(ConstraintKey::NoMoreThanTwoConsecutiveShifts),
        HardMediumSoftScore::of_hard(-10 * 240)
    );
    // zero gap is not a short break
    assert_eq!(
        e.match_count(ConstraintKey::BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours),
        0
    );
    assert_eq!(e.match_count(ConstraintKey::NoOverlappingShifts), 0);
}

#[test]
fn test_one_hour_break() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_shift(shift(1, "2024-03-04T10:00:00Z", "2024-03-04T18:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-04T19:00:00Z", "2024-03-04T23:00:00Z").with_employee(0));

    let e = explain(&roster);
    assert_eq!(
        e.total(ConstraintKey::BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours),
        HardMediumSoftScore::of_hard(-10 * 540)
    );
}

#[test]
fn test_break_boundary_in_whole_hours() {
    let exactly_ten = Roster::default()
        .with_employee(amy())
        .with_shift(shift(1, "2024-03-04T06:00:00Z", "2024-03-04T12:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-04T22:00:00Z", "2024-03-05T02:00:00Z").with_employee(0));
    assert_eq!(
        explain(&exactly_ten).match_count(ConstraintKey::BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours),
        0
    );

    let just_under = Roster::default()
        .with_employee(amy())
        .with_shift(shift(1, "2024-03-04T06:00:00Z", "2024-03-04T12:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-04T21:59:00Z", "2024-03-05T02:00:00Z").with_employee(0));
    assert_eq!(
        explain(&just_under).total(ConstraintKey::BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours),
        HardMediumSoftScore::of_hard(-10)
    );
}

#[test]
fn test_daily_maximum() {
    let contract = Contract {
        max_minutes_per_day: Some(480),
        ..Contract::default()
    };
    let over = with_contract(contract.clone())
        .with_shift(shift(1, "2024-03-04T06:00:00Z", "2024-03-04T11:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-04T13:00:00Z", "2024-03-04T17:00:00Z").with_employee(0));
    assert_eq!(
        explain(&over).total(ConstraintKey::DailyMinutesMustNotExceedContractMaximum),
        HardMediumSoftScore::of_hard(-60)
    );

    let under = with_contract(contract)
        .with_shift(shift(1, "2024-03-04T06:00:00Z", "2024-03-04T12:40:00Z").with_employee(0));
    assert_eq!(
        explain(&under).match_count(ConstraintKey::DailyMinutesMustNotExceedContractMaximum),
        0
    );
}

#[test]
fn test_daily_maximum_uses_local_date() {
    let contract = Contract {
        max_minutes_per_day: Some(300),
        ..Contract::default()
    };
    // same UTC date, different local dates at +02:00
    let roster = with_contract(contract)
        .with_shift(shift(1, "2024-03-04T18:00:00+02:00", "2024-03-04T21:00:00+02:00").with_employee(0))
        .with_shift(shift(2, "2024-03-05T00:00:00+02:00", "2024-03-05T03:00:00+02:00").with_employee(0));
    assert_eq!(
        explain(&roster).match_count(ConstraintKey::DailyMinutesMustNotExceedContractMaximum),
        0
    );
}

#[test]
fn test_weekly_maximum_respects_week_start_day() {
    let contract = Contract {
        max_minutes_per_week: Some(600),
        ..Contract::default()
    };
    // Sunday and the following Monday
    let roster = with_contract(contract)
        .with_shift(shift(1, "2024-03-10T09:00:00Z", "2024-03-10T17:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-11T09:00:00Z", "2024-03-11T17:00:00Z").with_employee(0));
    assert_eq!(
        explain(&roster).match_count(ConstraintKey::WeeklyMinutesMustNotExceedContractMaximum),
        0
    );

    let mut sunday_weeks = roster.clone();
    sunday_weeks.configuration = sunday_weeks.configuration.with_week_start_day(Weekday::Sun);
    assert_eq!(
        explain(&sunday_weeks).total(ConstraintKey::WeeklyMinutesMustNotExceedContractMaximum),
        HardMediumSoftScore::of_hard(-360)
    );
}

#[test]
fn test_monthly_maximum() {
    let contract = Contract {
        max_minutes_per_month: Some(500),
        ..Contract::default()
    };
    let roster = with_contract(contract)
        .with_shift(shift(1, "2024-02-29T09:00:00Z", "2024-02-29T14:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-04T09:00:00Z", "2024-03-04T14:00:00Z").with_employee(0))
        .with_shift(shift(3, "2024-03-05T09:00:00Z", "2024-03-05T14:00:00Z").with_employee(0));
    let e = explain(&roster);
    assert_eq!(e.match_count(ConstraintKey::MonthlyMinutesMustNotExceedContractMaximum), 1);
    assert_eq!(
        e.total(ConstraintKey::MonthlyMinutesMustNotExceedContractMaximum),
        HardMediumSoftScore::of_hard(-100)
    );
}

#[test]
fn test_yearly_maximum_placeholder_and_opt_in() {
    let contract = Contract {
        max_minutes_per_year: Some(500),
        ..Contract::default()
    };
    let roster = with_contract(contract)
        .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T14:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-06-04T09:00:00Z", "2024-06-04T14:00:00Z").with_employee(0));

    let e = explain(&roster);
    assert_eq!(e.match_count(ConstraintKey::YearlyMinutesMustNotExceedContractMaximum), 1);
    assert_eq!(
        e.total(ConstraintKey::YearlyMinutesMustNotExceedContractMaximum),
        HardMediumSoftScore::ZERO
    );

    let mut opted_in = roster.clone();
    opted_in.configuration = opted_in
        .configuration
        .with_yearly_overage(YearlyOverage::MinutesOverCap);
    assert_eq!(
        explain(&opted_in).total(ConstraintKey::YearlyMinutesMustNotExceedContractMaximum),
        HardMediumSoftScore::of_hard(-100)
    );
}

#[test]
fn test_assign_every_shift_is_unit_penalty() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z"))
        .with_shift(shift(2, "2024-03-05T09:00:00Z", "2024-03-05T10:00:00Z"))
        .with_shift(shift(3, "2024-03-06T09:00:00Z", "2024-03-06T17:00:00Z").with_employee(0));
    assert_eq!(
        explain(&roster).total(ConstraintKey::AssignEveryShift),
        HardMediumSoftScore::of_medium(-2)
    );
}

#[test]
fn test_week_below_yearly_cap() {
    let contract = Contract {
        max_minutes_per_year: Some(100_000),
        ..Contract::default()
    };
    let roster = with_contract(contract)
        .with_employee(Employee::new(2, "Beth"))
        .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-05T09:00:00Z", "2024-03-05T17:00:00Z").with_employee(0))
        .with_shift(shift(3, "2024-03-12T09:00:00Z", "2024-03-12T17:00:00Z").with_employee(0))
        .with_shift(shift(4, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_employee(1));

    // two weeks for Amy, nothing for Beth who has no yearly cap
    let e = explain(&roster);
    assert_eq!(e.match_count(ConstraintKey::EmployeeIsNotOriginalEmployee), 2);
    assert_eq!(
        e.total(ConstraintKey::EmployeeIsNotOriginalEmployee),
        HardMediumSoftScore::of_soft(-2 * 100_000_000_000)
    );
}

#[test]
fn test_undesired_and_desired_weigh_availability_duration() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_employee(0))
        .with_availability(availability(
            1,
            0,
            "2024-03-04T08:00:00Z",
            "2024-03-04T12:00:00Z",
            AvailabilityState::Undesired,
        ))
        .with_availability(availability(
            2,
            0,
            "2024-03-04T16:00:00Z",
            "2024-03-04T22:00:00Z",
            AvailabilityState::Desired,
        ));

    let e = explain(&roster);
    assert_eq!(
        e.total(ConstraintKey::UndesiredEmployeeTimeSlot),
        HardMediumSoftScore::of_soft(-20 * 240)
    );
    assert_eq!(
        e.total(ConstraintKey::DesiredEmployeeTimeSlot),
        HardMediumSoftScore::of_soft(10 * 360)
    );
    assert_eq!(e.score(), HardMediumSoftScore::of_soft(-4800 + 3600));
}

#[test]
fn test_rotation_employee() {
    let roster = Roster::default()
        .with_employee(amy())
        .with_employee(Employee::new(2, "Beth"))
        .with_shift(
            shift(1, "2024-03-04T09:00:00Z", "2024-03-04T13:00:00Z")
                .with_employee(0)
                .with_rotation_employee(1),
        )
        .with_shift(
            shift(2, "2024-03-05T09:00:00Z", "2024-03-05T13:00:00Z")
                .with_employee(0)
                .with_rotation_employee(0),
        )
        .with_shift(shift(3, "2024-03-06T09:00:00Z", "2024-03-06T13:00:00Z").with_employee(0))
        .with_shift(shift(4, "2024-03-07T09:00:00Z", "2024-03-07T13:00:00Z").with_rotation_employee(1));

    let e = explain(&roster);
    assert_eq!(e.match_count(ConstraintKey::EmployeeNotRotationEmployee), 1);
    assert_eq!(
        e.total(ConstraintKey::EmployeeNotRotationEmployee),
        HardMediumSoftScore::of_soft(-50 * 240)
    );
}

#[test]
fn test_zero_weight_disables_constraint() {
    let roster = Roster::new(
        RosterConstraintConfiguration::default()
            .with_weight(ConstraintKey::AssignEveryShift, HardMediumSoftScore::ZERO),
    )
    .with_employee(amy())
    .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z"));

    let e = explain(&roster);
    assert_eq!(e.match_count(ConstraintKey::AssignEveryShift), 0);
    assert_eq!(e.score(), HardMediumSoftScore::ZERO);
}

#[test]
fn test_weights_come_from_configuration() {
    let roster = Roster::new(
        RosterConstraintConfiguration::default()
            .with_weight(ConstraintKey::AssignEveryShift, HardMediumSoftScore::of_hard(3)),
    )
    .with_employee(amy())
    .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z"));

    assert_eq!(explain(&roster).score(), HardMediumSoftScore::of_hard(-3));
}
