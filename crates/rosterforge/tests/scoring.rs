//! Batch scoring and explanation over whole rosters.

use rosterforge::prelude::*;
use rosterforge::RosterForgeError;
use rosterforge_test::{at, availability, random_roster, sample_roster, shift, RosterSize};

fn sample_score() -> HardMediumSoftScore {
    HardMediumSoftScore::of(-51_100, -1, -100_000_027_600)
}

#[test]
fn test_sample_roster_score() {
    assert_eq!(score_roster(&sample_roster()).unwrap(), sample_score());
}

#[test]
fn test_sample_roster_constraint_totals() {
    use ConstraintKey::*;

    let explanation = explain_roster(&sample_roster()).unwrap();
    let expected = [
        (RequiredSkillForShift, HardMediumSoftScore::of_hard(-100 * 300), 1),
        (UnavailableEmployeeTimeSlot, HardMediumSoftScore::of_hard(-50 * 240), 1),
        (NoOverlappingShifts, HardMediumSoftScore::of_hard(-20 * 240), 1),
        (NoMoreThanTwoConsecutiveShifts, HardMediumSoftScore::of_hard(-10 * 240), 1),
        (
            BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours,
            HardMediumSoftScore::of_hard(-10 * 120),
            1,
        ),
        (DailyMinutesMustNotExceedContractMaximum, HardMediumSoftScore::of_hard(-300), 2),
        (WeeklyMinutesMustNotExceedContractMaximum, HardMediumSoftScore::of_hard(-300), 1),
        (MonthlyMinutesMustNotExceedContractMaximum, HardMediumSoftScore::of_hard(-100), 1),
        (YearlyMinutesMustNotExceedContractMaximum, HardMediumSoftScore::ZERO, 1),
        (AssignEveryShift, HardMediumSoftScore::of_medium(-1), 1),
        (EmployeeIsNotOriginalEmployee, HardMediumSoftScore::of_soft(-100_000_000_000), 1),
        (UndesiredEmployeeTimeSlot, HardMediumSoftScore::of_soft(-20 * 120 * 2), 2),
        (DesiredEmployeeTimeSlot, HardMediumSoftScore::of_soft(10 * 120), 1),
        (EmployeeNotRotationEmployee, HardMediumSoftScore::of_soft(-50 * 480), 1),
    ];
    for (key, total, matches) in expected {
        assert_eq!(explanation.total(key), total, "{key}");
        assert_eq!(explanation.match_count(key), matches, "{key}");
    }
    assert_eq!(explanation.score(), sample_score());
}

#[test]
fn test_explanation_follows_catalogue_order() {
    let explanation = explain_roster(&sample_roster()).unwrap();
    let names: Vec<&str> = explanation
        .explanation
        .constraint_analyses
        .iter()
        .map(|a| a.name())
        .collect();
    let expected: Vec<&str> = ConstraintKey::ALL.iter().map(|k| k.display_name()).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_explain_totals_sum_to_score() {
    for seed in 0..10 {
        let roster = random_roster(seed, RosterSize::default());
        let explanation = explain_roster(&roster).unwrap();
        let sum = explanation
            .constraint_totals
            .values()
            .fold(HardMediumSoftScore::ZERO, |total, s| total + *s);
        assert_eq!(sum, score_roster(&roster).unwrap(), "seed {seed}");
    }
}

#[test]
fn test_scoring_is_deterministic() {
    let roster = random_roster(3, RosterSize::default());
    let first = explain_roster(&roster).unwrap();
    for _ in 0..3 {
        let again = explain_roster(&roster).unwrap();
        assert_eq!(again.score(), first.score());
        assert_eq!(again.constraint_totals, first.constraint_totals);
        for (a, b) in again
            .explanation
            .constraint_analyses
            .iter()
            .zip(&first.explanation.constraint_analyses)
        {
            assert_eq!(a.match_count(), b.match_count(), "{}", a.name());
        }
    }
}

#[test]
fn test_scoring_ignores_fact_order() {
    // shift ids stay the same, so tie breaks between pairs do not move
    let roster = random_roster(5, RosterSize::default());
    let mut reversed = roster.clone();
    reversed.shifts.reverse();
    reversed.availabilities.reverse();
    assert_eq!(
        score_roster(&reversed).unwrap(),
        score_roster(&roster).unwrap()
    );
}

#[test]
fn test_json_round_trip_keeps_score() {
    let roster = sample_roster();
    let json = roster.to_json_string().unwrap();
    let parsed = Roster::from_json_str(&json).unwrap();
    assert_eq!(score_roster(&parsed).unwrap(), sample_score());
}

#[test]
fn test_daily_cap_example() {
    let contract = Contract {
        max_minutes_per_day: Some(480),
        ..Contract::default()
    };
    let roster = Roster::default()
        .with_employee(Employee::new(1, "Amy").with_contract(contract))
        .with_shift(shift(1, "2024-03-04T00:00:00Z", "2024-03-04T05:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-04T18:00:00Z", "2024-03-04T22:00:00Z").with_employee(0));
    let explanation = explain_roster(&roster).unwrap();
    assert_eq!(
        explanation.total(ConstraintKey::DailyMinutesMustNotExceedContractMaximum),
        HardMediumSoftScore::of_hard(-60)
    );
    assert_eq!(explanation.score(), HardMediumSoftScore::of_hard(-60));
}

#[test]
fn test_short_break_example() {
    let roster = Roster::default()
        .with_employee(Employee::new(1, "Amy"))
        .with_shift(shift(1, "2024-03-04T08:00:00Z", "2024-03-04T12:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-04T13:00:00Z", "2024-03-04T17:00:00Z").with_employee(0));
    let explanation = explain_roster(&roster).unwrap();
    assert_eq!(
        explanation.total(ConstraintKey::BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours),
        HardMediumSoftScore::of_hard(-10 * 540)
    );
}

#[test]
fn test_unavailable_example() {
    let roster = Roster::default()
        .with_employee(Employee::new(1, "Amy"))
        .with_shift(shift(1, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_employee(0))
        .with_availability(availability(
            1,
            0,
            "2024-03-04T00:00:00Z",
            "2024-03-05T00:00:00Z",
            AvailabilityState::Unavailable,
        ));
    assert_eq!(
        score_roster(&roster).unwrap(),
        HardMediumSoftScore::of_hard(-50 * 480)
    );
}

#[test]
fn test_zero_weight_disables_constraint() {
    let mut roster = sample_roster();
    roster.configuration = RosterConstraintConfiguration::default()
        .with_weight(ConstraintKey::EmployeeIsNotOriginalEmployee, HardMediumSoftScore::ZERO);
    let explanation = explain_roster(&roster).unwrap();
    assert_eq!(explanation.match_count(ConstraintKey::EmployeeIsNotOriginalEmployee), 0);
    assert_eq!(
        explanation.score(),
        HardMediumSoftScore::of(-51_100, -1, -27_600)
    );
}

#[test]
fn test_yearly_overage_switch() {
    let mut roster = sample_roster();
    roster.configuration =
        RosterConstraintConfiguration::default().with_yearly_overage(YearlyOverage::MinutesOverCap);
    let explanation = explain_roster(&roster).unwrap();
    // Beth works 660 minutes against a yearly cap of 600
    assert_eq!(
        explanation.total(ConstraintKey::YearlyMinutesMustNotExceedContractMaximum),
        HardMediumSoftScore::of_hard(-60)
    );
}

#[test]
fn test_week_start_day_moves_weekly_buckets() {
    let contract = Contract {
        max_minutes_per_week: Some(600),
        ..Contract::default()
    };
    // Saturday and Monday
    let roster = Roster::default()
        .with_employee(Employee::new(1, "Amy").with_contract(contract))
        .with_shift(shift(1, "2024-03-02T09:00:00Z", "2024-03-02T17:00:00Z").with_employee(0))
        .with_shift(shift(2, "2024-03-04T09:00:00Z", "2024-03-04T17:00:00Z").with_employee(0));
    assert_eq!(score_roster(&roster).unwrap(), HardMediumSoftScore::ZERO);

    let mut saturday_weeks = roster.clone();
    saturday_weeks.configuration =
        RosterConstraintConfiguration::default().with_week_start_day(chrono::Weekday::Sat);
    assert_eq!(
        score_roster(&saturday_weeks).unwrap(),
        HardMediumSoftScore::of_hard(-360)
    );
}

#[test]
fn test_invalid_snapshot_is_rejected() {
    let mut roster = sample_roster();
    roster.shifts[4].end = at("2024-01-03T01:00:00Z");
    assert!(matches!(
        score_roster(&roster),
        Err(RosterForgeError::InvalidSnapshot(_))
    ));
    assert!(matches!(
        explain_roster(&roster),
        Err(RosterForgeError::InvalidSnapshot(_))
    ));
}

#[test]
fn test_missing_weight_is_rejected() {
    let mut roster = sample_roster();
    roster
        .configuration
        .weights
        .remove(&ConstraintKey::DesiredEmployeeTimeSlot);
    assert!(matches!(
        score_roster(&roster),
        Err(RosterForgeError::InvalidSnapshot(_))
    ));
}

#[test]
fn test_empty_roster_scores_zero() {
    let roster = Roster::default();
    assert_eq!(score_roster(&roster).unwrap(), HardMediumSoftScore::ZERO);
    let explanation = explain_roster(&roster).unwrap();
    assert_eq!(explanation.explanation.total_match_count(), 0);
    assert!(explanation.indictments.is_empty());
}
