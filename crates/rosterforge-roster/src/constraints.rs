//! The employee rostering constraint catalogue.
//!
//! Every constraint is built with the fluent stream API and weighted from the
//! roster's [`RosterConstraintConfiguration`]. Only assigned shifts take part,
//! except in `Assign every shift`.

use chrono::{Datelike, NaiveDate};
use rosterforge_config::{ConstraintKey, RosterConstraintConfiguration, YearlyOverage};
use rosterforge_core::HardMediumSoftScore;
use rosterforge_scoring::stream::collector::sum;
use rosterforge_scoring::stream::joiner::{equal, equal_bi, less_than, overlapping};
use rosterforge_scoring::stream::ConstraintFactory;
use rosterforge_scoring::{ConstraintSet, IncrementalConstraint, PairMode};
use tracing::trace;

use crate::calendar::{self, whole_minutes};
use crate::domain::{
    AvailabilityState, Contract, EmployeeAvailability, Roster, Shift, AVAILABILITIES, SHIFTS,
};

/// Package of every roster constraint.
pub const PACKAGE: &str = "employee-rostering";

type Factory = ConstraintFactory<Roster, HardMediumSoftScore>;
type DateKey = (Option<usize>, NaiveDate);
type MonthKey = (Option<usize>, (i32, u32));
type YearKey = (Option<usize>, i32);

/// Builds the full catalogue, in [`ConstraintKey::ALL`] order.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use rosterforge_core::HardMediumSoftScore;
/// use rosterforge_roster::{define_constraints, Employee, Roster, Shift};
/// use rosterforge_scoring::ConstraintSet;
///
/// let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
/// let roster = Roster::default()
///     .with_employee(Employee::new(1, "Amy"))
///     .with_shift(Shift::new(1, at("2024-03-04T09:00:00Z"), at("2024-03-04T17:00:00Z")));
///
/// let constraints = define_constraints(&roster.configuration);
/// assert_eq!(constraints.constraint_count(), 14);
/// // one unassigned shift
/// assert_eq!(constraints.evaluate_all(&roster), HardMediumSoftScore::of(0, -1, 0));
/// ```
pub fn define_constraints(
    config: &RosterConstraintConfiguration,
) -> impl ConstraintSet<Roster, HardMediumSoftScore> {
    let factory = Factory::new();
    (
        required_skill_for_shift(&factory, config),
        unavailable_employee_time_slot(&factory, config),
        no_overlapping_shifts(&factory, config),
        no_more_than_two_consecutive_shifts(&factory, config),
        break_between_non_consecutive_shifts(&factory, config),
        daily_minutes_must_not_exceed_contract_maximum(&factory, config),
        weekly_minutes_must_not_exceed_contract_maximum(&factory, config),
        monthly_minutes_must_not_exceed_contract_maximum(&factory, config),
        yearly_minutes_must_not_exceed_contract_maximum(&factory, config),
        assign_every_shift(&factory, config),
        employee_is_not_original_employee(&factory, config),
        undesired_employee_time_slot(&factory, config),
        desired_employee_time_slot(&factory, config),
        employee_not_rotation_employee(&factory, config),
    )
}

fn shifts(roster: &Roster) -> &[Shift] {
    &roster.shifts
}

fn availabilities(roster: &Roster) -> &[EmployeeAvailability] {
    &roster.availabilities
}

fn is_assigned(shift: &Shift) -> bool {
    shift.employee.is_some()
}

fn daily_cap(contract: &Contract) -> Option<i64> {
    contract.max_minutes_per_day
}

fn weekly_cap(contract: &Contract) -> Option<i64> {
    contract.max_minutes_per_week
}

fn monthly_cap(contract: &Contract) -> Option<i64> {
    contract.max_minutes_per_month
}

fn yearly_cap(contract: &Contract) -> Option<i64> {
    contract.max_minutes_per_year
}

/// Minutes worked beyond the employee's cap; `None` without a cap.
fn minutes_over_cap(
    roster: &Roster,
    employee: Option<usize>,
    select: fn(&Contract) -> Option<i64>,
    seconds: i64,
) -> Option<i64> {
    roster
        .cap(employee, select)
        .map(|cap| whole_minutes(seconds) - cap)
}

/// The second shift of a unique pair is the one with the larger id.
fn second_shift<'a>(a: &'a Shift, b: &'a Shift) -> &'a Shift {
    if b.id >= a.id {
        b
    } else {
        a
    }
}

fn required_skill_for_shift(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::RequiredSkillForShift;
    factory
        .for_each(SHIFTS, shifts)
        .filter_with_solution(|roster: &Roster, shift: &Shift| {
            is_assigned(shift) && !shift.has_required_skills(&roster.employees)
        })
        .penalize_with(config.weight(key), |shift: &Shift| shift.length_in_minutes())
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

fn unavailable_employee_time_slot(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::UnavailableEmployeeTimeSlot;
    factory
        .for_each(AVAILABILITIES, availabilities)
        .filter(|a: &EmployeeAvailability| a.state == AvailabilityState::Unavailable)
        .join(
            SHIFTS,
            shifts,
            equal_bi(|a: &EmployeeAvailability| Some(a.employee), |s: &Shift| s.employee),
        )
        .and_join(overlapping(
            |a: &EmployeeAvailability| a.start,
            |a: &EmployeeAvailability| a.end,
            |s: &Shift| s.start,
            |s: &Shift| s.end,
        ))
        .penalize_with(config.weight(key), |_: &EmployeeAvailability, shift: &Shift| {
            shift.length_in_minutes()
        })
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

fn no_overlapping_shifts(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::NoOverlappingShifts;
    factory
        .for_each(SHIFTS, shifts)
        .filter(is_assigned)
        .join_self(equal(|s: &Shift| s.employee), PairMode::Unique)
        .and_join(overlapping(
            |s: &Shift| s.start,
            |s: &Shift| s.end,
            |s: &Shift| s.start,
            |s: &Shift| s.end,
        ))
        .penalize_with(config.weight(key), |a: &Shift, b: &Shift| {
            second_shift(a, b).length_in_minutes()
        })
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

fn no_more_than_two_consecutive_shifts(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::NoMoreThanTwoConsecutiveShifts;
    factory
        .for_each(SHIFTS, shifts)
        .filter(is_assigned)
        .join_self(equal(|s: &Shift| s.employee), PairMode::Ordered)
        .filter(|first: &Shift, second: &Shift| first.end == second.start)
        .penalize_with(config.weight(key), |_: &Shift, second: &Shift| {
            second.length_in_minutes()
        })
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

fn break_between_non_consecutive_shifts(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours;
    factory
        .for_each(SHIFTS, shifts)
        .filter(is_assigned)
        .join_self(equal(|s: &Shift| s.employee), PairMode::Ordered)
        .and_join(less_than(|first: &Shift| first.end, |second: &Shift| second.start))
        .filter(|first: &Shift, second: &Shift| (second.start - first.end).num_hours() < 10)
        .penalize_with(config.weight(key), |first: &Shift, second: &Shift| {
            600 - (second.start - first.end).num_minutes()
        })
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

fn daily_minutes_must_not_exceed_contract_maximum(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::DailyMinutesMustNotExceedContractMaximum;
    factory
        .for_each(SHIFTS, shifts)
        .filter_with_solution(|roster: &Roster, shift: &Shift| {
            roster.cap(shift.employee, daily_cap).is_some()
        })
        .group_by(
            |shift: &Shift| (shift.employee, shift.start_date()),
            sum(Shift::duration_seconds),
        )
        .filter(|roster: &Roster, day: &DateKey, seconds: &i64| {
            minutes_over_cap(roster, day.0, daily_cap, *seconds).is_some_and(|over| over > 0)
        })
        .penalize_with(config.weight(key), |roster: &Roster, day: &DateKey, seconds: &i64| {
            minutes_over_cap(roster, day.0, daily_cap, *seconds).unwrap_or(0)
        })
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

fn weekly_minutes_must_not_exceed_contract_maximum(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::WeeklyMinutesMustNotExceedContractMaximum;
    let week_start_day = config.week_start_day;
    factory
        .for_each(SHIFTS, shifts)
        .filter_with_solution(|roster: &Roster, shift: &Shift| {
            roster.cap(shift.employee, weekly_cap).is_some()
        })
        .group_by(
            move |shift: &Shift| {
                (
                    shift.employee,
                    calendar::week_start(shift.start_date(), week_start_day),
                )
            },
            sum(Shift::duration_seconds),
        )
        .filter(|roster: &Roster, week: &DateKey, seconds: &i64| {
            minutes_over_cap(roster, week.0, weekly_cap, *seconds).is_some_and(|over| over > 0)
        })
        .penalize_with(config.weight(key), |roster: &Roster, week: &DateKey, seconds: &i64| {
            minutes_over_cap(roster, week.0, weekly_cap, *seconds).unwrap_or(0)
        })
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

fn monthly_minutes_must_not_exceed_contract_maximum(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::MonthlyMinutesMustNotExceedContractMaximum;
    factory
        .for_each(SHIFTS, shifts)
        .filter_with_solution(|roster: &Roster, shift: &Shift| {
            roster.cap(shift.employee, monthly_cap).is_some()
        })
        .group_by(
            |shift: &Shift| (shift.employee, calendar::year_month(shift.start_date())),
            sum(Shift::duration_seconds),
        )
        .filter(|roster: &Roster, month: &MonthKey, seconds: &i64| {
            minutes_over_cap(roster, month.0, monthly_cap, *seconds).is_some_and(|over| over > 0)
        })
        .penalize_with(config.weight(key), |roster: &Roster, month: &MonthKey, seconds: &i64| {
            minutes_over_cap(roster, month.0, monthly_cap, *seconds).unwrap_or(0)
        })
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

/// Matches every year over the cap. Weighs nothing unless the configuration
/// opts into [`YearlyOverage::MinutesOverCap`].
fn yearly_minutes_must_not_exceed_contract_maximum(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::YearlyMinutesMustNotExceedContractMaximum;
    let yearly_overage = config.yearly_overage;
    factory
        .for_each(SHIFTS, shifts)
        .filter_with_solution(|roster: &Roster, shift: &Shift| {
            roster.cap(shift.employee, yearly_cap).is_some()
        })
        .group_by(
            |shift: &Shift| (shift.employee, shift.start_date().year()),
            sum(Shift::duration_seconds),
        )
        .filter(|roster: &Roster, year: &YearKey, seconds: &i64| {
            minutes_over_cap(roster, year.0, yearly_cap, *seconds).is_some_and(|over| over > 0)
        })
        .penalize_with(
            config.weight(key),
            move |roster: &Roster, year: &YearKey, seconds: &i64| match yearly_overage {
                YearlyOverage::Placeholder => 0,
                YearlyOverage::MinutesOverCap => {
                    minutes_over_cap(roster, year.0, yearly_cap, *seconds).unwrap_or(0)
                }
            },
        )
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

fn assign_every_shift(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::AssignEveryShift;
    factory
        .for_each(SHIFTS, shifts)
        .filter(|shift: &Shift| shift.employee.is_none())
        .penalize(config.weight(key))
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

/// Weekly totals of employees with a yearly cap, matched while the week
/// stays below that cap. Each match weighs one unit.
fn employee_is_not_original_employee(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::EmployeeIsNotOriginalEmployee;
    let week_start_day = config.week_start_day;
    factory
        .for_each(SHIFTS, shifts)
        .filter_with_solution(|roster: &Roster, shift: &Shift| {
            roster.cap(shift.employee, yearly_cap).is_some()
        })
        .group_by(
            move |shift: &Shift| {
                (
                    shift.employee,
                    calendar::week_start(shift.start_date(), week_start_day),
                )
            },
            sum(Shift::duration_seconds),
        )
        .filter(|roster: &Roster, week: &DateKey, seconds: &i64| {
            minutes_over_cap(roster, week.0, yearly_cap, *seconds).is_some_and(|over| over < 0)
        })
        .penalize_with(config.weight(key), |_: &Roster, week: &DateKey, seconds: &i64| {
            trace!(
                event = "week_below_yearly_cap",
                employee = ?week.0,
                week_start = %week.1,
                minutes = whole_minutes(*seconds),
            );
            1_i64
        })
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

fn undesired_employee_time_slot(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::UndesiredEmployeeTimeSlot;
    factory
        .for_each(AVAILABILITIES, availabilities)
        .filter(|a: &EmployeeAvailability| a.state == AvailabilityState::Undesired)
        .join(
            SHIFTS,
            shifts,
            equal_bi(|a: &EmployeeAvailability| Some(a.employee), |s: &Shift| s.employee),
        )
        .and_join(overlapping(
            |a: &EmployeeAvailability| a.start,
            |a: &EmployeeAvailability| a.end,
            |s: &Shift| s.start,
            |s: &Shift| s.end,
        ))
        .penalize_with(config.weight(key), |a: &EmployeeAvailability, _: &Shift| {
            a.duration_in_minutes()
        })
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

fn desired_employee_time_slot(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::DesiredEmployeeTimeSlot;
    factory
        .for_each(AVAILABILITIES, availabilities)
        .filter(|a: &EmployeeAvailability| a.state == AvailabilityState::Desired)
        .join(
            SHIFTS,
            shifts,
            equal_bi(|a: &EmployeeAvailability| Some(a.employee), |s: &Shift| s.employee),
        )
        .and_join(overlapping(
            |a: &EmployeeAvailability| a.start,
            |a: &EmployeeAvailability| a.end,
            |s: &Shift| s.start,
            |s: &Shift| s.end,
        ))
        .reward_with(config.weight(key), |a: &EmployeeAvailability, _: &Shift| {
            a.duration_in_minutes()
        })
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

fn employee_not_rotation_employee(
    factory: &Factory,
    config: &RosterConstraintConfiguration,
) -> impl IncrementalConstraint<Roster, HardMediumSoftScore> {
    let key = ConstraintKey::EmployeeNotRotationEmployee;
    factory
        .for_each(SHIFTS, shifts)
        .filter(|shift: &Shift| {
            is_assigned(shift)
                && shift.rotation_employee.is_some()
                && shift.rotation_employee != shift.employee
        })
        .penalize_with(config.weight(key), |shift: &Shift| shift.length_in_minutes())
        .in_package(PACKAGE)
        .as_constraint(key.display_name())
}

#[cfg(test)]
mod tests;
