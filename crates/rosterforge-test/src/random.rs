//! Seeded random rosters and mutations.
//!
//! Generated rosters are always valid snapshots. They pack many shifts into
//! few days so overlaps, back-to-back shifts, short breaks and cap overages
//! all occur. The same seed always yields the same roster.

use chrono::{DateTime, Duration, FixedOffset};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rosterforge_core::{HardMediumSoftScore, Result};
use rosterforge_roster::{
    AvailabilityState, Contract, Employee, EmployeeAvailability, Roster, RosterScorer, Shift,
};
use rosterforge_scoring::ConstraintSet;

use crate::fixtures::at;

const SKILLS: [&str; 3] = ["nurse", "doctor", "cook"];

const STATES: [AvailabilityState; 3] = [
    AvailabilityState::Desired,
    AvailabilityState::Undesired,
    AvailabilityState::Unavailable,
];

/// Dimensions of a generated roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterSize {
    pub employees: usize,
    pub shifts: usize,
    pub availabilities: usize,
    /// Number of days the shifts are spread over.
    pub days: i64,
}

impl Default for RosterSize {
    fn default() -> Self {
        Self {
            employees: 5,
            shifts: 40,
            availabilities: 12,
            days: 10,
        }
    }
}

/// Generates a valid roster from `seed`.
///
/// # Example
///
/// ```
/// use rosterforge_test::{random_roster, RosterSize};
///
/// let size = RosterSize { employees: 3, shifts: 10, availabilities: 4, days: 5 };
/// let a = random_roster(42, size);
/// let b = random_roster(42, size);
/// assert_eq!(a, b);
/// assert_eq!(a.shifts.len(), 10);
/// ```
pub fn random_roster(seed: u64, size: RosterSize) -> Roster {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut roster = Roster::default();

    for i in 0..size.employees {
        roster = roster.with_employee(random_employee(&mut rng, i as i64 + 1));
    }
    for i in 0..size.shifts {
        let shift = random_shift(&mut rng, i as i64 + 1, size.employees, size.days);
        roster = roster.with_shift(shift);
    }
    if size.employees > 0 {
        for i in 0..size.availabilities {
            let a = random_availability(&mut rng, i as i64 + 1, size.employees, size.days);
            roster = roster.with_availability(a);
        }
    }
    roster
}

fn random_employee<R: Rng + ?Sized>(rng: &mut R, id: i64) -> Employee {
    let contract = Contract {
        max_minutes_per_day: rng.random_bool(0.5).then_some(480),
        max_minutes_per_week: rng.random_bool(0.5).then_some(1_800),
        max_minutes_per_month: rng.random_bool(0.3).then_some(4_000),
        max_minutes_per_year: rng.random_bool(0.5).then(|| rng.random_range(1_000..6_000)),
    };
    let mut employee = Employee::new(id, format!("Employee {id}")).with_contract(contract);
    for skill in SKILLS {
        if rng.random_bool(0.5) {
            employee = employee.with_skill(skill);
        }
    }
    employee
}

/// Midnight of the first generated day, a Monday, in one of a few offsets.
const ORIGINS: [&str; 3] = [
    "2024-12-30T00:00:00Z",
    "2024-12-30T00:00:00+02:00",
    "2024-12-30T00:00:00-05:00",
];

/// A random interval starting on the half hour, with a few stray seconds
/// on its length so minute truncation is exercised.
fn random_interval<R: Rng + ?Sized>(
    rng: &mut R,
    days: i64,
    min_minutes: i64,
    max_minutes: i64,
) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
    let start = at(ORIGINS[rng.random_range(0..ORIGINS.len())])
        + Duration::days(rng.random_range(0..days.max(1)))
        + Duration::minutes(30 * rng.random_range(0..48));
    let length = Duration::minutes(rng.random_range(min_minutes..=max_minutes))
        + Duration::seconds(rng.random_range(0..3) * 20);
    (start, start + length)
}

fn random_shift<R: Rng + ?Sized>(rng: &mut R, id: i64, employees: usize, days: i64) -> Shift {
    let (start, end) = random_interval(rng, days, 120, 720);
    let mut shift = Shift::new(id, start, end);
    if employees > 0 {
        if rng.random_bool(0.8) {
            shift = shift.with_employee(rng.random_range(0..employees));
        }
        if rng.random_bool(0.3) {
            shift = shift.with_rotation_employee(rng.random_range(0..employees));
        }
        if rng.random_bool(0.3) {
            shift = shift.with_original_employee(rng.random_range(0..employees));
        }
    }
    if rng.random_bool(0.3) {
        shift = shift.with_required_skill(SKILLS[rng.random_range(0..SKILLS.len())]);
    }
    shift
}

fn random_availability<R: Rng + ?Sized>(
    rng: &mut R,
    id: i64,
    employees: usize,
    days: i64,
) -> EmployeeAvailability {
    let (start, end) = random_interval(rng, days, 60, 1_440);
    let state = STATES[rng.random_range(0..STATES.len())];
    EmployeeAvailability::new(id, rng.random_range(0..employees), start, end, state)
}

/// One change a [`RosterScorer`] can apply.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterMutation {
    Assign {
        shift: usize,
        employee: Option<usize>,
    },
    Swap {
        a: usize,
        b: usize,
    },
    MoveShift {
        shift: usize,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },
    AddShift(Shift),
    RemoveShift(usize),
    AddAvailability(EmployeeAvailability),
    RemoveAvailability(usize),
    SetAvailabilityState {
        availability: usize,
        state: AvailabilityState,
    },
    SetContract {
        employee: usize,
        contract: Contract,
    },
    ToggleSkill {
        employee: usize,
        skill: &'static str,
    },
    AddEmployee(Employee),
}

impl RosterMutation {
    /// Applies the mutation and returns the new score.
    pub fn apply<C>(self, scorer: &mut RosterScorer<C>) -> Result<HardMediumSoftScore>
    where
        C: ConstraintSet<Roster, HardMediumSoftScore>,
    {
        match self {
            Self::Assign { shift, employee } => scorer.assign_employee(shift, employee),
            Self::Swap { a, b } => scorer.swap_employees(a, b),
            Self::MoveShift { shift, start, end } => scorer.set_shift_times(shift, start, end),
            Self::AddShift(shift) => scorer.add_shift(shift),
            Self::RemoveShift(index) => {
                scorer.remove_shift(index)?;
                scorer.score()
            }
            Self::AddAvailability(availability) => scorer.add_availability(availability),
            Self::RemoveAvailability(index) => {
                scorer.remove_availability(index)?;
                scorer.score()
            }
            Self::SetAvailabilityState { availability, state } => {
                scorer.set_availability_state(availability, state)
            }
            Self::SetContract { employee, contract } => {
                scorer.update_employee(employee, |e| e.contract = contract)
            }
            Self::ToggleSkill { employee, skill } => scorer.update_employee(employee, |e| {
                if !e.skills.remove(skill) {
                    e.skills.insert(skill.to_string());
                }
            }),
            Self::AddEmployee(employee) => {
                scorer.add_employee(employee)?;
                scorer.score()
            }
        }
    }
}

/// Picks a mutation that is valid for `roster`.
///
/// New facts take their ids from `next_id`, which is advanced past them.
pub fn random_mutation<R: Rng + ?Sized>(
    rng: &mut R,
    roster: &Roster,
    next_id: &mut i64,
    days: i64,
) -> RosterMutation {
    let employees = roster.employees.len();
    let shifts = roster.shifts.len();
    let availabilities = roster.availabilities.len();
    let mut fresh_id = || {
        *next_id += 1;
        *next_id
    };

    loop {
        match rng.random_range(0..11) {
            0 if shifts > 0 => {
                let employee = if employees > 0 && rng.random_bool(0.85) {
                    Some(rng.random_range(0..employees))
                } else {
                    None
                };
                return RosterMutation::Assign {
                    shift: rng.random_range(0..shifts),
                    employee,
                };
            }
            1 if shifts > 1 => {
                return RosterMutation::Swap {
                    a: rng.random_range(0..shifts),
                    b: rng.random_range(0..shifts),
                }
            }
            2 if shifts > 0 => {
                let (start, end) = random_interval(rng, days, 120, 720);
                return RosterMutation::MoveShift {
                    shift: rng.random_range(0..shifts),
                    start,
                    end,
                };
            }
            3 => {
                return RosterMutation::AddShift(random_shift(rng, fresh_id(), employees, days))
            }
            4 if shifts > 0 => return RosterMutation::RemoveShift(rng.random_range(0..shifts)),
            5 if employees > 0 => {
                return RosterMutation::AddAvailability(random_availability(
                    rng,
                    fresh_id(),
                    employees,
                    days,
                ))
            }
            6 if availabilities > 0 => {
                return RosterMutation::RemoveAvailability(rng.random_range(0..availabilities))
            }
            7 if availabilities > 0 => {
                return RosterMutation::SetAvailabilityState {
                    availability: rng.random_range(0..availabilities),
                    state: STATES[rng.random_range(0..STATES.len())],
                }
            }
            8 if employees > 0 => {
                let employee = rng.random_range(0..employees);
                let contract = random_employee(rng, 0).contract;
                return RosterMutation::SetContract { employee, contract };
            }
            9 if employees > 0 => {
                return RosterMutation::ToggleSkill {
                    employee: rng.random_range(0..employees),
                    skill: SKILLS[rng.random_range(0..SKILLS.len())],
                }
            }
            10 => {
                return RosterMutation::AddEmployee(random_employee(rng, fresh_id()));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_roster_is_valid() {
        for seed in 0..20 {
            let roster = random_roster(seed, RosterSize::default());
            assert!(roster.validate().is_ok(), "seed {seed}");
        }
    }

    #[test]
    fn test_random_roster_depends_on_seed() {
        let a = random_roster(1, RosterSize::default());
        let b = random_roster(2, RosterSize::default());
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_size() {
        let size = RosterSize {
            employees: 0,
            shifts: 3,
            availabilities: 3,
            days: 1,
        };
        let roster = random_roster(0, size);
        assert!(roster.employees.is_empty());
        assert!(roster.shifts.iter().all(|s| s.employee.is_none()));
        assert!(roster.availabilities.is_empty());
        assert!(roster.validate().is_ok());
    }

    #[test]
    fn test_mutations_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let roster = random_roster(9, RosterSize::default());
        let mut next_id = 1_000;
        for _ in 0..200 {
            match random_mutation(&mut rng, &roster, &mut next_id, 10) {
                RosterMutation::Assign { shift, employee } => {
                    assert!(shift < roster.shifts.len());
                    assert!(employee.map_or(true, |e| e < roster.employees.len()));
                }
                RosterMutation::AddShift(shift) => {
                    assert!(shift.id > 1_000);
                    assert!(roster.shift_violation(&shift).is_none());
                }
                RosterMutation::RemoveAvailability(index) => {
                    assert!(index < roster.availabilities.len());
                }
                _ => {}
            }
        }
    }
}
