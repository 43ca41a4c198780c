//! Roster fact model.
//!
//! Employees are referenced by their index in [`Roster::employees`]; shifts
//! and availabilities keep those indices stable for the life of a snapshot.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, FixedOffset, NaiveDate};
use rosterforge_config::RosterConstraintConfiguration;
use rosterforge_core::{HardMediumSoftScore, PlanningSolution, Result, RosterForgeError};
use serde::{Deserialize, Serialize};

use crate::calendar;

/// Descriptor index of [`Roster::shifts`].
pub const SHIFTS: usize = 0;

/// Descriptor index of [`Roster::availabilities`].
pub const AVAILABILITIES: usize = 1;

/// Per-employee caps on worked minutes. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contract {
    pub max_minutes_per_day: Option<i64>,
    pub max_minutes_per_week: Option<i64>,
    pub max_minutes_per_month: Option<i64>,
    pub max_minutes_per_year: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contract: Contract,
    #[serde(default)]
    pub skills: BTreeSet<String>,
}

impl Employee {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            contract: Contract::default(),
            skills: BTreeSet::new(),
        }
    }

    pub fn with_contract(mut self, contract: Contract) -> Self {
        self.contract = contract;
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }
}

/// A bounded work interval, optionally assigned to one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: i64,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    #[serde(default)]
    pub required_skills: BTreeSet<String>,
    /// Assigned employee; the variable the optimizer mutates.
    #[serde(default)]
    pub employee: Option<usize>,
    #[serde(default)]
    pub rotation_employee: Option<usize>,
    #[serde(default)]
    pub original_employee: Option<usize>,
}

impl Shift {
    /// Creates an unassigned shift with no required skills.
    pub fn new(id: i64, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self {
            id,
            start,
            end,
            required_skills: BTreeSet::new(),
            employee: None,
            rotation_employee: None,
            original_employee: None,
        }
    }

    pub fn with_employee(mut self, employee: usize) -> Self {
        self.employee = Some(employee);
        self
    }

    pub fn with_required_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.insert(skill.into());
        self
    }

    pub fn with_rotation_employee(mut self, employee: usize) -> Self {
        self.rotation_employee = Some(employee);
        self
    }

    pub fn with_original_employee(mut self, employee: usize) -> Self {
        self.original_employee = Some(employee);
        self
    }

    /// Length in whole minutes, truncated.
    #[inline]
    pub fn length_in_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    #[inline]
    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    /// Local date of the start instant.
    #[inline]
    pub fn start_date(&self) -> NaiveDate {
        calendar::local_date(&self.start)
    }

    /// Returns true if the assigned employee holds every required skill.
    ///
    /// A shift without required skills always passes. An unassigned shift
    /// passes only when it requires nothing.
    pub fn has_required_skills(&self, employees: &[Employee]) -> bool {
        if self.required_skills.is_empty() {
            return true;
        }
        self.employee
            .and_then(|i| employees.get(i))
            .is_some_and(|e| self.required_skills.is_subset(&e.skills))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityState {
    Desired,
    Undesired,
    Unavailable,
}

/// An employee-declared interval with a preference state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAvailability {
    pub id: i64,
    pub employee: usize,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub state: AvailabilityState,
}

impl EmployeeAvailability {
    pub fn new(
        id: i64,
        employee: usize,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        state: AvailabilityState,
    ) -> Self {
        Self {
            id,
            employee,
            start,
            end,
            state,
        }
    }

    #[inline]
    pub fn duration_in_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A complete roster snapshot: the facts, their configuration and the last score.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use rosterforge_roster::{Employee, Roster, Shift};
///
/// let start = DateTime::parse_from_rfc3339("2024-03-04T09:00:00+00:00").unwrap();
/// let end = DateTime::parse_from_rfc3339("2024-03-04T17:00:00+00:00").unwrap();
///
/// let roster = Roster::default()
///     .with_employee(Employee::new(1, "Amy"))
///     .with_shift(Shift::new(10, start, end).with_employee(0));
///
/// assert!(roster.validate().is_ok());
/// assert_eq!(roster.shifts[0].length_in_minutes(), 480);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub configuration: RosterConstraintConfiguration,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub availabilities: Vec<EmployeeAvailability>,
    #[serde(default)]
    pub score: Option<HardMediumSoftScore>,
}

impl Roster {
    pub fn new(configuration: RosterConstraintConfiguration) -> Self {
        Self {
            configuration,
            ..Self::default()
        }
    }

    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.employees.push(employee);
        self
    }

    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shifts.push(shift);
        self
    }

    pub fn with_availability(mut self, availability: EmployeeAvailability) -> Self {
        self.availabilities.push(availability);
        self
    }

    /// Parses a JSON snapshot. The snapshot is not validated.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RosterForgeError::InvalidSnapshot(format!("malformed roster JSON: {e}")))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RosterForgeError::InvalidState(format!("cannot serialize roster: {e}")))
    }

    /// Checks the snapshot preconditions and reports the first violation.
    pub fn validate(&self) -> Result<()> {
        self.configuration
            .validate()
            .map_err(|e| RosterForgeError::InvalidSnapshot(e.to_string()))?;

        unique_ids("employee", self.employees.iter().map(|e| e.id))?;
        unique_ids("shift", self.shifts.iter().map(|s| s.id))?;
        unique_ids("availability", self.availabilities.iter().map(|a| a.id))?;

        let violation = self
            .shifts
            .iter()
            .find_map(|s| self.shift_violation(s))
            .or_else(|| {
                self.availabilities
                    .iter()
                    .find_map(|a| self.availability_violation(a))
            });
        match violation {
            Some(message) => Err(RosterForgeError::InvalidSnapshot(message)),
            None => Ok(()),
        }
    }

    /// Describes what is wrong with a shift's interval or employee references.
    pub fn shift_violation(&self, shift: &Shift) -> Option<String> {
        if shift.end <= shift.start {
            return Some(format!(
                "shift {} ends at {} which is not after its start {}",
                shift.id, shift.end, shift.start
            ));
        }
        [
            ("employee", shift.employee),
            ("rotation_employee", shift.rotation_employee),
            ("original_employee", shift.original_employee),
        ]
        .into_iter()
        .find_map(|(field, employee)| {
            let index = employee?;
            (index >= self.employees.len()).then(|| {
                format!(
                    "shift {} has {} {} but the roster has {} employees",
                    shift.id,
                    field,
                    index,
                    self.employees.len()
                )
            })
        })
    }

    /// Describes what is wrong with an availability's interval or employee.
    pub fn availability_violation(&self, availability: &EmployeeAvailability) -> Option<String> {
        if availability.end <= availability.start {
            return Some(format!(
                "availability {} ends at {} which is not after its start {}",
                availability.id, availability.end, availability.start
            ));
        }
        (availability.employee >= self.employees.len()).then(|| {
            format!(
                "availability {} has employee {} but the roster has {} employees",
                availability.id,
                availability.employee,
                self.employees.len()
            )
        })
    }

    /// Returns the assigned employee's contract cap, if both exist.
    pub(crate) fn cap(
        &self,
        employee: Option<usize>,
        select: fn(&Contract) -> Option<i64>,
    ) -> Option<i64> {
        employee
            .and_then(|i| self.employees.get(i))
            .and_then(|e| select(&e.contract))
    }
}

fn unique_ids(kind: &str, ids: impl Iterator<Item = i64>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RosterForgeError::InvalidSnapshot(format!(
                "duplicate {kind} id {id}"
            )));
        }
    }
    Ok(())
}

impl PlanningSolution for Roster {
    type Score = HardMediumSoftScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}
