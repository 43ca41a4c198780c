//! Batch and incremental scoring of rosters.
//!
//! [`score_roster`] and [`explain_roster`] evaluate a snapshot from scratch.
//! [`RosterScorer`] keeps the catalogue's indices alive between mutations so
//! each change only revisits the matches touching the changed fact.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use rosterforge_config::{ConstraintKey, EnvironmentMode};
use rosterforge_core::{HardMediumSoftScore, Result, RosterForgeError, Score};
use rosterforge_scoring::{ConstraintSet, IndictmentMap, ScoreExplanation, TypedScoreDirector};
use tracing::{debug, trace};

use crate::constraints::define_constraints;
use crate::domain::{
    AvailabilityState, Employee, EmployeeAvailability, Roster, Shift, AVAILABILITIES, SHIFTS,
};

/// Validates a snapshot and scores it from scratch.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use rosterforge_core::HardMediumSoftScore;
/// use rosterforge_roster::{score_roster, Contract, Employee, Roster, Shift};
///
/// let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
/// let contract = Contract { max_minutes_per_day: Some(480), ..Contract::default() };
/// let roster = Roster::default()
///     .with_employee(Employee::new(1, "Amy").with_contract(contract))
///     .with_shift(Shift::new(1, at("2024-03-04T06:00:00Z"), at("2024-03-04T11:00:00Z")).with_employee(0))
///     .with_shift(Shift::new(2, at("2024-03-04T12:00:00Z"), at("2024-03-04T16:00:00Z")).with_employee(0));
///
/// // 540 minutes on one day, 60 over the daily maximum; the one hour
/// // break between the shifts also costs 600 - 60 minutes
/// assert_eq!(score_roster(&roster).unwrap(), HardMediumSoftScore::of_hard(-60 - 10 * 540));
/// ```
pub fn score_roster(roster: &Roster) -> Result<HardMediumSoftScore> {
    roster.validate()?;
    let score = define_constraints(&roster.configuration).evaluate_all(roster);
    debug!(
        event = "roster_scored",
        shifts = roster.shifts.len(),
        availabilities = roster.availabilities.len(),
        score = %score,
    );
    Ok(score)
}

/// Validates a snapshot and explains its score from scratch.
pub fn explain_roster(roster: &Roster) -> Result<RosterExplanation> {
    roster.validate()?;
    let analyses = define_constraints(&roster.configuration).evaluate_detailed(roster);
    let score = analyses
        .iter()
        .fold(HardMediumSoftScore::zero(), |total, a| total + a.score);
    debug!(event = "roster_explained", score = %score);
    Ok(RosterExplanation::new(ScoreExplanation::new(score, analyses)))
}

/// A roster score broken down by constraint and by fact.
#[derive(Debug, Clone)]
pub struct RosterExplanation {
    /// Every constraint's matches, in catalogue order.
    pub explanation: ScoreExplanation<HardMediumSoftScore>,
    /// Signed total of each constraint.
    pub constraint_totals: BTreeMap<ConstraintKey, HardMediumSoftScore>,
    /// Matches grouped by the shift, availability or group they involve.
    pub indictments: IndictmentMap<HardMediumSoftScore>,
}

impl RosterExplanation {
    fn new(explanation: ScoreExplanation<HardMediumSoftScore>) -> Self {
        let constraint_totals = explanation
            .constraint_analyses
            .iter()
            .filter_map(|a| ConstraintKey::from_display_name(a.name()).map(|key| (key, a.score)))
            .collect();
        let indictments = explanation.indictments();
        Self {
            explanation,
            constraint_totals,
            indictments,
        }
    }

    pub fn score(&self) -> HardMediumSoftScore {
        self.explanation.score
    }

    /// Total of one constraint; zero when it did not match.
    pub fn total(&self, key: ConstraintKey) -> HardMediumSoftScore {
        self.constraint_totals
            .get(&key)
            .copied()
            .unwrap_or_default()
    }

    pub fn match_count(&self, key: ConstraintKey) -> usize {
        self.explanation
            .constraint(key.display_name())
            .map_or(0, |a| a.match_count())
    }
}

/// Incremental scorer over one working roster.
///
/// Construct it with [`RosterScorer::new`], which validates the snapshot and
/// builds the catalogue from the roster's own configuration. Every mutation
/// returns the updated score; invalid mutations are rejected with
/// [`RosterForgeError::InvalidState`] and leave the roster untouched.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use rosterforge_core::HardMediumSoftScore;
/// use rosterforge_roster::{Employee, Roster, RosterScorer, Shift};
///
/// let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
/// let roster = Roster::default()
///     .with_employee(Employee::new(1, "Amy"))
///     .with_shift(Shift::new(1, at("2024-03-04T09:00:00Z"), at("2024-03-04T17:00:00Z")));
///
/// let mut scorer = RosterScorer::new(roster).unwrap();
/// assert_eq!(scorer.score().unwrap(), HardMediumSoftScore::of_medium(-1));
///
/// let score = scorer.assign_employee(0, Some(0)).unwrap();
/// assert_eq!(score, HardMediumSoftScore::ZERO);
/// ```
pub struct RosterScorer<C>
where
    C: ConstraintSet<Roster, HardMediumSoftScore>,
{
    director: TypedScoreDirector<Roster, C>,
}

impl RosterScorer<()> {
    /// Validates `roster` and initializes the scorer in the default
    /// environment mode.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(
        roster: Roster,
    ) -> Result<RosterScorer<impl ConstraintSet<Roster, HardMediumSoftScore>>> {
        Self::with_environment_mode(roster, EnvironmentMode::default())
    }

    /// Validates `roster` and initializes the scorer, running the score
    /// checks of `environment_mode`.
    pub fn with_environment_mode(
        roster: Roster,
        environment_mode: EnvironmentMode,
    ) -> Result<RosterScorer<impl ConstraintSet<Roster, HardMediumSoftScore>>> {
        roster.validate()?;
        let constraints = define_constraints(&roster.configuration);
        let mut director =
            TypedScoreDirector::with_environment_mode(roster, constraints, environment_mode);
        let score = director.calculate_score()?;
        let roster = director.working_solution();
        debug!(
            event = "scorer_created",
            employees = roster.employees.len(),
            shifts = roster.shifts.len(),
            availabilities = roster.availabilities.len(),
            environment_mode = ?environment_mode,
            score = %score,
        );
        Ok(RosterScorer { director })
    }
}

fn shifts_mut(roster: &mut Roster) -> &mut Vec<Shift> {
    &mut roster.shifts
}

fn availabilities_mut(roster: &mut Roster) -> &mut Vec<EmployeeAvailability> {
    &mut roster.availabilities
}

impl<C> RosterScorer<C>
where
    C: ConstraintSet<Roster, HardMediumSoftScore>,
{
    /// Returns the current score.
    pub fn score(&mut self) -> Result<HardMediumSoftScore> {
        self.director.calculate_score()
    }

    /// Explains the working roster from a batch evaluation.
    pub fn explain(&self) -> RosterExplanation {
        RosterExplanation::new(self.director.explain())
    }

    /// Re-scores from scratch and fails if the incremental score drifted.
    pub fn assert_score_consistency(&self) -> Result<()> {
        self.director.assert_score_consistency()
    }

    pub fn roster(&self) -> &Roster {
        self.director.working_solution()
    }

    /// Consumes the scorer and returns the roster carrying its last score.
    pub fn into_roster(self) -> Roster {
        self.director.take_solution()
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.director.environment_mode()
    }

    /// Assigns `employee` to a shift, or unassigns it with `None`.
    pub fn assign_employee(
        &mut self,
        shift: usize,
        employee: Option<usize>,
    ) -> Result<HardMediumSoftScore> {
        self.check_shift_index(shift)?;
        if let Some(employee) = employee {
            self.check_employee_index(employee)?;
        }
        let score = self
            .director
            .do_change(SHIFTS, shift, |r| r.shifts[shift].employee = employee)?;
        trace!(event = "employee_assigned", shift, employee = ?employee, score = %score);
        Ok(score)
    }

    /// Exchanges the assigned employees of two shifts.
    pub fn swap_employees(&mut self, a: usize, b: usize) -> Result<HardMediumSoftScore> {
        self.check_shift_index(a)?;
        self.check_shift_index(b)?;
        if a == b {
            return self.score();
        }
        let shifts = &self.roster().shifts;
        let (employee_a, employee_b) = (shifts[a].employee, shifts[b].employee);
        self.director
            .do_change(SHIFTS, a, |r| r.shifts[a].employee = employee_b)?;
        let score = self
            .director
            .do_change(SHIFTS, b, |r| r.shifts[b].employee = employee_a)?;
        trace!(event = "employees_swapped", a, b, score = %score);
        Ok(score)
    }

    /// Moves a shift to a new interval.
    pub fn set_shift_times(
        &mut self,
        shift: usize,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<HardMediumSoftScore> {
        self.check_shift_index(shift)?;
        if end <= start {
            return Err(RosterForgeError::InvalidState(format!(
                "shift {} cannot end at {} before or at its start {}",
                self.roster().shifts[shift].id,
                end,
                start
            )));
        }
        let score = self.director.do_change(SHIFTS, shift, |r| {
            let s = &mut r.shifts[shift];
            s.start = start;
            s.end = end;
        })?;
        trace!(event = "shift_moved", shift, score = %score);
        Ok(score)
    }

    /// Appends a shift. Its index is the previous shift count.
    pub fn add_shift(&mut self, shift: Shift) -> Result<HardMediumSoftScore> {
        let roster = self.roster();
        if let Some(message) = roster.shift_violation(&shift) {
            return Err(RosterForgeError::InvalidState(message));
        }
        if roster.shifts.iter().any(|s| s.id == shift.id) {
            return Err(RosterForgeError::InvalidState(format!(
                "duplicate shift id {}",
                shift.id
            )));
        }
        let index = roster.shifts.len();
        self.director.working_solution_mut().shifts.push(shift);
        let score = self.director.insert_fact(SHIFTS, index)?;
        trace!(event = "shift_added", shift = index, score = %score);
        Ok(score)
    }

    /// Removes a shift. The last shift takes over its index.
    pub fn remove_shift(&mut self, index: usize) -> Result<Shift> {
        self.check_shift_index(index)?;
        let removed = self.swap_remove_fact(SHIFTS, index, shifts_mut)?;
        trace!(event = "shift_removed", shift = index, score = %self.director.get_score());
        Ok(removed)
    }

    /// Appends an availability. Its index is the previous availability count.
    pub fn add_availability(
        &mut self,
        availability: EmployeeAvailability,
    ) -> Result<HardMediumSoftScore> {
        let roster = self.roster();
        if let Some(message) = roster.availability_violation(&availability) {
            return Err(RosterForgeError::InvalidState(message));
        }
        if roster.availabilities.iter().any(|a| a.id == availability.id) {
            return Err(RosterForgeError::InvalidState(format!(
                "duplicate availability id {}",
                availability.id
            )));
        }
        let index = roster.availabilities.len();
        self.director
            .working_solution_mut()
            .availabilities
            .push(availability);
        let score = self.director.insert_fact(AVAILABILITIES, index)?;
        trace!(event = "availability_added", availability = index, score = %score);
        Ok(score)
    }

    /// Removes an availability. The last availability takes over its index.
    pub fn remove_availability(&mut self, index: usize) -> Result<EmployeeAvailability> {
        self.check_availability_index(index)?;
        let removed = self.swap_remove_fact(AVAILABILITIES, index, availabilities_mut)?;
        trace!(
            event = "availability_removed",
            availability = index,
            score = %self.director.get_score(),
        );
        Ok(removed)
    }

    pub fn set_availability_state(
        &mut self,
        index: usize,
        state: AvailabilityState,
    ) -> Result<HardMediumSoftScore> {
        self.check_availability_index(index)?;
        let score = self
            .director
            .do_change(AVAILABILITIES, index, |r| r.availabilities[index].state = state)?;
        trace!(event = "availability_state_changed", availability = index, state = ?state, score = %score);
        Ok(score)
    }

    /// Edits an employee's contract, skills or name.
    ///
    /// Every shift assigned to the employee is retracted before `f` runs and
    /// re-inserted afterwards, since skill and cap checks read the employee.
    pub fn update_employee<F>(&mut self, index: usize, f: F) -> Result<HardMediumSoftScore>
    where
        F: FnOnce(&mut Employee),
    {
        self.check_employee_index(index)?;
        let assigned: Vec<usize> = self
            .roster()
            .shifts
            .iter()
            .enumerate()
            .filter(|(_, s)| s.employee == Some(index))
            .map(|(i, _)| i)
            .collect();

        for &shift in &assigned {
            self.director.before_variable_changed(SHIFTS, shift);
        }
        f(&mut self.director.working_solution_mut().employees[index]);
        for &shift in &assigned {
            self.director.after_variable_changed(SHIFTS, shift);
        }
        // consistency checks only hold once every shift is back
        let score = self.director.calculate_score()?;
        trace!(
            event = "employee_updated",
            employee = index,
            shifts = assigned.len(),
            score = %score,
        );
        Ok(score)
    }

    /// Appends an employee and returns its index.
    ///
    /// A new employee has no shifts yet, so the score does not change.
    pub fn add_employee(&mut self, employee: Employee) -> Result<usize> {
        let roster = self.roster();
        if roster.employees.iter().any(|e| e.id == employee.id) {
            return Err(RosterForgeError::InvalidState(format!(
                "duplicate employee id {}",
                employee.id
            )));
        }
        let index = roster.employees.len();
        self.director.working_solution_mut().employees.push(employee);
        trace!(event = "employee_added", employee = index);
        Ok(index)
    }

    /// Removes the fact at `index` by swapping the last fact into its place.
    ///
    /// Both facts are retracted while still in place and the moved fact is
    /// re-inserted under its new index.
    fn swap_remove_fact<T>(
        &mut self,
        descriptor_index: usize,
        index: usize,
        collection: fn(&mut Roster) -> &mut Vec<T>,
    ) -> Result<T> {
        let last = collection(self.director.working_solution_mut()).len() - 1;
        self.director.retract_fact(descriptor_index, index)?;
        if index != last {
            self.director.retract_fact(descriptor_index, last)?;
        }
        let removed = collection(self.director.working_solution_mut()).swap_remove(index);
        if index != last {
            self.director.insert_fact(descriptor_index, index)?;
        }
        Ok(removed)
    }

    fn check_shift_index(&self, index: usize) -> Result<()> {
        let len = self.roster().shifts.len();
        if index < len {
            Ok(())
        } else {
            Err(RosterForgeError::InvalidState(format!(
                "shift {index} is out of range ({len} shifts)"
            )))
        }
    }

    fn check_availability_index(&self, index: usize) -> Result<()> {
        let len = self.roster().availabilities.len();
        if index < len {
            Ok(())
        } else {
            Err(RosterForgeError::InvalidState(format!(
                "availability {index} is out of range ({len} availabilities)"
            )))
        }
    }

    fn check_employee_index(&self, index: usize) -> Result<()> {
        let len = self.roster().employees.len();
        if index < len {
            Ok(())
        } else {
            Err(RosterForgeError::InvalidState(format!(
                "employee {index} is out of range ({len} employees)"
            )))
        }
    }
}

impl<C> std::fmt::Debug for RosterScorer<C>
where
    C: ConstraintSet<Roster, HardMediumSoftScore>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let roster = self.roster();
        f.debug_struct("RosterScorer")
            .field("employees", &roster.employees.len())
            .field("shifts", &roster.shifts.len())
            .field("availabilities", &roster.availabilities.len())
            .field("score", &self.director.get_score())
            .finish()
    }
}
