//! Hand-built roster fixtures.
//!
//! # Example
//!
//! ```
//! use rosterforge_test::fixtures::{at, shift};
//!
//! let s = shift(1, "2024-01-01T09:00:00Z", "2024-01-01T17:00:00Z");
//! assert_eq!(s.length_in_minutes(), 480);
//! assert_eq!(s.start, at("2024-01-01T09:00:00Z"));
//! ```

use chrono::{DateTime, FixedOffset};
use rosterforge_roster::{
    AvailabilityState, Contract, Employee, EmployeeAvailability, Roster, Shift,
};

/// Parses an RFC 3339 timestamp.
///
/// # Panics
///
/// Panics if `s` is not a valid RFC 3339 timestamp.
pub fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap_or_else(|e| panic!("bad timestamp {s:?}: {e}"))
}

/// Creates an unassigned shift between two RFC 3339 timestamps.
pub fn shift(id: i64, start: &str, end: &str) -> Shift {
    Shift::new(id, at(start), at(end))
}

/// Creates an availability between two RFC 3339 timestamps.
pub fn availability(
    id: i64,
    employee: usize,
    start: &str,
    end: &str,
    state: AvailabilityState,
) -> EmployeeAvailability {
    EmployeeAvailability::new(id, employee, at(start), at(end), state)
}

/// A one-week roster on which every constraint matches at least once.
///
/// Uses the default configuration. Employee 0 (Amy, a nurse) works
/// Monday to Wednesday against daily, weekly and monthly caps of 480, 1200
/// and 1400 minutes:
///
/// - shift 1 needs a doctor (300 minutes) and runs into shift 2 (240)
/// - Monday totals 540 minutes, Tuesday 720, the week and month 1500
/// - shifts 3 and 4 overlap; shift 4 is the later one (240)
/// - shift 5 starts 8 hours after shift 4 ends and overlaps an
///   unavailability
/// - a 120 minute undesired slot covers shifts 1 and 2, a 120 minute
///   desired slot covers shift 3
///
/// Employee 1 (Beth) works 660 minutes against a yearly cap of 600.
/// Employee 2 (Cleo) works 480 minutes on a shift whose rotation employee
/// is Amy, well below a yearly cap of 100000. Shift 8 is unassigned.
///
/// The roster scores `-51100hard/-1medium/-100000027600soft`.
pub fn sample_roster() -> Roster {
    let amy = Employee::new(1, "Amy").with_skill("nurse").with_contract(Contract {
        max_minutes_per_day: Some(480),
        max_minutes_per_week: Some(1200),
        max_minutes_per_month: Some(1400),
        max_minutes_per_year: None,
    });
    let beth = Employee::new(2, "Beth").with_contract(Contract {
        max_minutes_per_year: Some(600),
        ..Contract::default()
    });
    let cleo = Employee::new(3, "Cleo").with_contract(Contract {
        max_minutes_per_year: Some(100_000),
        ..Contract::default()
    });

    Roster::default()
        .with_employee(amy)
        .with_employee(beth)
        .with_employee(cleo)
        .with_shift(
            shift(1, "2024-01-01T06:00:00Z", "2024-01-01T11:00:00Z")
                .with_employee(0)
                .with_required_skill("doctor"),
        )
        .with_shift(shift(2, "2024-01-01T11:00:00Z", "2024-01-01T15:00:00Z").with_employee(0))
        .with_shift(shift(3, "2024-01-02T08:00:00Z", "2024-01-02T16:00:00Z").with_employee(0))
        .with_shift(shift(4, "2024-01-02T14:00:00Z", "2024-01-02T18:00:00Z").with_employee(0))
        .with_shift(shift(5, "2024-01-03T02:00:00Z", "2024-01-03T06:00:00Z").with_employee(0))
        .with_shift(shift(6, "2024-01-04T08:00:00Z", "2024-01-04T19:00:00Z").with_employee(1))
        .with_shift(
            shift(7, "2024-01-05T09:00:00Z", "2024-01-05T17:00:00Z")
                .with_employee(2)
                .with_rotation_employee(0)
                .with_original_employee(2),
        )
        .with_shift(shift(8, "2024-01-06T09:00:00Z", "2024-01-06T17:00:00Z"))
        .with_availability(availability(
            1,
            0,
            "2024-01-03T00:00:00Z",
            "2024-01-03T03:00:00Z",
            AvailabilityState::Unavailable,
        ))
        .with_availability(availability(
            2,
            0,
            "2024-01-01T10:00:00Z",
            "2024-01-01T12:00:00Z",
            AvailabilityState::Undesired,
        ))
        .with_availability(availability(
            3,
            0,
            "2024-01-02T08:00:00Z",
            "2024-01-02T10:00:00Z",
            AvailabilityState::Desired,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_roster_is_valid() {
        let roster = sample_roster();
        assert!(roster.validate().is_ok());
        assert_eq!(roster.employees.len(), 3);
        assert_eq!(roster.shifts.len(), 8);
        assert_eq!(roster.availabilities.len(), 3);
    }

    #[test]
    #[should_panic(expected = "bad timestamp")]
    fn test_at_rejects_garbage() {
        at("monday morning");
    }
}
