//! Employee rostering on top of the RosterForge scoring engine.
//!
//! This crate provides:
//! - The roster fact model: employees, shifts, availabilities
//! - Snapshot validation
//! - The fourteen-constraint rostering catalogue
//! - Batch scoring and explanation (`score_roster`, `explain_roster`)
//! - Incremental scoring under mutation (`RosterScorer`)

// Constraint tuples are deeply nested generic types
#![allow(clippy::type_complexity)]

pub mod calendar;
pub mod constraints;
pub mod domain;
pub mod scorer;

pub use constraints::{define_constraints, PACKAGE};
pub use domain::{
    AvailabilityState, Contract, Employee, EmployeeAvailability, Roster, Shift, AVAILABILITIES,
    SHIFTS,
};
pub use scorer::{explain_roster, score_roster, RosterExplanation, RosterScorer};
