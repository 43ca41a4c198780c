//! RosterForge - Incremental employee rostering scores in Rust
//!
//! Score a roster snapshot from scratch, explain where the score comes from,
//! or keep a [`RosterScorer`] alive and apply assignment changes to it.
//!
//! # Example
//!
//! ```rust
//! use rosterforge::prelude::*;
//!
//! let at = |s: &str| chrono::DateTime::parse_from_rfc3339(s).unwrap();
//! let roster = Roster::default()
//!     .with_employee(Employee::new(1, "Amy"))
//!     .with_shift(Shift::new(1, at("2024-03-04T09:00:00Z"), at("2024-03-04T17:00:00Z")));
//!
//! assert_eq!(score_roster(&roster).unwrap(), HardMediumSoftScore::of_medium(-1));
//! ```

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

// Score types and errors
pub use rosterforge_core::{HardMediumSoftScore, Result, RosterForgeError, Score};

// Configuration
pub use rosterforge_config::{
    ConfigError, ConstraintKey, EnvironmentMode, RosterConstraintConfiguration, YearlyOverage,
};

// Fact model, catalogue and scorers
pub use rosterforge_roster::{
    define_constraints, explain_roster, score_roster, AvailabilityState, Contract, Employee,
    EmployeeAvailability, Roster, RosterExplanation, RosterScorer, Shift, PACKAGE,
};

// Constraint stream API for custom catalogues
pub use rosterforge_scoring::stream;
pub use rosterforge_scoring::{ConstraintSet, ScoreExplanation, TypedScoreDirector};

pub mod prelude {
    pub use super::{
        explain_roster, score_roster, AvailabilityState, ConstraintKey, Contract, Employee,
        EmployeeAvailability, EnvironmentMode, HardMediumSoftScore, Roster,
        RosterConstraintConfiguration, RosterExplanation, RosterScorer, Score, Shift,
        YearlyOverage,
    };
}

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "rosterforge=info";

static LOGGING: OnceLock<()> = OnceLock::new();

/// Installs a `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`]. Safe to call multiple
/// times; only the first call has effect, and an already installed global
/// subscriber is left in place.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
