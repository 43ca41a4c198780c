//! Constraint configuration for RosterForge.
//!
//! A [`RosterConstraintConfiguration`] carries the weight of every roster
//! constraint, the first day of the week used for weekly totals, and the
//! yearly-overage switch. It can be loaded from TOML or YAML so tenants
//! tune weights without code changes.
//!
//! # Examples
//!
//! ```
//! use chrono::Weekday;
//! use rosterforge_config::{ConstraintKey, RosterConstraintConfiguration};
//! use rosterforge_core::HardMediumSoftScore;
//!
//! let config = RosterConstraintConfiguration::from_toml_str(r#"
//!     week_start_day = "sunday"
//!
//!     [weights]
//!     required_skill_for_shift = "100hard/0medium/0soft"
//!     unavailable_employee_time_slot = "50hard/0medium/0soft"
//!     no_overlapping_shifts = "20hard/0medium/0soft"
//!     no_more_than_two_consecutive_shifts = "10hard/0medium/0soft"
//!     break_between_non_consecutive_shifts_is_at_least_ten_hours = "10hard/0medium/0soft"
//!     daily_minutes_must_not_exceed_contract_maximum = "1hard/0medium/0soft"
//!     weekly_minutes_must_not_exceed_contract_maximum = "1hard/0medium/0soft"
//!     monthly_minutes_must_not_exceed_contract_maximum = "1hard/0medium/0soft"
//!     yearly_minutes_must_not_exceed_contract_maximum = "1hard/0medium/0soft"
//!     assign_every_shift = "0hard/1medium/0soft"
//!     employee_is_not_original_employee = "0hard/0medium/0soft"
//!     undesired_employee_time_slot = "0hard/0medium/20soft"
//!     desired_employee_time_slot = "0hard/0medium/10soft"
//!     employee_not_rotation_employee = "0hard/0medium/50soft"
//! "#).unwrap();
//!
//! assert_eq!(config.week_start_day, Weekday::Sun);
//! assert_eq!(
//!     config.weight(ConstraintKey::EmployeeIsNotOriginalEmployee),
//!     HardMediumSoftScore::ZERO,
//! );
//! ```
//!
//! A configuration that omits the weights table uses the defaults:
//!
//! ```
//! use rosterforge_config::{RosterConstraintConfiguration, YearlyOverage};
//!
//! let config = RosterConstraintConfiguration::from_yaml_str("yearly_overage: minutes_over_cap").unwrap();
//! assert_eq!(config.yearly_overage, YearlyOverage::MinutesOverCap);
//! assert_eq!(config.weights.len(), 14);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::Weekday;
use rosterforge_core::{HardMediumSoftScore, RosterForgeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for RosterForgeError {
    fn from(err: ConfigError) -> Self {
        RosterForgeError::Config(err.to_string())
    }
}

/// Identifies one constraint of the roster catalogue.
///
/// Variants are declared in catalogue order, which is also the order of
/// [`ConstraintKey::ALL`] and of the constraint tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKey {
    RequiredSkillForShift,
    UnavailableEmployeeTimeSlot,
    NoOverlappingShifts,
    NoMoreThanTwoConsecutiveShifts,
    BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours,
    DailyMinutesMustNotExceedContractMaximum,
    WeeklyMinutesMustNotExceedContractMaximum,
    MonthlyMinutesMustNotExceedContractMaximum,
    YearlyMinutesMustNotExceedContractMaximum,
    AssignEveryShift,
    EmployeeIsNotOriginalEmployee,
    UndesiredEmployeeTimeSlot,
    DesiredEmployeeTimeSlot,
    EmployeeNotRotationEmployee,
}

impl ConstraintKey {
    /// Every key, in catalogue order.
    pub const ALL: [ConstraintKey; 14] = [
        ConstraintKey::RequiredSkillForShift,
        ConstraintKey::UnavailableEmployeeTimeSlot,
        ConstraintKey::NoOverlappingShifts,
        ConstraintKey::NoMoreThanTwoConsecutiveShifts,
        ConstraintKey::BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours,
        ConstraintKey::DailyMinutesMustNotExceedContractMaximum,
        ConstraintKey::WeeklyMinutesMustNotExceedContractMaximum,
        ConstraintKey::MonthlyMinutesMustNotExceedContractMaximum,
        ConstraintKey::YearlyMinutesMustNotExceedContractMaximum,
        ConstraintKey::AssignEveryShift,
        ConstraintKey::EmployeeIsNotOriginalEmployee,
        ConstraintKey::UndesiredEmployeeTimeSlot,
        ConstraintKey::DesiredEmployeeTimeSlot,
        ConstraintKey::EmployeeNotRotationEmployee,
    ];

    /// Name of the constraint as reported in score explanations.
    pub const fn display_name(self) -> &'static str {
        match self {
            ConstraintKey::RequiredSkillForShift => "Required skill for a shift",
            ConstraintKey::UnavailableEmployeeTimeSlot => "Unavailable time slot for an employee",
            ConstraintKey::NoOverlappingShifts => "No overlapping shifts",
            ConstraintKey::NoMoreThanTwoConsecutiveShifts => "No more than 2 consecutive shifts",
            ConstraintKey::BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours => {
                "Break between non-consecutive shifts is at least 10 hours"
            }
            ConstraintKey::DailyMinutesMustNotExceedContractMaximum => {
                "Daily minutes must not exceed contract maximum"
            }
            ConstraintKey::WeeklyMinutesMustNotExceedContractMaximum => {
                "Weekly minutes must not exceed contract maximum"
            }
            ConstraintKey::MonthlyMinutesMustNotExceedContractMaximum => {
                "Monthly minutes must not exceed contract maximum"
            }
            ConstraintKey::YearlyMinutesMustNotExceedContractMaximum => {
                "Yearly minutes must not exceed contract maximum"
            }
            ConstraintKey::AssignEveryShift => "Assign every shift",
            ConstraintKey::EmployeeIsNotOriginalEmployee => "Employee is not original employee",
            ConstraintKey::UndesiredEmployeeTimeSlot => "Undesired time slot for an employee",
            ConstraintKey::DesiredEmployeeTimeSlot => "Desired time slot for an employee",
            ConstraintKey::EmployeeNotRotationEmployee => "Employee is not rotation employee",
        }
    }

    /// Key of the constraint in configuration files.
    pub const fn config_key(self) -> &'static str {
        match self {
            ConstraintKey::RequiredSkillForShift => "required_skill_for_shift",
            ConstraintKey::UnavailableEmployeeTimeSlot => "unavailable_employee_time_slot",
            ConstraintKey::NoOverlappingShifts => "no_overlapping_shifts",
            ConstraintKey::NoMoreThanTwoConsecutiveShifts => "no_more_than_two_consecutive_shifts",
            ConstraintKey::BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours => {
                "break_between_non_consecutive_shifts_is_at_least_ten_hours"
            }
            ConstraintKey::DailyMinutesMustNotExceedContractMaximum => {
                "daily_minutes_must_not_exceed_contract_maximum"
            }
            ConstraintKey::WeeklyMinutesMustNotExceedContractMaximum => {
                "weekly_minutes_must_not_exceed_contract_maximum"
            }
            ConstraintKey::MonthlyMinutesMustNotExceedContractMaximum => {
                "monthly_minutes_must_not_exceed_contract_maximum"
            }
            ConstraintKey::YearlyMinutesMustNotExceedContractMaximum => {
                "yearly_minutes_must_not_exceed_contract_maximum"
            }
            ConstraintKey::AssignEveryShift => "assign_every_shift",
            ConstraintKey::EmployeeIsNotOriginalEmployee => "employee_is_not_original_employee",
            ConstraintKey::UndesiredEmployeeTimeSlot => "undesired_employee_time_slot",
            ConstraintKey::DesiredEmployeeTimeSlot => "desired_employee_time_slot",
            ConstraintKey::EmployeeNotRotationEmployee => "employee_not_rotation_employee",
        }
    }

    /// Looks a key up by its configuration key.
    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.config_key() == key)
    }

    /// Looks a key up by its display name.
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.display_name() == name)
    }

    /// Position in catalogue order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ConstraintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ConstraintKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_config_key(s)
            .or_else(|| Self::from_display_name(s))
            .ok_or_else(|| ConfigError::Invalid(format!("unknown constraint '{}'", s)))
    }
}

/// How the yearly-maximum constraint weighs a group over its cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YearlyOverage {
    /// The group matches but contributes nothing.
    #[default]
    Placeholder,

    /// The group contributes its minutes over the cap, like the daily,
    /// weekly and monthly maxima.
    MinutesOverCap,
}

/// Environment mode controlling how much the score director verifies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// No verification.
    NonReproducible,

    /// Deterministic scoring with no verification.
    #[default]
    Reproducible,

    /// Verifies the incremental score on every score calculation.
    FastAssert,

    /// Verifies the incremental score after every change.
    FullAssert,
}

/// Per-roster constraint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RosterConstraintConfiguration {
    /// First day of the week used to bucket weekly totals.
    #[serde(default = "default_week_start_day", with = "weekday_name")]
    pub week_start_day: Weekday,

    /// Weight of every constraint, keyed by constraint.
    #[serde(default = "default_weights")]
    pub weights: BTreeMap<ConstraintKey, HardMediumSoftScore>,

    /// How the yearly maximum weighs its overage.
    #[serde(default)]
    pub yearly_overage: YearlyOverage,
}

fn default_week_start_day() -> Weekday {
    Weekday::Mon
}

fn default_weights() -> BTreeMap<ConstraintKey, HardMediumSoftScore> {
    use ConstraintKey::*;

    BTreeMap::from([
        (RequiredSkillForShift, HardMediumSoftScore::of_hard(100)),
        (UnavailableEmployeeTimeSlot, HardMediumSoftScore::of_hard(50)),
        (NoOverlappingShifts, HardMediumSoftScore::of_hard(20)),
        (NoMoreThanTwoConsecutiveShifts, HardMediumSoftScore::of_hard(10)),
        (BreakBetweenNonConsecutiveShiftsIsAtLeastTenHours, HardMediumSoftScore::of_hard(10)),
        (DailyMinutesMustNotExceedContractMaximum, HardMediumSoftScore::ONE_HARD),
        (WeeklyMinutesMustNotExceedContractMaximum, HardMediumSoftScore::ONE_HARD),
        (MonthlyMinutesMustNotExceedContractMaximum, HardMediumSoftScore::ONE_HARD),
        (YearlyMinutesMustNotExceedContractMaximum, HardMediumSoftScore::ONE_HARD),
        (AssignEveryShift, HardMediumSoftScore::ONE_MEDIUM),
        (EmployeeIsNotOriginalEmployee, HardMediumSoftScore::of_soft(100_000_000_000)),
        (UndesiredEmployeeTimeSlot, HardMediumSoftScore::of_soft(20)),
        (DesiredEmployeeTimeSlot, HardMediumSoftScore::of_soft(10)),
        (EmployeeNotRotationEmployee, HardMediumSoftScore::of_soft(50)),
    ])
}

impl Default for RosterConstraintConfiguration {
    fn default() -> Self {
        Self {
            week_start_day: default_week_start_day(),
            weights: default_weights(),
            yearly_overage: YearlyOverage::default(),
        }
    }
}

impl RosterConstraintConfiguration {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration file, choosing the format by extension
    /// (`.yaml`/`.yml` for YAML, anything else for TOML).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses and validates configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the weight of one constraint.
    pub fn with_weight(mut self, key: ConstraintKey, weight: HardMediumSoftScore) -> Self {
        self.weights.insert(key, weight);
        self
    }

    /// Sets the first day of the week.
    pub fn with_week_start_day(mut self, day: Weekday) -> Self {
        self.week_start_day = day;
        self
    }

    /// Sets how the yearly maximum weighs its overage.
    pub fn with_yearly_overage(mut self, yearly_overage: YearlyOverage) -> Self {
        self.yearly_overage = yearly_overage;
        self
    }

    /// Returns the weight of a constraint, zero when unset.
    pub fn weight(&self, key: ConstraintKey) -> HardMediumSoftScore {
        self.weights.get(&key).copied().unwrap_or_default()
    }

    /// Checks that every constraint has a weight.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first missing key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match ConstraintKey::ALL.iter().find(|k| !self.weights.contains_key(k)) {
            Some(missing) => Err(ConfigError::Invalid(format!(
                "missing weight for '{}'",
                missing.config_key()
            ))),
            None => Ok(()),
        }
    }
}

/// Lower-case full weekday names, e.g. `"monday"`.
mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        let name = match day {
            Weekday::Mon => "monday",
            Weekday::Tue => "tuesday",
            Weekday::Wed => "wednesday",
            Weekday::Thu => "thursday",
            Weekday::Fri => "friday",
            Weekday::Sat => "saturday",
            Weekday::Sun => "sunday",
        };
        serializer.serialize_str(name)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse::<Weekday>()
            .map_err(|_| serde::de::Error::custom(format!("invalid weekday '{}'", name)))
    }
}
