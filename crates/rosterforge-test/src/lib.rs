//! Shared test fixtures for RosterForge crates.
//!
//! This crate provides roster builders and seeded generators for tests.
//! It depends on `rosterforge-roster`, so only crates downstream of it
//! (the `rosterforge` facade and its integration tests) can use it.
//!
//! - [`fixtures`] - Timestamp parsing and small hand-built rosters
//! - [`random`] - Seeded random rosters and roster mutations
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! rosterforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use rosterforge_test::{random_roster, RosterSize};
//!
//! let roster = random_roster(7, RosterSize::default());
//! assert!(roster.validate().is_ok());
//! ```

pub mod fixtures;
pub mod random;

pub use fixtures::{at, availability, sample_roster, shift};
pub use random::{random_mutation, random_roster, RosterMutation, RosterSize};
