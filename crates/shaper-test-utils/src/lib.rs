//! Shared test utilities for the shaper workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`fixture`]: [`FixtureDir`], a temporary configuration tree with
//!   helpers for setup and assertions, plus [`snapshot_dir`] for comparing
//!   whole trees

pub mod fixture;

pub use fixture::{FixtureDir, snapshot_dir};
