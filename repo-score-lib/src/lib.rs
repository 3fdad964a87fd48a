#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for repo-score
//!
//! This library consolidates all functionality for the repo-score tool, which scores
//! open-source packages hosted on GitHub or published to npm.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`facts`]: URL resolution and data fetching from GitHub, npm, and git
//! - [`metrics`]: The individual scoring functions
//! - [`scoring`]: Concurrent latency measurement and weighted aggregation

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod facts;
pub mod metrics;
pub mod scoring;

pub use crate::commands::{Host, run};
