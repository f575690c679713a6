//! # Engine Module
//!
//! Turns a parsed experiment into checked, fully resolved job settings and derives
//! the run plan of every job.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - `JobSettings`, the defaulted view of a job
//! - **Validation** ([`validation`]) - Schema checks collected into a `ValidationReport`
//! - **Planning** ([`plan`]) - Time grid, snapshot windows, seeds, output layout and
//!   post-processing datasets
//! - **Progress Monitoring** ([`progress`]) - Progress events for long-running workflows
//! - **Error Handling** ([`error`]) - Engine-level error type
//!
//! Every random draw made while planning comes from an explicitly seeded generator,
//! so a plan is fully reproducible from the configuration and the seed.

pub mod config;
pub mod error;
pub mod plan;
pub mod progress;
pub mod utils;
pub mod validation;
