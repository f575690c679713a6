//! # Workflows Module
//!
//! High-level entry points that orchestrate the engine for a whole experiment.
//!
//! ## Architecture
//!
//! - **Planning Workflow** ([`plan`]) - Validates an experiment and derives the
//!   run plan of every selected job, including its post-processing datasets.
//! - **Preparation Workflow** ([`prepare`]) - Materializes a plan on disk: output
//!   directories, per-job `run_plan.yaml` files and sample manifests.
//!
//! Both workflows report their phases through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter) and log through
//! `tracing`.

pub mod plan;
pub mod prepare;
