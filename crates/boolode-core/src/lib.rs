//! # BoolODE Experiment Library
//!
//! Typed loading, validation and run planning for BoolODE gene-regulatory-network
//! simulation experiments.
//!
//! An experiment is described by a single YAML document with three sections:
//! `global_settings`, `jobs` and `post_processing`. This library turns that document
//! into strongly typed values, checks it, and derives for each job a deterministic
//! run plan describing what a simulation engine has to produce and where.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless schema types (`ExperimentConfig`, `Job`,
//!   `PostProcessing`) and I/O for the configuration document and the auxiliary
//!   model and initial-condition files.
//!
//! - **[`engine`]: The Logic Core.** Resolution of jobs into fully defaulted
//!   `JobSettings`, schema validation, and the planning arithmetic (time grid,
//!   snapshot windows, seeds, output layout, post-processing datasets).
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie `core` and
//!   `engine` together: building an `ExperimentPlan` and materialising it on disk.
//!
//! The numerical integration of the models is not part of this library; the plan
//! is the contract handed to an external engine.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;
