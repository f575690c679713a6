//! # Core Module
//!
//! Stateless building blocks: the experiment schema and the readers and writers for
//! the files an experiment refers to.
//!
//! - **Schema** ([`models`]) - `ExperimentConfig` and its sections
//! - **File I/O** ([`io`]) - YAML/TOML codec, tab-separated model and initial-condition
//!   readers, and the list-literal parser those files need

pub mod io;
pub mod models;
