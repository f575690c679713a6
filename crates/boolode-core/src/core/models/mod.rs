//! # Core Models Module
//!
//! Data structures mirroring the experiment configuration document one-to-one.
//!
//! ## Key Components
//!
//! - [`settings`] - The `global_settings` section and the supported model types
//! - [`job`] - A single simulation job from the `jobs` list
//! - [`post_processing`] - The optional post-processing steps and their parameter records
//! - [`experiment`] - The whole document
//!
//! ## Usage
//!
//! ```ignore
//! use boolode::core::models::experiment::ExperimentConfig;
//!
//! let config = ExperimentConfig::load("config.yaml")?;
//! for job in &config.jobs {
//!     println!("{} simulates {} cells", job.name, job.num_cells);
//! }
//! ```

pub mod experiment;
pub mod job;
pub mod post_processing;
pub mod settings;
