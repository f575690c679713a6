//! Provides input/output for the experiment document and the files it refers to.
//!
//! The experiment document itself is handled through the [`traits::ConfigFile`]
//! interface, implemented for YAML (the native BoolODE format) and TOML. The
//! tab-separated model definition and initial-condition tables are read by their own
//! modules; both rely on [`literal`] for the list literals BoolODE writes into cells.

pub mod format;
pub mod initial_conditions;
pub mod literal;
pub mod model_definition;
pub mod toml;
pub mod traits;
pub mod yaml;
