//! Utility functions for the engine module.
//!
//! Seeded sampling helpers shared by the planner and the post-processing dataset plan.

pub mod sampling;
