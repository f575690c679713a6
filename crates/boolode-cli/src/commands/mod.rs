pub mod fmt;
pub mod plan;
pub mod prepare;
pub mod show;
pub mod validate;
