//! CLI commands

pub mod analyze;
pub mod recommend;
