//! Workspace-aware document recommendations

pub mod options;
pub mod service;

#[cfg(test)]
mod tests;

pub use options::{DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE, RecommendationOptions};
pub use service::RecommendationService;
