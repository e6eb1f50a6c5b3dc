//! Options for a single recommendation request
//!
//! ```ignore
//! let options = RecommendationOptions::default()
//!     .with_max_results(5)
//!     .with_min_score(20)
//!     .exclude_installed();
//! ```

use serde::{Deserialize, Serialize};

/// Default number of recommendations returned
pub const DEFAULT_MAX_RESULTS: usize = 10;
/// Default minimum score a document needs to be recommended
pub const DEFAULT_MIN_SCORE: u32 = 10;

/// Filtering and truncation applied after ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationOptions {
    pub max_results: usize,
    /// Keep documents that are already installed
    pub include_installed: bool,
    pub min_score: u32,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            include_installed: true,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl RecommendationOptions {
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_min_score(mut self, min_score: u32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_include_installed(mut self, include_installed: bool) -> Self {
        self.include_installed = include_installed;
        self
    }

    pub fn exclude_installed(self) -> Self {
        self.with_include_installed(false)
    }
}
