//! Document matching
//!
//! Scores catalog documents against a workspace fingerprint and explains each
//! score with per-factor [`MatchReason`]s.
//!
//! | Factor | Points per match |
//! |---|---|
//! | framework | 30 |
//! | dependency | 20 |
//! | file-pattern | 15 |
//! | language | 10 |

pub mod matcher;
pub mod types;


pub use matcher::{
    DEPENDENCY_WEIGHT, DocumentMatcher, FILE_PATTERN_WEIGHT, FRAMEWORK_WEIGHT, LANGUAGE_WEIGHT,
};
pub use types::{DocumentMetadata, MatchReason, MatchReasonType, ScoredDocument};
