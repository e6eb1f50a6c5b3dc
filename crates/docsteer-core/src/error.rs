//! Error types for docsteer
//!
//! Only structural failures surface as errors. Sub-steps of workspace analysis
//! (malformed manifest, unreadable directory) degrade locally and never reach
//! this type.

use thiserror::Error;

/// Result type alias for docsteer operations
pub type SteerResult<T> = Result<T, SteerError>;

/// Machine-readable error code so callers can branch without string matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoWorkspace,
    AnalysisFailed,
    FetchFailed,
    Config,
}

impl ErrorCode {
    /// Stable string form of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoWorkspace => "NO_WORKSPACE",
            Self::AnalysisFailed => "ANALYSIS_FAILED",
            Self::FetchFailed => "FETCH_FAILED",
            Self::Config => "CONFIG_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for docsteer
#[derive(Error, Debug, Clone)]
pub enum SteerError {
    /// No workspace root could be resolved
    #[error("No workspace folder is open")]
    NoWorkspace,

    /// Workspace analysis failed in a way that could not be degraded
    #[error("Workspace analysis failed: {message}")]
    AnalysisFailed { message: String },

    /// The document catalog could not be retrieved
    #[error("Failed to fetch document catalog: {message}")]
    FetchFailed { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SteerError {
    /// Create a new analysis error
    pub fn analysis(message: impl Into<String>) -> Self {
        Self::AnalysisFailed {
            message: message.into(),
        }
    }

    /// Create a new catalog fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::FetchFailed {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get the error code for programmatic handling
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoWorkspace => ErrorCode::NoWorkspace,
            Self::AnalysisFailed { .. } => ErrorCode::AnalysisFailed,
            Self::FetchFailed { .. } => ErrorCode::FetchFailed,
            Self::Config { .. } => ErrorCode::Config,
        }
    }

    /// Check if retrying the whole call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }
}
