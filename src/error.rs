use thiserror::Error;

/// Everything that can abort a run. None of these are recovered from locally.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("login failed: {0}")]
    Authentication(String),

    #[error("GET {url} failed: HTTP {status} {reason}")]
    Navigation {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("unexpected page structure at {url}: {details}")]
    StructuralParse { url: String, details: String },

    #[error("no cookie starting with {prefix} in response from {url}")]
    AntiforgeryMissing { url: String, prefix: String },

    #[error("POST {url} failed: HTTP {status} {reason}")]
    Submission {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("{url} lists {rows} lessons but the schedule has {topics} topics")]
    RowCountMismatch {
        url: String,
        rows: usize,
        topics: usize,
    },

    #[error("schedule line {line}: {reason}")]
    Schedule { line: usize, reason: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type PortalResult<T> = Result<T, PortalError>;
