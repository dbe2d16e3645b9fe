// src/error.rs
//! Error kinds for a scrape run.
//!
//! `Fetch`, `Structure` and `SchemaMismatch` abort the run where they occur: a skipped
//! municipality would shift every following row against the wrong code, so nothing is
//! skipped and nothing is defaulted. Each variant names the link (URL) that failed.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an error was raised in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Reading the district index page.
    Discovery,
    /// Resolving party columns from the first detail page.
    Schema,
    /// Extracting one municipality record.
    Record,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Discovery => "link discovery",
            Stage::Schema => "header resolution",
            Stage::Record => "record extraction",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {status}")]
    Status { status: u16 },

    /// Page could not be produced for a reason outside HTTP (offline fetchers, fixtures).
    #[error("{0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("unexpected page structure during {stage} ({url}): {detail}")]
    Structure {
        stage: Stage,
        url: String,
        detail: String,
    },

    #[error("municipality {code} ({url}) has {found} vote cells, schema expects {expected}")]
    SchemaMismatch {
        code: String,
        url: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn structure(stage: Stage, url: impl fmt::Display, detail: impl Into<String>) -> Self {
        Error::Structure {
            stage,
            url: url.to_string(),
            detail: detail.into(),
        }
    }

    pub fn fetch(url: impl fmt::Display, source: FetchError) -> Self {
        Error::Fetch { url: url.to_string(), source }
    }

    /// Stage for structural failures; `None` for every other kind.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Structure { stage, .. } => Some(*stage),
            Error::SchemaMismatch { .. } => Some(Stage::Record),
            _ => None,
        }
    }
}
