//! Error types for portrait-fetch.

use portrait_verify::ContentHash;
use thiserror::Error;

use crate::core::PageError;

/// Coarse classification of a [`SourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    HttpStatus,
    Parse,
    HashMismatch,
    Index,
    NotFound,
    PageBudgetExceeded,
    Aggregate,
}

/// Failure of one source, or of one network's worth of sources.
///
/// None of these are fatal for a fetch on their own: a failing source is
/// dropped from the race and its siblings carry on.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{url} answered HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("{url} did not serve valid JSON: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("content from {url} does not hash to {expected}")]
    HashMismatch { url: String, expected: ContentHash },

    #[error("archive index {url} returned an unusable page: {source}")]
    Index {
        url: String,
        #[source]
        source: PageError,
    },

    #[error("no archive entry verifies as {hash} ({pages} page(s) searched)")]
    NotFound { hash: ContentHash, pages: u32 },

    #[error("archive search for {hash} gave up after {pages} full page(s)")]
    PageBudgetExceeded { hash: ContentHash, pages: u32 },

    #[error("all {} mirror(s) failed", .0.len())]
    Aggregate(Vec<SourceError>),
}

impl SourceError {
    pub(crate) fn network<E>(url: &str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SourceError::Network {
            url: url.to_string(),
            source: Box::new(err),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::Network { .. } => ErrorKind::Network,
            SourceError::HttpStatus { .. } => ErrorKind::HttpStatus,
            SourceError::Parse { .. } => ErrorKind::Parse,
            SourceError::HashMismatch { .. } => ErrorKind::HashMismatch,
            SourceError::Index { .. } => ErrorKind::Index,
            SourceError::NotFound { .. } => ErrorKind::NotFound,
            SourceError::PageBudgetExceeded { .. } => ErrorKind::PageBudgetExceeded,
            SourceError::Aggregate(_) => ErrorKind::Aggregate,
        }
    }

    /// Leaf errors, with aggregates expanded in place.
    pub fn flatten(self) -> Vec<SourceError> {
        match self {
            SourceError::Aggregate(errors) => errors.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

/// Outcome of a portrait fetch that produced no document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every mirror and the archive failed. `errors` lists mirror failures
    /// first, then the archive's.
    #[error("all {} source(s) failed for {hash}", .errors.len())]
    AllSourcesFailed {
        hash: ContentHash,
        errors: Vec<SourceError>,
    },

    #[error("fetch cancelled")]
    Cancelled,
}

impl FetchError {
    /// Underlying source failures, empty for a cancelled fetch.
    pub fn errors(&self) -> &[SourceError] {
        match self {
            FetchError::AllSourcesFailed { errors, .. } => errors,
            FetchError::Cancelled => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
