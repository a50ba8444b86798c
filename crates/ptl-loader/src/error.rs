//! Error types for template loading
//!
//! Two layers:
//! - [`LoaderError`]: what a scheme backend reports when a fetch fails
//! - [`TemplateLoaderError`]: what chain resolution reports to callers

use ptl_template::{FormatError, UriError};
use std::path::PathBuf;

/// Backend-defined fetch failure
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// Referenced document does not exist
    #[error("template not found: {0}")]
    NotFound(String),

    /// IO error reading the document
    #[error("io error reading {path}: {source}")]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Document fetched but could not be decoded
    #[error("failed to decode template: {0}")]
    Decode(#[from] FormatError),

    /// Remote endpoint failure
    #[error("http error: {0}")]
    Http(String),

    /// Anything else a backend wants to surface
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl LoaderError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap an arbitrary backend error
    pub fn other(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(error.into())
    }
}

/// Classification of resolution failures
///
/// All kinds are terminal for the current resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed source or missing scheme
    InvalidUri,
    /// No registered loader claims the scheme
    NoLoaderFound,
    /// A source reference repeated within one resolution
    CycleDetected,
    /// The selected backend failed
    BackendFetchFailure,
}

/// Chain resolution error
#[derive(Debug, thiserror::Error)]
pub enum TemplateLoaderError {
    /// Source string rejected before any loader was consulted
    #[error(transparent)]
    InvalidUri(#[from] UriError),

    /// No registered loader supports the scheme
    #[error("no template scheme loader found for '{scheme}' (source '{uri}')")]
    NoLoaderFound {
        /// Scheme no loader claimed
        scheme: String,
        /// Source string as given
        uri: String,
    },

    /// Inheritance cycle
    #[error("illegal cycle detected loading pipeline template '{uri}'")]
    CycleDetected {
        /// Source reference seen twice
        uri: String,
    },

    /// Backend fetch or decode failure
    #[error("failed loading pipeline template '{uri}' with loader '{loader}': {source}")]
    Fetch {
        /// Source string being fetched
        uri: String,
        /// Name of the selected loader
        loader: String,
        /// Backend failure
        #[source]
        source: LoaderError,
    },
}

impl TemplateLoaderError {
    /// Create cycle error
    #[inline]
    pub fn cycle(uri: impl Into<String>) -> Self {
        Self::CycleDetected { uri: uri.into() }
    }

    /// Create fetch error
    #[inline]
    pub fn fetch(uri: impl Into<String>, loader: impl Into<String>, source: LoaderError) -> Self {
        Self::Fetch {
            uri: uri.into(),
            loader: loader.into(),
            source,
        }
    }

    /// Error classification
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUri(_) => ErrorKind::InvalidUri,
            Self::NoLoaderFound { .. } => ErrorKind::NoLoaderFound,
            Self::CycleDetected { .. } => ErrorKind::CycleDetected,
            Self::Fetch { .. } => ErrorKind::BackendFetchFailure,
        }
    }

    /// The source string that caused the failure
    #[must_use]
    pub fn offending_source(&self) -> &str {
        match self {
            Self::InvalidUri(e) => e.uri(),
            Self::NoLoaderFound { uri, .. }
            | Self::CycleDetected { uri }
            | Self::Fetch { uri, .. } => uri,
        }
    }
}

/// Result type alias for chain resolution
pub type LoaderResult<T> = Result<T, TemplateLoaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_error_display() {
        let err = TemplateLoaderError::cycle("file:///a.yml");
        assert_eq!(
            err.to_string(),
            "illegal cycle detected loading pipeline template 'file:///a.yml'"
        );
        assert_eq!(err.kind(), ErrorKind::CycleDetected);
    }

    #[test]
    fn invalid_uri_is_transparent() {
        let err: TemplateLoaderError = UriError::MissingScheme {
            uri: "justtext".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "invalid URI, no scheme provided 'justtext'");
        assert_eq!(err.kind(), ErrorKind::InvalidUri);
        assert_eq!(err.offending_source(), "justtext");
    }

    #[test]
    fn no_loader_names_scheme() {
        let err = TemplateLoaderError::NoLoaderFound {
            scheme: "s3".to_string(),
            uri: "s3://bucket/t.yml".to_string(),
        };
        assert!(err.to_string().contains("'s3'"));
        assert_eq!(err.offending_source(), "s3://bucket/t.yml");
    }

    #[test]
    fn fetch_error_keeps_cause() {
        use std::error::Error as _;

        let err = TemplateLoaderError::fetch(
            "file:///missing.yml",
            "file",
            LoaderError::NotFound("/missing.yml".to_string()),
        );
        assert_eq!(err.kind(), ErrorKind::BackendFetchFailure);
        assert!(err.to_string().contains("file:///missing.yml"));

        let cause = err.source().unwrap();
        assert_eq!(cause.to_string(), "template not found: /missing.yml");
    }

    #[test]
    fn loader_error_other() {
        let err = LoaderError::other("catalog unavailable");
        assert_eq!(err.to_string(), "catalog unavailable");
    }
}
