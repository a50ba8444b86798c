//! Source URI validation
//!
//! A template `source` must be a well-formed URI with a non-empty scheme.
//! [`TemplateUri`] keeps the raw string verbatim next to the parsed form:
//! the raw string is the identity used for cycle detection, the parsed form
//! is what scheme loaders inspect.

use std::path::{Path, PathBuf};
use url::Url;

/// Source string rejected before any loader is consulted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    /// Not a syntactically valid URI
    #[error("invalid URI '{uri}': {reason}")]
    Malformed {
        /// Offending source string
        uri: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Parsed, but no scheme to dispatch on
    #[error("invalid URI, no scheme provided '{uri}'")]
    MissingScheme {
        /// Offending source string
        uri: String,
    },
}

impl UriError {
    /// The source string that failed validation
    #[inline]
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Malformed { uri, .. } | Self::MissingScheme { uri } => uri,
        }
    }
}

/// A validated template source reference
#[derive(Debug, Clone)]
pub struct TemplateUri {
    raw: String,
    url: Url,
}

impl TemplateUri {
    /// Validate a raw source string
    ///
    /// # Errors
    /// - [`UriError::Malformed`] for whitespace, control characters or other
    ///   syntax errors
    /// - [`UriError::MissingScheme`] when the string has no scheme component
    pub fn parse(raw: &str) -> Result<Self, UriError> {
        if let Some(c) = raw.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(UriError::Malformed {
                uri: raw.to_string(),
                reason: format!("illegal character {c:?}"),
            });
        }

        match Url::parse(raw) {
            Ok(url) => Ok(Self {
                raw: raw.to_string(),
                url,
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => Err(UriError::MissingScheme {
                uri: raw.to_string(),
            }),
            Err(e) => Err(UriError::Malformed {
                uri: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Build a `file` URI for an absolute filesystem path
    ///
    /// Returns `None` for relative paths.
    #[must_use]
    pub fn from_file_path(path: impl AsRef<Path>) -> Option<Self> {
        let url = Url::from_file_path(path).ok()?;
        Some(Self {
            raw: url.to_string(),
            url,
        })
    }

    /// The source string exactly as written
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lower-cased scheme (`file`, `https`, ...)
    #[inline]
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Path component
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// File extension of the last path segment, if any
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let last = self.url.path_segments()?.next_back()?;
        let (stem, ext) = last.rsplit_once('.')?;
        (!stem.is_empty() && !ext.is_empty()).then_some(ext)
    }

    /// Filesystem path for `file` URIs
    #[must_use]
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.url.scheme() != "file" {
            return None;
        }
        self.url.to_file_path().ok()
    }

    /// Parsed URL
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl PartialEq for TemplateUri {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for TemplateUri {}

impl std::hash::Hash for TemplateUri {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl std::str::FromStr for TemplateUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for TemplateUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_file_uri() {
        let uri = TemplateUri::parse("file:///templates/base.yml").unwrap();
        assert_eq!(uri.scheme(), "file");
        assert_eq!(uri.path(), "/templates/base.yml");
        assert_eq!(uri.extension(), Some("yml"));
    }

    #[test]
    fn parse_custom_scheme() {
        let uri = TemplateUri::parse("catalog://team/base").unwrap();
        assert_eq!(uri.scheme(), "catalog");
        assert_eq!(uri.extension(), None);
    }

    #[test]
    fn raw_string_is_preserved() {
        // The parsed URL normalizes the scheme; the identity must not.
        let uri = TemplateUri::parse("HTTP://Example.com/a.json").unwrap();
        assert_eq!(uri.as_str(), "HTTP://Example.com/a.json");
        assert_eq!(uri.scheme(), "http");
    }

    #[test]
    fn whitespace_is_malformed() {
        let err = TemplateUri::parse("not a uri://bad").unwrap_err();
        assert!(matches!(err, UriError::Malformed { .. }));
        assert_eq!(err.uri(), "not a uri://bad");
        assert!(err.to_string().starts_with("invalid URI 'not a uri://bad'"));
    }

    #[test]
    fn bare_text_has_no_scheme() {
        let err = TemplateUri::parse("justtext").unwrap_err();
        assert_eq!(
            err,
            UriError::MissingScheme {
                uri: "justtext".to_string()
            }
        );
        assert_eq!(err.to_string(), "invalid URI, no scheme provided 'justtext'");
    }

    #[test]
    fn empty_string_has_no_scheme() {
        assert!(matches!(
            TemplateUri::parse(""),
            Err(UriError::MissingScheme { .. })
        ));
    }

    #[test]
    fn relative_path_has_no_scheme() {
        assert!(matches!(
            TemplateUri::parse("templates/base.yml"),
            Err(UriError::MissingScheme { .. })
        ));
    }

    #[test]
    fn to_file_path_only_for_file_scheme() {
        let file = TemplateUri::parse("file:///tmp/a.yml").unwrap();
        assert_eq!(file.to_file_path(), Some(PathBuf::from("/tmp/a.yml")));

        let http = TemplateUri::parse("http://example.com/tmp/a.yml").unwrap();
        assert_eq!(http.to_file_path(), None);
    }

    #[test]
    fn from_file_path_requires_absolute() {
        assert!(TemplateUri::from_file_path("relative.yml").is_none());

        let uri = TemplateUri::from_file_path("/tmp/abs.yml").unwrap();
        assert_eq!(uri.as_str(), "file:///tmp/abs.yml");
    }

    #[test]
    fn equality_is_raw_string_identity() {
        let a = TemplateUri::parse("file:///a.yml").unwrap();
        let b = TemplateUri::parse("file:///a.yml").unwrap();
        let c = TemplateUri::parse("file:///a.yml#frag").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    proptest! {
        #[test]
        fn prop_scheme_prefixed_paths_parse(
            scheme in "[a-z][a-z0-9+.-]{0,8}",
            path in "[a-z0-9/_.-]{0,24}",
        ) {
            // Special schemes require a host and are covered above.
            prop_assume!(!["file", "http", "https", "ws", "wss", "ftp"].contains(&scheme.as_str()));
            let raw = format!("{scheme}:{path}");
            let uri = TemplateUri::parse(&raw).unwrap();
            prop_assert_eq!(uri.as_str(), raw.as_str());
            prop_assert_eq!(uri.scheme(), scheme.as_str());
        }

        #[test]
        fn prop_strings_with_spaces_are_rejected(
            head in "[a-z]{1,8}",
            tail in "[a-z:/]{0,8}",
        ) {
            let raw = format!("{head} {tail}");
            prop_assert!(
                matches!(TemplateUri::parse(&raw), Err(UriError::Malformed { .. })),
                "whitespace must be rejected"
            );
        }
    }
}
