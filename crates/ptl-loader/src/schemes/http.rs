//! HTTP(S) loader
//!
//! Blocking GET via reqwest. Timeout policy lives here, not in the resolver.

use crate::error::LoaderError;
use crate::scheme::SchemeLoader;
use ptl_template::{PipelineTemplate, TemplateFormat, TemplateUri};
use std::time::Duration;

/// Loads templates from `http://` and `https://` URIs
#[derive(Debug, Clone)]
pub struct HttpSchemeLoader {
    client: reqwest::blocking::Client,
    timeout: Duration,
    max_body_size: u64,
}

impl HttpSchemeLoader {
    /// Default request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default response body limit, same as the file loader's size limit
    pub const DEFAULT_MAX_BODY_SIZE: u64 = 10 * 1024 * 1024;

    /// Create loader with the default timeout
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Create loader with a per-request timeout
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            timeout,
            max_body_size: Self::DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// With maximum accepted response body size in bytes
    #[inline]
    #[must_use]
    pub fn with_max_body_size(mut self, bytes: u64) -> Self {
        self.max_body_size = bytes;
        self
    }

    fn too_large(&self, len: u64) -> LoaderError {
        LoaderError::other(format!(
            "response too large: {len} bytes (max: {})",
            self.max_body_size
        ))
    }

    /// Configured request timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpSchemeLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeLoader for HttpSchemeLoader {
    fn name(&self) -> &str {
        "http"
    }

    fn supports(&self, uri: &TemplateUri) -> bool {
        matches!(uri.scheme(), "http" | "https")
    }

    fn load(&self, uri: &TemplateUri) -> Result<PipelineTemplate, LoaderError> {
        let response = self
            .client
            .get(uri.url().clone())
            .timeout(self.timeout)
            .send()
            .map_err(|e| LoaderError::Http(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LoaderError::NotFound(uri.to_string()));
        }
        if !status.is_success() {
            return Err(LoaderError::Http(format!("unexpected status {status} from {uri}")));
        }

        if let Some(len) = response.content_length() {
            if len > self.max_body_size {
                return Err(self.too_large(len));
            }
        }

        let body = response
            .bytes()
            .map_err(|e| LoaderError::Http(e.to_string()))?;
        if body.len() as u64 > self.max_body_size {
            return Err(self.too_large(body.len() as u64));
        }
        tracing::trace!(uri = %uri, bytes = body.len(), "Fetched template");

        Ok(TemplateFormat::from_extension(uri.extension()).decode(&body)?)
    }
}
