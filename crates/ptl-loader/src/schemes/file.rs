//! Local filesystem loader

use crate::error::LoaderError;
use crate::scheme::SchemeLoader;
use ptl_template::{PipelineTemplate, TemplateFormat, TemplateUri};
use std::io::ErrorKind;

/// Loads templates from `file://` URIs
///
/// The document format follows the file extension (see
/// [`TemplateFormat::from_path`]).
#[derive(Debug, Clone)]
pub struct FileSchemeLoader {
    max_file_size: u64,
}

impl FileSchemeLoader {
    /// Create loader with the default 10MB size limit
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
        }
    }

    /// With maximum accepted file size in bytes
    #[inline]
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

impl Default for FileSchemeLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeLoader for FileSchemeLoader {
    fn name(&self) -> &str {
        "file"
    }

    fn supports(&self, uri: &TemplateUri) -> bool {
        uri.scheme() == "file"
    }

    fn load(&self, uri: &TemplateUri) -> Result<PipelineTemplate, LoaderError> {
        let path = uri
            .to_file_path()
            .ok_or_else(|| LoaderError::NotFound(format!("not a local file path: {uri}")))?;

        let metadata = std::fs::metadata(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoaderError::NotFound(path.display().to_string()),
            _ => LoaderError::io_error(&path, e),
        })?;

        if metadata.len() > self.max_file_size {
            return Err(LoaderError::other(format!(
                "file too large: {} bytes (max: {})",
                metadata.len(),
                self.max_file_size
            )));
        }

        let bytes = std::fs::read(&path).map_err(|e| LoaderError::io_error(&path, e))?;
        tracing::trace!(path = %path.display(), bytes = bytes.len(), "Read template file");

        Ok(TemplateFormat::from_path(&path).decode(&bytes)?)
    }
}
