//! Template document formats
//!
//! Uses serde_yaml and serde_json. YAML is the default: every JSON document
//! is also valid YAML, so an unknown extension still decodes.

use crate::PipelineTemplate;
use std::path::Path;

/// Error decoding raw bytes into a template
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Document is empty or whitespace only
    #[error("empty {0} document")]
    Empty(TemplateFormat),

    /// Document is not valid UTF-8
    #[error("{format} document is not valid UTF-8: {source}")]
    Encoding {
        /// Expected format
        format: TemplateFormat,
        /// Decoding error
        #[source]
        source: std::str::Utf8Error,
    },

    /// YAML syntax or shape error
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON syntax or shape error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialized template format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateFormat {
    /// YAML (`.yml`, `.yaml`, anything unrecognized)
    #[default]
    Yaml,
    /// JSON (`.json`)
    Json,
}

impl TemplateFormat {
    /// Pick a format from a file extension (without dot)
    #[must_use]
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some(e) if e.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Pick a format from a filesystem path
    #[inline]
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        Self::from_extension(path.extension().and_then(|e| e.to_str()))
    }

    /// Decode a single template document
    ///
    /// # Errors
    /// - [`FormatError::Empty`] for blank input
    /// - [`FormatError::Encoding`] for non UTF-8 input
    /// - [`FormatError::Yaml`] / [`FormatError::Json`] for syntax errors
    pub fn decode(self, bytes: &[u8]) -> Result<PipelineTemplate, FormatError> {
        let text = std::str::from_utf8(bytes).map_err(|source| FormatError::Encoding {
            format: self,
            source,
        })?;

        if text.trim().is_empty() {
            return Err(FormatError::Empty(self));
        }

        match self {
            Self::Yaml => Ok(serde_yaml::from_str(text)?),
            Self::Json => Ok(serde_json::from_str(text)?),
        }
    }

    /// Encode a template in this format
    ///
    /// # Errors
    /// Propagates serializer errors.
    pub fn encode(self, template: &PipelineTemplate) -> Result<String, FormatError> {
        match self {
            Self::Yaml => Ok(serde_yaml::to_string(template)?),
            Self::Json => Ok(serde_json::to_string_pretty(template)?),
        }
    }
}

impl std::fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => f.write_str("YAML"),
            Self::Json => f.write_str("JSON"),
        }
    }
}

impl std::str::FromStr for TemplateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown template format '{other}'")),
        }
    }
}
