//! Pipeline template documents
//!
//! A template names its parent through `source`. Everything the chain
//! resolver does not need to understand is kept verbatim in
//! [`PipelineTemplate::body`] for the downstream merge.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An inheritable pipeline configuration document
///
/// Values are immutable once loaded; the resolver only orders them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineTemplate {
    /// Schema version declared by the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Template identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// URI of the parent template; absent or empty for a root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Descriptive metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TemplateMetadata>,

    /// Whether child templates are forbidden from overriding stages
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub protect: bool,

    /// Remaining top-level keys (`variables`, `configuration`, `stages`, ...)
    #[serde(flatten)]
    pub body: IndexMap<String, serde_json::Value>,
}

impl PipelineTemplate {
    /// Create an empty root template
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With template id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// With parent source reference
    #[inline]
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// With schema version
    #[inline]
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// With an additional body entry
    #[inline]
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.body.insert(key.into(), value);
        self
    }

    /// Parent reference, if this template inherits from another
    ///
    /// An empty `source` string marks a root exactly like an absent one.
    #[inline]
    #[must_use]
    pub fn parent_source(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether this template has no parent
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_source().is_none()
    }

    /// Look up a body entry by key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.body.get(key)
    }

    /// Human-readable label for logs and listings
    #[must_use]
    pub fn label(&self) -> &str {
        self.id
            .as_deref()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.name.as_deref()))
            .unwrap_or("<anonymous>")
    }
}

/// Template metadata block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning team or person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Applications or scopes the template is offered to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
}

/// Entry point of a resolution: the URI of the most specific template
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateSource {
    /// Raw source URI as supplied by the caller
    pub source: String,
}

impl TemplateSource {
    /// Create new template source
    #[inline]
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Raw source string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl From<&str> for TemplateSource {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for TemplateSource {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}
