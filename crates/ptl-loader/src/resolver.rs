//! Template chain resolution
//!
//! Follows `source` references from the requested template up to a root and
//! returns the chain root-first, ready for top-down merging.
//!
//! ```text
//! resolve(A)   A.source = B, B.source = C, C has no source
//!
//!   load A ──► load B ──► load C
//!   chain:  [A] → [B, A] → [C, B, A]
//! ```

use crate::error::{LoaderResult, TemplateLoaderError};
use crate::scheme::{LoaderRegistry, SchemeLoader};
use ptl_template::{PipelineTemplate, TemplateSource, TemplateUri};
use std::collections::{HashSet, VecDeque};

/// Resolves template inheritance chains
///
/// Holds no per-resolution state: the visited set lives on the stack of each
/// call, so one loader can serve concurrent resolutions.
#[derive(Debug, Default)]
pub struct TemplateLoader {
    registry: LoaderRegistry,
}

impl TemplateLoader {
    /// Create loader over a populated registry
    #[inline]
    #[must_use]
    pub fn new(registry: LoaderRegistry) -> Self {
        Self { registry }
    }

    /// Create loader with the built-in scheme loaders
    #[inline]
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderRegistry::with_defaults())
    }

    /// Registered loaders
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &LoaderRegistry {
        &self.registry
    }

    /// Resolve the chain starting from a caller-supplied source
    ///
    /// # Errors
    /// See [`load_template`](Self::load_template).
    pub fn load_source(&self, source: &TemplateSource) -> LoaderResult<Vec<PipelineTemplate>> {
        let template = self.load_one(source.as_str())?;
        self.load_template(template)
    }

    /// Resolve the chain starting from a raw URI string
    ///
    /// # Errors
    /// See [`load_template`](Self::load_template).
    #[inline]
    pub fn load_uri(&self, uri: &str) -> LoaderResult<Vec<PipelineTemplate>> {
        self.load_source(&TemplateSource::new(uri))
    }

    /// Resolve the chain of an already loaded template
    ///
    /// Returns the templates root-first; `template` is always last.
    ///
    /// # Errors
    /// - [`TemplateLoaderError::InvalidUri`] if a `source` is malformed or
    ///   has no scheme
    /// - [`TemplateLoaderError::NoLoaderFound`] if no loader claims a scheme
    /// - [`TemplateLoaderError::CycleDetected`] if a `source` repeats
    /// - [`TemplateLoaderError::Fetch`] if a backend fails
    pub fn load_template(&self, template: PipelineTemplate) -> LoaderResult<Vec<PipelineTemplate>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut parent = template.parent_source().map(str::to_owned);

        let mut chain = VecDeque::new();
        chain.push_front(template);

        // The parent is fetched before the repeat check so every fetch in a
        // cycle is observable by the backend exactly once.
        while let Some(source) = parent {
            let loaded = self.load_one(&source)?;
            seen.insert(source);

            parent = loaded.parent_source().map(str::to_owned);
            chain.push_front(loaded);

            if let Some(next) = parent.as_deref() {
                if seen.contains(next) {
                    tracing::warn!(source = next, "Illegal template inheritance cycle");
                    return Err(TemplateLoaderError::cycle(next));
                }
            }
        }

        tracing::debug!(depth = chain.len(), "Resolved pipeline template chain");
        Ok(chain.into())
    }

    /// Single-step load: validate, dispatch, fetch
    ///
    /// # Errors
    /// [`TemplateLoaderError::InvalidUri`], [`TemplateLoaderError::NoLoaderFound`]
    /// or [`TemplateLoaderError::Fetch`].
    pub fn load_one(&self, source: &str) -> LoaderResult<PipelineTemplate> {
        tracing::debug!(source, "Loading pipeline template source");

        let uri = TemplateUri::parse(source)?;
        let loader = self.select(&uri)?;

        loader
            .load(&uri)
            .map_err(|e| TemplateLoaderError::fetch(source, loader.name(), e))
    }

    fn select(&self, uri: &TemplateUri) -> LoaderResult<&dyn SchemeLoader> {
        self.registry
            .find(uri)
            .ok_or_else(|| TemplateLoaderError::NoLoaderFound {
                scheme: uri.scheme().to_string(),
                uri: uri.to_string(),
            })
    }
}

impl From<LoaderRegistry> for TemplateLoader {
    fn from(registry: LoaderRegistry) -> Self {
        Self::new(registry)
    }
}
