//! Scheme loaders and their registry
//!
//! A [`SchemeLoader`] recognizes URIs by scheme and fetches the template they
//! name. The [`LoaderRegistry`] keeps loaders in registration order and hands
//! out the first one that claims a URI.

use crate::error::LoaderError;
use ptl_template::{PipelineTemplate, TemplateUri};

/// Backend capable of fetching templates for one or more URI schemes
///
/// Implement this trait to add support for new template sources.
pub trait SchemeLoader: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    /// Whether this loader handles the URI
    ///
    /// Must be a pure predicate over the URI; no I/O.
    fn supports(&self, uri: &TemplateUri) -> bool;

    /// Fetch and decode the template
    ///
    /// # Errors
    /// Backend-specific [`LoaderError`] describing the failure.
    fn load(&self, uri: &TemplateUri) -> Result<PipelineTemplate, LoaderError>;
}

impl<L: SchemeLoader + ?Sized> SchemeLoader for Box<L> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn supports(&self, uri: &TemplateUri) -> bool {
        (**self).supports(uri)
    }

    fn load(&self, uri: &TemplateUri) -> Result<PipelineTemplate, LoaderError> {
        (**self).load(uri)
    }
}

impl<L: SchemeLoader + ?Sized> SchemeLoader for std::sync::Arc<L> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn supports(&self, uri: &TemplateUri) -> bool {
        (**self).supports(uri)
    }

    fn load(&self, uri: &TemplateUri) -> Result<PipelineTemplate, LoaderError> {
        (**self).load(uri)
    }
}

/// Ordered collection of scheme loaders
///
/// Lookup is first-match in registration order. Registration is expected to
/// finish before any resolution starts.
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn SchemeLoader>>,
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("loaders", &self.names())
            .finish()
    }
}

impl LoaderRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Create registry with the built-in loaders
    ///
    /// Always includes the `file` loader; the HTTP loader is added when the
    /// `http` feature is enabled.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::schemes::FileSchemeLoader::new());
        #[cfg(feature = "http")]
        registry.register(crate::schemes::HttpSchemeLoader::new());
        registry
    }

    /// Append a loader after all previously registered ones
    pub fn register<L: SchemeLoader + 'static>(&mut self, loader: L) {
        tracing::debug!(loader = loader.name(), "Registering template scheme loader");
        self.loaders.push(Box::new(loader));
    }

    /// Builder-style [`register`](Self::register)
    #[inline]
    #[must_use]
    pub fn with_loader<L: SchemeLoader + 'static>(mut self, loader: L) -> Self {
        self.register(loader);
        self
    }

    /// First registered loader that supports the URI
    #[must_use]
    pub fn find(&self, uri: &TemplateUri) -> Option<&dyn SchemeLoader> {
        self.loaders
            .iter()
            .find(|l| l.supports(uri))
            .map(|l| &**l)
    }

    /// Loader names in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.loaders.iter().map(|l| l.name()).collect()
    }

    /// Number of registered loaders
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl<L: SchemeLoader + 'static> Extend<L> for LoaderRegistry {
    fn extend<I: IntoIterator<Item = L>>(&mut self, iter: I) {
        for loader in iter {
            self.register(loader);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SchemeOnly {
        name: &'static str,
        scheme: &'static str,
    }

    impl SchemeLoader for SchemeOnly {
        fn name(&self) -> &str {
            self.name
        }

        fn supports(&self, uri: &TemplateUri) -> bool {
            uri.scheme() == self.scheme
        }

        fn load(&self, _uri: &TemplateUri) -> Result<PipelineTemplate, LoaderError> {
            Ok(PipelineTemplate::new().with_id(self.name))
        }
    }

    fn uri(s: &str) -> TemplateUri {
        TemplateUri::parse(s).unwrap()
    }

    #[test]
    fn registry_new_empty() {
        let registry = LoaderRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.find(&uri("file:///a.yml")).is_none());
    }

    #[test]
    fn registry_with_defaults_has_file() {
        let registry = LoaderRegistry::with_defaults();
        assert_eq!(registry.names().first(), Some(&"file"));
        assert!(registry.find(&uri("file:///a.yml")).is_some());
    }

    #[test]
    fn registry_find_by_scheme() {
        let registry = LoaderRegistry::new()
            .with_loader(SchemeOnly { name: "mem", scheme: "mem" })
            .with_loader(SchemeOnly { name: "cat", scheme: "catalog" });

        assert_eq!(registry.find(&uri("catalog://x")).unwrap().name(), "cat");
        assert_eq!(registry.find(&uri("mem:x")).unwrap().name(), "mem");
        assert!(registry.find(&uri("s3://bucket/x")).is_none());
    }

    #[test]
    fn registry_first_match_wins() {
        let registry = LoaderRegistry::new()
            .with_loader(SchemeOnly { name: "first", scheme: "mem" })
            .with_loader(SchemeOnly { name: "second", scheme: "mem" });

        for _ in 0..10 {
            assert_eq!(registry.find(&uri("mem:x")).unwrap().name(), "first");
        }
    }

    #[test]
    fn registry_names_keep_order() {
        let mut registry = LoaderRegistry::new();
        registry.extend([
            SchemeOnly { name: "c", scheme: "c" },
            SchemeOnly { name: "a", scheme: "a" },
            SchemeOnly { name: "b", scheme: "b" },
        ]);
        assert_eq!(registry.names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn registry_debug() {
        let registry = LoaderRegistry::new().with_loader(SchemeOnly { name: "mem", scheme: "mem" });
        let debug_str = format!("{registry:?}");
        assert!(debug_str.contains("LoaderRegistry"));
        assert!(debug_str.contains("mem"));
    }
}
