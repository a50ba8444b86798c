//! Testing utilities for PTL workspace
//!
//! In-memory scheme loader with call recording, plus template fixtures.

#![allow(missing_docs)]

use indexmap::IndexMap;
use parking_lot::Mutex;
use ptl_loader::{LoaderError, SchemeLoader};
use ptl_template::{PipelineTemplate, TemplateUri};
use std::sync::Arc;

enum Entry {
    Template(PipelineTemplate),
    Failure(String),
}

/// In-memory loader keyed by raw URI string
///
/// Every `load` call is recorded, including failing ones. Wrap in an `Arc`
/// to keep a handle for assertions after registering it.
pub struct StaticSchemeLoader {
    name: String,
    scheme: String,
    entries: IndexMap<String, Entry>,
    loads: Mutex<Vec<String>>,
}

impl StaticSchemeLoader {
    /// Loader named after the scheme it serves
    pub fn new(scheme: &str) -> Self {
        Self::named(scheme, scheme)
    }

    /// Loader with a distinct name, for registration-order tests
    pub fn named(name: &str, scheme: &str) -> Self {
        Self {
            name: name.to_string(),
            scheme: scheme.to_string(),
            entries: IndexMap::new(),
            loads: Mutex::new(Vec::new()),
        }
    }

    pub fn with_template(mut self, uri: &str, template: PipelineTemplate) -> Self {
        self.entries.insert(uri.to_string(), Entry::Template(template));
        self
    }

    /// Make `load` of `uri` fail with [`LoaderError::Other`]
    pub fn with_failure(mut self, uri: &str, message: &str) -> Self {
        self.entries
            .insert(uri.to_string(), Entry::Failure(message.to_string()));
        self
    }

    /// URIs passed to `load`, in call order
    pub fn loads(&self) -> Vec<String> {
        self.loads.lock().clone()
    }

    pub fn load_count(&self, uri: &str) -> usize {
        self.loads.lock().iter().filter(|u| *u == uri).count()
    }

    pub fn total_loads(&self) -> usize {
        self.loads.lock().len()
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl SchemeLoader for StaticSchemeLoader {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, uri: &TemplateUri) -> bool {
        uri.scheme() == self.scheme
    }

    fn load(&self, uri: &TemplateUri) -> Result<PipelineTemplate, LoaderError> {
        self.loads.lock().push(uri.as_str().to_string());

        match self.entries.get(uri.as_str()) {
            Some(Entry::Template(t)) => Ok(t.clone()),
            Some(Entry::Failure(message)) => Err(LoaderError::other(message.clone())),
            None => Err(LoaderError::NotFound(uri.to_string())),
        }
    }
}

/// Template with id and optional parent
pub fn template(id: &str, source: Option<&str>) -> PipelineTemplate {
    let t = PipelineTemplate::new().with_id(id);
    match source {
        Some(s) => t.with_source(s),
        None => t,
    }
}

/// URI for `id` under `scheme`, e.g. `mem:base`
pub fn uri(scheme: &str, id: &str) -> String {
    format!("{scheme}:{id}")
}

/// Linear chain where `ids[i]` inherits from `ids[i + 1]`; the last id is
/// the root
///
/// Returns a loader serving every template.
pub fn linear_chain(scheme: &str, ids: &[&str]) -> StaticSchemeLoader {
    let mut loader = StaticSchemeLoader::new(scheme);
    for (i, id) in ids.iter().enumerate() {
        let parent = ids.get(i + 1).map(|p| uri(scheme, p));
        loader = loader.with_template(&uri(scheme, id), template(id, parent.as_deref()));
    }
    loader
}

/// Labels of a resolved chain, root first
pub fn chain_ids(chain: &[PipelineTemplate]) -> Vec<String> {
    chain.iter().map(|t| t.label().to_string()).collect()
}
