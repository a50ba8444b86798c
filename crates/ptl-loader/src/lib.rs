//! PTL Loader
//!
//! Loads pipeline templates by URI and resolves their inheritance chains.
//!
//! # Core Concepts
//!
//! - [`SchemeLoader`]: Backend that fetches templates for a URI scheme
//! - [`LoaderRegistry`]: Ordered loaders, first match wins
//! - [`TemplateLoader`]: Follows `source` references to a root, rejecting
//!   cycles
//!
//! # Architecture
//!
//! ```text
//! TemplateSource ─► TemplateUri::parse ─► LoaderRegistry::find ─► SchemeLoader::load
//!                          ▲                                             │
//!                          └──────────── parent `source` ◄───────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use ptl_loader::{LoaderRegistry, TemplateLoader};
//! use ptl_template::TemplateSource;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = TemplateLoader::new(LoaderRegistry::with_defaults());
//!
//! let chain = loader.load_source(&TemplateSource::new("file:///templates/child.yml"))?;
//!
//! // Root ancestor first, requested template last
//! for template in &chain {
//!     println!("{}", template.label());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod error;
pub mod resolver;
pub mod scheme;
pub mod schemes;

// Re-exports for convenience
pub use error::{ErrorKind, LoaderError, LoaderResult, TemplateLoaderError};
pub use resolver::TemplateLoader;
pub use scheme::{LoaderRegistry, SchemeLoader};
pub use schemes::FileSchemeLoader;
#[cfg(feature = "http")]
pub use schemes::HttpSchemeLoader;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the loader
    pub use crate::error::{ErrorKind, LoaderError, TemplateLoaderError};
    pub use crate::resolver::TemplateLoader;
    pub use crate::scheme::{LoaderRegistry, SchemeLoader};
    pub use ptl_template::{PipelineTemplate, TemplateSource, TemplateUri};
}
