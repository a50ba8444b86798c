//! PTL Template Model
//!
//! Typed representation of inheritable pipeline templates and the references
//! that connect them.
//!
//! # Core Concepts
//!
//! - [`PipelineTemplate`]: A configuration document, optionally naming its
//!   parent through `source`
//! - [`TemplateSource`]: Caller-supplied entry point (a raw URI string)
//! - [`TemplateUri`]: A validated source reference with a non-empty scheme
//! - [`TemplateFormat`]: YAML/JSON decoding of raw document bytes
//!
//! # Example
//!
//! ```rust
//! use ptl_template::{TemplateFormat, TemplateUri};
//!
//! let uri = TemplateUri::parse("file:///templates/base.yml").unwrap();
//! assert_eq!(uri.scheme(), "file");
//!
//! let template = TemplateFormat::Yaml
//!     .decode(b"id: child\nsource: file:///templates/base.yml\n")
//!     .unwrap();
//! assert_eq!(template.parent_source(), Some(uri.as_str()));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod format;
mod template;
mod uri;

pub use format::{FormatError, TemplateFormat};
pub use template::{PipelineTemplate, TemplateMetadata, TemplateSource};
pub use uri::{TemplateUri, UriError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
