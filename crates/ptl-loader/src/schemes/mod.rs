//! Built-in scheme loaders
//!
//! - [`FileSchemeLoader`]: `file://` documents on the local filesystem
//! - [`HttpSchemeLoader`]: `http://` and `https://` documents (feature `http`)

mod file;
#[cfg(feature = "http")]
mod http;

pub use file::FileSchemeLoader;
#[cfg(feature = "http")]
pub use http::HttpSchemeLoader;
