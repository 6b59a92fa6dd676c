//! Deployment bundles for notebooks and rendered documents.
//!
//! This library packages a notebook and its supporting files into a
//! reproducible gzip+tar bundle with a manifest telling the deployment
//! service how to run it. It supports two bundle modes:
//! - Source bundles (`jupyter-static`): notebook, dependency file, extras
//! - Static bundles (`static`): pre-rendered HTML
//!
//! Environment detection and HTML rendering are external collaborators;
//! the library consumes their output.

pub mod bundler;
pub mod metadata;

// Re-export commonly used types
pub use bundler::{Error, Result};
pub use metadata::Environment;
