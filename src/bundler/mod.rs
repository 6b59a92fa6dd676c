//! Notebook bundling.
//!
//! Everything needed to turn a notebook into a deployable bundle: checksums,
//! file discovery, manifests, archive assembly and the two bundle flows
//! (source and static HTML).
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_notebook::{Environment, bundler::{BundleLogger, make_source_bundle}};
//! use std::path::Path;
//!
//! # fn example() -> kodegen_bundler_notebook::bundler::Result<()> {
//! let environment = Environment::load(Path::new("environment.json"))?;
//! let log = BundleLogger::default();
//! let mut bundle = make_source_bundle(Path::new("dummy.ipynb"), &environment, &[], &log)?;
//! let mut out = std::fs::File::create("bundle.tar.gz")?;
//! std::io::copy(&mut bundle, &mut out)?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod export;
pub mod inspect;
pub mod logging;
pub mod manifest;
pub mod settings;
pub mod utils;

pub use builder::{
    BundleArchive, ManifestWriteReport, make_html_bundle, make_source_bundle, write_manifest,
};
pub use builder::checksum::{buffer_checksum, file_checksum};
pub use error::{Error, Result};
pub use export::{
    ExportError, Exported, ExportedResources, Exporter, ExporterFactory, ResourceDescriptor,
    ResourceMetadata,
};
pub use inspect::{member_names, read_manifest};
pub use logging::BundleLogger;
pub use manifest::{AppMode, Manifest, make_html_manifest, make_source_manifest};
pub use settings::{HtmlExportSettings, HtmlExportSettingsBuilder};
pub use utils::fs::list_files;
