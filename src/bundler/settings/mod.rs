//! Configuration for bundling operations.
//!
//! Fixed bundle constants plus the [`HtmlExportSettings`] used by the
//! static HTML bundle flow.

mod builder;
mod html;

pub use builder::HtmlExportSettingsBuilder;
pub use html::HtmlExportSettings;

/// Name of the manifest member inside every bundle.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Manifest schema version understood by the deployment service.
pub const MANIFEST_VERSION: u32 = 1;

/// Read size used when checksumming files.
pub const CHECKSUM_CHUNK_SIZE: usize = 64 * 1024;

/// Directories never listed or descended into: notebook checkpoints and git metadata.
pub const SKIP_DIRS: [&str; 2] = [".ipynb_checkpoints", ".git"];

/// Output format requested from the exporter when none is configured.
pub const DEFAULT_OUTPUT_FORMAT: &str = "html";
