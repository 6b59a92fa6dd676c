//! Document-to-HTML rendering capability.
//!
//! Rendering is done by an external engine. The bundler only sees it through
//! two traits: an [`ExporterFactory`] that produces an [`Exporter`] for an
//! output format, and the exporter itself, which renders one file. Hosts
//! implement these over whatever engine they embed.
//!
//! Every failure on this path (no exporter for the format, construction
//! failure, rendering failure) is reported as an [`ExportError`].

use std::{collections::BTreeMap, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::bundler::BundleLogger;

/// Resources handed to the exporter alongside the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub metadata: ResourceMetadata,
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    /// Document title
    pub name: String,
    /// Source modification date, e.g. `March 7, 2024`
    pub modified_date: String,
    /// Directory relative resources are resolved against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Resources returned by the exporter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportedResources {
    /// Extension of the rendered output, including the dot (e.g. `.html`)
    pub output_extension: String,
    /// Anything else the engine reports
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Rendered document.
#[derive(Debug, Clone, PartialEq)]
pub struct Exported {
    pub output: Vec<u8>,
    pub resources: ExportedResources,
}

/// Renders a single document.
pub trait Exporter {
    /// Renders the file at `path`.
    fn export_file(&self, path: &Path, resources: &ResourceDescriptor) -> anyhow::Result<Exported>;
}

/// Produces exporters by output format.
pub trait ExporterFactory {
    /// Returns an exporter for `format`, configured with `config`.
    ///
    /// # Errors
    ///
    /// [`ExportError::Unavailable`] if no exporter handles `format`,
    /// [`ExportError::Construction`] if one exists but cannot be built.
    fn exporter(
        &self,
        format: &str,
        config: &serde_json::Value,
        log: &BundleLogger,
    ) -> Result<Box<dyn Exporter>, ExportError>;
}

/// HTML export failures.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no exporter for format: {format}")]
    Unavailable { format: String },

    #[error("could not construct exporter: {0}")]
    Construction(String),

    #[error("could not render {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },
}

impl ExportError {
    /// Wraps an engine failure while rendering `path`, keeping the whole cause chain.
    pub fn render(path: &Path, error: anyhow::Error) -> Self {
        Self::Render {
            path: path.to_path_buf(),
            reason: format!("{error:#}"),
        }
    }
}
