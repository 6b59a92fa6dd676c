//! Static HTML export settings.

use std::path::{Path, PathBuf};

/// Settings for rendering a document to a static HTML bundle.
///
/// Constructed via [`HtmlExportSettingsBuilder`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_notebook::bundler::HtmlExportSettingsBuilder;
///
/// # fn example() -> kodegen_bundler_notebook::bundler::Result<()> {
/// let settings = HtmlExportSettingsBuilder::new()
///     .title("Quarterly report")
///     .config_dir("/home/builder/.jupyter")
///     .render_config(serde_json::json!({
///         "NotebookApp": { "notebook_dir": "/notebooks" }
///     }))
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`HtmlExportSettingsBuilder`] - Builder for constructing these settings
///
/// [`HtmlExportSettingsBuilder`]: super::HtmlExportSettingsBuilder
#[derive(Clone, Debug)]
pub struct HtmlExportSettings {
    /// Document title handed to the renderer.
    title: String,

    /// Renderer configuration directory.
    config_dir: PathBuf,

    /// Directory the renderer resolves relative resources against.
    ///
    /// None means the rendered file's own directory.
    resources_dir: Option<PathBuf>,

    /// Opaque renderer configuration, passed through unchanged.
    render_config: serde_json::Value,

    /// Output format requested from the exporter factory.
    output_format: String,
}

impl HtmlExportSettings {
    /// Returns the document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the renderer configuration directory.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the configured resource lookup directory, if any.
    pub fn resources_dir(&self) -> Option<&Path> {
        self.resources_dir.as_deref()
    }

    /// Returns the renderer configuration.
    pub fn render_config(&self) -> &serde_json::Value {
        &self.render_config
    }

    /// Returns the requested output format (e.g. `html`).
    pub fn output_format(&self) -> &str {
        &self.output_format
    }

    /// Creates a new instance (used by HtmlExportSettingsBuilder).
    pub(super) fn new(
        title: String,
        config_dir: PathBuf,
        resources_dir: Option<PathBuf>,
        render_config: serde_json::Value,
        output_format: String,
    ) -> Self {
        Self {
            title,
            config_dir,
            resources_dir,
            render_config,
            output_format,
        }
    }
}
