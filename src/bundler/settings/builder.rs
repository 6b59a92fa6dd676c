//! Builder for constructing HtmlExportSettings.

use super::{DEFAULT_OUTPUT_FORMAT, HtmlExportSettings};
use std::path::{Path, PathBuf};

/// Builder for constructing [`HtmlExportSettings`].
///
/// `title` and `config_dir` are required; everything else has a default.
#[derive(Default)]
pub struct HtmlExportSettingsBuilder {
    title: Option<String>,
    config_dir: Option<PathBuf>,
    resources_dir: Option<PathBuf>,
    render_config: Option<serde_json::Value>,
    output_format: Option<String>,
}

impl HtmlExportSettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the document title.
    ///
    /// # Required
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the renderer configuration directory.
    ///
    /// # Required
    pub fn config_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory relative resources are looked up in.
    ///
    /// Default: the rendered file's directory
    pub fn resources_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.resources_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the renderer configuration.
    ///
    /// Default: empty JSON object
    pub fn render_config(mut self, config: serde_json::Value) -> Self {
        self.render_config = Some(config);
        self
    }

    /// Sets the output format requested from the exporter factory.
    ///
    /// Default: `html`
    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `title` or `config_dir` is missing.
    pub fn build(self) -> crate::bundler::Result<HtmlExportSettings> {
        use crate::bundler::error::Context;

        Ok(HtmlExportSettings::new(
            self.title.context("title is required")?,
            self.config_dir.context("config_dir is required")?,
            self.resources_dir,
            self.render_config
                .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
            self.output_format
                .unwrap_or_else(|| DEFAULT_OUTPUT_FORMAT.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = HtmlExportSettingsBuilder::new()
            .title("a title")
            .config_dir("/home/builder/.jupyter")
            .build()
            .unwrap();
        assert_eq!(settings.title(), "a title");
        assert_eq!(settings.config_dir(), Path::new("/home/builder/.jupyter"));
        assert_eq!(settings.resources_dir(), None);
        assert_eq!(settings.render_config(), &serde_json::json!({}));
        assert_eq!(settings.output_format(), "html");
    }

    #[test]
    fn missing_title() {
        let err = HtmlExportSettingsBuilder::new()
            .config_dir("/tmp")
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn missing_config_dir() {
        let err = HtmlExportSettingsBuilder::new()
            .title("t")
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "config_dir is required");
    }
}
