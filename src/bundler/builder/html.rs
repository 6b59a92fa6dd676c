//! Static HTML bundle orchestration.
//!
//! Renders a document through an injected [`ExporterFactory`] and packages
//! the result with a `static` manifest.

use std::{fs::File, path::Path, time::SystemTime};

use chrono::{DateTime, Local};

use crate::bundler::{
    BundleLogger, Result,
    error::ErrorExt,
    export::{ExportError, ExporterFactory, ResourceDescriptor, ResourceMetadata},
    manifest::make_html_manifest,
    settings::{HtmlExportSettings, MANIFEST_FILENAME},
};

use super::{archive::BundleArchive, orchestrator::split_path};

/// Formats a modification time as `March 7, 2024`.
///
/// Month names are always English and the day is not zero-padded.
pub fn format_modified_date(modified: SystemTime) -> String {
    let modified: DateTime<Local> = modified.into();
    modified.format("%B %-d, %Y").to_string()
}

/// Renders `file_path` to HTML and bundles it as static content.
///
/// The bundle holds exactly two members: `manifest.json` (naming the rendered
/// file as `primary_html`) followed by the rendered output. The output name is
/// the input's stem plus the extension reported by the exporter.
///
/// # Errors
///
/// Exporter lookup, construction and rendering failures are all returned as
/// [`Error::Export`](crate::bundler::Error::Export). Nothing is retried.
pub fn make_html_bundle(
    file_path: &Path,
    settings: &HtmlExportSettings,
    exporters: &dyn ExporterFactory,
    log: &BundleLogger,
) -> Result<File> {
    let (base_dir, name) = split_path(file_path)?;

    let modified = std::fs::metadata(file_path)
        .and_then(|m| m.modified())
        .fs_context("reading modification time", file_path)?;

    let resources_dir = match settings.resources_dir() {
        Some(dir) => Some(dir.to_path_buf()),
        None if file_path.parent().is_some_and(|p| !p.as_os_str().is_empty()) => {
            Some(base_dir.to_path_buf())
        }
        None => None,
    };

    let resources = ResourceDescriptor {
        metadata: ResourceMetadata {
            name: settings.title().to_string(),
            modified_date: format_modified_date(modified),
            path: resources_dir,
        },
        config_dir: settings.config_dir().to_path_buf(),
    };

    let exporter = exporters.exporter(settings.output_format(), settings.render_config(), log)?;
    let exported = exporter
        .export_file(file_path, &resources)
        .map_err(|e| ExportError::render(file_path, e))?;
    if exported.resources.output_extension.is_empty() {
        return Err(ExportError::Render {
            path: file_path.to_path_buf(),
            reason: "exporter reported no output extension".to_string(),
        }
        .into());
    }

    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    let filename = format!("{stem}{}", exported.resources.output_extension);
    log.info(format_args!("filename = {}", filename));

    let manifest = make_html_manifest(&filename);
    let manifest_json = manifest.to_json()?;
    log.debug(format_args!("manifest: {}", manifest_json));

    let mut bundle = BundleArchive::create(log)?;
    bundle.add_buffer(MANIFEST_FILENAME, &manifest_json)?;
    bundle.add_buffer(&filename, &exported.output)?;
    bundle.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn date_has_unpadded_day_and_english_month() {
        let t = Local.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(format_modified_date(t.into()), "March 7, 2024");

        let t = Local.with_ymd_and_hms(2019, 11, 23, 12, 0, 0).unwrap();
        assert_eq!(format_modified_date(t.into()), "November 23, 2019");
    }
}
