//! Source bundle orchestration.
//!
//! A source bundle carries the notebook itself plus its dependency
//! declaration, so the deployment service can rebuild the environment and
//! render the notebook server-side.

use std::{
    collections::BTreeSet,
    fs::File,
    path::{Path, PathBuf},
};

use crate::{
    bundler::{
        BundleLogger, Result,
        error::Context,
        manifest::{AppMode, make_source_manifest},
        settings::MANIFEST_FILENAME,
        utils::fs::{normalize_member_name, write_new_file},
    },
    metadata::Environment,
};

use super::archive::BundleArchive;

/// Paths touched by [`write_manifest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestWriteReport {
    /// Files newly written
    pub created: Vec<PathBuf>,
    /// Files that already existed and were left alone
    pub skipped: Vec<PathBuf>,
}

/// Splits a file path into its directory and file name.
///
/// A bare file name has the current directory as its base.
pub(crate) fn split_path(path: &Path) -> Result<(&Path, &str)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} has no usable file name", path.display()))?;
    let base_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((base_dir, name))
}

/// Creates a source bundle for the notebook at `entrypoint_path`.
///
/// `extra_files` are paths relative to the notebook's directory. Each is
/// normalized first (`./data.csv` is `data.csv`). The entrypoint, the
/// dependency file and `manifest.json` are then dropped (they are always added
/// anyway), duplicates are removed and the rest is added in sorted order.
///
/// Members are written as: manifest, dependency file, notebook, extras. The
/// manifest comes first so a reader can inspect it without unpacking the rest.
///
/// # Returns
///
/// The finished bundle, rewound to the start. The caller owns it.
///
/// # Errors
///
/// An extra that is absolute or reaches outside the notebook's directory is
/// rejected with [`Error::InvalidMemberName`](crate::bundler::Error::InvalidMemberName).
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_notebook::{bundler::{make_source_bundle, BundleLogger}, Environment};
/// use std::path::Path;
///
/// # fn example(environment: Environment) -> kodegen_bundler_notebook::bundler::Result<()> {
/// let log = BundleLogger::default();
/// let extras = vec!["data.csv".to_string()];
/// let bundle = make_source_bundle(Path::new("work/dummy.ipynb"), &environment, &extras, &log)?;
/// # Ok(())
/// # }
/// ```
pub fn make_source_bundle(
    entrypoint_path: &Path,
    environment: &Environment,
    extra_files: &[String],
    log: &BundleLogger,
) -> Result<File> {
    let (base_dir, nb_name) = split_path(entrypoint_path)?;

    let mut manifest = make_source_manifest(nb_name, environment, AppMode::JupyterStatic)?;
    manifest.add_file(nb_name, base_dir)?;
    manifest.add_buffer(&environment.filename, &environment.contents)?;

    let package_file = normalize_member_name(&environment.filename)?;
    let skip = [nb_name, package_file.as_str(), MANIFEST_FILENAME];
    let extra_files: Vec<String> = extra_files
        .iter()
        .map(|name| normalize_member_name(name))
        .collect::<Result<BTreeSet<_>>>()?
        .into_iter()
        .filter(|name| !skip.contains(&name.as_str()))
        .collect();

    for rel_path in &extra_files {
        manifest
            .add_file(rel_path, base_dir)
            .with_context(|| format!("adding {rel_path} to manifest"))?;
    }

    let manifest_json = manifest.to_json()?;
    log.debug(format_args!("manifest: {}", manifest_json));

    let mut bundle = BundleArchive::create(log)?;
    bundle.add_buffer(MANIFEST_FILENAME, &manifest_json)?;
    bundle.add_buffer(&environment.filename, &environment.contents)?;
    bundle.add_file(nb_name, base_dir)?;
    for rel_path in &extra_files {
        bundle.add_file(rel_path, base_dir)?;
    }

    let file = bundle.finish()?;
    log.info(format_args!(
        "created source bundle for {} ({} extra files)",
        entrypoint_path.display(),
        extra_files.len()
    ));
    Ok(file)
}

/// Writes `manifest.json` and the dependency file into `output_dir` for inspection.
///
/// Existing files are never overwritten; they are reported as skipped.
/// Reported paths are `relative_dir` joined with the file name.
pub fn write_manifest(
    relative_dir: &Path,
    entrypoint_name: &str,
    environment: &Environment,
    output_dir: &Path,
    log: &BundleLogger,
) -> Result<ManifestWriteReport> {
    let manifest = make_source_manifest(entrypoint_name, environment, AppMode::JupyterStatic)?;
    let mut report = ManifestWriteReport::default();

    let outputs = [
        (MANIFEST_FILENAME, manifest.to_json()?),
        (environment.filename.as_str(), environment.contents.clone()),
    ];

    for (name, contents) in outputs {
        let path = output_dir.join(name);
        let rel_path = relative_dir.join(name);
        if write_new_file(&path, contents.as_bytes())? {
            log.debug(format_args!("wrote {}", path.display()));
            report.created.push(rel_path);
        } else {
            log.debug(format_args!("{} exists, leaving it alone", path.display()));
            report.skipped.push(rel_path);
        }
    }

    Ok(report)
}
