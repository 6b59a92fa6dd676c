//! Bundle manifests.
//!
//! A manifest tells the deployment service how to run a bundle. There are two
//! schemas, one per bundle mode:
//!
//! - **Source** (`jupyter-static`): entrypoint, locale, Python and package
//!   manager versions, and a checksum for every file in the archive.
//! - **Static** (`static`): just the primary HTML file.
//!
//! Field names are fixed by the service and must not change.

mod files;

pub use files::{FileEntry, ManifestFiles};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    bundler::{
        Error, Result,
        builder::checksum::{buffer_checksum, file_checksum},
        settings::MANIFEST_VERSION,
        utils::fs::normalize_member_name,
    },
    metadata::Environment,
};

/// Deployment mode tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    /// Notebook published from source and rendered server-side
    #[serde(rename = "jupyter-static")]
    JupyterStatic,
    /// Pre-rendered static content
    #[serde(rename = "static")]
    Static,
}

/// A bundle manifest in either mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Manifest {
    Source(SourceManifest),
    Static(StaticManifest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceManifest {
    pub version: u32,
    pub metadata: SourceMetadata,
    pub locale: String,
    pub python: PythonSection,
    pub files: ManifestFiles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub appmode: AppMode,
    pub entrypoint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PythonSection {
    pub version: String,
    pub package_manager: PackageManager,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageManager {
    pub name: String,
    pub version: String,
    pub package_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticManifest {
    pub version: u32,
    pub metadata: StaticMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticMetadata {
    pub appmode: AppMode,
    pub primary_html: String,
}

/// Builds the source-mode manifest skeleton for `entrypoint`.
///
/// The package manager version is looked up in `environment` under the
/// package manager's own name. `files` starts empty.
///
/// # Errors
///
/// [`Error::MissingPackageManagerVersion`] if the environment has no such version.
pub fn make_source_manifest(
    entrypoint: &str,
    environment: &Environment,
    appmode: AppMode,
) -> Result<Manifest> {
    let name = &environment.package_manager;
    let version = environment
        .package_manager_version()
        .ok_or_else(|| Error::MissingPackageManagerVersion { name: name.clone() })?;

    Ok(Manifest::Source(SourceManifest {
        version: MANIFEST_VERSION,
        metadata: SourceMetadata {
            appmode,
            entrypoint: entrypoint.to_string(),
        },
        locale: environment.locale.clone(),
        python: PythonSection {
            version: environment.python.clone(),
            package_manager: PackageManager {
                name: name.clone(),
                version: version.to_string(),
                package_file: environment.filename.clone(),
            },
        },
        files: ManifestFiles::new(),
    }))
}

/// Builds the static-mode manifest naming `primary_html`.
pub fn make_html_manifest(primary_html: &str) -> Manifest {
    Manifest::Static(StaticManifest {
        version: MANIFEST_VERSION,
        metadata: StaticMetadata {
            appmode: AppMode::Static,
            primary_html: primary_html.to_string(),
        },
    })
}

impl Manifest {
    /// Records the checksum of `base_dir/rel_path` under the normalized `rel_path`.
    ///
    /// # Errors
    ///
    /// Fails if the name is not a valid member name, the file cannot be read,
    /// or this is a static manifest.
    pub fn add_file(&mut self, rel_path: &str, base_dir: &Path) -> Result<()> {
        let files = self.files_mut()?;
        let name = normalize_member_name(rel_path)?;
        let checksum = file_checksum(&base_dir.join(&name))?;
        files.insert(name, FileEntry { checksum });
        Ok(())
    }

    /// Records the checksum of an in-memory buffer under the normalized `name`.
    pub fn add_buffer(&mut self, name: &str, content: impl AsRef<[u8]>) -> Result<()> {
        let files = self.files_mut()?;
        let name = normalize_member_name(name)?;
        files.insert(
            name,
            FileEntry {
                checksum: buffer_checksum(content),
            },
        );
        Ok(())
    }

    pub fn appmode(&self) -> AppMode {
        match self {
            Self::Source(m) => m.metadata.appmode,
            Self::Static(m) => m.metadata.appmode,
        }
    }

    /// Files section, if this manifest mode has one.
    pub fn files(&self) -> Option<&ManifestFiles> {
        match self {
            Self::Source(m) => Some(&m.files),
            Self::Static(_) => None,
        }
    }

    fn files_mut(&mut self) -> Result<&mut ManifestFiles> {
        match self {
            Self::Source(m) => Ok(&mut m.files),
            Self::Static(_) => Err(Error::StaticManifestFiles),
        }
    }

    /// Serializes the manifest as written into bundles.
    ///
    /// Source manifests are pretty-printed with two-space indentation,
    /// static manifests are compact.
    pub fn to_json(&self) -> Result<String> {
        let json = match self {
            Self::Source(_) => serde_json::to_string_pretty(self)?,
            Self::Static(_) => serde_json::to_string(self)?,
        };
        Ok(json)
    }

    /// Parses a manifest of either mode.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
