//! Python environment metadata produced by the external environment detector.
//!
//! The detector runs inside the notebook kernel and prints a JSON object such as
//!
//! ```json
//! {
//!   "package_manager": "pip",
//!   "pip": "23.1.2",
//!   "locale": "en_US.UTF-8",
//!   "python": "3.11.4",
//!   "filename": "requirements.txt",
//!   "contents": "numpy\npandas\nmatplotlib\n"
//! }
//! ```
//!
//! The package manager's version is stored under the package manager's own name,
//! so it lives in the flattened [`Environment::extra`] map rather than a fixed field.

use crate::bundler::{Result, error::ErrorExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Detected runtime and dependency-manager state for a notebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Dependency tool name (e.g. `pip`)
    pub package_manager: String,

    /// Locale of the kernel process
    pub locale: String,

    /// Python version string
    pub python: String,

    /// Dependency declaration file name (e.g. `requirements.txt`)
    pub filename: String,

    /// Full text of the dependency declaration file
    pub contents: String,

    /// Remaining detector keys, including the package manager version
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Environment {
    /// Builds an environment record by hand.
    ///
    /// Mostly useful when the detector output is already parsed elsewhere, and in tests.
    pub fn new(
        package_manager: impl Into<String>,
        package_manager_version: impl Into<String>,
        locale: impl Into<String>,
        python: impl Into<String>,
        filename: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        let package_manager = package_manager.into();
        let mut extra = BTreeMap::new();
        extra.insert(
            package_manager.clone(),
            serde_json::Value::String(package_manager_version.into()),
        );
        Self {
            package_manager,
            locale: locale.into(),
            python: python.into(),
            filename: filename.into(),
            contents: contents.into(),
            extra,
        }
    }

    /// Parses the detector's JSON output.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads detector output previously saved to a file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).fs_context("reading environment file", path)?;
        Self::from_json(&json)
    }

    /// Version of the declared package manager, looked up by its name.
    pub fn package_manager_version(&self) -> Option<&str> {
        self.extra
            .get(&self.package_manager)
            .and_then(|v| v.as_str())
    }
}
