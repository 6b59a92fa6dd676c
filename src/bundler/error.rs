//! Error types for bundling operations.
//!
//! All bundler functions return [`Result`], whose error side is [`Error`].
//! The [`Context`] and [`ErrorExt`] extension traits attach a description
//! (and, for filesystem failures, the offending path) to lower-level errors.

use std::{fmt::Display, io, path::PathBuf};

use crate::bundler::export::ExportError;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the bundler.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Error with an attached description
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// Filesystem operation failed on a specific path
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        error: io::Error,
    },

    /// I/O error without path information
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Directory traversal failed
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path was not under the expected base directory
    #[error("{0}")]
    StripPrefixError(#[from] std::path::StripPrefixError),

    /// JSON (de)serialization failed
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// HTML export collaborator could not be obtained or failed to render
    #[error("HTML export failed: {0}")]
    Export(#[from] ExportError),

    /// The environment declares a package manager but carries no version for it
    #[error("environment has no version for package manager `{name}`")]
    MissingPackageManagerVersion {
        /// Declared package manager name
        name: String,
    },

    /// A member with the same name was already written to the archive
    #[error("duplicate archive member: {name}")]
    DuplicateMember {
        /// Member name
        name: String,
    },

    /// A member name that is absolute, climbs out of the bundle root, or is empty
    #[error("invalid bundle member name: `{name}`")]
    InvalidMemberName {
        /// Name as given
        name: String,
    },

    /// The first archive member is not the manifest
    #[error("first bundle member is `{found}`, expected manifest.json")]
    ManifestNotFirst {
        /// Name of the member actually found first (empty if the archive is empty)
        found: String,
    },

    /// Static manifests do not record files
    #[error("static manifests do not carry a files section")]
    StaticManifestFiles,

    /// Catch-all
    #[error("{0}")]
    GenericError(String),
}

/// Attach a description to an error or a missing value.
pub trait Context<T> {
    /// Wrap the error (or `None`) with a fixed description.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error (or `None`) with a lazily built description.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Attach path information to I/O failures.
pub trait ErrorExt<T> {
    /// Convert an I/O error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_context_names_operation_and_path() {
        let err: Result<()> = Err::<(), _>(io::Error::new(io::ErrorKind::NotFound, "gone"))
            .fs_context("opening file", "/tmp/missing.ipynb");
        let msg = err.unwrap_err().to_string();
        assert_eq!(msg, "opening file /tmp/missing.ipynb: gone");
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let none: Option<u8> = None;
        let err = none.context("entrypoint has no file name").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "entrypoint has no file name"));
    }

    #[test]
    fn result_context_wraps_inner_error() {
        let inner: Result<()> = Err(Error::StaticManifestFiles);
        let err = inner.with_context(|| "adding data.csv".to_string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "adding data.csv: static manifests do not carry a files section"
        );
    }
}
