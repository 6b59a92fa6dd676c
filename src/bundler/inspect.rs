//! Reading bundles back.
//!
//! Bundles always start with `manifest.json`, so the manifest can be read by
//! decompressing only the first member.

use std::io::Read;

use flate2::read::GzDecoder;

use crate::bundler::{Error, Result, manifest::Manifest, settings::MANIFEST_FILENAME};

/// Reads the manifest from the first member of a bundle stream.
///
/// # Errors
///
/// [`Error::ManifestNotFirst`] if the first member is anything else (or the
/// archive is empty).
pub fn read_manifest<R: Read>(reader: R) -> Result<Manifest> {
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    let mut entries = archive.entries()?;

    let Some(entry) = entries.next() else {
        return Err(Error::ManifestNotFirst {
            found: String::new(),
        });
    };
    let mut entry = entry?;

    let name = entry.path()?.to_string_lossy().into_owned();
    if name != MANIFEST_FILENAME {
        return Err(Error::ManifestNotFirst { found: name });
    }

    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Manifest::from_slice(&bytes)
}

/// Lists member names in archive order.
pub fn member_names<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    let mut names = Vec::new();
    for entry in archive.entries()? {
        names.push(entry?.path()?.to_string_lossy().into_owned());
    }
    Ok(names)
}
