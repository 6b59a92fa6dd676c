//! Bundle archive assembly.
//!
//! Bundles are gzip-compressed tarballs written to an anonymous temporary
//! file. Headers are normalized (mtime 0, uid/gid 0, fixed modes) and the gzip
//! header carries no timestamp, so the same members in the same order always
//! produce the same bytes.

use std::{
    collections::HashSet,
    fs::File,
    io::{Seek, SeekFrom},
    path::Path,
};

use flate2::{Compression, GzBuilder, write::GzEncoder};
use tar::{Builder, Header, HeaderMode};

use crate::bundler::{
    BundleLogger, Error, Result, error::ErrorExt, utils::fs::normalize_member_name,
};

/// Mode recorded for in-memory members.
const BUFFER_MODE: u32 = 0o644;

/// A bundle archive being written.
///
/// Members are appended in call order. Call [`BundleArchive::finish`] to
/// finalize the archive and get back a readable, rewound file.
pub struct BundleArchive<'a> {
    builder: Builder<GzEncoder<File>>,
    names: HashSet<String>,
    log: &'a BundleLogger,
}

impl std::fmt::Debug for BundleArchive<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleArchive")
            .field("members", &self.names.len())
            .field("log", &self.log)
            .finish()
    }
}

impl<'a> BundleArchive<'a> {
    /// Opens a fresh archive backed by an unnamed temporary file.
    ///
    /// The backing file has no path on disk and is freed when the last handle
    /// to it is dropped, including on error paths.
    pub fn create(log: &'a BundleLogger) -> Result<Self> {
        let file = tempfile::tempfile()?;
        let encoder = GzBuilder::new()
            .mtime(0)
            .write(file, Compression::default());

        let mut builder = Builder::new(encoder);
        builder.mode(HeaderMode::Deterministic);

        Ok(Self {
            builder,
            names: HashSet::new(),
            log,
        })
    }

    /// Streams `base_dir/rel_path` into the archive under `rel_path`.
    ///
    /// The member name is the normalized form of `rel_path`.
    pub fn add_file(&mut self, rel_path: &str, base_dir: &Path) -> Result<()> {
        let name = normalize_member_name(rel_path)?;
        let path = base_dir.join(&name);
        let mut file = File::open(&path).fs_context("opening file for bundle", &path)?;
        self.claim(&name)?;
        self.builder
            .append_file(&name, &mut file)
            .fs_context("adding file to bundle", &path)?;
        self.log.debug(format_args!("added file: {}", path.display()));
        Ok(())
    }

    /// Adds an in-memory buffer as a member named `name`.
    ///
    /// `contents` may be text or bytes; text is stored as UTF-8.
    pub fn add_buffer(&mut self, name: &str, contents: impl AsRef<[u8]>) -> Result<()> {
        let name = normalize_member_name(name)?;
        self.claim(&name)?;
        let data = contents.as_ref();

        let mut header = Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(BUFFER_MODE);
        header.set_mtime(0);
        header.set_uid(0);
        header.set_gid(0);
        self.builder.append_data(&mut header, &name, data)?;

        self.log.debug(format_args!("added buffer: {}", name));
        Ok(())
    }

    /// Whether a member with this name has already been added.
    pub fn contains(&self, name: &str) -> bool {
        normalize_member_name(name).is_ok_and(|name| self.names.contains(&name))
    }

    /// Writes the tar footer and gzip trailer, then rewinds the backing file.
    ///
    /// The caller owns the returned file; dropping it releases the storage.
    pub fn finish(self) -> Result<File> {
        let encoder = self.builder.into_inner()?;
        let mut file = encoder.finish()?;
        file.seek(SeekFrom::Start(0))?;
        Ok(file)
    }

    fn claim(&mut self, name: &str) -> Result<()> {
        if !self.names.insert(name.to_string()) {
            return Err(Error::DuplicateMember {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn members(file: File) -> Vec<(String, Vec<u8>)> {
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        archive
            .entries()
            .unwrap()
            .map(|entry| {
                let mut entry = entry.unwrap();
                let name = entry.path().unwrap().to_string_lossy().into_owned();
                let mut data = Vec::new();
                entry.read_to_end(&mut data).unwrap();
                (name, data)
            })
            .collect()
    }

    #[test]
    fn members_in_call_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/data.csv"), "x,y\n").unwrap();

        let log = BundleLogger::default();
        let mut archive = BundleArchive::create(&log).unwrap();
        archive.add_buffer("manifest.json", "{}").unwrap();
        archive.add_buffer("blob.bin", [0u8, 159, 146, 150]).unwrap();
        archive.add_file("sub/data.csv", dir.path()).unwrap();
        assert!(archive.contains("blob.bin"));

        let members = members(archive.finish().unwrap());
        assert_eq!(
            members,
            vec![
                ("manifest.json".to_string(), b"{}".to_vec()),
                ("blob.bin".to_string(), vec![0u8, 159, 146, 150]),
                ("sub/data.csv".to_string(), b"x,y\n".to_vec()),
            ]
        );
    }

    #[test]
    fn duplicate_member_rejected() {
        let log = BundleLogger::default();
        let mut archive = BundleArchive::create(&log).unwrap();
        archive.add_buffer("requirements.txt", "six\n").unwrap();
        let err = archive.add_buffer("requirements.txt", "six\n").unwrap_err();
        assert!(matches!(err, Error::DuplicateMember { ref name } if name == "requirements.txt"));
    }

    #[test]
    fn missing_file_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let log = BundleLogger::default();
        let mut archive = BundleArchive::create(&log).unwrap();
        let err = archive.add_file("nope.ipynb", dir.path()).unwrap_err();
        assert!(matches!(err, Error::Fs { .. }));
        assert!(!archive.contains("nope.ipynb"));

        std::fs::write(dir.path().join("nope.ipynb"), "{}").unwrap();
        archive.add_file("nope.ipynb", dir.path()).unwrap();
    }

    #[test]
    fn dot_prefixed_names_are_the_same_member() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.csv"), "x,y\n").unwrap();

        let log = BundleLogger::default();
        let mut archive = BundleArchive::create(&log).unwrap();
        archive.add_file("./data.csv", dir.path()).unwrap();
        assert!(archive.contains("data.csv"));
        let err = archive.add_file("data.csv", dir.path()).unwrap_err();
        assert!(matches!(err, Error::DuplicateMember { ref name } if name == "data.csv"));

        let err = archive.add_buffer("../escape.txt", "x").unwrap_err();
        assert!(matches!(err, Error::InvalidMemberName { .. }));

        let members = members(archive.finish().unwrap());
        assert_eq!(members, vec![("data.csv".to_string(), b"x,y\n".to_vec())]);
    }

    #[test]
    fn identical_inputs_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dummy.ipynb"), "{\"cells\": []}").unwrap();

        let build = || {
            let log = BundleLogger::default();
            let mut archive = BundleArchive::create(&log).unwrap();
            archive.add_buffer("manifest.json", "{}").unwrap();
            archive.add_file("dummy.ipynb", dir.path()).unwrap();
            let mut bytes = Vec::new();
            archive.finish().unwrap().read_to_end(&mut bytes).unwrap();
            bytes
        };

        assert_eq!(build(), build());
    }
}
