//! Content checksums for manifest entries.
//!
//! Manifest checksums are MD5 hex digests of raw content. They identify files
//! for the deployment service's bookkeeping and carry no security weight.
//! Only bytes are hashed: path, mtime and permissions never contribute.

use std::{fs::File, io::Read, path::Path};

use crate::bundler::{Result, error::ErrorExt, settings::CHECKSUM_CHUNK_SIZE};

/// Calculates the MD5 checksum of a file on disk.
///
/// Reads the file in 64 KiB chunks, so files larger than memory are fine.
///
/// # Returns
///
/// * `Ok(String)` - 32-character lowercase hex digest
/// * `Err` - If the file does not exist or cannot be read
pub fn file_checksum(path: &Path) -> Result<String> {
    let mut file = File::open(path).fs_context("opening file for checksum", path)?;
    let mut context = md5::Context::new();
    let mut buffer = vec![0u8; CHECKSUM_CHUNK_SIZE];

    loop {
        let n = file
            .read(&mut buffer)
            .fs_context("reading file for checksum", path)?;
        if n == 0 {
            break;
        }
        context.consume(&buffer[..n]);
    }

    Ok(format!("{:x}", context.finalize()))
}

/// Calculates the MD5 checksum of an in-memory buffer.
///
/// Text is hashed as its UTF-8 encoding.
pub fn buffer_checksum(buf: impl AsRef<[u8]>) -> String {
    format!("{:x}", md5::compute(buf.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn requirements_digest() {
        assert_eq!(
            buffer_checksum("numpy\npandas\nmatplotlib\n"),
            "5f2a5e862fe7afe3def4a57bb5cfb214"
        );
    }

    #[test]
    fn empty_buffer() {
        assert_eq!(buffer_checksum(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn text_and_bytes_agree() {
        let text = "print('héllo')\n";
        assert_eq!(buffer_checksum(text), buffer_checksum(text.as_bytes()));
        assert_eq!(buffer_checksum(text.to_string()), buffer_checksum(text.as_bytes().to_vec()));
    }

    #[test]
    fn file_matches_buffer_across_chunk_boundary() {
        // Spans several read chunks with a ragged tail.
        let content: Vec<u8> = (0..(CHECKSUM_CHUNK_SIZE * 3 + 17))
            .map(|i| (i % 251) as u8)
            .collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&content).unwrap();
        file.flush().unwrap();

        let from_disk = file_checksum(file.path()).unwrap();
        assert_eq!(from_disk, buffer_checksum(&content));
        assert_eq!(from_disk, file_checksum(file.path()).unwrap());
        assert_eq!(from_disk.len(), 32);
    }

    #[test]
    fn missing_file_is_fs_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ipynb");
        let err = file_checksum(&missing).unwrap_err();
        match err {
            crate::bundler::Error::Fs { path, error, .. } => {
                assert_eq!(path, missing);
                assert_eq!(error.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
