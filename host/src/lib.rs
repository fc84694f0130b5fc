//! Reads X12 interchanges from disk and hands them to the loop binder.
//!
//! [`x12_document::parse`] works over a single borrowed byte slice, since
//! [`segment`] and [`x12_schema`] decode zero-copy against it. A file is
//! therefore read in full before parsing can start; what this crate adds is
//! bounding that read (chunked, with a size cap) so a caller finds out about
//! an oversized or truncated file without first allocating gigabytes for it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info, warn};

use x12_document::{BinderConfig, ParseOutcome};

/// Tuning for [`read_interchange`]'s chunked read loop.
#[derive(Debug, Clone, Copy)]
pub struct ReaderConfig {
    /// Bytes requested per `read` call.
    pub chunk_size: usize,
    /// Refuse to grow the buffer past this many bytes.
    pub max_file_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024,
            max_file_size: 256 * 1024 * 1024,
        }
    }
}

/// Binder config plus the reader tuning that sits in front of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostConfig {
    pub reader: ReaderConfig,
    pub binder: BinderConfig,
}

#[derive(thiserror::Error, Debug)]
pub enum HostError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: std::io::Error },
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("{path} exceeds the {limit}-byte size cap")]
    TooLarge { path: String, limit: usize },
    #[error(transparent)]
    Parse(#[from] x12_document::ParseError),
}

/// Read a file into memory in `config.chunk_size` chunks, refusing to exceed
/// `config.max_file_size`.
pub fn read_interchange<P: AsRef<Path>>(path: P, config: ReaderConfig) -> Result<Vec<u8>, HostError> {
    let path_str = path.as_ref().display().to_string();
    let mut file = File::open(&path).map_err(|source| HostError::Open {
        path: path_str.clone(),
        source,
    })?;

    let mut buffer = Vec::new();
    let mut chunk = vec![0u8; config.chunk_size];
    loop {
        let read = file.read(&mut chunk).map_err(|source| HostError::Read {
            path: path_str.clone(),
            source,
        })?;
        if read == 0 {
            break;
        }
        if buffer.len() + read > config.max_file_size {
            return Err(HostError::TooLarge {
                path: path_str,
                limit: config.max_file_size,
            });
        }
        buffer.extend_from_slice(&chunk[..read]);
        debug!("{}: read {} bytes ({} total)", path_str, read, buffer.len());
    }

    info!("{}: read {} bytes", path_str, buffer.len());
    Ok(buffer)
}

/// Read and bind one interchange file, using the given guide's rule and schema tables.
pub fn parse_file<P: AsRef<Path>>(
    path: P,
    registry: &x12_document::RuleRegistry,
    schemas: &x12_schema::SchemaRegistry,
    config: HostConfig,
) -> Result<ParseOutcome, HostError> {
    let data = read_interchange(path, config.reader)?;
    let outcome = x12_document::parse(&data, registry, schemas, &config.binder)?;
    if !outcome.diagnostics.is_empty() {
        warn!("parse produced {} diagnostic(s)", outcome.diagnostics.len());
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempFile(std::path::PathBuf);

    impl TempFile {
        fn with_contents(name: &str, contents: &[u8]) -> Self {
            let path = std::env::temp_dir().join(format!("x12-host-test-{}-{}", std::process::id(), name));
            std::fs::write(&path, contents).unwrap();
            Self(path)
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn reads_a_small_file_in_one_chunk() {
        let file = TempFile::with_contents("small", b"ISA*00*");
        let data = read_interchange(&file.0, ReaderConfig::default()).unwrap();
        assert_eq!(data, b"ISA*00*");
    }

    #[test]
    fn rejects_files_over_the_size_cap() {
        let file = TempFile::with_contents("oversized", &[b'A'; 100]);
        let config = ReaderConfig {
            chunk_size: 16,
            max_file_size: 50,
        };
        let err = read_interchange(&file.0, config).unwrap_err();
        assert!(matches!(err, HostError::TooLarge { .. }));
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = read_interchange("/nonexistent/path/x12.edi", ReaderConfig::default()).unwrap_err();
        assert!(matches!(err, HostError::Open { .. }));
    }
}
