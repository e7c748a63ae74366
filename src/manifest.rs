use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BenchError, FormatError};
use crate::filesystem::path_from_bytes;
use crate::hash::{Digest, HEX_DIGEST_LEN};

pub const SEPARATOR_LEN: usize = 2;

/// Byte marking the end of well-formed manifest content, mirroring the
/// NUL-terminated listing produced by `sha256sum -z`.
pub const SENTINEL: u8 = 0x00;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ManifestEntry {
    pub expected: Digest,
    pub path: PathBuf,
}

/// Single-pass cursor over a digest manifest. The cursor is not resettable:
/// a fresh sweep re-opens the manifest from the start.
///
/// A manifest line is `<64 hex chars><2 separator chars><path>` and every
/// line, the last one included, is terminated by a NUL byte — the format
/// `sha256sum -z` emits. NUL framing keeps paths with embedded newlines
/// intact. The manifest is trusted and hand-verified; every parse failure
/// is fatal, since a silently skipped line would change the measured workload.
pub struct ManifestReader {
    path: PathBuf,
    content: Vec<u8>,
    cursor: usize,
    line_index: usize,
}

impl ManifestReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BenchError> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read(&path).map_err(|source| BenchError::Io {
            path: path.clone(),
            source,
        })?;

        match content.last() {
            None => return Err(Self::format_error(path, FormatError::Empty)),
            Some(&byte) if byte != SENTINEL => {
                return Err(Self::format_error(path, FormatError::MissingSentinel))
            }
            Some(_) => {}
        }

        Ok(ManifestReader {
            path,
            content,
            cursor: 0,
            line_index: 0,
        })
    }

    /// Parses the next manifest line, advancing past the line and its
    /// terminator. Returns `Ok(None)` once the content is exhausted.
    pub fn next_entry(&mut self) -> Result<Option<ManifestEntry>, BenchError> {
        if self.cursor >= self.content.len() {
            return Ok(None);
        }

        let rest = &self.content[self.cursor..];
        let line = match rest.iter().position(|&byte| byte == SENTINEL) {
            // open() verified the trailing sentinel, so this always matches
            Some(end) => &rest[..end],
            None => rest,
        };

        if line.len() < HEX_DIGEST_LEN + SEPARATOR_LEN {
            return Err(self.format_error_here(FormatError::TruncatedLine {
                index: self.line_index,
            }));
        }

        let hex = String::from_utf8_lossy(&line[..HEX_DIGEST_LEN]);
        let expected = Digest::from_hex(hex).map_err(|source| {
            self.format_error_here(FormatError::InvalidDigest {
                index: self.line_index,
                source,
            })
        })?;
        let path = path_from_bytes(&line[HEX_DIGEST_LEN + SEPARATOR_LEN..]);

        // step over the line and its NUL terminator
        self.cursor += line.len() + 1;
        self.line_index += 1;

        Ok(Some(ManifestEntry { expected, path }))
    }

    fn format_error_here(&self, source: FormatError) -> BenchError {
        Self::format_error(self.path.clone(), source)
    }

    fn format_error(path: PathBuf, source: FormatError) -> BenchError {
        BenchError::Format { path, source }
    }
}
