use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use memmap2::Mmap;
use sha2::{Digest as _, Sha256};

use crate::error::BenchError;
use crate::hash::Digest;

/// Computes the digest of the file at `path`. The slice is the shared working
/// buffer, already sliced down to the capacity under test; implementations
/// must not issue I/O operations larger than the slice.
pub type StrategyFn = fn(&Path, &mut [u8]) -> Result<Digest, BenchError>;

pub struct Strategy {
    pub label: &'static str,
    pub hash: StrategyFn,
}

/// All strategies return byte-identical digests for the same file content,
/// independent of the working-buffer capacity; they differ only in the I/O
/// mechanism used to read the bytes.
pub const STRATEGIES: [Strategy; 3] = [
    Strategy {
        label: "hash_of_file_buffered",
        hash: hash_of_file_buffered,
    },
    Strategy {
        label: "hash_of_file_raw",
        hash: hash_of_file_raw,
    },
    Strategy {
        label: "hash_of_file_mmap",
        hash: hash_of_file_mmap,
    },
];

/// Buffered stream reads through `BufReader` sized to the working capacity,
/// clamped to the file length so small files never pay for a large capacity
/// inside the timed window.
pub fn hash_of_file_buffered(path: &Path, buf: &mut [u8]) -> Result<Digest, BenchError> {
    let file = File::open(path).map_err(|e| BenchError::io(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| BenchError::io(path, e))?
        .len() as usize;
    let mut reader = BufReader::with_capacity(len.min(buf.len()), file);

    let mut hasher = Sha256::new();
    loop {
        let part = reader.fill_buf().map_err(|e| BenchError::io(path, e))?;
        if part.is_empty() {
            break;
        }
        hasher.update(part);

        let part_len = part.len();
        reader.consume(part_len);
    }
    Ok(Digest::new(hasher.finalize().into()))
}

/// Raw unbuffered reads straight into the working buffer, one read(2) per
/// iteration.
pub fn hash_of_file_raw(path: &Path, buf: &mut [u8]) -> Result<Digest, BenchError> {
    let mut file = File::open(path).map_err(|e| BenchError::io(path, e))?;

    let mut hasher = Sha256::new();
    loop {
        let n = file.read(buf).map_err(|e| BenchError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(Digest::new(hasher.finalize().into()))
}

/// Memory-mapped reads, fed to the hasher in capacity-sized chunks.
pub fn hash_of_file_mmap(path: &Path, buf: &mut [u8]) -> Result<Digest, BenchError> {
    let file = File::open(path).map_err(|e| BenchError::io(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| BenchError::io(path, e))?
        .len();

    let mut hasher = Sha256::new();
    // mapping a zero-length file fails with EINVAL
    if len > 0 {
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| BenchError::io(path, e))?;
        for chunk in mmap.chunks(buf.len().max(1)) {
            hasher.update(chunk);
        }
    }
    Ok(Digest::new(hasher.finalize().into()))
}
