use std::fmt;
use std::str::FromStr;

use sha2::{Digest as _, Sha256};

use crate::error::ParseDigestError;

pub const DIGEST_LEN: usize = 32;
pub const HEX_DIGEST_LEN: usize = DIGEST_LEN * 2;

/// SHA-256 digest. Equality is exact byte comparison; the canonical textual
/// form is lowercase hex.
#[derive(Debug, PartialEq, Eq, Copy, Clone, std::hash::Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }

    pub fn from_hex<S: AsRef<str>>(hex: S) -> Result<Self, ParseDigestError> {
        let hex = hex.as_ref().as_bytes();
        if hex.len() != HEX_DIGEST_LEN {
            return Err(ParseDigestError::InvalidLength);
        }

        let mut bytes = [0u8; DIGEST_LEN];
        for (pair, byte) in hex.chunks_exact(2).zip(bytes.iter_mut()) {
            let pair = std::str::from_utf8(pair).map_err(|_| ParseDigestError::InvalidFormat)?;
            *byte = u8::from_str_radix(pair, 16)?;
        }
        Ok(Digest(bytes))
    }

    pub fn from_contents<T: AsRef<[u8]>>(contents: T) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(contents.as_ref());
        Digest(hasher.finalize().into())
    }

}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Digest::from_hex(s)
    }
}
