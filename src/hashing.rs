//! Digest backends.
//!
//! Named as an external collaborator: a pluggable, single-method capability
//! mapping a chunk's bytes to a digest. The driver never inspects the
//! digest itself, only its length and hex encoding for the output line.

use std::io::Cursor;

use md5::{Digest as _, Md5};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::ConfigError;

/// A single-method hash capability: bytes in, a fixed-size digest out.
/// No cross-chunk state; safe to call repeatedly from the driver thread.
pub trait HashBackend: std::fmt::Debug {
    fn name(&self) -> &'static str;
    fn digest(&self, data: &[u8]) -> Vec<u8>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Md5Backend;

impl HashBackend for Md5Backend {
    fn name(&self) -> &'static str {
        "md5"
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        Md5::digest(data).to_vec()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha1Backend;

impl HashBackend for Sha1Backend {
    fn name(&self) -> &'static str {
        "sha1"
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        use sha1::Digest as _;
        Sha1::digest(data).to_vec()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Backend;

impl HashBackend for Sha256Backend {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        use sha2::Digest as _;
        Sha256::digest(data).to_vec()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha512Backend;

impl HashBackend for Sha512Backend {
    fn name(&self) -> &'static str {
        "sha512"
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        use sha2::Digest as _;
        Sha512::digest(data).to_vec()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct XxHash128Backend;

impl HashBackend for XxHash128Backend {
    fn name(&self) -> &'static str {
        "xxhash128"
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        twox_hash::xxh3::hash128(data).to_be_bytes().to_vec()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Murmur3Backend;

impl HashBackend for Murmur3Backend {
    fn name(&self) -> &'static str {
        "murmurhash3"
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        let mut cursor = Cursor::new(data);
        let value = murmur3::murmur3_x64_128(&mut cursor, 0)
            .expect("murmur3 over an in-memory byte slice cannot fail");
        value.to_be_bytes().to_vec()
    }
}

/// Builds the configured hash backend by name, as named in the config
/// file's `hashing_algo` key.
pub fn by_name(name: &str) -> Result<Box<dyn HashBackend>, ConfigError> {
    match name {
        "md5" => Ok(Box::new(Md5Backend)),
        "sha1" => Ok(Box::new(Sha1Backend)),
        "sha256" => Ok(Box::new(Sha256Backend)),
        "sha512" => Ok(Box::new(Sha512Backend)),
        "xxhash128" => Ok(Box::new(XxHash128Backend)),
        "murmurhash3" => Ok(Box::new(Murmur3Backend)),
        other => Err(ConfigError::UnknownHashingAlgorithm(other.to_string())),
    }
}
