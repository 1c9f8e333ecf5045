//! Cryptographic hash model and the hash-algorithm registry.
//!
//! Algorithm lookup is case-insensitive: upstream ecosystems supply names in
//! inconsistent casing ("sha-256", "SHA256"), and canonicalizing at parse
//! time prevents spurious mismatches while keeping the official casing in
//! output. This is deliberately asymmetric with the case-sensitive
//! [`Classification`](crate::model::Classification) and
//! [`ExternalReferenceType`](crate::model::ExternalReferenceType) registries.

use crate::error::{BomError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash algorithms defined by the CycloneDX schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "SHA-1")]
    Sha1,
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
    #[serde(rename = "SHA3-256")]
    Sha3_256,
    #[serde(rename = "SHA3-384")]
    Sha3_384,
    #[serde(rename = "SHA3-512")]
    Sha3_512,
    #[serde(rename = "BLAKE2b-256")]
    Blake2b256,
    #[serde(rename = "BLAKE2b-384")]
    Blake2b384,
    #[serde(rename = "BLAKE2b-512")]
    Blake2b512,
    #[serde(rename = "BLAKE3")]
    Blake3,
}

impl HashAlgorithm {
    /// All canonical algorithms, in schema order.
    pub const ALL: [Self; 12] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Blake2b256,
        Self::Blake2b384,
        Self::Blake2b512,
        Self::Blake3,
    ];

    /// The official schema casing for this algorithm (e.g. "SHA-256").
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake2b256 => "BLAKE2b-256",
            Self::Blake2b384 => "BLAKE2b-384",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Blake3 => "BLAKE3",
        }
    }

    /// Case-insensitive lookup returning the canonical algorithm.
    ///
    /// Returns `None` for names outside the registry; constructing a
    /// [`Hash`] from such a name is an error, never a silent drop.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let lowered = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str().to_lowercase() == lowered)
    }

    /// Whether `name` resolves to a canonical algorithm under any casing.
    #[must_use]
    pub fn is_valid(name: &str) -> bool {
        Self::parse(name).is_some()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = BomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| BomError::UnknownHashAlgorithm(s.to_string()))
    }
}

/// A (algorithm, digest) pair attached to a component.
///
/// The digest is opaque to this crate; only the algorithm is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash {
    /// Hash algorithm, canonical.
    pub algorithm: HashAlgorithm,
    /// Digest string (hex encoded by convention).
    pub value: String,
}

impl Hash {
    /// Create a new hash from an already-canonical algorithm.
    #[must_use]
    pub const fn new(algorithm: HashAlgorithm, value: String) -> Self {
        Self { algorithm, value }
    }

    /// Create a hash from an algorithm name in any casing.
    ///
    /// # Errors
    ///
    /// Returns [`BomError::UnknownHashAlgorithm`] when the name is not in
    /// the registry.
    pub fn from_name(algorithm: &str, value: impl Into<String>) -> Result<Self> {
        Ok(Self {
            algorithm: algorithm.parse()?,
            value: value.into(),
        })
    }
}
