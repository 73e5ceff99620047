//! Caller-owned hash state consumed by sign and verify.
//!
//! The handshake layer feeds transcript bytes into a [`HashState`] and hands
//! it to [`crate::Pkey::sign`] / [`crate::Pkey::verify`], which finalize it
//! and operate on the resulting digest. This layer never owns a hash state:
//! it only reads the finalized digest, and the caller remains responsible
//! for the state's lifetime.
//!
//! Digest computation is delegated to the OpenSSL backend
//! (`openssl::hash::Hasher`); this module only maps algorithm names to
//! backend descriptors and keeps the digest length handy for buffer sizing.

use openssl::hash::{Hasher, MessageDigest};
use openssl::md::{Md, MdRef};

use crate::PkeyError;

/// Hash algorithms usable in signature schemes.
///
/// SHA-1 is retained only for legacy PKCS#1 compatibility; new schemes pair
/// keys with the SHA-2 family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgo {
    /// SHA-1 (20-byte digest, legacy only).
    Sha1,
    /// SHA-256 (32-byte digest).
    Sha256,
    /// SHA-384 (48-byte digest).
    Sha384,
    /// SHA-512 (64-byte digest).
    Sha512,
}

impl HashAlgo {
    /// Returns the digest length in bytes.
    pub fn size(self) -> usize {
        match self {
            HashAlgo::Sha1 => 20,
            HashAlgo::Sha256 => 32,
            HashAlgo::Sha384 => 48,
            HashAlgo::Sha512 => 64,
        }
    }

    /// Returns the backend digest descriptor for hashing.
    pub(crate) fn message_digest(self) -> MessageDigest {
        match self {
            HashAlgo::Sha1 => MessageDigest::sha1(),
            HashAlgo::Sha256 => MessageDigest::sha256(),
            HashAlgo::Sha384 => MessageDigest::sha384(),
            HashAlgo::Sha512 => MessageDigest::sha512(),
        }
    }

    /// Returns the backend digest descriptor used when configuring signing
    /// contexts.
    pub(crate) fn md(self) -> &'static MdRef {
        match self {
            HashAlgo::Sha1 => Md::sha1(),
            HashAlgo::Sha256 => Md::sha256(),
            HashAlgo::Sha384 => Md::sha384(),
            HashAlgo::Sha512 => Md::sha512(),
        }
    }
}

/// An in-progress digest computation.
///
/// Owned and driven by the caller; the key layer finalizes it during sign
/// and verify. The state is reusable: finalizing resets it for the next
/// computation with the same algorithm.
pub struct HashState {
    algo: HashAlgo,
    hasher: Hasher,
}

impl HashState {
    /// Creates a fresh hash state for `algo`.
    pub fn new(algo: HashAlgo) -> Result<Self, PkeyError> {
        let hasher = Hasher::new(algo.message_digest()).map_err(|_| PkeyError::HashFailed)?;
        Ok(Self { algo, hasher })
    }

    /// Returns the algorithm this state computes.
    pub fn algo(&self) -> HashAlgo {
        self.algo
    }

    /// Absorbs `data` into the digest.
    pub fn update(&mut self, data: &[u8]) -> Result<(), PkeyError> {
        self.hasher.update(data).map_err(|_| PkeyError::HashFailed)
    }

    /// Finalizes the computation and returns the digest.
    ///
    /// The state resets and can be reused for a new computation afterwards.
    pub fn digest(&mut self) -> Result<Vec<u8>, PkeyError> {
        let bytes = self.hasher.finish().map_err(|_| PkeyError::HashFailed)?;
        Ok(bytes.to_vec())
    }

    /// Discards any absorbed data, returning the state to its initial
    /// condition.
    pub fn reset(&mut self) -> Result<(), PkeyError> {
        self.hasher =
            Hasher::new(self.algo.message_digest()).map_err(|_| PkeyError::HashFailed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
