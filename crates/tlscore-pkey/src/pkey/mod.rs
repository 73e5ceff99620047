//! The polymorphic key object and its decoding entry points.
//!
//! A [`Pkey`] wraps a backend-native key handle behind exactly one algorithm
//! variant (RSA with PKCS#1 v1.5, RSA-PSS, or ECDSA), chosen at decode time
//! from the handle's key family. The handshake layer then calls
//! [`Pkey::sign`] / [`Pkey::verify`] / [`Pkey::size`] without caring which
//! variant is inside. Every call path validates the signature scheme against
//! the key's variant and enforces the variant's own invariants (role, curve,
//! PSS availability) before any cryptographic work; the checks live with
//! each variant, so they also cover direct use of the variant types.
//!
//! # Construction is all-or-nothing
//!
//! Decoding either yields a fully initialized `Pkey` or a typed error; a
//! partially constructed key object is unrepresentable. The wrapped backend
//! handle is single-owner and released exactly once on drop.
//!
//! # Roles
//!
//! Whether a key is private or public is fixed at decode time and checked at
//! every operation: signing with a public key and verifying with a private
//! key both fail with [`PkeyError::KeyMismatch`], because in a handshake
//! either almost always means the caller swapped a key pair somewhere.

mod ecdsa;
mod rsa;
mod rsa_pss;
mod signing;

pub use ecdsa::{Curve, EcdsaKey};
pub use rsa::RsaKey;
pub use rsa_pss::{RsaPssKey, rsa_pss_supported};

use openssl::pkey::{Id, PKey, Private, Public};
use tlscore_stuffer::Stuffer;

use crate::{HashAlgo, HashState, PkeyError};

/// Whether a key carries private material or only the public component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// The key carries the private exponent/scalar and may sign or decrypt.
    Private,
    /// Public component only; may verify or encrypt.
    Public,
}

/// The algorithm family of a key object (its variant tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PkeyKind {
    /// RSA key usable with PKCS#1 v1.5 and PSS-over-RSAE signature schemes,
    /// plus PKCS#1 v1.5 encryption.
    Rsa,
    /// RSA-PSS key: sign/verify only, PSS padding only.
    RsaPss,
    /// ECDSA key on a NIST curve.
    Ecdsa,
}

/// Signature algorithms as they appear in TLS signature schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// RSASSA-PKCS1-v1_5 over an RSA key.
    RsaPkcs1,
    /// RSASSA-PSS padding over an RSA (rsaEncryption) key.
    RsaPssRsae,
    /// RSASSA-PSS padding over an RSA-PSS (rsassaPss) key.
    RsaPssPss,
    /// ECDSA over a NIST curve key.
    Ecdsa,
}

/// A (signature algorithm, hash algorithm) pairing.
///
/// Which pairings are *allowed* on a connection is negotiated upstream by
/// the policy layer; this layer only checks that a scheme is consistent
/// with the key variant it is used against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureScheme {
    /// The signature algorithm.
    pub sig_alg: SignatureAlgorithm,
    /// The digest algorithm paired with it.
    pub hash_alg: HashAlgo,
}

impl SignatureScheme {
    /// Creates a scheme pairing.
    pub fn new(sig_alg: SignatureAlgorithm, hash_alg: HashAlgo) -> Self {
        Self { sig_alg, hash_alg }
    }
}

/// The backend-native key handle, tagged with its role.
///
/// The backend expresses the private/public distinction in the handle's
/// type, so carrying both arms keeps decode-time role confusion
/// unrepresentable while the runtime role checks stay observable.
pub(crate) enum EvpHandle {
    /// A handle carrying private material.
    Private(PKey<Private>),
    /// A public-only handle.
    Public(PKey<Public>),
}

impl EvpHandle {
    pub(crate) fn role(&self) -> KeyRole {
        match self {
            EvpHandle::Private(_) => KeyRole::Private,
            EvpHandle::Public(_) => KeyRole::Public,
        }
    }

    /// Maximum output size of a signature or ciphertext under this key, per
    /// the backend (`EVP_PKEY_size`).
    pub(crate) fn size(&self) -> usize {
        match self {
            EvpHandle::Private(key) => key.size(),
            EvpHandle::Public(key) => key.size(),
        }
    }
}

/// The algorithm-specific payload behind the façade.
enum PkeyVariant {
    Rsa(RsaKey),
    RsaPss(RsaPssKey),
    Ecdsa(EcdsaKey),
}

/// A polymorphic handshake key.
///
/// Exactly one variant is live for the lifetime of the object. Dropping the
/// key releases the backend handle exactly once.
pub struct Pkey {
    variant: PkeyVariant,
}

impl Pkey {
    /// Constructs a key object from a public backend handle.
    ///
    /// The algorithm family is read from the handle; unknown families fail
    /// with [`PkeyError::UnsupportedKeyType`]. Failure constructs nothing
    /// and releases the handle.
    pub fn decode_public(evp: PKey<Public>) -> Result<Self, PkeyError> {
        let variant = match evp.id() {
            Id::RSA => PkeyVariant::Rsa(RsaKey::from_public(evp)?),
            Id::RSA_PSS => PkeyVariant::RsaPss(RsaPssKey::from_public(evp)?),
            Id::EC => PkeyVariant::Ecdsa(EcdsaKey::from_public(evp)?),
            _ => return Err(PkeyError::UnsupportedKeyType),
        };
        Ok(Self { variant })
    }

    /// Constructs a key object from a private backend handle.
    ///
    /// In addition to family dispatch this runs the backend's structural
    /// consistency check on the private material
    /// (modulus/exponent/prime relationships for RSA, scalar/point
    /// consistency for EC); rejection fails with
    /// [`PkeyError::KeyCheckFailed`] so corrupted or adversarially crafted
    /// key files never become usable key objects.
    pub fn decode_private(evp: PKey<Private>) -> Result<Self, PkeyError> {
        let variant = match evp.id() {
            Id::RSA => PkeyVariant::Rsa(RsaKey::from_private(evp)?),
            Id::RSA_PSS => PkeyVariant::RsaPss(RsaPssKey::from_private(evp)?),
            Id::EC => PkeyVariant::Ecdsa(EcdsaKey::from_private(evp)?),
            _ => return Err(PkeyError::UnsupportedKeyType),
        };
        Ok(Self { variant })
    }

    /// Decodes a public key from DER-encoded SubjectPublicKeyInfo.
    pub fn public_from_der(der: &[u8]) -> Result<Self, PkeyError> {
        let evp = PKey::public_key_from_der(der).map_err(|_| PkeyError::KeyDecode)?;
        Self::decode_public(evp)
    }

    /// Decodes a public key from PEM.
    pub fn public_from_pem(pem: &[u8]) -> Result<Self, PkeyError> {
        let evp = PKey::public_key_from_pem(pem).map_err(|_| PkeyError::KeyDecode)?;
        Self::decode_public(evp)
    }

    /// Decodes a private key from DER-encoded PKCS#8.
    pub fn private_from_pkcs8_der(der: &[u8]) -> Result<Self, PkeyError> {
        let evp = PKey::private_key_from_pkcs8(der).map_err(|_| PkeyError::KeyDecode)?;
        Self::decode_private(evp)
    }

    /// Decodes a private key from PEM.
    pub fn private_from_pem(pem: &[u8]) -> Result<Self, PkeyError> {
        let evp = PKey::private_key_from_pem(pem).map_err(|_| PkeyError::KeyDecode)?;
        Self::decode_private(evp)
    }

    /// Returns the algorithm family (variant tag).
    pub fn kind(&self) -> PkeyKind {
        match &self.variant {
            PkeyVariant::Rsa(_) => PkeyKind::Rsa,
            PkeyVariant::RsaPss(_) => PkeyKind::RsaPss,
            PkeyVariant::Ecdsa(_) => PkeyKind::Ecdsa,
        }
    }

    /// Returns whether this key is private or public.
    pub fn role(&self) -> KeyRole {
        match &self.variant {
            PkeyVariant::Rsa(key) => key.role(),
            PkeyVariant::RsaPss(key) => key.role(),
            PkeyVariant::Ecdsa(key) => key.role(),
        }
    }

    /// Returns the maximum byte length a signature (or ciphertext) under
    /// this key can occupy. Callers use it to size output buffers before
    /// calling [`Pkey::sign`] or [`Pkey::encrypt`].
    pub fn size(&self) -> usize {
        match &self.variant {
            PkeyVariant::Rsa(key) => key.size(),
            PkeyVariant::RsaPss(key) => key.size(),
            PkeyVariant::Ecdsa(key) => key.size(),
        }
    }

    /// Returns the ECDSA payload, if this key is an ECDSA key.
    ///
    /// Used by call sites that need to pin the key to an expected curve via
    /// [`EcdsaKey::matches_curve`] before accepting a handshake signature.
    pub fn as_ecdsa(&self) -> Option<&EcdsaKey> {
        match &self.variant {
            PkeyVariant::Ecdsa(key) => Some(key),
            _ => None,
        }
    }

    /// Signs the finalized digest of `digest` under `scheme`, appending the
    /// signature bytes to `signature_out`.
    ///
    /// The scheme must be compatible with the key's variant and the key must
    /// be private; either violation fails with [`PkeyError::KeyMismatch`]
    /// before any cryptographic work, and nothing is written to
    /// `signature_out` on any failure. On success exactly the produced
    /// signature length is appended, never more than [`Pkey::size`].
    pub fn sign(
        &self,
        scheme: SignatureScheme,
        digest: &mut HashState,
        signature_out: &mut Stuffer,
    ) -> Result<(), PkeyError> {
        match &self.variant {
            PkeyVariant::Rsa(key) => key.sign(scheme, digest, signature_out),
            PkeyVariant::RsaPss(key) => key.sign(scheme, digest, signature_out),
            PkeyVariant::Ecdsa(key) => key.sign(scheme, digest, signature_out),
        }
    }

    /// Verifies the signature in `signature_in` over the finalized digest of
    /// `digest` under `scheme`.
    ///
    /// The scheme must be compatible with the key's variant and the key must
    /// be public; either violation fails with [`PkeyError::KeyMismatch`]
    /// before any cryptographic work. All bytes available to read in
    /// `signature_in` are consumed as the signature. A signature that does
    /// not verify fails with [`PkeyError::SignatureInvalid`].
    pub fn verify(
        &self,
        scheme: SignatureScheme,
        digest: &mut HashState,
        signature_in: &mut Stuffer,
    ) -> Result<(), PkeyError> {
        match &self.variant {
            PkeyVariant::Rsa(key) => key.verify(scheme, digest, signature_in),
            PkeyVariant::RsaPss(key) => key.verify(scheme, digest, signature_in),
            PkeyVariant::Ecdsa(key) => key.verify(scheme, digest, signature_in),
        }
    }

    /// Encrypts `plaintext` with PKCS#1 v1.5 padding, appending the
    /// ciphertext to `ciphertext_out`.
    ///
    /// Only plain RSA keys support encryption. RSA-PSS keys exist solely for
    /// signing (key exchange must come from an ephemeral-secrecy mechanism
    /// instead) and ECDSA cannot encrypt, so both fail with
    /// [`PkeyError::UnsupportedConfiguration`].
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        ciphertext_out: &mut Stuffer,
    ) -> Result<(), PkeyError> {
        match &self.variant {
            PkeyVariant::Rsa(key) => key.encrypt(plaintext, ciphertext_out),
            PkeyVariant::RsaPss(_) | PkeyVariant::Ecdsa(_) => {
                Err(PkeyError::UnsupportedConfiguration)
            }
        }
    }

    /// Decrypts a PKCS#1 v1.5 ciphertext into `plaintext_out` without
    /// leaking padding validity.
    ///
    /// Only plain RSA private keys support decryption; see [`Pkey::encrypt`]
    /// for why the other variants refuse. The caller pre-fills
    /// `plaintext_out` with random fallback bytes; on bad padding those are
    /// left in place and the call still succeeds, so neither timing nor the
    /// result reveals whether the padding was valid.
    pub fn decrypt(&self, ciphertext: &[u8], plaintext_out: &mut [u8]) -> Result<(), PkeyError> {
        match &self.variant {
            PkeyVariant::Rsa(key) => key.decrypt(ciphertext, plaintext_out),
            PkeyVariant::RsaPss(_) | PkeyVariant::Ecdsa(_) => {
                Err(PkeyError::UnsupportedConfiguration)
            }
        }
    }
}

#[cfg(test)]
mod tests;
