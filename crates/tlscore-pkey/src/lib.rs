//! Polymorphic TLS handshake signing keys over an OpenSSL backend.
//!
//! This crate is the key abstraction layer underneath a TLS handshake's
//! signing and verification path. It lets the protocol engine treat RSA
//! (PKCS#1 v1.5), RSA-PSS, and ECDSA keys uniformly (sign a digest, verify a
//! signature, report a maximum output size) while each algorithm enforces
//! its own structural and cryptographic invariants (key type, curve match,
//! private/public role, PSS availability).
//!
//! # Components
//!
//! - [`Pkey`]: the polymorphic key object. Decoded from a backend-native
//!   `PKey` handle (or directly from DER/PEM), it carries exactly one
//!   algorithm variant and dispatches `size`/`sign`/`verify` (and, for plain
//!   RSA, `encrypt`/`decrypt`) to it after cross-cutting compatibility
//!   checks.
//! - [`HashState`]: caller-owned digest computation consumed by sign/verify.
//! - Constant-time primitives ([`constant_time_equals`],
//!   [`constant_time_copy_or_dont`]): data-length-independent comparison and
//!   conditional copy, used wherever secret material is compared or
//!   conditionally copied.
//!
//! Signature bytes travel in [`tlscore_stuffer::Stuffer`] buffers, the
//! bounds-checked cursor type shared with the rest of the handshake code.
//!
//! # What this layer does not do
//!
//! Algorithm/policy negotiation, certificate chain validation, network I/O,
//! and key generation live upstream. Primitive cryptography (modular
//! exponentiation, EC arithmetic, hash compression) is delegated entirely to
//! the OpenSSL backend. Nothing here logs or terminates the process; every
//! failure is a typed result for the caller.

use thiserror::Error;

mod ct;
mod hash;
mod pkey;

pub use ct::{constant_time_copy_or_dont, constant_time_equals, constant_time_pkcs1_unpad};
pub use hash::{HashAlgo, HashState};
pub use pkey::{
    Curve, EcdsaKey, KeyRole, Pkey, PkeyKind, RsaKey, RsaPssKey, SignatureAlgorithm,
    SignatureScheme, rsa_pss_supported,
};

use tlscore_stuffer::StufferError;

/// Errors reported by the key layer.
///
/// Every operation either fully succeeds with its stated postconditions or
/// fails atomically with one of these variants: no partial side effects, no
/// leaked backend handles. None of them is retried internally and none is
/// fatal to the process.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PkeyError {
    /// A required argument was absent or structurally unusable.
    #[error("invalid argument")]
    InvalidArgument,

    /// Role or algorithm/variant incompatibility: signing with a public key,
    /// verifying with a private key, a signature scheme that does not match
    /// the key's variant, or an ECDSA key on an unexpected curve. Almost
    /// always indicates swapped keys or a mismatched scheme at the caller.
    #[error("key role or algorithm mismatch")]
    KeyMismatch,

    /// The backend rejected private-key material as structurally
    /// inconsistent (e.g. modulus/prime relationships do not hold).
    #[error("private key failed structural validation")]
    KeyCheckFailed,

    /// Encoded key material could not be parsed into a backend key handle.
    #[error("key decoding failed")]
    KeyDecode,

    /// The backend handle holds a key family this layer does not support.
    #[error("unsupported key type")]
    UnsupportedKeyType,

    /// The requested capability is not available in this configuration,
    /// e.g. RSA-PSS on a libcrypto without PSS certificate support, or
    /// encrypt/decrypt on a sign-only key variant.
    #[error("unsupported configuration")]
    UnsupportedConfiguration,

    /// The backend signing operation failed.
    #[error("signing failed")]
    SignFailed,

    /// The signature did not verify against the supplied digest and key.
    #[error("signature verification failed")]
    SignatureInvalid,

    /// The backend public-key encryption operation failed.
    #[error("encryption failed")]
    EncryptFailed,

    /// The backend private-key decryption operation failed.
    #[error("decryption failed")]
    DecryptFailed,

    /// A digest operation on the caller-owned hash state failed.
    #[error("hash operation failed")]
    HashFailed,

    /// A wire-buffer operation failed while carrying signature material.
    #[error(transparent)]
    Stuffer(#[from] StufferError),
}
