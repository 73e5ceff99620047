//! RSA-PSS (rsassaPss) certificate keys.
//!
//! A key whose SubjectPublicKeyInfo names the rsassaPss algorithm is
//! restricted by definition: it signs and verifies with PSS padding only.
//! This variant has no encrypt or decrypt methods at all, so misuse for key
//! exchange is unrepresentable rather than merely rejected at runtime.
//!
//! Backend support for rsassaPss keys is a library-version question, probed
//! once via [`rsa_pss_supported`]; decoding such a key on an older backend
//! fails with [`PkeyError::UnsupportedKeyType`].

use openssl::pkey::{PKey, Private, Public};
use tlscore_stuffer::Stuffer;

use crate::pkey::signing::{sign_digest, verify_digest};
use crate::pkey::{EvpHandle, KeyRole, SignatureAlgorithm, SignatureScheme};
use crate::{HashState, PkeyError};

/// OpenSSL 1.1.1 is the first release with usable RSA-PSS key type support.
const PSS_MIN_BACKEND_VERSION: i64 = 0x1010_1000;

/// Returns whether the linked backend can handle rsassaPss certificate keys.
pub fn rsa_pss_supported() -> bool {
    openssl::version::number() >= PSS_MIN_BACKEND_VERSION
}

/// An RSA-PSS key handle, public or private.
pub struct RsaPssKey {
    handle: EvpHandle,
}

impl RsaPssKey {
    pub(crate) fn from_public(evp: PKey<Public>) -> Result<Self, PkeyError> {
        if !rsa_pss_supported() {
            return Err(PkeyError::UnsupportedKeyType);
        }
        Ok(Self {
            handle: EvpHandle::Public(evp),
        })
    }

    /// Wraps a private RSA-PSS handle after checking the key's internal
    /// consistency, as for plain RSA keys.
    pub(crate) fn from_private(evp: PKey<Private>) -> Result<Self, PkeyError> {
        if !rsa_pss_supported() {
            return Err(PkeyError::UnsupportedKeyType);
        }
        let rsa = evp.rsa().map_err(|_| PkeyError::KeyDecode)?;
        match rsa.check_key() {
            Ok(true) => {}
            Ok(false) | Err(_) => return Err(PkeyError::KeyCheckFailed),
        }
        Ok(Self {
            handle: EvpHandle::Private(evp),
        })
    }

    pub(crate) fn role(&self) -> KeyRole {
        self.handle.role()
    }

    pub(crate) fn size(&self) -> usize {
        self.handle.size()
    }

    /// An rsassaPss key accepts only the PSS-over-PSS schemes.
    fn check_scheme(scheme: SignatureScheme) -> Result<(), PkeyError> {
        match scheme.sig_alg {
            SignatureAlgorithm::RsaPssPss => Ok(()),
            SignatureAlgorithm::RsaPkcs1
            | SignatureAlgorithm::RsaPssRsae
            | SignatureAlgorithm::Ecdsa => Err(PkeyError::KeyMismatch),
        }
    }

    /// Signs the finalized digest with PSS padding.
    pub fn sign(
        &self,
        scheme: SignatureScheme,
        digest: &mut HashState,
        signature_out: &mut Stuffer,
    ) -> Result<(), PkeyError> {
        Self::check_scheme(scheme)?;
        let EvpHandle::Private(key) = &self.handle else {
            return Err(PkeyError::KeyMismatch);
        };
        let digest_bytes = digest.digest()?;
        sign_digest(key, scheme, &digest_bytes, signature_out)
    }

    /// Verifies a PSS signature over the finalized digest.
    pub fn verify(
        &self,
        scheme: SignatureScheme,
        digest: &mut HashState,
        signature_in: &mut Stuffer,
    ) -> Result<(), PkeyError> {
        Self::check_scheme(scheme)?;
        let EvpHandle::Public(key) = &self.handle else {
            return Err(PkeyError::KeyMismatch);
        };
        let digest_bytes = digest.digest()?;
        let available = signature_in.data_available();
        let signature = signature_in.raw_read(available)?;
        verify_digest(key, scheme, &digest_bytes, signature)
    }
}
