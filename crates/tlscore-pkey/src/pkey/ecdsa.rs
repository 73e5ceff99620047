//! ECDSA keys on the NIST prime curves.
//!
//! The curve is recorded at decode time so call sites that negotiated a
//! specific curve can pin the key to it with [`EcdsaKey::matches_curve`]
//! before trusting any signature from it. Keys on curves outside the
//! supported set are rejected at decode time.

use openssl::nid::Nid;
use openssl::pkey::{PKey, Private, Public};
use tlscore_stuffer::Stuffer;

use crate::pkey::signing::{sign_digest, verify_digest};
use crate::pkey::{EvpHandle, KeyRole, SignatureAlgorithm, SignatureScheme};
use crate::{HashState, PkeyError};

/// Supported NIST prime curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    /// NIST P-256 (secp256r1).
    P256,
    /// NIST P-384 (secp384r1).
    P384,
    /// NIST P-521 (secp521r1).
    P521,
}

impl Curve {
    /// Field size in bits.
    pub fn bit_size(self) -> u32 {
        match self {
            Curve::P256 => 256,
            Curve::P384 => 384,
            Curve::P521 => 521,
        }
    }

    /// Length in bytes of one coordinate of an uncompressed point.
    pub fn coordinate_size(self) -> usize {
        (self.bit_size() as usize).div_ceil(8)
    }

    fn from_nid(nid: Nid) -> Option<Self> {
        match nid {
            Nid::X9_62_PRIME256V1 => Some(Curve::P256),
            Nid::SECP384R1 => Some(Curve::P384),
            Nid::SECP521R1 => Some(Curve::P521),
            _ => None,
        }
    }

    pub(crate) fn nid(self) -> Nid {
        match self {
            Curve::P256 => Nid::X9_62_PRIME256V1,
            Curve::P384 => Nid::SECP384R1,
            Curve::P521 => Nid::SECP521R1,
        }
    }
}

/// An ECDSA key handle together with its curve.
pub struct EcdsaKey {
    handle: EvpHandle,
    curve: Curve,
}

impl EcdsaKey {
    pub(crate) fn from_public(evp: PKey<Public>) -> Result<Self, PkeyError> {
        let ec = evp.ec_key().map_err(|_| PkeyError::KeyDecode)?;
        let curve = curve_of(ec.group().curve_name())?;
        Ok(Self {
            handle: EvpHandle::Public(evp),
            curve,
        })
    }

    /// Wraps a private ECDSA handle after the backend's scalar/point
    /// consistency check.
    pub(crate) fn from_private(evp: PKey<Private>) -> Result<Self, PkeyError> {
        let ec = evp.ec_key().map_err(|_| PkeyError::KeyDecode)?;
        let curve = curve_of(ec.group().curve_name())?;
        ec.check_key().map_err(|_| PkeyError::KeyCheckFailed)?;
        Ok(Self {
            handle: EvpHandle::Private(evp),
            curve,
        })
    }

    pub(crate) fn role(&self) -> KeyRole {
        self.handle.role()
    }

    /// Maximum DER-encoded signature length; actual signatures vary.
    pub(crate) fn size(&self) -> usize {
        self.handle.size()
    }

    /// The curve this key lives on.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Fails with [`PkeyError::KeyMismatch`] unless this key is on
    /// `expected`: the guard call sites run after curve negotiation,
    /// before any signature from the key is considered.
    pub fn matches_curve(&self, expected: Curve) -> Result<(), PkeyError> {
        if self.curve == expected {
            Ok(())
        } else {
            Err(PkeyError::KeyMismatch)
        }
    }

    fn check_scheme(scheme: SignatureScheme) -> Result<(), PkeyError> {
        match scheme.sig_alg {
            SignatureAlgorithm::Ecdsa => Ok(()),
            SignatureAlgorithm::RsaPkcs1
            | SignatureAlgorithm::RsaPssRsae
            | SignatureAlgorithm::RsaPssPss => Err(PkeyError::KeyMismatch),
        }
    }

    /// Signs the finalized digest, appending the DER-encoded (r, s) pair.
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

    /// Verifies a DER-encoded signature over the finalized digest.
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

fn curve_of(nid: Option<Nid>) -> Result<Curve, PkeyError> {
    nid.and_then(Curve::from_nid)
        .ok_or(PkeyError::UnsupportedConfiguration)
}
