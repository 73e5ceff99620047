//! Plain RSA (rsaEncryption) keys.
//!
//! This variant carries the full legacy surface: PKCS#1 v1.5 signatures,
//! PSS signatures over an rsaEncryption key (the TLS 1.3 `rsa_pss_rsae_*`
//! schemes), and PKCS#1 v1.5 encryption for RSA key exchange. The decrypt
//! path is timing-hardened; see [`RsaKey::decrypt`].

use openssl::pkey::{PKey, Private, Public};
use openssl::pkey_ctx::PkeyCtx;
use openssl::rsa::Padding;
use tlscore_stuffer::Stuffer;
use zeroize::Zeroizing;

use crate::pkey::signing::{sign_digest, verify_digest};
use crate::pkey::{EvpHandle, KeyRole, SignatureAlgorithm, SignatureScheme};
use crate::{HashState, PkeyError};

/// An RSA key handle, public or private.
pub struct RsaKey {
    handle: EvpHandle,
}

impl RsaKey {
    /// Wraps a public RSA handle.
    pub(crate) fn from_public(evp: PKey<Public>) -> Result<Self, PkeyError> {
        evp.rsa().map_err(|_| PkeyError::KeyDecode)?;
        Ok(Self {
            handle: EvpHandle::Public(evp),
        })
    }

    /// Wraps a private RSA handle after checking the key's internal
    /// consistency.
    ///
    /// The backend verifies the modulus/prime/exponent relationships; a
    /// corrupted key fails with [`PkeyError::KeyCheckFailed`] rather than
    /// producing garbage signatures later.
    pub(crate) fn from_private(evp: PKey<Private>) -> Result<Self, PkeyError> {
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

    /// Modulus size in bytes; the length of every signature or ciphertext.
    pub(crate) fn size(&self) -> usize {
        self.handle.size()
    }

    fn check_scheme(scheme: SignatureScheme) -> Result<(), PkeyError> {
        match scheme.sig_alg {
            SignatureAlgorithm::RsaPkcs1 | SignatureAlgorithm::RsaPssRsae => Ok(()),
            SignatureAlgorithm::RsaPssPss | SignatureAlgorithm::Ecdsa => {
                Err(PkeyError::KeyMismatch)
            }
        }
    }

    /// Signs the finalized digest with PKCS#1 v1.5 or PSS padding per the
    /// scheme.
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

    /// Verifies a PKCS#1 v1.5 or PSS signature over the finalized digest.
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

    /// Encrypts `plaintext` with PKCS#1 v1.5 padding, appending the
    /// ciphertext to `ciphertext_out`.
    ///
    /// Encryption is a public-key operation and works with either role; a
    /// private handle contains the public component.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        ciphertext_out: &mut Stuffer,
    ) -> Result<(), PkeyError> {
        match &self.handle {
            EvpHandle::Private(key) => encrypt_with(key, plaintext, ciphertext_out),
            EvpHandle::Public(key) => encrypt_with(key, plaintext, ciphertext_out),
        }
    }

    /// Decrypts a PKCS#1 v1.5 ciphertext into `plaintext_out` without
    /// leaking padding validity.
    ///
    /// The raw RSA operation runs with no backend padding check; the padding
    /// is then validated and stripped in constant time. On bad padding the
    /// caller's pre-filled fallback bytes are left in `plaintext_out` and
    /// the call reports success, so a forged ciphertext is indistinguishable
    /// from a valid one until the recovered secret is actually used.
    pub fn decrypt(&self, ciphertext: &[u8], plaintext_out: &mut [u8]) -> Result<(), PkeyError> {
        let EvpHandle::Private(key) = &self.handle else {
            return Err(PkeyError::KeyMismatch);
        };
        // a raw ciphertext is always exactly one modulus wide
        if ciphertext.len() != self.size() {
            return Err(PkeyError::InvalidArgument);
        }

        let mut ctx = PkeyCtx::new(key).map_err(|_| PkeyError::DecryptFailed)?;
        ctx.decrypt_init().map_err(|_| PkeyError::DecryptFailed)?;
        ctx.set_rsa_padding(Padding::NONE)
            .map_err(|_| PkeyError::DecryptFailed)?;

        let mut raw = Zeroizing::new(vec![0u8; self.size()]);
        let len = ctx
            .decrypt(ciphertext, Some(&mut raw))
            .map_err(|_| PkeyError::DecryptFailed)?;
        if len != raw.len() {
            return Err(PkeyError::DecryptFailed);
        }

        crate::ct::constant_time_pkcs1_unpad(plaintext_out, &raw)
    }
}

fn encrypt_with<T: openssl::pkey::HasPublic>(
    key: &openssl::pkey::PKeyRef<T>,
    plaintext: &[u8],
    ciphertext_out: &mut Stuffer,
) -> Result<(), PkeyError> {
    let mut ctx = PkeyCtx::new(key).map_err(|_| PkeyError::EncryptFailed)?;
    ctx.encrypt_init().map_err(|_| PkeyError::EncryptFailed)?;
    ctx.set_rsa_padding(Padding::PKCS1)
        .map_err(|_| PkeyError::EncryptFailed)?;

    let max_len = ctx
        .encrypt(plaintext, None)
        .map_err(|_| PkeyError::EncryptFailed)?;
    let mut ciphertext = vec![0u8; max_len];
    let len = ctx
        .encrypt(plaintext, Some(&mut ciphertext))
        .map_err(|_| PkeyError::EncryptFailed)?;

    ciphertext_out.write(&ciphertext[..len])?;
    Ok(())
}
