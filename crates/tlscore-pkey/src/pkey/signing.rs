//! Shared digest sign/verify plumbing over the backend key context.
//!
//! All three key variants funnel through these helpers: a context is created
//! from the backend handle, configured for the scheme's padding and digest,
//! and driven through the size-query-then-fill signing sequence. The variant
//! modules stay responsible for role and scheme validation; by the time a
//! call lands here the pairing is known to be legal for the key.

use openssl::error::ErrorStack;
use openssl::pkey::{HasPrivate, HasPublic, PKeyRef};
use openssl::pkey_ctx::PkeyCtx;
use openssl::rsa::Padding;
use openssl::sign::RsaPssSaltlen;
use tlscore_stuffer::Stuffer;

use crate::pkey::{SignatureAlgorithm, SignatureScheme};
use crate::PkeyError;

/// Applies the scheme's padding and digest configuration to a fresh context.
///
/// PSS is pinned to MGF1 with the scheme's own digest and a salt length equal
/// to the digest length, the parameters TLS 1.3 mandates. ECDSA needs no
/// context configuration; the curve and digest travel with the key and the
/// digest bytes respectively.
fn configure_ctx<T>(ctx: &mut PkeyCtx<T>, scheme: SignatureScheme) -> Result<(), ErrorStack> {
    match scheme.sig_alg {
        SignatureAlgorithm::RsaPkcs1 => {
            ctx.set_rsa_padding(Padding::PKCS1)?;
            ctx.set_signature_md(scheme.hash_alg.md())?;
        }
        SignatureAlgorithm::RsaPssRsae | SignatureAlgorithm::RsaPssPss => {
            ctx.set_rsa_padding(Padding::PKCS1_PSS)?;
            ctx.set_signature_md(scheme.hash_alg.md())?;
            ctx.set_rsa_pss_saltlen(RsaPssSaltlen::DIGEST_LENGTH)?;
            ctx.set_rsa_mgf1_md(scheme.hash_alg.md())?;
        }
        SignatureAlgorithm::Ecdsa => {}
    }
    Ok(())
}

/// Signs `digest` under `scheme` with a private handle, appending the
/// signature to `signature_out`.
///
/// The backend is queried for the maximum signature length first; the actual
/// signature may be shorter (ECDSA is DER-variable) and only the produced
/// bytes are appended.
pub(crate) fn sign_digest<T: HasPrivate>(
    key: &PKeyRef<T>,
    scheme: SignatureScheme,
    digest: &[u8],
    signature_out: &mut Stuffer,
) -> Result<(), PkeyError> {
    let mut ctx = PkeyCtx::new(key).map_err(|_| PkeyError::SignFailed)?;
    ctx.sign_init().map_err(|_| PkeyError::SignFailed)?;
    configure_ctx(&mut ctx, scheme).map_err(|_| PkeyError::SignFailed)?;

    let max_len = ctx.sign(digest, None).map_err(|_| PkeyError::SignFailed)?;
    let mut signature = vec![0u8; max_len];
    let len = ctx
        .sign(digest, Some(&mut signature))
        .map_err(|_| PkeyError::SignFailed)?;

    signature_out.write(&signature[..len])?;
    Ok(())
}

/// Verifies `signature` over `digest` under `scheme` with a public handle.
///
/// The backend reports forgery either as a `false` result or as an error
/// stack depending on where the parse fails; both collapse to
/// [`PkeyError::SignatureInvalid`].
pub(crate) fn verify_digest<T: HasPublic>(
    key: &PKeyRef<T>,
    scheme: SignatureScheme,
    digest: &[u8],
    signature: &[u8],
) -> Result<(), PkeyError> {
    let mut ctx = PkeyCtx::new(key).map_err(|_| PkeyError::SignatureInvalid)?;
    ctx.verify_init().map_err(|_| PkeyError::SignatureInvalid)?;
    configure_ctx(&mut ctx, scheme).map_err(|_| PkeyError::SignatureInvalid)?;

    match ctx.verify(digest, signature) {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(PkeyError::SignatureInvalid),
    }
}
