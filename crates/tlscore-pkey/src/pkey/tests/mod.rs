//! Shared fixtures for the key-object tests.
//!
//! Key material is generated fresh through the backend rather than checked
//! in, so the suites exercise the same decode paths production traffic uses.

use openssl::ec::{EcGroup, EcKey};
use openssl::pkey::{Id, PKey};
use openssl::pkey_ctx::PkeyCtx;
use openssl::rsa::Rsa;
use tlscore_stuffer::Stuffer;

use super::*;
use crate::{HashAlgo, HashState, PkeyError};

mod sign_verify_rsa;

const RSA_TEST_BITS: u32 = 2048;

/// Generates an RSA key pair and decodes both roles.
fn rsa_keypair() -> (Pkey, Pkey) {
    let rsa = Rsa::generate(RSA_TEST_BITS).expect("RSA keygen failed");
    let evp = PKey::from_rsa(rsa).expect("EVP wrap failed");
    let public_der = evp.public_key_to_der().expect("public DER export failed");

    let private = Pkey::decode_private(evp).expect("private decode failed");
    let public = Pkey::public_from_der(&public_der).expect("public decode failed");
    (private, public)
}

/// Generates an rsassaPss key pair (backend-default modulus size) and
/// decodes both roles.
///
/// Callers gate on [`rsa_pss_supported`] first.
fn rsa_pss_keypair() -> (Pkey, Pkey) {
    let mut ctx = PkeyCtx::<()>::new_id(Id::RSA_PSS).expect("PSS keygen ctx failed");
    ctx.keygen_init().expect("PSS keygen init failed");
    let evp = ctx.keygen().expect("PSS keygen failed");
    let public_der = evp.public_key_to_der().expect("public DER export failed");

    let private = Pkey::decode_private(evp).expect("private decode failed");
    let public = Pkey::public_from_der(&public_der).expect("public decode failed");
    (private, public)
}

/// Generates an ECDSA key pair on `curve` and decodes both roles.
fn ecdsa_keypair(curve: Curve) -> (Pkey, Pkey) {
    let group = EcGroup::from_curve_name(curve.nid()).expect("EC group failed");
    let ec = EcKey::generate(&group).expect("EC keygen failed");
    let evp = PKey::from_ec_key(ec).expect("EVP wrap failed");
    let public_der = evp.public_key_to_der().expect("public DER export failed");

    let private = Pkey::decode_private(evp).expect("private decode failed");
    let public = Pkey::public_from_der(&public_der).expect("public decode failed");
    (private, public)
}

/// Builds a hash state holding `message`.
fn transcript(hash_alg: HashAlgo, message: &[u8]) -> HashState {
    let mut state = HashState::new(hash_alg).expect("hash init failed");
    state.update(message).expect("hash update failed");
    state
}

/// Signs `message` under `scheme`, returning the stuffer holding the
/// signature.
fn sign_message(key: &Pkey, scheme: SignatureScheme, message: &[u8]) -> Stuffer {
    let mut digest = transcript(scheme.hash_alg, message);
    let mut signature = Stuffer::growable_alloc(key.size());
    key.sign(scheme, &mut digest, &mut signature)
        .expect("signing failed");
    signature
}

/// Verifies the signature bytes in `signature` over `message`.
fn verify_message(
    key: &Pkey,
    scheme: SignatureScheme,
    message: &[u8],
    signature: &mut Stuffer,
) -> Result<(), PkeyError> {
    let mut digest = transcript(scheme.hash_alg, message);
    key.verify(scheme, &mut digest, signature)
}
