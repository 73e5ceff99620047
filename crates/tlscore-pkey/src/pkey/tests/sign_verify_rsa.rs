//! Sign/verify behavior for plain RSA keys: PKCS#1 v1.5 and rsae-PSS.

use super::*;

const MESSAGE: &[u8] = b"client finished transcript";

fn pkcs1(hash_alg: HashAlgo) -> SignatureScheme {
    SignatureScheme::new(SignatureAlgorithm::RsaPkcs1, hash_alg)
}

fn pss_rsae(hash_alg: HashAlgo) -> SignatureScheme {
    SignatureScheme::new(SignatureAlgorithm::RsaPssRsae, hash_alg)
}

#[test]
fn test_pkcs1_round_trip() {
    let (private, public) = rsa_keypair();
    for hash_alg in [HashAlgo::Sha1, HashAlgo::Sha256, HashAlgo::Sha384] {
        let scheme = pkcs1(hash_alg);
        let mut signature = sign_message(&private, scheme, MESSAGE);

        // PKCS#1 signatures are exactly one modulus wide
        assert_eq!(signature.data_available(), private.size());
        verify_message(&public, scheme, MESSAGE, &mut signature).expect("verify failed");
    }
}

#[test]
fn test_pss_over_rsae_round_trip() {
    let (private, public) = rsa_keypair();
    for hash_alg in [HashAlgo::Sha256, HashAlgo::Sha384, HashAlgo::Sha512] {
        let scheme = pss_rsae(hash_alg);
        let mut signature = sign_message(&private, scheme, MESSAGE);
        verify_message(&public, scheme, MESSAGE, &mut signature).expect("verify failed");
    }
}

/// A PSS signature is salted, so the padding modes are not interchangeable.
#[test]
fn test_padding_modes_do_not_cross_verify() {
    let (private, public) = rsa_keypair();
    let mut signature = sign_message(&private, pss_rsae(HashAlgo::Sha256), MESSAGE);

    assert_eq!(
        verify_message(&public, pkcs1(HashAlgo::Sha256), MESSAGE, &mut signature),
        Err(PkeyError::SignatureInvalid)
    );
}

#[test]
fn test_sign_with_public_key_is_rejected_without_output() {
    let (_, public) = rsa_keypair();
    let mut digest = transcript(HashAlgo::Sha256, MESSAGE);
    let mut signature = Stuffer::growable_alloc(public.size());

    assert_eq!(
        public.sign(pkcs1(HashAlgo::Sha256), &mut digest, &mut signature),
        Err(PkeyError::KeyMismatch)
    );
    assert_eq!(signature.data_available(), 0);
}

#[test]
fn test_verify_with_private_key_is_rejected() {
    let (private, _) = rsa_keypair();
    let mut signature = sign_message(&private, pkcs1(HashAlgo::Sha256), MESSAGE);

    assert_eq!(
        verify_message(&private, pkcs1(HashAlgo::Sha256), MESSAGE, &mut signature),
        Err(PkeyError::KeyMismatch)
    );
}

#[test]
fn test_foreign_scheme_is_rejected_before_signing() {
    let (private, _) = rsa_keypair();
    let mut digest = transcript(HashAlgo::Sha256, MESSAGE);
    let mut signature = Stuffer::growable_alloc(private.size());

    let ecdsa = SignatureScheme::new(SignatureAlgorithm::Ecdsa, HashAlgo::Sha256);
    assert_eq!(
        private.sign(ecdsa, &mut digest, &mut signature),
        Err(PkeyError::KeyMismatch)
    );

    // rsassaPss schemes belong to rsassaPss keys
    let pss_pss = SignatureScheme::new(SignatureAlgorithm::RsaPssPss, HashAlgo::Sha256);
    assert_eq!(
        private.sign(pss_pss, &mut digest, &mut signature),
        Err(PkeyError::KeyMismatch)
    );
}

#[test]
fn test_wrong_key_fails_verification() {
    let (private, _) = rsa_keypair();
    let (_, other_public) = rsa_keypair();
    let scheme = pkcs1(HashAlgo::Sha256);
    let mut signature = sign_message(&private, scheme, MESSAGE);

    assert_eq!(
        verify_message(&other_public, scheme, MESSAGE, &mut signature),
        Err(PkeyError::SignatureInvalid)
    );
}

#[test]
fn test_corrupted_signature_fails_verification() {
    let (private, public) = rsa_keypair();
    let scheme = pkcs1(HashAlgo::Sha256);
    let mut signature = sign_message(&private, scheme, MESSAGE);

    let available = signature.data_available();
    let mut bytes = signature.read(available).expect("read failed");
    bytes[10] ^= 0x40;
    let mut corrupted = Stuffer::growable_alloc(bytes.len());
    corrupted.write(&bytes).expect("write failed");

    assert_eq!(
        verify_message(&public, scheme, MESSAGE, &mut corrupted),
        Err(PkeyError::SignatureInvalid)
    );
}

#[test]
fn test_tampered_message_fails_verification() {
    let (private, public) = rsa_keypair();
    let scheme = pss_rsae(HashAlgo::Sha256);
    let mut signature = sign_message(&private, scheme, MESSAGE);

    assert_eq!(
        verify_message(&public, scheme, b"server finished transcript", &mut signature),
        Err(PkeyError::SignatureInvalid)
    );
}
