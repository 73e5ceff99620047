//! Known-answer and lifecycle tests for the hash state wrapper.

use super::*;

/// Decodes an even-length lowercase hex string.
fn hex(s: &str) -> Vec<u8> {
    s.as_bytes()
        .chunks(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16).expect("bad hex digit");
            let lo = (pair[1] as char).to_digit(16).expect("bad hex digit");
            ((hi << 4) | lo) as u8
        })
        .collect()
}

fn digest_of(algo: HashAlgo, data: &[u8]) -> Vec<u8> {
    let mut state = HashState::new(algo).expect("hash init failed");
    state.update(data).expect("hash update failed");
    state.digest().expect("hash finish failed")
}

/// FIPS 180 known-answer vectors for the one-block message "abc".
#[test]
fn test_known_answers_for_abc() {
    assert_eq!(
        digest_of(HashAlgo::Sha1, b"abc"),
        hex("a9993e364706816aba3e25717850c26c9cd0d89d")
    );
    assert_eq!(
        digest_of(HashAlgo::Sha256, b"abc"),
        hex("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
    assert_eq!(
        digest_of(HashAlgo::Sha384, b"abc"),
        hex("cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7")
    );
    assert_eq!(
        digest_of(HashAlgo::Sha512, b"abc"),
        hex("ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f")
    );
}

#[test]
fn test_digest_sizes_match_algo() {
    for algo in [
        HashAlgo::Sha1,
        HashAlgo::Sha256,
        HashAlgo::Sha384,
        HashAlgo::Sha512,
    ] {
        assert_eq!(digest_of(algo, b"x").len(), algo.size());
    }
}

/// Split updates produce the same digest as a single update.
#[test]
fn test_incremental_update_equivalence() {
    let mut split = HashState::new(HashAlgo::Sha256).expect("hash init failed");
    split.update(b"hello, ").expect("update failed");
    split.update(b"world").expect("update failed");

    assert_eq!(
        split.digest().expect("finish failed"),
        digest_of(HashAlgo::Sha256, b"hello, world")
    );
}

/// Finalizing resets the state for reuse; reset discards absorbed data.
#[test]
fn test_reuse_and_reset() {
    let mut state = HashState::new(HashAlgo::Sha256).expect("hash init failed");
    state.update(b"first").expect("update failed");
    let first = state.digest().expect("finish failed");

    state.update(b"first").expect("update failed");
    assert_eq!(state.digest().expect("finish failed"), first);

    state.update(b"discarded").expect("update failed");
    state.reset().expect("reset failed");
    state.update(b"first").expect("update failed");
    assert_eq!(state.digest().expect("finish failed"), first);
}
