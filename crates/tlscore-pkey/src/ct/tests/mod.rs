//! Tests for the constant-time primitives.
//!
//! These lock the functional contract (equality semantics, copy/don't-copy
//! selection, PKCS#1 unpadding); the timing property itself is a code-shape
//! requirement documented in the module.

use super::*;

#[test]
fn test_equals_matches_byte_equality() {
    assert!(constant_time_equals(b"", b""));
    assert!(constant_time_equals(b"a", b"a"));
    assert!(constant_time_equals(b"handshake", b"handshake"));

    assert!(!constant_time_equals(b"handshake", b"handshakE"));
    assert!(!constant_time_equals(b"\x00aaa", b"aaa\x00"));
}

#[test]
fn test_equals_rejects_length_mismatch() {
    assert!(!constant_time_equals(b"", b"x"));
    assert!(!constant_time_equals(b"abc", b"abcd"));
}

/// Differences anywhere in the region are detected, not just at the front.
#[test]
fn test_equals_detects_difference_at_every_position() {
    let reference = [0x5au8; 32];
    for position in 0..reference.len() {
        let mut tweaked = reference;
        tweaked[position] ^= 0x01;
        assert!(!constant_time_equals(&reference, &tweaked));
    }
}

#[test]
fn test_copy_or_dont_copies_when_selector_is_zero() {
    let src = [1u8, 2, 3, 4];
    let mut dest = [0u8; 4];
    constant_time_copy_or_dont(&mut dest, &src, 0);
    assert_eq!(dest, src);
}

#[test]
fn test_copy_or_dont_preserves_dest_when_selector_is_nonzero() {
    let src = [1u8, 2, 3, 4];
    for selector in [1u8, 0x80, 0xff] {
        let mut dest = [9u8; 4];
        constant_time_copy_or_dont(&mut dest, &src, selector);
        assert_eq!(dest, [9; 4]);
    }
}

/// Builds a well-formed PKCS#1 v1.5 encryption block around `payload`.
fn pkcs1_block(total_len: usize, payload: &[u8]) -> Vec<u8> {
    let ps_len = total_len - payload.len() - 3;
    let mut block = vec![0x00, 0x02];
    block.extend(vec![0xaa; ps_len]);
    block.push(0x00);
    block.extend_from_slice(payload);
    block
}

#[test]
fn test_unpad_recovers_payload() {
    let payload = b"premaster secret";
    let block = pkcs1_block(64, payload);

    let mut dest = vec![0u8; payload.len()];
    constant_time_pkcs1_unpad(&mut dest, &block).expect("unpad failed");
    assert_eq!(dest, payload);
}

/// Each corruption of the padding structure leaves the caller's fallback
/// bytes in place while still reporting success.
#[test]
fn test_unpad_bad_padding_keeps_fallback() {
    let payload = b"premaster secret";
    let corruptions: [fn(&mut Vec<u8>); 4] = [
        |b| b[0] = 0x01,          // leading byte must be 0x00
        |b| b[1] = 0x01,          // block type must be 0x02
        |b| b[5] = 0x00,          // PS bytes must be non-zero
        |b| {
            let sep = b.len() - 17;
            b[sep] = 0x7f;        // separator must be 0x00
        },
    ];

    for corrupt in corruptions {
        let mut block = pkcs1_block(64, payload);
        corrupt(&mut block);

        let fallback = [0xc3u8; 16];
        let mut dest = fallback.to_vec();
        constant_time_pkcs1_unpad(&mut dest, &block).expect("unpad must still succeed");
        assert_eq!(dest, fallback, "fallback bytes must survive bad padding");
    }
}

/// The public length preconditions are enforced openly.
#[test]
fn test_unpad_rejects_impossible_lengths() {
    let mut dest = vec![0u8; 8];
    assert_eq!(
        constant_time_pkcs1_unpad(&mut dest, &[0u8; 10]),
        Err(PkeyError::InvalidArgument)
    );
    // payload cannot leave room for the minimum overhead
    let mut dest = vec![0u8; 60];
    assert_eq!(
        constant_time_pkcs1_unpad(&mut dest, &[0u8; 64]),
        Err(PkeyError::InvalidArgument)
    );
}
