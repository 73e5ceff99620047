//! Constant-time comparison and conditional-copy primitives.
//!
//! These are the leaf utilities used wherever secret material is compared or
//! conditionally copied: RSA premaster-secret unpadding, digest comparisons,
//! and any other place where an early exit would let an attacker measure how
//! far a comparison got.
//!
//! # Correctness requirement, not an optimization target
//!
//! Every function in this module scans its full input length and accumulates
//! differences with OR/XOR arithmetic instead of returning early. That shape
//! is load-bearing: the execution time and memory-access pattern must not
//! depend on *where* two buffers first differ or on the value of a secret
//! selector. Do not "simplify" these loops into short-circuiting comparisons.
//! Lengths are treated as public inputs throughout.

use crate::PkeyError;

/// Compares two byte regions in time independent of where they differ.
///
/// Returns `true` iff `a` and `b` have the same length and identical
/// contents. The comparison XORs every byte pair and ORs the differences
/// into an accumulator; there is no early exit. A length mismatch returns
/// `false` without touching the contents (lengths are public).
///
/// The empty-input case compares equal.
pub fn constant_time_equals(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut delta = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        delta |= x ^ y;
    }
    delta == 0
}

/// Expands a byte to an all-ones mask when it is zero, all-zeroes otherwise,
/// without branching.
fn is_zero_mask(value: u8) -> u8 {
    (u16::from(value).wrapping_sub(1) >> 8) as u8
}

/// Copies `src` into `dest` only when `dont == 0`, touching every byte of
/// both regions either way.
///
/// The selector is expanded to a full byte mask and applied per byte, so the
/// memory-access pattern and timing are identical whether or not the copy
/// happens. `dest` and `src` must have equal length; the shorter length is
/// used if they differ (callers pass equal-length regions).
pub fn constant_time_copy_or_dont(dest: &mut [u8], src: &[u8], dont: u8) {
    let mask = is_zero_mask(dont);
    for (d, s) in dest.iter_mut().zip(src.iter()) {
        *d = (*s & mask) | (*d & !mask);
    }
}

/// Validates and strips RSAES-PKCS1-v1_5 padding without leaking where (or
/// whether) validation failed.
///
/// `src` is a full raw RSA decryption output: `00 || 02 || PS || 00 || M`,
/// where `PS` is at least eight non-zero padding bytes and `M` is exactly
/// `dest.len()` bytes. Every structural check accumulates into a "don't
/// copy" mask instead of branching; the payload is then copied into `dest`
/// via [`constant_time_copy_or_dont`]. On bad padding `dest` is left exactly
/// as the caller filled it (conventionally with random bytes) and the call
/// still returns `Ok`, so padding validity is not observable through either
/// timing or the result: the Bleichenbacher countermeasure inherited from
/// the wire protocol this layer serves.
///
/// Only the length preconditions are checked openly, since both lengths are
/// public inputs.
pub fn constant_time_pkcs1_unpad(dest: &mut [u8], src: &[u8]) -> Result<(), PkeyError> {
    // 00 + 02 + eight bytes of PS + 00 separator
    const MIN_OVERHEAD: usize = 11;
    if src.len() < MIN_OVERHEAD || dest.len() > src.len() - MIN_OVERHEAD {
        return Err(PkeyError::InvalidArgument);
    }

    let payload_start = src.len() - dest.len();
    let mut dont_copy = 0u8;

    dont_copy |= src[0];
    dont_copy |= src[1] ^ 0x02;
    // every PS byte must be non-zero
    for &byte in &src[2..payload_start - 1] {
        dont_copy |= is_zero_mask(byte);
    }
    // separator between PS and the payload
    dont_copy |= src[payload_start - 1];

    constant_time_copy_or_dont(dest, &src[payload_start..], dont_copy);
    Ok(())
}

#[cfg(test)]
mod tests;
