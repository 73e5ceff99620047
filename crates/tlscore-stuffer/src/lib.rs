//! Bounds-checked wire buffers for TLS handshake material.
//!
//! This crate provides the [`Stuffer`], an owned byte region with independent
//! read and write cursors. All key, certificate, and signature material in the
//! surrounding handshake code flows through stuffers, both when parsing
//! encoded (DER/PEM) input and when carrying signature bytes on the wire.
//!
//! # Invariants
//!
//! A stuffer maintains `read cursor <= write cursor <= capacity` at every
//! public API boundary. Any operation that would violate the invariant fails
//! with a typed error and leaves the stuffer unchanged; there are no partial
//! reads or writes.
//!
//! # Growth
//!
//! A stuffer is either fixed or growable, decided at allocation time. Writes
//! past the capacity of a fixed stuffer fail with
//! [`StufferError::CapacityExceeded`]; a growable stuffer reallocates,
//! preserving its contents and both cursor positions.
//!
//! # Hardening
//!
//! Buffer-size arithmetic is a classical vulnerability class in wire-format
//! parsers, so every internal cursor computation uses checked arithmetic and
//! reports [`StufferError::IntegerOverflow`] rather than wrapping. The backing
//! storage is zeroized on [`Stuffer::wipe`] and on drop, since stuffers
//! routinely hold private key material.

use thiserror::Error;

mod stuffer;

pub use stuffer::Stuffer;

/// Errors reported by stuffer operations.
///
/// Every stuffer operation either fully succeeds or fails with one of these
/// variants and no side effect on the buffer or its cursors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StufferError {
    /// A write would exceed the capacity of a fixed (non-growable) stuffer.
    #[error("stuffer capacity exceeded")]
    CapacityExceeded,

    /// A read requested more bytes than remain between the read cursor and
    /// the written length.
    #[error("stuffer out of data")]
    BufferUnderflow,

    /// Internal cursor arithmetic would overflow.
    #[error("stuffer size arithmetic overflow")]
    IntegerOverflow,
}
