//! The stuffer type: a byte region plus independent read/write cursors.
//!
//! # Cursor model
//!
//! ```text
//!   0 ........ read_cursor ........ write_cursor ........ capacity
//!   |--- consumed ---|--- available to read ---|--- free space ---|
//! ```
//!
//! Writes append at the write cursor and advance it; reads consume from the
//! read cursor forward. The region between the cursors is the data available
//! to read. [`Stuffer::wipe`] zeroizes the written region and resets both
//! cursors without releasing the allocation.

use zeroize::Zeroize;

use crate::StufferError;

/// A growable or fixed byte buffer with independent read and write cursors.
///
/// Created empty via [`Stuffer::new`], or with a capacity via
/// [`Stuffer::alloc`] (fixed) or [`Stuffer::growable_alloc`] (growable).
/// Dropping a stuffer zeroizes its backing storage.
#[derive(Debug, Default)]
pub struct Stuffer {
    /// Backing storage; `data.len()` is the allocated capacity.
    data: Vec<u8>,
    /// Offset of the next byte to read. Always `<= write_cursor`.
    read_cursor: usize,
    /// High-water mark of written bytes. Always `<= data.len()`.
    write_cursor: usize,
    /// Whether writes past capacity reallocate instead of failing.
    growable: bool,
}

impl Stuffer {
    /// Creates an empty, fixed stuffer with zero capacity.
    ///
    /// The result holds no allocation; dropping it is a no-op. Any write
    /// fails with [`StufferError::CapacityExceeded`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fixed stuffer with the given capacity.
    ///
    /// Writes beyond `capacity` fail rather than reallocating.
    pub fn alloc(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity],
            read_cursor: 0,
            write_cursor: 0,
            growable: false,
        }
    }

    /// Creates a growable stuffer with the given initial capacity.
    ///
    /// Writes beyond the current capacity reallocate the backing storage,
    /// preserving existing content and both cursor positions.
    pub fn growable_alloc(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity],
            read_cursor: 0,
            write_cursor: 0,
            growable: true,
        }
    }

    /// Returns the allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns whether this stuffer reallocates on write overflow.
    pub fn is_growable(&self) -> bool {
        self.growable
    }

    /// Returns the number of bytes available to read: the distance between
    /// the read cursor and the written length.
    pub fn data_available(&self) -> usize {
        self.write_cursor - self.read_cursor
    }

    /// Returns the number of bytes that can still be written before the
    /// capacity is reached (ignoring growability).
    pub fn space_remaining(&self) -> usize {
        self.data.len() - self.write_cursor
    }

    /// Ensures `len` more bytes can be written, growing if permitted.
    ///
    /// On failure the stuffer is unchanged.
    fn reserve(&mut self, len: usize) -> Result<(), StufferError> {
        let needed = self
            .write_cursor
            .checked_add(len)
            .ok_or(StufferError::IntegerOverflow)?;
        if needed > self.data.len() {
            if !self.growable {
                return Err(StufferError::CapacityExceeded);
            }
            self.data.resize(needed, 0);
        }
        Ok(())
    }

    /// Appends `bytes` at the write cursor.
    ///
    /// Fails with [`StufferError::CapacityExceeded`] on a fixed stuffer if
    /// the write does not fit; a growable stuffer reallocates instead. On
    /// failure nothing is written and both cursors are unchanged.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), StufferError> {
        self.reserve(bytes.len())?;
        let start = self.write_cursor;
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        self.write_cursor = start + bytes.len();
        Ok(())
    }

    /// Appends a single byte.
    pub fn write_u8(&mut self, value: u8) -> Result<(), StufferError> {
        self.write(&[value])
    }

    /// Appends a big-endian 16-bit integer, as used for TLS wire lengths.
    pub fn write_u16(&mut self, value: u16) -> Result<(), StufferError> {
        self.write(&value.to_be_bytes())
    }

    /// Checks that `len` bytes are available to read.
    fn check_readable(&self, len: usize) -> Result<(), StufferError> {
        if len > self.data_available() {
            return Err(StufferError::BufferUnderflow);
        }
        Ok(())
    }

    /// Reads exactly `dest.len()` bytes into `dest`, advancing the read
    /// cursor.
    ///
    /// Fails with [`StufferError::BufferUnderflow`] if fewer bytes remain,
    /// leaving both cursors unchanged and `dest` untouched.
    pub fn read_into(&mut self, dest: &mut [u8]) -> Result<(), StufferError> {
        self.check_readable(dest.len())?;
        let start = self.read_cursor;
        dest.copy_from_slice(&self.data[start..start + dest.len()]);
        self.read_cursor = start + dest.len();
        Ok(())
    }

    /// Reads `len` bytes into a new vector, advancing the read cursor.
    pub fn read(&mut self, len: usize) -> Result<Vec<u8>, StufferError> {
        let mut out = vec![0u8; len];
        self.read_into(&mut out)?;
        Ok(out)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8, StufferError> {
        let mut buf = [0u8; 1];
        self.read_into(&mut buf)?;
        Ok(buf[0])
    }

    /// Reads a big-endian 16-bit integer.
    pub fn read_u16(&mut self) -> Result<u16, StufferError> {
        let mut buf = [0u8; 2];
        self.read_into(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Borrows exactly `len` unread bytes without copying, advancing the
    /// read cursor.
    ///
    /// This is the zero-copy peek used when handing signature bytes to the
    /// backend. The returned slice is bounds-checked against the written
    /// length; on underflow both cursors are left unchanged.
    pub fn raw_read(&mut self, len: usize) -> Result<&[u8], StufferError> {
        self.check_readable(len)?;
        let start = self.read_cursor;
        self.read_cursor = start + len;
        Ok(&self.data[start..start + len])
    }

    /// Zeroizes the written region and resets both cursors to zero.
    ///
    /// The allocation is retained, so the stuffer can be reused at full
    /// capacity.
    pub fn wipe(&mut self) {
        self.data[..self.write_cursor].zeroize();
        self.read_cursor = 0;
        self.write_cursor = 0;
    }
}

impl Drop for Stuffer {
    /// Zeroizes the backing storage. Stuffers routinely carry private key
    /// and premaster material, so release always scrubs.
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

#[cfg(test)]
mod tests;
