//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the machine from a
//! particular memory implementation, and `FlatMemory`, a zero-initialized byte
//! array of fixed size.
//!
//! Unlike real hardware buses, LS-8 memory is strict: every access outside
//! `0..size()` is a fault, never a silent wraparound.

use crate::FaultKind;

/// Canonical LS-8 memory size in bytes.
pub const DEFAULT_MEMORY_SIZE: usize = 256;

/// Byte-addressable storage used by the machine.
///
/// # Examples
///
/// ```
/// use ls8::{FaultKind, FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x42, 7).unwrap();
/// assert_eq!(mem.read(0x42), Ok(7));
///
/// assert_eq!(mem.read(256), Err(FaultKind::OutOfBoundsAccess));
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use ls8::{FaultKind, MemoryBus};
///
/// /// Memory that counts writes, e.g. for a debugger.
/// struct CountingMemory {
///     data: [u8; 256],
///     writes: usize,
/// }
///
/// impl MemoryBus for CountingMemory {
///     fn size(&self) -> usize {
///         self.data.len()
///     }
///
///     fn read(&self, addr: usize) -> Result<u8, FaultKind> {
///         self.data.get(addr).copied().ok_or(FaultKind::OutOfBoundsAccess)
///     }
///
///     fn write(&mut self, addr: usize, value: u8) -> Result<(), FaultKind> {
///         let slot = self.data.get_mut(addr).ok_or(FaultKind::OutOfBoundsAccess)?;
///         *slot = value;
///         self.writes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Number of addressable bytes.
    fn size(&self) -> usize;

    /// Reads the byte at `addr`.
    ///
    /// # Errors
    ///
    /// [`FaultKind::OutOfBoundsAccess`] if `addr >= size()`.
    fn read(&self, addr: usize) -> Result<u8, FaultKind>;

    /// Writes `value` at `addr`.
    ///
    /// # Errors
    ///
    /// [`FaultKind::OutOfBoundsAccess`] if `addr >= size()`; memory is unchanged.
    fn write(&mut self, addr: usize, value: u8) -> Result<(), FaultKind>;
}

/// Flat, zero-initialized memory of fixed size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatMemory {
    data: Box<[u8]>,
}

impl FlatMemory {
    /// Creates 256 bytes of zeroed memory.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_MEMORY_SIZE)
    }

    /// Creates `size` bytes of zeroed memory.
    pub fn with_size(size: usize) -> Self {
        Self {
            data: vec![0; size].into_boxed_slice(),
        }
    }

    /// The whole memory contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn read(&self, addr: usize) -> Result<u8, FaultKind> {
        self.data
            .get(addr)
            .copied()
            .ok_or(FaultKind::OutOfBoundsAccess)
    }

    fn write(&mut self, addr: usize, value: u8) -> Result<(), FaultKind> {
        let slot = self
            .data
            .get_mut(addr)
            .ok_or(FaultKind::OutOfBoundsAccess)?;
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        // Initially all zeros
        assert_eq!(mem.read(0x00), Ok(0x00));
        assert_eq!(mem.read(0xFF), Ok(0x00));

        mem.write(0x12, 0x42).unwrap();
        assert_eq!(mem.read(0x12), Ok(0x42));

        // Neighbours unchanged
        assert_eq!(mem.read(0x11), Ok(0x00));
        assert_eq!(mem.read(0x13), Ok(0x00));
    }

    #[test]
    fn test_flat_memory_bounds() {
        let mut mem = FlatMemory::with_size(16);
        assert_eq!(mem.size(), 16);

        assert!(mem.write(15, 1).is_ok());
        assert_eq!(mem.write(16, 1), Err(FaultKind::OutOfBoundsAccess));
        assert_eq!(mem.read(16), Err(FaultKind::OutOfBoundsAccess));
        assert_eq!(mem.as_slice(), &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }
}
