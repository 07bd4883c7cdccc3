//! # Target Byte Order
//!
//! The kernel reads the boot information block directly as memory, so every
//! multi-byte field must be stored in the byte order of the CPU that will run
//! the kernel. This is usually, but not necessarily, the order of the host
//! producing the block.

use alloc::vec::Vec;

/// Byte order of the CPU consuming the boot information block.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Endianness {
    /// Least significant byte first (x86, most RISC-V and ARM targets).
    Little,
    /// Most significant byte first.
    Big,
}

impl Endianness {
    /// The byte order of the machine this code is compiled for.
    #[inline]
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }

    #[inline]
    pub(crate) fn put_u16(self, buf: &mut Vec<u8>, value: u16) {
        let bytes = match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        };
        buf.extend_from_slice(&bytes);
    }

    #[inline]
    pub(crate) fn put_u32(self, buf: &mut Vec<u8>, value: u32) {
        let bytes = match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        };
        buf.extend_from_slice(&bytes);
    }

    #[inline]
    const fn u16_from(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big => u16::from_be_bytes(bytes),
        }
    }

    #[inline]
    const fn u32_from(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }
}

impl Default for Endianness {
    fn default() -> Self {
        Self::native()
    }
}

/// Sequential field reader over a byte slice.
///
/// Every read advances the cursor; a read past the end yields `None` and
/// leaves the cursor untouched.
pub(crate) struct FieldReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    endian: Endianness,
}

impl<'a> FieldReader<'a> {
    pub(crate) const fn new(bytes: &'a [u8], endian: Endianness) -> Self {
        Self {
            bytes,
            pos: 0,
            endian,
        }
    }

    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let chunk = self.bytes.get(self.pos..end)?;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        self.pos = end;
        Some(out)
    }

    pub(crate) fn u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    pub(crate) fn u16(&mut self) -> Option<u16> {
        let endian = self.endian;
        self.take::<2>().map(|b| endian.u16_from(b))
    }

    pub(crate) fn u32(&mut self) -> Option<u32> {
        let endian = self.endian;
        self.take::<4>().map(|b| endian.u32_from(b))
    }

    pub(crate) fn bytes<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.take::<N>()
    }
}
