//! # Boot Information Encoder
//!
//! Produces the byte image of a boot information block: the fixed
//! [`BootInfoHeader`] followed by the command line and the bootloader name,
//! each NUL-terminated, padded with zeros to a multiple of four bytes.
//!
//! ```text
//! base ─► ┌──────────────────────────┐
//!         │ BootInfoHeader (108 B)   │  cmd_line ─────────┐
//!         │                          │  boot_loader_name ─┼──┐
//! +108 ─► ├──────────────────────────┤ ◄──────────────────┘  │
//!         │ cmdline bytes, 0x00      │                       │
//!         ├──────────────────────────┤ ◄─────────────────────┘
//!         │ bootloader name, 0x00    │
//!         ├──────────────────────────┤
//!         │ 0..=3 zero bytes         │
//!         └──────────────────────────┘ (length % 4 == 0)
//! ```

use crate::endian::Endianness;
use crate::header::{BootInfoHeader, HEADER_SIZE};
use alloc::vec::Vec;
use log::{debug, trace};

/// Errors raised while building a boot information block.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SizeError {
    #[error("out of memory while growing the boot information buffer")]
    OutOfMemory,
    #[error("boot information block does not fit the 32-bit address space")]
    AddressOverflow,
}

/// Encodes boot information blocks for a CPU of a given byte order.
///
/// The encoder carries no per-block state; one value may be shared freely
/// between threads.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Encoder {
    endian: Endianness,
}

impl Encoder {
    #[must_use]
    pub const fn new(endian: Endianness) -> Self {
        Self { endian }
    }

    /// Encoder for a kernel running on a CPU with the host's byte order.
    #[must_use]
    pub const fn native() -> Self {
        Self::new(Endianness::native())
    }

    #[must_use]
    pub const fn endian(&self) -> Endianness {
        self.endian
    }

    /// Builds the boot information block that will reside at `base`.
    ///
    /// The string pointers in the header are absolute: `base` plus the
    /// string's offset within the returned buffer. Embedded NUL bytes are
    /// passed through unchanged; the kernel will see the string up to the
    /// first one.
    ///
    /// # Errors
    /// * [`SizeError::AddressOverflow`] if the block placed at `base` would
    ///   extend past the 4 GiB boundary.
    /// * [`SizeError::OutOfMemory`] if the output buffer cannot be allocated.
    pub fn encode(
        &self,
        base: u32,
        cmdline: &[u8],
        bootloader_name: &[u8],
    ) -> Result<Vec<u8>, SizeError> {
        let layout = Layout::compute(base, cmdline.len(), bootloader_name.len())?;
        debug!(
            "boot info at {base:#010x}: cmdline @ {:#010x}, bootloader name @ {:#010x}, {} bytes ({:?})",
            layout.cmd_line, layout.boot_loader_name, layout.total_len, self.endian
        );

        let mut buf = Vec::new();
        buf.try_reserve_exact(layout.total_len)
            .map_err(|_| SizeError::OutOfMemory)?;

        BootInfoHeader::with_strings(layout.cmd_line, layout.boot_loader_name)
            .write_to(self.endian, &mut buf);

        for s in [cmdline, bootloader_name] {
            trace!("placing {} string bytes at offset {}", s.len(), buf.len());
            buf.extend_from_slice(s);
            buf.push(0);
        }

        let padding = padding_for(buf.len());
        buf.resize(buf.len() + padding, 0);

        debug_assert_eq!(buf.len(), layout.total_len);
        debug_assert!(buf.len().is_multiple_of(4));
        Ok(buf)
    }

    /// Length of the block [`encode`](Self::encode) produces for these
    /// strings. The base address does not influence the length.
    ///
    /// # Errors
    /// [`SizeError::AddressOverflow`] if the block exceeds 4 GiB.
    #[allow(clippy::unused_self)]
    pub fn size(&self, cmdline: &[u8], bootloader_name: &[u8]) -> Result<usize, SizeError> {
        Layout::compute(0, cmdline.len(), bootloader_name.len()).map(|l| l.total_len)
    }
}

/// Encodes a block for a kernel with the host's byte order.
///
/// # Errors
/// See [`Encoder::encode`].
pub fn encode(base: u32, cmdline: &[u8], bootloader_name: &[u8]) -> Result<Vec<u8>, SizeError> {
    Encoder::native().encode(base, cmdline, bootloader_name)
}

/// Length [`encode`] would produce for these strings.
///
/// # Errors
/// See [`Encoder::size`].
pub fn size(cmdline: &[u8], bootloader_name: &[u8]) -> Result<usize, SizeError> {
    Encoder::native().size(cmdline, bootloader_name)
}

/// Zero bytes needed to bring `len` to a multiple of four.
#[inline]
const fn padding_for(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Placement of the strings, computed before anything is written.
struct Layout {
    cmd_line: u32,
    boot_loader_name: u32,
    total_len: usize,
}

impl Layout {
    fn compute(base: u32, cmdline_len: usize, name_len: usize) -> Result<Self, SizeError> {
        use SizeError::AddressOverflow;

        let cmd_off = HEADER_SIZE;
        let name_off = cmd_off
            .checked_add(cmdline_len)
            .and_then(|o| o.checked_add(1))
            .ok_or(AddressOverflow)?;
        let end = name_off
            .checked_add(name_len)
            .and_then(|o| o.checked_add(1))
            .ok_or(AddressOverflow)?;
        let total_len = end
            .checked_add(padding_for(end))
            .ok_or(AddressOverflow)?;

        // The whole block must be addressable through 32-bit pointers.
        let last = u64::try_from(total_len)
            .ok()
            .and_then(|len| u64::from(base).checked_add(len))
            .ok_or(AddressOverflow)?;
        if last > 1 << 32 {
            return Err(AddressOverflow);
        }

        Ok(Self {
            cmd_line: absolute(base, cmd_off)?,
            boot_loader_name: absolute(base, name_off)?,
            total_len,
        })
    }
}

fn absolute(base: u32, offset: usize) -> Result<u32, SizeError> {
    u32::try_from(offset)
        .ok()
        .and_then(|off| base.checked_add(off))
        .ok_or(SizeError::AddressOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32(buf: &[u8], off: usize) -> u32 {
        u32::from_ne_bytes(buf[off..off + 4].try_into().unwrap())
    }

    #[test]
    fn padding_rounds_up_to_four() {
        assert_eq!(padding_for(0), 0);
        assert_eq!(padding_for(1), 3);
        assert_eq!(padding_for(2), 2);
        assert_eq!(padding_for(3), 1);
        assert_eq!(padding_for(4), 0);
        assert_eq!(padding_for(129), 3);
    }

    #[test]
    fn empty_strings() {
        // header + two terminators = 110, padded to 112
        let buf = encode(0, b"", b"").unwrap();
        assert_eq!(buf.len(), 112);
        assert_eq!(read_u32(&buf, BootInfoHeader::CMD_LINE_OFFSET), 108);
        assert_eq!(read_u32(&buf, BootInfoHeader::BOOT_LOADER_NAME_OFFSET), 109);
        assert_eq!(&buf[108..], [0, 0, 0, 0]);
    }

    #[test]
    fn no_padding_when_already_aligned() {
        // 108 + (1 + 1) + (1 + 1) = 112
        let buf = encode(0x1000, b"a", b"b").unwrap();
        assert_eq!(buf.len(), 112);
        assert_eq!(&buf[108..], b"a\0b\0");
    }

    #[test]
    fn pointers_are_absolute() {
        let buf = encode(0x0020_0000, b"quiet", b"grub").unwrap();
        assert_eq!(read_u32(&buf, BootInfoHeader::CMD_LINE_OFFSET), 0x0020_0000 + 108);
        assert_eq!(
            read_u32(&buf, BootInfoHeader::BOOT_LOADER_NAME_OFFSET),
            0x0020_0000 + 108 + 6
        );
    }

    #[test]
    fn size_ignores_base() {
        let enc = Encoder::native();
        let len = enc.size(b"root=/dev/sda1", b"mbinfo").unwrap();
        assert_eq!(len, enc.encode(0, b"root=/dev/sda1", b"mbinfo").unwrap().len());
        assert_eq!(
            len,
            enc.encode(0x7FFF_0000, b"root=/dev/sda1", b"mbinfo").unwrap().len()
        );
    }

    #[test]
    fn block_ending_at_4gib_is_accepted() {
        let base = u32::try_from((1u64 << 32) - 112).unwrap();
        let buf = encode(base, b"", b"").unwrap();
        assert_eq!(buf.len(), 112);
    }

    #[test]
    fn block_crossing_4gib_is_rejected() {
        let base = u32::try_from((1u64 << 32) - 108).unwrap();
        assert_eq!(encode(base, b"", b""), Err(SizeError::AddressOverflow));
        assert_eq!(encode(u32::MAX, b"x", b"y"), Err(SizeError::AddressOverflow));
    }

    #[test]
    fn embedded_nul_is_passed_through() {
        let buf = encode(0, b"a\0b", b"c").unwrap();
        assert_eq!(&buf[108..114], b"a\0b\0c\0");
        assert_eq!(read_u32(&buf, BootInfoHeader::BOOT_LOADER_NAME_OFFSET), 112);
    }
}
