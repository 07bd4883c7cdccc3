use crate::endian::Endianness;
use crate::header::{BootInfoHeader, HEADER_SIZE};

/// Read-only view over an encoded boot information block.
///
/// Pointers in the header are absolute, so the view needs the `base` address
/// the block was encoded for to resolve them back into the slice.
pub struct BootInfoView<'a> {
    bytes: &'a [u8],
    base: u32,
    header: BootInfoHeader,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ViewError {
    #[error("buffer is shorter than the boot information header")]
    TooShort,
    #[error("buffer length is not a multiple of four")]
    Misaligned,
    #[error("string pointer does not resolve into the string area of the block")]
    PointerOutOfBounds,
    #[error("string is not NUL-terminated within the block")]
    Unterminated,
}

impl<'a> BootInfoView<'a> {
    /// Parse and validate a block that was encoded for `base`.
    ///
    /// # Errors
    /// [`ViewError::TooShort`] if no full header is present,
    /// [`ViewError::Misaligned`] if the block is not padded to four bytes.
    pub fn parse(bytes: &'a [u8], base: u32, endian: Endianness) -> Result<Self, ViewError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ViewError::TooShort);
        }
        if !bytes.len().is_multiple_of(4) {
            return Err(ViewError::Misaligned);
        }
        let header = BootInfoHeader::read_from(bytes, endian).ok_or(ViewError::TooShort)?;
        Ok(Self {
            bytes,
            base,
            header,
        })
    }

    #[must_use]
    pub const fn header(&self) -> &BootInfoHeader {
        &self.header
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The command line, without its terminator; `None` if the flag is clear.
    ///
    /// # Errors
    /// See [`ViewError::PointerOutOfBounds`] and [`ViewError::Unterminated`].
    pub fn cmdline(&self) -> Result<Option<&'a [u8]>, ViewError> {
        if !self.header.flags.cmdline() {
            return Ok(None);
        }
        self.c_str_at(self.header.cmd_line).map(Some)
    }

    /// The bootloader name, without its terminator; `None` if the flag is clear.
    ///
    /// # Errors
    /// See [`ViewError::PointerOutOfBounds`] and [`ViewError::Unterminated`].
    pub fn bootloader_name(&self) -> Result<Option<&'a [u8]>, ViewError> {
        if !self.header.flags.boot_loader_name() {
            return Ok(None);
        }
        self.c_str_at(self.header.boot_loader_name).map(Some)
    }

    /// Offset of `addr` within the block, if it points past the header.
    #[must_use]
    pub fn offset_in_block(&self, addr: u32) -> Option<usize> {
        let off = usize::try_from(addr.checked_sub(self.base)?).ok()?;
        (HEADER_SIZE..self.bytes.len()).contains(&off).then_some(off)
    }

    fn c_str_at(&self, addr: u32) -> Result<&'a [u8], ViewError> {
        let start = self.offset_in_block(addr).ok_or(ViewError::PointerOutOfBounds)?;
        let tail = &self.bytes[start..];
        let len = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or(ViewError::Unterminated)?;
        Ok(&tail[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;

    #[test]
    fn strings_resolve_through_base() {
        let enc = Encoder::new(Endianness::Big);
        let buf = enc.encode(0x0009_0000, b"init=/sbin/init", b"mbinfo").unwrap();
        let view = BootInfoView::parse(&buf, 0x0009_0000, Endianness::Big).unwrap();
        assert_eq!(view.cmdline(), Ok(Some(&b"init=/sbin/init"[..])));
        assert_eq!(view.bootloader_name(), Ok(Some(&b"mbinfo"[..])));
    }

    #[test]
    fn wrong_base_is_out_of_bounds() {
        let buf = crate::encode(0x0010_0000, b"a", b"b").unwrap();
        let view = BootInfoView::parse(&buf, 0x0020_0000, Endianness::native()).unwrap();
        assert_eq!(view.cmdline(), Err(ViewError::PointerOutOfBounds));
    }

    #[test]
    fn cleared_flags_hide_strings() {
        let mut buf = crate::encode(0, b"a", b"b").unwrap();
        buf[0..4].fill(0);
        let view = BootInfoView::parse(&buf, 0, Endianness::native()).unwrap();
        assert_eq!(view.cmdline(), Ok(None));
        assert_eq!(view.bootloader_name(), Ok(None));
    }

    #[test]
    fn missing_terminator() {
        let mut buf = crate::encode(0, b"abcd", b"efg").unwrap();
        // 108 + 5 + 4 = 117 -> 120; overwrite every NUL after the header
        for b in &mut buf[HEADER_SIZE..] {
            if *b == 0 {
                *b = b'x';
            }
        }
        let view = BootInfoView::parse(&buf, 0, Endianness::native()).unwrap();
        assert_eq!(view.cmdline(), Err(ViewError::Unterminated));
    }

    #[test]
    fn rejects_short_and_unpadded() {
        assert_eq!(
            BootInfoView::parse(&[0; 104], 0, Endianness::Little).err(),
            Some(ViewError::TooShort)
        );
        assert_eq!(
            BootInfoView::parse(&[0; 110], 0, Endianness::Little).err(),
            Some(ViewError::Misaligned)
        );
    }
}
