//! # Boot Information Header
//!
//! Fixed-size record at the start of every boot information block. The field
//! order and widths are the Multiboot v1 "boot information format"; the
//! kernel reads the record in place, so neither may change.

use crate::endian::{Endianness, FieldReader};
use crate::flags::InfoFlags;
use alloc::vec::Vec;
use core::mem::offset_of;

/// Size of [`BootInfoHeader`] in bytes, independent of the host architecture.
pub const HEADER_SIZE: usize = 108;

/// Value a Multiboot v1 loader places in `EAX` when jumping to the kernel,
/// alongside the physical address of the boot information block in `EBX`.
pub const BOOTLOADER_MAGIC: u32 = 0x2BAD_B002;

/// The Multiboot v1 boot information header.
///
/// Only [`flags`](Self::flags), [`cmd_line`](Self::cmd_line) and
/// [`boot_loader_name`](Self::boot_loader_name) are ever populated here; all
/// other fields are reserved space for consumers that check the flags first.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct BootInfoHeader {
    /// Which of the optional fields below are valid.
    pub flags: InfoFlags,
    /// Lower memory in KiB. Not populated.
    pub mem_lower: u32,
    /// Upper memory in KiB. Not populated.
    pub mem_upper: u32,
    /// BIOS boot device. Not supported, always zero.
    pub boot_device: u32,
    /// Absolute address of the NUL-terminated command line.
    pub cmd_line: u32,
    pub mods_count: u32,
    pub mods_addr: u32,
    /// a.out / ELF symbol information. Not supported, always zero.
    pub syms: [u32; 4],
    pub mmap_length: u32,
    pub mmap_addr: u32,
    pub drives_length: u32,
    pub drives_addr: u32,
    pub config_table: u32,
    /// Absolute address of the NUL-terminated bootloader name.
    pub boot_loader_name: u32,
    pub apm_table: u32,
    pub vbe_control_info: u32,
    pub vbe_mode_info: u32,
    pub vbe_mode: u16,
    pub vbe_interface_seg: u16,
    pub vbe_interface_off: u16,
    pub vbe_interface_len: u16,
    pub framebuffer_addr: u16,
    pub framebuffer_pitch: u16,
    pub framebuffer_width: u32,
    pub framebuffer_height: u32,
    pub framebuffer_bpp: u8,
    pub framebuffer_type: u8,
    pub color_info: [u8; 6],
}

const _: () = {
    assert!(size_of::<BootInfoHeader>() == HEADER_SIZE);
    assert!(HEADER_SIZE.is_multiple_of(4));
    assert!(offset_of!(BootInfoHeader, cmd_line) == 16);
    assert!(offset_of!(BootInfoHeader, boot_loader_name) == 64);
    assert!(offset_of!(BootInfoHeader, vbe_mode) == 80);
    assert!(offset_of!(BootInfoHeader, color_info) == 102);
};

impl BootInfoHeader {
    /// Byte offset of the [`cmd_line`](Self::cmd_line) field.
    pub const CMD_LINE_OFFSET: usize = offset_of!(Self, cmd_line);

    /// Byte offset of the [`boot_loader_name`](Self::boot_loader_name) field.
    pub const BOOT_LOADER_NAME_OFFSET: usize = offset_of!(Self, boot_loader_name);

    /// Header announcing a command line and a bootloader name at the given
    /// absolute addresses. Everything else is zero.
    #[must_use]
    pub const fn with_strings(cmd_line: u32, boot_loader_name: u32) -> Self {
        Self {
            flags: InfoFlags::strings_only(),
            mem_lower: 0,
            mem_upper: 0,
            boot_device: 0,
            cmd_line,
            mods_count: 0,
            mods_addr: 0,
            syms: [0; 4],
            mmap_length: 0,
            mmap_addr: 0,
            drives_length: 0,
            drives_addr: 0,
            config_table: 0,
            boot_loader_name,
            apm_table: 0,
            vbe_control_info: 0,
            vbe_mode_info: 0,
            vbe_mode: 0,
            vbe_interface_seg: 0,
            vbe_interface_off: 0,
            vbe_interface_len: 0,
            framebuffer_addr: 0,
            framebuffer_pitch: 0,
            framebuffer_width: 0,
            framebuffer_height: 0,
            framebuffer_bpp: 0,
            framebuffer_type: 0,
            color_info: [0; 6],
        }
    }

    /// Appends exactly [`HEADER_SIZE`] bytes to `buf`, field by field.
    ///
    /// Fields are written individually rather than by reinterpreting the
    /// struct so that the output follows `endian`, not the host.
    pub fn write_to(&self, endian: Endianness, buf: &mut Vec<u8>) {
        let start = buf.len();

        endian.put_u32(buf, self.flags.into_bits());
        endian.put_u32(buf, self.mem_lower);
        endian.put_u32(buf, self.mem_upper);
        endian.put_u32(buf, self.boot_device);
        endian.put_u32(buf, self.cmd_line);
        endian.put_u32(buf, self.mods_count);
        endian.put_u32(buf, self.mods_addr);
        for sym in self.syms {
            endian.put_u32(buf, sym);
        }
        endian.put_u32(buf, self.mmap_length);
        endian.put_u32(buf, self.mmap_addr);
        endian.put_u32(buf, self.drives_length);
        endian.put_u32(buf, self.drives_addr);
        endian.put_u32(buf, self.config_table);
        endian.put_u32(buf, self.boot_loader_name);
        endian.put_u32(buf, self.apm_table);
        endian.put_u32(buf, self.vbe_control_info);
        endian.put_u32(buf, self.vbe_mode_info);
        endian.put_u16(buf, self.vbe_mode);
        endian.put_u16(buf, self.vbe_interface_seg);
        endian.put_u16(buf, self.vbe_interface_off);
        endian.put_u16(buf, self.vbe_interface_len);
        endian.put_u16(buf, self.framebuffer_addr);
        endian.put_u16(buf, self.framebuffer_pitch);
        endian.put_u32(buf, self.framebuffer_width);
        endian.put_u32(buf, self.framebuffer_height);
        buf.push(self.framebuffer_bpp);
        buf.push(self.framebuffer_type);
        buf.extend_from_slice(&self.color_info);

        debug_assert_eq!(buf.len() - start, HEADER_SIZE);
    }

    /// Decodes a header from the first [`HEADER_SIZE`] bytes of `bytes`.
    ///
    /// Returns `None` if `bytes` is shorter than a header.
    #[must_use]
    pub fn read_from(bytes: &[u8], endian: Endianness) -> Option<Self> {
        let mut r = FieldReader::new(bytes, endian);
        Some(Self {
            flags: InfoFlags::from_bits(r.u32()?),
            mem_lower: r.u32()?,
            mem_upper: r.u32()?,
            boot_device: r.u32()?,
            cmd_line: r.u32()?,
            mods_count: r.u32()?,
            mods_addr: r.u32()?,
            syms: [r.u32()?, r.u32()?, r.u32()?, r.u32()?],
            mmap_length: r.u32()?,
            mmap_addr: r.u32()?,
            drives_length: r.u32()?,
            drives_addr: r.u32()?,
            config_table: r.u32()?,
            boot_loader_name: r.u32()?,
            apm_table: r.u32()?,
            vbe_control_info: r.u32()?,
            vbe_mode_info: r.u32()?,
            vbe_mode: r.u16()?,
            vbe_interface_seg: r.u16()?,
            vbe_interface_off: r.u16()?,
            vbe_interface_len: r.u16()?,
            framebuffer_addr: r.u16()?,
            framebuffer_pitch: r.u16()?,
            framebuffer_width: r.u32()?,
            framebuffer_height: r.u32()?,
            framebuffer_bpp: r.u8()?,
            framebuffer_type: r.u8()?,
            color_info: r.bytes::<6>()?,
        })
    }
}
