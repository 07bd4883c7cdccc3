//! # Multiboot v1 Boot Information
//!
//! This crate builds the Multiboot v1 *boot information* block: the structure a
//! Multiboot loader leaves in memory for the kernel it starts, and whose
//! physical address it hands over in `EBX` (with [`BOOTLOADER_MAGIC`] in `EAX`).
//!
//! ## Overview
//!
//! The kernel reads the block in place, right after it gains control and long
//! before it could parse anything more elaborate. The block therefore has to be
//! byte-exact on the first attempt:
//!
//! * a fixed 108-byte [`BootInfoHeader`],
//! * the command line, NUL-terminated,
//! * the bootloader name, NUL-terminated,
//! * zero padding up to the next multiple of four bytes.
//!
//! The header stores the *absolute* addresses of both strings, so the address
//! the block will eventually live at (`base`) must be known before encoding.
//!
//! ## Layout
//!
//! | Offset | Contents |
//! |--------|----------|
//! | `0` | [`BootInfoHeader`] ([`HEADER_SIZE`] bytes) |
//! | `108` | command line, `0x00` |
//! | `108 + len(cmdline) + 1` | bootloader name, `0x00` |
//! | … | `0..=3` bytes of zero padding |
//!
//! Of the header's capability [`InfoFlags`], only `cmdline` and
//! `boot_loader_name` are ever set. Memory bounds, memory map, modules,
//! symbols, drives, APM and VBE/framebuffer fields are left zero for other
//! components to provide.
//!
//! ## Byte Order
//!
//! Fields are stored in the byte order of the CPU executing the kernel, which
//! is an explicit [`Endianness`] parameter of the [`Encoder`]. The free
//! functions [`encode`] and [`size`] use the host's order.
//!
//! ## Usage
//!
//! ```rust
//! use multiboot_info::{BootInfoView, Encoder, Endianness, HEADER_SIZE};
//!
//! let encoder = Encoder::new(Endianness::Little);
//! let block = encoder.encode(0x10_0000, b"console=ttyS0", b"u-boot")?;
//!
//! assert_eq!(block.len() % 4, 0);
//! assert_eq!(block.len(), encoder.size(b"console=ttyS0", b"u-boot")?);
//!
//! let view = BootInfoView::parse(&block, 0x10_0000, Endianness::Little).unwrap();
//! assert_eq!(view.header().cmd_line, 0x10_0000 + HEADER_SIZE as u32);
//! assert_eq!(view.cmdline().unwrap(), Some(&b"console=ttyS0"[..]));
//! # Ok::<(), multiboot_info::SizeError>(())
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

mod encoder;
mod endian;
mod flags;
mod header;
mod view;

pub use encoder::{Encoder, SizeError, encode, size};
pub use endian::Endianness;
pub use flags::InfoFlags;
pub use header::{BOOTLOADER_MAGIC, BootInfoHeader, HEADER_SIZE};
pub use view::{BootInfoView, ViewError};
