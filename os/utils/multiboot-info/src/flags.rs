use bitfield_struct::bitfield;

/// Multiboot v1 `flags` word of the boot information structure.
///
/// Each bit announces that the corresponding group of fields is valid. A
/// kernel must not read a field whose bit is clear.
#[bitfield(u32, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct InfoFlags {
    /// Bit 0 — `mem_lower` / `mem_upper` are valid.
    pub memory: bool,

    /// Bit 1 — `boot_device` is valid.
    pub boot_device: bool,

    /// Bit 2 — `cmdline` points to a NUL-terminated command line.
    pub cmdline: bool,

    /// Bit 3 — `mods_count` / `mods_addr` are valid.
    pub mods: bool,

    /// Bit 4 — `syms` holds an a.out symbol table.
    pub aout_syms: bool,

    /// Bit 5 — `syms` holds an ELF section header table.
    pub elf_shdr: bool,

    /// Bit 6 — `mmap_length` / `mmap_addr` are valid.
    pub mmap: bool,

    /// Bit 7 — `drives_length` / `drives_addr` are valid.
    pub drive_info: bool,

    /// Bit 8 — `config_table` is valid.
    pub config_table: bool,

    /// Bit 9 — `boot_loader_name` points to a NUL-terminated string.
    pub boot_loader_name: bool,

    /// Bit 10 — `apm_table` is valid.
    pub apm_table: bool,

    /// Bit 11 — VBE fields are valid.
    pub vbe_info: bool,

    /// Bit 12 — framebuffer fields are valid.
    pub framebuffer_info: bool,

    /// Bits 13–31 — Reserved, always zero.
    #[bits(19, access = RO)]
    pub reserved: u32,
}

impl InfoFlags {
    /// Flags for a block carrying only a command line and a bootloader name.
    #[must_use]
    pub const fn strings_only() -> Self {
        Self::new().with_cmdline(true).with_boot_loader_name(true)
    }
}
