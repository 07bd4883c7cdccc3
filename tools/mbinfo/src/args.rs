use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use multiboot_info::Endianness;
use std::path::PathBuf;

/// Builds and inspects Multiboot v1 boot information blocks.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// More log output; repeat for trace level
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a boot information block
    Encode {
        /// Address the block will be placed at (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_address)]
        base: u32,

        #[command(flatten)]
        strings: Strings,

        /// Byte order of the CPU running the kernel
        #[arg(long, value_enum, default_value_t = EndianArg::Native)]
        endian: EndianArg,

        /// Output file; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the length of the block `encode` would produce
    Size {
        #[command(flatten)]
        strings: Strings,
    },

    /// Decode a block and print its fields
    Dump {
        /// File holding the encoded block
        file: PathBuf,

        /// Address the block was encoded for
        #[arg(long, value_parser = parse_address)]
        base: u32,

        #[arg(long, value_enum, default_value_t = EndianArg::Native)]
        endian: EndianArg,
    },
}

#[derive(clap::Args, Debug)]
pub struct Strings {
    /// Kernel command line
    #[arg(long, default_value = "")]
    pub cmdline: String,

    /// Bootloader name announced to the kernel
    #[arg(long, default_value = env!("CARGO_PKG_NAME"))]
    pub bootloader_name: String,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum EndianArg {
    Native,
    Little,
    Big,
}

impl From<EndianArg> for Endianness {
    fn from(value: EndianArg) -> Self {
        match value {
            EndianArg::Native => Self::native(),
            EndianArg::Little => Self::Little,
            EndianArg::Big => Self::Big,
        }
    }
}

impl Args {
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Parses a 32-bit address given in decimal or `0x`-prefixed hexadecimal.
/// Underscores are accepted as digit separators.
///
/// # Errors
/// Returns a message for clap if `s` is not a number or exceeds 32 bits.
pub fn parse_address(s: &str) -> Result<u32, String> {
    let trimmed = s.trim();
    let digits = trimmed.replace('_', "");
    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => digits.parse(),
    };
    parsed.map_err(|e| format!("invalid address `{trimmed}`: {e}"))
}
