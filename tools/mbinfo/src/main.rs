mod args;
mod logger;

use anyhow::{Context, Result};
use args::{Args, Command};
use clap::Parser;
use log::info;
use multiboot_info::{BootInfoView, Encoder, Endianness};
use std::io::Write;
use std::path::Path;
use std::{fs, io};

use crate::logger::StderrLogger;

fn main() {
    let args = Args::parse();
    if let Err(e) = StderrLogger::new(args.log_level()).init() {
        eprintln!("Error: failed to install logger: {e}");
    }

    if let Err(e) = run(args.command) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Encode {
            base,
            strings,
            endian,
            output,
        } => encode(
            base,
            &strings.cmdline,
            &strings.bootloader_name,
            endian.into(),
            output.as_deref(),
        ),
        Command::Size { strings } => {
            let len = Encoder::native()
                .size(strings.cmdline.as_bytes(), strings.bootloader_name.as_bytes())
                .context("failed to compute boot information size")?;
            println!("{len}");
            Ok(())
        }
        Command::Dump { file, base, endian } => dump(&file, base, endian.into()),
    }
}

fn encode(
    base: u32,
    cmdline: &str,
    bootloader_name: &str,
    endian: Endianness,
    output: Option<&Path>,
) -> Result<()> {
    let block = Encoder::new(endian)
        .encode(base, cmdline.as_bytes(), bootloader_name.as_bytes())
        .with_context(|| format!("failed to encode boot information for base {base:#010x}"))?;

    match output {
        Some(path) => {
            fs::write(path, &block)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(
                "wrote {} bytes of boot information to {}",
                block.len(),
                path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&block)
                .and_then(|()| stdout.flush())
                .context("failed to write boot information to stdout")?;
            info!("wrote {} bytes of boot information", block.len());
        }
    }
    Ok(())
}

fn dump(file: &Path, base: u32, endian: Endianness) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let view = BootInfoView::parse(&bytes, base, endian)
        .with_context(|| format!("{} is not a boot information block", file.display()))?;
    let h = view.header();

    println!("length            {}", view.len());
    println!("flags             {:#010x}", h.flags.into_bits());
    println!("cmd_line          {:#010x}", h.cmd_line);
    println!("boot_loader_name  {:#010x}", h.boot_loader_name);
    println!("mem_lower         {}", h.mem_lower);
    println!("mem_upper         {}", h.mem_upper);
    println!("mmap              {:#010x} ({} bytes)", h.mmap_addr, h.mmap_length);

    if let Some(cmdline) = view.cmdline().context("invalid command line")? {
        println!("cmdline           {:?}", String::from_utf8_lossy(cmdline));
    }
    if let Some(name) = view
        .bootloader_name()
        .context("invalid bootloader name")?
    {
        println!("bootloader name   {:?}", String::from_utf8_lossy(name));
    }
    Ok(())
}
