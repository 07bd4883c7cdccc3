use std::path::PathBuf;
use std::process::{Command, Output};

fn mbinfo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mbinfo"))
        .args(args)
        .output()
        .expect("failed to run mbinfo")
}

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mbinfo-{}-{name}", std::process::id()))
}

#[test]
fn size_prints_block_length() {
    let out = mbinfo(&[
        "size",
        "--cmdline",
        "console=ttyS0",
        "--bootloader-name",
        "u-boot",
    ]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "132");
}

#[test]
fn encode_to_stdout_matches_library() {
    let out = mbinfo(&[
        "-q",
        "encode",
        "--base",
        "0x100000",
        "--cmdline",
        "console=ttyS0",
        "--bootloader-name",
        "u-boot",
    ]);
    assert!(out.status.success());

    let expected = multiboot_info::encode(0x0010_0000, b"console=ttyS0", b"u-boot").unwrap();
    assert_eq!(out.stdout, expected);
}

#[test]
fn encode_then_dump() {
    let path = scratch_file("big.info");
    let path_str = path.to_str().unwrap();

    let out = mbinfo(&[
        "encode",
        "--base",
        "0x200000",
        "--cmdline",
        "root=/dev/sda1",
        "--bootloader-name",
        "mbinfo",
        "--endian",
        "big",
        "-o",
        path_str,
    ]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("[INFO]"));

    let out = mbinfo(&["dump", path_str, "--base", "0x200000", "--endian", "big"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("cmd_line          0x0020006c"));
    assert!(stdout.contains("\"root=/dev/sda1\""));
    assert!(stdout.contains("\"mbinfo\""));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn dump_with_wrong_base_fails() {
    let path = scratch_file("wrong-base.info");
    let block = multiboot_info::encode(0x0010_0000, b"quiet", b"mbinfo").unwrap();
    std::fs::write(&path, block).unwrap();

    let out = mbinfo(&["dump", path.to_str().unwrap(), "--base", "0"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid command line"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn encode_rejects_block_past_4gib() {
    let out = mbinfo(&["encode", "--base", "0xFFFFFFF0", "--cmdline", "x"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("32-bit address space"));
}
