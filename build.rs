//! Build script for box-envoy: picks the memory layout for the Pico target.

use std::{env, fs, path::PathBuf};

const MEMORY_PICO1: &str = "MEMORY {
    BOOT2 : ORIGIN = 0x10000000, LENGTH = 0x100
    FLASH : ORIGIN = 0x10000100, LENGTH = 2048K - 0x100
    RAM   : ORIGIN = 0x20000000, LENGTH = 256K
}
";

const MEMORY_PICO2: &str = "MEMORY {
    FLASH : ORIGIN = 0x10000000, LENGTH = 4096K
    RAM   : ORIGIN = 0x20000000, LENGTH = 512K
    SRAM8 : ORIGIN = 0x20080000, LENGTH = 4K
    SRAM9 : ORIGIN = 0x20081000, LENGTH = 4K
}
";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    let Ok(target) = env::var("TARGET") else {
        return;
    };

    let memory_x = if target.starts_with("thumbv6m") {
        MEMORY_PICO1
    } else if target.starts_with("thumbv8m") || target.starts_with("riscv32imac") {
        MEMORY_PICO2
    } else {
        // Host builds link no firmware.
        return;
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if target.starts_with("thumbv6m") {
        println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    }
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
