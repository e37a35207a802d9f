//! Build script for msp430-demos-hal-msp430
//!
//! Puts the selected chip's `device.x` (interrupt handler defaults) on the
//! linker search path, where msp430-rt's `link.x` picks it up.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let chips: Vec<&str> = [("msp430f41x", "f41x"), ("msp430f5438a", "f5438a")]
        .iter()
        .filter(|(feature, _)| {
            env::var_os(format!("CARGO_FEATURE_{}", feature.to_uppercase())).is_some()
        })
        .map(|(_, chip)| *chip)
        .collect();

    let chip = match chips.as_slice() {
        [chip] => *chip,
        [] => {
            // Host builds (docs, workspace checks) have no vector table
            println!("cargo:rerun-if-changed=build.rs");
            return;
        }
        _ => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: more than one chip feature enabled                       ║\n\
            ║                                                                  ║\n\
            ║  Enable exactly one of `msp430f41x` or `msp430f5438a`.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        ),
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let source = PathBuf::from("device").join(format!("{}.x", chip));
    fs::copy(&source, out_dir.join("device.x")).expect("device.x is readable");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={}", source.display());
    println!("cargo:rerun-if-changed=build.rs");
}
