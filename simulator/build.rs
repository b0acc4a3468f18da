//! Build script for cluster-simulator
//!
//! On Windows, points the linker at an SDL2 development package and copies
//! `SDL2.dll` next to the built binary. The package is taken from `SDL2_DIR`
//! or, failing that, from `vendor/sdl2` at the workspace root. Other
//! platforms use the system SDL2.

use std::path::{Path, PathBuf};
use std::{env, fs};

fn main() {
    println!("cargo:rerun-if-env-changed=SDL2_DIR");

    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let sdl2_dir = match env::var_os("SDL2_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
            manifest_dir.join("..").join("vendor").join("sdl2")
        }
    };
    println!("cargo:rerun-if-changed={}", sdl2_dir.display());

    if !sdl2_dir.exists() {
        println!("cargo:warning=SDL2 not found at {}", sdl2_dir.display());
        println!("cargo:warning=Set SDL2_DIR to a folder containing SDL2.lib and SDL2.dll");
        return;
    }

    println!("cargo:rustc-link-search=native={}", sdl2_dir.display());
    copy_dll(&sdl2_dir);
}

/// Copy `SDL2.dll` into the profile directory (`target/debug` or `target/release`).
fn copy_dll(sdl2_dir: &Path) {
    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };
    let out_path = PathBuf::from(out_dir);
    let Some(profile_dir) = out_path
        .ancestors()
        .find(|p| p.file_name().is_some_and(|n| n == "release" || n == "debug"))
    else {
        return;
    };

    let src = sdl2_dir.join("SDL2.dll");
    let dst = profile_dir.join("SDL2.dll");
    if src.exists() && !dst.exists() {
        if let Err(e) = fs::copy(&src, &dst) {
            println!("cargo:warning=Failed to copy SDL2.dll: {e}");
        }
    }
}
