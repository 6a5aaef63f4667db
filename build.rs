use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const PAYLOAD_DIR_ENV_VAR_NAME: &str = "ZIG_LAUNCHER_PAYLOAD_DIR";

/// Payloads are named like the Go toolchain names its targets (`linux-amd64`, `darwin-arm64`),
/// so archives made for earlier releases can be reused as is
fn go_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn go_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}

/// Archives are extracted in this order, so the target specific one can overlay the common one
fn archive_names() -> Vec<String> {
    let os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let (os, arch) = (go_os(&os), go_arch(&arch));
    vec![
        "zig-common.zip".to_string(),
        format!("zig-{os}-{arch}.zip"),
    ]
}

fn payload_dir() -> PathBuf {
    println!("cargo:rerun-if-env-changed={PAYLOAD_DIR_ENV_VAR_NAME}");
    match env::var_os(PAYLOAD_DIR_ENV_VAR_NAME) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
            Path::new(&manifest_dir).join("payload")
        }
    }
}

fn write_empty_archive(dest: &Path) {
    let file = fs::File::create(dest)
        .unwrap_or_else(|e| panic!("failed to create {}: {e}", dest.display()));
    zip::ZipWriter::new(file)
        .finish()
        .unwrap_or_else(|e| panic!("failed to write empty archive {}: {e}", dest.display()));
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let payload_dir = payload_dir();
    println!("cargo:rerun-if-changed={}", payload_dir.display());

    let mut listing = String::from("&[\n");
    for name in archive_names() {
        let src = payload_dir.join(&name);
        let dest = out_dir.join(&name);
        println!("cargo:rerun-if-changed={}", src.display());

        if src.is_file() {
            fs::copy(&src, &dest).unwrap_or_else(|e| {
                panic!("failed to copy {} to {}: {e}", src.display(), dest.display())
            });
        } else {
            println!(
                "cargo:warning=payload {} not found, embedding an empty archive",
                src.display()
            );
            write_empty_archive(&dest);
        }

        listing.push_str(&format!(
            "    crate::payload::Archive {{ name: {name:?}, bytes: include_bytes!({:?}) }},\n",
            dest.display().to_string()
        ));
    }
    listing.push(']');

    let mut file = fs::File::create(out_dir.join("archives.rs")).expect("create archives.rs");
    file.write_all(listing.as_bytes())
        .expect("write archives.rs");
}
