//! Stamps the startup banner with the commit, build time and cargo profile.
//!
//! Builds outside a git checkout (release tarballs, container images) can
//! pass the commit in `BOXOFFICE_GIT_HASH`.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=BOXOFFICE_GIT_HASH");
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=build.rs");

    let commit = env::var("BOXOFFICE_GIT_HASH")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .or_else(short_commit)
        .unwrap_or_else(|| "unknown".to_string());
    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    for (key, value) in [
        ("GIT_HASH", commit),
        ("BUILD_TIMESTAMP", built_at),
        ("BUILD_PROFILE", profile),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }
}

fn short_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}
