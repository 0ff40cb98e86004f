//! Stamps the binary with the git revision it was built from.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Short hash of HEAD in `repo`, if git is available and the tree is a checkout.
fn git_short_sha(repo: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_owned())
}

fn main() {
    let workspace = std::env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .and_then(|dir| dir.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(".."));

    let head = workspace.join(".git").join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }

    let sha = git_short_sha(&workspace).unwrap_or_else(|| String::from("unknown"));
    println!("cargo:rustc-env=FINIA_BUILD_SHA={sha}");
}
