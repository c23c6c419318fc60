use std::process::Command;

fn main() {
    let commit = git_commit().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=CASECMP_COMMIT={commit}");

    let rustc = rustc_version().unwrap_or_else(|| "rustc".to_string());
    println!("cargo:rustc-env=CASECMP_RUSTC_VERSION={rustc}");

    set_build_dependencies();
}

/// Short commit hash, preferring an explicit `CASECMP_COMMIT` from the environment
/// (release builds from a source tarball have no `.git`).
fn git_commit() -> Option<String> {
    if let Ok(commit) = std::env::var("CASECMP_COMMIT") {
        if !commit.trim().is_empty() {
            return Some(commit.trim().to_string());
        }
    }

    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let commit = String::from_utf8(output.stdout).ok()?;
    let commit = commit.trim();
    (!commit.is_empty()).then(|| commit.to_string())
}

fn rustc_version() -> Option<String> {
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let output = Command::new(rustc).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }

    // "rustc 1.85.0 (4d91de4e4 2025-02-17)" -> "rustc 1.85.0"
    let version = String::from_utf8(output.stdout).ok()?;
    let mut parts = version.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(name), Some(number)) => Some(format!("{name} {number}")),
        _ => None,
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the checked-out commit changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=CASECMP_COMMIT");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
