use std::{env, process::Command};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".into());
    let status = match git(&["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean",
        Some(_) => "dirty",
        None => "unknown",
    };
    println!("cargo:rustc-env=GOFINANCES_BUILD_HASH={hash}");
    println!("cargo:rustc-env=GOFINANCES_BUILD_STATUS={status}");

    for var in ["TARGET", "PROFILE"] {
        let value = env::var(var).unwrap_or_else(|_| "unknown".into());
        println!("cargo:rustc-env=GOFINANCES_BUILD_{var}={value}");
    }
}

/// Trimmed stdout of a successful git invocation.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
