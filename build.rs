use std::process::{Command, Output};

fn git(args: &[&str]) -> Option<Output> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
}

fn main() {
    for path in [".git/HEAD", ".git/refs/heads/", ".git/refs/tags/"] {
        println!("cargo:rerun-if-changed={path}");
    }

    let commit = git(&["rev-parse", "--short", "HEAD"])
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |hash| hash.trim().to_string());

    // Uncommitted changes mark the stamp as dirty
    let dirty = git(&["status", "--porcelain"]).is_some_and(|output| !output.stdout.is_empty());
    let stamp = if dirty { format!("{commit}-dirty") } else { commit };

    let tagged = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();

    println!("cargo:rustc-env=NATTER_GIT_HASH={stamp}");
    println!("cargo:rustc-env=NATTER_IS_RELEASE={tagged}");
}
