//! Injects the build version (`<pkg version>+<YYYY.MM.DD>.<sha>`) from git and the build date.

use std::process::Command;

fn run(cmd: &str, args: &[&str]) -> Option<String> {
    Command::new(cmd).args(args).output().ok().and_then(|o| {
        if o.status.success() {
            String::from_utf8(o.stdout).ok().map(|s| s.trim().to_string())
        } else {
            None
        }
    })
}

fn main() {
    let pkg = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let short_sha = run("git", &["rev-parse", "--short=7", "HEAD"]);
    let date = std::env::var("BUILD_DATE")
        .ok()
        .or_else(|| run("date", &["-u", "+%Y%m%d"]));

    let build_version = match (short_sha, date) {
        (Some(sha), Some(d)) if d.len() == 8 => {
            format!("{}+{}.{}.{}.{}", pkg, &d[0..4], &d[4..6], &d[6..8], sha)
        }
        (Some(sha), _) => format!("{}+{}", pkg, sha),
        _ => format!("{}-dev", pkg),
    };

    println!("cargo:rustc-env=REFURB_BUILD_VERSION={}", build_version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=BUILD_DATE");
}
