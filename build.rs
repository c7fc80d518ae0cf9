use std::process::Command;

fn main() {
    // Short git sha if available, overridable via env for CI without git
    let mut sha: Option<String> = std::env::var("GIT_SHA").ok().filter(|s| !s.is_empty());
    if sha.is_none() {
        if let Ok(output) = Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .output()
        {
            if output.status.success() {
                let s = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !s.is_empty() {
                    sha = Some(s);
                }
            }
        }
    }
    if let Some(sha) = sha {
        println!("cargo:rustc-env=POWERCTL_GIT_COMMIT={}", sha);
    }

    // Honour SOURCE_DATE_EPOCH for reproducible builds
    let built_at = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(chrono::Utc::now);
    println!(
        "cargo:rustc-env=POWERCTL_BUILD_DATE={}",
        built_at.format("%Y-%m-%dT%H:%M:%SZ")
    );

    println!("cargo:rerun-if-env-changed=GIT_SHA");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
}
