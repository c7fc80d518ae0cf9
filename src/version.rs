//! Build information reported by `powerctl version`.

use std::io::{self, Write};

/// Version and provenance of the running binary.
///
/// Values are captured at compile time by the build script and handed to whoever
/// prints them; nothing here is global or mutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    /// Crate version.
    pub version: &'static str,
    /// Short git commit the binary was built from, `unknown` outside a checkout.
    pub git_commit: &'static str,
    /// UTC build timestamp.
    pub build_date: &'static str,
}

impl BuildInfo {
    /// Build information of this binary.
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_commit: match option_env!("POWERCTL_GIT_COMMIT") {
                Some(sha) => sha,
                None => "unknown",
            },
            build_date: match option_env!("POWERCTL_BUILD_DATE") {
                Some(date) => date,
                None => "unknown",
            },
        }
    }

    /// Write the human readable version report.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "powerctl version {}", self.version)?;
        writeln!(out, "Git commit: {}", self.git_commit)?;
        writeln!(out, "Built: {}", self.build_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_every_field() {
        let info = BuildInfo {
            version: "1.2.3",
            git_commit: "abc1234",
            build_date: "2024-01-15T12:00:00Z",
        };
        let mut out = Vec::new();
        info.write_to(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "powerctl version 1.2.3\nGit commit: abc1234\nBuilt: 2024-01-15T12:00:00Z\n"
        );
    }

    #[test]
    fn current_uses_crate_version() {
        assert_eq!(BuildInfo::current().version, env!("CARGO_PKG_VERSION"));
    }
}
