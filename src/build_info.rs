//! Version and build stamp of the running binary
//!
//! `build.rs` exports a build counter and compile time; both are baked in
//! here and shown in the startup banner and by `report_status`.

use serde::Serialize;

pub const BUILD_NUMBER: u64 = build_number_from(option_env!("FERRITE_BUILD_NUMBER"));

/// UTC, `YYYY-MM-DDTHH:MM:SSZ`, or `unknown` outside a cargo build
pub const BUILD_TIMESTAMP: &str = match option_env!("FERRITE_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

const BANNER_TITLE: &str = "Ferrite Agencies Order Reports";
const BANNER_RULE: &str = "===============================================";

/// Decimal digits only; a missing or garbled counter reads as build 0
const fn build_number_from(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let digits = raw.as_bytes();
    let mut n: u64 = 0;
    let mut i = 0;
    while i < digits.len() {
        if !digits[i].is_ascii_digit() {
            return 0;
        }
        n = n * 10 + (digits[i] - b'0') as u64;
        i += 1;
    }
    n
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    fn banner_lines(&self) -> Vec<String> {
        vec![
            BANNER_RULE.to_string(),
            format!("  {}", BANNER_TITLE),
            format!("  {} v{} (build {})", self.name, self.version, self.build_number),
            format!("  Compiled: {}", self.build_timestamp),
            BANNER_RULE.to_string(),
        ]
    }
}

/// Banner on stderr; stdout carries the MCP stream
pub fn print_startup_banner() {
    for line in BuildInfo::current().banner_lines() {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_number_from() {
        assert_eq!(build_number_from(Some("42")), 42);
        assert_eq!(build_number_from(Some("")), 0);
        assert_eq!(build_number_from(Some("4x2")), 0);
        assert_eq!(build_number_from(None), 0);
    }

    #[test]
    fn test_banner_lines() {
        let info = BuildInfo {
            name: "ferrite-orders",
            version: "1.0.0",
            build_number: 17,
            build_timestamp: "2026-03-14T09:00:00Z",
        };
        let lines = info.banner_lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "  Ferrite Agencies Order Reports");
        assert_eq!(lines[2], "  ferrite-orders v1.0.0 (build 17)");
        assert_eq!(lines[3], "  Compiled: 2026-03-14T09:00:00Z");
    }

    #[test]
    fn test_current_build_info() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "ferrite-orders");
        assert!(!info.version.is_empty());
    }
}
