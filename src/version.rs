//! Version numbers carried by an AVC version file.
//!
//! A release tag has the form `major.minor.patch.build` (e.g. `0.4.6.0`).
//! The game version a mod targets is a plain `major.minor.patch` triple.

use anyhow::{Context, Result, anyhow, bail};
use log::warn;
use serde::Serialize;
use std::str::FromStr;

const SEGMENT_NAMES: [&str; 4] = ["major", "minor", "patch", "build"];

/// Mod version parsed from a release tag.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub struct ModVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub build: u64,
}

impl ModVersion {
    pub const fn new(major: u64, minor: u64, patch: u64, build: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }
}

impl std::fmt::Display for ModVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

impl FromStr for ModVersion {
    type Err = anyhow::Error;

    /// Parse a `major.minor.patch.build` tag.
    ///
    /// Only the first four segments are read; anything after them is dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        if segments.len() < SEGMENT_NAMES.len() {
            bail!(
                "Invalid tag '{}': expected 'major.minor.patch.build' (e.g. 0.4.6.0), found {} segment(s)",
                s,
                segments.len()
            );
        }
        if segments.len() > SEGMENT_NAMES.len() {
            warn!(
                "Tag '{}' has {} segments, ignoring everything after '{}'",
                s,
                segments.len(),
                segments[..SEGMENT_NAMES.len()].join(".")
            );
        }

        let mut parts = [0u64; 4];
        for (i, name) in SEGMENT_NAMES.iter().enumerate() {
            parts[i] = parse_segment(segments[i])
                .with_context(|| format!("Invalid {} component in tag '{}'", name, s))?;
        }

        Ok(ModVersion::new(parts[0], parts[1], parts[2], parts[3]))
    }
}

fn parse_segment(segment: &str) -> Result<u64> {
    if segment.is_empty() {
        return Err(anyhow!("segment is empty"));
    }
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(anyhow!("'{}' is not a non-negative integer", segment));
    }
    segment
        .parse::<u64>()
        .with_context(|| format!("'{}' is out of range", segment))
}

/// Game version a release is built against.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub struct KspVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl KspVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl std::fmt::Display for KspVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_tag() {
        let version: ModVersion = "0.4.6.0".parse().unwrap();
        assert_eq!(version, ModVersion::new(0, 4, 6, 0));
    }

    #[test]
    fn test_parse_multi_digit_segments() {
        let version: ModVersion = "10.20.300.4000".parse().unwrap();
        assert_eq!(version.major, 10);
        assert_eq!(version.minor, 20);
        assert_eq!(version.patch, 300);
        assert_eq!(version.build, 4000);
    }

    #[test]
    fn test_parse_leading_zeros() {
        let version: ModVersion = "01.002.0.7".parse().unwrap();
        assert_eq!(version, ModVersion::new(1, 2, 0, 7));
    }

    #[test]
    fn test_parse_ignores_extra_segments() {
        let version: ModVersion = "1.2.3.4.5".parse().unwrap();
        assert_eq!(version, ModVersion::new(1, 2, 3, 4));

        // Extra segments are not validated
        let version: ModVersion = "1.2.3.4.beta".parse().unwrap();
        assert_eq!(version, ModVersion::new(1, 2, 3, 4));
    }

    #[test]
    fn test_parse_too_few_segments() {
        let err = "1.2.3".parse::<ModVersion>().unwrap_err();
        assert!(err.to_string().contains("1.2.3"));
        assert!(err.to_string().contains("3 segment(s)"));

        assert!("1".parse::<ModVersion>().is_err());
        assert!("".parse::<ModVersion>().is_err());
    }

    #[test]
    fn test_parse_non_numeric_segment() {
        let err = "0.4.x.0".parse::<ModVersion>().unwrap_err();
        assert!(err.to_string().contains("patch"));
        assert!(format!("{:#}", err).contains("'x' is not a non-negative integer"));
    }

    #[test]
    fn test_parse_rejects_v_prefix() {
        let err = "v0.4.6.0".parse::<ModVersion>().unwrap_err();
        assert!(err.to_string().contains("major"));
    }

    #[test]
    fn test_parse_rejects_signs_and_whitespace() {
        assert!("-1.2.3.4".parse::<ModVersion>().is_err());
        assert!("+1.2.3.4".parse::<ModVersion>().is_err());
        assert!("1.2.3. 4".parse::<ModVersion>().is_err());
    }

    #[test]
    fn test_parse_rejects_empty_segment() {
        let err = "1..3.4".parse::<ModVersion>().unwrap_err();
        assert!(err.to_string().contains("minor"));
        assert!(format!("{:#}", err).contains("segment is empty"));
    }

    #[test]
    fn test_parse_segment_above_u32() {
        let version: ModVersion = "4294967296.0.0.0".parse().unwrap();
        assert_eq!(version.major, u64::from(u32::MAX) + 1);

        let json = serde_json::to_string(&version).unwrap();
        assert!(json.contains(r#""MAJOR":4294967296"#));
    }

    #[test]
    fn test_parse_rejects_overflow() {
        // u64::MAX + 1
        let err = "1.2.3.18446744073709551616"
            .parse::<ModVersion>()
            .unwrap_err();
        assert!(err.to_string().contains("build"));
        assert!(format!("{:#}", err).contains("out of range"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ModVersion::new(0, 4, 6, 0).to_string(), "0.4.6.0");
        assert_eq!(KspVersion::new(0, 90, 0).to_string(), "0.90.0");
    }

    #[test]
    fn test_serialize_uppercase_keys() {
        let json = serde_json::to_string(&ModVersion::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, r#"{"MAJOR":1,"MINOR":2,"PATCH":3,"BUILD":4}"#);

        let json = serde_json::to_string(&KspVersion::new(0, 90, 0)).unwrap();
        assert_eq!(json, r#"{"MAJOR":0,"MINOR":90,"PATCH":0}"#);
    }
}
