//! AVC version file model.
//!
//! The add-on version checker reads a `<Mod>.version` JSON document with
//! upper-case keys. [`ModConfig`] holds everything that is fixed for a mod;
//! [`AvcFile`] is the document for one release.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io;
use std::path::PathBuf;

use crate::version::{KspVersion, ModVersion};

/// Per-mod constants used to build a version file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModConfig {
    /// Display name, also used for the release archive and the output filename
    pub name: &'static str,
    /// Version checker lookup URL
    pub info_url: &'static str,
    /// GitHub repository in the format "owner/repo"
    pub repo: &'static str,
    /// Game version the mod targets
    pub ksp_version: KspVersion,
}

impl ModConfig {
    pub const REAL_SCIENCE: ModConfig = ModConfig {
        name: "RealScience",
        info_url: "http://ksp-avc.cybutek.net/version.php?id=137",
        repo: "jwvanderbeck/RealScience",
        ksp_version: KspVersion::new(0, 90, 0),
    };

    /// Release asset URL, e.g. `.../releases/download/0.4.6.0/RealScience-0.4.6.0.zip`
    pub fn download_url(&self, tag: &str) -> String {
        format!(
            "https://github.com/{}/releases/download/{}/{}-{}.zip",
            self.repo, tag, self.name, tag
        )
    }

    pub fn change_log_url(&self, tag: &str) -> String {
        format!("https://github.com/{}/releases/tag/{}", self.repo, tag)
    }

    /// Name of the version file, relative to the working directory.
    pub fn version_file_name(&self) -> PathBuf {
        PathBuf::from(format!("{}.version", self.name))
    }
}

/// Contents of an AVC `.version` file.
///
/// Field order is the key order of the serialized document. The order is
/// fixed here; nothing downstream depends on it.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AvcFile {
    pub name: String,
    pub url: String,
    pub download: String,
    pub change_log_url: String,
    pub version: ModVersion,
    pub ksp_version: KspVersion,
}

impl AvcFile {
    /// Build the document for `tag`. The tag is substituted into the URLs verbatim.
    pub fn new(config: &ModConfig, tag: &str, version: ModVersion) -> Self {
        AvcFile {
            name: config.name.to_string(),
            url: config.info_url.to_string(),
            download: config.download_url(tag),
            change_log_url: config.change_log_url(tag),
            version,
            ksp_version: config.ksp_version,
        }
    }

    /// Serialize to single-line JSON with `", "` and `": "` separators.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter);
        self.serialize(&mut serializer)
            .context("Failed to serialize version file")?;
        String::from_utf8(buf).context("Serialized version file is not valid UTF-8")
    }
}

/// Compact JSON with a space after every item and key separator.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
