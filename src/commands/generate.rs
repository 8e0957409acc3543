use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{
    avc::{AvcFile, ModConfig},
    runtime::Runtime,
    version::ModVersion,
};

/// Generate the version file for `tag` in the current directory.
///
/// The tag is validated before anything is written; an invalid tag leaves
/// any existing version file untouched. Returns the path that was written.
#[tracing::instrument(skip(runtime, config))]
pub fn generate<R: Runtime>(runtime: &R, config: &ModConfig, tag: &str) -> Result<PathBuf> {
    let version: ModVersion = tag.parse()?;
    debug!("Parsed tag '{}' as version {}", tag, version);

    let avc = AvcFile::new(config, tag, version);
    let json = avc.to_json()?;

    let path = config.version_file_name();
    replace_file(runtime, &path, json.as_bytes())?;
    info!(
        "Wrote {} for {} {} (KSP {})",
        path.display(),
        config.name,
        version,
        config.ksp_version
    );

    Ok(path)
}

/// Write `contents` next to `path` and rename it into place.
///
/// The temporary file is removed again if either step fails.
fn replace_file<R: Runtime>(runtime: &R, path: &Path, contents: &[u8]) -> Result<()> {
    let tmp_path = tmp_path_for(path);

    let result = runtime
        .write(&tmp_path, contents)
        .and_then(|()| runtime.rename(&tmp_path, path));

    if let Err(e) = result {
        if let Err(cleanup) = runtime.remove_file(&tmp_path) {
            warn!("Failed to remove {}: {:#}", tmp_path.display(), cleanup);
        }
        return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
    }

    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
