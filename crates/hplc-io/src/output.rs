//! Output folder handling.

use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

use hplc_core::errors::{ErrorInfo, HplcError};
use log::{info, warn};

pub(crate) fn io_error(code: &str, err: impl ToString, path: &Path) -> HplcError {
    HplcError::Io(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Last normal component of a folder path (`runs/plate_batch/` gives `plate_batch`).
pub fn folder_name(folder: &Path) -> Option<String> {
    folder.components().rev().find_map(|component| match component {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    })
}

/// Default output folder: a sibling of the manifest folder named `<folder>_output`.
pub fn default_output_dir(folder: &Path) -> PathBuf {
    let trimmed: PathBuf = folder
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    let mut name = trimmed
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("manifest"));
    name.push("_output");
    trimmed.with_file_name(name)
}

/// Creates the output folder, refusing to reuse an existing one unless `force` is set.
pub fn prepare_output_dir(path: &Path, force: bool) -> Result<(), HplcError> {
    if path.exists() {
        if !force {
            return Err(HplcError::Io(
                ErrorInfo::new("output.exists", "output folder already exists")
                    .with_context("path", path.display().to_string())
                    .with_hint("pass --force to overwrite its files"),
            ));
        }
        if !path.is_dir() {
            return Err(io_error("output.not_a_folder", "output path is not a folder", path));
        }
        warn!("overwriting files in {}", path.display());
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|err| io_error("output.create", err, path))?;
    info!("created output folder {}", path.display());
    Ok(())
}
