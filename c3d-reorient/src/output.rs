/// Output path resolution and replace-by-rename file writing.
use crate::error::{Result, TransformError};
use constants::c3d_format::{MODIFIED_PREFIX, REPORT_SUFFIX};
use std::fs;
use std::path::{Path, PathBuf};

/// Destination of a transform: the input itself, or a `modified_` sibling.
pub fn resolve_output_path(input: &Path, overwrite: bool) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| TransformError::InvalidPath(input.to_path_buf()))?;

    if overwrite {
        return Ok(input.to_path_buf());
    }

    let mut prefixed = std::ffi::OsString::from(MODIFIED_PREFIX);
    prefixed.push(file_name);
    Ok(input.with_file_name(prefixed))
}

/// JSON summary path next to the output: `<stem>_transform.json`.
pub fn report_path(output: &Path) -> Result<PathBuf> {
    let stem = output
        .file_stem()
        .ok_or_else(|| TransformError::InvalidPath(output.to_path_buf()))?
        .to_string_lossy()
        .to_string();
    Ok(output.with_file_name(format!("{stem}{REPORT_SUFFIX}")))
}

/// Write `bytes` to a hidden sibling and rename it over `target`, so a
/// failed write never leaves a partial file at `target`.
pub fn write_replacing(target: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = target
        .file_name()
        .ok_or_else(|| TransformError::InvalidPath(target.to_path_buf()))?
        .to_string_lossy()
        .to_string();
    let temp_path = target.with_file_name(format!(".{file_name}.tmp"));

    if let Err(e) = fs::write(&temp_path, bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(TransformError::io(&temp_path, e));
    }

    fs::rename(&temp_path, target).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TransformError::io(target, e)
    })
}
