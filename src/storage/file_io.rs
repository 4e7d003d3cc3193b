//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave a torn file behind on failure.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::error::NightlyError;

/// Read a whole file, returning `None` if it doesn't exist
pub fn read_optional<P: AsRef<Path>>(path: P) -> Result<Option<Vec<u8>>, NightlyError> {
    let path = path.as_ref();

    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(NightlyError::Io(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Temp file used while replacing `path`; lives in the same directory so the
/// final rename stays on one filesystem
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace a file's contents atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all, so a reader
/// never sees a partial document.
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), NightlyError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            NightlyError::WriteFailure(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);

    let result = (|| -> Result<(), String> {
        let file = File::create(&temp_path)
            .map_err(|e| format!("Failed to create temp file: {}", e))?;

        let mut writer = BufWriter::new(file);
        writer
            .write_all(bytes)
            .map_err(|e| format!("Failed to write data: {}", e))?;
        writer
            .flush()
            .map_err(|e| format!("Failed to flush data: {}", e))?;

        // Sync to disk before rename
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| format!("Failed to sync data: {}", e))?;

        fs::rename(&temp_path, path).map_err(|e| format!("Failed to rename temp file: {}", e))
    })();

    result.map_err(|message| {
        let _ = fs::remove_file(&temp_path);
        NightlyError::WriteFailure(format!("{}: {}", path.display(), message))
    })
}

/// Serialize a value as pretty JSON and write it atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), NightlyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| NightlyError::Json(format!("Failed to serialize data: {}", e)))?;
    write_bytes_atomic(path, &bytes)
}

/// Move an unreadable file aside so later writes don't overwrite it
///
/// The new name carries a timestamp, plus a `-N` counter when an earlier
/// file already took that name. Returns the new location.
pub fn quarantine<P: AsRef<Path>>(path: P) -> Result<PathBuf, NightlyError> {
    let path = path.as_ref();
    let target = quarantine_target(path);

    fs::rename(path, &target).map_err(|e| {
        NightlyError::Io(format!(
            "Failed to move {} aside: {}",
            path.display(),
            e
        ))
    })?;

    Ok(target)
}

/// First unused `<name>.corrupt-<stamp>[-N]` next to `path`
fn quarantine_target(path: &Path) -> PathBuf {
    let mut base = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    base.push(format!(".corrupt-{}", Utc::now().format("%Y%m%d-%H%M%S")));

    let mut attempt = 0u32;
    loop {
        let mut name = base.clone();
        if attempt > 0 {
            name.push(format!("-{}", attempt));
        }
        let candidate = path.with_file_name(name);
        // symlink_metadata so a dangling link still counts as taken
        if candidate.symlink_metadata().is_err() {
            return candidate;
        }
        attempt += 1;
    }
}
